//! Narrow-phase shape tests
//!
//! Every shape pair answers "do these overlap?". Only box-vs-box also
//! reports contact geometry; other pairs return a boolean result and no
//! [`ContactDetail`]. Callers can ask [`supports_contact_detail`] up front
//! instead of guessing a normal.

use super::bounding_volume::{BoundingSphere, BoundingVolume, Capsule, OrientedBox, ShapeKind};
use super::hit_result::ContactDetail;
use crate::core::config::CollisionConfig;
use crate::foundation::math::Vec3;

/// Outcome of a single pair test
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct NarrowPhaseResult {
    /// True if the shapes touch or intersect
    pub overlapping: bool,
    /// Contact seen from the first shape, when requested and supported
    pub contact: Option<ContactDetail>,
}

/// True if the pair can report a contact normal and penetration depth
pub fn supports_contact_detail(a: ShapeKind, b: ShapeKind) -> bool {
    matches!((a, b), (ShapeKind::Box, ShapeKind::Box))
}

/// Pairwise overlap tester
#[derive(Debug, Clone, Copy)]
pub struct NarrowPhase {
    capsule_box_iterations: u32,
    contact_epsilon: f32,
}

impl NarrowPhase {
    /// Build from collision settings
    pub fn from_config(config: &CollisionConfig) -> Self {
        Self {
            capsule_box_iterations: config.capsule_box_iterations.max(1),
            contact_epsilon: config.contact_epsilon,
        }
    }

    /// Boolean overlap test
    pub fn overlaps(&self, a: &BoundingVolume, b: &BoundingVolume) -> bool {
        self.collide(a, b, false).overlapping
    }

    /// Overlap test, optionally with contact detail for `a`
    ///
    /// The contact normal points from `b` toward `a`.
    pub fn collide(&self, a: &BoundingVolume, b: &BoundingVolume, want_contact: bool) -> NarrowPhaseResult {
        use BoundingVolume as V;

        let overlapping = match (a, b) {
            (V::Box { world: box_a, .. }, V::Box { world: box_b, .. }) => {
                return self.box_box(box_a, box_b, want_contact);
            }
            (V::Sphere { world: sa, .. }, V::Sphere { world: sb, .. }) => sa.intersects(sb),
            (V::Box { world: obb, .. }, V::Sphere { world: sphere, .. })
            | (V::Sphere { world: sphere, .. }, V::Box { world: obb, .. }) => sphere_box(sphere, obb),
            (V::Capsule { world: capsule, .. }, V::Sphere { world: sphere, .. })
            | (V::Sphere { world: sphere, .. }, V::Capsule { world: capsule, .. }) => capsule_sphere(capsule, sphere),
            (V::Capsule { world: ca, .. }, V::Capsule { world: cb, .. }) => capsule_capsule(ca, cb),
            (V::Capsule { world: capsule, .. }, V::Box { world: obb, .. })
            | (V::Box { world: obb, .. }, V::Capsule { world: capsule, .. }) => self.capsule_box(capsule, obb),
        };

        NarrowPhaseResult {
            overlapping,
            contact: None,
        }
    }

    /// Separating-axis test over the 15 candidate axes
    fn box_box(&self, a: &OrientedBox, b: &OrientedBox, want_contact: bool) -> NarrowPhaseResult {
        let axes_a = a.axes();
        let axes_b = b.axes();
        let delta = a.center - b.center;

        let mut candidates: Vec<Vec3> = Vec::with_capacity(15);
        candidates.extend_from_slice(&axes_a);
        candidates.extend_from_slice(&axes_b);
        for axis_a in &axes_a {
            for axis_b in &axes_b {
                candidates.push(axis_a.cross(axis_b));
            }
        }

        let project = |obb: &OrientedBox, axes: &[Vec3; 3], axis: &Vec3| -> f32 {
            axes.iter()
                .enumerate()
                .map(|(i, local)| local.dot(axis).abs() * obb.half_extents[i])
                .sum()
        };

        let mut best: Option<(f32, Vec3, f32)> = None;
        for axis in candidates {
            let length_squared = axis.magnitude_squared();
            if length_squared <= self.contact_epsilon {
                // Parallel edges produce a degenerate cross product
                continue;
            }
            let axis = axis / length_squared.sqrt();

            let ra = project(a, &axes_a, &axis);
            let rb = project(b, &axes_b, &axis);
            let distance = delta.dot(&axis);
            let overlap = ra + rb - distance.abs();
            if overlap < 0.0 {
                return NarrowPhaseResult::default();
            }

            if best.map_or(true, |(depth, _, _)| overlap < depth) {
                let normal = if distance < 0.0 { -axis } else { axis };
                best = Some((overlap, normal, ra));
            }
        }

        let contact = if want_contact {
            best.map(|(penetration_depth, normal, ra)| ContactDetail {
                normal,
                penetration_depth,
                point: a.center - normal * (ra - penetration_depth * 0.5),
            })
        } else {
            None
        };

        NarrowPhaseResult {
            overlapping: true,
            contact,
        }
    }

    /// Alternating closest-point refinement between the capsule segment and
    /// the box
    fn capsule_box(&self, capsule: &Capsule, obb: &OrientedBox) -> bool {
        let (start, end) = capsule.segment();
        let radius_squared = capsule.radius * capsule.radius;

        let mut on_segment = closest_point_on_segment(obb.center, start, end);
        for _ in 0..self.capsule_box_iterations {
            let on_box = obb.closest_point(on_segment);
            if (on_box - on_segment).magnitude_squared() <= radius_squared {
                return true;
            }
            let next = closest_point_on_segment(on_box, start, end);
            if (next - on_segment).magnitude_squared() <= f32::EPSILON {
                break;
            }
            on_segment = next;
        }

        let on_box = obb.closest_point(on_segment);
        (on_box - on_segment).magnitude_squared() <= radius_squared
    }
}

impl Default for NarrowPhase {
    fn default() -> Self {
        Self::from_config(&CollisionConfig::default())
    }
}

fn sphere_box(sphere: &BoundingSphere, obb: &OrientedBox) -> bool {
    let closest = obb.closest_point(sphere.center);
    (closest - sphere.center).magnitude_squared() <= sphere.radius * sphere.radius
}

fn capsule_sphere(capsule: &Capsule, sphere: &BoundingSphere) -> bool {
    let (start, end) = capsule.segment();
    let closest = closest_point_on_segment(sphere.center, start, end);
    let radius_sum = capsule.radius + sphere.radius;
    (closest - sphere.center).magnitude_squared() <= radius_sum * radius_sum
}

fn capsule_capsule(a: &Capsule, b: &Capsule) -> bool {
    let (pa, qa) = a.segment();
    let (pb, qb) = b.segment();
    let (ca, cb) = closest_points_between_segments(pa, qa, pb, qb);
    let radius_sum = a.radius + b.radius;
    (ca - cb).magnitude_squared() <= radius_sum * radius_sum
}

/// Closest point to `point` on segment `start..end`
pub fn closest_point_on_segment(point: Vec3, start: Vec3, end: Vec3) -> Vec3 {
    let segment = end - start;
    let length_squared = segment.magnitude_squared();
    if length_squared <= f32::EPSILON {
        return start;
    }
    let t = ((point - start).dot(&segment) / length_squared).clamp(0.0, 1.0);
    start + segment * t
}

/// Closest pair of points between segments `p1..q1` and `p2..q2`
pub fn closest_points_between_segments(p1: Vec3, q1: Vec3, p2: Vec3, q2: Vec3) -> (Vec3, Vec3) {
    let d1 = q1 - p1;
    let d2 = q2 - p2;
    let r = p1 - p2;
    let a = d1.magnitude_squared();
    let e = d2.magnitude_squared();
    let f = d2.dot(&r);

    if a <= f32::EPSILON && e <= f32::EPSILON {
        return (p1, p2);
    }

    let (s, t) = if a <= f32::EPSILON {
        (0.0, (f / e).clamp(0.0, 1.0))
    } else {
        let c = d1.dot(&r);
        if e <= f32::EPSILON {
            ((-c / a).clamp(0.0, 1.0), 0.0)
        } else {
            let b = d1.dot(&d2);
            let denom = a * e - b * b;
            let mut s = if denom > f32::EPSILON {
                ((b * f - c * e) / denom).clamp(0.0, 1.0)
            } else {
                0.0
            };
            let mut t = (b * s + f) / e;
            if t < 0.0 {
                t = 0.0;
                s = (-c / a).clamp(0.0, 1.0);
            } else if t > 1.0 {
                t = 1.0;
                s = ((b - c) / a).clamp(0.0, 1.0);
            }
            (s, t)
        }
    };

    (p1 + d1 * s, p2 + d2 * t)
}
