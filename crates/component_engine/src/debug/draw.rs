//! Debug line drawing
//!
//! Collision shapes are visualized as wireframe lines pushed into a
//! [`LineSink`]. The renderer owns the sink; this crate only produces
//! line segments.

use crate::foundation::math::{constants::TAU, Vec3, Vec4};
use crate::physics::{BoundingSphere, BoundingVolume, Capsule, OrientedBox};

/// Segments used to approximate a full circle
pub const CIRCLE_SEGMENTS: usize = 24;

/// Receiver of debug line segments
pub trait LineSink {
    /// Add a single line segment
    fn add_line(&mut self, start: Vec3, end: Vec3, color: Vec4);
}

/// A single debug line
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DebugLine {
    /// Start point in world space
    pub start: Vec3,
    /// End point in world space
    pub end: Vec3,
    /// RGBA color
    pub color: Vec4,
}

/// Line list collected for one frame
#[derive(Debug, Clone)]
pub struct DebugLineBatch {
    lines: Vec<DebugLine>,
    /// Master enable/disable flag
    pub enabled: bool,
}

impl DebugLineBatch {
    /// Create an enabled, empty batch
    pub fn new() -> Self {
        Self {
            lines: Vec::new(),
            enabled: true,
        }
    }

    /// Collected lines
    pub fn lines(&self) -> &[DebugLine] {
        &self.lines
    }

    /// Number of collected lines
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// True if nothing has been collected
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Drop all collected lines
    pub fn clear(&mut self) {
        self.lines.clear();
    }
}

impl Default for DebugLineBatch {
    fn default() -> Self {
        Self::new()
    }
}

impl LineSink for DebugLineBatch {
    fn add_line(&mut self, start: Vec3, end: Vec3, color: Vec4) {
        if !self.enabled {
            return;
        }
        self.lines.push(DebugLine { start, end, color });
    }
}

/// Draw a world-space bounding volume
pub fn draw_bounding_volume(sink: &mut dyn LineSink, volume: &BoundingVolume, color: Vec4) {
    match volume {
        BoundingVolume::Box { world, .. } => draw_box(sink, world, color),
        BoundingVolume::Sphere { world, .. } => draw_sphere(sink, world, color),
        BoundingVolume::Capsule { world, .. } => draw_capsule(sink, world, color),
    }
}

/// Twelve edges of an oriented box
pub fn draw_box(sink: &mut dyn LineSink, obb: &OrientedBox, color: Vec4) {
    const EDGES: [(usize, usize); 12] = [
        (0, 1), (1, 2), (2, 3), (3, 0),
        (4, 5), (5, 6), (6, 7), (7, 4),
        (0, 4), (1, 5), (2, 6), (3, 7),
    ];

    let corners = obb.corners();
    for (a, b) in EDGES {
        sink.add_line(corners[a], corners[b], color);
    }
}

/// Three great circles
pub fn draw_sphere(sink: &mut dyn LineSink, sphere: &BoundingSphere, color: Vec4) {
    let (x, y, z) = (Vec3::x(), Vec3::y(), Vec3::z());
    draw_arc(sink, sphere.center, x, y, sphere.radius, 0.0, TAU, color);
    draw_arc(sink, sphere.center, x, z, sphere.radius, 0.0, TAU, color);
    draw_arc(sink, sphere.center, y, z, sphere.radius, 0.0, TAU, color);
}

/// Two end rings, four side lines and a half-circle cap per end in each of
/// the two planes containing the long axis
pub fn draw_capsule(sink: &mut dyn LineSink, capsule: &Capsule, color: Vec4) {
    let up = capsule.up();
    let right = capsule.rotation * Vec3::x();
    let forward = capsule.rotation * Vec3::y();
    let (bottom, top) = capsule.segment();
    let r = capsule.radius;
    let half_turn = TAU * 0.5;

    draw_arc(sink, top, right, forward, r, 0.0, TAU, color);
    draw_arc(sink, bottom, right, forward, r, 0.0, TAU, color);

    for side in [right, -right, forward, -forward] {
        sink.add_line(bottom + side * r, top + side * r, color);
    }

    for side in [right, forward] {
        draw_arc(sink, top, side, up, r, 0.0, half_turn, color);
        draw_arc(sink, bottom, side, -up, r, 0.0, half_turn, color);
    }
}

/// Arc in the plane spanned by `u` and `v`, from `start` to `end` radians
#[allow(clippy::too_many_arguments)]
fn draw_arc(sink: &mut dyn LineSink, center: Vec3, u: Vec3, v: Vec3, radius: f32, start: f32, end: f32, color: Vec4) {
    let sweep = end - start;
    #[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let segments = ((CIRCLE_SEGMENTS as f32 * (sweep / TAU)).ceil() as usize).max(1);

    let point = |angle: f32| center + (u * angle.cos() + v * angle.sin()) * radius;
    let mut previous = point(start);
    for i in 1..=segments {
        #[allow(clippy::cast_precision_loss)]
        let angle = start + sweep * (i as f32 / segments as f32);
        let next = point(angle);
        sink.add_line(previous, next, color);
        previous = next;
    }
}
