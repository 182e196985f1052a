//! Overlap tracking and notification
//!
//! `update_overlaps(c)` works in three passes:
//!
//! 1. **Detect**: refresh the broad phase, query candidates for `c` and run
//!    the narrow phase on each.
//! 2. **Record**: diff against `c`'s previous records and apply the
//!    begin/end/retain changes to both sides of every pair.
//! 3. **Notify**: broadcast component delegates, then forward to the owning
//!    actors.
//!
//! Records are final before any handler runs, so a handler sees a
//! consistent world. Handlers cannot mutate the world directly; they queue
//! destruction through [`super::CommandQueue`], which is applied once
//! notification is over. Targets already queued for destruction are not
//! notified.

use super::actor::Actor;
use super::world::World;
use crate::components::OverlapInfo;
use crate::events::{
    ActorBeginOverlap, ActorEndOverlap, ActorHit, ComponentBeginOverlap, ComponentEndOverlap, ComponentHit,
};
use crate::foundation::math::Vec3;
use crate::object::{Object, ObjectId};
use crate::physics::{CollisionResponse, HitResult};

/// One pending delegate call
#[derive(Debug, Clone, Copy, PartialEq)]
enum Notification {
    Begin {
        target: ObjectId,
        other: ObjectId,
        other_actor: Option<ObjectId>,
        hit: HitResult,
    },
    End {
        target: ObjectId,
        other: ObjectId,
        other_actor: Option<ObjectId>,
    },
    Hit {
        target: ObjectId,
        other: ObjectId,
        other_actor: Option<ObjectId>,
        hit: HitResult,
    },
}

impl Notification {
    fn target(&self) -> ObjectId {
        match *self {
            Self::Begin { target, .. } | Self::End { target, .. } | Self::Hit { target, .. } => target,
        }
    }
}

/// A candidate that passed the narrow phase this update
struct CurrentOverlap {
    other: ObjectId,
    other_actor: Option<ObjectId>,
    hit: HitResult,
    mirrored: HitResult,
}

impl World {
    /// Recompute what `component` overlaps and fire the resulting events
    ///
    /// Both sides of every pair are updated, so the other component does
    /// not need its own call. Ids that are not live primitives are ignored.
    pub fn update_overlaps(&mut self, component: ObjectId) {
        self.sync_spatial_index();
        let notifications = self.record_overlaps(component);
        self.notify(&notifications);
        self.flush_commands();
    }

    /// Run [`World::update_overlaps`] for every live primitive
    pub fn update_all_overlaps(&mut self) {
        for id in self.registry.ids() {
            if self.primitive(id).is_some() {
                self.update_overlaps(id);
            }
        }
    }

    /// Push fresh bounds for every moved primitive into the spatial index
    pub(crate) fn sync_spatial_index(&mut self) {
        for id in self.registry.ids() {
            let Some(primitive) = self.registry.get_mut(id).and_then(|o| o.as_primitive_mut()) else {
                continue;
            };
            if !primitive.needs_spatial_update() {
                continue;
            }
            let bounds = primitive.calc_bounds();
            primitive.clear_spatial_dirty();
            self.spatial.update(id, bounds);
        }
    }

    fn detect_overlaps(&mut self, component: ObjectId) -> Option<Vec<CurrentOverlap>> {
        let primitive = self.registry.get_mut(component)?.as_primitive_mut()?;
        let bounds = primitive.calc_bounds();
        let response = primitive.collision_response();
        let owner = primitive.owner();
        let location = primitive.scene().world_location();
        let Some(shape) = primitive.collision_shape().cloned() else {
            return Some(Vec::new());
        };

        let mut candidates = Vec::new();
        for id in self.spatial.query_aabb(&bounds) {
            if id != component && !candidates.contains(&id) {
                candidates.push(id);
            }
        }

        let mut current = Vec::new();
        for other in candidates {
            let Some(other_primitive) = self.registry.get_mut(other).and_then(|o| o.as_primitive_mut()) else {
                continue;
            };
            let other_response = other_primitive.collision_response();
            let other_actor = other_primitive.owner();
            let other_location = other_primitive.scene().world_location();
            let Some(other_shape) = other_primitive.collision_shape() else {
                continue;
            };

            let blocking = CollisionResponse::for_pair(response, other_response).is_blocking();
            let result = self.narrow_phase.collide(&shape, other_shape, blocking);
            if !result.overlapping {
                continue;
            }

            let hit = HitResult {
                component: Some(other),
                actor: other_actor,
                blocking_hit: blocking,
                location: other_location,
                contact: result.contact,
            };
            current.push(CurrentOverlap {
                other,
                other_actor,
                hit,
                mirrored: hit.mirrored(Some(component), owner, location),
            });
        }
        Some(current)
    }

    fn record_overlaps(&mut self, component: ObjectId) -> Vec<Notification> {
        let mut notifications = Vec::new();
        let Some(current) = self.detect_overlaps(component) else {
            return notifications;
        };
        if let Some(primitive) = self.primitive_mut(component) {
            primitive.clear_overlap_dirty();
        }
        let Some(primitive) = self.primitive(component) else {
            return notifications;
        };
        let owner = primitive.owner();
        let previous: Vec<ObjectId> = primitive.overlap_infos().iter().map(OverlapInfo::component_id).collect();

        // Ended, including records of components destroyed since last time
        for other in previous.iter().copied() {
            if current.iter().any(|c| c.other == other) {
                continue;
            }
            let other_alive = self.primitive(other).is_some();
            let other_actor = if other_alive { self.owner_of(other) } else { None };

            let removed_here = self
                .primitive_mut(component)
                .map_or(false, |p| p.remove_overlap(other));
            let removed_there = other_alive
                && self
                    .primitive_mut(other)
                    .map_or(false, |p| p.remove_overlap(component));

            log::debug!("Overlap ended: {} / {}", component, other);
            if removed_here {
                notifications.push(Notification::End {
                    target: component,
                    other,
                    other_actor,
                });
            }
            if removed_there {
                notifications.push(Notification::End {
                    target: other,
                    other: component,
                    other_actor: owner,
                });
            }
        }

        for overlap in &current {
            let other = overlap.other;

            if previous.contains(&other) {
                if let Some(info) = self.primitive_mut(component).and_then(|p| p.overlap_mut(other)) {
                    info.cached_hit_result = Some(overlap.hit);
                }
                if let Some(info) = self.primitive_mut(other).and_then(|p| p.overlap_mut(component)) {
                    info.cached_hit_result = Some(overlap.mirrored);
                }
                continue;
            }

            let added_here = self
                .primitive_mut(component)
                .map_or(false, |p| p.add_overlap(OverlapInfo::with_hit(other, overlap.hit)));
            let added_there = self
                .primitive_mut(other)
                .map_or(false, |p| p.add_overlap(OverlapInfo::with_hit(component, overlap.mirrored)));

            if overlap.hit.blocking_hit {
                log::debug!("Hit: {} / {}", component, other);
                if added_here {
                    notifications.push(Notification::Hit {
                        target: component,
                        other,
                        other_actor: overlap.other_actor,
                        hit: overlap.hit,
                    });
                }
                if added_there {
                    notifications.push(Notification::Hit {
                        target: other,
                        other: component,
                        other_actor: owner,
                        hit: overlap.mirrored,
                    });
                }
            } else {
                log::debug!("Overlap began: {} / {}", component, other);
                if added_here {
                    notifications.push(Notification::Begin {
                        target: component,
                        other,
                        other_actor: overlap.other_actor,
                        hit: overlap.hit,
                    });
                }
                if added_there {
                    notifications.push(Notification::Begin {
                        target: other,
                        other: component,
                        other_actor: owner,
                        hit: overlap.mirrored,
                    });
                }
            }
        }
        notifications
    }

    fn is_doomed(&self, id: ObjectId) -> bool {
        self.commands.is_pending_destroy(id)
            || self
                .owner_of(id)
                .map_or(false, |owner| self.commands.is_pending_destroy(owner))
    }

    fn notify(&self, notifications: &[Notification]) {
        for notification in notifications {
            let target = notification.target();
            if self.is_doomed(target) {
                log::trace!("Skipping notification for {} (pending destroy)", target);
                continue;
            }
            let Some(primitive) = self.primitive(target) else {
                continue;
            };
            let forward_to = primitive.owner().and_then(|owner| self.actor(owner).map(|actor| (owner, actor)));

            match *notification {
                Notification::Begin {
                    other,
                    other_actor,
                    hit,
                    ..
                } => {
                    let event = ComponentBeginOverlap {
                        overlapped_component: target,
                        other_actor,
                        other_component: other,
                        from_sweep: false,
                        sweep_result: hit,
                    };
                    primitive.on_component_begin_overlap.broadcast(&self.registry, &event);

                    if let Some((owner, actor)) = self.forward_target(forward_to, other_actor) {
                        let event = ActorBeginOverlap {
                            overlapped_actor: owner,
                            other_actor,
                            overlapped_component: target,
                            other_component: other,
                        };
                        actor.on_actor_begin_overlap.broadcast(&self.registry, &event);
                    }
                }
                Notification::End { other, other_actor, .. } => {
                    let event = ComponentEndOverlap {
                        overlapped_component: target,
                        other_actor,
                        other_component: other,
                    };
                    primitive.on_component_end_overlap.broadcast(&self.registry, &event);

                    if let Some((owner, actor)) = self.forward_target(forward_to, other_actor) {
                        let event = ActorEndOverlap {
                            overlapped_actor: owner,
                            other_actor,
                            overlapped_component: target,
                            other_component: other,
                        };
                        actor.on_actor_end_overlap.broadcast(&self.registry, &event);
                    }
                }
                Notification::Hit {
                    other,
                    other_actor,
                    hit,
                    ..
                } => {
                    let normal_impulse = reported_impulse(&hit);
                    let event = ComponentHit {
                        hit_component: target,
                        other_actor,
                        other_component: other,
                        normal_impulse,
                        hit,
                    };
                    primitive.on_component_hit.broadcast(&self.registry, &event);

                    if let Some((owner, actor)) = self.forward_target(forward_to, other_actor) {
                        let event = ActorHit {
                            self_actor: owner,
                            other_actor,
                            hit_component: target,
                            other_component: other,
                            normal_impulse,
                            hit,
                        };
                        actor.on_actor_hit.broadcast(&self.registry, &event);
                    }
                }
            }
        }
    }

    /// Owner actor to forward to, unless both sides share it
    fn forward_target<'a>(
        &self,
        owner: Option<(ObjectId, &'a Actor)>,
        other_actor: Option<ObjectId>,
    ) -> Option<(ObjectId, &'a Actor)> {
        let (owner_id, actor) = owner?;
        if other_actor == Some(owner_id) || self.commands.is_pending_destroy(owner_id) {
            return None;
        }
        Some((owner_id, actor))
    }
}

/// Impulse placeholder reported with hits: contact normal scaled by depth
fn reported_impulse(hit: &HitResult) -> Vec3 {
    hit.impact_normal() * hit.penetration_depth()
}
