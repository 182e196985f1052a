//! The simulation root
//!
//! `World` owns the object registry, the broad-phase spatial index and the
//! deferred command queue. Every structural operation (spawning, attaching,
//! destroying, duplicating, binding scripts) goes through it so that the
//! scene tree, actor component lists and spatial index stay consistent.
//!
//! Overlap detection lives in [`super::overlap`].

use super::actor::Actor;
use super::commands::{CommandQueue, WorldCommand};
use super::serialization::{component_from_json, component_to_json, SerializationError};
use crate::components::{PrimitiveComponent, SceneComponent, ScriptComponent, ScriptHooks, ScriptSubscription, ShapeComponent};
use crate::core::config::CollisionConfig;
use crate::debug::LineSink;
use crate::events::CollisionEventKind;
use crate::foundation::json::JsonObject;
use crate::foundation::math::{Mat4, Quat, Transform, Vec3};
use crate::object::{Object, ObjectId, ObjectRegistry};
use crate::physics::NarrowPhase;
use crate::spatial::{LinearSpatialQuery, SpatialQuery};
use serde_json::Value;
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

/// Object registry, spatial index and overlap pipeline
pub struct World {
    pub(super) registry: ObjectRegistry,
    pub(super) spatial: Box<dyn SpatialQuery>,
    pub(super) config: CollisionConfig,
    pub(super) narrow_phase: NarrowPhase,
    pub(super) commands: CommandQueue,
}

impl World {
    /// Create a world with a brute-force spatial index
    pub fn new(config: CollisionConfig) -> Self {
        Self::with_spatial_query(config, Box::new(LinearSpatialQuery::new()))
    }

    /// Create a world over a custom spatial index
    ///
    /// An invalid configuration is replaced by the defaults.
    pub fn with_spatial_query(config: CollisionConfig, spatial: Box<dyn SpatialQuery>) -> Self {
        let config = match config.validate() {
            Ok(()) => config,
            Err(e) => {
                log::warn!("Invalid collision config ({}), using defaults", e);
                CollisionConfig::default()
            }
        };
        Self {
            registry: ObjectRegistry::new(),
            spatial,
            narrow_phase: NarrowPhase::from_config(&config),
            config,
            commands: CommandQueue::new(),
        }
    }

    /// Every live object
    pub fn registry(&self) -> &ObjectRegistry {
        &self.registry
    }

    /// Active collision settings
    pub fn config(&self) -> &CollisionConfig {
        &self.config
    }

    /// Broad-phase index
    pub fn spatial_query(&self) -> &dyn SpatialQuery {
        self.spatial.as_ref()
    }

    /// Handle for queuing structural changes from event handlers
    pub fn command_queue(&self) -> CommandQueue {
        self.commands.clone()
    }

    // ---- lookup ----

    /// Typed access to an object
    pub fn component<T: Object>(&self, id: ObjectId) -> Option<&T> {
        self.registry.get_as::<T>(id)
    }

    /// Typed mutable access to an object
    ///
    /// Transform changes made through this bypass subtree propagation; use
    /// the world's `set_relative_*` methods for attached components.
    pub fn component_mut<T: Object>(&mut self, id: ObjectId) -> Option<&mut T> {
        self.registry.get_as_mut::<T>(id)
    }

    /// Actor by id
    pub fn actor(&self, id: ObjectId) -> Option<&Actor> {
        self.registry.get_as::<Actor>(id)
    }

    /// Primitive view of any primitive-derived component
    pub fn primitive(&self, id: ObjectId) -> Option<&PrimitiveComponent> {
        self.registry.get(id)?.as_primitive()
    }

    /// Mutable primitive view
    pub fn primitive_mut(&mut self, id: ObjectId) -> Option<&mut PrimitiveComponent> {
        self.registry.get_mut(id)?.as_primitive_mut()
    }

    /// Scene view of any scene-derived component
    pub fn scene_component(&self, id: ObjectId) -> Option<&SceneComponent> {
        self.registry.get(id)?.as_scene_component()
    }

    fn scene_component_mut(&mut self, id: ObjectId) -> Option<&mut SceneComponent> {
        self.registry.get_mut(id)?.as_scene_component_mut()
    }

    /// Owning actor of a component
    pub fn owner_of(&self, id: ObjectId) -> Option<ObjectId> {
        self.registry.get(id)?.owner()
    }

    /// True if `id` refers to a live object
    pub fn is_valid(&self, id: ObjectId) -> bool {
        self.registry.is_valid(id)
    }

    // ---- spawning ----

    /// Create an empty actor
    pub fn spawn_actor(&mut self, name: impl Into<String>) -> ObjectId {
        let id = self.registry.register(Box::new(Actor::new(name)));
        log::debug!("Spawned actor {}", id);
        id
    }

    /// Register a component, optionally under an actor
    ///
    /// The first scene component an actor receives becomes its root. An
    /// owner that is not a live actor is ignored.
    pub fn add_component(&mut self, owner: Option<ObjectId>, component: Box<dyn Object>) -> ObjectId {
        let owner = owner.filter(|owner| {
            let is_actor = self.actor(*owner).is_some();
            if !is_actor {
                log::warn!("Ignoring owner {} that is not a live actor", owner);
            }
            is_actor
        });

        let id = self.registry.register(component);
        let is_scene = self.scene_component(id).is_some();

        if let Some(object) = self.registry.get_mut(id) {
            object.set_owner(owner);
        }
        if let Some(owner) = owner {
            self.registry.set_outer(id, Some(owner));
            if let Some(actor) = self.registry.get_as_mut::<Actor>(owner) {
                actor.push_component(id);
                if is_scene && actor.root_component().is_none() {
                    actor.set_root_component(Some(id));
                }
            }
        }

        if let Some(primitive) = self.primitive_mut(id) {
            primitive.mark_as_dirty();
            let bounds = primitive.calc_bounds();
            self.spatial.insert(id, bounds);
        }
        id
    }

    /// Create a box, sphere or capsule component
    ///
    /// Hit-event generation follows `shapes_generate_hit_events`.
    pub fn add_shape_component(
        &mut self,
        owner: Option<ObjectId>,
        name: impl Into<String>,
        shape: ShapeComponent,
    ) -> ObjectId {
        let component = PrimitiveComponent::with_shape(name, shape)
            .with_generate_hit_events(self.config.shapes_generate_hit_events);
        self.add_component(owner, Box::new(component))
    }

    // ---- scene graph ----

    /// Attach `child` under `parent`, keeping its relative transform
    ///
    /// Fails for self-attachment, cycles, and non-scene objects.
    pub fn attach_to_component(&mut self, child: ObjectId, parent: ObjectId) -> bool {
        if child == parent || self.scene_component(child).is_none() {
            return false;
        }
        let Some(parent_world) = self.scene_component(parent).map(|p| *p.world_matrix()) else {
            return false;
        };

        let mut ancestor = Some(parent);
        while let Some(current) = ancestor {
            if current == child {
                log::warn!("Refusing to attach {} under its own descendant {}", child, parent);
                return false;
            }
            ancestor = self.scene_component(current).and_then(SceneComponent::attach_parent);
        }

        self.unlink_from_parent(child);
        if let Some(parent_scene) = self.scene_component_mut(parent) {
            parent_scene.add_child(child);
        }
        if let Some(child_scene) = self.scene_component_mut(child) {
            child_scene.set_attach_parent(Some(parent), parent_world);
        }
        self.refresh_subtree(child);
        true
    }

    /// Detach from the attach parent, keeping the world transform
    pub fn detach_from_parent(&mut self, child: ObjectId) -> bool {
        let attached = self
            .scene_component(child)
            .map_or(false, |scene| scene.attach_parent().is_some());
        if !attached {
            return false;
        }
        self.unlink_from_parent(child);
        self.make_root_keep_world(child);
        true
    }

    fn unlink_from_parent(&mut self, child: ObjectId) {
        let parent = self.scene_component(child).and_then(SceneComponent::attach_parent);
        if let Some(parent_scene) = parent.and_then(|parent| self.scene_component_mut(parent)) {
            parent_scene.remove_child(child);
        }
    }

    fn make_root_keep_world(&mut self, id: ObjectId) {
        if let Some(scene) = self.scene_component_mut(id) {
            let world = Transform::from_matrix(scene.world_matrix());
            scene.set_attach_parent(None, Mat4::identity());
            scene.set_relative_transform(world);
        }
        self.refresh_subtree(id);
    }

    /// Recompute world matrices below `root` and dirty every primitive
    fn refresh_subtree(&mut self, root: ObjectId) {
        let mut stack = vec![root];
        while let Some(id) = stack.pop() {
            let Some(object) = self.registry.get_mut(id) else {
                continue;
            };
            if let Some(primitive) = object.as_primitive_mut() {
                primitive.mark_as_dirty();
            }
            let Some(scene) = object.as_scene_component() else {
                continue;
            };
            let world = *scene.world_matrix();
            let children = scene.attach_children().to_vec();

            for child in children {
                if let Some(child_scene) = self.scene_component_mut(child) {
                    child_scene.set_parent_world(world);
                    stack.push(child);
                }
            }
        }
    }

    fn modify_relative(&mut self, id: ObjectId, edit: impl FnOnce(&mut SceneComponent)) -> bool {
        let Some(scene) = self.scene_component_mut(id) else {
            return false;
        };
        edit(scene);
        self.refresh_subtree(id);
        true
    }

    /// Move a scene component and everything attached to it
    pub fn set_relative_location(&mut self, id: ObjectId, location: Vec3) -> bool {
        self.modify_relative(id, |scene| scene.set_relative_location(location))
    }

    /// Rotate a scene component and everything attached to it
    pub fn set_relative_rotation(&mut self, id: ObjectId, rotation: Quat) -> bool {
        self.modify_relative(id, |scene| scene.set_relative_rotation(rotation))
    }

    /// Scale a scene component and everything attached to it
    pub fn set_relative_scale(&mut self, id: ObjectId, scale: Vec3) -> bool {
        self.modify_relative(id, |scene| scene.set_relative_scale(scale))
    }

    /// Replace a scene component's relative transform
    pub fn set_relative_transform(&mut self, id: ObjectId, transform: Transform) -> bool {
        self.modify_relative(id, |scene| scene.set_relative_transform(transform))
    }

    /// World-space location
    pub fn world_location(&self, id: ObjectId) -> Option<Vec3> {
        self.scene_component(id).map(SceneComponent::world_location)
    }

    /// World-space rotation
    pub fn world_rotation(&self, id: ObjectId) -> Option<Quat> {
        self.scene_component(id).map(SceneComponent::world_rotation)
    }

    /// World-space scale
    pub fn world_scale(&self, id: ObjectId) -> Option<Vec3> {
        self.scene_component(id).map(SceneComponent::world_scale)
    }

    // ---- destruction ----

    /// Destroy an actor (with its components) or a single component
    pub fn destroy(&mut self, id: ObjectId) -> bool {
        if self.actor(id).is_some() {
            self.destroy_actor(id)
        } else {
            self.destroy_component(id)
        }
    }

    /// Destroy a component immediately
    ///
    /// Attached children are detached and keep their world transform. The
    /// other side of each overlap keeps its record until its next update,
    /// which then ends the overlap.
    pub fn destroy_component(&mut self, id: ObjectId) -> bool {
        if !self.registry.is_valid(id) || self.actor(id).is_some() {
            return false;
        }

        if self.component::<ScriptComponent>(id).is_some() {
            self.clear_script(id);
        }

        self.spatial.remove(id);
        self.unlink_from_parent(id);
        let children = self
            .scene_component_mut(id)
            .map(SceneComponent::clear_children)
            .unwrap_or_default();
        for child in children {
            self.make_root_keep_world(child);
        }

        if let Some(owner) = self.owner_of(id) {
            if let Some(actor) = self.registry.get_as_mut::<Actor>(owner) {
                actor.remove_component(id);
            }
        }

        self.registry.unregister(id);
        log::debug!("Destroyed component {}", id);
        true
    }

    /// Destroy an actor and every component it owns
    pub fn destroy_actor(&mut self, id: ObjectId) -> bool {
        let Some(components) = self.actor(id).map(|actor| actor.components().to_vec()) else {
            return false;
        };
        // Scripts first so their end_play still sees the rest of the actor
        let (scripts, others): (Vec<_>, Vec<_>) = components
            .into_iter()
            .partition(|c| self.component::<ScriptComponent>(*c).is_some());
        for component in scripts.into_iter().chain(others) {
            self.destroy_component(component);
        }
        self.registry.unregister(id);
        log::debug!("Destroyed actor {}", id);
        true
    }

    /// Apply every queued command; returns how many objects were destroyed
    pub fn flush_commands(&mut self) -> usize {
        let mut destroyed = 0;
        loop {
            let commands = self.commands.drain();
            if commands.is_empty() {
                break;
            }
            for command in commands {
                match command {
                    WorldCommand::Destroy(id) => {
                        if self.destroy(id) {
                            destroyed += 1;
                        }
                    }
                }
            }
        }
        if destroyed > 0 {
            log::debug!("Deferred destruction flushed {} object(s)", destroyed);
        }
        destroyed
    }

    // ---- duplication ----

    /// Register a copy of a component under `owner`
    pub fn duplicate_component(&mut self, id: ObjectId, owner: Option<ObjectId>) -> Option<ObjectId> {
        if self.actor(id).is_some() {
            return None;
        }
        let copy = self.registry.get(id)?.duplicate();
        Some(self.add_component(owner, copy))
    }

    /// Copy an actor and all of its components
    ///
    /// Attachments between the copied components are reproduced; the
    /// copy's root is the copy of the original root.
    pub fn duplicate_actor(&mut self, id: ObjectId) -> Option<ObjectId> {
        let actor = self.actor(id)?;
        let components = actor.components().to_vec();
        let root = actor.root_component();
        let copy = actor.duplicate();

        let new_actor = self.registry.register(copy);
        let mut remap = HashMap::new();
        for component in &components {
            if let Some(new_component) = self.duplicate_component(*component, Some(new_actor)) {
                remap.insert(*component, new_component);
            }
        }

        for component in &components {
            let parent = self.scene_component(*component).and_then(SceneComponent::attach_parent);
            if let (Some(parent), Some(new_component)) = (parent, remap.get(component)) {
                let new_parent = remap.get(&parent).copied().unwrap_or(parent);
                self.attach_to_component(*new_component, new_parent);
            }
        }

        if let Some(actor) = self.registry.get_as_mut::<Actor>(new_actor) {
            actor.set_root_component(root.and_then(|root| remap.get(&root).copied()));
        }
        log::debug!("Duplicated actor {} as {}", id, new_actor);
        Some(new_actor)
    }

    // ---- queries ----

    /// True if any component of `actor` overlaps any live component of `other`
    pub fn is_overlapping_actor(&self, actor: ObjectId, other: ObjectId) -> bool {
        let Some(actor) = self.actor(actor) else {
            return false;
        };
        actor
            .components()
            .iter()
            .filter_map(|c| self.primitive(*c))
            .flat_map(PrimitiveComponent::overlap_infos)
            .any(|info| {
                info.overlap_component
                    .get(&self.registry)
                    .map_or(false, |component| component.owner() == Some(other))
            })
    }

    // ---- scripts ----

    /// Attach script hooks to a script component
    ///
    /// Any current script is cleared first. The owner actor's three
    /// delegates are bound to the hooks, then `begin_play` runs.
    pub fn assign_script(
        &mut self,
        script: ObjectId,
        name: impl Into<String>,
        hooks: Rc<RefCell<dyn ScriptHooks>>,
    ) -> bool {
        if self.component::<ScriptComponent>(script).is_none() {
            return false;
        }
        self.clear_script(script);

        let subscriptions = self.bind_script_delegates(script, &hooks);
        let name = name.into();
        log::debug!("Assigned script '{}' to {} ({} bindings)", name, script, subscriptions.len());
        if let Some(component) = self.component_mut::<ScriptComponent>(script) {
            component.set_script(name, Rc::clone(&hooks));
            for subscription in subscriptions {
                component.push_subscription(subscription);
            }
        }
        call_hooks(&hooks, |hooks| hooks.begin_play());
        true
    }

    /// Detach the current script; `false` if `script` is not a script component
    pub fn clear_script(&mut self, script: ObjectId) -> bool {
        let Some(component) = self.component_mut::<ScriptComponent>(script) else {
            return false;
        };
        let subscriptions = component.take_subscriptions();
        let hooks = component.take_script();

        if let Some(hooks) = &hooks {
            call_hooks(hooks, |hooks| hooks.end_play());
        }
        self.remove_subscriptions(&subscriptions);
        true
    }

    /// Swap in new hooks for an assigned script, keeping its name
    pub fn hot_reload_script(&mut self, script: ObjectId, hooks: Rc<RefCell<dyn ScriptHooks>>) -> bool {
        let Some(component) = self.component_mut::<ScriptComponent>(script) else {
            return false;
        };
        if !component.has_script() {
            return false;
        }
        let subscriptions = component.take_subscriptions();
        let old = component.replace_hooks(Rc::clone(&hooks));

        if let Some(old) = &old {
            call_hooks(old, |hooks| hooks.end_play());
        }
        self.remove_subscriptions(&subscriptions);

        let subscriptions = self.bind_script_delegates(script, &hooks);
        if let Some(component) = self.component_mut::<ScriptComponent>(script) {
            for subscription in subscriptions {
                component.push_subscription(subscription);
            }
        }
        call_hooks(&hooks, |hooks| hooks.begin_play());
        log::debug!("Hot reloaded script on {}", script);
        true
    }

    fn bind_script_delegates(
        &self,
        script: ObjectId,
        hooks: &Rc<RefCell<dyn ScriptHooks>>,
    ) -> Vec<ScriptSubscription> {
        let Some(actor_id) = self.owner_of(script) else {
            return Vec::new();
        };
        let Some(actor) = self.actor(actor_id) else {
            return Vec::new();
        };

        let target = Rc::clone(hooks);
        let begin = actor.on_actor_begin_overlap.add_object(Some(script), move |_, event| {
            call_hooks(&target, |hooks| hooks.on_begin_overlap(event));
        });
        let target = Rc::clone(hooks);
        let end = actor.on_actor_end_overlap.add_object(Some(script), move |_, event| {
            call_hooks(&target, |hooks| hooks.on_end_overlap(event));
        });
        let target = Rc::clone(hooks);
        let hit = actor.on_actor_hit.add_object(Some(script), move |_, event| {
            call_hooks(&target, |hooks| hooks.on_hit(event));
        });

        [
            (CollisionEventKind::BeginOverlap, begin),
            (CollisionEventKind::EndOverlap, end),
            (CollisionEventKind::Hit, hit),
        ]
        .into_iter()
        .filter_map(|(kind, binding)| {
            binding.map(|binding| ScriptSubscription {
                actor: actor_id,
                kind,
                binding,
            })
        })
        .collect()
    }

    fn remove_subscriptions(&self, subscriptions: &[ScriptSubscription]) {
        for subscription in subscriptions {
            let Some(actor) = self.actor(subscription.actor) else {
                continue;
            };
            match subscription.kind {
                CollisionEventKind::BeginOverlap => actor.on_actor_begin_overlap.remove(subscription.binding),
                CollisionEventKind::EndOverlap => actor.on_actor_end_overlap.remove(subscription.binding),
                CollisionEventKind::Hit => actor.on_actor_hit.remove(subscription.binding),
            }
        }
    }

    // ---- frame ----

    /// Advance one frame
    ///
    /// Ticks scripts, updates overlaps for every primitive that moved or
    /// holds a record of a destroyed component, then applies queued
    /// commands.
    pub fn tick(&mut self, delta: f32) {
        let scripts: Vec<Rc<RefCell<dyn ScriptHooks>>> = self
            .registry
            .iter()
            .filter_map(|(_, object)| object.as_any().downcast_ref::<ScriptComponent>())
            .filter_map(|script| script.hooks().cloned())
            .collect();
        for hooks in &scripts {
            call_hooks(hooks, |hooks| hooks.tick(delta));
        }
        self.flush_commands();

        let pending: Vec<ObjectId> = self
            .registry
            .iter()
            .filter_map(|(id, object)| object.as_primitive().map(|primitive| (id, primitive)))
            .filter(|(_, primitive)| {
                primitive.needs_overlap_update()
                    || primitive
                        .overlap_infos()
                        .iter()
                        .any(|info| info.overlap_component.get(&self.registry).is_none())
            })
            .map(|(id, _)| id)
            .collect();

        for id in pending {
            if self.registry.is_valid(id) {
                self.update_overlaps(id);
            }
        }
        self.flush_commands();
    }

    // ---- persistence ----

    /// Serialize a component with its class name
    pub fn serialize_component(&self, id: ObjectId) -> Option<JsonObject> {
        self.registry.get(id).map(component_to_json)
    }

    /// Create a component from JSON and register it under `owner`
    pub fn spawn_component_from_json(
        &mut self,
        owner: Option<ObjectId>,
        value: &Value,
    ) -> Result<ObjectId, SerializationError> {
        let component = component_from_json(value)?;
        Ok(self.add_component(owner, component))
    }

    // ---- debug ----

    /// Draw every visible collision volume; returns the number drawn
    pub fn render_debug_shapes(&mut self, sink: &mut dyn LineSink) -> usize {
        let mut drawn = 0;
        for id in self.registry.ids() {
            if let Some(primitive) = self.primitive_mut(id) {
                if primitive.is_visible() && primitive.bounding_volume().is_some() {
                    primitive.render_debug_shape(sink);
                    drawn += 1;
                }
            }
        }
        drawn
    }
}

impl Default for World {
    fn default() -> Self {
        Self::new(CollisionConfig::default())
    }
}

impl std::fmt::Debug for World {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("World")
            .field("objects", &self.registry.len())
            .field("spatial_entries", &self.spatial.entry_count())
            .field("pending_commands", &self.commands.len())
            .finish()
    }
}

fn call_hooks(hooks: &Rc<RefCell<dyn ScriptHooks>>, call: impl FnOnce(&mut dyn ScriptHooks)) {
    match hooks.try_borrow_mut() {
        Ok(mut hooks) => call(&mut *hooks),
        Err(_) => log::warn!("Skipping re-entrant script hook call"),
    }
}
