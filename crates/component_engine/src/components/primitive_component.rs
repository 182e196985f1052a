//! Primitive component: a scene component with collision
//!
//! Owns (or borrows) a bounding volume, caches its world-space copy and
//! axis-aligned bounds behind a dirty flag, keeps the set of components it
//! currently overlaps and exposes the three collision delegates.
//!
//! Box, sphere and capsule components are primitive components carrying a
//! [`ShapeComponent`]; their class is reported per shape.

use super::overlap_info::OverlapInfo;
use super::scene_component::SceneComponent;
use super::shape_component::ShapeComponent;
use crate::debug::{draw_bounding_volume, LineSink};
use crate::events::{ComponentBeginOverlapDelegate, ComponentEndOverlapDelegate, ComponentHitDelegate};
use crate::foundation::json::{read_bool, JsonObject};
use crate::foundation::math::{Quat, Transform, Vec3, Vec4};
use crate::object::class::PRIMITIVE_COMPONENT_CLASS;
use crate::object::{Class, Object, ObjectHeader, ObjectId};
use crate::physics::{BoundingVolume, CollisionResponse, ShapeKind, AABB};
use serde_json::Value;
use std::any::Any;
use std::rc::Rc;

/// Where a component's local-space bounding volume comes from
#[derive(Debug, Clone)]
pub enum VolumeSource {
    /// Created and owned by this component
    Owned(BoundingVolume),
    /// Borrowed from elsewhere; never rebuilt by this component
    Shared(Rc<BoundingVolume>),
}

impl VolumeSource {
    fn volume(&self) -> &BoundingVolume {
        match self {
            Self::Owned(volume) => volume,
            Self::Shared(volume) => volume,
        }
    }
}

/// Scene component with collision
#[derive(Debug)]
pub struct PrimitiveComponent {
    scene: SceneComponent,
    shape: Option<ShapeComponent>,
    volume: Option<VolumeSource>,
    world_volume: Option<BoundingVolume>,
    cached_bounds: AABB,
    bounds_dirty: bool,
    spatial_dirty: bool,
    overlaps_dirty: bool,
    generate_hit_events: bool,
    visible: bool,
    can_pick: bool,
    receives_decals: bool,
    color: Vec4,
    overlapping: Vec<OverlapInfo>,
    /// Fired when another component starts overlapping this one
    pub on_component_begin_overlap: ComponentBeginOverlapDelegate,
    /// Fired when an overlap with this component ends
    pub on_component_end_overlap: ComponentEndOverlapDelegate,
    /// Fired on blocking contact
    pub on_component_hit: ComponentHitDelegate,
}

impl PrimitiveComponent {
    /// Primitive without a collision volume
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            scene: SceneComponent::new(name),
            shape: None,
            volume: None,
            world_volume: None,
            cached_bounds: AABB::default(),
            bounds_dirty: true,
            spatial_dirty: true,
            overlaps_dirty: true,
            generate_hit_events: false,
            visible: true,
            can_pick: true,
            receives_decals: true,
            color: Vec4::new(1.0, 1.0, 1.0, 1.0),
            overlapping: Vec::new(),
            on_component_begin_overlap: ComponentBeginOverlapDelegate::new(),
            on_component_end_overlap: ComponentEndOverlapDelegate::new(),
            on_component_hit: ComponentHitDelegate::new(),
        }
    }

    /// Shape component; shapes generate hit events by default
    pub fn with_shape(name: impl Into<String>, shape: ShapeComponent) -> Self {
        let mut component = Self::new(name);
        component.shape = Some(shape);
        component.generate_hit_events = true;
        component.color = Vec4::new(0.2, 1.0, 0.2, 1.0);
        component.update_bounding_volume();
        component
    }

    /// Box component with default extent
    pub fn new_box(name: impl Into<String>) -> Self {
        Self::with_shape(name, ShapeComponent::default_box())
    }

    /// Sphere component with default radius
    pub fn new_sphere(name: impl Into<String>) -> Self {
        Self::with_shape(name, ShapeComponent::default_sphere())
    }

    /// Capsule component with default size
    pub fn new_capsule(name: impl Into<String>) -> Self {
        Self::with_shape(name, ShapeComponent::default_capsule())
    }

    /// Primitive using a volume it does not own
    pub fn with_shared_volume(name: impl Into<String>, volume: Rc<BoundingVolume>) -> Self {
        let mut component = Self::new(name);
        component.volume = Some(VolumeSource::Shared(volume));
        component
    }

    /// Builder: initial relative location
    pub fn with_location(mut self, location: Vec3) -> Self {
        self.set_relative_location(location);
        self
    }

    /// Builder: hit-event flag
    pub fn with_generate_hit_events(mut self, generate: bool) -> Self {
        self.generate_hit_events = generate;
        self
    }

    // ---- scene node ----

    /// Transform node
    pub fn scene(&self) -> &SceneComponent {
        &self.scene
    }

    /// Transform node (mutable); call [`Self::mark_as_dirty`] after moving it
    pub fn scene_mut(&mut self) -> &mut SceneComponent {
        &mut self.scene
    }

    /// Registry handle, once registered
    pub fn id(&self) -> Option<ObjectId> {
        self.scene.header().id
    }

    /// Set relative location and invalidate cached bounds
    pub fn set_relative_location(&mut self, location: Vec3) {
        self.scene.set_relative_location(location);
        self.mark_as_dirty();
    }

    /// Set relative rotation and invalidate cached bounds
    pub fn set_relative_rotation(&mut self, rotation: Quat) {
        self.scene.set_relative_rotation(rotation);
        self.mark_as_dirty();
    }

    /// Set relative scale and invalidate cached bounds
    pub fn set_relative_scale(&mut self, scale: Vec3) {
        self.scene.set_relative_scale(scale);
        self.mark_as_dirty();
    }

    /// Set relative transform and invalidate cached bounds
    pub fn set_relative_transform(&mut self, transform: Transform) {
        self.scene.set_relative_transform(transform);
        self.mark_as_dirty();
    }

    // ---- bounds cache ----

    /// Flag cached world bounds for recomputation on next query
    pub fn mark_as_dirty(&mut self) {
        self.bounds_dirty = true;
        self.spatial_dirty = true;
        self.overlaps_dirty = true;
    }

    /// True if cached bounds are stale
    pub fn is_bounds_dirty(&self) -> bool {
        self.bounds_dirty
    }

    /// True if the broad-phase entry is stale
    pub fn needs_spatial_update(&self) -> bool {
        self.spatial_dirty
    }

    pub(crate) fn clear_spatial_dirty(&mut self) {
        self.spatial_dirty = false;
    }

    /// True if the component moved or changed shape since its own last
    /// overlap update
    ///
    /// Independent of the broad-phase flag: refreshing the spatial index
    /// for another component's update does not clear this.
    pub fn needs_overlap_update(&self) -> bool {
        self.overlaps_dirty
    }

    pub(crate) fn clear_overlap_dirty(&mut self) {
        self.overlaps_dirty = false;
    }

    fn refresh_cache(&mut self) {
        if !self.bounds_dirty {
            return;
        }
        let world_matrix = *self.scene.world_matrix();
        self.world_volume = self.volume.as_ref().map(|source| {
            let mut volume = source.volume().clone();
            volume.update_from_transform(&world_matrix);
            volume
        });
        self.cached_bounds = match &self.world_volume {
            Some(volume) => volume.compute_axis_aligned_bounds(),
            None => AABB::from_point(self.scene.world_location()),
        };
        self.bounds_dirty = false;
    }

    /// World-space axis-aligned bounds, recomputed if dirty
    pub fn calc_bounds(&mut self) -> AABB {
        self.refresh_cache();
        self.cached_bounds
    }

    /// World-space collision volume, recomputed if dirty
    pub fn collision_shape(&mut self) -> Option<&BoundingVolume> {
        self.refresh_cache();
        self.world_volume.as_ref()
    }

    /// Local-space volume definition
    pub fn bounding_volume(&self) -> Option<&BoundingVolume> {
        self.volume.as_ref().map(VolumeSource::volume)
    }

    /// False if the volume is borrowed
    pub fn owns_bounding_volume(&self) -> bool {
        matches!(self.volume, Some(VolumeSource::Owned(_)))
    }

    /// Replace the owned volume from the current shape parameters
    ///
    /// A borrowed volume is left alone.
    pub fn update_bounding_volume(&mut self) {
        if let Some(VolumeSource::Shared(_)) = self.volume {
            return;
        }
        self.volume = self.shape.map(|shape| VolumeSource::Owned(shape.bounding_volume()));
        self.bounds_dirty = true;
    }

    // ---- shape parameters ----

    /// Shape parameters, `None` for plain primitives
    pub fn shape(&self) -> Option<&ShapeComponent> {
        self.shape.as_ref()
    }

    /// Shape discriminant
    pub fn shape_kind(&self) -> Option<ShapeKind> {
        self.shape.map(|shape| shape.kind())
    }

    fn apply_shape(&mut self, shape: ShapeComponent) {
        if self.shape == Some(shape) {
            return;
        }
        self.shape = Some(shape);
        self.update_bounding_volume();
        self.mark_as_dirty();
    }

    /// Box half extents
    pub fn box_extent(&self) -> Option<Vec3> {
        match self.shape {
            Some(ShapeComponent::Box { extent }) => Some(extent),
            _ => None,
        }
    }

    /// Set box half extents; negative components clamp to zero
    pub fn set_box_extent(&mut self, extent: Vec3) {
        if let Some(ShapeComponent::Box { .. }) = self.shape {
            self.apply_shape(ShapeComponent::new_box(extent));
        }
    }

    /// Set box half extents without rebuilding the volume
    pub fn init_box_extent(&mut self, extent: Vec3) {
        if let Some(ShapeComponent::Box { .. }) = self.shape {
            self.shape = Some(ShapeComponent::new_box(extent));
        }
    }

    /// Box half extents scaled by world scale
    pub fn scaled_box_extent(&self) -> Option<Vec3> {
        self.box_extent().map(|extent| extent.component_mul(&self.scene.world_scale()))
    }

    /// Sphere radius
    pub fn sphere_radius(&self) -> Option<f32> {
        match self.shape {
            Some(ShapeComponent::Sphere { radius }) => Some(radius),
            _ => None,
        }
    }

    /// Set sphere radius; negative values clamp to zero
    pub fn set_sphere_radius(&mut self, radius: f32) {
        if let Some(ShapeComponent::Sphere { .. }) = self.shape {
            self.apply_shape(ShapeComponent::new_sphere(radius));
        }
    }

    /// Set sphere radius without rebuilding the volume
    pub fn init_sphere_radius(&mut self, radius: f32) {
        if let Some(ShapeComponent::Sphere { .. }) = self.shape {
            self.shape = Some(ShapeComponent::new_sphere(radius));
        }
    }

    /// Sphere radius scaled by the largest world scale axis
    pub fn scaled_sphere_radius(&self) -> Option<f32> {
        self.sphere_radius().map(|radius| radius * self.scene.world_scale().max())
    }

    /// Capsule radius
    pub fn capsule_radius(&self) -> Option<f32> {
        match self.shape {
            Some(ShapeComponent::Capsule { radius, .. }) => Some(radius),
            _ => None,
        }
    }

    /// Capsule half height
    pub fn capsule_half_height(&self) -> Option<f32> {
        match self.shape {
            Some(ShapeComponent::Capsule { half_height, .. }) => Some(half_height),
            _ => None,
        }
    }

    /// Set capsule radius; the half height is raised to match if needed
    pub fn set_capsule_radius(&mut self, radius: f32) {
        if let Some(ShapeComponent::Capsule { half_height, .. }) = self.shape {
            self.apply_shape(ShapeComponent::new_capsule(radius, half_height));
        }
    }

    /// Set capsule half height; clamped to at least the radius
    pub fn set_capsule_half_height(&mut self, half_height: f32) {
        if let Some(ShapeComponent::Capsule { radius, .. }) = self.shape {
            self.apply_shape(ShapeComponent::new_capsule(radius, half_height));
        }
    }

    /// Set both capsule parameters
    pub fn set_capsule_size(&mut self, radius: f32, half_height: f32) {
        if let Some(ShapeComponent::Capsule { .. }) = self.shape {
            self.apply_shape(ShapeComponent::new_capsule(radius, half_height));
        }
    }

    /// Set both capsule parameters without rebuilding the volume
    pub fn init_capsule_size(&mut self, radius: f32, half_height: f32) {
        if let Some(ShapeComponent::Capsule { .. }) = self.shape {
            self.shape = Some(ShapeComponent::new_capsule(radius, half_height));
        }
    }

    /// Capsule radius scaled by max(x, y) world scale
    pub fn scaled_capsule_radius(&self) -> Option<f32> {
        let scale = self.scene.world_scale();
        self.capsule_radius().map(|radius| radius * scale.x.max(scale.y))
    }

    /// Capsule half height scaled by z world scale
    pub fn scaled_capsule_half_height(&self) -> Option<f32> {
        let scale = self.scene.world_scale();
        self.capsule_half_height().map(|half_height| half_height * scale.z)
    }

    // ---- flags ----

    /// True if this component reports hits instead of overlaps
    pub fn generate_hit_events(&self) -> bool {
        self.generate_hit_events
    }

    /// Choose hit (blocking) or overlap reporting
    pub fn set_generate_hit_events(&mut self, generate: bool) {
        self.generate_hit_events = generate;
    }

    /// Collision response derived from the hit-event flag
    pub fn collision_response(&self) -> CollisionResponse {
        CollisionResponse::from_generate_hit_events(self.generate_hit_events)
    }

    /// Visibility flag
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Set visibility flag
    pub fn set_visibility(&mut self, visible: bool) {
        self.visible = visible;
    }

    /// Editor picking flag
    pub fn can_pick(&self) -> bool {
        self.can_pick
    }

    /// Set editor picking flag
    pub fn set_can_pick(&mut self, can_pick: bool) {
        self.can_pick = can_pick;
    }

    /// Decal flag
    pub fn receives_decals(&self) -> bool {
        self.receives_decals
    }

    /// Set decal flag
    pub fn set_receives_decals(&mut self, receives: bool) {
        self.receives_decals = receives;
    }

    /// Debug color
    pub fn color(&self) -> Vec4 {
        self.color
    }

    /// Set debug color
    pub fn set_color(&mut self, color: Vec4) {
        self.color = color;
    }

    // ---- overlap records ----

    /// Current overlap records
    pub fn overlap_infos(&self) -> &[OverlapInfo] {
        &self.overlapping
    }

    /// True if a record for `other` exists
    pub fn is_overlapping_component(&self, other: ObjectId) -> bool {
        self.overlapping.iter().any(|info| info.component_id() == other)
    }

    /// Insert a record unless one for the same component exists
    pub(crate) fn add_overlap(&mut self, info: OverlapInfo) -> bool {
        if self.is_overlapping_component(info.component_id()) {
            return false;
        }
        self.overlapping.push(info);
        true
    }

    /// Remove the record for `other`; `false` if there was none
    pub(crate) fn remove_overlap(&mut self, other: ObjectId) -> bool {
        let before = self.overlapping.len();
        self.overlapping.retain(|info| info.component_id() != other);
        self.overlapping.len() != before
    }

    pub(crate) fn overlap_mut(&mut self, other: ObjectId) -> Option<&mut OverlapInfo> {
        self.overlapping.iter_mut().find(|info| info.component_id() == other)
    }

    // ---- debug ----

    /// Draw the world-space collision volume
    pub fn render_debug_shape(&mut self, sink: &mut dyn LineSink) {
        let color = self.color;
        if let Some(volume) = self.collision_shape() {
            draw_bounding_volume(sink, volume, color);
        }
    }
}

impl Object for PrimitiveComponent {
    fn class(&self) -> &'static Class {
        match &self.shape {
            Some(shape) => shape.class(),
            None => &PRIMITIVE_COMPONENT_CLASS,
        }
    }

    fn header(&self) -> &ObjectHeader {
        self.scene.header()
    }

    fn header_mut(&mut self) -> &mut ObjectHeader {
        self.scene.header_mut()
    }

    fn duplicate(&self) -> Box<dyn Object> {
        let mut copy = Self::new(self.scene.header().name.clone());
        copy.scene = self.scene.duplicate_node();
        copy.shape = self.shape;
        copy.volume = match &self.volume {
            Some(VolumeSource::Shared(volume)) => Some(VolumeSource::Shared(Rc::clone(volume))),
            _ => None,
        };
        copy.generate_hit_events = self.generate_hit_events;
        copy.visible = self.visible;
        copy.can_pick = self.can_pick;
        copy.receives_decals = self.receives_decals;
        copy.color = self.color;
        copy.update_bounding_volume();
        Box::new(copy)
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }

    fn as_scene_component(&self) -> Option<&SceneComponent> {
        Some(&self.scene)
    }

    fn as_scene_component_mut(&mut self) -> Option<&mut SceneComponent> {
        Some(&mut self.scene)
    }

    fn as_primitive(&self) -> Option<&PrimitiveComponent> {
        Some(self)
    }

    fn as_primitive_mut(&mut self) -> Option<&mut PrimitiveComponent> {
        Some(self)
    }

    fn owner(&self) -> Option<ObjectId> {
        self.scene.owner()
    }

    fn set_owner(&mut self, owner: Option<ObjectId>) {
        self.scene.set_owner(owner);
    }

    fn serialize(&self, handle: &mut JsonObject) {
        self.scene.serialize_transform(handle);
        handle.insert("Visible".into(), Value::from(self.visible));
        handle.insert("CanPick".into(), Value::from(self.can_pick));
        handle.insert("GenerateHitEvents".into(), Value::from(self.generate_hit_events));
        if let Some(shape) = &self.shape {
            shape.serialize(handle);
        }
    }

    fn deserialize(&mut self, handle: &JsonObject) {
        self.scene.deserialize_transform(handle);
        self.visible = read_bool(handle, "Visible", true);
        self.can_pick = read_bool(handle, "CanPick", true);
        self.generate_hit_events = read_bool(handle, "GenerateHitEvents", self.shape.is_some());
        if let Some(shape) = self.shape {
            self.shape = Some(shape.deserialize(handle));
        }
        self.update_bounding_volume();
        self.mark_as_dirty();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::debug::DebugLineBatch;
    use crate::object::class::{BOX_COMPONENT_CLASS, PRIMITIVE_COMPONENT_CLASS, SHAPE_COMPONENT_CLASS};
    use approx::assert_relative_eq;

    #[test]
    fn test_capsule_half_height_clamps_to_radius() {
        let mut capsule = PrimitiveComponent::new_capsule("capsule");
        capsule.set_capsule_radius(0.75);

        for h in [-1.0, 0.0, 0.5, 0.75, 2.0] {
            capsule.set_capsule_half_height(h);
            assert_eq!(capsule.capsule_half_height(), Some(f32::max(h, 0.75)));
        }

        // Growing the radius past the half height drags it along
        capsule.set_capsule_radius(3.0);
        assert_eq!(capsule.capsule_half_height(), Some(3.0));
    }

    #[test]
    fn test_box_extent_zeroes_negative_components() {
        let mut cube = PrimitiveComponent::new_box("box");
        cube.set_box_extent(Vec3::new(-2.0, 3.0, -0.1));
        assert_eq!(cube.box_extent(), Some(Vec3::new(0.0, 3.0, 0.0)));
    }

    #[test]
    fn test_sphere_radius_clamps() {
        let mut sphere = PrimitiveComponent::new_sphere("sphere");
        sphere.set_sphere_radius(-5.0);
        assert_eq!(sphere.sphere_radius(), Some(0.0));
    }

    #[test]
    fn test_wrong_shape_setters_are_ignored() {
        let mut sphere = PrimitiveComponent::new_sphere("sphere");
        sphere.set_box_extent(Vec3::repeat(4.0));
        sphere.set_capsule_size(1.0, 2.0);
        assert_eq!(sphere.box_extent(), None);
        assert_eq!(sphere.capsule_radius(), None);
        assert_eq!(sphere.sphere_radius(), Some(0.5));
    }

    #[test]
    fn test_lazy_bounds_recompute() {
        let mut cube = PrimitiveComponent::new_box("box");
        let bounds = cube.calc_bounds();
        assert!(!cube.is_bounds_dirty());
        assert_relative_eq!(bounds.extents(), Vec3::repeat(0.5));

        cube.set_relative_location(Vec3::new(3.0, 0.0, 0.0));
        assert!(cube.is_bounds_dirty());
        assert_relative_eq!(cube.calc_bounds().center(), Vec3::new(3.0, 0.0, 0.0), epsilon = 1e-6);

        cube.set_box_extent(Vec3::repeat(1.0));
        assert!(cube.is_bounds_dirty());
        assert_relative_eq!(cube.calc_bounds().extents(), Vec3::repeat(1.0), epsilon = 1e-6);
    }

    #[test]
    fn test_unchanged_setter_keeps_cache() {
        let mut cube = PrimitiveComponent::new_box("box");
        cube.calc_bounds();
        cube.set_box_extent(Vec3::repeat(0.5));
        assert!(!cube.is_bounds_dirty());
    }

    #[test]
    fn test_init_setter_defers_rebuild() {
        let mut sphere = PrimitiveComponent::new_sphere("sphere");
        sphere.init_sphere_radius(2.0);
        assert_relative_eq!(sphere.calc_bounds().extents(), Vec3::repeat(0.5));

        sphere.update_bounding_volume();
        assert_relative_eq!(sphere.calc_bounds().extents(), Vec3::repeat(2.0));
    }

    #[test]
    fn test_scaled_getters() {
        let mut capsule = PrimitiveComponent::new_capsule("capsule");
        capsule.set_relative_scale(Vec3::new(2.0, 3.0, 4.0));
        assert_relative_eq!(capsule.scaled_capsule_radius().unwrap(), 1.5, epsilon = 1e-5);
        assert_relative_eq!(capsule.scaled_capsule_half_height().unwrap(), 4.0, epsilon = 1e-5);

        let mut cube = PrimitiveComponent::new_box("box");
        cube.set_relative_scale(Vec3::new(2.0, 1.0, 1.0));
        assert_relative_eq!(cube.scaled_box_extent().unwrap(), Vec3::new(1.0, 0.5, 0.5), epsilon = 1e-5);
    }

    #[test]
    fn test_shared_volume_is_not_owned() {
        let shared = Rc::new(BoundingVolume::new_sphere(1.0));
        let mut primitive = PrimitiveComponent::with_shared_volume("shared", Rc::clone(&shared));
        assert!(!primitive.owns_bounding_volume());

        primitive.set_relative_location(Vec3::new(0.0, 2.0, 0.0));
        assert_relative_eq!(primitive.calc_bounds().center(), Vec3::new(0.0, 2.0, 0.0), epsilon = 1e-6);
        // The shared definition stays in local space
        assert_eq!(shared.center(), Vec3::zeros());
        assert_eq!(Rc::strong_count(&shared), 2);
    }

    #[test]
    fn test_class_per_shape() {
        let cube = PrimitiveComponent::new_box("box");
        assert!(cube.is_exactly(&BOX_COMPONENT_CLASS));
        assert!(cube.is_a(&SHAPE_COMPONENT_CLASS));

        let plain = PrimitiveComponent::new("plain");
        assert!(plain.is_exactly(&PRIMITIVE_COMPONENT_CLASS));
        assert!(plain.bounding_volume().is_none());
    }

    #[test]
    fn test_sphere_json_round_trip() {
        let mut sphere = PrimitiveComponent::new_sphere("sphere");
        sphere.set_sphere_radius(2.5);
        let mut handle = JsonObject::new();
        sphere.serialize(&mut handle);
        assert_eq!(handle["SphereRadius"], Value::from("2.500000"));

        let mut loaded = PrimitiveComponent::new_sphere("loaded");
        loaded.deserialize(&handle);
        assert_eq!(loaded.sphere_radius(), Some(2.5));
    }

    #[test]
    fn test_duplicate_skips_runtime_state() {
        let mut cube = PrimitiveComponent::new_box("box").with_generate_hit_events(false);
        cube.set_box_extent(Vec3::repeat(2.0));
        cube.add_overlap(OverlapInfo::new(ObjectId::new(9, 0)));
        cube.on_component_hit.add(|_| {});

        let copy = cube.duplicate();
        let copy = copy.downcast_ref::<PrimitiveComponent>().unwrap();
        assert_eq!(copy.box_extent(), Some(Vec3::repeat(2.0)));
        assert!(!copy.generate_hit_events());
        assert!(copy.overlap_infos().is_empty());
        assert!(copy.on_component_hit.is_empty());
        assert!(copy.id().is_none());
    }

    #[test]
    fn test_render_debug_shape() {
        let mut cube = PrimitiveComponent::new_box("box");
        let mut batch = DebugLineBatch::new();
        cube.render_debug_shape(&mut batch);
        assert_eq!(batch.len(), 12);

        let mut plain = PrimitiveComponent::new("plain");
        batch.clear();
        plain.render_debug_shape(&mut batch);
        assert!(batch.is_empty());
    }
}
