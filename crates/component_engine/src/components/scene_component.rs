//! Scene component: a transform node in an actor's attachment tree
//!
//! Each node caches its parent's world matrix so that its own world matrix
//! can be recomputed locally whenever the relative transform changes. The
//! world keeps the cached parent matrices up to date down the tree.

use crate::foundation::json::{read_vector, vector_to_json, JsonObject};
use crate::foundation::math::{
    matrix_scale, matrix_translation,
    utils::{quat_from_euler_degrees, quat_to_euler_degrees},
    Mat4, Quat, Transform, Vec3,
};
use crate::object::class::SCENE_COMPONENT_CLASS;
use crate::object::{Class, Object, ObjectHeader, ObjectId};
use std::any::Any;

/// Transform node with optional attach parent
#[derive(Debug, Clone)]
pub struct SceneComponent {
    header: ObjectHeader,
    owner: Option<ObjectId>,
    relative: Transform,
    attach_parent: Option<ObjectId>,
    attach_children: Vec<ObjectId>,
    parent_world: Mat4,
    world_matrix: Mat4,
}

impl SceneComponent {
    /// Create a detached node at the origin
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            header: ObjectHeader::named(name),
            owner: None,
            relative: Transform::identity(),
            attach_parent: None,
            attach_children: Vec::new(),
            parent_world: Mat4::identity(),
            world_matrix: Mat4::identity(),
        }
    }

    /// Builder: initial relative location
    pub fn with_location(mut self, location: Vec3) -> Self {
        self.set_relative_location(location);
        self
    }

    /// Location relative to the attach parent
    pub fn relative_location(&self) -> Vec3 {
        self.relative.position
    }

    /// Rotation relative to the attach parent
    pub fn relative_rotation(&self) -> Quat {
        self.relative.rotation
    }

    /// Scale relative to the attach parent
    pub fn relative_scale(&self) -> Vec3 {
        self.relative.scale
    }

    /// Full relative transform
    pub fn relative_transform(&self) -> Transform {
        self.relative
    }

    /// Set relative location and refresh the world matrix
    pub fn set_relative_location(&mut self, location: Vec3) {
        self.relative.position = location;
        self.refresh_world_matrix();
    }

    /// Set relative rotation and refresh the world matrix
    pub fn set_relative_rotation(&mut self, rotation: Quat) {
        self.relative.rotation = rotation;
        self.refresh_world_matrix();
    }

    /// Set relative scale and refresh the world matrix
    pub fn set_relative_scale(&mut self, scale: Vec3) {
        self.relative.scale = scale;
        self.refresh_world_matrix();
    }

    /// Set the whole relative transform and refresh the world matrix
    pub fn set_relative_transform(&mut self, transform: Transform) {
        self.relative = transform;
        self.refresh_world_matrix();
    }

    /// Cached world matrix
    pub fn world_matrix(&self) -> &Mat4 {
        &self.world_matrix
    }

    /// World-space location
    pub fn world_location(&self) -> Vec3 {
        matrix_translation(&self.world_matrix)
    }

    /// World-space rotation
    pub fn world_rotation(&self) -> Quat {
        Transform::from_matrix(&self.world_matrix).rotation
    }

    /// World-space scale
    pub fn world_scale(&self) -> Vec3 {
        matrix_scale(&self.world_matrix)
    }

    /// Parent node, if attached
    pub fn attach_parent(&self) -> Option<ObjectId> {
        self.attach_parent
    }

    /// Directly attached children
    pub fn attach_children(&self) -> &[ObjectId] {
        &self.attach_children
    }

    pub(crate) fn set_attach_parent(&mut self, parent: Option<ObjectId>, parent_world: Mat4) {
        self.attach_parent = parent;
        self.set_parent_world(parent_world);
    }

    pub(crate) fn add_child(&mut self, child: ObjectId) {
        if !self.attach_children.contains(&child) {
            self.attach_children.push(child);
        }
    }

    pub(crate) fn remove_child(&mut self, child: ObjectId) {
        self.attach_children.retain(|c| *c != child);
    }

    pub(crate) fn clear_children(&mut self) -> Vec<ObjectId> {
        std::mem::take(&mut self.attach_children)
    }

    pub(crate) fn set_parent_world(&mut self, parent_world: Mat4) {
        self.parent_world = parent_world;
        self.refresh_world_matrix();
    }

    fn refresh_world_matrix(&mut self) {
        self.world_matrix = self.parent_world * self.relative.to_matrix();
    }

    /// Copy without identity, owner or attachment
    pub fn duplicate_node(&self) -> Self {
        let mut copy = Self::new(self.header.name.clone());
        copy.relative = self.relative;
        copy.refresh_world_matrix();
        copy
    }

    pub(crate) fn serialize_transform(&self, handle: &mut JsonObject) {
        handle.insert("Location".into(), vector_to_json(self.relative.position));
        handle.insert(
            "Rotation".into(),
            vector_to_json(quat_to_euler_degrees(&self.relative.rotation)),
        );
        handle.insert("Scale".into(), vector_to_json(self.relative.scale));
    }

    pub(crate) fn deserialize_transform(&mut self, handle: &JsonObject) {
        self.relative = Transform {
            position: read_vector(handle, "Location", Vec3::zeros()),
            rotation: quat_from_euler_degrees(read_vector(handle, "Rotation", Vec3::zeros())),
            scale: read_vector(handle, "Scale", Vec3::repeat(1.0)),
        };
        self.refresh_world_matrix();
    }
}

impl Object for SceneComponent {
    fn class(&self) -> &'static Class {
        &SCENE_COMPONENT_CLASS
    }

    fn header(&self) -> &ObjectHeader {
        &self.header
    }

    fn header_mut(&mut self) -> &mut ObjectHeader {
        &mut self.header
    }

    fn duplicate(&self) -> Box<dyn Object> {
        Box::new(self.duplicate_node())
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }

    fn as_scene_component(&self) -> Option<&SceneComponent> {
        Some(self)
    }

    fn as_scene_component_mut(&mut self) -> Option<&mut SceneComponent> {
        Some(self)
    }

    fn owner(&self) -> Option<ObjectId> {
        self.owner
    }

    fn set_owner(&mut self, owner: Option<ObjectId>) {
        self.owner = owner;
    }

    fn serialize(&self, handle: &mut JsonObject) {
        self.serialize_transform(handle);
    }

    fn deserialize(&mut self, handle: &JsonObject) {
        self.deserialize_transform(handle);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_world_matrix_follows_parent() {
        let mut node = SceneComponent::new("node").with_location(Vec3::new(1.0, 0.0, 0.0));
        assert_relative_eq!(node.world_location(), Vec3::new(1.0, 0.0, 0.0));

        let parent = Transform::from_position(Vec3::new(0.0, 5.0, 0.0)).to_matrix();
        node.set_parent_world(parent);
        assert_relative_eq!(node.world_location(), Vec3::new(1.0, 5.0, 0.0), epsilon = 1e-6);

        node.set_relative_scale(Vec3::repeat(2.0));
        assert_relative_eq!(node.world_scale(), Vec3::repeat(2.0), epsilon = 1e-6);
    }

    #[test]
    fn test_transform_json_round_trip() {
        let mut node = SceneComponent::new("node");
        node.set_relative_transform(Transform {
            position: Vec3::new(1.0, 2.0, 3.0),
            rotation: quat_from_euler_degrees(Vec3::new(0.0, 0.0, 30.0)),
            scale: Vec3::new(1.0, 2.0, 1.0),
        });

        let mut handle = JsonObject::new();
        node.serialize(&mut handle);

        let mut loaded = SceneComponent::new("loaded");
        loaded.deserialize(&handle);
        assert_relative_eq!(loaded.relative_location(), node.relative_location(), epsilon = 1e-5);
        assert_relative_eq!(loaded.relative_scale(), node.relative_scale(), epsilon = 1e-5);
        assert_relative_eq!(
            quat_to_euler_degrees(&loaded.relative_rotation()),
            Vec3::new(0.0, 0.0, 30.0),
            epsilon = 1e-3
        );
    }

    #[test]
    fn test_missing_transform_fields_default() {
        let mut node = SceneComponent::new("node").with_location(Vec3::new(4.0, 0.0, 0.0));
        node.deserialize(&JsonObject::new());
        assert_eq!(node.relative_location(), Vec3::zeros());
        assert_eq!(node.relative_scale(), Vec3::repeat(1.0));
    }
}
