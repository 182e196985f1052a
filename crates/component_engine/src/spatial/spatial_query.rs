//! Abstract spatial query interface for the overlap broad phase
//!
//! The overlap engine only needs "which registered components have bounds
//! touching this box". Any partitioning scheme can sit behind the trait.

use crate::object::ObjectId;
use crate::physics::AABB;
use std::any::Any;

/// Broad-phase structure keyed by component handle
pub trait SpatialQuery {
    /// Insert (or replace) a component's world bounds
    fn insert(&mut self, id: ObjectId, bounds: AABB);

    /// Remove a component; unknown ids are ignored
    fn remove(&mut self, id: ObjectId);

    /// Update a component's world bounds
    fn update(&mut self, id: ObjectId, bounds: AABB) {
        self.insert(id, bounds);
    }

    /// Components whose stored bounds intersect `aabb`
    ///
    /// Results may contain duplicates; callers dedup.
    fn query_aabb(&self, aabb: &AABB) -> Vec<ObjectId>;

    /// Stored bounds for a component
    fn bounds_of(&self, id: ObjectId) -> Option<AABB>;

    /// Remove everything
    fn clear(&mut self);

    /// Number of stored components
    fn entry_count(&self) -> usize;

    /// Downcast to Any for type-specific access
    fn as_any(&self) -> &dyn Any;

    /// Downcast to Any for mutable type-specific access
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

/// Brute-force implementation that tests every stored entry
///
/// Keeps insertion order so query results are deterministic.
#[derive(Debug, Default)]
pub struct LinearSpatialQuery {
    entries: Vec<(ObjectId, AABB)>,
}

impl LinearSpatialQuery {
    /// Create an empty structure
    pub fn new() -> Self {
        Self::default()
    }
}

impl SpatialQuery for LinearSpatialQuery {
    fn insert(&mut self, id: ObjectId, bounds: AABB) {
        match self.entries.iter_mut().find(|(entry, _)| *entry == id) {
            Some((_, stored)) => *stored = bounds,
            None => self.entries.push((id, bounds)),
        }
    }

    fn remove(&mut self, id: ObjectId) {
        self.entries.retain(|(entry, _)| *entry != id);
    }

    fn query_aabb(&self, aabb: &AABB) -> Vec<ObjectId> {
        self.entries
            .iter()
            .filter(|(_, bounds)| bounds.intersects(aabb))
            .map(|(id, _)| *id)
            .collect()
    }

    fn bounds_of(&self, id: ObjectId) -> Option<AABB> {
        self.entries
            .iter()
            .find(|(entry, _)| *entry == id)
            .map(|(_, bounds)| *bounds)
    }

    fn clear(&mut self) {
        self.entries.clear();
    }

    fn entry_count(&self) -> usize {
        self.entries.len()
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::math::Vec3;

    fn cube(x: f32) -> AABB {
        AABB::from_center_extents(Vec3::new(x, 0.0, 0.0), Vec3::repeat(0.5))
    }

    #[test]
    fn test_insert_query_remove() {
        let mut query = LinearSpatialQuery::new();
        let a = ObjectId::new(0, 0);
        let b = ObjectId::new(1, 0);
        query.insert(a, cube(0.0));
        query.insert(b, cube(5.0));

        assert_eq!(query.query_aabb(&cube(0.5)), vec![a]);
        assert_eq!(query.entry_count(), 2);

        query.update(b, cube(1.0));
        assert_eq!(query.query_aabb(&cube(0.5)), vec![a, b]);
        assert_eq!(query.entry_count(), 2);

        query.remove(a);
        assert_eq!(query.query_aabb(&cube(0.5)), vec![b]);
        assert!(query.bounds_of(a).is_none());

        query.clear();
        assert_eq!(query.entry_count(), 0);
    }
}
