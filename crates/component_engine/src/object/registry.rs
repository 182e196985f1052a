//! Object identity registry
//!
//! Single owner of every engine object. Each live object occupies a slot;
//! a slot's serial number is bumped whenever its object is unregistered so
//! that stale [`ObjectId`]s stop resolving. Slots are never compacted, only
//! reused through a free list.

use super::{Object, ObjectId};

/// Anything that can answer "is this handle still alive?"
///
/// Delegates only need this narrow view of the registry to prune stale
/// object bindings.
pub trait ObjectLookup {
    /// True if `id` resolves to a live object
    fn is_live(&self, id: ObjectId) -> bool;
}

struct ObjectItem {
    object: Option<Box<dyn Object>>,
    serial: u32,
}

/// Process-lifetime table of live objects
#[derive(Default)]
pub struct ObjectRegistry {
    items: Vec<ObjectItem>,
    free_slots: Vec<u32>,
    next_uuid: u32,
    live_count: usize,
}

impl ObjectRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Take ownership of `object` and assign it a slot, serial and UUID
    pub fn register(&mut self, mut object: Box<dyn Object>) -> ObjectId {
        let index = match self.free_slots.pop() {
            Some(index) => index,
            None => {
                #[allow(clippy::cast_possible_truncation)]
                let index = self.items.len() as u32;
                self.items.push(ObjectItem {
                    object: None,
                    serial: 0,
                });
                index
            }
        };

        let item = &mut self.items[index as usize];
        let id = ObjectId::new(index, item.serial);

        let header = object.header_mut();
        header.uuid = self.next_uuid;
        header.id = Some(id);
        self.next_uuid = self.next_uuid.wrapping_add(1);

        object.on_registered(id);
        log::trace!("Registered {} '{}' as {}", object.class().name(), object.name(), id);

        item.object = Some(object);
        self.live_count += 1;
        id
    }

    /// Remove the object behind `id`, invalidating every handle to it
    ///
    /// Returns the object so the caller can inspect it before it drops.
    /// Unregistering a stale or unknown handle is a no-op.
    pub fn unregister(&mut self, id: ObjectId) -> Option<Box<dyn Object>> {
        if !self.is_live(id) {
            return None;
        }

        let (outer, bytes, count) = {
            let header = self.items[id.index() as usize].object.as_ref()?.header();
            (header.outer, header.allocated_bytes, header.allocated_count)
        };
        if let Some(outer) = outer {
            self.propagate_usage(outer, bytes, count, false);
        }

        let item = &mut self.items[id.index() as usize];
        let mut object = item.object.take()?;
        item.serial = item.serial.wrapping_add(1);
        self.free_slots.push(id.index());
        self.live_count -= 1;

        object.header_mut().id = None;
        log::trace!("Unregistered {} '{}' ({})", object.class().name(), object.name(), id);
        Some(object)
    }

    /// Resolve a raw (slot, serial) pair
    ///
    /// Out-of-range slots, emptied slots and serial mismatches all resolve to
    /// `None`.
    pub fn resolve(&self, index: u32, serial: u32) -> Option<&dyn Object> {
        let item = self.items.get(index as usize)?;
        if item.serial != serial {
            return None;
        }
        item.object.as_deref()
    }

    /// Resolve a handle
    pub fn get(&self, id: ObjectId) -> Option<&dyn Object> {
        self.resolve(id.index(), id.serial())
    }

    /// Resolve a handle mutably
    pub fn get_mut(&mut self, id: ObjectId) -> Option<&mut (dyn Object + 'static)> {
        let item = self.items.get_mut(id.index() as usize)?;
        if item.serial != id.serial() {
            return None;
        }
        item.object.as_deref_mut()
    }

    /// Resolve a handle and downcast to a concrete type
    pub fn get_as<T: Object>(&self, id: ObjectId) -> Option<&T> {
        self.get(id)?.as_any().downcast_ref::<T>()
    }

    /// Resolve a handle and downcast to a concrete type (mutable)
    pub fn get_as_mut<T: Object>(&mut self, id: ObjectId) -> Option<&mut T> {
        self.get_mut(id)?.as_any_mut().downcast_mut::<T>()
    }

    /// True if `id` still refers to a live object
    pub fn is_valid(&self, id: ObjectId) -> bool {
        self.get(id).is_some()
    }

    /// Current serial of a slot, `None` for out-of-range slots
    pub fn serial_of(&self, index: u32) -> Option<u32> {
        self.items.get(index as usize).map(|item| item.serial)
    }

    /// Number of live objects
    pub fn len(&self) -> usize {
        self.live_count
    }

    /// True if no object is live
    pub fn is_empty(&self) -> bool {
        self.live_count == 0
    }

    /// Number of slots ever allocated (live or free)
    pub fn slot_count(&self) -> usize {
        self.items.len()
    }

    /// Iterate live objects in slot order
    pub fn iter(&self) -> impl Iterator<Item = (ObjectId, &dyn Object)> + '_ {
        self.items.iter().enumerate().filter_map(|(index, item)| {
            #[allow(clippy::cast_possible_truncation)]
            let id = ObjectId::new(index as u32, item.serial);
            item.object.as_deref().map(|object| (id, object))
        })
    }

    /// Snapshot of live handles in slot order
    pub fn ids(&self) -> Vec<ObjectId> {
        self.iter().map(|(id, _)| id).collect()
    }

    /// Reparent `id` under `outer` for memory accounting
    ///
    /// The object's accumulated usage is removed from the old outer chain and
    /// added to the new one. Returns `false` (and changes nothing) if either
    /// handle is stale or if the new outer would create a cycle.
    pub fn set_outer(&mut self, id: ObjectId, outer: Option<ObjectId>) -> bool {
        if !self.is_live(id) {
            return false;
        }
        if let Some(new_outer) = outer {
            if !self.is_live(new_outer) || self.outer_chain(new_outer).contains(&id) {
                return false;
            }
        }

        let Some(object) = self.get(id) else {
            return false;
        };
        let header = object.header();
        let (old_outer, bytes, count) = (header.outer, header.allocated_bytes, header.allocated_count);
        if old_outer == outer {
            return true;
        }

        if let Some(old_outer) = old_outer {
            self.propagate_usage(old_outer, bytes, count, false);
        }
        if let Some(object) = self.get_mut(id) {
            object.header_mut().outer = outer;
        }
        if let Some(new_outer) = outer {
            self.propagate_usage(new_outer, bytes, count, true);
        }
        true
    }

    /// Attribute an allocation to `id` and every object in its outer chain
    pub fn add_memory_usage(&mut self, id: ObjectId, bytes: u64, count: u32) {
        self.propagate_usage(id, bytes, count, true);
    }

    /// Release an allocation from `id` and every object in its outer chain
    pub fn remove_memory_usage(&mut self, id: ObjectId, bytes: u64, count: u32) {
        self.propagate_usage(id, bytes, count, false);
    }

    /// `start` followed by each of its outers, stopping at the first stale link
    fn outer_chain(&self, start: ObjectId) -> Vec<ObjectId> {
        let mut chain = Vec::new();
        let mut current = Some(start);
        while let Some(id) = current {
            if chain.contains(&id) || !self.is_live(id) {
                break;
            }
            chain.push(id);
            current = self.get(id).and_then(|object| object.header().outer);
        }
        chain
    }

    fn propagate_usage(&mut self, start: ObjectId, bytes: u64, count: u32, add: bool) {
        for id in self.outer_chain(start) {
            if let Some(object) = self.get_mut(id) {
                let header = object.header_mut();
                if add {
                    header.allocated_bytes = header.allocated_bytes.saturating_add(bytes);
                    header.allocated_count = header.allocated_count.saturating_add(count);
                } else {
                    header.allocated_bytes = header.allocated_bytes.saturating_sub(bytes);
                    header.allocated_count = header.allocated_count.saturating_sub(count);
                }
            }
        }
    }
}

impl ObjectLookup for ObjectRegistry {
    fn is_live(&self, id: ObjectId) -> bool {
        self.get(id).is_some()
    }
}

impl std::fmt::Debug for ObjectRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ObjectRegistry")
            .field("live", &self.live_count)
            .field("slots", &self.items.len())
            .field("free", &self.free_slots.len())
            .finish()
    }
}
