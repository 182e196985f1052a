//! Generation-checked object handles

use super::{Object, ObjectLookup, ObjectRegistry};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::marker::PhantomData;

/// Untyped weak handle: registry slot index plus the serial number the slot
/// had when the handle was captured.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObjectId {
    index: u32,
    serial: u32,
}

impl ObjectId {
    /// Build a handle from raw parts
    pub const fn new(index: u32, serial: u32) -> Self {
        Self { index, serial }
    }

    /// Registry slot index
    pub const fn index(&self) -> u32 {
        self.index
    }

    /// Serial number captured with the handle
    pub const fn serial(&self) -> u32 {
        self.serial
    }
}

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}v{}", self.index, self.serial)
    }
}

/// Typed weak handle
///
/// Never extends the target's lifetime. Resolution fails if the slot has
/// been destroyed (serial changed) or if the live object is of another type.
pub struct WeakObjectPtr<T: ?Sized> {
    id: ObjectId,
    _marker: PhantomData<fn() -> Box<T>>,
}

impl<T: ?Sized> WeakObjectPtr<T> {
    /// Wrap an untyped handle
    pub const fn from_id(id: ObjectId) -> Self {
        Self {
            id,
            _marker: PhantomData,
        }
    }

    /// Untyped handle
    pub const fn id(&self) -> ObjectId {
        self.id
    }

    /// True while the slot still holds the captured generation
    ///
    /// Untyped: a live object of another type also counts. Use
    /// [`WeakObjectPtr::get`] when the type matters.
    pub fn is_valid<L: ObjectLookup + ?Sized>(&self, lookup: &L) -> bool {
        lookup.is_live(self.id)
    }
}

impl<T: Object> WeakObjectPtr<T> {
    /// Resolve to the live object, or `None`
    pub fn get<'a>(&self, registry: &'a ObjectRegistry) -> Option<&'a T> {
        registry.get_as::<T>(self.id)
    }

    /// Resolve to the live object mutably, or `None`
    pub fn get_mut<'a>(&self, registry: &'a mut ObjectRegistry) -> Option<&'a mut T> {
        registry.get_as_mut::<T>(self.id)
    }
}

impl<T: ?Sized> Clone for WeakObjectPtr<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T: ?Sized> Copy for WeakObjectPtr<T> {}

impl<T: ?Sized> PartialEq for WeakObjectPtr<T> {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl<T: ?Sized> Eq for WeakObjectPtr<T> {}

impl<T: ?Sized> Hash for WeakObjectPtr<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl<T: ?Sized> fmt::Debug for WeakObjectPtr<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "WeakObjectPtr({})", self.id)
    }
}

impl<T: ?Sized> From<WeakObjectPtr<T>> for ObjectId {
    fn from(ptr: WeakObjectPtr<T>) -> Self {
        ptr.id
    }
}
