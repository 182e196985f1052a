//! Multicast delegates
//!
//! A [`Delegate`] holds an ordered list of bindings. Plain bindings are
//! always invoked; object bindings carry an [`ObjectId`] and are pruned
//! instead of invoked once that object is gone.
//!
//! All methods take `&self` so that a handler running inside
//! [`Delegate::broadcast`] can add or remove bindings on the same delegate.
//! Broadcast iterates a snapshot taken at the start of the call: bindings
//! added during the call are not delivered to, bindings removed by an
//! earlier handler in the same call are skipped.

use crate::object::{ObjectId, ObjectLookup};
use std::cell::{Cell, RefCell};
use std::fmt;
use std::num::NonZeroU32;
use std::rc::Rc;

/// Identifier of a single binding; never zero
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BindingId(NonZeroU32);

impl BindingId {
    /// Raw numeric value (always >= 1)
    pub const fn get(self) -> u32 {
        self.0.get()
    }
}

type PlainHandler<A> = Rc<RefCell<dyn FnMut(&A)>>;
type ObjectHandler<A> = Rc<RefCell<dyn FnMut(ObjectId, &A)>>;

enum Callback<A> {
    Plain(PlainHandler<A>),
    Object(ObjectId, ObjectHandler<A>),
}

impl<A> Clone for Callback<A> {
    fn clone(&self) -> Self {
        match self {
            Self::Plain(handler) => Self::Plain(Rc::clone(handler)),
            Self::Object(object, handler) => Self::Object(*object, Rc::clone(handler)),
        }
    }
}

struct Binding<A> {
    id: BindingId,
    callback: Callback<A>,
}

/// Multicast callback list over an argument type `A`
pub struct Delegate<A> {
    bindings: RefCell<Vec<Binding<A>>>,
    next_id: Cell<u32>,
}

impl<A> Delegate<A> {
    /// Create an empty delegate
    pub fn new() -> Self {
        Self {
            bindings: RefCell::new(Vec::new()),
            next_id: Cell::new(1),
        }
    }

    fn allocate_id(&self) -> BindingId {
        let raw = self.next_id.get();
        // Wraps past u32::MAX back to 1; zero stays reserved
        let next = raw.checked_add(1).unwrap_or(1);
        self.next_id.set(next);
        BindingId(NonZeroU32::new(raw).unwrap_or(NonZeroU32::MIN))
    }

    /// Bind an unconditional handler
    pub fn add<F>(&self, handler: F) -> BindingId
    where
        F: FnMut(&A) + 'static,
    {
        let id = self.allocate_id();
        self.bindings.borrow_mut().push(Binding {
            id,
            callback: Callback::Plain(Rc::new(RefCell::new(handler))),
        });
        id
    }

    /// Bind a handler to the lifetime of `object`
    ///
    /// Returns `None` (and binds nothing) if `object` is `None`. The handler
    /// receives the bound object's id so it can find it again.
    pub fn add_object<F>(&self, object: Option<ObjectId>, handler: F) -> Option<BindingId>
    where
        F: FnMut(ObjectId, &A) + 'static,
    {
        let object = object?;
        let id = self.allocate_id();
        self.bindings.borrow_mut().push(Binding {
            id,
            callback: Callback::Object(object, Rc::new(RefCell::new(handler))),
        });
        Some(id)
    }

    /// Invoke every binding in registration order
    ///
    /// Object bindings whose object no longer resolves through `lookup` are
    /// removed instead of invoked.
    pub fn broadcast<L: ObjectLookup + ?Sized>(&self, lookup: &L, args: &A) {
        let snapshot: Vec<(BindingId, Callback<A>)> = self
            .bindings
            .borrow()
            .iter()
            .map(|binding| (binding.id, binding.callback.clone()))
            .collect();

        for (id, callback) in snapshot {
            if !self.is_bound(id) {
                continue;
            }

            match callback {
                Callback::Plain(handler) => match handler.try_borrow_mut() {
                    Ok(mut handler) => (&mut *handler)(args),
                    Err(_) => log::warn!("Skipping re-entrant delegate handler {}", id.get()),
                },
                Callback::Object(object, handler) => {
                    if !lookup.is_live(object) {
                        log::trace!("Pruning delegate binding {} for destroyed object {}", id.get(), object);
                        self.remove(id);
                        continue;
                    }
                    match handler.try_borrow_mut() {
                        Ok(mut handler) => (&mut *handler)(object, args),
                        Err(_) => log::warn!("Skipping re-entrant delegate handler {}", id.get()),
                    }
                }
            }
        }
    }

    /// Remove one binding; unknown ids are ignored
    pub fn remove(&self, id: BindingId) {
        self.bindings.borrow_mut().retain(|binding| binding.id != id);
    }

    /// Remove every binding tied to `object`
    pub fn remove_all_for_object(&self, object: ObjectId) {
        self.bindings
            .borrow_mut()
            .retain(|binding| !matches!(binding.callback, Callback::Object(bound, _) if bound == object));
    }

    /// Remove every binding
    pub fn clear(&self) {
        self.bindings.borrow_mut().clear();
    }

    /// True if `id` is currently bound
    pub fn is_bound(&self, id: BindingId) -> bool {
        self.bindings.borrow().iter().any(|binding| binding.id == id)
    }

    /// Number of bindings, stale object bindings included
    pub fn len(&self) -> usize {
        self.bindings.borrow().len()
    }

    /// True if nothing is bound
    pub fn is_empty(&self) -> bool {
        self.bindings.borrow().is_empty()
    }
}

impl<A> Default for Delegate<A> {
    fn default() -> Self {
        Self::new()
    }
}

impl<A> fmt::Debug for Delegate<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Delegate")
            .field("bindings", &self.len())
            .field("next_id", &self.next_id.get())
            .finish()
    }
}
