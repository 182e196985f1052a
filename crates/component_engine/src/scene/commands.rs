//! Deferred world commands
//!
//! Event handlers run while the world is mid-update and cannot mutate it.
//! They queue commands instead; the world applies them once dispatch ends.

use crate::object::ObjectId;
use std::cell::RefCell;
use std::rc::Rc;

/// Structural change requested from inside an event handler
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorldCommand {
    /// Destroy an actor or component
    Destroy(ObjectId),
}

/// Shared handle to the world's pending command list
///
/// Cloning is cheap; every clone feeds the same queue.
#[derive(Debug, Clone, Default)]
pub struct CommandQueue {
    inner: Rc<RefCell<Vec<WorldCommand>>>,
}

impl CommandQueue {
    /// Create an empty queue
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue destruction of `id`; queuing twice is harmless
    pub fn destroy(&self, id: ObjectId) {
        let mut commands = self.inner.borrow_mut();
        if !commands.contains(&WorldCommand::Destroy(id)) {
            commands.push(WorldCommand::Destroy(id));
        }
    }

    /// True if `id` is waiting to be destroyed
    pub fn is_pending_destroy(&self, id: ObjectId) -> bool {
        self.inner.borrow().contains(&WorldCommand::Destroy(id))
    }

    /// Take every queued command in submission order
    pub fn drain(&self) -> Vec<WorldCommand> {
        std::mem::take(&mut *self.inner.borrow_mut())
    }

    /// Number of queued commands
    pub fn len(&self) -> usize {
        self.inner.borrow().len()
    }

    /// True if nothing is queued
    pub fn is_empty(&self) -> bool {
        self.inner.borrow().is_empty()
    }
}
