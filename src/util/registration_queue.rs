//! A queue of resources waiting to be written, deduplicated by identity.

use std::sync::{Arc, PoisonError, RwLock};

/// Values that can tell whether two handles point to the same underlying object.
pub trait SameIdentity {
    /// Check whether `self` and `other` are the same object, not merely equal.
    fn same_identity(&self, other: &Self) -> bool;
}

impl<T: ?Sized> SameIdentity for Arc<T> {
    fn same_identity(&self, other: &Self) -> bool {
        Arc::ptr_eq(self, other)
    }
}

/// An ordered queue that accepts every identity at most once and can be
/// extended while it is being drained.
///
/// Clones share the same underlying storage.
#[derive(Debug)]
pub struct RegistrationQueue<T> {
    entries: Arc<RwLock<Vec<T>>>,
}

impl<T> Default for RegistrationQueue<T> {
    fn default() -> Self {
        Self {
            entries: Arc::new(RwLock::new(Vec::new())),
        }
    }
}

impl<T> Clone for RegistrationQueue<T> {
    fn clone(&self) -> Self {
        Self {
            entries: Arc::clone(&self.entries),
        }
    }
}

impl<T> RegistrationQueue<T>
where
    T: SameIdentity + Clone,
{
    /// Add a value unless a value with the same identity is already queued.
    ///
    /// Returns whether the value was added. The membership check and the
    /// insertion happen under one lock.
    pub fn enroll(&self, value: &T) -> bool {
        let mut entries = self
            .entries
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        if entries.iter().any(|entry| entry.same_identity(value)) {
            false
        } else {
            entries.push(value.clone());
            true
        }
    }

    /// Check whether a value with the same identity is queued.
    #[must_use]
    pub fn contains(&self, value: &T) -> bool {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .any(|entry| entry.same_identity(value))
    }

    /// Get the entry at the given position.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<T> {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(index)
            .cloned()
    }

    /// Get a copy of all entries in registration order.
    #[must_use]
    pub fn snapshot(&self) -> Vec<T> {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Walk the queue in registration order.
    ///
    /// Entries enrolled while draining are visited as well. The entries stay
    /// in the queue, so values seen once are never enrolled again.
    #[must_use]
    pub fn drain(&self) -> Drain<'_, T> {
        Drain {
            queue: self,
            cursor: 0,
        }
    }
}

impl<T> RegistrationQueue<T> {
    /// Remove all entries.
    pub fn clear(&self) {
        self.entries
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }

    /// Get the number of queued entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Check if the queue is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Iterator over a [`RegistrationQueue`] that also yields entries added after it was created.
#[derive(Debug)]
pub struct Drain<'a, T> {
    queue: &'a RegistrationQueue<T>,
    cursor: usize,
}

impl<T> Iterator for Drain<'_, T>
where
    T: SameIdentity + Clone,
{
    type Item = T;

    fn next(&mut self) -> Option<Self::Item> {
        let entry = self.queue.get(self.cursor)?;
        self.cursor += 1;
        Some(entry)
    }
}
