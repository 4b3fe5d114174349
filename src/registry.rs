use std::fmt::{self, Debug, Formatter};

use parking_lot::{RwLock, RwLockReadGuard};

use crate::error::SearchError;
use crate::search::{Boundary, search};

/// An append-only sequence with stable indices.
///
/// Values are never removed or reordered, so "index `i` is populated" is a
/// monotonic predicate and the registry can be sized by a boundary search
/// that only ever asks [`Registry::contains`].
pub struct Registry<T> {
    items: Vec<T>,
}

impl<T> Registry<T> {
    /// Creates an empty registry.
    pub const fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// Appends a value and returns its index.
    pub fn push(&mut self, value: T) -> usize {
        let index = self.items.len();
        self.items.push(value);
        index
    }

    /// The value at `index`, if it was registered.
    pub fn get(&self, index: usize) -> Option<&T> {
        self.items.get(index)
    }

    /// Whether a value was registered at `index`.
    pub fn contains(&self, index: usize) -> bool {
        index < self.items.len()
    }

    /// The number of registered values.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether nothing was registered yet.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Iterates over the values in registration order.
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }

    /// Determines the number of registered values by probing indices.
    pub fn count(&self) -> Result<usize, SearchError<usize>> {
        match search(|i| self.contains(i), None)? {
            Boundary::Found(n) => Ok(n),
            // A vector never holds `usize::MAX` elements.
            Boundary::Exhausted => unreachable!("gallop: registry covers every index"),
        }
    }
}

impl<T> Default for Registry<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Debug> Debug for Registry<T> {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        f.debug_list().entries(&self.items).finish()
    }
}

impl<T> FromIterator<T> for Registry<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self { items: iter.into_iter().collect() }
    }
}

impl<T> Extend<T> for Registry<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        self.items.extend(iter);
    }
}

impl<'a, T> IntoIterator for &'a Registry<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// A registry that can be appended to and searched from multiple threads.
///
/// A search must see a consistent view for its whole duration. Taking a
/// [`snapshot`](Self::snapshot) holds the read lock, so appends wait until
/// the snapshot is dropped.
pub struct SharedRegistry<T> {
    inner: RwLock<Registry<T>>,
}

impl<T> SharedRegistry<T> {
    /// Creates an empty shared registry.
    pub const fn new() -> Self {
        Self { inner: RwLock::new(Registry::new()) }
    }

    /// Appends a value and returns its index.
    pub fn push(&self, value: T) -> usize {
        self.inner.write().push(value)
    }

    /// A read-consistent view of the registry.
    pub fn snapshot(&self) -> RwLockReadGuard<'_, Registry<T>> {
        self.inner.read()
    }

    /// Determines the number of registered values under a single snapshot.
    pub fn count(&self) -> Result<usize, SearchError<usize>> {
        self.snapshot().count()
    }

    /// A copy of the value at `index`, if it was registered.
    pub fn get(&self, index: usize) -> Option<T>
    where
        T: Clone,
    {
        self.inner.read().get(index).cloned()
    }
}

impl<T> Default for SharedRegistry<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Debug> Debug for SharedRegistry<T> {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        Debug::fmt(&*self.inner.read(), f)
    }
}
