use parking_lot::{RwLock, RwLockReadGuard, RwLockWriteGuard};
use std::sync::Arc;

/// Reference counted, shared element buffer.
///
/// Cloning a `Storage` clones the handle: every clone reads and writes the
/// same elements. Use [`Storage::deep_clone`] for an independent copy.
#[derive(Debug)]
pub struct Storage<T> {
    inner: Arc<RwLock<Vec<T>>>,
}

impl<T> Clone for Storage<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

#[allow(clippy::len_without_is_empty)]
impl<T> Storage<T> {
    pub fn new(data: Vec<T>) -> Self {
        Self {
            inner: Arc::new(RwLock::new(data)),
        }
    }

    pub fn len(&self) -> usize {
        self.inner.read().len()
    }

    pub fn read(&self) -> RwLockReadGuard<'_, Vec<T>> {
        self.inner.read()
    }

    pub fn write(&self) -> RwLockWriteGuard<'_, Vec<T>> {
        self.inner.write()
    }

    /// Whether both handles point at the same buffer.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }

    /// Number of live handles to this buffer.
    pub fn handle_count(&self) -> usize {
        Arc::strong_count(&self.inner)
    }
}

impl<T: Clone> Storage<T> {
    pub fn deep_clone(&self) -> Self {
        Self::new(self.read().clone())
    }
}

impl<T> From<Vec<T>> for Storage<T> {
    fn from(data: Vec<T>) -> Self {
        Self::new(data)
    }
}
