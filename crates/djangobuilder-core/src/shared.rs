//! Shared, lock-protected project handle.

use std::sync::Arc;

use parking_lot::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::schema::Project;

/// A project graph shared across threads.
///
/// Readers of derived values run concurrently; structural mutation takes
/// the single writer slot for this project only.
#[derive(Debug, Clone)]
pub struct SharedProject {
    inner: Arc<RwLock<Project>>,
}

impl SharedProject {
    /// Wrap a project for sharing.
    pub fn new(project: Project) -> Self {
        Self {
            inner: Arc::new(RwLock::new(project)),
        }
    }

    /// Acquire shared read access.
    pub fn read(&self) -> RwLockReadGuard<'_, Project> {
        self.inner.read()
    }

    /// Acquire exclusive write access.
    pub fn write(&self) -> RwLockWriteGuard<'_, Project> {
        self.inner.write()
    }

    /// Run a mutation under the write lock.
    pub fn update<T>(&self, f: impl FnOnce(&mut Project) -> T) -> T {
        f(&mut self.inner.write())
    }

    /// Unwrap the project if this is the last handle.
    pub fn try_unwrap(self) -> Result<Project, Self> {
        Arc::try_unwrap(self.inner)
            .map(RwLock::into_inner)
            .map_err(|inner| Self { inner })
    }
}

impl From<Project> for SharedProject {
    fn from(project: Project) -> Self {
        Self::new(project)
    }
}
