//! Per-user layout persistence.
//!
//! [`LayoutPersistence`] wraps a [`LayoutBackend`] with the recovery rules
//! the dashboard relies on:
//!
//! - a stored payload is decoded and migrated exactly once per load;
//! - anything that fails to decode counts as "no saved layout" and the
//!   stored record is left in place;
//! - writes are best effort: failures are logged and the in-memory layout
//!   is kept.
//!
//! Named collections are explicit snapshots a user saves and switches
//! between. Their operations report every failure, since the user asked for
//! them directly.

mod backend;
mod error;
mod file;

pub use backend::{LayoutBackend, MemoryBackend, UserScope};
pub use error::{CollectionError, PersistError};
pub use file::FileBackend;

use crate::layout::migrate::Upgraded;
use crate::layout::{Layout, LayoutMigrator};

/// Loads, saves and clears one user's layout.
pub struct LayoutPersistence {
    backend: Box<dyn LayoutBackend>,
    scope: UserScope,
    migrator: LayoutMigrator,
}

impl std::fmt::Debug for LayoutPersistence {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LayoutPersistence")
            .field("backend", &self.backend.describe())
            .field("scope", &self.scope)
            .field("migrator", &self.migrator)
            .finish()
    }
}

impl LayoutPersistence {
    /// Creates a persistence layer for `scope` on top of `backend`.
    pub fn new(backend: Box<dyn LayoutBackend>, scope: UserScope) -> Self {
        Self::with_migrator(backend, scope, LayoutMigrator::new())
    }

    /// Same as [`LayoutPersistence::new`] with a custom migrator.
    pub fn with_migrator(
        backend: Box<dyn LayoutBackend>,
        scope: UserScope,
        migrator: LayoutMigrator,
    ) -> Self {
        Self {
            backend,
            scope,
            migrator,
        }
    }

    /// The user scope this instance reads and writes.
    pub fn scope(&self) -> &UserScope {
        &self.scope
    }

    /// Returns the last saved layout, upgraded, or `None` if there is none
    /// or it cannot be read.
    pub fn load(&self) -> Option<Upgraded> {
        let payload = match self.backend.load(&self.scope) {
            Ok(Some(payload)) => payload,
            Ok(None) => return None,
            Err(e) => {
                tracing::warn!(scope = %self.scope, error = %e, "could not read saved layout");
                return None;
            }
        };
        match self.migrator.decode(&payload) {
            Ok(upgraded) => Some(upgraded),
            Err(e) => {
                tracing::warn!(scope = %self.scope, error = %e, "ignoring malformed saved layout");
                None
            }
        }
    }

    /// Loads the saved layout, falling back to the default layout.
    ///
    /// A layout that needed migrating is written back straight away so the
    /// upgrade never runs on it again.
    pub fn load_or_default(&mut self) -> Layout {
        match self.load() {
            Some(upgraded) => {
                if upgraded.migrated() {
                    self.save(&upgraded.layout);
                }
                upgraded.layout
            }
            None => Layout::builtin_default(),
        }
    }

    /// Writes `layout`, overwriting the stored value.
    pub fn try_save(&mut self, layout: &Layout) -> Result<(), PersistError> {
        let payload = serde_json::to_string(layout)?;
        self.backend.save(&self.scope, &payload)
    }

    /// Writes `layout`, logging and swallowing failures.
    ///
    /// Returns `true` if the write succeeded.
    pub fn save(&mut self, layout: &Layout) -> bool {
        match self.try_save(layout) {
            Ok(()) => true,
            Err(e) => {
                tracing::warn!(scope = %self.scope, error = %e, "failed to save layout");
                false
            }
        }
    }

    /// Stores `layout` as the collection `name`, replacing any previous one.
    pub fn save_collection(&mut self, name: &str, layout: &Layout) -> Result<(), CollectionError> {
        let name = collection_name(name)?;
        let payload = serde_json::to_string(layout).map_err(PersistError::from)?;
        self.backend.save_collection(&self.scope, name, &payload)?;
        tracing::info!(scope = %self.scope, collection = name, "layout collection saved");
        Ok(())
    }

    /// Loads the collection `name`, upgraded.
    ///
    /// A collection that needed migrating is written back.
    pub fn load_collection(&mut self, name: &str) -> Result<Layout, CollectionError> {
        let name = collection_name(name)?;
        let payload = self
            .backend
            .load_collection(&self.scope, name)?
            .ok_or_else(|| CollectionError::NotFound {
                name: name.to_string(),
            })?;
        let upgraded =
            self.migrator
                .decode(&payload)
                .map_err(|source| CollectionError::Malformed {
                    name: name.to_string(),
                    source,
                })?;
        if upgraded.migrated() {
            if let Err(e) = self.save_collection(name, &upgraded.layout) {
                tracing::warn!(scope = %self.scope, collection = name, error = %e, "failed to write back migrated collection");
            }
        }
        Ok(upgraded.layout)
    }

    /// Names of this scope's collections, sorted.
    pub fn collections(&self) -> Result<Vec<String>, CollectionError> {
        Ok(self.backend.list_collections(&self.scope)?)
    }

    /// Deletes the collection `name`.
    pub fn delete_collection(&mut self, name: &str) -> Result<(), CollectionError> {
        let name = collection_name(name)?;
        if !self.backend.delete_collection(&self.scope, name)? {
            return Err(CollectionError::NotFound {
                name: name.to_string(),
            });
        }
        tracing::info!(scope = %self.scope, collection = name, "layout collection deleted");
        Ok(())
    }

    /// Clears the stored value and returns the default layout.
    pub fn reset(&mut self) -> Layout {
        if let Err(e) = self.backend.clear(&self.scope) {
            tracing::warn!(scope = %self.scope, error = %e, "failed to clear saved layout");
        }
        tracing::info!(scope = %self.scope, "layout reset to default");
        Layout::builtin_default()
    }
}

/// Trims `name`, rejecting blank names.
fn collection_name(name: &str) -> Result<&str, CollectionError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        Err(CollectionError::BlankName)
    } else {
        Ok(trimmed)
    }
}
