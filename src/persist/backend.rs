//! Storage backends for per-user layouts.

use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard};

use crate::persist::PersistError;

/// Key under which one user's layout is stored.
///
/// Any string is accepted; [`UserScope::file_stem`] maps it onto a safe
/// file name that no other scope shares.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct UserScope(String);

impl UserScope {
    /// Creates a scope. Blank names fall back to `default`.
    pub fn new(name: &str) -> Self {
        let trimmed = name.trim();
        if trimmed.is_empty() {
            Self("default".to_string())
        } else {
            Self(trimmed.to_string())
        }
    }

    /// The scope name as given.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// File-system safe form of the name. See [`encode_key`].
    pub fn file_stem(&self) -> String {
        encode_key(&self.0)
    }
}

/// Percent-encodes `name` for use as a file stem.
///
/// ASCII letters, digits and `-_.~` are kept; every other byte becomes
/// `%XX`. The mapping is one-to-one, so distinct names never share a file,
/// and no result contains a path separator.
pub fn encode_key(name: &str) -> String {
    urlencoding::encode(name).into_owned()
}

/// Inverse of [`encode_key`].
///
/// Returns `None` for stems that [`encode_key`] would not have produced.
pub fn decode_key(stem: &str) -> Option<String> {
    let name = urlencoding::decode(stem).ok()?.into_owned();
    (encode_key(&name) == stem).then_some(name)
}

impl Default for UserScope {
    fn default() -> Self {
        Self::new("default")
    }
}

impl fmt::Display for UserScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Key-value store for serialized layouts.
pub trait LayoutBackend: Send {
    /// Returns the stored payload for `scope`, or `None` if nothing is stored.
    fn load(&self, scope: &UserScope) -> Result<Option<String>, PersistError>;

    /// Stores `payload` for `scope`, replacing any previous value.
    fn save(&mut self, scope: &UserScope, payload: &str) -> Result<(), PersistError>;

    /// Removes the stored payload for `scope`. Missing entries are not an error.
    fn clear(&mut self, scope: &UserScope) -> Result<(), PersistError>;

    /// Returns the payload of `scope`'s collection `name`, if stored.
    fn load_collection(
        &self,
        scope: &UserScope,
        name: &str,
    ) -> Result<Option<String>, PersistError>;

    /// Stores `payload` as `scope`'s collection `name`, replacing it if present.
    fn save_collection(
        &mut self,
        scope: &UserScope,
        name: &str,
        payload: &str,
    ) -> Result<(), PersistError>;

    /// Names of `scope`'s collections, sorted.
    fn list_collections(&self, scope: &UserScope) -> Result<Vec<String>, PersistError>;

    /// Removes `scope`'s collection `name`. Returns `false` if it did not exist.
    fn delete_collection(&mut self, scope: &UserScope, name: &str) -> Result<bool, PersistError>;

    /// Short description for logs.
    fn describe(&self) -> String;
}

#[derive(Debug, Default)]
struct MemoryInner {
    entries: HashMap<UserScope, String>,
    collections: HashMap<UserScope, BTreeMap<String, String>>,
    fail_writes: bool,
    writes: usize,
}

/// In-memory backend.
///
/// Clones share the same storage, so a test can keep a handle while the
/// store owns another.
#[derive(Debug, Clone, Default)]
pub struct MemoryBackend {
    inner: Arc<Mutex<MemoryInner>>,
}

impl MemoryBackend {
    /// Creates an empty backend.
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, MemoryInner> {
        self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Seeds a raw payload for `scope`.
    pub fn insert(&self, scope: &UserScope, payload: &str) {
        self.lock().entries.insert(scope.clone(), payload.to_string());
    }

    /// Raw payload stored for `scope`.
    pub fn get(&self, scope: &UserScope) -> Option<String> {
        self.lock().entries.get(scope).cloned()
    }

    /// Raw payload of `scope`'s collection `name`.
    pub fn get_collection(&self, scope: &UserScope, name: &str) -> Option<String> {
        self.lock()
            .collections
            .get(scope)
            .and_then(|named| named.get(name))
            .cloned()
    }

    /// Makes every later write fail until switched back off.
    pub fn set_fail_writes(&self, fail: bool) {
        self.lock().fail_writes = fail;
    }

    /// Number of successful writes so far.
    pub fn write_count(&self) -> usize {
        self.lock().writes
    }
}

impl LayoutBackend for MemoryBackend {
    fn load(&self, scope: &UserScope) -> Result<Option<String>, PersistError> {
        Ok(self.get(scope))
    }

    fn save(&mut self, scope: &UserScope, payload: &str) -> Result<(), PersistError> {
        let mut inner = self.lock();
        if inner.fail_writes {
            return Err(PersistError::Unavailable("writes disabled".to_string()));
        }
        inner.entries.insert(scope.clone(), payload.to_string());
        inner.writes += 1;
        Ok(())
    }

    fn clear(&mut self, scope: &UserScope) -> Result<(), PersistError> {
        let mut inner = self.lock();
        if inner.fail_writes {
            return Err(PersistError::Unavailable("writes disabled".to_string()));
        }
        inner.entries.remove(scope);
        Ok(())
    }

    fn load_collection(
        &self,
        scope: &UserScope,
        name: &str,
    ) -> Result<Option<String>, PersistError> {
        Ok(self.get_collection(scope, name))
    }

    fn save_collection(
        &mut self,
        scope: &UserScope,
        name: &str,
        payload: &str,
    ) -> Result<(), PersistError> {
        let mut inner = self.lock();
        if inner.fail_writes {
            return Err(PersistError::Unavailable("writes disabled".to_string()));
        }
        inner
            .collections
            .entry(scope.clone())
            .or_default()
            .insert(name.to_string(), payload.to_string());
        inner.writes += 1;
        Ok(())
    }

    fn list_collections(&self, scope: &UserScope) -> Result<Vec<String>, PersistError> {
        Ok(self
            .lock()
            .collections
            .get(scope)
            .map(|named| named.keys().cloned().collect())
            .unwrap_or_default())
    }

    fn delete_collection(&mut self, scope: &UserScope, name: &str) -> Result<bool, PersistError> {
        let mut inner = self.lock();
        if inner.fail_writes {
            return Err(PersistError::Unavailable("writes disabled".to_string()));
        }
        Ok(inner
            .collections
            .get_mut(scope)
            .and_then(|named| named.remove(name))
            .is_some())
    }

    fn describe(&self) -> String {
        "memory".to_string()
    }
}
