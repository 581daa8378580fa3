//! One JSON file per user scope.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use crate::persist::backend::{decode_key, encode_key};
use crate::persist::{LayoutBackend, PersistError, UserScope};

/// Directory under the layouts directory holding named collections.
const COLLECTIONS_DIR: &str = "collections";

/// Stores each scope's layout as `<dir>/<scope>.json` and its named
/// collections as `<dir>/collections/<scope>/<name>.json`, with scope and
/// collection names percent-encoded.
///
/// Writes go to a sibling temp file which is synced and then renamed over
/// the target, so a crash leaves either the old or the new layout.
#[derive(Debug, Clone)]
pub struct FileBackend {
    dir: PathBuf,
}

impl FileBackend {
    /// Creates a backend rooted at `dir`. The directory is created on first
    /// write.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Directory holding the layout files.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// File holding `scope`'s layout.
    pub fn path_for(&self, scope: &UserScope) -> PathBuf {
        self.dir.join(format!("{}.json", scope.file_stem()))
    }

    /// Directory holding `scope`'s named collections.
    pub fn collections_dir(&self, scope: &UserScope) -> PathBuf {
        self.dir.join(COLLECTIONS_DIR).join(scope.file_stem())
    }

    /// File holding `scope`'s collection `name`.
    pub fn collection_path(&self, scope: &UserScope, name: &str) -> PathBuf {
        self.collections_dir(scope)
            .join(format!("{}.json", encode_key(name)))
    }
}

fn read_optional(path: PathBuf) -> Result<Option<String>, PersistError> {
    match fs::read_to_string(&path) {
        Ok(content) => Ok(Some(content)),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
        Err(source) => Err(PersistError::Read { path, source }),
    }
}

/// Writes `payload` to `path` through a synced temp file and a rename.
fn write_atomic(path: &Path, payload: &str) -> Result<(), PersistError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|source| PersistError::Write {
            path: parent.to_path_buf(),
            source,
        })?;
    }

    let temp_path = path.with_extension("json.tmp");
    let write_temp = || -> io::Result<()> {
        let mut file = fs::File::create(&temp_path)?;
        file.write_all(payload.as_bytes())?;
        file.sync_all()
    };
    write_temp().map_err(|source| PersistError::Write {
        path: temp_path.clone(),
        source,
    })?;

    fs::rename(&temp_path, path).map_err(|source| PersistError::Write {
        path: path.to_path_buf(),
        source,
    })?;
    tracing::trace!(path = %path.display(), bytes = payload.len(), "layout written");
    Ok(())
}

/// Removes `path`, returning `false` if it was already gone.
fn remove_optional(path: PathBuf) -> Result<bool, PersistError> {
    match fs::remove_file(&path) {
        Ok(()) => Ok(true),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
        Err(source) => Err(PersistError::Remove { path, source }),
    }
}

impl LayoutBackend for FileBackend {
    fn load(&self, scope: &UserScope) -> Result<Option<String>, PersistError> {
        read_optional(self.path_for(scope))
    }

    fn save(&mut self, scope: &UserScope, payload: &str) -> Result<(), PersistError> {
        write_atomic(&self.path_for(scope), payload)
    }

    fn clear(&mut self, scope: &UserScope) -> Result<(), PersistError> {
        remove_optional(self.path_for(scope)).map(|_| ())
    }

    fn load_collection(
        &self,
        scope: &UserScope,
        name: &str,
    ) -> Result<Option<String>, PersistError> {
        read_optional(self.collection_path(scope, name))
    }

    fn save_collection(
        &mut self,
        scope: &UserScope,
        name: &str,
        payload: &str,
    ) -> Result<(), PersistError> {
        write_atomic(&self.collection_path(scope, name), payload)
    }

    fn list_collections(&self, scope: &UserScope) -> Result<Vec<String>, PersistError> {
        let dir = self.collections_dir(scope);
        let entries = match fs::read_dir(&dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(source) => return Err(PersistError::Read { path: dir, source }),
        };
        let mut names = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|source| PersistError::Read {
                path: dir.clone(),
                source,
            })?;
            let file_name = entry.file_name();
            let Some(stem) = file_name.to_str().and_then(|f| f.strip_suffix(".json")) else {
                continue;
            };
            match decode_key(stem) {
                Some(name) => names.push(name),
                None => tracing::debug!(file = stem, "skipping foreign file in collections"),
            }
        }
        names.sort();
        Ok(names)
    }

    fn delete_collection(&mut self, scope: &UserScope, name: &str) -> Result<bool, PersistError> {
        remove_optional(self.collection_path(scope, name))
    }

    fn describe(&self) -> String {
        self.dir.display().to_string()
    }
}
