//! Directory Store
//!
//! One regular file per key at `{root}/{encode_key(key)}`.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf, MAIN_SEPARATOR};

use walkdir::WalkDir;

use crate::codec::{decode_key, encode_key};
use crate::config::{Config, SyncStrategy};
use crate::error::{DirKvError, Result};

use super::containment;
use super::KeyValueStore;

/// Key-value store backed by a filesystem directory
///
/// Holds only the root path and the sync strategy, both immutable after
/// construction. Cloning is cheap and clones share nothing but the directory
/// on disk.
#[derive(Debug, Clone)]
pub struct DirectoryStore {
    /// Directory beneath which all entries live
    root: PathBuf,

    /// Whether puts fsync the entry file
    sync_strategy: SyncStrategy,
}

impl DirectoryStore {
    /// Create a store rooted at `root`
    ///
    /// The directory is not touched here; it is created by the first put.
    pub fn new(root: impl Into<PathBuf>) -> Result<Self> {
        let root = root.into();
        if root.as_os_str().is_empty() {
            return Err(DirKvError::InvalidArgument(
                "root directory must not be empty".to_string(),
            ));
        }

        Ok(Self {
            root,
            sync_strategy: SyncStrategy::None,
        })
    }

    /// Create a store from a config
    ///
    /// Creates the root directory only when `create_root` is set.
    pub fn open(config: Config) -> Result<Self> {
        let mut store = Self::new(config.root_dir)?;
        store.sync_strategy = config.sync_strategy;

        if config.create_root {
            fs::create_dir_all(&store.root)?;
            tracing::debug!("Created store root {}", store.root.display());
        }

        Ok(store)
    }

    /// Resolve a key to the file that holds its value
    ///
    /// Steps:
    /// 1. Encode the key
    /// 2. Join onto the root, rejecting absolute keys, `..`, and empty or `.` segments
    /// 3. Reject paths whose existing ancestors link outside the root
    pub fn resolve(&self, key: &str) -> Result<PathBuf> {
        let encoded = encode_key(key)?;
        let path = containment::join_within(&self.root, key, &encoded)?;
        containment::ensure_no_link_escape(&self.root, &path, key)?;
        Ok(path)
    }

    /// Check whether a value is stored under `key`
    pub fn contains_key(&self, key: &str) -> Result<bool> {
        let path = self.resolve(key)?;
        match fs::metadata(&path) {
            Ok(metadata) => Ok(metadata.is_file()),
            Err(e) if is_absent(&e, &path) => Ok(false),
            Err(e) => Err(e.into()),
        }
    }

    /// List every stored key, sorted
    ///
    /// Interior separators come back as the platform's primary separator.
    /// Entries whose names are not valid UTF-8 were not written by this store
    /// and are skipped.
    pub fn keys(&self) -> Result<Vec<String>> {
        match fs::metadata(&self.root) {
            Ok(_) => {}
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        }

        let mut keys = Vec::new();
        for entry in WalkDir::new(&self.root).min_depth(1) {
            let entry = entry.map_err(io::Error::from)?;
            if !entry.file_type().is_file() {
                continue;
            }

            let relative = entry
                .path()
                .strip_prefix(&self.root)
                .map_err(io::Error::other)?;

            match relative_to_encoded(relative) {
                Some(encoded) => keys.push(decode_key(&encoded)?),
                None => {
                    tracing::warn!("Skipping non-UTF-8 entry {}", entry.path().display());
                }
            }
        }

        keys.sort();
        Ok(keys)
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// Get the root directory path
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Get the sync strategy
    pub fn sync_strategy(&self) -> SyncStrategy {
        self.sync_strategy
    }
}

impl KeyValueStore for DirectoryStore {
    fn get(&self, key: &str) -> Result<Vec<u8>> {
        let path = self.resolve(key)?;
        tracing::trace!("Reading {}", path.display());

        fs::read(&path).map_err(|e| {
            if is_absent(&e, &path) {
                DirKvError::KeyNotFound(key.to_string())
            } else {
                DirKvError::Io(e)
            }
        })
    }

    fn try_get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        let path = self.resolve(key)?;
        tracing::trace!("Reading {}", path.display());

        // A single read covers both "absent" and "deleted after we looked"
        match fs::read(&path) {
            Ok(value) => Ok(Some(value)),
            Err(e) if is_absent(&e, &path) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn put(&self, key: &str, value: &[u8]) -> Result<()> {
        let path = self.resolve(key)?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        match self.sync_strategy {
            SyncStrategy::None => fs::write(&path, value)?,
            SyncStrategy::EveryWrite => {
                let mut file = fs::File::create(&path)?;
                file.write_all(value)?;
                file.sync_all()?;
            }
        }

        tracing::debug!("Put {:?} ({} bytes) at {}", key, value.len(), path.display());
        Ok(())
    }

    fn delete(&self, key: &str) -> Result<bool> {
        let path = self.resolve(key)?;

        // Directories are never entries
        match fs::symlink_metadata(&path) {
            Ok(metadata) if metadata.is_dir() => return Ok(false),
            Ok(_) => {}
            Err(e) if is_absent(&e, &path) => return Ok(false),
            Err(e) => return Err(e.into()),
        }

        match fs::remove_file(&path) {
            Ok(()) => {
                tracing::debug!("Deleted {:?} at {}", key, path.display());
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                tracing::debug!("{:?} removed concurrently before delete", key);
            }
            Err(e) => return Err(e.into()),
        }

        Ok(true)
    }
}

// =============================================================================
// Private Helpers
// =============================================================================

/// True when a failed lookup means no regular file lives at `path`
///
/// Covers a missing file, a parent segment that is a regular file, and a
/// directory sitting where the entry would be.
fn is_absent(err: &io::Error, path: &Path) -> bool {
    match err.kind() {
        io::ErrorKind::NotFound | io::ErrorKind::NotADirectory | io::ErrorKind::IsADirectory => {
            true
        }
        // Windows reports reading a directory as PermissionDenied
        _ => fs::metadata(path).map(|m| m.is_dir()).unwrap_or(false),
    }
}

/// Rebuild the encoded key string from a path relative to the root
fn relative_to_encoded(relative: &Path) -> Option<String> {
    let mut encoded = String::new();
    for (i, component) in relative.components().enumerate() {
        if i > 0 {
            encoded.push(MAIN_SEPARATOR);
        }
        encoded.push_str(component.as_os_str().to_str()?);
    }
    Some(encoded)
}
