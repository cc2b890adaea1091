//! Store Module
//!
//! The key-value capability and its directory-backed implementation.
//!
//! ## Responsibilities
//! - Define the `KeyValueStore` capability callers program against
//! - Resolve keys to files beneath one root directory
//! - Keep every resolved path inside the root
//! - Translate "file missing" into `KeyNotFound`, pass every other I/O error through
//!
//! ## On-Disk Layout
//! ```text
//! {root}/
//!   ├── config              ← put("config")
//!   ├── users%2f            ← put("users/")   (trailing separator escaped)
//!   └── users/
//!         ├── alice         ← put("users/alice")
//!         └── 100%25        ← put("users/100%")
//! ```
//!
//! ## Concurrency
//! There is no store-wide lock. Each operation is a self-contained unit of
//! filesystem work; concurrent puts to one key are last-write-wins and reads
//! tolerate files disappearing underneath them.

mod containment;
mod directory;

#[cfg(feature = "async")]
mod async_store;

pub use directory::DirectoryStore;

#[cfg(feature = "async")]
pub use async_store::{AsyncKeyValueStore, AsyncStore};

use crate::error::Result;

/// Key-value capability: string keys to opaque byte values.
///
/// Implementations must satisfy:
/// - `get` on a missing key fails with `DirKvError::KeyNotFound`
/// - `try_get` on a missing key returns `Ok(None)`
/// - `put` replaces any existing value
/// - `delete` on a missing key returns `Ok(false)`
/// - Empty keys are rejected with `DirKvError::InvalidArgument`
pub trait KeyValueStore: Send + Sync {
    /// Read the value stored under `key`.
    fn get(&self, key: &str) -> Result<Vec<u8>>;

    /// Read the value stored under `key`, or `None` when there is none.
    fn try_get(&self, key: &str) -> Result<Option<Vec<u8>>>;

    /// Store `value` under `key`, replacing any previous value.
    fn put(&self, key: &str, value: &[u8]) -> Result<()>;

    /// Remove `key`. Returns whether it existed.
    fn delete(&self, key: &str) -> Result<bool>;
}
