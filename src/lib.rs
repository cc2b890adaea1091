//! # dirkv
//!
//! A persistent key-value store mapping string keys to binary values, one
//! file per key beneath a root directory:
//! - Reversible key-to-path encoding (percent-style escapes)
//! - Every resolved path is kept inside the root
//! - Get / TryGet / Put / Delete over plain files
//! - Optional async facade over the blocking operations
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │              Caller (KeyValueStore / AsyncKeyValueStore)     │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │ key: &str
//! ┌─────────────────────▼───────────────────────────────────────┐
//! │                    DirectoryStore                            │
//! │         encode_key → join_within → link escape check         │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │ path: {root}/{encoded key}
//!                       ▼
//!               ┌───────────────┐
//!               │  Filesystem   │
//!               │ (1 file/key)  │
//!               └───────────────┘
//! ```
//!
//! ## Example
//!
//! ```no_run
//! use dirkv::{DirectoryStore, KeyValueStore};
//!
//! # fn main() -> dirkv::Result<()> {
//! let store = DirectoryStore::new("/var/lib/myapp/kv")?;
//! store.put("users/alice", b"admin")?;
//! assert_eq!(store.get("users/alice")?, b"admin");
//! assert!(store.delete("users/alice")?);
//! # Ok(())
//! # }
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod config;

pub mod codec;
pub mod store;

// =============================================================================
// Public API Re-exports
// =============================================================================

pub use error::{DirKvError, Result};
pub use config::{Config, SyncStrategy};
pub use codec::{decode_key, encode_key};
pub use store::{DirectoryStore, KeyValueStore};

#[cfg(feature = "async")]
pub use store::{AsyncKeyValueStore, AsyncStore};

// =============================================================================
// Version Info
// =============================================================================

/// Current version of dirkv
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
