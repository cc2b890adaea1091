//! Codec Module
//!
//! Reversible translation of arbitrary key strings into relative paths that
//! are safe to create beneath the store root.
//!
//! ## Encoding
//! ```text
//!   key:      "reports/2024:q1%/"
//!                     │    │  │└─ trailing separator → "%2f"
//!                     │    │  └── escape marker      → "%25"
//!                     │    └───── invalid on Windows → "%3a" (kept on Unix)
//!                     └────────── interior separator, kept (nested directory)
//!
//!   encoded:  "reports/2024:q1%25%2f"          (Unix)
//! ```
//!
//! ## Escape Format
//! - Marker `%` followed by exactly two lowercase hex digits (`[0-9a-f]{2}`)
//! - The hex digits are the byte value of the escaped character
//! - Every escaped character is ASCII, so one byte always suffices
//!
//! ## Round Trip
//! The marker itself is always escaped, so any literal `%xx` text in a key is
//! encoded as `%25xx` and `decode_key(encode_key(k)) == k` for every
//! non-empty key.

mod charset;
mod escape;

pub use charset::{is_escaped, is_separator, ESCAPE_MARKER};
pub use escape::{decode_key, encode_key};
