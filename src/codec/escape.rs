//! Key encoding and decoding
//!
//! `encode_key` substitutes escape sequences for unsafe characters and then
//! escapes a trailing separator. `decode_key` reverses the substitution.

use crate::error::{DirKvError, Result};

use super::charset::{is_escaped, is_separator, ESCAPE_MARKER};

const HEX_DIGITS: &[u8; 16] = b"0123456789abcdef";

/// Encode a key into a relative path safe to create beneath the store root
///
/// Interior separators are kept and produce nested directories. A trailing
/// separator is escaped so the entry is always a file.
pub fn encode_key(key: &str) -> Result<String> {
    if key.is_empty() {
        return Err(DirKvError::InvalidArgument("key must not be empty".to_string()));
    }

    let mut encoded = String::with_capacity(key.len());
    for c in key.chars() {
        if is_escaped(c) {
            push_escape(&mut encoded, c)?;
        } else {
            encoded.push(c);
        }
    }

    if let Some(last) = encoded.chars().last() {
        if is_separator(last) {
            encoded.pop();
            push_escape(&mut encoded, last)?;
        }
    }

    Ok(encoded)
}

/// Decode an encoded key back into the original key
///
/// Every `%xx` with two lowercase hex digits becomes the character with that
/// byte value. Malformed sequences are copied through unchanged.
pub fn decode_key(encoded: &str) -> Result<String> {
    if encoded.is_empty() {
        return Err(DirKvError::InvalidArgument(
            "encoded key must not be empty".to_string(),
        ));
    }

    let mut decoded = String::with_capacity(encoded.len());
    let mut rest = encoded;

    while let Some(pos) = rest.find(ESCAPE_MARKER) {
        decoded.push_str(&rest[..pos]);
        let after = &rest[pos + ESCAPE_MARKER.len_utf8()..];

        match parse_hex_pair(after) {
            Some(byte) => {
                decoded.push(char::from(byte));
                // Both digits are ASCII
                rest = &after[2..];
            }
            None => {
                decoded.push(ESCAPE_MARKER);
                rest = after;
            }
        }
    }
    decoded.push_str(rest);

    Ok(decoded)
}

// =============================================================================
// Private Helpers
// =============================================================================

/// Append marker + two lowercase hex digits for a single-byte character
///
/// Decoding maps each byte back to `char::from(byte)`, so only characters up
/// to U+00FF round-trip.
fn push_escape(out: &mut String, c: char) -> Result<()> {
    let byte = u8::try_from(c).map_err(|_| {
        DirKvError::InvalidArgument(format!("cannot escape {:?}: outside U+0000..=U+00FF", c))
    })?;
    out.push(ESCAPE_MARKER);
    out.push(HEX_DIGITS[(byte >> 4) as usize] as char);
    out.push(HEX_DIGITS[(byte & 0x0f) as usize] as char);
    Ok(())
}

fn parse_hex_pair(s: &str) -> Option<u8> {
    let bytes = s.as_bytes();
    if bytes.len() < 2 {
        return None;
    }
    Some((hex_value(bytes[0])? << 4) | hex_value(bytes[1])?)
}

/// Lowercase only; `%3A` is not an escape sequence
fn hex_value(b: u8) -> Option<u8> {
    match b {
        b'0'..=b'9' => Some(b - b'0'),
        b'a'..=b'f' => Some(b - b'a' + 10),
        _ => None,
    }
}
