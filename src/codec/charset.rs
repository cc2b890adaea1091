//! Character classes
//!
//! Which characters the encoder must escape on the host platform.

/// Marker that starts a two-hex-digit escape sequence
pub const ESCAPE_MARKER: char = '%';

/// Characters Windows refuses in paths, besides control characters
#[cfg(windows)]
const WINDOWS_INVALID: &[char] = &['"', '<', '>', '|', ':', '*', '?'];

/// Returns true when `c` must be written as an escape sequence
///
/// Every character in this class must fit in one byte (U+0000..=U+00FF);
/// the escape format carries exactly two hex digits.
pub fn is_escaped(c: char) -> bool {
    c == ESCAPE_MARKER || is_invalid_path_char(c)
}

/// Returns true for the primary or alternate path separator
pub fn is_separator(c: char) -> bool {
    std::path::is_separator(c)
}

#[cfg(not(windows))]
fn is_invalid_path_char(c: char) -> bool {
    c == '\0'
}

#[cfg(windows)]
fn is_invalid_path_char(c: char) -> bool {
    (c as u32) < 0x20 || WINDOWS_INVALID.contains(&c)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_marker_always_escaped() {
        assert!(is_escaped('%'));
    }

    #[test]
    fn test_escaped_class_fits_one_byte() {
        let offenders: Vec<char> = (0..=0x10FFFFu32)
            .filter_map(char::from_u32)
            .filter(|&c| is_escaped(c) && u8::try_from(c).is_err())
            .collect();
        assert!(offenders.is_empty(), "{:?}", offenders);
    }

    #[test]
    fn test_nul_always_escaped() {
        assert!(is_escaped('\0'));
    }

    #[test]
    fn test_plain_chars_not_escaped() {
        for c in ['a', 'Z', '0', '-', '_', '.', ' ', 'é', '日'] {
            assert!(!is_escaped(c), "{:?} should pass through", c);
        }
    }

    #[test]
    fn test_separators_not_escaped_by_class() {
        assert!(!is_escaped('/'));
        assert!(is_separator('/'));
    }

    #[cfg(not(windows))]
    #[test]
    fn test_unix_allows_windows_specials() {
        for c in [':', '*', '?', '"', '<', '>', '|', '\\', '\u{1}'] {
            assert!(!is_escaped(c), "{:?} is a valid unix path char", c);
        }
        assert!(!is_separator('\\'));
    }

    #[cfg(windows)]
    #[test]
    fn test_windows_invalid_set() {
        for c in [':', '*', '?', '"', '<', '>', '|', '\u{1}', '\u{1f}'] {
            assert!(is_escaped(c), "{:?} is invalid on windows", c);
        }
        assert!(is_separator('\\'));
    }
}
