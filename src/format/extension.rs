//! Extension inference from the 4-byte header hint.

use super::DEFAULT_EXTENSION;

/// Infers a file extension from the raw hint bytes of a record.
///
/// The rule has two steps that are applied independently:
///
/// 1. If the hint contains no ASCII letter at all, the extension is
///    [`DEFAULT_EXTENSION`].
/// 2. Otherwise every non-letter byte is dropped and the remaining letters
///    form the extension, in order.
///
/// Step 1 only checks for the presence of a letter, so mixed hints such as
/// `"LZ1\0"` shrink to `"LZ"` and a single-letter hint yields a one-letter
/// extension. The hint may be shorter than four bytes when it was probed
/// near the end of a stream.
///
/// # Example
///
/// ```rust
/// use dslz::format::extension_from_hint;
///
/// assert_eq!(extension_from_hint(b"LZ1\0"), "LZ");
/// assert_eq!(extension_from_hint(&[0, 0, 0, 0]), "BIN");
/// ```
pub fn extension_from_hint(hint: &[u8]) -> String {
    if !hint.iter().any(u8::is_ascii_alphabetic) {
        return DEFAULT_EXTENSION.to_string();
    }

    hint.iter()
        .copied()
        .filter(u8::is_ascii_alphabetic)
        .map(char::from)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_letters() {
        assert_eq!(extension_from_hint(b"BCLM"), "BCLM");
        assert_eq!(extension_from_hint(b"msbt"), "msbt");
    }

    #[test]
    fn test_trailing_non_letter_stripped() {
        assert_eq!(extension_from_hint(b"LZ1\0"), "LZ");
        assert_eq!(extension_from_hint(b"BIN\0"), "BIN");
    }

    #[test]
    fn test_no_letters_defaults_to_bin() {
        assert_eq!(extension_from_hint(&[0, 0, 0, 0]), "BIN");
        assert_eq!(extension_from_hint(b"1234"), "BIN");
        assert_eq!(extension_from_hint(&[0xFF, 0x80, 0x11, 0x20]), "BIN");
    }

    #[test]
    fn test_interleaved_letters_are_joined() {
        assert_eq!(extension_from_hint(b"a1b2"), "ab");
        assert_eq!(extension_from_hint(b"\x11Z\x00\x00"), "Z");
    }

    #[test]
    fn test_short_hint() {
        assert_eq!(extension_from_hint(b""), "BIN");
        assert_eq!(extension_from_hint(b"ab"), "ab");
    }

    #[test]
    fn test_non_ascii_bytes_are_not_letters() {
        // Latin-1 letters are not ASCII alphabetic.
        assert_eq!(extension_from_hint(&[0xC4, 0xD6, 0xDC, 0xE9]), "BIN");
        assert_eq!(extension_from_hint(&[0xC4, b'X', 0xDC, 0xE9]), "X");
    }
}
