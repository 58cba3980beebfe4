//! 3DS-LZ container format constants and low-level helpers.
//!
//! A container is a sequence of records. Each record starts on a 64-byte
//! boundary with the 8-byte marker [`MAGIC`], followed by the payload that
//! runs up to the next marker (or to the end of the stream for the last
//! record). The first bytes of a payload double as a loose header:
//!
//! | Offset (after marker) | Size | Meaning |
//! |-----------------------|------|---------|
//! | 0                     | 5    | Reserved, value not meaningful |
//! | 5                     | 4    | Extension hint (letters only are significant) |
//! | 9                     | ..   | Remaining payload |

pub mod detect;
pub mod extension;

/// The record marker (magic bytes): `"3DS-LZ\r\n"`.
pub const MAGIC: &[u8; 8] = b"3DS-LZ\r\n";

/// Length of [`MAGIC`] in bytes.
pub const MAGIC_LEN: u64 = MAGIC.len() as u64;

/// Record alignment stride.
///
/// Markers are only recognized at multiples of this value, and the writer
/// pads every record but the last up to the next multiple.
pub const ALIGNMENT: u64 = 0x40;

/// Number of reserved bytes between the marker and the extension hint.
pub const RESERVED_LEN: u64 = 5;

/// Length of the extension hint in bytes.
pub const EXTENSION_LEN: usize = 4;

/// Extension used when the hint contains no letters.
pub const DEFAULT_EXTENSION: &str = "BIN";

/// Rounds `pos` up to the next multiple of `alignment`.
///
/// `alignment` must be non-zero.
pub fn align_up(pos: u64, alignment: u64) -> u64 {
    pos.div_ceil(alignment) * alignment
}

/// Returns the number of fill bytes needed to bring `pos` to the next
/// multiple of `alignment`.
pub fn padding_for(pos: u64, alignment: u64) -> u64 {
    align_up(pos, alignment) - pos
}

/// Builds the synthesized file name for the entry at `index`.
///
/// Names follow the `File_{index:06}.{ext}` scheme, so the seventh entry
/// with a `BCLIM` hint becomes `File_000006.BCLIM`.
pub fn entry_file_name(index: usize, extension: &str) -> String {
    format!("File_{index:06}.{extension}")
}

pub use detect::is_3dslz;
pub use extension::extension_from_hint;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_magic_len() {
        assert_eq!(MAGIC_LEN, 8);
        assert_eq!(MAGIC, b"3DS-LZ\r\n");
    }

    #[test]
    fn test_align_up() {
        assert_eq!(align_up(0, ALIGNMENT), 0);
        assert_eq!(align_up(1, ALIGNMENT), 64);
        assert_eq!(align_up(64, ALIGNMENT), 64);
        assert_eq!(align_up(65, ALIGNMENT), 128);
    }

    #[test]
    fn test_padding_for() {
        assert_eq!(padding_for(0, ALIGNMENT), 0);
        assert_eq!(padding_for(8, ALIGNMENT), 56);
        assert_eq!(padding_for(127, ALIGNMENT), 1);
        assert_eq!(padding_for(128, ALIGNMENT), 0);
    }

    #[test]
    fn test_entry_file_name() {
        assert_eq!(entry_file_name(0, "BIN"), "File_000000.BIN");
        assert_eq!(entry_file_name(42, "LZ"), "File_000042.LZ");
        assert_eq!(entry_file_name(1234567, "x"), "File_1234567.x");
        assert_eq!(entry_file_name(3, ""), "File_000003.");
    }
}
