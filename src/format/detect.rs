//! Container detection utilities.
//!
//! Detection only looks at the first record marker. A stream that does not
//! start with [`MAGIC`] can still be opened (it simply yields fewer or zero
//! entries), so these helpers are intended for tooling that needs to pick a
//! handler for an unknown file.

use std::io::{Read, Seek, SeekFrom};

use super::MAGIC;
use crate::Result;

/// Returns `true` if the stream starts with a 3DS-LZ record marker.
///
/// The check is performed from the start of the stream regardless of the
/// current position, and the position is restored afterwards.
///
/// # Example
///
/// ```rust
/// use dslz::format::is_3dslz;
/// use std::io::Cursor;
///
/// let mut data = Cursor::new(b"3DS-LZ\r\n\x11\x00\x00\x00".to_vec());
/// assert!(is_3dslz(&mut data).unwrap());
/// ```
pub fn is_3dslz<R: Read + Seek>(reader: &mut R) -> Result<bool> {
    let start_pos = reader.stream_position()?;
    reader.seek(SeekFrom::Start(0))?;

    let mut header = [0u8; MAGIC.len()];
    let matched = read_up_to(reader, &mut header)? == header.len() && header == *MAGIC;

    reader.seek(SeekFrom::Start(start_pos))?;
    Ok(matched)
}

/// Fills `buf` from `reader` until it is full or the stream ends.
///
/// Unlike `read_exact`, hitting the end of the stream is not an error; the
/// number of bytes actually read is returned.
pub(crate) fn read_up_to<R: Read>(reader: &mut R, buf: &mut [u8]) -> Result<usize> {
    let mut filled = 0;
    while filled < buf.len() {
        match reader.read(&mut buf[filled..]) {
            Ok(0) => break,
            Ok(n) => filled += n,
            Err(e) if e.kind() == std::io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e.into()),
        }
    }
    Ok(filled)
}
