//! Bounded reader over a single entry's payload.

use std::io::{self, Cursor, Read, Seek, SeekFrom};

use super::ByteRange;

enum Inner<'a, R> {
    Source {
        reader: &'a mut R,
        range: ByteRange,
        pos: u64,
    },
    Memory(Cursor<&'a [u8]>),
}

/// A `Read + Seek` view over one entry's payload.
///
/// Positions are relative to the start of the payload. Archived entries are
/// read lazily from the source stream, which the reader borrows mutably, so
/// it can never outlive the [`Archive`](crate::Archive) it came from. Every
/// read re-seeks the source, so interleaving with other access to the
/// source stream is safe.
pub struct EntryReader<'a, R> {
    inner: Inner<'a, R>,
}

impl<'a, R: Read + Seek> EntryReader<'a, R> {
    pub(crate) fn from_source(reader: &'a mut R, range: ByteRange) -> Self {
        Self {
            inner: Inner::Source {
                reader,
                range,
                pos: 0,
            },
        }
    }

    pub(crate) fn from_memory(data: &'a [u8]) -> Self {
        Self {
            inner: Inner::Memory(Cursor::new(data)),
        }
    }

    /// Returns the payload length in bytes.
    pub fn len(&self) -> u64 {
        match &self.inner {
            Inner::Source { range, .. } => range.len,
            Inner::Memory(cursor) => cursor.get_ref().len() as u64,
        }
    }

    /// Returns `true` if the payload is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<R: Read + Seek> Read for EntryReader<'_, R> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        match &mut self.inner {
            Inner::Source { reader, range, pos } => {
                if *pos >= range.len || buf.is_empty() {
                    return Ok(0);
                }

                let max_read = ((range.len - *pos) as usize).min(buf.len());
                reader.seek(SeekFrom::Start(range.offset + *pos))?;
                let n = reader.read(&mut buf[..max_read])?;
                *pos += n as u64;
                Ok(n)
            }
            Inner::Memory(cursor) => cursor.read(buf),
        }
    }
}

impl<R: Read + Seek> Seek for EntryReader<'_, R> {
    fn seek(&mut self, target: SeekFrom) -> io::Result<u64> {
        match &mut self.inner {
            Inner::Source { range, pos, .. } => {
                let new_pos = match target {
                    SeekFrom::Start(offset) => Some(offset),
                    SeekFrom::End(delta) => range.len.checked_add_signed(delta),
                    SeekFrom::Current(delta) => pos.checked_add_signed(delta),
                };
                match new_pos {
                    Some(p) => {
                        *pos = p;
                        Ok(p)
                    }
                    None => Err(io::Error::new(
                        io::ErrorKind::InvalidInput,
                        "invalid seek to a negative or overflowing position",
                    )),
                }
            }
            Inner::Memory(cursor) => cursor.seek(target),
        }
    }
}
