//! Archive writing API for 3DS-LZ containers.
//!
//! Saving serializes every entry of an [`Archive`] in index order. Each
//! record is the 8-byte marker followed by the entry body:
//!
//! - archived entries with pass-through bytes write those bytes verbatim,
//! - other archived entries copy their original range from the source,
//! - modified entries are compressed with the configured codec.
//!
//! Every record except the last is followed by fill bytes up to the next
//! 64-byte boundary relative to where the save began. In the default compact
//! layout the next record starts right there. In the fixed layout every
//! record is written back at its original offset, and any gap beyond the
//! fill keeps whatever the destination already held.
//!
//! # Example
//!
//! ```rust,no_run
//! use dslz::read::Archive;
//! use dslz::write::WriteOptions;
//!
//! let mut archive = Archive::open_path("sound.3dslz")?;
//! archive.replace(0, b"new content".to_vec())?;
//!
//! let result = archive.save_path_with_options("patched.3dslz", &WriteOptions::new())?;
//! println!("Wrote {} records ({} bytes)", result.entries_written, result.bytes_written);
//! # Ok::<(), dslz::Error>(())
//! ```

mod options;

pub use options::{WriteOptions, WriteResult};

use std::borrow::Cow;
use std::fs::File;
use std::io::{self, BufWriter, Read, Seek, SeekFrom, Write};
use std::path::Path;

use crate::format::{ALIGNMENT, MAGIC, MAGIC_LEN, padding_for};
use crate::read::{Archive, ByteRange, EntryReader, Payload};
use crate::{Error, Result};

/// Size of the fill buffer used for alignment gaps.
const PADDING_CHUNK: usize = 64;

/// Planned content of a single record.
enum RecordBody<'a> {
    /// Bytes held in memory: pass-through bytes or freshly compressed data.
    Bytes(Cow<'a, [u8]>),
    /// A range copied from the source stream.
    Source(ByteRange),
}

impl RecordBody<'_> {
    fn len(&self) -> u64 {
        match self {
            Self::Bytes(bytes) => bytes.len() as u64,
            Self::Source(range) => range.len,
        }
    }
}

impl<R: Read + Seek> Archive<R> {
    /// Saves the archive to `writer` with default options.
    ///
    /// # Errors
    ///
    /// See [`save_with_options`](Self::save_with_options).
    pub fn save<W: Write + Seek>(&mut self, writer: W) -> Result<WriteResult> {
        self.save_with_options(writer, &WriteOptions::default())
    }

    /// Saves the archive to `writer`.
    ///
    /// The container is written starting at the writer's current position.
    /// Modified entries are compressed before anything is written, so a
    /// codec failure or a layout overflow leaves the writer untouched.
    ///
    /// # Errors
    ///
    /// Returns [`Error::StreamClosed`] if the archive has been closed,
    /// [`Error::EntryOverflow`] if a fixed-offset record no longer fits and
    /// [`WriteOptions::verify_fixed_layout`] is set, or any I/O or codec
    /// error.
    pub fn save_with_options<W: Write + Seek>(
        &mut self,
        mut writer: W,
        options: &WriteOptions,
    ) -> Result<WriteResult> {
        let Self {
            source,
            entries,
            offsets,
            ..
        } = self;
        let source = source.as_mut().ok_or(Error::StreamClosed)?;
        let codec = options.codec.codec();

        let mut result = WriteResult::default();
        let mut bodies = Vec::with_capacity(entries.len());
        for entry in entries.iter() {
            let body = match (&entry.payload, &entry.compressed) {
                (Payload::Archived(_), Some(bytes)) => {
                    result.entries_passed_through += 1;
                    RecordBody::Bytes(Cow::Borrowed(bytes.as_slice()))
                }
                (Payload::Archived(range), None) => {
                    result.entries_passed_through += 1;
                    RecordBody::Source(*range)
                }
                (Payload::Modified(data), _) => {
                    result.entries_compressed += 1;
                    RecordBody::Bytes(Cow::Owned(codec.compress(data)?))
                }
            };
            bodies.push(body);
        }

        if options.fixed_offsets {
            check_fixed_layout(offsets, &bodies, options.verify_fixed_layout)?;
        }

        let base = writer.stream_position()?;
        let mut pos = base;
        let mut end = base;
        let last = bodies.len().saturating_sub(1);

        for (index, body) in bodies.iter().enumerate() {
            if options.fixed_offsets {
                let target = base + offsets[index] - MAGIC_LEN;
                if target != pos {
                    writer.seek(SeekFrom::Start(target))?;
                    pos = target;
                }
            }

            writer.write_all(MAGIC)?;
            pos += MAGIC_LEN;
            pos += write_body(&mut writer, &mut *source, body)?;

            if index != last {
                let fill = padding_for(pos - base, ALIGNMENT);
                write_fill(&mut writer, options.padding_byte, fill)?;
                pos += fill;
            }

            end = end.max(pos);
            result.entries_written += 1;
        }

        writer.flush()?;
        result.bytes_written = end - base;

        log::debug!(
            "Saved {} records ({} compressed, {} passed through), {} bytes",
            result.entries_written,
            result.entries_compressed,
            result.entries_passed_through,
            result.bytes_written
        );
        Ok(result)
    }

    /// Saves the archive to a new file at `path` with default options.
    pub fn save_path(&mut self, path: impl AsRef<Path>) -> Result<WriteResult> {
        self.save_path_with_options(path, &WriteOptions::default())
    }

    /// Saves the archive to a new file at `path`.
    ///
    /// The archive must not be saved over its own source file: archived
    /// entries are copied from the source while the output is written.
    pub fn save_path_with_options(
        &mut self,
        path: impl AsRef<Path>,
        options: &WriteOptions,
    ) -> Result<WriteResult> {
        if self.is_closed() {
            return Err(Error::StreamClosed);
        }
        let file = File::create(path.as_ref())?;
        self.save_with_options(BufWriter::new(file), options)
    }
}

/// Verifies that every record except the last fits before the next offset.
fn check_fixed_layout(offsets: &[u64], bodies: &[RecordBody<'_>], strict: bool) -> Result<()> {
    for (index, body) in bodies.iter().enumerate() {
        let Some(&next) = offsets.get(index + 1) else {
            break;
        };
        let needed = MAGIC_LEN + body.len();
        let available = next - offsets[index];
        if needed > available {
            if strict {
                return Err(Error::EntryOverflow {
                    index,
                    needed,
                    available,
                });
            }
            log::warn!(
                "Record {} needs {} bytes but only {} are available; the next record will be overwritten",
                index,
                needed,
                available
            );
        }
    }
    Ok(())
}

/// Writes a record body and returns the number of bytes written.
fn write_body<R: Read + Seek, W: Write>(
    writer: &mut W,
    source: &mut R,
    body: &RecordBody<'_>,
) -> Result<u64> {
    match body {
        RecordBody::Bytes(bytes) => {
            writer.write_all(bytes)?;
            Ok(bytes.len() as u64)
        }
        RecordBody::Source(range) => {
            let mut reader = EntryReader::from_source(source, *range);
            let copied = io::copy(&mut reader, writer)?;
            if copied < range.len {
                return Err(Error::Io(io::Error::new(
                    io::ErrorKind::UnexpectedEof,
                    format!(
                        "source range at {} ends after {} of {} bytes",
                        range.offset, copied, range.len
                    ),
                )));
            }
            Ok(copied)
        }
    }
}

fn write_fill<W: Write>(writer: &mut W, byte: u8, mut count: u64) -> Result<()> {
    let chunk = [byte; PADDING_CHUNK];
    while count > 0 {
        let n = count.min(PADDING_CHUNK as u64) as usize;
        writer.write_all(&chunk[..n])?;
        count -= n as u64;
    }
    Ok(())
}
