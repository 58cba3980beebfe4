//! Record scanning.
//!
//! The scanner walks a stream in fixed [`ALIGNMENT`] steps and recognizes a
//! record only when [`MAGIC`] starts exactly on a stride boundary. Markers
//! that happen to sit off-stride are never detected; there is no fallback
//! byte-by-byte search.

use std::io::{Read, Seek, SeekFrom};

use super::ScanOptions;
use crate::format::detect::read_up_to;
use crate::format::{ALIGNMENT, EXTENSION_LEN, MAGIC, MAGIC_LEN, RESERVED_LEN, extension_from_hint};
use crate::{Error, Result};

/// A record located by the scanner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    /// Offset of the first payload byte (immediately after the marker).
    pub offset: u64,
    /// Payload length, marker excluded.
    pub size: u64,
    /// Extension inferred from the header hint.
    pub extension: String,
}

impl Record {
    /// Returns the offset of the record marker.
    pub fn marker_offset(&self) -> u64 {
        self.offset - MAGIC_LEN
    }
}

/// Scanner for locating records in a 3DS-LZ stream.
pub struct RecordScanner<'a, R: Read + Seek> {
    reader: &'a mut R,
    options: ScanOptions,
    stream_len: u64,
    position: u64,
}

impl<'a, R: Read + Seek> RecordScanner<'a, R> {
    /// Creates a scanner positioned at the start of the stream.
    pub fn new(reader: &'a mut R, options: ScanOptions) -> Result<Self> {
        let stream_len = reader.seek(SeekFrom::End(0))?;
        Ok(Self {
            reader,
            options,
            stream_len,
            position: 0,
        })
    }

    /// Returns the total stream length.
    pub fn stream_len(&self) -> u64 {
        self.stream_len
    }

    /// Finds the next stride-aligned marker.
    ///
    /// Returns `Ok(Some(offset))` with the marker's offset, or `Ok(None)`
    /// once the end of the stream is reached. Each call resumes one stride
    /// after the previously inspected position.
    pub fn find_next_marker(&mut self) -> Result<Option<u64>> {
        let mut candidate = [0u8; MAGIC.len()];

        while self.position < self.stream_len {
            let pos = self.position;
            self.position += ALIGNMENT;

            self.reader.seek(SeekFrom::Start(pos))?;
            let n = read_up_to(&mut *self.reader, &mut candidate)?;
            if n == candidate.len() && candidate == *MAGIC {
                return Ok(Some(pos));
            }
        }

        Ok(None)
    }

    /// Reads the extension hint of the record whose marker is at `marker`.
    fn probe_extension(&mut self, marker: u64) -> Result<String> {
        let probe_start = marker + MAGIC_LEN + RESERVED_LEN;
        let probe_end = probe_start + EXTENSION_LEN as u64;

        if probe_end > self.stream_len && self.options.strict_probe {
            return Err(Error::CorruptHeader {
                offset: marker,
                reason: format!(
                    "extension probe needs bytes up to {:#x} but the stream ends at {:#x}",
                    probe_end, self.stream_len
                ),
            });
        }

        let mut hint = [0u8; EXTENSION_LEN];
        let n = if probe_start < self.stream_len {
            self.reader.seek(SeekFrom::Start(probe_start))?;
            read_up_to(&mut *self.reader, &mut hint)?
        } else {
            0
        };

        Ok(extension_from_hint(&hint[..n]))
    }

    /// Scans the whole stream and returns every record in stream order.
    ///
    /// Sizes are derived from consecutive marker positions: each record
    /// spans up to the next marker, and the last one runs to the end of the
    /// stream, absorbing any trailing bytes.
    pub fn scan(&mut self) -> Result<Vec<Record>> {
        let mut found: Vec<(u64, String)> = Vec::new();

        while let Some(marker) = self.find_next_marker()? {
            if let Some(max) = self.options.max_entries {
                if found.len() >= max {
                    return Err(Error::ResourceLimitExceeded(format!(
                        "archive has more than {} records",
                        max
                    )));
                }
            }

            let extension = self.probe_extension(marker)?;
            log::debug!(
                "Found record {} at {:#x} (extension '{}')",
                found.len(),
                marker,
                extension
            );
            found.push((marker + MAGIC_LEN, extension));
        }

        let offsets: Vec<u64> = found.iter().map(|(offset, _)| *offset).collect();
        let sizes = derive_sizes(&offsets, self.stream_len);

        Ok(found
            .into_iter()
            .zip(sizes)
            .map(|((offset, extension), size)| Record {
                offset,
                size,
                extension,
            })
            .collect())
    }
}

/// Derives payload sizes from payload offsets.
///
/// For all but the last offset, `size = next - this - MAGIC_LEN`; the last
/// size runs to `stream_len`.
pub(crate) fn derive_sizes(offsets: &[u64], stream_len: u64) -> Vec<u64> {
    offsets
        .iter()
        .enumerate()
        .map(|(i, &offset)| match offsets.get(i + 1) {
            Some(&next) => next - offset - MAGIC_LEN,
            None => stream_len - offset,
        })
        .collect()
}

/// Scans `reader` for records using the given options.
pub fn scan_records<R: Read + Seek>(reader: &mut R, options: ScanOptions) -> Result<Vec<Record>> {
    RecordScanner::new(reader, options)?.scan()
}
