//! Archive query, editing, and lifecycle methods.

use std::io::{Read, Seek};

use super::{Archive, Entry, EntryReader, Payload};
use crate::codec::Codec;
use crate::{Error, Result};

impl<R> Archive<R> {
    /// Returns all entries in stream order.
    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    /// Returns the number of entries in the archive.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if the archive has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns the entry at `index`.
    pub fn entry(&self, index: usize) -> Option<&Entry> {
        self.entries.get(index)
    }

    /// Returns a mutable reference to the entry at `index`.
    ///
    /// Use it to rename an entry or to replace its content before saving.
    pub fn entry_mut(&mut self, index: usize) -> Result<&mut Entry> {
        self.entries
            .get_mut(index)
            .ok_or(Error::EntryNotFound { index })
    }

    /// Finds an entry by file name.
    pub fn find(&self, file_name: &str) -> Option<&Entry> {
        self.entries.iter().find(|e| e.file_name == file_name)
    }

    /// Returns the payload-start offsets recorded at scan time.
    pub fn offsets(&self) -> &[u64] {
        &self.offsets
    }

    /// Returns the length of the source stream at scan time.
    pub fn stream_len(&self) -> u64 {
        self.stream_len
    }

    /// Returns true once [`close`](Self::close) has been called.
    pub fn is_closed(&self) -> bool {
        self.source.is_none()
    }

    /// Replaces the content of the entry at `index` with uncompressed data.
    ///
    /// See [`Entry::set_data`].
    pub fn replace(&mut self, index: usize, data: Vec<u8>) -> Result<()> {
        self.entry_mut(index)?.set_data(data);
        Ok(())
    }

    /// Supplies pre-compressed bytes written verbatim for an archived entry.
    ///
    /// See [`Entry::set_compressed`].
    pub fn set_compressed(&mut self, index: usize, data: Vec<u8>) -> Result<()> {
        self.entry_mut(index)?.set_compressed(data);
        Ok(())
    }

    /// Renames the entry at `index`.
    ///
    /// Names only affect extraction; they are not stored in the container.
    pub fn rename(&mut self, index: usize, file_name: impl Into<String>) -> Result<()> {
        self.entry_mut(index)?.file_name = file_name.into();
        Ok(())
    }

    /// Releases the source stream and all owned entry buffers.
    ///
    /// After this call every read of an entry fails with
    /// [`Error::StreamClosed`], and so does saving. Calling `close` again is
    /// a no-op.
    pub fn close(&mut self) -> Result<()> {
        if let Some(source) = self.source.take() {
            drop(source);
            for entry in &mut self.entries {
                entry.release();
            }
            log::debug!("Closed archive with {} entries", self.entries.len());
        }
        Ok(())
    }

    /// Consumes the archive and returns the source stream, if still open.
    pub fn into_inner(self) -> Option<R> {
        self.source
    }
}

impl<R: Read + Seek> Archive<R> {
    /// Returns a bounded reader over the payload of the entry at `index`.
    ///
    /// Archived entries are read lazily from the source stream; modified
    /// entries read their in-memory content.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EntryNotFound`] for an invalid index and
    /// [`Error::StreamClosed`] once the archive has been closed.
    pub fn entry_reader(&mut self, index: usize) -> Result<EntryReader<'_, R>> {
        let entry = self
            .entries
            .get(index)
            .ok_or(Error::EntryNotFound { index })?;
        let source = self.source.as_mut().ok_or(Error::StreamClosed)?;

        Ok(match &entry.payload {
            Payload::Archived(range) => EntryReader::from_source(source, *range),
            Payload::Modified(data) => EntryReader::from_memory(data),
        })
    }

    /// Reads the full payload of the entry at `index` into memory.
    ///
    /// For archived entries this is the stored (typically compressed) record
    /// content, padding included.
    pub fn read_entry(&mut self, index: usize) -> Result<Vec<u8>> {
        let mut reader = self.entry_reader(index)?;
        let mut data = Vec::with_capacity(reader.len() as usize);
        reader.read_to_end(&mut data)?;
        if (data.len() as u64) < reader.len() {
            return Err(Error::Io(std::io::Error::new(
                std::io::ErrorKind::UnexpectedEof,
                format!(
                    "entry {} ends after {} of {} bytes",
                    index,
                    data.len(),
                    reader.len()
                ),
            )));
        }
        Ok(data)
    }

    /// Returns the uncompressed content of the entry at `index`.
    ///
    /// Archived payloads are decoded with `codec`; modified entries already
    /// hold uncompressed content and are returned as-is.
    pub fn decompress_entry(&mut self, index: usize, codec: &dyn Codec) -> Result<Vec<u8>> {
        let archived = self
            .entry(index)
            .ok_or(Error::EntryNotFound { index })?
            .is_archived();
        let data = self.read_entry(index)?;
        if archived {
            codec.decompress(&data)
        } else {
            Ok(data)
        }
    }

    /// Loads an archived entry's payload into memory and marks it modified.
    ///
    /// The loaded bytes are treated as uncompressed content, so the entry is
    /// re-encoded on save. Entries that are already modified are left alone.
    pub fn mark_modified(&mut self, index: usize) -> Result<()> {
        if !self.entry_mut(index)?.is_archived() {
            return Ok(());
        }
        let data = self.read_entry(index)?;
        self.entry_mut(index)?.set_data(data);
        Ok(())
    }
}
