//! Archive entry types.

/// Where an entry's content currently lives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntryState {
    /// The payload still resides in the source stream and is read on demand.
    Archived,
    /// The payload has been replaced in memory and is compressed on save.
    Modified,
}

/// A byte range within the source stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ByteRange {
    /// Absolute offset of the first byte.
    pub offset: u64,
    /// Length in bytes.
    pub len: u64,
}

impl ByteRange {
    /// Creates a new range.
    pub fn new(offset: u64, len: u64) -> Self {
        Self { offset, len }
    }

    /// Returns the offset one past the last byte.
    pub fn end(&self) -> u64 {
        self.offset + self.len
    }

    /// Returns `true` if the range covers no bytes.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}

/// The content backing an entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Payload {
    /// A view into the source stream. Only valid while the archive is open.
    Archived(ByteRange),
    /// Uncompressed content owned by the entry.
    Modified(Vec<u8>),
}

/// An entry in a 3DS-LZ archive.
///
/// Entries are created once when the archive is opened, one per record, in
/// stream order. Their count and source offsets never change afterwards,
/// but name and content may be edited before saving.
#[derive(Debug, Clone)]
#[non_exhaustive]
pub struct Entry {
    /// Synthesized file name (`File_{index:06}.{ext}`), freely renamable.
    pub file_name: String,
    pub(crate) index: usize,
    pub(crate) extension: String,
    pub(crate) payload: Payload,
    /// Pre-compressed bytes written verbatim for archived entries.
    pub(crate) compressed: Option<Vec<u8>>,
}

impl Entry {
    pub(crate) fn archived(index: usize, file_name: String, extension: String, range: ByteRange) -> Self {
        Self {
            file_name,
            index,
            extension,
            payload: Payload::Archived(range),
            compressed: None,
        }
    }

    /// Returns the entry's position in the original stream order.
    pub fn index(&self) -> usize {
        self.index
    }

    /// Returns the extension inferred from the record header.
    pub fn extension(&self) -> &str {
        &self.extension
    }

    /// Returns the payload length in bytes.
    ///
    /// For archived entries this is the scanned record size (marker
    /// excluded, trailing padding included). For modified entries it is the
    /// length of the uncompressed in-memory content.
    pub fn size(&self) -> u64 {
        match &self.payload {
            Payload::Archived(range) => range.len,
            Payload::Modified(data) => data.len() as u64,
        }
    }

    /// Returns the entry state.
    pub fn state(&self) -> EntryState {
        match self.payload {
            Payload::Archived(_) => EntryState::Archived,
            Payload::Modified(_) => EntryState::Modified,
        }
    }

    /// Returns `true` if the payload is still backed by the source stream.
    pub fn is_archived(&self) -> bool {
        self.state() == EntryState::Archived
    }

    /// Returns the backing payload.
    pub fn payload(&self) -> &Payload {
        &self.payload
    }

    /// Returns the source range for archived entries.
    pub fn range(&self) -> Option<ByteRange> {
        match self.payload {
            Payload::Archived(range) => Some(range),
            Payload::Modified(_) => None,
        }
    }

    /// Returns the pre-compressed pass-through bytes, if any were supplied.
    pub fn compressed(&self) -> Option<&[u8]> {
        self.compressed.as_deref()
    }

    /// Replaces the content with uncompressed `data`.
    ///
    /// The entry becomes [`EntryState::Modified`] and is compressed when the
    /// archive is saved. Any pass-through bytes are discarded.
    pub fn set_data(&mut self, data: Vec<u8>) {
        self.payload = Payload::Modified(data);
        self.compressed = None;
    }

    /// Supplies bytes to write verbatim in place of the archived range.
    ///
    /// Only archived entries use pass-through bytes; the caller is
    /// responsible for their format matching what readers of the container
    /// expect.
    pub fn set_compressed(&mut self, data: Vec<u8>) {
        self.compressed = Some(data);
    }

    /// Drops pass-through bytes so the archived range is copied again.
    pub fn clear_compressed(&mut self) {
        self.compressed = None;
    }

    /// Releases owned content. Archived ranges are left untouched.
    pub(crate) fn release(&mut self) {
        if let Payload::Modified(data) = &mut self.payload {
            *data = Vec::new();
        }
        self.compressed = None;
    }
}
