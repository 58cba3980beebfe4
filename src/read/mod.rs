//! Archive reading API for 3DS-LZ containers.
//!
//! This module provides the [`Archive`] type, which indexes a container on
//! open and exposes every record as an individually readable and replaceable
//! [`Entry`].
//!
//! # Example
//!
//! ```rust,no_run
//! use dslz::read::Archive;
//!
//! let mut archive = Archive::open_path("sound.3dslz")?;
//!
//! for entry in archive.entries() {
//!     println!("{}: {} bytes", entry.file_name, entry.size());
//! }
//!
//! let first = archive.read_entry(0)?;
//! # Ok::<(), dslz::Error>(())
//! ```

mod archive_open;
mod archive_query;
mod entry;
mod entry_reader;
mod extraction;
mod options;
pub mod scanner;

pub use entry::{ByteRange, Entry, EntryState, Payload};
pub use entry_reader::EntryReader;
pub use extraction::ExtractResult;
pub use options::{ExtractOptions, OverwritePolicy, ScanOptions};
pub use scanner::{Record, RecordScanner, scan_records};

/// A 3DS-LZ archive.
///
/// The archive owns its source stream from [`open`](Archive::open) until
/// [`close`](Archive::close). Archived entries are views into that stream,
/// so reading them, and saving them by pass-through, requires the archive
/// to still be open.
pub struct Archive<R> {
    /// Source stream; `None` once closed.
    pub(crate) source: Option<R>,
    pub(crate) entries: Vec<Entry>,
    /// Payload-start offsets captured at scan time, one per entry.
    pub(crate) offsets: Vec<u64>,
    pub(crate) stream_len: u64,
}

impl<R> std::fmt::Debug for Archive<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Archive")
            .field("entries", &self.entries.len())
            .field("stream_len", &self.stream_len)
            .field("closed", &self.source.is_none())
            .finish()
    }
}
