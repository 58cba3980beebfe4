//! # dslz
//!
//! A pure-Rust library for reading and writing 3DS-LZ asset archives.
//!
//! A 3DS-LZ container is a concatenation of records, each introduced by the
//! 8-byte marker `3DS-LZ\r\n` on a 64-byte boundary and followed by an
//! LZ11-compressed payload. There is no central directory: the record list
//! is recovered by scanning, and every record is exposed as an [`Entry`]
//! that can be read lazily, replaced, and written back out.
//!
//! ## Quick Start
//!
//! ### Extracting an Archive
//!
//! ```rust,no_run
//! use dslz::{Archive, CodecMethod, ExtractOptions, Result};
//!
//! fn main() -> Result<()> {
//!     let mut archive = Archive::open_path("sound.3dslz")?;
//!
//!     for entry in archive.entries() {
//!         println!("{}: {} bytes", entry.file_name, entry.size());
//!     }
//!
//!     let options = ExtractOptions::new().decompress(Some(CodecMethod::Lz11));
//!     archive.extract("./output", &options)?;
//!     Ok(())
//! }
//! ```
//!
//! ### Replacing an Entry
//!
//! ```rust,no_run
//! use dslz::{Archive, Result, WriteOptions};
//!
//! fn main() -> Result<()> {
//!     let mut archive = Archive::open_path("sound.3dslz")?;
//!     archive.replace(3, std::fs::read("voice.bcwav")?)?;
//!
//!     let result = archive.save_path_with_options("patched.3dslz", &WriteOptions::new())?;
//!     println!(
//!         "Wrote {} records, {} recompressed",
//!         result.entries_written, result.entries_compressed
//!     );
//!     archive.close()?;
//!     Ok(())
//! }
//! ```
//!
//! ## Container Layout
//!
//! | Offset (relative to marker) | Size | Content |
//! |-----------------------------|------|---------|
//! | 0 | 8 | Marker `3DS-LZ\r\n` |
//! | 8 | 5 | Reserved bytes (part of the payload) |
//! | 13 | 4 | Extension hint (part of the payload) |
//! | 17 | ... | Remaining payload, then fill up to the next record |
//!
//! Entry sizes are derived from the distance between consecutive markers,
//! so they include any alignment fill. The last entry extends to the end of
//! the stream.
//!
//! ## Lifecycle
//!
//! An [`Archive`] owns its source stream. Archived entries are views into
//! that stream; after [`Archive::close`] every read and every save fails
//! with [`Error::StreamClosed`].

#![cfg_attr(docsrs, feature(doc_cfg))]
#![warn(missing_docs)]
#![warn(rust_2018_idioms)]
#![deny(unsafe_op_in_unsafe_fn)]

pub mod codec;
pub mod error;
pub mod format;
pub mod read;
pub mod write;

pub use error::{Error, Result};

// Re-export reading API at crate root for convenience
pub use read::{
    Archive, ByteRange, Entry, EntryReader, EntryState, ExtractOptions, ExtractResult,
    OverwritePolicy, Payload, ScanOptions,
};

// Re-export writing API at crate root for convenience
pub use write::{WriteOptions, WriteResult};

// Re-export codec API
pub use codec::{Codec, CodecMethod, CopyCodec, Lz11Codec};
