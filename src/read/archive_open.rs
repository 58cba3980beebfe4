//! Archive opening methods.

use std::fs::File;
use std::io::{BufReader, Read, Seek, SeekFrom};
use std::path::Path;

use crate::Result;
use crate::format::entry_file_name;

use super::scanner::RecordScanner;
use super::{Archive, ByteRange, Entry, ScanOptions};

impl Archive<BufReader<File>> {
    /// Opens an archive from a file path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be opened or scanning fails.
    pub fn open_path(path: impl AsRef<Path>) -> Result<Self> {
        Self::open_path_with_options(path, ScanOptions::default())
    }

    /// Opens an archive from a file path with custom scan options.
    pub fn open_path_with_options(path: impl AsRef<Path>, options: ScanOptions) -> Result<Self> {
        let file = File::open(path.as_ref())?;
        Self::open_with_options(BufReader::new(file), options)
    }
}

impl<R: Read + Seek> Archive<R> {
    /// Opens an archive from a reader.
    ///
    /// The whole stream is indexed immediately; a stream without any
    /// stride-aligned marker yields an empty archive rather than an error.
    ///
    /// # Errors
    ///
    /// Returns an error if the stream cannot be read. Truncated record
    /// headers are accepted unless [`ScanOptions::strict_probe`] is set.
    pub fn open(reader: R) -> Result<Self> {
        Self::open_with_options(reader, ScanOptions::default())
    }

    /// Opens an archive from a reader with custom scan options.
    pub fn open_with_options(mut reader: R, options: ScanOptions) -> Result<Self> {
        let mut scanner = RecordScanner::new(&mut reader, options)?;
        let records = scanner.scan()?;
        let stream_len = scanner.stream_len();

        let mut entries = Vec::with_capacity(records.len());
        let mut offsets = Vec::with_capacity(records.len());
        for (index, record) in records.into_iter().enumerate() {
            let file_name = entry_file_name(index, &record.extension);
            offsets.push(record.offset);
            entries.push(Entry::archived(
                index,
                file_name,
                record.extension,
                ByteRange::new(record.offset, record.size),
            ));
        }

        reader.seek(SeekFrom::Start(0))?;
        log::debug!(
            "Indexed {} records in {} bytes",
            entries.len(),
            stream_len
        );

        Ok(Self {
            source: Some(reader),
            entries,
            offsets,
            stream_len,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::format::{ALIGNMENT, MAGIC, MAGIC_LEN};
    use crate::read::EntryState;
    use std::io::Cursor;

    #[test]
    fn test_open_sets_invariants() {
        let mut data = Vec::new();
        for hint in [b"AAAA", b"BB12", b"\0\0\0\0"] {
            data.extend_from_slice(MAGIC);
            data.extend_from_slice(&[0u8; 5]);
            data.extend_from_slice(hint);
            data.resize(data.len().div_ceil(64) * 64, 0xCC);
        }
        data.extend_from_slice(b"tail");

        let archive = Archive::open(Cursor::new(data.clone())).unwrap();
        assert_eq!(archive.len(), archive.offsets().len());
        for (i, entry) in archive.entries().iter().enumerate() {
            assert_eq!(entry.index(), i);
            assert_eq!(entry.state(), EntryState::Archived);
            assert_eq!((archive.offsets()[i] - MAGIC_LEN) % ALIGNMENT, 0);
        }
        assert_eq!(archive.entries()[0].extension(), "AAAA");
        assert_eq!(archive.entries()[1].extension(), "BB");
        assert_eq!(archive.entries()[2].extension(), "BIN");
        let last = archive.entries().last().unwrap();
        assert_eq!(last.size(), data.len() as u64 - archive.offsets()[2]);
    }

    #[test]
    fn test_open_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("archive.bin");
        let mut data = MAGIC.to_vec();
        data.extend_from_slice(&[0, 0, 0, 0, 0]);
        data.extend_from_slice(b"SARC");
        std::fs::write(&path, &data).unwrap();

        let archive = Archive::open_path(&path).unwrap();
        assert_eq!(archive.len(), 1);
        assert_eq!(archive.entries()[0].file_name, "File_000000.SARC");
    }

    #[test]
    fn test_open_path_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = Archive::open_path(dir.path().join("missing")).unwrap_err();
        assert!(matches!(err, crate::Error::Io(_)));
    }
}
