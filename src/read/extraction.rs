//! Extraction of entries to the filesystem.

use std::fs::{self, File};
use std::io::{self, BufWriter, Read, Seek, Write};
use std::path::Path;

use super::{Archive, ExtractOptions, OverwritePolicy};
use crate::{Error, Result};

/// Result of an extraction operation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtractResult {
    /// Number of entries written to disk.
    pub entries_extracted: usize,
    /// Number of entries skipped because the target already existed.
    pub entries_skipped: usize,
    /// Total bytes written.
    pub bytes_written: u64,
}

/// Checks that an entry name is a plain file name.
///
/// Entry names are caller-editable, so they are validated before being
/// joined onto the destination directory.
pub(crate) fn validate_entry_name(name: &str) -> Result<()> {
    let reason = if name.is_empty() {
        Some("name is empty")
    } else if name == "." || name == ".." {
        Some("name refers to a directory")
    } else if name.contains(['/', '\\']) {
        Some("name contains a path separator")
    } else if name.contains('\0') {
        Some("name contains a NUL byte")
    } else {
        None
    };

    match reason {
        Some(reason) => Err(Error::InvalidEntryName {
            name: name.to_string(),
            reason,
        }),
        None => Ok(()),
    }
}

impl<R: Read + Seek> Archive<R> {
    /// Extracts every entry into `dest`, one file per entry named after
    /// [`Entry::file_name`](super::Entry::file_name).
    ///
    /// The destination directory is created if needed.
    ///
    /// # Errors
    ///
    /// Returns an error if an entry name is not a plain file name, if a
    /// target exists under [`OverwritePolicy::Error`], if the archive is
    /// closed, or on any I/O or decompression failure.
    pub fn extract(&mut self, dest: impl AsRef<Path>, options: &ExtractOptions) -> Result<ExtractResult> {
        if self.is_closed() {
            return Err(Error::StreamClosed);
        }
        let dest = dest.as_ref();
        fs::create_dir_all(dest)?;

        let codec = options.decompress.map(|method| method.codec());
        let mut result = ExtractResult::default();

        for index in 0..self.entries.len() {
            let name = self.entries[index].file_name.clone();
            validate_entry_name(&name)?;
            let target = dest.join(&name);

            if target.exists() {
                match options.overwrite {
                    OverwritePolicy::Error => {
                        return Err(Error::EntryExists {
                            path: target.display().to_string(),
                        });
                    }
                    OverwritePolicy::Skip => {
                        log::warn!("Skipping existing file '{}'", target.display());
                        result.entries_skipped += 1;
                        continue;
                    }
                    OverwritePolicy::Overwrite => {}
                }
            }

            let mut writer = BufWriter::new(File::create(&target)?);
            let written = match &codec {
                Some(codec) => {
                    let data = self.decompress_entry(index, &**codec)?;
                    writer.write_all(&data)?;
                    data.len() as u64
                }
                None => {
                    let mut reader = self.entry_reader(index)?;
                    io::copy(&mut reader, &mut writer)?
                }
            };
            writer.flush()?;

            log::debug!("Extracted '{}' ({} bytes)", name, written);
            result.entries_extracted += 1;
            result.bytes_written += written;
        }

        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_entry_name() {
        assert!(validate_entry_name("File_000000.BIN").is_ok());
        assert!(validate_entry_name("").is_err());
        assert!(validate_entry_name("..").is_err());
        assert!(validate_entry_name("../escape").is_err());
        assert!(validate_entry_name("dir\\file").is_err());
        assert!(validate_entry_name("nul\0byte").is_err());
    }

    #[test]
    fn test_invalid_name_reason() {
        match validate_entry_name("a/b") {
            Err(Error::InvalidEntryName { name, reason }) => {
                assert_eq!(name, "a/b");
                assert_eq!(reason, "name contains a path separator");
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }
}
