//! Zip serialization of materialized entries.

use std::io::{Cursor, Write};

use tracing::debug;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

use super::materialize::Entry;
use crate::error::Result;

/// Highest deflate level.
pub const MAX_COMPRESSION_LEVEL: u8 = 9;

/// Writes entries into an in-memory zip archive.
///
/// Entry names are project-relative with no leading `/`. The root directory
/// is the archive's top level and gets no record of its own. Level 0 stores
/// files uncompressed; any other level deflates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ArchiveWriter {
    level: u8,
}

impl Default for ArchiveWriter {
    fn default() -> Self {
        Self::new()
    }
}

impl ArchiveWriter {
    /// Create a writer at maximum compression.
    pub fn new() -> Self {
        Self {
            level: MAX_COMPRESSION_LEVEL,
        }
    }

    /// Create a writer at `level`, clamped to [`MAX_COMPRESSION_LEVEL`].
    pub fn with_compression_level(level: u8) -> Self {
        Self {
            level: level.min(MAX_COMPRESSION_LEVEL),
        }
    }

    pub fn compression_level(&self) -> u8 {
        self.level
    }

    /// Serialize `entries` and return the complete archive.
    pub fn write(&self, entries: &[Entry]) -> Result<Vec<u8>> {
        let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
        let file_options = self.file_options();
        let dir_options = SimpleFileOptions::default()
            .compression_method(CompressionMethod::Stored)
            .unix_permissions(0o755);

        let mut records = 0usize;
        for entry in entries {
            let Some(name) = entry.archive_path() else {
                continue;
            };
            match entry {
                Entry::Directory { .. } => zip.add_directory(name, dir_options)?,
                Entry::File { content, .. } => {
                    zip.start_file(name, file_options)?;
                    zip.write_all(content.as_bytes())?;
                }
            }
            records += 1;
        }

        let bytes = zip.finish()?.into_inner();
        debug!(
            records,
            bytes = bytes.len(),
            level = self.level,
            "wrote snapshot archive"
        );
        Ok(bytes)
    }

    fn file_options(&self) -> SimpleFileOptions {
        let options = SimpleFileOptions::default().unix_permissions(0o644);
        if self.level == 0 {
            options.compression_method(CompressionMethod::Stored)
        } else {
            options
                .compression_method(CompressionMethod::Deflated)
                .compression_level(Some(i64::from(self.level)))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Read;
    use zip::ZipArchive;

    fn open(bytes: Vec<u8>) -> ZipArchive<Cursor<Vec<u8>>> {
        ZipArchive::new(Cursor::new(bytes)).unwrap()
    }

    fn dir(path: &str) -> Entry {
        Entry::Directory { path: path.into() }
    }

    fn file(path: &str, content: &str) -> Entry {
        Entry::File {
            path: path.into(),
            content: content.into(),
        }
    }

    #[test]
    fn defaults_to_maximum_compression() {
        assert_eq!(ArchiveWriter::new().compression_level(), 9);
        assert_eq!(ArchiveWriter::with_compression_level(42).compression_level(), 9);
    }

    #[test]
    fn root_contributes_no_record() {
        let bytes = ArchiveWriter::new().write(&[dir("/")]).unwrap();
        assert_eq!(open(bytes).len(), 0);
    }

    #[test]
    fn writes_directories_and_files_without_leading_slash() {
        let entries = vec![dir("/"), dir("/dirB"), file("/dirB/file2", "hello")];
        let mut archive = open(ArchiveWriter::new().write(&entries).unwrap());

        assert_eq!(archive.len(), 2);

        let mut names: Vec<String> = archive.file_names().map(String::from).collect();
        names.sort();
        assert_eq!(names, vec!["dirB/", "dirB/file2"]);

        assert!(archive.by_name("dirB/").unwrap().is_dir());

        let mut content = String::new();
        archive
            .by_name("dirB/file2")
            .unwrap()
            .read_to_string(&mut content)
            .unwrap();
        assert_eq!(content, "hello");
    }

    #[test]
    fn empty_directory_survives() {
        let entries = vec![dir("/"), dir("/assets/empty")];
        let mut archive = open(ArchiveWriter::new().write(&entries).unwrap());

        assert_eq!(archive.len(), 1);
        let record = archive.by_index(0).unwrap();
        assert!(record.is_dir());
        assert_eq!(record.name(), "assets/empty/");
    }

    #[test]
    fn deflates_at_requested_level() {
        let body = "fn main() {}\n".repeat(200);
        let entries = vec![file("/main.rs", &body)];
        let mut archive = open(ArchiveWriter::new().write(&entries).unwrap());

        let record = archive.by_name("main.rs").unwrap();
        assert_eq!(record.compression(), CompressionMethod::Deflated);
        assert!(record.compressed_size() < record.size());
    }

    #[test]
    fn level_zero_stores() {
        let entries = vec![file("/a.txt", "abc")];
        let mut archive =
            open(ArchiveWriter::with_compression_level(0).write(&entries).unwrap());

        assert_eq!(
            archive.by_name("a.txt").unwrap().compression(),
            CompressionMethod::Stored
        );
    }

    #[test]
    fn identical_entries_produce_identical_bytes() {
        let entries = vec![dir("/"), dir("/src"), file("/src/lib.rs", "pub fn f() {}")];
        let writer = ArchiveWriter::new();
        assert_eq!(writer.write(&entries).unwrap(), writer.write(&entries).unwrap());
    }
}
