//! JSON export writer

use crate::entry::{Books, Entry};
use crate::output::error::{OutputError, OutputResult};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

/// Writer for the JSON export file
///
/// The file is created up front so that an unwritable target fails the run
/// before any page is fetched.
#[derive(Debug)]
pub struct ExportWriter {
    path: PathBuf,
    file: File,
}

impl ExportWriter {
    /// Creates (or truncates) the export file at `path`
    pub fn create(path: &Path) -> OutputResult<Self> {
        let file = File::create(path).map_err(|source| OutputError::Create {
            path: path.display().to_string(),
            source,
        })?;

        Ok(Self {
            path: path.to_path_buf(),
            file,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Serializes `books` into the file and flushes it
    pub fn write(self, books: Vec<Entry>) -> OutputResult<usize> {
        let export = Books::new(books);
        let mut writer = BufWriter::new(self.file);

        serde_json::to_writer_pretty(&mut writer, &export)?;
        writer.write_all(b"\n")?;
        writer.flush()?;

        tracing::info!(
            "Wrote {} entries to {}",
            export.len(),
            self.path.display()
        );
        Ok(export.len())
    }
}
