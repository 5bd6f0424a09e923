//! Append-only JSON Lines record store.

use std::fs::{File, OpenOptions};
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use thiserror::Error;
use tvcat_core::FileRecord;

#[derive(Debug, Error)]
pub enum RecordError {
    #[error("Cannot open record store {}: {source}", .path.display())]
    Open {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid record on line {line}: {source}")]
    InvalidLine {
        line: usize,
        source: serde_json::Error,
    },
}

/// Destination for per-episode records.
pub trait RecordSink {
    fn emit(&mut self, record: &FileRecord) -> Result<(), RecordError>;

    /// Make everything emitted so far durable.
    fn flush(&mut self) -> Result<(), RecordError> {
        Ok(())
    }
}

/// Collects records in memory.
impl RecordSink for Vec<FileRecord> {
    fn emit(&mut self, record: &FileRecord) -> Result<(), RecordError> {
        self.push(record.clone());
        Ok(())
    }
}

/// Discards every record. Used when record emission is switched off.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullRecordSink;

impl RecordSink for NullRecordSink {
    fn emit(&mut self, _record: &FileRecord) -> Result<(), RecordError> {
        Ok(())
    }
}

/// A JSON Lines file opened once in append mode for the whole run.
///
/// Existing lines are never touched. Buffered lines are flushed on
/// [`RecordSink::flush`] and when the store is dropped.
#[derive(Debug)]
pub struct JsonLinesStore {
    path: PathBuf,
    writer: BufWriter<File>,
    written: usize,
}

impl JsonLinesStore {
    pub fn open(path: &Path) -> Result<Self, RecordError> {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .map_err(|source| RecordError::Open {
                path: path.to_path_buf(),
                source,
            })?;
        log::debug!("Appending records to {}", path.display());
        Ok(Self {
            path: path.to_path_buf(),
            writer: BufWriter::new(file),
            written: 0,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Records appended through this handle.
    pub fn written(&self) -> usize {
        self.written
    }
}

impl RecordSink for JsonLinesStore {
    fn emit(&mut self, record: &FileRecord) -> Result<(), RecordError> {
        serde_json::to_writer(&mut self.writer, record)?;
        self.writer.write_all(b"\n")?;
        self.written += 1;
        Ok(())
    }

    fn flush(&mut self) -> Result<(), RecordError> {
        self.writer.flush()?;
        Ok(())
    }
}

impl Drop for JsonLinesStore {
    fn drop(&mut self) {
        if let Err(e) = self.writer.flush() {
            log::warn!("Failed to flush {}: {e}", self.path.display());
        }
    }
}

/// Read every record from a store. Blank lines are ignored.
pub fn read_records(path: &Path) -> Result<Vec<FileRecord>, RecordError> {
    let file = File::open(path).map_err(|source| RecordError::Open {
        path: path.to_path_buf(),
        source,
    })?;

    let mut records = Vec::new();
    for (index, line) in BufReader::new(file).lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let record = serde_json::from_str(&line).map_err(|source| RecordError::InvalidLine {
            line: index + 1,
            source,
        })?;
        records.push(record);
    }
    Ok(records)
}
