//! Report file output.

use std::fs::{File, OpenOptions};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("Cannot remove previous report {}: {source}", .path.display())]
    Remove { path: PathBuf, source: io::Error },

    #[error("Cannot open report {}: {source}", .path.display())]
    Open { path: PathBuf, source: io::Error },

    #[error("Cannot write report {}: {source}", .path.display())]
    Write { path: PathBuf, source: io::Error },

    #[error("Cannot mirror report: {0}")]
    Mirror(#[source] io::Error),
}

/// The text report for one run.
///
/// Any report left by a previous run is removed when the sink is created.
/// Each series block is appended and flushed as soon as it is written, and
/// copied to the mirror when there is one.
#[derive(Debug)]
pub struct ReportSink<M: Write = io::Stdout> {
    path: PathBuf,
    writer: BufWriter<File>,
    mirror: Option<M>,
}

impl ReportSink {
    /// Open the report, mirroring to stdout when `mirror` is set.
    pub fn create(path: &Path, mirror: bool) -> Result<Self, ReportError> {
        Self::with_mirror(path, mirror.then(io::stdout))
    }
}

impl<M: Write> ReportSink<M> {
    pub fn with_mirror(path: &Path, mirror: Option<M>) -> Result<Self, ReportError> {
        match std::fs::remove_file(path) {
            Ok(()) => log::debug!("Removed previous report {}", path.display()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {}
            Err(source) => {
                return Err(ReportError::Remove {
                    path: path.to_path_buf(),
                    source,
                });
            }
        }

        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .map_err(|source| ReportError::Open {
                path: path.to_path_buf(),
                source,
            })?;

        Ok(Self {
            path: path.to_path_buf(),
            writer: BufWriter::new(file),
            mirror,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn mirror(&self) -> Option<&M> {
        self.mirror.as_ref()
    }

    /// Append a rendered series block.
    pub fn write_series(&mut self, block: &str) -> Result<(), ReportError> {
        self.append(block).map_err(|source| ReportError::Write {
            path: self.path.clone(),
            source,
        })?;

        if let Some(mirror) = self.mirror.as_mut() {
            mirror
                .write_all(block.as_bytes())
                .and_then(|()| mirror.flush())
                .map_err(ReportError::Mirror)?;
        }
        Ok(())
    }

    fn append(&mut self, block: &str) -> io::Result<()> {
        self.writer.write_all(block.as_bytes())?;
        self.writer.flush()
    }
}
