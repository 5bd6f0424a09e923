//! IMDb → Kinopoisk identifier crosswalk.
//!
//! A flat JSON object loaded from a side file. A missing file is an empty
//! table, not an error.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CrosswalkError {
    #[error("I/O error reading {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("JSON parse error in {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
}

/// Read-only lookup from an external (IMDb) id to the internal catalog id.
#[derive(Debug, Clone, Default)]
pub struct Crosswalk {
    ids: HashMap<String, String>,
}

impl Crosswalk {
    /// Load the crosswalk from `path`. Returns an empty table when the file
    /// does not exist.
    pub fn load(path: &Path) -> Result<Self, CrosswalkError> {
        let contents = match std::fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                log::debug!("No crosswalk at {}, continuing without one", path.display());
                return Ok(Self::default());
            }
            Err(source) => {
                return Err(CrosswalkError::Io {
                    path: path.to_path_buf(),
                    source,
                });
            }
        };

        let ids: HashMap<String, String> =
            serde_json::from_str(&contents).map_err(|source| CrosswalkError::Parse {
                path: path.to_path_buf(),
                source,
            })?;
        log::info!("Loaded {} crosswalk entries from {}", ids.len(), path.display());
        Ok(Self { ids })
    }

    pub fn lookup(&self, external_id: &str) -> Option<&str> {
        self.ids.get(external_id).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Crosswalk {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            ids: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}
