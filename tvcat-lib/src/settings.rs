//! Run settings: file locations and optional pipeline stages.
//!
//! Values come from built-in defaults, then a TOML settings file, then
//! command-line overrides. The settings file is looked up as `./tvcat.toml`
//! first and `~/.config/tvcat/settings.toml` second, unless a path is given
//! explicitly.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tvcat_core::ReportStyle;

/// Settings file looked up in the working directory.
pub const LOCAL_SETTINGS_FILE: &str = "tvcat.toml";

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("I/O error reading {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("TOML parse error in {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
    #[error("Settings file not found: {}", .0.display())]
    NotFound(PathBuf),
}

/// Per-user settings file: `~/.config/tvcat/settings.toml`.
pub fn settings_path() -> PathBuf {
    let config = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
    config.join("tvcat").join("settings.toml")
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    /// Catalog XML to read.
    pub input: PathBuf,
    /// Text report, replaced on every run.
    pub output: PathBuf,
    /// IMDb → Kinopoisk crosswalk (JSON object). Optional on disk.
    pub crosswalk: PathBuf,
    /// JSON Lines record store, appended to on every run.
    pub records: PathBuf,
    pub emit_records: bool,
    pub resolve_crosswalk: bool,
    pub style: ReportStyle,
    /// Echo the report to stdout while writing it.
    pub mirror_stdout: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            input: PathBuf::from("amedia_tv_series.xml"),
            output: PathBuf::from("output.txt"),
            crosswalk: PathBuf::from("imdbToKP.json"),
            records: PathBuf::from("files.json"),
            emit_records: true,
            resolve_crosswalk: true,
            style: ReportStyle::Detailed,
            mirror_stdout: true,
        }
    }
}

/// Values that replace whatever the defaults and settings file say.
#[derive(Debug, Clone, Default)]
pub struct SettingsOverrides {
    pub input: Option<PathBuf>,
    pub output: Option<PathBuf>,
    pub crosswalk: Option<PathBuf>,
    pub records: Option<PathBuf>,
    pub emit_records: Option<bool>,
    pub resolve_crosswalk: Option<bool>,
    pub style: Option<ReportStyle>,
    pub mirror_stdout: Option<bool>,
}

impl Settings {
    pub fn load_file(path: &Path) -> Result<Self, SettingsError> {
        let contents = std::fs::read_to_string(path).map_err(|source| SettingsError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&contents).map_err(|source| SettingsError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Load settings from `explicit`, or from the first default location
    /// that exists. Returns the file used, if any.
    ///
    /// An explicit path must exist; default locations are optional.
    pub fn discover(explicit: Option<&Path>) -> Result<(Self, Option<PathBuf>), SettingsError> {
        Self::discover_from(
            explicit,
            &[PathBuf::from(LOCAL_SETTINGS_FILE), settings_path()],
        )
    }

    fn discover_from(
        explicit: Option<&Path>,
        candidates: &[PathBuf],
    ) -> Result<(Self, Option<PathBuf>), SettingsError> {
        if let Some(path) = explicit {
            if !path.is_file() {
                return Err(SettingsError::NotFound(path.to_path_buf()));
            }
            return Ok((Self::load_file(path)?, Some(path.to_path_buf())));
        }

        for candidate in candidates {
            if candidate.is_file() {
                return Ok((Self::load_file(candidate)?, Some(candidate.clone())));
            }
        }
        Ok((Self::default(), None))
    }

    pub fn apply(&mut self, overrides: SettingsOverrides) {
        if let Some(input) = overrides.input {
            self.input = input;
        }
        if let Some(output) = overrides.output {
            self.output = output;
        }
        if let Some(crosswalk) = overrides.crosswalk {
            self.crosswalk = crosswalk;
        }
        if let Some(records) = overrides.records {
            self.records = records;
        }
        if let Some(emit) = overrides.emit_records {
            self.emit_records = emit;
        }
        if let Some(resolve) = overrides.resolve_crosswalk {
            self.resolve_crosswalk = resolve;
        }
        if let Some(style) = overrides.style {
            self.style = style;
        }
        if let Some(mirror) = overrides.mirror_stdout {
            self.mirror_stdout = mirror;
        }
    }

    /// Effective settings as TOML, for display.
    pub fn to_toml_string(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }
}
