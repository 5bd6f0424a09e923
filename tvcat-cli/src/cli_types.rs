//! CLI type definitions.

use std::path::PathBuf;

use clap::Parser;

use tvcat_lib::{ReportStyle, SettingsOverrides};

#[derive(Parser)]
#[command(name = "tvcat")]
#[command(
    about = "Build a text report and a media file index from a TV series catalog",
    long_about = None
)]
pub(crate) struct Cli {
    /// Settings file (default: ./tvcat.toml, then ~/.config/tvcat/settings.toml)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Catalog XML to read [default: amedia_tv_series.xml]
    #[arg(short, long)]
    pub input: Option<PathBuf>,

    /// Text report to write, replacing any previous one [default: output.txt]
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// IMDb to Kinopoisk id crosswalk (JSON object) [default: imdbToKP.json]
    #[arg(long)]
    pub crosswalk: Option<PathBuf>,

    /// JSON Lines record store to append to [default: files.json]
    #[arg(long)]
    pub records: Option<PathBuf>,

    /// Do not append episode records
    #[arg(long)]
    pub no_records: bool,

    /// Do not consult the crosswalk
    #[arg(long)]
    pub no_crosswalk: bool,

    /// Report layout (detailed, brief)
    #[arg(long)]
    pub style: Option<ReportStyle>,

    /// Shorthand for --style brief
    #[arg(long, conflicts_with = "style")]
    pub brief: bool,

    /// Do not echo the report to stdout
    #[arg(long)]
    pub no_mirror: bool,

    /// Print the effective settings and exit
    #[arg(long)]
    pub show_config: bool,

    /// Only show warnings and errors
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Enable debug logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    pub(crate) fn overrides(&self) -> SettingsOverrides {
        SettingsOverrides {
            input: self.input.clone(),
            output: self.output.clone(),
            crosswalk: self.crosswalk.clone(),
            records: self.records.clone(),
            emit_records: self.no_records.then_some(false),
            resolve_crosswalk: self.no_crosswalk.then_some(false),
            style: if self.brief {
                Some(ReportStyle::Brief)
            } else {
                self.style
            },
            mirror_stdout: self.no_mirror.then_some(false),
        }
    }
}
