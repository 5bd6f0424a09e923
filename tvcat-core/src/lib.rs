//! Domain model for TV series catalogs.
//!
//! Holds the clean, validated shapes the rest of the workspace works with:
//! [`Series`] → [`Season`] → [`Episode`], the per-episode [`FileRecord`],
//! and the [`ReportStyle`] switch used by the report renderer.

pub mod model;
pub mod record;
pub mod style;

pub use model::{Episode, Season, Series, TitleKind};
pub use record::FileRecord;
pub use style::{ReportStyle, StyleParseError};
