//! Catalog document parser.
//!
//! Reads a `video-data` catalog export into a [`CatalogDocument`]: a raw tree
//! of series groups, nested season groups and their videos, with every
//! `meta-info` block kept as decoded strings. The declared character set
//! (BOM or `<?xml encoding="…"?>`) is honoured, so legacy `windows-1251`
//! exports decode the same as UTF-8 ones.

pub mod document;
pub mod error;
pub mod parser;

pub use document::{
    CatalogDocument, Quote, RawAward, RawCredit, RawSeason, RawSeries, RawVideo, SeasonMeta,
    SeriesMeta, TaggedText, VideoMeta,
};
pub use error::XmlError;
pub use parser::{parse_catalog, parse_catalog_file};
