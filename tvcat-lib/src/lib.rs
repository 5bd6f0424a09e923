//! Catalog-to-report pipeline.
//!
//! Turns a parsed catalog document into domain [`Series`](tvcat_core::Series),
//! writes the text report series by series and appends one
//! [`FileRecord`](tvcat_core::FileRecord) per episode to the record store.

pub mod crosswalk;
pub mod error;
pub mod pipeline;
pub mod projector;
pub mod records;
pub mod report;
pub mod settings;
pub mod sink;

pub use crosswalk::{Crosswalk, CrosswalkError};
pub use error::RunError;
pub use pipeline::{RunSummary, project_document, run};
pub use projector::{FieldError, Location, ProjectError, Projector, TitleSet};
pub use records::{JsonLinesStore, NullRecordSink, RecordError, RecordSink, read_records};
pub use report::render_series;
pub use settings::{Settings, SettingsError, SettingsOverrides};
pub use sink::{ReportError, ReportSink};

pub use tvcat_core::{Episode, FileRecord, ReportStyle, Season, Series, TitleKind};
pub use tvcat_xml::{CatalogDocument, XmlError};
