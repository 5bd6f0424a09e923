use thiserror::Error;

use crate::crosswalk::CrosswalkError;
use crate::projector::ProjectError;
use crate::records::RecordError;
use crate::settings::SettingsError;
use crate::sink::ReportError;

/// Any failure that aborts a run.
#[derive(Debug, Error)]
pub enum RunError {
    #[error("Settings error: {0}")]
    Settings(#[from] SettingsError),

    #[error("Crosswalk error: {0}")]
    Crosswalk(#[from] CrosswalkError),

    #[error("Catalog error: {0}")]
    Catalog(#[from] tvcat_xml::XmlError),

    #[error("Projection error: {0}")]
    Project(#[from] ProjectError),

    #[error("Report error: {0}")]
    Report(#[from] ReportError),

    #[error("Record store error: {0}")]
    Records(#[from] RecordError),
}
