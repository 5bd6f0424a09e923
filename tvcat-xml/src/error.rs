use std::path::PathBuf;

/// Errors that can occur while reading a catalog document.
#[derive(Debug, thiserror::Error)]
pub enum XmlError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Cannot open catalog {}: {source}", .path.display())]
    Open {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("XML parse error: {0}")]
    XmlParse(#[from] quick_xml::Error),

    #[error("XML attribute error: {0}")]
    XmlAttribute(#[from] quick_xml::events::attributes::AttrError),

    #[error("Unexpected root element <{0}>, expected <video-data>")]
    UnexpectedRoot(String),

    #[error("Invalid catalog document: {0}")]
    InvalidDocument(String),
}

impl XmlError {
    pub fn invalid(msg: impl Into<String>) -> Self {
        Self::InvalidDocument(msg.into())
    }
}
