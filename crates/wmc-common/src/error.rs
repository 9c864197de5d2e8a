//! Error types for the WMC codec and tools.

use thiserror::Error;

/// Result type alias using WmcError.
pub type WmcResult<T> = Result<T, WmcError>;

/// Primary error type for WMC operations.
///
/// Only the document-level failures are fatal for a parse. Everything
/// below the `ViewContext` degrades to defaults instead of producing one
/// of these.
#[derive(Debug, Error)]
pub enum WmcError {
    // === Document Errors ===
    #[error("General XML parsing error: {0}")]
    XmlParse(String),

    #[error("Not a WMC file: {0}")]
    NotAWmcDocument(String),

    // === Geometry Errors ===
    #[error("Cannot reproject from {from} to {to}")]
    Reprojection { from: String, to: String },

    // === Infrastructure Errors ===
    #[error("JSON error: {0}")]
    Json(String),

    #[error("I/O error: {0}")]
    Io(String),
}

impl WmcError {
    /// Stable machine-readable code for this error.
    pub fn code(&self) -> &'static str {
        match self {
            WmcError::XmlParse(_) => "XmlParseError",
            WmcError::NotAWmcDocument(_) => "NotAWmcDocument",
            WmcError::Reprojection { .. } => "ReprojectionError",
            WmcError::Json(_) => "JsonError",
            WmcError::Io(_) => "IoError",
        }
    }

    /// Whether the error comes from the input document rather than the environment.
    pub fn is_document_error(&self) -> bool {
        matches!(self, WmcError::XmlParse(_) | WmcError::NotAWmcDocument(_))
    }
}

// Conversion from common error types
impl From<quick_xml::Error> for WmcError {
    fn from(err: quick_xml::Error) -> Self {
        WmcError::XmlParse(err.to_string())
    }
}

impl From<quick_xml::events::attributes::AttrError> for WmcError {
    fn from(err: quick_xml::events::attributes::AttrError) -> Self {
        WmcError::XmlParse(err.to_string())
    }
}

impl From<std::io::Error> for WmcError {
    fn from(err: std::io::Error) -> Self {
        WmcError::Io(err.to_string())
    }
}

impl From<serde_json::Error> for WmcError {
    fn from(err: serde_json::Error) -> Self {
        WmcError::Json(err.to_string())
    }
}
