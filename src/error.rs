//! Error types for the importer.
//!
//! Non-fatal per-item problems are reported through
//! [`crate::diagnostics::DiagnosticSink`]; this module only covers failures
//! that abort an operation outright.

use std::path::PathBuf;

use thiserror::Error;

/// Main error type for the importer library.
#[derive(Debug, Error)]
pub enum ImportError {
    /// The source document is not well-formed XML.
    #[error("XML parsing failed: {0}")]
    DocumentParse(#[from] roxmltree::Error),

    /// The source document could not be imported at all.
    ///
    /// Raised by the CLI when the pipeline reports a whole-document parse
    /// diagnostic instead of questions.
    #[error("Malformed source document: {0}")]
    MalformedDocument(String),

    /// Input file could not be read.
    #[error("Failed to read input file {path}: {source}")]
    InputRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// YAML serialization error.
    #[error("YAML serialization failed: {0}")]
    Yaml(#[from] serde_yaml_ng::Error),
}

/// Result type alias for importer operations.
pub type Result<T> = std::result::Result<T, ImportError>;
