//! Ordered diagnostic collection for the import pipeline.
//!
//! Item-level problems never abort the batch; they are appended to a
//! [`DiagnosticSink`] that is threaded through the pipeline and read by the
//! caller once the whole import returns.

use serde::Serialize;

/// Category of an import diagnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DiagnosticKind {
    /// The whole document is malformed; the import produced no questions.
    DocumentParse,
    /// The document parsed but its root element is not the expected export
    /// root; the import produced no questions.
    UnexpectedDocumentRoot,
    /// A required field (e.g. question text) was missing; the item was
    /// imported in a degraded state.
    MissingRequiredField,
    /// The item's archetype is not handled; the item was skipped.
    UnsupportedItemType,
}

/// One diagnostic produced during an import run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    /// Diagnostic category.
    pub kind: DiagnosticKind,

    /// Human-readable description.
    pub message: String,

    /// Identifier of the affected item, when known.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub item: Option<String>,
}

/// Append-only, ordered collector for diagnostics.
#[derive(Debug, Clone, Default)]
pub struct DiagnosticSink {
    entries: Vec<Diagnostic>,
}

impl DiagnosticSink {
    /// Create a new empty sink.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a whole-document parse failure.
    pub fn document_parse(&mut self, message: impl Into<String>) {
        self.entries.push(Diagnostic {
            kind: DiagnosticKind::DocumentParse,
            message: message.into(),
            item: None,
        });
    }

    /// Record a well-formed document with the wrong root element.
    pub fn unexpected_root(&mut self, root: &str) {
        self.entries.push(Diagnostic {
            kind: DiagnosticKind::UnexpectedDocumentRoot,
            message: format!("Unexpected document root: <{root}>"),
            item: None,
        });
    }

    /// Record a missing required field on an item.
    pub fn missing_field(&mut self, message: impl Into<String>, item: impl Into<String>) {
        self.entries.push(Diagnostic {
            kind: DiagnosticKind::MissingRequiredField,
            message: message.into(),
            item: Some(item.into()),
        });
    }

    /// Record an unsupported item archetype.
    pub fn unsupported_item(&mut self, qtype: &str, item: impl Into<String>) {
        self.entries.push(Diagnostic {
            kind: DiagnosticKind::UnsupportedItemType,
            message: format!("Unknown or unhandled question type: {qtype}"),
            item: Some(item.into()),
        });
    }

    /// View the collected diagnostics in emission order.
    #[must_use]
    pub fn entries(&self) -> &[Diagnostic] {
        &self.entries
    }

    /// Take ownership of the collected diagnostics.
    #[must_use]
    pub fn into_entries(self) -> Vec<Diagnostic> {
        self.entries
    }

    /// Number of diagnostics collected so far.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the sink is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
