//! Top-level import pipeline.
//!
//! Turns one export document into a batch of normalized questions plus the
//! diagnostics gathered along the way. The pipeline never fails per item:
//! a malformed document yields an empty batch with a parse diagnostic, and
//! individual unsupported or degraded items are reported and skipped or
//! imported as-is.

use tracing::debug;

use crate::assemble::{assemble_description, assemble_essay, assemble_mc, assemble_select};
use crate::classify::ItemType;
use crate::config::DOCUMENT_ROOT;
use crate::diagnostics::{Diagnostic, DiagnosticSink};
use crate::path::{nodes_at, Seg::Child, Seg::Nth};
use crate::question::Question;
use crate::raw::build_raw_question;
use crate::tree::TreeNode;

/// Outcome of one import run.
#[derive(Debug, Clone, Default)]
pub struct ImportReport {
    /// Imported questions in document order.
    pub questions: Vec<Question>,

    /// Diagnostics in emission order.
    pub diagnostics: Vec<Diagnostic>,
}

/// Import every item of one export document.
///
/// # Arguments
///
/// * `content` - The full document text.
///
/// # Returns
///
/// An [`ImportReport`] with the questions that could be imported and the
/// diagnostics for everything that could not.
#[must_use]
pub fn import_questions(content: &str) -> ImportReport {
    let mut sink = DiagnosticSink::new();

    let tree = match TreeNode::parse(content) {
        Ok(tree) => tree,
        Err(err) => {
            sink.document_parse(err.to_string());
            return ImportReport {
                questions: Vec::new(),
                diagnostics: sink.into_entries(),
            };
        }
    };

    if !tree.children.contains_key(DOCUMENT_ROOT) {
        let root = tree.children.keys().next().map(String::as_str).unwrap_or("");
        sink.unexpected_root(root);
        return ImportReport {
            questions: Vec::new(),
            diagnostics: sink.into_entries(),
        };
    }
    let items = nodes_at(&tree, &[Child(DOCUMENT_ROOT), Nth(0), Child("item")]);
    debug!(items = items.len(), "parsed export document");

    let mut questions = Vec::new();
    for item in items {
        let raw = build_raw_question(item, &mut sink);
        debug!(id = %raw.id, qtype = raw.qtype.as_str(), "classified item");

        match raw.qtype {
            ItemType::MultipleChoice => questions.push(assemble_mc(&raw)),
            ItemType::DropdownSelect => questions.push(assemble_select(&raw)),
            ItemType::Essay => questions.push(assemble_essay(&raw)),
            ItemType::Description => questions.push(assemble_description(&raw)),
            ItemType::ShortAnswer | ItemType::Matching | ItemType::Unknown => {
                sink.unsupported_item(raw.qtype.as_str(), &raw.id);
            }
        }
    }

    ImportReport {
        questions,
        diagnostics: sink.into_entries(),
    }
}
