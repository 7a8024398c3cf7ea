//! Heuristic question-type classification.
//!
//! The export dialect has no explicit type marker; the archetype of an item
//! is inferred from which optional sub-elements are present in its subtree.

use crate::path::{has, int_at, node_at, Seg};
use crate::tree::TreeNode;

/// Archetype of one item.
///
/// `Matching` is never produced by [`classify_item`]: a matching extraction
/// path exists downstream but no classification rule feeds it. Yes/no items
/// are likewise never told apart from plain multiple choice. Both are known
/// limitations of the source heuristic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemType {
    MultipleChoice,
    DropdownSelect,
    ShortAnswer,
    Essay,
    Description,
    Matching,
    Unknown,
}

impl ItemType {
    /// Legacy lowercase type label, used in diagnostics.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::MultipleChoice => "multiplechoice",
            Self::DropdownSelect => "dropdownselect",
            Self::ShortAnswer => "shortanswer",
            Self::Essay => "essay",
            Self::Description => "description",
            Self::Matching => "matching",
            Self::Unknown => "unknown",
        }
    }
}

/// Classify one item from its subtree shape alone.
#[must_use]
pub fn classify_item(item: &TreeNode) -> ItemType {
    use Seg::{Child, Nth, Text};

    // Only descriptions have no response processing.
    if !has(item, &[Child("resprocessing")]) {
        return ItemType::Description;
    }

    let render = |name: &'static str| {
        [
            Child("presentation"),
            Nth(0),
            Child("flow"),
            Nth(0),
            Child("response_lid"),
            Nth(0),
            Child(name),
        ]
    };

    if has(item, &render("render_choice")) {
        ItemType::MultipleChoice
    } else if has(item, &render("render_slider")) {
        ItemType::DropdownSelect
    } else if has(item, &render("render_fib")) {
        let rows = int_at(
            item,
            &[
                Child("presentation"),
                Nth(0),
                Child("flow"),
                Nth(0),
                Child("response_lid"),
                Nth(0),
                Child("render_fib"),
                Nth(0),
                Child("rows"),
                Nth(0),
                Text,
            ],
            0,
        );
        let has_feedback = node_at(item, &[Child("itemfeedback"), Nth(0)])
            .is_some_and(|feedback| !feedback.is_empty());
        if rows == 1 && has_feedback {
            ItemType::ShortAnswer
        } else {
            ItemType::Essay
        }
    } else {
        ItemType::Unknown
    }
}
