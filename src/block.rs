//! Recursive extractor for display text and identifiers from block-shaped
//! subtrees.
//!
//! The accumulator is shared across the whole recursion: when several
//! sibling sub-blocks carry text, each assignment overwrites the previous
//! one and the last sibling with text wins. That overwrite-not-concatenate
//! behavior is part of the legacy contract and is kept as-is.

use crate::path::{has, node_at, nodes_at, text_at, Seg};
use crate::tree::TreeNode;

/// Accumulator for one block walk.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Block {
    /// Extracted display text, if any.
    pub text: Option<String>,

    /// Identifier from the first response label encountered, if any.
    pub ident: Option<String>,
}

impl Block {
    /// Create a new empty accumulator.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Extracted text, or an empty string.
    #[must_use]
    pub fn text(&self) -> &str {
        self.text.as_deref().unwrap_or("")
    }
}

/// Walk a block subtree, accumulating into `block`.
///
/// Priority at each recursion level, first match wins:
/// 1. direct text material,
/// 2. formatted-text extension,
/// 3. a response label (ident capture, then recursion into its sub-blocks),
/// 4. a flow collection (either variant), recursed in order.
pub fn walk_block(node: &TreeNode, block: &mut Block) {
    use Seg::{Attr, Child, Nth, Text};

    if has(node, &[Child("material"), Nth(0), Child("mattext")]) {
        let text = text_at(
            node,
            &[Child("material"), Nth(0), Child("mattext"), Nth(0), Text],
            "",
        );
        block.text = Some(text.to_string());
    } else if has(
        node,
        &[
            Child("material"),
            Nth(0),
            Child("mat_extension"),
            Nth(0),
            Child("mat_formattedtext"),
        ],
    ) {
        let text = text_at(
            node,
            &[
                Child("material"),
                Nth(0),
                Child("mat_extension"),
                Nth(0),
                Child("mat_formattedtext"),
                Nth(0),
                Text,
            ],
            "",
        );
        block.text = Some(text.to_string());
    } else if has(node, &[Child("response_label")]) {
        if let Some(label) = node_at(node, &[Child("response_label"), Nth(0)]) {
            if block.ident.is_none() && has(label, &[Attr("ident")]) {
                block.ident = Some(text_at(label, &[Attr("ident")], "").to_string());
            }
            for sub in nodes_at(label, &[Child("flow_mat")]) {
                walk_block(sub, block);
            }
        }
    } else if has(node, &[Child("flow_mat")]) || has(node, &[Child("flow")]) {
        let subs = if has(node, &[Child("flow_mat")]) {
            nodes_at(node, &[Child("flow_mat")])
        } else {
            nodes_at(node, &[Child("flow")])
        };
        for sub in subs {
            walk_block(sub, block);
        }
    }
}
