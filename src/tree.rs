//! In-memory tree model for the parsed export document.
//!
//! The export dialect has no fixed schema, so nothing is assumed about a
//! node beyond "attributes + named children + optional text". Children are
//! kept in an insertion-ordered map from tag name to the ordered sequence of
//! same-named children, mirroring the shape the legacy tokenizer produced.

use indexmap::IndexMap;
use roxmltree::Document;

use crate::error::Result;

/// One node of the parsed document tree.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TreeNode {
    /// Attribute mapping, in document order.
    pub attributes: IndexMap<String, String>,

    /// Named children: tag name to ordered sequence of child nodes.
    pub children: IndexMap<String, Vec<TreeNode>>,

    /// Direct text content, when present and not purely whitespace.
    pub text: Option<String>,
}

impl TreeNode {
    /// Parse an XML document into a tree.
    ///
    /// The returned node is a synthetic root whose single named child is the
    /// document root element, so paths can start with the root's tag name.
    ///
    /// # Errors
    /// Returns [`crate::error::ImportError::DocumentParse`] when the input is
    /// not well-formed XML.
    ///
    /// # Examples
    /// ```
    /// use fronter_import::tree::TreeNode;
    ///
    /// let tree = TreeNode::parse("<questestinterop><item/></questestinterop>").unwrap();
    /// assert!(tree.children.contains_key("questestinterop"));
    /// assert!(TreeNode::parse("<broken").is_err());
    /// ```
    pub fn parse(text: &str) -> Result<Self> {
        let doc = Document::parse(text)?;
        let mut root = Self::default();
        let element = Self::from_element(doc.root_element());
        root.children
            .insert(doc.root_element().tag_name().name().to_string(), vec![element]);
        Ok(root)
    }

    /// Convert one element subtree.
    fn from_element(node: roxmltree::Node<'_, '_>) -> Self {
        let mut attributes = IndexMap::new();
        for attr in node.attributes() {
            attributes.insert(attr.name().to_string(), attr.value().to_string());
        }

        let mut children: IndexMap<String, Vec<TreeNode>> = IndexMap::new();
        let mut text = String::new();
        for child in node.children() {
            if child.is_element() {
                children
                    .entry(child.tag_name().name().to_string())
                    .or_default()
                    .push(Self::from_element(child));
            } else if child.is_text() {
                if let Some(t) = child.text() {
                    text.push_str(t);
                }
            }
        }

        Self {
            attributes,
            children,
            text: if text.trim().is_empty() { None } else { Some(text) },
        }
    }

    /// Direct text content, or an empty string.
    #[must_use]
    pub fn text(&self) -> &str {
        self.text.as_deref().unwrap_or("")
    }

    /// Whether the node carries neither children nor text.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.children.is_empty() && self.text.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_wraps_document_root() {
        let tree = TreeNode::parse("<questestinterop><item/><item/></questestinterop>").unwrap();
        let root = &tree.children["questestinterop"][0];
        assert_eq!(root.children["item"].len(), 2);
    }

    #[test]
    fn test_parse_malformed_is_error() {
        assert!(TreeNode::parse("<questestinterop><item>").is_err());
        assert!(TreeNode::parse("not xml at all").is_err());
    }

    #[test]
    fn test_attributes_in_document_order() {
        let tree = TreeNode::parse(r#"<r b="2" a="1"/>"#).unwrap();
        let root = &tree.children["r"][0];
        let keys: Vec<_> = root.attributes.keys().map(String::as_str).collect();
        assert_eq!(keys, ["b", "a"]);
    }

    #[test]
    fn test_text_content() {
        let tree = TreeNode::parse("<r><mattext>What is 2+2?</mattext></r>").unwrap();
        let mattext = &tree.children["r"][0].children["mattext"][0];
        assert_eq!(mattext.text(), "What is 2+2?");
        assert!(!mattext.is_empty());
    }

    #[test]
    fn test_whitespace_only_text_is_dropped() {
        let tree = TreeNode::parse("<r>\n  <child/>\n</r>").unwrap();
        let root = &tree.children["r"][0];
        assert!(root.text.is_none());
    }

    #[test]
    fn test_sibling_order_preserved() {
        let tree =
            TreeNode::parse("<r><c>first</c><other/><c>second</c></r>").unwrap();
        let cs = &tree.children["r"][0].children["c"];
        assert_eq!(cs[0].text(), "first");
        assert_eq!(cs[1].text(), "second");
    }
}
