//! Total, failure-free navigation over [`TreeNode`] trees.
//!
//! A path is an ordered sequence of [`Seg`] segments walked left to right;
//! the first segment that does not resolve short-circuits the whole lookup.
//! Callers probe with [`has`] before fetching with one of the typed
//! accessors, relying on the same miss-returns-default contract both times.

use crate::tree::TreeNode;

/// One segment of a tree path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Seg<'p> {
    /// Select the ordered sequence of children with this tag name.
    Child(&'p str),
    /// Index into an ordered sequence of nodes.
    Nth(usize),
    /// Select an attribute of an element.
    Attr(&'p str),
    /// Select the element's own text content.
    Text,
}

/// Value a path resolves to.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PathValue<'a> {
    /// A single node.
    Node(&'a TreeNode),
    /// An ordered sequence of same-named nodes.
    List(&'a [TreeNode]),
    /// An attribute value or text content.
    Str(&'a str),
}

impl PathValue<'_> {
    /// Legacy truthiness: empty strings, empty lists and contentless nodes
    /// are falsy, everything else is truthy.
    #[must_use]
    pub fn is_truthy(&self) -> bool {
        match self {
            Self::Node(node) => !node.is_empty() || !node.attributes.is_empty(),
            Self::List(nodes) => !nodes.is_empty(),
            Self::Str(s) => !s.is_empty(),
        }
    }
}

/// Resolve a path against a node.
///
/// Total: a missing segment yields `None`, never an error. Segment
/// mismatches (e.g. indexing into a single node) also count as misses.
#[must_use]
pub fn getpath<'a>(node: &'a TreeNode, path: &[Seg<'_>]) -> Option<PathValue<'a>> {
    let mut current = PathValue::Node(node);
    for seg in path {
        current = match (current, seg) {
            (PathValue::Node(n), Seg::Child(tag)) => {
                PathValue::List(n.children.get(*tag)?.as_slice())
            }
            (PathValue::List(nodes), Seg::Nth(i)) => PathValue::Node(nodes.get(*i)?),
            (PathValue::Node(n), Seg::Attr(name)) => {
                PathValue::Str(n.attributes.get(*name)?.as_str())
            }
            (PathValue::Node(n), Seg::Text) => PathValue::Str(n.text()),
            _ => return None,
        };
    }
    Some(current)
}

/// Existence probe: whether the path resolves to a truthy value.
#[must_use]
pub fn has(node: &TreeNode, path: &[Seg<'_>]) -> bool {
    getpath(node, path).is_some_and(|v| v.is_truthy())
}

/// Fetch a string value, falling back to `default` on a miss or when the
/// path resolves to something that is not a string.
#[must_use]
pub fn text_at<'a>(node: &'a TreeNode, path: &[Seg<'_>], default: &'a str) -> &'a str {
    match getpath(node, path) {
        Some(PathValue::Str(s)) => s,
        _ => default,
    }
}

/// Fetch an ordered node sequence; empty on a miss.
#[must_use]
pub fn nodes_at<'a>(node: &'a TreeNode, path: &[Seg<'_>]) -> &'a [TreeNode] {
    match getpath(node, path) {
        Some(PathValue::List(nodes)) => nodes,
        _ => &[],
    }
}

/// Fetch a single node; `None` on a miss.
#[must_use]
pub fn node_at<'a>(node: &'a TreeNode, path: &[Seg<'_>]) -> Option<&'a TreeNode> {
    match getpath(node, path) {
        Some(PathValue::Node(n)) => Some(n),
        _ => None,
    }
}

/// Fetch an integer, defaulting on a miss or unparsable text.
#[must_use]
pub fn int_at(node: &TreeNode, path: &[Seg<'_>], default: i64) -> i64 {
    text_at(node, path, "").trim().parse().unwrap_or(default)
}

/// Fetch a float, defaulting on a miss or unparsable text.
#[must_use]
pub fn float_at(node: &TreeNode, path: &[Seg<'_>], default: f64) -> f64 {
    text_at(node, path, "").trim().parse().unwrap_or(default)
}
