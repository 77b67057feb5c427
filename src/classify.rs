//! Node classification used to steer the aligner.
//!
//! The differ only ever asks two questions about a node: does its presence
//! matter for lookahead matching (content nodes), and is it the root of an
//! externally generated subtree that must be treated as opaque (template
//! nodes). The functions here are the default answers; callers can plug in
//! their own through [`DiffConfig`](crate::DiffConfig).

use crate::tree::Node;

/// Tag of the placeholder element inserted for deletions.
pub const DIFF_MARKER_TAG: &str = "meta";

/// Default `typeof` value carried by deletion placeholders.
pub const DEFAULT_MARKER_TYPE: &str = "mw:DiffMarker";

/// `typeof` prefixes that mark template-generated content by default.
pub const DEFAULT_TEMPLATE_TYPES: &[&str] = &["mw:Transclusion", "mw:Param", "mw:Extension"];

/// `about` prefix shared by every node of one template expansion.
pub const DEFAULT_TEMPLATE_ABOUT_PREFIX: &str = "#mwt";

/// Returns true for a deletion placeholder carrying `marker_type`.
pub fn is_diff_marker(node: &Node, marker_type: &str) -> bool {
    node.as_element().is_some_and(|element| {
        element.tag == DIFF_MARKER_TAG && element.attribute("typeof") == Some(marker_type)
    })
}

/// Returns true for text nodes made only of whitespace.
pub fn is_ignorable_whitespace(node: &Node) -> bool {
    match node {
        Node::Text(value) => value.chars().all(char::is_whitespace),
        _ => false,
    }
}

/// Default content-node test.
///
/// Comments, whitespace-only text and deletion placeholders are structural
/// filler; everything else is content.
pub fn is_content_node(node: &Node, marker_type: &str) -> bool {
    !matches!(node, Node::Comment(_))
        && !is_ignorable_whitespace(node)
        && !is_diff_marker(node, marker_type)
}

/// Rules for recognizing template-boundary elements.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplatePolicy {
    /// Any `typeof` token starting with one of these marks a template root
    pub types: Vec<String>,
    /// An `about` value starting with this marks template content
    pub about_prefix: String,
}

impl Default for TemplatePolicy {
    fn default() -> Self {
        Self {
            types: DEFAULT_TEMPLATE_TYPES.iter().map(|t| t.to_string()).collect(),
            about_prefix: DEFAULT_TEMPLATE_ABOUT_PREFIX.to_string(),
        }
    }
}

impl TemplatePolicy {
    /// Returns true if `node` is the root of a template-generated subtree.
    pub fn is_template_node(&self, node: &Node) -> bool {
        let Some(element) = node.as_element() else {
            return false;
        };

        let typed = element.attribute("typeof").is_some_and(|value| {
            value.split_whitespace().any(|token| {
                self.types
                    .iter()
                    .any(|template_type| token.starts_with(template_type.as_str()))
            })
        });

        typed
            || (!self.about_prefix.is_empty()
                && element
                    .attribute("about")
                    .is_some_and(|about| about.starts_with(&self.about_prefix)))
    }
}
