//! Document tree representation.
//!
//! Documents are strict ownership trees of [`Node`]s: every element owns its
//! children, so cloning a node clones its whole subtree. Sibling order is
//! significant, attribute order is not.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A change annotation attached to an element of the annotated tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ChangeKind {
    /// Node is new content with no counterpart in the base tree
    Inserted,
    /// Content used to be here; only ever materialized as a placeholder node
    Deleted,
    /// Node replaces an entirely different base node
    Modified,
    /// Same tag as the base node, but the wrapper's attributes changed
    ModifiedWrapper,
    /// Node itself is unchanged but something below it changed
    SubtreeChanged,
    /// Trailing children present in the base tree are missing here
    DeletedChild,
}

impl ChangeKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ChangeKind::Inserted => "inserted",
            ChangeKind::Deleted => "deleted",
            ChangeKind::Modified => "modified",
            ChangeKind::ModifiedWrapper => "modified-wrapper",
            ChangeKind::SubtreeChanged => "subtree-changed",
            ChangeKind::DeletedChild => "deleted-child",
        }
    }
}

impl fmt::Display for ChangeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single `name="value"` attribute on an element.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attribute {
    pub name: String,
    pub value: String,
}

impl Attribute {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// An element node: tag, attributes, ordered children and an optional change mark.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Element {
    pub tag: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub attributes: Vec<Attribute>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<Node>,
    #[serde(default, rename = "diff", skip_serializing_if = "Option::is_none")]
    pub diff_mark: Option<ChangeKind>,
}

impl Element {
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            attributes: Vec::new(),
            children: Vec::new(),
            diff_mark: None,
        }
    }

    /// Adds an attribute, keeping declaration order.
    pub fn with_attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.push(Attribute::new(name, value));
        self
    }

    pub fn with_child(mut self, child: impl Into<Node>) -> Self {
        self.children.push(child.into());
        self
    }

    pub fn with_children<I, N>(mut self, children: I) -> Self
    where
        I: IntoIterator<Item = N>,
        N: Into<Node>,
    {
        self.children.extend(children.into_iter().map(Into::into));
        self
    }

    /// Returns the value of the first attribute named `name`.
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|attr| attr.name == name)
            .map(|attr| attr.value.as_str())
    }
}

/// A node in a document tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Node {
    Element(Element),
    Text(String),
    Comment(String),
}

impl From<Element> for Node {
    fn from(element: Element) -> Self {
        Node::Element(element)
    }
}

impl Node {
    pub fn text(value: impl Into<String>) -> Self {
        Node::Text(value.into())
    }

    pub fn comment(value: impl Into<String>) -> Self {
        Node::Comment(value.into())
    }

    /// Short name of the node kind, used in error messages and output.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Node::Element(_) => "element",
            Node::Text(_) => "text",
            Node::Comment(_) => "comment",
        }
    }

    /// DOM-style node name: the tag for elements, `#text` / `#comment` otherwise.
    pub fn node_name(&self) -> &str {
        match self {
            Node::Element(element) => &element.tag,
            Node::Text(_) => "#text",
            Node::Comment(_) => "#comment",
        }
    }

    pub fn is_element(&self) -> bool {
        matches!(self, Node::Element(_))
    }

    pub fn as_element(&self) -> Option<&Element> {
        match self {
            Node::Element(element) => Some(element),
            _ => None,
        }
    }

    pub fn as_element_mut(&mut self) -> Option<&mut Element> {
        match self {
            Node::Element(element) => Some(element),
            _ => None,
        }
    }

    /// Children of an element; leaves have none.
    pub fn children(&self) -> &[Node] {
        match self {
            Node::Element(element) => &element.children,
            _ => &[],
        }
    }

    pub fn diff_mark(&self) -> Option<ChangeKind> {
        self.as_element().and_then(|element| element.diff_mark)
    }

    /// Returns a short preview of the node, truncated to max_len characters.
    pub fn preview(&self, max_len: usize) -> String {
        let preview = match self {
            Node::Element(element) => {
                let count = element.children.len();
                match count {
                    0 => format!("<{}>", element.tag),
                    1 => format!("<{}> {{ 1 child }}", element.tag),
                    _ => format!("<{}> {{ {} children }}", element.tag, count),
                }
            }
            Node::Text(value) => format!("{:?}", value),
            Node::Comment(value) => format!("<!--{}-->", value),
        };

        if preview.chars().count() > max_len {
            let kept: String = preview.chars().take(max_len.saturating_sub(3)).collect();
            format!("{}...", kept)
        } else {
            preview
        }
    }

    /// Removes every change mark from this subtree.
    pub fn clear_marks(&mut self) {
        if let Some(element) = self.as_element_mut() {
            element.diff_mark = None;
            element.children.iter_mut().for_each(Node::clear_marks);
        }
    }
}
