//! Shallow and deep node equality.

use crate::attributes::attributes_equal;
use crate::tree::Node;
use std::collections::HashSet;

/// Checks whether two nodes are equal.
///
/// Text and comment nodes compare their payloads byte for byte. Elements
/// compare tag and relevant attributes; with `deep` set, their child lists
/// must also match pairwise, stopping at the first mismatch. Change marks are
/// never part of the comparison.
///
/// # Examples
///
/// ```
/// use domdiff_rs::{tree_equals, Element, Node};
/// use std::collections::HashSet;
///
/// let a: Node = Element::new("p").with_child(Node::text("one")).into();
/// let b: Node = Element::new("p").with_child(Node::text("two")).into();
///
/// let ignored = HashSet::new();
/// assert!(tree_equals(&a, &b, false, &ignored));
/// assert!(!tree_equals(&a, &b, true, &ignored));
/// ```
pub fn tree_equals(a: &Node, b: &Node, deep: bool, ignored: &HashSet<String>) -> bool {
    match (a, b) {
        (Node::Text(a), Node::Text(b)) | (Node::Comment(a), Node::Comment(b)) => a == b,
        (Node::Element(a), Node::Element(b)) => {
            if a.tag != b.tag || !attributes_equal(&a.attributes, &b.attributes, ignored) {
                return false;
            }
            if !deep {
                return true;
            }
            a.children.len() == b.children.len()
                && a.children
                    .iter()
                    .zip(b.children.iter())
                    .all(|(child_a, child_b)| tree_equals(child_a, child_b, true, ignored))
        }
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::{ChangeKind, Element};

    #[test]
    fn test_kind_mismatch() {
        let ignored = HashSet::new();
        assert!(!tree_equals(
            &Node::text("x"),
            &Node::comment("x"),
            true,
            &ignored
        ));
    }

    #[test]
    fn test_deep_detects_nested_text_change() {
        let ignored = HashSet::new();
        let a: Node = Element::new("div")
            .with_child(Element::new("b").with_child(Node::text("old")))
            .into();
        let b: Node = Element::new("div")
            .with_child(Element::new("b").with_child(Node::text("new")))
            .into();
        assert!(tree_equals(&a, &b, false, &ignored));
        assert!(!tree_equals(&a, &b, true, &ignored));
    }

    #[test]
    fn test_deep_child_count_mismatch() {
        let ignored = HashSet::new();
        let a: Node = Element::new("ul").with_child(Element::new("li")).into();
        let b: Node = Element::new("ul")
            .with_child(Element::new("li"))
            .with_child(Element::new("li"))
            .into();
        assert!(!tree_equals(&a, &b, true, &ignored));
    }

    #[test]
    fn test_diff_mark_ignored() {
        let ignored = HashSet::new();
        let a: Node = Element::new("p").into();
        let mut marked = Element::new("p");
        marked.diff_mark = Some(ChangeKind::Inserted);
        assert!(tree_equals(&a, &Node::from(marked), true, &ignored));
    }
}
