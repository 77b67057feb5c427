//! Change marking on the working copy of the new tree.

use crate::classify::DIFF_MARKER_TAG;
use crate::error::DiffError;
use crate::tree::{ChangeKind, Element, Node};

/// Builds an empty deletion placeholder element.
pub fn deletion_marker(marker_type: &str) -> Node {
    Element::new(DIFF_MARKER_TAG)
        .with_attr("typeof", marker_type)
        .into()
}

/// Attaches `kind` to a single element, replacing any earlier mark.
///
/// Text and comment nodes have no surface to carry a mark, and a deletion has
/// no node of its own to mark; both are rejected.
pub fn mark_node(node: &mut Node, kind: ChangeKind) -> Result<(), DiffError> {
    if kind == ChangeKind::Deleted {
        return Err(DiffError::DetachedDeletion);
    }
    match node {
        Node::Element(element) => {
            element.diff_mark = Some(kind);
            Ok(())
        }
        other => Err(DiffError::UnmarkableNode {
            kind: other.kind_name(),
        }),
    }
}

/// Marks `siblings[index]` with `kind`.
///
/// A deletion leaves the node untouched and inserts a placeholder right before
/// it. Returns the node's index after marking, which shifts by one when a
/// placeholder went in.
pub fn mark(
    siblings: &mut Vec<Node>,
    index: usize,
    kind: ChangeKind,
    marker_type: &str,
) -> Result<usize, DiffError> {
    let len = siblings.len();
    if index >= len {
        return Err(DiffError::IndexOutOfBounds { index, len });
    }

    if kind == ChangeKind::Deleted {
        siblings.insert(index, deletion_marker(marker_type));
        return Ok(index + 1);
    }

    mark_node(&mut siblings[index], kind)?;
    Ok(index)
}
