use domdiff_rs::classify::{is_diff_marker, DEFAULT_MARKER_TYPE};
use domdiff_rs::marker::deletion_marker;
use domdiff_rs::{mark, mark_node, ChangeKind, DiffError, Element, Node};

#[test]
fn test_mark_every_element_kind() {
    for kind in [
        ChangeKind::Inserted,
        ChangeKind::Modified,
        ChangeKind::ModifiedWrapper,
        ChangeKind::SubtreeChanged,
        ChangeKind::DeletedChild,
    ] {
        let mut node: Node = Element::new("div").into();
        mark_node(&mut node, kind).unwrap();
        assert_eq!(node.diff_mark(), Some(kind));
    }
}

#[test]
fn test_mark_leaves_children_and_attributes_alone() {
    let original: Node = Element::new("div")
        .with_attr("class", "x")
        .with_child(Node::text("T"))
        .into();
    let mut node = original.clone();
    mark_node(&mut node, ChangeKind::ModifiedWrapper).unwrap();

    let element = node.as_element().unwrap();
    assert_eq!(element.attributes, original.as_element().unwrap().attributes);
    assert_eq!(element.children, original.children());
}

#[test]
fn test_mark_comment_fails() {
    let mut node = Node::comment("c");
    let err = mark_node(&mut node, ChangeKind::Modified).unwrap_err();
    assert_eq!(err, DiffError::UnmarkableNode { kind: "comment" });
}

#[test]
fn test_mark_node_rejects_deleted() {
    let mut node: Node = Element::new("p").into();
    let err = mark_node(&mut node, ChangeKind::Deleted).unwrap_err();
    assert_eq!(err, DiffError::DetachedDeletion);
    assert_eq!(node.diff_mark(), None);
}

#[test]
fn test_deleted_before_text_node() {
    let mut siblings = vec![Node::text("kept")];
    let index = mark(&mut siblings, 0, ChangeKind::Deleted, DEFAULT_MARKER_TYPE).unwrap();
    assert_eq!(index, 1);
    assert!(is_diff_marker(&siblings[0], DEFAULT_MARKER_TYPE));
    assert_eq!(siblings[1], Node::text("kept"));
}

#[test]
fn test_custom_marker_type() {
    let marker = deletion_marker("x:Gone");
    assert!(is_diff_marker(&marker, "x:Gone"));
    assert!(!is_diff_marker(&marker, DEFAULT_MARKER_TYPE));
    assert_eq!(marker.node_name(), "meta");
}

#[test]
fn test_mark_through_siblings() {
    let mut siblings: Vec<Node> = vec![Element::new("p").into(), Node::text("t")];
    let index = mark(&mut siblings, 0, ChangeKind::Inserted, DEFAULT_MARKER_TYPE).unwrap();
    assert_eq!(index, 0);
    assert_eq!(siblings[0].diff_mark(), Some(ChangeKind::Inserted));

    let err = mark(&mut siblings, 1, ChangeKind::Inserted, DEFAULT_MARKER_TYPE).unwrap_err();
    assert_eq!(err, DiffError::UnmarkableNode { kind: "text" });
}
