//! Core tree diff algorithm.
//!
//! The differ walks the child lists of a base tree and a new tree in lock-step.
//! When two siblings disagree it looks ahead one level (siblings only, never
//! their subtrees) to tell insertions and deletions apart from in-place
//! modifications, then marks a private copy of the new tree accordingly.
//!
//! # Examples
//!
//! ```
//! use domdiff_rs::{compute_diff, ChangeKind, DiffConfig, Element, Node};
//!
//! let paragraph = |text: &str| Node::from(Element::new("p").with_child(Node::text(text)));
//!
//! let base: Node = Element::new("body")
//!     .with_child(paragraph("a"))
//!     .with_child(paragraph("b"))
//!     .into();
//! let new: Node = Element::new("body")
//!     .with_child(paragraph("a"))
//!     .with_child(Element::new("hr"))
//!     .with_child(paragraph("b"))
//!     .into();
//!
//! let result = compute_diff(&base, &new, &DiffConfig::default()).unwrap();
//!
//! assert!(result.is_changed);
//! assert_eq!(result.annotated.children()[1].diff_mark(), Some(ChangeKind::Inserted));
//! assert_eq!(result.stats.inserted, 1);
//! ```

use crate::attributes::default_ignored_attributes;
use crate::classify::{self, is_diff_marker, TemplatePolicy, DEFAULT_MARKER_TYPE};
use crate::equality::tree_equals;
use crate::error::DiffError;
use crate::marker::{mark, mark_node};
use crate::tree::{ChangeKind, Node};
use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, info, trace};

/// A node classification predicate supplied by the caller.
pub type NodePredicate = Arc<dyn Fn(&Node) -> bool + Send + Sync>;

/// Configuration for the diff algorithm.
///
/// Holds the attribute ignore-list, the placeholder type used for deletions,
/// and the two classifiers the aligner consults.
#[derive(Clone)]
pub struct DiffConfig {
    /// Attribute names that never participate in equality
    pub ignored_attributes: HashSet<String>,
    /// `typeof` value of deletion placeholder elements
    pub marker_type: String,
    /// Gates lookahead: only content nodes are matched across siblings
    pub is_content_node: NodePredicate,
    /// Template roots are opaque and never recursed into
    pub is_template_node: NodePredicate,
}

impl DiffConfig {
    /// Builds a configuration using the default classifiers for the given
    /// ignore-list, placeholder type and template rules.
    pub fn new(
        ignored_attributes: HashSet<String>,
        marker_type: impl Into<String>,
        template_policy: TemplatePolicy,
    ) -> Self {
        let marker_type = marker_type.into();
        let content_marker_type = marker_type.clone();
        Self {
            ignored_attributes,
            marker_type,
            is_content_node: Arc::new(move |node: &Node| {
                classify::is_content_node(node, &content_marker_type)
            }),
            is_template_node: Arc::new(move |node: &Node| template_policy.is_template_node(node)),
        }
    }

    pub fn with_content_classifier<F>(mut self, predicate: F) -> Self
    where
        F: Fn(&Node) -> bool + Send + Sync + 'static,
    {
        self.is_content_node = Arc::new(predicate);
        self
    }

    pub fn with_template_classifier<F>(mut self, predicate: F) -> Self
    where
        F: Fn(&Node) -> bool + Send + Sync + 'static,
    {
        self.is_template_node = Arc::new(predicate);
        self
    }

    pub fn ignore_attribute(mut self, name: impl Into<String>) -> Self {
        self.ignored_attributes.insert(name.into());
        self
    }
}

impl Default for DiffConfig {
    fn default() -> Self {
        Self::new(
            default_ignored_attributes(),
            DEFAULT_MARKER_TYPE,
            TemplatePolicy::default(),
        )
    }
}

impl fmt::Debug for DiffConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut ignored: Vec<&String> = self.ignored_attributes.iter().collect();
        ignored.sort();
        f.debug_struct("DiffConfig")
            .field("ignored_attributes", &ignored)
            .field("marker_type", &self.marker_type)
            .finish_non_exhaustive()
    }
}

/// A single change mark found in the annotated tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Change {
    /// Path from the root, one `name[index]` segment per level (root is bare)
    pub path: Vec<String>,
    pub kind: ChangeKind,
    /// Preview of the marked node (the node following a deletion placeholder)
    pub preview: String,
}

/// Number of marks of each kind in the annotated tree.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DiffStats {
    pub inserted: usize,
    pub deleted: usize,
    pub modified: usize,
    pub modified_wrapper: usize,
    pub subtree_changed: usize,
    pub deleted_child: usize,
}

impl DiffStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_changes(changes: &[Change]) -> Self {
        let mut stats = Self::new();
        for change in changes {
            stats.record(change.kind);
        }
        stats
    }

    fn record(&mut self, kind: ChangeKind) {
        match kind {
            ChangeKind::Inserted => self.inserted += 1,
            ChangeKind::Deleted => self.deleted += 1,
            ChangeKind::Modified => self.modified += 1,
            ChangeKind::ModifiedWrapper => self.modified_wrapper += 1,
            ChangeKind::SubtreeChanged => self.subtree_changed += 1,
            ChangeKind::DeletedChild => self.deleted_child += 1,
        }
    }

    /// Total number of marks, including `subtree-changed` bookkeeping marks.
    pub fn total_changes(&self) -> usize {
        self.inserted
            + self.deleted
            + self.modified
            + self.modified_wrapper
            + self.subtree_changed
            + self.deleted_child
    }

    pub fn is_empty(&self) -> bool {
        self.total_changes() == 0
    }
}

/// Outcome of one diff: the annotated copy of the new tree and a summary.
#[derive(Debug, Clone)]
pub struct DiffResult {
    /// True iff any difference was found
    pub is_changed: bool,
    /// Independent, annotated copy of the new tree
    pub annotated: Node,
    /// Every mark in `annotated`, in document order
    pub changes: Vec<Change>,
    pub stats: DiffStats,
}

/// A configured differ. Cheap to share; every call works on its own copy.
#[derive(Debug, Clone, Default)]
pub struct DomDiff {
    config: DiffConfig,
}

impl DomDiff {
    pub fn new(config: DiffConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &DiffConfig {
        &self.config
    }

    /// Diffs `new` against `base`. Neither input is modified.
    pub fn diff(&self, base: &Node, new: &Node) -> Result<DiffResult, DiffError> {
        compute_diff(base, new, &self.config)
    }
}

/// Computes the diff between a base tree and a new tree.
///
/// The new tree is cloned first; only the clone receives marks and deletion
/// placeholders. Marks already present on `new` are dropped from the clone. If the two roots are not even shallowly equal the clone's
/// root is marked `modified` and nothing below it is examined.
///
/// # Errors
///
/// Returns a [`DiffError`] if marking hits an internal inconsistency.
pub fn compute_diff(base: &Node, new: &Node, config: &DiffConfig) -> Result<DiffResult, DiffError> {
    let mut work = new.clone();
    work.clear_marks();

    let is_changed = if !tree_equals(base, &work, false, &config.ignored_attributes) {
        debug!(
            base = base.node_name(),
            new = work.node_name(),
            "root nodes differ"
        );
        if work.is_element() {
            mark_node(&mut work, ChangeKind::Modified)?;
        }
        true
    } else {
        Aligner { config }.align(base, &mut work)?
    };

    let changes = collect_changes(&work, &config.marker_type);
    let stats = DiffStats::from_changes(&changes);
    info!(
        changed = is_changed,
        marks = stats.total_changes(),
        "diff complete"
    );

    Ok(DiffResult {
        is_changed,
        annotated: work,
        changes,
        stats,
    })
}

struct Aligner<'a> {
    config: &'a DiffConfig,
}

impl Aligner<'_> {
    fn equals(&self, a: &Node, b: &Node, deep: bool) -> bool {
        tree_equals(a, b, deep, &self.config.ignored_attributes)
    }

    fn is_content(&self, node: &Node) -> bool {
        (self.config.is_content_node)(node)
    }

    /// Marks a sibling, leaving text and comment nodes alone.
    ///
    /// The caller still records the change, so it surfaces on the parent as
    /// `subtree-changed`.
    fn mark_sibling(
        &self,
        siblings: &mut Vec<Node>,
        index: usize,
        kind: ChangeKind,
    ) -> Result<usize, DiffError> {
        if kind != ChangeKind::Deleted && !siblings[index].is_element() {
            trace!(kind = %kind, node = siblings[index].kind_name(), "mark routed to parent");
            return Ok(index);
        }
        debug!(kind = %kind, node = siblings[index].node_name(), "found diff");
        mark(siblings, index, kind, &self.config.marker_type)
    }

    /// Aligns the children of two parents. Returns true if anything differs.
    fn align(&self, base_parent: &Node, new_parent: &mut Node) -> Result<bool, DiffError> {
        let base_children = base_parent.children();
        let new_children = match &mut *new_parent {
            Node::Element(element) => &mut element.children,
            _ => return Ok(false),
        };

        let mut base_idx = 0;
        let mut new_idx = 0;
        let mut found_change = false;

        while base_idx < base_children.len() && new_idx < new_children.len() {
            let base_node = &base_children[base_idx];
            trace!(
                base = base_node.node_name(),
                new = new_children[new_idx].node_name(),
                "comparing siblings"
            );

            if !self.equals(base_node, &new_children[new_idx], false) {
                let mut resolved = false;

                // Look ahead in the new list for the base node: insertions.
                if self.is_content(base_node) {
                    let lookahead = new_children[new_idx + 1..]
                        .iter()
                        .position(|node| self.is_content(node) && self.equals(base_node, node, true));
                    if let Some(offset) = lookahead {
                        let match_idx = new_idx + 1 + offset;
                        for idx in new_idx..match_idx {
                            self.mark_sibling(new_children, idx, ChangeKind::Inserted)?;
                        }
                        new_idx = match_idx;
                        resolved = true;
                    }
                }

                // Look ahead in the base list for the new node: deletions.
                if !resolved && self.is_content(&new_children[new_idx]) {
                    let new_node = &new_children[new_idx];
                    let lookahead = base_children[base_idx + 1..]
                        .iter()
                        .position(|node| self.is_content(node) && self.equals(node, new_node, true));
                    if let Some(offset) = lookahead {
                        new_idx = self.mark_sibling(new_children, new_idx, ChangeKind::Deleted)?;
                        base_idx += 1 + offset;
                        resolved = true;
                    }
                }

                if !resolved {
                    if base_node.node_name() == new_children[new_idx].node_name() {
                        self.mark_sibling(new_children, new_idx, ChangeKind::ModifiedWrapper)?;
                        self.align(base_node, &mut new_children[new_idx])?;
                    } else {
                        self.mark_sibling(new_children, new_idx, ChangeKind::Modified)?;
                    }
                }

                found_change = true;
            } else if !(self.config.is_template_node)(&new_children[new_idx]) {
                if self.align(base_node, &mut new_children[new_idx])? {
                    // Keep a deleted-child mark set by the recursion.
                    if new_children[new_idx].diff_mark().is_none() {
                        self.mark_sibling(new_children, new_idx, ChangeKind::SubtreeChanged)?;
                    }
                    found_change = true;
                }
            }

            base_idx += 1;
            new_idx += 1;
        }

        while new_idx < new_children.len() {
            debug!("trailing new node");
            self.mark_sibling(new_children, new_idx, ChangeKind::Inserted)?;
            found_change = true;
            new_idx += 1;
        }

        if base_idx < base_children.len() {
            debug!(
                missing = base_children.len() - base_idx,
                "trailing base nodes"
            );
            mark_node(new_parent, ChangeKind::DeletedChild)?;
            found_change = true;
        }

        Ok(found_change)
    }
}

/// Lists every mark in an annotated tree in document order.
///
/// Deletion placeholders are reported as `deleted` changes at the position of
/// the node they precede.
pub fn collect_changes(root: &Node, marker_type: &str) -> Vec<Change> {
    let mut changes = Vec::new();
    collect_node(root, vec![root.node_name().to_string()], marker_type, &mut changes);
    changes
}

fn collect_node(node: &Node, path: Vec<String>, marker_type: &str, changes: &mut Vec<Change>) {
    if let Some(kind) = node.diff_mark() {
        changes.push(Change {
            path: path.clone(),
            kind,
            preview: node.preview(60),
        });
    }

    let children = node.children();
    for (i, child) in children.iter().enumerate() {
        if is_diff_marker(child, marker_type) {
            let preview = children
                .get(i + 1)
                .map(|next| format!("before {}", next.preview(50)))
                .unwrap_or_else(|| "at end".to_string());
            let mut child_path = path.clone();
            child_path.push(format!("{}[{}]", child.node_name(), i));
            changes.push(Change {
                path: child_path,
                kind: ChangeKind::Deleted,
                preview,
            });
            continue;
        }

        let mut child_path = path.clone();
        child_path.push(format!("{}[{}]", child.node_name(), i));
        collect_node(child, child_path, marker_type, changes);
    }
}
