//! domdiff - structural diff for document trees.
//!
//! Compares a base tree with a new tree and returns an annotated copy of the
//! new tree in which changed regions carry change marks (`inserted`,
//! `modified`, `subtree-changed`, ...) and deletions are represented by empty
//! placeholder elements. A selective serializer can then regenerate only the
//! marked regions and reuse the original source for everything else.
//!
//! # Example
//!
//! ```
//! use domdiff_rs::{ChangeKind, DomDiff, DiffConfig, Element, Node};
//!
//! let base: Node = Element::new("body")
//!     .with_child(Element::new("div").with_attr("class", "a").with_child(Node::text("T")))
//!     .into();
//! let new: Node = Element::new("body")
//!     .with_child(Element::new("div").with_attr("class", "b").with_child(Node::text("T")))
//!     .into();
//!
//! let differ = DomDiff::new(DiffConfig::default());
//! let result = differ.diff(&base, &new).unwrap();
//!
//! assert!(result.is_changed);
//! assert_eq!(result.annotated.children()[0].diff_mark(), Some(ChangeKind::ModifiedWrapper));
//! ```

pub mod attributes;
pub mod classify;
pub mod config;
pub mod diff;
pub mod equality;
pub mod error;
pub mod logging;
pub mod marker;
pub mod output;
pub mod parser;
pub mod tree;

// Re-export commonly used types for convenience
pub use attributes::{attributes_equal, default_ignored_attributes};
pub use classify::TemplatePolicy;
pub use config::PolicyFile;
pub use diff::{compute_diff, Change, DiffConfig, DiffResult, DiffStats, DomDiff, NodePredicate};
pub use equality::tree_equals;
pub use error::{DiffError, DomDiffError, OutputError, ParseError};
pub use marker::{mark, mark_node};
pub use output::{format_result, to_markup, OutputFormat, OutputOptions};
pub use parser::{parse_content, parse_file, parse_json, parse_stdin, parse_toml, parse_yaml, FormatHint};
pub use tree::{Attribute, ChangeKind, Element, Node};
