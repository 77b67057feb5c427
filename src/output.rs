//! Output formatting for diff results.
//!
//! The markup format is what a selective serializer consumes: the annotated
//! tree, with every change mark rendered as a `data-diff` attribute. The other
//! formats are human (terminal, plain) or machine (JSON) summaries.
//!
//! # Examples
//!
//! ```
//! use domdiff_rs::{compute_diff, format_result, DiffConfig, Element, Node, OutputFormat, OutputOptions};
//!
//! let base: Node = Element::new("p").with_child(Node::text("a")).into();
//! let new: Node = Element::new("p").with_child(Node::text("b")).into();
//! let result = compute_diff(&base, &new, &DiffConfig::default()).unwrap();
//!
//! let output = format_result(&result, &OutputFormat::Plain, &OutputOptions::default()).unwrap();
//! assert!(output.contains("Summary"));
//! ```

use crate::diff::{Change, DiffResult, DiffStats};
use crate::error::OutputError;
use crate::tree::{ChangeKind, Node};
use colored::*;
use std::str::FromStr;

/// Name of the attribute carrying a change mark in markup output.
pub const DIFF_ATTRIBUTE: &str = "data-diff";

/// Shown when text directly under the root changed: the root itself is never
/// marked, so there is no node-level change to list.
const ROOT_CONTENT_CHANGED: &str = "~ text or comments directly under the root changed";

/// Output format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Colored change list with ANSI escape codes
    Terminal,
    /// Change list without colors
    Plain,
    /// JSON with changes, stats and the annotated tree
    Json,
    /// Annotated tree serialized as markup
    Markup,
}

impl FromStr for OutputFormat {
    type Err = OutputError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "terminal" => Ok(OutputFormat::Terminal),
            "plain" => Ok(OutputFormat::Plain),
            "json" => Ok(OutputFormat::Json),
            "markup" | "html" => Ok(OutputFormat::Markup),
            _ => Err(OutputError::UnknownFormat {
                format: s.to_string(),
            }),
        }
    }
}

/// Options for controlling output formatting.
#[derive(Debug, Clone)]
pub struct OutputOptions {
    /// Append the annotated markup after the change list
    pub show_tree: bool,
    /// Maximum length for node previews (truncate if longer)
    pub max_value_length: usize,
}

impl Default for OutputOptions {
    fn default() -> Self {
        Self {
            show_tree: false,
            max_value_length: 60,
        }
    }
}

/// Formats a diff result according to the specified format and options.
pub fn format_result(
    result: &DiffResult,
    format: &OutputFormat,
    options: &OutputOptions,
) -> Result<String, OutputError> {
    match format {
        OutputFormat::Terminal => Ok(format_terminal(result, options)),
        OutputFormat::Plain => Ok(format_plain(result, options)),
        OutputFormat::Json => format_json(result),
        OutputFormat::Markup => Ok(to_markup(&result.annotated)),
    }
}

fn format_terminal(result: &DiffResult, options: &OutputOptions) -> String {
    if !result.is_changed {
        return "No changes detected.".dimmed().to_string();
    }

    let mut output = String::new();
    for change in &result.changes {
        output.push_str(&format_change_terminal(change, options));
        output.push('\n');
    }
    if result.changes.is_empty() {
        output.push_str(&ROOT_CONTENT_CHANGED.yellow().to_string());
        output.push('\n');
    }

    if options.show_tree {
        output.push('\n');
        output.push_str(&to_markup(&result.annotated));
        output.push('\n');
    }

    output.push('\n');
    output.push_str(&format_summary(&result.stats));
    output
}

fn format_change_terminal(change: &Change, options: &OutputOptions) -> String {
    let path = format_path(&change.path);
    let preview = truncate(&change.preview, options.max_value_length);
    let symbol = change_symbol(change.kind);
    let label = change.kind.as_str();

    match change.kind {
        ChangeKind::Inserted => format!(
            "{} {} {}: {}",
            symbol.bright_green(),
            label.green(),
            path.green(),
            preview.green()
        ),
        ChangeKind::Deleted | ChangeKind::DeletedChild => format!(
            "{} {} {}: {}",
            symbol.bright_red(),
            label.red(),
            path.red(),
            preview.red()
        ),
        ChangeKind::Modified | ChangeKind::ModifiedWrapper => format!(
            "{} {} {}: {}",
            symbol.bright_yellow(),
            label.yellow(),
            path.yellow(),
            preview.yellow()
        ),
        ChangeKind::SubtreeChanged => format!(
            "{} {} {}",
            symbol.dimmed(),
            label.dimmed(),
            path.dimmed()
        ),
    }
}

fn format_plain(result: &DiffResult, options: &OutputOptions) -> String {
    if !result.is_changed {
        return "No changes detected.".to_string();
    }

    let mut output = String::new();
    for change in &result.changes {
        output.push_str(&format_change_plain(change, options));
        output.push('\n');
    }
    if result.changes.is_empty() {
        output.push_str(ROOT_CONTENT_CHANGED);
        output.push('\n');
    }

    if options.show_tree {
        output.push('\n');
        output.push_str(&to_markup(&result.annotated));
        output.push('\n');
    }

    output.push('\n');
    output.push_str(&format_summary(&result.stats));
    output
}

fn format_change_plain(change: &Change, options: &OutputOptions) -> String {
    let path = format_path(&change.path);
    let symbol = change_symbol(change.kind);
    match change.kind {
        ChangeKind::SubtreeChanged => format!("{} {} {}", symbol, change.kind, path),
        _ => format!(
            "{} {} {}: {}",
            symbol,
            change.kind,
            path,
            truncate(&change.preview, options.max_value_length)
        ),
    }
}

fn change_symbol(kind: ChangeKind) -> &'static str {
    match kind {
        ChangeKind::Inserted => "+",
        ChangeKind::Deleted | ChangeKind::DeletedChild => "-",
        ChangeKind::Modified => "•",
        ChangeKind::ModifiedWrapper => "~",
        ChangeKind::SubtreeChanged => "·",
    }
}

fn format_json(result: &DiffResult) -> Result<String, OutputError> {
    use serde_json::json;

    let changes: Vec<serde_json::Value> = result
        .changes
        .iter()
        .map(|c| {
            json!({
                "path": c.path,
                "kind": c.kind,
                "preview": c.preview,
            })
        })
        .collect();

    let stats = &result.stats;
    let output = json!({
        "changed": result.is_changed,
        "changes": changes,
        "stats": {
            "inserted": stats.inserted,
            "deleted": stats.deleted,
            "modified": stats.modified,
            "modified_wrapper": stats.modified_wrapper,
            "subtree_changed": stats.subtree_changed,
            "deleted_child": stats.deleted_child,
        },
        "tree": result.annotated,
    });

    serde_json::to_string_pretty(&output)
        .map_err(|e| OutputError::JsonSerializationError { source: e })
}

/// Joins path segments with `/`.
///
/// - `["body"]` → `"body"`
/// - `["body", "p[2]", "b[0]"]` → `"body/p[2]/b[0]"`
fn format_path(path: &[String]) -> String {
    if path.is_empty() {
        return "(root)".to_string();
    }
    path.join("/")
}

fn truncate(value: &str, max_len: usize) -> String {
    if value.chars().count() > max_len {
        let kept: String = value.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", kept)
    } else {
        value.to_string()
    }
}

fn format_summary(stats: &DiffStats) -> String {
    if stats.is_empty() {
        return "Summary: No changes".to_string();
    }

    let counts = [
        (stats.inserted, "inserted"),
        (stats.deleted, "deleted"),
        (stats.modified, "modified"),
        (stats.modified_wrapper, "modified-wrapper"),
        (stats.deleted_child, "deleted-child"),
        (stats.subtree_changed, "subtree-changed"),
    ];
    let parts: Vec<String> = counts
        .iter()
        .filter(|(count, _)| *count > 0)
        .map(|(count, label)| format!("{} {}", count, label))
        .collect();

    format!("Summary: {}", parts.join(", "))
}

/// Serializes a tree as markup, rendering change marks as `data-diff`.
///
/// Text is escaped for `&`, `<` and `>`; attribute values additionally for `"`.
/// Childless elements are written as empty tag pairs.
pub fn to_markup(node: &Node) -> String {
    let mut out = String::new();
    write_markup(node, &mut out);
    out
}

fn write_markup(node: &Node, out: &mut String) {
    match node {
        Node::Text(value) => out.push_str(&escape_text(value)),
        Node::Comment(value) => {
            out.push_str("<!--");
            out.push_str(value);
            out.push_str("-->");
        }
        Node::Element(element) => {
            out.push('<');
            out.push_str(&element.tag);
            for attr in &element.attributes {
                out.push_str(&format!(" {}=\"{}\"", attr.name, escape_attribute(&attr.value)));
            }
            if let Some(kind) = element.diff_mark {
                out.push_str(&format!(" {}=\"{}\"", DIFF_ATTRIBUTE, kind));
            }
            out.push('>');
            for child in &element.children {
                write_markup(child, out);
            }
            out.push_str("</");
            out.push_str(&element.tag);
            out.push('>');
        }
    }
}

fn escape_text(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

fn escape_attribute(value: &str) -> String {
    escape_text(value).replace('"', "&quot;")
}
