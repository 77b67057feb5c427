//! Document loading for JSON, YAML and TOML tree files.
//!
//! Trees are stored in the serde form of [`Node`]: each node is a single-key
//! map naming its kind.
//!
//! ```json
//! {"element": {
//!   "tag": "p",
//!   "attributes": [{"name": "class", "value": "lead"}],
//!   "children": [{"text": "Hello"}, {"comment": " note "}]
//! }}
//! ```
//!
//! # Examples
//!
//! ```no_run
//! use domdiff_rs::parser::parse_file;
//! use std::path::Path;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let base = parse_file(Path::new("base.json"))?;
//! let new = parse_file(Path::new("new.yaml"))?;
//! # Ok(())
//! # }
//! ```

use crate::error::ParseError;
use crate::tree::Node;
use std::fs;
use std::io::Read;
use std::path::Path;

/// Format to use when it cannot be taken from a file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FormatHint {
    Json,
    Yaml,
    Toml,
    /// Try JSON, then YAML, then TOML
    #[default]
    Auto,
}

impl FormatHint {
    /// Maps a file extension to a format, case-insensitively.
    pub fn from_extension(extension: &str) -> Self {
        match extension.to_lowercase().as_str() {
            "json" => FormatHint::Json,
            "yaml" | "yml" => FormatHint::Yaml,
            "toml" => FormatHint::Toml,
            _ => FormatHint::Auto,
        }
    }
}

/// Parses a tree file, picking the format from its extension.
///
/// # Errors
///
/// - `ParseError::FileNotFound` if the file does not exist
/// - `ParseError::ReadError` if it cannot be read
/// - `ParseError::JsonError` / `YamlError` / `TomlError` for invalid content
/// - `ParseError::UnknownFormat` if no format accepts content of an unknown extension
pub fn parse_file(path: &Path) -> Result<Node, ParseError> {
    let display = path.to_string_lossy().to_string();
    if !path.exists() {
        return Err(ParseError::file_not_found(display));
    }

    let content = fs::read_to_string(path).map_err(|e| ParseError::read_error(display.clone(), e))?;

    let hint = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(FormatHint::from_extension)
        .unwrap_or_default();

    parse_content(&content, hint, &display)
}

/// Parses tree content with an explicit format; `source` names it in errors.
pub fn parse_content(content: &str, hint: FormatHint, source: &str) -> Result<Node, ParseError> {
    match hint {
        FormatHint::Json => parse_json(content).map_err(|e| ParseError::json_error(source, e)),
        FormatHint::Yaml => parse_yaml(content).map_err(|e| ParseError::yaml_error(source, e)),
        FormatHint::Toml => parse_toml(content).map_err(|e| ParseError::toml_error(source, e)),
        FormatHint::Auto => parse_json(content)
            .ok()
            .or_else(|| parse_yaml(content).ok())
            .or_else(|| parse_toml(content).ok())
            .ok_or_else(|| ParseError::unknown_format(source)),
    }
}

/// Reads a tree from standard input.
pub fn parse_stdin(hint: FormatHint) -> Result<Node, ParseError> {
    let mut content = String::new();
    std::io::stdin()
        .read_to_string(&mut content)
        .map_err(|e| ParseError::read_error("<stdin>", e))?;
    parse_content(&content, hint, "<stdin>")
}

/// Parses a JSON tree.
///
/// ```
/// use domdiff_rs::parser::parse_json;
///
/// let node = parse_json(r#"{"element": {"tag": "p", "children": [{"text": "hi"}]}}"#).unwrap();
/// assert_eq!(node.node_name(), "p");
/// ```
pub fn parse_json(content: &str) -> Result<Node, serde_json::Error> {
    serde_json::from_str(content)
}

/// Parses a YAML tree.
///
/// serde_yaml reads enum variants from `!tag` syntax, so the document is
/// loaded as a plain value first and then decoded with the same single-key
/// map layout the JSON form uses.
pub fn parse_yaml(content: &str) -> Result<Node, serde_yaml::Error> {
    let value: serde_json::Value = serde_yaml::from_str(content)?;
    serde_json::from_value(value).map_err(serde::de::Error::custom)
}

/// Parses a TOML tree. The document root must be the `element` table.
pub fn parse_toml(content: &str) -> Result<Node, toml::de::Error> {
    toml::from_str(content)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::{Attribute, ChangeKind, Element};
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_json_element() {
        let json = r#"{"element": {
            "tag": "div",
            "attributes": [{"name": "class", "value": "a"}],
            "children": [{"text": "T"}, {"comment": "c"}]
        }}"#;
        let node = parse_json(json).unwrap();
        let element = node.as_element().unwrap();
        assert_eq!(element.tag, "div");
        assert_eq!(element.attributes, vec![Attribute::new("class", "a")]);
        assert_eq!(element.children, vec![Node::text("T"), Node::comment("c")]);
        assert_eq!(element.diff_mark, None);
    }

    #[test]
    fn test_parse_json_with_existing_mark() {
        let json = r#"{"element": {"tag": "p", "diff": "subtree-changed"}}"#;
        let node = parse_json(json).unwrap();
        assert_eq!(node.diff_mark(), Some(ChangeKind::SubtreeChanged));
    }

    #[test]
    fn test_parse_json_invalid() {
        assert!(parse_json("{invalid json}").is_err());
        assert!(parse_json(r#"{"paragraph": {}}"#).is_err());
    }

    #[test]
    fn test_parse_yaml_element() {
        let yaml = "element:\n  tag: ul\n  children:\n    - element:\n        tag: li\n        children:\n          - text: one\n";
        let node = parse_yaml(yaml).unwrap();
        let expected: Node = Element::new("ul")
            .with_child(Element::new("li").with_child(Node::text("one")))
            .into();
        assert_eq!(node, expected);
    }

    #[test]
    fn test_parse_yaml_with_attributes_and_comment() {
        let yaml = "element:\n  tag: p\n  attributes:\n    - name: class\n      value: lead\n  children:\n    - text: hi\n    - comment: ' c '\n";
        let node = parse_yaml(yaml).unwrap();
        let expected: Node = Element::new("p")
            .with_attr("class", "lead")
            .with_child(Node::text("hi"))
            .with_child(Node::comment(" c "))
            .into();
        assert_eq!(node, expected);
    }

    #[test]
    fn test_parse_yaml_unknown_kind() {
        assert!(parse_yaml("paragraph:\n  tag: p\n").is_err());
    }

    #[test]
    fn test_parse_toml_element() {
        let toml = "[element]\ntag = \"p\"\nchildren = [{ text = \"hi\" }]\n";
        let node = parse_toml(toml).unwrap();
        let expected: Node = Element::new("p").with_child(Node::text("hi")).into();
        assert_eq!(node, expected);
    }

    #[test]
    fn test_format_hint_from_extension() {
        assert_eq!(FormatHint::from_extension("JSON"), FormatHint::Json);
        assert_eq!(FormatHint::from_extension("yml"), FormatHint::Yaml);
        assert_eq!(FormatHint::from_extension("toml"), FormatHint::Toml);
        assert_eq!(FormatHint::from_extension("html"), FormatHint::Auto);
    }

    #[test]
    fn test_parse_file_unknown_extension_falls_back() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, r#"{{"text": "hello"}}"#).unwrap();
        let path = file.path().with_extension("tree");
        fs::copy(file.path(), &path).unwrap();

        let node = parse_file(&path).unwrap();
        assert_eq!(node, Node::text("hello"));

        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_parse_file_not_found() {
        let result = parse_file(Path::new("/nonexistent/base.json"));
        assert!(matches!(result, Err(ParseError::FileNotFound { .. })));
    }

    #[test]
    fn test_parse_content_unknown_format() {
        let result = parse_content("::: not a tree :::", FormatHint::Auto, "input");
        assert!(matches!(result, Err(ParseError::UnknownFormat { .. })));
    }
}
