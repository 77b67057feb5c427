use domdiff_rs::{DiffError, DomDiffError, OutputError, ParseError};

#[test]
fn test_parse_error_display() {
    let err = ParseError::file_not_found("base.json");
    assert_eq!(err.to_string(), "File not found: base.json");
}

#[test]
fn test_unknown_format_error() {
    let err = ParseError::unknown_format("/path/to/page.bin");
    assert!(err.to_string().contains("Could not detect document format"));
    assert!(err.to_string().contains("/path/to/page.bin"));
}

#[test]
fn test_output_error_display() {
    let err = OutputError::UnknownFormat {
        format: "xml".to_string(),
    };
    assert_eq!(err.to_string(), "Unknown output format: xml");
}

#[test]
fn test_diff_error_display() {
    let err = DiffError::IndexOutOfBounds { index: 4, len: 2 };
    assert_eq!(err.to_string(), "Sibling index 4 out of bounds for 2 siblings");
    assert!(DiffError::DetachedDeletion.to_string().contains("sibling list"));
}

#[test]
fn test_domdiff_error_from_parse_error() {
    let parse_err = ParseError::file_not_found("base.json");
    let err: DomDiffError = parse_err.into();
    assert!(matches!(err, DomDiffError::Parse(_)));
    assert_eq!(err.to_string(), "File not found: base.json");
}

#[test]
fn test_domdiff_error_from_diff_error() {
    let err: DomDiffError = DiffError::UnmarkableNode { kind: "comment" }.into();
    assert!(matches!(err, DomDiffError::Diff(_)));
}

#[test]
fn test_config_error() {
    let err = DomDiffError::ConfigError {
        message: "Invalid option".to_string(),
    };
    assert!(err.to_string().contains("Invalid configuration"));
}
