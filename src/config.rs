//! Diff policy files.
//!
//! A policy file is a small TOML document that overrides the defaults of
//! [`DiffConfig`]:
//!
//! ```toml
//! # replaces the default ignore-list
//! ignored_attributes = ["data-parsoid-diff", "about"]
//! # added on top of whichever ignore-list is in effect
//! extra_ignored_attributes = ["data-mw-tracking"]
//! template_types = ["mw:Transclusion"]
//! template_about_prefix = "#mwt"
//! marker_type = "mw:DiffMarker"
//! ```

use crate::attributes::default_ignored_attributes;
use crate::classify::TemplatePolicy;
use crate::diff::DiffConfig;
use crate::error::{DomDiffError, ParseError};
use serde::Deserialize;
use std::collections::HashSet;
use std::fs;
use std::path::Path;

/// On-disk form of a diff policy. Every field is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PolicyFile {
    pub ignored_attributes: Option<Vec<String>>,
    pub extra_ignored_attributes: Vec<String>,
    pub template_types: Option<Vec<String>>,
    pub template_about_prefix: Option<String>,
    pub marker_type: Option<String>,
}

impl PolicyFile {
    /// Reads and parses a policy file.
    pub fn load(path: &Path) -> Result<Self, DomDiffError> {
        let display = path.to_string_lossy().to_string();
        if !path.exists() {
            return Err(ParseError::file_not_found(display).into());
        }
        let content =
            fs::read_to_string(path).map_err(|e| ParseError::read_error(display.clone(), e))?;
        Self::parse(&content).map_err(|e| ParseError::toml_error(display, e).into())
    }

    pub fn parse(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// Builds a [`DiffConfig`], falling back to defaults for missing fields.
    pub fn into_config(self) -> Result<DiffConfig, DomDiffError> {
        let mut ignored: HashSet<String> = match self.ignored_attributes {
            Some(names) => names.into_iter().collect(),
            None => default_ignored_attributes(),
        };
        ignored.extend(self.extra_ignored_attributes);

        if ignored.iter().any(|name| name.trim().is_empty()) {
            return Err(DomDiffError::config("ignored attribute names must not be empty"));
        }

        let mut template_policy = TemplatePolicy::default();
        if let Some(types) = self.template_types {
            if types.iter().any(|t| t.trim().is_empty()) {
                return Err(DomDiffError::config("template types must not be empty"));
            }
            template_policy.types = types;
        }
        if let Some(prefix) = self.template_about_prefix {
            template_policy.about_prefix = prefix;
        }

        let marker_type = match self.marker_type {
            Some(marker_type) if marker_type.trim().is_empty() => {
                return Err(DomDiffError::config("marker_type must not be empty"));
            }
            Some(marker_type) => marker_type,
            None => crate::classify::DEFAULT_MARKER_TYPE.to_string(),
        };

        Ok(DiffConfig::new(ignored, marker_type, template_policy))
    }
}
