//! Attribute set comparison.
//!
//! Attributes written by other pipeline stages (change-tracking flags, prior
//! diff markers, grouping ids) are noise for diffing purposes, so they are
//! dropped before two attribute sets are compared.

use crate::tree::Attribute;
use std::collections::{BTreeMap, HashSet};

/// Attributes that never participate in equality by default.
pub const DEFAULT_IGNORED_ATTRIBUTES: &[&str] = &[
    "data-ve-changed",
    "data-parsoid-changed",
    "data-parsoid-diff",
    "about",
];

/// Returns the default ignore set as owned names.
pub fn default_ignored_attributes() -> HashSet<String> {
    DEFAULT_IGNORED_ATTRIBUTES
        .iter()
        .map(|name| name.to_string())
        .collect()
}

/// Non-ignored attributes keyed by name, plus how many there were.
///
/// The count is taken before de-duplication, so a repeated name makes the
/// set compare unequal to one without the repeat.
fn relevant_attributes<'a>(
    attributes: &'a [Attribute],
    ignored: &HashSet<String>,
) -> (BTreeMap<&'a str, &'a str>, usize) {
    let mut map = BTreeMap::new();
    let mut count = 0;
    for attr in attributes {
        if !ignored.contains(&attr.name) {
            count += 1;
            map.insert(attr.name.as_str(), attr.value.as_str());
        }
    }
    (map, count)
}

/// Compares two attribute lists, ignoring order and the names in `ignored`.
///
/// Values are compared exactly, with no case folding or whitespace cleanup.
pub fn attributes_equal(a: &[Attribute], b: &[Attribute], ignored: &HashSet<String>) -> bool {
    let (map_a, count_a) = relevant_attributes(a, ignored);
    let (map_b, count_b) = relevant_attributes(b, ignored);

    if count_a != count_b || map_a.len() != map_b.len() {
        return false;
    }

    // BTreeMap iterates in sorted key order.
    map_a.iter().zip(map_b.iter()).all(|(a, b)| a == b)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn attrs(pairs: &[(&str, &str)]) -> Vec<Attribute> {
        pairs
            .iter()
            .map(|(name, value)| Attribute::new(*name, *value))
            .collect()
    }

    #[test]
    fn test_empty_sets_equal() {
        assert!(attributes_equal(&[], &[], &default_ignored_attributes()));
    }

    #[test]
    fn test_order_does_not_matter() {
        let ignored = default_ignored_attributes();
        let a = attrs(&[("class", "x"), ("id", "y")]);
        let b = attrs(&[("id", "y"), ("class", "x")]);
        assert!(attributes_equal(&a, &b, &ignored));
    }

    #[test]
    fn test_values_are_case_sensitive() {
        let ignored = default_ignored_attributes();
        let a = attrs(&[("class", "Foo")]);
        let b = attrs(&[("class", "foo")]);
        assert!(!attributes_equal(&a, &b, &ignored));
    }

    #[test]
    fn test_ignored_attributes_are_skipped() {
        let ignored = default_ignored_attributes();
        let a = attrs(&[("class", "x"), ("about", "#mwt1")]);
        let b = attrs(&[("class", "x"), ("data-parsoid-diff", "{}")]);
        assert!(attributes_equal(&a, &b, &ignored));
    }

    #[test]
    fn test_different_names_same_count() {
        let ignored = default_ignored_attributes();
        let a = attrs(&[("class", "x")]);
        let b = attrs(&[("title", "x")]);
        assert!(!attributes_equal(&a, &b, &ignored));
    }

    #[test]
    fn test_duplicate_name_changes_count() {
        let ignored = HashSet::new();
        let a = attrs(&[("class", "x"), ("class", "x")]);
        let b = attrs(&[("class", "x")]);
        assert!(!attributes_equal(&a, &b, &ignored));
    }
}
