//! Ordered product tag list with comma-string parsing.
//!
//! Tags are edited as a single comma-separated string in the admin forms and
//! stored as an ordered array in the content store. Normalization happens in
//! exactly one place - here - so every write path shares the same contract.

use serde::{Deserialize, Serialize};

/// An ordered sequence of product tags.
///
/// Parsing trims whitespace around each tag but deliberately does not
/// deduplicate or reorder: the author's ordering is part of the data.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TagList(Vec<String>);

impl TagList {
    /// Parse a comma-separated tag string.
    ///
    /// `"a, b , c"` becomes `["a", "b", "c"]`. A blank input yields an empty
    /// list rather than a single empty tag.
    #[must_use]
    pub fn parse(input: &str) -> Self {
        if input.trim().is_empty() {
            return Self::default();
        }
        Self(input.split(',').map(|tag| tag.trim().to_string()).collect())
    }

    /// Whether the list holds no tags.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of tags.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Borrow the tags in insertion order.
    #[must_use]
    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    /// Join the tags back into the comma-separated form used by edit forms.
    #[must_use]
    pub fn to_comma_string(&self) -> String {
        self.0.join(", ")
    }
}

impl From<Vec<String>> for TagList {
    fn from(tags: Vec<String>) -> Self {
        Self(tags)
    }
}

impl std::fmt::Display for TagList {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_comma_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_trims_and_preserves_order() {
        let tags = TagList::parse("a, b , c");
        assert_eq!(tags.as_slice(), ["a", "b", "c"]);
    }

    #[test]
    fn test_parse_keeps_duplicates() {
        let tags = TagList::parse("sale, chair, sale");
        assert_eq!(tags.as_slice(), ["sale", "chair", "sale"]);
    }

    #[test]
    fn test_parse_blank_is_empty() {
        assert!(TagList::parse("").is_empty());
        assert!(TagList::parse("   ").is_empty());
    }

    #[test]
    fn test_comma_string_roundtrip() {
        let tags = TagList::parse("modern,wood , fabric");
        assert_eq!(tags.to_comma_string(), "modern, wood, fabric");
        assert_eq!(TagList::parse(&tags.to_comma_string()), tags);
    }

    #[test]
    fn test_serde_transparent_array() {
        let tags = TagList::parse("a, b");
        let json = serde_json::to_string(&tags).expect("serialize");
        assert_eq!(json, r#"["a","b"]"#);

        let back: TagList = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(back, tags);
    }
}
