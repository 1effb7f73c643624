//! Wildcard-label grammar for hostname patterns.
//!
//! A spec host is a sequence of dot-separated DNS labels where at most one
//! label carries a `*` marker. Wildcards are only meaningful in the leading
//! labels: once a literal label is seen scanning left to right, no later
//! label may contain one, and the final label is always literal.

use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;

/// Base syntax for one label, with `*` admitted wherever an alphanumeric
/// character may appear. Alphanumerics and hyphens, not starting with a
/// hyphen.
static WILDCARD_LABEL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[a-zA-Z0-9*][-a-zA-Z0-9*]*[a-zA-Z0-9*]?$")
        .expect("WILDCARD_LABEL_RE: hardcoded regex is invalid")
});

/// A validated sequence of hostname labels.
///
/// Constructed once by [`HostLabels::parse`] during spec parsing and
/// immutable afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostLabels(Vec<String>);

impl HostLabels {
    /// Validate `hostname` against the wildcard-label grammar.
    ///
    /// Returns `None` when the hostname violates the grammar; the caller
    /// surfaces that as an invalid-host parse error.
    pub fn parse(hostname: &str) -> Option<Self> {
        let labels: Vec<&str> = hostname.split('.').collect();

        if labels.len() == 1 {
            // Disallow any "*" in a single-label host, which admits plain
            // names like "localhost". A bare "*" spec is the dedicated
            // wildcard matcher and never reaches this grammar.
            if labels[0].is_empty() || labels[0].contains('*') {
                return None;
            }
            return Some(Self(vec![labels[0].to_string()]));
        }

        let last = labels.len() - 1;
        let mut expect_no_more_star = false;
        // Iterate labels from left to right
        for (i, label) in labels.iter().enumerate() {
            let star_count = label.matches('*').count();
            if star_count > 0 && expect_no_more_star {
                return None;
            }
            if i == last {
                // The last label must have no stars
                if star_count > 0 {
                    return None;
                }
            } else if star_count > 1 {
                // Other labels can have at most 1 star
                return None;
            }
            // If this label has no star, then subsequent labels must
            // contain no star.
            if star_count == 0 {
                expect_no_more_star = true;
            }
            if !WILDCARD_LABEL_RE.is_match(label) {
                return None;
            }
        }

        Some(Self(labels.into_iter().map(String::from).collect()))
    }

    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    pub fn iter(&self) -> std::slice::Iter<'_, String> {
        self.0.iter()
    }
}

impl fmt::Display for HostLabels {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.join("."))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wildcard_label_regex_compiles() {
        // Forces Lazy evaluation; if the pattern is invalid, this panics
        // with the expect message rather than an opaque unwrap.
        assert!(WILDCARD_LABEL_RE.is_match("a*b"));
    }

    #[test]
    fn test_single_label() {
        let labels = HostLabels::parse("localhost").unwrap();
        assert_eq!(labels.as_slice(), ["localhost"]);
    }

    #[test]
    fn test_single_label_rejects_star() {
        assert!(HostLabels::parse("*").is_none());
        assert!(HostLabels::parse("local*").is_none());
    }

    #[test]
    fn test_rejects_empty() {
        assert!(HostLabels::parse("").is_none());
    }

    #[test]
    fn test_multi_label() {
        let labels = HostLabels::parse("a.example.com").unwrap();
        assert_eq!(labels.as_slice(), ["a", "example", "com"]);
    }

    #[test]
    fn test_leading_wildcard_label() {
        let labels = HostLabels::parse("*.example.com").unwrap();
        assert_eq!(labels.as_slice(), ["*", "example", "com"]);
    }

    #[test]
    fn test_wildcard_allowed_in_second_level() {
        // Single trailing literal label is enough.
        assert!(HostLabels::parse("*.localhost").is_some());
    }

    #[test]
    fn test_rejects_star_in_last_label() {
        assert!(HostLabels::parse("a.*").is_none());
        assert!(HostLabels::parse("*.*").is_none());
        assert!(HostLabels::parse("a.example.c*m").is_none());
    }

    #[test]
    fn test_rejects_star_after_literal_label() {
        assert!(HostLabels::parse("*.a.*.com").is_none());
        assert!(HostLabels::parse("a.*.example.com").is_none());
    }

    #[test]
    fn test_rejects_double_star_label() {
        assert!(HostLabels::parse("a**.example.com").is_none());
        assert!(HostLabels::parse("*a*.example.com").is_none());
    }

    #[test]
    fn test_consecutive_wildcard_labels() {
        let labels = HostLabels::parse("a*.*b.a*b.example.com").unwrap();
        assert_eq!(labels.as_slice(), ["a*", "*b", "a*b", "example", "com"]);
    }

    #[test]
    fn test_rejects_bad_label_syntax() {
        assert!(HostLabels::parse("-a.example.com").is_none());
        assert!(HostLabels::parse("a b.example.com").is_none());
        assert!(HostLabels::parse("a..example.com").is_none());
    }

    #[test]
    fn test_display_joins_labels() {
        let labels = HostLabels::parse("*.example.com").unwrap();
        assert_eq!(labels.to_string(), "*.example.com");
    }
}
