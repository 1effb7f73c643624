mod hierarchical;
mod opaque;
mod wildcard;

pub use hierarchical::HierarchicalMatcher;
pub use opaque::OpaqueMatcher;
pub use wildcard::WildcardMatcher;

use std::fmt;

/// Trait for origin matchers.
///
/// `Display` is the canonical re-serialization of the spec the matcher was
/// built from.
pub trait OriginMatcher: fmt::Display {
    /// Check if the candidate origin matches this matcher
    fn matches(&self, origin: &str) -> bool;
}

/// Enum wrapper for all matcher variants
#[derive(Debug, Clone)]
pub enum Matcher {
    Wildcard(WildcardMatcher),
    Hierarchical(HierarchicalMatcher),
    Opaque(OpaqueMatcher),
}

impl OriginMatcher for Matcher {
    fn matches(&self, origin: &str) -> bool {
        match self {
            Matcher::Wildcard(m) => m.matches(origin),
            Matcher::Hierarchical(m) => m.matches(origin),
            Matcher::Opaque(m) => m.matches(origin),
        }
    }
}

impl fmt::Display for Matcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Matcher::Wildcard(m) => m.fmt(f),
            Matcher::Hierarchical(m) => m.fmt(f),
            Matcher::Opaque(m) => m.fmt(f),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_enum_dispatch() {
        let wildcard = Matcher::Wildcard(WildcardMatcher);
        assert!(wildcard.matches("http://anything.example"));
        assert_eq!(wildcard.to_string(), "*");

        let opaque = Matcher::Opaque(OpaqueMatcher::parse("myapp:home").unwrap());
        assert!(opaque.matches("myapp:home"));
        assert!(!opaque.matches("http://anything.example"));
        assert_eq!(opaque.to_string(), "myapp:home");
    }
}
