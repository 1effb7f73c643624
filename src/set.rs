//! The ordered collection of matchers built from a spec list.

use std::fmt;
use std::str::FromStr;

use tracing::debug;

use crate::error::{OriginError, Result};
use crate::matcher::{Matcher, OriginMatcher};
use crate::parser::parse_single;

/// An immutable allow-list of origin matchers.
///
/// Matching is a logical OR over the members; the member order only
/// matters for reproducing the canonical spec string. A built set is
/// read-only and safe to share across threads without locking.
#[derive(Debug, Clone, Default)]
pub struct OriginSet {
    matchers: Vec<Matcher>,
}

impl OriginSet {
    /// Parse a comma-separated spec list.
    ///
    /// The empty string yields an empty set that matches nothing. Any
    /// invalid spec fails the whole parse; no partial set is built.
    pub fn parse(spec: &str) -> Result<Self> {
        if spec.is_empty() {
            return Ok(Self::default());
        }
        Self::from_specs(spec.split(','))
    }

    /// Build a set from pre-split specs.
    ///
    /// An empty sequence yields a never-matching set.
    pub fn from_specs<I, S>(specs: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let matchers = specs
            .into_iter()
            .map(|spec| parse_single(spec.as_ref()))
            .collect::<Result<Vec<_>>>()?;
        debug!(matchers = matchers.len(), "built origin allow-list");
        Ok(Self { matchers })
    }

    /// Tell whether `origin` is an allowed origin.
    ///
    /// `origin` is expected to be the value of the HTTP `Origin` header;
    /// malformed values simply do not match.
    pub fn matches(&self, origin: &str) -> bool {
        self.matchers.iter().any(|m| m.matches(origin))
    }

    /// Number of matchers in the set
    pub fn len(&self) -> usize {
        self.matchers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.matchers.is_empty()
    }
}

impl fmt::Display for OriginSet {
    /// Canonical comma-joined reconstruction of the spec list.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, matcher) in self.matchers.iter().enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }
            write!(f, "{matcher}")?;
        }
        Ok(())
    }
}

impl FromStr for OriginSet {
    type Err = OriginError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for OriginSet {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_str(self)
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for OriginSet {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        use serde::Deserialize as _;

        let spec = String::deserialize(deserializer)?;
        Self::parse(&spec).map_err(serde::de::Error::custom)
    }
}
