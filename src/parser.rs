//! Ordered parse strategies for a single origin spec.
//!
//! Specs are ambiguous without scheme context, so parsing is an explicit
//! ordered list of attempts: wildcard, then hierarchical, then opaque.
//! Each strategy returns `Ok(None)` to pass the spec to the next one;
//! errors are terminal for the whole spec.

use tracing::trace;

use crate::error::{OriginError, Result};
use crate::matcher::{HierarchicalMatcher, Matcher, OpaqueMatcher, WildcardMatcher};

type SpecParser = fn(&str) -> Result<Option<Matcher>>;

/// Parse attempts, first success wins.
const SPEC_PARSERS: &[SpecParser] = &[parse_wildcard, parse_hierarchical, parse_opaque];

fn parse_wildcard(spec: &str) -> Result<Option<Matcher>> {
    Ok(WildcardMatcher::parse(spec).map(Matcher::Wildcard))
}

fn parse_hierarchical(spec: &str) -> Result<Option<Matcher>> {
    Ok(HierarchicalMatcher::parse(spec)?.map(Matcher::Hierarchical))
}

fn parse_opaque(spec: &str) -> Result<Option<Matcher>> {
    Ok(OpaqueMatcher::parse(spec).map(Matcher::Opaque))
}

/// Parse one origin spec into a matcher.
pub(crate) fn parse_single(spec: &str) -> Result<Matcher> {
    for parse in SPEC_PARSERS {
        if let Some(matcher) = parse(spec)? {
            trace!(spec, canonical = %matcher, "parsed origin spec");
            return Ok(matcher);
        }
    }
    Err(OriginError::UnparsableSpec(spec.to_string()))
}

/// Parse a single spec and additionally require it to be strict: its
/// canonical re-serialization must reproduce the input byte-for-byte.
///
/// This catches specs carrying components the matcher ignores (a path,
/// query, fragment or userinfo) as well as non-canonical casing.
pub fn check_strict(spec: &str) -> Result<()> {
    let matcher = parse_single(spec)?;
    let canonical = matcher.to_string();
    if canonical != spec {
        return Err(OriginError::StrictMismatch {
            input: spec.to_string(),
            canonical,
        });
    }
    Ok(())
}
