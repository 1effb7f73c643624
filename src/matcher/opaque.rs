use std::fmt;

use url::Url;

use super::OriginMatcher;

/// Opaque matcher - exact string identity for specs whose URL form has an
/// opaque body (a scheme with no authority component, e.g. `myapp:home`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OpaqueMatcher {
    url: String,
}

impl OpaqueMatcher {
    pub(crate) fn parse(spec: &str) -> Option<Self> {
        let url = Url::parse(spec).ok()?;
        if url.cannot_be_a_base() && !url.path().is_empty() {
            return Some(Self {
                url: spec.to_string(),
            });
        }
        None
    }
}

impl OriginMatcher for OpaqueMatcher {
    fn matches(&self, origin: &str) -> bool {
        self.url == origin
    }
}

impl fmt::Display for OpaqueMatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.url)
    }
}
