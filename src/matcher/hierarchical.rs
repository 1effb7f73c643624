use std::fmt;
use std::net::{Ipv4Addr, Ipv6Addr};

use once_cell::sync::Lazy;
use regex::Regex;
use url::{Host, Url};

use super::OriginMatcher;
use crate::error::{OriginError, Result};
use crate::grammar::HostLabels;
use crate::pattern;

/// Digit-shaped trailing component of a spec or origin, i.e. a written
/// port. Bracketed IPv6 literals end in `]`, so they never match.
static TRAILING_PORT_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r":(\d+)$").expect("TRAILING_PORT_RE: hardcoded regex is invalid")
});

/// Structured origin pattern: scheme, host shape, port.
///
/// This is the common case, covering every spec with an authority
/// component.
#[derive(Debug, Clone)]
pub struct HierarchicalMatcher {
    /// `None` means the spec carried no scheme: http and https both
    /// satisfy it.
    protocol: Option<String>,
    host: HostPattern,
    /// `None` means the default port for the candidate's scheme.
    port: Option<u16>,
}

/// Exactly one host representation per pattern.
#[derive(Debug, Clone)]
enum HostPattern {
    Ipv4(Ipv4Addr),
    Ipv6(Ipv6Addr),
    Labels { labels: HostLabels, pattern: Regex },
}

impl HierarchicalMatcher {
    /// Attempt to parse `spec` as a structured origin pattern.
    ///
    /// `Ok(None)` hands the spec to the next parse strategy. Grammar and
    /// port violations are terminal errors: the spec was clearly meant to
    /// be hierarchical and is broken, not opaque.
    pub(crate) fn parse(spec: &str) -> Result<Option<Self>> {
        // A bare host ("localhost"), a host:port ("localhost:3000", which
        // URL-parses as scheme "localhost" with an opaque body) and a
        // bracketed IPv6 literal only become URLs once a scheme is
        // prepended. The retry also decides protocol semantics: only a
        // spec that parsed on the first attempt pins its scheme.
        let (url, explicit_protocol) = match Url::parse(spec) {
            Ok(url) if !url.cannot_be_a_base() => (url, true),
            // A port failure on a spec that already carries a scheme and
            // authority cannot be repaired by the prefix retry; it would
            // re-parse the scheme as a hostname.
            Err(url::ParseError::InvalidPort) => {
                if TRAILING_PORT_RE.is_match(spec) {
                    return Err(OriginError::InvalidPort(spec.to_string()));
                }
                return Ok(None);
            }
            _ => match Url::parse(&format!("https://{spec}")) {
                Ok(url) => (url, false),
                Err(url::ParseError::InvalidPort) if TRAILING_PORT_RE.is_match(spec) => {
                    return Err(OriginError::InvalidPort(spec.to_string()));
                }
                Err(_) => return Ok(None),
            },
        };

        let protocol = explicit_protocol.then(|| url.scheme().to_string());
        let port = written_port(spec, &url);

        let host = match url.host() {
            Some(Host::Ipv4(addr)) => HostPattern::Ipv4(addr),
            Some(Host::Ipv6(addr)) => HostPattern::Ipv6(addr),
            Some(Host::Domain(domain)) if !domain.is_empty() => {
                let labels = HostLabels::parse(domain)
                    .ok_or_else(|| OriginError::InvalidHost(domain.to_string()))?;
                let pattern = pattern::compile_host_pattern(&labels)?;
                HostPattern::Labels { labels, pattern }
            }
            _ => return Err(OriginError::InvalidHost(spec.to_string())),
        };

        Ok(Some(Self {
            protocol,
            host,
            port,
        }))
    }

    fn match_scheme(&self, url: &Url) -> bool {
        match self.protocol.as_deref() {
            // An implicit protocol admits exactly http and https.
            None => matches!(url.scheme(), "http" | "https"),
            Some(protocol) => protocol == url.scheme(),
        }
    }

    fn match_host(&self, url: &Url) -> bool {
        match (&self.host, url.host()) {
            (HostPattern::Ipv4(expected), Some(Host::Ipv4(actual))) => *expected == actual,
            (HostPattern::Ipv6(expected), Some(Host::Ipv6(actual))) => *expected == actual,
            (HostPattern::Labels { pattern, .. }, Some(Host::Domain(domain))) => {
                !domain.is_empty() && pattern.is_match(domain)
            }
            // An IP literal never satisfies a label pattern and vice
            // versa, and the two IP families never match each other.
            _ => false,
        }
    }

    fn match_port(&self, url: &Url, origin: &str) -> bool {
        let candidate_port = written_port(origin, url);
        if self.is_default_port() && is_default_port(url.scheme(), candidate_port) {
            // An omitted port and an explicitly written default port are
            // equivalent on both sides.
            return true;
        }
        self.port == candidate_port
    }

    fn is_default_port(&self) -> bool {
        match self.port {
            None => true,
            Some(80) => self.protocol.as_deref() == Some("http"),
            Some(443) => self.protocol.as_deref() == Some("https"),
            Some(_) => false,
        }
    }
}

impl OriginMatcher for HierarchicalMatcher {
    fn matches(&self, origin: &str) -> bool {
        // Unparsable candidates never match; the caller always gets a
        // boolean for an arbitrary header value.
        let Ok(url) = Url::parse(origin) else {
            return false;
        };
        self.match_scheme(&url) && self.match_host(&url) && self.match_port(&url, origin)
    }
}

impl fmt::Display for HierarchicalMatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(protocol) = &self.protocol {
            write!(f, "{protocol}://")?;
        }
        match &self.host {
            HostPattern::Ipv4(addr) => write!(f, "{addr}")?,
            HostPattern::Ipv6(addr) => write!(f, "[{addr}]")?,
            HostPattern::Labels { labels, .. } => write!(f, "{labels}")?,
        }
        if let Some(port) = self.port {
            write!(f, ":{port}")?;
        }
        Ok(())
    }
}

/// The port as written in `text`.
///
/// The URL parser drops a written port that equals the scheme's default
/// (`https://x:443` parses with no port), but literal-port matching and
/// canonical reconstruction need the written value, so it is recovered
/// from the text when the tail of `text` is unambiguously the authority's
/// port.
fn written_port(text: &str, url: &Url) -> Option<u16> {
    if let Some(port) = url.port() {
        return Some(port);
    }
    if !matches!(url.path(), "" | "/") || url.query().is_some() || url.fragment().is_some() {
        return None;
    }
    let captures = TRAILING_PORT_RE.captures(text)?;
    captures[1].parse().ok()
}

/// Default-port equivalence for a candidate origin.
fn is_default_port(scheme: &str, port: Option<u16>) -> bool {
    match port {
        None => true,
        Some(80) => scheme == "http",
        Some(443) => scheme == "https",
        Some(_) => false,
    }
}
