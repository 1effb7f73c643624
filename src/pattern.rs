//! Regex synthesis for validated host label sequences.
//!
//! Each label becomes one fragment; fragments are joined with a literal
//! `\.` and the whole expression is anchored, so a wildcard can never
//! absorb a label boundary. Synthesis is deterministic: the same labels
//! always yield byte-identical pattern source.

use regex::Regex;

use crate::error::Result;
use crate::grammar::HostLabels;

/// First character of a generic label.
const LEADING: &str = "[a-zA-Z0-9]";
/// Interior run of a generic label.
const MIDDLE: &str = "[-a-zA-Z0-9]*";
/// Optional final character, so a label cannot end mid-hyphen run.
const TRAILING: &str = "[a-zA-Z0-9]?";

/// Convert one (possibly wildcard-bearing) label into a pattern fragment.
///
/// The label is assumed valid per the grammar, which guarantees at most
/// one `*`.
pub fn label_pattern_source(label: &str) -> String {
    let Some(i) = label.find('*') else {
        return regex::escape(label);
    };

    let prefix = &label[..i];
    let suffix = &label[i + 1..];
    if prefix.is_empty() {
        if suffix.is_empty() {
            // "*": any syntactically valid label
            return format!("{LEADING}{MIDDLE}{TRAILING}");
        }
        // "*a": the wildcard may expand to nothing or to a generic prefix
        return format!("({LEADING}{MIDDLE})?{}", regex::escape(suffix));
    }
    if suffix.is_empty() {
        // "a*"
        return format!("{}{MIDDLE}{TRAILING}", regex::escape(prefix));
    }
    // "a*b"
    format!(
        "{}{MIDDLE}{}",
        regex::escape(prefix),
        regex::escape(suffix)
    )
}

/// Join per-label fragments into a single anchored pattern source.
pub fn host_pattern_source(labels: &HostLabels) -> String {
    let sources: Vec<String> = labels.iter().map(|l| label_pattern_source(l)).collect();
    format!("^{}$", sources.join(r"\."))
}

/// Compile the synthesized pattern for `labels`.
pub(crate) fn compile_host_pattern(labels: &HostLabels) -> Result<Regex> {
    Ok(Regex::new(&host_pattern_source(labels))?)
}
