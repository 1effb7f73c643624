use thiserror::Error;

/// Origin matcher error types
#[derive(Error, Debug)]
pub enum OriginError {
    #[error("Invalid host: {0}")]
    InvalidHost(String),

    #[error("Invalid port: {0}")]
    InvalidPort(String),

    #[error("Unparsable origin spec: {0}")]
    UnparsableSpec(String),

    #[error("Spec is not strict: {input:?} re-serializes as {canonical:?}")]
    StrictMismatch { input: String, canonical: String },

    #[error("Regex error: {0}")]
    RegexError(#[from] regex::Error),
}

pub type Result<T> = std::result::Result<T, OriginError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_variants_are_matchable() {
        // Consumers should be able to programmatically match error sub-types
        // instead of parsing error message strings.
        let err = OriginError::InvalidHost("*.".to_string());
        assert!(matches!(err, OriginError::InvalidHost(_)));

        let err = OriginError::InvalidPort("example.com:99999".to_string());
        assert!(matches!(err, OriginError::InvalidPort(_)));
    }

    #[test]
    fn test_error_display_includes_payload() {
        let err = OriginError::UnparsableSpec("???".to_string());
        let display = format!("{}", err);
        assert!(display.contains("???"), "got: {}", display);
    }

    #[test]
    fn test_strict_mismatch_display_shows_both_forms() {
        let err = OriginError::StrictMismatch {
            input: "127.0.0.1/".to_string(),
            canonical: "127.0.0.1".to_string(),
        };
        let display = format!("{}", err);
        assert!(display.contains("127.0.0.1/"), "got: {}", display);
        assert!(display.contains("127.0.0.1"), "got: {}", display);
    }
}
