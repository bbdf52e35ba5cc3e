//! Source formatter adapter
//!
//!     Formatting is cosmetic. [`format_or_fallback`] always returns usable text: the
//!     formatted source on success, the unformatted source plus a warning otherwise.
//!
//!     Formatters implement [`SourceFormatter`]:
//!
//!     - [`ProcessFormatter`]: an external program over stdin/stdout (Prettier by default)
//!     - [`Disabled`]: always declines, for configurations with formatting turned off
//!
//!     Tests can plug in their own implementation to force either outcome.

pub mod prettier;

pub use prettier::ProcessFormatter;

use crate::error::FormatError;
use serde::Serialize;

/// Something that pretty-prints generated JSX.
pub trait SourceFormatter: Send + Sync {
    fn format(&self, source: &str) -> Result<String, FormatError>;
}

/// Formatter used when formatting is turned off.
#[derive(Debug, Clone, Copy, Default)]
pub struct Disabled;

impl SourceFormatter for Disabled {
    fn format(&self, _source: &str) -> Result<String, FormatError> {
        Err(FormatError::Disabled)
    }
}

/// Text handed back to the caller plus the formatting signal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FormatOutcome {
    pub text: String,
    pub formatted: bool,
    /// Set when formatting failed; meant for a non-blocking warning.
    pub warning: Option<String>,
}

impl FormatOutcome {
    pub fn formatted(text: String) -> Self {
        FormatOutcome {
            text,
            formatted: true,
            warning: None,
        }
    }

    pub fn unformatted(text: String, warning: Option<String>) -> Self {
        FormatOutcome {
            text,
            formatted: false,
            warning,
        }
    }
}

/// Format `source`, falling back to it unchanged when the formatter fails.
///
/// A disabled formatter is not a failure and produces no warning.
pub fn format_or_fallback(formatter: &dyn SourceFormatter, source: &str) -> FormatOutcome {
    match formatter.format(source) {
        Ok(text) => FormatOutcome::formatted(text),
        Err(FormatError::Disabled) => FormatOutcome::unformatted(source.to_string(), None),
        Err(err) => {
            log::warn!("formatting failed, returning unformatted source: {err}");
            FormatOutcome::unformatted(source.to_string(), Some(err.to_string()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Upper;

    impl SourceFormatter for Upper {
        fn format(&self, source: &str) -> Result<String, FormatError> {
            Ok(source.to_uppercase())
        }
    }

    struct Broken;

    impl SourceFormatter for Broken {
        fn format(&self, _source: &str) -> Result<String, FormatError> {
            Err(FormatError::Failed {
                status: "exit status: 2".to_string(),
                stderr: "SyntaxError: Unexpected token".to_string(),
            })
        }
    }

    #[test]
    fn test_success() {
        let outcome = format_or_fallback(&Upper, "<p />");
        assert_eq!(outcome, FormatOutcome::formatted("<P />".to_string()));
    }

    #[test]
    fn test_failure_keeps_source() {
        let outcome = format_or_fallback(&Broken, "<p />");
        assert_eq!(outcome.text, "<p />");
        assert!(!outcome.formatted);
        assert_eq!(
            outcome.warning.as_deref(),
            Some("formatter exited with exit status: 2: SyntaxError: Unexpected token")
        );
    }

    #[test]
    fn test_disabled_is_silent() {
        let outcome = format_or_fallback(&Disabled, "<p />");
        assert_eq!(outcome, FormatOutcome::unformatted("<p />".to_string(), None));
    }
}
