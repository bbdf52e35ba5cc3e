//! Error types
//!
//! Sanitizing and transpiling are infallible: malformed input is recovered by the parser and
//! anything unmappable passes through. The only fallible steps are formatting (always
//! recoverable, see [`crate::format`]) and building a rule set from user configuration.

use thiserror::Error;

/// Why the formatter could not produce formatted source.
///
/// Callers are expected to keep the unformatted text and surface this as a warning.
#[derive(Debug, Error)]
pub enum FormatError {
    /// Formatting was turned off in configuration.
    #[error("formatting is disabled")]
    Disabled,

    /// The formatter program could not be located.
    #[error("formatter unavailable: {0}")]
    Unavailable(String),

    #[error("formatter i/o error: {0}")]
    Io(#[from] std::io::Error),

    /// The formatter ran and rejected the input (usually a parse error in the generated text).
    #[error("formatter exited with {status}: {stderr}")]
    Failed { status: String, stderr: String },

    #[error("formatter produced invalid output: {0}")]
    InvalidOutput(String),

    /// An empty result is treated as a failure so content is never dropped.
    #[error("formatter produced no output")]
    EmptyOutput,
}

/// Errors building a [`crate::sanitize::SanitizationRules`] from configuration.
#[derive(Debug, Error)]
pub enum RuleError {
    #[error("invalid vendor class pattern '{pattern}': {source}")]
    InvalidVendorPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },
}
