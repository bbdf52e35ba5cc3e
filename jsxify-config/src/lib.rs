//! Shared configuration loader for jsxify.
//!
//! `defaults/jsxify.default.toml` is embedded into the binary so that docs and
//! runtime behavior stay in sync. Applications layer user-specific files on top
//! of those defaults via [`Loader`] before deserializing into [`JsxifyConfig`],
//! which then builds the library's [`Pipeline`].

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, File, FileFormat};
use jsxify::format::{Disabled, ProcessFormatter, SourceFormatter};
use jsxify::mapping::EventHandlerPolicy;
use jsxify::sanitize::{SanitizationRules, Sanitizer};
use jsxify::{Mode, Pipeline, RuleError, TranspileOptions};
use serde::Deserialize;
use std::path::Path;
use std::sync::Arc;

pub use config::ValueKind;

const DEFAULT_TOML: &str = include_str!("../defaults/jsxify.default.toml");

/// Top-level configuration consumed by jsxify applications.
#[derive(Debug, Clone, Deserialize)]
pub struct JsxifyConfig {
    pub sanitize: SanitizeConfig,
    pub transpile: TranspileConfig,
    pub formatter: FormatterConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SanitizeConfig {
    pub vendor_class_pattern: String,
    pub event_handlers: EventHandlerSetting,
    pub strip_script_urls: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EventHandlerSetting {
    Drop,
    Inert,
}

impl From<EventHandlerSetting> for EventHandlerPolicy {
    fn from(setting: EventHandlerSetting) -> Self {
        match setting {
            EventHandlerSetting::Drop => EventHandlerPolicy::Drop,
            EventHandlerSetting::Inert => EventHandlerPolicy::Inert,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct TranspileConfig {
    pub mode: Mode,
    pub component_name: String,
    pub indent_width: usize,
    #[serde(default)]
    pub strip_classes: Vec<String>,
}

/// External formatter settings.
#[derive(Debug, Clone, Deserialize)]
pub struct FormatterConfig {
    pub enabled: bool,
    pub command: String,
    #[serde(default)]
    pub args: Vec<String>,
}

impl JsxifyConfig {
    pub fn sanitization_rules(&self) -> Result<SanitizationRules, RuleError> {
        let rules = SanitizationRules::new()
            .with_vendor_pattern(&self.sanitize.vendor_class_pattern)?
            .with_event_handlers(self.sanitize.event_handlers.into())
            .with_script_urls_stripped(self.sanitize.strip_script_urls);
        Ok(rules)
    }

    pub fn transpile_options(&self) -> TranspileOptions {
        TranspileOptions {
            mode: self.transpile.mode,
            component_name: self.transpile.component_name.clone(),
            indent_width: self.transpile.indent_width,
            strip_classes: self.transpile.strip_classes.clone(),
            event_handlers: self.sanitize.event_handlers.into(),
            strip_script_urls: self.sanitize.strip_script_urls,
        }
    }

    pub fn source_formatter(&self) -> Arc<dyn SourceFormatter> {
        if self.formatter.enabled {
            Arc::new(ProcessFormatter::new(
                self.formatter.command.clone(),
                self.formatter.args.clone(),
            ))
        } else {
            Arc::new(Disabled)
        }
    }

    /// Build the pipeline these settings describe.
    pub fn pipeline(&self) -> Result<Pipeline, RuleError> {
        Ok(Pipeline::new()
            .with_sanitizer(Sanitizer::new(self.sanitization_rules()?))
            .with_options(self.transpile_options())
            .with_formatter(self.source_formatter()))
    }
}

/// Helper for layering user overrides over the built-in defaults.
#[derive(Debug, Clone)]
pub struct Loader {
    builder: ConfigBuilder<DefaultState>,
}

impl Loader {
    /// Start a loader seeded with the embedded defaults.
    pub fn new() -> Self {
        let builder = Config::builder().add_source(File::from_str(DEFAULT_TOML, FileFormat::Toml));
        Self { builder }
    }

    /// Layer a configuration file. Missing files trigger an error.
    pub fn with_file(mut self, path: impl AsRef<Path>) -> Self {
        let source = File::from(path.as_ref())
            .format(FileFormat::Toml)
            .required(true);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Layer an optional configuration file (ignored if the file is absent).
    pub fn with_optional_file(mut self, path: impl AsRef<Path>) -> Self {
        let source = File::from(path.as_ref())
            .format(FileFormat::Toml)
            .required(false);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Apply a single key/value override (useful for CLI flags).
    pub fn set_override<I>(mut self, key: &str, value: I) -> Result<Self, ConfigError>
    where
        I: Into<ValueKind>,
    {
        self.builder = self.builder.set_override(key, value)?;
        Ok(self)
    }

    /// Finalize the builder and deserialize the resulting configuration.
    pub fn build(self) -> Result<JsxifyConfig, ConfigError> {
        self.builder.build()?.try_deserialize()
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}

/// Convenience helper for callers that only need the defaults.
pub fn load_defaults() -> Result<JsxifyConfig, ConfigError> {
    Loader::new().build()
}
