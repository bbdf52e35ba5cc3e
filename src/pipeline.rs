//! The pipeline shared by both call sites
//!
//!     One engine, parameterized by [`Mode`]:
//!
//!     | Call site        | Method                 | Sanitize | Mode     |
//!     |------------------|------------------------|----------|----------|
//!     | authoring editor | [`Pipeline::generate`] | yes      | document |
//!     | copy as code     | [`Pipeline::snippet`]  | no       | fragment |
//!
//!     Snippet input is markup already rendered by the application, so it is transpiled as is
//!     (inline styles included) with only the configured marker classes removed.
//!
//!     Sanitizing and transpiling are synchronous. Formatting is the one slow step; the
//!     [`session::GenerateSession`] runs it off the caller's thread and drops stale results.

pub mod session;

pub use session::GenerateSession;

use crate::format::{format_or_fallback, FormatOutcome, ProcessFormatter, SourceFormatter};
use crate::mapping::{AttributeMap, ElementPolicy};
use crate::sanitize::Sanitizer;
use crate::transpile::{Mode, TranspileOptions, Transpiler};
use serde::Serialize;
use std::sync::Arc;

/// Generated source plus the formatting signal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GenerateOutput {
    pub source: String,
    pub formatted: bool,
    pub warning: Option<String>,
}

impl From<FormatOutcome> for GenerateOutput {
    fn from(outcome: FormatOutcome) -> Self {
        GenerateOutput {
            source: outcome.text,
            formatted: outcome.formatted,
            warning: outcome.warning,
        }
    }
}

pub struct Pipeline {
    sanitizer: Sanitizer,
    options: TranspileOptions,
    attributes: &'static AttributeMap,
    elements: &'static ElementPolicy,
    formatter: Arc<dyn SourceFormatter>,
}

impl Pipeline {
    /// Default rules and options, formatting through Prettier.
    pub fn new() -> Self {
        Pipeline {
            sanitizer: Sanitizer::default(),
            options: TranspileOptions::default(),
            attributes: AttributeMap::standard(),
            elements: ElementPolicy::standard(),
            formatter: Arc::new(ProcessFormatter::prettier()),
        }
    }

    pub fn with_sanitizer(mut self, sanitizer: Sanitizer) -> Self {
        self.sanitizer = sanitizer;
        self
    }

    pub fn with_options(mut self, options: TranspileOptions) -> Self {
        self.options = options;
        self
    }

    pub fn with_formatter(mut self, formatter: Arc<dyn SourceFormatter>) -> Self {
        self.formatter = formatter;
        self
    }

    pub fn with_tables(
        mut self,
        attributes: &'static AttributeMap,
        elements: &'static ElementPolicy,
    ) -> Self {
        self.attributes = attributes;
        self.elements = elements;
        self
    }

    pub fn sanitizer(&self) -> &Sanitizer {
        &self.sanitizer
    }

    pub fn options(&self) -> &TranspileOptions {
        &self.options
    }

    pub fn formatter(&self) -> Arc<dyn SourceFormatter> {
        Arc::clone(&self.formatter)
    }

    pub fn sanitize(&self, input: &str) -> String {
        self.sanitizer.sanitize(input)
    }

    /// Transpile with the configured options, overriding the mode.
    pub fn transpile(&self, markup: &str, mode: Mode) -> String {
        let options = TranspileOptions {
            mode,
            ..self.options.clone()
        };
        Transpiler::with_tables(self.attributes, self.elements, &options).transpile(markup)
    }

    /// Everything up to formatting: the raw JSX for `input` in `mode`.
    ///
    /// Document mode sanitizes first; fragment mode transpiles the markup as given.
    pub fn prepare(&self, input: &str, mode: Mode) -> String {
        match mode {
            Mode::Document => self.transpile(&self.sanitize(input), Mode::Document),
            Mode::Fragment => self.transpile(input, Mode::Fragment),
        }
    }

    /// Run `input` through every stage in `mode`.
    pub fn run(&self, input: &str, mode: Mode) -> GenerateOutput {
        let source = self.prepare(input, mode);
        format_or_fallback(self.formatter.as_ref(), &source).into()
    }

    /// Run with the configured mode.
    pub fn process(&self, input: &str) -> GenerateOutput {
        self.run(input, self.options.mode)
    }

    /// Editor call site: raw paste or editor content → formatted component source.
    pub fn generate(&self, input: &str) -> GenerateOutput {
        self.run(input, Mode::Document)
    }

    /// Snippet call site: rendered markup → formatted JSX fragment.
    pub fn snippet(&self, markup: &str) -> GenerateOutput {
        self.run(markup, Mode::Fragment)
    }
}

impl Default for Pipeline {
    fn default() -> Self {
        Self::new()
    }
}
