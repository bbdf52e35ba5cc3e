//! # jsxify
//!
//! Cleans pasted rich text into a small, safe subset of HTML and generates JSX source from it.
//!
//! Pipeline
//!
//!     raw input ─► sanitize ─► clean markup ─► transpile ─► raw JSX ─► format ─► source text
//!
//!     - [`sanitize`]: strips office-suite artifacts, comments, scripts and empty wrappers.
//!       Plain text is wrapped into paragraphs. Output re-sanitizes to itself.
//!     - [`transpile`]: rewrites attributes through the [`mapping`] tables, converts inline
//!       styles with [`style`], self-closes void elements and wraps the result in a component
//!       when asked to.
//!     - [`format`]: optional pretty printing through an external formatter. A failure here
//!       never loses the generated text.
//!
//!     The [`pipeline`] module wires the stages together for both call sites (the authoring
//!     surface and the "copy as code" snippet action) and [`authoring`] is the thin layer that
//!     keeps an editable surface in sync with it.
//!
//!     Nothing in here touches the shell, env vars or stdout; see the jsxify-cli crate for that.
//!
//! Static tables
//!
//!     Attribute names, tag aliases and the void element set are immutable tables built once.
//!     They are handed to the stages as references so tests can swap them out.

pub mod authoring;
pub mod error;
pub mod format;
pub mod mapping;
pub mod pipeline;
pub mod sanitize;
pub mod style;
pub mod transpile;

pub use error::{FormatError, RuleError};
pub use format::{FormatOutcome, SourceFormatter};
pub use pipeline::{GenerateOutput, Pipeline};
pub use sanitize::{sanitize, Sanitizer};
pub use transpile::{transpile, Mode, TranspileOptions, Transpiler};
