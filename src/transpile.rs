//! Markup → JSX transpiler
//!
//!     Works on serialized markup, one token at a time (see [`tokens`]):
//!
//!     - tag names are lowercased (camelCase SVG elements keep their case);
//!     - start tags: attribute names go through the [`AttributeMap`], `style="..."` becomes
//!       `style={{ ... }}`, event handlers and script URLs follow the same policy as the
//!       sanitizer, void elements self-close, `<img>` always gets an `alt`;
//!     - end tags of void elements are dropped;
//!     - text has `{` and `}` escaped, comments become `{/* ... */}`.
//!
//!     Whatever cannot be parsed is written out as found. Nothing here fails.
//!
//!     The result is normalized to begin with an element, then returned bare
//!     ([`Mode::Fragment`]) or wrapped in a function component ([`Mode::Document`]).

pub mod tag;
pub mod template;
pub mod tokens;

use crate::mapping::{
    canonical_tag_name, is_event_handler, is_script_url, AttributeMap, ElementKind, ElementPolicy,
    EventHandlerPolicy,
};
use crate::style::style_to_object;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tag::{decode_entities, quote_attribute, StartTag};
pub use template::{component_identifier, wrap_document, DEFAULT_COMPONENT_NAME};
use tokens::{scan, Token};

/// Output shape of the transpiler.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// Bare JSX, for splicing into existing source.
    Fragment,
    /// A complete default-exported function component.
    #[default]
    Document,
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mode::Fragment => write!(f, "fragment"),
            Mode::Document => write!(f, "document"),
        }
    }
}

impl FromStr for Mode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "fragment" | "snippet" => Ok(Mode::Fragment),
            "document" | "editor" => Ok(Mode::Document),
            other => Err(format!("unknown mode '{other}' (expected fragment or document)")),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranspileOptions {
    pub mode: Mode,
    /// Function name in document mode; made into a PascalCase identifier.
    pub component_name: String,
    pub indent_width: usize,
    /// Class tokens removed in fragment mode (internal authoring hooks).
    pub strip_classes: Vec<String>,
    pub event_handlers: EventHandlerPolicy,
    pub strip_script_urls: bool,
}

impl Default for TranspileOptions {
    fn default() -> Self {
        TranspileOptions {
            mode: Mode::Document,
            component_name: DEFAULT_COMPONENT_NAME.to_string(),
            indent_width: 2,
            strip_classes: Vec::new(),
            event_handlers: EventHandlerPolicy::default(),
            strip_script_urls: true,
        }
    }
}

impl TranspileOptions {
    pub fn fragment() -> Self {
        TranspileOptions {
            mode: Mode::Fragment,
            ..Default::default()
        }
    }

    pub fn with_strip_classes<I, S>(mut self, classes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.strip_classes = classes.into_iter().map(Into::into).collect();
        self
    }
}

/// Transpile with the standard tables and default options for `mode`.
pub fn transpile(markup: &str, mode: Mode) -> String {
    let options = TranspileOptions {
        mode,
        ..Default::default()
    };
    Transpiler::new(&options).transpile(markup)
}

/// Transpiler bound to its lookup tables and options.
pub struct Transpiler<'a> {
    attributes: &'a AttributeMap,
    elements: &'a ElementPolicy,
    options: &'a TranspileOptions,
}

impl<'a> Transpiler<'a> {
    /// A transpiler using the standard attribute and element tables.
    pub fn new(options: &'a TranspileOptions) -> Self {
        Self::with_tables(AttributeMap::standard(), ElementPolicy::standard(), options)
    }

    pub fn with_tables(
        attributes: &'a AttributeMap,
        elements: &'a ElementPolicy,
        options: &'a TranspileOptions,
    ) -> Self {
        Transpiler {
            attributes,
            elements,
            options,
        }
    }

    pub fn options(&self) -> &TranspileOptions {
        self.options
    }

    pub fn transpile(&self, markup: &str) -> String {
        let fragment = normalize_root(&self.convert(markup));
        match self.options.mode {
            Mode::Fragment => fragment,
            Mode::Document => wrap_document(
                &fragment,
                &self.options.component_name,
                self.options.indent_width,
            ),
        }
    }

    /// Rewrite markup token by token, without root normalization or wrapping.
    pub fn convert(&self, markup: &str) -> String {
        let mut out = String::with_capacity(markup.len() + markup.len() / 4);
        for (token, slice) in scan(markup) {
            match token {
                Token::StartTag => match StartTag::parse(slice) {
                    Some(tag) => self.write_start_tag(&tag, &mut out),
                    None => {
                        log::debug!("transpile: passing through unparsed tag {slice:?}");
                        out.push_str(slice);
                    }
                },
                Token::EndTag => {
                    let name = end_tag_name(slice);
                    if self.elements.is_void(name) {
                        log::debug!("transpile: dropped closing tag of void <{name}>");
                    } else {
                        out.push_str("</");
                        out.push_str(&canonical_tag_name(name));
                        out.push('>');
                    }
                }
                Token::Text => escape_text(slice, &mut out),
                Token::StrayLt => out.push_str("&lt;"),
                Token::CommentOpen | Token::Declaration | Token::ProcessingInstruction => {
                    write_comment(comment_body(token, slice), &mut out)
                }
            }
        }
        out
    }

    fn write_start_tag(&self, tag: &StartTag<'_>, out: &mut String) {
        let tag_name = canonical_tag_name(tag.name);
        out.push('<');
        out.push_str(&tag_name);

        let mut has_alt = false;
        for attr in &tag.attributes {
            let lower = attr.name.to_ascii_lowercase();
            let mut name = self.attributes.map_name(attr.name).into_owned();
            let mut value = attr.value();

            if is_event_handler(&lower) {
                match self.options.event_handlers.rewrite(&lower) {
                    Some(inert) => name = inert,
                    None => {
                        log::debug!("transpile: dropped event handler {lower}");
                        continue;
                    }
                }
            } else if self.options.strip_script_urls
                && is_script_url(&lower, &decode_entities(value.unwrap_or_default()))
            {
                log::debug!("transpile: dropped script url in {lower}");
                continue;
            }

            let stripped;
            if lower == "class" && self.options.mode == Mode::Fragment {
                match self.strip_marker_classes(value.unwrap_or_default()) {
                    Some(classes) => {
                        stripped = classes;
                        value = Some(stripped.as_str());
                    }
                    None => continue,
                }
            }

            has_alt |= lower == "alt";
            out.push(' ');
            if lower == "style" {
                let css = decode_entities(value.unwrap_or_default());
                out.push_str(&format!("style={{{}}}", style_to_object(&css)));
                continue;
            }
            out.push_str(&name);
            if let Some(value) = value {
                out.push('=');
                out.push_str(&quote_attribute(value));
            }
        }

        if tag.name.eq_ignore_ascii_case("img") && !has_alt {
            out.push_str(" alt=\"\"");
        }

        match self.elements.kind_of(tag.name) {
            ElementKind::Void => out.push_str(" />"),
            ElementKind::NeverSelfClosing if tag.self_closing => {
                out.push_str("></");
                out.push_str(&tag_name);
                out.push('>');
            }
            _ if tag.self_closing => out.push_str(" />"),
            _ => out.push('>'),
        }
    }

    /// Class tokens minus the configured markers, or `None` if nothing is left.
    fn strip_marker_classes(&self, value: &str) -> Option<String> {
        let kept: Vec<&str> = value
            .split_whitespace()
            .filter(|token| !self.options.strip_classes.iter().any(|strip| strip == token))
            .collect();
        if kept.is_empty() {
            None
        } else {
            Some(kept.join(" "))
        }
    }
}

/// Wrap top-level text in a paragraph so the result starts with an element.
fn normalize_root(converted: &str) -> String {
    let trimmed = converted.trim();
    if trimmed.is_empty() {
        "<p></p>".to_string()
    } else if trimmed.starts_with('<') {
        trimmed.to_string()
    } else {
        format!("<p>{trimmed}</p>")
    }
}

fn end_tag_name(slice: &str) -> &str {
    let inner = slice.trim_start_matches("</").trim_end_matches('>');
    let end = inner
        .find(|c: char| c.is_whitespace() || c == '/')
        .unwrap_or(inner.len());
    &inner[..end]
}

fn escape_text(text: &str, out: &mut String) {
    for c in text.chars() {
        match c {
            '{' => out.push_str("{\"{\"}"),
            '}' => out.push_str("{\"}\"}"),
            '>' => out.push_str("&gt;"),
            c => out.push(c),
        }
    }
}

fn comment_body(token: Token, slice: &str) -> &str {
    match token {
        Token::CommentOpen => {
            let body = slice.trim_start_matches("<!--");
            body.strip_suffix("-->").unwrap_or(body)
        }
        Token::ProcessingInstruction => slice
            .trim_start_matches("<?")
            .trim_end_matches('>')
            .trim_end_matches('?'),
        _ => slice.trim_start_matches("<!").trim_end_matches('>'),
    }
}

fn write_comment(body: &str, out: &mut String) {
    let body = body.trim().replace("*/", "* /");
    if body.is_empty() {
        out.push_str("{/* */}");
    } else {
        out.push_str(&format!("{{/* {body} */}}"));
    }
}
