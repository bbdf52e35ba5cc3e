//! Markup sanitizer
//!
//!     Takes whatever landed on the clipboard and returns a small, safe HTML subset:
//!
//!     - Plain text becomes one `<p>` per non-blank line.
//!     - Markup is parsed with html5ever, then comments, scripts, styles, metadata and office
//!       namespace tags are removed, inline styles and vendor classes are stripped, `b`/`i`/`u`
//!       are renamed, and empty spans and paragraphs are pruned.
//!     - Empty results become a single `<p></p>`.
//!
//!     The output is a fixed point: `sanitize(sanitize(x)) == sanitize(x)`. Every rule only
//!     removes or renames, and the serialized tree is one html5ever parses back to itself.
//!
//!     Nothing here fails. Broken markup is whatever html5ever recovers it to.

pub mod plain_text;
pub mod rules;

mod dom;

pub use plain_text::{escape_html, looks_like_markup, paragraphs_from_text};
pub use rules::{SanitizationRules, TagAction, DEFAULT_VENDOR_CLASS_PATTERN};

use once_cell::sync::Lazy;
use regex::Regex;

/// Returned when nothing survives sanitization.
pub const EMPTY_PARAGRAPH: &str = "<p></p>";

static COMMENT: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?s)<!--.*?-->").expect("valid regex"));
/// Upper bound on clean cycles; recovery-built nesting flattens within a couple.
const MAX_PASSES: usize = 8;

static DEFAULT_SANITIZER: Lazy<Sanitizer> = Lazy::new(Sanitizer::default);

/// Sanitize with the default rule set.
pub fn sanitize(input: &str) -> String {
    DEFAULT_SANITIZER.sanitize(input)
}

/// A sanitizer bound to a rule set.
#[derive(Debug, Clone, Default)]
pub struct Sanitizer {
    rules: SanitizationRules,
}

impl Sanitizer {
    pub fn new(rules: SanitizationRules) -> Self {
        Sanitizer { rules }
    }

    pub fn rules(&self) -> &SanitizationRules {
        &self.rules
    }

    pub fn sanitize(&self, input: &str) -> String {
        if looks_like_markup(input) {
            return self.sanitize_markup(input);
        }
        let markup = paragraphs_from_text(input);
        if markup.is_empty() {
            return EMPTY_PARAGRAPH.to_string();
        }
        self.sanitize_markup(&markup)
    }

    /// Clean until the output parses back to itself.
    fn sanitize_markup(&self, markup: &str) -> String {
        let mut output = self.clean_pass(markup);
        for _ in 1..MAX_PASSES {
            let next = self.clean_pass(&output);
            if next == output {
                return output;
            }
            log::debug!("sanitize: output changed on re-parse, cleaning again");
            output = next;
        }
        log::warn!("sanitize: output still changing after {MAX_PASSES} passes");
        output
    }

    fn clean_pass(&self, markup: &str) -> String {
        let parsed = dom::parse(markup);
        let Some(body) = dom::find_body(&parsed.document) else {
            log::debug!("sanitize: no body in parsed markup");
            return EMPTY_PARAGRAPH.to_string();
        };
        dom::Cleaner::new(&self.rules).clean_children(&body);
        let top_level = dom::group_inline_runs(&body);
        let serialized = dom::serialize_nodes(&top_level);

        let serialized = COMMENT.replace_all(&serialized, "");
        let cleaned = serialized.trim();
        if cleaned.is_empty() {
            EMPTY_PARAGRAPH.to_string()
        } else {
            cleaned.to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mapping::EventHandlerPolicy;

    #[test]
    fn test_plain_text_wrapping() {
        assert_eq!(sanitize("Hello\n\nWorld"), "<p>Hello</p>\n<p>World</p>");
    }

    #[test]
    fn test_plain_text_is_escaped() {
        assert_eq!(
            sanitize("1 < 2 & 3 > 2"),
            "<p>1 &lt; 2 &amp; 3 &gt; 2</p>"
        );
    }

    #[test]
    fn test_empty_input_falls_back() {
        assert_eq!(sanitize(""), EMPTY_PARAGRAPH);
        assert_eq!(sanitize("   \n  "), EMPTY_PARAGRAPH);
        assert_eq!(sanitize("<p>&nbsp;</p>"), EMPTY_PARAGRAPH);
        assert_eq!(sanitize("<!-- only a comment -->"), EMPTY_PARAGRAPH);
    }

    #[test]
    fn test_office_paste() {
        let input = concat!(
            "<html xmlns:o=\"urn:schemas-microsoft-com:office:office\">",
            "<head><style>p.MsoNormal { margin: 0 }</style></head><body>",
            "<!--StartFragment-->",
            "<p class=\"MsoNormal\" style=\"margin:0\"><b>Title</b><o:p></o:p></p>",
            "<p class=\"MsoNormal\"><o:p>&nbsp;</o:p></p>",
            "<p class=\"MsoNormal lead\">Body <i>text</i> <u>under</u></p>",
            "<!--EndFragment--></body></html>"
        );
        assert_eq!(
            sanitize(input),
            "<p><strong>Title</strong></p>\n<p class=\"lead\">Body <em>text</em> <span>under</span></p>"
        );
    }

    #[test]
    fn test_scripts_and_handlers_are_removed() {
        let input = r#"<div onclick="steal()"><script>alert(1)</script><a href="javascript:alert(1)">x</a></div>"#;
        assert_eq!(sanitize(input), "<div><a>x</a></div>");
    }

    #[test]
    fn test_inert_event_handlers() {
        let sanitizer = Sanitizer::new(
            SanitizationRules::new().with_event_handlers(EventHandlerPolicy::Inert),
        );
        assert_eq!(
            sanitizer.sanitize(r#"<button onclick="go()">Go</button>"#),
            r#"<button data-onclick="go()">Go</button>"#
        );
    }

    #[test]
    fn test_class_like_text_is_kept() {
        assert_eq!(
            sanitize(r#"<p>write class="" here</p>"#),
            r#"<p>write class="" here</p>"#
        );
        assert_eq!(sanitize(r#"<p class="">x</p>"#), "<p>x</p>");
    }

    #[test]
    fn test_recovered_heading_nesting_settles() {
        assert_eq!(
            sanitize("<p><h1><em><h1></em>"),
            "<h1><em></em></h1>\n<h1><em></em></h1>"
        );
    }

    #[test]
    fn test_idempotent_on_samples() {
        let samples = [
            "Hello\n\nWorld",
            "it's \"quoted\" & <escaped>",
            "<p class=\"MsoNormal\">a<span></span></p><p>&nbsp;</p>",
            "<b><p>misnested</b> text</p>",
            "<table><tr><td><u>cell</u></td></tr></table>",
            "<svg viewBox=\"0 0 1 1\"><path d=\"M0\" stroke-width=\"2\"/></svg>",
            "<ul><li>one<li>two</ul>trailing",
            "<p><h1><em><h1></em>",
            "<h2><b><h2>x</b></h2>",
            "<pre>\n\nindented</pre>",
            "<textarea>\n\nnote</textarea>",
            "<listing>\n\ncode</listing>",
        ];
        for sample in samples {
            let once = sanitize(sample);
            assert_eq!(sanitize(&once), once, "not idempotent for {sample:?}");
        }
    }
}
