//! Element tables: tag aliases and the void-element policy

use once_cell::sync::Lazy;
use std::borrow::Cow;
use std::collections::HashMap;

/// Presentational tags replaced by their semantic counterparts during sanitization.
///
/// `u` has no semantic equivalent in the target markup and becomes a plain `span`.
pub const TAG_ALIASES: &[(&str, &str)] = &[("b", "strong"), ("i", "em"), ("u", "span")];

/// Elements JSX requires to be self-closing.
const VOID_ELEMENTS: &[&str] = &[
    "img", "input", "br", "hr", "meta", "link", "source", "track", "area", "base", "col",
    "embed", "param", "wbr",
];

/// SVG elements with camelCase names. Every other tag is written in lowercase.
const SVG_CASED_TAGS: &[&str] = &[
    "altGlyph", "altGlyphDef", "altGlyphItem", "animateColor", "animateMotion",
    "animateTransform", "clipPath", "feBlend", "feColorMatrix", "feComponentTransfer",
    "feComposite", "feConvolveMatrix", "feDiffuseLighting", "feDisplacementMap",
    "feDistantLight", "feDropShadow", "feFlood", "feFuncA", "feFuncB", "feFuncG", "feFuncR",
    "feGaussianBlur", "feImage", "feMerge", "feMergeNode", "feMorphology", "feOffset",
    "fePointLight", "feSpecularLighting", "feSpotLight", "feTile", "feTurbulence",
    "foreignObject", "glyphRef", "linearGradient", "radialGradient", "textPath",
];

/// Elements that must always be written as an open/close pair, even when empty.
const NEVER_SELF_CLOSING: &[&str] = &["textarea"];

/// How an element's tags are written in JSX.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElementKind {
    /// `<img ... />`; any explicit closing tag is dropped.
    Void,
    /// `<textarea></textarea>`; a self-closed source tag is expanded.
    NeverSelfClosing,
    /// Anything else, written as found.
    Container,
}

static STANDARD: Lazy<ElementPolicy> = Lazy::new(|| {
    let kinds = VOID_ELEMENTS
        .iter()
        .map(|tag| (*tag, ElementKind::Void))
        .chain(
            NEVER_SELF_CLOSING
                .iter()
                .map(|tag| (*tag, ElementKind::NeverSelfClosing)),
        );
    ElementPolicy::new(kinds)
});

/// Tag name → [`ElementKind`] dispatch table.
#[derive(Debug, Clone, Default)]
pub struct ElementPolicy {
    kinds: HashMap<String, ElementKind>,
}

impl ElementPolicy {
    pub fn new<I, K>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, ElementKind)>,
        K: Into<String>,
    {
        let kinds = entries
            .into_iter()
            .map(|(tag, kind)| (tag.into().to_ascii_lowercase(), kind))
            .collect();
        ElementPolicy { kinds }
    }

    pub fn standard() -> &'static ElementPolicy {
        &STANDARD
    }

    pub fn kind_of(&self, tag: &str) -> ElementKind {
        self.kinds
            .get(tag.to_ascii_lowercase().as_str())
            .copied()
            .unwrap_or(ElementKind::Container)
    }

    pub fn is_void(&self, tag: &str) -> bool {
        self.kind_of(tag) == ElementKind::Void
    }

    /// Names of all void elements, sorted.
    pub fn void_elements(&self) -> Vec<&str> {
        let mut tags: Vec<&str> = self
            .kinds
            .iter()
            .filter(|(_, kind)| **kind == ElementKind::Void)
            .map(|(tag, _)| tag.as_str())
            .collect();
        tags.sort_unstable();
        tags
    }
}

/// Whether `tag` must be self-closing under the standard policy.
pub fn is_void_element(tag: &str) -> bool {
    ElementPolicy::standard().is_void(tag)
}

/// The spelling JSX expects for `tag`: lowercase, or the camelCase name of an SVG element.
///
/// A capitalized tag would be read as a component reference.
pub fn canonical_tag_name(tag: &str) -> Cow<'_, str> {
    if let Some(svg) = SVG_CASED_TAGS.iter().find(|svg| svg.eq_ignore_ascii_case(tag)) {
        return Cow::Borrowed(svg);
    }
    if tag.bytes().any(|b| b.is_ascii_uppercase()) {
        Cow::Owned(tag.to_ascii_lowercase())
    } else {
        Cow::Borrowed(tag)
    }
}

/// The alias a presentational tag is renamed to, if any.
pub fn tag_alias(tag: &str) -> Option<&'static str> {
    TAG_ALIASES
        .iter()
        .find(|(from, _)| from.eq_ignore_ascii_case(tag))
        .map(|(_, to)| *to)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_void_elements() {
        for tag in VOID_ELEMENTS {
            assert!(is_void_element(tag), "{tag} should be void");
        }
        assert!(is_void_element("IMG"));
        assert!(!is_void_element("div"));
        assert!(!is_void_element("textarea"));
    }

    #[test]
    fn test_textarea_never_self_closes() {
        let policy = ElementPolicy::standard();
        assert_eq!(policy.kind_of("textarea"), ElementKind::NeverSelfClosing);
        assert_eq!(policy.kind_of("TEXTAREA"), ElementKind::NeverSelfClosing);
    }

    #[test]
    fn test_void_element_listing() {
        let tags = ElementPolicy::standard().void_elements();
        assert_eq!(tags.len(), VOID_ELEMENTS.len());
        assert_eq!(tags.first(), Some(&"area"));
    }

    #[test]
    fn test_canonical_tag_name() {
        assert_eq!(canonical_tag_name("DIV"), "div");
        assert_eq!(canonical_tag_name("br"), "br");
        assert_eq!(canonical_tag_name("Custom-Element"), "custom-element");
        assert_eq!(canonical_tag_name("lineargradient"), "linearGradient");
        assert_eq!(canonical_tag_name("FOREIGNOBJECT"), "foreignObject");
        assert_eq!(canonical_tag_name("clipPath"), "clipPath");
    }

    #[test]
    fn test_tag_alias() {
        assert_eq!(tag_alias("b"), Some("strong"));
        assert_eq!(tag_alias("I"), Some("em"));
        assert_eq!(tag_alias("u"), Some("span"));
        assert_eq!(tag_alias("strong"), None);
    }
}
