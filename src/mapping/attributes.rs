//! HTML / SVG attribute name → JSX prop name

use crate::mapping::camel_case;
use once_cell::sync::Lazy;
use std::borrow::Cow;
use std::collections::HashMap;

/// HTML attributes whose JSX spelling differs.
const HTML_ATTRIBUTES: &[(&str, &str)] = &[
    ("class", "className"),
    ("for", "htmlFor"),
    ("tabindex", "tabIndex"),
    ("readonly", "readOnly"),
    ("maxlength", "maxLength"),
    ("minlength", "minLength"),
    ("novalidate", "noValidate"),
    ("autoplay", "autoPlay"),
    ("playsinline", "playsInline"),
    ("srcset", "srcSet"),
    ("crossorigin", "crossOrigin"),
    ("contenteditable", "contentEditable"),
    ("accept-charset", "acceptCharset"),
    ("accesskey", "accessKey"),
    ("allowfullscreen", "allowFullScreen"),
    ("autocomplete", "autoComplete"),
    ("autofocus", "autoFocus"),
    ("cellpadding", "cellPadding"),
    ("cellspacing", "cellSpacing"),
    ("charset", "charSet"),
    ("colspan", "colSpan"),
    ("rowspan", "rowSpan"),
    ("datetime", "dateTime"),
    ("enctype", "encType"),
    ("enterkeyhint", "enterKeyHint"),
    ("formaction", "formAction"),
    ("formenctype", "formEncType"),
    ("formmethod", "formMethod"),
    ("formnovalidate", "formNoValidate"),
    ("formtarget", "formTarget"),
    ("frameborder", "frameBorder"),
    ("hreflang", "hrefLang"),
    ("http-equiv", "httpEquiv"),
    ("inputmode", "inputMode"),
    ("itemprop", "itemProp"),
    ("itemscope", "itemScope"),
    ("itemtype", "itemType"),
    ("marginheight", "marginHeight"),
    ("marginwidth", "marginWidth"),
    ("nomodule", "noModule"),
    ("referrerpolicy", "referrerPolicy"),
    ("spellcheck", "spellCheck"),
    ("srcdoc", "srcDoc"),
    ("srclang", "srcLang"),
    ("usemap", "useMap"),
];

/// SVG presentation attributes written in kebab-case; the JSX name is their camelCase form.
const SVG_KEBAB_ATTRIBUTES: &[&str] = &[
    "alignment-baseline",
    "baseline-shift",
    "clip-path",
    "clip-rule",
    "color-interpolation",
    "color-interpolation-filters",
    "dominant-baseline",
    "fill-opacity",
    "fill-rule",
    "flood-color",
    "flood-opacity",
    "font-family",
    "font-size",
    "font-size-adjust",
    "font-stretch",
    "font-style",
    "font-variant",
    "font-weight",
    "image-rendering",
    "letter-spacing",
    "lighting-color",
    "marker-end",
    "marker-mid",
    "marker-start",
    "paint-order",
    "pointer-events",
    "shape-rendering",
    "stop-color",
    "stop-opacity",
    "stroke-dasharray",
    "stroke-dashoffset",
    "stroke-linecap",
    "stroke-linejoin",
    "stroke-miterlimit",
    "stroke-opacity",
    "stroke-width",
    "text-anchor",
    "text-decoration",
    "text-rendering",
    "unicode-bidi",
    "vector-effect",
    "word-spacing",
    "writing-mode",
];

/// SVG attributes that are camelCase in the DOM but arrive lowercased from HTML paste,
/// plus the namespaced xlink/xml forms.
const SVG_CASED_ATTRIBUTES: &[(&str, &str)] = &[
    ("viewbox", "viewBox"),
    ("preserveaspectratio", "preserveAspectRatio"),
    ("gradientunits", "gradientUnits"),
    ("gradienttransform", "gradientTransform"),
    ("patternunits", "patternUnits"),
    ("patterncontentunits", "patternContentUnits"),
    ("patterntransform", "patternTransform"),
    ("clippathunits", "clipPathUnits"),
    ("maskunits", "maskUnits"),
    ("maskcontentunits", "maskContentUnits"),
    ("markerwidth", "markerWidth"),
    ("markerheight", "markerHeight"),
    ("markerunits", "markerUnits"),
    ("refx", "refX"),
    ("refy", "refY"),
    ("stddeviation", "stdDeviation"),
    ("textlength", "textLength"),
    ("lengthadjust", "lengthAdjust"),
    ("startoffset", "startOffset"),
    ("spreadmethod", "spreadMethod"),
    ("pathlength", "pathLength"),
    ("xlink:href", "xlinkHref"),
    ("xml:lang", "xmlLang"),
    ("xml:space", "xmlSpace"),
    ("xmlns:xlink", "xmlnsXlink"),
];

static STANDARD: Lazy<AttributeMap> = Lazy::new(|| {
    let svg = SVG_KEBAB_ATTRIBUTES
        .iter()
        .map(|name| (name.to_string(), camel_case(name)));
    let fixed = HTML_ATTRIBUTES
        .iter()
        .chain(SVG_CASED_ATTRIBUTES)
        .map(|(from, to)| (from.to_string(), to.to_string()));
    AttributeMap::new(fixed.chain(svg))
});

/// Case-insensitive attribute rename table.
#[derive(Debug, Clone, Default)]
pub struct AttributeMap {
    names: HashMap<String, String>,
}

impl AttributeMap {
    /// Build a table from `(html name, jsx name)` pairs. Keys are lowercased.
    pub fn new<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let names = entries
            .into_iter()
            .map(|(from, to)| (from.into().to_ascii_lowercase(), to.into()))
            .collect();
        AttributeMap { names }
    }

    /// The HTML + SVG table used by default.
    pub fn standard() -> &'static AttributeMap {
        &STANDARD
    }

    /// Map an attribute name to its JSX prop name; unknown names pass through unchanged.
    pub fn map_name<'a>(&self, name: &'a str) -> Cow<'a, str> {
        match self.names.get(name.to_ascii_lowercase().as_str()) {
            Some(mapped) => Cow::Owned(mapped.clone()),
            None => Cow::Borrowed(name),
        }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.contains_key(name.to_ascii_lowercase().as_str())
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

/// Map an attribute name through the standard table.
pub fn map_attribute_name(name: &str) -> Cow<'_, str> {
    AttributeMap::standard().map_name(name)
}

/// Inline event handlers (`onclick`, `onMouseOver`, ...). These are never emitted as live props.
pub fn is_event_handler(name: &str) -> bool {
    let bytes = name.as_bytes();
    bytes.len() > 2
        && bytes[..2].eq_ignore_ascii_case(b"on")
        && bytes[2..].iter().all(|b| b.is_ascii_alphabetic())
}

/// What to do with inline event handler attributes.
///
/// Handlers never survive as live props; the only choice is whether a trace is kept.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum EventHandlerPolicy {
    /// Remove the attribute.
    #[default]
    Drop,
    /// Keep it as an inert `data-` attribute, e.g. `onclick` → `data-onclick`.
    Inert,
}

impl EventHandlerPolicy {
    /// The attribute name to emit for an event handler, or `None` to drop it.
    pub fn rewrite(self, name: &str) -> Option<String> {
        match self {
            EventHandlerPolicy::Drop => None,
            EventHandlerPolicy::Inert => Some(format!("data-{}", name.to_ascii_lowercase())),
        }
    }
}

/// Attributes holding a URL that a browser would navigate to or load.
const URL_ATTRIBUTES: &[&str] = &["href", "src", "action", "formaction", "xlink:href"];

/// True for a URL attribute whose value is a `javascript:` URL.
pub fn is_script_url(name: &str, value: &str) -> bool {
    if !URL_ATTRIBUTES.iter().any(|attr| attr.eq_ignore_ascii_case(name)) {
        return false;
    }
    let compact: String = value
        .chars()
        .filter(|c| !c.is_whitespace() && !c.is_control())
        .take("javascript:".len())
        .collect();
    compact.eq_ignore_ascii_case("javascript:")
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("class", "className")]
    #[case("for", "htmlFor")]
    #[case("tabindex", "tabIndex")]
    #[case("readonly", "readOnly")]
    #[case("maxlength", "maxLength")]
    #[case("novalidate", "noValidate")]
    #[case("autoplay", "autoPlay")]
    #[case("playsinline", "playsInline")]
    #[case("srcset", "srcSet")]
    #[case("crossorigin", "crossOrigin")]
    #[case("contenteditable", "contentEditable")]
    #[case("stroke-width", "strokeWidth")]
    #[case("stroke-linecap", "strokeLinecap")]
    #[case("stroke-linejoin", "strokeLinejoin")]
    #[case("fill-rule", "fillRule")]
    #[case("clip-rule", "clipRule")]
    #[case("viewbox", "viewBox")]
    #[case("stop-color", "stopColor")]
    #[case("stop-opacity", "stopOpacity")]
    #[case("stroke-opacity", "strokeOpacity")]
    #[case("fill-opacity", "fillOpacity")]
    fn test_known_names(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(map_attribute_name(input), expected);
    }

    #[rstest]
    #[case("CLASS", "className")]
    #[case("TabIndex", "tabIndex")]
    #[case("viewBox", "viewBox")]
    fn test_lookup_ignores_case(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(map_attribute_name(input), expected);
    }

    #[rstest]
    #[case("href")]
    #[case("data-id")]
    #[case("aria-label")]
    #[case("x-custom-thing")]
    fn test_unknown_names_pass_through(#[case] input: &str) {
        let mapped = map_attribute_name(input);
        assert_eq!(mapped, input);
        assert!(matches!(mapped, Cow::Borrowed(_)));
    }

    #[test]
    fn test_mapping_is_deterministic() {
        for (from, _) in HTML_ATTRIBUTES.iter().chain(SVG_CASED_ATTRIBUTES) {
            assert_eq!(map_attribute_name(from), map_attribute_name(from));
        }
        for name in SVG_KEBAB_ATTRIBUTES {
            let mapped = map_attribute_name(name);
            assert!(!mapped.contains('-'), "{name} mapped to {mapped}");
        }
    }

    #[test]
    fn test_custom_table() {
        let map = AttributeMap::new([("Foo", "fooBar")]);
        assert_eq!(map.map_name("foo"), "fooBar");
        assert_eq!(map.map_name("class"), "class");
        assert_eq!(map.len(), 1);
    }

    #[rstest]
    #[case("onclick", true)]
    #[case("onMouseOver", true)]
    #[case("ONLOAD", true)]
    #[case("on", false)]
    #[case("one-time", false)]
    #[case("content", false)]
    fn test_event_handlers(#[case] name: &str, #[case] expected: bool) {
        assert_eq!(is_event_handler(name), expected);
    }

    #[test]
    fn test_event_handler_policy() {
        assert_eq!(EventHandlerPolicy::Drop.rewrite("onclick"), None);
        assert_eq!(
            EventHandlerPolicy::Inert.rewrite("onClick"),
            Some("data-onclick".to_string())
        );
        assert_eq!(EventHandlerPolicy::default(), EventHandlerPolicy::Drop);
    }

    #[rstest]
    #[case("href", "javascript:alert(1)", true)]
    #[case("HREF", "  JavaScript:void(0)", true)]
    #[case("src", "java\tscript:x", true)]
    #[case("href", "https://example.com", false)]
    #[case("title", "javascript:alert(1)", false)]
    fn test_script_urls(#[case] name: &str, #[case] value: &str, #[case] expected: bool) {
        assert_eq!(is_script_url(name, value), expected);
    }
}
