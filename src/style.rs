//! Inline style string → JSX style object
//!
//!     `style="color: red; margin-top: 4px"` becomes `{ color: "red", marginTop: "4px" }`,
//!     which the transpiler embeds as `style={{ ... }}`.
//!
//!     Declarations keep their source order. Values are emitted as bare numbers only when they
//!     are plain numerals; anything with a unit, letter or percent sign stays a string.

use crate::mapping::camel_case;
use std::fmt::Write;

/// One `property: value` pair, with the property already in camelCase.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StyleDeclaration {
    pub property: String,
    pub value: String,
}

impl StyleDeclaration {
    /// True when the value can be written as a numeric literal.
    pub fn is_numeric(&self) -> bool {
        is_bare_number(&self.value)
    }
}

/// Ordered declarations parsed from one style attribute.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StyleDeclarations(Vec<StyleDeclaration>);

impl StyleDeclarations {
    pub fn iter(&self) -> std::slice::Iter<'_, StyleDeclaration> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn properties(&self) -> Vec<&str> {
        self.0.iter().map(|decl| decl.property.as_str()).collect()
    }

    pub fn render(&self) -> String {
        render(self)
    }
}

impl<'a> IntoIterator for &'a StyleDeclarations {
    type Item = &'a StyleDeclaration;
    type IntoIter = std::slice::Iter<'a, StyleDeclaration>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Parse a semicolon-delimited style string.
///
/// Empty fragments and pairs with an empty side are dropped. `;` inside parentheses or quotes
/// (`url(data:...;base64,...)`) does not split. `!important` is dropped since inline style
/// objects cannot express it.
pub fn parse_style(css: &str) -> StyleDeclarations {
    let declarations = split_declarations(css)
        .into_iter()
        .filter_map(|fragment| {
            let (property, value) = fragment.split_once(':')?;
            let property = property.trim();
            let value = strip_important(value.trim());
            if property.is_empty() || value.is_empty() {
                return None;
            }
            Some(StyleDeclaration {
                property: property_name(property),
                value: value.to_string(),
            })
        })
        .collect();
    StyleDeclarations(declarations)
}

/// Render declarations as an object literal body: `{ color: "red", opacity: 0.5 }`.
pub fn render(declarations: &StyleDeclarations) -> String {
    if declarations.is_empty() {
        return "{}".to_string();
    }
    let mut out = String::from("{ ");
    for (index, decl) in declarations.iter().enumerate() {
        if index > 0 {
            out.push_str(", ");
        }
        if is_identifier(&decl.property) {
            out.push_str(&decl.property);
        } else {
            out.push_str(&quote(&decl.property));
        }
        out.push_str(": ");
        if decl.is_numeric() {
            out.push_str(&decl.value);
        } else {
            out.push_str(&quote(&decl.value));
        }
    }
    out.push_str(" }");
    out
}

/// `parse_style` followed by `render`.
pub fn style_to_object(css: &str) -> String {
    render(&parse_style(css))
}

fn split_declarations(css: &str) -> Vec<&str> {
    let mut fragments = Vec::new();
    let mut depth = 0usize;
    let mut quote: Option<char> = None;
    let mut start = 0;
    for (index, c) in css.char_indices() {
        match (quote, c) {
            (Some(open), c) if c == open => quote = None,
            (Some(_), _) => {}
            (None, '"' | '\'') => quote = Some(c),
            (None, '(') => depth += 1,
            (None, ')') => depth = depth.saturating_sub(1),
            (None, ';') if depth == 0 => {
                fragments.push(&css[start..index]);
                start = index + 1;
            }
            _ => {}
        }
    }
    fragments.push(&css[start..]);
    fragments
        .into_iter()
        .map(str::trim)
        .filter(|fragment| !fragment.is_empty())
        .collect()
}

fn strip_important(value: &str) -> &str {
    let lower = value.to_ascii_lowercase();
    match lower.rfind("!important") {
        Some(at) if lower[at..].trim_end() == "!important" => value[..at].trim_end(),
        _ => value,
    }
}

fn property_name(property: &str) -> String {
    // Custom properties are case-sensitive and keep their dashes.
    if property.starts_with("--") {
        return property.to_string();
    }
    camel_case(&property.to_ascii_lowercase())
}

fn is_bare_number(value: &str) -> bool {
    value
        .chars()
        .all(|c| c.is_ascii_digit() || matches!(c, '.' | '-' | '+'))
        && value.chars().any(|c| c.is_ascii_digit())
        && value.parse::<f64>().is_ok()
}

fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) if first.is_ascii_alphabetic() || first == '_' || first == '$' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$')
}

fn quote(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    out.push('"');
    for c in value.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if c.is_control() => {
                let _ = write!(out, "\\u{{{:x}}}", c as u32);
            }
            c => out.push(c),
        }
    }
    out.push('"');
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn test_two_declarations() {
        let parsed = parse_style("color: red; margin-top: 4px");
        assert_eq!(parsed.len(), 2);
        assert_eq!(parsed.properties(), vec!["color", "marginTop"]);
        assert!(!parsed.iter().any(StyleDeclaration::is_numeric));
        insta::assert_snapshot!(parsed.render(), @r#"{ color: "red", marginTop: "4px" }"#);
    }

    #[test]
    fn test_order_is_preserved() {
        let parsed = parse_style("margin: 0; margin-left: 4px; margin: 2px");
        assert_eq!(parsed.properties(), vec!["margin", "marginLeft", "margin"]);
    }

    #[rstest]
    #[case("")]
    #[case(";;")]
    #[case("  ;  ; ")]
    #[case("color:")]
    #[case(": red")]
    #[case("no-colon-here")]
    fn test_degenerate_input_is_empty(#[case] css: &str) {
        let parsed = parse_style(css);
        assert!(parsed.is_empty());
        assert_eq!(render(&parsed), "{}");
    }

    #[rstest]
    #[case("opacity: 0.5", "{ opacity: 0.5 }")]
    #[case("z-index: 10", "{ zIndex: 10 }")]
    #[case("margin-left: -2", "{ marginLeft: -2 }")]
    #[case("width: 100%", r#"{ width: "100%" }"#)]
    #[case("line-height: 1.5em", r#"{ lineHeight: "1.5em" }"#)]
    #[case("flex: 1e3", r#"{ flex: "1e3" }"#)]
    #[case("margin: -", r#"{ margin: "-" }"#)]
    fn test_numeric_detection(#[case] css: &str, #[case] expected: &str) {
        assert_eq!(style_to_object(css), expected);
    }

    #[test]
    fn test_splits_on_first_colon_only() {
        let parsed = parse_style("background: url(http://example.com/a.png)");
        let decl = parsed.iter().next().unwrap();
        assert_eq!(decl.property, "background");
        assert_eq!(decl.value, "url(http://example.com/a.png)");
    }

    #[test]
    fn test_semicolon_inside_parentheses() {
        let parsed = parse_style("background: url(data:image/png;base64,AAAA); color: red");
        assert_eq!(parsed.properties(), vec!["background", "color"]);
    }

    #[test]
    fn test_important_is_dropped() {
        assert_eq!(
            style_to_object("color: red !important"),
            r#"{ color: "red" }"#
        );
        assert!(parse_style("color: !important").is_empty());
    }

    #[test]
    fn test_vendor_prefix_and_custom_property() {
        assert_eq!(
            style_to_object("-webkit-transition: none; --brand-color: #fff"),
            r##"{ WebkitTransition: "none", "--brand-color": "#fff" }"##
        );
    }

    #[test]
    fn test_property_case_is_normalized() {
        assert_eq!(style_to_object("Font-Size: 12pt"), r#"{ fontSize: "12pt" }"#);
    }

    #[test]
    fn test_quotes_are_escaped() {
        assert_eq!(
            style_to_object(r#"font-family: "Times New Roman", serif"#),
            r#"{ fontFamily: "\"Times New Roman\", serif" }"#
        );
    }
}
