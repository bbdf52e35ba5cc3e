//! Start tag parsing and attribute value helpers

use html5ever::data::NAMED_ENTITIES;

/// How an attribute value was written in the source tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Quote {
    Double,
    Single,
    Unquoted,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawAttribute<'a> {
    pub name: &'a str,
    /// `None` for boolean attributes (`<input disabled>`). Values keep their entities.
    pub value: Option<(&'a str, Quote)>,
}

impl<'a> RawAttribute<'a> {
    pub fn value(&self) -> Option<&'a str> {
        self.value.map(|(value, _)| value)
    }
}

/// A parsed `<tag ...>` token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StartTag<'a> {
    pub name: &'a str,
    pub attributes: Vec<RawAttribute<'a>>,
    /// Written as `<tag ... />`.
    pub self_closing: bool,
}

impl<'a> StartTag<'a> {
    /// Parse the slice of a `StartTag` token. Returns `None` when it is not shaped like one.
    pub fn parse(source: &'a str) -> Option<Self> {
        let inner = source.strip_prefix('<')?.strip_suffix('>')?;
        let name_end = inner
            .find(|c: char| c.is_whitespace() || c == '/')
            .unwrap_or(inner.len());
        let name = &inner[..name_end];
        if name.is_empty() {
            return None;
        }

        let mut cursor = Cursor::new(&inner[name_end..]);
        let mut attributes = Vec::new();
        let mut self_closing = false;
        loop {
            cursor.skip_whitespace();
            match cursor.peek() {
                None => break,
                Some('/') => {
                    cursor.advance(1);
                    self_closing = true;
                    continue;
                }
                Some(_) => self_closing = false,
            }
            let name = cursor.take_while(|c| !c.is_whitespace() && c != '=' && c != '/');
            if name.is_empty() {
                // A lone `=`; skip it.
                cursor.advance(1);
                continue;
            }
            cursor.skip_whitespace();
            let value = if cursor.peek() == Some('=') {
                cursor.advance(1);
                cursor.skip_whitespace();
                Some(cursor.take_value())
            } else {
                None
            };
            attributes.push(RawAttribute { name, value });
        }

        Some(StartTag {
            name,
            attributes,
            self_closing,
        })
    }

    pub fn attribute(&self, name: &str) -> Option<&RawAttribute<'a>> {
        self.attributes
            .iter()
            .find(|attr| attr.name.eq_ignore_ascii_case(name))
    }
}

struct Cursor<'a> {
    rest: &'a str,
}

impl<'a> Cursor<'a> {
    fn new(rest: &'a str) -> Self {
        Cursor { rest }
    }

    fn peek(&self) -> Option<char> {
        self.rest.chars().next()
    }

    fn advance(&mut self, bytes: usize) {
        self.rest = &self.rest[bytes.min(self.rest.len())..];
    }

    fn skip_whitespace(&mut self) {
        self.rest = self.rest.trim_start();
    }

    fn take_while(&mut self, keep: impl Fn(char) -> bool) -> &'a str {
        let end = self
            .rest
            .find(|c: char| !keep(c))
            .unwrap_or(self.rest.len());
        let (taken, rest) = self.rest.split_at(end);
        self.rest = rest;
        taken
    }

    fn take_value(&mut self) -> (&'a str, Quote) {
        let quote = match self.peek() {
            Some('"') => Quote::Double,
            Some('\'') => Quote::Single,
            _ => return (self.take_while(|c| !c.is_whitespace()), Quote::Unquoted),
        };
        let mark = if quote == Quote::Double { '"' } else { '\'' };
        self.advance(1);
        let value = self.take_while(|c| c != mark);
        self.advance(1);
        (value, quote)
    }
}

/// Decode the character references in an attribute value: decimal, hex and the full named
/// set. References that do not resolve stay as written.
pub fn decode_entities(value: &str) -> String {
    if !value.contains('&') {
        return value.to_string();
    }
    let mut decoded = String::with_capacity(value.len());
    let mut rest = value;
    while let Some(at) = rest.find('&') {
        decoded.push_str(&rest[..at]);
        rest = &rest[at..];
        match decode_reference(&rest[1..]) {
            Some((text, used)) => {
                decoded.push_str(&text);
                rest = &rest[1 + used..];
            }
            None => {
                decoded.push('&');
                rest = &rest[1..];
            }
        }
    }
    decoded.push_str(rest);
    decoded
}

/// Decode the reference following an `&`, returning the text and the bytes it consumed.
fn decode_reference(after: &str) -> Option<(String, usize)> {
    if let Some(number) = after.strip_prefix('#') {
        let (digits, radix, prefix) = match number.strip_prefix(['x', 'X']) {
            Some(hex) => (hex, 16, 2),
            None => (number, 10, 1),
        };
        let len = digits
            .find(|c: char| !c.is_digit(radix))
            .unwrap_or(digits.len());
        if len == 0 {
            return None;
        }
        let code = u32::from_str_radix(&digits[..len], radix).unwrap_or(u32::MAX);
        let ch = match code {
            0 => '\u{fffd}',
            code => char::from_u32(code).unwrap_or('\u{fffd}'),
        };
        let terminated = digits[len..].starts_with(';');
        return Some((ch.to_string(), prefix + len + usize::from(terminated)));
    }

    let len = after
        .find(|c: char| !c.is_ascii_alphanumeric())
        .unwrap_or(after.len());
    if len == 0 {
        return None;
    }
    let (key, used) = if after[len..].starts_with(';') {
        (&after[..=len], len + 1)
    } else {
        (&after[..len], len)
    };
    match NAMED_ENTITIES.get(key) {
        Some(&(first, second)) if first != 0 => {
            let text = [first, second]
                .into_iter()
                .filter(|&code| code != 0)
                .filter_map(char::from_u32)
                .collect();
            Some((text, used))
        }
        _ => None,
    }
}

/// Write `value` as a JSX string attribute, choosing quotes that need no escaping.
///
/// JSX attribute strings decode HTML entities but not backslash escapes, so a value holding
/// both quote kinds gets `&quot;`.
pub fn quote_attribute(value: &str) -> String {
    if !value.contains('"') {
        format!("\"{value}\"")
    } else if !value.contains('\'') {
        format!("'{value}'")
    } else {
        format!("\"{}\"", value.replace('"', "&quot;"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_attributes() {
        let tag = StartTag::parse(r#"<input type="text" disabled value='a "b"' size=3>"#).unwrap();
        assert_eq!(tag.name, "input");
        assert!(!tag.self_closing);
        assert_eq!(
            tag.attributes,
            vec![
                RawAttribute { name: "type", value: Some(("text", Quote::Double)) },
                RawAttribute { name: "disabled", value: None },
                RawAttribute { name: "value", value: Some((r#"a "b""#, Quote::Single)) },
                RawAttribute { name: "size", value: Some(("3", Quote::Unquoted)) },
            ]
        );
    }

    #[test]
    fn test_self_closing() {
        assert!(StartTag::parse("<br/>").unwrap().self_closing);
        assert!(StartTag::parse(r#"<img src="a.png" />"#).unwrap().self_closing);
        let unquoted = StartTag::parse("<a href=/x/>").unwrap();
        assert!(!unquoted.self_closing);
        assert_eq!(unquoted.attribute("HREF").and_then(|a| a.value()), Some("/x/"));
    }

    #[test]
    fn test_spaces_around_equals() {
        let tag = StartTag::parse(r#"<p class = "lead">"#).unwrap();
        assert_eq!(tag.attribute("class").and_then(|a| a.value()), Some("lead"));
    }

    #[test]
    fn test_rejects_non_tags() {
        assert_eq!(StartTag::parse("p>"), None);
        assert_eq!(StartTag::parse("</>"), None);
    }

    #[test]
    fn test_decode_entities() {
        assert_eq!(
            decode_entities("font-family: &quot;Segoe UI&quot;, &amp;lt;"),
            "font-family: \"Segoe UI\", &lt;"
        );
        assert_eq!(decode_entities("plain"), "plain");
    }

    #[test]
    fn test_decode_character_references() {
        assert_eq!(decode_entities("&#106;avascript:"), "javascript:");
        assert_eq!(decode_entities("&#x6A;ava&#X73;cript"), "javascript");
        assert_eq!(decode_entities("&#0000106&#0000097"), "ja");
        assert_eq!(decode_entities("&Tab;&colon;&NewLine;"), "\t:\n");
        assert_eq!(decode_entities("&copy 2024"), "\u{a9} 2024");
        assert_eq!(decode_entities("&#0;"), "\u{fffd}");
    }

    #[test]
    fn test_unresolved_references_stay() {
        assert_eq!(decode_entities("a & b"), "a & b");
        assert_eq!(decode_entities("&unknown; &#x; &#;"), "&unknown; &#x; &#;");
        assert_eq!(decode_entities("AT&T"), "AT&T");
    }

    #[test]
    fn test_quote_attribute() {
        assert_eq!(quote_attribute("x"), r#""x""#);
        assert_eq!(quote_attribute(r#"say "hi""#), r#"'say "hi"'"#);
        assert_eq!(quote_attribute(r#"it's "x""#), r#""it's &quot;x&quot;""#);
    }
}
