//! Document mode wrapper: a default-exported function component

use once_cell::sync::Lazy;
use regex::Regex;

/// Open and close tags of elements whose text keeps its whitespace.
static PREFORMATTED_TAG: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)<(/?)(pre|textarea|listing)\b").unwrap());

/// Used when the configured name has no usable characters.
pub const DEFAULT_COMPONENT_NAME: &str = "GeneratedComponent";

/// Turn an arbitrary name into a PascalCase identifier: `hero-banner` → `HeroBanner`.
///
/// Non-alphanumeric characters separate words. Names that end up empty or starting with a
/// digit fall back to [`DEFAULT_COMPONENT_NAME`].
pub fn component_identifier(name: &str) -> String {
    let mut out = String::new();
    for word in name
        .split(|c: char| !c.is_ascii_alphanumeric())
        .filter(|word| !word.is_empty())
    {
        let mut chars = word.chars();
        if let Some(first) = chars.next() {
            out.push(first.to_ascii_uppercase());
            out.push_str(chars.as_str());
        }
    }
    match out.chars().next() {
        Some(first) if first.is_ascii_alphabetic() => out,
        _ => DEFAULT_COMPONENT_NAME.to_string(),
    }
}

/// Wrap a fragment in a function returning it inside a `<div>`.
///
/// ```text
/// export default function Name() {
///   return (
///     <div>
///       {fragment}
///     </div>
///   );
/// }
/// ```
///
/// Lines that continue the content of a `<pre>`, `<textarea>` or `<listing>` are written
/// as they are.
pub fn wrap_document(fragment: &str, component: &str, indent_width: usize) -> String {
    let unit = " ".repeat(indent_width);
    let body_indent = unit.repeat(3);
    let mut out = String::new();
    out.push_str(&format!(
        "export default function {}() {{\n",
        component_identifier(component)
    ));
    out.push_str(&format!("{unit}return (\n"));
    out.push_str(&format!("{unit}{unit}<div>\n"));
    let mut preformatted = 0usize;
    for line in fragment.lines() {
        if preformatted > 0 {
            out.push_str(line);
            out.push('\n');
        } else if line.trim().is_empty() {
            out.push('\n');
        } else {
            out.push_str(&body_indent);
            out.push_str(line);
            out.push('\n');
        }
        for tag in PREFORMATTED_TAG.captures_iter(line) {
            if tag[1].is_empty() {
                preformatted += 1;
            } else {
                preformatted = preformatted.saturating_sub(1);
            }
        }
    }
    out.push_str(&format!("{unit}{unit}</div>\n"));
    out.push_str(&format!("{unit});\n"));
    out.push_str("}\n");
    out
}
