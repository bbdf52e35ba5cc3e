//! Plain text → paragraph markup

/// Input is treated as markup only when its first non-whitespace character opens a tag.
pub fn looks_like_markup(input: &str) -> bool {
    input.trim_start().starts_with('<')
}

/// Escape the five HTML metacharacters.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            c => out.push(c),
        }
    }
    out
}

/// One `<p>` per non-blank line, joined by newlines. Blank input yields an empty string.
pub fn paragraphs_from_text(text: &str) -> String {
    text.split(['\n', '\r'])
        .filter(|line| !line.trim().is_empty())
        .map(|line| format!("<p>{}</p>", escape_html(line)))
        .collect::<Vec<_>>()
        .join("\n")
}
