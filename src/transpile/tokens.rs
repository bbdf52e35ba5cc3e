//! Token definitions for the markup scanner
//!
//! The transpiler never builds a tree. Sanitized markup is already balanced, so a flat scan
//! into tags, text and comments is enough to rewrite it tag by tag. The tokens are defined
//! using the logos derive macro.
use logos::Logos;
use std::ops::Range;

/// Everything that can appear in serialized markup.
#[derive(Logos, Debug, PartialEq, Eq, Clone, Copy)]
pub enum Token {
    /// `<tag attr="value" ...>`; quoted values may contain `>`. A quote only opens a value
    /// right after `=`; inside an unquoted value (`title=it's`) it is an ordinary character.
    #[regex(r#"<[A-Za-z]([^>"'=]|=(\s*("[^"]*"|'[^']*'|[^\s>"'][^\s>]*))?)*>"#)]
    StartTag,

    #[regex(r"</[A-Za-z][^>]*>")]
    EndTag,

    /// Only the opener; the scanner driver consumes the body up to `-->`.
    #[token("<!--")]
    CommentOpen,

    /// `<!DOCTYPE html>` and friends.
    #[regex(r"<![A-Za-z][^>]*>")]
    Declaration,

    #[regex(r"<\?[^>]*>")]
    ProcessingInstruction,

    /// A `<` that does not open anything.
    #[token("<")]
    StrayLt,

    #[regex(r"[^<]+")]
    Text,
}

impl Token {
    /// Tokens that carry no markup and are rewritten as JSX comments.
    pub fn is_comment_like(&self) -> bool {
        matches!(
            self,
            Token::CommentOpen | Token::Declaration | Token::ProcessingInstruction
        )
    }
}

/// Scan markup into tokens with their source slices.
///
/// Comment bodies are folded into the `CommentOpen` slice, so a comment always comes back as
/// a single token spanning `<!--` through `-->` (or the end of input when unterminated).
pub fn scan(source: &str) -> Vec<(Token, &str)> {
    let mut lexer = Token::lexer(source);
    let mut spans = Vec::new();

    while let Some(result) = lexer.next() {
        let span = lexer.span();
        match result {
            Ok(Token::CommentOpen) => {
                let rest = lexer.remainder();
                let body = match rest.find("-->") {
                    Some(end) => end + 3,
                    None => rest.len(),
                };
                lexer.bump(body);
                push(&mut spans, Token::CommentOpen, span.start..lexer.span().end);
            }
            Ok(token) => push(&mut spans, token, span),
            // Input no pattern could finish, such as an unterminated `<b` at the end. Every `<`
            // in it is stray and the rest is text.
            Err(()) => {
                let mut start = span.start;
                for (offset, _) in source[span.clone()].match_indices('<') {
                    let at = span.start + offset;
                    push(&mut spans, Token::Text, start..at);
                    push(&mut spans, Token::StrayLt, at..at + 1);
                    start = at + 1;
                }
                push(&mut spans, Token::Text, start..span.end);
            }
        }
    }

    spans
        .into_iter()
        .map(|(token, range)| (token, &source[range]))
        .collect()
}

/// Append a token, merging adjacent text runs.
fn push(spans: &mut Vec<(Token, Range<usize>)>, token: Token, range: Range<usize>) {
    if range.is_empty() {
        return;
    }
    if token == Token::Text {
        if let Some((Token::Text, last)) = spans.last_mut() {
            if last.end == range.start {
                last.end = range.end;
                return;
            }
        }
    }
    spans.push((token, range));
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(source: &str) -> Vec<Token> {
        scan(source).into_iter().map(|(token, _)| token).collect()
    }

    #[test]
    fn test_simple_element() {
        assert_eq!(
            kinds("<p>hello</p>"),
            vec![Token::StartTag, Token::Text, Token::EndTag]
        );
    }

    #[test]
    fn test_quoted_gt_stays_in_tag() {
        let tokens = scan(r#"<a title="a > b" href='x>y'>go</a>"#);
        assert_eq!(tokens[0], (Token::StartTag, r#"<a title="a > b" href='x>y'>"#));
        assert_eq!(tokens[1], (Token::Text, "go"));
    }

    #[test]
    fn test_comment_is_one_token() {
        let tokens = scan("a<!-- <b>not a tag</b> -->c");
        assert_eq!(
            tokens,
            vec![
                (Token::Text, "a"),
                (Token::CommentOpen, "<!-- <b>not a tag</b> -->"),
                (Token::Text, "c"),
            ]
        );
    }

    #[test]
    fn test_unterminated_comment_runs_to_end() {
        let tokens = scan("<p>x</p><!-- open");
        assert_eq!(tokens.last(), Some(&(Token::CommentOpen, "<!-- open")));
    }

    #[test]
    fn test_declarations_and_instructions() {
        assert_eq!(
            kinds("<!DOCTYPE html><?xml version=\"1.0\"?><p>x</p>"),
            vec![
                Token::Declaration,
                Token::ProcessingInstruction,
                Token::StartTag,
                Token::Text,
                Token::EndTag
            ]
        );
    }

    #[test]
    fn test_stray_lt() {
        assert_eq!(
            kinds("1 < 2"),
            vec![Token::Text, Token::StrayLt, Token::Text]
        );
        assert_eq!(kinds("</>"), vec![Token::StrayLt, Token::Text]);
    }

    #[test]
    fn test_unfinished_tag_at_end_is_stray() {
        let tokens = scan("<p>a</p><b");
        assert_eq!(&tokens[3..], &[(Token::StrayLt, "<"), (Token::Text, "b")]);
        let tokens = scan(r#"x<a title="open"#);
        assert_eq!(tokens[0], (Token::Text, "x"));
        assert_eq!(tokens[1], (Token::StrayLt, "<"));
        assert_eq!(tokens.last().map(|(token, _)| *token), Some(Token::Text));
    }

    #[test]
    fn test_quote_inside_unquoted_value() {
        let tokens = scan("<p title=it's>Hello</p><p>Don't stop</p>");
        assert_eq!(
            tokens,
            vec![
                (Token::StartTag, "<p title=it's>"),
                (Token::Text, "Hello"),
                (Token::EndTag, "</p>"),
                (Token::StartTag, "<p>"),
                (Token::Text, "Don't stop"),
                (Token::EndTag, "</p>"),
            ]
        );
    }

    #[test]
    fn test_comment_like() {
        assert!(Token::Declaration.is_comment_like());
        assert!(!Token::StartTag.is_comment_like());
    }
}
