//! logos-based splitter for stylesheet text.
//!
//! This is not a CSS grammar. The lexer only distinguishes what the splitter
//! needs to find the base region and the `@media` blocks:
//!
//! - `@media (min-width: 600px)` lexes as one [`Token::MediaHeader`] running up
//!   to (not including) the next brace
//! - every other byte lands in [`Token::Text`], [`Token::At`] or a brace token,
//!   so lexing never fails
//!
//! Rules inside the regions are cut apart later by [`crate::css::parser`].

use std::ops::Range;

use logos::Logos;

/// Token produced by the splitter's lexer.
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Token {
    /// `@media` plus its query text, up to the next `{` or `}`.
    #[regex(r"@media[^{}]*")]
    MediaHeader,

    /// An `@` that does not start a media query.
    #[token("@")]
    At,

    /// `{`
    #[token("{")]
    BraceOpen,

    /// `}`
    #[token("}")]
    BraceClose,

    /// Run of text with no braces and no `@`.
    #[regex(r"[^{}@]+")]
    Text,
}

/// Tokenize a stylesheet into `(Token, byte span)` pairs.
pub fn tokenize(input: &str) -> Vec<(Token, Range<usize>)> {
    Token::lexer(input)
        .spanned()
        .filter_map(|(result, span)| result.ok().map(|token| (token, span)))
        .collect()
}

/// One `@media` block as found in the source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawMedia<'a> {
    /// Header text from `@media` up to the opening brace, untrimmed.
    pub header: &'a str,
    /// Everything between the opening brace and its matching closing brace.
    pub body: &'a str,
}

/// Text the splitter could not assign to any region.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dropped<'a> {
    /// A media header with no `{` after it.
    HeaderWithoutBlock(&'a str),
    /// A media block whose closing brace never arrives.
    UnterminatedBlock(&'a str),
    /// Top-level text after the first media header, outside every media block.
    Stray(&'a str),
}

/// The regions of a stylesheet.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Split<'a> {
    /// Text before the first `@media`, or the whole input when there is none.
    pub base: &'a str,
    /// Media blocks in source order.
    pub media: Vec<RawMedia<'a>>,
    /// Content that belongs to no region, in source order.
    pub dropped: Vec<Dropped<'a>>,
}

impl<'a> Split<'a> {
    fn note_stray(&mut self, text: &'a str) {
        let text = text.trim();
        if !text.is_empty() {
            self.dropped.push(Dropped::Stray(text));
        }
    }
}

/// Split a stylesheet into its base region and media blocks.
///
/// Media blocks may hold flat `selector { ... }` rules; a block ends at the
/// brace that brings the nesting depth back to zero.
pub fn split(input: &str) -> Split<'_> {
    let tokens = tokenize(input);

    let first_media = tokens
        .iter()
        .position(|(token, _)| *token == Token::MediaHeader);
    let base_end = first_media.map_or(input.len(), |i| tokens[i].1.start);

    let mut split = Split {
        base: &input[..base_end],
        ..Split::default()
    };

    let mut cursor = first_media.unwrap_or(tokens.len());
    let mut stray_start = base_end;

    while cursor < tokens.len() {
        let (token, span) = &tokens[cursor];
        if *token != Token::MediaHeader {
            cursor += 1;
            continue;
        }

        split.note_stray(&input[stray_start..span.start]);
        let header = &input[span.clone()];
        cursor += 1;

        // A header stops at a brace or at the end of input.
        match tokens.get(cursor) {
            Some((Token::BraceOpen, open)) => match matching_close(&tokens[cursor + 1..]) {
                Some(offset) => {
                    let close = &tokens[cursor + 1 + offset].1;
                    split.media.push(RawMedia {
                        header,
                        body: &input[open.end..close.start],
                    });
                    cursor += offset + 2;
                    stray_start = close.end;
                }
                None => {
                    split.dropped.push(Dropped::UnterminatedBlock(header.trim()));
                    cursor = tokens.len();
                    stray_start = input.len();
                }
            },
            _ => {
                split.dropped.push(Dropped::HeaderWithoutBlock(header.trim()));
                stray_start = span.end;
            }
        }
    }

    split.note_stray(&input[stray_start..]);
    split
}

/// Index of the `}` closing a block whose `{` was just consumed.
fn matching_close(tokens: &[(Token, Range<usize>)]) -> Option<usize> {
    let mut depth = 1usize;
    for (i, (token, _)) in tokens.iter().enumerate() {
        match token {
            Token::BraceOpen => depth += 1,
            Token::BraceClose => {
                depth -= 1;
                if depth == 0 {
                    return Some(i);
                }
            }
            _ => {}
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Helper: tokenize and return just the token variants.
    fn tokens(input: &str) -> Vec<Token> {
        tokenize(input).into_iter().map(|(t, _)| t).collect()
    }

    /// Helper: tokenize and return (token, slice) pairs.
    fn tokens_with_text(input: &str) -> Vec<(Token, &str)> {
        tokenize(input)
            .into_iter()
            .map(|(t, span)| (t, &input[span]))
            .collect()
    }

    // ── Lexing ───────────────────────────────────────────────────────

    #[test]
    fn test_simple_rule() {
        assert_eq!(
            tokens_with_text(".a { color: red; }"),
            vec![
                (Token::Text, ".a "),
                (Token::BraceOpen, "{"),
                (Token::Text, " color: red; "),
                (Token::BraceClose, "}"),
            ]
        );
    }

    #[test]
    fn test_media_header_runs_to_brace() {
        let result = tokens_with_text("@media (max-width: 600px) {");
        assert_eq!(result[0], (Token::MediaHeader, "@media (max-width: 600px) "));
        assert_eq!(result[1], (Token::BraceOpen, "{"));
    }

    #[test]
    fn test_other_at_rules_are_not_headers() {
        assert_eq!(
            tokens("@font-face { }"),
            vec![
                Token::At,
                Token::Text,
                Token::BraceOpen,
                Token::Text,
                Token::BraceClose,
            ]
        );
    }

    #[test]
    fn test_every_byte_is_covered() {
        let input = ".a{x:y}@import 'b';@media print{.c{d:e}}";
        let covered: usize = tokenize(input).iter().map(|(_, span)| span.len()).sum();
        assert_eq!(covered, input.len());
    }

    #[test]
    fn test_empty_input() {
        assert!(tokens("").is_empty());
    }

    // ── Splitting ────────────────────────────────────────────────────

    #[test]
    fn test_no_media_is_all_base() {
        let input = ".a { color: red; }\n.b { margin: 0; }\n";
        let split = split(input);
        assert_eq!(split.base, input);
        assert!(split.media.is_empty());
        assert!(split.dropped.is_empty());
    }

    #[test]
    fn test_base_region_stops_at_first_media() {
        let split = split(".a{color:red} @media (min-width:600px){.a{color:blue}}");
        assert_eq!(split.base, ".a{color:red} ");
        assert_eq!(
            split.media,
            vec![RawMedia {
                header: "@media (min-width:600px)",
                body: ".a{color:blue}",
            }]
        );
    }

    #[test]
    fn test_media_block_keeps_every_inner_rule() {
        let split = split("@media print { .a { x: 1; } .b { y: 2; } }");
        assert_eq!(split.media.len(), 1);
        assert_eq!(split.media[0].body, " .a { x: 1; } .b { y: 2; } ");
    }

    #[test]
    fn test_multiple_media_blocks_in_order() {
        let split = split("@media (a){.x{p:1}}\n@media (b){.y{q:2}}");
        let headers: Vec<_> = split.media.iter().map(|m| m.header).collect();
        assert_eq!(headers, vec!["@media (a)", "@media (b)"]);
        assert!(split.dropped.is_empty());
    }

    #[test]
    fn test_empty_media_block() {
        let split = split("@media screen{\n\n}");
        assert_eq!(split.media[0].header, "@media screen");
        assert_eq!(split.media[0].body, "\n\n");
    }

    #[test]
    fn test_stray_rule_between_media_blocks() {
        let split = split("@media (a){.x{p:1}} .late{q:2} @media (b){}");
        assert_eq!(split.media.len(), 2);
        assert_eq!(split.dropped, vec![Dropped::Stray(".late{q:2}")]);
    }

    #[test]
    fn test_trailing_stray_rule() {
        let split = split("@media (a){.x{p:1}}\n.tail { r: 3; }\n");
        assert_eq!(split.dropped, vec![Dropped::Stray(".tail { r: 3; }")]);
    }

    #[test]
    fn test_unterminated_media_block() {
        let split = split(".a{b:c}\n@media (a) { .x { p: 1; }");
        assert_eq!(split.base, ".a{b:c}\n");
        assert!(split.media.is_empty());
        assert_eq!(split.dropped, vec![Dropped::UnterminatedBlock("@media (a)")]);
    }

    #[test]
    fn test_header_without_block() {
        let split = split("@media print");
        assert!(split.media.is_empty());
        assert_eq!(split.dropped, vec![Dropped::HeaderWithoutBlock("@media print")]);
    }
}
