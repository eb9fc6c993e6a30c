//! Tokenizer for template source.
//!
//! A tag runs from `{{` to the first following `}}`. A `{{` with no closing
//! `}}` is ordinary text. Whitespace around the tag content is ignored.

use crate::ast::Span;

/// Name of the loop-position tag.
pub const INDEX_TAG: &str = "@index";

/// A template token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token<'s> {
    Text(&'s str),
    /// `{{#key}}`
    Open(&'s str),
    /// `{{/key}}`
    Close(&'s str),
    /// `{{key}}`
    Placeholder(&'s str),
    /// `{{@index}}`
    Index,
    /// `{{}}`, `{{#}}` or `{{/}}`
    Empty,
}

/// A token with its byte span in the source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Spanned<'s> {
    pub token: Token<'s>,
    pub span: Span,
}

/// Split `source` into tokens.
pub fn tokenize(source: &str) -> Vec<Spanned<'_>> {
    let mut tokens = Vec::new();
    let mut pos = 0;
    let mut text_start = 0;

    while let Some(found) = source[pos..].find("{{") {
        let open = pos + found;
        let Some(close_rel) = source[open + 2..].find("}}") else {
            break;
        };
        let inner_end = open + 2 + close_rel;
        let tag_end = inner_end + 2;

        if text_start < open {
            tokens.push(Spanned {
                token: Token::Text(&source[text_start..open]),
                span: Span::new(text_start, open),
            });
        }
        tokens.push(Spanned {
            token: classify(&source[open + 2..inner_end]),
            span: Span::new(open, tag_end),
        });

        pos = tag_end;
        text_start = tag_end;
    }

    if text_start < source.len() {
        tokens.push(Spanned {
            token: Token::Text(&source[text_start..]),
            span: Span::new(text_start, source.len()),
        });
    }

    tokens
}

fn classify(inner: &str) -> Token<'_> {
    let inner = inner.trim();
    if let Some(key) = inner.strip_prefix('#') {
        non_empty(key.trim(), Token::Open)
    } else if let Some(key) = inner.strip_prefix('/') {
        non_empty(key.trim(), Token::Close)
    } else if inner == INDEX_TAG {
        Token::Index
    } else {
        non_empty(inner, Token::Placeholder)
    }
}

fn non_empty<'s>(key: &'s str, make: fn(&'s str) -> Token<'s>) -> Token<'s> {
    if key.is_empty() { Token::Empty } else { make(key) }
}
