//! Lexer for SVG path data using logos

use logos::Logos;

/// Byte range in source text
pub type Span = std::ops::Range<usize>;

#[derive(Logos, Debug, Clone, PartialEq)]
#[logos(skip r"[ \t\n\r\x0C]+")]
pub enum Token {
    /// Command letter; uppercase is absolute, lowercase relative
    #[regex("[MmLlHhVvCcSsQqTtAaZz]", |lex| lex.slice().chars().next())]
    Command(char),

    // A sign or a dot may start a new number without a separator,
    // so "10-5" and "1.5.5" each lex as two numbers.
    #[regex(r"[+-]?([0-9]+\.?[0-9]*|\.[0-9]+)([eE][+-]?[0-9]+)?", |lex| lex.slice().parse::<f64>().ok())]
    Number(f64),

    #[token(",")]
    Comma,
}

/// Lex input string into tokens with spans.
///
/// Unrecognized input (unknown command letters, stray signs) is reported as
/// `Err(())` with its span so the parser can turn it into a diagnostic.
pub fn lex(input: &str) -> impl Iterator<Item = (Result<Token, ()>, Span)> + '_ {
    Token::lexer(input).spanned()
}
