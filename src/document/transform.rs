//! Parsing of the SVG `transform` attribute
//!
//! Supports `matrix`, `translate`, `scale`, `rotate`, `skewX` and `skewY`.
//! A transform list composes left to right: `translate(..) rotate(..)`
//! rotates first, then translates.

use logos::Logos;
use thiserror::Error;

use crate::geometry::{Point, Transform};

/// Errors in a `transform` attribute
#[derive(Debug, Error, PartialEq)]
pub enum TransformError {
    #[error("unexpected input at {offset}: '{text}'")]
    Unexpected { offset: usize, text: String },

    #[error("unknown transform function '{name}'")]
    UnknownFunction { name: String },

    #[error("{name}() takes {expected} arguments, found {found}")]
    Arity {
        name: String,
        expected: &'static str,
        found: usize,
    },

    #[error("unterminated {name}()")]
    Unterminated { name: String },
}

#[derive(Logos, Debug, Clone, PartialEq)]
#[logos(skip r"[ \t\n\r\x0C]+")]
enum TransformToken {
    #[regex("[a-zA-Z]+", |lex| lex.slice().to_string())]
    Function(String),

    #[regex(r"[+-]?([0-9]+\.?[0-9]*|\.[0-9]+)([eE][+-]?[0-9]+)?", |lex| lex.slice().parse::<f64>().ok())]
    Number(f64),

    #[token("(")]
    ParenOpen,

    #[token(")")]
    ParenClose,

    #[token(",")]
    Comma,
}

/// Parse a transform list into a single matrix
pub fn parse_transform(input: &str) -> Result<Transform, TransformError> {
    let mut lexer = TransformToken::lexer(input).spanned();
    let mut result = Transform::identity();

    let unexpected = |span: std::ops::Range<usize>| TransformError::Unexpected {
        offset: span.start,
        text: input.get(span).unwrap_or_default().to_string(),
    };

    loop {
        // Function name; commas between functions are allowed
        let name = match lexer.next() {
            None => break,
            Some((Ok(TransformToken::Comma), _)) => continue,
            Some((Ok(TransformToken::Function(name)), _)) => name,
            Some((_, span)) => return Err(unexpected(span)),
        };

        match lexer.next() {
            Some((Ok(TransformToken::ParenOpen), _)) => {}
            Some((_, span)) => return Err(unexpected(span)),
            None => return Err(TransformError::Unterminated { name }),
        }

        let mut args = Vec::new();
        loop {
            match lexer.next() {
                Some((Ok(TransformToken::Number(n)), _)) => args.push(n),
                Some((Ok(TransformToken::Comma), _)) => {}
                Some((Ok(TransformToken::ParenClose), _)) => break,
                Some((_, span)) => return Err(unexpected(span)),
                None => return Err(TransformError::Unterminated { name }),
            }
        }

        result = result.then(&function_matrix(&name, &args)?);
    }

    Ok(result)
}

fn function_matrix(name: &str, args: &[f64]) -> Result<Transform, TransformError> {
    let arity = |expected: &'static str| TransformError::Arity {
        name: name.to_string(),
        expected,
        found: args.len(),
    };

    let matrix = match (name, args) {
        ("matrix", &[a, b, c, d, e, f]) => Transform::matrix(a, b, c, d, e, f),
        ("matrix", _) => return Err(arity("6")),
        ("translate", &[tx]) => Transform::translate(tx, 0.0),
        ("translate", &[tx, ty]) => Transform::translate(tx, ty),
        ("translate", _) => return Err(arity("1 or 2")),
        ("scale", &[s]) => Transform::scale(s, s),
        ("scale", &[sx, sy]) => Transform::scale(sx, sy),
        ("scale", _) => return Err(arity("1 or 2")),
        ("rotate", &[angle]) => Transform::rotate(angle),
        ("rotate", &[angle, cx, cy]) => Transform::rotate_about(angle, Point::new(cx, cy)),
        ("rotate", _) => return Err(arity("1 or 3")),
        ("skewX", &[angle]) => Transform::skew_x(angle),
        ("skewY", &[angle]) => Transform::skew_y(angle),
        ("skewX" | "skewY", _) => return Err(arity("1")),
        _ => {
            return Err(TransformError::UnknownFunction {
                name: name.to_string(),
            })
        }
    };
    Ok(matrix)
}
