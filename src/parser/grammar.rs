//! Parser implementation using chumsky

use chumsky::input::{Stream, ValueInput};
use chumsky::prelude::*;

use crate::parser::ast::*;
use crate::parser::lexer::Token;
use crate::ParseError;

/// Parse SVG path data into commands
///
/// Empty or whitespace-only input yields an empty command list.
pub fn parse(input: &str) -> Result<Vec<PathCommand>, Vec<ParseError>> {
    let len = input.len();

    let mut tokens = Vec::new();
    let mut lex_errors = Vec::new();
    for (tok, span) in crate::parser::lexer::lex(input) {
        match tok {
            Ok(tok) => tokens.push((tok, SimpleSpan::from(span))),
            Err(()) => lex_errors.push(unrecognized_input(input, span)),
        }
    }
    if !lex_errors.is_empty() {
        return Err(lex_errors);
    }

    // Turn the token list into a stream that chumsky can use
    let token_stream = Stream::from_iter(tokens.into_iter())
        // Split (Token, SimpleSpan) into token and span parts
        .map((len..len).into(), |(t, s): (_, _)| (t, s));

    path_data_parser()
        .parse(token_stream)
        .into_result()
        .map_err(|errs| errs.into_iter().map(|e| e.into()).collect())
}

fn unrecognized_input(input: &str, span: std::ops::Range<usize>) -> ParseError {
    let text = input.get(span.clone()).unwrap_or_default();
    let message = match text.chars().next() {
        Some(c) if c.is_ascii_alphabetic() => format!("Unknown command letter '{}'", c),
        _ => format!("Malformed number or unexpected input '{}'", text),
    };
    ParseError::Syntax {
        span,
        message,
        expected: vec![],
    }
}

fn path_data_parser<'a, I>() -> impl Parser<'a, I, Vec<PathCommand>, extra::Err<Rich<'a, Token>>> + Clone
where
    I: ValueInput<'a, Token = Token, Span = SimpleSpan>,
{
    let letter = select! {
        Token::Command(c) => c,
    };

    // A comma may follow any number
    let operand = select! {
        Token::Number(n) => n,
    }
    .then_ignore(just(Token::Comma).or_not());

    // A letter followed by its operands; the operands are split into
    // arity-sized groups, each group becoming one command
    let command_group = letter
        .then(operand.repeated().collect::<Vec<f64>>())
        .try_map(|(letter, operands), span| {
            expand_group(letter, &operands).map_err(|msg| Rich::custom(span, msg))
        });

    command_group
        .repeated()
        .collect::<Vec<Vec<PathCommand>>>()
        .then_ignore(end())
        .map(|groups| groups.into_iter().flatten().collect())
}

/// Expand one command letter and its operands into commands.
///
/// Extra coordinate pairs after a move-to are implicit line-tos.
fn expand_group(letter: char, operands: &[f64]) -> Result<Vec<PathCommand>, String> {
    let (kind, absolute) = CommandKind::from_letter(letter)
        .ok_or_else(|| format!("Unknown command letter '{}'", letter))?;
    let arity = kind.arity();

    if arity == 0 {
        if !operands.is_empty() {
            return Err(format!(
                "Command '{}' takes no operands, found {}",
                letter,
                operands.len()
            ));
        }
        return Ok(vec![PathCommand::ClosePath]);
    }

    if operands.is_empty() || operands.len() % arity != 0 {
        return Err(format!(
            "Command '{}' takes operands in groups of {}, found {}",
            letter,
            arity,
            operands.len()
        ));
    }

    operands
        .chunks(arity)
        .enumerate()
        .map(|(i, chunk)| {
            let kind = if i > 0 && kind == CommandKind::MoveTo {
                CommandKind::LineTo
            } else {
                kind
            };
            kind.build(chunk, absolute)
        })
        .collect()
}
