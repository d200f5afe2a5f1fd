use std::iter::Peekable;

use crate::{
    ast::{ArithmeticOperator, Formula, MathFunction},
    error::ParseError,
    succession::lexer::{Token, tokenize},
};

pub type ParseResult<T> = Result<T, ParseError>;

/// The only variable a formula may use.
pub const VARIABLE: &str = "k";

/// Parses an arithmetic formula in `k`.
///
/// Grammar, loosest first:
///
/// ```text
///     sum     := product (("+" | "-") product)*
///     product := unary (("*" | "/" | "%") unary)*
///     unary   := ("-" | "+") unary | power
///     power   := primary (("^" | "**") unary)?
///     primary := number | "k" | function "(" sum ")" | "(" sum ")"
/// ```
///
/// so `-k^2` is `-(k^2)` and `2^3^2` is `2^(3^2)`. The functions are `sqrt`,
/// `sin`, `cos`, `tan`, `log` (base 10) and `ln`.
///
/// # Errors
/// - `ParseError::UnknownIdentifier` for any name other than `k` or a called
///   function.
/// - `ParseError::UnexpectedToken`, `UnexpectedEndOfInput` or
///   `ExpectedClosingParen` for malformed input.
///
/// # Example
/// ```
/// use discreta::succession::parse_formula;
///
/// let formula = parse_formula("-k^2 + sqrt(k)").unwrap();
/// assert_eq!(formula.to_string(), "-(k ^ 2) + sqrt(k)");
/// assert_eq!(formula.evaluate(4.0), -14.0);
///
/// assert!(parse_formula("n + 1").is_err());
/// ```
pub fn parse_formula(source: &str) -> ParseResult<Formula> {
    let end = source.chars().count() + 1;
    let tokens = tokenize(source)?;
    let mut iter = tokens.iter().peekable();

    let formula = parse_sum(&mut iter).map_err(|e| match e {
                                          ParseError::UnexpectedEndOfInput { position: 0 } => {
                                              ParseError::UnexpectedEndOfInput { position: end }
                                          },
                                          other => other,
                                      })?;

    if let Some((tok, position)) = iter.next() {
        return Err(ParseError::UnexpectedToken { token:    tok.to_string(),
                                                 position: *position, });
    }

    Ok(formula)
}

fn binary(left: Formula, op: ArithmeticOperator, right: Formula, position: usize) -> Formula {
    Formula::Binary { left: Box::new(left),
                      op,
                      right: Box::new(right),
                      position }
}

/// Grammar: `sum := product (("+" | "-") product)*`
fn parse_sum<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Formula>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let mut left = parse_product(tokens)?;

    loop {
        let op = match tokens.peek() {
            Some((Token::Plus, _)) => ArithmeticOperator::Add,
            Some((Token::Minus, _)) => ArithmeticOperator::Sub,
            _ => break,
        };
        let Some((_, position)) = tokens.next() else {
            break;
        };

        let right = parse_product(tokens)?;
        left = binary(left, op, right, *position);
    }

    Ok(left)
}

/// Grammar: `product := unary (("*" | "/" | "%") unary)*`
fn parse_product<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Formula>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let mut left = parse_unary(tokens)?;

    loop {
        let op = match tokens.peek() {
            Some((Token::Star, _)) => ArithmeticOperator::Mul,
            Some((Token::Slash, _)) => ArithmeticOperator::Div,
            Some((Token::Percent, _)) => ArithmeticOperator::Rem,
            _ => break,
        };
        let Some((_, position)) = tokens.next() else {
            break;
        };

        let right = parse_unary(tokens)?;
        left = binary(left, op, right, *position);
    }

    Ok(left)
}

/// Grammar: `unary := ("-" | "+") unary | power`
fn parse_unary<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Formula>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    match tokens.peek() {
        Some((Token::Minus, position)) => {
            let position = *position;
            tokens.next();
            let expr = parse_unary(tokens)?;
            Ok(Formula::Negate { expr: Box::new(expr),
                                 position })
        },
        Some((Token::Plus, _)) => {
            tokens.next();
            parse_unary(tokens)
        },
        _ => parse_power(tokens),
    }
}

/// Grammar: `power := primary ("^" unary)?`
///
/// The exponent is parsed as a unary so that `2^-1` and `2^3^2` work.
fn parse_power<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Formula>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let base = parse_primary(tokens)?;

    if let Some((Token::Caret, position)) = tokens.peek() {
        let position = *position;
        tokens.next();
        let exponent = parse_unary(tokens)?;
        return Ok(binary(base, ArithmeticOperator::Pow, exponent, position));
    }

    Ok(base)
}

/// Grammar: `primary := number | "k" | function "(" sum ")" | "(" sum ")"`
fn parse_primary<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Formula>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    match tokens.next() {
        Some((Token::Number(value), position)) => Ok(Formula::Number { value:    *value,
                                                                       position: *position, }),
        Some((Token::Identifier(name), position)) if name == VARIABLE => {
            Ok(Formula::Variable { position: *position })
        },
        Some((Token::Identifier(name), position)) => {
            let function = MathFunction::from_name(name);
            match (function, tokens.peek()) {
                (Some(function), Some((Token::LParen, open))) => {
                    let open = *open;
                    tokens.next();
                    let argument = parse_parenthesised(tokens, open)?;
                    Ok(Formula::Call { function,
                                       argument: Box::new(argument),
                                       position: *position })
                },
                _ => Err(ParseError::UnknownIdentifier { name:     name.clone(),
                                                         position: *position, }),
            }
        },
        Some((Token::LParen, open)) => parse_parenthesised(tokens, *open),
        Some((tok, position)) => Err(ParseError::UnexpectedToken { token:    tok.to_string(),
                                                                   position: *position, }),
        None => Err(ParseError::UnexpectedEndOfInput { position: 0 }),
    }
}

/// Parses the inside of a parenthesis whose `(` has been consumed.
fn parse_parenthesised<'a, I>(tokens: &mut Peekable<I>, open: usize) -> ParseResult<Formula>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let inner = parse_sum(tokens)?;
    match tokens.next() {
        Some((Token::RParen, _)) => Ok(inner),
        _ => Err(ParseError::ExpectedClosingParen { position: open }),
    }
}
