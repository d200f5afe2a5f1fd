use std::iter::Peekable;

use crate::{
    ast::{LogicExpr, LogicOperator},
    error::ParseError,
    logic::lexer::{Token, tokenize},
};

pub type ParseResult<T> = Result<T, ParseError>;

/// Parses a complete propositional formula.
///
/// Binding strength, tightest first:
///
/// ```text
///     ¬  >  ⊕  >  →  >  ↔  >  ∧  >  ∨
/// ```
///
/// Implication groups to the right (`p → q → r` is `p → (q → r)`), every
/// other connective to the left. The unusual placement of `⊕`, `→` and `↔`
/// above `∧` reproduces how the calculator has always grouped mixed formulas:
/// an implication takes the nearest operands on each side, and `⊕`/`↔` act
/// as (in)equality tests that bind before conjunction.
///
/// # Errors
/// Returns a `ParseError` for unknown characters, missing operands, missing
/// closing parentheses and trailing tokens.
///
/// # Example
/// ```
/// use discreta::logic::parser::parse_formula;
///
/// let expr = parse_formula("p∧q→r").unwrap();
/// assert_eq!(expr.to_string(), "(p ∧ (q → r))");
/// ```
pub fn parse_formula(source: &str) -> ParseResult<LogicExpr> {
    let end = source.chars().count() + 1;
    let tokens = tokenize(source)?;
    let mut iter = tokens.iter().peekable();

    let expr = parse_or(&mut iter).map_err(|e| match e {
                                      ParseError::UnexpectedEndOfInput { position: 0 } => {
                                          ParseError::UnexpectedEndOfInput { position: end }
                                      },
                                      other => other,
                                  })?;

    if let Some((tok, position)) = iter.next() {
        return Err(ParseError::UnexpectedToken { token:    describe(tok),
                                                 position: *position, });
    }

    Ok(expr)
}

/// Parses a left-associative chain of one connective.
fn parse_chain<'a, I>(tokens: &mut Peekable<I>,
                      op: LogicOperator,
                      next: fn(&mut Peekable<I>) -> ParseResult<LogicExpr>)
                      -> ParseResult<LogicExpr>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let mut left = next(tokens)?;

    loop {
        if let Some((token, position)) = tokens.peek()
           && token.binary_operator() == Some(op)
        {
            let position = *position;
            tokens.next();

            let right = next(tokens)?;
            left = LogicExpr::Binary { left: Box::new(left),
                                       op,
                                       right: Box::new(right),
                                       position };
            continue;
        }

        break;
    }

    Ok(left)
}

/// Grammar: `or := and ("∨" and)*`
fn parse_or<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<LogicExpr>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    parse_chain(tokens, LogicOperator::Or, parse_and)
}

/// Grammar: `and := iff ("∧" iff)*`
fn parse_and<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<LogicExpr>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    parse_chain(tokens, LogicOperator::And, parse_iff)
}

/// Grammar: `iff := implication ("↔" implication)*`
fn parse_iff<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<LogicExpr>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    parse_chain(tokens, LogicOperator::Iff, parse_implication)
}

/// Grammar: `implication := xor ("→" implication)?`
fn parse_implication<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<LogicExpr>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let left = parse_xor(tokens)?;

    if let Some((Token::Implies, position)) = tokens.peek() {
        let position = *position;
        tokens.next();

        let right = parse_implication(tokens)?;
        return Ok(LogicExpr::Binary { left: Box::new(left),
                                      op: LogicOperator::Implies,
                                      right: Box::new(right),
                                      position });
    }

    Ok(left)
}

/// Grammar: `xor := unary ("⊕" unary)*`
fn parse_xor<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<LogicExpr>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    parse_chain(tokens, LogicOperator::Xor, parse_unary)
}

/// Grammar: `unary := "¬" unary | primary`
fn parse_unary<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<LogicExpr>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    if let Some((Token::Not, position)) = tokens.peek() {
        let position = *position;
        tokens.next();
        let expr = parse_unary(tokens)?;
        return Ok(LogicExpr::Not { expr: Box::new(expr),
                                   position });
    }

    parse_primary(tokens)
}

/// Grammar: `primary := variable | "(" or ")"`
fn parse_primary<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<LogicExpr>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    match tokens.next() {
        Some((Token::Variable(name), position)) => Ok(LogicExpr::Variable { name:     name.clone(),
                                                                            position: *position, }),
        Some((Token::LParen, open)) => {
            let inner = parse_or(tokens)?;
            match tokens.next() {
                Some((Token::RParen, _)) => Ok(inner),
                _ => Err(ParseError::ExpectedClosingParen { position: *open }),
            }
        },
        Some((tok, position)) => Err(ParseError::UnexpectedToken { token:    describe(tok),
                                                                   position: *position, }),
        None => Err(ParseError::UnexpectedEndOfInput { position: 0 }),
    }
}

/// Renders a token the way the learner typed it (canonical spelling).
fn describe(token: &Token) -> String {
    match token {
        Token::Variable(name) => name.clone(),
        Token::Not => "¬".to_string(),
        Token::LParen => "(".to_string(),
        Token::RParen => ")".to_string(),
        Token::Ignored => " ".to_string(),
        other => other.binary_operator()
                      .map_or_else(String::new, |op| op.symbol().to_string()),
    }
}
