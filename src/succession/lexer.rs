use logos::Logos;

use crate::{error::ParseError, logic::lexer::char_position};

/// Represents a lexical token of a succession formula.
#[derive(Logos, Debug, PartialEq, Clone)]
pub enum Token {
    /// Numeric literals such as `3`, `2.5`, `.5` or `1e-3`.
    #[regex(r"[0-9]+\.[0-9]+([eE][+-]?[0-9]+)?", parse_number)]
    #[regex(r"\.[0-9]+([eE][+-]?[0-9]+)?", parse_number)]
    #[regex(r"[0-9]+([eE][+-]?[0-9]+)?", parse_number)]
    Number(f64),
    /// The variable `k`, a function name, or anything else word-like.
    #[regex(r"[A-Za-z_][A-Za-z0-9_]*", |lex| lex.slice().to_string())]
    Identifier(String),
    /// `+`
    #[token("+")]
    Plus,
    /// `-`
    #[token("-")]
    Minus,
    /// `*`
    #[token("*")]
    Star,
    /// `/`
    #[token("/")]
    Slash,
    /// `%`
    #[token("%")]
    Percent,
    /// `^` or `**`
    #[token("^")]
    #[token("**")]
    Caret,
    /// `(`
    #[token("(")]
    LParen,
    /// `)`
    #[token(")")]
    RParen,
    /// Whitespace.
    #[regex(r"[ \t\r\n\f]+", logos::skip)]
    Ignored,
}

fn parse_number(lex: &logos::Lexer<Token>) -> Option<f64> {
    lex.slice().parse().ok()
}

impl std::fmt::Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Number(value) => write!(f, "{value}"),
            Self::Identifier(name) => write!(f, "{name}"),
            Self::Plus => write!(f, "+"),
            Self::Minus => write!(f, "-"),
            Self::Star => write!(f, "*"),
            Self::Slash => write!(f, "/"),
            Self::Percent => write!(f, "%"),
            Self::Caret => write!(f, "^"),
            Self::LParen => write!(f, "("),
            Self::RParen => write!(f, ")"),
            Self::Ignored => Ok(()),
        }
    }
}

/// Tokenizes a succession formula into `(Token, position)` pairs with 1-based
/// character positions.
///
/// # Errors
/// Returns `ParseError::UnexpectedToken` for the first character sequence that
/// is not part of the formula language.
///
/// # Example
/// ```
/// use discreta::succession::lexer::{Token, tokenize};
///
/// let tokens = tokenize("k**2").unwrap();
/// assert_eq!(tokens,
///            vec![(Token::Identifier("k".into()), 1),
///                 (Token::Caret, 2),
///                 (Token::Number(2.0), 4)]);
/// assert!(tokenize("k & 2").is_err());
/// ```
pub fn tokenize(source: &str) -> Result<Vec<(Token, usize)>, ParseError> {
    let mut tokens = Vec::new();
    let mut lexer = Token::lexer(source);

    while let Some(token) = lexer.next() {
        let position = char_position(source, lexer.span().start);
        match token {
            Ok(tok) => tokens.push((tok, position)),
            Err(()) => {
                return Err(ParseError::UnexpectedToken { token: lexer.slice().to_string(),
                                                         position });
            },
        }
    }

    Ok(tokens)
}
