use std::fmt::{self, Display};

use log::warn;
use logos::Logos;

use crate::ast::SetOperator;

/// Represents a lexical token of a set-algebra expression.
///
/// Every uppercase letter is a set name on its own (`AB` is `A` followed by
/// `B`). Braces are dropped.
#[derive(Logos, Debug, Clone, PartialEq, Eq)]
pub enum Token {
    /// A single uppercase letter naming a set.
    #[regex(r"[A-Z]", |lex| lex.slice().to_string())]
    Set(String),
    /// `∪`
    #[token("∪")]
    Union,
    /// `∩`
    #[token("∩")]
    Intersection,
    /// `-`
    #[token("-")]
    Difference,
    /// `Δ` (or the increment sign `∆`)
    #[token("Δ")]
    #[token("∆")]
    SymmetricDifference,
    /// `⊆`
    #[token("⊆")]
    Subset,
    /// Postfix `ᶜ`
    #[token("ᶜ")]
    Complement,
    /// `(`
    #[token("(")]
    LParen,
    /// `)`
    #[token(")")]
    RParen,
    /// Lowercase words, digits and the like: not part of the language.
    #[regex(r"[a-z0-9_.]+", |lex| lex.slice().to_string())]
    Unknown(String),
    /// Whitespace and braces.
    #[regex(r"[ \t\r\n\f{}]+", logos::skip)]
    Ignored,
}

impl Token {
    /// The operator this token stands for.
    #[must_use]
    pub const fn operator(&self) -> Option<SetOperator> {
        match self {
            Self::Union => Some(SetOperator::Union),
            Self::Intersection => Some(SetOperator::Intersection),
            Self::Difference => Some(SetOperator::Difference),
            Self::SymmetricDifference => Some(SetOperator::SymmetricDifference),
            Self::Subset => Some(SetOperator::Subset),
            Self::Complement => Some(SetOperator::Complement),
            _ => None,
        }
    }
}

impl Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Set(name) | Self::Unknown(name) => write!(f, "{name}"),
            Self::LParen => write!(f, "("),
            Self::RParen => write!(f, ")"),
            Self::Ignored => Ok(()),
            other => match other.operator() {
                Some(op) => write!(f, "{op}"),
                None => Ok(()),
            },
        }
    }
}

/// A tokenized expression.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Tokens {
    /// Tokens of the expression language, in order.
    pub tokens:  Vec<Token>,
    /// Text that is not part of the language and was skipped.
    pub ignored: Vec<String>,
}

/// Splits a set expression into tokens. Anything unrecognised is logged and
/// skipped rather than rejected.
///
/// # Example
/// ```
/// use discreta::sets::lexer::{Token, tokenize};
///
/// let tokens = tokenize("{A} ∪ (B)ᶜ x");
/// assert_eq!(tokens.tokens,
///            vec![Token::Set("A".into()),
///                 Token::Union,
///                 Token::LParen,
///                 Token::Set("B".into()),
///                 Token::RParen,
///                 Token::Complement]);
/// assert_eq!(tokens.ignored, vec!["x"]);
/// ```
#[must_use]
pub fn tokenize(expression: &str) -> Tokens {
    let mut out = Tokens::default();
    let mut lexer = Token::lexer(expression);

    while let Some(token) = lexer.next() {
        match token {
            Ok(Token::Unknown(text)) => {
                warn!("unrecognised token '{text}' ignored");
                out.ignored.push(text);
            },
            Ok(tok) => out.tokens.push(tok),
            Err(()) => {
                let text = lexer.slice().to_string();
                warn!("unrecognised token '{text}' ignored");
                out.ignored.push(text);
            },
        }
    }

    out
}
