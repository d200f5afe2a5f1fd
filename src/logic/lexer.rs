use logos::Logos;

use crate::{ast::LogicOperator, error::ParseError};

/// Represents a lexical token of a propositional formula.
///
/// Every connective has several accepted spellings, mirroring the symbol
/// palette learners type from: `∧`/`&&`, `∨`/`||`/`ǀǀ`, `→`/`⇒`/`->`, and
/// `¬`/`!`/`~`/`˜` for negation.
#[derive(Logos, Debug, PartialEq, Eq, Clone)]
pub enum Token {
    /// A variable name: a maximal run of ASCII letters.
    #[regex(r"[A-Za-z]+", |lex| lex.slice().to_string())]
    Variable(String),
    /// `¬`, `!`, `~` or `˜`
    #[token("¬")]
    #[token("!")]
    #[token("~")]
    #[token("˜")]
    Not,
    /// `∧` or `&&`
    #[token("∧")]
    #[token("&&")]
    And,
    /// `∨`, `||` or `ǀǀ`
    #[token("∨")]
    #[token("||")]
    #[token("ǀǀ")]
    Or,
    /// `⊕`
    #[token("⊕")]
    Xor,
    /// `→`, `⇒` or `->`
    #[token("→")]
    #[token("⇒")]
    #[token("->")]
    Implies,
    /// `↔`
    #[token("↔")]
    Iff,
    /// `(`
    #[token("(")]
    LParen,
    /// `)`
    #[token(")")]
    RParen,
    /// Spaces, tabs and newlines.
    #[regex(r"[ \t\r\n\f]+", logos::skip)]
    Ignored,
}

impl Token {
    /// Maps a connective token to its operator.
    #[must_use]
    pub const fn binary_operator(&self) -> Option<LogicOperator> {
        match self {
            Self::And => Some(LogicOperator::And),
            Self::Or => Some(LogicOperator::Or),
            Self::Xor => Some(LogicOperator::Xor),
            Self::Implies => Some(LogicOperator::Implies),
            Self::Iff => Some(LogicOperator::Iff),
            _ => None,
        }
    }
}

/// Tokenizes a propositional formula into `(Token, position)` pairs.
///
/// Positions are 1-based character offsets.
///
/// # Errors
/// Returns `ParseError::UnexpectedToken` for the first character sequence that
/// is not part of the formula language.
///
/// # Example
/// ```
/// use discreta::logic::lexer::{Token, tokenize};
///
/// let tokens = tokenize("p -> q").unwrap();
/// assert_eq!(tokens,
///            vec![(Token::Variable("p".into()), 1),
///                 (Token::Implies, 3),
///                 (Token::Variable("q".into()), 6)]);
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

/// Converts a byte offset into a 1-based character position.
pub(crate) fn char_position(source: &str, byte_offset: usize) -> usize {
    source.get(..byte_offset)
          .map_or(byte_offset, |prefix| prefix.chars().count())
    + 1
}
