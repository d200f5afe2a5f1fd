#[derive(Debug, Clone, PartialEq, Eq)]
/// Represents all errors that can occur while lexing or parsing a boolean or
/// arithmetic formula.
///
/// Positions are 1-based character offsets into the source text, which is what
/// a learner sees when counting symbols in the input box.
pub enum ParseError {
    /// Found an unexpected token while parsing.
    UnexpectedToken {
        /// The token encountered.
        token:    String,
        /// The character position where the error occurred.
        position: usize,
    },
    /// Reached the end of input unexpectedly.
    UnexpectedEndOfInput {
        /// The character position where more input was expected.
        position: usize,
    },
    /// A closing parenthesis `)` was expected but not found.
    ExpectedClosingParen {
        /// The position of the unmatched opening parenthesis.
        position: usize,
    },
    /// An identifier that is neither the bound variable nor a known function.
    UnknownIdentifier {
        /// The identifier as written.
        name:     String,
        /// The character position where the identifier starts.
        position: usize,
    },
}

impl ParseError {
    /// Returns the character position attached to this error.
    #[must_use]
    pub const fn position(&self) -> usize {
        match self {
            Self::UnexpectedToken { position, .. }
            | Self::UnexpectedEndOfInput { position }
            | Self::ExpectedClosingParen { position }
            | Self::UnknownIdentifier { position, .. } => *position,
        }
    }
}

impl std::fmt::Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnexpectedToken { token, position } => {
                write!(f, "Unexpected token '{token}' at position {position}.")
            },
            Self::UnexpectedEndOfInput { position } => {
                write!(f, "Unexpected end of input at position {position}.")
            },
            Self::ExpectedClosingParen { position } => write!(f,
                                                              "Expected closing parenthesis ')' for the '(' at position {position}."),
            Self::UnknownIdentifier { name, position } => {
                write!(f, "'{name}' is not defined (position {position}).")
            },
        }
    }
}

impl std::error::Error for ParseError {}
