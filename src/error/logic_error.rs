#[derive(Debug, Clone, PartialEq, Eq)]
/// Represents all errors raised while building a truth table.
pub enum LogicError {
    /// The expression failed validation.
    Syntax {
        /// The validation message, including the offending position when one
        /// is known.
        message: String,
    },
    /// The (sub-)expression passed validation but could not be parsed into a
    /// formula.
    ExpressionEvaluation {
        /// The whitespace-free text that was being evaluated.
        expression: String,
        /// The underlying parser message.
        details:    String,
    },
}

impl std::fmt::Display for LogicError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Syntax { message } => write!(f, "Syntax error: {message}"),
            Self::ExpressionEvaluation { expression, details } => {
                write!(f, "Error evaluating the expression: {details} in \"{expression}\"")
            },
        }
    }
}

impl std::error::Error for LogicError {}
