#[derive(Debug, Clone, PartialEq)]
/// Represents all errors raised while evaluating a succession.
///
/// The `Display` output is the learner-facing message; parser details are kept
/// in the variant fields for logging.
pub enum SuccessionError {
    /// The formula is blank.
    EmptyFormula,
    /// The formula does not mention the bound variable `k`.
    MissingVariable,
    /// The formula is not well formed.
    Syntax {
        /// The parser message.
        details: String,
    },
    /// The formula mentions an identifier other than `k` or a known function.
    UndefinedVariable {
        /// The identifier as written.
        name: String,
    },
    /// The formula has a different number of `(` and `)`.
    UnbalancedParentheses {
        /// Number of opening parentheses.
        open:  usize,
        /// Number of closing parentheses.
        close: usize,
    },
    /// A term evaluated to `NaN` or an infinity.
    NonFiniteTerm {
        /// The index whose term failed.
        k: i64,
    },
    /// `k` cannot be represented exactly as a floating point number.
    BoundOutOfRange {
        /// The offending index.
        k: i64,
    },
    /// The lower limit is greater than the upper limit.
    InvalidBounds {
        /// Lower limit.
        lower: i64,
        /// Upper limit.
        upper: i64,
    },
    /// The range holds more terms than the caller allows.
    TooManyTerms {
        /// Maximum number of terms allowed.
        max: u64,
    },
}

impl std::fmt::Display for SuccessionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyFormula => write!(f, "The formula cannot be empty."),
            Self::MissingVariable => write!(f, "The formula must contain the variable k."),
            Self::Syntax { .. } => {
                write!(f, "Syntax error: check that the formula is written correctly.")
            },
            Self::UndefinedVariable { .. } => write!(f,
                                                     "Undefined variable. Remember that \"k\" is the only variable you can use."),
            Self::UnbalancedParentheses { open, close } => write!(f,
                                                                  "Unbalanced parentheses: {open} opened vs {close} closed. Check that all parentheses are properly closed."),
            Self::NonFiniteTerm { k } => write!(f,
                                                "Error evaluating the formula for k={k}: the calculation resulted in a non-numeric value."),
            Self::BoundOutOfRange { k } => {
                write!(f, "Error evaluating the formula for k={k}: k is too large.")
            },
            Self::InvalidBounds { lower, upper } => write!(f,
                                                           "The lower limit ({lower}) cannot be greater than the upper limit ({upper})."),
            Self::TooManyTerms { max } => {
                write!(f, "The maximum allowed range is {max} terms.")
            },
        }
    }
}

impl std::error::Error for SuccessionError {}
