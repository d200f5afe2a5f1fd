#[derive(Debug, Clone, PartialEq, Eq)]
/// Represents all errors raised by the set registry and the set-algebra
/// expression evaluator.
pub enum SetError {
    /// A set was registered with an empty (or blank) name.
    EmptyName,
    /// An operation referenced a set that is registered in neither the finite
    /// nor the infinite map.
    UnknownSet {
        /// The missing set name.
        name: String,
    },
    /// An expression referenced single-letter sets that are not registered.
    ///
    /// Only raised outside step-by-step mode; in step mode the names are
    /// registered as empty sets instead.
    UndefinedSets {
        /// The undefined names, in order of first appearance.
        names: Vec<String>,
    },
    /// The expression could not be reduced to a single value.
    MalformedExpression {
        /// What went wrong.
        details: String,
    },
    /// A complement was requested but there is no set to take it against.
    NoUniverse,
    /// An element literal could not be parsed.
    InvalidElements {
        /// What went wrong.
        details: String,
    },
}

impl std::fmt::Display for SetError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyName => write!(f, "The set name cannot be empty."),
            Self::UnknownSet { name } => write!(f, "The set '{name}' does not exist."),
            Self::UndefinedSets { names } => {
                write!(f, "Undefined sets: {}.", names.join(", "))
            },
            Self::MalformedExpression { details } => {
                write!(f, "Invalid expression: {details}.")
            },
            Self::NoUniverse => {
                write!(f, "There is no universal set to compute the complement against.")
            },
            Self::InvalidElements { details } => write!(f, "Invalid elements: {details}."),
        }
    }
}

impl std::error::Error for SetError {}
