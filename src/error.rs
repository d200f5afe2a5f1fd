/// Parsing errors.
///
/// Defines the errors that can occur while lexing and parsing boolean and
/// arithmetic formulas: unexpected tokens, missing parentheses and unknown
/// identifiers, each carrying the character position where it was detected.
pub mod parse_error;
/// Truth-table errors.
///
/// Raised by the boolean engine when validation rejects an expression or a
/// validated expression still fails to evaluate.
pub mod logic_error;
/// Set-algebra errors.
///
/// Raised by the set registry and the set expression evaluator: empty names,
/// unknown or undefined sets, malformed expressions and missing universes.
pub mod set_error;
/// Succession errors.
///
/// Raised by the succession evaluator, already worded for a learner.
pub mod succession_error;

pub use logic_error::LogicError;
pub use parse_error::ParseError;
pub use set_error::SetError;
pub use succession_error::SuccessionError;
