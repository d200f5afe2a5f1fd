/// Set elements: numbers, strings, set references and nested sets.
///
/// Nested sets compare as sets (order and multiplicity do not matter), and
/// duplicates are removed by structural equality.
pub mod element;
/// The postfix evaluator behind `SetAlgebraEngine::evaluate_expression`.
pub mod expression;
/// Sets described by a membership predicate instead of their elements.
///
/// Holds the predefined number sets (`N`, `Z`, `Q`, `R`, `C`, `E`, `O`, `P`,
/// `U`) and the known inclusions between them.
pub mod infinite;
pub(crate) mod infinite_ops;
/// Tokenizer for set-algebra expressions.
pub mod lexer;
/// The engine: registration, the six operations and the result cache.
pub mod operations;
/// Named storage for finite and infinite sets.
pub mod registry;
/// Results, relation values and explanation steps.
pub mod result;

pub use operations::SetAlgebraEngine;
