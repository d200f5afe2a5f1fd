use log::debug;

use crate::{
    error::LogicError,
    logic::{
        table::{TruthRow, build_rows},
        validate::Validation,
    },
};

/// The lexer module tokenizes propositional formulas.
///
/// Every connective spelling a learner may type (`∧` or `&&`, `→`, `⇒` or
/// `->`, `¬`, `!`, `~` or `˜`, ...) is folded into a single token, and every
/// token carries its 1-based character position.
pub mod lexer;
/// The parser module builds a `LogicExpr` from tokens.
///
/// Recursive descent with one function per precedence level:
/// `¬` > `⊕` > `→` > `↔` > `∧` > `∨`, implication grouping to the right.
pub mod parser;
/// Truth-table rows, the tree-walking evaluator and table rendering.
pub mod table;
/// Structural checks run before a formula is parsed.
pub mod validate;

/// Builds truth tables for propositional formulas.
///
/// The engine keeps the last generated table in [`Self::truth_table`]; a
/// failed generation leaves it empty.
///
/// # Example
/// ```
/// use discreta::logic::BooleanExpressionEngine;
///
/// let mut engine = BooleanExpressionEngine::new();
/// engine.generate_truth_table("p ∧ q").unwrap();
///
/// let results: Vec<_> = engine.truth_table.iter().map(|row| row.label("result")).collect();
/// assert_eq!(results, vec![Some("false"), Some("false"), Some("false"), Some("true")]);
/// ```
#[derive(Debug, Clone, Default)]
pub struct BooleanExpressionEngine {
    /// Rows of the last generated table.
    pub truth_table: Vec<TruthRow>,
}

impl BooleanExpressionEngine {
    /// Creates an engine with an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Checks a formula without evaluating it.
    #[must_use]
    pub fn validate_expression(&self, expression: &str) -> Validation {
        validate::validate_expression(expression)
    }

    /// Validates `expression` and fills [`Self::truth_table`] with one row per
    /// assignment of its variables.
    ///
    /// Whitespace is ignored. Columns are the sorted variables, then every
    /// distinct parenthesised sub-formula (labelled with its parentheses), then
    /// `result`.
    ///
    /// # Errors
    /// - `LogicError::Syntax` if validation rejects the formula.
    /// - `LogicError::ExpressionEvaluation` if a validated formula or
    ///   sub-formula still cannot be parsed.
    pub fn generate_truth_table(&mut self, expression: &str) -> Result<(), LogicError> {
        self.truth_table.clear();

        let validation = self.validate_expression(expression);
        if !validation.valid {
            return Err(LogicError::Syntax { message: validation.to_string() });
        }

        let compact: String = expression.chars().filter(|c| !c.is_whitespace()).collect();
        self.truth_table = build_rows(&compact)?;

        debug!("truth table for '{compact}': {} rows, {} columns",
               self.truth_table.len(),
               self.truth_table.first().map_or(0, |row| row.columns().count()));

        Ok(())
    }

    /// The sorted, distinct variable names of a formula.
    #[must_use]
    pub fn get_variables(&self, expression: &str) -> Vec<String> {
        table::variables(expression)
    }

    /// The distinct parenthesised sub-formulas of a formula, whitespace
    /// removed.
    #[must_use]
    pub fn find_subexpressions(&self, expression: &str) -> Vec<String> {
        let compact: String = expression.chars().filter(|c| !c.is_whitespace()).collect();
        table::subexpressions(&compact)
    }
}
