use std::{collections::HashMap, fmt::Write};

use crate::{
    ast::LogicExpr,
    error::{LogicError, ParseError},
    logic::parser::parse_formula,
};

/// The column holding the value of the whole formula.
pub const RESULT_COLUMN: &str = "result";

/// One row of a truth table.
///
/// Cells are kept in column order: the variables (sorted), then every
/// parenthesised sub-formula, then [`RESULT_COLUMN`].
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TruthRow {
    cells: Vec<(String, bool)>,
}

impl TruthRow {
    pub(crate) fn push(&mut self, column: impl Into<String>, value: bool) {
        self.cells.push((column.into(), value));
    }

    /// The truth value stored under `column`.
    #[must_use]
    pub fn value(&self, column: &str) -> Option<bool> {
        self.cells
            .iter()
            .find(|(name, _)| name == column)
            .map(|(_, value)| *value)
    }

    /// The cell under `column` serialized as `"true"` or `"false"`.
    ///
    /// # Example
    /// ```
    /// use discreta::logic::BooleanExpressionEngine;
    ///
    /// let mut engine = BooleanExpressionEngine::new();
    /// engine.generate_truth_table("p ∨ q").unwrap();
    /// assert_eq!(engine.truth_table[0].label("result"), Some("false"));
    /// assert_eq!(engine.truth_table[1].label("p"), Some("true"));
    /// ```
    #[must_use]
    pub fn label(&self, column: &str) -> Option<&'static str> {
        self.value(column).map(bool_label)
    }

    /// The value of the whole formula for this row.
    #[must_use]
    pub fn result(&self) -> Option<bool> {
        self.value(RESULT_COLUMN)
    }

    /// Column names, in order.
    pub fn columns(&self) -> impl Iterator<Item = &str> {
        self.cells.iter().map(|(name, _)| name.as_str())
    }

    /// `(column, value)` pairs, in order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, bool)> {
        self.cells.iter().map(|(name, value)| (name.as_str(), *value))
    }
}

const fn bool_label(value: bool) -> &'static str {
    if value { "true" } else { "false" }
}

/// Evaluates a parsed formula under a valuation.
///
/// # Errors
/// Returns `ParseError::UnknownIdentifier` if the formula mentions a variable
/// the valuation does not bind.
///
/// # Example
/// ```
/// use std::collections::HashMap;
///
/// use discreta::logic::{parser::parse_formula, table::evaluate};
///
/// let expr = parse_formula("p → q").unwrap();
/// let valuation = HashMap::from([("p".to_string(), true), ("q".to_string(), false)]);
/// assert_eq!(evaluate(&expr, &valuation), Ok(false));
/// ```
pub fn evaluate(expr: &LogicExpr, valuation: &HashMap<String, bool>) -> Result<bool, ParseError> {
    match expr {
        LogicExpr::Variable { name, position } => {
            valuation.get(name)
                     .copied()
                     .ok_or_else(|| ParseError::UnknownIdentifier { name:     name.clone(),
                                                                    position: *position, })
        },
        LogicExpr::Not { expr, .. } => Ok(!evaluate(expr, valuation)?),
        LogicExpr::Binary { left, op, right, .. } => {
            Ok(op.apply(evaluate(left, valuation)?, evaluate(right, valuation)?))
        },
    }
}

/// Every distinct maximal run of ASCII letters, sorted.
///
/// # Example
/// ```
/// use discreta::logic::table::variables;
///
/// assert_eq!(variables("q ∧ (p ∨ q) → rain"), vec!["p", "q", "rain"]);
/// ```
#[must_use]
pub fn variables(expression: &str) -> Vec<String> {
    let mut names: Vec<String> = expression.split(|c: char| !c.is_ascii_alphabetic())
                                           .filter(|run| !run.is_empty())
                                           .map(str::to_string)
                                           .collect();
    names.sort();
    names.dedup();
    names
}

/// The text between every matching pair of parentheses, each distinct text
/// once, in the order the closing parentheses appear. The whole expression is
/// never included.
///
/// # Example
/// ```
/// use discreta::logic::table::subexpressions;
///
/// assert_eq!(subexpressions("(p∧(q∨r))→(q∨r)"), vec!["q∨r", "p∧(q∨r)"]);
/// ```
#[must_use]
pub fn subexpressions(expression: &str) -> Vec<String> {
    let chars: Vec<char> = expression.chars().collect();
    let mut open = Vec::new();
    let mut found: Vec<String> = Vec::new();

    for (i, c) in chars.iter().enumerate() {
        match c {
            '(' => open.push(i),
            ')' => {
                if let Some(start) = open.pop() {
                    let sub: String = chars[start + 1..i].iter().collect();
                    if sub != expression && !found.contains(&sub) {
                        found.push(sub);
                    }
                }
            },
            _ => {},
        }
    }

    found
}

/// Builds every row of the table for a whitespace-free expression.
///
/// Row `i` binds the `j`-th sorted variable to bit `j` of `i`, so the first
/// variable alternates fastest.
///
/// # Errors
/// Returns `LogicError::ExpressionEvaluation` when the expression or one of
/// its sub-formulas cannot be parsed or evaluated.
pub(crate) fn build_rows(expression: &str) -> Result<Vec<TruthRow>, LogicError> {
    let variables = variables(expression);

    let mut columns = Vec::new();
    for sub in subexpressions(expression) {
        let parsed = parse_checked(&sub)?;
        columns.push((format!("({sub})"), sub, parsed));
    }
    let main = parse_checked(expression)?;

    let rows = u32::try_from(variables.len()).ok()
                                             .and_then(|n| 1usize.checked_shl(n))
                                             .ok_or_else(|| LogicError::ExpressionEvaluation {
                                                 expression: expression.to_string(),
                                                 details:    format!("{} variables are too many",
                                                                     variables.len()),
                                             })?;
    let mut table = Vec::with_capacity(rows);

    for i in 0..rows {
        let mut row = TruthRow::default();
        let mut valuation = HashMap::with_capacity(variables.len());

        for (j, name) in variables.iter().enumerate() {
            let value = i & (1 << j) != 0;
            valuation.insert(name.clone(), value);
            row.push(name.clone(), value);
        }

        for (label, text, parsed) in &columns {
            row.push(label.clone(), evaluate_checked(parsed, &valuation, text)?);
        }

        row.push(RESULT_COLUMN, evaluate_checked(&main, &valuation, expression)?);
        table.push(row);
    }

    Ok(table)
}

fn parse_checked(expression: &str) -> Result<LogicExpr, LogicError> {
    parse_formula(expression).map_err(|e| LogicError::ExpressionEvaluation { expression: expression.to_string(),
                                                                             details:    e.to_string(), })
}

fn evaluate_checked(expr: &LogicExpr,
                    valuation: &HashMap<String, bool>,
                    text: &str)
                    -> Result<bool, LogicError> {
    evaluate(expr, valuation).map_err(|e| LogicError::ExpressionEvaluation { expression: text.to_string(),
                                                                             details:    e.to_string(), })
}

/// Renders rows as an aligned plain-text table with `T`/`F` cells.
///
/// # Example
/// ```
/// use discreta::logic::{BooleanExpressionEngine, table::render};
///
/// let mut engine = BooleanExpressionEngine::new();
/// engine.generate_truth_table("¬p").unwrap();
/// let text = render(&engine.truth_table);
/// assert!(text.starts_with("p | result"));
/// ```
#[must_use]
pub fn render(rows: &[TruthRow]) -> String {
    let Some(first) = rows.first() else {
        return String::new();
    };

    let headers: Vec<&str> = first.columns().collect();
    let widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();

    let mut out = String::new();
    let _ = writeln!(out, "{}", headers.join(" | "));
    let _ = writeln!(out,
                     "{}",
                     widths.iter()
                           .map(|w| "-".repeat(*w))
                           .collect::<Vec<_>>()
                           .join("-+-"));

    for row in rows {
        let cells: Vec<String> = row.iter()
                                    .zip(&widths)
                                    .map(|((_, value), &width)| {
                                        format!("{:<width$}", if value { "T" } else { "F" })
                                    })
                                    .collect();
        let _ = writeln!(out, "{}", cells.join(" | ").trim_end());
    }

    out
}
