use log::{debug, warn};

use crate::{
    ast::Formula,
    error::{ParseError, SuccessionError},
    succession::{SuccessionEvaluator, parser::{VARIABLE, parse_formula}},
    util::num::i64_to_f64_checked,
};

/// One term of a succession.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Term {
    /// The index.
    pub k:     i64,
    /// The formula evaluated at `k`.
    pub value: f64,
}

/// The formula as typed, and as it was understood.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DebugInfo {
    /// The input, untouched.
    pub original_formula:  String,
    /// Canonical rendering of the parsed formula, fully spaced and with the
    /// grouping made explicit.
    pub processed_formula: String,
}

/// Terms, sum and product of a succession over an index range.
#[derive(Debug, Clone, PartialEq)]
pub struct SuccessionResult {
    /// One entry per index, in increasing order.
    pub terms:   Vec<Term>,
    /// Sum of all terms.
    pub sum:     f64,
    /// Product of all terms, clamped to `±f64::MAX` when it overflows.
    pub product: f64,
    /// How the formula was read.
    pub debug:   DebugInfo,
}

/// Checks and parses a formula, translating parser errors into the messages a
/// learner sees.
pub(crate) fn compile(formula: &str) -> Result<Formula, SuccessionError> {
    if formula.trim().is_empty() {
        return Err(SuccessionError::EmptyFormula);
    }
    if !formula.contains(VARIABLE) {
        return Err(SuccessionError::MissingVariable);
    }

    let open = formula.chars().filter(|&c| c == '(').count();
    let close = formula.chars().filter(|&c| c == ')').count();
    if open != close {
        return Err(SuccessionError::UnbalancedParentheses { open, close });
    }

    parse_formula(formula).map_err(|e| {
                              debug!("formula '{formula}' rejected: {e}");
                              match e {
                                  ParseError::UnknownIdentifier { name, .. } => {
                                      SuccessionError::UndefinedVariable { name }
                                  },
                                  other => SuccessionError::Syntax { details: other.to_string() },
                              }
                          })
}

impl SuccessionEvaluator {
    /// Rejects an empty or oversized index range.
    pub(crate) fn check_range(&self, lower: i64, upper: i64) -> Result<(), SuccessionError> {
        if lower > upper {
            return Err(SuccessionError::InvalidBounds { lower, upper });
        }

        let count = i128::from(upper) - i128::from(lower) + 1;
        if let Some(max) = self.max_terms
           && count > i128::from(max)
        {
            return Err(SuccessionError::TooManyTerms { max });
        }

        Ok(())
    }

    /// Evaluates `formula` for every integer `k` in `lower..=upper` and
    /// accumulates the sum and the product of the terms.
    ///
    /// Once the product reaches zero it stays zero. If it overflows, it is
    /// clamped to `f64::MAX` with the sign of the overflowing product and a
    /// warning is logged.
    ///
    /// # Errors
    /// - `SuccessionError::EmptyFormula`, `MissingVariable`,
    ///   `UnbalancedParentheses`, `UndefinedVariable` or `Syntax` if the
    ///   formula cannot be read.
    /// - `SuccessionError::InvalidBounds` if `lower > upper`.
    /// - `SuccessionError::TooManyTerms` if the range exceeds the configured
    ///   limit.
    /// - `SuccessionError::BoundOutOfRange` if an index is not exactly
    ///   representable as a float.
    /// - `SuccessionError::NonFiniteTerm` for the first term that is `NaN` or
    ///   infinite; no partial result is returned.
    ///
    /// # Example
    /// ```
    /// use discreta::succession::SuccessionEvaluator;
    ///
    /// let result = SuccessionEvaluator::new().evaluate_succession("k^2", 1, 3).unwrap();
    /// let values: Vec<f64> = result.terms.iter().map(|t| t.value).collect();
    /// assert_eq!(values, vec![1.0, 4.0, 9.0]);
    /// assert_eq!(result.sum, 14.0);
    /// assert_eq!(result.product, 36.0);
    /// assert_eq!(result.debug.processed_formula, "k ^ 2");
    /// ```
    #[allow(clippy::float_cmp)]
    pub fn evaluate_succession(&self, formula: &str, lower: i64, upper: i64) -> Result<SuccessionResult, SuccessionError> {
        let compiled = compile(formula)?;
        self.check_range(lower, upper)?;

        let mut terms = Vec::new();
        let mut sum = 0.0;
        let mut product = 1.0;

        for k in lower..=upper {
            let value = term(&compiled, k)?;
            terms.push(Term { k, value });
            sum += value;

            if product != 0.0 {
                let next = product * value;
                if next.is_finite() {
                    product = next;
                } else {
                    warn!("product overflowed at k={k}; clamping to the largest finite value");
                    product = f64::MAX.copysign(next);
                }
            }
        }

        debug!("evaluated '{formula}' for {} terms", terms.len());

        Ok(SuccessionResult { terms,
                              sum,
                              product,
                              debug: DebugInfo { original_formula:  formula.to_string(),
                                                 processed_formula: compiled.to_string(), } })
    }
}

/// Evaluates one term, rejecting non-finite values.
pub(crate) fn term(formula: &Formula, k: i64) -> Result<f64, SuccessionError> {
    let x = i64_to_f64_checked(k, SuccessionError::BoundOutOfRange { k })?;
    let value = formula.evaluate(x);
    if !value.is_finite() {
        return Err(SuccessionError::NonFiniteTerm { k });
    }
    Ok(value)
}

/// Renders a product for display: the clamped sentinels as infinity, large
/// magnitudes in scientific notation, everything else with four decimals.
///
/// # Example
/// ```
/// use discreta::succession::format_product;
///
/// assert_eq!(format_product(36.0), "36.0000");
/// assert_eq!(format_product(123_456.0), "1.2346e5");
/// assert_eq!(format_product(f64::MAX), "∞ (too large to display)");
/// assert_eq!(format_product(-f64::MAX), "-∞ (too large to display)");
/// ```
#[allow(clippy::float_cmp)]
#[must_use]
pub fn format_product(product: f64) -> String {
    if product == f64::MAX {
        "∞ (too large to display)".to_string()
    } else if product == -f64::MAX {
        "-∞ (too large to display)".to_string()
    } else if product.abs() > 100_000.0 {
        format!("{product:.4e}")
    } else {
        format!("{product:.4}")
    }
}
