/// Term-by-term evaluation of a succession, with its sum and product.
pub mod evaluator;
/// Proof outlines by induction for closed forms of sums.
pub mod induction;
/// The lexer module tokenizes arithmetic formulas in `k`.
pub mod lexer;
/// The parser module builds a `Formula` from tokens by recursive descent.
pub mod parser;

pub use evaluator::{SuccessionResult, Term, format_product};
pub use parser::parse_formula;

/// Evaluates arithmetic formulas in `k` over integer ranges.
///
/// By default any range is accepted; [`Self::with_max_terms`] bounds the
/// number of terms a single call may evaluate.
#[derive(Debug, Clone, Copy, Default)]
pub struct SuccessionEvaluator {
    max_terms: Option<u64>,
}

impl SuccessionEvaluator {
    /// Creates an evaluator without a term limit.
    #[must_use]
    pub const fn new() -> Self {
        Self { max_terms: None }
    }

    /// Creates an evaluator that rejects ranges of more than `max` terms.
    ///
    /// # Example
    /// ```
    /// use discreta::{error::SuccessionError, succession::SuccessionEvaluator};
    ///
    /// let evaluator = SuccessionEvaluator::with_max_terms(100);
    /// assert!(evaluator.evaluate_succession("k", 1, 100).is_ok());
    /// assert_eq!(evaluator.evaluate_succession("k", 1, 101),
    ///            Err(SuccessionError::TooManyTerms { max: 100 }));
    /// ```
    #[must_use]
    pub const fn with_max_terms(max: u64) -> Self {
        Self { max_terms: Some(max) }
    }

    /// The configured term limit.
    #[must_use]
    pub const fn max_terms(&self) -> Option<u64> {
        self.max_terms
    }
}
