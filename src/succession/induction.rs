use log::debug;

use crate::{
    error::SuccessionError,
    succession::{
        SuccessionEvaluator,
        evaluator::{compile, term},
    },
    util::num::format_number,
};

/// Partial sums and closed form agree when they differ by less than this,
/// relative to their magnitude.
const TOLERANCE: f64 = 1e-9;

/// The closed form compared with the partial sum at one upper index.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InductionCheck {
    /// Upper index of the partial sum.
    pub n:           i64,
    /// `Σ formula(i)` for `i` from the lower limit to `n`.
    pub partial_sum: f64,
    /// The closed form evaluated at `n`.
    pub closed_form: f64,
    /// Whether the two agree.
    pub holds:       bool,
}

/// A proof outline by induction together with a numerical check of it.
#[derive(Debug, Clone, PartialEq)]
pub struct InductionReport {
    /// What must be shown for the first index.
    pub base_case:      String,
    /// What is assumed for an arbitrary index.
    pub hypothesis:     String,
    /// What must be shown for the following index.
    pub inductive_step: String,
    /// One check per index in the range.
    pub checks:         Vec<InductionCheck>,
    /// First index where the closed form fails, if any.
    pub counterexample: Option<i64>,
}

impl InductionReport {
    /// Whether the closed form matched every partial sum.
    #[must_use]
    pub const fn holds(&self) -> bool {
        self.counterexample.is_none()
    }
}

fn agrees(a: f64, b: f64) -> bool {
    (a - b).abs() <= TOLERANCE * a.abs().max(b.abs()).max(1.0)
}

impl SuccessionEvaluator {
    /// Outlines a proof by induction of
    /// `Σ_{i=lower}^{k} formula(i) = closed_form(k)` and checks it for every
    /// `k` in `lower..=upper`.
    ///
    /// Both formulas are written in `k`. The check stops at the first index
    /// where the partial sum and the closed form disagree.
    ///
    /// # Errors
    /// Same as [`Self::evaluate_succession`], for either formula.
    ///
    /// # Example
    /// ```
    /// use discreta::succession::SuccessionEvaluator;
    ///
    /// let evaluator = SuccessionEvaluator::new();
    ///
    /// let gauss = evaluator.explain_induction("k", "k * (k + 1) / 2", 1, 10).unwrap();
    /// assert!(gauss.holds());
    /// assert_eq!(gauss.checks.len(), 10);
    ///
    /// let wrong = evaluator.explain_induction("k", "k^2", 1, 10).unwrap();
    /// assert_eq!(wrong.counterexample, Some(2));
    /// ```
    pub fn explain_induction(&self,
                             formula: &str,
                             closed_form: &str,
                             lower: i64,
                             upper: i64)
                             -> Result<InductionReport, SuccessionError> {
        let summand = compile(formula)?;
        let closed = compile(closed_form)?;
        self.check_range(lower, upper)?;

        let (summand_text, closed_text) = (summand.to_string(), closed.to_string());

        let first = term(&summand, lower)?;
        let closed_first = term(&closed, lower)?;

        let base_case = format!("For k = {lower}: the sum has the single term {summand_text} = {}, and the closed form gives {closed_text} = {}.",
                                format_number(first),
                                format_number(closed_first));
        let hypothesis = format!("Assume Σ_{{i={lower}}}^{{n}} ({summand_text})[k=i] = ({closed_text})[k=n] for some n ≥ {lower}.");
        let inductive_step = format!("Show that ({closed_text})[k=n] + ({summand_text})[k=n+1] = ({closed_text})[k=n+1], so the equality carries over to n + 1.");

        let mut checks = Vec::new();
        let mut counterexample = None;
        let mut partial_sum = 0.0;

        for n in lower..=upper {
            partial_sum += term(&summand, n)?;
            let expected = term(&closed, n)?;
            let holds = agrees(partial_sum, expected);

            checks.push(InductionCheck { n,
                                         partial_sum,
                                         closed_form: expected,
                                         holds });

            if !holds {
                debug!("closed form '{closed_form}' fails at k={n}: {partial_sum} vs {expected}");
                counterexample = Some(n);
                break;
            }
        }

        Ok(InductionReport { base_case,
                             hypothesis,
                             inductive_step,
                             checks,
                             counterexample })
    }
}
