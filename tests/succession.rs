use discreta::{
    error::SuccessionError,
    succession::{SuccessionEvaluator, SuccessionResult, format_product},
};

fn evaluate(formula: &str, lower: i64, upper: i64) -> SuccessionResult {
    match SuccessionEvaluator::new().evaluate_succession(formula, lower, upper) {
        Ok(result) => result,
        Err(e) => panic!("'{formula}' over {lower}..={upper} failed: {e}"),
    }
}

fn assert_close(actual: f64, expected: f64) {
    assert!((actual - expected).abs() < 1e-9, "{actual} != {expected}");
}

fn assert_error(formula: &str, lower: i64, upper: i64, expected: &SuccessionError) {
    match SuccessionEvaluator::new().evaluate_succession(formula, lower, upper) {
        Err(e) => assert_eq!(&e, expected, "'{formula}'"),
        Ok(result) => panic!("'{formula}' succeeded with sum {}", result.sum),
    }
}

#[test]
fn squares_from_one_to_three() {
    let result = evaluate("k^2", 1, 3);

    let terms: Vec<(i64, f64)> = result.terms.iter().map(|t| (t.k, t.value)).collect();
    assert_eq!(terms, vec![(1, 1.0), (2, 4.0), (3, 9.0)]);
    assert_close(result.sum, 14.0);
    assert_close(result.product, 36.0);
    assert_eq!(result.debug.original_formula, "k^2");
}

#[test]
fn operators_and_precedence() {
    assert_close(evaluate("2 * k + 1", 3, 3).sum, 7.0);
    assert_close(evaluate("k ** 2", 3, 3).sum, 9.0);
    assert_close(evaluate("-k^2", 3, 3).sum, -9.0);
    assert_close(evaluate("2^k^2", 2, 2).sum, 16.0);
    assert_close(evaluate("k % 3", 7, 7).sum, 1.0);
    assert_close(evaluate("1 / k", 1, 4).sum, 1.0 + 0.5 + 1.0 / 3.0 + 0.25);
    assert_close(evaluate("(k + 1) * (k - 1)", 5, 5).sum, 24.0);
}

#[test]
fn builtin_functions() {
    assert_close(evaluate("sqrt(k)", 16, 16).sum, 4.0);
    assert_close(evaluate("log(k)", 1000, 1000).sum, 3.0);
    assert_close(evaluate("ln(k)", 1, 1).sum, 0.0);
    assert_close(evaluate("sin(k) ^ 2 + cos(k) ^ 2", 1, 5).sum, 5.0);
    assert_close(evaluate("tan(k - 1)", 1, 1).sum, 0.0);
}

#[test]
fn negative_ranges_are_fine() {
    let result = evaluate("k", -2, 2);
    assert_eq!(result.terms.len(), 5);
    assert_close(result.sum, 0.0);
    assert_close(result.product, 0.0);
}

#[test]
fn product_stays_zero_once_reached() {
    let result = evaluate("k - 2", 1, 4);
    assert_close(result.product, 0.0);
    assert_close(result.sum, 2.0);
}

#[test]
fn product_is_clamped_on_overflow() {
    let result = evaluate("10^k", 100, 110);
    assert_eq!(result.product, f64::MAX);
    assert_eq!(format_product(result.product), "∞ (too large to display)");

    let negative = evaluate("-(10^k)", 200, 201);
    assert_eq!(negative.product, f64::MAX);

    let single = evaluate("-(10^k)", 300, 300);
    assert!(single.product < 0.0 && single.product.is_finite());
}

#[test]
fn formula_errors_are_translated() {
    assert_error("   ", 1, 3, &SuccessionError::EmptyFormula);
    assert_error("n + 1", 1, 3, &SuccessionError::MissingVariable);
    assert_error("(k + 1", 1, 3, &SuccessionError::UnbalancedParentheses { open: 1, close: 0 });
    assert_error("k + x", 1, 3, &SuccessionError::UndefinedVariable { name: "x".to_string() });
    assert_error("exp(k)", 1, 3, &SuccessionError::UndefinedVariable { name: "exp".to_string() });

    match SuccessionEvaluator::new().evaluate_succession("k + * 2", 1, 3) {
        Err(SuccessionError::Syntax { .. }) => {},
        other => panic!("expected a syntax error, got {other:?}"),
    }
}

#[test]
fn non_finite_terms_abort_the_evaluation() {
    assert_error("1 / k", -1, 1, &SuccessionError::NonFiniteTerm { k: 0 });
    assert_error("sqrt(k)", -1, 1, &SuccessionError::NonFiniteTerm { k: -1 });
    assert_error("ln(k)", 0, 2, &SuccessionError::NonFiniteTerm { k: 0 });
}

#[test]
fn bounds_are_checked() {
    assert_error("k", 5, 1, &SuccessionError::InvalidBounds { lower: 5, upper: 1 });
    assert_error("k", i64::MAX - 1, i64::MAX, &SuccessionError::BoundOutOfRange { k: i64::MAX - 1 });

    let limited = SuccessionEvaluator::with_max_terms(100);
    assert_eq!(limited.max_terms(), Some(100));
    assert_eq!(limited.evaluate_succession("k", 0, 100).unwrap_err(),
               SuccessionError::TooManyTerms { max: 100 });
    assert_eq!(limited.evaluate_succession("k", 1, 100).map(|r| r.terms.len()), Ok(100));
}

#[test]
fn product_formatting() {
    assert_eq!(format_product(36.0), "36.0000");
    assert_eq!(format_product(-2.5), "-2.5000");
    assert_eq!(format_product(100_000.0), "100000.0000");
    assert_eq!(format_product(-123_456.0), "-1.2346e5");
    assert_eq!(format_product(-f64::MAX), "-∞ (too large to display)");
}

#[test]
fn induction_confirms_known_closed_forms() {
    let evaluator = SuccessionEvaluator::new();

    let odd = evaluator.explain_induction("2*k - 1", "k^2", 1, 20).unwrap();
    assert!(odd.holds());
    assert_eq!(odd.checks.len(), 20);
    assert!(odd.base_case.contains("k = 1"));

    let squares = evaluator.explain_induction("k^2", "k*(k+1)*(2*k+1)/6", 1, 30).unwrap();
    assert!(squares.holds());
    assert!(squares.checks.iter().all(|c| c.holds));
}

#[test]
fn induction_reports_the_first_counterexample() {
    let report = SuccessionEvaluator::new().explain_induction("k", "k^2", 1, 10)
                                           .unwrap();
    assert!(!report.holds());
    assert_eq!(report.counterexample, Some(2));
    assert_eq!(report.checks.len(), 2);
    assert!(!report.checks[1].holds);
}

#[test]
fn induction_validates_both_formulas() {
    let evaluator = SuccessionEvaluator::new();
    assert_eq!(evaluator.explain_induction("k", "n", 1, 3).unwrap_err(),
               SuccessionError::MissingVariable);
    assert_eq!(evaluator.explain_induction("k", "k", 3, 1).unwrap_err(),
               SuccessionError::InvalidBounds { lower: 3, upper: 1 });
}
