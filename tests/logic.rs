use std::fs;

use discreta::{error::LogicError, logic::BooleanExpressionEngine};
use walkdir::WalkDir;

#[test]
fn fixture_tables_match() {
    let mut count = 0;

    for entry in
        WalkDir::new("tests/fixtures/truth_tables").into_iter()
                                                   .filter_map(Result::ok)
                                                   .filter(|e| e.path().extension().is_some_and(|ext| ext == "table"))
    {
        let path = entry.path();
        let content =
            fs::read_to_string(path).unwrap_or_else(|e| panic!("Failed to read {path:?}: {e}"));
        let mut lines = content.lines();
        let (Some(expression), Some(expected)) = (lines.next(), lines.next()) else {
            panic!("{path:?} must hold an expression and a result column");
        };

        count += 1;
        assert_result_column(expression, expected.trim());
    }

    assert!(count > 0, "No truth table fixtures found");
}

fn table(expression: &str) -> BooleanExpressionEngine {
    let mut engine = BooleanExpressionEngine::new();
    if let Err(e) = engine.generate_truth_table(expression) {
        panic!("'{expression}' failed: {e}");
    }
    engine
}

fn assert_result_column(expression: &str, expected: &str) {
    let engine = table(expression);
    let column: String = engine.truth_table
                               .iter()
                               .map(|row| if row.result() == Some(true) { 'T' } else { 'F' })
                               .collect();
    assert_eq!(column, expected, "result column of '{expression}'");
}

fn assert_rejected(expression: &str, fragment: &str) {
    let engine = BooleanExpressionEngine::new();
    let validation = engine.validate_expression(expression);
    assert!(!validation.valid, "'{expression}' should be rejected");

    let message = validation.message.unwrap_or_default();
    assert!(message.contains(fragment),
            "'{expression}' rejected with '{message}', expected '{fragment}'");
}

#[test]
fn conjunction_rows_in_binary_order() {
    let engine = table("p ∧ q");
    let rows: Vec<(Option<&str>, Option<&str>, Option<&str>)> =
        engine.truth_table
              .iter()
              .map(|row| (row.label("p"), row.label("q"), row.label("result")))
              .collect();

    assert_eq!(rows,
               vec![(Some("false"), Some("false"), Some("false")),
                    (Some("true"), Some("false"), Some("false")),
                    (Some("false"), Some("true"), Some("false")),
                    (Some("true"), Some("true"), Some("true"))]);
}

#[test]
fn implication_is_false_only_when_premise_holds() {
    let engine = table("p → q");
    let falsifying: Vec<_> = engine.truth_table
                                   .iter()
                                   .filter(|row| row.result() == Some(false))
                                   .map(|row| (row.value("p"), row.value("q")))
                                   .collect();
    assert_eq!(falsifying, vec![(Some(true), Some(false))]);
}

#[test]
fn row_count_is_two_to_the_variables() {
    assert_eq!(table("p").truth_table.len(), 2);
    assert_eq!(table("p ∧ q ∨ r").truth_table.len(), 8);
    assert_eq!(table("(a ∧ b) → (c ∨ d)").truth_table.len(), 16);
}

#[test]
fn sub_expression_columns_follow_variables() {
    let engine = table("(p ∧ q) ∨ (¬r)");
    let columns: Vec<&str> = engine.truth_table[0].columns().collect();
    assert_eq!(columns, vec!["p", "q", "r", "(p∧q)", "(¬r)", "result"]);

    for row in &engine.truth_table {
        assert_eq!(row.value("(p∧q)"), Some(row.value("p") == Some(true) && row.value("q") == Some(true)));
    }
}

#[test]
fn variables_are_letter_runs() {
    let engine = BooleanExpressionEngine::new();
    assert_eq!(engine.get_variables("rain → wet ∧ rain"), vec!["rain", "wet"]);
    assert_eq!(engine.find_subexpressions("((p ∨ q) ∧ r) → (p ∨ q)"),
               vec!["p∨q", "(p∨q)∧r"]);
}

#[test]
fn all_spellings_agree() {
    let symbols = table("¬(p ∧ q) → (p ∨ q)");
    let ascii = table("!(p && q) -> (p || q)");
    let mixed = table("~(p ∧ q) ⇒ (p ǀǀ q)");

    let results = |engine: &BooleanExpressionEngine| -> Vec<Option<bool>> {
        engine.truth_table.iter().map(|row| row.result()).collect()
    };
    assert_eq!(results(&symbols), results(&ascii));
    assert_eq!(results(&symbols), results(&mixed));
}

#[test]
fn validation_rejects_malformed_formulas() {
    assert_rejected("", "empty");
    assert_rejected("   ", "empty");
    assert_rejected("(p ∧ q", "Opening parenthesis");
    assert_rejected("p ∧ q)", "Closing parenthesis");
    assert_rejected("∧ p", "cannot start");
    assert_rejected("p ∨", "cannot end");
    assert_rejected("p -> ", "cannot end");
    assert_rejected("p ∧ 1", "Invalid variable '1'");
    assert_rejected("p ∧ ∨ q", "Consecutive");
    assert_rejected("p ∧ -> q", "Consecutive");
}

#[test]
fn validation_accepts_well_formed_formulas() {
    let engine = BooleanExpressionEngine::new();
    for expression in ["p", "¬¬p", "(p ∧ q) ↔ (q ∧ p)", "p -> q", "p ⊕ (q ∨ ¬r)"] {
        assert!(engine.validate_expression(expression).valid, "'{expression}'");
    }
}

#[test]
fn rejected_formula_leaves_table_empty() {
    let mut engine = table("p ∧ q");
    assert!(!engine.truth_table.is_empty());

    let err = engine.generate_truth_table("p ∧").unwrap_err();
    assert!(matches!(err, LogicError::Syntax { .. }));
    assert!(engine.truth_table.is_empty());
}
