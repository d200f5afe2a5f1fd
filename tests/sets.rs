use discreta::{
    error::SetError,
    sets::{
        SetAlgebraEngine,
        element::{Element, contains},
        registry::is_temp,
        result::{RelationEvaluation, SetResult},
    },
};

fn engine_with(sets: &[(&str, &str)]) -> SetAlgebraEngine {
    let mut engine = SetAlgebraEngine::new();
    for (name, literal) in sets {
        if let Err(e) = engine.add_set_from_literal(name, literal) {
            panic!("Failed to define {name}: {e}");
        }
    }
    engine
}

fn elements(result: &SetResult) -> Vec<Element> {
    match result.elements() {
        Some(elements) => elements.to_vec(),
        None => panic!("Expected a finite result, got {result}"),
    }
}

fn assert_same_elements(left: &SetResult, right: &SetResult) {
    let (l, r) = (elements(left), elements(right));
    assert_eq!(l.len(), r.len(), "{left} vs {right}");
    assert!(l.iter().all(|e| contains(&r, e)), "{left} vs {right}");
}

fn assert_expression(engine: &mut SetAlgebraEngine, expression: &str, expected: &str) {
    match engine.evaluate_expression(expression) {
        Ok(evaluation) => assert_eq!(evaluation.result.representation(), expected, "{expression}"),
        Err(e) => panic!("'{expression}' failed: {e}"),
    }
}

fn assert_relation(engine: &mut SetAlgebraEngine, expression: &str, expected: RelationEvaluation) {
    match engine.evaluate_expression(expression) {
        Ok(evaluation) => assert_eq!(evaluation.result.evaluation(), Some(expected), "{expression}"),
        Err(e) => panic!("'{expression}' failed: {e}"),
    }
}

#[test]
fn basic_operations() {
    let mut engine = engine_with(&[("A", "1, 2, 3"), ("B", "2, 3, 4")]);

    assert_eq!(engine.union("A", "B").unwrap().result.representation(), "{1, 2, 3, 4}");
    assert_eq!(engine.intersection("A", "B").unwrap().result.representation(), "{2, 3}");
    assert_eq!(engine.difference("A", "B").unwrap().result.representation(), "{1}");
    assert_eq!(engine.symmetric_difference("A", "B").unwrap().result.representation(), "{1, 4}");
    assert_eq!(engine.is_subset("A", "B").unwrap().result.representation(), "A ⊈ B");
}

#[test]
fn idempotence() {
    let mut engine = engine_with(&[("A", "{1, apple, {2, 3}}")]);
    let a = engine.get_set("A").unwrap();

    assert_same_elements(&engine.union("A", "A").unwrap().result, &a);
    assert_same_elements(&engine.intersection("A", "A").unwrap().result, &a);
    assert!(engine.difference("A", "A").unwrap().result.elements().is_some_and(<[_]>::is_empty));
}

#[test]
fn commutativity() {
    let mut engine = engine_with(&[("A", "5, 1, 3"), ("B", "3, 4, 5, 6")]);

    for (ab, ba) in [(engine.union("A", "B"), engine.union("B", "A")),
                     (engine.intersection("A", "B"), engine.intersection("B", "A")),
                     (engine.symmetric_difference("A", "B"), engine.symmetric_difference("B", "A"))]
    {
        assert_same_elements(&ab.unwrap().result, &ba.unwrap().result);
    }
}

#[test]
fn de_morgan_over_a_finite_universe() {
    let mut engine = engine_with(&[("A", "1, 2, 3"), ("B", "3, 4")]);
    engine.remove_set("U").unwrap();
    engine.add_set_from_literal("U", "1, 2, 3, 4, 5, 6").unwrap();

    let left = engine.evaluate_expression("(A ∪ B)ᶜ").unwrap().result;
    let right = engine.evaluate_expression("Aᶜ ∩ Bᶜ").unwrap().result;
    assert_same_elements(&left, &right);
    assert_eq!(left.representation(), "{5, 6}");

    let left = engine.evaluate_expression("(A ∩ B)ᶜ").unwrap().result;
    let right = engine.evaluate_expression("Aᶜ ∪ Bᶜ").unwrap().result;
    assert_same_elements(&left, &right);
}

#[test]
fn nested_sets_compare_as_sets() {
    let mut engine = engine_with(&[("A", "{1, 2}, {3}"), ("B", "{2, 1}, 7")]);
    assert_eq!(engine.intersection("A", "B").unwrap().result.representation(), "{{1, 2}}");

    engine.add_set_from_literal("D", "{1, 2}, {2, 1}, 1").unwrap();
    assert_eq!(engine.get_set("D").unwrap().elements().map(<[_]>::len), Some(2));
}

#[test]
fn results_are_cached_until_the_registry_changes() {
    let mut engine = engine_with(&[("A", "1, 2"), ("B", "2, 3")]);

    engine.union("A", "B").unwrap();
    engine.union("A", "B").unwrap();
    assert_eq!(engine.computations(), 1);

    engine.add_set_from_literal("C", "9").unwrap();
    let after = engine.union("A", "B").unwrap();
    assert_eq!(engine.computations(), 2);
    assert_eq!(after.result.representation(), "{1, 2, 3}");

    engine.set_step_by_step_mode(true);
    engine.union("A", "B").unwrap();
    engine.union("A", "B").unwrap();
    assert_eq!(engine.computations(), 4);
}

#[test]
fn redefining_a_set_invalidates_cached_results() {
    let mut engine = engine_with(&[("A", "1, 2"), ("B", "2, 3")]);
    assert_eq!(engine.intersection("A", "B").unwrap().result.representation(), "{2}");

    engine.add_set_from_literal("B", "1, 2").unwrap();
    assert_eq!(engine.intersection("A", "B").unwrap().result.representation(), "{1, 2}");
}

#[test]
fn round_trip_through_the_registry() {
    let mut engine = engine_with(&[("A", "{3, 1, 2, 3}")]);
    let a = engine.get_set("A").unwrap();
    assert_eq!(a.representation(), "{3, 1, 2}");

    assert!(engine.is_member(&Element::number(2.0), "A").unwrap());
    assert!(!engine.is_member(&Element::number(4.0), "A").unwrap());

    engine.remove_set("A").unwrap();
    assert_eq!(engine.get_set("A"), Err(SetError::UnknownSet { name: "A".to_string() }));
    assert_eq!(engine.remove_set("A"), Err(SetError::UnknownSet { name: "A".to_string() }));
}

#[test]
fn empty_names_are_rejected() {
    let mut engine = SetAlgebraEngine::new();
    assert_eq!(engine.add_set("  ", vec![Element::number(1.0)]), Err(SetError::EmptyName));
    assert_eq!(engine.add_set_from_literal("", "1"), Err(SetError::EmptyName));
}

#[test]
fn unknown_operands_are_reported() {
    let mut engine = engine_with(&[("A", "1")]);
    assert_eq!(engine.union("A", "X").unwrap_err(), SetError::UnknownSet { name: "X".to_string() });
}

#[test]
fn expressions_respect_precedence() {
    let mut engine = engine_with(&[("A", "1, 2, 3"), ("B", "2, 3, 4"), ("C", "3, 4, 5")]);

    assert_expression(&mut engine, "A ∩ B", "{2, 3}");
    assert_expression(&mut engine, "A ∪ B ∩ C", "{1, 2, 3, 4}");
    assert_expression(&mut engine, "(A ∪ B) ∩ C", "{3, 4}");
    assert_expression(&mut engine, "A - B ∪ C", "{1, 3, 4, 5}");
    assert_expression(&mut engine, "A Δ B", "{1, 4}");
    assert_expression(&mut engine, "{A} ∪ {B}", "{1, 2, 3, 4}");
    assert_expression(&mut engine, "", "{}");
}

#[test]
fn subset_expressions_yield_relations() {
    let mut engine = engine_with(&[("A", "1, 2, 3"), ("B", "2, 3, 4"), ("S", "2, 3")]);

    assert_relation(&mut engine, "A ⊆ B", RelationEvaluation::False);
    assert_relation(&mut engine, "S ⊆ A ∩ B", RelationEvaluation::True);
    assert_relation(&mut engine, "A ⊆ N", RelationEvaluation::True);
    assert_relation(&mut engine, "N ⊆ R", RelationEvaluation::True);
    assert_relation(&mut engine, "R ⊆ Z", RelationEvaluation::False);
    assert_relation(&mut engine, "P ⊆ Q", RelationEvaluation::True);
    assert_relation(&mut engine, "E ⊆ O", RelationEvaluation::False);
}

#[test]
fn infinite_sets_take_part_in_expressions() {
    let mut engine = engine_with(&[("A", "1, 2, 3, 4, x")]);

    assert_expression(&mut engine, "A ∩ E", "{2, 4}");
    assert_expression(&mut engine, "A - N", "{x}");
    assert_expression(&mut engine, "Aᶜ", "Aᶜ");
    assert_expression(&mut engine, "N ∪ A", "N ∪ A");

    let union = engine.evaluate_expression("E ∪ O").unwrap().result;
    assert_eq!(union.kind(), "infinite");
    let SetResult::Infinite { samples, .. } = union else {
        panic!("expected an infinite result");
    };
    assert!(contains(&samples, &Element::number(-3.0)));
    assert!(contains(&samples, &Element::number(4.0)));
}

#[test]
fn complement_against_an_explicit_universe() {
    let mut engine = engine_with(&[("A", "1, 2"), ("W", "1, 2, 3, 4")]);
    assert_eq!(engine.complement("A", "W").unwrap().result.representation(), "{3, 4}");
    assert_eq!(engine.complement("A", "U").unwrap().result.kind(), "infinite");
}

#[test]
fn universe_is_synthesised_without_u() {
    let mut engine = SetAlgebraEngine::with_registry(discreta::sets::registry::SetRegistry::empty());
    engine.add_set_from_literal("A", "1, 2").unwrap();
    engine.add_set_from_literal("B", "2, 3").unwrap();
    engine.add_set_from_literal("C", "4").unwrap();

    assert_expression(&mut engine, "Aᶜ", "{3, 4}");
    assert!(engine.registry().contains("U"));
}

#[test]
fn complement_without_any_other_set_has_no_universe() {
    let mut engine = SetAlgebraEngine::with_registry(discreta::sets::registry::SetRegistry::empty());
    engine.add_set_from_literal("A", "1, 2").unwrap();
    assert_eq!(engine.evaluate_expression("Aᶜ").unwrap_err(), SetError::NoUniverse);
    assert!(!engine.registry().contains("U"));

    engine.set_step_by_step_mode(true);
    let evaluation = engine.evaluate_expression("Aᶜ").unwrap();
    assert!(evaluation.error.is_some());
    assert_eq!(evaluation.result, SetResult::empty());
}

#[test]
fn symbolic_intermediates_compare_elements_structurally() {
    let mut engine = engine_with(&[("A", "{{1, 2}}"), ("B", "{{2, 1}}")]);
    let direct = engine.intersection("A", "B").unwrap().result;
    assert_eq!(direct.elements().map(<[_]>::len), Some(1));

    let routed = engine.evaluate_expression("(A ∪ N) ∩ B").unwrap().result;
    assert_same_elements(&routed, &direct);

    let mut engine = engine_with(&[("A", "@X"), ("B", "X")]);
    let direct = engine.intersection("A", "B").unwrap().result;
    assert_eq!(direct.elements().map(<[_]>::len), Some(0));

    let routed = engine.evaluate_expression("(A ∪ N) ∩ B").unwrap().result;
    assert_same_elements(&routed, &direct);
}

#[test]
fn undecidable_subsets_are_indeterminate() {
    let mut engine = engine_with(&[("A", "1, 2, 3")]);
    engine.add_infinite_set("S",
                            "S = {0, 1, 4, 9, ...}",
                            |x| x.as_number().map(|n| n >= 0.0 && n.sqrt().fract() == 0.0),
                            vec![Element::number(0.0), Element::number(1.0)])
          .unwrap();

    assert_eq!(engine.is_subset("S", "N").unwrap().result.evaluation(),
               Some(RelationEvaluation::Indeterminate));
    assert_eq!(engine.is_subset("N", "A").unwrap().result.evaluation(),
               Some(RelationEvaluation::Indeterminate));
    assert_eq!(engine.is_subset("E", "Z").unwrap().result.evaluation(),
               Some(RelationEvaluation::True));
    assert_relation(&mut engine, "S ⊆ A", RelationEvaluation::Indeterminate);
}

#[test]
fn disjoint_infinite_intersection_gets_a_placeholder_sample() {
    let mut engine = SetAlgebraEngine::new();
    let result = engine.intersection("E", "O").unwrap().result;
    let SetResult::Infinite { samples, .. } = result else {
        panic!("expected an infinite result, got {result}");
    };
    assert_eq!(samples.len(), 1);
    assert!(contains(&samples, &Element::text("...")));
}

#[test]
fn undecided_membership_keeps_elements_in_a_difference() {
    let mut engine = engine_with(&[("A", "1, x")]);
    engine.add_infinite_set("M", "M = numbers", |x| x.as_number().map(|_| true), Vec::new())
          .unwrap();

    assert_eq!(engine.difference("A", "M").unwrap().result.representation(), "{x}");
    assert_eq!(engine.intersection("A", "M").unwrap().result.representation(), "{1}");
}

#[test]
fn union_with_the_universe_is_universal() {
    let mut engine = engine_with(&[("A", "1, 2")]);
    assert_expression(&mut engine, "A ∪ U", "U");

    let direct = engine.union("U", "A").unwrap().result;
    assert_eq!(direct.kind(), "infinite");
    assert_eq!(direct.representation(), "U");
}

#[test]
fn temporaries_never_outlive_an_evaluation() {
    let mut engine = engine_with(&[("A", "1, 2"), ("B", "2, 3"), ("C", "3")]);
    engine.evaluate_expression("(A ∪ B) ∩ (B - C)").unwrap();
    assert!(engine.get_all_sets().keys().all(|name| !is_temp(name)));
    assert!(engine.registry().names().all(|name| !is_temp(name)));

    engine.set_step_by_step_mode(true);
    engine.evaluate_expression("A ∪ (B ∪").unwrap();
    assert!(engine.registry().names().all(|name| !is_temp(name)));
}

#[test]
fn malformed_expressions_fail_outside_step_mode() {
    let mut engine = engine_with(&[("A", "1"), ("B", "2")]);

    for expression in ["A ∪", "(A ∪ B", "A ∪ B)", "A B", "∪", "ᶜ"] {
        match engine.evaluate_expression(expression) {
            Err(SetError::MalformedExpression { .. }) => {},
            other => panic!("'{expression}' gave {other:?}"),
        }
    }

    assert_eq!(engine.evaluate_expression("A ∪ X ∪ Y ∪ X").unwrap_err(),
               SetError::UndefinedSets { names: vec!["X".to_string(), "Y".to_string()] });
}

#[test]
fn step_mode_recovers_and_explains() {
    let mut engine = engine_with(&[("A", "1, 2"), ("B", "2, 3")]);
    engine.set_step_by_step_mode(true);

    let evaluation = engine.evaluate_expression("A ∪ B").unwrap();
    assert!(evaluation.error.is_none());
    assert!(evaluation.steps.iter().any(|s| s.description.contains("postfix")));
    assert_eq!(evaluation.steps.last().map(|s| s.description.as_str()), Some("Final result"));

    let undefined = engine.evaluate_expression("A ∪ X").unwrap();
    assert_eq!(undefined.result.representation(), "{1, 2}");
    assert!(engine.get_set("X").unwrap().elements().is_some_and(<[_]>::is_empty));

    let leftover = engine.evaluate_expression("A B").unwrap();
    assert_eq!(leftover.result.representation(), "{1, 2, 3}");

    let broken = engine.evaluate_expression("A ∪").unwrap();
    assert!(broken.error.is_some());
    assert_eq!(broken.result, SetResult::empty());
}

#[test]
fn steps_are_only_recorded_in_step_mode() {
    let mut engine = engine_with(&[("A", "1, 2"), ("B", "2, 3")]);
    assert!(engine.intersection("A", "B").unwrap().steps.is_empty());

    engine.set_step_by_step_mode(true);
    let evaluation = engine.intersection("A", "B").unwrap();
    assert!(evaluation.steps.len() >= 3);
    assert!(evaluation.steps[0].description.starts_with("Identify the elements"));
}
