use std::collections::HashMap;

use indexmap::IndexMap;
use log::{debug, trace};

use crate::{
    ast::SetOperator,
    error::SetError,
    sets::{
        element::{Element, Scalar, contains, dedup, format_elements},
        infinite::InfiniteSet,
        infinite_ops::{self, Operand},
        registry::{SetRegistry, StoredSet, is_temp},
        result::{Evaluation, Narration, RelationEvaluation, SetResult, SetValue},
    },
};

type CacheKey = (SetOperator, String, String);

/// A registry of named sets together with the operations over them.
///
/// Every operation takes set names. Results are cached by operator and
/// operand names while step-by-step mode is off; any change to the registry
/// empties the cache.
///
/// # Example
/// ```
/// use discreta::sets::{SetAlgebraEngine, element::Element};
///
/// let mut engine = SetAlgebraEngine::new();
/// engine.add_set_from_literal("A", "1, 2, 3").unwrap();
/// engine.add_set_from_literal("B", "{2, 3, 4}").unwrap();
///
/// let union = engine.union("A", "B").unwrap();
/// assert_eq!(union.result.representation(), "{1, 2, 3, 4}");
/// assert!(union.steps.is_empty());
/// ```
#[derive(Debug)]
pub struct SetAlgebraEngine {
    pub(crate) registry:     SetRegistry,
    cache:                   HashMap<CacheKey, SetValue>,
    pub(crate) step_by_step: bool,
    computations:            u64,
}

impl Default for SetAlgebraEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl SetAlgebraEngine {
    /// Creates an engine whose registry holds only the predefined infinite
    /// sets. Step-by-step mode starts off.
    #[must_use]
    pub fn new() -> Self {
        Self::with_registry(SetRegistry::new())
    }

    /// Creates an engine over an existing registry.
    #[must_use]
    pub fn with_registry(registry: SetRegistry) -> Self {
        Self { registry,
               cache: HashMap::new(),
               step_by_step: false,
               computations: 0 }
    }

    /// Turns step-by-step explanations on or off.
    pub fn set_step_by_step_mode(&mut self, enabled: bool) {
        debug!("step-by-step mode {}", if enabled { "on" } else { "off" });
        self.step_by_step = enabled;
    }

    /// Whether operations narrate their steps.
    #[must_use]
    pub const fn step_by_step_mode(&self) -> bool {
        self.step_by_step
    }

    /// How many operation results were computed rather than served from the
    /// cache.
    #[must_use]
    pub const fn computations(&self) -> u64 {
        self.computations
    }

    /// The underlying registry.
    #[must_use]
    pub const fn registry(&self) -> &SetRegistry {
        &self.registry
    }

    pub(crate) fn clear_cache(&mut self) {
        if !self.cache.is_empty() {
            debug!("operation cache cleared ({} entries)", self.cache.len());
            self.cache.clear();
        }
    }

    /// Registers (or replaces) a finite set. Duplicate elements are dropped,
    /// keeping the first occurrence.
    ///
    /// # Errors
    /// Returns `SetError::EmptyName` if `name` is blank.
    pub fn add_set(&mut self, name: &str, elements: Vec<Element>) -> Result<(), SetError> {
        if name.trim().is_empty() {
            return Err(SetError::EmptyName);
        }

        let elements = dedup(elements);
        debug!("registered finite set '{name}' with {} elements", elements.len());
        self.registry.insert_finite(name, elements);
        self.clear_cache();
        Ok(())
    }

    /// Registers a finite set written as a literal such as `{1, 2, {3, 4}}`
    /// or `1, 2, @A`.
    ///
    /// # Errors
    /// - `SetError::EmptyName` if `name` is blank.
    /// - `SetError::InvalidElements` if the literal has unbalanced braces.
    pub fn add_set_from_literal(&mut self, name: &str, literal: &str) -> Result<(), SetError> {
        if name.trim().is_empty() {
            return Err(SetError::EmptyName);
        }
        self.add_set(name, Element::parse_list(literal)?)
    }

    /// Registers a finite set from individual tokens, each interpreted with
    /// [`Element::from_token`].
    ///
    /// # Errors
    /// Same as [`Self::add_set_from_literal`].
    ///
    /// # Example
    /// ```
    /// use discreta::sets::SetAlgebraEngine;
    ///
    /// let mut engine = SetAlgebraEngine::new();
    /// engine.add_set_from_tokens("X", &["1", "2", "2", "3"]).unwrap();
    /// assert_eq!(engine.get_set("X").unwrap().elements().map(<[_]>::len), Some(3));
    /// ```
    pub fn add_set_from_tokens<S: AsRef<str>>(&mut self, name: &str, tokens: &[S]) -> Result<(), SetError> {
        if name.trim().is_empty() {
            return Err(SetError::EmptyName);
        }
        let elements = tokens.iter()
                             .filter(|t| !t.as_ref().trim().is_empty())
                             .map(|t| Element::from_token(t.as_ref()))
                             .collect::<Result<Vec<_>, _>>()?;
        self.add_set(name, elements)
    }

    /// Registers (or replaces) an infinite set.
    ///
    /// # Errors
    /// Returns `SetError::EmptyName` if `name` is blank.
    ///
    /// # Example
    /// ```
    /// use discreta::sets::{SetAlgebraEngine, element::Element};
    ///
    /// let mut engine = SetAlgebraEngine::new();
    /// engine.add_infinite_set("S",
    ///                         "S = {0, 1, 4, 9, ...}",
    ///                         |x| x.as_number().map(|n| n >= 0.0 && n.sqrt().fract() == 0.0),
    ///                         vec![Element::number(0.0), Element::number(1.0)])
    ///       .unwrap();
    /// assert!(engine.is_member(&Element::number(16.0), "S").unwrap());
    /// ```
    pub fn add_infinite_set(&mut self,
                            name: &str,
                            definition: &str,
                            membership: impl Fn(&Scalar) -> Option<bool> + 'static,
                            samples: Vec<Element>)
                            -> Result<(), SetError> {
        if name.trim().is_empty() {
            return Err(SetError::EmptyName);
        }

        debug!("registered infinite set '{name}' ({definition})");
        self.registry
            .insert_infinite(name, InfiniteSet::new(definition, membership, dedup(samples)));
        self.clear_cache();
        Ok(())
    }

    /// Removes a set. Predefined sets are not protected.
    ///
    /// # Errors
    /// Returns `SetError::UnknownSet` if nothing is registered under `name`.
    pub fn remove_set(&mut self, name: &str) -> Result<(), SetError> {
        if !self.registry.remove(name) {
            return Err(SetError::UnknownSet { name: name.to_string() });
        }
        debug!("removed set '{name}'");
        self.clear_cache();
        Ok(())
    }

    /// Reads a registered set back.
    ///
    /// # Errors
    /// Returns `SetError::UnknownSet` if nothing is registered under `name`.
    pub fn get_set(&self, name: &str) -> Result<SetResult, SetError> {
        self.registry
            .get(name)
            .map(|set| SetValue::from(set).to_result())
            .ok_or_else(|| SetError::UnknownSet { name: name.to_string() })
    }

    /// Every registered set except temporaries, finite sets first.
    #[must_use]
    pub fn get_all_sets(&self) -> IndexMap<String, SetResult> {
        let finite = self.registry
                         .finite_sets()
                         .map(|(name, elements)| (name, SetResult::finite(elements.to_vec())));
        let infinite = self.registry.infinite_sets().map(|(name, set)| {
                                                        (name,
                                                         SetValue::Infinite(set.clone()).to_result())
                                                    });

        finite.chain(infinite)
              .filter(|(name, _)| !is_temp(name))
              .map(|(name, result)| (name.to_string(), result))
              .collect()
    }

    /// Whether `element` belongs to the set `name`: structural equality for
    /// finite sets, the membership predicate for infinite ones. An undecided
    /// predicate counts as "no".
    ///
    /// # Errors
    /// Returns `SetError::UnknownSet` if nothing is registered under `name`.
    pub fn is_member(&self, element: &Element, name: &str) -> Result<bool, SetError> {
        match self.registry.get(name) {
            Some(StoredSet::Finite(elements)) => Ok(contains(&elements, element)),
            Some(StoredSet::Infinite(set)) => Ok(set.test(element) == Some(true)),
            None => Err(SetError::UnknownSet { name: name.to_string() }),
        }
    }

    /// `a ∪ b`, keeping the order of `a` followed by the new elements of `b`.
    ///
    /// # Errors
    /// Returns `SetError::UnknownSet` if either set is not registered.
    pub fn union(&mut self, a: &str, b: &str) -> Result<Evaluation, SetError> {
        self.evaluate_operation(SetOperator::Union, a, b)
    }

    /// `a ∩ b`, in the order of `a`.
    ///
    /// # Errors
    /// Returns `SetError::UnknownSet` if either set is not registered.
    pub fn intersection(&mut self, a: &str, b: &str) -> Result<Evaluation, SetError> {
        self.evaluate_operation(SetOperator::Intersection, a, b)
    }

    /// `a - b`, in the order of `a`.
    ///
    /// # Errors
    /// Returns `SetError::UnknownSet` if either set is not registered.
    pub fn difference(&mut self, a: &str, b: &str) -> Result<Evaluation, SetError> {
        self.evaluate_operation(SetOperator::Difference, a, b)
    }

    /// `a Δ b`: the elements of `a` not in `b`, then those of `b` not in `a`.
    ///
    /// # Errors
    /// Returns `SetError::UnknownSet` if either set is not registered.
    pub fn symmetric_difference(&mut self, a: &str, b: &str) -> Result<Evaluation, SetError> {
        self.evaluate_operation(SetOperator::SymmetricDifference, a, b)
    }

    /// The complement of `set` relative to `universe`, that is
    /// `universe - set`.
    ///
    /// # Errors
    /// Returns `SetError::UnknownSet` if either set is not registered.
    ///
    /// # Example
    /// ```
    /// use discreta::sets::SetAlgebraEngine;
    ///
    /// let mut engine = SetAlgebraEngine::new();
    /// engine.add_set_from_literal("A", "1, 2").unwrap();
    /// engine.add_set_from_literal("W", "1, 2, 3, 4").unwrap();
    ///
    /// let complement = engine.complement("A", "W").unwrap();
    /// assert_eq!(complement.result.representation(), "{3, 4}");
    ///
    /// let symbolic = engine.complement("A", "U").unwrap();
    /// assert_eq!(symbolic.result.representation(), "Aᶜ");
    /// ```
    pub fn complement(&mut self, set: &str, universe: &str) -> Result<Evaluation, SetError> {
        self.evaluate_operation(SetOperator::Complement, set, universe)
    }

    /// Whether `subset ⊆ superset`, as a relation result.
    ///
    /// Two infinite sets are compared through the table of known inclusions
    /// between the predefined sets; outside it the relation is
    /// indeterminate.
    ///
    /// # Errors
    /// Returns `SetError::UnknownSet` if either set is not registered.
    ///
    /// # Example
    /// ```
    /// use discreta::sets::{SetAlgebraEngine, result::RelationEvaluation};
    ///
    /// let mut engine = SetAlgebraEngine::new();
    /// let relation = engine.is_subset("N", "R").unwrap();
    /// assert_eq!(relation.result.evaluation(), Some(RelationEvaluation::True));
    /// assert_eq!(relation.result.representation(), "N ⊆ R");
    /// ```
    pub fn is_subset(&mut self, subset: &str, superset: &str) -> Result<Evaluation, SetError> {
        self.evaluate_operation(SetOperator::Subset, subset, superset)
    }

    fn evaluate_operation(&mut self, op: SetOperator, a: &str, b: &str) -> Result<Evaluation, SetError> {
        let mut steps = Narration::new(self.step_by_step);
        let value = self.apply(op, a, b, &mut steps)?;
        Ok(Evaluation::new(value.to_result(), steps.into_steps()))
    }

    /// How a set is shown in representations: its name, or for a temporary
    /// the parenthesised value it holds.
    pub(crate) fn label(&self, name: &str) -> String {
        if !is_temp(name) {
            return name.to_string();
        }
        match self.registry.get(name) {
            Some(StoredSet::Finite(elements)) => format!("({})", format_elements(&elements)),
            Some(StoredSet::Infinite(set)) => format!("({})", set.representation),
            None => name.to_string(),
        }
    }

    /// How a set's contents are shown in steps.
    fn describe(&self, name: &str) -> String {
        match self.registry.get(name) {
            Some(StoredSet::Finite(elements)) => describe_elements(&elements),
            Some(StoredSet::Infinite(set)) => set.definition,
            None => "?".to_string(),
        }
    }

    fn operand(&self, name: &str) -> Result<Operand, SetError> {
        let set = self.registry
                      .get(name)
                      .ok_or_else(|| SetError::UnknownSet { name: name.to_string() })?;
        Ok(Operand { label: self.label(name),
                     set })
    }

    /// Applies one operator to two registered sets, through the cache when
    /// step-by-step mode is off.
    pub(crate) fn apply(&mut self,
                        op: SetOperator,
                        a: &str,
                        b: &str,
                        steps: &mut Narration)
                        -> Result<SetValue, SetError> {
        let left = self.operand(a)?;
        let right = self.operand(b)?;

        let key = (op, a.to_string(), b.to_string());
        if !self.step_by_step
           && let Some(cached) = self.cache.get(&key)
        {
            trace!("cache hit: {a} {op} {b}");
            return Ok(cached.clone());
        }

        self.computations += 1;

        steps.note(format!("Identify the elements of sets {} and {}", left.label, right.label),
                   format!("Set {}: {}\nSet {}: {}",
                           left.label,
                           self.describe(a),
                           right.label,
                           self.describe(b)));

        let value = match (&left.set, &right.set) {
            (StoredSet::Finite(x), StoredSet::Finite(y)) => finite_operation(op, &left.label, x, &right.label, y, steps),
            _ => infinite_operation(op, &left, &right, steps),
        };

        if !self.step_by_step {
            self.cache.insert(key, value.clone());
        }

        Ok(value)
    }
}

fn describe_elements(elements: &[Element]) -> String {
    if elements.is_empty() {
        "∅".to_string()
    } else {
        format_elements(elements)
    }
}

fn relation(subset: &str, superset: &str, evaluation: RelationEvaluation) -> SetValue {
    let symbol = if evaluation == RelationEvaluation::False { "⊈" } else { "⊆" };
    SetValue::Relation { representation: format!("{subset} {symbol} {superset}"),
                         evaluation }
}

fn finite_operation(op: SetOperator,
                    a: &str,
                    x: &[Element],
                    b: &str,
                    y: &[Element],
                    steps: &mut Narration)
                    -> SetValue {
    let only_in = |from: &[Element], other: &[Element]| -> Vec<Element> {
        from.iter().filter(|&e| !contains(other, e)).cloned().collect()
    };
    let in_both: Vec<Element> = x.iter().filter(|&e| contains(y, e)).cloned().collect();

    let result = match op {
        SetOperator::Union => {
            let added = only_in(y, x);
            steps.note(format!("Take every element of the first set {a}"),
                       format!("Initial elements: {}", describe_elements(x)));
            steps.note(format!("Add the elements of {b} that are not in {a}"),
                       format!("Elements to add: {}", describe_elements(&added)));
            x.iter().cloned().chain(added).collect()
        },
        SetOperator::Intersection => {
            steps.note(format!("Examine each element of the first set {a}"),
                       format!("Look for the elements of {a} that are also in {b}"));
            steps.note("Common elements found",
                       format!("Elements in both sets: {}", describe_elements(&in_both)));
            in_both
        },
        SetOperator::Difference => {
            let kept = only_in(x, y);
            steps.note(format!("Examine each element of the first set {a}"),
                       format!("Identify the elements of {a} that are NOT in {b}"));
            steps.note("Identify common elements",
                       format!("Elements in both sets: {}", describe_elements(&in_both)));
            steps.note("Remove the common elements from the first set",
                       format!("Elements in {a} but not in {b}: {}", describe_elements(&kept)));
            kept
        },
        SetOperator::SymmetricDifference => {
            let left = only_in(x, y);
            let right = only_in(y, x);
            steps.note(format!("Elements only in {a}"), describe_elements(&left));
            steps.note(format!("Elements only in {b}"), describe_elements(&right));
            left.into_iter().chain(right).collect()
        },
        SetOperator::Complement => {
            let kept = only_in(y, x);
            steps.note(format!("Use {b} as the universe"),
                       format!("Keep the elements of {b} that are not in {a}: {}",
                               describe_elements(&kept)));
            kept
        },
        SetOperator::Subset => {
            let missing = only_in(x, y);
            steps.note(format!("Check every element of {a} against {b}"),
                       format!("Elements of {a} missing from {b}: {}", describe_elements(&missing)));
            let value = relation(a, b, missing.is_empty().into());
            steps.note("Final result", value.to_result().representation().to_string());
            return value;
        },
    };

    steps.note("Final result",
               format!("{} = {}", expression(op, a, b), describe_elements(&result)));
    SetValue::Finite(result)
}

fn infinite_operation(op: SetOperator, a: &Operand, b: &Operand, steps: &mut Narration) -> SetValue {
    let value = match op {
        SetOperator::Union => infinite_ops::union(a, b),
        SetOperator::Intersection => infinite_ops::intersection(a, b),
        SetOperator::Difference => infinite_ops::difference(a, b),
        SetOperator::SymmetricDifference => infinite_ops::symmetric_difference(a, b),
        SetOperator::Complement => infinite_ops::complement(a, b),
        SetOperator::Subset => relation(&a.label, &b.label, infinite_ops::is_subset(a, b)),
    };

    let detail = match (op, &value) {
        (SetOperator::Subset, _) => "Inclusion between infinite sets is decided by the membership test or by the known hierarchy of number sets",
        (_, SetValue::Finite(_)) => "The finite operand is filtered through the membership test of the infinite one",
        _ => "The result is represented symbolically",
    };
    steps.note("Operation with infinite sets", detail);

    let shown = match &value {
        SetValue::Finite(elements) => describe_elements(elements),
        other => other.to_result().representation().to_string(),
    };
    let final_detail = if op == SetOperator::Subset {
        shown
    } else {
        format!("{} = {shown}", expression(op, &a.label, &b.label))
    };
    steps.note("Final result", final_detail);

    value
}

/// `a ∪ b`, `aᶜ` (relative to `b`), ...
fn expression(op: SetOperator, a: &str, b: &str) -> String {
    match op {
        SetOperator::Complement => format!("{a}ᶜ"),
        _ => format!("{a} {op} {b}"),
    }
}
