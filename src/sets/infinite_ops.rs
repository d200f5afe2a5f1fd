//! Operations where at least one operand is an infinite set.
//!
//! Finite operands take part through their elements; infinite operands
//! through their membership predicate. Results that cannot be enumerated are
//! symbolic: their definition and representation are composed from the
//! operands, and their predicate from the operands' predicates.

use std::rc::Rc;

use crate::sets::{
    element::{Element, contains, dedup, format_elements},
    infinite::{InfiniteSet, Membership, known_subset},
    registry::StoredSet,
    result::{RelationEvaluation, SetValue},
};

/// A resolved operand: how it is shown, and what it holds.
#[derive(Debug, Clone)]
pub(crate) struct Operand {
    pub label: String,
    pub set:   StoredSet,
}

impl Operand {
    fn definition(&self) -> String {
        match &self.set {
            StoredSet::Finite(elements) => format_elements(elements),
            StoredSet::Infinite(set) => set.definition.clone(),
        }
    }

    fn test(&self, element: &Element) -> Option<bool> {
        match &self.set {
            StoredSet::Finite(elements) => Some(contains(elements, element)),
            StoredSet::Infinite(set) => set.test(element),
        }
    }

    fn samples(&self) -> &[Element] {
        match &self.set {
            StoredSet::Finite(elements) => elements,
            StoredSet::Infinite(set) => &set.samples,
        }
    }

    fn membership(&self) -> Membership {
        match &self.set {
            StoredSet::Finite(elements) => {
                let elements = elements.clone();
                Rc::new(move |x: &Element| Some(contains(&elements, x)))
            },
            StoredSet::Infinite(set) => set.membership(),
        }
    }

    const fn infinite(&self) -> Option<&InfiniteSet> {
        match &self.set {
            StoredSet::Infinite(set) => Some(set),
            StoredSet::Finite(_) => None,
        }
    }

    fn is_universal(&self) -> bool {
        self.infinite().is_some_and(InfiniteSet::is_universal)
    }
}

fn universal() -> SetValue {
    SetValue::Infinite(InfiniteSet::composed("U".to_string(),
                                             "U".to_string(),
                                             Rc::new(|_: &Element| Some(true)),
                                             Vec::new()))
}

/// Elements of `from` that `keep` accepts.
fn filter(from: &[Element], keep: impl Fn(&Element) -> bool) -> Vec<Element> {
    from.iter().filter(|&e| keep(e)).cloned().collect()
}

pub(crate) fn union(a: &Operand, b: &Operand) -> SetValue {
    if a.is_universal() || b.is_universal() {
        return universal();
    }

    let (pa, pb) = (a.membership(), b.membership());
    let membership: Membership = Rc::new(move |x: &Element| match (pa(x), pb(x)) {
                                     (Some(true), _) | (_, Some(true)) => Some(true),
                                     (Some(false), Some(false)) => Some(false),
                                     _ => None,
                                 });

    let samples = dedup(a.samples().iter().chain(b.samples()).cloned().collect());

    SetValue::Infinite(InfiniteSet::composed(format!("{} ∪ {}", a.definition(), b.definition()),
                                             format!("{} ∪ {}", a.label, b.label),
                                             membership,
                                             samples))
}

pub(crate) fn intersection(a: &Operand, b: &Operand) -> SetValue {
    match (&a.set, &b.set) {
        (StoredSet::Finite(elements), _) => {
            return SetValue::Finite(filter(elements, |e| b.test(e) == Some(true)));
        },
        (_, StoredSet::Finite(elements)) => {
            return SetValue::Finite(filter(elements, |e| a.test(e) == Some(true)));
        },
        _ => {},
    }

    let (pa, pb) = (a.membership(), b.membership());
    let membership: Membership = Rc::new(move |x: &Element| match (pa(x), pb(x)) {
                                     (Some(false), _) | (_, Some(false)) => Some(false),
                                     (Some(true), Some(true)) => Some(true),
                                     _ => None,
                                 });

    let in_both = |e: &Element| a.test(e) == Some(true) && b.test(e) == Some(true);
    let mut samples = dedup(a.samples()
                             .iter()
                             .chain(b.samples())
                             .filter(|&e| in_both(e))
                             .cloned()
                             .collect());
    if samples.is_empty() {
        samples.push(Element::text("..."));
    }

    SetValue::Infinite(InfiniteSet::composed(format!("{} ∩ {}", a.definition(), b.definition()),
                                             format!("{} ∩ {}", a.label, b.label),
                                             membership,
                                             samples))
}

pub(crate) fn difference(a: &Operand, b: &Operand) -> SetValue {
    if let StoredSet::Finite(elements) = &a.set {
        // an undecided predicate keeps the element
        return SetValue::Finite(filter(elements, |e| b.test(e) != Some(true)));
    }

    let (pa, pb) = (a.membership(), b.membership());
    let membership: Membership = Rc::new(move |x: &Element| match (pa(x), pb(x)) {
                                     (Some(false), _) | (_, Some(true)) => Some(false),
                                     (Some(true), Some(false)) => Some(true),
                                     _ => None,
                                 });

    let samples = filter(a.samples(), |e| b.test(e) == Some(false));

    SetValue::Infinite(InfiniteSet::composed(format!("{} - {}", a.definition(), b.definition()),
                                             format!("{} - {}", a.label, b.label),
                                             membership,
                                             samples))
}

pub(crate) fn symmetric_difference(a: &Operand, b: &Operand) -> SetValue {
    let (pa, pb) = (a.membership(), b.membership());
    let membership: Membership = Rc::new(move |x: &Element| Some(pa(x)? != pb(x)?));

    let mut samples = filter(a.samples(), |e| b.test(e) == Some(false));
    samples.extend(filter(b.samples(), |e| a.test(e) == Some(false)));

    let (da, db) = (a.definition(), b.definition());
    SetValue::Infinite(InfiniteSet::composed(format!("({da} - {db}) ∪ ({db} - {da})"),
                                             format!("{} Δ {}", a.label, b.label),
                                             membership,
                                             dedup(samples)))
}

/// `universe - set`; symbolic `setᶜ` when the universe is universal.
pub(crate) fn complement(set: &Operand, universe: &Operand) -> SetValue {
    if !universe.is_universal() {
        return difference(universe, set);
    }

    let ps = set.membership();
    let membership: Membership = Rc::new(move |x: &Element| ps(x).map(|inside| !inside));

    SetValue::Infinite(InfiniteSet::composed(format!("{} - {}", universe.definition(), set.definition()),
                                             format!("{}ᶜ", set.label),
                                             membership,
                                             Vec::new()))
}

pub(crate) fn is_subset(a: &Operand, b: &Operand) -> RelationEvaluation {
    if b.is_universal() {
        return RelationEvaluation::True;
    }
    if a.is_universal() {
        return RelationEvaluation::False;
    }

    if let StoredSet::Finite(elements) = &a.set {
        return elements.iter()
                       .all(|e| b.test(e) == Some(true))
                       .into();
    }

    match (a.infinite(), b.infinite()) {
        (Some(sa), Some(sb)) => {
            known_subset(sa.label(), sb.label()).map_or(RelationEvaluation::Indeterminate,
                                                        RelationEvaluation::from)
        },
        _ => RelationEvaluation::Indeterminate,
    }
}
