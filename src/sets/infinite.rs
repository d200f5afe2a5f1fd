use std::{fmt, rc::Rc};

use crate::{
    sets::element::{Element, Scalar},
    util::num::{f64_to_i64_exact, is_prime},
};

/// A membership predicate over elements.
///
/// `None` means the predicate could not decide (for example a user predicate
/// that does not understand the value it was given).
pub type Membership = Rc<dyn Fn(&Element) -> Option<bool>>;

/// A symbolic set: a display definition, a membership predicate and a few
/// representative samples.
#[derive(Clone)]
pub struct InfiniteSet {
    /// Human-readable definition such as `ℕ = {0, 1, 2, 3, ...}`.
    pub definition:     String,
    /// How results built from this set are shown.
    pub representation: String,
    /// Representative elements, possibly empty.
    pub samples:        Vec<Element>,
    membership:         Membership,
}

impl fmt::Debug for InfiniteSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InfiniteSet")
         .field("definition", &self.definition)
         .field("representation", &self.representation)
         .field("samples", &self.samples)
         .finish_non_exhaustive()
    }
}

impl InfiniteSet {
    /// Creates a set whose representation is its definition.
    ///
    /// The predicate sees every element as a [`Scalar`].
    pub fn new(definition: impl Into<String>,
               membership: impl Fn(&Scalar) -> Option<bool> + 'static,
               samples: Vec<Element>)
               -> Self {
        let definition = definition.into();
        Self { representation: definition.clone(),
               definition,
               samples,
               membership: Rc::new(move |element: &Element| membership(&Scalar::from(element))) }
    }

    pub(crate) fn composed(definition: String,
                           representation: String,
                           membership: Membership,
                           samples: Vec<Element>)
                           -> Self {
        Self { definition,
               representation,
               samples,
               membership }
    }

    /// Asks the predicate about an element.
    #[must_use]
    pub fn test(&self, element: &Element) -> Option<bool> {
        (self.membership)(element)
    }

    pub(crate) fn membership(&self) -> Membership {
        Rc::clone(&self.membership)
    }

    /// The symbol a definition starts with: the text before ` = `, or the
    /// whole definition.
    ///
    /// # Example
    /// ```
    /// use discreta::sets::infinite::label;
    ///
    /// assert_eq!(label("ℕ = {0, 1, 2, 3, ...}"), "ℕ");
    /// assert_eq!(label("U"), "U");
    /// ```
    #[must_use]
    pub fn label(&self) -> &str {
        label(&self.definition)
    }

    /// Whether every value belongs to this set.
    #[must_use]
    pub fn is_universal(&self) -> bool {
        let label = self.label();
        label == "U" || label == "Universal"
    }
}

/// See [`InfiniteSet::label`].
#[must_use]
pub fn label(definition: &str) -> &str {
    definition.split_once(" = ")
              .map_or(definition, |(symbol, _)| symbol)
              .trim()
}

/// The numeric chain `ℕ ⊆ ℤ ⊆ ℚ ⊆ ℝ ⊆ ℂ ⊆ U`.
const CHAIN: [&str; 6] = ["ℕ", "ℤ", "ℚ", "ℝ", "ℂ", "U"];

/// Sets hanging off the chain, with the chain member directly above them.
const BRANCHES: [(&str, &str); 3] = [("E", "ℤ"), ("O", "ℤ"), ("P", "ℕ")];

/// Looks the pair up in the table of known inclusions between the predefined
/// sets, by definition label.
///
/// Returns `None` when either label is not in the table.
///
/// # Example
/// ```
/// use discreta::sets::infinite::known_subset;
///
/// assert_eq!(known_subset("ℕ", "ℝ"), Some(true));
/// assert_eq!(known_subset("ℝ", "ℤ"), Some(false));
/// assert_eq!(known_subset("P", "ℚ"), Some(true));
/// assert_eq!(known_subset("E", "O"), Some(false));
/// assert_eq!(known_subset("ℕ", "Squares"), None);
/// ```
#[must_use]
pub fn known_subset(subset: &str, superset: &str) -> Option<bool> {
    let known = |l: &str| CHAIN.contains(&l) || BRANCHES.iter().any(|(b, _)| *b == l);
    if !known(subset) || !known(superset) {
        return None;
    }

    if subset == superset {
        return Some(true);
    }

    let start = BRANCHES.iter()
                        .find(|(b, _)| *b == subset)
                        .map_or(subset, |(_, parent)| *parent);

    let from = CHAIN.iter().position(|l| *l == start)?;
    Some(CHAIN[from..].contains(&superset))
}

fn numbers(values: &[f64]) -> Vec<Element> {
    values.iter().copied().map(Element::number).collect()
}

fn integer(x: &Scalar) -> Option<i64> {
    x.as_number().and_then(f64_to_i64_exact)
}

fn is_complex_literal(text: &str) -> bool {
    let Some(body) = text.trim().strip_suffix('i') else {
        return false;
    };
    let body = body.replace(' ', "");
    if body.is_empty() || body == "+" || body == "-" {
        return true;
    }

    // `a+b`, `a-b`, `b` (the imaginary part may be bare: `3+i`)
    let split = body.char_indices()
                    .skip(1)
                    .filter(|(_, c)| *c == '+' || *c == '-')
                    .last()
                    .map(|(i, _)| i);

    let number = |s: &str| s.is_empty() || s == "+" || s == "-" || s.parse::<f64>().is_ok();
    match split {
        Some(i) => body[..i].parse::<f64>().is_ok() && number(&body[i..]),
        None => number(&body),
    }
}

/// The sets every registry starts with, in registration order:
/// `N`, `Z`, `Q`, `R`, `E`, `O`, `P`, `U` and `C`.
#[must_use]
pub fn predefined() -> Vec<(&'static str, InfiniteSet)> {
    vec![("N",
          InfiniteSet::new("ℕ = {0, 1, 2, 3, ...}",
                           |x| Some(integer(x).is_some_and(|n| n >= 0)),
                           numbers(&[0.0, 1.0, 2.0, 3.0, 4.0]))),
         ("Z",
          InfiniteSet::new("ℤ = {..., -2, -1, 0, 1, 2, ...}",
                           |x| Some(integer(x).is_some()),
                           numbers(&[-2.0, -1.0, 0.0, 1.0, 2.0]))),
         ("Q",
          InfiniteSet::new("ℚ = {p/q | p, q ∈ ℤ, q ≠ 0}",
                           |x| {
                               Some(match x {
                                   Scalar::Number(n) => n.is_finite(),
                                   Scalar::Text(t) => t.split_once('/').is_some_and(|(p, q)| {
                                                          p.trim().parse::<i64>().is_ok()
                                                          && q.trim().parse::<i64>().is_ok_and(|q| q != 0)
                                                      }),
                                   Scalar::Set(_) => false,
                               })
                           },
                           numbers(&[0.0, 1.0, -1.0, 0.5, -0.5]))),
         ("R",
          InfiniteSet::new("ℝ = (-∞, ∞)",
                           |x| Some(x.as_number().is_some_and(f64::is_finite)),
                           numbers(&[0.0, 1.0, -1.0, 0.5]))),
         ("E",
          InfiniteSet::new("E = {..., -4, -2, 0, 2, 4, ...}",
                           |x| Some(integer(x).is_some_and(|n| n % 2 == 0)),
                           numbers(&[-4.0, -2.0, 0.0, 2.0, 4.0]))),
         ("O",
          InfiniteSet::new("O = {..., -3, -1, 1, 3, ...}",
                           |x| Some(integer(x).is_some_and(|n| n % 2 != 0)),
                           numbers(&[-3.0, -1.0, 1.0, 3.0]))),
         ("P",
          InfiniteSet::new("P = {2, 3, 5, 7, 11, ...}",
                           |x| Some(integer(x).is_some_and(is_prime)),
                           numbers(&[2.0, 3.0, 5.0, 7.0, 11.0]))),
         ("U", InfiniteSet::new("U", |_| Some(true), Vec::new())),
         ("C",
          InfiniteSet::new("ℂ = {a + bi | a, b ∈ ℝ}",
                           |x| {
                               Some(match x {
                                   Scalar::Number(n) => n.is_finite(),
                                   Scalar::Text(t) => is_complex_literal(t),
                                   Scalar::Set(_) => false,
                               })
                           },
                           vec![Element::number(0.0), Element::number(1.0), Element::text("i"),
                                Element::text("1+2i")]))]
}

/// Names of the predefined sets.
pub const PREDEFINED_NAMES: [&str; 9] = ["N", "Z", "Q", "R", "E", "O", "P", "U", "C"];
