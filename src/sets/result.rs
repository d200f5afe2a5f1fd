use std::fmt::{self, Display};

use crate::sets::{
    element::{Element, format_elements},
    infinite::InfiniteSet,
    registry::StoredSet,
};

/// Truth value of a relation between sets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RelationEvaluation {
    /// The relation holds.
    True,
    /// The relation does not hold.
    False,
    /// Neither could be established from the available information.
    Indeterminate,
}

impl From<bool> for RelationEvaluation {
    fn from(value: bool) -> Self {
        if value { Self::True } else { Self::False }
    }
}

impl Display for RelationEvaluation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::True => write!(f, "true"),
            Self::False => write!(f, "false"),
            Self::Indeterminate => write!(f, "indeterminate"),
        }
    }
}

/// What every set operation returns.
#[derive(Debug, Clone, PartialEq)]
pub enum SetResult {
    /// An enumerated set.
    Finite {
        /// The elements, without duplicates.
        elements:       Vec<Element>,
        /// `{1, 2, 3}`
        representation: String,
    },
    /// A symbolic set.
    Infinite {
        /// Definition built from the operands' definitions.
        definition:     String,
        /// Definition built from the operands' names, such as `ℕ ∪ A`.
        representation: String,
        /// Representative elements, possibly empty.
        samples:        Vec<Element>,
    },
    /// The outcome of a subset test.
    Relation {
        /// `A ⊆ B` or `A ⊈ B`.
        representation: String,
        /// Whether it holds.
        evaluation:     RelationEvaluation,
    },
}

impl SetResult {
    /// A finite result rendered as a set literal.
    #[must_use]
    pub fn finite(elements: Vec<Element>) -> Self {
        let representation = format_elements(&elements);
        Self::Finite { elements,
                       representation }
    }

    /// The empty finite set.
    #[must_use]
    pub fn empty() -> Self {
        Self::finite(Vec::new())
    }

    /// The rendering-ready text of the result.
    #[must_use]
    pub fn representation(&self) -> &str {
        match self {
            Self::Finite { representation, .. }
            | Self::Infinite { representation, .. }
            | Self::Relation { representation, .. } => representation,
        }
    }

    /// The elements of a finite result.
    #[must_use]
    pub fn elements(&self) -> Option<&[Element]> {
        match self {
            Self::Finite { elements, .. } => Some(elements),
            _ => None,
        }
    }

    /// The evaluation of a relation result.
    #[must_use]
    pub const fn evaluation(&self) -> Option<RelationEvaluation> {
        match self {
            Self::Relation { evaluation, .. } => Some(*evaluation),
            _ => None,
        }
    }

    /// `finite`, `infinite` or `relation`.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Finite { .. } => "finite",
            Self::Infinite { .. } => "infinite",
            Self::Relation { .. } => "relation",
        }
    }
}

impl Display for SetResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Relation { representation, evaluation } => {
                write!(f, "{representation} ({evaluation})")
            },
            _ => write!(f, "{}", self.representation()),
        }
    }
}

/// One narrated step of a computation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Step {
    /// Short headline.
    pub description: String,
    /// Longer explanation, possibly several lines.
    pub detail:      String,
}

impl Step {
    pub(crate) fn new(description: impl Into<String>, detail: impl Into<String>) -> Self {
        Self { description: description.into(),
               detail:      detail.into(), }
    }
}

impl Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}\n  {}", self.description, self.detail.replace('\n', "\n  "))
    }
}

/// A result together with its explanation.
///
/// `steps` is empty unless step-by-step mode is on. `error` is only set in
/// step-by-step mode, where failures are reported here instead of as an
/// `Err`.
#[derive(Debug, Clone, PartialEq)]
pub struct Evaluation {
    /// The computed value.
    pub result: SetResult,
    /// Narrated steps, in order.
    pub steps:  Vec<Step>,
    /// Message of a failure that was recovered from.
    pub error:  Option<String>,
}

impl Evaluation {
    pub(crate) const fn new(result: SetResult, steps: Vec<Step>) -> Self {
        Self { result,
               steps,
               error: None }
    }
}

/// An intermediate value: a set, or a relation once `⊆` has been applied.
#[derive(Debug, Clone)]
pub(crate) enum SetValue {
    Finite(Vec<Element>),
    Infinite(InfiniteSet),
    Relation {
        representation: String,
        evaluation:     RelationEvaluation,
    },
}

impl SetValue {
    pub(crate) fn to_result(&self) -> SetResult {
        match self {
            Self::Finite(elements) => SetResult::finite(elements.clone()),
            Self::Infinite(set) => SetResult::Infinite { definition:     set.definition.clone(),
                                                         representation: set.representation.clone(),
                                                         samples:        set.samples.clone(), },
            Self::Relation { representation, evaluation } => {
                SetResult::Relation { representation: representation.clone(),
                                      evaluation:     *evaluation, }
            },
        }
    }

    /// The value as something that can be registered, if it is a set.
    pub(crate) fn into_stored(self) -> Option<StoredSet> {
        match self {
            Self::Finite(elements) => Some(StoredSet::Finite(elements)),
            Self::Infinite(set) => Some(StoredSet::Infinite(set)),
            Self::Relation { .. } => None,
        }
    }
}

impl From<StoredSet> for SetValue {
    fn from(set: StoredSet) -> Self {
        match set {
            StoredSet::Finite(elements) => Self::Finite(elements),
            StoredSet::Infinite(set) => Self::Infinite(set),
        }
    }
}

/// Collects steps when step-by-step mode is on and ignores them otherwise.
#[derive(Debug, Default)]
pub(crate) struct Narration {
    enabled: bool,
    steps:   Vec<Step>,
}

impl Narration {
    pub(crate) const fn new(enabled: bool) -> Self {
        Self { enabled,
               steps: Vec::new() }
    }

    pub(crate) fn note(&mut self, description: impl Into<String>, detail: impl Into<String>) {
        if self.enabled {
            self.steps.push(Step::new(description, detail));
        }
    }

    pub(crate) fn into_steps(self) -> Vec<Step> {
        self.steps
    }
}
