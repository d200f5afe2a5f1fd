use std::{
    collections::hash_map::DefaultHasher,
    fmt::{self, Display},
    hash::{Hash, Hasher},
};

use indexmap::IndexSet;
use ordered_float::OrderedFloat;

use crate::{error::SetError, util::num::format_number};

/// A leaf value of a finite set.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Primitive {
    /// A number such as `-4` or `2.5`.
    Number(OrderedFloat<f64>),
    /// Anything else, such as `apple`.
    Text(String),
}

impl Display for Primitive {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{}", format_number(n.into_inner())),
            Self::Text(s) => write!(f, "{s}"),
        }
    }
}

/// An element of a finite set.
///
/// Equality is structural: primitives compare by value, references by the
/// referenced name and nested sets as multisets (order does not matter).
#[derive(Clone, Debug)]
pub enum Element {
    /// A number or a piece of text.
    Primitive(Primitive),
    /// A reference, by name, to another registered set. The referenced set is
    /// not owned and may be removed later.
    SetRef(String),
    /// An anonymous set written inline, such as `{3, 4}`.
    Nested(Vec<Self>),
}

impl Element {
    /// A numeric element.
    #[must_use]
    pub const fn number(value: f64) -> Self {
        Self::Primitive(Primitive::Number(OrderedFloat(value)))
    }

    /// A text element.
    #[must_use]
    pub fn text(value: impl Into<String>) -> Self {
        Self::Primitive(Primitive::Text(value.into()))
    }

    /// Interprets a single token typed by a learner.
    ///
    /// `@Name` is a reference to the set `Name`, a braced literal is a nested
    /// set, anything that parses as a number is a number and everything else
    /// is text. Surrounding whitespace is ignored.
    ///
    /// # Errors
    /// Returns `SetError::InvalidElements` for unbalanced braces or an empty
    /// reference (`@`).
    ///
    /// # Example
    /// ```
    /// use discreta::sets::element::Element;
    ///
    /// assert_eq!(Element::from_token("2").unwrap(), Element::number(2.0));
    /// assert_eq!(Element::from_token("@A").unwrap(), Element::SetRef("A".into()));
    /// assert_eq!(Element::from_token("{4, 3}").unwrap(),
    ///            Element::Nested(vec![Element::number(3.0), Element::number(4.0)]));
    /// ```
    pub fn from_token(token: &str) -> Result<Self, SetError> {
        let token = token.trim();

        if token.starts_with('{') || token.ends_with('}') {
            let inner = strip_outer_braces(token).ok_or_else(|| SetError::InvalidElements { details: format!("unbalanced braces in '{token}'") })?;
            return Ok(Self::Nested(dedup(Self::parse_items(inner)?)));
        }

        if let Some(name) = token.strip_prefix('@') {
            let name = name.trim();
            if name.is_empty() {
                return Err(SetError::InvalidElements { details: "a set reference needs a name after '@'".to_string() });
            }
            return Ok(Self::SetRef(name.to_string()));
        }

        Ok(token.parse::<f64>()
                .ok()
                .filter(|n| n.is_finite())
                .map_or_else(|| Self::text(token), Self::number))
    }

    /// Parses a comma-separated element list, optionally wrapped in one pair
    /// of braces. Empty items are skipped; duplicates are kept.
    ///
    /// # Errors
    /// Returns `SetError::InvalidElements` for unbalanced braces.
    ///
    /// # Example
    /// ```
    /// use discreta::sets::element::Element;
    ///
    /// let elements = Element::parse_list("{1, 2, {3, 4}, @A}").unwrap();
    /// assert_eq!(elements.len(), 4);
    /// assert_eq!(elements[2].to_string(), "{3, 4}");
    /// assert_eq!(elements[3], Element::SetRef("A".into()));
    /// ```
    pub fn parse_list(text: &str) -> Result<Vec<Self>, SetError> {
        let text = text.trim();
        let inner = match strip_outer_braces(text) {
            Some(inner) if text.starts_with('{') => inner,
            _ => text,
        };
        Self::parse_items(inner)
    }

    fn parse_items(text: &str) -> Result<Vec<Self>, SetError> {
        split_top_level(text)?.into_iter()
                              .filter(|item| !item.trim().is_empty())
                              .map(Self::from_token)
                              .collect()
    }
}

/// Returns the text inside `{...}` when the braces wrap the whole input.
fn strip_outer_braces(text: &str) -> Option<&str> {
    let inner = text.strip_prefix('{')?.strip_suffix('}')?;

    let mut depth = 0usize;
    for c in inner.chars() {
        match c {
            '{' => depth += 1,
            '}' => depth = depth.checked_sub(1)?,
            _ => {},
        }
    }

    (depth == 0).then_some(inner)
}

/// Splits on commas that are not inside braces.
fn split_top_level(text: &str) -> Result<Vec<&str>, SetError> {
    let unbalanced = || SetError::InvalidElements { details: format!("unbalanced braces in '{text}'") };

    let mut items = Vec::new();
    let mut depth = 0usize;
    let mut start = 0;

    for (i, c) in text.char_indices() {
        match c {
            '{' => depth += 1,
            '}' => depth = depth.checked_sub(1).ok_or_else(unbalanced)?,
            ',' if depth == 0 => {
                items.push(&text[start..i]);
                start = i + 1;
            },
            _ => {},
        }
    }

    if depth != 0 {
        return Err(unbalanced());
    }
    items.push(&text[start..]);

    Ok(items)
}

/// Removes structural duplicates, keeping the first occurrence of each
/// element.
///
/// # Example
/// ```
/// use discreta::sets::element::{Element, dedup};
///
/// let elements = vec![Element::number(1.0), Element::number(2.0), Element::number(1.0)];
/// assert_eq!(dedup(elements), vec![Element::number(1.0), Element::number(2.0)]);
/// ```
#[must_use]
pub fn dedup(elements: Vec<Element>) -> Vec<Element> {
    elements.into_iter()
            .collect::<IndexSet<_>>()
            .into_iter()
            .collect()
}

/// Deep structural membership test.
#[must_use]
pub fn contains(elements: &[Element], element: &Element) -> bool {
    elements.iter().any(|e| e == element)
}

/// Renders a list of elements as a set literal: `{1, 2, {3, 4}}`.
#[must_use]
pub fn format_elements(elements: &[Element]) -> String {
    let items: Vec<String> = elements.iter().map(ToString::to_string).collect();
    format!("{{{}}}", items.join(", "))
}

/// Multiset comparison: every element on one side is matched by a distinct
/// element on the other.
fn multiset_eq(left: &[Element], right: &[Element]) -> bool {
    if left.len() != right.len() {
        return false;
    }

    let mut matched = vec![false; right.len()];
    left.iter().all(|l| {
                   right.iter()
                        .enumerate()
                        .position(|(i, r)| !matched[i] && l == r)
                        .is_some_and(|i| {
                            matched[i] = true;
                            true
                        })
               })
}

impl PartialEq for Element {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Primitive(a), Self::Primitive(b)) => a == b,
            (Self::SetRef(a), Self::SetRef(b)) => a == b,
            (Self::Nested(a), Self::Nested(b)) => multiset_eq(a, b),
            _ => false,
        }
    }
}

impl Eq for Element {}

impl Hash for Element {
    fn hash<H: Hasher>(&self, state: &mut H) {
        match self {
            Self::Primitive(p) => {
                state.write_u8(0);
                p.hash(state);
            },
            Self::SetRef(name) => {
                state.write_u8(1);
                name.hash(state);
            },
            Self::Nested(elements) => {
                state.write_u8(2);
                let combined = elements.iter()
                                       .map(|item| {
                                           let mut hasher = DefaultHasher::new();
                                           item.hash(&mut hasher);
                                           hasher.finish()
                                       })
                                       .fold(0u64, u64::wrapping_add);
                combined.hash(state);
            },
        }
    }
}

impl Display for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Primitive(p) => write!(f, "{p}"),
            Self::SetRef(name) => write!(f, "{name}"),
            Self::Nested(elements) => write!(f, "{}", format_elements(elements)),
        }
    }
}

impl From<f64> for Element {
    fn from(value: f64) -> Self {
        Self::number(value)
    }
}

impl From<&str> for Element {
    fn from(value: &str) -> Self {
        Self::text(value)
    }
}

/// The plain value a membership predicate is asked about.
///
/// Predicates are written against raw values, so elements are adapted first:
/// primitives are unwrapped, references become their name and nested sets are
/// converted recursively.
#[derive(Clone, Debug, PartialEq)]
pub enum Scalar {
    /// A number.
    Number(f64),
    /// Text, including the names of referenced sets.
    Text(String),
    /// The contents of a nested set.
    Set(Vec<Self>),
}

impl From<&Element> for Scalar {
    fn from(element: &Element) -> Self {
        match element {
            Element::Primitive(Primitive::Number(n)) => Self::Number(n.into_inner()),
            Element::Primitive(Primitive::Text(s)) | Element::SetRef(s) => Self::Text(s.clone()),
            Element::Nested(elements) => Self::Set(elements.iter().map(Self::from).collect()),
        }
    }
}

impl Scalar {
    /// The numeric value, if this is a number.
    #[must_use]
    pub const fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            _ => None,
        }
    }
}
