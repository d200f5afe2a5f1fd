use std::fmt::{self, Display};

/// Binary connectives in every accepted spelling.
const BINARY_OPERATORS: [&str; 10] = ["∧", "∨", "⊕", "↔", "→", "⇒", "->", "&&", "||", "ǀǀ"];

/// Single-character binary connectives.
const SINGLE_CHAR_BINARY: [char; 6] = ['∧', '∨', '⊕', '↔', '→', '⇒'];

/// Connective spellings that may sit next to a `->`. Multi-character
/// spellings are matched by their first and last character.
const ADJACENT_BINARY: [&str; 9] = ["∧", "∨", "⊕", "↔", "→", "⇒", "&&", "||", "ǀǀ"];

/// Outcome of validating a propositional formula.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Validation {
    /// Whether the formula may be handed to the truth-table generator.
    pub valid:   bool,
    /// Why the formula was rejected.
    pub message: Option<String>,
}

impl Validation {
    const fn ok() -> Self {
        Self { valid:   true,
               message: None, }
    }

    fn reject(message: impl Into<String>) -> Self {
        Self { valid:   false,
               message: Some(message.into()), }
    }
}

impl Display for Validation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.message {
            Some(message) => write!(f, "{message}"),
            None => write!(f, "valid"),
        }
    }
}

/// Runs the structural checks on a formula, in order: non-empty, balanced
/// parentheses, no binary connective at either end, operands are letter runs,
/// no two binary connectives side by side.
///
/// Positions in messages are 1-based character offsets.
///
/// # Example
/// ```
/// use discreta::logic::validate::validate_expression;
///
/// assert!(validate_expression("(p ∧ q) → r").valid);
/// assert!(!validate_expression("p∧∧q").valid);
/// assert!(!validate_expression("(p∧q").valid);
/// ```
#[must_use]
pub fn validate_expression(expression: &str) -> Validation {
    if expression.trim().is_empty() {
        return Validation::reject("The expression is empty");
    }

    let checks: [fn(&str) -> Validation; 4] =
        [check_parentheses, check_operators, check_operands, check_consecutive_operators];

    checks.iter()
          .map(|check| check(expression))
          .find(|validation| !validation.valid)
          .unwrap_or_else(Validation::ok)
}

fn check_parentheses(expression: &str) -> Validation {
    let mut open = Vec::new();

    for (i, c) in expression.chars().enumerate() {
        match c {
            '(' => open.push(i),
            ')' if open.pop().is_none() => {
                return Validation::reject(format!("Closing parenthesis without a matching opening one at position {}",
                                                  i + 1));
            },
            _ => {},
        }
    }

    match open.last() {
        Some(i) => Validation::reject(format!("Opening parenthesis without a matching closing one at position {}",
                                              i + 1)),
        None => Validation::ok(),
    }
}

fn check_operators(expression: &str) -> Validation {
    let trimmed = expression.trim();

    for op in BINARY_OPERATORS {
        if trimmed.starts_with(op) {
            return Validation::reject(format!("The expression cannot start with the binary operator '{op}'"));
        }
        if trimmed.ends_with(op) {
            return Validation::reject(format!("The expression cannot end with the binary operator '{op}'"));
        }
    }

    Validation::ok()
}

fn check_operands(expression: &str) -> Validation {
    let mut cleaned = expression.to_string();
    for op in ["->", "&&", "||", "ǀǀ"] {
        cleaned = cleaned.replace(op, " ");
    }
    let cleaned: String = cleaned.chars()
                                 .map(|c| if is_symbol(c) { ' ' } else { c })
                                 .collect();

    match cleaned.split_whitespace()
                 .find(|token| !token.chars().all(|c| c.is_ascii_alphabetic()))
    {
        Some(token) => Validation::reject(format!("Invalid variable '{token}'. Variables must be letters.")),
        None => Validation::ok(),
    }
}

fn check_consecutive_operators(expression: &str) -> Validation {
    let chars: Vec<char> = expression.chars().filter(|c| !c.is_whitespace()).collect();
    let len = chars.len();

    let mut i = 0;
    while i + 1 < len {
        let current = chars[i];
        let next = chars[i + 1];

        if current == '-' && next == '>' {
            if i == 0 || i == len - 2 {
                return Validation::reject(format!("Misplaced implication operator '->' at position {}",
                                                  i + 1));
            }

            let after = chars[i + 2];
            if ADJACENT_BINARY.iter().any(|op| op.starts_with(after)) {
                return Validation::reject(format!("Consecutive binary operators '-> {after}' at position {}",
                                                  i + 1));
            }

            let before = chars[i - 1];
            if ADJACENT_BINARY.iter().any(|op| op.ends_with(before)) {
                return Validation::reject(format!("Consecutive binary operators '{before} ->' at position {i}"));
            }

            i += 2;
            continue;
        }

        if SINGLE_CHAR_BINARY.contains(&current) && (SINGLE_CHAR_BINARY.contains(&next) || next == '-') {
            return Validation::reject(format!("Consecutive binary operators '{current}{next}' at position {}",
                                              i + 1));
        }

        i += 1;
    }

    Validation::ok()
}

const fn is_symbol(c: char) -> bool {
    matches!(c, '∧' | '∨' | '⊕' | '↔' | '→' | '⇒' | '!' | '¬' | '˜' | '~' | '(' | ')')
}
