//! # discreta
//!
//! discreta is a set of calculators for a first course in discrete
//! mathematics, written in Rust. It builds truth tables for propositional
//! formulas, evaluates set-algebra expressions over finite and infinite sets
//! with optional step-by-step explanations, and evaluates successions with
//! their sums, products and induction checks.
//!
//! # Example
//! ```
//! use discreta::{logic::BooleanExpressionEngine, sets::SetAlgebraEngine,
//!                succession::SuccessionEvaluator};
//!
//! let mut logic = BooleanExpressionEngine::new();
//! logic.generate_truth_table("p → q").unwrap();
//! assert_eq!(logic.truth_table.len(), 4);
//!
//! let mut sets = SetAlgebraEngine::new();
//! sets.add_set_from_literal("A", "{1, 2, 3}").unwrap();
//! sets.add_set_from_literal("B", "{2, 3, 4}").unwrap();
//! assert_eq!(sets.evaluate_expression("A - B").unwrap().result.representation(), "{1}");
//!
//! let sum = SuccessionEvaluator::new().evaluate_succession("2*k - 1", 1, 5).unwrap().sum;
//! assert_eq!(sum, 25.0);
//! ```

#![warn(
    clippy::redundant_clone,
    clippy::needless_pass_by_value,
    clippy::similar_names,
    clippy::large_enum_variant,
    clippy::string_lit_as_bytes,
    clippy::match_same_arms,
    clippy::cargo,
    clippy::nursery,
    clippy::perf,
    clippy::style,
    clippy::suspicious,
    clippy::correctness,
    clippy::complexity,
    clippy::pedantic,
    //missing_docs,
)]
#![allow(clippy::missing_errors_doc)]

/// Defines the structure of parsed formulas.
///
/// This module declares the trees built by the boolean and arithmetic
/// parsers, and the operator enums shared by all three calculators.
///
/// # Responsibilities
/// - Defines `LogicExpr` for propositional formulas and `Formula` for
///   arithmetic formulas in `k`.
/// - Attaches source positions to nodes for error reporting.
/// - Gives every operator its symbol, precedence and semantics.
pub mod ast;
/// Provides the error types of every calculator.
///
/// This module defines all errors that can be raised while parsing formulas,
/// building truth tables, manipulating sets or evaluating successions. The
/// `Display` output of each error is a message meant for the learner.
///
/// # Responsibilities
/// - Defines one error enum per calculator plus a shared `ParseError`.
/// - Carries positions and names so that failures can be pointed at.
/// - Implements `std::error::Error` for integration with `?` and `Box<dyn
///   Error>`.
pub mod error;
/// Propositional logic: validation, parsing and truth tables.
///
/// # Responsibilities
/// - Rejects malformed formulas with a learner-facing explanation before
///   parsing.
/// - Parses formulas written with any of the accepted connective spellings.
/// - Enumerates every assignment of the variables and evaluates the formula
///   and each parenthesised sub-formula.
pub mod logic;
/// Set algebra over finite and infinite sets.
///
/// # Responsibilities
/// - Keeps a registry of named sets, with the number sets preloaded.
/// - Implements union, intersection, difference, symmetric difference,
///   complement and inclusion, symbolically when a set is infinite.
/// - Evaluates infix expressions and explains each step on request.
pub mod sets;
/// Successions: formulas in `k` over integer ranges.
///
/// # Responsibilities
/// - Parses arithmetic formulas with the usual functions.
/// - Evaluates terms, their sum and their product without overflowing.
/// - Outlines and checks proofs by induction of closed forms.
pub mod succession;
/// General utilities for safe numeric conversion and helpers.
///
/// This module provides reusable helpers that are used throughout the crate:
/// safe conversions between integer and floating-point types, number
/// formatting and primality.
///
/// # Responsibilities
/// - Safely convert between `i64` and `f64` without silent data loss.
/// - Provide general utility functions used in multiple modules.
pub mod util;
