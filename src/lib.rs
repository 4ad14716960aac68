//! Puzzlekit is a generic, reusable constraint satisfaction problem (CSP)
//! solver.
//!
//! The engine is puzzle-agnostic: sudoku, nonograms, slitherlink and
//! word-fill puzzles are all thin configurations of the same machinery.
//! A problem is a set of *decisions* (variables holding a shrinking set
//! of candidate values) and *groups*, each binding an ordered subset of
//! decisions to one constraint. Solving interleaves incremental
//! constraint propagation with backtracking search over exact
//! snapshot/undo frames.
//!
//! # Core Concepts
//!
//! - **[`Problem`]**: owns the decisions and groups, and runs the
//!   propagate/branch/undo loop.
//! - **[`ConstraintChecker`]**: the capability a constraint implements.
//!   The crate ships a library of checkers ([`AllDifferent`],
//!   [`Equality`], [`FixedSet`], [`CountedSet`], [`DictionaryWord`],
//!   [`RunLength`] and the slitherlink trio), and custom checkers plug in
//!   through the same trait.
//! - **Strategy hooks**: a [`Decider`] chooses the next decision to
//!   branch on, and optional trackers observe attempted values and found
//!   solutions.
//!
//! # Example: pinning one of two mutually distinct decisions
//!
//! ```
//! use puzzlekit::solver::constraints::all_different::AllDifferent;
//! use puzzlekit::solver::decider::SelectFirstDecider;
//! use puzzlekit::solver::problem::{Problem, Settings};
//!
//! // Two decisions over the values {0, 1}, required to differ.
//! let mut problem = Problem::new(2, 2);
//! problem.add_group(&[0, 1], AllDifferent::new());
//!
//! // Pin the first to 1; propagation forces the second to 0.
//! problem.set(0, 1);
//!
//! let mut decider = SelectFirstDecider;
//! assert!(problem.solve(&mut Settings::new(&mut decider)));
//! assert_eq!(problem.value(0), Some(1));
//! assert_eq!(problem.value(1), Some(0));
//! ```
//!
//! [`Problem`]: solver::problem::Problem
//! [`ConstraintChecker`]: solver::constraint::ConstraintChecker
//! [`AllDifferent`]: solver::constraints::all_different::AllDifferent
//! [`Equality`]: solver::constraints::equality::Equality
//! [`FixedSet`]: solver::constraints::fixed_set::FixedSet
//! [`CountedSet`]: solver::constraints::counted_set::CountedSet
//! [`DictionaryWord`]: solver::constraints::dictionary_word::DictionaryWord
//! [`RunLength`]: solver::constraints::run_length::RunLength
//! [`Decider`]: solver::decider::Decider

pub mod error;
pub mod solver;
pub mod trie;
