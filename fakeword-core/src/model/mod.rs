//! Top-level module for the Markov chain word generator.
//!
//! This module provides:
//! - Fixed-width lookup keys (`State`)
//! - The state -> successor multiset table (`TransitionStore`)
//! - The bounded random walk (`WordBuilder`)
//! - The known vocabulary (`RealWordSet`) and rejection sampling (`FakeWordFilter`)
//! - Training from word lists (`Trainer`)
//! - A high-level generation interface (`Generator`)

/// Number of trailing symbols used as lookup context.
pub const ORDER: usize = 3;

/// Maximum length of the generation buffer, start prefix included.
pub const MAX_WORD_LEN: usize = 10;

/// Longest word the builder can return once the prefix is stripped.
pub const MAX_OUTPUT_LEN: usize = MAX_WORD_LEN - ORDER;

/// Filler used to build the start state.
pub const START_CHAR: char = '^';

/// Successor meaning "the word may end here".
pub const END_CHAR: char = '$';

/// Default retry ceiling for rejection sampling.
pub const DEFAULT_MAX_TRIES: usize = 100;

/// Fixed-width lookup key.
pub mod state;

/// State -> successor multiset table.
pub mod transition_store;

/// Bounded random walk producing one candidate word.
pub mod word_builder;

/// Known vocabulary used for exclusion.
pub mod real_word_set;

/// Rejection sampling against the known vocabulary.
pub mod fake_word_filter;

/// Builds transition tables from word lists.
pub mod trainer;

/// High-level interface owning the tables and the random source.
///
/// Exposes loading, reset, single and batch generation.
pub mod generator;
