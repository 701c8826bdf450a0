//! Fake word generation library.
//!
//! This crate provides an order-3 character Markov chain that produces
//! pronounceable words absent from a known vocabulary:
//! - A transition table keyed by fixed-width states
//! - A bounded random walk building one word at a time
//! - Rejection sampling against a real-word set
//! - Training from word lists, with a binary cache
//!
//! The high-level entry point is [`model::generator::Generator`].

/// Markov chain model and generation logic.
pub mod model;

/// Error type shared by loading, training and caching.
pub mod error;

/// I/O utilities (word lists, path helpers).
pub mod io;

pub use error::{GenError, Result};
