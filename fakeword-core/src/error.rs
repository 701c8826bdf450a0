use std::collections::TryReserveError;
use std::io;

use thiserror::Error;

use crate::model::ORDER;

/// Errors raised while loading, training or caching a model.
///
/// Generation itself never fails: dead ends, length limits and an exhausted
/// retry budget all still produce a word.
#[derive(Error, Debug)]
pub enum GenError {
	/// A state key is not exactly `ORDER` symbols, or embeds the end sentinel.
	#[error("invalid state {0:?}: expected exactly {order} symbols without the end marker", order = ORDER)]
	InvalidState(String),

	/// A successor run for the given state is empty.
	#[error("empty successor run for state {0:?}")]
	EmptySuccessors(String),

	/// Parallel state/successor columns have different lengths.
	#[error("length mismatch: {states} states for {runs} successor runs")]
	LengthMismatch { states: usize, runs: usize },

	/// Growing the table failed.
	#[error("allocation failed while growing the transition table")]
	ResourceExhausted(#[from] TryReserveError),

	/// A word list produced no usable training word.
	#[error("word list is empty")]
	EmptyWordList,

	#[error(transparent)]
	Io(#[from] io::Error),

	#[error("model cache: {0}")]
	Serialization(#[from] postcard::Error),
}

impl GenError {
	/// Returns `true` for errors caused by the caller's input rather than the environment.
	pub fn is_invalid_input(&self) -> bool {
		matches!(
			self,
			GenError::InvalidState(_)
				| GenError::EmptySuccessors(_)
				| GenError::LengthMismatch { .. }
				| GenError::EmptyWordList
		)
	}
}

pub type Result<T> = std::result::Result<T, GenError>;
