use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::state::State;
use crate::error::{GenError, Result};

/// Mapping from a state to the multiset of symbols observed after it.
///
/// Each multiset is stored as a flat run of symbols where repetition encodes
/// frequency: a symbol appearing `k` times in a run of `n` has probability
/// `k / n` when one position of the run is drawn uniformly.
///
/// # Responsibilities
/// - Merge-insert successor runs (repeated inserts for a state accumulate)
/// - Constant-time lookup by state
/// - Merge with another store (parallel training support)
///
/// # Invariants
/// - Every present state has a non-empty run
/// - Runs are never truncated; growth that cannot be allocated is reported
///   as `GenError::ResourceExhausted`
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct TransitionStore {
	/// Successor runs indexed by state.
	/// Example: { "^^^" => ['a', 'a', 'b'], "^^a" => ['$', 'n'] }
	entries: HashMap<State, Vec<char>>,
}

impl TransitionStore {
	/// Creates an empty store.
	pub fn new() -> Self {
		Self::default()
	}

	/// Creates an empty store with room for `capacity` states.
	pub fn with_capacity(capacity: usize) -> Result<Self> {
		let mut entries = HashMap::new();
		entries.try_reserve(capacity)?;
		Ok(Self { entries })
	}

	/// Appends a run of successors to `state`, creating the entry if needed.
	///
	/// # Errors
	/// - `InvalidState` if `state` is not exactly `ORDER` symbols
	/// - `EmptySuccessors` if `successors` is empty
	/// - `ResourceExhausted` if the run cannot grow
	pub fn insert(&mut self, state: &str, successors: &str) -> Result<()> {
		let key = State::try_from(state)?;
		if successors.is_empty() {
			return Err(GenError::EmptySuccessors(state.to_owned()));
		}
		self.append(key, successors.chars())
	}

	/// Records one occurrence of `next_char` after `state`.
	pub fn insert_symbol(&mut self, state: State, next_char: char) -> Result<()> {
		self.append(state, std::iter::once(next_char))
	}

	fn append<I>(&mut self, state: State, symbols: I) -> Result<()>
	where
		I: Iterator<Item = char> + Clone,
	{
		if !self.entries.contains_key(&state) {
			self.entries.try_reserve(1)?;
		}
		let run = self.entries.entry(state).or_default();
		run.try_reserve(symbols.clone().count())?;
		run.extend(symbols);
		Ok(())
	}

	/// Returns the successor run of `state`, or `None` if it was never inserted.
	pub fn lookup(&self, state: &State) -> Option<&[char]> {
		self.entries.get(state).map(Vec::as_slice)
	}

	/// Discards every entry and releases the memory held by the table.
	pub fn clear(&mut self) {
		self.entries = HashMap::new();
	}

	/// Number of distinct states.
	pub fn len(&self) -> usize {
		self.entries.len()
	}

	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}

	/// Iterates over `(state, run)` pairs in no particular order.
	pub fn iter(&self) -> impl Iterator<Item = (&State, &[char])> {
		self.entries.iter().map(|(state, run)| (state, run.as_slice()))
	}

	/// Checks the store invariants on a table that did not go through `insert`.
	///
	/// # Errors
	/// - `InvalidState` for a state holding the end sentinel
	/// - `EmptySuccessors` for a state without successors
	pub fn validate(&self) -> Result<()> {
		for (state, run) in &self.entries {
			if State::from_window(state.symbols()).is_none() {
				return Err(GenError::InvalidState(state.to_string()));
			}
			if run.is_empty() {
				return Err(GenError::EmptySuccessors(state.to_string()));
			}
		}
		Ok(())
	}

	/// Merges another store into this one.
	///
	/// Runs of states present in both stores are concatenated, so
	/// occurrence counts add up.
	pub fn merge(&mut self, other: &Self) -> Result<()> {
		self.entries.try_reserve(other.len())?;
		for (state, run) in &other.entries {
			self.append(*state, run.iter().copied())?;
		}
		Ok(())
	}
}
