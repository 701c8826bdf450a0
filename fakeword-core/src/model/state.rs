use std::fmt;

use serde::{Deserialize, Serialize};

use super::{END_CHAR, ORDER, START_CHAR};
use crate::error::GenError;

/// Lookup key of the Markov chain.
///
/// A `State` is the window of the last `ORDER` symbols of a word under
/// construction. At the beginning of a word the window is filled with the
/// start sentinel, so the first real symbols are drawn through the same
/// lookup as every other one.
///
/// ## Invariants
/// - Always exactly `ORDER` symbols
/// - Never contains the end sentinel
/// - Equality is exact and case-sensitive
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct State([char; ORDER]);

impl State {
	/// The synthetic start state (`"^^^"`).
	pub const fn start() -> Self {
		Self([START_CHAR; ORDER])
	}

	/// Builds a state from the last `ORDER` symbols of a buffer window.
	///
	/// Returns `None` if the window is not exactly `ORDER` symbols long or
	/// holds the end sentinel.
	pub fn from_window(window: &[char]) -> Option<Self> {
		let symbols: [char; ORDER] = window.try_into().ok()?;
		if symbols.contains(&END_CHAR) {
			return None;
		}
		Some(Self(symbols))
	}

	/// Returns the symbols of this state.
	pub fn symbols(&self) -> &[char; ORDER] {
		&self.0
	}
}

impl TryFrom<&str> for State {
	type Error = GenError;

	fn try_from(value: &str) -> Result<Self, Self::Error> {
		let chars: Vec<char> = value.chars().collect();
		Self::from_window(&chars).ok_or_else(|| GenError::InvalidState(value.to_owned()))
	}
}

impl fmt::Display for State {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		for c in self.0 {
			write!(f, "{c}")?;
		}
		Ok(())
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn start_state_is_three_sentinels() {
		assert_eq!(State::start().to_string(), "^^^");
	}

	#[test]
	fn parses_exact_length_states() {
		let state = State::try_from("^ab").unwrap();
		assert_eq!(state.symbols(), &['^', 'a', 'b']);
		assert_eq!(state.to_string(), "^ab");
	}

	#[test]
	fn rejects_wrong_length() {
		for bad in ["", "ab", "abcd"] {
			assert!(matches!(State::try_from(bad), Err(GenError::InvalidState(s)) if s == bad));
		}
	}

	#[test]
	fn rejects_end_sentinel() {
		assert!(State::try_from("ab$").is_err());
	}

	#[test]
	fn counts_symbols_not_bytes() {
		let state = State::try_from("^éa").unwrap();
		assert_eq!(state.symbols()[1], 'é');
	}

	#[test]
	fn equality_is_case_sensitive() {
		assert_ne!(State::try_from("abc").unwrap(), State::try_from("aBc").unwrap());
	}
}
