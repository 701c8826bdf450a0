use rand::Rng;

use super::state::State;
use super::transition_store::TransitionStore;
use super::{END_CHAR, MAX_WORD_LEN, ORDER, START_CHAR};

/// Why a random walk stopped.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Termination {
	/// The end sentinel was drawn.
	Marker,
	/// The buffer reached `MAX_WORD_LEN` symbols (prefix included).
	Length,
	/// The current state has no transitions.
	DeadEnd,
}

/// One candidate word with the reason its walk ended.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BuiltWord {
	pub word: String,
	pub termination: Termination,
}

/// Performs bounded random walks over a `TransitionStore`.
///
/// The walk starts from `ORDER` start sentinels, repeatedly looks up the
/// last `ORDER` symbols and appends one successor drawn uniformly over the
/// physical occurrences of the run, so frequent transitions are picked
/// proportionally more often.
///
/// Dead ends and the length limit are normal terminations, not errors.
#[derive(Clone, Copy, Debug)]
pub struct WordBuilder<'a> {
	store: &'a TransitionStore,
}

impl<'a> WordBuilder<'a> {
	pub fn new(store: &'a TransitionStore) -> Self {
		Self { store }
	}

	/// Builds one word, drawing from `rng`.
	pub fn build<R: Rng>(&self, rng: &mut R) -> BuiltWord {
		let mut buffer: Vec<char> = Vec::with_capacity(MAX_WORD_LEN);
		buffer.extend([START_CHAR; ORDER]);

		let termination = loop {
			if buffer.len() >= MAX_WORD_LEN {
				break Termination::Length;
			}

			let run = State::from_window(&buffer[buffer.len() - ORDER..])
				.and_then(|state| self.store.lookup(&state));
			let next_char = match run {
				Some(run) => Self::draw(run, rng),
				None => None,
			};

			match next_char {
				None => break Termination::DeadEnd,
				Some(END_CHAR) => break Termination::Marker,
				Some(c) => buffer.push(c),
			}
		};

		BuiltWord {
			word: buffer[ORDER..].iter().collect(),
			termination,
		}
	}

	/// Draws one position of the run uniformly. `None` for an empty run.
	fn draw<R: Rng>(run: &[char], rng: &mut R) -> Option<char> {
		if run.is_empty() {
			return None;
		}
		Some(run[rng.random_range(0..run.len())])
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::model::MAX_OUTPUT_LEN;
	use rand::SeedableRng;
	use rand::rngs::StdRng;

	fn store(entries: &[(&str, &str)]) -> TransitionStore {
		let mut store = TransitionStore::new();
		for (state, run) in entries {
			store.insert(state, run).unwrap();
		}
		store
	}

	#[test]
	fn empty_store_is_an_immediate_dead_end() {
		let store = TransitionStore::new();
		let built = WordBuilder::new(&store).build(&mut StdRng::seed_from_u64(1));
		assert_eq!(built, BuiltWord { word: String::new(), termination: Termination::DeadEnd });
	}

	#[test]
	fn end_marker_is_not_appended() {
		let store = store(&[("^^^", "c"), ("^^c", "a"), ("^ca", "t"), ("cat", "$")]);
		let built = WordBuilder::new(&store).build(&mut StdRng::seed_from_u64(2));
		assert_eq!(built.word, "cat");
		assert_eq!(built.termination, Termination::Marker);
	}

	#[test]
	fn length_limit_caps_output() {
		// Self loop that never ends.
		let store = store(&[("^^^", "a"), ("^^a", "a"), ("^aa", "a"), ("aaa", "a")]);
		let built = WordBuilder::new(&store).build(&mut StdRng::seed_from_u64(3));
		assert_eq!(built.word, "a".repeat(MAX_OUTPUT_LEN));
		assert_eq!(built.termination, Termination::Length);
	}

	#[test]
	fn unseen_state_stops_the_walk() {
		let store = store(&[("^^^", "b")]);
		let built = WordBuilder::new(&store).build(&mut StdRng::seed_from_u64(4));
		assert_eq!(built.word, "b");
		assert_eq!(built.termination, Termination::DeadEnd);
	}

	#[test]
	fn closed_set_of_outputs() {
		let store = store(&[("^^^", "aab"), ("^^a", "$$")]);
		let builder = WordBuilder::new(&store);
		let mut rng = StdRng::seed_from_u64(5);
		for _ in 0..500 {
			let built = builder.build(&mut rng);
			assert!(["a", "b", ""].contains(&built.word.as_str()), "unexpected {:?}", built.word);
		}
	}

	#[test]
	fn sampling_is_weighted_by_occurrences() {
		// 'a' is three times as frequent as 'b'.
		let store = store(&[("^^^", "aaab")]);
		let builder = WordBuilder::new(&store);
		let mut rng = StdRng::seed_from_u64(6);
		let draws = 20_000;
		let a_count = (0..draws).filter(|_| builder.build(&mut rng).word == "a").count();
		let ratio = a_count as f64 / draws as f64;
		assert!((0.72..0.78).contains(&ratio), "ratio {ratio}");
	}

	#[test]
	fn same_seed_same_word() {
		let store = store(&[("^^^", "abcdefgh"), ("^^a", "xyz$"), ("^^b", "$")]);
		let builder = WordBuilder::new(&store);
		let first = builder.build(&mut StdRng::seed_from_u64(7));
		let second = builder.build(&mut StdRng::seed_from_u64(7));
		assert_eq!(first, second);
	}
}
