use log::warn;
use rand::Rng;
use serde::Serialize;

use super::real_word_set::RealWordSet;
use super::word_builder::WordBuilder;

/// Result of a rejection-sampling run.
#[derive(Serialize, Clone, Debug, PartialEq, Eq)]
pub struct FakeWord {
	/// The accepted candidate, or the last one drawn when the budget ran out.
	pub word: String,
	/// Number of candidates built, between 1 and the retry ceiling.
	pub attempts: usize,
	/// `true` when every candidate was a known word and `word` may be real.
	pub exhausted: bool,
}

/// Wraps a `WordBuilder` with rejection sampling against a `RealWordSet`.
///
/// # Behavior
/// - Builds candidates until one is not a known word
/// - Gives up after `max_tries` candidates and returns the last one, flagged
///   as exhausted, instead of looping forever
/// - With an empty word set, the first candidate is always accepted
#[derive(Clone, Copy, Debug)]
pub struct FakeWordFilter<'a> {
	builder: WordBuilder<'a>,
	words: &'a RealWordSet,
	max_tries: usize,
}

impl<'a> FakeWordFilter<'a> {
	/// Creates a filter. A `max_tries` of 0 is treated as 1.
	pub fn new(builder: WordBuilder<'a>, words: &'a RealWordSet, max_tries: usize) -> Self {
		Self { builder, words, max_tries: max_tries.max(1) }
	}

	/// Returns `true` if `word` belongs to the known vocabulary.
	pub fn word_exists(&self, word: &str) -> bool {
		self.words.contains(word)
	}

	/// Generates a word that is, as far as the budget allows, not a real word.
	pub fn generate_fake<R: Rng>(&self, rng: &mut R) -> FakeWord {
		let mut attempts = 0;
		loop {
			let candidate = self.builder.build(rng).word;
			attempts += 1;

			if !self.word_exists(&candidate) {
				return FakeWord { word: candidate, attempts, exhausted: false };
			}
			if attempts >= self.max_tries {
				warn!("gave up after {} attempts, returning known word {:?}", attempts, candidate);
				return FakeWord { word: candidate, attempts, exhausted: true };
			}
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::model::transition_store::TransitionStore;
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
	fn rejects_known_words() {
		// "a" and "b" are equally likely; "a" is real.
		let store = store(&[("^^^", "ab"), ("^^a", "$"), ("^^b", "$")]);
		let words: RealWordSet = ["a"].into_iter().collect();
		let filter = FakeWordFilter::new(WordBuilder::new(&store), &words, 100);
		let mut rng = StdRng::seed_from_u64(11);

		for _ in 0..200 {
			let fake = filter.generate_fake(&mut rng);
			assert_eq!(fake.word, "b");
			assert!(!fake.exhausted);
			assert!(fake.attempts >= 1);
		}
	}

	#[test]
	fn exhaustion_returns_the_last_candidate() {
		let store = store(&[("^^^", "a"), ("^^a", "$")]);
		let words: RealWordSet = ["a"].into_iter().collect();
		let filter = FakeWordFilter::new(WordBuilder::new(&store), &words, 7);

		let fake = filter.generate_fake(&mut StdRng::seed_from_u64(12));
		assert_eq!(fake, FakeWord { word: "a".to_owned(), attempts: 7, exhausted: true });
	}

	#[test]
	fn empty_set_is_a_passthrough() {
		let store = store(&[("^^^", "abcdef"), ("^^a", "b$"), ("^ab", "$")]);
		let words = RealWordSet::new();
		let builder = WordBuilder::new(&store);
		let filter = FakeWordFilter::new(builder, &words, 100);

		let mut filtered_rng = StdRng::seed_from_u64(13);
		let mut plain_rng = StdRng::seed_from_u64(13);
		for _ in 0..100 {
			let fake = filter.generate_fake(&mut filtered_rng);
			assert_eq!(fake.attempts, 1);
			assert_eq!(fake.word, builder.build(&mut plain_rng).word);
		}
	}

	#[test]
	fn zero_budget_still_draws_once() {
		let store = store(&[("^^^", "a")]);
		let words: RealWordSet = ["a"].into_iter().collect();
		let filter = FakeWordFilter::new(WordBuilder::new(&store), &words, 0);

		let fake = filter.generate_fake(&mut StdRng::seed_from_u64(14));
		assert_eq!(fake.attempts, 1);
		assert!(fake.exhausted);
	}

	#[test]
	fn word_exists_is_case_sensitive() {
		let store = TransitionStore::new();
		let words: RealWordSet = ["Word"].into_iter().collect();
		let filter = FakeWordFilter::new(WordBuilder::new(&store), &words, 1);
		assert!(filter.word_exists("Word"));
		assert!(!filter.word_exists("word"));
	}
}
