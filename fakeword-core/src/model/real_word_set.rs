use std::collections::HashSet;

use rand::Rng;
use rand::seq::IteratorRandom;

/// Known vocabulary used to reject generated words.
///
/// Membership is exact string equality (case-sensitive). The set is built
/// once per load and never mutated afterwards.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RealWordSet {
	words: HashSet<String>,
}

impl RealWordSet {
	pub fn new() -> Self {
		Self::default()
	}

	/// Returns `true` if `word` is a known real word.
	pub fn contains(&self, word: &str) -> bool {
		self.words.contains(word)
	}

	pub fn len(&self) -> usize {
		self.words.len()
	}

	pub fn is_empty(&self) -> bool {
		self.words.is_empty()
	}

	/// Picks up to `amount` distinct words at random.
	pub fn sample<R: Rng>(&self, rng: &mut R, amount: usize) -> Vec<String> {
		self.words.iter().choose_multiple(rng, amount).into_iter().cloned().collect()
	}
}

impl<S: Into<String>> FromIterator<S> for RealWordSet {
	fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
		Self { words: iter.into_iter().map(Into::into).collect() }
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rand::SeedableRng;
	use rand::rngs::StdRng;

	#[test]
	fn membership_is_exact() {
		let set: RealWordSet = ["apple", "pear"].into_iter().collect();
		assert!(set.contains("apple"));
		assert!(!set.contains("Apple"));
		assert!(!set.contains("appl"));
		assert!(!set.contains(""));
	}

	#[test]
	fn duplicates_collapse() {
		let set: RealWordSet = ["a", "a", "b"].into_iter().collect();
		assert_eq!(set.len(), 2);
	}

	#[test]
	fn sample_is_bounded_by_set_size() {
		let set: RealWordSet = ["one", "two", "three"].into_iter().collect();
		let mut rng = StdRng::seed_from_u64(1);

		let picked = set.sample(&mut rng, 2);
		assert_eq!(picked.len(), 2);
		assert_ne!(picked[0], picked[1]);
		assert!(picked.iter().all(|w| set.contains(w)));

		assert_eq!(set.sample(&mut rng, 10).len(), 3);
		assert!(RealWordSet::new().sample(&mut rng, 2).is_empty());
	}
}
