use std::path::Path;

use log::{debug, info, warn};
use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::Serialize;

use super::DEFAULT_MAX_TRIES;
use super::fake_word_filter::{FakeWord, FakeWordFilter};
use super::real_word_set::RealWordSet;
use super::trainer;
use super::transition_store::TransitionStore;
use super::word_builder::{BuiltWord, WordBuilder};
use crate::error::{GenError, Result};
use crate::io::{build_output_path, get_filename, is_stale, read_word_list};

/// Generation settings that may vary per generator.
///
/// Order, sentinels and the maximum word length are fixed constants of the
/// model module and are not configurable.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GeneratorConfig {
	/// Retry ceiling for rejection sampling.
	pub max_tries: usize,
}

impl Default for GeneratorConfig {
	fn default() -> Self {
		Self { max_tries: DEFAULT_MAX_TRIES }
	}
}

/// A guessing round: real words sampled from the vocabulary and fake words.
#[derive(Serialize, Clone, Debug, PartialEq, Eq)]
pub struct Challenge {
	pub real: Vec<String>,
	pub fake: Vec<String>,
}

/// High-level generator owning a transition table, a real-word set and a
/// random source.
///
/// # Responsibilities
/// - Replace tables atomically: a load either fully succeeds or leaves the
///   previous table in place
/// - Generate single words or batches, with or without real-word exclusion
/// - Release table memory on `reset`
///
/// The random source is seeded once, when the generator is created, and
/// then drawn from repeatedly.
#[derive(Debug)]
pub struct Generator {
	store: TransitionStore,
	words: RealWordSet,
	rng: StdRng,
	config: GeneratorConfig,
	name: Option<String>,
}

impl Default for Generator {
	fn default() -> Self {
		Self::new()
	}
}

impl Generator {
	/// Creates an empty generator seeded from the operating system.
	pub fn new() -> Self {
		Self::with_config(GeneratorConfig::default())
	}

	/// Creates an empty generator with the given settings.
	pub fn with_config(config: GeneratorConfig) -> Self {
		Self::with_rng(config, StdRng::from_os_rng())
	}

	/// Creates an empty generator with a fixed seed, for reproducible runs.
	pub fn with_seed(config: GeneratorConfig, seed: u64) -> Self {
		Self::with_rng(config, StdRng::seed_from_u64(seed))
	}

	fn with_rng(config: GeneratorConfig, rng: StdRng) -> Self {
		Self {
			store: TransitionStore::new(),
			words: RealWordSet::new(),
			rng,
			config,
			name: None,
		}
	}

	/// Creates a generator from a word list file.
	///
	/// # Behavior
	/// - Reads the list (one word per line) and loads it as the real-word set.
	/// - Loads the transition table from `<stem>.bin` next to the list when
	///   that cache exists and is not older than the list.
	/// - Otherwise trains the table in parallel and writes the cache.
	///
	/// # Errors
	/// - I/O errors on the word list, `EmptyWordList` if it holds no usable word.
	/// - A corrupted cache is reported as `Serialization`, a cache breaking
	///   the table invariants as `InvalidState` / `EmptySuccessors`.
	///
	/// # Notes
	/// - Failing to write the cache is logged and ignored.
	pub fn from_word_list<P: AsRef<Path>>(config: GeneratorConfig, filepath: P) -> Result<Self> {
		let path = filepath.as_ref();
		let words = read_word_list(path)?;
		let store = Self::load_or_train(path, &words)?;

		let mut generator = Self::with_config(config);
		generator.load_store(store);
		generator.load_wordset(words);
		generator.name = Some(get_filename(path)?);
		Ok(generator)
	}

	fn load_or_train(path: &Path, words: &[String]) -> Result<TransitionStore> {
		let binary_data_path = build_output_path(path, "bin")?;
		if !is_stale(&binary_data_path, path) {
			debug!("loading cached table {}", binary_data_path.display());
			let bytes = std::fs::read(&binary_data_path)?;
			let store: TransitionStore = postcard::from_bytes(&bytes)?;
			store.validate()?;
			return Ok(store);
		}

		let store = trainer::train(words)?;
		match postcard::to_stdvec(&store) {
			Ok(bytes) => {
				if let Err(e) = std::fs::write(&binary_data_path, bytes) {
					warn!("could not write cache {}: {}", binary_data_path.display(), e);
				}
			}
			Err(e) => warn!("could not serialize table: {}", e),
		}
		Ok(store)
	}

	/// Name of the loaded word list, if the generator was built from one.
	pub fn name(&self) -> Option<&str> {
		self.name.as_deref()
	}

	pub fn config(&self) -> &GeneratorConfig {
		&self.config
	}

	/// Number of states in the transition table.
	pub fn state_count(&self) -> usize {
		self.store.len()
	}

	/// Number of known real words.
	pub fn wordset_len(&self) -> usize {
		self.words.len()
	}

	/// Replaces the whole transition table from `(state, successor run)` pairs.
	///
	/// Pairs for the same state accumulate. The new table is built apart and
	/// swapped in only once every pair was accepted.
	///
	/// # Errors
	/// - `InvalidState` / `EmptySuccessors` on a malformed pair
	/// - `ResourceExhausted` if the table cannot grow
	pub fn load_transitions<I, S, T>(&mut self, pairs: I) -> Result<()>
	where
		I: IntoIterator<Item = (S, T)>,
		S: AsRef<str>,
		T: AsRef<str>,
	{
		let pairs = pairs.into_iter();
		let mut store = TransitionStore::with_capacity(pairs.size_hint().0)?;
		for (state, run) in pairs {
			store.insert(state.as_ref(), run.as_ref())?;
		}
		self.load_store(store);
		Ok(())
	}

	/// Parallel-array form of `load_transitions`.
	///
	/// # Errors
	/// `LengthMismatch` if both columns do not have the same length.
	pub fn load_transition_columns<S, T>(&mut self, states: &[S], runs: &[T]) -> Result<()>
	where
		S: AsRef<str>,
		T: AsRef<str>,
	{
		if states.len() != runs.len() {
			return Err(GenError::LengthMismatch { states: states.len(), runs: runs.len() });
		}
		self.load_transitions(states.iter().zip(runs))
	}

	/// Swaps in an already built table.
	pub fn load_store(&mut self, store: TransitionStore) {
		info!("loaded transition table with {} states", store.len());
		self.store = store;
	}

	/// Replaces the real-word set.
	pub fn load_wordset<I, S>(&mut self, words: I)
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		self.words = words.into_iter().collect();
		info!("loaded {} real words", self.words.len());
	}

	/// Releases both tables. Safe to call repeatedly.
	pub fn reset(&mut self) {
		self.store.clear();
		self.words = RealWordSet::new();
		self.name = None;
	}

	/// Returns `true` if `word` is a known real word.
	pub fn word_exists(&self, word: &str) -> bool {
		self.words.contains(word)
	}

	/// Builds one word and reports how its walk ended.
	pub fn build_word(&mut self) -> BuiltWord {
		WordBuilder::new(&self.store).build(&mut self.rng)
	}

	/// Generates one word without real-word exclusion.
	pub fn generate_word(&mut self) -> String {
		self.build_word().word
	}

	/// Generates one word, rejecting known words within the retry budget.
	pub fn generate_fake_word_outcome(&mut self) -> FakeWord {
		FakeWordFilter::new(WordBuilder::new(&self.store), &self.words, self.config.max_tries)
			.generate_fake(&mut self.rng)
	}

	/// Generates one fake word.
	///
	/// When the retry budget runs out the last candidate is returned even if
	/// it is a real word; use `generate_fake_word_outcome` to detect it.
	pub fn generate_fake_word(&mut self) -> String {
		self.generate_fake_word_outcome().word
	}

	/// Generates `count` independent words without exclusion.
	pub fn generate_words(&mut self, count: usize) -> Vec<String> {
		(0..count).map(|_| self.generate_word()).collect()
	}

	/// Generates `count` independent fake words.
	pub fn generate_fake_words(&mut self, count: usize) -> Vec<String> {
		let filter = FakeWordFilter::new(WordBuilder::new(&self.store), &self.words, self.config.max_tries);
		(0..count).map(|_| filter.generate_fake(&mut self.rng).word).collect()
	}

	/// Samples `nb_real` real words (fewer if the vocabulary is smaller) and
	/// generates `nb_fake` fake words.
	pub fn challenge(&mut self, nb_real: usize, nb_fake: usize) -> Challenge {
		let real = self.words.sample(&mut self.rng, nb_real);
		let fake = self.generate_fake_words(nb_fake);
		Challenge { real, fake }
	}
}
