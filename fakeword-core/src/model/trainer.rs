use std::sync::mpsc;
use std::thread;

use log::{debug, info};

use super::state::State;
use super::transition_store::TransitionStore;
use super::{END_CHAR, ORDER, START_CHAR};
use crate::error::{GenError, Result};

/// Accumulates transition statistics from real words.
///
/// Each word is padded as `^^^` + word + `$`, then every window of `ORDER`
/// symbols records the symbol that follows it. A transition seen `k` times
/// appears `k` times in the state's successor run.
#[derive(Debug, Default)]
pub struct Trainer {
	store: TransitionStore,
	words: usize,
}

impl Trainer {
	pub fn new() -> Self {
		Self::default()
	}

	/// Adds one word to the statistics.
	///
	/// # Notes
	/// - Empty words and words holding a sentinel are skipped.
	/// - Returns whether the word was used.
	pub fn add_word(&mut self, word: &str) -> Result<bool> {
		if word.is_empty() || word.contains([START_CHAR, END_CHAR]) {
			debug!("skipping training word {:?}", word);
			return Ok(false);
		}

		let padded: Vec<char> = std::iter::repeat_n(START_CHAR, ORDER)
			.chain(word.chars())
			.chain(std::iter::once(END_CHAR))
			.collect();

		for window in padded.windows(ORDER + 1) {
			// Leading ORDER symbols of the window, next symbol last
			if let Some(state) = State::from_window(&window[..ORDER]) {
				self.store.insert_symbol(state, window[ORDER])?;
			}
		}

		self.words += 1;
		Ok(true)
	}

	/// Number of words used so far.
	pub fn word_count(&self) -> usize {
		self.words
	}

	/// Merges another trainer's statistics into this one.
	pub fn merge(&mut self, other: &Self) -> Result<()> {
		self.store.merge(&other.store)?;
		self.words += other.words;
		Ok(())
	}

	/// Returns the accumulated store.
	pub fn finish(self) -> TransitionStore {
		self.store
	}
}

/// Trains a store from a word list, in parallel.
///
/// # Behavior
/// - Splits the list into chunks (CPU cores * factor).
/// - Spawns one thread per chunk to build a partial store.
/// - Merges partial stores in chunk order, so the resulting runs do not
///   depend on thread scheduling.
///
/// # Errors
/// - `EmptyWordList` if no word was usable.
/// - `ResourceExhausted` if a table could not grow.
pub fn train(words: &[String]) -> Result<TransitionStore> {
	if words.is_empty() {
		return Err(GenError::EmptyWordList);
	}

	let cpus = num_cpus::get();
	let factor = 8;
	let chunks = cpus * factor;
	let chunk_size = words.len().div_ceil(chunks);

	let (tx, rx) = mpsc::channel();
	thread::scope(|scope| {
		for (index, chunk) in words.chunks(chunk_size).enumerate() {
			let tx = tx.clone();
			scope.spawn(move || {
				let mut partial = Trainer::new();
				let result = chunk
					.iter()
					.try_for_each(|word| partial.add_word(word).map(|_| ()))
					.map(|_| partial);
				// Receiver is drained after the scope
				let _ = tx.send((index, result));
			});
		}
	});
	drop(tx);

	let mut partials: Vec<(usize, Result<Trainer>)> = rx.iter().collect();
	partials.sort_by_key(|(index, _)| *index);

	let mut trainer = Trainer::new();
	for (_, partial) in partials {
		trainer.merge(&partial?)?;
	}

	if trainer.word_count() == 0 {
		return Err(GenError::EmptyWordList);
	}
	info!("trained {} states from {} words", trainer.store.len(), trainer.word_count());
	Ok(trainer.finish())
}

/// Converts a store into `(state, successor run)` string pairs.
///
/// The output is accepted as-is by `Generator::load_transitions`.
pub fn export(store: &TransitionStore) -> Vec<(String, String)> {
	store
		.iter()
		.map(|(state, run)| (state.to_string(), run.iter().collect()))
		.collect()
}
