use std::path::PathBuf;

use clap::Parser;
use fakeword_core::io::normalize_folder;
use fakeword_core::model::DEFAULT_MAX_TRIES;
use fakeword_core::model::generator::GeneratorConfig;

/// Command line (and environment) configuration of the server.
#[derive(Parser, Debug, Clone)]
#[command(name = "fakeword-server", version, about = "HTTP service generating fake words")]
pub struct Args {
	/// Address to bind.
	#[arg(long, env = "FAKEWORD_HOST", default_value = "127.0.0.1")]
	pub host: String,

	/// Port to bind.
	#[arg(long, env = "FAKEWORD_PORT", default_value_t = 5000)]
	pub port: u16,

	/// Directory holding `.txt` word lists.
	#[arg(long, env = "FAKEWORD_DATA_DIR", default_value = "./data")]
	pub data_dir: String,

	/// Word list (name without extension) to load at startup.
	#[arg(long, env = "FAKEWORD_WORD_LIST")]
	pub word_list: Option<String>,

	/// Retry ceiling when rejecting real words.
	#[arg(long, env = "FAKEWORD_MAX_TRIES", default_value_t = DEFAULT_MAX_TRIES)]
	pub max_tries: usize,

	/// Largest `count` accepted by `/v1/words`.
	#[arg(long, env = "FAKEWORD_MAX_BATCH", default_value_t = 1000)]
	pub max_batch: usize,
}

/// Settings shared read-only by every request handler.
#[derive(Debug, Clone)]
pub struct Settings {
	pub data_dir: PathBuf,
	pub generator: GeneratorConfig,
	pub max_batch: usize,
}

impl Args {
	pub fn settings(&self) -> Settings {
		Settings {
			data_dir: normalize_folder(&self.data_dir),
			generator: GeneratorConfig { max_tries: self.max_tries },
			max_batch: self.max_batch,
		}
	}
}

impl Settings {
	/// Path of the word list `name` inside the data directory.
	///
	/// Returns `None` for names that would escape the directory.
	pub fn word_list_path(&self, name: &str) -> Option<PathBuf> {
		if name.is_empty() || name.contains(['/', '\\']) || name.contains("..") {
			return None;
		}
		Some(self.data_dir.join(format!("{name}.txt")))
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn defaults() {
		let args = Args::parse_from(["fakeword-server"]);
		assert_eq!(args.port, 5000);
		assert_eq!(args.max_tries, 100);
		assert_eq!(args.word_list, None);
		assert_eq!(args.settings().generator.max_tries, 100);
	}

	#[test]
	fn overrides() {
		let args = Args::parse_from([
			"fakeword-server", "--port", "8080", "--word-list", "english", "--max-tries", "5",
		]);
		assert_eq!(args.port, 8080);
		assert_eq!(args.word_list.as_deref(), Some("english"));
		assert_eq!(args.settings().generator, GeneratorConfig { max_tries: 5 });
	}

	#[test]
	fn word_list_names_stay_in_the_data_dir() {
		let settings = Args::parse_from(["fakeword-server", "--data-dir", "lists"]).settings();
		assert_eq!(settings.word_list_path("english"), Some(PathBuf::from("lists/english.txt")));
		assert_eq!(settings.word_list_path("../secret"), None);
		assert_eq!(settings.word_list_path("a/b"), None);
		assert_eq!(settings.word_list_path(""), None);
	}
}
