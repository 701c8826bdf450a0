use std::collections::HashSet;
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::{env, fs, io};

/// Reads a word list and returns its distinct words in file order.
///
/// - One word per line (`\n` / `\r\n`)
/// - Surrounding whitespace is trimmed, words are lowercased
/// - Blank lines and repeated words are skipped
pub fn read_word_list<P: AsRef<Path>>(filename: P) -> io::Result<Vec<String>> {
	let mut contents = String::new();
	File::open(filename)?.read_to_string(&mut contents)?;

	let mut seen = HashSet::new();
	Ok(contents
		.lines()
		.map(|line| line.trim().to_lowercase())
		.filter(|word| !word.is_empty() && seen.insert(word.clone()))
		.collect())
}

/// Path of the file stored next to a word list under another extension.
///
/// Used for the binary transition cache: `data/english.txt` with `"bin"`
/// gives `data/english.bin`. A bare name stays in the current directory.
pub fn build_output_path<P: AsRef<Path>>(word_list: P, extension: &str) -> io::Result<PathBuf> {
	let word_list = word_list.as_ref();
	let stem = word_list
		.file_stem()
		.ok_or_else(|| io::Error::new(io::ErrorKind::InvalidInput, "Word list path has no file name"))?;

	let mut cache = word_list.parent().unwrap_or_else(|| Path::new(".")).join(stem);
	cache.set_extension(extension);
	Ok(cache)
}

/// Name under which a loaded word list is reported: its file stem.
pub fn get_filename<P: AsRef<Path>>(word_list: P) -> io::Result<String> {
	word_list
		.as_ref()
		.file_stem()
		.map(|stem| stem.to_string_lossy().into_owned())
		.ok_or_else(|| io::Error::new(io::ErrorKind::InvalidInput, "Word list path has no file name"))
}

/// Resolves the configured data directory.
///
/// `.` and `./` become the working directory; anything else is kept
/// verbatim, without canonicalization.
pub fn normalize_folder(data_dir: &str) -> PathBuf {
	match data_dir {
		"." | "./" => env::current_dir().unwrap_or_else(|_| PathBuf::from(".")),
		_ => PathBuf::from(data_dir),
	}
}

/// File names (not paths) in `dir` ending in `.<extension>`, sorted.
///
/// Directories with a matching name are skipped.
pub fn list_files<P: AsRef<Path>>(dir: P, extension: &str) -> io::Result<Vec<String>> {
	let mut files = Vec::new();

	for entry in fs::read_dir(dir)? {
		let path = entry?.path();

		if path.is_file() && path.extension() == Some(std::ffi::OsStr::new(extension)) {
			if let Some(name) = path.file_name() {
				files.push(name.to_string_lossy().to_string());
			}
		}
	}

	files.sort();
	Ok(files)
}

/// Returns `true` if `derived` is missing or older than `source`.
///
/// Used to decide whether a binary cache must be rebuilt. If modification
/// times are unavailable the cache is considered fresh when it exists.
pub fn is_stale<PD: AsRef<Path>, PS: AsRef<Path>>(derived: PD, source: PS) -> bool {
	let derived = match fs::metadata(derived) {
		Ok(meta) => meta,
		Err(_) => return true,
	};
	match (derived.modified(), fs::metadata(source).and_then(|meta| meta.modified())) {
		(Ok(derived), Ok(source)) => derived < source,
		_ => false,
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use tempfile::TempDir;

	#[test]
	fn word_list_is_trimmed_lowercased_and_deduplicated() {
		let dir = TempDir::new().unwrap();
		let path = dir.path().join("words.txt");
		fs::write(&path, "Apple\r\n  pear \n\napple\nPLUM\n").unwrap();

		assert_eq!(read_word_list(&path).unwrap(), vec!["apple", "pear", "plum"]);
	}

	#[test]
	fn missing_word_list_is_an_error() {
		let dir = TempDir::new().unwrap();
		assert!(read_word_list(dir.path().join("nope.txt")).is_err());
	}

	#[test]
	fn output_path_swaps_extension() {
		let path = build_output_path("data/words.txt", "bin").unwrap();
		assert_eq!(path, PathBuf::from("data/words.bin"));
	}

	#[test]
	fn filename_is_the_stem() {
		assert_eq!(get_filename("./data/english.txt").unwrap(), "english");
		assert_eq!(get_filename("english").unwrap(), "english");
		assert!(get_filename("").is_err());
	}

	#[test]
	fn cache_path_of_a_bare_name_stays_local() {
		assert_eq!(build_output_path("english.txt", "bin").unwrap(), PathBuf::from("english.bin"));
		assert!(build_output_path("", "bin").is_err());
	}

	#[test]
	fn data_dir_dot_is_the_working_directory() {
		let cwd = env::current_dir().unwrap();
		assert_eq!(normalize_folder("."), cwd);
		assert_eq!(normalize_folder("./"), cwd);
		assert_eq!(normalize_folder("data/lists"), PathBuf::from("data/lists"));
	}

	#[test]
	fn lists_only_matching_files() {
		let dir = TempDir::new().unwrap();
		fs::write(dir.path().join("b.txt"), "x").unwrap();
		fs::write(dir.path().join("a.txt"), "x").unwrap();
		fs::write(dir.path().join("a.bin"), "x").unwrap();
		fs::create_dir(dir.path().join("sub.txt")).unwrap();

		assert_eq!(list_files(dir.path(), "txt").unwrap(), vec!["a.txt", "b.txt"]);
	}

	#[test]
	fn missing_cache_is_stale() {
		let dir = TempDir::new().unwrap();
		let source = dir.path().join("words.txt");
		fs::write(&source, "a").unwrap();
		assert!(is_stale(dir.path().join("words.bin"), &source));

		fs::write(dir.path().join("words.bin"), "x").unwrap();
		assert!(!is_stale(dir.path().join("words.bin"), &source));
	}
}
