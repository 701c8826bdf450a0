use fakeword_core::model::generator::{Generator, GeneratorConfig};
use fakeword_core::model::trainer;
use fakeword_core::model::word_builder::Termination;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    // Train from a word list (one word per line)
    // A "words.bin" cache is written next to it and reused on the next run
    let config = GeneratorConfig { max_tries: 100 };
    let mut app = Generator::from_word_list(config, "./data/words.txt")?;

    println!("{} states, {} real words", app.state_count(), app.wordset_len());

    // Plain words may be real words
    for i in 0..5 {
        let built = app.build_word();
        let reason = match built.termination {
            Termination::Marker => "end marker",
            Termination::Length => "length limit",
            Termination::DeadEnd => "dead end",
        };
        println!("Word {}: {} ({})", i + 1, built.word, reason);
    }

    // Fake words are rejected while they match a real word
    for (i, word) in app.generate_fake_words(10).iter().enumerate() {
        println!("Fake word {}: {}", i + 1, word);
    }

    // The outcome tells whether the retry budget ran out
    let outcome = app.generate_fake_word_outcome();
    println!("{} after {} attempt(s), exhausted: {}", outcome.word, outcome.attempts, outcome.exhausted);

    // A table can also be loaded from raw (state, successors) pairs
    let mut tiny = Generator::with_seed(config, 7);
    tiny.load_transitions([("^^^", "aab"), ("^^a", "$$")])?;
    println!("Tiny table: {:?}", tiny.generate_words(5));

    // Invalid states are rejected and the previous table is kept
    match tiny.load_transitions([("^^", "a")]) {
        Ok(_) => println!("Should not happen"),
        Err(e) => println!("Rejected: {}", e),
    }

    // Export a trained table in the same pair format
    let greek: Vec<String> = ["alpha", "alpine", "beta", "better", "delta", "deltoid"]
        .iter()
        .map(|w| w.to_string())
        .collect();
    tiny.load_transitions(trainer::export(&trainer::train(&greek)?))?;
    tiny.load_wordset(greek);
    let round = tiny.challenge(2, 2);
    println!("Real: {:?}, fake: {:?}", round.real, round.fake);

    app.reset();
    Ok(())
}
