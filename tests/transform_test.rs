//! End-to-end tests for substitution and the readiness handshake.

use std::sync::Arc;
use std::thread;
use std::time::Duration;

use thesaurize::analysis::message::Message;
use thesaurize::analysis::token_filter::StopFilter;
use thesaurize::config::LoaderConfig;
use thesaurize::engine::{self, SubstitutionEngine};
use thesaurize::error::ThesaurizeError;
use thesaurize::loader;
use thesaurize::store::{KvBackend, Lexeme, MemoryBackend, STATUS_CHANNEL, SynonymStore};

fn store_with(entries: &[(Lexeme, &str, &[&str])]) -> (Arc<MemoryBackend>, SynonymStore) {
    let backend = Arc::new(MemoryBackend::new());
    let store = SynonymStore::new(backend.clone());
    let mut writer = store.batch_writer();
    for (lexeme, headword, synonyms) in entries {
        let synonyms: Vec<String> = synonyms.iter().map(|s| s.to_string()).collect();
        writer.add(*lexeme, headword, &synonyms).unwrap();
    }
    writer.finish().unwrap();
    (backend, store)
}

#[test]
fn test_hello_world() {
    let (_, store) = store_with(&[(Lexeme::Noun, "world", &["earth"])]);
    assert_eq!(engine::transform("Hello, world!", &store, false), "Hello, earth!");
}

#[test]
fn test_round_trip_without_candidates() {
    let (_, store) = store_with(&[]);
    for text in [
        "Hey, how's it going?",
        "(Parenthetical) remarks -- and \"quotes\" -- survive.",
        "NASA and the well-known ESA agreed: launch at dawn!",
    ] {
        assert_eq!(engine::transform(text, &store, false), text);
    }
}

#[test]
fn test_common_words_are_skipped() {
    let (_, store) = store_with(&[
        (Lexeme::Noun, "the", &["thee"]),
        (Lexeme::Adjective, "quick", &["fast"]),
        (Lexeme::Noun, "fox", &["vixen"]),
    ]);

    assert_eq!(
        engine::transform("The quick fox.", &store, true),
        "The fast vixen."
    );
    assert_eq!(
        engine::transform("The quick fox.", &store, false),
        "Thee fast vixen."
    );

    let custom = SubstitutionEngine::new(store).with_stop_filter(StopFilter::from_words(["fox"]));
    assert_eq!(custom.transform("The quick fox.", true), "Thee fast fox.");
}

#[test]
fn test_unreachable_store_returns_input() {
    let (backend, store) = store_with(&[(Lexeme::Noun, "world", &["earth"])]);
    backend.set_offline(true);

    assert_eq!(engine::transform("Hello, world!", &store, false), "Hello, world!");
}

#[test]
fn test_output_respects_budget() {
    let (_, store) = store_with(&[(Lexeme::Noun, "word", &["vocable"])]);
    let text = vec!["word"; 600].join(" ");

    let output = engine::transform(&text, &store, false);

    assert!(output.len() <= 2000);
    assert!(output.ends_with("..."));
    assert!(output.starts_with("vocable vocable"));
}

#[test]
fn test_truncation_at_1997() {
    let text = format!("{} {}", "a".repeat(1990), "b".repeat(10));
    let output = Message::parse(&text).reconstruct();

    assert_eq!(output, format!("{} ...", "a".repeat(1990)));
    assert!(output.len() <= 2000);
}

#[test]
fn test_wait_for_ready_after_background_load() {
    let dir = tempfile::TempDir::new().unwrap();
    let path = dir.path().join("th.zip");
    {
        use std::io::Write;
        let mut writer = zip::ZipWriter::new(std::fs::File::create(&path).unwrap());
        writer
            .start_file("th.dat", zip::write::SimpleFileOptions::default())
            .unwrap();
        writer.write_all(b"UTF-8\nhappy|1\n(adj)|joyful|glad\n").unwrap();
        writer.finish().unwrap();
    }
    let uri = format!("file://{}", path.display());

    let backend = Arc::new(MemoryBackend::new());
    let store = SynonymStore::new(backend);
    let ready = store.subscribe_ready().unwrap();

    let loader_store = store.clone();
    let handle = thread::spawn(move || {
        loader::load(&uri, &loader_store, &LoaderConfig::default(), None)
    });

    ready.wait(Duration::from_secs(10)).unwrap();
    let output = engine::transform("Happy!", &store, false);
    assert!(output == "Joyful!" || output == "Glad!");

    handle.join().unwrap().unwrap();
}

#[test]
fn test_wait_for_ready_errors() {
    let backend = Arc::new(MemoryBackend::new());
    let store = SynonymStore::new(backend.clone());

    assert!(store.wait_for_ready(Duration::ZERO).is_ok());
    assert!(matches!(
        store.wait_for_ready(Duration::from_millis(20)),
        Err(ThesaurizeError::Timeout(_))
    ));

    let subscription = store.subscribe_ready().unwrap();
    backend.publish(STATUS_CHANNEL, "reloading").unwrap();
    assert!(matches!(
        subscription.wait(Duration::from_secs(1)),
        Err(ThesaurizeError::Protocol(_))
    ));
}
