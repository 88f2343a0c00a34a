use std::fs;
use std::io::Write;
use tempfile::TempDir;

use groundrag_core::data_processor::DataProcessor;
use groundrag_core::types::{Answer, HistoryEntry, Sender};

#[test]
fn process_directory_one_chunk_per_file_keyed_by_name() {
    let tmp = TempDir::new().unwrap();
    let dir = tmp.path();
    let mut f = fs::File::create(dir.join("bab1.txt")).unwrap();
    writeln!(f, "  Pancasila adalah dasar negara.  ").unwrap();
    fs::write(dir.join("bab2.md"), "UUD 1945").unwrap();
    fs::write(dir.join("notes.pdf"), "ignored").unwrap();

    let chunks = DataProcessor::new().process_directory(dir).expect("process");

    assert_eq!(chunks.len(), 2, "only .txt and .md are read");
    assert_eq!(chunks[0].key, "bab1.txt");
    assert_eq!(chunks[0].content, "Pancasila adalah dasar negara.", "content is trimmed");
    assert_eq!(chunks[1].key, "bab2.md");
    assert_eq!(chunks[1].total_chunks, 1);
}

#[test]
fn process_directory_skips_empty_files() {
    let tmp = TempDir::new().unwrap();
    fs::write(tmp.path().join("a.txt"), "   \n\n ").unwrap();
    fs::write(tmp.path().join("b.txt"), "isi").unwrap();

    let chunks = DataProcessor::new().process_directory(tmp.path()).expect("process");
    assert_eq!(chunks.len(), 1);
    assert_eq!(chunks[0].key, "b.txt");
}

#[test]
fn character_chunking_splits_and_keys_each_window() {
    let tmp = TempDir::new().unwrap();
    fs::write(tmp.path().join("doc.txt"), "abcdefghij").unwrap();

    let chunks = DataProcessor::with_chunk_chars(Some(4)).process_directory(tmp.path()).expect("process");

    let keys: Vec<&str> = chunks.iter().map(|c| c.key.as_str()).collect();
    assert_eq!(keys, vec!["doc.txt_chunk_0", "doc.txt_chunk_1", "doc.txt_chunk_2"]);
    assert_eq!(chunks[2].content, "ij");
    for c in &chunks { assert_eq!(c.total_chunks, 3); }
}

#[test]
fn empty_directory_yields_no_chunks() {
    let tmp = TempDir::new().unwrap();
    let chunks = DataProcessor::new().process_directory(tmp.path()).expect("process");
    assert!(chunks.is_empty());
}

#[test]
fn answer_serializes_with_camel_case_fields() {
    let answer = Answer {
        answer: "a".into(),
        raw_answer: "a".into(),
        context_used: "ctx".into(),
        used_generator: true,
        refused: false,
    };
    let json = serde_json::to_value(&answer).unwrap();
    assert_eq!(json["rawAnswer"], "a");
    assert_eq!(json["contextUsed"], "ctx");
    assert_eq!(json["usedGenerator"], true);
}

#[test]
fn refusal_carries_no_context() {
    let answer = Answer::refusal("Maaf");
    assert!(answer.refused);
    assert!(!answer.used_generator);
    assert!(answer.context_used.is_empty());
    assert_eq!(answer.answer, answer.raw_answer);
}

#[test]
fn history_labels_follow_sender() {
    assert_eq!(HistoryEntry::new(Sender::User, "q").sender.label(), "User");
    assert_eq!(Sender::Ai.label(), "AI");
}

#[test]
fn missing_directory_is_an_error() {
    let tmp = TempDir::new().unwrap();
    assert!(DataProcessor::new().process_directory(&tmp.path().join("absent")).is_err());
}
