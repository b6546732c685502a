//! Error codes and their propagation through `TaggerError`.

use std::collections::HashSet;
use std::io;

use causeway_core::errors::error_code;
use causeway_core::errors::*;

fn spawn_failure() -> MatcherError {
    MatcherError::Spawn {
        command: "/opt/tregex/tregex.sh".into(),
        message: "No such file or directory".into(),
    }
}

#[test]
fn every_variant_has_a_code() {
    let codes: Vec<&str> = vec![
        ConfigError::Invalid { field: "tagger.max_threads", message: "must be greater than 0" }.error_code(),
        SentenceError::MalformedTree { offset: 3, message: "unbalanced".into() }.error_code(),
        SentenceError::TokenOutOfRange { index: 9, len: 4 }.error_code(),
        spawn_failure().error_code(),
        MatcherError::Failed { command: "tregex.sh".into(), status: "exit status: 2".into() }.error_code(),
        MatcherError::Io { message: "broken pipe".into() }.error_code(),
        TaggerError::cache_io("/tmp/cache", io::Error::other("disk full")).error_code(),
        TaggerError::Preprocess { message: "3 trees for 4 sentences".into() }.error_code(),
        TaggerError::WorkerPanicked.error_code(),
    ];
    for code in &codes {
        assert!(!code.is_empty());
        assert_eq!(code.to_uppercase(), *code);
    }
}

#[test]
fn tagger_error_keeps_subsystem_codes() {
    let err: TaggerError = spawn_failure().into();
    assert_eq!(err.error_code(), error_code::MATCHER_SPAWN_FAILED);

    let err: TaggerError = SentenceError::MissingConstituencyTree.into();
    assert_eq!(err.error_code(), error_code::SENTENCE_ERROR);
}

#[test]
fn only_spawn_failures_are_fatal() {
    assert!(spawn_failure().is_fatal());
    assert!(!MatcherError::Failed { command: "x".into(), status: "1".into() }.is_fatal());
    assert!(!MatcherError::Io { message: "x".into() }.is_fatal());
}

#[test]
fn coded_string_prefixes_the_code() {
    let err = TaggerError::Preprocess { message: "3 trees for 4 sentences".into() };
    assert_eq!(
        err.coded_string(),
        "[PREPROCESS_FAILED] Preprocessing failed: 3 trees for 4 sentences"
    );
}

#[test]
fn code_constants_are_unique() {
    let all = [
        error_code::CONFIG_ERROR,
        error_code::MALFORMED_TREE,
        error_code::SENTENCE_ERROR,
        error_code::MATCHER_SPAWN_FAILED,
        error_code::MATCHER_FAILED,
        error_code::MATCHER_IO,
        error_code::CACHE_IO,
        error_code::PREPROCESS_FAILED,
        error_code::WORKER_PANICKED,
        error_code::PATTERN_STORE,
        error_code::WORKER_SPAWN_FAILED,
    ];
    let unique: HashSet<_> = all.iter().collect();
    assert_eq!(unique.len(), all.len());
}
