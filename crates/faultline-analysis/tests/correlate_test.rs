//! Correlation of the recorded execution with the model.

use std::path::Path;

use faultline_analysis::Program;
use faultline_core::errors::{ModelError, TraceError};

fn game_program() -> Program {
    Program::load("Game", Path::new("tests/fixtures/game/run.toml")).unwrap()
}

fn contacts_program() -> Program {
    Program::load("Contacts", Path::new("tests/fixtures/contacts/run_faults.toml")).unwrap()
}

#[test]
fn executed_statements_keep_order_and_duplicates() {
    let program = game_program();
    let correlator = program.correlator();

    let statements = correlator.executed_statements_of("testNewGame").unwrap();
    let trail: Vec<(&str, u32)> = statements
        .iter()
        .map(|s| (s.class_name.as_str(), s.line))
        .collect();
    assert_eq!(
        trail,
        vec![
            ("GameTest", 12),
            ("Player", 8),
            ("Player", 16),
            ("GameTest", 13),
            ("Player", 8),
            ("Player", 16),
            ("GameTest", 14),
            ("GameTest", 15),
            ("Game", 11),
            ("Game", 21),
            ("Game", 12),
            ("Game", 29),
            ("Game", 13),
            ("Game", 37),
            ("GameTest", 16),
            ("Game", 33),
            ("GameTest", 17),
            ("Game", 17),
        ]
    );
}

#[test]
fn unresolvable_records_are_dropped() {
    let program = game_program();
    let correlator = program.correlator();

    // The failing run recorded one statement at line 0; it resolves to
    // no method and is silently dropped.
    let statements = correlator
        .executed_statements_of("testGameResigned")
        .unwrap();
    assert_eq!(statements.len(), 16);
    let last = statements.last().unwrap();
    assert_eq!((last.class_name.as_str(), last.line), ("Player", 28));
}

#[test]
fn resolution_is_idempotent() {
    let program = game_program();
    let correlator = program.correlator();

    for test in ["testNewGame", "testGameResigned"] {
        let first = correlator.executed_statements_of(test).unwrap();
        let second = correlator.executed_statements_of(test).unwrap();
        assert_eq!(first, second);
    }
}

#[test]
fn unknown_test_is_reported() {
    let program = game_program();
    let correlator = program.correlator();

    let err = correlator.executed_statements_of("testMissing").unwrap_err();
    assert!(matches!(
        err,
        ModelError::Trace(TraceError::TestResultNotFound { .. })
    ));
}

#[test]
fn executed_queries_deduplicate_in_first_execution_order() {
    let program = contacts_program();
    let correlator = program.correlator();

    // Lines 25, 26 and 30 all belong to the query starting at 25.
    let queries = correlator.executed_queries_of("testAddContact").unwrap();
    let starts: Vec<u32> = queries.iter().map(|q| q.starting_line()).collect();
    assert_eq!(starts, vec![25]);

    let queries = correlator.executed_queries_of("testFindByEmail").unwrap();
    let starts: Vec<u32> = queries.iter().map(|q| q.starting_line()).collect();
    assert_eq!(starts, vec![25, 39]);

    let queries = correlator.executed_queries_of("testFindMatches").unwrap();
    let starts: Vec<u32> = queries.iter().map(|q| q.starting_line()).collect();
    assert_eq!(starts, vec![60, 63]);
}

#[test]
fn candidates_come_from_failing_tests_only() {
    let program = contacts_program();
    let correlator = program.correlator();

    let candidates = correlator.candidate_queries().unwrap();
    assert_eq!(candidates.len(), 1);
    let (test, queries) = &candidates[0];
    assert_eq!(test, "testFindByEmail");
    let starts: Vec<u32> = queries.iter().map(|q| q.starting_line()).collect();
    assert_eq!(starts, vec![25, 39]);
}

#[test]
fn test_statements_resolve_against_test_classes() {
    let program = game_program();
    let correlator = program.correlator();

    let statements = correlator.executed_statements_of("testGameResigned").unwrap();
    let first = statements.first().unwrap();
    assert_eq!(first.class_name, "GameTest");
    assert_eq!(first.text, "Player player1 = new Player(\"Fred\");");
}
