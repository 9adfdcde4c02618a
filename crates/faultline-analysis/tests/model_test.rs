//! Model construction over the game fixture: boundary normalization,
//! constructor renaming, and statement lookup.

use std::path::Path;

use faultline_analysis::{ClassKind, Program};
use faultline_core::errors::ModelError;

fn game_program() -> Program {
    Program::load("Game", Path::new("tests/fixtures/game/run.toml")).unwrap()
}

#[test]
fn builds_one_class_per_accepted_source_file() {
    let program = game_program();

    let names: Vec<&str> = program.classes().iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, vec!["Game", "Player"]);
    assert!(program
        .classes()
        .iter()
        .all(|c| c.kind == ClassKind::Production));

    let test_names: Vec<&str> = program
        .test_classes()
        .iter()
        .map(|c| c.name.as_str())
        .collect();
    assert_eq!(test_names, vec!["GameTest"]);
}

#[test]
fn constructor_is_renamed_and_its_body_rebased() {
    let program = game_program();
    let game = program.class_by_name("Game").unwrap();

    let ctor = game.method_by_name("Game").unwrap();
    assert_eq!(ctor.signature, "<init>(I[LPlayer;)V");
    assert_eq!((ctor.start_line, ctor.end_line), (11, 13));
    assert_eq!(
        ctor.statement_by_line(11).unwrap().text,
        "setGameType(gameType);"
    );
}

#[test]
fn void_method_end_marker_is_rebased() {
    let program = game_program();
    let game = program.class_by_name("Game").unwrap();

    let setter = game.method_by_name("setPlayerList").unwrap();
    assert_eq!((setter.start_line, setter.end_line), (29, 29));
    assert_eq!(
        setter.statement_by_line(29).unwrap().text,
        "this.playerList = playerList;"
    );

    // Non-void boundaries are taken as recorded.
    let getter = game.method_by_name("getPlayerList").unwrap();
    assert_eq!((getter.start_line, getter.end_line), (25, 25));
    assert_eq!(getter.statement_by_line(25).unwrap().text, "return playerList;");
}

#[test]
fn test_class_skips_constructor_entries() {
    let program = game_program();
    let tests = program.test_class_by_name("GameTest").unwrap();

    assert_eq!(tests.methods().len(), 2);
    let new_game = tests.method_by_name("testNewGame").unwrap();
    assert_eq!((new_game.start_line, new_game.end_line), (12, 17));
    assert_eq!(
        new_game.statement_by_line(17).unwrap().text,
        "assertEquals(Game.SINGLES, game.getGameType());"
    );

    let resigned = program.test_method_by_name("testGameResigned").unwrap();
    assert_eq!((resigned.start_line, resigned.end_line), (21, 26));
}

#[test]
fn class_level_statement_lookup_spans_methods() {
    let program = game_program();
    let player = program.class_by_name("Player").unwrap();

    let stmt = player.statement_by_line(28).unwrap();
    assert_eq!(stmt.method_name, "resignGame");
    assert_eq!(stmt.text, "currentGame.resignGame(this);");

    // Line 10 is a blank line between methods.
    assert!(matches!(
        player.statement_by_line(10),
        Err(ModelError::StatementNotFound { .. })
    ));
}

#[test]
fn lookup_misses_are_typed() {
    let program = game_program();

    assert!(matches!(
        program.class_by_name("GameTest"),
        Err(ModelError::ClassNotFound { .. })
    ));
    assert!(matches!(
        program.test_method_by_name("testMissing"),
        Err(ModelError::MethodNotFound { .. })
    ));

    let game = program.class_by_name("Game").unwrap();
    assert!(matches!(
        game.method_by_name("resign"),
        Err(ModelError::MethodNotFound { .. })
    ));
    assert!(matches!(
        game.method_by_signature("resignGame()V"),
        Err(ModelError::SignatureNotFound { .. })
    ));
}

#[test]
fn statement_values_compare_by_location() {
    let program = game_program();
    let game = program.class_by_name("Game").unwrap();

    let via_class = game.statement_by_line(45).unwrap();
    let via_method = game
        .method_by_name("resignGame")
        .unwrap()
        .statement_by_line(45)
        .unwrap();
    assert_eq!(via_class, via_method);
}
