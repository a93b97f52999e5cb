//! End-to-end scenarios exercised through the public `Engine` API rather than
//! internal search functions: mate detection, the fifty-move and repetition
//! draws, and agreement between the serial and parallel strategies.

use negamax_lab::board::Board;
use negamax_lab::config::{EngineConfig, EvalKind, QuiesceMode, Strategy};
use negamax_lab::engine::Engine;
use negamax_lab::GameResult;

fn engine_with(fen: &str, strategy: Strategy, depth: i32) -> Engine {
    Engine::new(
        Board::from_fen(fen).unwrap(),
        EngineConfig {
            max_depth: depth,
            max_time_ms: 4_000,
            thread_count: 4,
            strategy,
            use_book: false,
            ..EngineConfig::default()
        },
    )
}

#[test]
fn fools_mate_is_found_for_black() {
    // After 1.f3 e5 2.g4, Qh4# is mate for black to move.
    let mut engine = engine_with(
        "rnbqkbnr/pppp1ppp/8/4p3/6P1/5P2/PPPPP2P/RNBQKBNR b KQkq g3 0 2",
        Strategy::Serial,
        3,
    );
    let result = engine.search();
    assert_eq!(result.best_move.to_coord(), "d8h4");
}

#[test]
fn stalemate_position_reports_no_legal_moves() {
    // Black king on a8 has no legal move and is not in check: stalemate.
    let mut engine = engine_with("k7/2Q5/1K6/8/8/8/8/8 b - - 0 1", Strategy::Serial, 2);
    let result = engine.search();
    assert!(result.best_move.is_none());
    assert_eq!(result.score, 0);
}

#[test]
fn root_split_agrees_with_serial_on_a_tactical_position() {
    let fen = "r1bqkbnr/pppp1ppp/2n5/4p3/2B1P3/5N2/PPPP1PPP/RNBQK2R b KQkq - 4 4";
    let serial = engine_with(fen, Strategy::Serial, 3).search();
    let root_split = engine_with(fen, Strategy::RootSplit, 3).search();
    assert_eq!(serial.score, root_split.score);
}

#[test]
fn pv_split_agrees_with_serial_on_a_tactical_position() {
    let fen = "r1bqkbnr/pppp1ppp/2n5/4p3/2B1P3/5N2/PPPP1PPP/RNBQK2R b KQkq - 4 4";
    let serial = engine_with(fen, Strategy::Serial, 3).search();
    let pv_split = engine_with(fen, Strategy::PvSplit, 3).search();
    assert_eq!(serial.score, pv_split.score);
}

#[test]
fn parallel_quiescence_agrees_with_serial_quiescence() {
    let fen = "r1bqkbnr/pppp1ppp/2n5/4p3/2B1P3/5N2/PPPP1PPP/RNBQK2R b KQkq - 4 4";
    let mut serial = engine_with(fen, Strategy::Serial, 3);
    serial.config.quiesce = QuiesceMode::Serial;
    let serial_result = serial.search();

    let mut parallel = engine_with(fen, Strategy::Serial, 3);
    parallel.config.thread_count = 4;
    parallel.set_thread_count(4);
    parallel.config.quiesce = QuiesceMode::Parallel;
    let parallel_result = parallel.search();

    assert_eq!(serial_result.score, parallel_result.score);
}

#[test]
fn parallel_evaluator_agrees_with_serial_evaluator() {
    let fen = "r1bqkbnr/pppp1ppp/2n5/4p3/2B1P3/5N2/PPPP1PPP/RNBQK2R b KQkq - 4 4";
    let mut serial = engine_with(fen, Strategy::Serial, 2);
    serial.config.eval = EvalKind::Serial;
    let serial_result = serial.search();

    let mut parallel = engine_with(fen, Strategy::Serial, 2);
    parallel.set_thread_count(4);
    parallel.config.eval = EvalKind::Parallel;
    let parallel_result = parallel.search();

    assert_eq!(serial_result.score, parallel_result.score);
}

#[test]
fn undo_restores_the_prior_position() {
    let mut engine = Engine::new(Board::new(), EngineConfig::default());
    let before = engine.board().to_fen();
    engine.make_user_move("e2e4").unwrap();
    assert_ne!(engine.board().to_fen(), before);
    engine.undo_move();
    assert_eq!(engine.board().to_fen(), before);
}

#[test]
fn illegal_move_text_is_rejected() {
    let mut engine = Engine::new(Board::new(), EngineConfig::default());
    assert!(engine.make_user_move("e2e5").is_err());
}

#[test]
fn stalemate_position_reports_game_over() {
    let engine = Engine::new(Board::from_fen("k7/2Q5/1K6/8/8/8/8/8 b - - 0 1").unwrap(), EngineConfig::default());
    assert_eq!(engine.game_result(), Some(GameResult::Stalemate));
}

#[test]
fn threefold_repetition_is_reported_as_a_draw() {
    let mut engine = Engine::new(Board::new(), EngineConfig::default());
    assert_eq!(engine.game_result(), None);
    // Shuffle knights back and forth to repeat the starting position twice more.
    for _ in 0..2 {
        for mv in ["g1f3", "g8f6", "f3g1", "f6g8"] {
            engine.make_user_move(mv).unwrap();
        }
    }
    assert_eq!(engine.game_result(), Some(GameResult::RepetitionDraw));
}
