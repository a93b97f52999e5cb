//! The interactive REPL: a small command set for playing a game from a
//! terminal without a GUI, plus a `bench` command for a fixed-position
//! timing run.

use crate::board::{parse_move, Board, MoveArena};
use crate::config::{EngineConfig, EvalKind, QuiesceMode, Strategy};
use crate::engine::Engine;
use crate::xboard::{XboardHandler, XboardOutcome};
use std::io::{BufRead, Write};

const BENCH_FEN: &str = "rnbqkb1r/ppp2ppp/4pn2/3p4/2PP4/5N2/PP2PPPP/RNBQKB1R w KQkq - 0 5";
const BENCH_ITERATIONS: u32 = 3;

pub fn run_repl<R: BufRead, W: Write>(mut input: R, mut output: W, board: Board, config: EngineConfig) {
    let mut engine = Engine::new(board, config);
    let mut computer_side: Option<crate::board::Color> = None;
    let mut autoplay = false;

    let _ = writeln!(output, "negamax_lab ready. Type 'help' for commands.");
    let mut line = String::new();
    loop {
        if autoplay || Some(engine.board().side) == computer_side {
            if engine.search().best_move.is_none() {
                let _ = writeln!(output, "(no legal moves)");
                computer_side = None;
                autoplay = false;
                continue;
            }
            make_and_report_move(&mut engine, &mut output);
            if engine.game_result().is_some() {
                computer_side = None;
                autoplay = false;
            }
            continue;
        }

        line.clear();
        let _ = write!(output, "> ");
        let _ = output.flush();
        if input.read_line(&mut line).unwrap_or(0) == 0 {
            break;
        }
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        let mut parts = trimmed.split_whitespace();
        let command = parts.next().unwrap_or("");
        let rest: Vec<&str> = parts.collect();

        match command {
            "bye" | "quit" | "exit" => break,
            "help" => print_help(&mut output),
            "new" => {
                engine.set_position(Board::new());
                computer_side = None;
            }
            "d" => print_board(&engine, &mut output),
            "on" => computer_side = Some(engine.board().side),
            "off" => computer_side = None,
            "auto" => autoplay = true,
            "sd" => {
                if let Some(depth) = rest.first().and_then(|s| s.parse().ok()) {
                    engine.config.max_depth = depth;
                    engine.config.max_time_ms = 1 << 25;
                }
            }
            "st" => {
                if let Some(secs) = rest.first().and_then(|s| s.parse::<i64>().ok()) {
                    engine.config.max_time_ms = secs * 1000;
                    engine.config.max_depth = 32;
                }
            }
            "t" => {
                if let Some(n) = rest.first().and_then(|s| s.parse::<usize>().ok()) {
                    let n = n.max(1);
                    engine.set_thread_count(n);
                    #[cfg(feature = "logging")]
                    log::info!("thread count set to {n}");
                    let _ = writeln!(output, "Set to use {n} threads.");
                }
            }
            "p" => set_parallel_function(&mut engine, rest.first().copied(), &mut output),
            "undo" => {
                engine.undo_move();
                computer_side = None;
            }
            "go" => {
                if engine.search().best_move.is_none() {
                    let _ = writeln!(output, "(no legal moves)");
                } else {
                    make_and_report_move(&mut engine, &mut output);
                }
            }
            "bench" => run_bench(&mut engine, &rest.join(" "), &mut output),
            "setboard" => match Board::from_fen(&rest.join(" ")) {
                Ok(board) => {
                    engine.set_position(board);
                    computer_side = None;
                }
                Err(_e) => {
                    #[cfg(feature = "logging")]
                    log::warn!("setboard FEN parse failure: {_e}");
                    let _ = writeln!(output, "invalid FEN");
                }
            },
            "xboard" => {
                run_xboard(engine, input, &mut output);
                return;
            }
            other => {
                let mut scratch = MoveArena::new();
                match parse_move(engine.board(), &mut scratch, other) {
                    Ok(mv) => {
                        let _ = engine.make_user_move(&mv.to_coord());
                        report_result_if_over(&engine, &mut output);
                    }
                    Err(_e) => {
                        #[cfg(feature = "logging")]
                        log::warn!("move parse failure for '{other}': {_e}");
                        let _ = writeln!(output, "Illegal move.");
                    }
                }
            }
        }
    }
}

/// Hands the REPL's engine over to the xboard/CECP adapter for the rest of
/// the session, mirroring how the original drops into `xboard()` and never
/// returns to the console prompt.
fn run_xboard<R: BufRead, W: Write>(engine: Engine, mut input: R, output: &mut W) {
    let mut handler = XboardHandler::new(engine);
    let mut line = String::new();
    loop {
        line.clear();
        if input.read_line(&mut line).unwrap_or(0) == 0 {
            break;
        }
        if matches!(handler.handle_line(&line, output), XboardOutcome::Quit) {
            break;
        }
    }
}

fn make_and_report_move<W: Write>(engine: &mut Engine, output: &mut W) {
    let result = engine.search();
    let _ = engine.make_user_move(&result.best_move.to_coord());
    let _ = writeln!(
        output,
        "Computer's move: {} (depth {}, {} nodes, score {})",
        result.best_move.to_coord(),
        result.depth_reached,
        result.nodes,
        result.score
    );
    report_result_if_over(engine, output);
}

fn report_result_if_over<W: Write>(engine: &Engine, output: &mut W) {
    if let Some(result) = engine.game_result() {
        let _ = writeln!(output, "{}", result.message());
    }
}

fn set_parallel_function<W: Write>(engine: &mut Engine, choice: Option<&str>, output: &mut W) {
    engine.config.eval = EvalKind::Serial;
    engine.config.quiesce = QuiesceMode::Serial;
    engine.config.strategy = Strategy::Serial;
    let message = match choice {
        Some("e") => {
            engine.config.eval = EvalKind::Parallel;
            "Using parallel static evaluation."
        }
        Some("q") => {
            engine.config.quiesce = QuiesceMode::Parallel;
            "Using parallel quiescence search."
        }
        Some("r") => {
            engine.config.strategy = Strategy::RootSplit;
            "Using parallel root-splitting alpha-beta search."
        }
        Some("v") => {
            engine.config.strategy = Strategy::PvSplit;
            "Using parallel PV-splitting alpha-beta search."
        }
        _ => "Reset to serial functions.",
    };
    #[cfg(feature = "logging")]
    log::info!("{message}");
    let _ = writeln!(output, "{message}");
}

fn print_board<W: Write>(engine: &Engine, output: &mut W) {
    let board = engine.board();
    for rank in 0..8 {
        let mut row = String::new();
        for file in 0..8 {
            let sq = rank * 8 + file;
            let c = board.piece[sq].to_char();
            let displayed = if board.color[sq] == crate::board::Color::Light {
                c.to_ascii_uppercase()
            } else {
                c
            };
            row.push(displayed);
            row.push(' ');
        }
        let _ = writeln!(output, "{row}");
    }
    let _ = writeln!(output, "{}", board.to_fen());
}

fn print_help<W: Write>(output: &mut W) {
    let _ = writeln!(output, "on - computer plays for the side to move");
    let _ = writeln!(output, "off - computer stops playing");
    let _ = writeln!(output, "auto - computer plays automatically, until game ends");
    let _ = writeln!(output, "st n - set search time to n seconds per move");
    let _ = writeln!(output, "sd n - set search depth to n ply per move");
    let _ = writeln!(output, "undo - takes back a move");
    let _ = writeln!(output, "new - starts a new game");
    let _ = writeln!(output, "d - display the board");
    let _ = writeln!(output, "bench [fen] - benchmark built-in, or fen, position");
    let _ = writeln!(output, "p [e|q|r|v] - set parallel function (rest use serial)");
    let _ = writeln!(output, "    e = parallel static evaluation");
    let _ = writeln!(output, "    q = parallel quiescence search");
    let _ = writeln!(output, "    r = parallel (root-splitting) alpha-beta search");
    let _ = writeln!(output, "    v = parallel (PV-splitting) alpha-beta search");
    let _ = writeln!(output, "t n - set number of threads to n");
    let _ = writeln!(output, "bye - exit the program");
    let _ = writeln!(output, "xboard - switch to XBoard mode");
    let _ = writeln!(output, "Enter moves in coordinate notation, e.g., e2e4, e7e8q");
}

/// Fixed-position timing run: searches `fen` (or the built-in benchmark
/// position, on a blank argument or a parse failure) `BENCH_ITERATIONS`
/// times and reports the fastest iteration's nodes-per-second. Each
/// iteration re-seeds the same starting position, so `best_time`/`best_nodes`
/// are tracked explicitly rather than read from a loop index past the end
/// of the run, the way the original benchmark's uninitialized read did.
fn run_bench<W: Write>(engine: &mut Engine, fen: &str, output: &mut W) {
    let board = if fen.is_empty() {
        Board::from_fen(BENCH_FEN).expect("bench position is a constant, known-valid FEN")
    } else {
        match Board::from_fen(fen) {
            Ok(board) => board,
            Err(e) => {
                #[cfg(feature = "logging")]
                log::warn!("bench FEN parse failure: {e}");
                let _ = writeln!(output, "invalid FEN ({e}), reverting to the built-in benchmark position");
                Board::from_fen(BENCH_FEN).expect("bench position is a constant, known-valid FEN")
            }
        }
    };

    let mut best_time_ms: i64 = i64::MAX;
    let mut best_nodes: u64 = 0;
    for i in 0..BENCH_ITERATIONS {
        engine.set_position(board.clone());
        let start = std::time::Instant::now();
        let result = engine.search();
        let elapsed_ms = start.elapsed().as_millis() as i64;
        let _ = writeln!(
            output,
            "iteration {}: depth {} time {} ms nodes {} score {}",
            i + 1,
            result.depth_reached,
            elapsed_ms,
            result.nodes,
            result.score
        );
        if elapsed_ms < best_time_ms {
            best_time_ms = elapsed_ms;
            best_nodes = result.nodes;
        }
    }

    if best_time_ms > 0 {
        let nps = (best_nodes as f64 / best_time_ms as f64) * 1000.0;
        let _ = writeln!(output, "best time: {best_time_ms} ms, {best_nodes} nodes, {nps:.0} nodes/sec");
    } else {
        let _ = writeln!(output, "best time: {best_time_ms} ms, {best_nodes} nodes (too fast to measure)");
    }
}
