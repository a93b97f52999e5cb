use clap::Parser;
use negamax_lab::config::{EngineConfig, EvalKind, QuiesceMode, Strategy};
use negamax_lab::{board::Board, engine::Engine, xboard::XboardHandler};
use std::io::{stdin, stdout, BufRead};

#[derive(Parser, Debug)]
#[command(name = "negamax_lab", about = "An iterative-deepening negamax chess engine")]
struct Cli {
    /// Starting position in FEN, defaults to the standard opening position.
    #[arg(long)]
    fen: Option<String>,

    /// Maximum search depth.
    #[arg(long, default_value_t = 32)]
    depth: i32,

    /// Per-move time budget in seconds.
    #[arg(long, default_value_t = 5)]
    time: u64,

    /// Worker thread count for parallel strategies.
    #[arg(long, default_value_t = 1)]
    threads: usize,

    /// Search strategy: serial, root-split, or pv-split.
    #[arg(long, default_value = "serial")]
    strategy: String,

    /// Evaluator: serial or parallel.
    #[arg(long, default_value = "serial")]
    eval: String,

    /// Quiescence mode: serial or parallel.
    #[arg(long, default_value = "serial")]
    quiesce: String,

    /// Speak the xboard/CECP protocol on stdin/stdout instead of the REPL.
    #[arg(long)]
    xboard: bool,
}

fn parse_strategy(s: &str) -> Strategy {
    match s {
        "root-split" | "prs" => Strategy::RootSplit,
        "pv-split" | "pvs" => Strategy::PvSplit,
        _ => Strategy::Serial,
    }
}

fn parse_eval(s: &str) -> EvalKind {
    match s {
        "parallel" => EvalKind::Parallel,
        _ => EvalKind::Serial,
    }
}

fn parse_quiesce(s: &str) -> QuiesceMode {
    match s {
        "parallel" => QuiesceMode::Parallel,
        _ => QuiesceMode::Serial,
    }
}

fn main() {
    #[cfg(feature = "logging")]
    env_logger::init();

    let cli = Cli::parse();
    let config = EngineConfig {
        max_depth: cli.depth,
        max_time_ms: (cli.time as i64) * 1000,
        thread_count: cli.threads,
        strategy: parse_strategy(&cli.strategy),
        eval: parse_eval(&cli.eval),
        quiesce: parse_quiesce(&cli.quiesce),
        ..EngineConfig::default()
    };

    let board = match &cli.fen {
        Some(fen) => Board::from_fen(fen).unwrap_or_else(|e| {
            #[cfg(feature = "logging")]
            log::warn!("invalid --fen: {e}");
            eprintln!("invalid --fen: {e}, falling back to the starting position");
            Board::new()
        }),
        None => Board::new(),
    };

    if cli.xboard {
        let engine = Engine::new(board, config);
        let mut handler = XboardHandler::new(engine);
        let stdin = stdin();
        let mut stdout = stdout();
        for line in stdin.lock().lines() {
            let Ok(line) = line else { break };
            if matches!(
                handler.handle_line(&line, &mut stdout),
                negamax_lab::xboard::XboardOutcome::Quit
            ) {
                break;
            }
        }
    } else {
        negamax_lab::cli::run_repl(stdin().lock(), stdout(), board, config);
    }
}
