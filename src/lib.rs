//! An iterative-deepening negamax chess engine with selectable serial and
//! parallel search strategies over a bitboard-free mailbox board
//! representation.

pub mod board;
pub mod book;
pub mod cli;
pub mod clock;
pub mod config;
pub mod engine;
pub mod eval;
pub mod ordering;
pub mod search;
pub mod sync;
pub mod threadpool;
pub mod timer;
pub mod xboard;
pub mod zobrist;

pub use board::Board;
pub use config::{EngineConfig, EvalKind, QuiesceMode, Strategy};
pub use engine::{Engine, GameResult};
