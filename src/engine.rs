//! The top-level `Engine`: owns the position and every oracle (clock,
//! opening book, thread pool), and wires them into a call to the search
//! driver. A single owned struct rather than the mutable globals the
//! original search loop relies on.

use crate::board::{gen, parse_move, Board, Move, MoveArena, MoveParseError};
use crate::book::{NullBook, OpeningBook};
use crate::clock::{Clock, SystemClock};
use crate::config::EngineConfig;
use crate::ordering::HistoryHeuristic;
use crate::search::context::{SearchContext, SharedSearchState};
use crate::search::env::SearchEnv;
use crate::search::{think, SearchResult};
use crate::threadpool::ThreadPool;
use std::sync::Arc;

/// The outcome `game_result` reports for the position the engine currently
/// holds, mirroring the classic `print_result` check: is there a legal
/// move, and if not is the side to move in check; otherwise has the
/// position repeated three times or run into the fifty-move rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameResult {
    WhiteMates,
    BlackMates,
    Stalemate,
    RepetitionDraw,
    FiftyMoveDraw,
}

impl GameResult {
    #[must_use]
    pub fn message(self) -> &'static str {
        match self {
            GameResult::WhiteMates => "1-0 {White mates}",
            GameResult::BlackMates => "0-1 {Black mates}",
            GameResult::Stalemate => "1/2-1/2 {Stalemate}",
            GameResult::RepetitionDraw => "1/2-1/2 {Draw by repetition}",
            GameResult::FiftyMoveDraw => "1/2-1/2 {Draw by fifty move rule}",
        }
    }
}

pub struct Engine {
    pub config: EngineConfig,
    ctx: SearchContext,
    shared: SharedSearchState,
    pool: ThreadPool,
    clock: Box<dyn Clock>,
    book: Box<dyn OpeningBook>,
}

impl Engine {
    #[must_use]
    pub fn new(board: Board, config: EngineConfig) -> Self {
        let history = Arc::new(HistoryHeuristic::new());
        let pool = ThreadPool::new(config.thread_count);
        Engine {
            ctx: SearchContext::new(board),
            shared: SharedSearchState::new(history),
            pool,
            clock: Box::new(SystemClock),
            book: Box::new(NullBook),
            config,
        }
    }

    pub fn set_clock(&mut self, clock: Box<dyn Clock>) {
        self.clock = clock;
    }

    pub fn set_book(&mut self, book: Box<dyn OpeningBook>) {
        self.book = book;
    }

    pub fn set_thread_count(&mut self, n: usize) {
        self.config.thread_count = n;
        self.pool.set_thread_count(n);
    }

    #[must_use]
    pub fn board(&self) -> &Board {
        &self.ctx.board
    }

    pub fn set_position(&mut self, board: Board) {
        self.ctx = SearchContext::new(board);
    }

    /// Parses `text` in coordinate notation against the current position
    /// and, if legal, plays it.
    pub fn make_user_move(&mut self, text: &str) -> Result<Move, MoveParseError> {
        let mut scratch = MoveArena::new();
        let mv = parse_move(&self.ctx.board, &mut scratch, text)?;
        self.ctx.board.make_move(mv, &mut self.ctx.unmake_stack);
        Ok(mv)
    }

    pub fn undo_move(&mut self) {
        self.ctx.board.unmake_move(&mut self.ctx.unmake_stack);
    }

    /// Runs iterative deepening from the current position until the clock,
    /// node budget, or depth limit in `self.config` stops it.
    pub fn search(&mut self) -> SearchResult {
        self.search_with_progress(None)
    }

    /// Like `search`, but calls `on_iteration(depth, score, elapsed_ms, nodes, pv)`
    /// after every completed iterative-deepening depth — the hook the xboard
    /// adapter's `post` mode uses to print a thinking line per iteration.
    pub fn search_with_progress(&mut self, on_iteration: Option<&mut dyn FnMut(i32, i32, i64, u64, &[Move])>) -> SearchResult {
        let deadline_ms = self.clock.now_ms() + self.config.max_time_ms;
        let env = SearchEnv {
            pool: &self.pool,
            clock: self.clock.as_ref(),
            eval_kind: self.config.eval,
            quiesce_mode: self.config.quiesce,
        };
        think(&env, &self.shared, &mut self.ctx, &self.config, self.book.as_ref(), deadline_ms, on_iteration)
    }

    #[must_use]
    pub fn node_count(&self) -> u64 {
        self.shared.node_count()
    }

    pub fn stop(&self) {
        self.shared.stop_search.stop();
    }

    /// Checks the current position for a terminal or drawn result, the way
    /// a REPL reports the outcome of the move it just applied. Returns
    /// `None` while the game is still ongoing.
    #[must_use]
    pub fn game_result(&self) -> Option<GameResult> {
        let mut scratch_arena = MoveArena::new();
        let mut scratch_unmake = Vec::new();
        let mut board = self.ctx.board.clone();
        gen(&board, &mut scratch_arena, 0);

        let has_legal_move = (0..scratch_arena.len(0)).any(|i| {
            let mv = scratch_arena.slice(0)[i].mv;
            let legal = board.make_move(mv, &mut scratch_unmake);
            board.unmake_move(&mut scratch_unmake);
            legal
        });

        if !has_legal_move {
            return Some(if board.in_check(board.side) {
                match board.side {
                    crate::board::Color::Light => GameResult::BlackMates,
                    _ => GameResult::WhiteMates,
                }
            } else {
                GameResult::Stalemate
            });
        }
        if self.ctx.repetition_count() >= 3 {
            return Some(GameResult::RepetitionDraw);
        }
        if board.fifty >= 100 {
            return Some(GameResult::FiftyMoveDraw);
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Strategy;

    #[test]
    fn finds_mate_in_one() {
        // Scholar's mate: Qxf7 is defended by the bishop on c4, so the king
        // can't recapture and has no escape square.
        let board = Board::from_fen("r1bqkb1r/pppp1ppp/2n2n2/4p2Q/2B1P3/5N2/PPPP1PPP/RNB1K2R w KQkq - 6 4").unwrap();
        let mut engine = Engine::new(
            board,
            EngineConfig {
                max_depth: 3,
                max_time_ms: 2_000,
                use_book: false,
                ..EngineConfig::default()
            },
        );
        let result = engine.search();
        assert_eq!(result.best_move.to_coord(), "h5f7");
    }

    #[test]
    fn root_split_and_serial_agree_on_best_move() {
        let fen = "r1bqkbnr/pppp1ppp/2n5/4p3/2B1P3/5N2/PPPP1PPP/RNBQK2R w KQkq - 4 4";
        let make_engine = |strategy: Strategy| {
            Engine::new(
                Board::from_fen(fen).unwrap(),
                EngineConfig {
                    max_depth: 3,
                    max_time_ms: 3_000,
                    thread_count: 4,
                    strategy,
                    use_book: false,
                    ..EngineConfig::default()
                },
            )
        };
        let serial_result = make_engine(Strategy::Serial).search();
        let split_result = make_engine(Strategy::RootSplit).search();
        assert_eq!(serial_result.score, split_result.score);
    }
}
