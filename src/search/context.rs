//! Per-worker and shared search state, replacing the original's mutable
//! globals with two explicit value types: `SearchContext` (owned, cloned at
//! every fork point so each worker gets a private board/arena/PV) and
//! `SharedSearchState` (the handful of fields every worker must actually
//! share: the node counter, the stop/cutoff flags, and the history table).

use crate::board::types::{Move, UnmakeEntry, MAX_PLY};
use crate::board::{Board, MoveArena};
use crate::ordering::HistoryHeuristic;
use crate::sync::StopFlag;
use std::sync::atomic::{AtomicI64, AtomicU64, Ordering};
use std::sync::Arc;

/// The triangular PV table: `line(ply)` is this ply's portion of the
/// principal variation found so far.
#[derive(Clone, Debug)]
pub struct PvTable {
    lines: Vec<[Move; MAX_PLY]>,
    lengths: Vec<usize>,
}

impl PvTable {
    #[must_use]
    pub fn new() -> Self {
        PvTable {
            lines: vec![[Move::NONE; MAX_PLY]; MAX_PLY],
            lengths: vec![0; MAX_PLY],
        }
    }

    pub fn clear(&mut self) {
        for line in &mut self.lines {
            *line = [Move::NONE; MAX_PLY];
        }
        for length in &mut self.lengths {
            *length = 0;
        }
    }

    pub fn set_length(&mut self, ply: usize, len: usize) {
        self.lengths[ply] = len;
    }

    /// Records `mv` as the best move at `ply` and appends whatever PV was
    /// already found starting at `ply + 1`.
    pub fn splice(&mut self, ply: usize, mv: Move) {
        self.lines[ply][ply] = mv;
        let next_len = self.lengths[ply + 1];
        for j in (ply + 1)..next_len {
            self.lines[ply][j] = self.lines[ply + 1][j];
        }
        self.lengths[ply] = next_len.max(ply + 1);
    }

    /// Overwrites `line(ply)` directly with `moves` (used when a parallel
    /// fork point merges a continuation computed by a worker that has
    /// already been dropped, rather than splicing from a live child call).
    pub fn set_line(&mut self, ply: usize, moves: &[Move]) {
        for (i, &mv) in moves.iter().enumerate() {
            self.lines[ply][ply + i] = mv;
        }
        self.lengths[ply] = ply + moves.len();
    }

    #[must_use]
    pub fn line(&self, ply: usize) -> &[Move] {
        &self.lines[ply][ply..self.lengths[ply]]
    }

    #[must_use]
    pub fn best_move(&self) -> Move {
        if self.lengths[0] > 0 {
            self.lines[0][0]
        } else {
            Move::NONE
        }
    }

    #[must_use]
    pub fn full_line(&self) -> Vec<Move> {
        self.line(0).to_vec()
    }
}

impl Default for PvTable {
    fn default() -> Self {
        PvTable::new()
    }
}

/// Everything private to one worker's line of recursion: the board, the
/// shared-shape move arena, the exact-reversal history stack, the PV table,
/// and whether this path is still following the previous iteration's PV.
/// Cloned wholesale at every parallel fork point so forked workers never
/// alias each other's mutable state.
#[derive(Clone)]
pub struct SearchContext {
    pub board: Board,
    pub arena: MoveArena,
    pub unmake_stack: Vec<UnmakeEntry>,
    pub pv: PvTable,
    pub follow_pv: bool,
}

impl SearchContext {
    #[must_use]
    pub fn new(board: Board) -> Self {
        SearchContext {
            board,
            arena: MoveArena::new(),
            unmake_stack: Vec::with_capacity(MAX_PLY),
            pv: PvTable::new(),
            follow_pv: false,
        }
    }

    /// Looks up the move this context's own previous-iteration PV line
    /// suggests at `ply`, if `follow_pv` is still active and the line
    /// reaches that far.
    #[must_use]
    pub fn pv_move_at(&self, ply: usize) -> Move {
        if !self.follow_pv {
            return Move::NONE;
        }
        let line = self.pv.line(0);
        line.get(ply).copied().unwrap_or(Move::NONE)
    }

    /// Detects a draw by threefold repetition, scanning back only as far as
    /// the last irreversible move (`fifty`).
    #[must_use]
    pub fn is_repetition(&self) -> bool {
        self.repetition_count() >= 2
    }

    /// Counts occurrences of the current hash in the history since the last
    /// irreversible move, plus the current position itself. A value of 3
    /// means the current position has occurred on the board three times.
    #[must_use]
    pub fn repetition_count(&self) -> usize {
        if self.unmake_stack.len() < self.board.fifty as usize {
            return 1;
        }
        let start = self.unmake_stack.len() - self.board.fifty as usize;
        1 + self.unmake_stack[start..].iter().filter(|entry| entry.hash == self.board.hash).count()
    }
}

/// State shared by every worker in one search call: the node counter, the
/// stop-search and cutoff flags, the deadline, and the history heuristic.
/// Every field here is either atomic or internally synchronized so sharing
/// it across threads needs no external lock.
pub struct SharedSearchState {
    pub nodes: AtomicU64,
    pub stop_search: StopFlag,
    pub stop_time_ms: AtomicI64,
    pub history: Arc<HistoryHeuristic>,
}

impl SharedSearchState {
    #[must_use]
    pub fn new(history: Arc<HistoryHeuristic>) -> Self {
        SharedSearchState {
            nodes: AtomicU64::new(0),
            stop_search: StopFlag::new(),
            stop_time_ms: AtomicI64::new(i64::MAX),
            history,
        }
    }

    #[must_use]
    pub fn node_count(&self) -> u64 {
        self.nodes.load(Ordering::Relaxed)
    }

    pub fn reset_for_new_search(&self, stop_time_ms: i64) {
        self.nodes.store(0, Ordering::Relaxed);
        self.stop_search.reset();
        self.stop_time_ms.store(stop_time_ms, Ordering::Relaxed);
    }
}

/// A fork point's shared merge cell: guards the best score found so far and
/// the PV line that produced it, so concurrent workers can compare against
/// (and only occasionally update) a single shared "current best" instead of
/// each returning independently and merging afterward.
pub struct ForkMergeCell {
    inner: parking_lot::Mutex<ForkMergeState>,
}

struct ForkMergeState {
    alpha: i32,
    best_move: Move,
    best_line: Vec<Move>,
}

impl ForkMergeCell {
    #[must_use]
    pub fn new(alpha: i32) -> Self {
        ForkMergeCell {
            inner: parking_lot::Mutex::new(ForkMergeState {
                alpha,
                best_move: Move::NONE,
                best_line: Vec::new(),
            }),
        }
    }

    #[must_use]
    pub fn alpha(&self) -> i32 {
        self.inner.lock().alpha
    }

    /// Offers a candidate score/move/line from a worker. If it improves on
    /// the shared alpha, updates the cell and returns `true`.
    pub fn offer(&self, score: i32, mv: Move, line: &[Move]) -> bool {
        let mut state = self.inner.lock();
        if score > state.alpha {
            state.alpha = score;
            state.best_move = mv;
            state.best_line = line.to_vec();
            true
        } else {
            false
        }
    }

    #[must_use]
    pub fn into_result(self) -> (i32, Move, Vec<Move>) {
        let state = self.inner.into_inner();
        (state.alpha, state.best_move, state.best_line)
    }
}
