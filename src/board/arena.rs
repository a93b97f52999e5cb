//! The move arena: a single flat buffer shared by every ply of one search,
//! indexed by a per-ply start/end marker rather than a fresh `Vec` per call.

use super::types::{GenMove, Move, GEN_STACK, MAX_PLY};

#[derive(Clone, Debug)]
pub struct MoveArena {
    moves: Vec<GenMove>,
    first_move: [usize; MAX_PLY + 1],
}

impl MoveArena {
    #[must_use]
    pub fn new() -> Self {
        let mut moves = Vec::with_capacity(GEN_STACK);
        moves.push(GenMove {
            mv: Move::NONE,
            score: 0,
        }); // first_move[0] starts at 0; keep capacity warm.
        moves.clear();
        MoveArena {
            moves,
            first_move: [0; MAX_PLY + 1],
        }
    }

    /// Opens a fresh, empty move list for `ply`, discarding anything
    /// generated there by a previous visit (the arena is reused across the
    /// whole iterative-deepening run).
    pub fn begin_ply(&mut self, ply: usize) {
        self.first_move[ply + 1] = self.first_move[ply];
        self.moves.truncate(self.first_move[ply]);
    }

    pub fn push(&mut self, ply: usize, gm: GenMove) {
        self.moves.push(gm);
        self.first_move[ply + 1] = self.moves.len();
    }

    #[must_use]
    pub fn slice(&self, ply: usize) -> &[GenMove] {
        &self.moves[self.first_move[ply]..self.first_move[ply + 1]]
    }

    pub fn slice_mut(&mut self, ply: usize) -> &mut [GenMove] {
        &mut self.moves[self.first_move[ply]..self.first_move[ply + 1]]
    }

    #[must_use]
    pub fn len(&self, ply: usize) -> usize {
        self.first_move[ply + 1] - self.first_move[ply]
    }

    #[must_use]
    pub fn is_empty(&self, ply: usize) -> bool {
        self.len(ply) == 0
    }
}

impl Default for MoveArena {
    fn default() -> Self {
        MoveArena::new()
    }
}
