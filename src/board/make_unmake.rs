//! Move application and exact reversal. `make_move` returns `false` (and
//! leaves the board unchanged for the caller to restore via `unmake_move`
//! anyway) when the mover's own king would be left in check — the standard
//! "make, test, unmake if illegal" pattern used by the move loop instead of a
//! separate legality filter in move generation.

use super::state::Board;
use super::tables::CASTLE_MASK;
use super::types::{move_bits, Color, Piece, Square, UnmakeEntry};
use crate::zobrist::ZOBRIST;

impl Board {
    /// Applies `mv`, pushing the information needed to undo it onto
    /// `unmake_stack`. Returns `false` if the move leaves the mover's own king
    /// in check, in which case the caller must still call `unmake_move`.
    pub fn make_move(&mut self, mv: crate::board::types::Move, unmake_stack: &mut Vec<UnmakeEntry>) -> bool {
        let from = mv.from();
        let to = mv.to();
        let mover = self.side;
        let moving_piece = self.piece_at(from);

        let mut captured = self.piece_at(to);
        if mv.is_en_passant() {
            let cap_sq = match mover {
                Color::Light => Square(to.0 + 8),
                _ => Square(to.0 - 8),
            };
            captured = self.piece_at(cap_sq);
        }

        unmake_stack.push(UnmakeEntry {
            mv,
            castle: self.castle,
            ep: self.ep,
            fifty: self.fifty,
            hash: self.hash,
            captured,
        });

        // Clear old en-passant key before recomputing it.
        if self.ep.is_valid() {
            self.hash ^= ZOBRIST.ep_keys[self.ep.as_usize()];
        }
        self.hash ^= ZOBRIST.castle_keys[self.castle as usize];

        if mv.is_en_passant() {
            let cap_sq = match mover {
                Color::Light => Square(to.0 + 8),
                _ => Square(to.0 - 8),
            };
            self.hash ^= ZOBRIST.piece(self.xside, Piece::Pawn, cap_sq);
            self.color[cap_sq.as_usize()] = Color::Empty;
            self.piece[cap_sq.as_usize()] = Piece::Empty;
        } else if mv.is_capture() {
            self.hash ^= ZOBRIST.piece(self.xside, captured, to);
        }

        self.hash ^= ZOBRIST.piece(mover, moving_piece, from);
        self.color[from.as_usize()] = Color::Empty;
        self.piece[from.as_usize()] = Piece::Empty;

        let placed_piece = mv.promote().unwrap_or(moving_piece);
        self.hash ^= ZOBRIST.piece(mover, placed_piece, to);
        self.color[to.as_usize()] = mover;
        self.piece[to.as_usize()] = placed_piece;

        if mv.is_castle() {
            let (rook_from, rook_to) = castle_rook_squares(mover, to);
            self.hash ^= ZOBRIST.piece(mover, Piece::Rook, rook_from);
            self.color[rook_from.as_usize()] = Color::Empty;
            self.piece[rook_from.as_usize()] = Piece::Empty;
            self.hash ^= ZOBRIST.piece(mover, Piece::Rook, rook_to);
            self.color[rook_to.as_usize()] = mover;
            self.piece[rook_to.as_usize()] = Piece::Rook;
        }

        self.castle &= CASTLE_MASK[from.as_usize()] & CASTLE_MASK[to.as_usize()];
        self.hash ^= ZOBRIST.castle_keys[self.castle as usize];

        self.ep = if mv.bits() & move_bits::PAWN_DOUBLE != 0 {
            let mid = Square((from.0 + to.0) / 2);
            self.hash ^= ZOBRIST.ep_keys[mid.as_usize()];
            mid
        } else {
            Square::NONE
        };

        self.fifty = if moving_piece == Piece::Pawn || mv.is_capture() {
            0
        } else {
            self.fifty + 1
        };

        self.hash ^= ZOBRIST.side_key;
        self.side = self.xside;
        self.xside = self.side.opposite();
        self.ply += 1;
        self.hply += 1;

        !self.in_check(mover)
    }

    /// Reverses the most recent `make_move`, restoring the board to the state
    /// recorded on `unmake_stack` exactly (not recomputed from scratch).
    pub fn unmake_move(&mut self, unmake_stack: &mut Vec<UnmakeEntry>) {
        let entry = unmake_stack.pop().expect("unmake called with empty history");
        let mv = entry.mv;
        let from = mv.from();
        let to = mv.to();

        self.ply -= 1;
        self.hply -= 1;
        self.xside = self.side;
        self.side = self.side.opposite();

        let mover = self.side;
        let moved_piece = if mv.is_promotion() { Piece::Pawn } else { self.piece_at(to) };

        self.color[from.as_usize()] = mover;
        self.piece[from.as_usize()] = moved_piece;
        self.color[to.as_usize()] = Color::Empty;
        self.piece[to.as_usize()] = Piece::Empty;

        if mv.is_en_passant() {
            let cap_sq = match mover {
                Color::Light => Square(to.0 + 8),
                _ => Square(to.0 - 8),
            };
            self.color[cap_sq.as_usize()] = self.xside;
            self.piece[cap_sq.as_usize()] = Piece::Pawn;
        } else if mv.is_capture() {
            self.color[to.as_usize()] = self.xside;
            self.piece[to.as_usize()] = entry.captured;
        }

        if mv.is_castle() {
            let (rook_from, rook_to) = castle_rook_squares(mover, to);
            self.color[rook_to.as_usize()] = Color::Empty;
            self.piece[rook_to.as_usize()] = Piece::Empty;
            self.color[rook_from.as_usize()] = mover;
            self.piece[rook_from.as_usize()] = Piece::Rook;
        }

        self.castle = entry.castle;
        self.ep = entry.ep;
        self.fifty = entry.fifty;
        self.hash = entry.hash;
    }
}

fn castle_rook_squares(mover: Color, king_to: Square) -> (Square, Square) {
    let rank_start = match mover {
        Color::Light => 56,
        _ => 0,
    };
    if king_to.col() == 6 {
        (Square((rank_start + 7) as i8), Square((rank_start + 5) as i8))
    } else {
        (Square(rank_start as i8), Square((rank_start + 3) as i8))
    }
}
