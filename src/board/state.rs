//! The mailbox board representation and the attack test used by move
//! generation and check detection.

use super::tables::{CASTLE_MASK, INIT_COLOR, INIT_PIECE, MAILBOX, MAILBOX64, NUM_OFFSETS, OFFSET};
use super::types::{
    CASTLE_DARK_KING, CASTLE_DARK_QUEEN, CASTLE_LIGHT_KING, CASTLE_LIGHT_QUEEN, Color, Piece,
    Square,
};
use crate::zobrist::ZOBRIST;

/// The full position: piece placement, side to move, castling/en-passant
/// state, and the incremental hash. Deliberately bitboard-free: every query
/// (attack test, move generation) walks the 8x8 `color`/`piece` arrays via the
/// 10x12 mailbox, mirroring a direct-array board rather than precomputed
/// bitboard masks.
#[derive(Clone, Debug)]
pub struct Board {
    pub color: [Color; 64],
    pub piece: [Piece; 64],
    pub side: Color,
    pub xside: Color,
    pub castle: u8,
    pub ep: Square,
    pub fifty: u32,
    pub hash: u32,
    pub ply: usize,
    pub hply: usize,
}

impl Board {
    #[must_use]
    pub fn new() -> Self {
        let mut board = Board {
            color: INIT_COLOR,
            piece: INIT_PIECE,
            side: Color::Light,
            xside: Color::Dark,
            castle: CASTLE_LIGHT_KING | CASTLE_LIGHT_QUEEN | CASTLE_DARK_KING | CASTLE_DARK_QUEEN,
            ep: Square::NONE,
            fifty: 0,
            hash: 0,
            ply: 0,
            hply: 0,
        };
        board.hash = board.compute_hash();
        board
    }

    /// Recomputes the hash from scratch. Used by `Board::new`, FEN loading,
    /// and `debug_assert`-gated consistency checks after make/unmake.
    #[must_use]
    pub fn compute_hash(&self) -> u32 {
        let mut hash = 0u32;
        for sq in 0..64 {
            if self.color[sq] != Color::Empty {
                hash ^= ZOBRIST.piece(self.color[sq], self.piece[sq], Square(sq as i8));
            }
        }
        if self.side == Color::Dark {
            hash ^= ZOBRIST.side_key;
        }
        hash ^= ZOBRIST.castle_keys[self.castle as usize];
        if self.ep.is_valid() {
            hash ^= ZOBRIST.ep_keys[self.ep.as_usize()];
        }
        hash
    }

    #[inline]
    #[must_use]
    pub fn piece_at(&self, sq: Square) -> Piece {
        self.piece[sq.as_usize()]
    }

    #[inline]
    #[must_use]
    pub fn color_at(&self, sq: Square) -> Color {
        self.color[sq.as_usize()]
    }

    /// Whether `square` is attacked by `by_color`, walking each piece type's
    /// offsets from the target square outward (the usual reversed attack
    /// test: "could a piece of this type standing here capture something on
    /// `square`").
    #[must_use]
    pub fn attack(&self, square: Square, by_color: Color) -> bool {
        // Pawns: walking from `square` back along the reverse of a `by_color`
        // pawn's own capture offsets finds where such a pawn would have to
        // stand to capture onto `square` (a Light pawn captures towards
        // -11/-9, so a Light attacker of `square` stands at +11/+9 from it).
        let (pawn_dirs, pawn_piece_color) = match by_color {
            Color::Light => ([11i8, 9i8], Color::Light),
            Color::Dark => ([-9i8, -11i8], Color::Dark),
            Color::Empty => ([0, 0], Color::Empty),
        };
        let from_mailbox = MAILBOX64[square.as_usize()];
        for &d in &pawn_dirs {
            let m = from_mailbox + d;
            let idx = MAILBOX[m as usize];
            if idx != -1
                && self.color[idx as usize] == pawn_piece_color
                && self.piece[idx as usize] == Piece::Pawn
            {
                return true;
            }
        }

        for piece_idx in 1..6 {
            let piece = match piece_idx {
                1 => Piece::Knight,
                2 => Piece::Bishop,
                3 => Piece::Rook,
                4 => Piece::Queen,
                5 => Piece::King,
                _ => unreachable!(),
            };
            let sliding = matches!(piece, Piece::Bishop | Piece::Rook | Piece::Queen);
            for j in 0..NUM_OFFSETS[piece_idx] {
                let mut m = from_mailbox;
                loop {
                    m += OFFSET[piece_idx][j];
                    let idx = MAILBOX[m as usize];
                    if idx == -1 {
                        break;
                    }
                    if self.color[idx as usize] != Color::Empty {
                        if self.color[idx as usize] == by_color && self.piece[idx as usize] == piece
                        {
                            return true;
                        }
                        break;
                    }
                    if !sliding {
                        break;
                    }
                }
            }
        }
        false
    }

    #[inline]
    #[must_use]
    pub fn in_check(&self, side: Color) -> bool {
        let king_sq = (0..64)
            .find(|&s| self.color[s] == side && self.piece[s] == Piece::King)
            .map(|s| Square(s as i8))
            .expect("a king must be on the board for both colors");
        self.attack(king_sq, side.opposite())
    }

    pub fn castle_mask_at(square: Square) -> u8 {
        CASTLE_MASK[square.as_usize()]
    }
}

impl Default for Board {
    fn default() -> Self {
        Board::new()
    }
}
