//! Incremental Zobrist-style hashing. Keys are generated once from a fixed
//! seed so that hash values (and therefore perft/search traces) are
//! reproducible across runs.

use crate::board::types::{Color, Piece, Square};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::sync::LazyLock;

/// Fixed seed so hash collisions (and therefore test fixtures) are stable.
const HASH_SEED: u64 = 0x5A5A_5A5A_F00D_CAFE;

pub struct ZobristKeys {
    /// `piece[color][piece][square]`, Empty color/piece rows are unused.
    piece_keys: [[[u32; 64]; 7]; 2],
    pub side_key: u32,
    pub ep_keys: [u32; 64],
    pub castle_keys: [u32; 16],
}

impl ZobristKeys {
    fn new() -> Self {
        let mut rng = StdRng::seed_from_u64(HASH_SEED);
        let mut piece_keys = [[[0u32; 64]; 7]; 2];
        for color in &mut piece_keys {
            for piece in color.iter_mut() {
                for key in piece.iter_mut() {
                    *key = rng.gen();
                }
            }
        }
        let side_key = rng.gen();
        let mut ep_keys = [0u32; 64];
        for key in &mut ep_keys {
            *key = rng.gen();
        }
        let mut castle_keys = [0u32; 16];
        for key in &mut castle_keys {
            *key = rng.gen();
        }
        ZobristKeys {
            piece_keys,
            side_key,
            ep_keys,
            castle_keys,
        }
    }

    #[inline]
    #[must_use]
    pub fn piece(&self, color: Color, piece: Piece, square: Square) -> u32 {
        self.piece_keys[color.index().min(1)][piece.index()][square.as_usize()]
    }
}

pub static ZOBRIST: LazyLock<ZobristKeys> = LazyLock::new(ZobristKeys::new);
