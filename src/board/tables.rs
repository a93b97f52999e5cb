//! Static mailbox and move-offset tables shared by move generation and the
//! attack test. The 10x12 mailbox pads the 8x8 board with a border of
//! off-board sentinels so that sliding/leaping offsets can walk off the edge
//! without special-casing each direction.

use super::types::{Color, Piece};

/// Maps a mailbox-120 index to a 0..64 board index, or -1 if it's a border
/// square.
#[rustfmt::skip]
pub const MAILBOX: [i8; 120] = [
    -1, -1, -1, -1, -1, -1, -1, -1, -1, -1,
    -1, -1, -1, -1, -1, -1, -1, -1, -1, -1,
    -1,  0,  1,  2,  3,  4,  5,  6,  7, -1,
    -1,  8,  9, 10, 11, 12, 13, 14, 15, -1,
    -1, 16, 17, 18, 19, 20, 21, 22, 23, -1,
    -1, 24, 25, 26, 27, 28, 29, 30, 31, -1,
    -1, 32, 33, 34, 35, 36, 37, 38, 39, -1,
    -1, 40, 41, 42, 43, 44, 45, 46, 47, -1,
    -1, 48, 49, 50, 51, 52, 53, 54, 55, -1,
    -1, 56, 57, 58, 59, 60, 61, 62, 63, -1,
    -1, -1, -1, -1, -1, -1, -1, -1, -1, -1,
    -1, -1, -1, -1, -1, -1, -1, -1, -1, -1,
];

/// Maps a 0..64 board index to its mailbox-120 index.
#[rustfmt::skip]
pub const MAILBOX64: [i8; 64] = [
    21, 22, 23, 24, 25, 26, 27, 28,
    31, 32, 33, 34, 35, 36, 37, 38,
    41, 42, 43, 44, 45, 46, 47, 48,
    51, 52, 53, 54, 55, 56, 57, 58,
    61, 62, 63, 64, 65, 66, 67, 68,
    71, 72, 73, 74, 75, 76, 77, 78,
    81, 82, 83, 84, 85, 86, 87, 88,
    91, 92, 93, 94, 95, 96, 97, 98,
];

/// Whether each piece type slides (bishop/rook/queen) or leaps a fixed offset
/// (knight/king), indexed by `Piece::index()` for Knight..King.
pub const SLIDE: [bool; 6] = [false, false, true, true, true, false];

/// Number of move directions for each piece, indexed by `Piece::index()`.
pub const NUM_OFFSETS: [usize; 6] = [0, 8, 4, 4, 8, 8];

/// Mailbox-120 direction offsets for each piece type. Pawns are handled
/// separately (captures/pushes depend on color).
#[rustfmt::skip]
pub const OFFSET: [[i8; 8]; 6] = [
    [0, 0, 0, 0, 0, 0, 0, 0],           // pawn (unused, handled specially)
    [-21, -19, -12, -8, 8, 12, 19, 21], // knight
    [-11, -9, 9, 11, 0, 0, 0, 0],       // bishop
    [-10, -1, 1, 10, 0, 0, 0, 0],       // rook
    [-11, -10, -9, -1, 1, 9, 10, 11],   // queen
    [-11, -10, -9, -1, 1, 9, 10, 11],   // king
];

/// Castling-rights bits cleared when a piece moves from or to a given square
/// (king and rook starting squares only; all other squares are 0).
#[rustfmt::skip]
pub const CASTLE_MASK: [u8; 64] = [
    7, 15, 15, 15, 3, 15, 15, 11,
    15, 15, 15, 15, 15, 15, 15, 15,
    15, 15, 15, 15, 15, 15, 15, 15,
    15, 15, 15, 15, 15, 15, 15, 15,
    15, 15, 15, 15, 15, 15, 15, 15,
    15, 15, 15, 15, 15, 15, 15, 15,
    15, 15, 15, 15, 15, 15, 15, 15,
    13, 15, 15, 15, 12, 15, 15, 14,
];

/// Starting position piece/color layout, indexed 0..64 (a8..h1).
#[rustfmt::skip]
pub const INIT_COLOR: [Color; 64] = {
    use Color::{Dark, Light};
    [
        Dark, Dark, Dark, Dark, Dark, Dark, Dark, Dark,
        Dark, Dark, Dark, Dark, Dark, Dark, Dark, Dark,
        Color::Empty, Color::Empty, Color::Empty, Color::Empty, Color::Empty, Color::Empty, Color::Empty, Color::Empty,
        Color::Empty, Color::Empty, Color::Empty, Color::Empty, Color::Empty, Color::Empty, Color::Empty, Color::Empty,
        Color::Empty, Color::Empty, Color::Empty, Color::Empty, Color::Empty, Color::Empty, Color::Empty, Color::Empty,
        Color::Empty, Color::Empty, Color::Empty, Color::Empty, Color::Empty, Color::Empty, Color::Empty, Color::Empty,
        Light, Light, Light, Light, Light, Light, Light, Light,
        Light, Light, Light, Light, Light, Light, Light, Light,
    ]
};

#[rustfmt::skip]
pub const INIT_PIECE: [Piece; 64] = {
    use Piece::{Bishop, King, Knight, Pawn, Queen, Rook};
    [
        Rook, Knight, Bishop, Queen, King, Bishop, Knight, Rook,
        Pawn, Pawn, Pawn, Pawn, Pawn, Pawn, Pawn, Pawn,
        Piece::Empty, Piece::Empty, Piece::Empty, Piece::Empty, Piece::Empty, Piece::Empty, Piece::Empty, Piece::Empty,
        Piece::Empty, Piece::Empty, Piece::Empty, Piece::Empty, Piece::Empty, Piece::Empty, Piece::Empty, Piece::Empty,
        Piece::Empty, Piece::Empty, Piece::Empty, Piece::Empty, Piece::Empty, Piece::Empty, Piece::Empty, Piece::Empty,
        Piece::Empty, Piece::Empty, Piece::Empty, Piece::Empty, Piece::Empty, Piece::Empty, Piece::Empty, Piece::Empty,
        Pawn, Pawn, Pawn, Pawn, Pawn, Pawn, Pawn, Pawn,
        Rook, Knight, Bishop, Queen, King, Bishop, Knight, Rook,
    ]
};

/// Square a piece "flips to" when evaluating from the dark side's
/// perspective (vertical mirror), used by the piece-square tables.
#[rustfmt::skip]
pub const FLIP: [usize; 64] = [
    56, 57, 58, 59, 60, 61, 62, 63,
    48, 49, 50, 51, 52, 53, 54, 55,
    40, 41, 42, 43, 44, 45, 46, 47,
    32, 33, 34, 35, 36, 37, 38, 39,
    24, 25, 26, 27, 28, 29, 30, 31,
    16, 17, 18, 19, 20, 21, 22, 23,
    8,  9, 10, 11, 12, 13, 14, 15,
     0,  1,  2,  3,  4,  5,  6,  7,
];
