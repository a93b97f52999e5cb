//! Coordinate move notation (`e2e4`, `e7e8q`), parsed against the set of
//! currently-legal moves rather than reconstructed independently, so that a
//! malformed or illegal string always produces a `MoveParseError` instead of a
//! move that doesn't actually apply to this position.

use super::arena::MoveArena;
use super::error::MoveParseError;
use super::movegen::gen;
use super::state::Board;
use super::types::{Piece, Square, UnmakeEntry};

/// Parses `text` as coordinate notation and resolves it to a legal move in
/// `board`. Generates moves at ply 0 of `arena`, which must not be in use by
/// an in-progress search.
pub fn parse_move(board: &Board, arena: &mut MoveArena, text: &str) -> Result<super::types::Move, MoveParseError> {
    let len = text.len();
    if len != 4 && len != 5 {
        return Err(MoveParseError::InvalidLength { len });
    }
    let from = Square::from_algebraic(&text[0..2]).ok_or(MoveParseError::InvalidSquare {
        notation: text.to_string(),
    })?;
    let to = Square::from_algebraic(&text[2..4]).ok_or(MoveParseError::InvalidSquare {
        notation: text.to_string(),
    })?;
    let promote = if len == 5 {
        let c = text.as_bytes()[4] as char;
        Some(Piece::from_char(c).ok_or(MoveParseError::InvalidPromotion { char: c })?)
    } else {
        None
    };

    gen(board, arena, 0);
    let mut scratch = board.clone();
    let mut stack: Vec<UnmakeEntry> = Vec::new();
    for gm in arena.slice(0) {
        let mv = gm.mv;
        if mv.from() == from && mv.to() == to && mv.promote() == promote {
            if scratch.make_move(mv, &mut stack) {
                scratch.unmake_move(&mut stack);
                return Ok(mv);
            }
            scratch.unmake_move(&mut stack);
        }
    }
    Err(MoveParseError::IllegalMove {
        notation: text.to_string(),
    })
}
