//! Static position evaluation. `eval` is the reference serial implementation;
//! `peval` is a parallel reduction over the same per-square/pawn/king terms
//! and is required to return bit-identical scores to `eval` for every
//! position, since integer addition stays associative regardless of which
//! worker computes which partial sum.

use crate::board::Board;
use crate::board::{Color, Piece};
use crate::threadpool::ThreadPool;
use std::sync::atomic::{AtomicI32, Ordering};

pub const PIECE_VALUE: [i32; 6] = [100, 300, 325, 500, 900, 0];

#[rustfmt::skip]
const PAWN_PCSQ: [i32; 64] = [
     0,  0,  0,  0,  0,  0,  0,  0,
     5, 10, 15, 20, 20, 15, 10,  5,
     4,  8, 12, 16, 16, 12,  8,  4,
     3,  6,  9, 12, 12,  9,  6,  3,
     2,  4,  6,  8,  8,  6,  4,  2,
     1,  2,  3,  4,  4,  3,  2,  1,
     0,  0,  0,  0,  0,  0,  0,  0,
     0,  0,  0,  0,  0,  0,  0,  0,
];

#[rustfmt::skip]
const KNIGHT_PCSQ: [i32; 64] = [
    -10, -10, -10, -10, -10, -10, -10, -10,
    -10,   0,   0,   0,   0,   0,   0, -10,
    -10,   0,   5,   5,   5,   5,   0, -10,
    -10,   0,   5,  10,  10,   5,   0, -10,
    -10,   0,   5,  10,  10,   5,   0, -10,
    -10,   0,   5,   5,   5,   5,   0, -10,
    -10,   0,   0,   0,   0,   0,   0, -10,
    -10, -30, -10, -10, -10, -10, -30, -10,
];

#[rustfmt::skip]
const BISHOP_PCSQ: [i32; 64] = [
    -10, -10, -10, -10, -10, -10, -10, -10,
    -10,   0,   0,   0,   0,   0,   0, -10,
    -10,   0,   5,   5,   5,   5,   0, -10,
    -10,   0,   5,  10,  10,   5,   0, -10,
    -10,   0,   5,  10,  10,   5,   0, -10,
    -10,   0,   5,   5,   5,   5,   0, -10,
    -10,   0,   0,   0,   0,   0,   0, -10,
    -10, -10, -20, -10, -10, -20, -10, -10,
];

#[rustfmt::skip]
const KING_PCSQ: [i32; 64] = [
    -40, -40, -40, -40, -40, -40, -40, -40,
    -40, -40, -40, -40, -40, -40, -40, -40,
    -40, -40, -40, -40, -40, -40, -40, -40,
    -40, -40, -40, -40, -40, -40, -40, -40,
    -40, -40, -40, -40, -40, -40, -40, -40,
    -40, -40, -40, -40, -40, -40, -40, -40,
    -20, -20, -20, -20, -20, -20, -20, -20,
      0,  20,  40, -20,   0, -20,  40,  20,
];

#[rustfmt::skip]
const KING_ENDGAME_PCSQ: [i32; 64] = [
     0, 10, 20, 30, 30, 20, 10,  0,
    10, 20, 30, 40, 40, 30, 20, 10,
    20, 30, 40, 50, 50, 40, 30, 20,
    30, 40, 50, 60, 60, 50, 40, 30,
    30, 40, 50, 60, 60, 50, 40, 30,
    20, 30, 40, 50, 50, 40, 30, 20,
    10, 20, 30, 40, 40, 30, 20, 10,
     0, 10, 20, 30, 30, 20, 10,  0,
];

#[rustfmt::skip]
const FLIP: [usize; 64] = [
    56, 57, 58, 59, 60, 61, 62, 63,
    48, 49, 50, 51, 52, 53, 54, 55,
    40, 41, 42, 43, 44, 45, 46, 47,
    32, 33, 34, 35, 36, 37, 38, 39,
    24, 25, 26, 27, 28, 29, 30, 31,
    16, 17, 18, 19, 20, 21, 22, 23,
     8,  9, 10, 11, 12, 13, 14, 15,
     0,  1,  2,  3,  4,  5,  6,  7,
];

/// Tables computed once per position in a serial setup pass, then read
/// (never written) by the parallel per-square reduction.
struct EvalTables {
    /// `pawn_rank[color][file + 1]`, columns 0 and 9 are sentinels (no pawn).
    pawn_rank: [[i8; 10]; 2],
    piece_mat: [i32; 2],
    pawn_mat: [i32; 2],
}

fn setup_eval_tables(board: &Board) -> EvalTables {
    let mut pawn_rank = [[0i8; 10]; 2];
    // Light pawns look for the most-advanced (lowest row) pawn per file;
    // dark pawns look for the highest row. Initialize to the "no pawn"
    // sentinel for each side's search direction.
    for file in 0..10 {
        pawn_rank[Color::Light.index()][file] = 7;
        pawn_rank[Color::Dark.index()][file] = 0;
    }
    let mut piece_mat = [0i32; 2];
    let mut pawn_mat = [0i32; 2];

    for sq in 0..64 {
        let color = board.color[sq];
        if color == Color::Empty {
            continue;
        }
        let piece = board.piece[sq];
        let c = color.index();
        if piece == Piece::Pawn {
            pawn_mat[c] += PIECE_VALUE[Piece::Pawn.index()];
            let file = (sq % 8) + 1;
            let row = (sq / 8) as i8;
            if color == Color::Light {
                if row < pawn_rank[c][file] {
                    pawn_rank[c][file] = row;
                }
            } else if row > pawn_rank[c][file] {
                pawn_rank[c][file] = row;
            }
        } else {
            piece_mat[c] += PIECE_VALUE[piece.index()];
        }
    }
    EvalTables {
        pawn_rank,
        piece_mat,
        pawn_mat,
    }
}

/// The material + piece-square + pawn-structure contribution of the piece on
/// `sq`, from its own color's point of view. Independent of any other
/// square's contribution, so safe to compute out of order.
fn eval_square_term(board: &Board, tables: &EvalTables, sq: usize) -> i32 {
    let color = board.color[sq];
    let piece = board.piece[sq];
    let pcsq_index = if color == Color::Light { sq } else { FLIP[sq] };

    let mut score = match piece {
        Piece::Pawn => PIECE_VALUE[Piece::Pawn.index()] + PAWN_PCSQ[pcsq_index],
        Piece::Knight => PIECE_VALUE[Piece::Knight.index()] + KNIGHT_PCSQ[pcsq_index],
        Piece::Bishop => PIECE_VALUE[Piece::Bishop.index()] + BISHOP_PCSQ[pcsq_index],
        Piece::Rook => PIECE_VALUE[Piece::Rook.index()] + rook_file_term(board, tables, sq, color),
        Piece::Queen => PIECE_VALUE[Piece::Queen.index()],
        Piece::King => {
            if tables.piece_mat[color.opposite().index()] <= ENDGAME_MATERIAL {
                KING_ENDGAME_PCSQ[pcsq_index]
            } else {
                KING_PCSQ[pcsq_index] + king_safety_term(board, tables, color)
            }
        }
        Piece::Empty => 0,
    };

    if piece == Piece::Pawn {
        score += pawn_structure_term(board, tables, sq, color);
    }
    score
}

/// A king's own side is in the endgame once the *opponent's* non-pawn
/// material drops to this threshold or below.
const ENDGAME_MATERIAL: i32 = 1200;

const OPEN_FILE_BONUS: i32 = 10;
const SEMI_OPEN_FILE_BONUS: i32 = 5;
const ROOK_SEVENTH_RANK_BONUS: i32 = 20;

/// Open/semi-open file and seventh-rank bonuses for a rook on `sq`.
fn rook_file_term(_board: &Board, tables: &EvalTables, sq: usize, color: Color) -> i32 {
    let file = (sq % 8) + 1;
    let c = color.index();
    let xc = color.opposite().index();
    let mut score = 0;

    let own_pawn_on_file = tables.pawn_rank[c][file] != sentinel(color);
    let enemy_pawn_on_file = tables.pawn_rank[xc][file] != sentinel(color.opposite());
    if !own_pawn_on_file {
        score += if enemy_pawn_on_file {
            SEMI_OPEN_FILE_BONUS
        } else {
            OPEN_FILE_BONUS
        };
    }

    let row = (sq / 8) as i8;
    let seventh_rank = match color {
        Color::Light => row == 1,
        _ => row == 6,
    };
    if seventh_rank {
        score += ROOK_SEVENTH_RANK_BONUS;
    }

    score
}

/// Doubled/isolated/backward/passed-pawn adjustments for the pawn on `sq`.
fn pawn_structure_term(_board: &Board, tables: &EvalTables, sq: usize, color: Color) -> i32 {
    let file = (sq % 8) + 1;
    let c = color.index();
    let xc = color.opposite().index();
    let mut score = 0;

    let row = (sq / 8) as i8;
    if tables.pawn_rank[c][file] != row {
        score -= 10;
    }

    let isolated = tables.pawn_rank[c][file - 1] == sentinel(color) && tables.pawn_rank[c][file + 1] == sentinel(color);
    if isolated {
        score -= 20;
    } else if is_backward(tables, color, file, row) {
        score -= 8;
    }

    if is_passed(tables, xc, file, color) {
        let advance = match color {
            Color::Light => 7 - row,
            _ => row,
        };
        score += (advance as i32) * 4;
    }

    score
}

/// A pawn is backward when neither neighboring file has a same-color pawn
/// level with or behind it to protect its advance square.
fn is_backward(tables: &EvalTables, color: Color, file: usize, row: i8) -> bool {
    let c = color.index();
    let sentinel_row = sentinel(color);
    let neighbor_is_ahead = |neighbor_row: i8| -> bool {
        if neighbor_row == sentinel_row {
            true
        } else {
            match color {
                Color::Light => neighbor_row < row,
                _ => neighbor_row > row,
            }
        }
    };
    neighbor_is_ahead(tables.pawn_rank[c][file - 1]) && neighbor_is_ahead(tables.pawn_rank[c][file + 1])
}

fn sentinel(color: Color) -> i8 {
    match color {
        Color::Light => 7,
        _ => 0,
    }
}

fn is_passed(tables: &EvalTables, xc: usize, file: usize, color: Color) -> bool {
    let enemy_sentinel = sentinel(color.opposite());
    tables.pawn_rank[xc][file - 1] == enemy_sentinel
        && tables.pawn_rank[xc][file] == enemy_sentinel
        && tables.pawn_rank[xc][file + 1] == enemy_sentinel
}

/// King safety: penalizes a weakened pawn shield in front of the king, scaled
/// down as the opponent's material drops (an exposed king matters less once
/// there's nothing left to attack with).
fn king_safety_term(board: &Board, tables: &EvalTables, color: Color) -> i32 {
    let king_sq = (0..64).find(|&s| board.color[s] == color && board.piece[s] == Piece::King);
    let Some(king_sq) = king_sq else { return 0 };
    let file = (king_sq % 8) + 1;
    let c = color.index();
    let opponent_mat = tables.piece_mat[color.opposite().index()];

    let mut shield_penalty = 0;
    for f in (file.saturating_sub(1))..=(file + 1).min(9) {
        if tables.pawn_rank[c][f] == sentinel(color) {
            shield_penalty += 10;
        }
    }
    -(shield_penalty * opponent_mat / 3100)
}

/// Serial static evaluator, returning a score relative to the side to move
/// (positive means the side to move stands better), consistent with negamax.
#[must_use]
pub fn eval(board: &Board) -> i32 {
    let tables = setup_eval_tables(board);
    let mut score = [0i32; 2];
    for sq in 0..64 {
        if board.color[sq] == Color::Empty {
            continue;
        }
        score[board.color[sq].index()] += eval_square_term(board, &tables, sq);
    }

    let total = score[Color::Light.index()] - score[Color::Dark.index()];
    if board.side == Color::Light {
        total
    } else {
        -total
    }
}

/// Parallel evaluator. Splits the per-square reduction across the pool's
/// workers; the serial setup pass (pawn ranks, material totals) still runs
/// up front since every worker's term depends on it. Returns the exact same
/// value as `eval` for the same position.
#[must_use]
pub fn peval(board: &Board, pool: &ThreadPool) -> i32 {
    let tables = setup_eval_tables(board);
    let light = AtomicI32::new(0);
    let dark = AtomicI32::new(0);

    pool.parallel_for_dynamic(
        64,
        || (),
        |(), sq| {
            let color = board.color[sq];
            if color == Color::Empty {
                return;
            }
            let term = eval_square_term(board, &tables, sq);
            match color.index() {
                0 => {
                    light.fetch_add(term, Ordering::Relaxed);
                }
                1 => {
                    dark.fetch_add(term, Ordering::Relaxed);
                }
                _ => {}
            }
        },
    );

    let light_total = light.load(Ordering::Relaxed);
    let dark_total = dark.load(Ordering::Relaxed);

    let total = light_total - dark_total;
    if board.side == Color::Light {
        total
    } else {
        -total
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Board;

    #[test]
    fn startpos_is_balanced() {
        let board = Board::new();
        assert_eq!(eval(&board), 0);
    }

    #[test]
    fn eval_and_peval_agree() {
        let pool = ThreadPool::new(4);
        let positions = [
            "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1",
            "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1",
            "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1",
        ];
        for fen in positions {
            let board = Board::from_fen(fen).unwrap();
            assert_eq!(eval(&board), peval(&board, &pool));
        }
    }

    #[test]
    fn missing_queen_is_a_material_disadvantage() {
        let full = Board::from_fen("rnb1kbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1").unwrap();
        let with_queen = Board::from_fen("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1").unwrap();
        assert!(eval(&with_queen) > eval(&full));
    }
}
