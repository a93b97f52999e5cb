//! Pseudo-legal move generation. `gen` produces every move (quiet and
//! capturing); `gen_caps` restricts itself to captures and promotions for the
//! quiescence search. Neither filters out moves that leave the mover's own
//! king in check — that's left to the search loop, which calls
//! `Board::in_check` immediately after `make_move` and undoes illegal tries.

use super::arena::MoveArena;
use super::state::Board;
use super::tables::{MAILBOX, MAILBOX64, NUM_OFFSETS, OFFSET, SLIDE};
use super::types::{move_bits, CASTLE_DARK_KING, CASTLE_DARK_QUEEN, CASTLE_LIGHT_KING, CASTLE_LIGHT_QUEEN};
use super::types::{Color, GenMove, Move, Piece, Square};

const PROMOTE_PIECES: [Piece; 4] = [Piece::Knight, Piece::Bishop, Piece::Rook, Piece::Queen];

struct PawnDirs {
    push: i8,
    start_row: i8,
    promote_row: i8,
    captures: [i8; 2],
}

fn pawn_dirs(color: Color) -> PawnDirs {
    match color {
        Color::Light => PawnDirs {
            push: -10,
            start_row: 6,
            promote_row: 0,
            captures: [-11, -9],
        },
        Color::Dark | Color::Empty => PawnDirs {
            push: 10,
            start_row: 1,
            promote_row: 7,
            captures: [9, 11],
        },
    }
}

/// Captures and promotions only, for `gen_caps`'s pawn case. Shares
/// `PawnDirs` with `push_pawn_moves` but skips quiet pushes entirely rather
/// than generating the full move list into a scratch buffer and filtering it.
fn push_pawn_captures(board: &Board, arena: &mut MoveArena, ply: usize, from: Square) {
    let dirs = pawn_dirs(board.side);
    let from_m = MAILBOX64[from.as_usize()];

    for &cap_dir in &dirs.captures {
        let cap_m = from_m + cap_dir;
        let cap_idx = MAILBOX[cap_m as usize];
        if cap_idx == -1 {
            continue;
        }
        let to = Square(cap_idx);
        if board.color[cap_idx as usize] == board.xside {
            if to.row() == dirs.promote_row {
                for &promo in &PROMOTE_PIECES {
                    arena.push(
                        ply,
                        GenMove {
                            mv: Move::new(
                                from,
                                to,
                                Some(promo),
                                move_bits::CAPTURE | move_bits::PROMOTION,
                            ),
                            score: 0,
                        },
                    );
                }
            } else {
                arena.push(
                    ply,
                    GenMove {
                        mv: Move::new(from, to, None, move_bits::CAPTURE),
                        score: 0,
                    },
                );
            }
        } else if board.ep == to {
            arena.push(
                ply,
                GenMove {
                    mv: Move::new(from, to, None, move_bits::EN_PASSANT | move_bits::CAPTURE),
                    score: 0,
                },
            );
        }
    }

    // A non-capturing push that reaches the promotion rank is still a
    // tactical move quiescence must consider.
    let one_m = from_m + dirs.push;
    let one_idx = MAILBOX[one_m as usize];
    if one_idx != -1 && board.color[one_idx as usize] == Color::Empty {
        let to = Square(one_idx);
        if to.row() == dirs.promote_row {
            for &promo in &PROMOTE_PIECES {
                arena.push(
                    ply,
                    GenMove {
                        mv: Move::new(from, to, Some(promo), move_bits::PROMOTION),
                        score: 0,
                    },
                );
            }
        }
    }
}

fn push_pawn_moves(board: &Board, arena: &mut MoveArena, ply: usize, from: Square) {
    let dirs = pawn_dirs(board.side);
    let from_m = MAILBOX64[from.as_usize()];

    let one_m = from_m + dirs.push;
    let one_idx = MAILBOX[one_m as usize];
    if one_idx != -1 && board.color[one_idx as usize] == Color::Empty {
        let to = Square(one_idx);
        if to.row() == dirs.promote_row {
            for &promo in &PROMOTE_PIECES {
                arena.push(
                    ply,
                    GenMove {
                        mv: Move::new(from, to, Some(promo), move_bits::PROMOTION),
                        score: 0,
                    },
                );
            }
        } else {
            arena.push(
                ply,
                GenMove {
                    mv: Move::new(from, to, None, move_bits::PAWN_PUSH),
                    score: 0,
                },
            );
            if from.row() == dirs.start_row {
                let two_m = one_m + dirs.push;
                let two_idx = MAILBOX[two_m as usize];
                if two_idx != -1 && board.color[two_idx as usize] == Color::Empty {
                    arena.push(
                        ply,
                        GenMove {
                            mv: Move::new(from, Square(two_idx), None, move_bits::PAWN_DOUBLE),
                            score: 0,
                        },
                    );
                }
            }
        }
    }

    for &cap_dir in &dirs.captures {
        let cap_m = from_m + cap_dir;
        let cap_idx = MAILBOX[cap_m as usize];
        if cap_idx == -1 {
            continue;
        }
        let to = Square(cap_idx);
        if board.color[cap_idx as usize] == board.xside {
            if to.row() == dirs.promote_row {
                for &promo in &PROMOTE_PIECES {
                    arena.push(
                        ply,
                        GenMove {
                            mv: Move::new(
                                from,
                                to,
                                Some(promo),
                                move_bits::CAPTURE | move_bits::PROMOTION,
                            ),
                            score: 0,
                        },
                    );
                }
            } else {
                arena.push(
                    ply,
                    GenMove {
                        mv: Move::new(from, to, None, move_bits::CAPTURE),
                        score: 0,
                    },
                );
            }
        } else if board.ep == to {
            arena.push(
                ply,
                GenMove {
                    mv: Move::new(from, to, None, move_bits::EN_PASSANT | move_bits::CAPTURE),
                    score: 0,
                },
            );
        }
    }
}

fn push_leaper_or_slider(
    board: &Board,
    arena: &mut MoveArena,
    ply: usize,
    from: Square,
    piece_idx: usize,
    captures_only: bool,
) {
    let from_m = MAILBOX64[from.as_usize()];
    let sliding = SLIDE[piece_idx];
    for j in 0..NUM_OFFSETS[piece_idx] {
        let mut m = from_m;
        loop {
            m += OFFSET[piece_idx][j];
            let idx = MAILBOX[m as usize];
            if idx == -1 {
                break;
            }
            let to = Square(idx);
            if board.color[idx as usize] == Color::Empty {
                if !captures_only {
                    arena.push(
                        ply,
                        GenMove {
                            mv: Move::new(from, to, None, 0),
                            score: 0,
                        },
                    );
                }
            } else {
                if board.color[idx as usize] == board.xside {
                    arena.push(
                        ply,
                        GenMove {
                            mv: Move::new(from, to, None, move_bits::CAPTURE),
                            score: 0,
                        },
                    );
                }
                break;
            }
            if !sliding {
                break;
            }
        }
    }
}

fn push_castle_moves(board: &Board, arena: &mut MoveArena, ply: usize) {
    let (king_sq, king_bit, queen_bit, rank_start): (usize, u8, u8, usize) = match board.side {
        Color::Light => (60, CASTLE_LIGHT_KING, CASTLE_LIGHT_QUEEN, 56),
        Color::Dark => (4, CASTLE_DARK_KING, CASTLE_DARK_QUEEN, 0),
        Color::Empty => return,
    };
    let enemy = board.xside;

    if board.castle & king_bit != 0
        && board.color[rank_start + 5] == Color::Empty
        && board.color[rank_start + 6] == Color::Empty
        && !board.attack(Square(king_sq as i8), enemy)
        && !board.attack(Square((rank_start + 5) as i8), enemy)
        && !board.attack(Square((rank_start + 6) as i8), enemy)
    {
        arena.push(
            ply,
            GenMove {
                mv: Move::new(
                    Square(king_sq as i8),
                    Square((rank_start + 6) as i8),
                    None,
                    move_bits::CASTLE,
                ),
                score: 0,
            },
        );
    }

    if board.castle & queen_bit != 0
        && board.color[rank_start + 1] == Color::Empty
        && board.color[rank_start + 2] == Color::Empty
        && board.color[rank_start + 3] == Color::Empty
        && !board.attack(Square(king_sq as i8), enemy)
        && !board.attack(Square((rank_start + 3) as i8), enemy)
        && !board.attack(Square((rank_start + 2) as i8), enemy)
    {
        arena.push(
            ply,
            GenMove {
                mv: Move::new(
                    Square(king_sq as i8),
                    Square((rank_start + 2) as i8),
                    None,
                    move_bits::CASTLE,
                ),
                score: 0,
            },
        );
    }
}

/// Generates every pseudo-legal move for `board.side` into `arena`'s slot for
/// `ply`, replacing whatever was there before.
pub fn gen(board: &Board, arena: &mut MoveArena, ply: usize) {
    arena.begin_ply(ply);
    for sq in 0..64 {
        if board.color[sq] != board.side {
            continue;
        }
        let from = Square(sq as i8);
        match board.piece[sq] {
            Piece::Pawn => push_pawn_moves(board, arena, ply, from),
            Piece::Knight => push_leaper_or_slider(board, arena, ply, from, Piece::Knight.index(), false),
            Piece::Bishop => push_leaper_or_slider(board, arena, ply, from, Piece::Bishop.index(), false),
            Piece::Rook => push_leaper_or_slider(board, arena, ply, from, Piece::Rook.index(), false),
            Piece::Queen => push_leaper_or_slider(board, arena, ply, from, Piece::Queen.index(), false),
            Piece::King => push_leaper_or_slider(board, arena, ply, from, Piece::King.index(), false),
            Piece::Empty => {}
        }
    }
    push_castle_moves(board, arena, ply);
}

/// Generates captures and promotions only, for the quiescence search.
pub fn gen_caps(board: &Board, arena: &mut MoveArena, ply: usize) {
    arena.begin_ply(ply);
    for sq in 0..64 {
        if board.color[sq] != board.side {
            continue;
        }
        let from = Square(sq as i8);
        match board.piece[sq] {
            Piece::Pawn => push_pawn_captures(board, arena, ply, from),
            Piece::Knight => push_leaper_or_slider(board, arena, ply, from, Piece::Knight.index(), true),
            Piece::Bishop => push_leaper_or_slider(board, arena, ply, from, Piece::Bishop.index(), true),
            Piece::Rook => push_leaper_or_slider(board, arena, ply, from, Piece::Rook.index(), true),
            Piece::Queen => push_leaper_or_slider(board, arena, ply, from, Piece::Queen.index(), true),
            Piece::King => push_leaper_or_slider(board, arena, ply, from, Piece::King.index(), true),
            Piece::Empty => {}
        }
    }
}
