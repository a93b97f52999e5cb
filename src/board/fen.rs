//! FEN (Forsyth-Edwards Notation) loading and formatting.

use super::error::FenError;
use super::state::Board;
use super::types::{CASTLE_DARK_KING, CASTLE_DARK_QUEEN, CASTLE_LIGHT_KING, CASTLE_LIGHT_QUEEN};
use super::types::{Color, Piece, Square};

impl Board {
    pub fn from_fen(fen: &str) -> Result<Board, FenError> {
        let parts: Vec<&str> = fen.split_whitespace().collect();
        if parts.len() < 4 {
            return Err(FenError::TooFewParts { found: parts.len() });
        }

        let mut color = [Color::Empty; 64];
        let mut piece = [Piece::Empty; 64];

        for (rank_idx, rank_str) in parts[0].split('/').enumerate() {
            if rank_idx >= 8 {
                return Err(FenError::InvalidRank {
                    rank: parts[0].to_string(),
                });
            }
            let mut file = 0usize;
            for c in rank_str.chars() {
                if let Some(skip) = c.to_digit(10) {
                    file += skip as usize;
                    if file > 8 {
                        return Err(FenError::TooManyFiles {
                            rank: rank_idx,
                            files: file,
                        });
                    }
                } else {
                    if file >= 8 {
                        return Err(FenError::TooManyFiles {
                            rank: rank_idx,
                            files: file + 1,
                        });
                    }
                    let sq = rank_idx * 8 + file;
                    let side = if c.is_ascii_uppercase() { Color::Light } else { Color::Dark };
                    let p = Piece::from_char(c).ok_or(FenError::InvalidPiece { char: c })?;
                    color[sq] = side;
                    piece[sq] = p;
                    file += 1;
                }
            }
            if file != 8 {
                return Err(FenError::TooFewFiles {
                    rank: rank_idx,
                    files: file,
                });
            }
        }

        let (side, xside) = match parts[1] {
            "w" => (Color::Light, Color::Dark),
            "b" => (Color::Dark, Color::Light),
            other => {
                return Err(FenError::InvalidSideToMove {
                    found: other.to_string(),
                })
            }
        };

        let mut castle = 0u8;
        if parts[2] != "-" {
            for c in parts[2].chars() {
                castle |= match c {
                    'K' => CASTLE_LIGHT_KING,
                    'Q' => CASTLE_LIGHT_QUEEN,
                    'k' => CASTLE_DARK_KING,
                    'q' => CASTLE_DARK_QUEEN,
                    other => return Err(FenError::InvalidCastling { char: other }),
                };
            }
        }

        let ep = if parts[3] == "-" {
            Square::NONE
        } else {
            Square::from_algebraic(parts[3]).ok_or(FenError::InvalidEnPassant {
                found: parts[3].to_string(),
            })?
        };

        let fifty = parts.get(4).and_then(|s| s.parse().ok()).unwrap_or(0);

        let mut board = Board {
            color,
            piece,
            side,
            xside,
            castle,
            ep,
            fifty,
            hash: 0,
            ply: 0,
            hply: 0,
        };
        board.hash = board.compute_hash();
        Ok(board)
    }

    #[must_use]
    pub fn to_fen(&self) -> String {
        let mut ranks = Vec::with_capacity(8);
        for rank in 0..8 {
            let mut s = String::new();
            let mut empty_run = 0;
            for file in 0..8 {
                let sq = rank * 8 + file;
                if self.color[sq] == Color::Empty {
                    empty_run += 1;
                    continue;
                }
                if empty_run > 0 {
                    s.push_str(&empty_run.to_string());
                    empty_run = 0;
                }
                let c = self.piece[sq].to_char();
                s.push(if self.color[sq] == Color::Light {
                    c.to_ascii_uppercase()
                } else {
                    c
                });
            }
            if empty_run > 0 {
                s.push_str(&empty_run.to_string());
            }
            ranks.push(s);
        }

        let mut castle = String::new();
        if self.castle & CASTLE_LIGHT_KING != 0 {
            castle.push('K');
        }
        if self.castle & CASTLE_LIGHT_QUEEN != 0 {
            castle.push('Q');
        }
        if self.castle & CASTLE_DARK_KING != 0 {
            castle.push('k');
        }
        if self.castle & CASTLE_DARK_QUEEN != 0 {
            castle.push('q');
        }
        if castle.is_empty() {
            castle.push('-');
        }

        format!(
            "{} {} {} {} {} {}",
            ranks.join("/"),
            if self.side == Color::Light { "w" } else { "b" },
            castle,
            if self.ep.is_valid() { self.ep.to_algebraic() } else { "-".to_string() },
            self.fifty,
            self.hply / 2 + 1,
        )
    }
}
