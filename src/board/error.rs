//! Error types for FEN parsing and move notation, surfaced at the adapter
//! boundary (CLI/xboard). The search kernel itself never produces these: a
//! position that reaches `Board` is assumed well-formed.

use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FenError {
    TooFewParts { found: usize },
    InvalidPiece { char: char },
    InvalidSideToMove { found: String },
    InvalidCastling { char: char },
    InvalidEnPassant { found: String },
    InvalidRank { rank: String },
    TooManyFiles { rank: usize, files: usize },
    TooFewFiles { rank: usize, files: usize },
}

impl fmt::Display for FenError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FenError::TooFewParts { found } => {
                write!(f, "FEN has too few fields: found {found}, need at least 4")
            }
            FenError::InvalidPiece { char } => write!(f, "invalid piece character '{char}'"),
            FenError::InvalidSideToMove { found } => {
                write!(f, "invalid side-to-move field '{found}', expected 'w' or 'b'")
            }
            FenError::InvalidCastling { char } => {
                write!(f, "invalid castling character '{char}'")
            }
            FenError::InvalidEnPassant { found } => {
                write!(f, "invalid en-passant field '{found}'")
            }
            FenError::InvalidRank { rank } => write!(f, "invalid rank field '{rank}'"),
            FenError::TooManyFiles { rank, files } => {
                write!(f, "rank {rank} describes {files} files, expected at most 8")
            }
            FenError::TooFewFiles { rank, files } => {
                write!(f, "rank {rank} describes {files} files, expected exactly 8")
            }
        }
    }
}

impl std::error::Error for FenError {}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MoveParseError {
    InvalidLength { len: usize },
    InvalidSquare { notation: String },
    InvalidPromotion { char: char },
    IllegalMove { notation: String },
}

impl fmt::Display for MoveParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MoveParseError::InvalidLength { len } => {
                write!(f, "move notation has invalid length {len}, expected 4 or 5")
            }
            MoveParseError::InvalidSquare { notation } => {
                write!(f, "invalid square in move notation '{notation}'")
            }
            MoveParseError::InvalidPromotion { char } => {
                write!(f, "invalid promotion character '{char}'")
            }
            MoveParseError::IllegalMove { notation } => {
                write!(f, "'{notation}' is not a legal move in the current position")
            }
        }
    }
}

impl std::error::Error for MoveParseError {}

/// Errors produced by the REPL/xboard command layer, distinct from move and
/// FEN parsing since they cover malformed or unsupported protocol input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandError {
    UnknownCommand { command: String },
    Fen(FenError),
    Move(MoveParseError),
}

impl fmt::Display for CommandError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CommandError::UnknownCommand { command } => {
                write!(f, "unknown command '{command}'")
            }
            CommandError::Fen(e) => write!(f, "{e}"),
            CommandError::Move(e) => write!(f, "{e}"),
        }
    }
}

impl std::error::Error for CommandError {}

impl From<FenError> for CommandError {
    fn from(e: FenError) -> Self {
        CommandError::Fen(e)
    }
}

impl From<MoveParseError> for CommandError {
    fn from(e: MoveParseError) -> Self {
        CommandError::Move(e)
    }
}
