//! Errors used by the turn manager and the position parsers.
//!
//! The rules engine proper (raw move generation, check detection, move
//! simulation and state classification) is total and never returns an error.
//! `ChessErrors` is what callers see when they feed the crate malformed input
//! or ask the turn manager to do something the rules forbid.

use thiserror::Error;

use crate::game_state::chess_types::{Color, PieceId, Square};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ChessErrors {
    /// A FEN string had the wrong overall shape.
    #[error("invalid FEN string '{fen}': {reason}")]
    InvalidFen { fen: String, reason: String },

    /// An unexpected character inside the FEN piece placement field.
    #[error("invalid FEN token '{0}'")]
    InvalidFenToken(char),

    /// A square name outside `a1..=h8`.
    #[error("invalid algebraic square '{0}'")]
    InvalidAlgebraicSquare(String),

    #[error("no piece with id {0} on the board")]
    UnknownPiece(PieceId),

    /// Tried to place a piece on a square that is already taken.
    #[error("square {0} is already occupied")]
    SquareOccupied(Square),

    /// Tried to register a second piece under an id already in use.
    #[error("piece id {0} is already in use")]
    DuplicatePieceId(PieceId),

    #[error("it is {expected}'s turn, cannot move a {found} piece")]
    NotYourTurn { expected: Color, found: Color },

    /// The requested move is not among the piece's legal moves.
    #[error("illegal move for piece {piece} from {from} to {to}")]
    IllegalMove {
        piece: PieceId,
        from: Square,
        to: Square,
    },

    /// A pawn reaching the last rank needs a promotion piece.
    #[error("moving piece {piece} to {to} requires a promotion choice")]
    PromotionRequired { piece: PieceId, to: Square },

    #[error("no move to take back")]
    NothingToTakeBack,

    #[error("perft worker thread panicked")]
    PerftWorkerPanicked,
}

pub type ChessResult<T> = Result<T, ChessErrors>;
