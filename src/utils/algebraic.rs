//! Conversions between board-array squares and algebraic coordinates.
//!
//! Row 0 is rank 8 and column 0 is file a, so `e4` is row 4, column 4.

use crate::chess_errors::{ChessErrors, ChessResult};
use crate::game_state::chess_types::{PieceKind, Square};

/// Convert algebraic notation (for example: "e4") to a square.
#[inline]
pub fn algebraic_to_square(square: &str) -> ChessResult<Square> {
    let bytes = square.as_bytes();
    if bytes.len() != 2 {
        return Err(ChessErrors::InvalidAlgebraicSquare(square.to_owned()));
    }

    let file = bytes[0];
    let rank = bytes[1];
    if !(b'a'..=b'h').contains(&file) || !(b'1'..=b'8').contains(&rank) {
        return Err(ChessErrors::InvalidAlgebraicSquare(square.to_owned()));
    }

    let col = (file - b'a') as i8;
    let row = 7 - (rank - b'1') as i8;
    Ok(Square::new(row, col))
}

/// Convert an on-board square to algebraic notation (for example: "e4").
#[inline]
pub fn square_to_algebraic(square: Square) -> ChessResult<String> {
    if !square.is_on_board() {
        return Err(ChessErrors::InvalidAlgebraicSquare(format!(
            "({},{})",
            square.row, square.col
        )));
    }
    Ok(square.to_string())
}

/// Split long algebraic move text such as `e2e4` or `a7a8q`.
pub fn parse_long_algebraic(text: &str) -> ChessResult<(Square, Square, Option<PieceKind>)> {
    if !text.is_ascii() || !(4..=5).contains(&text.len()) {
        return Err(ChessErrors::InvalidAlgebraicSquare(text.to_owned()));
    }

    let from = algebraic_to_square(&text[0..2])?;
    let to = algebraic_to_square(&text[2..4])?;
    let promotion = match text.as_bytes().get(4) {
        None => None,
        Some(b'q') => Some(PieceKind::Queen),
        Some(b'r') => Some(PieceKind::Rook),
        Some(b'b') => Some(PieceKind::Bishop),
        Some(b'n') => Some(PieceKind::Knight),
        Some(_) => return Err(ChessErrors::InvalidAlgebraicSquare(text.to_owned())),
    };
    Ok((from, to, promotion))
}
