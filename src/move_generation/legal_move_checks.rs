//! Check detection over an arbitrary piece set.
//!
//! Every query reads only the `Position` it is given, never the live board, so
//! the same code answers for the real game and for simulated snapshots.

use crate::game_state::chess_types::{Color, Piece, PieceKind, Square};
use crate::move_generation::move_generator::Position;
use crate::move_generation::raw_move_generator::raw_moves;

#[inline]
pub fn king_square(position: &Position, color: Color) -> Option<Square> {
    position.pieces.king_of(color).map(|king| king.square)
}

/// A king that is missing from the position is reported as not in check.
pub fn is_king_in_check(position: &Position, color: Color) -> bool {
    let Some(square) = king_square(position, color) else {
        return false;
    };
    is_square_attacked(position, square, color.opposite())
}

/// True if any piece of `attacker` could capture on `square`.
///
/// For a square held by the defender this is exactly "some raw move of the
/// attacker lands on it". Pawns are special-cased so that pushes onto an empty
/// square never count and diagonals always do.
pub fn is_square_attacked(position: &Position, square: Square, attacker: Color) -> bool {
    position
        .pieces
        .pieces_of_color(attacker)
        .any(|piece| attacks_square(position, piece, square))
}

/// Opposing pieces currently attacking the king of `color`.
pub fn checking_pieces(position: &Position, color: Color) -> Vec<Piece> {
    let Some(square) = king_square(position, color) else {
        return Vec::new();
    };
    position
        .pieces
        .pieces_of_color(color.opposite())
        .filter(|piece| attacks_square(position, piece, square))
        .copied()
        .collect()
}

fn attacks_square(position: &Position, piece: &Piece, square: Square) -> bool {
    match piece.kind {
        PieceKind::Pawn => {
            let direction = piece.color.pawn_direction();
            [-1i8, 1i8]
                .into_iter()
                .any(|d_col| piece.square.offset(direction, d_col) == Some(square))
        }
        _ => raw_moves(position, piece)
            .iter()
            .any(|mv| mv.to == square && !mv.is_castling()),
    }
}
