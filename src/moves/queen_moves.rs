//! Queen raw moves: the union of rook and bishop rays.

use crate::game_state::chess_rules::{DIAGONAL_DIRECTIONS, ORTHOGONAL_DIRECTIONS};
use crate::game_state::chess_types::Piece;
use crate::move_generation::legal_move_shared::trace_ray;
use crate::move_generation::move_generator::Position;
use crate::moves::move_descriptions::MoveCandidate;

pub fn queen_moves(position: &Position, queen: &Piece, out: &mut Vec<MoveCandidate>) {
    for (d_row, d_col) in ORTHOGONAL_DIRECTIONS.into_iter().chain(DIAGONAL_DIRECTIONS) {
        trace_ray(position, queen, d_row, d_col, out);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game_state::chess_types::{CastlingRights, Color, PieceId, PieceKind, Square};
    use crate::game_state::piece_register::PieceRegister;

    #[test]
    fn centralised_queen_has_twenty_seven_moves() {
        let queen = Piece::new(
            PieceId(0),
            PieceKind::Queen,
            Color::White,
            Square::new(4, 3),
        );
        let register = PieceRegister::from_pieces([queen]).expect("valid");
        let position = Position::new(&register, CastlingRights::NONE, None);

        let mut out = Vec::new();
        queen_moves(&position, &queen, &mut out);
        assert_eq!(out.len(), 27);
    }
}
