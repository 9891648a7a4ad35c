//! Rook raw moves: orthogonal rays until the edge or the first blocker.

use crate::game_state::chess_rules::ORTHOGONAL_DIRECTIONS;
use crate::game_state::chess_types::Piece;
use crate::move_generation::legal_move_shared::trace_ray;
use crate::move_generation::move_generator::Position;
use crate::moves::move_descriptions::MoveCandidate;

pub fn rook_moves(position: &Position, rook: &Piece, out: &mut Vec<MoveCandidate>) {
    for (d_row, d_col) in ORTHOGONAL_DIRECTIONS {
        trace_ray(position, rook, d_row, d_col, out);
    }
}
