//! Bishop raw moves: diagonal rays until the edge or the first blocker.

use crate::game_state::chess_rules::DIAGONAL_DIRECTIONS;
use crate::game_state::chess_types::Piece;
use crate::move_generation::legal_move_shared::trace_ray;
use crate::move_generation::move_generator::Position;
use crate::moves::move_descriptions::MoveCandidate;

pub fn bishop_moves(position: &Position, bishop: &Piece, out: &mut Vec<MoveCandidate>) {
    for (d_row, d_col) in DIAGONAL_DIRECTIONS {
        trace_ray(position, bishop, d_row, d_col, out);
    }
}
