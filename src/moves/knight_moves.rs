//! Knight raw moves: the eight fixed L-shaped jumps.

use crate::game_state::chess_rules::KNIGHT_OFFSETS;
use crate::game_state::chess_types::Piece;
use crate::move_generation::legal_move_shared::push_step_targets;
use crate::move_generation::move_generator::Position;
use crate::moves::move_descriptions::MoveCandidate;

pub fn knight_moves(position: &Position, knight: &Piece, out: &mut Vec<MoveCandidate>) {
    push_step_targets(position, knight, &KNIGHT_OFFSETS, out);
}
