use serde::{Deserialize, Serialize};

use crate::game_state::chess_types::*;
use crate::moves::move_descriptions::MoveCandidate;

/// Single undo record for `GameState::apply_move` / `GameState::take_back_move`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UndoState {
    pub mv: MoveCandidate,
    /// The mover as it stood before the move, pre-promotion kind included.
    pub moved_piece: Piece,
    /// Captured piece and its slot in the register.
    pub captured: Option<(usize, Piece)>,
    /// Castling rook id and its corner square.
    pub rook_origin: Option<(PieceId, Square)>,

    pub prev_castling_rights: CastlingRights,
    pub prev_en_passant: Option<EnPassantTarget>,
    pub prev_halfmove_clock: u16,
    pub prev_fullmove_number: u16,
}
