//! Legal move filtering and game state classification.
//!
//! Legal moves are the raw moves of a piece that survive the simulator's check
//! test. Checkmate and stalemate are re-derived from the position on every call,
//! so classification is idempotent and safe to query at any time.

use serde::{Deserialize, Serialize};

use crate::game_state::chess_types::{Color, Piece};
use crate::move_generation::legal_move_apply::would_leave_king_in_check;
use crate::move_generation::legal_move_checks::is_king_in_check;
use crate::move_generation::move_generator::Position;
use crate::move_generation::raw_move_generator::raw_moves;
use crate::moves::move_descriptions::MoveCandidate;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameStatus {
    Ongoing,
    /// The given color is in check and has a way out.
    Check(Color),
    /// The given color is mated.
    Checkmate(Color),
    /// The given color is not in check and has no legal move.
    Stalemate(Color),
}

impl GameStatus {
    #[inline]
    pub const fn is_terminal(self) -> bool {
        matches!(self, GameStatus::Checkmate(_) | GameStatus::Stalemate(_))
    }
}

/// Legal moves of `piece` in `position`.
///
/// The piece is looked up by id, so a stale copy whose square no longer
/// matches the position yields no moves.
pub fn legal_moves(position: &Position, piece: &Piece) -> Vec<MoveCandidate> {
    let Some(current) = position.pieces.piece_by_id(piece.id) else {
        return Vec::new();
    };
    if current != piece {
        return Vec::new();
    }

    let mut moves = raw_moves(position, current);
    moves.retain(|candidate| !would_leave_king_in_check(position, candidate));
    moves
}

pub fn legal_moves_for_color(position: &Position, color: Color) -> Vec<MoveCandidate> {
    position
        .pieces
        .pieces_of_color(color)
        .flat_map(|piece| legal_moves(position, piece))
        .collect()
}

/// Stops at the first legal move found.
pub fn has_any_legal_move(position: &Position, color: Color) -> bool {
    position.pieces.pieces_of_color(color).any(|piece| {
        raw_moves(position, piece)
            .iter()
            .any(|candidate| !would_leave_king_in_check(position, candidate))
    })
}

pub fn is_checkmate(position: &Position, color: Color) -> bool {
    is_king_in_check(position, color) && !has_any_legal_move(position, color)
}

pub fn is_stalemate(position: &Position, color: Color) -> bool {
    !is_king_in_check(position, color) && !has_any_legal_move(position, color)
}

/// Status of the game from the point of view of `to_move`.
pub fn classify(position: &Position, to_move: Color) -> GameStatus {
    let in_check = is_king_in_check(position, to_move);
    let can_move = has_any_legal_move(position, to_move);
    match (in_check, can_move) {
        (true, true) => GameStatus::Check(to_move),
        (true, false) => GameStatus::Checkmate(to_move),
        (false, false) => GameStatus::Stalemate(to_move),
        (false, true) => GameStatus::Ongoing,
    }
}
