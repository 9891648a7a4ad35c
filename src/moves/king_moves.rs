//! King raw moves: the eight neighbouring squares plus castling candidates.
//!
//! Castling candidates are emitted when the rights flags allow it, the king and
//! rook stand on their home squares and every square between them is empty.
//! Whether the king starts in, passes through or lands in check is decided
//! later by the move simulator.

use crate::game_state::chess_rules::{KING_HOME_COL, KING_OFFSETS};
use crate::game_state::chess_types::{CastlingSide, Piece, PieceKind, Square};
use crate::move_generation::legal_move_shared::push_step_targets;
use crate::move_generation::move_generator::Position;
use crate::moves::move_descriptions::{MoveCandidate, SpecialMove};

pub fn king_moves(position: &Position, king: &Piece, out: &mut Vec<MoveCandidate>) {
    push_step_targets(position, king, &KING_OFFSETS, out);

    for side in CastlingSide::ALL {
        if let Some(candidate) = castling_candidate(position, king, side) {
            out.push(candidate);
        }
    }
}

fn castling_candidate(
    position: &Position,
    king: &Piece,
    side: CastlingSide,
) -> Option<MoveCandidate> {
    let row = king.color.back_row();
    if king.square != Square::new(row, KING_HOME_COL) {
        return None;
    }
    if !position.castling_rights.may_castle(king.color, side) {
        return None;
    }

    let rook_square = Square::new(row, side.rook_from_col());
    let rook = position.piece_at(rook_square)?;
    if rook.kind != PieceKind::Rook || rook.color != king.color {
        return None;
    }

    let mut col = KING_HOME_COL + side.step();
    while col != side.rook_from_col() {
        if !position.is_empty_at(Square::new(row, col)) {
            return None;
        }
        col += side.step();
    }

    Some(
        MoveCandidate::quiet(king.id, king.square, Square::new(row, side.king_to_col()))
            .with_special(SpecialMove::Castling(side)),
    )
}
