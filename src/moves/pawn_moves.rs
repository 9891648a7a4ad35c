//! Pawn raw moves: pushes, diagonal captures, en passant and promotions.
//!
//! White pawns move toward row 0, Black pawns toward row 7. A push or capture
//! that lands on the promotion row is emitted once per promotion kind so the
//! caller can pick one; en passant candidates carry the square of the pawn
//! they remove, which sits beside the mover rather than on the destination.

use crate::game_state::chess_types::{Piece, PieceKind, Square};
use crate::move_generation::move_generator::Position;
use crate::moves::move_descriptions::{MoveCandidate, SpecialMove};

pub fn pawn_moves(position: &Position, pawn: &Piece, out: &mut Vec<MoveCandidate>) {
    let color = pawn.color;
    let direction = color.pawn_direction();

    // Pushes only onto empty squares.
    if let Some(one_step) = pawn.square.offset(direction, 0) {
        if position.is_empty_at(one_step) {
            push_pawn_move(pawn, one_step, out);

            if pawn.square.row == color.pawn_home_row() {
                if let Some(two_step) = pawn.square.offset(2 * direction, 0) {
                    if position.is_empty_at(two_step) {
                        push_pawn_move(pawn, two_step, out);
                    }
                }
            }
        }
    }

    for d_col in [-1i8, 1i8] {
        let Some(to) = pawn.square.offset(direction, d_col) else {
            continue;
        };
        if position.is_enemy_at(to, color) {
            push_pawn_move(pawn, to, out);
        }
    }

    if let Some(candidate) = en_passant_candidate(position, pawn) {
        out.push(candidate);
    }
}

fn push_pawn_move(pawn: &Piece, to: Square, out: &mut Vec<MoveCandidate>) {
    let base = MoveCandidate::quiet(pawn.id, pawn.square, to);
    if to.row == pawn.color.promotion_row() {
        for kind in PieceKind::PROMOTION_CHOICES {
            out.push(base.with_promotion(kind));
        }
    } else {
        out.push(base);
    }
}

fn en_passant_candidate(position: &Position, pawn: &Piece) -> Option<MoveCandidate> {
    let target = position.en_passant?;
    let color = pawn.color;

    if target.available_for != color || pawn.square.row != color.en_passant_capture_row() {
        return None;
    }
    if target.square.row != pawn.square.row + color.pawn_direction()
        || (target.square.col - pawn.square.col).abs() != 1
    {
        return None;
    }

    let captured = Square::new(pawn.square.row, target.square.col);
    let victim = position.piece_at(captured)?;
    if victim.kind != PieceKind::Pawn
        || victim.color == color
        || !position.is_empty_at(target.square)
    {
        return None;
    }

    Some(
        MoveCandidate::quiet(pawn.id, pawn.square, target.square)
            .with_special(SpecialMove::EnPassant { captured }),
    )
}
