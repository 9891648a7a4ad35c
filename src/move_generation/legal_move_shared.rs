//! Helpers shared by the per-piece raw move generators.

use crate::game_state::chess_types::Piece;
use crate::move_generation::move_generator::Position;
use crate::moves::move_descriptions::MoveCandidate;

/// Walks from `piece` one square at a time along `(d_row, d_col)`.
///
/// Empty squares are pushed and the walk continues; the first occupied square
/// ends the walk and is pushed only when it holds an opposing piece.
pub fn trace_ray(
    position: &Position,
    piece: &Piece,
    d_row: i8,
    d_col: i8,
    out: &mut Vec<MoveCandidate>,
) {
    let mut current = piece.square;
    while let Some(next) = current.offset(d_row, d_col) {
        match position.piece_at(next) {
            None => out.push(MoveCandidate::quiet(piece.id, piece.square, next)),
            Some(occupant) => {
                if occupant.color != piece.color {
                    out.push(MoveCandidate::quiet(piece.id, piece.square, next));
                }
                break;
            }
        }
        current = next;
    }
}

/// Pushes every on-board `offset` target that is empty or holds an opposing piece.
pub fn push_step_targets(
    position: &Position,
    piece: &Piece,
    offsets: &[(i8, i8)],
    out: &mut Vec<MoveCandidate>,
) {
    for &(d_row, d_col) in offsets {
        let Some(to) = piece.square.offset(d_row, d_col) else {
            continue;
        };
        if position
            .piece_at(to)
            .map_or(true, |occupant| occupant.color != piece.color)
        {
            out.push(MoveCandidate::quiet(piece.id, piece.square, to));
        }
    }
}
