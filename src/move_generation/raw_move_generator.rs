//! Pseudo-legal ("raw") move generation.
//!
//! Dispatches on the piece kind to the per-piece generators. Raw moves ignore
//! whether the mover's own king is left in check; that filtering happens in
//! the legal move generator.

use crate::game_state::chess_types::{Color, Piece, PieceKind};
use crate::move_generation::move_generator::Position;
use crate::moves::bishop_moves::bishop_moves;
use crate::moves::king_moves::king_moves;
use crate::moves::knight_moves::knight_moves;
use crate::moves::move_descriptions::MoveCandidate;
use crate::moves::pawn_moves::pawn_moves;
use crate::moves::queen_moves::queen_moves;
use crate::moves::rook_moves::rook_moves;

pub fn generate_raw_moves_into(position: &Position, piece: &Piece, out: &mut Vec<MoveCandidate>) {
    match piece.kind {
        PieceKind::Pawn => pawn_moves(position, piece, out),
        PieceKind::Knight => knight_moves(position, piece, out),
        PieceKind::Bishop => bishop_moves(position, piece, out),
        PieceKind::Rook => rook_moves(position, piece, out),
        PieceKind::Queen => queen_moves(position, piece, out),
        PieceKind::King => king_moves(position, piece, out),
    }
}

pub fn raw_moves(position: &Position, piece: &Piece) -> Vec<MoveCandidate> {
    let mut out = Vec::with_capacity(32);
    generate_raw_moves_into(position, piece, &mut out);
    out
}

/// Raw moves of every piece of `color`.
pub fn raw_moves_for_color(position: &Position, color: Color) -> Vec<MoveCandidate> {
    let mut out = Vec::with_capacity(128);
    for piece in position.pieces.pieces_of_color(color) {
        generate_raw_moves_into(position, piece, &mut out);
    }
    out
}
