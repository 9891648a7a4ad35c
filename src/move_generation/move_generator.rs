//! The read-only view every engine query runs against.
//!
//! `Position` bundles a piece set with the auxiliary state castling and en
//! passant depend on. It only borrows the pieces, so the same queries run
//! unchanged against the live board and against hypothetical snapshots.

use crate::game_state::chess_types::{CastlingRights, Color, EnPassantTarget, Piece, Square};
use crate::game_state::piece_register::PieceRegister;

#[derive(Debug, Clone, Copy)]
pub struct Position<'a> {
    pub pieces: &'a PieceRegister,
    pub castling_rights: CastlingRights,
    pub en_passant: Option<EnPassantTarget>,
}

impl<'a> Position<'a> {
    #[inline]
    pub fn new(
        pieces: &'a PieceRegister,
        castling_rights: CastlingRights,
        en_passant: Option<EnPassantTarget>,
    ) -> Self {
        Self {
            pieces,
            castling_rights,
            en_passant,
        }
    }

    /// Same auxiliary state over a different piece set.
    #[inline]
    pub fn with_pieces<'b>(&self, pieces: &'b PieceRegister) -> Position<'b> {
        Position {
            pieces,
            castling_rights: self.castling_rights,
            en_passant: self.en_passant,
        }
    }

    #[inline]
    pub fn piece_at(&self, square: Square) -> Option<&'a Piece> {
        self.pieces.piece_at(square)
    }

    #[inline]
    pub fn is_empty_at(&self, square: Square) -> bool {
        self.pieces.is_empty_at(square)
    }

    /// True if `square` holds a piece of the other color.
    #[inline]
    pub fn is_enemy_at(&self, square: Square, own: Color) -> bool {
        self.piece_at(square).map_or(false, |p| p.color != own)
    }
}
