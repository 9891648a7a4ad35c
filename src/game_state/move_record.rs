//! History entry for an applied move.
//!
//! Carries what a notation layer needs to render the move (capture, promotion,
//! castling side, en passant, check and mate) without re-deriving anything
//! from the board.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::game_state::chess_types::{CastlingSide, Color, Piece, PieceId, PieceKind, Square};
use crate::moves::move_descriptions::{MoveCandidate, SpecialMove};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveRecord {
    pub piece_id: PieceId,
    /// Kind of the mover before the move; a promoting pawn is recorded as a pawn.
    pub piece: PieceKind,
    pub color: Color,
    pub from: Square,
    pub to: Square,
    pub captured: Option<Piece>,
    pub promotion: Option<PieceKind>,
    pub special: Option<SpecialMove>,
    pub creates_check: bool,
    pub is_checkmate: bool,
    pub timestamp: DateTime<Utc>,
}

impl MoveRecord {
    #[inline]
    pub fn is_capture(&self) -> bool {
        self.captured.is_some()
    }

    #[inline]
    pub fn is_promotion(&self) -> bool {
        self.promotion.is_some()
    }

    #[inline]
    pub fn castling_side(&self) -> Option<CastlingSide> {
        match self.special {
            Some(SpecialMove::Castling(side)) => Some(side),
            _ => None,
        }
    }

    #[inline]
    pub fn is_castling(&self) -> bool {
        self.castling_side().is_some()
    }

    #[inline]
    pub fn is_kingside_castle(&self) -> bool {
        self.castling_side() == Some(CastlingSide::Kingside)
    }

    #[inline]
    pub fn is_queenside_castle(&self) -> bool {
        self.castling_side() == Some(CastlingSide::Queenside)
    }

    #[inline]
    pub fn is_en_passant(&self) -> bool {
        matches!(self.special, Some(SpecialMove::EnPassant { .. }))
    }

    /// The candidate this record was produced from.
    pub fn candidate(&self) -> MoveCandidate {
        MoveCandidate {
            piece_id: self.piece_id,
            from: self.from,
            to: self.to,
            special: self.special,
            promotion: self.promotion,
        }
    }
}

impl fmt::Display for MoveRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.candidate())?;
        if self.is_checkmate {
            f.write_str("#")
        } else if self.creates_check {
            f.write_str("+")
        } else {
            Ok(())
        }
    }
}
