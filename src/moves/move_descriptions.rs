//! Move candidates produced by raw move generation.
//!
//! A candidate names the moving piece by id, its origin and destination, and
//! carries the tags the simulator and the turn manager need to play it out:
//! castling side, en passant capture square, promotion kind.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::game_state::chess_types::{CastlingSide, PieceId, PieceKind, Square};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SpecialMove {
    /// King move of two files; the rook jumps to the square the king crossed.
    Castling(CastlingSide),
    /// Pawn capture of the pawn standing on `captured`, beside the mover.
    EnPassant { captured: Square },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MoveCandidate {
    pub piece_id: PieceId,
    pub from: Square,
    pub to: Square,
    pub special: Option<SpecialMove>,
    pub promotion: Option<PieceKind>,
}

impl MoveCandidate {
    #[inline]
    pub const fn quiet(piece_id: PieceId, from: Square, to: Square) -> Self {
        Self {
            piece_id,
            from,
            to,
            special: None,
            promotion: None,
        }
    }

    #[inline]
    pub const fn with_promotion(self, kind: PieceKind) -> Self {
        Self {
            promotion: Some(kind),
            ..self
        }
    }

    #[inline]
    pub const fn with_special(self, special: SpecialMove) -> Self {
        Self {
            special: Some(special),
            ..self
        }
    }

    #[inline]
    pub const fn castling_side(&self) -> Option<CastlingSide> {
        match self.special {
            Some(SpecialMove::Castling(side)) => Some(side),
            _ => None,
        }
    }

    #[inline]
    pub const fn is_castling(&self) -> bool {
        self.castling_side().is_some()
    }

    #[inline]
    pub const fn en_passant_capture(&self) -> Option<Square> {
        match self.special {
            Some(SpecialMove::EnPassant { captured }) => Some(captured),
            _ => None,
        }
    }

    #[inline]
    pub const fn is_en_passant(&self) -> bool {
        self.en_passant_capture().is_some()
    }

    /// Same piece, same squares; ignores the promotion choice.
    #[inline]
    pub fn same_path(&self, other: &MoveCandidate) -> bool {
        self.piece_id == other.piece_id && self.from == other.from && self.to == other.to
    }
}

impl fmt::Display for MoveCandidate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.from, self.to)?;
        if let Some(kind) = self.promotion {
            let ch = match kind {
                PieceKind::Queen => 'q',
                PieceKind::Rook => 'r',
                PieceKind::Bishop => 'b',
                PieceKind::Knight => 'n',
                PieceKind::Pawn => 'p',
                PieceKind::King => 'k',
            };
            write!(f, "{ch}")?;
        }
        Ok(())
    }
}
