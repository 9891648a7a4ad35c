//! The set of pieces on the board and point/color queries over it.
//!
//! A `PieceRegister` is both the live board owned by `GameState` and the
//! snapshot type used for what-if evaluation: pieces are `Copy`, so cloning a
//! register copies every piece by value and nothing is shared between the
//! live board and a simulation.

use serde::{Deserialize, Serialize};

use crate::chess_errors::{ChessErrors, ChessResult};
use crate::game_state::chess_rules::BACK_RANK_ORDER;
use crate::game_state::chess_types::{Color, Piece, PieceId, PieceKind, Square};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PieceRegister {
    pieces: Vec<Piece>,
}

impl PieceRegister {
    pub fn new() -> Self {
        Self::default()
    }

    /// The 32-piece starting set.
    ///
    /// Black's back rank takes ids 0..=7 from the a-file, Black's pawns 8..=15,
    /// then White's back rank 16..=23 and White's pawns 24..=31.
    pub fn standard_setup() -> Self {
        let mut pieces = Vec::with_capacity(32);
        for (color, first_id) in [(Color::Black, 0u8), (Color::White, 16u8)] {
            for (col, kind) in BACK_RANK_ORDER.iter().enumerate() {
                pieces.push(Piece::new(
                    PieceId(first_id + col as u8),
                    *kind,
                    color,
                    Square::new(color.back_row(), col as i8),
                ));
            }
            for col in 0..8u8 {
                pieces.push(Piece::new(
                    PieceId(first_id + 8 + col),
                    PieceKind::Pawn,
                    color,
                    Square::new(color.pawn_home_row(), col as i8),
                ));
            }
        }
        Self { pieces }
    }

    /// Builds a register from loose pieces, enforcing one piece per square and unique ids.
    pub fn from_pieces<I: IntoIterator<Item = Piece>>(pieces: I) -> ChessResult<Self> {
        let mut register = Self::new();
        for piece in pieces {
            register.insert(piece)?;
        }
        Ok(register)
    }

    /// Independent value copy of every piece.
    #[inline]
    pub fn snapshot(&self) -> Self {
        self.clone()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.pieces.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.pieces.is_empty()
    }

    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = &Piece> + '_ {
        self.pieces.iter()
    }

    /// Piece standing on `square`; off-board squares are simply empty.
    #[inline]
    pub fn piece_at(&self, square: Square) -> Option<&Piece> {
        if !square.is_on_board() {
            return None;
        }
        self.pieces.iter().find(|p| p.square == square)
    }

    #[inline]
    pub fn is_empty_at(&self, square: Square) -> bool {
        self.piece_at(square).is_none()
    }

    pub fn pieces_of_color(&self, color: Color) -> impl Iterator<Item = &Piece> + '_ {
        self.pieces.iter().filter(move |p| p.color == color)
    }

    #[inline]
    pub fn piece_by_id(&self, id: PieceId) -> Option<&Piece> {
        self.pieces.iter().find(|p| p.id == id)
    }

    pub fn find_piece(&self, kind: PieceKind, color: Color) -> Option<&Piece> {
        self.pieces
            .iter()
            .find(|p| p.kind == kind && p.color == color)
    }

    #[inline]
    pub fn king_of(&self, color: Color) -> Option<&Piece> {
        self.find_piece(PieceKind::King, color)
    }

    pub fn insert(&mut self, piece: Piece) -> ChessResult<()> {
        if !piece.square.is_on_board() || self.piece_at(piece.square).is_some() {
            return Err(ChessErrors::SquareOccupied(piece.square));
        }
        if self.piece_by_id(piece.id).is_some() {
            return Err(ChessErrors::DuplicatePieceId(piece.id));
        }
        self.pieces.push(piece);
        Ok(())
    }

    pub fn remove_at(&mut self, square: Square) -> Option<Piece> {
        let index = self.pieces.iter().position(|p| p.square == square)?;
        Some(self.pieces.remove(index))
    }

    pub fn remove_by_id(&mut self, id: PieceId) -> Option<Piece> {
        let index = self.pieces.iter().position(|p| p.id == id)?;
        Some(self.pieces.remove(index))
    }

    /// Removes the piece on `square`, returning it with its slot so take-back can restore order.
    pub(crate) fn take_at(&mut self, square: Square) -> Option<(usize, Piece)> {
        let index = self.pieces.iter().position(|p| p.square == square)?;
        Some((index, self.pieces.remove(index)))
    }

    pub(crate) fn reinstate(&mut self, index: usize, piece: Piece) {
        let index = index.min(self.pieces.len());
        self.pieces.insert(index, piece);
    }

    /// Moves piece `id` to `square`, returning the square it left.
    ///
    /// The destination must already be clear; captures are removed by the caller first.
    pub fn relocate(&mut self, id: PieceId, square: Square) -> ChessResult<Square> {
        debug_assert!(
            self.piece_at(square).map_or(true, |p| p.id == id),
            "relocating {id} onto occupied square {square}"
        );
        let piece = self
            .pieces
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or(ChessErrors::UnknownPiece(id))?;
        let from = piece.square;
        piece.square = square;
        Ok(from)
    }

    pub fn promote(&mut self, id: PieceId, kind: PieceKind) -> ChessResult<()> {
        let piece = self
            .pieces
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or(ChessErrors::UnknownPiece(id))?;
        piece.kind = kind;
        Ok(())
    }
}
