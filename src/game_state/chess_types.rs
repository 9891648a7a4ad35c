//! Core value types shared by the rules engine and the turn manager.
//!
//! Every type here is plain data: `Copy` where it is small, serializable so
//! storage layers can persist positions and histories as-is.

use std::fmt;

use serde::{Deserialize, Serialize};

pub use crate::game_state::game_state::GameState;
pub use crate::game_state::undo_state::UndoState;

/// Board coordinates in board-array convention: row 0 is rank 8, col 0 is file a.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Square {
    pub row: i8,
    pub col: i8,
}

impl Square {
    #[inline]
    pub const fn new(row: i8, col: i8) -> Self {
        Self { row, col }
    }

    #[inline]
    pub const fn is_on_board(self) -> bool {
        self.row >= 0 && self.row < 8 && self.col >= 0 && self.col < 8
    }

    /// Shifts the square, returning `None` if the result leaves the board.
    #[inline]
    pub const fn offset(self, d_row: i8, d_col: i8) -> Option<Self> {
        match (self.row.checked_add(d_row), self.col.checked_add(d_col)) {
            (Some(row), Some(col)) if Self::new(row, col).is_on_board() => {
                Some(Self::new(row, col))
            }
            _ => None,
        }
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.is_on_board() {
            return write!(f, "({},{})", self.row, self.col);
        }
        let file = (b'a' + self.col as u8) as char;
        let rank = 8 - self.row;
        write!(f, "{file}{rank}")
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Color {
    White,
    Black,
}

impl Color {
    pub const ALL: [Color; 2] = [Color::White, Color::Black];

    #[inline]
    pub const fn index(self) -> usize {
        match self {
            Color::White => 0,
            Color::Black => 1,
        }
    }

    #[inline]
    pub const fn opposite(self) -> Self {
        match self {
            Color::White => Color::Black,
            Color::Black => Color::White,
        }
    }

    /// Row delta of a single pawn step.
    #[inline]
    pub const fn pawn_direction(self) -> i8 {
        match self {
            Color::White => -1,
            Color::Black => 1,
        }
    }

    /// Row the pieces (king, rooks) start on.
    #[inline]
    pub const fn back_row(self) -> i8 {
        match self {
            Color::White => 7,
            Color::Black => 0,
        }
    }

    #[inline]
    pub const fn pawn_home_row(self) -> i8 {
        match self {
            Color::White => 6,
            Color::Black => 1,
        }
    }

    /// Row a pawn of this color promotes on.
    #[inline]
    pub const fn promotion_row(self) -> i8 {
        self.opposite().back_row()
    }

    /// Row a pawn of this color must stand on to capture en passant.
    #[inline]
    pub const fn en_passant_capture_row(self) -> i8 {
        match self {
            Color::White => 3,
            Color::Black => 4,
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Color::White => f.write_str("White"),
            Color::Black => f.write_str("Black"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PieceKind {
    Pawn,
    Knight,
    Bishop,
    Rook,
    Queen,
    King,
}

impl PieceKind {
    pub const PROMOTION_CHOICES: [PieceKind; 4] = [
        PieceKind::Queen,
        PieceKind::Rook,
        PieceKind::Bishop,
        PieceKind::Knight,
    ];

    #[inline]
    pub const fn index(self) -> usize {
        match self {
            PieceKind::Pawn => 0,
            PieceKind::Knight => 1,
            PieceKind::Bishop => 2,
            PieceKind::Rook => 3,
            PieceKind::Queen => 4,
            PieceKind::King => 5,
        }
    }

    #[inline]
    pub const fn is_promotion_choice(self) -> bool {
        matches!(
            self,
            PieceKind::Queen | PieceKind::Rook | PieceKind::Bishop | PieceKind::Knight
        )
    }
}

/// Stable identity of a piece for the lifetime of a game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PieceId(pub u8);

impl fmt::Display for PieceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Piece {
    pub id: PieceId,
    pub kind: PieceKind,
    pub color: Color,
    pub square: Square,
}

impl Piece {
    #[inline]
    pub const fn new(id: PieceId, kind: PieceKind, color: Color, square: Square) -> Self {
        Self {
            id,
            kind,
            color,
            square,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CastlingSide {
    /// Toward the h-file rook.
    Kingside,
    /// Toward the a-file rook.
    Queenside,
}

impl CastlingSide {
    pub const ALL: [CastlingSide; 2] = [CastlingSide::Kingside, CastlingSide::Queenside];

    #[inline]
    pub const fn rook_from_col(self) -> i8 {
        match self {
            CastlingSide::Kingside => 7,
            CastlingSide::Queenside => 0,
        }
    }

    #[inline]
    pub const fn rook_to_col(self) -> i8 {
        match self {
            CastlingSide::Kingside => 5,
            CastlingSide::Queenside => 3,
        }
    }

    #[inline]
    pub const fn king_to_col(self) -> i8 {
        match self {
            CastlingSide::Kingside => 6,
            CastlingSide::Queenside => 2,
        }
    }

    /// Column delta of one king step toward the rook.
    #[inline]
    pub const fn step(self) -> i8 {
        match self {
            CastlingSide::Kingside => 1,
            CastlingSide::Queenside => -1,
        }
    }
}

/// Castling bookkeeping for one color. Flags only ever flip from `false` to `true`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SideCastling {
    pub king_moved: bool,
    /// Queenside rook (a-file).
    pub rook_a_moved: bool,
    /// Kingside rook (h-file).
    pub rook_h_moved: bool,
}

impl SideCastling {
    /// Everything marked as moved, i.e. no castling possible.
    pub const LOST: SideCastling = SideCastling {
        king_moved: true,
        rook_a_moved: true,
        rook_h_moved: true,
    };

    #[inline]
    pub const fn rook_moved(&self, side: CastlingSide) -> bool {
        match side {
            CastlingSide::Kingside => self.rook_h_moved,
            CastlingSide::Queenside => self.rook_a_moved,
        }
    }

    #[inline]
    pub const fn may_castle(&self, side: CastlingSide) -> bool {
        !self.king_moved && !self.rook_moved(side)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CastlingRights {
    pub white: SideCastling,
    pub black: SideCastling,
}

impl CastlingRights {
    pub const NONE: CastlingRights = CastlingRights {
        white: SideCastling::LOST,
        black: SideCastling::LOST,
    };

    #[inline]
    pub const fn side(&self, color: Color) -> &SideCastling {
        match color {
            Color::White => &self.white,
            Color::Black => &self.black,
        }
    }

    #[inline]
    pub fn side_mut(&mut self, color: Color) -> &mut SideCastling {
        match color {
            Color::White => &mut self.white,
            Color::Black => &mut self.black,
        }
    }

    #[inline]
    pub const fn may_castle(&self, color: Color, side: CastlingSide) -> bool {
        self.side(color).may_castle(side)
    }

    /// Records that a piece left or was captured on `square`.
    ///
    /// Touching a king or rook home square permanently clears the matching right.
    pub fn touch(&mut self, square: Square) {
        for color in Color::ALL {
            if square.row != color.back_row() {
                continue;
            }
            let side = self.side_mut(color);
            match square.col {
                0 => side.rook_a_moved = true,
                4 => side.king_moved = true,
                7 => side.rook_h_moved = true,
                _ => {}
            }
        }
    }
}

/// Square passed over by a pawn's double push, capturable for one ply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnPassantTarget {
    pub square: Square,
    pub available_for: Color,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn square_offset_clamps_to_board() {
        let corner = Square::new(0, 0);
        assert_eq!(corner.offset(-1, 0), None);
        assert_eq!(corner.offset(0, -1), None);
        assert_eq!(corner.offset(1, 1), Some(Square::new(1, 1)));
        assert_eq!(Square::new(7, 7).offset(1, 0), None);
    }

    #[test]
    fn square_offset_never_overflows() {
        assert_eq!(Square::new(127, 0).offset(1, 0), None);
        assert_eq!(Square::new(0, -128).offset(0, -1), None);
        assert_eq!(Square::new(9, 3).offset(-2, 0), Some(Square::new(7, 3)));
    }

    #[test]
    fn square_display_uses_algebraic_names() {
        assert_eq!(Square::new(7, 0).to_string(), "a1");
        assert_eq!(Square::new(0, 7).to_string(), "h8");
        assert_eq!(Square::new(4, 4).to_string(), "e4");
    }

    #[test]
    fn touching_home_squares_clears_rights_permanently() {
        let mut rights = CastlingRights::default();
        rights.touch(Square::new(7, 7));
        assert!(!rights.may_castle(Color::White, CastlingSide::Kingside));
        assert!(rights.may_castle(Color::White, CastlingSide::Queenside));
        assert!(rights.may_castle(Color::Black, CastlingSide::Kingside));

        rights.touch(Square::new(0, 4));
        assert!(!rights.may_castle(Color::Black, CastlingSide::Kingside));
        assert!(!rights.may_castle(Color::Black, CastlingSide::Queenside));

        // A non-home square changes nothing.
        let before = rights;
        rights.touch(Square::new(3, 3));
        assert_eq!(rights, before);
    }

    #[test]
    fn pawn_geometry_is_mirrored_between_colors() {
        assert_eq!(Color::White.pawn_direction(), -1);
        assert_eq!(Color::Black.pawn_direction(), 1);
        assert_eq!(Color::White.promotion_row(), 0);
        assert_eq!(Color::Black.promotion_row(), 7);
        assert_eq!(
            Color::White.en_passant_capture_row() + Color::White.pawn_direction(),
            2
        );
        assert_eq!(
            Color::Black.en_passant_capture_row() + Color::Black.pawn_direction(),
            5
        );
    }
}
