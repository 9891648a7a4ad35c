//! Hypothetical move application for check-safety testing.
//!
//! `simulate_move` builds a fresh snapshot of the position with the candidate
//! played out (capture, castling rook hop, en passant removal, promotion)
//! without touching the position it was given. `would_leave_king_in_check`
//! runs the check oracle against that snapshot.

use log::warn;

use crate::game_state::chess_types::{Piece, PieceKind, Square};
use crate::game_state::piece_register::PieceRegister;
use crate::move_generation::legal_move_checks::is_king_in_check;
use crate::move_generation::move_generator::Position;
use crate::moves::move_descriptions::{MoveCandidate, SpecialMove};

/// Piece set after `candidate`, or `None` if the candidate does not fit the position.
///
/// Every piece in the returned register is an independent copy keyed by its
/// original id.
pub fn simulate_move(position: &Position, candidate: &MoveCandidate) -> Option<PieceRegister> {
    let mover = *position.pieces.piece_by_id(candidate.piece_id)?;
    if mover.square != candidate.from {
        return None;
    }

    let mut snapshot = position.pieces.snapshot();

    let occupant = snapshot
        .piece_at(candidate.to)
        .map(|p| p.id)
        .filter(|id| *id != mover.id);
    if let Some(occupant) = occupant {
        snapshot.remove_by_id(occupant);
    }

    match candidate.special {
        Some(SpecialMove::Castling(side)) => {
            let row = mover.square.row;
            let rook = snapshot
                .piece_at(Square::new(row, side.rook_from_col()))
                .filter(|rook| rook.kind == PieceKind::Rook && rook.color == mover.color)?
                .id;
            snapshot
                .relocate(rook, Square::new(row, side.rook_to_col()))
                .ok()?;
        }
        Some(SpecialMove::EnPassant { captured }) => {
            let victim = snapshot
                .piece_at(captured)
                .filter(|victim| victim.kind == PieceKind::Pawn && victim.color != mover.color)?
                .id;
            snapshot.remove_by_id(victim);
        }
        None => {}
    }

    snapshot.relocate(mover.id, candidate.to).ok()?;
    if let Some(kind) = candidate.promotion {
        snapshot.promote(mover.id, kind).ok()?;
    }

    Some(snapshot)
}

/// True if playing `candidate` would leave the mover's king attacked.
///
/// Castling is additionally refused when the king is in check on its start
/// square or would be in check on the square it passes over. A candidate whose
/// piece cannot be found in the position is refused.
pub fn would_leave_king_in_check(position: &Position, candidate: &MoveCandidate) -> bool {
    let Some(mover) = position.pieces.piece_by_id(candidate.piece_id).copied() else {
        warn!("rejecting {candidate}: piece {} is not on the board", candidate.piece_id);
        return true;
    };

    if let Some(side) = candidate.castling_side() {
        if is_king_in_check(position, mover.color) {
            return true;
        }
        let Some(passing) = king_resting_on(position, &mover, mover.square.offset(0, side.step()))
        else {
            return true;
        };
        if is_king_in_check(&position.with_pieces(&passing), mover.color) {
            return true;
        }
    }

    match simulate_move(position, candidate) {
        Some(after) => is_king_in_check(&position.with_pieces(&after), mover.color),
        None => {
            warn!("rejecting {candidate}: could not simulate it for piece {}", mover.id);
            true
        }
    }
}

/// Snapshot with only the king moved to `square`, used to test a castling path.
fn king_resting_on(
    position: &Position,
    king: &Piece,
    square: Option<Square>,
) -> Option<PieceRegister> {
    let square = square?;
    if !position.is_empty_at(square) {
        return None;
    }
    let mut snapshot = position.pieces.snapshot();
    snapshot.relocate(king.id, square).ok()?;
    Some(snapshot)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game_state::chess_types::{CastlingRights, CastlingSide, Color, PieceId};
    use crate::move_generation::raw_move_generator::raw_moves;

    fn piece(id: u8, kind: PieceKind, color: Color, row: i8, col: i8) -> Piece {
        Piece::new(PieceId(id), kind, color, Square::new(row, col))
    }

    #[test]
    fn simulation_leaves_the_source_untouched() {
        let register = PieceRegister::standard_setup();
        let position = Position::new(&register, CastlingRights::default(), None);
        let push = MoveCandidate::quiet(PieceId(28), Square::new(6, 4), Square::new(4, 4));

        let after = simulate_move(&position, &push).expect("legal push");
        assert_eq!(
            after.piece_by_id(PieceId(28)).map(|p| p.square),
            Some(Square::new(4, 4))
        );
        assert_eq!(
            register.piece_by_id(PieceId(28)).map(|p| p.square),
            Some(Square::new(6, 4))
        );
        assert_eq!(after.len(), register.len());
    }

    #[test]
    fn capture_removes_only_the_victim() {
        let register = PieceRegister::from_pieces([
            piece(0, PieceKind::Rook, Color::White, 7, 0),
            piece(1, PieceKind::Knight, Color::Black, 0, 0),
            piece(2, PieceKind::King, Color::White, 7, 7),
        ])
        .expect("valid");
        let position = Position::new(&register, CastlingRights::NONE, None);
        let capture = MoveCandidate::quiet(PieceId(0), Square::new(7, 0), Square::new(0, 0));

        let after = simulate_move(&position, &capture).expect("capture fits");
        assert_eq!(after.len(), 2);
        assert!(after.piece_by_id(PieceId(1)).is_none());
        let rook = after.piece_by_id(PieceId(0)).expect("rook survives");
        assert_eq!(rook.kind, PieceKind::Rook);
        assert_eq!(rook.color, Color::White);
        assert_eq!(rook.square, Square::new(0, 0));
    }

    #[test]
    fn castling_hops_the_rook_and_keeps_its_identity() {
        let register = PieceRegister::from_pieces([
            piece(20, PieceKind::King, Color::White, 7, 4),
            piece(23, PieceKind::Rook, Color::White, 7, 7),
            piece(16, PieceKind::Rook, Color::White, 7, 0),
        ])
        .expect("valid");
        let position = Position::new(&register, CastlingRights::default(), None);

        let kingside = MoveCandidate::quiet(PieceId(20), Square::new(7, 4), Square::new(7, 6))
            .with_special(SpecialMove::Castling(CastlingSide::Kingside));
        let after = simulate_move(&position, &kingside).expect("castle fits");
        assert_eq!(
            after.piece_by_id(PieceId(23)).map(|p| p.square),
            Some(Square::new(7, 5))
        );
        assert_eq!(
            after.piece_by_id(PieceId(20)).map(|p| p.square),
            Some(Square::new(7, 6))
        );

        let queenside = MoveCandidate::quiet(PieceId(20), Square::new(7, 4), Square::new(7, 2))
            .with_special(SpecialMove::Castling(CastlingSide::Queenside));
        let after = simulate_move(&position, &queenside).expect("castle fits");
        assert_eq!(
            after.piece_by_id(PieceId(16)).map(|p| p.square),
            Some(Square::new(7, 3))
        );
    }

    #[test]
    fn en_passant_removes_the_pawn_beside_the_mover() {
        let register = PieceRegister::from_pieces([
            piece(0, PieceKind::Pawn, Color::White, 3, 4),
            piece(1, PieceKind::Pawn, Color::Black, 3, 3),
        ])
        .expect("valid");
        let position = Position::new(&register, CastlingRights::NONE, None);
        let ep = MoveCandidate::quiet(PieceId(0), Square::new(3, 4), Square::new(2, 3))
            .with_special(SpecialMove::EnPassant {
                captured: Square::new(3, 3),
            });

        let after = simulate_move(&position, &ep).expect("en passant fits");
        assert_eq!(after.len(), 1);
        assert_eq!(
            after.piece_by_id(PieceId(0)).map(|p| p.square),
            Some(Square::new(2, 3))
        );
    }

    #[test]
    fn promotion_changes_kind_in_the_snapshot() {
        let register = PieceRegister::from_pieces([piece(5, PieceKind::Pawn, Color::Black, 6, 2)])
            .expect("valid");
        let position = Position::new(&register, CastlingRights::NONE, None);
        let promo = MoveCandidate::quiet(PieceId(5), Square::new(6, 2), Square::new(7, 2))
            .with_promotion(PieceKind::Knight);

        let after = simulate_move(&position, &promo).expect("promotion fits");
        let promoted = after.piece_by_id(PieceId(5)).expect("same id");
        assert_eq!(promoted.kind, PieceKind::Knight);
        assert_eq!(promoted.color, Color::Black);
        assert_eq!(register.piece_by_id(PieceId(5)).map(|p| p.kind), Some(PieceKind::Pawn));
    }

    #[test]
    fn unknown_or_stale_mover_is_rejected() {
        let register = PieceRegister::from_pieces([piece(0, PieceKind::King, Color::White, 7, 4)])
            .expect("valid");
        let position = Position::new(&register, CastlingRights::NONE, None);

        let ghost = MoveCandidate::quiet(PieceId(9), Square::new(6, 0), Square::new(5, 0));
        assert!(simulate_move(&position, &ghost).is_none());
        assert!(would_leave_king_in_check(&position, &ghost));

        let stale = MoveCandidate::quiet(PieceId(0), Square::new(7, 3), Square::new(6, 3));
        assert!(would_leave_king_in_check(&position, &stale));
    }

    #[test]
    fn castling_through_an_attacked_square_is_refused() {
        let register = PieceRegister::from_pieces([
            piece(0, PieceKind::King, Color::White, 7, 4),
            piece(1, PieceKind::Rook, Color::White, 7, 7),
            piece(2, PieceKind::Rook, Color::Black, 0, 5),
        ])
        .expect("valid");
        let position = Position::new(&register, CastlingRights::default(), None);
        let king = *register.piece_by_id(PieceId(0)).expect("king");
        let castle = raw_moves(&position, &king)
            .into_iter()
            .find(|m| m.is_castling())
            .expect("raw castling candidate");

        // Landing on g1 is safe, but f1 is covered by the rook.
        let after = simulate_move(&position, &castle).expect("fits");
        assert!(!is_king_in_check(&position.with_pieces(&after), Color::White));
        assert!(would_leave_king_in_check(&position, &castle));
    }
}
