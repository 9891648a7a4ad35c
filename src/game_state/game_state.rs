//! Live game state and the turn manager that mutates it.
//!
//! `GameState` owns the board, side to move, castling rights, en passant target,
//! clocks, move history and an undo stack. The rules engine only ever reads it
//! through `position()`; the single place the live board changes is
//! `apply_move` (and its inverse `take_back_move`), one move at a time.

use chrono::Utc;
use log::{debug, info};
use serde::{Deserialize, Serialize};

use crate::chess_errors::{ChessErrors, ChessResult};
use crate::game_state::chess_types::*;
use crate::game_state::move_record::MoveRecord;
use crate::game_state::piece_register::PieceRegister;
use crate::move_generation::legal_move_checks::is_king_in_check;
use crate::move_generation::legal_move_generator::{
    classify, has_any_legal_move, legal_moves, legal_moves_for_color, GameStatus,
};
use crate::move_generation::move_generator::Position;
use crate::moves::move_descriptions::MoveCandidate;
use crate::utils::fen_generator::{generate_fen, position_key};
use crate::utils::fen_parser::parse_fen;

/// Plies without a capture or pawn move after which the game is drawn.
pub const FIFTY_MOVE_RULE_PLIES: u16 = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DrawReason {
    Stalemate,
    FiftyMoveRule,
    InsufficientMaterial,
    ThreefoldRepetition,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameResult {
    WhiteWins,
    BlackWins,
    Draw(DrawReason),
    Undecided,
}

impl GameResult {
    /// Result tag as written in PGN.
    pub const fn as_pgn(self) -> &'static str {
        match self {
            GameResult::WhiteWins => "1-0",
            GameResult::BlackWins => "0-1",
            GameResult::Draw(_) => "1/2-1/2",
            GameResult::Undecided => "*",
        }
    }

    #[inline]
    pub const fn is_decided(self) -> bool {
        !matches!(self, GameResult::Undecided)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameState {
    pub pieces: PieceRegister,

    pub side_to_move: Color,
    pub castling_rights: CastlingRights,
    pub en_passant: Option<EnPassantTarget>,

    pub halfmove_clock: u16,
    pub fullmove_number: u16,

    pub move_history: Vec<MoveRecord>,
    pub undo_stack: Vec<UndoState>,

    /// Position keys (FEN without clocks) of every position reached, current last.
    pub repetition_history: Vec<String>,
}

impl Default for GameState {
    fn default() -> Self {
        Self {
            pieces: PieceRegister::new(),

            side_to_move: Color::White,
            castling_rights: CastlingRights::NONE,
            en_passant: None,

            halfmove_clock: 0,
            fullmove_number: 1,

            move_history: Vec::new(),
            undo_stack: Vec::new(),
            repetition_history: Vec::new(),
        }
    }
}

impl GameState {
    /// Empty board, White to move, no castling rights.
    #[inline]
    pub fn new_empty() -> Self {
        Self::default()
    }

    pub fn new_game() -> Self {
        let mut game = Self {
            pieces: PieceRegister::standard_setup(),
            castling_rights: CastlingRights::default(),
            ..Self::default()
        };
        game.mark_position_reached();
        game
    }

    #[inline]
    pub fn from_fen(fen: &str) -> ChessResult<Self> {
        parse_fen(fen)
    }

    #[inline]
    pub fn get_fen(&self) -> String {
        generate_fen(self)
    }

    /// Back to the standard starting position with an empty history.
    pub fn reset(&mut self) {
        *self = Self::new_game();
        debug!("game reset to the starting position");
    }

    /// Read-only view the rules engine runs against.
    #[inline]
    pub fn position(&self) -> Position<'_> {
        Position::new(&self.pieces, self.castling_rights, self.en_passant)
    }

    pub fn legal_moves_for(&self, piece_id: PieceId) -> ChessResult<Vec<MoveCandidate>> {
        let piece = self
            .pieces
            .piece_by_id(piece_id)
            .ok_or(ChessErrors::UnknownPiece(piece_id))?;
        Ok(legal_moves(&self.position(), piece))
    }

    /// Every legal move of the side to move.
    pub fn all_legal_moves(&self) -> Vec<MoveCandidate> {
        legal_moves_for_color(&self.position(), self.side_to_move)
    }

    #[inline]
    pub fn is_in_check(&self, color: Color) -> bool {
        is_king_in_check(&self.position(), color)
    }

    #[inline]
    pub fn status(&self) -> GameStatus {
        classify(&self.position(), self.side_to_move)
    }

    pub fn result(&self) -> GameResult {
        match self.status() {
            GameStatus::Checkmate(Color::White) => return GameResult::BlackWins,
            GameStatus::Checkmate(Color::Black) => return GameResult::WhiteWins,
            GameStatus::Stalemate(_) => return GameResult::Draw(DrawReason::Stalemate),
            GameStatus::Ongoing | GameStatus::Check(_) => {}
        }
        if self.halfmove_clock >= FIFTY_MOVE_RULE_PLIES {
            GameResult::Draw(DrawReason::FiftyMoveRule)
        } else if self.has_insufficient_material() {
            GameResult::Draw(DrawReason::InsufficientMaterial)
        } else if self.is_threefold_repetition() {
            GameResult::Draw(DrawReason::ThreefoldRepetition)
        } else {
            GameResult::Undecided
        }
    }

    /// Neither side can possibly mate: bare kings, a single minor piece, or
    /// only bishops that all stand on squares of one color.
    pub fn has_insufficient_material(&self) -> bool {
        let mut knights = 0usize;
        let mut bishops = 0usize;
        let mut bishop_square_colors = [false; 2];
        for piece in self.pieces.iter() {
            match piece.kind {
                PieceKind::King => {}
                PieceKind::Knight => knights += 1,
                PieceKind::Bishop => {
                    bishops += 1;
                    let shade = (piece.square.row + piece.square.col) % 2;
                    bishop_square_colors[shade as usize] = true;
                }
                PieceKind::Pawn | PieceKind::Rook | PieceKind::Queen => return false,
            }
        }
        knights + bishops <= 1
            || (knights == 0 && !(bishop_square_colors[0] && bishop_square_colors[1]))
    }

    pub fn is_threefold_repetition(&self) -> bool {
        let Some(current) = self.repetition_history.last() else {
            return false;
        };
        self.repetition_history
            .iter()
            .filter(|key| *key == current)
            .count()
            >= 3
    }

    /// Pieces captured so far, in the order they were taken.
    pub fn captured_pieces(&self) -> Vec<Piece> {
        self.move_history
            .iter()
            .filter_map(|record| record.captured)
            .collect()
    }

    pub fn captured_pieces_of(&self, color: Color) -> Vec<Piece> {
        self.captured_pieces()
            .into_iter()
            .filter(|piece| piece.color == color)
            .collect()
    }

    #[inline]
    pub fn last_move(&self) -> Option<&MoveRecord> {
        self.move_history.last()
    }

    /// Validates `candidate` against the legal moves of its piece and plays it.
    pub fn apply_move(&mut self, candidate: &MoveCandidate) -> ChessResult<MoveRecord> {
        let piece = *self
            .pieces
            .piece_by_id(candidate.piece_id)
            .ok_or(ChessErrors::UnknownPiece(candidate.piece_id))?;
        if piece.color != self.side_to_move {
            debug!("rejected {candidate}: {} to move", self.side_to_move);
            return Err(ChessErrors::NotYourTurn {
                expected: self.side_to_move,
                found: piece.color,
            });
        }

        let legal = legal_moves(&self.position(), &piece);
        if !legal.contains(candidate) {
            debug!("rejected {candidate}: not a legal move for {}", piece.id);
            let needs_promotion = candidate.promotion.is_none()
                && legal
                    .iter()
                    .any(|mv| mv.same_path(candidate) && mv.promotion.is_some());
            if needs_promotion {
                return Err(ChessErrors::PromotionRequired {
                    piece: piece.id,
                    to: candidate.to,
                });
            }
            return Err(ChessErrors::IllegalMove {
                piece: piece.id,
                from: candidate.from,
                to: candidate.to,
            });
        }

        self.play(candidate)
    }

    /// Plays the legal move of `piece_id` that lands on `to`.
    ///
    /// A pawn reaching the last rank must be given its promotion kind.
    pub fn apply_move_to(
        &mut self,
        piece_id: PieceId,
        to: Square,
        promotion: Option<PieceKind>,
    ) -> ChessResult<MoveRecord> {
        let piece = *self
            .pieces
            .piece_by_id(piece_id)
            .ok_or(ChessErrors::UnknownPiece(piece_id))?;
        let legal = legal_moves(&self.position(), &piece);

        if let Some(candidate) = legal
            .iter()
            .find(|mv| mv.to == to && mv.promotion == promotion)
        {
            let candidate = *candidate;
            return self.apply_move(&candidate);
        }
        if promotion.is_none() && legal.iter().any(|mv| mv.to == to && mv.promotion.is_some()) {
            return Err(ChessErrors::PromotionRequired { piece: piece_id, to });
        }

        // Falls through to the turn and legality checks for a precise error.
        let mut attempt = MoveCandidate::quiet(piece_id, piece.square, to);
        attempt.promotion = promotion;
        self.apply_move(&attempt)
    }

    /// Applies a move already known to be legal.
    pub(crate) fn play(&mut self, candidate: &MoveCandidate) -> ChessResult<MoveRecord> {
        let mover = *self
            .pieces
            .piece_by_id(candidate.piece_id)
            .ok_or(ChessErrors::UnknownPiece(candidate.piece_id))?;

        let mut undo = UndoState {
            mv: *candidate,
            moved_piece: mover,
            captured: None,
            rook_origin: None,
            prev_castling_rights: self.castling_rights,
            prev_en_passant: self.en_passant,
            prev_halfmove_clock: self.halfmove_clock,
            prev_fullmove_number: self.fullmove_number,
        };

        let capture_square = candidate.en_passant_capture().unwrap_or(candidate.to);
        if self
            .pieces
            .piece_at(capture_square)
            .is_some_and(|p| p.color != mover.color)
        {
            undo.captured = self.pieces.take_at(capture_square);
            self.castling_rights.touch(capture_square);
        }

        if let Some(side) = candidate.castling_side() {
            let row = mover.square.row;
            let corner = Square::new(row, side.rook_from_col());
            let rook = self
                .pieces
                .piece_at(corner)
                .map(|p| p.id)
                .ok_or(ChessErrors::IllegalMove {
                    piece: mover.id,
                    from: candidate.from,
                    to: candidate.to,
                })?;
            self.pieces
                .relocate(rook, Square::new(row, side.rook_to_col()))?;
            undo.rook_origin = Some((rook, corner));
        }

        self.pieces.relocate(mover.id, candidate.to)?;
        if let Some(kind) = candidate.promotion {
            self.pieces.promote(mover.id, kind)?;
        }
        self.castling_rights.touch(candidate.from);

        self.en_passant = (mover.kind == PieceKind::Pawn
            && (candidate.to.row - candidate.from.row).abs() == 2)
            .then(|| EnPassantTarget {
                square: Square::new(
                    candidate.from.row + mover.color.pawn_direction(),
                    candidate.from.col,
                ),
                available_for: mover.color.opposite(),
            });

        if mover.kind == PieceKind::Pawn || undo.captured.is_some() {
            self.halfmove_clock = 0;
        } else {
            self.halfmove_clock = self.halfmove_clock.saturating_add(1);
        }
        if mover.color == Color::Black {
            self.fullmove_number = self.fullmove_number.saturating_add(1);
        }
        self.side_to_move = mover.color.opposite();

        let position = self.position();
        let creates_check = is_king_in_check(&position, self.side_to_move);
        let can_reply = has_any_legal_move(&position, self.side_to_move);
        let is_checkmate = creates_check && !can_reply;

        let record = MoveRecord {
            piece_id: mover.id,
            piece: mover.kind,
            color: mover.color,
            from: candidate.from,
            to: candidate.to,
            captured: undo.captured.map(|(_, piece)| piece),
            promotion: candidate.promotion,
            special: candidate.special,
            creates_check,
            is_checkmate,
            timestamp: Utc::now(),
        };

        debug!("{} played {record}", mover.color);
        if is_checkmate {
            info!("{} is checkmated", self.side_to_move);
        } else if !can_reply {
            info!("{} is stalemated", self.side_to_move);
        }

        self.undo_stack.push(undo);
        self.move_history.push(record.clone());
        self.mark_position_reached();
        Ok(record)
    }

    /// Restores the position before the last move, auxiliary state included.
    pub fn take_back_move(&mut self) -> ChessResult<MoveRecord> {
        let undo = self.undo_stack.pop().ok_or(ChessErrors::NothingToTakeBack)?;
        let record = self.move_history.pop().ok_or(ChessErrors::NothingToTakeBack)?;
        self.repetition_history.pop();

        let moved = undo.moved_piece;
        self.pieces.relocate(moved.id, moved.square)?;
        self.pieces.promote(moved.id, moved.kind)?;

        if let Some((rook, corner)) = undo.rook_origin {
            self.pieces.relocate(rook, corner)?;
        }
        if let Some((index, piece)) = undo.captured {
            self.pieces.reinstate(index, piece);
        }

        self.castling_rights = undo.prev_castling_rights;
        self.en_passant = undo.prev_en_passant;
        self.halfmove_clock = undo.prev_halfmove_clock;
        self.fullmove_number = undo.prev_fullmove_number;
        self.side_to_move = moved.color;

        debug!("took back {record}");
        Ok(record)
    }

    pub(crate) fn mark_position_reached(&mut self) {
        let key = position_key(self);
        self.repetition_history.push(key);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn piece_on(game: &GameState, square: Square) -> PieceId {
        game.pieces.piece_at(square).expect("piece present").id
    }

    fn play_uci(game: &mut GameState, from: Square, to: Square) -> MoveRecord {
        let id = piece_on(game, from);
        game.apply_move_to(id, to, None).expect("legal move")
    }

    #[test]
    fn new_game_matches_the_starting_fen() {
        let game = GameState::new_game();
        assert_eq!(
            game.get_fen(),
            "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1"
        );
        assert_eq!(game.all_legal_moves().len(), 20);
        assert_eq!(game.status(), GameStatus::Ongoing);
        assert_eq!(game.result(), GameResult::Undecided);
    }

    #[test]
    fn moving_out_of_turn_is_rejected() {
        let mut game = GameState::new_game();
        let black_pawn = piece_on(&game, Square::new(1, 4));
        assert_eq!(
            game.apply_move_to(black_pawn, Square::new(3, 4), None),
            Err(ChessErrors::NotYourTurn {
                expected: Color::White,
                found: Color::Black
            })
        );
    }

    #[test]
    fn illegal_destination_is_rejected_without_side_effects() {
        let mut game = GameState::new_game();
        let before = game.clone();
        let e_pawn = piece_on(&game, Square::new(6, 4));
        assert_eq!(
            game.apply_move_to(e_pawn, Square::new(3, 4), None),
            Err(ChessErrors::IllegalMove {
                piece: e_pawn,
                from: Square::new(6, 4),
                to: Square::new(3, 4)
            })
        );
        assert_eq!(game, before);
    }

    #[test]
    fn en_passant_target_lives_for_exactly_one_ply() {
        let mut game = GameState::new_game();
        play_uci(&mut game, Square::new(6, 4), Square::new(4, 4)); // e4
        assert_eq!(
            game.en_passant,
            Some(EnPassantTarget {
                square: Square::new(5, 4),
                available_for: Color::Black
            })
        );

        play_uci(&mut game, Square::new(1, 0), Square::new(2, 0)); // a6
        assert_eq!(game.en_passant, None);

        play_uci(&mut game, Square::new(4, 4), Square::new(3, 4)); // e5
        play_uci(&mut game, Square::new(1, 3), Square::new(3, 3)); // d5
        let ep_square = Square::new(2, 3);
        assert_eq!(
            game.en_passant.map(|t| (t.square, t.available_for)),
            Some((ep_square, Color::White))
        );

        let capturer = piece_on(&game, Square::new(3, 4));
        let moves = game.legal_moves_for(capturer).expect("pawn exists");
        assert!(moves.iter().any(|m| m.is_en_passant() && m.to == ep_square));

        let record = game
            .apply_move_to(capturer, ep_square, None)
            .expect("en passant is legal");
        assert!(record.is_en_passant());
        assert!(record.is_capture());
        assert_eq!(record.captured.map(|p| p.square), Some(Square::new(3, 3)));
        assert!(game.pieces.piece_at(Square::new(3, 3)).is_none());
        assert_eq!(game.en_passant, None);
        assert_eq!(game.captured_pieces_of(Color::Black).len(), 1);
    }

    #[test]
    fn unused_en_passant_expires() {
        let mut game = GameState::new_game();
        play_uci(&mut game, Square::new(6, 4), Square::new(4, 4)); // e4
        play_uci(&mut game, Square::new(1, 0), Square::new(2, 0)); // a6
        play_uci(&mut game, Square::new(4, 4), Square::new(3, 4)); // e5
        play_uci(&mut game, Square::new(1, 3), Square::new(3, 3)); // d5
        play_uci(&mut game, Square::new(6, 7), Square::new(5, 7)); // h3
        play_uci(&mut game, Square::new(2, 0), Square::new(3, 0)); // a5

        let capturer = piece_on(&game, Square::new(3, 4));
        let moves = game.legal_moves_for(capturer).expect("pawn exists");
        assert!(moves.iter().all(|m| !m.is_en_passant()));
    }

    #[test]
    fn castling_moves_the_rook_and_clears_rights() {
        let mut game =
            GameState::from_fen("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1").expect("valid FEN");
        let king = game.pieces.king_of(Color::White).expect("king").id;

        let record = game
            .apply_move_to(king, Square::new(7, 6), None)
            .expect("castling is legal");
        assert!(record.is_kingside_castle());
        assert_eq!(
            game.pieces.piece_at(Square::new(7, 5)).map(|p| p.kind),
            Some(PieceKind::Rook)
        );
        assert!(game.pieces.piece_at(Square::new(7, 7)).is_none());
        assert!(!game.castling_rights.may_castle(Color::White, CastlingSide::Queenside));
        assert!(game.castling_rights.may_castle(Color::Black, CastlingSide::Queenside));
        assert_eq!(game.get_fen(), "r3k2r/8/8/8/8/8/8/R4RK1 b kq - 1 1");
    }

    #[test]
    fn capturing_a_corner_rook_removes_that_castling_right() {
        let mut game =
            GameState::from_fen("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1").expect("valid FEN");
        let rook = game.pieces.piece_at(Square::new(7, 0)).expect("a1 rook").id;
        game.apply_move_to(rook, Square::new(0, 0), None)
            .expect("rook takes rook");
        assert!(!game.castling_rights.may_castle(Color::Black, CastlingSide::Queenside));
        assert!(game.castling_rights.may_castle(Color::Black, CastlingSide::Kingside));
        assert!(!game.castling_rights.may_castle(Color::White, CastlingSide::Queenside));
    }

    #[test]
    fn promotion_needs_a_choice_and_applies_it() {
        let mut game = GameState::from_fen("8/P6k/8/8/8/8/8/K7 w - - 0 1").expect("valid FEN");
        let pawn = piece_on(&game, Square::new(1, 0));

        assert_eq!(
            game.apply_move_to(pawn, Square::new(0, 0), None),
            Err(ChessErrors::PromotionRequired {
                piece: pawn,
                to: Square::new(0, 0)
            })
        );

        let record = game
            .apply_move_to(pawn, Square::new(0, 0), Some(PieceKind::Knight))
            .expect("underpromotion is legal");
        assert!(record.is_promotion());
        assert_eq!(record.piece, PieceKind::Pawn);
        let promoted = game.pieces.piece_by_id(pawn).expect("same id");
        assert_eq!(promoted.kind, PieceKind::Knight);
        assert_eq!(promoted.square, Square::new(0, 0));
    }

    #[test]
    fn take_back_restores_the_exact_position() {
        let mut game = GameState::from_fen(
            "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1",
        )
        .expect("valid FEN");
        let original = game.clone();

        for mv in game.all_legal_moves() {
            game.apply_move(&mv).expect("generated move is legal");
            let replies = game.all_legal_moves();
            if let Some(reply) = replies.first() {
                game.apply_move(reply).expect("reply is legal");
                game.take_back_move().expect("reply recorded");
            }
            game.take_back_move().expect("move recorded");
            assert_eq!(game, original, "take back of {mv} diverged");
        }
        assert_eq!(game.take_back_move(), Err(ChessErrors::NothingToTakeBack));
    }

    #[test]
    fn fools_mate_is_recorded_and_scored() {
        let mut game = GameState::new_game();
        play_uci(&mut game, Square::new(6, 5), Square::new(5, 5)); // f3
        play_uci(&mut game, Square::new(1, 4), Square::new(3, 4)); // e5
        play_uci(&mut game, Square::new(6, 6), Square::new(4, 6)); // g4
        let queen = game.pieces.piece_at(Square::new(0, 3)).expect("d8 queen").id;
        let record = game
            .apply_move_to(queen, Square::new(4, 7), None)
            .expect("Qh4 is legal");

        assert!(record.creates_check);
        assert!(record.is_checkmate);
        assert_eq!(record.to_string(), "d8h4#");
        assert_eq!(game.status(), GameStatus::Checkmate(Color::White));
        assert_eq!(game.result(), GameResult::BlackWins);
        assert_eq!(game.result().as_pgn(), "0-1");
        assert!(game.all_legal_moves().is_empty());
    }

    #[test]
    fn draws_are_detected() {
        let bare = GameState::from_fen("8/8/8/4k3/8/8/8/4K3 w - - 0 1").expect("valid FEN");
        assert_eq!(
            bare.result(),
            GameResult::Draw(DrawReason::InsufficientMaterial)
        );

        let same_color_bishops =
            GameState::from_fen("8/8/8/2b1k3/8/8/3B4/4K3 w - - 0 1").expect("valid FEN");
        assert!(same_color_bishops.has_insufficient_material());
        let opposite_bishops =
            GameState::from_fen("8/8/8/3bk3/8/8/3B4/4K3 w - - 0 1").expect("valid FEN");
        assert!(!opposite_bishops.has_insufficient_material());

        let fifty = GameState::from_fen("8/8/8/4k3/8/8/8/R3K3 w - - 100 80").expect("valid FEN");
        assert_eq!(fifty.result(), GameResult::Draw(DrawReason::FiftyMoveRule));
        assert_eq!(fifty.result().as_pgn(), "1/2-1/2");

        let stalemate = GameState::from_fen("7k/5Q2/6K1/8/8/8/8/8 b - - 0 1").expect("valid FEN");
        assert_eq!(stalemate.status(), GameStatus::Stalemate(Color::Black));
        assert_eq!(stalemate.result(), GameResult::Draw(DrawReason::Stalemate));
    }

    #[test]
    fn shuffling_knights_repeats_the_position() {
        let mut game = GameState::new_game();
        let shuffle = [
            (Square::new(7, 6), Square::new(5, 5)),
            (Square::new(0, 6), Square::new(2, 5)),
            (Square::new(5, 5), Square::new(7, 6)),
            (Square::new(2, 5), Square::new(0, 6)),
        ];
        for _ in 0..2 {
            for (from, to) in shuffle {
                assert!(!game.is_threefold_repetition());
                play_uci(&mut game, from, to);
            }
        }
        assert!(game.is_threefold_repetition());
        assert_eq!(
            game.result(),
            GameResult::Draw(DrawReason::ThreefoldRepetition)
        );
    }

    #[test]
    fn reset_discards_history() {
        let mut game = GameState::new_game();
        play_uci(&mut game, Square::new(6, 4), Square::new(4, 4));
        game.reset();
        assert_eq!(game, GameState::new_game());
    }

    #[test]
    fn move_records_serialize_as_json() {
        let mut game = GameState::new_game();
        let record = play_uci(&mut game, Square::new(6, 4), Square::new(4, 4));

        let json = serde_json::to_string(&record).expect("serializable");
        let back: MoveRecord = serde_json::from_str(&json).expect("deserializable");
        assert_eq!(back, record);
        assert!(json.contains("\"timestamp\""));
    }
}
