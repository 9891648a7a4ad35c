//! FEN-to-GameState parser.
//!
//! Builds a full game state from a Forsyth-Edwards Notation string: the piece
//! set, side to move, castling flags, en passant target and clocks. Pieces are
//! numbered in board scan order, a8 first.

use crate::chess_errors::{ChessErrors, ChessResult};
use crate::game_state::{chess_types::*, game_state::GameState};
use crate::utils::algebraic::algebraic_to_square;

pub fn parse_fen(fen: &str) -> ChessResult<GameState> {
    let invalid = |reason: &str| ChessErrors::InvalidFen {
        fen: fen.to_owned(),
        reason: reason.to_owned(),
    };

    let mut parts = fen.split_whitespace();

    let board_part = parts.next().ok_or_else(|| invalid("missing board layout"))?;
    let side_part = parts.next().ok_or_else(|| invalid("missing side to move"))?;
    let castling_part = parts.next().ok_or_else(|| invalid("missing castling rights"))?;
    let en_passant_part = parts.next().ok_or_else(|| invalid("missing en passant square"))?;
    let halfmove_part = parts.next().ok_or_else(|| invalid("missing halfmove clock"))?;
    let fullmove_part = parts.next().ok_or_else(|| invalid("missing fullmove number"))?;

    if parts.next().is_some() {
        return Err(invalid("extra trailing fields"));
    }

    let mut game_state = GameState::new_empty();

    parse_board(board_part, &mut game_state).map_err(|err| match err {
        ChessErrors::InvalidFen { reason, .. } => invalid(&reason),
        other => other,
    })?;
    game_state.side_to_move =
        parse_side_to_move(side_part).ok_or_else(|| invalid("side to move must be 'w' or 'b'"))?;
    game_state.castling_rights = parse_castling_rights(castling_part)?;
    game_state.en_passant = parse_en_passant(en_passant_part, game_state.side_to_move)?;
    game_state.halfmove_clock = halfmove_part
        .parse::<u16>()
        .map_err(|_| invalid("halfmove clock is not a number"))?;
    game_state.fullmove_number = fullmove_part
        .parse::<u16>()
        .map_err(|_| invalid("fullmove number is not a number"))?;

    game_state.mark_position_reached();
    Ok(game_state)
}

fn parse_board(board_part: &str, game_state: &mut GameState) -> ChessResult<()> {
    let board_error = |reason: &str| ChessErrors::InvalidFen {
        fen: board_part.to_owned(),
        reason: reason.to_owned(),
    };

    let ranks: Vec<&str> = board_part.split('/').collect();
    if ranks.len() != 8 {
        return Err(board_error("board layout must contain 8 ranks"));
    }

    let mut next_id = 0u8;
    for (row, rank_str) in ranks.iter().enumerate() {
        let mut col = 0i8;

        for ch in rank_str.chars() {
            if let Some(empty_count) = ch.to_digit(10) {
                if !(1..=8).contains(&empty_count) {
                    return Err(ChessErrors::InvalidFenToken(ch));
                }
                let empty_count = empty_count as i8;
                if col + empty_count > 8 {
                    return Err(board_error("rank has too many files"));
                }
                col += empty_count;
                continue;
            }

            let (color, kind) = piece_from_fen_char(ch).ok_or(ChessErrors::InvalidFenToken(ch))?;
            if col >= 8 {
                return Err(board_error("rank has too many files"));
            }

            let square = Square::new(row as i8, col);
            game_state
                .pieces
                .insert(Piece::new(PieceId(next_id), kind, color, square))?;
            next_id = next_id.saturating_add(1);
            col += 1;
        }

        if col != 8 {
            return Err(board_error("rank does not sum to 8 files"));
        }
    }

    Ok(())
}

fn parse_side_to_move(side_part: &str) -> Option<Color> {
    match side_part {
        "w" => Some(Color::White),
        "b" => Some(Color::Black),
        _ => None,
    }
}

/// Maps the `KQkq` field onto moved flags. A color with neither letter is
/// treated as having moved its king.
fn parse_castling_rights(castling_part: &str) -> ChessResult<CastlingRights> {
    let mut rights = CastlingRights::NONE;
    if castling_part == "-" {
        return Ok(rights);
    }

    for ch in castling_part.chars() {
        let (color, side) = match ch {
            'K' => (Color::White, CastlingSide::Kingside),
            'Q' => (Color::White, CastlingSide::Queenside),
            'k' => (Color::Black, CastlingSide::Kingside),
            'q' => (Color::Black, CastlingSide::Queenside),
            _ => return Err(ChessErrors::InvalidFenToken(ch)),
        };
        let flags = rights.side_mut(color);
        flags.king_moved = false;
        match side {
            CastlingSide::Kingside => flags.rook_h_moved = false,
            CastlingSide::Queenside => flags.rook_a_moved = false,
        }
    }

    Ok(rights)
}

fn parse_en_passant(
    en_passant_part: &str,
    side_to_move: Color,
) -> ChessResult<Option<EnPassantTarget>> {
    if en_passant_part == "-" {
        return Ok(None);
    }

    let square = algebraic_to_square(en_passant_part)?;
    Ok(Some(EnPassantTarget {
        square,
        available_for: side_to_move,
    }))
}

fn piece_from_fen_char(ch: char) -> Option<(Color, PieceKind)> {
    let color = if ch.is_ascii_uppercase() {
        Color::White
    } else if ch.is_ascii_lowercase() {
        Color::Black
    } else {
        return None;
    };

    let kind = match ch.to_ascii_lowercase() {
        'p' => PieceKind::Pawn,
        'n' => PieceKind::Knight,
        'b' => PieceKind::Bishop,
        'r' => PieceKind::Rook,
        'q' => PieceKind::Queen,
        'k' => PieceKind::King,
        _ => return None,
    };

    Some((color, kind))
}
