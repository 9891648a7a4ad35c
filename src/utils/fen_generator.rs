use crate::game_state::{chess_types::*, game_state::GameState};
use crate::game_state::piece_register::PieceRegister;

pub fn generate_fen(game_state: &GameState) -> String {
    format!(
        "{} {} {}",
        position_key(game_state),
        game_state.halfmove_clock,
        game_state.fullmove_number
    )
}

/// The first four FEN fields: everything that identifies a position for repetition.
pub fn position_key(game_state: &GameState) -> String {
    let side_to_move = match game_state.side_to_move {
        Color::White => "w",
        Color::Black => "b",
    };
    format!(
        "{} {} {} {}",
        generate_board_field(&game_state.pieces),
        side_to_move,
        generate_castling_field(game_state.castling_rights),
        generate_en_passant_field(game_state.en_passant)
    )
}

fn generate_board_field(pieces: &PieceRegister) -> String {
    let mut out = String::new();

    for row in 0..8i8 {
        let mut empty_count = 0u8;

        for col in 0..8i8 {
            if let Some(piece) = pieces.piece_at(Square::new(row, col)) {
                if empty_count > 0 {
                    out.push(char::from(b'0' + empty_count));
                    empty_count = 0;
                }
                out.push(piece_to_fen_char(piece.color, piece.kind));
            } else {
                empty_count += 1;
            }
        }

        if empty_count > 0 {
            out.push(char::from(b'0' + empty_count));
        }

        if row < 7 {
            out.push('/');
        }
    }

    out
}

pub(crate) fn piece_to_fen_char(color: Color, kind: PieceKind) -> char {
    let base = match kind {
        PieceKind::Pawn => 'p',
        PieceKind::Knight => 'n',
        PieceKind::Bishop => 'b',
        PieceKind::Rook => 'r',
        PieceKind::Queen => 'q',
        PieceKind::King => 'k',
    };

    match color {
        Color::White => base.to_ascii_uppercase(),
        Color::Black => base,
    }
}

fn generate_castling_field(rights: CastlingRights) -> String {
    let mut out = String::new();

    for (color, side, ch) in [
        (Color::White, CastlingSide::Kingside, 'K'),
        (Color::White, CastlingSide::Queenside, 'Q'),
        (Color::Black, CastlingSide::Kingside, 'k'),
        (Color::Black, CastlingSide::Queenside, 'q'),
    ] {
        if rights.may_castle(color, side) {
            out.push(ch);
        }
    }

    if out.is_empty() {
        out.push('-');
    }

    out
}

fn generate_en_passant_field(target: Option<EnPassantTarget>) -> String {
    match target {
        Some(target) if target.square.is_on_board() => target.square.to_string(),
        _ => "-".to_owned(),
    }
}
