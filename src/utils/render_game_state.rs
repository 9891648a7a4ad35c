//! Terminal-oriented board renderer.
//!
//! Draws a piece set as an 8x8 grid of FEN letters for debugging, tests and
//! diagnostics in text environments.

use crate::game_state::{chess_types::*, game_state::GameState};
use crate::game_state::piece_register::PieceRegister;
use crate::utils::fen_generator::piece_to_fen_char;

/// Render the live board of `game_state`, rank 8 at the top.
pub fn render_game_state(game_state: &GameState) -> String {
    render_pieces(&game_state.pieces)
}

/// Render any piece set, live or simulated.
pub fn render_pieces(pieces: &PieceRegister) -> String {
    let mut out = String::new();

    out.push_str("  a b c d e f g h\n");

    for row in 0..8i8 {
        let rank = char::from(b'8' - row as u8);
        out.push(rank);
        out.push(' ');

        for col in 0..8i8 {
            match pieces.piece_at(Square::new(row, col)) {
                Some(piece) => out.push(piece_to_fen_char(piece.color, piece.kind)),
                None => out.push('.'),
            }

            if col < 7 {
                out.push(' ');
            }
        }

        out.push(' ');
        out.push(rank);
        out.push('\n');
    }

    out.push_str("  a b c d e f g h");

    out
}
