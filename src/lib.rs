//! Crate root module declarations for the chess rules engine.
//!
//! This file exposes the subsystems (game state and turn management, per-piece
//! raw moves, legality filtering and classification, and position utilities)
//! so callers, tests and benches can import stable module paths.

pub mod chess_errors;

pub mod game_state {
    pub mod chess_rules;
    pub mod chess_types;
    pub mod game_state;
    pub mod move_record;
    pub mod piece_register;
    pub mod undo_state;
}

pub mod moves {
    pub mod bishop_moves;
    pub mod king_moves;
    pub mod knight_moves;
    pub mod move_descriptions;
    pub mod pawn_moves;
    pub mod queen_moves;
    pub mod rook_moves;
}

pub mod move_generation {
    pub mod legal_move_apply;
    pub mod legal_move_checks;
    pub mod legal_move_generator;
    pub mod legal_move_shared;
    pub mod move_generator;
    pub mod perft;
    pub mod raw_move_generator;
}

pub mod utils {
    pub mod algebraic;
    pub mod fen_generator;
    pub mod fen_parser;
    pub mod render_game_state;
}
