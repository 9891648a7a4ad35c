use std::thread;

use crate::chess_errors::{ChessErrors, ChessResult};
use crate::game_state::game_state::GameState;
use crate::game_state::move_record::MoveRecord;
use crate::moves::move_descriptions::MoveCandidate;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PerftCounts {
    pub nodes: usize,
    pub captures: usize,
    pub en_passant: usize,
    pub castles: usize,
    pub promotions: usize,
    pub checks: usize,
    pub checkmates: usize,
}

impl PerftCounts {
    fn merge(&mut self, rhs: PerftCounts) {
        self.nodes += rhs.nodes;
        self.captures += rhs.captures;
        self.en_passant += rhs.en_passant;
        self.castles += rhs.castles;
        self.promotions += rhs.promotions;
        self.checks += rhs.checks;
        self.checkmates += rhs.checkmates;
    }

    fn record_leaf(&mut self, record: &MoveRecord) {
        self.nodes += 1;
        if record.is_capture() {
            self.captures += 1;
        }
        if record.is_en_passant() {
            self.en_passant += 1;
        }
        if record.is_castling() {
            self.castles += 1;
        }
        if record.is_promotion() {
            self.promotions += 1;
        }
        if record.creates_check {
            self.checks += 1;
        }
        if record.is_checkmate {
            self.checkmates += 1;
        }
    }
}

/// Counts leaf nodes and leaf move events of the legal move tree below `game_state`.
pub fn perft(game_state: &GameState, depth: u8) -> ChessResult<PerftCounts> {
    let mut game = game_state.clone();
    perft_recurse(&mut game, depth)
}

/// Leaf count below each legal root move.
pub fn perft_divide(game_state: &GameState, depth: u8) -> ChessResult<Vec<(MoveCandidate, usize)>> {
    if depth == 0 {
        return Ok(Vec::new());
    }

    let mut game = game_state.clone();
    let mut out = Vec::new();
    for mv in game.all_legal_moves() {
        game.play(&mv)?;
        let counts = perft_recurse(&mut game, depth - 1)?;
        game.take_back_move()?;
        out.push((mv, counts.nodes));
    }
    Ok(out)
}

/// Same totals as `perft`, with one worker thread per root move.
pub fn perft_multi_threaded(game_state: &GameState, depth: u8) -> ChessResult<PerftCounts> {
    if depth == 0 {
        return perft(game_state, depth);
    }

    let root_moves = game_state.all_legal_moves();
    let mut handles = Vec::with_capacity(root_moves.len());

    for mv in root_moves {
        let mut game = game_state.clone();
        handles.push(thread::spawn(move || -> ChessResult<PerftCounts> {
            let record = game.play(&mv)?;
            if depth == 1 {
                let mut leaf = PerftCounts::default();
                leaf.record_leaf(&record);
                return Ok(leaf);
            }
            perft_recurse(&mut game, depth - 1)
        }));
    }

    let mut total = PerftCounts::default();
    for handle in handles {
        let local = handle
            .join()
            .map_err(|_| ChessErrors::PerftWorkerPanicked)??;
        total.merge(local);
    }

    Ok(total)
}

fn perft_recurse(game: &mut GameState, depth: u8) -> ChessResult<PerftCounts> {
    if depth == 0 {
        return Ok(PerftCounts {
            nodes: 1,
            ..PerftCounts::default()
        });
    }

    let mut total = PerftCounts::default();
    for mv in game.all_legal_moves() {
        let record = game.play(&mv)?;
        if depth == 1 {
            total.record_leaf(&record);
        } else {
            total.merge(perft_recurse(game, depth - 1)?);
        }
        game.take_back_move()?;
    }

    Ok(total)
}
