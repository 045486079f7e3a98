//! Built-in random-move collaborator.
//!
//! Picks uniformly among the legal moves of the encoded position. Stands in
//! for an external search program when none is configured, and gives tests a
//! collaborator that needs no subprocess.

use rand::prelude::IndexedRandom;
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::engines::engine_trait::{
    CollaboratorError, CollaboratorResult, SearchEngine, SearchOutput, SearchParams,
};
use crate::game_state::game_state::GameState;
use crate::move_generation::legal_move_generator::all_legal_moves;
use crate::utils::long_algebraic::move_to_long_algebraic;

pub struct RandomEngine {
    rng: StdRng,
}

impl RandomEngine {
    pub fn new() -> Self {
        Self::with_seed(rand::random::<u64>())
    }

    /// Deterministic move choice, for reproducible games and tests.
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Default for RandomEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl SearchEngine for RandomEngine {
    fn name(&self) -> &str {
        "Random Mover"
    }

    fn choose_move(&mut self, fen: &str, params: &SearchParams) -> CollaboratorResult<SearchOutput> {
        let mut game_state = GameState::from_fen(fen).map_err(CollaboratorError::Protocol)?;
        let legal_moves = all_legal_moves(&mut game_state);

        let mut out = SearchOutput::default();
        out.info_lines.push(format!(
            "info string random_engine legal_moves {}",
            legal_moves.len()
        ));
        if let Some(depth) = params.depth {
            out.info_lines
                .push(format!("info string random_engine requested_depth {depth}"));
        }

        let Some(picked) = legal_moves.as_slice().choose(&mut self.rng) else {
            return Ok(out);
        };

        out.best_move = Some(move_to_long_algebraic(*picked).map_err(CollaboratorError::Protocol)?);
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::RandomEngine;
    use crate::engines::engine_trait::{CollaboratorError, SearchEngine, SearchParams};
    use crate::game_state::game_state::GameState;
    use crate::move_generation::legal_move_generator::is_legal_move;
    use crate::utils::long_algebraic::long_algebraic_to_move;

    #[test]
    fn proposes_a_legal_move() {
        let mut engine = RandomEngine::with_seed(7);
        let fen = GameState::starting_fen();
        for _ in 0..10 {
            let out = engine
                .choose_move(fen, &SearchParams::default())
                .expect("random engine should answer");
            let text = out.best_move.expect("start position has moves");
            let mv = long_algebraic_to_move(&text).expect("engine output should decode");
            let mut game = GameState::new_game();
            assert!(is_legal_move(&mut game, mv), "{text} is not legal");
        }
    }

    #[test]
    fn same_seed_same_choice() {
        let fen = "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1";
        let params = SearchParams::default();
        let a = RandomEngine::with_seed(42).choose_move(fen, &params).expect("answer");
        let b = RandomEngine::with_seed(42).choose_move(fen, &params).expect("answer");
        assert_eq!(a.best_move, b.best_move);
    }

    #[test]
    fn no_move_in_checkmate() {
        let fen = "rnb1kbnr/pppp1ppp/8/4p3/6Pq/5P2/PPPPP2P/RNBQKBNR w KQkq - 1 3";
        let out = RandomEngine::with_seed(1)
            .choose_move(fen, &SearchParams::default())
            .expect("answer");
        assert_eq!(out.best_move, None);
    }

    #[test]
    fn bad_position_is_a_protocol_error() {
        let err = RandomEngine::with_seed(1)
            .choose_move("not a position", &SearchParams::default())
            .expect_err("garbage should be rejected");
        assert!(matches!(err, CollaboratorError::Protocol(_)));
    }
}
