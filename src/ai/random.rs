use crate::error::EngineError;
use crate::game::GameSession;
use crate::history::GameRecord;
use rand::rngs::StdRng;
use rand::Rng;
use rand::SeedableRng;

use super::agent::Agent;

/// An agent that selects uniformly at random from legal columns.
pub struct RandomAgent {
    rng: StdRng,
}

impl RandomAgent {
    pub fn new() -> Self {
        RandomAgent {
            rng: StdRng::from_os_rng(),
        }
    }

    /// Deterministic agent for reproducible games.
    pub fn seeded(seed: u64) -> Self {
        RandomAgent {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Default for RandomAgent {
    fn default() -> Self {
        Self::new()
    }
}

impl Agent for RandomAgent {
    fn select_action(
        &mut self,
        session: &GameSession,
        _history: &[GameRecord],
    ) -> Result<usize, EngineError> {
        let actions = session.legal_actions();
        if actions.is_empty() {
            return Err(EngineError::NoLegalMoves);
        }
        let idx = self.rng.random_range(0..actions.len());
        Ok(actions[idx])
    }

    fn name(&self) -> &str {
        "Random"
    }
}
