use crate::error::EngineError;
use crate::game::GameSession;
use crate::history::GameRecord;

/// Universal interface for computer opponents.
pub trait Agent {
    /// Select a column for the side to move. `history` holds finished games
    /// the agent may learn from.
    fn select_action(
        &mut self,
        session: &GameSession,
        history: &[GameRecord],
    ) -> Result<usize, EngineError>;

    /// Return the agent's display name.
    fn name(&self) -> &str;
}
