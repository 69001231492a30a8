//! Past games: the CSV game log and the scorer that mines it for move
//! suggestions.

mod game_log;
mod record;
mod scorer;

pub use game_log::GameLog;
pub use record::{unix_now, GameRecord};
pub use scorer::{HistoryScorer, MoveTally};
