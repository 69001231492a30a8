mod agent;
pub mod heuristic;
mod random;

pub use agent::Agent;
pub use heuristic::{
    choose_ai_move, choose_move, count_alignment, evaluate_moves, select_best, HeuristicAgent,
    ScoredMove,
};
pub use random::RandomAgent;
