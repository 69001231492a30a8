//! # Heuristic Connect Four
//!
//! Connect Four against a computer opponent that scores each candidate move
//! with weighted heuristics and learns from the outcomes of past games.
//!
//! ## Modules
//!
//! - [`game`]: Board, gravity drops, win detection, game session
//! - [`ai`]: Heuristic move evaluator and the agents built on it
//! - [`history`]: CSV game log and the history-based move scorer
//! - [`stats`]: Aggregate statistics over recorded games
//! - [`ui`]: Terminal UI for playing a game
//! - [`config`]: TOML/JSON configuration loading and validation
//! - [`error`]: Structured error types

pub mod ai;
pub mod config;
pub mod error;
pub mod game;
pub mod history;
pub mod stats;
pub mod ui;
