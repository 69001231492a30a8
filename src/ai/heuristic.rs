//! Single-ply move evaluation.
//!
//! Every legal drop is scored independently as the sum of:
//!
//! 1. `immediate_win` when the drop wins on the spot (no other term is added,
//!    and such a move is always preferred),
//! 2. `block_opponent_win` when the opponent would win by dropping there,
//! 3. minus `avoid_giving_win` when, after the drop, some opponent reply wins,
//! 4. the longest line through the cell for each side, scaled by
//!    `ai_alignment_score` and `player_alignment_score`,
//! 5. `central_column_preference - |3 - col|`,
//! 6. the history score for the move.
//!
//! The highest total wins; ties go to the lowest column.

use std::collections::HashMap;

use crate::config::PointsConfig;
use crate::error::EngineError;
use crate::game::win::DIRECTIONS;
use crate::game::{legal_moves, Board, GameSession, Move, Player, CENTER_COL};
use crate::history::{GameRecord, HistoryScorer};

use super::agent::Agent;

/// A candidate move and its accumulated score for one turn.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoredMove {
    pub mv: Move,
    pub score: f64,
    /// The move wins immediately.
    pub decisive: bool,
}

/// Longest run of `player` tokens through (`row`, `col`), counting the cell
/// itself and at most three neighbours on each side, over the four axes.
pub fn count_alignment(board: &Board, row: usize, col: usize, player: Player) -> usize {
    let token = player.to_cell();
    DIRECTIONS
        .iter()
        .map(|&(dr, dc)| {
            let mut total = 1;
            for sign in [1, -1] {
                for step in 1..=3 {
                    if board.get_offset(row, col, dr * sign * step, dc * sign * step) == Some(token) {
                        total += 1;
                    } else {
                        break;
                    }
                }
            }
            total
        })
        .max()
        .unwrap_or(1)
}

/// Whether any single `opponent` drop on `board` wins.
fn opponent_can_win(board: &Board, opponent: Player) -> bool {
    board.legal_columns().into_iter().any(|col| {
        let mut reply = *board;
        reply.drop_piece(col, opponent).is_ok() && reply.winner() == Some(opponent)
    })
}

fn score_candidate(
    board: &Board,
    mv: Move,
    player: Player,
    points: &PointsConfig,
    history: &HashMap<Move, f64>,
) -> Option<ScoredMove> {
    let opponent = player.other();

    let mut own = *board;
    own.drop_piece(mv.col, player).ok()?;
    if own.winner() == Some(player) {
        return Some(ScoredMove {
            mv,
            score: points.immediate_win,
            decisive: true,
        });
    }

    let mut score = 0.0;

    let mut theirs = *board;
    theirs.drop_piece(mv.col, opponent).ok()?;
    if theirs.winner() == Some(opponent) {
        score += points.block_opponent_win;
    }

    if opponent_can_win(&own, opponent) {
        score -= points.avoid_giving_win;
    }

    score += count_alignment(board, mv.row, mv.col, player) as f64 * points.ai_alignment_score;
    score +=
        count_alignment(board, mv.row, mv.col, opponent) as f64 * points.player_alignment_score;

    score += points.central_column_preference - CENTER_COL.abs_diff(mv.col) as f64;

    score += history.get(&mv).copied().unwrap_or(0.0);

    Some(ScoredMove {
        mv,
        score,
        decisive: false,
    })
}

/// Score every legal move for `player`, in ascending column order.
pub fn evaluate_moves(
    board: &Board,
    prefix: &[Move],
    player: Player,
    points: &PointsConfig,
    records: &[GameRecord],
) -> Vec<ScoredMove> {
    let history = HistoryScorer::from_points(points).score(prefix, player, records);
    legal_moves(board)
        .into_iter()
        .filter_map(|mv| score_candidate(board, mv, player, points, &history))
        .collect()
}

/// Pick the move to play: the first immediate win if there is one, otherwise
/// the first candidate with the strictly highest score.
pub fn select_best(scored: &[ScoredMove]) -> Option<&ScoredMove> {
    if let Some(win) = scored.iter().find(|s| s.decisive) {
        return Some(win);
    }
    let mut best: Option<&ScoredMove> = None;
    for candidate in scored {
        if best.map_or(true, |b| candidate.score > b.score) {
            best = Some(candidate);
        }
    }
    best
}

/// Choose `player`'s move on `board` given the moves played so far.
pub fn choose_move(
    board: &Board,
    moves: &[Move],
    player: Player,
    points: &PointsConfig,
    records: &[GameRecord],
) -> Result<Move, EngineError> {
    let scored = evaluate_moves(board, moves, player, points, records);
    for s in &scored {
        log::debug!("candidate {} scored {:.2}{}", s.mv, s.score, if s.decisive { " (win)" } else { "" });
    }
    let best = select_best(&scored).ok_or(EngineError::NoLegalMoves)?;
    log::debug!("{} plays {}", player.name(), best.mv);
    Ok(best.mv)
}

/// Choose the computer's move.
pub fn choose_ai_move(
    board: &Board,
    moves: &[Move],
    points: &PointsConfig,
    records: &[GameRecord],
) -> Result<Move, EngineError> {
    choose_move(board, moves, Player::Ai, points, records)
}

/// Agent that plays the heuristic move for whichever side is to move.
pub struct HeuristicAgent {
    points: PointsConfig,
}

impl HeuristicAgent {
    pub fn new(points: PointsConfig) -> Self {
        HeuristicAgent { points }
    }
}

impl Agent for HeuristicAgent {
    fn select_action(
        &mut self,
        session: &GameSession,
        history: &[GameRecord],
    ) -> Result<usize, EngineError> {
        let player = session.current_player().ok_or(EngineError::NoLegalMoves)?;
        choose_move(session.board(), session.moves(), player, &self.points, history)
            .map(|mv| mv.col)
    }

    fn name(&self) -> &str {
        "Heuristic"
    }
}
