use std::collections::HashMap;

use super::record::GameRecord;
use crate::config::PointsConfig;
use crate::game::{Move, Player};

/// Outcomes of the historical games that continued with a given move.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MoveTally {
    pub wins: u32,
    pub losses: u32,
    pub draws: u32,
}

/// Biases candidate moves using games that started exactly like the current one.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HistoryScorer {
    win_score: f64,
    loss_score: f64,
}

impl HistoryScorer {
    pub fn new(win_score: f64, loss_score: f64) -> Self {
        HistoryScorer {
            win_score,
            loss_score,
        }
    }

    pub fn from_points(points: &PointsConfig) -> Self {
        Self::new(points.historical_win_score, points.historical_loss_score)
    }

    /// Count, for every move that followed `prefix` in a past game, how those
    /// games ended from `side`'s point of view.
    ///
    /// Records no longer than the prefix are skipped.
    pub fn tally(
        prefix: &[Move],
        side: Player,
        records: &[GameRecord],
    ) -> HashMap<Move, MoveTally> {
        let mut tallies: HashMap<Move, MoveTally> = HashMap::new();
        for record in records {
            if record.moves.len() <= prefix.len() || !record.moves.starts_with(prefix) {
                continue;
            }
            let entry = tallies.entry(record.moves[prefix.len()]).or_default();
            match record.winner {
                Some(winner) if winner == side => entry.wins += 1,
                Some(_) => entry.losses += 1,
                None => entry.draws += 1,
            }
        }
        tallies
    }

    /// Score delta per suggested move.
    ///
    /// Scores are computed from integer tallies, so the result does not
    /// depend on the order of `records`.
    pub fn score(&self, prefix: &[Move], side: Player, records: &[GameRecord]) -> HashMap<Move, f64> {
        Self::tally(prefix, side, records)
            .into_iter()
            .map(|(mv, t)| {
                let score = f64::from(t.wins) * self.win_score - f64::from(t.losses) * self.loss_score;
                (mv, score)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn game(id: u64, winner: Option<Player>, cols: &[usize]) -> GameRecord {
        let mut heights = [0usize; 7];
        let moves = cols
            .iter()
            .map(|&col| {
                heights[col] += 1;
                Move::new(6 - heights[col], col)
            })
            .collect::<Vec<_>>();
        GameRecord {
            id,
            timestamp: 0,
            starter: Player::Human,
            winner,
            human_moves: moves.len().div_ceil(2) as u32,
            ai_moves: (moves.len() / 2) as u32,
            moves,
        }
    }

    fn records() -> Vec<GameRecord> {
        vec![
            game(1, Some(Player::Ai), &[3, 3, 4, 2]),
            game(2, Some(Player::Ai), &[3, 3, 2]),
            game(3, Some(Player::Human), &[3, 4, 4]),
            game(4, None, &[3, 2, 2]),
            game(5, Some(Player::Ai), &[2, 3, 3]),
            game(6, Some(Player::Human), &[3]),
        ]
    }

    #[test]
    fn test_scores_follow_matching_prefixes() {
        let scorer = HistoryScorer::new(5.0, 3.0);
        let prefix = [Move::new(5, 3)];
        let scores = scorer.score(&prefix, Player::Ai, &records());

        // Two AI wins continued with (4, 3), one human win with (5, 4), one draw with (5, 2).
        assert_eq!(scores.len(), 3);
        assert_eq!(scores[&Move::new(4, 3)], 10.0);
        assert_eq!(scores[&Move::new(5, 4)], -3.0);
        assert_eq!(scores[&Move::new(5, 2)], 0.0);
    }

    #[test]
    fn test_empty_prefix_matches_every_game() {
        let tallies = HistoryScorer::tally(&[], Player::Human, &records());
        let center = tallies[&Move::new(5, 3)];
        assert_eq!(center.wins, 2);
        assert_eq!(center.losses, 2);
        assert_eq!(center.draws, 1);
        assert_eq!(tallies[&Move::new(5, 2)].losses, 1);
    }

    #[test]
    fn test_short_records_are_skipped() {
        let prefix = [Move::new(5, 3), Move::new(4, 3), Move::new(5, 2)];
        // Game 2 is exactly the prefix and has no continuation.
        let scores = HistoryScorer::new(5.0, 3.0).score(&prefix, Player::Ai, &records());
        assert!(scores.is_empty());
    }

    #[test]
    fn test_no_history_gives_no_scores() {
        let scores = HistoryScorer::new(5.0, 3.0).score(&[], Player::Ai, &[]);
        assert!(scores.is_empty());
    }

    #[test]
    fn test_order_independent_and_idempotent() {
        let scorer = HistoryScorer::new(0.1, 0.7);
        let prefix = [Move::new(5, 3)];
        let forward = records();
        let mut reversed = forward.clone();
        reversed.reverse();
        let mut rotated = forward.clone();
        rotated.rotate_left(2);

        let expected = scorer.score(&prefix, Player::Ai, &forward);
        assert_eq!(scorer.score(&prefix, Player::Ai, &forward), expected);
        assert_eq!(scorer.score(&prefix, Player::Ai, &reversed), expected);
        assert_eq!(scorer.score(&prefix, Player::Ai, &rotated), expected);
    }

    #[test]
    fn test_side_to_move_flips_sign() {
        let scorer = HistoryScorer::new(1.0, 1.0);
        let prefix = [Move::new(5, 3)];
        let for_ai = scorer.score(&prefix, Player::Ai, &records());
        let for_human = scorer.score(&prefix, Player::Human, &records());
        for (mv, score) in &for_ai {
            assert_eq!(for_human[mv], -score);
        }
    }
}
