use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};

use crate::error::HistoryError;
use crate::game::{format_moves, parse_moves, Move, Player};

/// A finished game as stored in the game log.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameRecord {
    pub id: u64,
    /// Seconds since the Unix epoch.
    pub timestamp: u64,
    pub starter: Player,
    /// `None` for a draw.
    pub winner: Option<Player>,
    pub human_moves: u32,
    pub ai_moves: u32,
    pub moves: Vec<Move>,
}

impl GameRecord {
    pub fn total_moves(&self) -> usize {
        self.moves.len()
    }

    pub fn starter_won(&self) -> bool {
        self.winner == Some(self.starter)
    }
}

/// On-disk row layout. Sides use the +1 (human) / -1 (AI) / 0 (draw) encoding.
#[derive(Debug, Serialize, Deserialize)]
pub(crate) struct CsvRow {
    id: u64,
    timestamp: u64,
    starter: i8,
    winner: i8,
    human_moves: u32,
    ai_moves: u32,
    moves: String,
}

impl TryFrom<CsvRow> for GameRecord {
    type Error = HistoryError;

    fn try_from(row: CsvRow) -> Result<Self, Self::Error> {
        let starter = Player::from_sign(row.starter).ok_or(HistoryError::InvalidSide {
            id: row.id,
            value: row.starter,
        })?;
        let winner = match row.winner {
            0 => None,
            value => Some(
                Player::from_sign(value).ok_or(HistoryError::InvalidSide { id: row.id, value })?,
            ),
        };
        let moves = parse_moves(&row.moves).map_err(|_| HistoryError::MalformedMoves {
            id: row.id,
            input: row.moves.clone(),
        })?;

        Ok(GameRecord {
            id: row.id,
            timestamp: row.timestamp,
            starter,
            winner,
            human_moves: row.human_moves,
            ai_moves: row.ai_moves,
            moves,
        })
    }
}

impl From<&GameRecord> for CsvRow {
    fn from(record: &GameRecord) -> Self {
        CsvRow {
            id: record.id,
            timestamp: record.timestamp,
            starter: record.starter.sign(),
            winner: record.winner.map_or(0, Player::sign),
            human_moves: record.human_moves,
            ai_moves: record.ai_moves,
            moves: format_moves(&record.moves),
        }
    }
}

/// Current time in seconds since the Unix epoch.
pub fn unix_now() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> GameRecord {
        GameRecord {
            id: 4,
            timestamp: 1_700_000_000,
            starter: Player::Human,
            winner: Some(Player::Ai),
            human_moves: 2,
            ai_moves: 2,
            moves: vec![
                Move::new(5, 3),
                Move::new(5, 4),
                Move::new(4, 3),
                Move::new(4, 4),
            ],
        }
    }

    #[test]
    fn test_row_conversion_preserves_record() {
        let record = sample();
        let row = CsvRow::from(&record);
        assert_eq!(row.starter, 1);
        assert_eq!(row.winner, -1);
        assert_eq!(row.moves, "[(5, 3), (5, 4), (4, 3), (4, 4)]");
        assert_eq!(GameRecord::try_from(row).unwrap(), record);
    }

    #[test]
    fn test_draw_encodes_as_zero() {
        let mut record = sample();
        record.winner = None;
        let row = CsvRow::from(&record);
        assert_eq!(row.winner, 0);
        assert_eq!(GameRecord::try_from(row).unwrap().winner, None);
    }

    #[test]
    fn test_invalid_side_rejected() {
        let mut row = CsvRow::from(&sample());
        row.starter = 0;
        assert!(matches!(
            GameRecord::try_from(row),
            Err(HistoryError::InvalidSide { id: 4, value: 0 })
        ));
    }

    #[test]
    fn test_malformed_moves_rejected() {
        let mut row = CsvRow::from(&sample());
        row.moves = "[(5, 3), oops]".to_string();
        assert!(matches!(
            GameRecord::try_from(row),
            Err(HistoryError::MalformedMoves { id: 4, .. })
        ));
    }

    #[test]
    fn test_starter_won() {
        let mut record = sample();
        assert!(!record.starter_won());
        record.winner = Some(Player::Human);
        assert!(record.starter_won());
        record.winner = None;
        assert!(!record.starter_won());
        assert_eq!(record.total_moves(), 4);
    }
}
