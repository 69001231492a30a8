//! Aggregate statistics over the game log.

use std::fmt::Write;

use crate::game::{format_moves, Player, COLS};
use crate::history::GameRecord;

/// Game result to filter on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutcomeFilter {
    Human,
    Ai,
    Draw,
}

impl OutcomeFilter {
    fn matches(self, winner: Option<Player>) -> bool {
        match self {
            OutcomeFilter::Human => winner == Some(Player::Human),
            OutcomeFilter::Ai => winner == Some(Player::Ai),
            OutcomeFilter::Draw => winner.is_none(),
        }
    }
}

/// Selects records by outcome and/or starting side.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RecordFilter {
    pub outcome: Option<OutcomeFilter>,
    pub starter: Option<Player>,
}

impl RecordFilter {
    pub fn matches(&self, record: &GameRecord) -> bool {
        self.outcome.map_or(true, |o| o.matches(record.winner))
            && self.starter.map_or(true, |s| s == record.starter)
    }

    pub fn apply(&self, records: &[GameRecord]) -> Vec<GameRecord> {
        records.iter().filter(|r| self.matches(r)).cloned().collect()
    }
}

/// Totals computed from a set of finished games.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GameStats {
    pub total_games: usize,
    pub human_wins: usize,
    pub ai_wins: usize,
    pub draws: usize,
    pub starter_wins: usize,
    pub total_moves: usize,
    /// Moves played per column, both sides together.
    pub column_counts: [usize; COLS],
}

fn percent(part: usize, whole: usize) -> f64 {
    if whole == 0 {
        return 0.0;
    }
    part as f64 * 100.0 / whole as f64
}

impl GameStats {
    pub fn from_records(records: &[GameRecord]) -> Self {
        let mut stats = GameStats::default();
        for record in records {
            stats.total_games += 1;
            match record.winner {
                Some(Player::Human) => stats.human_wins += 1,
                Some(Player::Ai) => stats.ai_wins += 1,
                None => stats.draws += 1,
            }
            if record.starter_won() {
                stats.starter_wins += 1;
            }
            stats.total_moves += record.total_moves();
            for mv in &record.moves {
                match stats.column_counts.get_mut(mv.col) {
                    Some(count) => *count += 1,
                    None => log::warn!("game {} has a move in column {}", record.id, mv.col),
                }
            }
        }
        stats
    }

    pub fn wins(&self, player: Player) -> usize {
        match player {
            Player::Human => self.human_wins,
            Player::Ai => self.ai_wins,
        }
    }

    /// Percentage of games won by `player`.
    pub fn win_rate(&self, player: Player) -> f64 {
        percent(self.wins(player), self.total_games)
    }

    pub fn draw_rate(&self) -> f64 {
        percent(self.draws, self.total_games)
    }

    /// Percentage of games won by the side that moved first.
    pub fn starter_win_rate(&self) -> f64 {
        percent(self.starter_wins, self.total_games)
    }

    pub fn average_game_length(&self) -> f64 {
        if self.total_games == 0 {
            return 0.0;
        }
        self.total_moves as f64 / self.total_games as f64
    }

    /// Column with the most moves; lowest column on ties.
    pub fn most_played_column(&self) -> Option<usize> {
        let (col, &count) = self
            .column_counts
            .iter()
            .enumerate()
            .rev()
            .max_by_key(|&(_, count)| *count)?;
        (count > 0).then_some(col)
    }

    /// Plain-text report for the terminal.
    pub fn report(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "=== Game Statistics Report ===");
        let _ = writeln!(out);
        let _ = writeln!(out, "Total games: {}", self.total_games);
        if self.total_games == 0 {
            let _ = writeln!(out, "No game data available.");
            return out;
        }

        let _ = writeln!(out);
        let _ = writeln!(out, "--- Win Counts ---");
        for player in [Player::Human, Player::Ai] {
            let _ = writeln!(
                out,
                "{}: {} games ({:.2}%)",
                player.name(),
                self.wins(player),
                self.win_rate(player)
            );
        }
        let _ = writeln!(out, "Draws: {} games ({:.2}%)", self.draws, self.draw_rate());

        let _ = writeln!(out);
        let _ = writeln!(out, "Starter win rate: {:.2}%", self.starter_win_rate());
        let _ = writeln!(
            out,
            "Average number of moves per game: {:.2}",
            self.average_game_length()
        );

        let _ = writeln!(out);
        let _ = writeln!(out, "--- Most Played Columns ---");
        if let Some(col) = self.most_played_column() {
            let _ = writeln!(
                out,
                "Most played: column {} ({} moves)",
                col + 1,
                self.column_counts[col]
            );
        }
        for (col, count) in self.column_counts.iter().enumerate() {
            let _ = writeln!(out, "Column {}: {} moves", col + 1, count);
        }
        out
    }
}

fn side_label(player: Option<Player>) -> &'static str {
    player.map_or("Draw", Player::name)
}

/// One line per game, sorted by id, under a header row.
pub fn records_table(records: &[GameRecord]) -> String {
    let mut sorted: Vec<&GameRecord> = records.iter().collect();
    sorted.sort_by_key(|r| r.id);

    let mut out = String::new();
    let _ = writeln!(
        out,
        "{:>5}  {:>10}  {:<7}  {:<7}  {:>5}  {:>5}  Moves",
        "ID", "Timestamp", "Starter", "Winner", "Human", "AI"
    );
    for record in sorted {
        let _ = writeln!(
            out,
            "{:>5}  {:>10}  {:<7}  {:<7}  {:>5}  {:>5}  {}",
            record.id,
            record.timestamp,
            record.starter.name(),
            side_label(record.winner),
            record.human_moves,
            record.ai_moves,
            format_moves(&record.moves)
        );
    }
    out
}
