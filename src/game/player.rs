use super::board::Cell;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Player {
    Human,
    Ai,
}

impl Player {
    /// Get the other player
    pub fn other(self) -> Player {
        match self {
            Player::Human => Player::Ai,
            Player::Ai => Player::Human,
        }
    }

    /// Convert player to cell type
    pub fn to_cell(self) -> Cell {
        match self {
            Player::Human => Cell::Human,
            Player::Ai => Cell::Ai,
        }
    }

    /// Integer encoding used by the game log: +1 for the human, -1 for the AI.
    pub fn sign(self) -> i8 {
        match self {
            Player::Human => 1,
            Player::Ai => -1,
        }
    }

    pub fn from_sign(value: i8) -> Option<Player> {
        match value {
            1 => Some(Player::Human),
            -1 => Some(Player::Ai),
            _ => None,
        }
    }

    /// Get player name for display
    pub fn name(self) -> &'static str {
        match self {
            Player::Human => "Player",
            Player::Ai => "AI",
        }
    }
}
