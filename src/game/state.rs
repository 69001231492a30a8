use super::{Board, Move, Player};
use crate::error::MoveError;
use crate::history::GameRecord;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameOutcome {
    Winner(Player),
    Draw,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameStatus {
    AwaitingMove(Player),
    Won(Player),
    Draw,
}

/// One game in progress: the live board, the ordered move history and whose
/// turn it is.
#[derive(Debug, Clone, PartialEq)]
pub struct GameSession {
    board: Board,
    moves: Vec<Move>,
    starter: Player,
    status: GameStatus,
    human_moves: u32,
    ai_moves: u32,
}

impl GameSession {
    /// Create an empty game where `starter` moves first
    pub fn new(starter: Player) -> Self {
        GameSession {
            board: Board::new(),
            moves: Vec::new(),
            starter,
            status: GameStatus::AwaitingMove(starter),
            human_moves: 0,
            ai_moves: 0,
        }
    }

    /// Player to move, `None` once the game is over
    pub fn current_player(&self) -> Option<Player> {
        match self.status {
            GameStatus::AwaitingMove(player) => Some(player),
            GameStatus::Won(_) | GameStatus::Draw => None,
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Moves played so far, in order
    pub fn moves(&self) -> &[Move] {
        &self.moves
    }

    pub fn starter(&self) -> Player {
        self.starter
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    /// Get game outcome if game is over
    pub fn outcome(&self) -> Option<GameOutcome> {
        match self.status {
            GameStatus::AwaitingMove(_) => None,
            GameStatus::Won(player) => Some(GameOutcome::Winner(player)),
            GameStatus::Draw => Some(GameOutcome::Draw),
        }
    }

    pub fn is_terminal(&self) -> bool {
        self.outcome().is_some()
    }

    /// Get list of legal columns (not full)
    pub fn legal_actions(&self) -> Vec<usize> {
        if self.is_terminal() {
            return Vec::new();
        }
        self.board.legal_columns()
    }

    pub fn moves_played(&self, player: Player) -> u32 {
        match player {
            Player::Human => self.human_moves,
            Player::Ai => self.ai_moves,
        }
    }

    /// Drop the current player's token in `column` and advance the game.
    pub fn play(&mut self, column: usize) -> Result<Move, MoveError> {
        let player = self.current_player().ok_or(MoveError::GameOver)?;

        let row = self.board.drop_piece(column, player)?;
        let mv = Move::new(row, column);
        self.moves.push(mv);
        match player {
            Player::Human => self.human_moves += 1,
            Player::Ai => self.ai_moves += 1,
        }

        self.status = if self.board.winner() == Some(player) {
            GameStatus::Won(player)
        } else if self.board.is_full() {
            GameStatus::Draw
        } else {
            GameStatus::AwaitingMove(player.other())
        };

        Ok(mv)
    }

    /// Persistable record of a finished game, `None` while still in play.
    pub fn to_record(&self, id: u64, timestamp: u64) -> Option<GameRecord> {
        let winner = match self.outcome()? {
            GameOutcome::Winner(player) => Some(player),
            GameOutcome::Draw => None,
        };
        Some(GameRecord {
            id,
            timestamp,
            starter: self.starter,
            winner,
            human_moves: self.human_moves,
            ai_moves: self.ai_moves,
            moves: self.moves.clone(),
        })
    }
}
