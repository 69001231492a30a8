use std::io;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use crate::ai::Agent;
use crate::config::StarterChoice;
use crate::error::MoveError;
use crate::game::{GameOutcome, GameSession, Player, COLS, CENTER_COL};
use crate::history::{unix_now, GameLog};
use crossterm::event::{self, Event, KeyCode, KeyEvent};
use rand::Rng;
use ratatui::{backend::Backend, Terminal};

pub struct App {
    session: GameSession,
    agent: Box<dyn Agent>,
    log: GameLog,
    log_path: PathBuf,
    starter: StarterChoice,
    think_delay: Duration,
    ai_turn_since: Option<Instant>,
    selected_column: usize,
    should_quit: bool,
    message: Option<String>,
}

impl App {
    pub fn new(
        agent: Box<dyn Agent>,
        log: GameLog,
        log_path: PathBuf,
        starter: StarterChoice,
        think_delay: Duration,
    ) -> Self {
        let mut app = App {
            session: GameSession::new(Player::Human),
            agent,
            log,
            log_path,
            starter,
            think_delay,
            ai_turn_since: None,
            selected_column: CENTER_COL,
            should_quit: false,
            message: None,
        };
        app.new_game();
        app
    }

    pub fn session(&self) -> &GameSession {
        &self.session
    }

    pub fn log(&self) -> &GameLog {
        &self.log
    }

    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    /// Main application loop
    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> io::Result<()> {
        loop {
            terminal.draw(|f| self.render(f))?;

            if self.should_quit {
                break;
            }

            self.step_ai();
            self.handle_events()?;
        }
        Ok(())
    }

    fn new_game(&mut self) {
        let starter = match self.starter {
            StarterChoice::Human => Player::Human,
            StarterChoice::Ai => Player::Ai,
            StarterChoice::Random => {
                if rand::rng().random_bool(0.5) {
                    Player::Human
                } else {
                    Player::Ai
                }
            }
        };
        self.session = GameSession::new(starter);
        self.selected_column = CENTER_COL;
        self.ai_turn_since = None;
        self.message = Some(format!("New game! {} starts.", starter.name()));
    }

    /// Play the computer's move once the thinking delay has elapsed.
    pub fn step_ai(&mut self) {
        if self.session.current_player() != Some(Player::Ai) {
            self.ai_turn_since = None;
            return;
        }
        let since = *self.ai_turn_since.get_or_insert_with(Instant::now);
        if since.elapsed() < self.think_delay {
            return;
        }
        self.ai_turn_since = None;

        let column = match self.agent.select_action(&self.session, self.log.records()) {
            Ok(column) => column,
            Err(e) => {
                log::warn!("{} failed to move: {e}", self.agent.name());
                self.message = Some(format!("AI could not move: {e}"));
                return;
            }
        };
        match self.session.play(column) {
            Ok(_) => {
                self.message = Some(format!("AI played column {}", column + 1));
                self.finish_if_over();
            }
            Err(e) => {
                log::warn!("{} chose an illegal column {column}: {e}", self.agent.name());
                self.message = Some(format!("AI move rejected: {e}"));
            }
        }
    }

    /// Handle keyboard events
    fn handle_events(&mut self) -> io::Result<()> {
        if event::poll(Duration::from_millis(50))? {
            if let Event::Key(key) = event::read()? {
                self.handle_key(key);
            }
        }
        Ok(())
    }

    /// Handle key press
    pub fn handle_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => {
                self.should_quit = true;
            }
            KeyCode::Left => {
                self.selected_column = self.selected_column.saturating_sub(1);
            }
            KeyCode::Right => {
                if self.selected_column + 1 < COLS {
                    self.selected_column += 1;
                }
            }
            KeyCode::Char(c @ '1'..='7') => {
                self.selected_column = c as usize - '1' as usize;
                self.drop_piece();
            }
            KeyCode::Enter | KeyCode::Char(' ') => {
                self.drop_piece();
            }
            KeyCode::Char('r') => {
                self.new_game();
            }
            _ => {}
        }
    }

    /// Drop the human's piece in the selected column
    fn drop_piece(&mut self) {
        match self.session.current_player() {
            None => {
                self.message = Some("Game over! Press 'r' to restart.".to_string());
                return;
            }
            Some(Player::Ai) => {
                self.message = Some("Wait for the AI to move.".to_string());
                return;
            }
            Some(Player::Human) => {}
        }

        match self.session.play(self.selected_column) {
            Ok(_) => {
                self.message = None;
                self.finish_if_over();
            }
            Err(MoveError::ColumnFull { .. }) => {
                self.message = Some("This column is full. Choose another column.".to_string());
            }
            Err(MoveError::InvalidColumn { .. }) => {
                self.message = Some("Invalid column!".to_string());
            }
            Err(MoveError::GameOver) => {
                self.message = Some("Game is over!".to_string());
            }
        }
    }

    /// Announce the result and append the finished game to the log.
    fn finish_if_over(&mut self) {
        let Some(outcome) = self.session.outcome() else {
            return;
        };
        let announcement = match outcome {
            GameOutcome::Winner(Player::Human) => "Player wins!".to_string(),
            GameOutcome::Winner(Player::Ai) => "AI wins!".to_string(),
            GameOutcome::Draw => "The game is a draw because the board is full!".to_string(),
        };

        let Some(record) = self.session.to_record(self.log.next_id(), unix_now()) else {
            return;
        };
        let id = record.id;
        self.message = Some(match self.log.append(&self.log_path, record) {
            Ok(()) => {
                log::info!("saved game {id} to '{}'", self.log_path.display());
                format!("{announcement} Press 'r' to play again.")
            }
            Err(e) => {
                log::warn!("could not save game {id}: {e}");
                format!("{announcement} (not saved: {e})")
            }
        });
    }

    /// Render the UI
    fn render(&self, frame: &mut ratatui::Frame) {
        super::game_view::render(
            frame,
            &self.session,
            self.selected_column,
            &self.message,
            self.agent.name(),
        );
    }
}
