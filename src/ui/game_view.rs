use crate::game::{Board, Cell, GameOutcome, GameSession, Player, COLS, ROWS};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

fn player_color(player: Player) -> Color {
    match player {
        Player::Human => Color::Yellow,
        Player::Ai => Color::Red,
    }
}

pub fn render(
    frame: &mut Frame,
    session: &GameSession,
    selected_column: usize,
    message: &Option<String>,
    opponent: &str,
) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(15),   // Board
            Constraint::Length(3), // Message
            Constraint::Length(4), // Controls
        ])
        .split(frame.area());

    render_header(frame, session, opponent, chunks[0]);
    render_board(frame, session.board(), selected_column, chunks[1]);
    render_message(frame, message, chunks[2]);
    render_controls(frame, chunks[3]);
}

fn render_header(frame: &mut Frame, session: &GameSession, opponent: &str, area: Rect) {
    let (status, color) = match (session.current_player(), session.outcome()) {
        (Some(Player::Human), _) => ("Your turn".to_string(), player_color(Player::Human)),
        (Some(Player::Ai), _) => ("AI is thinking...".to_string(), player_color(Player::Ai)),
        (None, Some(GameOutcome::Winner(p))) => (format!("{} wins", p.name()), player_color(p)),
        (None, _) => ("Draw".to_string(), Color::White),
    };

    let header = Paragraph::new(format!("{status}  |  vs {opponent} AI"))
        .style(Style::default().fg(color).add_modifier(Modifier::BOLD))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).title("Connect Four"));

    frame.render_widget(header, area);
}

fn render_board(frame: &mut Frame, board: &Board, selected_column: usize, area: Rect) {
    let mut lines = Vec::new();

    let mut col_line = vec![Span::raw("   ")];
    for col in 0..COLS {
        let label = format!(" {} ", col + 1);
        if col == selected_column {
            col_line.push(Span::styled(
                label,
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
            ));
        } else {
            col_line.push(Span::raw(label));
        }
    }
    col_line.push(Span::raw("  "));
    lines.push(Line::from(col_line));

    lines.push(Line::from("  ╔══════════════════════╗"));

    for row in 0..ROWS {
        let mut row_spans = vec![Span::raw("  ║")];
        for col in 0..COLS {
            let (symbol, color) = match board.get(row, col).unwrap_or_default() {
                Cell::Empty => (" . ", Color::DarkGray),
                Cell::Human => (" ● ", player_color(Player::Human)),
                Cell::Ai => (" ● ", player_color(Player::Ai)),
            };
            row_spans.push(Span::styled(symbol, Style::default().fg(color)));
        }
        row_spans.push(Span::raw(" ║"));
        lines.push(Line::from(row_spans));
    }

    lines.push(Line::from("  ╚══════════════════════╝"));

    let mut indicator_line = vec![Span::raw("   ")];
    for col in 0..COLS {
        if col == selected_column {
            indicator_line.push(Span::styled(" ▲ ", Style::default().fg(Color::Cyan)));
        } else {
            indicator_line.push(Span::raw("   "));
        }
    }
    indicator_line.push(Span::raw("  "));
    lines.push(Line::from(indicator_line));

    frame.render_widget(Paragraph::new(lines).alignment(Alignment::Center), area);
}

fn render_message(frame: &mut Frame, message: &Option<String>, area: Rect) {
    let text = message.as_deref().unwrap_or("");
    let msg_widget = Paragraph::new(text)
        .style(Style::default().fg(Color::Yellow))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));

    frame.render_widget(msg_widget, area);
}

fn render_controls(frame: &mut Frame, area: Rect) {
    let line1 = Line::from("←/→: Move  |  Enter/1-7: Drop  |  R: Restart  |  Q: Quit");
    let line2 = Line::from(vec![
        Span::styled(
            "Player",
            Style::default()
                .fg(player_color(Player::Human))
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw(" = yellow   "),
        Span::styled(
            "AI",
            Style::default()
                .fg(player_color(Player::Ai))
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw(" = red"),
    ]);

    let controls = Paragraph::new(vec![line1, line2])
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).title("Controls"));

    frame.render_widget(controls, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::{backend::TestBackend, Terminal};

    fn screen(session: &GameSession, message: Option<String>) -> String {
        let mut terminal = Terminal::new(TestBackend::new(70, 30)).unwrap();
        terminal
            .draw(|f| render(f, session, 3, &message, "Heuristic"))
            .unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect()
    }

    #[test]
    fn test_render_turn_and_message() {
        let mut session = GameSession::new(Player::Human);
        let text = screen(&session, Some("AI played column 4".to_string()));
        assert!(text.contains("Your turn"));
        assert!(text.contains("vs Heuristic AI"));
        assert!(text.contains("AI played column 4"));

        session.play(3).unwrap();
        assert!(screen(&session, None).contains("AI is thinking..."));
    }

    #[test]
    fn test_render_winner() {
        let mut session = GameSession::new(Player::Human);
        for col in [0, 6, 1, 6, 2, 6, 3] {
            session.play(col).unwrap();
        }
        assert!(screen(&session, None).contains("Player wins"));
    }
}
