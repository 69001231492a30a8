use std::fmt;

use super::board::{Board, COLS, ROWS};

/// Where a token landed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Move {
    pub row: usize,
    pub col: usize,
}

impl Move {
    pub fn new(row: usize, col: usize) -> Self {
        Move { row, col }
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// One candidate per non-full column, in ascending column order.
pub fn legal_moves(board: &Board) -> Vec<Move> {
    (0..COLS)
        .filter_map(|col| board.landing_row(col).map(|row| Move::new(row, col)))
        .collect()
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid move list: {0:?}")]
pub struct ParseMovesError(pub String);

/// Format a move list as `[(5, 3), (4, 3)]`.
pub fn format_moves(moves: &[Move]) -> String {
    let body = moves
        .iter()
        .map(Move::to_string)
        .collect::<Vec<_>>()
        .join(", ");
    format!("[{body}]")
}

/// Parse the output of [`format_moves`]. Whitespace around tokens is ignored
/// and coordinates must lie on the board.
pub fn parse_moves(input: &str) -> Result<Vec<Move>, ParseMovesError> {
    let err = || ParseMovesError(input.to_string());

    let body = input
        .trim()
        .strip_prefix('[')
        .and_then(|s| s.strip_suffix(']'))
        .ok_or_else(err)?;

    let mut moves = Vec::new();
    let mut rest = body.trim();
    while !rest.is_empty() {
        let (pair, tail) = rest
            .strip_prefix('(')
            .and_then(|s| s.split_once(')'))
            .ok_or_else(err)?;
        let (row, col) = pair.split_once(',').ok_or_else(err)?;
        let row: usize = row.trim().parse().map_err(|_| err())?;
        let col: usize = col.trim().parse().map_err(|_| err())?;
        if row >= ROWS || col >= COLS {
            return Err(err());
        }
        moves.push(Move::new(row, col));

        rest = tail.trim_start();
        if let Some(next) = rest.strip_prefix(',') {
            rest = next.trim_start();
            if rest.is_empty() {
                return Err(err());
            }
        } else if !rest.is_empty() {
            return Err(err());
        }
    }
    Ok(moves)
}
