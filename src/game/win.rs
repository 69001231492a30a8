//! Four-in-a-row detection over a whole board.

use super::board::{Board, Cell, COLS, ROWS};
use super::player::Player;

/// Scan directions as (row delta, column delta): horizontal, vertical,
/// diagonal down-right, diagonal up-right.
pub(crate) const DIRECTIONS: [(isize, isize); 4] = [(0, 1), (1, 0), (1, 1), (-1, 1)];

/// Return the owner of the first four-in-a-row found, scanning cells in
/// row-major order and directions in [`DIRECTIONS`] order.
///
/// `None` means no run exists; a full board with no run is a draw, which the
/// caller detects with [`Board::is_full`].
pub fn winner(board: &Board) -> Option<Player> {
    for row in 0..ROWS {
        for col in 0..COLS {
            let Some(owner) = board.get(row, col).and_then(Cell::owner) else {
                continue;
            };
            let token = owner.to_cell();
            for &(dr, dc) in &DIRECTIONS {
                if (1..4).all(|i| board.get_offset(row, col, dr * i, dc * i) == Some(token)) {
                    return Some(owner);
                }
            }
        }
    }
    None
}
