//! Poisoned chocolate board engine
//!
//! The bar is a `rows x cols` grid where `true` marks an uneaten square.
//! Eating `(r, c)` removes every square `(i, j)` with `i >= r` and `j >= c`,
//! so the eaten region is always closed upward and rightward. The square at
//! `(0, 0)` is poisoned: whoever eats it loses.

use std::fmt;
use crate::error::{ChompError, ChompResult};
use super::player::{MatchResult, Player};

/// Seat that makes the first move on a freshly created board
pub const FIRST_MOVER: Player = Player::One;

/// Grid of chocolate squares plus whose turn it is and how the match stands
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameBoard {
    rows: usize,
    cols: usize,
    cells: Vec<Vec<bool>>,
    active: Player,
    result: MatchResult,
}

impl GameBoard {
    /// Create a fully uneaten board with [`FIRST_MOVER`] to play
    pub fn new(rows: usize, cols: usize) -> Self {
        Self::with_first_mover(rows, cols, FIRST_MOVER)
    }

    /// Create a fully uneaten board with `first` to play
    pub fn with_first_mover(rows: usize, cols: usize, first: Player) -> Self {
        Self {
            rows,
            cols,
            cells: vec![vec![true; cols]; rows],
            active: first,
            result: MatchResult::Active,
        }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Player whose turn it currently is
    pub fn active_player(&self) -> Player {
        self.active
    }

    pub fn result(&self) -> MatchResult {
        self.result
    }

    /// Whether the square at `(row, col)` is on the board and still uneaten
    pub fn is_uneaten(&self, row: usize, col: usize) -> bool {
        self.cells
            .get(row)
            .and_then(|cells| cells.get(col))
            .copied()
            .unwrap_or(false)
    }

    /// True iff `(row, col)` is inside the board and not yet eaten
    pub fn is_legal(&self, row: usize, col: usize) -> bool {
        row < self.rows && col < self.cols && self.cells[row][col]
    }

    /// Eat `(row, col)` and everything above and to the right of it.
    ///
    /// If the poisoned square is gone afterwards the mover loses; otherwise
    /// the turn passes to the other player. Illegal squares and moves after
    /// the match is decided leave the board untouched.
    pub fn apply(&mut self, row: usize, col: usize) -> ChompResult<()> {
        if !self.result.is_active() {
            return Err(ChompError::GameConcluded);
        }
        if !self.is_legal(row, col) {
            return Err(ChompError::InvalidMove { row, col });
        }

        for cells in &mut self.cells[row..] {
            for cell in &mut cells[col..] {
                *cell = false;
            }
        }

        let mover = self.active;
        if !self.cells[0][0] {
            self.result = MatchResult::Won(mover.opponent());
        } else {
            self.active = mover.opponent();
        }
        Ok(())
    }

    /// Number of squares still uneaten
    pub fn remaining(&self) -> usize {
        self.cells
            .iter()
            .map(|cells| cells.iter().filter(|cell| **cell).count())
            .sum()
    }

    /// Human-readable grid with row and column indices.
    ///
    /// Row 0, which holds the poisoned square, is printed last.
    pub fn render(&self) -> String {
        let row_width = digits(self.rows.saturating_sub(1));
        let cell_width = digits(self.cols.saturating_sub(1));

        let mut lines = Vec::with_capacity(self.rows + 1);

        let headers: Vec<String> = (0..self.cols)
            .map(|col| format!("{:>width$}", col, width = cell_width))
            .collect();
        lines.push(format!("{} {}", " ".repeat(row_width), headers.join(" ")));

        for row in (0..self.rows).rev() {
            let squares: Vec<String> = self.cells[row]
                .iter()
                .map(|cell| {
                    let mark = if *cell { "X" } else { "." };
                    format!("{:>width$}", mark, width = cell_width)
                })
                .collect();
            lines.push(format!("{:>width$} {}", row, squares.join(" "), width = row_width));
        }

        lines.join("\n")
    }
}

impl fmt::Display for GameBoard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

fn digits(n: usize) -> usize {
    n.to_string().len()
}
