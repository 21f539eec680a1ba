//! Per-match session owned by the turn coordinator

use crate::error::{ChompError, ChompResult};
use super::board::GameBoard;
use super::player::{MatchResult, Player};

/// A single match as seen from the local seat.
///
/// Created once the board dimensions are known and mutated in place until
/// the match is decided. Only the turn coordinator holds one.
#[derive(Debug, Clone)]
pub struct GameSession {
    board: GameBoard,
    local_role: Player,
}

impl GameSession {
    pub fn new(rows: usize, cols: usize, local_role: Player) -> Self {
        Self {
            board: GameBoard::new(rows, cols),
            local_role,
        }
    }

    pub fn board(&self) -> &GameBoard {
        &self.board
    }

    pub fn local_role(&self) -> Player {
        self.local_role
    }

    pub fn active_player(&self) -> Player {
        self.board.active_player()
    }

    pub fn result(&self) -> MatchResult {
        self.board.result()
    }

    pub fn is_active(&self) -> bool {
        self.board.result().is_active()
    }

    /// Whether the board expects the local seat to move next
    pub fn is_local_turn(&self) -> bool {
        self.is_active() && self.board.active_player() == self.local_role
    }

    /// Play a move for the local seat
    pub fn apply_local(&mut self, row: usize, col: usize) -> ChompResult<()> {
        self.apply_for(self.local_role, row, col)
    }

    /// Play a move announced by the opponent
    pub fn apply_remote(&mut self, row: usize, col: usize) -> ChompResult<()> {
        self.apply_for(self.local_role.opponent(), row, col)
    }

    fn apply_for(&mut self, mover: Player, row: usize, col: usize) -> ChompResult<()> {
        if !self.is_active() {
            return Err(ChompError::GameConcluded);
        }
        if self.board.active_player() != mover {
            return Err(ChompError::InvalidInput(format!(
                "{} moved out of turn",
                mover
            )));
        }
        self.board.apply(row, col)
    }
}
