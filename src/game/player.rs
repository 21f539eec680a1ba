//! Player identities and match results

use std::fmt;
use serde::{Deserialize, Serialize};

/// One of the two seats in a match, as assigned by the relay.
///
/// Seat 0 chooses the board dimensions and moves second; seat 1 moves first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Player {
    Zero,
    One,
}

impl Player {
    /// Create a player from its wire index (0 or 1)
    pub fn from_index(index: u64) -> Option<Self> {
        match index {
            0 => Some(Player::Zero),
            1 => Some(Player::One),
            _ => None,
        }
    }

    /// Wire index of this player
    pub fn index(&self) -> u64 {
        match self {
            Player::Zero => 0,
            Player::One => 1,
        }
    }

    pub fn opponent(&self) -> Self {
        match self {
            Player::Zero => Player::One,
            Player::One => Player::Zero,
        }
    }

    /// Whether this seat is responsible for choosing the board size
    pub fn chooses_board(&self) -> bool {
        *self == Player::Zero
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Player {}", self.index())
    }
}

/// State of a match: still being played, or decided in favour of a player
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MatchResult {
    Active,
    Won(Player),
}

impl MatchResult {
    pub fn is_active(&self) -> bool {
        matches!(self, MatchResult::Active)
    }

    pub fn winner(&self) -> Option<Player> {
        match self {
            MatchResult::Active => None,
            MatchResult::Won(player) => Some(*player),
        }
    }
}
