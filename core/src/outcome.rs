use core::fmt;
use serde::{Deserialize, Serialize};

use crate::*;

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameStatus {
    #[default]
    Running,
    Lost,
    Won,
}

impl GameStatus {
    pub const fn is_running(self) -> bool {
        matches!(self, Self::Running)
    }

    pub const fn is_finished(self) -> bool {
        matches!(self, Self::Won | Self::Lost)
    }

    /// Derives the status from the board alone.
    ///
    /// Any revealed mine means the game is lost, even if every safe cell is also open. Otherwise the game is won
    /// once no safe cell remains hidden; flags are not taken into account.
    pub fn evaluate(grid: &Grid) -> Self {
        let mut safe_cells_hidden = false;

        for (_, cell) in grid.iter() {
            match (cell.has_mine(), cell.is_revealed()) {
                (true, true) => return Self::Lost,
                (false, false) => safe_cells_hidden = true,
                _ => {}
            }
        }

        if safe_cells_hidden {
            Self::Running
        } else {
            Self::Won
        }
    }
}

impl fmt::Display for GameStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Running => "running",
            Self::Lost => "lost",
            Self::Won => "won",
        })
    }
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub enum MarkOutcome {
    NoChange,
    Changed,
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub enum RevealOutcome {
    NoChange,
    Revealed,
    HitMine,
    Won,
}
