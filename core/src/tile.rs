use core::fmt;
use serde::{Deserialize, Serialize};

/// State of one board position as tracked by the engine.
///
/// The mine flag is copied from the accepted layout, `revealed` only ever goes from `false` to `true`, and the
/// neighbor count is filled in when a safe cell is revealed.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    has_mine: bool,
    revealed: bool,
    flagged: bool,
    neighbor_mines: Option<u8>,
}

impl Cell {
    pub const fn has_mine(self) -> bool {
        self.has_mine
    }

    pub const fn is_revealed(self) -> bool {
        self.revealed
    }

    pub const fn is_flagged(self) -> bool {
        self.flagged
    }

    /// Adjacent mine count, only known once a safe cell has been revealed.
    pub const fn neighbor_mine_count(self) -> Option<u8> {
        self.neighbor_mines
    }

    /// Whether a zero-count cascade is allowed to open this cell.
    pub const fn is_cascade_target(self) -> bool {
        !self.revealed && !self.flagged && !self.has_mine
    }

    pub const fn display_value(self) -> DisplayValue {
        use DisplayValue::*;

        match self {
            Self { revealed: false, flagged: true, .. } => Mark,
            Self { revealed: false, .. } => Blank,
            Self { has_mine: true, .. } => MineHit,
            Self {
                neighbor_mines: Some(count),
                ..
            } if count > 0 => Count(count),
            Self { .. } => Blank,
        }
    }

    pub(crate) fn set_mine(&mut self, has_mine: bool) {
        self.has_mine = has_mine;
    }

    pub(crate) fn set_flagged(&mut self, flagged: bool) {
        self.flagged = flagged;
    }

    pub(crate) fn reveal(&mut self, neighbor_mines: Option<u8>) {
        self.revealed = true;
        self.flagged = false;
        self.neighbor_mines = neighbor_mines;
    }
}

/// What a renderer shows for a cell.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum DisplayValue {
    /// Hidden and unmarked, or revealed with no adjacent mines.
    #[default]
    Blank,
    /// Hidden cell carrying a player flag.
    Mark,
    /// Revealed mine, only seen after the game is lost.
    MineHit,
    /// Revealed safe cell next to this many mines.
    Count(u8),
}

impl DisplayValue {
    pub const fn glyph(self) -> char {
        match self {
            Self::Blank => ' ',
            Self::Mark => '*',
            Self::MineHit => 'X',
            Self::Count(count) => (b'0' + count) as char,
        }
    }
}

impl fmt::Display for DisplayValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.glyph())
    }
}
