//! Single-player Minesweeper engine.
//!
//! A [`Game`] owns a fixed-size [`Grid`], accepts a caller-supplied [`MineLayout`] and tracks reveals and flags
//! until the game is won or lost. Rendering and mine placement are left to the caller.

#![no_std]

extern crate alloc;

use serde::{Deserialize, Serialize};

pub use engine::*;
pub use error::*;
pub use grid::*;
pub use mines::*;
pub use outcome::*;
pub use tile::*;
pub use types::*;

mod engine;
mod error;
mod grid;
mod mines;
mod outcome;
mod tile;
mod types;

#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GameConfig {
    pub size: Coord2,
    #[serde(default)]
    pub origin: Origin,
}

impl GameConfig {
    pub fn new(size: Coord2) -> Result<Self> {
        Self::with_origin(size, Origin::default())
    }

    pub fn with_origin(size: Coord2, origin: Origin) -> Result<Self> {
        if size.0 == 0 || size.1 == 0 {
            return Err(GameError::InvalidDimension);
        }
        Ok(Self { size, origin })
    }
}
