use core::ops::{Index, IndexMut};
use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;

/// Fixed-size board of [`Cell`]s, indexed by `(x, y)`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Grid {
    cells: Array2<Cell>,
}

impl Grid {
    /// Creates an all-hidden, unflagged, mine-free board.
    pub fn new(size: Coord2) -> Result<Self> {
        if size.0 == 0 || size.1 == 0 {
            return Err(GameError::InvalidDimension);
        }

        Ok(Self {
            cells: Array2::default(size.to_nd_index()),
        })
    }

    pub fn size(&self) -> Coord2 {
        let (x, y) = self.cells.dim();
        (to_coord(x), to_coord(y))
    }

    pub fn contains(&self, (x, y): Coord2) -> bool {
        let (width, height) = self.size();
        x < width && y < height
    }

    pub fn validate_coords(&self, coords: Coord2) -> Result<Coord2> {
        if self.contains(coords) {
            Ok(coords)
        } else {
            Err(GameError::OutOfBounds)
        }
    }

    pub fn cell_at(&self, coords: Coord2) -> Result<Cell> {
        self.validate_coords(coords).map(|coords| self[coords])
    }

    pub fn iter_neighbors(&self, coords: Coord2) -> NeighborIter {
        self.cells.iter_neighbors(coords)
    }

    /// Every cell together with its coordinates.
    pub fn iter(&self) -> impl Iterator<Item = (Coord2, Cell)> + '_ {
        self.cells
            .indexed_iter()
            .map(|((x, y), &cell)| ((to_coord(x), to_coord(y)), cell))
    }

    pub fn adjacent_mine_count(&self, coords: Coord2) -> u8 {
        // at most 8 neighbors
        self.iter_neighbors(coords)
            .filter(|&pos| self[pos].has_mine())
            .count()
            .try_into()
            .unwrap_or(u8::MAX)
    }

    /// Copies the layout's mines onto the cells. Only valid before any cell is revealed.
    pub(crate) fn apply_mines(&mut self, layout: &MineLayout) {
        for ((x, y), cell) in self.cells.indexed_iter_mut() {
            cell.set_mine(layout[(to_coord(x), to_coord(y))]);
        }
    }
}

impl Index<Coord2> for Grid {
    type Output = Cell;

    fn index(&self, coords: Coord2) -> &Self::Output {
        &self.cells[coords.to_nd_index()]
    }
}

impl IndexMut<Coord2> for Grid {
    fn index_mut(&mut self, coords: Coord2) -> &mut Self::Output {
        &mut self.cells[coords.to_nd_index()]
    }
}
