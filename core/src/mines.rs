use alloc::vec::Vec;
use core::ops::Index;
use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;

/// Where the mines are, as supplied by the caller.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MineLayout {
    mine_mask: Array2<bool>,
    mine_count: CellCount,
}

impl MineLayout {
    /// Wraps a mask indexed `[x, y]`.
    pub fn from_mine_mask(mine_mask: Array2<bool>) -> Self {
        let mine_count = mine_mask
            .iter()
            .filter(|&&is_mine| is_mine)
            .count()
            .try_into()
            .unwrap_or(CellCount::MAX);
        Self {
            mine_mask,
            mine_count,
        }
    }

    pub fn from_mine_coords(size: Coord2, mine_coords: &[Coord2]) -> Result<Self> {
        let mut mine_mask: Array2<bool> = Array2::default(size.to_nd_index());

        for &coords in mine_coords {
            if coords.0 >= size.0 || coords.1 >= size.1 {
                return Err(GameError::OutOfBounds);
            }
            mine_mask[coords.to_nd_index()] = true;
        }

        Ok(Self::from_mine_mask(mine_mask))
    }

    /// Builds a layout from a row-major matrix, `rows[0]` being the top row of the board.
    pub fn from_rows<R: AsRef<[bool]>>(rows: &[R], origin: Origin) -> Result<Self> {
        let width = rows.first().map_or(0, |row| row.as_ref().len());
        if width == 0 || rows.iter().any(|row| row.as_ref().len() != width) {
            return Err(GameError::InvalidBoardShape);
        }

        let (Ok(width), Ok(height)) = (Coord::try_from(width), Coord::try_from(rows.len())) else {
            return Err(GameError::InvalidDimension);
        };

        let mut mine_mask: Array2<bool> = Array2::default((width, height).to_nd_index());
        for (row, cells) in (0..height).zip(rows) {
            let y = origin.y_of_row(row, height);
            for (x, &is_mine) in (0..width).zip(cells.as_ref()) {
                mine_mask[(x, y).to_nd_index()] = is_mine;
            }
        }

        Ok(Self::from_mine_mask(mine_mask))
    }

    /// Inverse of [`MineLayout::from_rows`].
    pub fn to_rows(&self, origin: Origin) -> Vec<Vec<bool>> {
        let (width, height) = self.size();
        (0..height)
            .map(|row| {
                let y = origin.y_of_row(row, height);
                (0..width).map(|x| self[(x, y)]).collect()
            })
            .collect()
    }

    pub fn size(&self) -> Coord2 {
        let (x, y) = self.mine_mask.dim();
        (to_coord(x), to_coord(y))
    }

    pub fn mine_count(&self) -> CellCount {
        self.mine_count
    }
}

impl Index<Coord2> for MineLayout {
    type Output = bool;

    fn index(&self, coords: Coord2) -> &Self::Output {
        &self.mine_mask[coords.to_nd_index()]
    }
}
