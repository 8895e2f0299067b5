use ndarray::Array2;
use serde::{Deserialize, Serialize};

/// Single coordinate axis used for board width, height, and positions.
pub type Coord = u8;

/// Count type used for mine counts and total-cell counts.
pub type CellCount = u16;

/// Two-dimensional coordinates `(x, y)`.
pub type Coord2 = (Coord, Coord);

pub trait ToNdIndex {
    type Output;
    fn to_nd_index(self) -> Self::Output;
}

impl ToNdIndex for Coord2 {
    type Output = [usize; 2];

    fn to_nd_index(self) -> Self::Output {
        [self.0.into(), self.1.into()]
    }
}

/// Narrows an `ndarray` axis length or index back to a [`Coord`].
///
/// Boards are only ever built from [`Coord`] sizes, so this saturates instead of failing.
pub fn to_coord(value: usize) -> Coord {
    value.try_into().unwrap_or(Coord::MAX)
}

/// Corner of the board that holds `(0, 0)`.
///
/// Layouts and snapshots are exchanged as row-major matrices (`[height][width]`) whose first row is always the
/// top of the board. The origin decides how a matrix row maps to a `y` coordinate.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Origin {
    /// `y` grows upward, matrix row 0 is `y = height - 1`.
    #[default]
    BottomLeft,
    /// `y` grows downward, matrix row `r` is `y = r`.
    TopLeft,
}

impl Origin {
    pub const fn y_of_row(self, row: Coord, height: Coord) -> Coord {
        match self {
            Self::BottomLeft => height - 1 - row,
            Self::TopLeft => row,
        }
    }

    /// Inverse of [`Origin::y_of_row`], both mappings are involutions.
    pub const fn row_of_y(self, y: Coord, height: Coord) -> Coord {
        self.y_of_row(y, height)
    }
}

pub trait NeighborIterExt {
    fn iter_neighbors(&self, index: Coord2) -> NeighborIter;
}

impl<T> NeighborIterExt for Array2<T> {
    fn iter_neighbors(&self, index: Coord2) -> NeighborIter {
        let (x, y) = self.dim();
        NeighborIter::new(index, (to_coord(x), to_coord(y)))
    }
}

/// In-bounds cells at Chebyshev distance 1 from `center`, no wrap-around.
#[derive(Clone, Debug)]
pub struct NeighborIter {
    center: Coord2,
    bounds: Coord2,
    step: u8,
}

impl NeighborIter {
    pub fn new(center: Coord2, bounds: Coord2) -> Self {
        Self {
            center,
            bounds,
            step: 0,
        }
    }
}

/// Offsets `center` by one step of the 3x3 window, `None` when it leaves the board.
fn offset(center: Coord, delta: i8, bound: Coord) -> Option<Coord> {
    center.checked_add_signed(delta).filter(|&next| next < bound)
}

impl Iterator for NeighborIter {
    type Item = Coord2;

    fn next(&mut self) -> Option<Self::Item> {
        while self.step < 9 {
            let step = self.step;
            self.step += 1;

            // center of the window
            if step == 4 {
                continue;
            }

            let dx = (step % 3) as i8 - 1;
            let dy = (step / 3) as i8 - 1;
            let (x, y) = self.center;
            let (max_x, max_y) = self.bounds;
            if let (Some(nx), Some(ny)) = (offset(x, dx, max_x), offset(y, dy, max_y)) {
                return Some((nx, ny));
            }
        }
        None
    }
}
