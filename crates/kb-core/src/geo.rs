//! Integer grid coordinates.
//!
//! The kitchen floor is a small rectangular grid; every agent and station
//! occupies exactly one cell.  Distances are Manhattan because agents move in
//! four directions only.

use std::fmt;

/// A cell on the kitchen grid.  `(0, 0)` is the top-left corner.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GridPos {
    pub x: i32,
    pub y: i32,
}

impl GridPos {
    #[inline]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Manhattan (L1) distance in cells.
    #[inline]
    pub fn manhattan(self, other: GridPos) -> u32 {
        self.x.abs_diff(other.x) + self.y.abs_diff(other.y)
    }

    /// The four orthogonal neighbours in a fixed order: +y, -y, +x, -x.
    ///
    /// Adjacent-cell selection and
    /// pathfinding tie-breaks depend on this order.  Bounds are not checked.
    #[inline]
    pub fn neighbors(self) -> [GridPos; 4] {
        [
            GridPos::new(self.x, self.y + 1),
            GridPos::new(self.x, self.y - 1),
            GridPos::new(self.x + 1, self.y),
            GridPos::new(self.x - 1, self.y),
        ]
    }

    /// `true` if `other` is at most one orthogonal step away (or equal).
    #[inline]
    pub fn is_adjacent_or_same(self, other: GridPos) -> bool {
        self.manhattan(other) <= 1
    }
}

impl From<(i32, i32)> for GridPos {
    fn from((x, y): (i32, i32)) -> Self {
        GridPos::new(x, y)
    }
}

impl fmt::Display for GridPos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}
