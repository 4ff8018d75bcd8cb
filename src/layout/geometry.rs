//! Grid rectangles and cell masks for box placement

use std::fmt;

use bitvec::prelude::*;
use serde::{Deserialize, Serialize};

use crate::io::configuration::{GRID_H, GRID_W};

/// Number of cells on a page grid
pub const GRID_CELLS: usize = (GRID_W * GRID_H) as usize;

/// Cell-aligned rectangle covering `[x, x + width) × [y, y + height)`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rect {
    /// Leftmost column
    pub x: u32,
    /// Topmost row
    pub y: u32,
    /// Number of columns covered
    pub width: u32,
    /// Number of rows covered
    pub height: u32,
}

impl Rect {
    /// Create a rectangle from origin and size
    pub const fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Same size at a different origin
    #[must_use]
    pub const fn moved_to(self, x: u32, y: u32) -> Self {
        Self { x, y, ..self }
    }

    /// Same origin with a different size
    #[must_use]
    pub const fn resized_to(self, width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            ..self
        }
    }

    /// Whether the rectangle covers at least one cell
    pub const fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Exclusive right edge, `None` on overflow
    pub const fn right(&self) -> Option<u32> {
        self.x.checked_add(self.width)
    }

    /// Exclusive bottom edge, `None` on overflow
    pub const fn bottom(&self) -> Option<u32> {
        self.y.checked_add(self.height)
    }

    /// Whether the whole rectangle lies on the page grid
    pub fn fits_grid(&self) -> bool {
        matches!((self.right(), self.bottom()), (Some(right), Some(bottom)) if right <= GRID_W && bottom <= GRID_H)
    }

    /// Half-open overlap test on both axes
    pub fn intersects(&self, other: &Self) -> bool {
        if self.is_empty() || other.is_empty() {
            return false;
        }
        let (Some(right), Some(bottom), Some(other_right), Some(other_bottom)) =
            (self.right(), self.bottom(), other.right(), other.bottom())
        else {
            return false;
        };

        self.x < other_right && other.x < right && self.y < other_bottom && other.y < bottom
    }

    /// Whether the cell at `column`, `row` lies inside the rectangle
    pub fn contains_cell(&self, column: u32, row: u32) -> bool {
        matches!((self.right(), self.bottom()), (Some(right), Some(bottom))
            if column >= self.x && column < right && row >= self.y && row < bottom)
    }

    /// All `(column, row)` cells covered, row by row
    pub fn cells(&self) -> impl Iterator<Item = (u32, u32)> + '_ {
        let columns = self.x..self.right().unwrap_or(self.x);
        (self.y..self.bottom().unwrap_or(self.y))
            .flat_map(move |row| columns.clone().map(move |column| (column, row)))
    }
}

impl fmt::Display for Rect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}@{},{}", self.width, self.height, self.x, self.y)
    }
}

/// Set of occupied grid cells, one bit per cell in row-major order
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CellMask {
    bits: BitVec,
}

impl Default for CellMask {
    fn default() -> Self {
        Self::new()
    }
}

impl CellMask {
    /// Create a mask with no cells set
    pub fn new() -> Self {
        Self {
            bits: bitvec![0; GRID_CELLS],
        }
    }

    /// Mask covering the on-grid part of `rect`
    pub fn from_rect(rect: &Rect) -> Self {
        let mut mask = Self::new();
        mask.insert_rect(rect);
        mask
    }

    /// Mark every on-grid cell of `rect`
    pub fn insert_rect(&mut self, rect: &Rect) {
        for (column, row) in rect.cells() {
            if column < GRID_W && row < GRID_H {
                self.bits.set((row * GRID_W + column) as usize, true);
            }
        }
    }

    /// Test whether a cell is set
    pub fn contains(&self, column: u32, row: u32) -> bool {
        column < GRID_W
            && row < GRID_H
            && self.bits.get((row * GRID_W + column) as usize).as_deref() == Some(&true)
    }

    /// Whether any cell is set in both masks
    pub fn overlaps(&self, other: &Self) -> bool {
        let mut shared = self.bits.clone();
        shared &= &other.bits;
        shared.any()
    }

    /// Number of cells set
    pub fn count(&self) -> usize {
        self.bits.count_ones()
    }

    /// Test if no cells are set
    pub fn is_empty(&self) -> bool {
        self.bits.not_any()
    }
}
