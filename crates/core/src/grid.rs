//! Dense row-major 2D buffers used for voxel layers.
//!
//! `x` is the column (0..width) and `z` the row (0..height), matching the layout of the
//! original FLOR/MAP1/MAP2 layers on disk.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error constructing a [`Grid2`] from raw data.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GridError {
    /// The supplied cell count does not equal `width * height`.
    #[error("grid data has {actual} cells, expected {width}x{height}")]
    SizeMismatch {
        /// Requested width.
        width: usize,
        /// Requested height.
        height: usize,
        /// Number of cells supplied.
        actual: usize,
    },
}

/// Fixed-size 2D buffer.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawGrid<T>")]
pub struct Grid2<T> {
    width: usize,
    height: usize,
    cells: Vec<T>,
}

#[derive(Deserialize)]
struct RawGrid<T> {
    width: usize,
    height: usize,
    cells: Vec<T>,
}

impl<T> TryFrom<RawGrid<T>> for Grid2<T> {
    type Error = GridError;

    fn try_from(raw: RawGrid<T>) -> Result<Self, Self::Error> {
        Grid2::from_vec(raw.width, raw.height, raw.cells)
    }
}

impl<T: Copy> Grid2<T> {
    /// Allocate a grid with every cell set to `value`.
    pub fn new(width: usize, height: usize, value: T) -> Self {
        Self {
            width,
            height,
            cells: vec![value; width * height],
        }
    }

    /// Read a cell. Panics when out of bounds, like slice indexing.
    #[inline]
    pub fn get(&self, x: usize, z: usize) -> T {
        self.cells[self.index(x, z)]
    }

    /// Read a cell, returning `None` outside the grid.
    #[inline]
    pub fn try_get(&self, x: usize, z: usize) -> Option<T> {
        self.contains(x, z).then(|| self.get(x, z))
    }

    /// Overwrite every cell.
    pub fn fill(&mut self, value: T) {
        self.cells.iter_mut().for_each(|cell| *cell = value);
    }
}

impl<T> Grid2<T> {
    /// Wrap existing row-major data.
    pub fn from_vec(width: usize, height: usize, cells: Vec<T>) -> Result<Self, GridError> {
        if cells.len() != width * height {
            return Err(GridError::SizeMismatch {
                width,
                height,
                actual: cells.len(),
            });
        }
        Ok(Self {
            width,
            height,
            cells,
        })
    }

    /// Number of columns.
    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    /// Number of rows.
    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Whether `(x, z)` lies inside the grid.
    #[inline]
    pub fn contains(&self, x: usize, z: usize) -> bool {
        x < self.width && z < self.height
    }

    /// Write a cell. Panics when out of bounds.
    #[inline]
    pub fn set(&mut self, x: usize, z: usize, value: T) {
        let idx = self.index(x, z);
        self.cells[idx] = value;
    }

    /// Write a cell if it lies inside the grid. Returns whether the write happened.
    #[inline]
    pub fn set_if_inside(&mut self, x: usize, z: usize, value: T) -> bool {
        if self.contains(x, z) {
            self.set(x, z, value);
            true
        } else {
            false
        }
    }

    /// Mutable access to a cell.
    #[inline]
    pub fn get_mut(&mut self, x: usize, z: usize) -> &mut T {
        let idx = self.index(x, z);
        &mut self.cells[idx]
    }

    /// Borrow the row-major cells.
    pub fn as_slice(&self) -> &[T] {
        &self.cells
    }

    /// Iterate `(x, z, &cell)` in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, usize, &T)> {
        let width = self.width.max(1);
        self.cells
            .iter()
            .enumerate()
            .map(move |(i, cell)| (i % width, i / width, cell))
    }

    #[inline]
    fn index(&self, x: usize, z: usize) -> usize {
        debug_assert!(x < self.width, "x {x} out of range {}", self.width);
        debug_assert!(z < self.height, "z {z} out of range {}", self.height);
        z * self.width + x
    }
}
