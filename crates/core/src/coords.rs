//! Coordinate conventions.
//!
//! Source layers are addressed as `(x, y)` with `x` the column. Level definitions swap the
//! axes: level `x` is the source row and level `z` the source column. Direction vectors are
//! expressed in level `(x, z)` space.

use serde::{Deserialize, Serialize};
use std::ops::{Add, Mul};

/// Position in original source-layer space (`x` = column, `y` = row).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct OriginalInt2 {
    /// Column.
    pub x: i32,
    /// Row.
    pub y: i32,
}

impl OriginalInt2 {
    /// Construct a source-space position.
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Convert to level space by swapping axes.
    pub const fn to_level(self) -> LevelInt2 {
        LevelInt2 {
            x: self.y,
            z: self.x,
        }
    }
}

/// Horizontal position in level space.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct LevelInt2 {
    /// Level X (source row).
    pub x: i32,
    /// Level Z (source column).
    pub z: i32,
}

impl LevelInt2 {
    /// One step north.
    pub const NORTH: Self = Self::new(-1, 0);
    /// One step south.
    pub const SOUTH: Self = Self::new(1, 0);
    /// One step east.
    pub const EAST: Self = Self::new(0, -1);
    /// One step west.
    pub const WEST: Self = Self::new(0, 1);

    /// Construct a level-space position.
    pub const fn new(x: i32, z: i32) -> Self {
        Self { x, z }
    }

    /// Convert back to source space.
    pub const fn to_original(self) -> OriginalInt2 {
        OriginalInt2 {
            x: self.z,
            y: self.x,
        }
    }

    /// Lift to a voxel position at height `y`.
    pub const fn with_y(self, y: i32) -> LevelInt3 {
        LevelInt3 {
            x: self.x,
            y,
            z: self.z,
        }
    }
}

impl Add for LevelInt2 {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.z + rhs.z)
    }
}

impl Mul<i32> for LevelInt2 {
    type Output = Self;

    fn mul(self, rhs: i32) -> Self {
        Self::new(self.x * rhs, self.z * rhs)
    }
}

/// Voxel position in level space.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct LevelInt3 {
    /// Level X.
    pub x: i32,
    /// Level Y (0 = floor layer, 1 = main wall layer, 2+ = ceiling layers).
    pub y: i32,
    /// Level Z.
    pub z: i32,
}

impl LevelInt3 {
    /// Construct a voxel position.
    pub const fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }
}

/// Continuous position in level space, used for entity placement.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LevelDouble3 {
    /// Level X.
    pub x: f64,
    /// Level Y.
    pub y: f64,
    /// Level Z.
    pub z: f64,
}

impl LevelDouble3 {
    /// Construct a continuous position.
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Center of the voxel column at `(x, z)`, at height `y`.
    pub fn voxel_center(x: i32, y: f64, z: i32) -> Self {
        Self::new(f64::from(x) + 0.5, y, f64::from(z) + 0.5)
    }
}
