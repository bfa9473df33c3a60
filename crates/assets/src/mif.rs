//! Parsed MIF levels and RMD wilderness chunks.

use arenagen_core::{Grid2, OriginalInt2, VoxelCode};
use serde::{Deserialize, Serialize};

use crate::loader::DataPack;
use crate::AssetError;

/// RMD chunk width in voxels.
pub const RMD_WIDTH: usize = 64;
/// RMD chunk depth in voxels.
pub const RMD_DEPTH: usize = 64;

/// A `LOCK` record. Ordering is `(x, y, lock_level)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct MifLock {
    /// Column.
    pub x: i32,
    /// Row.
    pub y: i32,
    /// Difficulty to pick.
    pub lock_level: i32,
}

/// A `TRIG` record. Ordering is `(x, y, text_index, sound_index)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct MifTrigger {
    /// Column.
    pub x: i32,
    /// Row.
    pub y: i32,
    /// INF text index.
    #[serde(default)]
    pub text_index: Option<i32>,
    /// INF sound index.
    #[serde(default)]
    pub sound_index: Option<i32>,
}

/// One level of a MIF file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MifLevel {
    /// Level name, for diagnostics.
    #[serde(default)]
    pub name: String,
    /// Floor layer.
    pub flor: Grid2<VoxelCode>,
    /// Main wall layer.
    pub map1: Grid2<VoxelCode>,
    /// Upper layer. Absent in most interiors.
    #[serde(default)]
    pub map2: Option<Grid2<VoxelCode>>,
    /// Lock records.
    #[serde(default)]
    pub locks: Vec<MifLock>,
    /// Trigger records.
    #[serde(default)]
    pub triggers: Vec<MifTrigger>,
}

impl MifLevel {
    /// An all-zero level with the given dimensions.
    pub fn empty(width: usize, depth: usize, with_map2: bool) -> Self {
        Self {
            name: String::new(),
            flor: Grid2::new(width, depth, 0),
            map1: Grid2::new(width, depth, 0),
            map2: with_map2.then(|| Grid2::new(width, depth, 0)),
            locks: Vec::new(),
            triggers: Vec::new(),
        }
    }

    /// Columns.
    pub fn width(&self) -> usize {
        self.flor.width()
    }

    /// Rows.
    pub fn depth(&self) -> usize {
        self.flor.height()
    }

    fn validate(&self) -> Result<(), AssetError> {
        let (width, depth) = (self.width(), self.depth());
        let same = |grid: &Grid2<VoxelCode>| grid.width() == width && grid.height() == depth;
        if !same(&self.map1) || !self.map2.as_ref().map_or(true, same) {
            return Err(AssetError::Invalid(format!(
                "level {:?} has layers of differing size",
                self.name
            )));
        }
        Ok(())
    }
}

/// A MIF file: one or more levels sharing dimensions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MifMap {
    /// Filename, uppercase.
    pub name: String,
    /// Player start points in source coordinates.
    #[serde(default)]
    pub start_points: Vec<OriginalInt2>,
    /// Levels, in file order.
    pub levels: Vec<MifLevel>,
}

impl MifMap {
    /// Columns of the first level.
    pub fn width(&self) -> usize {
        self.levels.first().map_or(0, MifLevel::width)
    }

    /// Rows of the first level.
    pub fn depth(&self) -> usize {
        self.levels.first().map_or(0, MifLevel::depth)
    }

    /// Check that every level is internally consistent and matches the first level.
    pub fn validate(&self) -> Result<(), AssetError> {
        if self.levels.is_empty() {
            return Err(AssetError::Invalid(format!("{} has no levels", self.name)));
        }
        for level in &self.levels {
            level.validate()?;
            if level.width() != self.width() || level.depth() != self.depth() {
                return Err(AssetError::Invalid(format!(
                    "{} has levels of differing size",
                    self.name
                )));
            }
        }
        Ok(())
    }
}

impl DataPack for MifMap {
    fn validate(&self) -> Result<(), AssetError> {
        MifMap::validate(self)
    }
}

/// A 64x64 wilderness chunk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RmdChunk {
    /// Floor layer.
    pub flor: Grid2<VoxelCode>,
    /// Main wall layer.
    pub map1: Grid2<VoxelCode>,
    /// Upper layer.
    pub map2: Grid2<VoxelCode>,
}

impl RmdChunk {
    /// An all-zero chunk.
    pub fn empty() -> Self {
        Self {
            flor: Grid2::new(RMD_WIDTH, RMD_DEPTH, 0),
            map1: Grid2::new(RMD_WIDTH, RMD_DEPTH, 0),
            map2: Grid2::new(RMD_WIDTH, RMD_DEPTH, 0),
        }
    }

    /// Every layer must be exactly 64x64.
    pub fn validate(&self) -> Result<(), AssetError> {
        for grid in [&self.flor, &self.map1, &self.map2] {
            if grid.width() != RMD_WIDTH || grid.height() != RMD_DEPTH {
                return Err(AssetError::Invalid(format!(
                    "RMD layer is {}x{}, expected {RMD_WIDTH}x{RMD_DEPTH}",
                    grid.width(),
                    grid.height()
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lock_ordering_is_lexicographic() {
        let a = MifLock {
            x: 1,
            y: 5,
            lock_level: 9,
        };
        let b = MifLock {
            x: 2,
            y: 0,
            lock_level: 0,
        };
        let c = MifLock {
            x: 1,
            y: 5,
            lock_level: 10,
        };
        assert!(a < b);
        assert!(a < c);
    }

    #[test]
    fn mismatched_layers_fail_validation() {
        let mut level = MifLevel::empty(4, 4, true);
        level.map2 = Some(Grid2::new(3, 4, 0));
        let map = MifMap {
            name: "BAD.MIF".into(),
            start_points: Vec::new(),
            levels: vec![level],
        };
        assert!(map.validate().is_err());
    }

    #[test]
    fn empty_rmd_is_valid() {
        assert!(RmdChunk::empty().validate().is_ok());
        let mut chunk = RmdChunk::empty();
        chunk.map2 = Grid2::new(32, 64, 0);
        assert!(chunk.validate().is_err());
    }
}
