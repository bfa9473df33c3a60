//! Mutable FLOR/MAP1/MAP2 working layers that generators write into before assembly.

use arenagen_assets::{MifLevel, RmdChunk};
use arenagen_core::{Grid2, OriginalInt2, VoxelCode};
use serde::{Deserialize, Serialize};

/// The three stacked voxel layers of one map, addressed in source space.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MapLayers {
    pub flor: Grid2<VoxelCode>,
    pub map1: Grid2<VoxelCode>,
    pub map2: Grid2<VoxelCode>,
}

impl MapLayers {
    /// Zero-filled layers.
    pub fn new(width: usize, depth: usize) -> Self {
        Self {
            flor: Grid2::new(width, depth, 0),
            map1: Grid2::new(width, depth, 0),
            map2: Grid2::new(width, depth, 0),
        }
    }

    /// Copy of a MIF level; a missing MAP2 becomes zeros.
    pub fn from_level(level: &MifLevel) -> Self {
        Self {
            flor: level.flor.clone(),
            map1: level.map1.clone(),
            map2: level
                .map2
                .clone()
                .unwrap_or_else(|| Grid2::new(level.width(), level.depth(), 0)),
        }
    }

    pub fn from_chunk(chunk: &RmdChunk) -> Self {
        Self {
            flor: chunk.flor.clone(),
            map1: chunk.map1.clone(),
            map2: chunk.map2.clone(),
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

    /// Copy a MIF level's layers with its top-left at `origin`. Writes outside are skipped.
    pub fn blit_level(&mut self, level: &MifLevel, origin: OriginalInt2) {
        blit_grid(&mut self.flor, &level.flor, origin);
        blit_grid(&mut self.map1, &level.map1, origin);
        if let Some(map2) = &level.map2 {
            blit_grid(&mut self.map2, map2, origin);
        }
    }

    /// Copy another set of layers with its top-left at `origin`. Writes outside are skipped.
    pub fn blit(&mut self, other: &MapLayers, origin: OriginalInt2) {
        blit_grid(&mut self.flor, &other.flor, origin);
        blit_grid(&mut self.map1, &other.map1, origin);
        blit_grid(&mut self.map2, &other.map2, origin);
    }

    /// Copy the `width` x `depth` window of `other` starting at `src` into these layers at
    /// the origin. Reads outside `other` are skipped.
    pub fn copy_window(&mut self, other: &MapLayers, src: OriginalInt2) {
        for z in 0..self.depth() {
            for x in 0..self.width() {
                let sx = src.x + x as i32;
                let sz = src.y + z as i32;
                if sx < 0 || sz < 0 {
                    continue;
                }
                let (sx, sz) = (sx as usize, sz as usize);
                if !other.flor.contains(sx, sz) {
                    continue;
                }
                self.flor.set(x, z, other.flor.get(sx, sz));
                self.map1.set(x, z, other.map1.get(sx, sz));
                self.map2.set(x, z, other.map2.get(sx, sz));
            }
        }
    }
}

fn blit_grid(dst: &mut Grid2<VoxelCode>, src: &Grid2<VoxelCode>, origin: OriginalInt2) {
    for (x, z, &code) in src.iter() {
        let dx = origin.x + x as i32;
        let dz = origin.y + z as i32;
        if dx < 0 || dz < 0 {
            continue;
        }
        dst.set_if_inside(dx as usize, dz as usize, code);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blit_clips_at_edges() {
        let mut layers = MapLayers::new(4, 4);
        let mut level = MifLevel::empty(3, 3, false);
        level.flor.fill(0x0100);
        level.map1.fill(0x2F2F);

        layers.blit_level(&level, OriginalInt2::new(2, -1));
        assert_eq!(layers.flor.get(2, 0), 0x0100);
        assert_eq!(layers.flor.get(3, 1), 0x0100);
        assert_eq!(layers.flor.get(3, 2), 0);
        assert_eq!(layers.map1.get(1, 0), 0);
        // No MAP2 in the source leaves MAP2 untouched.
        assert!(layers.map2.as_slice().iter().all(|&code| code == 0));
    }

    #[test]
    fn window_copy_reads_offset_region() {
        let mut source = MapLayers::new(4, 4);
        source.map1.set(3, 2, 0x1234);
        let mut window = MapLayers::new(2, 2);
        window.copy_window(&source, OriginalInt2::new(2, 1));
        assert_eq!(window.map1.get(1, 1), 0x1234);

        let mut past_edge = MapLayers::new(2, 2);
        past_edge.copy_window(&source, OriginalInt2::new(3, 3));
        assert_eq!(past_edge.map1.as_slice(), &[0, 0, 0, 0]);
    }

    #[test]
    fn from_level_fills_missing_map2() {
        let level = MifLevel::empty(5, 3, false);
        let layers = MapLayers::from_level(&level);
        assert_eq!((layers.width(), layers.depth()), (5, 3));
        assert_eq!(layers.map2.width(), 5);
    }
}
