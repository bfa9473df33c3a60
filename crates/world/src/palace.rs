//! Palace and gate graphic revision for generated cities.
//!
//! The skeleton marks one palace voxel on the city perimeter with nibble 0x9. The reviser
//! finds it, derives the second palace voxel and the gate pair, and writes the final
//! side-specific codes.

use arenagen_core::{most_sig_nibble, Grid2, LevelInt2, VoxelCode};
use serde::Serialize;

const PALACE_NIBBLE: u8 = 0x9;
const GATE_NIBBLE: u8 = 0xA;
const MAX_GATE_DISTANCE: i32 = 8;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PalaceSide {
    North,
    South,
    East,
    West,
}

/// Per-side replacement codes and step directions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PalaceSideCodes {
    pub side: PalaceSide,
    pub first_palace: VoxelCode,
    pub second_palace: VoxelCode,
    pub gate: VoxelCode,
    /// From the first palace voxel to the second, and from the first gate voxel to the second.
    pub palace_step: LevelInt2,
    /// From the palace toward the city interior.
    pub gate_direction: LevelInt2,
}

pub static PALACE_SIDES: [PalaceSideCodes; 4] = [
    PalaceSideCodes {
        side: PalaceSide::North,
        first_palace: 0xA5B4,
        second_palace: 0xA5B5,
        gate: 0xA1B3,
        palace_step: LevelInt2::WEST,
        gate_direction: LevelInt2::SOUTH,
    },
    PalaceSideCodes {
        side: PalaceSide::South,
        first_palace: 0xA535,
        second_palace: 0xA534,
        gate: 0xA133,
        palace_step: LevelInt2::WEST,
        gate_direction: LevelInt2::NORTH,
    },
    PalaceSideCodes {
        side: PalaceSide::East,
        first_palace: 0xA575,
        second_palace: 0xA574,
        gate: 0xA173,
        palace_step: LevelInt2::SOUTH,
        gate_direction: LevelInt2::WEST,
    },
    PalaceSideCodes {
        side: PalaceSide::West,
        first_palace: 0xA5F4,
        second_palace: 0xA5F5,
        gate: 0xA1F3,
        palace_step: LevelInt2::SOUTH,
        gate_direction: LevelInt2::EAST,
    },
];

impl PalaceSide {
    pub fn codes(self) -> &'static PalaceSideCodes {
        match self {
            Self::North => &PALACE_SIDES[0],
            Self::South => &PALACE_SIDES[1],
            Self::East => &PALACE_SIDES[2],
            Self::West => &PALACE_SIDES[3],
        }
    }
}

/// What the reviser changed, in level `(x, z)` coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PalaceRevision {
    pub side: PalaceSide,
    pub first_palace: LevelInt2,
    pub second_palace: LevelInt2,
    pub gates: Option<(LevelInt2, LevelInt2)>,
}

/// MAP1 viewed in level space: `x` is the row, `z` the column.
struct LevelView<'a> {
    map1: &'a mut Grid2<VoxelCode>,
}

impl LevelView<'_> {
    fn width(&self) -> i32 {
        self.map1.height() as i32
    }

    fn depth(&self) -> i32 {
        self.map1.width() as i32
    }

    fn get(&self, position: LevelInt2) -> Option<VoxelCode> {
        let x = usize::try_from(position.x).ok()?;
        let z = usize::try_from(position.z).ok()?;
        self.map1.try_get(z, x)
    }

    fn set(&mut self, position: LevelInt2, code: VoxelCode) {
        if let (Ok(x), Ok(z)) = (usize::try_from(position.x), usize::try_from(position.z)) {
            self.map1.set_if_inside(z, x, code);
        }
    }

    fn has_nibble(&self, position: LevelInt2, nibble: u8) -> bool {
        self.get(position)
            .is_some_and(|code| most_sig_nibble(code) == nibble)
    }

    fn find_palace(&self) -> Option<(PalaceSide, LevelInt2)> {
        let (width, depth) = (self.width(), self.depth());
        for z in 1..depth - 1 {
            let north = LevelInt2::new(0, z);
            let south = LevelInt2::new(width - 1, z);
            if self.has_nibble(north, PALACE_NIBBLE) {
                return Some((PalaceSide::North, north));
            }
            if self.has_nibble(south, PALACE_NIBBLE) {
                return Some((PalaceSide::South, south));
            }
        }
        for x in 1..width - 1 {
            let east = LevelInt2::new(x, 0);
            let west = LevelInt2::new(x, depth - 1);
            if self.has_nibble(east, PALACE_NIBBLE) {
                return Some((PalaceSide::East, east));
            }
            if self.has_nibble(west, PALACE_NIBBLE) {
                return Some((PalaceSide::West, west));
            }
        }
        None
    }

    fn find_gate(&self, palace: LevelInt2, direction: LevelInt2) -> Option<LevelInt2> {
        let mut position = palace;
        for _ in 0..MAX_GATE_DISTANCE {
            self.get(position)?;
            if self.has_nibble(position, GATE_NIBBLE) {
                return Some(position);
            }
            position = position + direction;
        }
        None
    }
}

/// Rewrite the palace and gate voxels of a generated city's MAP1.
///
/// Returns `None` and leaves the grid untouched when no palace marker is on the perimeter.
pub fn revise_palace_graphics(map1: &mut Grid2<VoxelCode>) -> Option<PalaceRevision> {
    let mut view = LevelView { map1 };
    let (side, first_palace) = view.find_palace()?;

    let codes = side.codes();
    let second_palace = first_palace + codes.palace_step;
    let gates = view
        .find_gate(first_palace, codes.gate_direction)
        .map(|gate| (gate, gate + codes.palace_step));

    view.set(first_palace, codes.first_palace);
    view.set(second_palace, codes.second_palace);
    if let Some((first_gate, second_gate)) = gates {
        view.set(first_gate, codes.gate);
        view.set(second_gate, codes.gate);
    }

    Some(PalaceRevision {
        side,
        first_palace,
        second_palace,
        gates,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid() -> Grid2<VoxelCode> {
        Grid2::new(10, 8, 0)
    }

    #[test]
    fn north_side_palace_with_gate() {
        let mut map1 = grid();
        // Level (0, 4) is source column 4, row 0.
        map1.set(4, 0, 0x9000);
        map1.set(4, 3, 0xA000);

        let revision = revise_palace_graphics(&mut map1).unwrap();
        assert_eq!(revision.side, PalaceSide::North);
        assert_eq!(revision.first_palace, LevelInt2::new(0, 4));
        assert_eq!(revision.second_palace, LevelInt2::new(0, 5));
        assert_eq!(
            revision.gates,
            Some((LevelInt2::new(3, 4), LevelInt2::new(3, 5)))
        );
        assert_eq!(map1.get(4, 0), 0xA5B4);
        assert_eq!(map1.get(5, 0), 0xA5B5);
        assert_eq!(map1.get(4, 3), 0xA1B3);
        assert_eq!(map1.get(5, 3), 0xA1B3);
    }

    #[test]
    fn east_side_found_after_north_south_scan() {
        let mut map1 = grid();
        map1.set(0, 2, 0x9123);
        let revision = revise_palace_graphics(&mut map1).unwrap();
        assert_eq!(revision.side, PalaceSide::East);
        assert_eq!(revision.second_palace, LevelInt2::new(3, 0));
        assert_eq!(revision.gates, None);
        assert_eq!(map1.get(0, 2), 0xA575);
        assert_eq!(map1.get(0, 3), 0xA574);
    }

    #[test]
    fn corners_are_not_scanned() {
        let mut map1 = grid();
        map1.set(0, 0, 0x9000);
        let before = map1.clone();
        assert!(revise_palace_graphics(&mut map1).is_none());
        assert_eq!(map1, before);
    }

    #[test]
    fn gate_beyond_search_distance_is_ignored() {
        let mut map1 = Grid2::new(12, 12, 0);
        map1.set(11, 5, 0x9000);
        map1.set(2, 5, 0xA000);
        let revision = revise_palace_graphics(&mut map1).unwrap();
        assert_eq!(revision.side, PalaceSide::West);
        assert_eq!(revision.gates, None);
        assert_eq!(map1.get(2, 5), 0xA000);
    }

    #[test]
    fn replacement_codes_never_look_like_markers() {
        for codes in &PALACE_SIDES {
            for code in [codes.first_palace, codes.second_palace, codes.gate] {
                assert_ne!(most_sig_nibble(code), PALACE_NIBBLE);
            }
        }
    }
}
