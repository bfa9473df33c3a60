//! Level sizing helpers shared by decoding and assembly.

use arenagen_assets::{InfCeiling, MifLevel};
use arenagen_core::{Grid2, MapType, VoxelCode};

/// Original units per voxel edge.
pub const ARENA_UNITS: f64 = 128.0;

/// Number of distinct voxel texture IDs. Larger IDs wrap.
pub const TOTAL_VOXEL_IDS: i32 = 64;

/// Vertical run of a MAP2 voxel, duplicated upward from y = 2.
pub const fn map2_voxel_height(code: VoxelCode) -> i32 {
    if (code & 0x80) == 0x80 {
        2
    } else if (code & 0x8000) == 0x8000 {
        3
    } else if (code & 0x8080) == 0x8080 {
        4
    } else {
        1
    }
}

/// Tallest run in a MAP2 layer, at least 1.
pub fn map2_height(map2: &Grid2<VoxelCode>) -> i32 {
    map2.as_slice()
        .iter()
        .map(|&code| map2_voxel_height(code))
        .fold(1, i32::max)
}

/// Voxel height of a level: two floors plus the MAP2 run, or 3/2 depending on whether a
/// ceiling gets filled in.
pub fn mif_level_height(level: &MifLevel, ceiling: Option<&InfCeiling>) -> i32 {
    match &level.map2 {
        Some(map2) => 2 + map2_height(map2),
        None => {
            let has_ceiling = ceiling.is_some_and(|ceiling| !ceiling.outdoor_dungeon);
            if has_ceiling {
                3
            } else {
                2
            }
        }
    }
}

/// Ceiling height in voxels.
pub fn ceiling_height_to_scale(ceiling_height: i32) -> f64 {
    f64::from(ceiling_height) / ARENA_UNITS
}

/// Wilderness floors other than the plain ground textures show as wall color on the automap.
pub const fn is_floor_wild_wall_colored(floor_id: i32, map_type: MapType) -> bool {
    match map_type {
        MapType::Wilderness => !matches!(floor_id, 0 | 2 | 3 | 4),
        MapType::Interior | MapType::City => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn map2_runs() {
        assert_eq!(map2_voxel_height(0x0001), 1);
        assert_eq!(map2_voxel_height(0x0080), 2);
        assert_eq!(map2_voxel_height(0x8001), 3);
        // 0x80 wins before the combined check is reached.
        assert_eq!(map2_voxel_height(0x8080), 2);
    }

    #[test]
    fn level_height_with_and_without_map2() {
        let mut level = MifLevel::empty(4, 4, false);
        let ceiling = InfCeiling::default();
        assert_eq!(mif_level_height(&level, Some(&ceiling)), 3);
        assert_eq!(mif_level_height(&level, None), 2);

        let outdoor = InfCeiling {
            outdoor_dungeon: true,
            ..InfCeiling::default()
        };
        assert_eq!(mif_level_height(&level, Some(&outdoor)), 2);

        let mut map2 = Grid2::new(4, 4, 0);
        map2.set(1, 2, 0x8001);
        level.map2 = Some(map2);
        assert_eq!(mif_level_height(&level, Some(&ceiling)), 5);
    }

    #[test]
    fn wild_wall_colored_floors() {
        assert!(!is_floor_wild_wall_colored(2, MapType::Wilderness));
        assert!(is_floor_wild_wall_colored(5, MapType::Wilderness));
        assert!(!is_floor_wild_wall_colored(5, MapType::City));
    }

    #[test]
    fn ceiling_scale() {
        assert_eq!(ceiling_height_to_scale(128), 1.0);
        assert_eq!(ceiling_height_to_scale(100), 0.78125);
    }
}
