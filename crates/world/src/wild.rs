//! Wilderness chunk selection and the city placeholders at its center.

use arenagen_assets::{WildBlockLists, RMD_DEPTH, RMD_WIDTH};
use arenagen_core::{ArenaRandom, Grid2, LevelInt2, OriginalInt2, VoxelCode};
use serde::{Deserialize, Serialize};

use crate::error::GenerationError;
use crate::layers::MapLayers;

/// Wilderness chunks per side.
pub const WILD_WIDTH: usize = 64;
pub const WILD_HEIGHT: usize = 64;

/// `(x, y, id)` of the four city quadrant placeholders.
pub const CITY_PLACEHOLDERS: [(usize, usize, u8); 4] = [
    (WILD_WIDTH / 2 - 1, WILD_HEIGHT / 2 - 1, 1),
    (WILD_WIDTH / 2, WILD_HEIGHT / 2 - 1, 2),
    (WILD_WIDTH / 2 - 1, WILD_HEIGHT / 2, 3),
    (WILD_WIDTH / 2, WILD_HEIGHT / 2, 4),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WildBlockKind {
    Normal,
    Village,
    Dungeon,
    Tavern,
    Temple,
}

impl WildBlockKind {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Normal => "normal_blocks",
            Self::Village => "village_blocks",
            Self::Dungeon => "dungeon_blocks",
            Self::Tavern => "tavern_blocks",
            Self::Temple => "temple_blocks",
        }
    }

    pub fn blocks(self, lists: &WildBlockLists) -> &[u8] {
        match self {
            Self::Normal => &lists.normal_blocks,
            Self::Village => &lists.village_blocks,
            Self::Dungeon => &lists.dungeon_blocks,
            Self::Tavern => &lists.tavern_blocks,
            Self::Temple => &lists.temple_blocks,
        }
    }
}

/// Each draw is compared against these in order, subtracting as it goes. Anything left over
/// picks a temple block.
pub static WILD_THRESHOLDS: [(WildBlockKind, u32); 4] = [
    (WildBlockKind::Normal, 0x6666),
    (WildBlockKind::Village, 0x4000),
    (WildBlockKind::Dungeon, 0x2666),
    (WildBlockKind::Tavern, 0x1999),
];

pub fn select_wild_block_kind(draw: u32) -> WildBlockKind {
    let mut value = draw;
    for (kind, threshold) in WILD_THRESHOLDS {
        if value < threshold {
            return kind;
        }
        value -= threshold;
    }
    WildBlockKind::Temple
}

/// Chunk ID per wilderness cell, with the city quadrants at the center.
pub fn generate_wilderness_indices(
    seed: u32,
    lists: &WildBlockLists,
) -> Result<Grid2<u8>, GenerationError> {
    let mut random = ArenaRandom::new(seed);
    let mut indices = Grid2::new(WILD_WIDTH, WILD_HEIGHT, 0u8);
    for y in 0..WILD_HEIGHT {
        for x in 0..WILD_WIDTH {
            let kind = select_wild_block_kind(random.next());
            let blocks = kind.blocks(lists);
            if blocks.is_empty() {
                return Err(GenerationError::EmptyWildBlockList {
                    list: kind.as_str(),
                });
            }
            let entry = ((random.next() & 0xFF) as usize) % blocks.len();
            indices.set(x, y, blocks[entry]);
        }
    }

    for (x, y, id) in CITY_PLACEHOLDERS {
        indices.set(x, y, id);
    }
    Ok(indices)
}

/// IDs 1..=4 stand for quadrants of the city.
pub const fn is_wild_city_block(id: u8) -> bool {
    matches!(id, 1..=4)
}

const WILD_CITY_WALLS: [VoxelCode; 3] = [0x2F2F, 0x2D2D, 0x2E2E];

fn wild_city_map2(map2: VoxelCode) -> VoxelCode {
    0x3030 | (map2 & 0x8080)
}

/// Reduce a generated city to the walls visible from the wilderness. FLOR is kept.
pub fn revise_wilderness_city(layers: &mut MapLayers) {
    for z in 0..layers.depth() {
        for x in 0..layers.width() {
            let map1 = layers.map1.get(x, z);
            let map2 = layers.map2.get(x, z);
            let (new_map1, new_map2) = if (map1 & 0x8000) != 0 || !WILD_CITY_WALLS.contains(&map1)
            {
                (0, 0)
            } else {
                match map1 {
                    0x2F2F => (0x3030, wild_city_map2(map2)),
                    0x2D2D => (0x2F2F, wild_city_map2(map2)),
                    _ => (map1, wild_city_map2(map2)),
                }
            };
            layers.map1.set(x, z, new_map1);
            layers.map2.set(x, z, new_map2);
        }
    }
}

/// One wilderness-sized chunk cut from the revised city for a placeholder ID.
pub fn stamp_city_chunk(block_id: u8, city: &MapLayers) -> Option<MapLayers> {
    let (column, row) = match block_id {
        1 => (0, 0),
        2 => (1, 0),
        3 => (0, 1),
        4 => (1, 1),
        _ => return None,
    };
    let mut chunk = MapLayers::new(RMD_WIDTH, RMD_DEPTH);
    chunk.copy_window(
        city,
        OriginalInt2::new(column * RMD_WIDTH as i32, row * RMD_DEPTH as i32),
    );
    Some(chunk)
}

/// Seed for a wilderness chunk's building names.
pub const fn wild_chunk_seed(wild_x: i32, wild_y: i32) -> u32 {
    ((wild_y << 16) + wild_x) as u32
}

/// Origin of the 2x2 chunk window containing `voxel`.
///
/// Generation never moves the window; this and [`centered_wild_origin`] are for callers
/// streaming chunks around a player.
pub const fn relative_wild_origin(voxel: OriginalInt2) -> OriginalInt2 {
    let span_x = RMD_WIDTH as i32 * 2;
    let span_y = RMD_DEPTH as i32 * 2;
    OriginalInt2::new(voxel.x - (voxel.x % span_x), voxel.y - (voxel.y % span_y))
}

/// Origin of the chunk window centered on the player at `voxel`.
pub fn centered_wild_origin(voxel: LevelInt2) -> LevelInt2 {
    let width = RMD_WIDTH as i32;
    let depth = RMD_DEPTH as i32;
    LevelInt2::new(
        ((voxel.x - 32).max(0) / width) * width,
        ((voxel.z - 32).max(0) / depth) * depth,
    )
}
