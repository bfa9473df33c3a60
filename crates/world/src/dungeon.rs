//! Seeded dungeon composition from 32x32 chunk prefabs.
//!
//! A dungeon is `width_chunks` x `depth_chunks` chunks per level. Level-change voxels sit at
//! a fixed offset inside the chunk named by a packed transition value `10 * row + column`.

use arenagen_assets::{InfData, MifLevel, MifLock, MifTrigger, PrefabLibrary, DUNGEON_CHUNK_DIM};
use arenagen_core::{ArenaRandom, Grid2, OriginalInt2, VoxelCode};
use serde::{Deserialize, Serialize};
use tracing::{debug, info_span};

use crate::error::{DecodeWarning, DecodeWarnings, GenerationError};

/// Written around every dungeon level.
pub const PERIMETER_VOXEL: VoxelCode = 0x7800;

/// Offset of a level-change voxel inside its chunk.
pub const LEVEL_CHANGE_OFFSET: i32 = 10;

const TILE_SETS: u32 = 4;
const BLOCKS_PER_TILE_SET: u32 = 8;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DungeonParams {
    pub seed: u32,
    pub width_chunks: usize,
    pub depth_chunks: usize,
    pub is_artifact: bool,
}

/// Generated source layers for every level of one dungeon.
#[derive(Debug, Clone, PartialEq)]
pub struct DungeonLayout {
    /// One level per floor. MAP2 is always absent.
    pub levels: Vec<MifLevel>,
    /// Packed chunk coordinates; `transitions[i]` is level i's level-up chunk.
    pub transitions: Vec<i32>,
    /// The first level-up voxel, in source coordinates.
    pub start_point: OriginalInt2,
}

pub const fn pack_level_change_voxel(x: i32, y: i32) -> i32 {
    (y * 10) + x
}

/// Inverse of [`pack_level_change_voxel`]: `(x, y)`.
pub const fn unpack_level_change_voxel(packed: i32) -> (i32, i32) {
    (packed % 10, packed / 10)
}

/// Chunk coordinate to voxel coordinate.
pub const fn offset_level_change_voxel(chunk: i32) -> i32 {
    LEVEL_CHANGE_OFFSET + (chunk * DUNGEON_CHUNK_DIM as i32)
}

/// The MAP1 code for a level-change wall whose texture byte is `byte`.
pub const fn convert_level_change_voxel(byte: u8) -> VoxelCode {
    ((byte as u16) << 8) | byte as u16
}

/// 4 for artifact dungeons, otherwise 1 or 2.
pub fn dungeon_level_count(is_artifact: bool, random: &mut ArenaRandom) -> usize {
    if is_artifact {
        4
    } else {
        1 + (random.next() % 2) as usize
    }
}

fn next_transition(random: &mut ArenaRandom, width: u32, depth: u32) -> i32 {
    let t_y = (random.next() % depth) as i32;
    let t_x = (random.next() % width) as i32;
    pack_level_change_voxel(t_x, t_y)
}

/// Packed level-up chunk per level. Consecutive entries always differ.
///
/// Single-chunk dungeons cannot satisfy that, so every level reuses chunk 0 there.
pub fn generate_transitions(
    level_count: usize,
    width_chunks: usize,
    depth_chunks: usize,
    random: &mut ArenaRandom,
) -> Vec<i32> {
    let (width, depth) = (width_chunks as u32, depth_chunks as u32);
    let mut transitions = Vec::with_capacity(level_count);
    if level_count == 0 {
        return transitions;
    }
    transitions.push(next_transition(random, width, depth));

    for _ in 1..level_count {
        let previous = transitions[transitions.len() - 1];
        let mut next = next_transition(random, width, depth);
        if width * depth > 1 {
            while next == previous {
                next = next_transition(random, width, depth);
            }
        }
        transitions.push(next);
    }
    transitions
}

fn level_change_byte(index: Option<i32>, level_up: bool, warnings: &mut DecodeWarnings) -> u8 {
    let index = index.unwrap_or_else(|| {
        warnings.push(DecodeWarning::MissingLevelChangeIndex { level_up });
        0
    });
    (index + 1) as u8
}

fn set_source(grid: &mut Grid2<VoxelCode>, x: i32, y: i32, code: VoxelCode) {
    if let (Ok(x), Ok(y)) = (usize::try_from(x), usize::try_from(y)) {
        grid.set_if_inside(x, y, code);
    }
}

/// Compose every level of a dungeon.
pub fn generate_dungeon(
    params: &DungeonParams,
    library: &PrefabLibrary,
    inf: &InfData,
    warnings: &mut DecodeWarnings,
) -> Result<DungeonLayout, GenerationError> {
    if params.width_chunks == 0 || params.depth_chunks == 0 {
        return Err(GenerationError::InvalidDimensions(format!(
            "dungeon must be at least 1x1 chunks, got {}x{}",
            params.width_chunks, params.depth_chunks
        )));
    }

    let span = info_span!("generate_dungeon", seed = params.seed);
    let _enter = span.enter();

    let mut random = ArenaRandom::new(params.seed);
    let level_count = dungeon_level_count(params.is_artifact, &mut random);
    let seed2 = random.seed();
    let transitions = generate_transitions(
        level_count,
        params.width_chunks,
        params.depth_chunks,
        &mut random,
    );

    let width = params.width_chunks * DUNGEON_CHUNK_DIM;
    let depth = params.depth_chunks * DUNGEON_CHUNK_DIM;
    let mut levels = Vec::with_capacity(level_count);

    for (i, &level_up) in transitions.iter().enumerate() {
        random.srand(seed2.wrapping_add(i as u32));
        let level_down = transitions.get(i + 1).copied();

        let mut level = MifLevel::empty(width, depth, false);
        level.name = format!("LEVEL{}", i + 1);

        let tile_set = random.next() % TILE_SETS;
        for row in 0..params.depth_chunks {
            let z_offset = (row * DUNGEON_CHUNK_DIM) as i32;
            for column in 0..params.width_chunks {
                let x_offset = (column * DUNGEON_CHUNK_DIM) as i32;
                let block = (tile_set * BLOCKS_PER_TILE_SET
                    + random.next() % BLOCKS_PER_TILE_SET) as usize;
                let chunk = library
                    .dungeon_chunk(block)
                    .ok_or(GenerationError::MissingDungeonChunk { index: block })?;
                debug!(level = i, block, row, column, "placing dungeon chunk");

                for (x, z, &code) in chunk.flor.iter() {
                    set_source(&mut level.flor, x_offset + x as i32, z_offset + z as i32, code);
                }
                for (x, z, &code) in chunk.map1.iter() {
                    set_source(&mut level.map1, x_offset + x as i32, z_offset + z as i32, code);
                }
                level.locks.extend(chunk.locks.iter().map(|lock| MifLock {
                    x: x_offset + lock.x,
                    y: z_offset + lock.y,
                    lock_level: lock.lock_level,
                }));
                level.triggers.extend(chunk.triggers.iter().map(|trigger| MifTrigger {
                    x: x_offset + trigger.x,
                    y: z_offset + trigger.y,
                    text_index: trigger.text_index,
                    sound_index: trigger.sound_index,
                }));
            }
        }

        draw_perimeter(&mut level.map1);

        let up_byte = level_change_byte(inf.level_up_index, true, warnings);
        let (up_x, up_z) = unpack_level_change_voxel(level_up);
        set_source(
            &mut level.map1,
            offset_level_change_voxel(up_x),
            offset_level_change_voxel(up_z),
            convert_level_change_voxel(up_byte),
        );

        if let Some(level_down) = level_down {
            let down_byte = level_change_byte(inf.level_down_index, false, warnings);
            let (down_x, down_z) = unpack_level_change_voxel(level_down);
            set_source(
                &mut level.map1,
                offset_level_change_voxel(down_x),
                offset_level_change_voxel(down_z),
                convert_level_change_voxel(down_byte),
            );
        }

        levels.push(level);
    }

    let (first_x, first_z) = unpack_level_change_voxel(transitions[0]);
    let start_point = OriginalInt2::new(
        offset_level_change_voxel(first_x),
        offset_level_change_voxel(first_z),
    );

    Ok(DungeonLayout {
        levels,
        transitions,
        start_point,
    })
}

/// Top and bottom rows first, then the left and right columns between them.
fn draw_perimeter(map1: &mut Grid2<VoxelCode>) {
    let (width, depth) = (map1.width(), map1.height());
    if width == 0 || depth == 0 {
        return;
    }
    for x in 0..width {
        map1.set(x, 0, PERIMETER_VOXEL);
        map1.set(x, depth - 1, PERIMETER_VOXEL);
    }
    for z in 1..depth.saturating_sub(1) {
        map1.set(0, z, PERIMETER_VOXEL);
        map1.set(width - 1, z, PERIMETER_VOXEL);
    }
}
