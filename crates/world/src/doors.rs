//! Door-derived data: interior .MIF names, lock levels, sounds and save numbers.
//!
//! Positions here are source coordinates: `x` is the column, `y` the row.

use arenagen_assets::{CityDefinition, LocationTables};
use arenagen_core::{ror16, ArenaRandom, CityType, LevelInt3, MenuType, OriginalInt2};
use serde::Serialize;

use crate::level::{LevelInfoDefinition, VoxelDefId};
use crate::voxel_decode::{DoorKind, VoxelDefinition};

const PALACE_VARIANTS: u32 = 3;
const INTERIOR_VARIANTS: u16 = 8;

/// Position hash every per-door formula starts from.
pub const fn door_voxel_offset(x: i32, y: i32) -> u16 {
    ((y << 8) + (x << 1)) as u16
}

/// Lock level in `1..=10`. Reseeds `random`.
pub fn door_lock_level(x: i32, y: i32, random: &mut ArenaRandom) -> i32 {
    let offset = u32::from(door_voxel_offset(x, y));
    random.srand(offset + (offset << 16));
    (random.next() % 10) as i32 + 1
}

/// City facts interior entrance names depend on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EntranceContext {
    pub ruler_seed: u32,
    pub palace_is_main_quest_dungeon: bool,
    pub city_type: CityType,
}

impl EntranceContext {
    pub fn from_city(city: &CityDefinition) -> Self {
        Self {
            ruler_seed: city.ruler_seed,
            palace_is_main_quest_dungeon: city.palace_is_main_quest_dungeon,
            city_type: city.city_type,
        }
    }
}

/// Interior .MIF behind the door at `(x, y)`, e.g. `TAVERN4.MIF`.
///
/// `None` for menus without an interior prefix (gates, wilderness dungeons, unmapped menus).
pub fn door_voxel_mif_name(
    x: i32,
    y: i32,
    menu_type: MenuType,
    ctx: &EntranceContext,
    tables: &LocationTables,
) -> Option<String> {
    if ctx.palace_is_main_quest_dungeon && menu_type == MenuType::Palace {
        return Some(tables.final_dungeon_mif_name.to_uppercase());
    }

    let index = menu_type.mif_prefix_index(ctx.city_type)?;
    let prefix = tables.menu_mif_prefixes.get(index)?.to_uppercase();
    if prefix.is_empty() {
        return None;
    }

    let variant = if menu_type == MenuType::Palace {
        ((ctx.ruler_seed >> 8) & 0xFFFF) % PALACE_VARIANTS
    } else {
        let offset = door_voxel_offset(x, y);
        u32::from((ror16(offset, 4) ^ offset) % INTERIOR_VARIANTS)
    };
    Some(format!("{prefix}{}.MIF", variant + 1))
}

impl DoorKind {
    pub const fn open_sound_index(self) -> Option<i32> {
        match self {
            Self::Swinging => Some(6),
            Self::Sliding => Some(14),
            Self::Raising => Some(15),
            Self::Splitting => None,
        }
    }

    pub const fn close_sound_index(self) -> Option<i32> {
        match self {
            Self::Swinging => Some(5),
            Self::Sliding => Some(14),
            Self::Raising => Some(15),
            Self::Splitting => None,
        }
    }

    /// Only swinging doors make a sound once fully closed.
    pub const fn sounds_on_closed(self) -> bool {
        matches!(self, Self::Swinging)
    }
}

/// Sound indices of one door definition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DoorSounds {
    pub voxel_id: VoxelDefId,
    pub kind: DoorKind,
    pub open: Option<i32>,
    pub close: Option<i32>,
    pub sounds_on_closed: bool,
}

/// Sounds for every door definition in the pool, in definition order.
pub fn door_sounds(info: &LevelInfoDefinition) -> Vec<DoorSounds> {
    info.voxel_defs()
        .iter()
        .enumerate()
        .filter_map(|(id, def)| match def {
            VoxelDefinition::Door { kind, .. } => Some(DoorSounds {
                voxel_id: id as VoxelDefId,
                kind: *kind,
                open: kind.open_sound_index(),
                close: kind.close_sound_index(),
                sounds_on_closed: kind.sounds_on_closed(),
            }),
            _ => None,
        })
        .collect()
}

/// One interior entrance of an assembled map and the per-door facts read when entering it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EntranceReport {
    pub level: usize,
    pub position: LevelInt3,
    /// Source `(column, row)` the door formulas use.
    pub door: OriginalInt2,
    pub menu_type: MenuType,
    pub mif_name: Option<String>,
    pub building_name: Option<String>,
    pub lock_level: i32,
    /// Service interiors (named buildings) only.
    pub save_number: Option<i32>,
    /// Wilderness dungeons only.
    pub dungeon_seed: Option<u32>,
}

/// Save slot for a city service interior.
pub const fn service_save_number(door_x: i32, door_y: i32) -> i32 {
    (door_y << 8) + door_x
}

/// Save slot for a wilderness service interior.
pub const fn wild_service_save_number(wild_x: i32, wild_y: i32) -> i32 {
    (wild_y << 16) + wild_x
}
