//! City location definitions and the seed helpers derived from them.

use arenagen_core::{CityType, OriginalInt2};
use serde::{Deserialize, Serialize};

use crate::loader::DataPack;
use crate::AssetError;

/// Special-cased temple name used by two main quest cities.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MainQuestTempleOverride {
    /// Temple model (prefix) index.
    pub model_index: usize,
    /// Suffix index within that model's list.
    pub suffix_index: usize,
    /// Position in the city's combined building name list to overwrite.
    pub menu_names_index: usize,
}

/// Temple override for a global city ID, if that city has one.
pub fn main_quest_temple_override(global_city_id: u32) -> Option<MainQuestTempleOverride> {
    match global_city_id {
        2 => Some(MainQuestTempleOverride {
            model_index: 1,
            suffix_index: 7,
            menu_names_index: 23,
        }),
        224 => Some(MainQuestTempleOverride {
            model_index: 2,
            suffix_index: 8,
            menu_names_index: 32,
        }),
        _ => None,
    }
}

/// City position within its province, packed into the city seed as `(x << 16) | y`.
pub const fn local_city_point(city_seed: u32) -> OriginalInt2 {
    OriginalInt2::new((city_seed >> 16) as i32, (city_seed & 0xFFFF) as i32)
}

/// Ruler sex derived from the ruler seed.
pub const fn ruler_is_male(ruler_seed: u32) -> bool {
    (ruler_seed & 3) != 0
}

/// Everything city, palace, name and wilderness generation needs to know about one city.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CityDefinition {
    /// Display name.
    pub name: String,
    /// Skeleton .MIF filename.
    pub map_filename: String,
    /// City, town or village.
    pub city_type: CityType,
    /// Substituted for `%ct` in equipment store names.
    pub type_display_name: String,
    /// City block layout and name seed.
    pub city_seed: u32,
    /// Palace variant and ruler sex seed.
    #[serde(default)]
    pub ruler_seed: u32,
    /// Wilderness chunk selection seed.
    #[serde(default)]
    pub wild_seed: u32,
    /// Wilderness dungeon seed base.
    #[serde(default)]
    pub province_seed: u32,
    /// Race used for NPC names.
    #[serde(default)]
    pub race_id: usize,
    /// Block slots the skeleton already occupies.
    #[serde(default)]
    pub reserved_blocks: Vec<u8>,
    /// Top-left of the block area in the skeleton, in source coordinates.
    pub block_start: OriginalInt2,
    /// Coastal cities use marine tavern suffixes.
    #[serde(default)]
    pub coastal: bool,
    /// Premade cities skip block generation.
    #[serde(default)]
    pub premade: bool,
    /// The palace leads to the final dungeon.
    #[serde(default)]
    pub palace_is_main_quest_dungeon: bool,
    /// Temple name override.
    #[serde(default)]
    pub temple_override: Option<MainQuestTempleOverride>,
    /// Overrides the block count implied by `city_type`.
    #[serde(default)]
    pub blocks_per_side: Option<usize>,
}

impl CityDefinition {
    /// Blocks per side of the city grid.
    pub fn blocks_per_side(&self) -> usize {
        self.blocks_per_side
            .unwrap_or_else(|| self.city_type.blocks_per_side())
    }

    /// City position within its province.
    pub fn local_point(&self) -> OriginalInt2 {
        local_city_point(self.city_seed)
    }

    /// Ruler sex.
    pub fn ruler_is_male(&self) -> bool {
        ruler_is_male(self.ruler_seed)
    }

    /// Seed for the dungeon entered from wilderness block `(x, y)`.
    pub fn wild_dungeon_seed(&self, wild_x: i32, wild_y: i32) -> u32 {
        let offset = ((wild_y << 6) + wild_x) & 0xFFFF;
        self.province_seed.wrapping_add(offset as u32)
    }
}

impl DataPack for CityDefinition {
    fn validate(&self) -> Result<(), AssetError> {
        let blocks = self.blocks_per_side();
        if blocks == 0 {
            return Err(AssetError::Invalid(format!(
                "{} has no city blocks",
                self.name
            )));
        }
        if self.block_start.x < 0 || self.block_start.y < 0 {
            return Err(AssetError::Invalid(format!(
                "{} has negative block start {:?}",
                self.name, self.block_start
            )));
        }
        Ok(())
    }
}
