//! Tables extracted from the game executable.

use serde::{Deserialize, Serialize};

use crate::loader::DataPack;
use crate::{check_len, AssetError};

/// Number of tavern prefixes and suffixes.
pub const TAVERN_NAME_PARTS: usize = 23;
/// Number of equipment store prefixes.
pub const EQUIPMENT_PREFIXES: usize = 20;
/// Number of equipment store suffixes.
pub const EQUIPMENT_SUFFIXES: usize = 10;
/// Suffix counts for the three temple models.
pub const TEMPLE_MODEL_SUFFIX_COUNTS: [usize; 3] = [5, 9, 10];
/// Number of interior .MIF prefixes.
pub const MENU_MIF_PREFIXES: usize = 11;

/// All executable tables needed by generation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExeTables {
    /// Building name parts.
    pub city_gen: CityGenTables,
    /// Raised platform offsets and sizes.
    pub wall_heights: WallHeightTables,
    /// Wilderness block ID lists.
    pub wilderness: WildBlockLists,
    /// Location-related strings.
    pub locations: LocationTables,
}

impl DataPack for ExeTables {
    fn validate(&self) -> Result<(), AssetError> {
        self.city_gen.validate()?;
        self.wilderness.validate()?;
        self.locations.validate()
    }
}

/// Prefix/suffix tables for tavern, equipment store and temple names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CityGenTables {
    /// Tavern name prefixes.
    pub tavern_prefixes: Vec<String>,
    /// Tavern suffixes used in coastal cities.
    pub tavern_marine_suffixes: Vec<String>,
    /// Tavern suffixes used inland and in the wilderness.
    pub tavern_suffixes: Vec<String>,
    /// One prefix per temple model.
    pub temple_prefixes: Vec<String>,
    /// Suffixes for temple model 0.
    pub temple1_suffixes: Vec<String>,
    /// Suffixes for temple model 1.
    pub temple2_suffixes: Vec<String>,
    /// Suffixes for temple model 2.
    pub temple3_suffixes: Vec<String>,
    /// Equipment store prefixes (may contain `%ct`, `%ef`, `%n`).
    pub equipment_prefixes: Vec<String>,
    /// Equipment store suffixes.
    pub equipment_suffixes: Vec<String>,
}

impl CityGenTables {
    /// Check that every table has the size the name generator indexes into.
    pub fn validate(&self) -> Result<(), AssetError> {
        check_len("tavern_prefixes", &self.tavern_prefixes, TAVERN_NAME_PARTS)?;
        check_len(
            "tavern_marine_suffixes",
            &self.tavern_marine_suffixes,
            TAVERN_NAME_PARTS,
        )?;
        check_len("tavern_suffixes", &self.tavern_suffixes, TAVERN_NAME_PARTS)?;
        check_len("temple_prefixes", &self.temple_prefixes, 3)?;
        check_len(
            "temple1_suffixes",
            &self.temple1_suffixes,
            TEMPLE_MODEL_SUFFIX_COUNTS[0],
        )?;
        check_len(
            "temple2_suffixes",
            &self.temple2_suffixes,
            TEMPLE_MODEL_SUFFIX_COUNTS[1],
        )?;
        check_len(
            "temple3_suffixes",
            &self.temple3_suffixes,
            TEMPLE_MODEL_SUFFIX_COUNTS[2],
        )?;
        check_len(
            "equipment_prefixes",
            &self.equipment_prefixes,
            EQUIPMENT_PREFIXES,
        )?;
        check_len(
            "equipment_suffixes",
            &self.equipment_suffixes,
            EQUIPMENT_SUFFIXES,
        )
    }

    /// Suffix table for a temple model (0..3).
    pub fn temple_suffixes(&self, model: usize) -> &[String] {
        match model {
            0 => &self.temple1_suffixes,
            1 => &self.temple2_suffixes,
            _ => &self.temple3_suffixes,
        }
    }
}

/// Raised platform height tables, in original units (128 per voxel).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WallHeightTables {
    /// Interior offsets by height index.
    pub box1a: [i32; 8],
    /// City offsets by height index.
    pub box1b: [i32; 8],
    /// Wilderness offsets by height index.
    pub box1c: [i32; 8],
    /// Interior sizes by thickness index.
    pub box2a: [i32; 16],
    /// City sizes by thickness index.
    pub box2b: [i32; 16],
}

/// Wilderness block ID lists the index generator draws from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WildBlockLists {
    /// Plain terrain.
    pub normal_blocks: Vec<u8>,
    /// Small settlements.
    pub village_blocks: Vec<u8>,
    /// Dungeon entrances.
    pub dungeon_blocks: Vec<u8>,
    /// Roadside taverns.
    pub tavern_blocks: Vec<u8>,
    /// Shrines and temples.
    pub temple_blocks: Vec<u8>,
}

impl WildBlockLists {
    /// Every list must be non-empty since draws are taken modulo its length.
    pub fn validate(&self) -> Result<(), AssetError> {
        let lists = [
            ("normal_blocks", &self.normal_blocks),
            ("village_blocks", &self.village_blocks),
            ("dungeon_blocks", &self.dungeon_blocks),
            ("tavern_blocks", &self.tavern_blocks),
            ("temple_blocks", &self.temple_blocks),
        ];
        for (name, list) in lists {
            if list.is_empty() {
                return Err(AssetError::Invalid(format!("{name} must not be empty")));
            }
        }
        Ok(())
    }
}

/// Location strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocationTables {
    /// Interior .MIF prefixes, indexed by [`arenagen_core::MenuType::mif_prefix_index`].
    pub menu_mif_prefixes: Vec<String>,
    /// Interior used when the center province's palace is entered.
    pub final_dungeon_mif_name: String,
}

impl LocationTables {
    fn validate(&self) -> Result<(), AssetError> {
        check_len(
            "menu_mif_prefixes",
            &self.menu_mif_prefixes,
            MENU_MIF_PREFIXES,
        )
    }
}
