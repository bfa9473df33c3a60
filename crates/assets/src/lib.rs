#![warn(missing_docs)]
//! Data-pack schemas and validation for everything generation consumes but does not own:
//! executable string/height tables, NPC name rules, INF tables, parsed MIF levels, RMD
//! wilderness chunks, the prefab library and location definitions.
//!
//! The container readers that produce these from the original game files live elsewhere;
//! this crate reads their JSON exports.

mod exe;
mod inf;
mod loader;
mod location;
mod mif;
mod names;
mod prefab;

pub use exe::{
    CityGenTables, ExeTables, LocationTables, WallHeightTables, WildBlockLists,
    EQUIPMENT_PREFIXES, EQUIPMENT_SUFFIXES, MENU_MIF_PREFIXES, TAVERN_NAME_PARTS,
    TEMPLE_MODEL_SUFFIX_COUNTS,
};
pub use inf::{InfCeiling, InfData, InfText, InfVoxelTexture};
pub use loader::{load_pack, parse_pack, DataPack};
pub use location::{
    local_city_point, main_quest_temple_override, ruler_is_male, CityDefinition,
    MainQuestTempleOverride,
};
pub use mif::{MifLevel, MifLock, MifMap, MifTrigger, RmdChunk, RMD_DEPTH, RMD_WIDTH};
pub use names::{NameRule, NameTables};
pub use prefab::{PrefabLibrary, DUNGEON_CHUNK_DIM};

use thiserror::Error;

/// Errors emitted while loading data packs.
#[derive(Debug, Error)]
pub enum AssetError {
    /// Wrap IO errors when reading packs.
    #[error("failed to read data pack: {0}")]
    Io(#[from] std::io::Error),
    /// Wrap serde parsing issues.
    #[error("failed to parse data pack: {0}")]
    Parse(#[from] serde_json::Error),
    /// A fixed-size table has the wrong number of entries.
    #[error("table {table} has {actual} entries, expected {expected}")]
    TableLength {
        /// Table name.
        table: &'static str,
        /// Required entry count.
        expected: usize,
        /// Entry count found in the pack.
        actual: usize,
    },
    /// Validation errors describing why a pack is inconsistent.
    #[error("invalid data pack: {0}")]
    Invalid(String),
}

pub(crate) fn check_len<T>(
    table: &'static str,
    values: &[T],
    expected: usize,
) -> Result<(), AssetError> {
    if values.len() != expected {
        return Err(AssetError::TableLength {
            table,
            expected,
            actual: values.len(),
        });
    }
    Ok(())
}
