//! Prefab pool the generators copy from: city blocks, dungeon chunks and wilderness chunks.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::loader::DataPack;
use crate::mif::{MifLevel, MifMap, RmdChunk};
use crate::AssetError;

/// Dungeon chunk dimension in voxels.
pub const DUNGEON_CHUNK_DIM: usize = 32;

/// Read-only prefab pool, looked up by name or ID.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PrefabLibrary {
    /// City block .MIF files keyed by uppercase filename, e.g. `EQBD3A.MIF`.
    pub city_blocks: BTreeMap<String, MifMap>,
    /// `RANDOM1.MIF`: one 32x32 level per dungeon chunk.
    pub dungeon_chunks: Option<MifMap>,
    /// Wilderness RMD chunks keyed by block ID.
    pub wild_chunks: BTreeMap<u8, RmdChunk>,
}

impl PrefabLibrary {
    /// First level of a city block, case-insensitive.
    pub fn city_block(&self, name: &str) -> Option<&MifLevel> {
        self.city_blocks
            .get(name)
            .or_else(|| self.city_blocks.get(&name.to_ascii_uppercase()))
            .and_then(|map| map.levels.first())
    }

    /// Dungeon chunk by block index.
    pub fn dungeon_chunk(&self, index: usize) -> Option<&MifLevel> {
        self.dungeon_chunks
            .as_ref()
            .and_then(|map| map.levels.get(index))
    }

    /// Wilderness chunk by block ID.
    pub fn wild_chunk(&self, id: u8) -> Option<&RmdChunk> {
        self.wild_chunks.get(&id)
    }
}

impl DataPack for PrefabLibrary {
    fn validate(&self) -> Result<(), AssetError> {
        for map in self.city_blocks.values() {
            map.validate()?;
        }
        if let Some(chunks) = &self.dungeon_chunks {
            chunks.validate()?;
            if chunks.width() != DUNGEON_CHUNK_DIM || chunks.depth() != DUNGEON_CHUNK_DIM {
                return Err(AssetError::Invalid(format!(
                    "dungeon chunks are {}x{}, expected {DUNGEON_CHUNK_DIM}x{DUNGEON_CHUNK_DIM}",
                    chunks.width(),
                    chunks.depth()
                )));
            }
        }
        for chunk in self.wild_chunks.values() {
            chunk.validate()?;
        }
        Ok(())
    }
}
