//! Parsed INF tables: per-level texture, sound, text and special-voxel indices.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::loader::DataPack;
use crate::AssetError;

/// One entry of the voxel texture list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InfVoxelTexture {
    /// Image or texture-set filename.
    pub filename: String,
    /// Index into a .SET file, when `filename` names one.
    #[serde(default)]
    pub set_index: Option<u32>,
}

/// `*CEILING` parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct InfCeiling {
    /// Ceiling texture index, if declared.
    pub texture_index: Option<i32>,
    /// Ceiling height in original units; determines wall and dry chasm height.
    pub height: i32,
    /// Main floor box scale. Box sizes become `(size * scale) / 256`.
    pub box_scale: Option<i32>,
    /// Outdoor dungeons have no ceiling layer.
    pub outdoor_dungeon: bool,
}

impl InfCeiling {
    /// Height used when the INF omits one.
    pub const DEFAULT_HEIGHT: i32 = 100;
}

impl Default for InfCeiling {
    fn default() -> Self {
        Self {
            texture_index: None,
            height: Self::DEFAULT_HEIGHT,
            box_scale: None,
            outdoor_dungeon: false,
        }
    }
}

/// Text shown by a trigger.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InfText {
    /// Message body.
    pub text: String,
    /// Only shown the first time the trigger fires.
    #[serde(default)]
    pub displayed_once: bool,
}

/// Everything the decoder and assembler read from an INF file.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct InfData {
    /// Source filename, for diagnostics.
    pub name: String,
    /// Voxel textures by texture ID.
    pub voxel_textures: Vec<InfVoxelTexture>,
    /// `*BOXCAP` texture IDs by cap key (0..16).
    pub box_caps: BTreeMap<u8, i32>,
    /// `*BOXSIDE` texture IDs by side key (0..16).
    pub box_sides: BTreeMap<u8, i32>,
    /// `*MENU` indices by wall texture ID.
    pub menus: BTreeMap<i32, i32>,
    /// Ceiling parameters.
    pub ceiling: InfCeiling,
    /// `*DRYCHASM` texture ID.
    pub dry_chasm_index: Option<i32>,
    /// `*WETCHASM` texture ID.
    pub wet_chasm_index: Option<i32>,
    /// `*LAVACHASM` texture ID.
    pub lava_chasm_index: Option<i32>,
    /// `*LEVELUP` texture ID.
    pub level_up_index: Option<i32>,
    /// `*LEVELDOWN` texture ID.
    pub level_down_index: Option<i32>,
    /// Trigger texts by text index.
    pub texts: BTreeMap<i32, InfText>,
    /// Sound filenames by sound index.
    pub sounds: BTreeMap<i32, String>,
}

impl InfData {
    /// Voxel texture entry for `id`, if in range.
    pub fn voxel_texture(&self, id: i32) -> Option<&InfVoxelTexture> {
        usize::try_from(id)
            .ok()
            .and_then(|index| self.voxel_textures.get(index))
    }

    /// `*BOXCAP` texture for a cap key.
    pub fn box_cap(&self, key: u8) -> Option<i32> {
        self.box_caps.get(&key).copied()
    }

    /// `*BOXSIDE` texture for a side key.
    pub fn box_side(&self, key: u8) -> Option<i32> {
        self.box_sides.get(&key).copied()
    }

    /// `*MENU` index attached to a wall texture.
    pub fn menu_index(&self, texture_id: i32) -> Option<i32> {
        self.menus.get(&texture_id).copied()
    }

    /// Trigger text by index.
    pub fn text(&self, index: i32) -> Option<&InfText> {
        self.texts.get(&index)
    }

    /// Sound filename by index.
    pub fn sound(&self, index: i32) -> Option<&str> {
        self.sounds.get(&index).map(String::as_str)
    }
}

impl DataPack for InfData {
    fn validate(&self) -> Result<(), AssetError> {
        if self.voxel_textures.is_empty() {
            return Err(AssetError::Invalid(format!(
                "{} declares no voxel textures",
                self.name
            )));
        }
        if self.ceiling.height <= 0 {
            return Err(AssetError::Invalid(format!(
                "{} has non-positive ceiling height {}",
                self.name, self.ceiling.height
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse_pack;

    #[test]
    fn parses_minimal_inf_with_defaults() {
        let inf: InfData = parse_pack(
            r#"{
                "name": "TEST.INF",
                "voxel_textures": [{"filename": "wall.img"}, {"filename": "set.set", "set_index": 2}],
                "menus": {"11": 1},
                "box_sides": {"3": 7}
            }"#,
        )
        .expect("inf parses");
        assert_eq!(inf.ceiling.height, InfCeiling::DEFAULT_HEIGHT);
        assert!(!inf.ceiling.outdoor_dungeon);
        assert_eq!(inf.menu_index(11), Some(1));
        assert_eq!(inf.menu_index(12), None);
        assert_eq!(inf.box_side(3), Some(7));
        assert_eq!(inf.voxel_texture(1).and_then(|t| t.set_index), Some(2));
        assert!(inf.voxel_texture(-1).is_none());
    }

    #[test]
    fn rejects_inf_without_textures() {
        let err = parse_pack::<InfData>(r#"{"name": "EMPTY.INF"}"#).unwrap_err();
        assert!(matches!(err, AssetError::Invalid(_)));
    }
}
