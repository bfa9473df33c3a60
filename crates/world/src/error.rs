use arenagen_core::VoxelCode;
use serde::Serialize;
use thiserror::Error;

use crate::voxel_decode::ChasmKind;

/// Missing required assets. Fatal for the generation call that hit them.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GenerationError {
    #[error("city block {name} is not in the prefab library")]
    MissingCityBlock { name: String },
    #[error("dungeon chunk {index} is not in the prefab library")]
    MissingDungeonChunk { index: usize },
    #[error("wilderness chunk {id} is not in the prefab library")]
    MissingWildChunk { id: u8 },
    #[error("wilderness block list {list} is empty")]
    EmptyWildBlockList { list: &'static str },
    #[error("invalid dimensions: {0}")]
    InvalidDimensions(String),
}

/// Recoverable data problems. Generation continues with a default.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Error)]
#[serde(rename_all = "snake_case")]
pub enum DecodeWarning {
    #[error("missing {kind:?} chasm texture index, using 0")]
    MissingChasmIndex { kind: ChasmKind },
    #[error("missing *BOXSIDE {key} for raised platform side, using 0")]
    MissingBoxSide { key: u8 },
    #[error("missing *BOXCAP {key} for raised platform cap, using 0")]
    MissingBoxCap { key: u8 },
    #[error("missing *CEILING texture for raised platform floor, using 0")]
    MissingCeilingTexture,
    #[error("voxel texture id {id} out of range, wrapped to {wrapped}")]
    TextureIdWrapped { id: i32, wrapped: i32 },
    #[error("no .INF voxel texture {id}, using entry 0")]
    UnknownVoxelTexture { id: i32 },
    #[error("edge voxel {code:#06x} has invalid texture index {texture}")]
    NegativeEdgeTexture { code: VoxelCode, texture: i32 },
    #[error("door voxel {code:#06x} has unrecognized type {door_type:#x}, treating as splitting")]
    UnknownDoorType { code: VoxelCode, door_type: u16 },
    #[error("unsupported voxel type {nibble:#x} in {code:#06x}")]
    UnsupportedVoxelType { code: VoxelCode, nibble: u8 },
    #[error("unrecognized *MENU id {menu_id}")]
    UnknownMenuId { menu_id: i32 },
    #[error("missing *{} index, using 0", level_change_key(.level_up))]
    MissingLevelChangeIndex { level_up: bool },
    #[error("no palace graphics found to revise")]
    PalaceMarkerMissing,
    #[error("temple override targets building name {index} but only {count} exist")]
    TempleOverrideOutOfRange { index: usize, count: usize },
}

fn level_change_key(level_up: &bool) -> &'static str {
    if *level_up {
        "LEVELUP"
    } else {
        "LEVELDOWN"
    }
}

/// Warning sink threaded through decoding and assembly. Every warning is also logged.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct DecodeWarnings(Vec<DecodeWarning>);

impl DecodeWarnings {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, warning: DecodeWarning) {
        tracing::warn!(%warning, "recoverable data problem");
        self.0.push(warning);
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn first(&self) -> Option<&DecodeWarning> {
        self.0.first()
    }

    pub fn iter(&self) -> impl Iterator<Item = &DecodeWarning> {
        self.0.iter()
    }

    pub fn as_slice(&self) -> &[DecodeWarning] {
        &self.0
    }

    pub fn into_vec(self) -> Vec<DecodeWarning> {
        self.0
    }

    /// Whether any recorded warning satisfies `predicate`.
    pub fn contains(&self, predicate: impl Fn(&DecodeWarning) -> bool) -> bool {
        self.0.iter().any(predicate)
    }
}
