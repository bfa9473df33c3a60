//! Packed 16-bit voxel codes to typed voxel definitions.
//!
//! FLOR codes carry a floor texture in the high byte and an optional flat in the low byte.
//! MAP1 codes are either plain walls/raised platforms (bit 15 clear) or a special voxel
//! selected by the top nibble. MAP2 codes are ceiling walls with a vertical run length.

use arenagen_assets::{InfData, InfVoxelTexture, WallHeightTables};
use arenagen_core::{most_sig_nibble, MapType, VoxelCode};
use serde::{Deserialize, Serialize};

use crate::error::{DecodeWarning, DecodeWarnings};
use crate::level_utils::{
    ceiling_height_to_scale, is_floor_wild_wall_colored, map2_voxel_height, ARENA_UNITS,
    TOTAL_VOXEL_IDS,
};

/// FLOR texture IDs reserved for chasms.
pub const DRY_CHASM: i32 = 0x0C;
pub const WET_CHASM: i32 = 0x0D;
pub const LAVA_CHASM: i32 = 0x0E;

/// Resolved voxel texture.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TextureRef {
    /// Texture ID after wrapping into `0..64`. IDs with no INF entry become 0.
    pub id: i32,
    /// Uppercase image or .SET filename.
    pub filename: String,
    /// Frame within a .SET file.
    pub set_index: Option<u32>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WallKind {
    Solid,
    Menu,
    LevelUp,
    LevelDown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChasmKind {
    Dry,
    Wet,
    Lava,
}

impl ChasmKind {
    /// Chasm kind for a FLOR texture ID, if it is one of the sentinels.
    pub const fn from_floor_texture(texture_id: i32) -> Option<Self> {
        match texture_id {
            DRY_CHASM => Some(Self::Dry),
            WET_CHASM => Some(Self::Wet),
            LAVA_CHASM => Some(Self::Lava),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DoorKind {
    Swinging,
    Sliding,
    Raising,
    Splitting,
}

/// Which side of its voxel an edge is drawn on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VoxelFacing {
    PositiveX,
    NegativeX,
    PositiveZ,
    NegativeZ,
}

/// A decoded voxel. Immutable once created; deduplicated by the assembler.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum VoxelDefinition {
    None,
    Wall {
        side: TextureRef,
        floor: TextureRef,
        ceiling: TextureRef,
        menu_id: Option<i32>,
        kind: WallKind,
    },
    Floor {
        texture: TextureRef,
        wild_wall_colored: bool,
    },
    Ceiling {
        texture: TextureRef,
    },
    Raised {
        side: TextureRef,
        floor: TextureRef,
        ceiling: TextureRef,
        y_offset: f64,
        y_size: f64,
        v_top: f64,
        v_bottom: f64,
    },
    Diagonal {
        texture: TextureRef,
        is_right_diagonal: bool,
    },
    TransparentWall {
        texture: TextureRef,
        collider: bool,
    },
    Edge {
        texture: TextureRef,
        y_offset: f64,
        collider: bool,
        flipped: bool,
        facing: VoxelFacing,
    },
    Chasm {
        texture: TextureRef,
        kind: ChasmKind,
    },
    Door {
        texture: TextureRef,
        kind: DoorKind,
    },
}

impl VoxelDefinition {
    pub fn is_none(&self) -> bool {
        matches!(self, Self::None)
    }

    /// Wall kind and menu ID, when this is a wall.
    pub fn wall(&self) -> Option<(WallKind, Option<i32>)> {
        match self {
            Self::Wall { kind, menu_id, .. } => Some((*kind, *menu_id)),
            _ => None,
        }
    }
}

/// A FLOR code decodes to a floor or chasm plus an optional flat.
#[derive(Debug, Clone, PartialEq)]
pub struct DecodedFloor {
    pub voxel: VoxelDefinition,
    pub flat_index: Option<i32>,
}

/// A MAP2 code decodes to a ceiling wall spanning `height` voxels from y = 2.
#[derive(Debug, Clone, PartialEq)]
pub struct DecodedCeiling {
    pub voxel: VoxelDefinition,
    pub height: i32,
}

/// Classification of a MAP1 code.
#[derive(Debug, Clone, PartialEq)]
pub enum Map1Voxel {
    Empty,
    Entity { flat_index: i32 },
    Voxel(VoxelDefinition),
}

/// Read-only tables a decode depends on.
#[derive(Debug, Clone, Copy)]
pub struct DecodeContext<'a> {
    pub inf: &'a InfData,
    pub heights: &'a WallHeightTables,
    pub map_type: MapType,
}

impl<'a> DecodeContext<'a> {
    pub fn new(inf: &'a InfData, heights: &'a WallHeightTables, map_type: MapType) -> Self {
        Self {
            inf,
            heights,
            map_type,
        }
    }

    pub fn decode_floor(&self, code: VoxelCode, warnings: &mut DecodeWarnings) -> DecodedFloor {
        let texture_id = i32::from((code & 0xFF00) >> 8);
        let voxel = match ChasmKind::from_floor_texture(texture_id) {
            Some(kind) => {
                let index = match kind {
                    ChasmKind::Dry => self.inf.dry_chasm_index,
                    ChasmKind::Wet => self.inf.wet_chasm_index,
                    ChasmKind::Lava => self.inf.lava_chasm_index,
                };
                let index = index.unwrap_or_else(|| {
                    warnings.push(DecodeWarning::MissingChasmIndex { kind });
                    0
                });
                VoxelDefinition::Chasm {
                    texture: self.texture(index, warnings),
                    kind,
                }
            }
            None => VoxelDefinition::Floor {
                texture: self.texture(texture_id, warnings),
                wild_wall_colored: is_floor_wild_wall_colored(texture_id, self.map_type),
            },
        };

        let flat = code & 0x00FF;
        DecodedFloor {
            voxel,
            flat_index: (flat > 0).then(|| i32::from(flat) - 1),
        }
    }

    pub fn decode_map1(&self, code: VoxelCode, warnings: &mut DecodeWarnings) -> Map1Voxel {
        if code == 0 {
            Map1Voxel::Empty
        } else if most_sig_nibble(code) == 0x8 {
            Map1Voxel::Entity {
                flat_index: i32::from(code & 0x00FF),
            }
        } else {
            Map1Voxel::Voxel(self.decode_wall(code, warnings))
        }
    }

    /// Decode a MAP1 voxel. Entity codes (nibble 0x8) produce no voxel.
    pub fn decode_wall(&self, code: VoxelCode, warnings: &mut DecodeWarnings) -> VoxelDefinition {
        if (code & 0x8000) == 0 {
            let msb = ((code & 0x7F00) >> 8) as u8;
            let lsb = (code & 0x007F) as u8;
            if msb == lsb {
                self.solid_wall(msb, warnings)
            } else {
                self.raised_platform(code, msb, warnings)
            }
        } else {
            match most_sig_nibble(code) {
                0x8 => VoxelDefinition::None,
                0x9 => VoxelDefinition::TransparentWall {
                    texture: self.texture(i32::from(code & 0x00FF) - 1, warnings),
                    collider: (code & 0x0100) == 0,
                },
                0xA => self.edge(code, warnings),
                0xB => self.door(code, warnings),
                0xD => VoxelDefinition::Diagonal {
                    texture: self.texture(i32::from(code & 0x00FF) - 1, warnings),
                    is_right_diagonal: (code & 0x0100) == 0,
                },
                nibble => {
                    warnings.push(DecodeWarning::UnsupportedVoxelType { code, nibble });
                    VoxelDefinition::None
                }
            }
        }
    }

    /// Strict form of [`Self::decode_wall`]: any warning is an error.
    pub fn try_decode_wall(&self, code: VoxelCode) -> Result<VoxelDefinition, DecodeWarning> {
        let mut warnings = DecodeWarnings::new();
        let voxel = self.decode_wall(code, &mut warnings);
        match warnings.into_vec().into_iter().next() {
            Some(warning) => Err(warning),
            None => Ok(voxel),
        }
    }

    pub fn decode_ceiling(&self, code: VoxelCode, warnings: &mut DecodeWarnings) -> DecodedCeiling {
        let texture = self.texture(i32::from(code & 0x007F) - 1, warnings);
        DecodedCeiling {
            voxel: VoxelDefinition::Wall {
                side: texture.clone(),
                floor: texture.clone(),
                ceiling: texture,
                menu_id: None,
                kind: WallKind::Solid,
            },
            height: map2_voxel_height(code),
        }
    }

    /// The ceiling filled in above levels without MAP2 data.
    pub fn default_ceiling(&self, warnings: &mut DecodeWarnings) -> VoxelDefinition {
        let texture_id = self.inf.ceiling.texture_index.unwrap_or(1);
        VoxelDefinition::Ceiling {
            texture: self.texture(texture_id, warnings),
        }
    }

    /// Wrap and resolve a texture ID against the INF texture list.
    pub fn texture(&self, id: i32, warnings: &mut DecodeWarnings) -> TextureRef {
        let mut id = id;
        if id >= TOTAL_VOXEL_IDS {
            let wrapped = id % TOTAL_VOXEL_IDS;
            warnings.push(DecodeWarning::TextureIdWrapped { id, wrapped });
            id = wrapped;
        }

        // Unknown IDs (including the -1 from a zero low byte) resolve to entry 0 as a whole.
        let entry: Option<&InfVoxelTexture> = match self.inf.voxel_texture(id) {
            Some(entry) => Some(entry),
            None => {
                warnings.push(DecodeWarning::UnknownVoxelTexture { id });
                id = 0;
                self.inf.voxel_textures.first()
            }
        };

        TextureRef {
            id,
            filename: entry
                .map(|entry| entry.filename.to_ascii_uppercase())
                .unwrap_or_default(),
            set_index: entry.and_then(|entry| entry.set_index),
        }
    }

    fn solid_wall(&self, msb: u8, warnings: &mut DecodeWarnings) -> VoxelDefinition {
        let texture_index = i32::from(msb) - 1;
        let menu_id = self.inf.menu_index(texture_index);
        let kind = if self.inf.level_up_index == Some(texture_index) {
            WallKind::LevelUp
        } else if self.inf.level_down_index == Some(texture_index) {
            WallKind::LevelDown
        } else if menu_id.is_some() {
            WallKind::Menu
        } else {
            WallKind::Solid
        };

        let texture = self.texture(texture_index, warnings);
        VoxelDefinition::Wall {
            side: texture.clone(),
            floor: texture.clone(),
            ceiling: texture,
            menu_id,
            kind,
        }
    }

    fn raised_platform(
        &self,
        code: VoxelCode,
        msb: u8,
        warnings: &mut DecodeWarnings,
    ) -> VoxelDefinition {
        let side_key = (code & 0x000F) as u8;
        let cap_key = ((code & 0x00F0) >> 4) as u8;

        let side_id = self.inf.box_side(side_key).unwrap_or_else(|| {
            warnings.push(DecodeWarning::MissingBoxSide { key: side_key });
            0
        });
        let floor_id = self.inf.ceiling.texture_index.unwrap_or_else(|| {
            warnings.push(DecodeWarning::MissingCeilingTexture);
            0
        });
        let cap_id = self.inf.box_cap(cap_key).unwrap_or_else(|| {
            warnings.push(DecodeWarning::MissingBoxCap { key: cap_key });
            0
        });

        let height_index = usize::from(msb & 0x07);
        let thickness_index = usize::from((msb & 0x78) >> 3);
        let box_scale = self.inf.ceiling.box_scale;
        let (base_offset, base_size) = match self.map_type {
            MapType::City => (
                self.heights.box1b[height_index],
                self.heights.box2b[thickness_index],
            ),
            MapType::Interior => {
                let size = self.heights.box2a[thickness_index];
                (
                    self.heights.box1a[height_index],
                    box_scale.map_or(size, |scale| (size * scale) / 256),
                )
            }
            MapType::Wilderness => (
                self.heights.box1c[height_index],
                (32 * box_scale.unwrap_or(192)) / 256,
            ),
        };

        let scale = ceiling_height_to_scale(self.inf.ceiling.height);
        let y_offset = (f64::from(base_offset) / ARENA_UNITS) / scale;
        let y_size = (f64::from(base_size) / ARENA_UNITS) / scale;
        let v_top = (1.0 - y_offset - y_size).max(0.0);
        let v_bottom = (v_top + y_size).min(1.0);

        VoxelDefinition::Raised {
            side: self.texture(side_id, warnings),
            floor: self.texture(floor_id, warnings),
            ceiling: self.texture(cap_id, warnings),
            y_offset,
            y_size,
            v_top,
            v_bottom,
        }
    }

    fn edge(&self, code: VoxelCode, warnings: &mut DecodeWarnings) -> VoxelDefinition {
        let texture_index = i32::from(code & 0x003F) - 1;
        if texture_index < 0 {
            warnings.push(DecodeWarning::NegativeEdgeTexture {
                code,
                texture: texture_index,
            });
        }

        let base_offset = i32::from((code & 0x0E00) >> 9);
        let full_offset = match self.map_type {
            MapType::Interior => base_offset * 8,
            MapType::City | MapType::Wilderness => (base_offset * 32) - 8,
        };

        let collider = (code & 0x0100) != 0;
        let facing = match (code & 0x00C0) >> 4 {
            0x0 => VoxelFacing::NegativeX,
            0x4 => VoxelFacing::PositiveZ,
            0x8 => VoxelFacing::PositiveX,
            _ => VoxelFacing::NegativeZ,
        };

        VoxelDefinition::Edge {
            texture: self.texture(texture_index, warnings),
            y_offset: f64::from(full_offset) / ARENA_UNITS,
            collider,
            flipped: collider,
            facing,
        }
    }

    fn door(&self, code: VoxelCode, warnings: &mut DecodeWarnings) -> VoxelDefinition {
        let texture_index = i32::from(code & 0x003F) - 1;
        let door_type = (code & 0x00C0) >> 4;
        let kind = match door_type {
            0x0 => DoorKind::Swinging,
            0x4 => DoorKind::Sliding,
            0x8 => DoorKind::Raising,
            _ => {
                warnings.push(DecodeWarning::UnknownDoorType { code, door_type });
                DoorKind::Splitting
            }
        };

        VoxelDefinition::Door {
            texture: self.texture(texture_index, warnings),
            kind,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use arenagen_assets::{InfCeiling, InfVoxelTexture};

    fn inf() -> InfData {
        let mut inf = InfData {
            name: "TEST.INF".into(),
            voxel_textures: (0..64)
                .map(|i| InfVoxelTexture {
                    filename: format!("wall{i}.img"),
                    set_index: (i == 5).then_some(2),
                })
                .collect(),
            ceiling: InfCeiling {
                texture_index: Some(3),
                height: 128,
                box_scale: None,
                outdoor_dungeon: false,
            },
            dry_chasm_index: Some(20),
            wet_chasm_index: Some(21),
            level_up_index: Some(30),
            level_down_index: Some(31),
            ..InfData::default()
        };
        inf.menus.insert(10, 1);
        inf.box_sides.insert(2, 7);
        inf.box_caps.insert(3, 8);
        inf
    }

    fn heights() -> WallHeightTables {
        WallHeightTables {
            box1a: [0, 16, 32, 48, 64, 80, 96, 112],
            box1b: [0, 32, 64, 96, 128, 160, 192, 224],
            box1c: [0, 8, 16, 24, 32, 40, 48, 56],
            box2a: [16; 16],
            box2b: [64; 16],
        }
    }

    fn decode(map_type: MapType, code: VoxelCode) -> (VoxelDefinition, DecodeWarnings) {
        let inf = inf();
        let heights = heights();
        let ctx = DecodeContext::new(&inf, &heights, map_type);
        let mut warnings = DecodeWarnings::new();
        let voxel = ctx.decode_wall(code, &mut warnings);
        (voxel, warnings)
    }

    #[test]
    fn solid_wall_texture_is_msb_minus_one() {
        let (voxel, warnings) = decode(MapType::City, 0x2F2F);
        assert!(warnings.is_empty());
        match voxel {
            VoxelDefinition::Wall {
                side, kind, menu_id, ..
            } => {
                assert_eq!(side.id, 46);
                assert_eq!(side.filename, "WALL46.IMG");
                assert_eq!(kind, WallKind::Solid);
                assert_eq!(menu_id, None);
            }
            other => panic!("expected wall, got {other:?}"),
        }
    }

    #[test]
    fn wall_kind_precedence() {
        let (voxel, _) = decode(MapType::Interior, 0x1F1F);
        assert_eq!(voxel.wall(), Some((WallKind::LevelUp, None)));
        let (voxel, _) = decode(MapType::Interior, 0x2020);
        assert_eq!(voxel.wall(), Some((WallKind::LevelDown, None)));
        let (voxel, _) = decode(MapType::City, 0x0B0B);
        assert_eq!(voxel.wall(), Some((WallKind::Menu, Some(1))));
    }

    #[test]
    fn sliding_door_from_type_bits() {
        let (voxel, warnings) = decode(MapType::City, 0xB045);
        assert!(warnings.is_empty());
        match voxel {
            VoxelDefinition::Door { texture, kind } => {
                assert_eq!(kind, DoorKind::Sliding);
                assert_eq!(texture.id, 4);
            }
            other => panic!("expected door, got {other:?}"),
        }
    }

    #[test]
    fn unknown_door_type_is_splitting_with_warning() {
        let (voxel, warnings) = decode(MapType::City, 0xB0C1);
        assert!(matches!(
            voxel,
            VoxelDefinition::Door {
                kind: DoorKind::Splitting,
                ..
            }
        ));
        assert_eq!(
            warnings.first(),
            Some(&DecodeWarning::UnknownDoorType {
                code: 0xB0C1,
                door_type: 0xC
            })
        );
    }

    #[test]
    fn unsupported_nibbles_are_none() {
        for code in [0xC123u16, 0xE000, 0xFFFF] {
            let (voxel, warnings) = decode(MapType::Interior, code);
            assert!(voxel.is_none());
            assert_eq!(warnings.len(), 1, "code {code:#06x}");
        }
    }

    #[test]
    fn strict_decode_reports_first_warning() {
        let inf = inf();
        let heights = heights();
        let ctx = DecodeContext::new(&inf, &heights, MapType::City);
        assert!(ctx.try_decode_wall(0x2F2F).is_ok());
        assert_eq!(
            ctx.try_decode_wall(0xC001),
            Err(DecodeWarning::UnsupportedVoxelType {
                code: 0xC001,
                nibble: 0xC
            })
        );
    }

    #[test]
    fn raised_platform_city_values() {
        // msb 0x0A: height index 2, thickness index 1. side key 2, cap key 3.
        let (voxel, warnings) = decode(MapType::City, 0x0A32);
        assert!(warnings.is_empty(), "{warnings:?}");
        match voxel {
            VoxelDefinition::Raised {
                side,
                floor,
                ceiling,
                y_offset,
                y_size,
                v_top,
                v_bottom,
            } => {
                assert_eq!(side.id, 7);
                assert_eq!(floor.id, 3);
                assert_eq!(ceiling.id, 8);
                assert_eq!(y_offset, 0.5);
                assert_eq!(y_size, 0.5);
                assert_eq!(v_top, 0.0);
                assert_eq!(v_bottom, 0.5);
            }
            other => panic!("expected raised, got {other:?}"),
        }
    }

    #[test]
    fn raised_platform_missing_keys_warn() {
        let (voxel, warnings) = decode(MapType::Wilderness, 0x0A55);
        assert!(matches!(voxel, VoxelDefinition::Raised { .. }));
        assert!(warnings.contains(|w| matches!(w, DecodeWarning::MissingBoxSide { key: 5 })));
        assert!(warnings.contains(|w| matches!(w, DecodeWarning::MissingBoxCap { key: 5 })));
    }

    #[test]
    fn edge_offsets_depend_on_map_type() {
        // base offset 2, collider set, orientation 0x40 -> 4.
        let code = 0xA000 | (2 << 9) | 0x0100 | 0x0040 | 0x0006;
        let (interior, _) = decode(MapType::Interior, code);
        let (city, _) = decode(MapType::City, code);
        match (interior, city) {
            (
                VoxelDefinition::Edge {
                    y_offset: interior_offset,
                    collider,
                    flipped,
                    facing,
                    texture,
                },
                VoxelDefinition::Edge {
                    y_offset: city_offset,
                    ..
                },
            ) => {
                assert_eq!(interior_offset, 16.0 / 128.0);
                assert_eq!(city_offset, 56.0 / 128.0);
                assert!(collider && flipped);
                assert_eq!(facing, VoxelFacing::PositiveZ);
                assert_eq!(texture.id, 5);
                assert_eq!(texture.set_index, Some(2));
            }
            other => panic!("expected edges, got {other:?}"),
        }
    }

    #[test]
    fn edge_with_zero_texture_warns() {
        let (_, warnings) = decode(MapType::City, 0xA000);
        assert_eq!(
            warnings.first(),
            Some(&DecodeWarning::NegativeEdgeTexture {
                code: 0xA000,
                texture: -1
            })
        );
    }

    #[test]
    fn transparent_and_diagonal_flags() {
        let (voxel, _) = decode(MapType::Interior, 0x9005);
        assert!(matches!(
            voxel,
            VoxelDefinition::TransparentWall { collider: true, .. }
        ));
        let (voxel, _) = decode(MapType::Interior, 0xD105);
        assert!(matches!(
            voxel,
            VoxelDefinition::Diagonal {
                is_right_diagonal: false,
                ..
            }
        ));
    }

    #[test]
    fn floor_chasms_and_flats() {
        let inf = inf();
        let heights = heights();
        let ctx = DecodeContext::new(&inf, &heights, MapType::Interior);
        let mut warnings = DecodeWarnings::new();

        let dry = ctx.decode_floor(0x0C00, &mut warnings);
        assert!(matches!(
            dry.voxel,
            VoxelDefinition::Chasm {
                kind: ChasmKind::Dry,
                ref texture
            } if texture.id == 20
        ));
        assert_eq!(dry.flat_index, None);
        assert!(warnings.is_empty());

        let lava = ctx.decode_floor(0x0E03, &mut warnings);
        assert_eq!(lava.flat_index, Some(2));
        assert_eq!(
            warnings.first(),
            Some(&DecodeWarning::MissingChasmIndex {
                kind: ChasmKind::Lava
            })
        );
    }

    #[test]
    fn wilderness_floor_color_flag() {
        let inf = inf();
        let heights = heights();
        let ctx = DecodeContext::new(&inf, &heights, MapType::Wilderness);
        let mut warnings = DecodeWarnings::new();
        let floor = ctx.decode_floor(0x0500, &mut warnings);
        assert!(matches!(
            floor.voxel,
            VoxelDefinition::Floor {
                wild_wall_colored: true,
                ..
            }
        ));
    }

    #[test]
    fn texture_ids_wrap_at_64() {
        let inf = inf();
        let heights = heights();
        let ctx = DecodeContext::new(&inf, &heights, MapType::Interior);
        let mut warnings = DecodeWarnings::new();
        let floor = ctx.decode_floor(0x4200, &mut warnings);
        match floor.voxel {
            VoxelDefinition::Floor { texture, .. } => assert_eq!(texture.id, 2),
            other => panic!("expected floor, got {other:?}"),
        }
        assert_eq!(
            warnings.first(),
            Some(&DecodeWarning::TextureIdWrapped {
                id: 0x42,
                wrapped: 2
            })
        );
    }

    #[test]
    fn missing_texture_falls_back_to_first_entry() {
        let mut inf = inf();
        inf.voxel_textures.truncate(4);
        let heights = heights();
        let ctx = DecodeContext::new(&inf, &heights, MapType::Interior);
        let mut warnings = DecodeWarnings::new();
        let texture = ctx.texture(10, &mut warnings);
        assert_eq!(texture.id, 0);
        assert_eq!(texture.filename, "WALL0.IMG");
        assert_eq!(texture, ctx.texture(0, &mut DecodeWarnings::new()));
        assert_eq!(
            warnings.first(),
            Some(&DecodeWarning::UnknownVoxelTexture { id: 10 })
        );
    }

    #[test]
    fn zero_low_byte_resolves_to_first_texture() {
        let (voxel, warnings) = decode(MapType::City, 0x9000);
        match voxel {
            VoxelDefinition::TransparentWall { texture, collider } => {
                assert_eq!(
                    texture,
                    TextureRef {
                        id: 0,
                        filename: "WALL0.IMG".into(),
                        set_index: None,
                    }
                );
                assert!(collider);
            }
            other => panic!("expected transparent wall, got {other:?}"),
        }
        assert_eq!(
            warnings.first(),
            Some(&DecodeWarning::UnknownVoxelTexture { id: -1 })
        );

        let (voxel, _) = decode(MapType::City, 0xD000);
        match voxel {
            VoxelDefinition::Diagonal { texture, .. } => assert_eq!(texture.id, 0),
            other => panic!("expected diagonal, got {other:?}"),
        }
    }

    #[test]
    fn texture_without_inf_entries_is_blank() {
        let mut inf = inf();
        inf.voxel_textures.clear();
        let heights = heights();
        let ctx = DecodeContext::new(&inf, &heights, MapType::Interior);
        let texture = ctx.texture(-1, &mut DecodeWarnings::new());
        assert_eq!((texture.id, texture.filename.as_str(), texture.set_index), (0, "", None));
    }

    #[test]
    fn ceiling_runs() {
        let inf = inf();
        let heights = heights();
        let ctx = DecodeContext::new(&inf, &heights, MapType::City);
        let mut warnings = DecodeWarnings::new();
        let tall = ctx.decode_ceiling(0x8004, &mut warnings);
        assert_eq!(tall.height, 3);
        assert_eq!(tall.voxel.wall(), Some((WallKind::Solid, None)));
        assert_eq!(ctx.decode_ceiling(0x0084, &mut warnings).height, 2);
        assert_eq!(ctx.decode_ceiling(0x0004, &mut warnings).height, 1);
        assert!(warnings.is_empty());
    }

    #[test]
    fn map1_classification() {
        let inf = inf();
        let heights = heights();
        let ctx = DecodeContext::new(&inf, &heights, MapType::City);
        let mut warnings = DecodeWarnings::new();
        assert_eq!(ctx.decode_map1(0, &mut warnings), Map1Voxel::Empty);
        assert_eq!(
            ctx.decode_map1(0x8012, &mut warnings),
            Map1Voxel::Entity { flat_index: 0x12 }
        );
        assert!(matches!(
            ctx.decode_map1(0x2F2F, &mut warnings),
            Map1Voxel::Voxel(VoxelDefinition::Wall { .. })
        ));
    }
}
