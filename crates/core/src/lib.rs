#![warn(missing_docs)]
//! Core primitives shared across the workspace: the legacy seeded stream, flat voxel
//! layers, coordinate conventions and the small enums every generator agrees on.

pub mod coords;
pub mod grid;
pub mod map_type;
pub mod menu;
pub mod random;

pub use coords::{LevelDouble3, LevelInt2, LevelInt3, OriginalInt2};
pub use grid::{Grid2, GridError};
pub use map_type::{CityType, MapType};
pub use menu::{is_city_gate_menu_index, MenuType};
pub use random::ArenaRandom;

/// Raw 16-bit voxel code as stored in FLOR/MAP1/MAP2 layers.
pub type VoxelCode = u16;

/// Most significant nibble of a raw voxel code.
pub const fn most_sig_nibble(code: VoxelCode) -> u8 {
    ((code & 0xF000) >> 12) as u8
}

/// Rotate a 16-bit value right by `count` bits.
pub const fn ror16(value: u16, count: u32) -> u16 {
    value.rotate_right(count)
}
