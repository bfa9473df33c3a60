//! Arena level generation: voxel decoding, seeded city/dungeon/wilderness layout, palace
//! revision, building names and assembly into deduplicated level definitions.

mod assembler;
mod city;
mod doors;
mod dungeon;
mod error;
mod layers;
mod level;
mod level_utils;
mod names;
mod palace;
mod voxel_decode;
mod wild;

pub use assembler::*;
pub use city::*;
pub use doors::*;
pub use dungeon::*;
pub use error::*;
pub use layers::*;
pub use level::*;
pub use level_utils::*;
pub use names::*;
pub use palace::*;
pub use voxel_decode::*;
pub use wild::*;
