//! Map and city classifications.
//!
//! Decoding rules differ per map type (raised platform tables, edge offsets, *MENU
//! interpretation), and city block grids are sized by city type.

use serde::{Deserialize, Serialize};

/// Kind of map a level belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[repr(u8)]
pub enum MapType {
    /// Dungeons and building interiors.
    Interior = 0,
    /// City-states, towns and villages.
    City = 1,
    /// Wilderness surrounding a city.
    Wilderness = 2,
}

impl MapType {
    /// Convert to a stable numeric representation.
    pub const fn as_u8(self) -> u8 {
        self as u8
    }

    /// Try to convert from the stable numeric representation.
    pub const fn from_u8(value: u8) -> Option<Self> {
        match value {
            0 => Some(Self::Interior),
            1 => Some(Self::City),
            2 => Some(Self::Wilderness),
            _ => None,
        }
    }

    /// Canonical string key used in configs/logs.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Interior => "interior",
            Self::City => "city",
            Self::Wilderness => "wilderness",
        }
    }
}

/// Size class of a city.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[repr(u8)]
pub enum CityType {
    /// Provincial capital.
    CityState = 0,
    /// Mid-sized town.
    Town = 1,
    /// Small village.
    Village = 2,
}

impl CityType {
    /// Convert to a stable numeric representation.
    pub const fn as_u8(self) -> u8 {
        self as u8
    }

    /// Try to convert from the stable numeric representation.
    pub const fn from_u8(value: u8) -> Option<Self> {
        match value {
            0 => Some(Self::CityState),
            1 => Some(Self::Town),
            2 => Some(Self::Village),
            _ => None,
        }
    }

    /// Canonical string key used in configs/logs.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::CityState => "city_state",
            Self::Town => "town",
            Self::Village => "village",
        }
    }

    /// Number of 20x20 blocks along each side of the generated city grid.
    pub const fn blocks_per_side(self) -> usize {
        match self {
            Self::CityState => 6,
            Self::Town => 5,
            Self::Village => 4,
        }
    }
}
