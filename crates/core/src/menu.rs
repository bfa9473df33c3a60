//! `*MENU` voxel classification.
//!
//! A *MENU wall carries an index whose meaning depends on the map type: the same ID is a
//! tavern in a city and a house in the wilderness.

use crate::map_type::{CityType, MapType};
use serde::{Deserialize, Serialize};

/// What a *MENU voxel leads to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MenuType {
    /// No destination.
    None,
    /// City gates (leads to the wilderness or back into the city).
    CityGates,
    /// Wilderness crypt.
    Crypt,
    /// Wilderness dungeon.
    Dungeon,
    /// Equipment store.
    Equipment,
    /// Generic house.
    House,
    /// Mages guild.
    MagesGuild,
    /// Noble house.
    Noble,
    /// Ruler's palace.
    Palace,
    /// Tavern.
    Tavern,
    /// Temple.
    Temple,
    /// Wilderness tower.
    Tower,
}

const CITY_MENU_TYPES: [MenuType; 14] = [
    MenuType::Equipment,
    MenuType::Tavern,
    MenuType::MagesGuild,
    MenuType::Temple,
    MenuType::House,
    MenuType::House,
    MenuType::House,
    MenuType::CityGates,
    MenuType::CityGates,
    MenuType::Noble,
    MenuType::None,
    MenuType::Palace,
    MenuType::Palace,
    MenuType::Palace,
];

const WILD_MENU_TYPES: [MenuType; 10] = [
    MenuType::None,
    MenuType::Crypt,
    MenuType::House,
    MenuType::Tavern,
    MenuType::Temple,
    MenuType::Tower,
    MenuType::CityGates,
    MenuType::CityGates,
    MenuType::Dungeon,
    MenuType::Dungeon,
];

impl MenuType {
    /// Interpret a *MENU index for the given map type.
    ///
    /// Returns `None` when the index has no mapping. Interiors have no typed menus and always
    /// yield `Some(MenuType::None)`.
    pub fn from_menu_id(menu_id: i32, map_type: MapType) -> Option<Self> {
        let table: &[MenuType] = match map_type {
            MapType::Interior => return Some(MenuType::None),
            MapType::City => &CITY_MENU_TYPES,
            MapType::Wilderness => &WILD_MENU_TYPES,
        };
        usize::try_from(menu_id)
            .ok()
            .and_then(|index| table.get(index))
            .copied()
    }

    /// Whether buildings of this type get a generated display name.
    pub const fn has_display_name(self) -> bool {
        matches!(
            self,
            Self::Equipment | Self::MagesGuild | Self::Tavern | Self::Temple
        )
    }

    /// Whether entering the voxel loads an interior map.
    pub const fn leads_to_interior(self) -> bool {
        matches!(
            self,
            Self::Crypt
                | Self::Dungeon
                | Self::Equipment
                | Self::House
                | Self::MagesGuild
                | Self::Noble
                | Self::Palace
                | Self::Tavern
                | Self::Temple
                | Self::Tower
        )
    }

    /// Index into the interior .MIF prefix table, if the menu has one.
    ///
    /// Palaces pick their prefix from the city type.
    pub const fn mif_prefix_index(self, city_type: CityType) -> Option<usize> {
        match self {
            Self::Palace => Some(match city_type {
                CityType::CityState => 0,
                CityType::Town => 8,
                CityType::Village => 9,
            }),
            Self::House => Some(1),
            Self::Noble => Some(2),
            Self::Tavern => Some(3),
            Self::Temple => Some(4),
            Self::Equipment => Some(5),
            Self::MagesGuild => Some(6),
            Self::Crypt => Some(7),
            Self::Tower => Some(10),
            Self::CityGates | Self::Dungeon | Self::None => None,
        }
    }

    /// Canonical string key used in configs/logs.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::CityGates => "city_gates",
            Self::Crypt => "crypt",
            Self::Dungeon => "dungeon",
            Self::Equipment => "equipment",
            Self::House => "house",
            Self::MagesGuild => "mages_guild",
            Self::Noble => "noble",
            Self::Palace => "palace",
            Self::Tavern => "tavern",
            Self::Temple => "temple",
            Self::Tower => "tower",
        }
    }
}

/// Whether a raw *MENU index denotes city gates for this map type.
pub const fn is_city_gate_menu_index(menu_index: i32, map_type: MapType) -> bool {
    match map_type {
        MapType::Interior => false,
        MapType::City => matches!(menu_index, 7 | 8),
        MapType::Wilderness => matches!(menu_index, 6 | 7),
    }
}
