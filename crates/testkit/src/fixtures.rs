//! Synthetic data packs shaped like the game's own tables.
//!
//! Everything is built from fixed word lists and a seeded `StdRng`, so two calls with the
//! same arguments return identical packs.

use std::collections::BTreeMap;

use arenagen_assets::{
    CityDefinition, CityGenTables, ExeTables, InfCeiling, InfData, InfText, InfVoxelTexture,
    LocationTables, MifLevel, MifLock, MifMap, MifTrigger, NameRule, NameTables, PrefabLibrary,
    RmdChunk, WallHeightTables, WildBlockLists, DUNGEON_CHUNK_DIM, RMD_DEPTH, RMD_WIDTH,
};
use arenagen_core::{CityType, Grid2, OriginalInt2, VoxelCode};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Seed for the default fixture prefab library.
pub const FIXTURE_SEED: u64 = 0xA7E4A;

/// Wall texture carrying `*MENU 0` (city equipment store).
pub const TEX_EQUIPMENT: u16 = 10;
/// `*MENU 1`: city tavern, wilderness crypt.
pub const TEX_TAVERN: u16 = 11;
/// `*MENU 3`: city temple, wilderness tavern.
pub const TEX_TEMPLE: u16 = 12;
/// `*MENU 2`: city mages guild, wilderness house.
pub const TEX_MAGES: u16 = 13;
/// `*MENU 9`: city noble house, wilderness dungeon.
pub const TEX_NOBLE: u16 = 14;
/// `*MENU 4`: city house, wilderness temple.
pub const TEX_HOUSE: u16 = 15;
/// `*MENU 7`: city gates in both map types.
pub const TEX_GATE: u16 = 16;
/// `*LEVELUP` texture.
pub const TEX_LEVEL_UP: u16 = 20;
/// `*LEVELDOWN` texture.
pub const TEX_LEVEL_DOWN: u16 = 21;

const TEX_GROUND: u16 = 1;
const TEX_ROAD: u16 = 3;
const TEX_STONE: u16 = 2;

/// Solid MAP1 wall code for a texture index.
pub const fn wall_code(texture: u16) -> VoxelCode {
    let byte = texture + 1;
    (byte << 8) | byte
}

/// FLOR code for a floor texture with an optional flat (`flat + 1` in the low byte).
pub const fn floor_code(texture: u16, flat: Option<u16>) -> VoxelCode {
    let low = match flat {
        Some(flat) => flat + 1,
        None => 0,
    };
    (texture << 8) | low
}

/// INF tables with 64 textures and every menu kind the generators look for.
pub fn fixture_inf() -> InfData {
    let menus = [
        (TEX_EQUIPMENT, 0),
        (TEX_TAVERN, 1),
        (TEX_TEMPLE, 3),
        (TEX_MAGES, 2),
        (TEX_NOBLE, 9),
        (TEX_HOUSE, 4),
        (TEX_GATE, 7),
    ];
    InfData {
        name: "FIXTURE.INF".into(),
        voxel_textures: (0..64)
            .map(|i| InfVoxelTexture {
                filename: if i == 40 {
                    "fixture.set".into()
                } else {
                    format!("fix{i:02}.img")
                },
                set_index: (i == 40).then_some(1),
            })
            .collect(),
        box_caps: (0..16u8).map(|key| (key, 30 + i32::from(key))).collect(),
        box_sides: (0..16u8).map(|key| (key, 46 + i32::from(key) % 16)).collect(),
        menus: menus
            .iter()
            .map(|&(texture, menu)| (i32::from(texture), menu))
            .collect(),
        ceiling: InfCeiling {
            texture_index: Some(4),
            height: InfCeiling::DEFAULT_HEIGHT,
            box_scale: None,
            outdoor_dungeon: false,
        },
        dry_chasm_index: Some(22),
        wet_chasm_index: Some(23),
        lava_chasm_index: Some(24),
        level_up_index: Some(i32::from(TEX_LEVEL_UP)),
        level_down_index: Some(i32::from(TEX_LEVEL_DOWN)),
        texts: BTreeMap::from([
            (
                0,
                InfText {
                    text: "The air smells of old stone.".into(),
                    displayed_once: true,
                },
            ),
            (
                1,
                InfText {
                    text: "Something moves in the dark.".into(),
                    displayed_once: false,
                },
            ),
        ]),
        sounds: BTreeMap::from([(0, "drip.voc".into()), (1, "wind.voc".into())]),
    }
}

fn words(list: &[&str]) -> Vec<String> {
    list.iter().map(|word| word.to_string()).collect()
}

/// Executable tables sized exactly as the name generators index them.
pub fn fixture_exe_tables() -> ExeTables {
    ExeTables {
        city_gen: CityGenTables {
            tavern_prefixes: words(&[
                "The Silver", "The Golden", "The Rusty", "The Drunken", "The Laughing",
                "The Red", "The Black", "The Wandering", "The Sleeping", "The Jolly",
                "The Broken", "The Howling", "The Merry", "The Crooked", "The Iron",
                "The Green", "The Lonely", "The Blind", "The Painted", "The Copper",
                "The Bold", "The Weary", "The Gilded",
            ]),
            tavern_marine_suffixes: words(&[
                "Anchor", "Mermaid", "Galleon", "Harpoon", "Lighthouse", "Oar", "Sail",
                "Barnacle", "Gull", "Tide", "Wave", "Mast", "Compass", "Reef", "Current",
                "Keel", "Rudder", "Squid", "Eel", "Shell", "Pearl", "Dolphin", "Net",
            ]),
            tavern_suffixes: words(&[
                "Cup", "Dragon", "Stag", "Boar", "Goblet", "Lantern", "Flagon", "Hound",
                "Griffin", "Crown", "Tankard", "Barrel", "Candle", "Raven", "Wolf", "Fox",
                "Kettle", "Horn", "Blade", "Shield", "Helm", "Wheel", "Bell",
            ]),
            temple_prefixes: words(&["Temple of ", "Chapel of ", "Shrine of "]),
            temple1_suffixes: words(&["Akatosh", "Arkay", "Dibella", "Julianos", "Kynareth"]),
            temple2_suffixes: words(&[
                "Mara", "Stendarr", "Zenithar", "the Eight", "the One", "Tiber",
                "the Divines", "the Wheel", "the Dawn",
            ]),
            temple3_suffixes: words(&[
                "Light", "Mercy", "Wisdom", "Valor", "the Ancestors", "the Moons",
                "the Stars", "the Harvest", "the Sea", "the Storm",
            ]),
            equipment_prefixes: words(&[
                "%n's", "%ef's", "The %ct", "Fine", "Honest", "Sturdy", "Royal",
                "Imperial", "Northern", "Southern", "Old", "New", "Best", "Cheap",
                "Trusty", "Quality", "Master", "Famous", "Humble", "Grand",
            ]),
            equipment_suffixes: words(&[
                "Armory", "Smithy", "Forge", "Arms", "Outfitters", "Wares", "Goods",
                "Blades", "Armor", "Supplies",
            ]),
        },
        wall_heights: WallHeightTables {
            box1a: [0, 8, 16, 24, 32, 40, 48, 56],
            box1b: [0, 16, 32, 48, 64, 80, 96, 112],
            box1c: [0, 4, 8, 12, 16, 20, 24, 28],
            box2a: [16, 18, 20, 22, 24, 26, 28, 30, 32, 34, 36, 38, 40, 42, 44, 46],
            box2b: [64, 66, 68, 70, 72, 74, 76, 78, 80, 82, 84, 86, 88, 90, 92, 94],
        },
        wilderness: WildBlockLists {
            normal_blocks: vec![5, 6, 7],
            village_blocks: vec![8],
            dungeon_blocks: vec![9],
            tavern_blocks: vec![10],
            temple_blocks: vec![11],
        },
        locations: LocationTables {
            menu_mif_prefixes: words(&[
                "palace", "bs", "noble", "tavern", "temple", "equip", "mages", "crypt",
                "townpal", "vilpal", "tower",
            ]),
            final_dungeon_mif_name: "imppal1.mif".into(),
        },
    }
}

/// Name rules for two races. Race 1 uses the chance-based rules.
pub fn fixture_name_tables() -> NameTables {
    let index = |chunk| NameRule::Index { chunk };
    let literal = |text: &str| NameRule::String { text: text.into() };
    NameTables {
        chunks: vec![
            words(&["Ar", "Bel", "Cor", "Dar", "El", "Fen", "Gar", "Hal", "Ir", "Jor"]),
            words(&["an", "ic", "or", "us", "en", "ald", "win", "eth"]),
            words(&[
                "Stone", "Vale", "Brook", "Hill", "Marsh", "Wood", "Field", "Ford", "Glen",
                "Moor", "Crest", "Hollow",
            ]),
        ],
        rules: vec![
            vec![index(0), index(1), literal(" "), index(2)],
            vec![index(0), literal("a"), literal(" "), index(2)],
            vec![
                index(0),
                NameRule::IndexChance {
                    chunk: 1,
                    chance: 50,
                },
                literal(" "),
                NameRule::IndexStringChance {
                    chunk: 2,
                    text: "-".into(),
                    chance: 30,
                },
                index(2),
            ],
            vec![index(0), index(1), literal("ia "), index(2)],
        ],
    }
}

/// A procedurally generated city of the given type with its blocks starting at (4, 4).
pub fn fixture_city(city_type: CityType, city_seed: u32) -> CityDefinition {
    let (map_filename, type_display_name) = match city_type {
        CityType::CityState => ("CITY.MIF", "City"),
        CityType::Town => ("TOWN.MIF", "Town"),
        CityType::Village => ("VILLAGE.MIF", "Village"),
    };
    CityDefinition {
        name: "Fixtureton".into(),
        map_filename: map_filename.into(),
        city_type,
        type_display_name: type_display_name.into(),
        city_seed,
        ruler_seed: city_seed ^ 0x0005_A500,
        wild_seed: city_seed.rotate_left(7),
        province_seed: 0x0001_0000,
        race_id: 0,
        reserved_blocks: Vec::new(),
        block_start: OriginalInt2::new(4, 4),
        coastal: false,
        premade: false,
        palace_is_main_quest_dungeon: false,
        temple_override: None,
        blocks_per_side: None,
    }
}

/// Source column of the palace marker in a fixture skeleton.
pub fn fixture_palace_column(city: &CityDefinition) -> usize {
    fixture_city_size(city) / 2
}

fn fixture_city_size(city: &CityDefinition) -> usize {
    let margin = city.block_start.x.max(0) as usize;
    margin * 2 + city.blocks_per_side() * 20
}

/// Walled skeleton sized for `city`: gates on the west and east edges, a palace marker on
/// the north edge and its gate marker two rows in.
pub fn fixture_city_skeleton(city: &CityDefinition) -> MifMap {
    let size = fixture_city_size(city);
    let mid = fixture_palace_column(city);
    let mut level = MifLevel::empty(size, size, true);
    level.name = city.map_filename.clone();
    level.flor.fill(floor_code(TEX_GROUND, None));

    let perimeter = wall_code(TEX_STONE);
    for i in 0..size {
        level.map1.set(i, 0, perimeter);
        level.map1.set(i, size - 1, perimeter);
        level.map1.set(0, i, perimeter);
        level.map1.set(size - 1, i, perimeter);
    }
    level.map1.set(0, mid, wall_code(TEX_GATE));
    level.map1.set(size - 1, mid, wall_code(TEX_GATE));
    level.map1.set(mid, 0, 0x9101);
    level.map1.set(mid, 2, 0xA000);

    if let Some(map2) = level.map2.as_mut() {
        for i in 0..size {
            map2.set(i, 0, 0x0003);
            map2.set(i, size - 1, 0x0003);
        }
    }

    MifMap {
        name: city.map_filename.clone(),
        start_points: vec![OriginalInt2::new(mid as i32, 3)],
        levels: vec![level],
    }
}

/// City block codes, variation counts and the menu texture on each block's door.
const CITY_BLOCK_KINDS: [(&str, u32, Option<u16>); 7] = [
    ("EQ", 13, Some(TEX_EQUIPMENT)),
    ("MG", 11, Some(TEX_MAGES)),
    ("NB", 10, Some(TEX_NOBLE)),
    ("TP", 12, Some(TEX_TEMPLE)),
    ("TV", 15, Some(TEX_TAVERN)),
    ("TS", 11, None),
    ("BS", 20, Some(TEX_HOUSE)),
];

fn building(
    flor: &mut Grid2<VoxelCode>,
    map1: &mut Grid2<VoxelCode>,
    map2: Option<&mut Grid2<VoxelCode>>,
    origin: (usize, usize),
    size: usize,
    wall: VoxelCode,
    door: Option<VoxelCode>,
) {
    let (ox, oz) = origin;
    for i in 0..size {
        for (x, z) in [(ox + i, oz), (ox + i, oz + size - 1), (ox, oz + i), (ox + size - 1, oz + i)] {
            map1.set_if_inside(x, z, wall);
        }
    }
    for z in oz + 1..oz + size - 1 {
        for x in ox + 1..ox + size - 1 {
            flor.set_if_inside(x, z, floor_code(TEX_STONE, None));
        }
    }
    if let Some(door) = door {
        map1.set_if_inside(ox + size / 2, oz + size - 1, door);
    }
    if let Some(map2) = map2 {
        for z in oz..oz + size {
            for x in ox..ox + size {
                map2.set_if_inside(x, z, 0x0002);
            }
        }
    }
}

fn city_block(rng: &mut StdRng, door: Option<u16>) -> MifLevel {
    let mut level = MifLevel::empty(20, 20, true);
    level.flor.fill(floor_code(TEX_ROAD, None));
    let size = rng.gen_range(5..=9);
    let origin = (rng.gen_range(2..=18 - size), rng.gen_range(2..=18 - size));
    let wall = wall_code(rng.gen_range(5..=8));
    let MifLevel {
        flor, map1, map2, ..
    } = &mut level;
    building(flor, map1, map2.as_mut(), origin, size, wall, door.map(wall_code));

    for _ in 0..rng.gen_range(0..3) {
        let (x, z) = (rng.gen_range(0..20), rng.gen_range(0..2));
        level.flor.set(x, z, floor_code(TEX_ROAD, Some(rng.gen_range(0..6))));
    }
    level
}

fn dungeon_chunk(rng: &mut StdRng, index: usize) -> MifLevel {
    let dim = DUNGEON_CHUNK_DIM;
    let mut level = MifLevel::empty(dim, dim, false);
    level.name = format!("CHUNK{index}");
    level.flor.fill(floor_code(TEX_STONE, None));
    let wall = wall_code(5 + (index % 4) as u16);
    for i in 0..dim {
        if i == dim / 2 || i == dim / 2 - 1 {
            continue;
        }
        level.map1.set(i, 0, wall);
        level.map1.set(0, i, wall);
    }
    for _ in 0..rng.gen_range(4..12) {
        let (x, z) = (rng.gen_range(2..dim - 2), rng.gen_range(2..dim - 2));
        if (x, z) != (10, 10) {
            level.map1.set(x, z, wall);
        }
    }
    if rng.gen_bool(0.2) {
        level.flor.set(20, 20, floor_code(0x0D, None));
    }
    level.map1.set(24, 6, 0x8000 | rng.gen_range(1..8));

    if index % 4 == 0 {
        level.locks.push(MifLock {
            x: 16,
            y: 1,
            lock_level: rng.gen_range(1..=10),
        });
    }
    if index % 5 == 0 {
        level.triggers.push(MifTrigger {
            x: 8,
            y: 8,
            text_index: Some((index % 2) as i32),
            sound_index: Some(0),
        });
    }
    level
}

fn wild_chunk(rng: &mut StdRng, id: u8) -> RmdChunk {
    let mut chunk = RmdChunk::empty();
    chunk.flor.fill(floor_code(TEX_GROUND, None));
    for _ in 0..rng.gen_range(20..60) {
        let (x, z) = (rng.gen_range(0..RMD_WIDTH), rng.gen_range(0..RMD_DEPTH));
        if rng.gen_bool(0.5) {
            chunk.map1.set(x, z, 0x8000 | rng.gen_range(1..6));
        } else {
            chunk.flor.set(x, z, floor_code(5, None));
        }
    }

    let door = match id {
        8 => Some(TEX_MAGES),
        9 => Some(TEX_NOBLE),
        10 => Some(TEX_TEMPLE),
        11 => Some(TEX_HOUSE),
        _ => None,
    };
    if let Some(door) = door {
        let RmdChunk { flor, map1, map2 } = &mut chunk;
        let origin = (rng.gen_range(8..40), rng.gen_range(8..40));
        building(flor, map1, Some(map2), origin, 8, wall_code(6), Some(wall_code(door)));
    }
    chunk
}

/// City blocks for every code, variation and rotation, 32 dungeon chunks and wilderness
/// chunks 5 through 11.
///
/// Wilderness chunk 8 holds a house, 9 a dungeon entrance, 10 a tavern and 11 a temple.
pub fn fixture_prefab_library(seed: u64) -> PrefabLibrary {
    let mut rng = StdRng::seed_from_u64(seed);

    let mut city_blocks = BTreeMap::new();
    for (code, variations, door) in CITY_BLOCK_KINDS {
        for variation in 1..=variations {
            for rotation in ["A", "B", "C", "D"] {
                let name = format!("{code}BD{variation}{rotation}.MIF");
                let mut level = city_block(&mut rng, door);
                level.name = name.clone();
                city_blocks.insert(
                    name.clone(),
                    MifMap {
                        name,
                        start_points: Vec::new(),
                        levels: vec![level],
                    },
                );
            }
        }
    }

    let dungeon_chunks = MifMap {
        name: "RANDOM1.MIF".into(),
        start_points: Vec::new(),
        levels: (0..32).map(|index| dungeon_chunk(&mut rng, index)).collect(),
    };

    let wild_chunks = (5..=11u8).map(|id| (id, wild_chunk(&mut rng, id))).collect();

    PrefabLibrary {
        city_blocks,
        dungeon_chunks: Some(dungeon_chunks),
        wild_chunks,
    }
}
