//! Wilderness Worldtest
//!
//! Assembles a full 64x64 wilderness around the fixture city:
//! - City placeholders sit at the center and map to stamped city chunks
//! - Every distinct chunk ID becomes exactly one level
//! - Tavern and temple chunks name their first entrance, reproducibly per position
//! - Chunk entrances carry wilderness save slots and dungeon seeds

use std::collections::BTreeSet;

use arenagen_core::{CityType, MenuType};
use arenagen_testkit::{
    fixture_city, fixture_city_skeleton, fixture_exe_tables, fixture_inf, fixture_prefab_library,
    init_test_tracing, FIXTURE_SEED,
};
use arenagen_world::{
    generate_wilderness_indices, wild_service_save_number, GenerationError, LevelAssembler,
    TransitionDefinition, WildernessMap, CITY_PLACEHOLDERS, WILD_HEIGHT, WILD_WIDTH,
};

const WILD_SEED: u32 = 0x00C0_FFEE;

fn wilderness() -> WildernessMap {
    let inf = fixture_inf();
    let exe = fixture_exe_tables();
    let library = fixture_prefab_library(FIXTURE_SEED);
    let city = fixture_city(CityType::CityState, 0x1234);
    let skeleton = fixture_city_skeleton(&city);
    LevelAssembler::new(&inf, &exe)
        .assemble_wilderness(WILD_SEED, &city, &skeleton, &library)
        .unwrap()
}

fn find_chunk(map: &WildernessMap, id: u8) -> (usize, usize) {
    map.indices
        .iter()
        .find(|&(_, _, &block)| block == id)
        .map(|(x, y, _)| (x, y))
        .unwrap_or_else(|| panic!("no chunk {id} in the wilderness"))
}

#[test]
fn wilderness_layout_worldtest() {
    init_test_tracing();
    let map = wilderness();

    println!("\n=== Wilderness Layout Worldtest ===");
    println!("  levels: {}", map.map.levels.len());
    println!("  voxel defs: {}", map.map.info.voxel_defs().len());

    assert_eq!(
        (map.indices.width(), map.indices.height()),
        (WILD_WIDTH, WILD_HEIGHT)
    );
    for (x, y, id) in CITY_PLACEHOLDERS {
        assert_eq!(map.indices.get(x, y), id);
        assert!(map.level_for_chunk(x, y).is_some());
    }

    let distinct: BTreeSet<u8> = map.indices.as_slice().iter().copied().collect();
    assert_eq!(map.map.levels.len(), distinct.len());
    for id in &distinct {
        let index = map.level_for_block(*id).unwrap();
        let level = &map.map.levels[index];
        assert_eq!((level.width(), level.depth()), (64, 64));
    }
    assert!(map.map.start_points.is_empty());
    assert_eq!(map.level_for_chunk(WILD_WIDTH, 0), None);
}

#[test]
fn seed_42_only_overwrites_city_quadrants() {
    init_test_tracing();
    let exe = fixture_exe_tables();
    let indices = generate_wilderness_indices(42, &exe.wilderness).unwrap();

    // Drawn before the overwrite: 8, 6, 8, 5.
    assert_eq!(indices.get(31, 31), 1);
    assert_eq!(indices.get(32, 31), 2);
    assert_eq!(indices.get(31, 32), 3);
    assert_eq!(indices.get(32, 32), 4);

    let neighbors = [
        ((30, 31), 10),
        ((33, 31), 5),
        ((31, 30), 10),
        ((32, 30), 11),
        ((30, 32), 11),
        ((33, 32), 5),
        ((31, 33), 7),
        ((32, 33), 11),
        ((0, 0), 6),
        ((63, 63), 11),
    ];
    for ((x, y), id) in neighbors {
        assert_eq!(indices.get(x, y), id, "chunk ({x}, {y})");
    }
    let city_cells = indices
        .as_slice()
        .iter()
        .filter(|&&id| (1..=4).contains(&id))
        .count();
    assert_eq!(city_cells, 4);
}

#[test]
fn wilderness_entrances_worldtest() {
    init_test_tracing();
    let map = wilderness();

    let (dungeon_x, dungeon_y) = find_chunk(&map, 9);
    let level = &map.map.levels[map.level_for_chunk(dungeon_x, dungeon_y).unwrap()];
    let entrances: Vec<&TransitionDefinition> = level
        .transitions()
        .iter()
        .filter_map(|group| map.map.info.transition_def(group.id))
        .collect();
    assert!(entrances.contains(&&TransitionDefinition::InteriorEntrance {
        menu_type: MenuType::Dungeon,
        mif_name: None,
    }));
}

#[test]
fn wilderness_names_worldtest() {
    init_test_tracing();
    let map = wilderness();
    let exe = fixture_exe_tables();

    let (tavern_x, tavern_y) = find_chunk(&map, 10);
    let names = map.chunk_building_names(tavern_x, tavern_y, &exe.city_gen);
    assert_eq!(names.len(), 1);
    assert_eq!(names[0].menu_type, MenuType::Tavern);
    assert_eq!(
        names,
        map.chunk_building_names(tavern_x, tavern_y, &exe.city_gen)
    );
    let suffix = names[0].name.rsplit(' ').next().unwrap();
    assert!(exe.city_gen.tavern_suffixes.iter().any(|s| s == suffix));

    let (temple_x, temple_y) = find_chunk(&map, 11);
    let names = map.chunk_building_names(temple_x, temple_y, &exe.city_gen);
    assert_eq!(names.len(), 1);
    assert_eq!(names[0].menu_type, MenuType::Temple);

    let (plain_x, plain_y) = find_chunk(&map, 5);
    assert!(map
        .chunk_building_names(plain_x, plain_y, &exe.city_gen)
        .is_empty());
}

#[test]
fn wilderness_chunk_entrances_worldtest() {
    init_test_tracing();
    let map = wilderness();
    let exe = fixture_exe_tables();
    let city = fixture_city(CityType::CityState, 0x1234);

    let (dungeon_x, dungeon_y) = find_chunk(&map, 9);
    let entrances = map.chunk_entrances(dungeon_x, dungeon_y, &city, &exe.city_gen);
    let dungeon = entrances
        .iter()
        .find(|entrance| entrance.menu_type == MenuType::Dungeon)
        .expect("dungeon entrance");
    assert_eq!(
        dungeon.dungeon_seed,
        Some(city.wild_dungeon_seed(dungeon_x as i32, dungeon_y as i32))
    );
    assert_eq!(dungeon.save_number, None);
    assert_eq!(dungeon.mif_name, None);
    assert!((1..=10).contains(&dungeon.lock_level));

    let (tavern_x, tavern_y) = find_chunk(&map, 10);
    let entrances = map.chunk_entrances(tavern_x, tavern_y, &city, &exe.city_gen);
    let tavern = entrances
        .iter()
        .find(|entrance| entrance.menu_type == MenuType::Tavern)
        .expect("tavern entrance");
    assert_eq!(
        tavern.save_number,
        Some(wild_service_save_number(tavern_x as i32, tavern_y as i32))
    );
    let names = map.chunk_building_names(tavern_x, tavern_y, &exe.city_gen);
    assert_eq!(tavern.building_name.as_deref(), Some(names[0].name.as_str()));
    assert_eq!(tavern.dungeon_seed, None);
    assert!(tavern.position.x < 64 && tavern.position.z < 64);

    assert!(map
        .chunk_entrances(WILD_WIDTH, 0, &city, &exe.city_gen)
        .is_empty());
}

#[test]
fn missing_wild_chunk_fails_the_pass() {
    init_test_tracing();
    let inf = fixture_inf();
    let exe = fixture_exe_tables();
    let mut library = fixture_prefab_library(FIXTURE_SEED);
    library.wild_chunks.remove(&7);
    let city = fixture_city(CityType::CityState, 0x1234);
    let skeleton = fixture_city_skeleton(&city);

    let err = LevelAssembler::new(&inf, &exe)
        .assemble_wilderness(WILD_SEED, &city, &skeleton, &library)
        .unwrap_err();
    assert_eq!(err, GenerationError::MissingWildChunk { id: 7 });
}
