//! Building display names for taverns, equipment stores and temples, plus the NPC names
//! equipment stores borrow.

use std::collections::HashSet;

use arenagen_assets::{
    CityDefinition, CityGenTables, NameRule, NameTables, EQUIPMENT_PREFIXES, EQUIPMENT_SUFFIXES,
    TAVERN_NAME_PARTS, TEMPLE_MODEL_SUFFIX_COUNTS,
};
use arenagen_core::{ArenaRandom, LevelInt3, MapType, MenuType};
use serde::Serialize;
use tracing::{debug, warn};

use crate::error::{DecodeWarning, DecodeWarnings};
use crate::level::{LevelDefinition, LevelInfoDefinition};
use crate::voxel_decode::{VoxelDefinition, WallKind};

/// A generated name and the *MENU voxel it labels.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BuildingName {
    pub position: LevelInt3,
    pub menu_type: MenuType,
    pub name: String,
}

/// Inputs for one city's naming pass.
#[derive(Debug, Clone, Copy)]
pub struct CityNameContext<'a> {
    pub city: &'a CityDefinition,
    pub tables: &'a CityGenTables,
    pub names: &'a NameTables,
}

fn entry<'a>(list: &'a [String], index: usize) -> &'a str {
    list.get(index).map_or("", String::as_str)
}

fn draw_entry<'a>(list: &'a [String], random: &mut ArenaRandom) -> &'a str {
    if list.is_empty() {
        return "";
    }
    entry(list, random.next() as usize % list.len())
}

/// Build an NPC name from the rule list for `race` and sex.
pub fn generate_npc_name(
    race: usize,
    is_male: bool,
    random: &mut ArenaRandom,
    tables: &NameTables,
) -> String {
    let Some(rules) = tables.rules_for(race, is_male) else {
        warn!(race, is_male, "no name rules for race");
        return String::new();
    };

    let chunk = |index: usize| tables.chunks.get(index).map_or(&[][..], Vec::as_slice);
    let mut name = String::new();
    for rule in rules {
        match rule {
            NameRule::Index { chunk: index } => {
                name.push_str(draw_entry(chunk(*index), random));
            }
            NameRule::String { text } => name.push_str(text),
            NameRule::IndexChance {
                chunk: index,
                chance,
            } => {
                if random.next() % 100 <= *chance {
                    name.push_str(draw_entry(chunk(*index), random));
                }
            }
            NameRule::IndexStringChance {
                chunk: index,
                text,
                chance,
            } => {
                if random.next() % 100 <= *chance {
                    name.push_str(draw_entry(chunk(*index), random));
                    name.push_str(text);
                }
            }
        }
    }
    name
}

pub fn tavern_name(tables: &CityGenTables, coastal: bool, m: usize, n: usize) -> String {
    let suffixes = if coastal {
        &tables.tavern_marine_suffixes
    } else {
        &tables.tavern_suffixes
    };
    format!("{} {}", entry(&tables.tavern_prefixes, m), entry(suffixes, n))
}

/// Temple prefix and suffix are joined without a separator.
pub fn temple_name(tables: &CityGenTables, model: usize, n: usize) -> String {
    format!(
        "{}{}",
        entry(&tables.temple_prefixes, model),
        entry(tables.temple_suffixes(model), n)
    )
}

/// Equipment store name for the store at level `(x, z)`, with `%ct`, `%ef` and `%n` filled in.
pub fn equipment_name(ctx: &CityNameContext<'_>, m: usize, n: usize, x: i32, z: i32) -> String {
    let mut name = format!(
        "{} {}",
        entry(&ctx.tables.equipment_prefixes, m),
        entry(&ctx.tables.equipment_suffixes, n)
    );

    if name.contains("%ct") {
        name = name.replacen("%ct", &ctx.city.type_display_name, 1);
    }
    if name.contains("%ef") {
        let mut random = ArenaRandom::new(((x << 16) + z) as u32);
        let full = generate_npc_name(ctx.city.race_id, true, &mut random, ctx.names);
        let first = full.split_whitespace().next().unwrap_or_default();
        name = name.replacen("%ef", first, 1);
    }
    if name.contains("%n") {
        let mut random = ArenaRandom::new(((z << 16) + x) as u32);
        let full = generate_npc_name(ctx.city.race_id, true, &mut random, ctx.names);
        name = name.replacen("%n", &full, 1);
    }
    name
}

fn is_menu_of_type(
    level: &LevelDefinition,
    info: &LevelInfoDefinition,
    x: i32,
    z: i32,
    target: MenuType,
    map_type: MapType,
) -> bool {
    match info.voxel_at(level, x, 1, z) {
        VoxelDefinition::Wall {
            kind: WallKind::Menu,
            menu_id: Some(menu_id),
            ..
        } => MenuType::from_menu_id(*menu_id, map_type) == Some(target),
        _ => false,
    }
}

/// Draws `(prefix, suffix)` pairs until one's hash is unused in this pass.
struct UniqueDraws {
    seen: HashSet<usize>,
    combinations: usize,
}

impl UniqueDraws {
    fn new(combinations: usize) -> Self {
        Self {
            seen: HashSet::new(),
            combinations,
        }
    }

    fn draw(
        &mut self,
        random: &mut ArenaRandom,
        mut next_pair: impl FnMut(&mut ArenaRandom) -> (usize, usize),
    ) -> (usize, usize) {
        loop {
            let (m, n) = next_pair(random);
            let hash = (m << 8) + n;
            if self.seen.insert(hash) {
                return (m, n);
            }
            if self.seen.len() >= self.combinations {
                warn!(hash, "every name combination is taken, reusing one");
                return (m, n);
            }
        }
    }
}

fn draw_temple(random: &mut ArenaRandom) -> (usize, usize) {
    let model = (random.next() % 3) as usize;
    let n = random.next() as usize % TEMPLE_MODEL_SUFFIX_COUNTS[model];
    (model, n)
}

const CITY_NAME_PASSES: [MenuType; 3] = [MenuType::Tavern, MenuType::Equipment, MenuType::Temple];

/// Name every tavern, equipment store and temple entrance in a city, in that order.
///
/// Equipment and temple passes reseed from the city's local point; the tavern pass continues
/// `random` where city generation left it.
pub fn generate_city_building_names(
    ctx: &CityNameContext<'_>,
    random: &mut ArenaRandom,
    level: &LevelDefinition,
    info: &LevelInfoDefinition,
    warnings: &mut DecodeWarnings,
) -> Vec<BuildingName> {
    let local = ctx.city.local_point();
    let mut names = Vec::new();

    for menu_type in CITY_NAME_PASSES {
        if menu_type != MenuType::Tavern {
            random.srand(((local.x << 16) + local.y) as u32);
        }

        let combinations = match menu_type {
            MenuType::Tavern => TAVERN_NAME_PARTS * TAVERN_NAME_PARTS,
            MenuType::Equipment => EQUIPMENT_PREFIXES * EQUIPMENT_SUFFIXES,
            _ => TEMPLE_MODEL_SUFFIX_COUNTS.iter().sum(),
        };
        let mut draws = UniqueDraws::new(combinations);

        for x in 0..level.width() as i32 {
            for z in 0..level.depth() as i32 {
                if !is_menu_of_type(level, info, x, z, menu_type, MapType::City) {
                    continue;
                }

                let name = match menu_type {
                    MenuType::Tavern => {
                        let (m, n) = draws.draw(random, |random| {
                            let m = random.next() as usize % TAVERN_NAME_PARTS;
                            let n = random.next() as usize % TAVERN_NAME_PARTS;
                            (m, n)
                        });
                        tavern_name(ctx.tables, ctx.city.coastal, m, n)
                    }
                    MenuType::Equipment => {
                        let (m, n) = draws.draw(random, |random| {
                            let m = random.next() as usize % EQUIPMENT_PREFIXES;
                            let n = random.next() as usize % EQUIPMENT_SUFFIXES;
                            (m, n)
                        });
                        equipment_name(ctx, m, n, x, z)
                    }
                    _ => {
                        let (model, n) = draws.draw(random, draw_temple);
                        temple_name(ctx.tables, model, n)
                    }
                };

                debug!(x, z, ?menu_type, %name, "named building");
                names.push(BuildingName {
                    position: LevelInt3::new(x, 1, z),
                    menu_type,
                    name,
                });
            }
        }

        if menu_type == MenuType::Temple {
            if let Some(fixup) = ctx.city.temple_override {
                let count = names.len();
                match names.get_mut(fixup.menu_names_index) {
                    Some(slot) => {
                        slot.name = temple_name(ctx.tables, fixup.model_index, fixup.suffix_index);
                    }
                    None => warnings.push(DecodeWarning::TempleOverrideOutOfRange {
                        index: fixup.menu_names_index,
                        count,
                    }),
                }
            }
        }
    }

    names
}

/// Names for the first tavern and first temple in one wilderness chunk's level.
pub fn generate_wild_chunk_names(
    chunk_seed: u32,
    level: &LevelDefinition,
    info: &LevelInfoDefinition,
    tables: &CityGenTables,
) -> Vec<BuildingName> {
    let mut names = Vec::new();
    for menu_type in [MenuType::Tavern, MenuType::Temple] {
        let mut random = ArenaRandom::new(chunk_seed);
        let found = (0..level.width() as i32)
            .flat_map(|x| (0..level.depth() as i32).map(move |z| (x, z)))
            .find(|&(x, z)| is_menu_of_type(level, info, x, z, menu_type, MapType::Wilderness));

        if let Some((x, z)) = found {
            let name = if menu_type == MenuType::Tavern {
                let m = random.next() as usize % TAVERN_NAME_PARTS;
                let n = random.next() as usize % TAVERN_NAME_PARTS;
                tavern_name(tables, false, m, n)
            } else {
                let (model, n) = draw_temple(&mut random);
                temple_name(tables, model, n)
            };
            names.push(BuildingName {
                position: LevelInt3::new(x, 1, z),
                menu_type,
                name,
            });
        }
    }
    names
}

#[cfg(test)]
mod tests {
    use super::*;
    use arenagen_core::{CityType, OriginalInt2};

    use crate::voxel_decode::TextureRef;

    fn parts(prefix: &str, count: usize) -> Vec<String> {
        (0..count).map(|i| format!("{prefix}{i}")).collect()
    }

    fn tables() -> CityGenTables {
        let mut equipment_prefixes = parts("Shop", 20);
        equipment_prefixes[0] = "%n's".into();
        equipment_prefixes[1] = "%ct".into();
        equipment_prefixes[2] = "%ef's".into();
        CityGenTables {
            tavern_prefixes: parts("The Tp", 23),
            tavern_marine_suffixes: parts("Anchor", 23),
            tavern_suffixes: parts("Cup", 23),
            temple_prefixes: vec!["Temple of ".into(), "Chapel of ".into(), "Shrine of ".into()],
            temple1_suffixes: parts("A", 5),
            temple2_suffixes: parts("B", 9),
            temple3_suffixes: parts("C", 10),
            equipment_prefixes,
            equipment_suffixes: parts("Wares", 10),
        }
    }

    fn name_tables() -> NameTables {
        NameTables {
            chunks: vec![
                vec!["Ar".into(), "Bel".into(), "Cor".into()],
                vec!["an".into(), "ic".into()],
                vec!["Stone".into(), "Vale".into()],
            ],
            rules: vec![vec![
                NameRule::Index { chunk: 0 },
                NameRule::Index { chunk: 1 },
                NameRule::String { text: " ".into() },
                NameRule::Index { chunk: 2 },
            ]],
        }
    }

    fn city() -> CityDefinition {
        CityDefinition {
            name: "Testburg".into(),
            map_filename: "TOWN.MIF".into(),
            city_type: CityType::Town,
            type_display_name: "Town".into(),
            city_seed: 0x0012_0034,
            ruler_seed: 0,
            wild_seed: 0,
            province_seed: 0,
            race_id: 0,
            reserved_blocks: Vec::new(),
            block_start: OriginalInt2::new(0, 0),
            coastal: false,
            premade: false,
            palace_is_main_quest_dungeon: false,
            temple_override: None,
            blocks_per_side: None,
        }
    }

    fn menu_wall(menu_id: i32) -> VoxelDefinition {
        let texture = TextureRef {
            id: 1,
            filename: "WALL.IMG".into(),
            set_index: None,
        };
        VoxelDefinition::Wall {
            side: texture.clone(),
            floor: texture.clone(),
            ceiling: texture,
            menu_id: Some(menu_id),
            kind: WallKind::Menu,
        }
    }

    /// City menu IDs: 0 equipment, 1 tavern, 3 temple.
    fn level_with_menus(placements: &[(i32, i32, i32)]) -> (LevelDefinition, LevelInfoDefinition) {
        let mut level = LevelDefinition::new(16, 3, 16);
        let mut info = LevelInfoDefinition::new(1.0);
        for &(x, z, menu_id) in placements {
            let id = info.add_voxel_def(menu_wall(menu_id));
            level.set_voxel(x, 1, z, id);
        }
        (level, info)
    }

    #[test]
    fn npc_names_follow_rules() {
        let tables = name_tables();
        let mut random = ArenaRandom::new(42);
        let name = generate_npc_name(0, true, &mut random, &tables);
        let mut parts = name.split(' ');
        let first = parts.next().unwrap();
        let last = parts.next().unwrap();
        assert!(["Ar", "Bel", "Cor"].iter().any(|p| first.starts_with(p)));
        assert!(["Stone", "Vale"].contains(&last));

        let mut again = ArenaRandom::new(42);
        assert_eq!(generate_npc_name(0, true, &mut again, &tables), name);
        assert_eq!(generate_npc_name(0, false, &mut again, &tables), "");
    }

    #[test]
    fn chance_rules_skip_the_chunk_draw_when_they_miss() {
        let tables = NameTables {
            chunks: vec![vec!["X".into()]],
            rules: vec![vec![
                NameRule::IndexChance {
                    chunk: 0,
                    chance: 100,
                },
                NameRule::IndexStringChance {
                    chunk: 0,
                    text: "!".into(),
                    chance: 100,
                },
            ]],
        };
        let mut random = ArenaRandom::new(1);
        assert_eq!(generate_npc_name(0, true, &mut random, &tables), "XX!");
        let mut reference = ArenaRandom::new(1);
        for _ in 0..4 {
            reference.next();
        }
        assert_eq!(random, reference);
    }

    #[test]
    fn name_composition() {
        let tables = tables();
        assert_eq!(tavern_name(&tables, false, 2, 3), "The Tp2 Cup3");
        assert_eq!(tavern_name(&tables, true, 2, 3), "The Tp2 Anchor3");
        assert_eq!(temple_name(&tables, 2, 9), "Shrine of C9");

        let city = city();
        let names = name_tables();
        let ctx = CityNameContext {
            city: &city,
            tables: &tables,
            names: &names,
        };
        assert_eq!(equipment_name(&ctx, 1, 4, 3, 5), "Town Wares4");
        let owner = equipment_name(&ctx, 0, 0, 3, 5);
        assert!(owner.ends_with("'s Wares0"));
        assert!(!owner.contains('%'));
        assert_eq!(owner, equipment_name(&ctx, 0, 0, 3, 5));
        let first = equipment_name(&ctx, 2, 0, 3, 5);
        assert_eq!(first.split(' ').count(), 2, "only the first word is kept: {first}");
    }

    #[test]
    fn city_names_are_unique_per_type() {
        let mut placements = Vec::new();
        for i in 0..10 {
            placements.push((i, 0, 1));
            placements.push((i, 2, 0));
            placements.push((i, 4, 3));
        }
        let (level, info) = level_with_menus(&placements);
        let city = city();
        let tables = tables();
        let names = name_tables();
        let ctx = CityNameContext {
            city: &city,
            tables: &tables,
            names: &names,
        };
        let mut random = ArenaRandom::new(city.city_seed);
        let mut warnings = DecodeWarnings::new();
        let result = generate_city_building_names(&ctx, &mut random, &level, &info, &mut warnings);
        assert!(warnings.is_empty());
        assert_eq!(result.len(), 30);

        for menu_type in CITY_NAME_PASSES {
            let of_type: Vec<_> = result.iter().filter(|n| n.menu_type == menu_type).collect();
            assert_eq!(of_type.len(), 10);
            if menu_type != MenuType::Equipment {
                let unique: HashSet<_> = of_type.iter().map(|n| &n.name).collect();
                assert_eq!(unique.len(), 10, "{menu_type:?} names repeat");
            }
        }
        assert_eq!(result[0].menu_type, MenuType::Tavern);
        assert_eq!(result[29].menu_type, MenuType::Temple);
    }

    #[test]
    fn temple_override_replaces_combined_index() {
        let (level, info) = level_with_menus(&[(1, 1, 1), (2, 2, 3), (3, 3, 3)]);
        let mut city = city();
        city.temple_override = Some(arenagen_assets::MainQuestTempleOverride {
            model_index: 1,
            suffix_index: 7,
            menu_names_index: 2,
        });
        let tables = tables();
        let names = name_tables();
        let ctx = CityNameContext {
            city: &city,
            tables: &tables,
            names: &names,
        };
        let mut warnings = DecodeWarnings::new();
        let result = generate_city_building_names(
            &ctx,
            &mut ArenaRandom::new(1),
            &level,
            &info,
            &mut warnings,
        );
        assert_eq!(result.len(), 3);
        assert_eq!(result[2].name, "Chapel of B7");

        city.temple_override = Some(arenagen_assets::MainQuestTempleOverride {
            model_index: 1,
            suffix_index: 7,
            menu_names_index: 23,
        });
        let ctx = CityNameContext {
            city: &city,
            tables: &tables,
            names: &names,
        };
        generate_city_building_names(&ctx, &mut ArenaRandom::new(1), &level, &info, &mut warnings);
        assert_eq!(
            warnings.first(),
            Some(&DecodeWarning::TempleOverrideOutOfRange { index: 23, count: 3 })
        );
    }

    #[test]
    fn temple_names_survive_exhaustion() {
        let placements: Vec<_> = (0..15)
            .flat_map(|x| (0..2).map(move |z| (x, z, 3)))
            .collect();
        let (level, info) = level_with_menus(&placements);
        let city = city();
        let tables = tables();
        let names = name_tables();
        let ctx = CityNameContext {
            city: &city,
            tables: &tables,
            names: &names,
        };
        let result = generate_city_building_names(
            &ctx,
            &mut ArenaRandom::new(9),
            &level,
            &info,
            &mut DecodeWarnings::new(),
        );
        assert_eq!(result.len(), 30);
    }

    #[test]
    fn wild_names_take_first_match_only() {
        // Wilderness menu IDs: 3 tavern, 4 temple.
        let (level, info) = level_with_menus(&[(5, 5, 3), (6, 6, 3), (2, 9, 4)]);
        let tables = tables();
        let names = generate_wild_chunk_names(0x0002_0003, &level, &info, &tables);
        assert_eq!(names.len(), 2);
        assert_eq!(names[0].position, LevelInt3::new(5, 1, 5));
        assert_eq!(names[1].position, LevelInt3::new(2, 1, 9));
        assert!(names[0].name.ends_with(|c: char| c.is_ascii_digit()));
        assert!(names[0].name.contains(" Cup"));
        assert_eq!(
            names,
            generate_wild_chunk_names(0x0002_0003, &level, &info, &tables)
        );
    }
}
