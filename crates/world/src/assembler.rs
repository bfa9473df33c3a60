//! Turns generated source layers into [`LevelDefinition`]s backed by one deduplicated
//! [`LevelInfoDefinition`].
//!
//! One assembler covers one generation pass. Its caches map raw codes (and lock, trigger
//! and transition records) to definition IDs, so identical inputs share an ID across every
//! level of the pass. Assembly consumes the assembler.

use std::collections::{BTreeMap, BTreeSet, HashMap};

use arenagen_assets::{
    CityDefinition, CityGenTables, ExeTables, InfData, MifLevel, MifLock, MifMap, MifTrigger,
    NameTables, PrefabLibrary,
};
use arenagen_core::{
    is_city_gate_menu_index, ArenaRandom, Grid2, LevelDouble3, LevelInt2, LevelInt3, MapType,
    MenuType, VoxelCode,
};
use serde::Serialize;
use tracing::{debug, info_span};

use crate::city::generate_city;
use crate::doors::{
    door_lock_level, door_voxel_mif_name, service_save_number, wild_service_save_number,
    EntranceContext, EntranceReport,
};
use crate::dungeon::{generate_dungeon, DungeonParams};
use crate::error::{DecodeWarning, DecodeWarnings, GenerationError};
use crate::layers::MapLayers;
use crate::level::{
    EntityDefId, EntityDefinition, LevelDefinition, LevelInfoDefinition, LockDefId,
    LockDefinition, TransitionDefId, TransitionDefinition, TriggerDefId, TriggerDefinition,
    TriggerText, VoxelDefId,
};
use crate::level_utils::{ceiling_height_to_scale, mif_level_height};
use crate::names::{
    generate_city_building_names, generate_wild_chunk_names, BuildingName, CityNameContext,
};
use crate::palace::revise_palace_graphics;
use crate::voxel_decode::{DecodeContext, Map1Voxel, WallKind};
use crate::wild::{
    generate_wilderness_indices, is_wild_city_block, revise_wilderness_city, stamp_city_chunk,
    wild_chunk_seed,
};

/// Output of one assembly pass.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AssembledMap {
    pub levels: Vec<LevelDefinition>,
    pub info: LevelInfoDefinition,
    pub start_points: Vec<LevelInt2>,
    pub warnings: Vec<DecodeWarning>,
}

impl AssembledMap {
    /// Interior entrances of every level, in level order then placement order. Named
    /// buildings get city service save numbers.
    pub fn entrances(&self) -> Vec<EntranceReport> {
        self.levels
            .iter()
            .enumerate()
            .flat_map(|(index, level)| level_entrances(&self.info, index, level))
            .collect()
    }
}

fn level_entrances(
    info: &LevelInfoDefinition,
    index: usize,
    level: &LevelDefinition,
) -> Vec<EntranceReport> {
    let mut random = ArenaRandom::default();
    let mut entrances = Vec::new();
    for group in level.transitions() {
        let Some(TransitionDefinition::InteriorEntrance {
            menu_type,
            mif_name,
        }) = info.transition_def(group.id)
        else {
            continue;
        };
        let menu_type = *menu_type;
        if !menu_type.leads_to_interior() {
            continue;
        }
        for &position in &group.positions {
            let door = LevelInt2::new(position.x, position.z).to_original();
            let building_name = level
                .building_name_at(position)
                .filter(|_| menu_type.has_display_name())
                .and_then(|id| info.building_name(id))
                .map(str::to_owned);
            entrances.push(EntranceReport {
                level: index,
                position,
                door,
                menu_type,
                mif_name: mif_name.clone(),
                building_name,
                lock_level: door_lock_level(door.x, door.y, &mut random),
                save_number: menu_type
                    .has_display_name()
                    .then(|| service_save_number(door.x, door.y)),
                dungeon_seed: None,
            });
        }
    }
    entrances
}

/// An assembled wilderness: one level per distinct chunk ID plus the chunk grid.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WildernessMap {
    pub map: AssembledMap,
    pub indices: Grid2<u8>,
    chunk_levels: BTreeMap<u8, usize>,
}

impl WildernessMap {
    /// Level index for a chunk ID.
    pub fn level_for_block(&self, block_id: u8) -> Option<usize> {
        self.chunk_levels.get(&block_id).copied()
    }

    /// Level index for the chunk at wilderness cell `(x, y)`.
    pub fn level_for_chunk(&self, x: usize, y: usize) -> Option<usize> {
        self.indices
            .try_get(x, y)
            .and_then(|id| self.level_for_block(id))
    }

    /// Tavern and temple names for the chunk at `(x, y)`, seeded by its position.
    pub fn chunk_building_names(
        &self,
        x: usize,
        y: usize,
        tables: &CityGenTables,
    ) -> Vec<BuildingName> {
        let Some(level) = self
            .level_for_chunk(x, y)
            .and_then(|index| self.map.levels.get(index))
        else {
            return Vec::new();
        };
        let seed = wild_chunk_seed(x as i32, y as i32);
        generate_wild_chunk_names(seed, level, &self.map.info, tables)
    }

    /// Entrances of the chunk at `(x, y)`. Door positions are chunk-relative; save numbers
    /// and dungeon seeds come from the wilderness cell.
    pub fn chunk_entrances(
        &self,
        x: usize,
        y: usize,
        city: &CityDefinition,
        tables: &CityGenTables,
    ) -> Vec<EntranceReport> {
        let Some((index, level)) = self
            .level_for_chunk(x, y)
            .and_then(|index| self.map.levels.get(index).map(|level| (index, level)))
        else {
            return Vec::new();
        };
        let names = self.chunk_building_names(x, y, tables);
        let (wild_x, wild_y) = (x as i32, y as i32);

        let mut entrances = level_entrances(&self.map.info, index, level);
        for entrance in &mut entrances {
            entrance.building_name = names
                .iter()
                .find(|name| name.position == entrance.position)
                .map(|name| name.name.clone());
            entrance.save_number = entrance
                .menu_type
                .has_display_name()
                .then(|| wild_service_save_number(wild_x, wild_y));
            if entrance.menu_type == MenuType::Dungeon {
                entrance.dungeon_seed = Some(city.wild_dungeon_seed(wild_x, wild_y));
            }
        }
        entrances
    }
}

pub struct LevelAssembler<'a> {
    inf: &'a InfData,
    tables: &'a ExeTables,
    entrance: Option<EntranceContext>,
    info: LevelInfoDefinition,
    flor_cache: HashMap<VoxelCode, VoxelDefId>,
    map1_cache: HashMap<VoxelCode, VoxelDefId>,
    map2_cache: HashMap<VoxelCode, (VoxelDefId, i32)>,
    ceiling_id: Option<VoxelDefId>,
    entity_cache: HashMap<i32, EntityDefId>,
    lock_cache: BTreeMap<MifLock, LockDefId>,
    trigger_cache: BTreeMap<MifTrigger, TriggerDefId>,
    transition_cache: HashMap<TransitionDefinition, TransitionDefId>,
    warnings: DecodeWarnings,
}

impl<'a> LevelAssembler<'a> {
    pub fn new(inf: &'a InfData, tables: &'a ExeTables) -> Self {
        Self {
            inf,
            tables,
            entrance: None,
            info: LevelInfoDefinition::new(ceiling_height_to_scale(inf.ceiling.height)),
            flor_cache: HashMap::new(),
            map1_cache: HashMap::new(),
            map2_cache: HashMap::new(),
            ceiling_id: None,
            entity_cache: HashMap::new(),
            lock_cache: BTreeMap::new(),
            trigger_cache: BTreeMap::new(),
            transition_cache: HashMap::new(),
            warnings: DecodeWarnings::new(),
        }
    }

    /// City facts used to name interior entrances. City and wilderness assembly set this
    /// from the city definition when it is absent.
    pub fn with_entrance(mut self, entrance: EntranceContext) -> Self {
        self.entrance = Some(entrance);
        self
    }

    /// Every level of a premade interior.
    pub fn assemble_interior(mut self, mif: &MifMap) -> AssembledMap {
        let span = info_span!("assemble_interior", mif = %mif.name);
        let _enter = span.enter();

        let levels = mif
            .levels
            .iter()
            .map(|level| self.assemble_level(level, MapType::Interior))
            .collect();
        let start_points = mif.start_points.iter().map(|point| point.to_level()).collect();
        self.finish(levels, start_points)
    }

    /// Generate and assemble a random dungeon. The start point is the first level-up voxel.
    pub fn assemble_dungeon(
        mut self,
        params: &DungeonParams,
        library: &PrefabLibrary,
    ) -> Result<AssembledMap, GenerationError> {
        let layout = generate_dungeon(params, library, self.inf, &mut self.warnings)?;
        let span = info_span!(
            "assemble_dungeon",
            seed = params.seed,
            levels = layout.levels.len()
        );
        let _enter = span.enter();

        let levels = layout
            .levels
            .iter()
            .map(|level| self.assemble_level(level, MapType::Interior))
            .collect();
        Ok(self.finish(levels, vec![layout.start_point.to_level()]))
    }

    /// Generate a city on its skeleton, revise the palace, assemble it and name its buildings.
    pub fn assemble_city(
        mut self,
        city: &CityDefinition,
        skeleton: &MifMap,
        library: &PrefabLibrary,
        names: &NameTables,
    ) -> Result<AssembledMap, GenerationError> {
        let span = info_span!("assemble_city", city = %city.name, seed = city.city_seed);
        let _enter = span.enter();

        let base = skeleton_level(skeleton)?;
        let mut layers = MapLayers::from_level(base);
        let mut random = ArenaRandom::new(city.city_seed);
        if !city.premade {
            generate_city(city, &mut random, library, &mut layers)?;
        }
        if revise_palace_graphics(&mut layers.map1).is_none() {
            self.warnings.push(DecodeWarning::PalaceMarkerMissing);
        }

        self.entrance.get_or_insert_with(|| EntranceContext::from_city(city));
        let source = MifLevel {
            name: base.name.clone(),
            flor: layers.flor,
            map1: layers.map1,
            map2: base.map2.is_some().then_some(layers.map2),
            locks: base.locks.clone(),
            triggers: base.triggers.clone(),
        };
        let mut level = self.assemble_level(&source, MapType::City);

        let ctx = CityNameContext {
            city,
            tables: &self.tables.city_gen,
            names,
        };
        let building_names =
            generate_city_building_names(&ctx, &mut random, &level, &self.info, &mut self.warnings);
        for building in building_names {
            let id = self.info.add_building_name(building.name);
            level.add_building_name(id, building.position);
        }

        let start_points = skeleton
            .start_points
            .iter()
            .map(|point| point.to_level())
            .collect();
        Ok(self.finish(vec![level], start_points))
    }

    /// Pick the wilderness chunks for `seed` and assemble one level per distinct chunk ID.
    ///
    /// The four center placeholders are cut from the city generated on `skeleton`, reduced
    /// to its outer walls.
    pub fn assemble_wilderness(
        mut self,
        seed: u32,
        city: &CityDefinition,
        skeleton: &MifMap,
        library: &PrefabLibrary,
    ) -> Result<WildernessMap, GenerationError> {
        let span = info_span!("assemble_wilderness", seed, city = %city.name);
        let _enter = span.enter();

        let indices = generate_wilderness_indices(seed, &self.tables.wilderness)?;

        let mut city_layers = MapLayers::from_level(skeleton_level(skeleton)?);
        if !city.premade {
            let mut random = ArenaRandom::new(city.city_seed);
            generate_city(city, &mut random, library, &mut city_layers)?;
        }
        revise_wilderness_city(&mut city_layers);

        self.entrance.get_or_insert_with(|| EntranceContext::from_city(city));
        let block_ids: BTreeSet<u8> = indices.as_slice().iter().copied().collect();
        let mut levels = Vec::with_capacity(block_ids.len());
        let mut chunk_levels = BTreeMap::new();
        for id in block_ids {
            let layers = if is_wild_city_block(id) {
                stamp_city_chunk(id, &city_layers)
            } else {
                library.wild_chunk(id).map(MapLayers::from_chunk)
            }
            .ok_or(GenerationError::MissingWildChunk { id })?;

            debug!(block = id, "assembling wilderness chunk");
            let source = MifLevel {
                name: format!("WILD{id:03}"),
                flor: layers.flor,
                map1: layers.map1,
                map2: Some(layers.map2),
                locks: Vec::new(),
                triggers: Vec::new(),
            };
            chunk_levels.insert(id, levels.len());
            levels.push(self.assemble_level(&source, MapType::Wilderness));
        }

        Ok(WildernessMap {
            map: self.finish(levels, Vec::new()),
            indices,
            chunk_levels,
        })
    }

    fn finish(self, levels: Vec<LevelDefinition>, start_points: Vec<LevelInt2>) -> AssembledMap {
        AssembledMap {
            levels,
            info: self.info,
            start_points,
            warnings: self.warnings.into_vec(),
        }
    }

    fn decoder(&self, map_type: MapType) -> DecodeContext<'a> {
        DecodeContext::new(self.inf, &self.tables.wall_heights, map_type)
    }

    fn assemble_level(&mut self, source: &MifLevel, map_type: MapType) -> LevelDefinition {
        let height = mif_level_height(source, Some(&self.inf.ceiling)).max(2) as usize;
        let mut level = LevelDefinition::new(source.depth(), height, source.width());
        let decoder = self.decoder(map_type);

        self.read_flor(&decoder, &source.flor, &mut level);
        self.read_map1(&decoder, &source.map1, &mut level);
        match &source.map2 {
            Some(map2) => self.read_map2(&decoder, map2, &mut level),
            None if !self.inf.ceiling.outdoor_dungeon => self.fill_ceiling(&decoder, &mut level),
            None => {}
        }
        for lock in &source.locks {
            self.read_lock(lock, &mut level);
        }
        for trigger in &source.triggers {
            self.read_trigger(trigger, &mut level);
        }
        level
    }

    fn read_flor(
        &mut self,
        decoder: &DecodeContext<'_>,
        flor: &Grid2<VoxelCode>,
        level: &mut LevelDefinition,
    ) {
        for (x, z, &code) in flor.iter() {
            let (level_x, level_z) = (z as i32, x as i32);
            let floor = code & 0xFF00;
            let id = match self.flor_cache.get(&floor) {
                Some(&id) => id,
                None => {
                    let decoded = decoder.decode_floor(floor, &mut self.warnings);
                    let id = self.info.add_voxel_def(decoded.voxel);
                    self.flor_cache.insert(floor, id);
                    id
                }
            };
            level.set_voxel(level_x, 0, level_z, id);

            let flat = code & 0x00FF;
            if flat > 0 {
                self.place_entity(i32::from(flat) - 1, level_x, level_z, level);
            }
        }
    }

    fn read_map1(
        &mut self,
        decoder: &DecodeContext<'_>,
        map1: &Grid2<VoxelCode>,
        level: &mut LevelDefinition,
    ) {
        for (x, z, &code) in map1.iter() {
            let (level_x, level_z) = (z as i32, x as i32);
            let id = match self.map1_cache.get(&code) {
                Some(&id) => id,
                None => match decoder.decode_map1(code, &mut self.warnings) {
                    Map1Voxel::Empty => continue,
                    Map1Voxel::Entity { flat_index } => {
                        self.place_entity(flat_index, level_x, level_z, level);
                        continue;
                    }
                    Map1Voxel::Voxel(voxel) => {
                        let id = self.info.add_voxel_def(voxel);
                        self.map1_cache.insert(code, id);
                        id
                    }
                },
            };
            level.set_voxel(level_x, 1, level_z, id);

            let wall = self.info.voxel_def(id).and_then(|voxel| voxel.wall());
            if let Some((kind, menu_id)) = wall {
                let position = LevelInt3::new(level_x, 1, level_z);
                let transition = self.transition_for(kind, menu_id, position, decoder.map_type);
                if let Some(transition) = transition {
                    let id = self.transition_id(transition);
                    level.add_transition(id, position);
                }
            }
        }
    }

    fn read_map2(
        &mut self,
        decoder: &DecodeContext<'_>,
        map2: &Grid2<VoxelCode>,
        level: &mut LevelDefinition,
    ) {
        for (x, z, &code) in map2.iter() {
            if code == 0 {
                continue;
            }
            let (level_x, level_z) = (z as i32, x as i32);
            let (id, height) = match self.map2_cache.get(&code) {
                Some(&entry) => entry,
                None => {
                    let decoded = decoder.decode_ceiling(code, &mut self.warnings);
                    let entry = (self.info.add_voxel_def(decoded.voxel), decoded.height);
                    self.map2_cache.insert(code, entry);
                    entry
                }
            };
            for y in 2..2 + height {
                level.set_voxel(level_x, y, level_z, id);
            }
        }
    }

    fn fill_ceiling(&mut self, decoder: &DecodeContext<'_>, level: &mut LevelDefinition) {
        let id = match self.ceiling_id {
            Some(id) => id,
            None => {
                let voxel = decoder.default_ceiling(&mut self.warnings);
                let id = self.info.add_voxel_def(voxel);
                self.ceiling_id = Some(id);
                id
            }
        };
        for z in 0..level.depth() as i32 {
            for x in 0..level.width() as i32 {
                level.set_voxel(x, 2, z, id);
            }
        }
    }

    fn place_entity(
        &mut self,
        flat_index: i32,
        level_x: i32,
        level_z: i32,
        level: &mut LevelDefinition,
    ) {
        let id = *self
            .entity_cache
            .entry(flat_index)
            .or_insert_with(|| self.info.add_entity_def(EntityDefinition { flat_index }));
        level.add_entity(id, LevelDouble3::voxel_center(level_x, 1.0, level_z));
    }

    fn read_lock(&mut self, lock: &MifLock, level: &mut LevelDefinition) {
        let position = LevelInt3::new(lock.y, 1, lock.x);
        let id = *self.lock_cache.entry(*lock).or_insert_with(|| {
            self.info.add_lock_def(LockDefinition {
                position,
                lock_level: lock.lock_level,
            })
        });
        level.add_lock(id, position);
    }

    fn read_trigger(&mut self, trigger: &MifTrigger, level: &mut LevelDefinition) {
        let position = LevelInt3::new(trigger.y, 1, trigger.x);
        let inf = self.inf;
        let id = *self.trigger_cache.entry(*trigger).or_insert_with(|| {
            let text = trigger
                .text_index
                .and_then(|index| inf.text(index))
                .map(|text| TriggerText {
                    text: text.text.clone(),
                    displayed_once: text.displayed_once,
                });
            let sound = trigger
                .sound_index
                .and_then(|index| inf.sound(index))
                .map(str::to_ascii_uppercase);
            self.info.add_trigger_def(TriggerDefinition {
                position,
                text,
                sound,
            })
        });
        level.add_trigger(id, position);
    }

    fn transition_for(
        &mut self,
        kind: WallKind,
        menu_id: Option<i32>,
        position: LevelInt3,
        map_type: MapType,
    ) -> Option<TransitionDefinition> {
        match kind {
            WallKind::Solid => None,
            WallKind::LevelUp => Some(TransitionDefinition::LevelChange { is_level_up: true }),
            WallKind::LevelDown => Some(TransitionDefinition::LevelChange { is_level_up: false }),
            WallKind::Menu => {
                let menu_id = menu_id?;
                if map_type == MapType::Interior {
                    return Some(TransitionDefinition::InteriorExit);
                }
                if is_city_gate_menu_index(menu_id, map_type) {
                    return Some(TransitionDefinition::CityGate);
                }

                let menu_type = MenuType::from_menu_id(menu_id, map_type).unwrap_or_else(|| {
                    self.warnings.push(DecodeWarning::UnknownMenuId { menu_id });
                    MenuType::None
                });
                let door = LevelInt2::new(position.x, position.z).to_original();
                let mif_name = self.entrance.as_ref().and_then(|entrance| {
                    door_voxel_mif_name(door.x, door.y, menu_type, entrance, &self.tables.locations)
                });
                Some(TransitionDefinition::InteriorEntrance {
                    menu_type,
                    mif_name,
                })
            }
        }
    }

    fn transition_id(&mut self, transition: TransitionDefinition) -> TransitionDefId {
        if let Some(&id) = self.transition_cache.get(&transition) {
            return id;
        }
        let id = self.info.add_transition_def(transition.clone());
        self.transition_cache.insert(transition, id);
        id
    }
}

fn skeleton_level(skeleton: &MifMap) -> Result<&MifLevel, GenerationError> {
    skeleton.levels.first().ok_or_else(|| {
        GenerationError::InvalidDimensions(format!("skeleton {} has no levels", skeleton.name))
    })
}
