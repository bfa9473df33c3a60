//! Modern level representation: a dense voxel-ID grid plus grouped placements, and the
//! deduplicated definition pool the IDs point into.

use std::collections::HashMap;
use std::hash::Hash;

use arenagen_core::{LevelDouble3, LevelInt3, MenuType};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::voxel_decode::VoxelDefinition;

pub type VoxelDefId = u32;
pub type EntityDefId = u32;
pub type LockDefId = u32;
pub type TriggerDefId = u32;
pub type TransitionDefId = u32;
pub type BuildingNameId = u32;

/// Air. Always the first voxel definition in a [`LevelInfoDefinition`].
pub const AIR_VOXEL_ID: VoxelDefId = 0;

/// All positions sharing one definition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlacementGroup<Id, P> {
    pub id: Id,
    pub positions: Vec<P>,
}

/// A placement position with an exact hashable identity.
pub trait PlacementPosition: Copy {
    type Key: Copy + Eq + Hash + std::fmt::Debug;

    fn key(&self) -> Self::Key;
}

impl PlacementPosition for LevelInt3 {
    type Key = LevelInt3;

    fn key(&self) -> LevelInt3 {
        *self
    }
}

impl PlacementPosition for LevelDouble3 {
    type Key = [u64; 3];

    fn key(&self) -> [u64; 3] {
        [self.x.to_bits(), self.y.to_bits(), self.z.to_bits()]
    }
}

/// Placement groups in first-use order, indexed by definition ID and by position.
///
/// Serializes as the plain group list. The indices are rebuilt on load.
#[derive(Debug, Clone)]
pub struct Placements<Id, P: PlacementPosition> {
    groups: Vec<PlacementGroup<Id, P>>,
    by_id: HashMap<Id, usize>,
    by_position: HashMap<P::Key, Id>,
}

impl<Id: Copy + Eq + Hash, P: PlacementPosition> Placements<Id, P> {
    pub fn new() -> Self {
        Self {
            groups: Vec::new(),
            by_id: HashMap::new(),
            by_position: HashMap::new(),
        }
    }

    fn from_groups(groups: Vec<PlacementGroup<Id, P>>) -> Self {
        let mut placements = Self::new();
        for group in groups {
            for position in group.positions {
                placements.push(group.id, position);
            }
        }
        placements
    }

    /// Append `position` to the group for `id`. A position keeps the first ID placed there.
    pub fn push(&mut self, id: Id, position: P) {
        self.by_position.entry(position.key()).or_insert(id);
        match self.by_id.get(&id) {
            Some(&index) => self.groups[index].positions.push(position),
            None => {
                self.by_id.insert(id, self.groups.len());
                self.groups.push(PlacementGroup {
                    id,
                    positions: vec![position],
                });
            }
        }
    }

    pub fn at(&self, position: P) -> Option<Id> {
        self.by_position.get(&position.key()).copied()
    }

    pub fn group(&self, id: Id) -> Option<&PlacementGroup<Id, P>> {
        self.by_id.get(&id).map(|&index| &self.groups[index])
    }

    pub fn as_slice(&self) -> &[PlacementGroup<Id, P>] {
        &self.groups
    }
}

impl<Id: Copy + Eq + Hash, P: PlacementPosition> Default for Placements<Id, P> {
    fn default() -> Self {
        Self::new()
    }
}

impl<Id: PartialEq, P: PlacementPosition + PartialEq> PartialEq for Placements<Id, P> {
    fn eq(&self, other: &Self) -> bool {
        self.groups == other.groups
    }
}

impl<Id: Serialize, P: PlacementPosition + Serialize> Serialize for Placements<Id, P> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.groups.serialize(serializer)
    }
}

impl<'de, Id, P> Deserialize<'de> for Placements<Id, P>
where
    Id: Deserialize<'de> + Copy + Eq + Hash,
    P: Deserialize<'de> + PlacementPosition,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let groups: Vec<PlacementGroup<Id, P>> = Vec::deserialize(deserializer)?;
        Ok(Self::from_groups(groups))
    }
}

/// One level's voxel grid and placements.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LevelDefinition {
    width: usize,
    height: usize,
    depth: usize,
    voxels: Vec<VoxelDefId>,
    entities: Placements<EntityDefId, LevelDouble3>,
    locks: Placements<LockDefId, LevelInt3>,
    triggers: Placements<TriggerDefId, LevelInt3>,
    transitions: Placements<TransitionDefId, LevelInt3>,
    building_names: Placements<BuildingNameId, LevelInt3>,
}

impl LevelDefinition {
    /// All-air level. `width` is the level X extent and `depth` the level Z extent.
    pub fn new(width: usize, height: usize, depth: usize) -> Self {
        Self {
            width,
            height,
            depth,
            voxels: vec![AIR_VOXEL_ID; width * height * depth],
            entities: Placements::new(),
            locks: Placements::new(),
            triggers: Placements::new(),
            transitions: Placements::new(),
            building_names: Placements::new(),
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn depth(&self) -> usize {
        self.depth
    }

    fn index(&self, x: i32, y: i32, z: i32) -> Option<usize> {
        let x = usize::try_from(x).ok().filter(|&x| x < self.width)?;
        let y = usize::try_from(y).ok().filter(|&y| y < self.height)?;
        let z = usize::try_from(z).ok().filter(|&z| z < self.depth)?;
        Some((y * self.depth + z) * self.width + x)
    }

    pub fn contains(&self, x: i32, y: i32, z: i32) -> bool {
        self.index(x, y, z).is_some()
    }

    /// Voxel definition at a position; air outside the grid.
    pub fn voxel(&self, x: i32, y: i32, z: i32) -> VoxelDefId {
        self.index(x, y, z)
            .map_or(AIR_VOXEL_ID, |index| self.voxels[index])
    }

    /// Set a voxel. Returns `false` when the position is outside the grid.
    pub fn set_voxel(&mut self, x: i32, y: i32, z: i32, id: VoxelDefId) -> bool {
        match self.index(x, y, z) {
            Some(index) => {
                self.voxels[index] = id;
                true
            }
            None => false,
        }
    }

    /// Raw voxel IDs, Y-major then Z then X.
    pub fn voxels(&self) -> &[VoxelDefId] {
        &self.voxels
    }

    pub fn add_entity(&mut self, id: EntityDefId, position: LevelDouble3) {
        self.entities.push(id, position);
    }

    pub fn add_lock(&mut self, id: LockDefId, position: LevelInt3) {
        self.locks.push(id, position);
    }

    pub fn add_trigger(&mut self, id: TriggerDefId, position: LevelInt3) {
        self.triggers.push(id, position);
    }

    pub fn add_transition(&mut self, id: TransitionDefId, position: LevelInt3) {
        self.transitions.push(id, position);
    }

    pub fn add_building_name(&mut self, id: BuildingNameId, position: LevelInt3) {
        self.building_names.push(id, position);
    }

    pub fn entities(&self) -> &[PlacementGroup<EntityDefId, LevelDouble3>] {
        self.entities.as_slice()
    }

    pub fn locks(&self) -> &[PlacementGroup<LockDefId, LevelInt3>] {
        self.locks.as_slice()
    }

    pub fn triggers(&self) -> &[PlacementGroup<TriggerDefId, LevelInt3>] {
        self.triggers.as_slice()
    }

    pub fn transitions(&self) -> &[PlacementGroup<TransitionDefId, LevelInt3>] {
        self.transitions.as_slice()
    }

    pub fn building_names(&self) -> &[PlacementGroup<BuildingNameId, LevelInt3>] {
        self.building_names.as_slice()
    }

    pub fn transition_at(&self, position: LevelInt3) -> Option<TransitionDefId> {
        self.transitions.at(position)
    }

    pub fn building_name_at(&self, position: LevelInt3) -> Option<BuildingNameId> {
        self.building_names.at(position)
    }

    /// Number of placed entities across all groups.
    pub fn entity_count(&self) -> usize {
        self.entities
            .as_slice()
            .iter()
            .map(|group| group.positions.len())
            .sum()
    }
}

/// Flat billboard reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EntityDefinition {
    pub flat_index: i32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LockDefinition {
    pub position: LevelInt3,
    pub lock_level: i32,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TriggerText {
    pub text: String,
    pub displayed_once: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TriggerDefinition {
    pub position: LevelInt3,
    pub text: Option<TriggerText>,
    /// Uppercase sound filename.
    pub sound: Option<String>,
}

/// Where stepping into or activating a voxel leads.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TransitionDefinition {
    LevelChange {
        is_level_up: bool,
    },
    CityGate,
    InteriorEntrance {
        menu_type: MenuType,
        mif_name: Option<String>,
    },
    InteriorExit,
}

/// Definition pool shared by the levels of one generation pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LevelInfoDefinition {
    voxel_defs: Vec<VoxelDefinition>,
    entity_defs: Vec<EntityDefinition>,
    lock_defs: Vec<LockDefinition>,
    trigger_defs: Vec<TriggerDefinition>,
    transition_defs: Vec<TransitionDefinition>,
    building_names: Vec<String>,
    ceiling_scale: f64,
}

impl LevelInfoDefinition {
    pub fn new(ceiling_scale: f64) -> Self {
        Self {
            voxel_defs: vec![VoxelDefinition::None],
            entity_defs: Vec::new(),
            lock_defs: Vec::new(),
            trigger_defs: Vec::new(),
            transition_defs: Vec::new(),
            building_names: Vec::new(),
            ceiling_scale,
        }
    }

    /// Ceiling height in voxels.
    pub fn ceiling_scale(&self) -> f64 {
        self.ceiling_scale
    }

    pub fn add_voxel_def(&mut self, def: VoxelDefinition) -> VoxelDefId {
        self.voxel_defs.push(def);
        (self.voxel_defs.len() - 1) as VoxelDefId
    }

    pub fn voxel_def(&self, id: VoxelDefId) -> Option<&VoxelDefinition> {
        self.voxel_defs.get(id as usize)
    }

    pub fn voxel_defs(&self) -> &[VoxelDefinition] {
        &self.voxel_defs
    }

    pub fn add_entity_def(&mut self, def: EntityDefinition) -> EntityDefId {
        self.entity_defs.push(def);
        (self.entity_defs.len() - 1) as EntityDefId
    }

    pub fn entity_def(&self, id: EntityDefId) -> Option<&EntityDefinition> {
        self.entity_defs.get(id as usize)
    }

    pub fn entity_defs(&self) -> &[EntityDefinition] {
        &self.entity_defs
    }

    pub fn add_lock_def(&mut self, def: LockDefinition) -> LockDefId {
        self.lock_defs.push(def);
        (self.lock_defs.len() - 1) as LockDefId
    }

    pub fn lock_def(&self, id: LockDefId) -> Option<&LockDefinition> {
        self.lock_defs.get(id as usize)
    }

    pub fn lock_defs(&self) -> &[LockDefinition] {
        &self.lock_defs
    }

    pub fn add_trigger_def(&mut self, def: TriggerDefinition) -> TriggerDefId {
        self.trigger_defs.push(def);
        (self.trigger_defs.len() - 1) as TriggerDefId
    }

    pub fn trigger_def(&self, id: TriggerDefId) -> Option<&TriggerDefinition> {
        self.trigger_defs.get(id as usize)
    }

    pub fn trigger_defs(&self) -> &[TriggerDefinition] {
        &self.trigger_defs
    }

    pub fn add_transition_def(&mut self, def: TransitionDefinition) -> TransitionDefId {
        self.transition_defs.push(def);
        (self.transition_defs.len() - 1) as TransitionDefId
    }

    pub fn transition_def(&self, id: TransitionDefId) -> Option<&TransitionDefinition> {
        self.transition_defs.get(id as usize)
    }

    pub fn transition_defs(&self) -> &[TransitionDefinition] {
        &self.transition_defs
    }

    pub fn add_building_name(&mut self, name: String) -> BuildingNameId {
        self.building_names.push(name);
        (self.building_names.len() - 1) as BuildingNameId
    }

    pub fn building_name(&self, id: BuildingNameId) -> Option<&str> {
        self.building_names.get(id as usize).map(String::as_str)
    }

    pub fn building_names(&self) -> &[String] {
        self.building_names.as_slice()
    }

    /// Voxel definition placed at a level position.
    pub fn voxel_at(&self, level: &LevelDefinition, x: i32, y: i32, z: i32) -> &VoxelDefinition {
        self.voxel_def(level.voxel(x, y, z))
            .unwrap_or(&VoxelDefinition::None)
    }
}
