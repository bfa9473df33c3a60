use arenagen_world::{
    door_sounds, AssembledMap, DoorSounds, EntranceReport, LevelDefinition, WildernessMap,
};
use serde::Serialize;

/// Compact description of one assembly pass, printed by every subcommand.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MapSummary {
    pub kind: &'static str,
    pub levels: Vec<LevelSummary>,
    pub voxel_defs: usize,
    pub entity_defs: usize,
    pub lock_defs: usize,
    pub trigger_defs: usize,
    pub transition_defs: usize,
    pub building_names: Vec<String>,
    pub start_points: Vec<[i32; 2]>,
    pub entrances: Vec<EntranceReport>,
    pub door_sounds: Vec<DoorSounds>,
    pub warnings: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wild_digest: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LevelSummary {
    pub width: usize,
    pub height: usize,
    pub depth: usize,
    pub entities: usize,
    pub transitions: usize,
    /// blake3 of the voxel IDs, little-endian.
    pub digest: String,
}

/// blake3 over a sequence of little-endian words.
fn digest_words<I: IntoIterator<Item = u32>>(words: I) -> String {
    let mut hasher = blake3::Hasher::new();
    for word in words {
        hasher.update(&word.to_le_bytes());
    }
    hasher.finalize().to_hex().to_string()
}

fn summarize_level(level: &LevelDefinition) -> LevelSummary {
    LevelSummary {
        width: level.width(),
        height: level.height(),
        depth: level.depth(),
        entities: level.entity_count(),
        transitions: level
            .transitions()
            .iter()
            .map(|group| group.positions.len())
            .sum(),
        digest: digest_words(level.voxels().iter().copied()),
    }
}

pub fn summarize(kind: &'static str, map: &AssembledMap) -> MapSummary {
    MapSummary {
        kind,
        levels: map.levels.iter().map(summarize_level).collect(),
        voxel_defs: map.info.voxel_defs().len(),
        entity_defs: map.info.entity_defs().len(),
        lock_defs: map.info.lock_defs().len(),
        trigger_defs: map.info.trigger_defs().len(),
        transition_defs: map.info.transition_defs().len(),
        building_names: map.info.building_names().to_vec(),
        start_points: map
            .start_points
            .iter()
            .map(|point| [point.x, point.z])
            .collect(),
        entrances: map.entrances(),
        door_sounds: door_sounds(&map.info),
        warnings: map.warnings.iter().map(ToString::to_string).collect(),
        wild_digest: None,
    }
}

/// Wilderness levels are shared by every cell with the same chunk ID, so entrances are only
/// meaningful per cell and are passed in by the caller.
pub fn summarize_wilderness(map: &WildernessMap, entrances: Vec<EntranceReport>) -> MapSummary {
    let mut summary = summarize("wilderness", &map.map);
    summary.entrances = entrances;
    summary.wild_digest = Some(digest_words(
        map.indices.as_slice().iter().map(|&id| u32::from(id)),
    ));
    summary
}
