//! City block layout: a seeded plan of block types, then prefab blocks copied into the
//! skeleton's block area.

use arenagen_assets::{CityDefinition, PrefabLibrary};
use arenagen_core::{ArenaRandom, OriginalInt2};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::GenerationError;
use crate::layers::MapLayers;

/// Spacing between city block origins, in voxels.
pub const CITY_BLOCK_DIM: i32 = 20;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BlockType {
    Empty,
    Reserved,
    Equipment,
    MagesGuild,
    NobleHouse,
    Temple,
    Tavern,
    Spacer,
    Houses,
}

impl BlockType {
    /// Prefab filename code.
    pub const fn code(self) -> Option<&'static str> {
        match self {
            Self::Equipment => Some("EQ"),
            Self::MagesGuild => Some("MG"),
            Self::NobleHouse => Some("NB"),
            Self::Temple => Some("TP"),
            Self::Tavern => Some("TV"),
            Self::Spacer => Some("TS"),
            Self::Houses => Some("BS"),
            Self::Empty | Self::Reserved => None,
        }
    }

    /// Number of prefab variations.
    pub const fn variations(self) -> Option<u32> {
        match self {
            Self::Equipment => Some(13),
            Self::MagesGuild => Some(11),
            Self::NobleHouse => Some(10),
            Self::Temple => Some(12),
            Self::Tavern => Some(15),
            Self::Spacer => Some(11),
            Self::Houses => Some(20),
            Self::Empty | Self::Reserved => None,
        }
    }
}

/// Blocks every city gets before the weighted fill.
pub const INITIAL_BLOCKS: [BlockType; 6] = [
    BlockType::Equipment,
    BlockType::MagesGuild,
    BlockType::NobleHouse,
    BlockType::Temple,
    BlockType::Tavern,
    BlockType::Spacer,
];

/// Weighted fill chances, in percent. Sums to 100.
pub const BLOCK_TYPE_CHANCES: [(u32, BlockType); 5] = [
    (75, BlockType::Houses),
    (15, BlockType::Tavern),
    (6, BlockType::Equipment),
    (2, BlockType::Temple),
    (2, BlockType::NobleHouse),
];

const BLOCK_ROTATIONS: [&str; 4] = ["A", "B", "C", "D"];

/// Draw a weighted block type.
pub fn random_block_type(random: &mut ArenaRandom) -> BlockType {
    let roll = random.next() % 100;
    let mut cumulative = 0;
    for (chance, block) in BLOCK_TYPE_CHANCES {
        cumulative += chance;
        if roll < cumulative {
            return block;
        }
    }
    BlockType::NobleHouse
}

/// Prefab filename for a block, e.g. `EQBD3A.MIF`. Draws the rotation, then the variation.
pub fn city_block_mif_name(block: BlockType, random: &mut ArenaRandom) -> Option<String> {
    let code = block.code()?;
    let variations = block.variations()?;
    let rotation = BLOCK_ROTATIONS[(random.next() % 4) as usize];
    let variation = (random.next() % variations).max(1);
    Some(format!("{code}BD{variation}{rotation}.MIF"))
}

/// Square grid of block slots, stored row by row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CityPlan {
    blocks_per_side: usize,
    slots: Vec<BlockType>,
}

impl CityPlan {
    pub fn blocks_per_side(&self) -> usize {
        self.blocks_per_side
    }

    pub fn slots(&self) -> &[BlockType] {
        &self.slots
    }

    pub fn get(&self, column: usize, row: usize) -> Option<BlockType> {
        if column >= self.blocks_per_side {
            return None;
        }
        self.slots.get(row * self.blocks_per_side + column).copied()
    }

    pub fn count(&self, block: BlockType) -> usize {
        self.slots.iter().filter(|&&slot| slot == block).count()
    }

    fn place_block(&mut self, block: BlockType, random: &mut ArenaRandom) {
        if !self.slots.contains(&BlockType::Empty) {
            warn!(?block, "city plan has no empty slot left");
            return;
        }

        let size = self.slots.len() as u32;
        loop {
            let index = (random.next() % size) as usize;
            if self.slots[index] == BlockType::Empty {
                self.slots[index] = block;
                return;
            }
        }
    }
}

/// Lay out `blocks_per_side`² block slots.
pub fn plan_city_blocks(
    blocks_per_side: usize,
    reserved: &[u8],
    random: &mut ArenaRandom,
) -> CityPlan {
    let mut plan = CityPlan {
        blocks_per_side,
        slots: vec![BlockType::Empty; blocks_per_side * blocks_per_side],
    };

    for &block in reserved {
        if let Some(slot) = plan.slots.get_mut(usize::from(block)) {
            *slot = BlockType::Reserved;
        }
    }

    for block in INITIAL_BLOCKS {
        plan.place_block(block, random);
    }

    let remaining = plan.count(BlockType::Empty);
    for _ in 0..remaining {
        let block = random_block_type(random);
        plan.place_block(block, random);
    }

    plan
}

/// Copy a prefab for every non-reserved slot into `layers`.
pub fn build_city(
    plan: &CityPlan,
    block_start: OriginalInt2,
    random: &mut ArenaRandom,
    library: &PrefabLibrary,
    layers: &mut MapLayers,
) -> Result<(), GenerationError> {
    let side = plan.blocks_per_side.max(1);
    for (index, &block) in plan.slots.iter().enumerate() {
        if block == BlockType::Reserved {
            continue;
        }

        let Some(name) = city_block_mif_name(block, random) else {
            continue;
        };
        let level = library
            .city_block(&name)
            .ok_or_else(|| GenerationError::MissingCityBlock { name: name.clone() })?;

        let column = (index % side) as i32;
        let row = (index / side) as i32;
        let origin = OriginalInt2::new(
            block_start.x + column * CITY_BLOCK_DIM,
            block_start.y + row * CITY_BLOCK_DIM,
        );
        debug!(block = %name, column, row, "placing city block");
        layers.blit_level(level, origin);
    }
    Ok(())
}

/// Plan and build a city's blocks into its skeleton layers.
pub fn generate_city(
    city: &CityDefinition,
    random: &mut ArenaRandom,
    library: &PrefabLibrary,
    layers: &mut MapLayers,
) -> Result<CityPlan, GenerationError> {
    let plan = plan_city_blocks(city.blocks_per_side(), &city.reserved_blocks, random);
    build_city(&plan, city.block_start, random, library, layers)?;
    Ok(plan)
}

#[cfg(test)]
mod tests {
    use super::*;
    use arenagen_assets::{MifLevel, MifMap};

    #[test]
    fn chances_cover_all_rolls() {
        let total: u32 = BLOCK_TYPE_CHANCES.iter().map(|(chance, _)| chance).sum();
        assert_eq!(total, 100);
    }

    #[test]
    fn block_names_use_code_variation_and_rotation() {
        let mut random = ArenaRandom::new(7);
        let name = city_block_mif_name(BlockType::Equipment, &mut random).unwrap();
        assert!(name.starts_with("EQBD"));
        assert!(name.ends_with(".MIF"));
        let rotation = name.chars().nth(name.len() - 5).unwrap();
        assert!(('A'..='D').contains(&rotation));

        let mut random = ArenaRandom::new(7);
        assert!(city_block_mif_name(BlockType::Reserved, &mut random).is_none());
        assert_eq!(random, ArenaRandom::new(7));
    }

    #[test]
    fn plan_keeps_reserved_and_fills_everything_else() {
        let mut random = ArenaRandom::new(99);
        let plan = plan_city_blocks(4, &[0, 5, 200], &mut random);
        assert_eq!(plan.slots().len(), 16);
        assert_eq!(plan.get(0, 0), Some(BlockType::Reserved));
        assert_eq!(plan.get(1, 1), Some(BlockType::Reserved));
        assert_eq!(plan.count(BlockType::Reserved), 2);
        assert_eq!(plan.count(BlockType::Empty), 0);
        assert_eq!(plan.count(BlockType::MagesGuild), 1);
        assert_eq!(plan.count(BlockType::Spacer), 1);
    }

    #[test]
    fn overfull_reservation_does_not_hang() {
        let reserved: Vec<u8> = (0..4).collect();
        let mut random = ArenaRandom::new(1);
        let plan = plan_city_blocks(2, &reserved, &mut random);
        assert_eq!(plan.count(BlockType::Reserved), 4);
    }

    #[test]
    fn missing_block_is_fatal() {
        let mut random = ArenaRandom::new(3);
        let plan = plan_city_blocks(2, &[], &mut random);
        let mut layers = MapLayers::new(40, 40);
        let err = build_city(
            &plan,
            OriginalInt2::new(0, 0),
            &mut random,
            &PrefabLibrary::default(),
            &mut layers,
        )
        .unwrap_err();
        assert!(matches!(err, GenerationError::MissingCityBlock { .. }));
    }

    #[test]
    fn blocks_land_at_their_slot_offsets() {
        let mut library = PrefabLibrary::default();
        let codes = ["EQ", "MG", "NB", "TP", "TV", "TS", "BS"];
        for (marker, code) in codes.iter().enumerate() {
            for variation in 1..=20 {
                for rotation in BLOCK_ROTATIONS {
                    let name = format!("{code}BD{variation}{rotation}.MIF");
                    let mut level = MifLevel::empty(20, 20, true);
                    level.map1.fill(0x0101 * (marker as u16 + 1));
                    library.city_blocks.insert(
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

        let mut random = ArenaRandom::new(0x1234);
        let plan = plan_city_blocks(2, &[3], &mut random);
        let mut layers = MapLayers::new(50, 50);
        build_city(&plan, OriginalInt2::new(5, 5), &mut random, &library, &mut layers).unwrap();

        for row in 0..2 {
            for column in 0..2 {
                let block = plan.get(column, row).unwrap();
                let code = layers.map1.get(5 + column * 20, 5 + row * 20);
                match block {
                    BlockType::Reserved => assert_eq!(code, 0),
                    other => {
                        let marker = codes
                            .iter()
                            .position(|&code| Some(code) == other.code())
                            .unwrap() as u16;
                        assert_eq!(code, 0x0101 * (marker + 1));
                    }
                }
            }
        }
        assert_eq!(layers.map1.get(4, 4), 0);
    }
}
