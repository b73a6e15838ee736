//! Block identifiers

use serde::{Deserialize, Serialize};
use std::fmt;

/// A block type plus its data value (colour, orientation, growth stage...)
///
/// Vanilla block ids are available as associated constants, all with data `0`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Block {
    pub id: i32,
    pub data: i32,
}

impl Block {
    pub const AIR: Block = Block::new(0);
    pub const STONE: Block = Block::new(1);
    pub const GRASS: Block = Block::new(2);
    pub const DIRT: Block = Block::new(3);
    pub const COBBLESTONE: Block = Block::new(4);
    pub const WOOD_PLANKS: Block = Block::new(5);
    pub const SAPLING: Block = Block::new(6);
    pub const BEDROCK: Block = Block::new(7);
    pub const WATER_FLOWING: Block = Block::new(8);
    pub const WATER: Block = Block::WATER_FLOWING;
    pub const WATER_STATIONARY: Block = Block::new(9);
    pub const LAVA_FLOWING: Block = Block::new(10);
    pub const LAVA: Block = Block::LAVA_FLOWING;
    pub const LAVA_STATIONARY: Block = Block::new(11);
    pub const SAND: Block = Block::new(12);
    pub const GRAVEL: Block = Block::new(13);
    pub const GOLD_ORE: Block = Block::new(14);
    pub const IRON_ORE: Block = Block::new(15);
    pub const COAL_ORE: Block = Block::new(16);
    pub const WOOD: Block = Block::new(17);
    pub const LEAVES: Block = Block::new(18);
    pub const GLASS: Block = Block::new(20);
    pub const LAPIS_LAZULI_ORE: Block = Block::new(21);
    pub const LAPIS_LAZULI_BLOCK: Block = Block::new(22);
    pub const SANDSTONE: Block = Block::new(24);
    pub const BED: Block = Block::new(26);
    pub const COBWEB: Block = Block::new(30);
    pub const GRASS_TALL: Block = Block::new(31);
    pub const WOOL: Block = Block::new(35);
    pub const FLOWER_YELLOW: Block = Block::new(37);
    pub const FLOWER_CYAN: Block = Block::new(38);
    pub const MUSHROOM_BROWN: Block = Block::new(39);
    pub const MUSHROOM_RED: Block = Block::new(40);
    pub const GOLD_BLOCK: Block = Block::new(41);
    pub const IRON_BLOCK: Block = Block::new(42);
    pub const STONE_SLAB_DOUBLE: Block = Block::new(43);
    pub const STONE_SLAB: Block = Block::new(44);
    pub const BRICK_BLOCK: Block = Block::new(45);
    pub const TNT: Block = Block::new(46);
    pub const BOOKSHELF: Block = Block::new(47);
    pub const MOSS_STONE: Block = Block::new(48);
    pub const OBSIDIAN: Block = Block::new(49);
    pub const TORCH: Block = Block::new(50);
    pub const FIRE: Block = Block::new(51);
    pub const STAIRS_WOOD: Block = Block::new(53);
    pub const CHEST: Block = Block::new(54);
    pub const DIAMOND_ORE: Block = Block::new(56);
    pub const DIAMOND_BLOCK: Block = Block::new(57);
    pub const CRAFTING_TABLE: Block = Block::new(58);
    pub const FARMLAND: Block = Block::new(60);
    pub const FURNACE_INACTIVE: Block = Block::new(61);
    pub const FURNACE_ACTIVE: Block = Block::new(62);
    pub const DOOR_WOOD: Block = Block::new(64);
    pub const LADDER: Block = Block::new(65);
    pub const STAIRS_COBBLESTONE: Block = Block::new(67);
    pub const DOOR_IRON: Block = Block::new(71);
    pub const REDSTONE_ORE: Block = Block::new(73);
    pub const SNOW: Block = Block::new(78);
    pub const ICE: Block = Block::new(79);
    pub const SNOW_BLOCK: Block = Block::new(80);
    pub const CACTUS: Block = Block::new(81);
    pub const CLAY: Block = Block::new(82);
    pub const SUGAR_CANE: Block = Block::new(83);
    pub const FENCE: Block = Block::new(85);
    pub const GLOWSTONE_BLOCK: Block = Block::new(89);
    pub const BEDROCK_INVISIBLE: Block = Block::new(95);
    pub const STONE_BRICK: Block = Block::new(98);
    pub const GLASS_PANE: Block = Block::new(102);
    pub const MELON: Block = Block::new(103);
    pub const FENCE_GATE: Block = Block::new(107);
    pub const GLOWING_OBSIDIAN: Block = Block::new(246);
    pub const NETHER_REACTOR_CORE: Block = Block::new(247);

    pub const fn new(id: i32) -> Self {
        Self { id, data: 0 }
    }

    pub const fn with_data(id: i32, data: i32) -> Self {
        Self { id, data }
    }

    /// Same block id with a different data value
    pub const fn data(self, data: i32) -> Self {
        Self { id: self.id, data }
    }
}

impl From<i32> for Block {
    fn from(id: i32) -> Self {
        Block::new(id)
    }
}

impl From<(i32, i32)> for Block {
    fn from((id, data): (i32, i32)) -> Self {
        Block::with_data(id, data)
    }
}

impl fmt::Display for Block {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.id, self.data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_data_variant_keeps_id() {
        let red_wool = Block::WOOL.data(14);
        assert_eq!(red_wool.id, 35);
        assert_eq!(red_wool.data, 14);
        assert_eq!(Block::WOOL.data, 0);
    }

    #[test]
    fn test_conversions() {
        assert_eq!(Block::from(3), Block::DIRT);
        assert_eq!(Block::from((35, 1)), Block::with_data(35, 1));
        assert_eq!(Block::with_data(35, 1).to_string(), "35,1");
    }
}
