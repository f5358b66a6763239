use serde::{Deserialize, Serialize};
use std::fmt;

/// Unique identifier for a block type
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[repr(transparent)]
pub struct BlockId(pub u16);

impl Default for BlockId {
    fn default() -> Self {
        BlockId::AIR
    }
}

impl fmt::Display for BlockId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Display block name if it's a known block
        match *self {
            BlockId::AIR => write!(f, "Air"),
            BlockId::CAVE_AIR => write!(f, "Cave Air"),
            BlockId::STONE => write!(f, "Stone"),
            BlockId::DIRT => write!(f, "Dirt"),
            BlockId::COBBLESTONE => write!(f, "Cobblestone"),
            BlockId::OBSIDIAN => write!(f, "Obsidian"),
            BlockId::CRYING_OBSIDIAN => write!(f, "Crying Obsidian"),
            BlockId::ANVIL => write!(f, "Anvil"),
            BlockId::ENDER_CHEST => write!(f, "Ender Chest"),
            BlockId::BEDROCK => write!(f, "Bedrock"),
            BlockId::BARRIER => write!(f, "Barrier"),
            _ => write!(f, "Block({})", self.0),
        }
    }
}

impl BlockId {
    pub const AIR: BlockId = BlockId(0);
    pub const CAVE_AIR: BlockId = BlockId(1);
    pub const STONE: BlockId = BlockId(2);
    pub const DIRT: BlockId = BlockId(3);
    pub const COBBLESTONE: BlockId = BlockId(4);
    pub const OBSIDIAN: BlockId = BlockId(5);
    pub const CRYING_OBSIDIAN: BlockId = BlockId(6);
    pub const ANVIL: BlockId = BlockId(7);
    pub const ENDER_CHEST: BlockId = BlockId(8);
    pub const BEDROCK: BlockId = BlockId(9);
    pub const BARRIER: BlockId = BlockId(10);
}

/// Trait that all block types must implement
pub trait Block: Send + Sync {
    /// Get the unique ID for this block type
    fn get_id(&self) -> BlockId;

    /// Get display name for this block
    fn get_name(&self) -> &str;

    /// Resistance against explosions; larger survives bigger blasts
    fn explosion_resistance(&self) -> f32;

    /// Whether this block is an empty (air-like) block
    fn is_air(&self) -> bool {
        false
    }
}
