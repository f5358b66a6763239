use super::{Block, BlockId, BlockRegistry};
use crate::constants::resistance;

/// Declares a unit block type with a fixed ID, name and explosion resistance
macro_rules! basic_block {
    ($ty:ident, $id:expr, $name:literal, $resistance:expr) => {
        basic_block!($ty, $id, $name, $resistance, false);
    };
    ($ty:ident, $id:expr, $name:literal, $resistance:expr, $air:expr) => {
        #[derive(Debug, Clone)]
        pub struct $ty;

        impl Block for $ty {
            fn get_id(&self) -> BlockId {
                $id
            }

            fn get_name(&self) -> &str {
                $name
            }

            fn explosion_resistance(&self) -> f32 {
                $resistance
            }

            fn is_air(&self) -> bool {
                $air
            }
        }
    };
}

basic_block!(AirBlock, BlockId::AIR, "Air", 0.0, true);
basic_block!(CaveAirBlock, BlockId::CAVE_AIR, "Cave Air", 0.0, true);
basic_block!(StoneBlock, BlockId::STONE, "Stone", resistance::STONE);
basic_block!(DirtBlock, BlockId::DIRT, "Dirt", resistance::DIRT);
basic_block!(CobblestoneBlock, BlockId::COBBLESTONE, "Cobblestone", resistance::STONE);
basic_block!(ObsidianBlock, BlockId::OBSIDIAN, "Obsidian", resistance::OBSIDIAN);
basic_block!(CryingObsidianBlock, BlockId::CRYING_OBSIDIAN, "Crying Obsidian", resistance::OBSIDIAN);
basic_block!(AnvilBlock, BlockId::ANVIL, "Anvil", resistance::ANVIL);
basic_block!(EnderChestBlock, BlockId::ENDER_CHEST, "Ender Chest", resistance::ENDER_CHEST);
basic_block!(BedrockBlock, BlockId::BEDROCK, "Bedrock", resistance::UNBREAKABLE);
basic_block!(BarrierBlock, BlockId::BARRIER, "Barrier", resistance::UNBREAKABLE);

/// Register the built-in block set under its well-known IDs
pub fn register_basic_blocks(registry: &mut BlockRegistry) {
    fn add<B: Block + 'static>(registry: &mut BlockRegistry, name: &str, block: B) {
        let id = block.get_id();
        registry.register_as(id, name, block);
    }

    add(registry, "air", AirBlock);
    add(registry, "cave_air", CaveAirBlock);
    add(registry, "stone", StoneBlock);
    add(registry, "dirt", DirtBlock);
    add(registry, "cobblestone", CobblestoneBlock);
    add(registry, "obsidian", ObsidianBlock);
    add(registry, "crying_obsidian", CryingObsidianBlock);
    add(registry, "anvil", AnvilBlock);
    add(registry, "ender_chest", EnderChestBlock);
    add(registry, "bedrock", BedrockBlock);
    add(registry, "barrier", BarrierBlock);
}
