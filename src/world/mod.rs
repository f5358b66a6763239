//! Voxel world model: positions, block types and the world access trait

mod basic_blocks;
mod block;
mod position;
mod registry;
#[allow(clippy::module_inception)]
mod world;
mod world_interface;

pub use basic_blocks::{
    register_basic_blocks, AirBlock, AnvilBlock, BarrierBlock, BedrockBlock, CaveAirBlock,
    CobblestoneBlock, CryingObsidianBlock, DirtBlock, EnderChestBlock, ObsidianBlock, StoneBlock,
};
pub use block::{Block, BlockId};
pub use position::{BlockBox, ChunkPos, Direction, VoxelPos};
pub use registry::BlockRegistry;
pub use world::World;
pub use world_interface::WorldInterface;
