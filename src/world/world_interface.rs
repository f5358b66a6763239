use crate::world::{BlockBox, BlockId, ChunkPos, VoxelPos};

/// Read access to the voxel world used by the hole tracker and the chunk scanner
pub trait WorldInterface: Send + Sync {
    /// Get the block at the given position, or `None` if its chunk is not loaded
    fn get_block(&self, pos: VoxelPos) -> Option<BlockId>;

    /// Lowest block y of the world (inclusive)
    fn min_y(&self) -> i32;

    /// Highest block y of the world (inclusive)
    fn max_y(&self) -> i32;

    /// Full column bounds of a chunk
    fn chunk_bounds(&self, chunk: ChunkPos) -> BlockBox {
        chunk.bounds(self.min_y(), self.max_y())
    }
}
