use crate::constants::world::{DEFAULT_MAX_Y, DEFAULT_MIN_Y};
use crate::world::{BlockBox, BlockId, ChunkPos, VoxelPos, WorldInterface};
use rustc_hash::{FxHashMap, FxHashSet};

/// Sparse in-memory world
///
/// Cells of loaded chunks that were never written read as air. Cells of
/// chunks that are not loaded read as `None`.
pub struct World {
    loaded_chunks: FxHashSet<ChunkPos>,
    blocks: FxHashMap<u64, BlockId>,
    min_y: i32,
    max_y: i32,
}

impl Default for World {
    fn default() -> Self {
        Self::new(DEFAULT_MIN_Y, DEFAULT_MAX_Y)
    }
}

impl World {
    pub fn new(min_y: i32, max_y: i32) -> Self {
        Self {
            loaded_chunks: FxHashSet::default(),
            blocks: FxHashMap::default(),
            min_y: min_y.min(max_y),
            max_y: max_y.max(min_y),
        }
    }

    /// Mark a chunk as loaded. Returns false if it already was.
    pub fn load_chunk(&mut self, pos: ChunkPos) -> bool {
        self.loaded_chunks.insert(pos)
    }

    /// Forget a chunk and every block stored in it
    pub fn unload_chunk(&mut self, pos: ChunkPos) -> bool {
        if !self.loaded_chunks.remove(&pos) {
            return false;
        }
        self.blocks
            .retain(|&key, _| VoxelPos::from_key(key).to_chunk_pos() != pos);
        true
    }

    pub fn is_chunk_loaded(&self, pos: ChunkPos) -> bool {
        self.loaded_chunks.contains(&pos)
    }

    /// Loaded chunks in a stable order
    pub fn loaded_chunks(&self) -> Vec<ChunkPos> {
        let mut chunks: Vec<_> = self.loaded_chunks.iter().copied().collect();
        chunks.sort_unstable();
        chunks
    }

    /// Set a block, loading its chunk if needed. Returns the previous block.
    ///
    /// Positions outside the world's height range are ignored.
    pub fn set_block(&mut self, pos: VoxelPos, block: BlockId) -> Option<BlockId> {
        if pos.y < self.min_y || pos.y > self.max_y {
            log::debug!("Ignoring block write outside the world at {:?}", pos);
            return None;
        }

        self.loaded_chunks.insert(pos.to_chunk_pos());
        let previous = if block == BlockId::AIR {
            self.blocks.remove(&pos.as_key())
        } else {
            self.blocks.insert(pos.as_key(), block)
        };
        Some(previous.unwrap_or(BlockId::AIR))
    }

    /// Set every cell of `region` to `block`
    pub fn fill(&mut self, region: BlockBox, block: BlockId) {
        for pos in region.iter() {
            self.set_block(pos, block);
        }
    }

    /// Number of non-air cells stored
    pub fn block_count(&self) -> usize {
        self.blocks.len()
    }
}

impl WorldInterface for World {
    fn get_block(&self, pos: VoxelPos) -> Option<BlockId> {
        if pos.y < self.min_y || pos.y > self.max_y || !self.is_chunk_loaded(pos.to_chunk_pos()) {
            return None;
        }
        Some(self.blocks.get(&pos.as_key()).copied().unwrap_or(BlockId::AIR))
    }

    fn min_y(&self) -> i32 {
        self.min_y
    }

    fn max_y(&self) -> i32 {
        self.max_y
    }
}
