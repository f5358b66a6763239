use super::{Block, BlockId};
use crate::hole::MaterialRegistry;
use rustc_hash::FxHashMap;
use std::sync::Arc;

/// Registry that stores all block types
pub struct BlockRegistry {
    blocks: FxHashMap<BlockId, Arc<dyn Block>>,
    name_to_id: FxHashMap<String, BlockId>,
    next_id: u16,
}

impl Default for BlockRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl BlockRegistry {
    pub fn new() -> Self {
        Self {
            blocks: FxHashMap::default(),
            name_to_id: FxHashMap::default(),
            next_id: 1, // 0 is reserved for AIR
        }
    }

    /// Register a new block type under the next free ID
    pub fn register<B: Block + 'static>(&mut self, name: &str, block: B) -> BlockId {
        while self.blocks.contains_key(&BlockId(self.next_id)) {
            self.next_id += 1;
        }
        let id = BlockId(self.next_id);
        self.next_id += 1;

        self.insert(name, id, Arc::new(block));
        id
    }

    /// Register a block type under a fixed ID, replacing any previous entry
    pub fn register_as<B: Block + 'static>(&mut self, id: BlockId, name: &str, block: B) -> BlockId {
        self.insert(name, id, Arc::new(block));
        id
    }

    fn insert(&mut self, name: &str, id: BlockId, block: Arc<dyn Block>) {
        log::debug!(
            "Registered block '{}' with ID {} (resistance {})",
            name,
            id.0,
            block.explosion_resistance()
        );
        self.blocks.insert(id, block);
        self.name_to_id.insert(name.to_string(), id);
    }

    /// Get a block by ID
    pub fn get_block(&self, id: BlockId) -> Option<Arc<dyn Block>> {
        self.blocks.get(&id).cloned()
    }

    /// Get a block ID by name
    pub fn get_id(&self, name: &str) -> Option<BlockId> {
        self.name_to_id.get(name).copied()
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }
}

impl MaterialRegistry for BlockRegistry {
    fn block_ids(&self) -> Vec<BlockId> {
        let mut ids: Vec<_> = self.blocks.keys().copied().collect();
        ids.sort_unstable();
        ids
    }

    fn explosion_resistance(&self, id: BlockId) -> f32 {
        self.blocks
            .get(&id)
            .map_or(0.0, |block| block.explosion_resistance())
    }

    fn is_air(&self, id: BlockId) -> bool {
        id == BlockId::AIR || self.blocks.get(&id).is_some_and(|block| block.is_air())
    }
}
