use crate::world::{BlockId, ChunkPos, VoxelPos, WorldInterface};

/// Receives world changes from a [`ChunkScanner`](super::ChunkScanner)
///
/// All methods run on the scanner's writer thread.
pub trait BlockChangeSubscriber: Send {
    /// Name used in logs and for duplicate detection
    fn debug_name(&self) -> &str;

    /// If true, [`record_block`](Self::record_block) is also called for every
    /// cell of a freshly loaded chunk. Subscribers that rescan whole chunks in
    /// [`chunk_update`](Self::chunk_update) can opt out.
    fn record_block_on_chunk_update(&self) -> bool {
        true
    }

    /// A single cell now holds `block`
    ///
    /// `cleared` is set when the cell belongs to a chunk that was just
    /// (re)loaded, so no existing record about it needs invalidating.
    fn record_block(&mut self, world: &dyn WorldInterface, pos: VoxelPos, block: BlockId, cleared: bool);

    /// A chunk was loaded or replaced wholesale
    fn chunk_update(&mut self, world: &dyn WorldInterface, chunk: ChunkPos);

    /// A chunk was unloaded
    fn clear_chunk(&mut self, chunk: ChunkPos);

    /// The world was unloaded or switched
    fn clear_all_chunks(&mut self);
}
