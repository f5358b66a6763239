use crossbeam_channel::Sender;

use crate::world::{BlockId, ChunkPos, VoxelPos};

/// A world change waiting to be applied
#[derive(Debug, Clone, PartialEq)]
pub enum ScanRequest {
    BlockUpdate { pos: VoxelPos, block: BlockId },
    /// Several cells of one chunk section changed together
    SectionUpdate(Vec<(VoxelPos, BlockId)>),
    ChunkLoad(ChunkPos),
    ChunkUnload(ChunkPos),
    WorldChange,
}

impl ScanRequest {
    pub fn name(&self) -> &'static str {
        match self {
            ScanRequest::BlockUpdate { .. } => "BlockUpdate",
            ScanRequest::SectionUpdate(_) => "SectionUpdate",
            ScanRequest::ChunkLoad(_) => "ChunkLoad",
            ScanRequest::ChunkUnload(_) => "ChunkUnload",
            ScanRequest::WorldChange => "WorldChange",
        }
    }
}

/// Cloneable handle for queueing requests from any thread
#[derive(Clone)]
pub struct ScanRequestSender {
    sender: Sender<ScanRequest>,
}

impl ScanRequestSender {
    pub(super) fn new(sender: Sender<ScanRequest>) -> Self {
        Self { sender }
    }

    /// Queue a request. Returns false once the scanner has been dropped.
    pub fn send(&self, request: ScanRequest) -> bool {
        self.sender.send(request).is_ok()
    }

    pub fn block_update(&self, pos: VoxelPos, block: BlockId) -> bool {
        self.send(ScanRequest::BlockUpdate { pos, block })
    }

    pub fn chunk_load(&self, chunk: ChunkPos) -> bool {
        self.send(ScanRequest::ChunkLoad(chunk))
    }

    pub fn chunk_unload(&self, chunk: ChunkPos) -> bool {
        self.send(ScanRequest::ChunkUnload(chunk))
    }

    pub fn world_change(&self) -> bool {
        self.send(ScanRequest::WorldChange)
    }
}
