//! Chunk scanner: fans world change events out to subscribers
//!
//! Requests can be queued from any thread through a [`ScanRequestSender`];
//! they are applied in arrival order by [`ChunkScanner::process_pending`] on
//! the single thread that owns the scanner.

mod request;
mod subscriber;

pub use request::{ScanRequest, ScanRequestSender};
pub use subscriber::BlockChangeSubscriber;

use crossbeam_channel::{unbounded, Receiver, Sender};
use parking_lot::Mutex;
use rustc_hash::FxHashSet;
use std::sync::Arc;
use std::time::Instant;

use crate::error::{HoleError, HoleResult};
use crate::world::{BlockId, ChunkPos, VoxelPos, WorldInterface};

/// A subscriber shared between the scanner and its owner
pub type SharedSubscriber = Arc<Mutex<dyn BlockChangeSubscriber>>;

/// Tracks loaded chunks and forwards block changes to subscribers
pub struct ChunkScanner {
    subscribers: Vec<SharedSubscriber>,
    loaded_chunks: FxHashSet<ChunkPos>,
    sender: Sender<ScanRequest>,
    receiver: Receiver<ScanRequest>,
}

impl Default for ChunkScanner {
    fn default() -> Self {
        Self::new()
    }
}

impl ChunkScanner {
    pub fn new() -> Self {
        let (sender, receiver) = unbounded();
        Self {
            subscribers: Vec::new(),
            loaded_chunks: FxHashSet::default(),
            sender,
            receiver,
        }
    }

    /// Handle for queueing requests from other threads
    pub fn sender(&self) -> ScanRequestSender {
        ScanRequestSender::new(self.sender.clone())
    }

    /// Register a subscriber and bring it up to date with the loaded chunks
    pub fn subscribe(
        &mut self,
        world: &dyn WorldInterface,
        subscriber: SharedSubscriber,
    ) -> HoleResult<()> {
        let name = subscriber.lock().debug_name().to_string();
        if self
            .subscribers
            .iter()
            .any(|existing| existing.lock().debug_name() == name)
        {
            return Err(HoleError::DuplicateSubscriber { name });
        }

        self.subscribers.push(Arc::clone(&subscriber));

        if self.loaded_chunks.is_empty() {
            return Ok(());
        }

        let started = Instant::now();
        let chunks = self.loaded_chunks();
        let mut subscriber = subscriber.lock();
        for &chunk in &chunks {
            subscriber.chunk_update(world, chunk);
        }
        if subscriber.record_block_on_chunk_update() {
            for &chunk in &chunks {
                for_each_cell(world, chunk, |pos, block| {
                    subscriber.record_block(world, pos, block, true)
                });
            }
        }

        log::debug!(
            "Scanning {} chunks for {} took {}us",
            chunks.len(),
            name,
            started.elapsed().as_micros()
        );
        Ok(())
    }

    /// Remove a subscriber by name and let it drop everything it tracked
    pub fn unsubscribe(&mut self, name: &str) -> Option<SharedSubscriber> {
        let index = self
            .subscribers
            .iter()
            .position(|subscriber| subscriber.lock().debug_name() == name)?;
        let subscriber = self.subscribers.remove(index);
        subscriber.lock().clear_all_chunks();
        Some(subscriber)
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }

    pub fn is_chunk_loaded(&self, chunk: ChunkPos) -> bool {
        self.loaded_chunks.contains(&chunk)
    }

    /// Loaded chunks in a stable order
    pub fn loaded_chunks(&self) -> Vec<ChunkPos> {
        let mut chunks: Vec<_> = self.loaded_chunks.iter().copied().collect();
        chunks.sort_unstable();
        chunks
    }

    /// Number of requests waiting in the queue
    pub fn pending(&self) -> usize {
        self.receiver.len()
    }

    /// Apply every queued request. Returns how many were applied.
    pub fn process_pending(&mut self, world: &dyn WorldInterface) -> usize {
        let mut processed = 0;
        while let Ok(request) = self.receiver.try_recv() {
            self.apply(world, request);
            processed += 1;
        }
        processed
    }

    /// Apply one request immediately
    pub fn apply(&mut self, world: &dyn WorldInterface, request: ScanRequest) {
        let started = Instant::now();
        let name = request.name();

        match request {
            ScanRequest::BlockUpdate { pos, block } => {
                for subscriber in &self.subscribers {
                    subscriber.lock().record_block(world, pos, block, false);
                }
            }
            ScanRequest::SectionUpdate(changes) => {
                for subscriber in &self.subscribers {
                    let mut subscriber = subscriber.lock();
                    for &(pos, block) in &changes {
                        subscriber.record_block(world, pos, block, false);
                    }
                }
            }
            ScanRequest::ChunkLoad(chunk) => self.load_chunk(world, chunk),
            ScanRequest::ChunkUnload(chunk) => {
                self.loaded_chunks.remove(&chunk);
                for subscriber in &self.subscribers {
                    subscriber.lock().clear_chunk(chunk);
                }
            }
            ScanRequest::WorldChange => {
                self.loaded_chunks.clear();
                for subscriber in &self.subscribers {
                    subscriber.lock().clear_all_chunks();
                }
            }
        }

        log::debug!("{} took {}us", name, started.elapsed().as_micros());
    }

    fn load_chunk(&mut self, world: &dyn WorldInterface, chunk: ChunkPos) {
        self.loaded_chunks.insert(chunk);

        for subscriber in &self.subscribers {
            subscriber.lock().chunk_update(world, chunk);
        }

        // Subscribers that want every cell of the new chunk
        let per_cell: Vec<&SharedSubscriber> = self
            .subscribers
            .iter()
            .filter(|subscriber| subscriber.lock().record_block_on_chunk_update())
            .collect();
        if per_cell.is_empty() {
            return;
        }

        for_each_cell(world, chunk, |pos, block| {
            for subscriber in &per_cell {
                subscriber.lock().record_block(world, pos, block, true);
            }
        });
    }
}

/// Visit every loaded cell of a chunk column
fn for_each_cell(
    world: &dyn WorldInterface,
    chunk: ChunkPos,
    mut f: impl FnMut(VoxelPos, BlockId),
) {
    for pos in world.chunk_bounds(chunk).iter() {
        if let Some(block) = world.get_block(pos) {
            f(pos, block);
        }
    }
}
