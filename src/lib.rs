pub mod config;
pub mod constants;
pub mod error;
pub mod hole;
pub mod region;
pub mod scanner;
pub mod world;

pub use config::HoleTrackerConfig;
pub use error::{HoleError, HoleResult};
pub use hole::{
    Hole, HoleClassifier, HoleIndex, HoleTracker, HoleType, HoleView, MaterialRegistry,
    ResistanceClass, ResistanceClassifier, ScanCache,
};
pub use region::{EverywhereRegion, MovableRegion, RegionMove, RegionOfInterest};
pub use scanner::{BlockChangeSubscriber, ChunkScanner, ScanRequest, ScanRequestSender, SharedSubscriber};
pub use world::{
    register_basic_blocks, Block, BlockBox, BlockId, BlockRegistry, ChunkPos, Direction, VoxelPos,
    World, WorldInterface,
};
