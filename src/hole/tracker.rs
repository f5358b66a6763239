use std::sync::Arc;
use std::time::Instant;

use super::{
    HoleClassifier, HoleIndex, HoleView, MaterialRegistry, ResistanceClass, ResistanceClassifier,
    ScanCache,
};
use crate::config::HoleTrackerConfig;
use crate::error::{HoleError, HoleResult};
use crate::region::RegionOfInterest;
use crate::scanner::BlockChangeSubscriber;
use crate::world::{BlockBox, BlockId, ChunkPos, VoxelPos, WorldInterface};

/// Keeps the hole index in step with a changing world
///
/// Owns the index for one world session. Every mutation goes through
/// `&mut self`, so there is exactly one writer; readers hold a [`HoleView`].
pub struct HoleTracker {
    config: HoleTrackerConfig,
    classifier: ResistanceClassifier,
    index: Arc<HoleIndex>,
    region_of_interest: Arc<dyn RegionOfInterest>,
}

impl HoleTracker {
    pub fn new(
        config: HoleTrackerConfig,
        classifier: ResistanceClassifier,
        region_of_interest: Arc<dyn RegionOfInterest>,
    ) -> Self {
        let index = Arc::new(HoleIndex::new(config.range_query_threshold));
        Self {
            config,
            classifier,
            index,
            region_of_interest,
        }
    }

    /// Build the resistance table from `registry` and start with an empty index
    pub fn from_registry(
        config: HoleTrackerConfig,
        registry: &dyn MaterialRegistry,
        region_of_interest: Arc<dyn RegionOfInterest>,
    ) -> Self {
        let classifier = ResistanceClassifier::from_registry(registry, &config);
        Self::new(config, classifier, region_of_interest)
    }

    pub fn config(&self) -> &HoleTrackerConfig {
        &self.config
    }

    pub fn classifier(&self) -> &ResistanceClassifier {
        &self.classifier
    }

    /// Read-only handle for other threads
    pub fn holes(&self) -> HoleView {
        HoleView::new(Arc::clone(&self.index))
    }

    /// Swap in a classifier for a changed registry
    ///
    /// Every known hole was classified with the old table, so the index is cleared.
    pub fn rebuild_classifier(&mut self, registry: &dyn MaterialRegistry) {
        self.classifier = ResistanceClassifier::from_registry(registry, &self.config);
        let dropped = self.index.clear_all();
        log::info!("Rebuilt resistance classifier, dropped {} holes", dropped);
    }

    /// Drop every hole in `region` and classify it again
    ///
    /// Returns how many holes were inserted. Oversized regions are rejected
    /// before the index is touched.
    pub fn rescan_region(
        &mut self,
        world: &dyn WorldInterface,
        region: &BlockBox,
    ) -> HoleResult<usize> {
        let volume = region.volume();
        if volume > self.config.max_rescan_volume {
            return Err(HoleError::RegionTooLarge {
                volume,
                limit: self.config.max_rescan_volume,
            });
        }

        let started = Instant::now();
        let removed = self.index.remove_all_intersecting(region);

        let cache = ScanCache::with_capacity(world, &self.classifier, volume as usize);
        let found = HoleClassifier::new(cache).scan(region, &[]);
        let inserted = self.index.insert_all(found);

        log::debug!(
            "Rescanned {:?}..{:?}: removed {}, inserted {} in {}us",
            region.min_corner(),
            region.max_corner(),
            removed,
            inserted,
            started.elapsed().as_micros()
        );
        Ok(inserted)
    }

    /// A single cell changed to `block`
    ///
    /// Holes the change may break are dropped first, then the surrounding
    /// area is rescanned. `cleared` marks cells replayed from a freshly
    /// loaded chunk; they are handled the same way.
    pub fn on_block_changed(
        &mut self,
        world: &dyn WorldInterface,
        pos: VoxelPos,
        block: BlockId,
        cleared: bool,
    ) {
        let invalidated = if self.classifier.classify(block) == ResistanceClass::Air {
            self.index.remove_where_neighbor_became_air(pos)
        } else {
            self.index.remove_where_footprint_contains(pos)
        };
        if invalidated > 0 {
            log::debug!(
                "{} at {:?} invalidated {} holes (cleared: {})",
                block,
                pos,
                invalidated,
                cleared
            );
        }

        let horizontal = self.config.rescan_margin_horizontal;
        let vertical = self.config.rescan_margin_vertical;
        let region = BlockBox::around(pos, horizontal, vertical, horizontal);
        self.rescan_or_warn(world, &region);
    }

    /// Rescan a freshly loaded chunk if anyone is interested in it
    pub fn on_chunk_loaded(&mut self, world: &dyn WorldInterface, chunk: ChunkPos) {
        let bounds = world.chunk_bounds(chunk);
        if !self.region_of_interest.intersects(&bounds) {
            log::trace!("Skipping chunk {:?} outside the region of interest", chunk);
            return;
        }
        self.rescan_or_warn(world, &bounds);
    }

    /// Forget every hole touching an unloaded chunk column
    pub fn on_chunk_cleared(&mut self, chunk: ChunkPos) {
        let removed = self.index.clear_region(&chunk.bounds(i32::MIN, i32::MAX));
        log::debug!("Cleared chunk {:?}: removed {} holes", chunk, removed);
    }

    pub fn on_world_unloaded(&mut self) {
        let removed = self.index.clear_all();
        log::info!("World unloaded, dropped {} holes", removed);
    }

    fn rescan_or_warn(&mut self, world: &dyn WorldInterface, region: &BlockBox) {
        if let Err(e) = self.rescan_region(world, region) {
            log::warn!("Skipping rescan: {}", e);
        }
    }
}

impl BlockChangeSubscriber for HoleTracker {
    fn debug_name(&self) -> &str {
        "HoleTracker"
    }

    fn record_block_on_chunk_update(&self) -> bool {
        self.config.record_block_on_chunk_update
    }

    fn record_block(&mut self, world: &dyn WorldInterface, pos: VoxelPos, block: BlockId, cleared: bool) {
        self.on_block_changed(world, pos, block, cleared);
    }

    fn chunk_update(&mut self, world: &dyn WorldInterface, chunk: ChunkPos) {
        self.on_chunk_loaded(world, chunk);
    }

    fn clear_chunk(&mut self, chunk: ChunkPos) {
        self.on_chunk_cleared(chunk);
    }

    fn clear_all_chunks(&mut self) {
        self.on_world_unloaded();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hole::{Hole, HoleType};
    use crate::region::{EverywhereRegion, MovableRegion, RegionMove};
    use crate::world::{register_basic_blocks, BlockRegistry, Direction, World};

    fn registry() -> BlockRegistry {
        let mut registry = BlockRegistry::new();
        register_basic_blocks(&mut registry);
        registry
    }

    fn tracker_with(config: HoleTrackerConfig, region: Arc<dyn RegionOfInterest>) -> HoleTracker {
        HoleTracker::from_registry(config, &registry(), region)
    }

    fn tracker() -> HoleTracker {
        tracker_with(HoleTrackerConfig::default(), Arc::new(EverywhereRegion))
    }

    /// A 1x1x3 shaft at `pos`: floor below, walls on all four sides
    fn shaft(world: &mut World, pos: VoxelPos, block: BlockId) {
        world.set_block(pos.offset(Direction::Down), block);
        for direction in Direction::HORIZONTAL {
            let side = pos.offset(direction);
            world.fill(BlockBox::from_corners(side, side.up(2)), block);
        }
    }

    fn around(pos: VoxelPos) -> BlockBox {
        BlockBox::around(pos, 2, 3, 2)
    }

    #[test]
    fn test_bedrock_shaft_is_indestructible_hole() {
        let mut world = World::default();
        let pos = VoxelPos::new(0, 64, 0);
        shaft(&mut world, pos, BlockId::BEDROCK);

        let mut tracker = tracker();
        assert_eq!(tracker.rescan_region(&world, &around(pos)).unwrap(), 1);
        assert_eq!(tracker.holes().snapshot(), vec![Hole::indestructible(pos)]);
    }

    #[test]
    fn test_wall_turned_to_air_removes_hole() {
        let mut world = World::default();
        let pos = VoxelPos::new(0, 64, 0);
        shaft(&mut world, pos, BlockId::OBSIDIAN);

        let mut tracker = tracker();
        tracker.rescan_region(&world, &around(pos)).unwrap();
        assert_eq!(tracker.holes().len(), 1);

        let wall = VoxelPos::new(1, 64, 0);
        world.set_block(wall, BlockId::AIR);
        tracker.on_block_changed(&world, wall, BlockId::AIR, false);
        assert!(tracker.holes().is_empty());
    }

    #[test]
    fn test_cleared_change_still_invalidates() {
        let config = HoleTrackerConfig {
            rescan_margin_horizontal: 0,
            rescan_margin_vertical: 0,
            ..HoleTrackerConfig::default()
        };
        let mut world = World::default();
        let pos = VoxelPos::new(0, 64, 0);
        shaft(&mut world, pos, BlockId::OBSIDIAN);

        let mut tracker = tracker_with(config.clone(), Arc::new(EverywhereRegion));
        tracker.rescan_region(&world, &around(pos)).unwrap();
        assert_eq!(tracker.holes().len(), 1);

        // The one-cell rescan cannot reach the hole, only invalidation can
        let wall = VoxelPos::new(-1, 64, 0);
        world.set_block(wall, BlockId::AIR);
        tracker.on_block_changed(&world, wall, BlockId::AIR, true);
        assert!(tracker.holes().is_empty());

        world.set_block(wall, BlockId::OBSIDIAN);
        let mut tracker = tracker_with(config, Arc::new(EverywhereRegion));
        tracker.rescan_region(&world, &around(pos)).unwrap();
        world.set_block(pos.up(2), BlockId::STONE);
        tracker.on_block_changed(&world, pos.up(2), BlockId::STONE, true);
        assert!(tracker.holes().is_empty());
    }

    #[test]
    fn test_change_at_coordinate_limit_does_not_panic() {
        let world = World::default();
        let mut tracker = tracker();
        let edge = VoxelPos::new(i32::MAX, 64, 0);

        tracker.on_block_changed(&world, edge, BlockId::AIR, false);
        tracker.on_block_changed(&world, edge, BlockId::OBSIDIAN, true);
        tracker.on_block_changed(&world, VoxelPos::new(i32::MIN, 64, i32::MIN), BlockId::AIR, false);
        assert!(tracker.holes().is_empty());
    }

    #[test]
    fn test_block_placed_in_headroom_removes_hole() {
        let mut world = World::default();
        let pos = VoxelPos::new(0, 64, 0);
        shaft(&mut world, pos, BlockId::OBSIDIAN);

        let mut tracker = tracker();
        tracker.rescan_region(&world, &around(pos)).unwrap();

        world.set_block(pos.up(1), BlockId::DIRT);
        tracker.on_block_changed(&world, pos.up(1), BlockId::DIRT, false);
        assert!(tracker.holes().is_empty());
    }

    #[test]
    fn test_wall_swap_reclassifies_hole() {
        let mut world = World::default();
        let pos = VoxelPos::new(0, 64, 0);
        shaft(&mut world, pos, BlockId::BEDROCK);

        let mut tracker = tracker();
        tracker.rescan_region(&world, &around(pos)).unwrap();
        assert!(tracker.holes().snapshot()[0].indestructible_only());

        let wall = VoxelPos::new(0, 64, 1);
        world.set_block(wall, BlockId::OBSIDIAN);
        tracker.on_block_changed(&world, wall, BlockId::OBSIDIAN, false);

        let holes = tracker.holes().snapshot();
        assert_eq!(holes, vec![Hole::new(HoleType::OneByOne, BlockBox::single(pos))]);
    }

    #[test]
    fn test_oversized_region_rejected() {
        let config = HoleTrackerConfig {
            max_rescan_volume: 100,
            ..HoleTrackerConfig::default()
        };
        let mut world = World::default();
        let pos = VoxelPos::new(0, 64, 0);
        shaft(&mut world, pos, BlockId::OBSIDIAN);

        let mut tracker = tracker_with(config, Arc::new(EverywhereRegion));
        let result = tracker.rescan_region(&world, &around(pos));
        assert!(matches!(
            result,
            Err(HoleError::RegionTooLarge { volume: 175, limit: 100 })
        ));

        // Event handlers skip instead of failing
        tracker.on_block_changed(&world, pos, BlockId::AIR, false);
        assert!(tracker.holes().is_empty());
    }

    #[test]
    fn test_chunk_load_respects_region_of_interest() {
        let mut world = World::default();
        let pos = VoxelPos::new(4, 64, 4);
        shaft(&mut world, pos, BlockId::OBSIDIAN);

        let region = Arc::new(MovableRegion::new());
        let mut tracker = tracker_with(HoleTrackerConfig::default(), region.clone());

        tracker.on_chunk_loaded(&world, ChunkPos::new(0, 0));
        assert!(tracker.holes().is_empty());

        assert!(matches!(
            region.move_to(VoxelPos::new(8, 64, 8), 8, 8),
            RegionMove::Moved { previous: None }
        ));
        tracker.on_chunk_loaded(&world, ChunkPos::new(0, 0));
        assert_eq!(tracker.holes().len(), 1);
    }

    #[test]
    fn test_chunk_clear_keeps_other_chunks() {
        let mut world = World::default();
        let near = VoxelPos::new(4, 64, 4);
        let far = VoxelPos::new(36, 64, 4);
        shaft(&mut world, near, BlockId::OBSIDIAN);
        shaft(&mut world, far, BlockId::OBSIDIAN);

        let mut tracker = tracker();
        tracker.on_chunk_loaded(&world, ChunkPos::new(0, 0));
        tracker.on_chunk_loaded(&world, ChunkPos::new(2, 0));
        assert_eq!(tracker.holes().len(), 2);

        tracker.on_chunk_cleared(ChunkPos::new(0, 0));
        let holes = tracker.holes();
        assert_eq!(holes.len(), 1);
        assert!(holes.hole_at(far).is_some());

        tracker.on_world_unloaded();
        assert!(holes.is_empty());
    }

    #[test]
    fn test_rebuild_classifier_clears_index() {
        let mut world = World::default();
        let pos = VoxelPos::new(0, 64, 0);
        shaft(&mut world, pos, BlockId::OBSIDIAN);

        let mut tracker = tracker();
        tracker.rescan_region(&world, &around(pos)).unwrap();
        assert_eq!(tracker.holes().len(), 1);

        tracker.rebuild_classifier(&registry());
        assert!(tracker.holes().is_empty());
        assert_eq!(tracker.classifier().classify(BlockId::OBSIDIAN), ResistanceClass::BlastResistant);
    }

    #[test]
    fn test_subscriber_flag_follows_config() {
        let tracker = tracker();
        assert_eq!(tracker.debug_name(), "HoleTracker");
        assert!(!tracker.record_block_on_chunk_update());
    }
}
