use rustc_hash::FxHashMap;

use super::{ResistanceClass, ResistanceClassifier};
use crate::world::{VoxelPos, WorldInterface};

/// Per-rescan memo of cell resistance classes
///
/// Borrows the world for its whole lifetime, so a cache cannot outlive the
/// pass that created it and is never reused after the world changes.
pub struct ScanCache<'a> {
    world: &'a dyn WorldInterface,
    classifier: &'a ResistanceClassifier,
    classes: FxHashMap<u64, ResistanceClass>,
}

impl<'a> ScanCache<'a> {
    pub fn new(world: &'a dyn WorldInterface, classifier: &'a ResistanceClassifier) -> Self {
        Self::with_capacity(world, classifier, 0)
    }

    pub fn with_capacity(
        world: &'a dyn WorldInterface,
        classifier: &'a ResistanceClassifier,
        capacity: usize,
    ) -> Self {
        Self {
            world,
            classifier,
            classes: FxHashMap::with_capacity_and_hasher(capacity, Default::default()),
        }
    }

    /// Class of the block at `pos`; unloaded cells count as air
    pub fn classify(&mut self, pos: VoxelPos) -> ResistanceClass {
        let (world, classifier) = (self.world, self.classifier);
        *self.classes.entry(pos.as_key()).or_insert_with(|| {
            world
                .get_block(pos)
                .map_or(ResistanceClass::Air, |block| classifier.classify(block))
        })
    }

    pub fn is_strong(&mut self, pos: VoxelPos) -> bool {
        self.classify(pos).is_strong()
    }

    /// Number of distinct cells looked up so far
    pub(crate) fn len(&self) -> usize {
        self.classes.len()
    }

    pub fn world(&self) -> &'a dyn WorldInterface {
        self.world
    }
}
