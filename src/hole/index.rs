use parking_lot::RwLock;
use std::collections::BTreeSet;
use std::sync::Arc;

use super::Hole;
use crate::constants::hole::{HEADROOM_CELLS, INVALIDATION_MARGIN, RANGE_QUERY_SLACK};
use crate::world::{BlockBox, VoxelPos};

/// Ordered, internally synchronised set of discovered holes
///
/// One writer mutates while any number of readers query. Every operation
/// takes the lock once, so readers see either the state before or after a
/// whole operation, never part of one.
pub struct HoleIndex {
    holes: RwLock<BTreeSet<Hole>>,
    /// From this many holes on, lookups walk an ordered sub-range instead of the whole set
    range_query_threshold: usize,
}

impl HoleIndex {
    pub fn new(range_query_threshold: usize) -> Self {
        Self {
            holes: RwLock::new(BTreeSet::new()),
            range_query_threshold,
        }
    }

    /// Holes that may intersect `region`, a superset of the exact answer
    fn candidates<'s>(
        &self,
        holes: &'s BTreeSet<Hole>,
        region: &BlockBox,
    ) -> Box<dyn Iterator<Item = &'s Hole> + 's> {
        if holes.len() < self.range_query_threshold {
            return Box::new(holes.iter());
        }

        // Footprints are at most two cells wide, so any hole touching the
        // region has its min corner within the slack of the region's corners.
        let (min, max) = (region.min_corner(), region.max_corner());
        let lower = Hole::sentinel(VoxelPos::new(
            min.x.saturating_sub(RANGE_QUERY_SLACK),
            min.y.saturating_sub(RANGE_QUERY_SLACK),
            min.z.saturating_sub(RANGE_QUERY_SLACK),
        ));
        let upper = Hole::sentinel(VoxelPos::new(
            max.x.saturating_add(RANGE_QUERY_SLACK),
            max.y.saturating_add(RANGE_QUERY_SLACK),
            max.z.saturating_add(RANGE_QUERY_SLACK),
        ));
        Box::new(holes.range(lower..=upper))
    }

    /// Remove every hole near `region` that matches `predicate`
    fn remove_matching(&self, region: &BlockBox, predicate: impl Fn(&Hole) -> bool) -> usize {
        let mut holes = self.holes.write();
        let doomed: Vec<Hole> = self
            .candidates(&holes, region)
            .filter(|hole| predicate(hole))
            .copied()
            .collect();

        for hole in &doomed {
            holes.remove(hole);
        }
        doomed.len()
    }

    /// Add a hole, evicting any existing hole whose footprint overlaps it
    ///
    /// Returns false if the identical hole was already present.
    pub fn insert(&self, hole: Hole) -> bool {
        self.insert_all([hole]) == 1
    }

    /// Add holes in one write, evicting overlapped entries. Returns how many were new.
    pub fn insert_all(&self, new_holes: impl IntoIterator<Item = Hole>) -> usize {
        let mut holes = self.holes.write();
        let mut inserted = 0;

        for hole in new_holes {
            let footprint = hole.footprint();
            let stale: Vec<Hole> = self
                .candidates(&holes, &footprint)
                .filter(|other| **other != hole && other.intersects(&footprint))
                .copied()
                .collect();

            for other in stale {
                log::debug!("Evicting {:?}, overlapped by {:?}", other, hole);
                holes.remove(&other);
            }

            if holes.insert(hole) {
                inserted += 1;
            }
        }
        inserted
    }

    /// Drop holes with a floor cell directly next to `pos`
    pub fn remove_where_neighbor_became_air(&self, pos: VoxelPos) -> usize {
        self.remove_matching(&BlockBox::around(pos, 1, 1, 1), |hole| hole.is_adjacent_to(pos))
    }

    /// Drop holes whose invalidation volume contains `pos`
    pub fn remove_where_footprint_contains(&self, pos: VoxelPos) -> usize {
        // Footprints whose invalidation volume can reach `pos`
        let reach = BlockBox::from_corners(
            pos.up(-(HEADROOM_CELLS - 1)),
            pos,
        )
        .expand(INVALIDATION_MARGIN, INVALIDATION_MARGIN, INVALIDATION_MARGIN);
        self.remove_matching(&reach, |hole| hole.invalidation_volume().contains(pos))
    }

    /// Drop holes whose footprint intersects `region`
    pub fn remove_all_intersecting(&self, region: &BlockBox) -> usize {
        self.remove_matching(region, |hole| hole.intersects(region))
    }

    /// Drop holes touching a chunk column
    pub fn clear_region(&self, chunk_bounds: &BlockBox) -> usize {
        self.remove_all_intersecting(chunk_bounds)
    }

    pub fn clear_all(&self) -> usize {
        let mut holes = self.holes.write();
        let count = holes.len();
        holes.clear();
        count
    }

    /// Holes whose footprint intersects `region`, in index order
    pub fn query_in_range(&self, region: &BlockBox) -> Vec<Hole> {
        let holes = self.holes.read();
        self.candidates(&holes, region)
            .filter(|hole| hole.intersects(region))
            .copied()
            .collect()
    }

    pub fn contains_hole_in(&self, region: &BlockBox) -> bool {
        let holes = self.holes.read();
        let found = self
            .candidates(&holes, region)
            .any(|hole| hole.intersects(region));
        found
    }

    /// The hole with `pos` among its floor cells
    pub fn hole_at(&self, pos: VoxelPos) -> Option<Hole> {
        let holes = self.holes.read();
        let hole = self
            .candidates(&holes, &BlockBox::single(pos))
            .find(|hole| hole.contains(pos))
            .copied();
        hole
    }

    pub fn len(&self) -> usize {
        self.holes.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.holes.read().is_empty()
    }

    /// Copy of every hole, in index order
    pub fn snapshot(&self) -> Vec<Hole> {
        self.holes.read().iter().copied().collect()
    }

    /// Visit a copy of every hole in order
    ///
    /// The lock is released before `f` runs, so `f` may query the index again.
    pub fn for_each(&self, mut f: impl FnMut(&Hole)) {
        for hole in &self.snapshot() {
            f(hole);
        }
    }
}

/// Read-only handle to a [`HoleIndex`], cheap to clone and send to other threads
#[derive(Clone)]
pub struct HoleView {
    index: Arc<HoleIndex>,
}

impl HoleView {
    pub(crate) fn new(index: Arc<HoleIndex>) -> Self {
        Self { index }
    }

    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    pub fn snapshot(&self) -> Vec<Hole> {
        self.index.snapshot()
    }

    pub fn query_in_range(&self, region: &BlockBox) -> Vec<Hole> {
        self.index.query_in_range(region)
    }

    pub fn contains_hole_in(&self, region: &BlockBox) -> bool {
        self.index.contains_hole_in(region)
    }

    pub fn hole_at(&self, pos: VoxelPos) -> Option<Hole> {
        self.index.hole_at(pos)
    }

    pub fn for_each(&self, f: impl FnMut(&Hole)) {
        self.index.for_each(f)
    }
}
