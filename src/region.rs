//! Regions of interest: which freshly loaded chunks are worth scanning

use parking_lot::RwLock;

use crate::world::{BlockBox, VoxelPos};

/// Decides whether a region matters to anyone consuming scan results
pub trait RegionOfInterest: Send + Sync {
    fn intersects(&self, region: &BlockBox) -> bool;
}

impl RegionOfInterest for BlockBox {
    fn intersects(&self, region: &BlockBox) -> bool {
        BlockBox::intersects(self, region)
    }
}

/// Interested in everything
#[derive(Debug, Clone, Copy, Default)]
pub struct EverywhereRegion;

impl RegionOfInterest for EverywhereRegion {
    fn intersects(&self, _region: &BlockBox) -> bool {
        true
    }
}

/// Outcome of [`MovableRegion::move_to`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegionMove {
    /// Already centred there with the same radii
    Unchanged,
    /// The region changed; `previous` is `None` on the first move
    Moved { previous: Option<BlockBox> },
}

/// A region that follows a moving point, e.g. the local player
///
/// Starts empty, which intersects nothing.
#[derive(Debug, Default)]
pub struct MovableRegion {
    current: RwLock<Option<BlockBox>>,
}

impl MovableRegion {
    pub fn new() -> Self {
        Self::default()
    }

    /// Recentre the region
    pub fn move_to(
        &self,
        center: VoxelPos,
        horizontal_radius: i32,
        vertical_radius: i32,
    ) -> RegionMove {
        let next = BlockBox::around(center, horizontal_radius, vertical_radius, horizontal_radius);
        let mut current = self.current.write();
        if *current == Some(next) {
            return RegionMove::Unchanged;
        }
        RegionMove::Moved {
            previous: current.replace(next),
        }
    }

    pub fn current(&self) -> Option<BlockBox> {
        *self.current.read()
    }

    pub fn clear(&self) {
        *self.current.write() = None;
    }
}

impl RegionOfInterest for MovableRegion {
    fn intersects(&self, region: &BlockBox) -> bool {
        self.current
            .read()
            .is_some_and(|current| current.intersects(region))
    }
}
