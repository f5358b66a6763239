use crate::constants::hole::{HEADROOM_CELLS, INVALIDATION_MARGIN};
use crate::world::{BlockBox, VoxelPos};

/// Floor shape of a hole
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum HoleType {
    OneByOne,
    OneByTwo,
    TwoByTwo,
}

impl HoleType {
    /// Number of floor cells
    pub fn cell_count(self) -> usize {
        match self {
            HoleType::OneByOne => 1,
            HoleType::OneByTwo => 2,
            HoleType::TwoByTwo => 4,
        }
    }
}

/// An enclosed floor area with three cells of open headroom
///
/// `footprint` covers the floor cells only. Holes order by footprint first,
/// which keeps spatially close holes adjacent in an ordered set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Hole {
    footprint: BlockBox,
    hole_type: HoleType,
    indestructible_only: bool,
}

impl Hole {
    pub fn new(hole_type: HoleType, footprint: BlockBox) -> Self {
        Self {
            footprint,
            hole_type,
            indestructible_only: false,
        }
    }

    /// A 1x1 hole whose floor and walls can all never be destroyed
    pub fn indestructible(pos: VoxelPos) -> Self {
        Self {
            footprint: BlockBox::single(pos),
            hole_type: HoleType::OneByOne,
            indestructible_only: true,
        }
    }

    /// Smallest possible hole whose footprint starts at `pos`; range bound for ordered lookups
    pub(crate) fn sentinel(pos: VoxelPos) -> Self {
        Self::new(HoleType::OneByOne, BlockBox::single(pos))
    }

    pub fn hole_type(&self) -> HoleType {
        self.hole_type
    }

    pub fn footprint(&self) -> BlockBox {
        self.footprint
    }

    pub fn indestructible_only(&self) -> bool {
        self.indestructible_only
    }

    /// Floor cells plus the empty cells validated above them
    pub fn headroom(&self) -> BlockBox {
        self.footprint
            .with_max_y(self.footprint.min_corner().y + HEADROOM_CELLS - 1)
    }

    /// Cells whose change to a non-air block may break this hole
    ///
    /// The headroom grown by one cell on every side: walls, floor and the
    /// cell above the headroom included.
    pub fn invalidation_volume(&self) -> BlockBox {
        self.headroom()
            .expand(INVALIDATION_MARGIN, INVALIDATION_MARGIN, INVALIDATION_MARGIN)
    }

    /// True if `pos` is one of the floor cells
    pub fn contains(&self, pos: VoxelPos) -> bool {
        self.footprint.contains(pos)
    }

    pub fn intersects(&self, region: &BlockBox) -> bool {
        self.footprint.intersects(region)
    }

    /// True if some floor cell is a direct neighbour of `pos`
    pub fn is_adjacent_to(&self, pos: VoxelPos) -> bool {
        self.footprint
            .iter()
            .any(|cell| cell.manhattan_distance(pos) == 1)
    }

    pub fn positions(&self) -> impl Iterator<Item = VoxelPos> {
        self.footprint.iter()
    }
}
