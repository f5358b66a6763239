use serde::{Deserialize, Serialize};

use crate::constants::world::CHUNK_WIDTH;

/// Position of a chunk column in the world (chunk coordinates)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ChunkPos {
    pub x: i32,
    pub z: i32,
}

impl ChunkPos {
    pub fn new(x: i32, z: i32) -> Self {
        Self { x, z }
    }

    /// Smallest block x covered by this column
    pub fn min_block_x(&self) -> i32 {
        self.x * CHUNK_WIDTH
    }

    /// Smallest block z covered by this column
    pub fn min_block_z(&self) -> i32 {
        self.z * CHUNK_WIDTH
    }

    /// Inclusive block bounds of the column between `min_y` and `max_y`
    pub fn bounds(&self, min_y: i32, max_y: i32) -> BlockBox {
        BlockBox::new(
            VoxelPos::new(self.min_block_x(), min_y, self.min_block_z()),
            VoxelPos::new(
                self.min_block_x() + CHUNK_WIDTH - 1,
                max_y,
                self.min_block_z() + CHUNK_WIDTH - 1,
            ),
        )
    }

    /// Pack into a single key, x in the low half
    pub fn as_key(&self) -> u64 {
        (self.x as u32 as u64) | ((self.z as u32 as u64) << 32)
    }
}

const PACKED_X_BITS: u32 = 26;
const PACKED_Z_BITS: u32 = 26;
const PACKED_Y_BITS: u32 = 12;
const PACKED_X_MASK: u64 = (1 << PACKED_X_BITS) - 1;
const PACKED_Z_MASK: u64 = (1 << PACKED_Z_BITS) - 1;
const PACKED_Y_MASK: u64 = (1 << PACKED_Y_BITS) - 1;
const PACKED_Z_SHIFT: u32 = PACKED_Y_BITS;
const PACKED_X_SHIFT: u32 = PACKED_Y_BITS + PACKED_Z_BITS;

/// Position of a voxel in the world (world coordinates)
///
/// Ordering is lexicographic on (x, y, z).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct VoxelPos {
    pub x: i32,
    pub y: i32,
    pub z: i32,
}

impl VoxelPos {
    pub fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }

    /// Neighbouring position one step in `direction`, clamped to the i32 range
    pub fn offset(&self, direction: Direction) -> Self {
        let (dx, dy, dz) = direction.offset();
        Self::new(
            self.x.saturating_add(dx),
            self.y.saturating_add(dy),
            self.z.saturating_add(dz),
        )
    }

    /// Position `n` cells up
    pub fn up(&self, n: i32) -> Self {
        Self::new(self.x, self.y.saturating_add(n), self.z)
    }

    pub fn manhattan_distance(&self, other: VoxelPos) -> u32 {
        self.x
            .abs_diff(other.x)
            .saturating_add(self.y.abs_diff(other.y))
            .saturating_add(self.z.abs_diff(other.z))
    }

    /// Get the chunk column this voxel belongs to
    pub fn to_chunk_pos(&self) -> ChunkPos {
        ChunkPos::new(self.x.div_euclid(CHUNK_WIDTH), self.z.div_euclid(CHUNK_WIDTH))
    }

    /// Pack into a 64-bit key: 26 bits of x, 26 bits of z, 12 bits of y.
    ///
    /// Lossless for |x|, |z| < 2^25 and -2048 <= y < 2048.
    pub fn as_key(&self) -> u64 {
        ((self.x as i64 as u64 & PACKED_X_MASK) << PACKED_X_SHIFT)
            | ((self.z as i64 as u64 & PACKED_Z_MASK) << PACKED_Z_SHIFT)
            | (self.y as i64 as u64 & PACKED_Y_MASK)
    }

    /// Inverse of [`VoxelPos::as_key`], sign-extending each field
    pub fn from_key(key: u64) -> Self {
        let key = key as i64;
        Self {
            x: (key >> PACKED_X_SHIFT) as i32,
            y: ((key << (64 - PACKED_Y_BITS)) >> (64 - PACKED_Y_BITS)) as i32,
            z: ((key << (64 - PACKED_X_SHIFT)) >> (64 - PACKED_Z_BITS)) as i32,
        }
    }
}

/// The six axis directions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Down,
    Up,
    North,
    South,
    West,
    East,
}

impl Direction {
    /// Horizontal directions in the order neighbours are examined
    pub const HORIZONTAL: [Direction; 4] = [
        Direction::South,
        Direction::West,
        Direction::North,
        Direction::East,
    ];

    /// Every direction except `Up`: the floor and the four walls of a cell
    pub const EXCLUDING_UP: [Direction; 5] = [
        Direction::Down,
        Direction::South,
        Direction::West,
        Direction::North,
        Direction::East,
    ];

    pub fn opposite(self) -> Direction {
        match self {
            Direction::Down => Direction::Up,
            Direction::Up => Direction::Down,
            Direction::North => Direction::South,
            Direction::South => Direction::North,
            Direction::West => Direction::East,
            Direction::East => Direction::West,
        }
    }

    /// Unit step as (dx, dy, dz); north is -z
    pub fn offset(self) -> (i32, i32, i32) {
        match self {
            Direction::Down => (0, -1, 0),
            Direction::Up => (0, 1, 0),
            Direction::North => (0, 0, -1),
            Direction::South => (0, 0, 1),
            Direction::West => (-1, 0, 0),
            Direction::East => (1, 0, 0),
        }
    }
}

/// Inclusive axis-aligned box of voxels
///
/// Ordered by its min corner, then its max corner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct BlockBox {
    min: VoxelPos,
    max: VoxelPos,
}

impl BlockBox {
    /// Box spanning `min..=max`. Corners are normalised.
    pub fn new(min: VoxelPos, max: VoxelPos) -> Self {
        Self::from_corners(min, max)
    }

    pub fn single(pos: VoxelPos) -> Self {
        Self { min: pos, max: pos }
    }

    /// Smallest box containing both corners
    pub fn from_corners(a: VoxelPos, b: VoxelPos) -> Self {
        Self {
            min: VoxelPos::new(a.x.min(b.x), a.y.min(b.y), a.z.min(b.z)),
            max: VoxelPos::new(a.x.max(b.x), a.y.max(b.y), a.z.max(b.z)),
        }
    }

    /// Box of `center` grown by the given margins on each side
    pub fn around(center: VoxelPos, dx: i32, dy: i32, dz: i32) -> Self {
        Self::single(center).expand(dx, dy, dz)
    }

    pub fn min_corner(&self) -> VoxelPos {
        self.min
    }

    pub fn max_corner(&self) -> VoxelPos {
        self.max
    }

    /// Grow by the given margins, clamping at the i32 range
    pub fn expand(&self, dx: i32, dy: i32, dz: i32) -> Self {
        Self::from_corners(
            VoxelPos::new(
                self.min.x.saturating_sub(dx),
                self.min.y.saturating_sub(dy),
                self.min.z.saturating_sub(dz),
            ),
            VoxelPos::new(
                self.max.x.saturating_add(dx),
                self.max.y.saturating_add(dy),
                self.max.z.saturating_add(dz),
            ),
        )
    }

    /// Copy with the top layer moved to `max_y`
    pub fn with_max_y(&self, max_y: i32) -> Self {
        Self::from_corners(self.min, VoxelPos::new(self.max.x, max_y, self.max.z))
    }

    pub fn contains(&self, pos: VoxelPos) -> bool {
        pos.x >= self.min.x
            && pos.x <= self.max.x
            && pos.y >= self.min.y
            && pos.y <= self.max.y
            && pos.z >= self.min.z
            && pos.z <= self.max.z
    }

    pub fn intersects(&self, other: &BlockBox) -> bool {
        self.min.x <= other.max.x
            && self.max.x >= other.min.x
            && self.min.y <= other.max.y
            && self.max.y >= other.min.y
            && self.min.z <= other.max.z
            && self.max.z >= other.min.z
    }

    pub fn length_x(&self) -> u64 {
        (self.max.x as i64 - self.min.x as i64 + 1) as u64
    }

    pub fn length_y(&self) -> u64 {
        (self.max.y as i64 - self.min.y as i64 + 1) as u64
    }

    pub fn length_z(&self) -> u64 {
        (self.max.z as i64 - self.min.z as i64 + 1) as u64
    }

    /// Number of cells in the box
    pub fn volume(&self) -> u64 {
        self.length_x()
            .saturating_mul(self.length_y())
            .saturating_mul(self.length_z())
    }

    /// Every cell in the box, x innermost, then y, then z
    pub fn iter(&self) -> impl Iterator<Item = VoxelPos> {
        let (min, max) = (self.min, self.max);
        (min.z..=max.z).flat_map(move |z| {
            (min.y..=max.y).flat_map(move |y| (min.x..=max.x).map(move |x| VoxelPos::new(x, y, z)))
        })
    }
}
