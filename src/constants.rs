// Hole tracker constants - SINGLE SOURCE OF TRUTH
//
// Defaults for HoleTrackerConfig and the fixed geometry of hole detection
// live here. Do NOT redefine them elsewhere.

/// World shape constants
pub mod world {
    /// Width of a chunk column in blocks (x and z)
    pub const CHUNK_WIDTH: i32 = 16;

    /// Default vertical extent of a world (inclusive block y)
    pub const DEFAULT_MIN_Y: i32 = -64;
    pub const DEFAULT_MAX_Y: i32 = 319;
}

/// Explosion resistance values of the built-in blocks
pub mod resistance {
    pub const DIRT: f32 = 0.5;
    pub const STONE: f32 = 6.0;
    pub const ENDER_CHEST: f32 = 600.0;
    pub const ANVIL: f32 = 1200.0;
    pub const OBSIDIAN: f32 = 1200.0;
    pub const UNBREAKABLE: f32 = 3_600_000.0;
}

/// Hole detection constants
pub mod hole {
    /// Empty cells required above a hole's floor cell (the floor cell included)
    pub const HEADROOM_CELLS: i32 = 3;

    /// Candidates this close to the top of the world are never classified
    pub const TOP_CLEARANCE: i32 = HEADROOM_CELLS - 1;

    /// Margin added around a hole's cells to form its invalidation volume
    pub const INVALIDATION_MARGIN: i32 = 1;

    /// Slack around a queried region when narrowing the ordered index
    pub const RANGE_QUERY_SLACK: i32 = 2;

    pub const DEFAULT_BLAST_RESISTANCE_THRESHOLD: f32 = 600.0;
    pub const DEFAULT_INDESTRUCTIBLE_THRESHOLD: f32 = 3_600_000.0;
    pub const DEFAULT_RESCAN_MARGIN_HORIZONTAL: i32 = 2;
    pub const DEFAULT_RESCAN_MARGIN_VERTICAL: i32 = 3;
    pub const DEFAULT_RANGE_QUERY_THRESHOLD: usize = 32;

    /// One full 16x16x384 chunk column fits with room to spare
    pub const DEFAULT_MAX_RESCAN_VOLUME: u64 = 131_072;
}
