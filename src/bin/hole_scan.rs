/// Hole scan demo
/// Builds a seeded terrain with obsidian and bedrock pits, feeds it through a
/// chunk scanner into a hole tracker, then breaks and fills random cells.

use anyhow::{Context, Result};
use parking_lot::Mutex;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::sync::Arc;
use std::time::Instant;

use hole_tracker::{
    register_basic_blocks, BlockBox, BlockId, BlockRegistry, ChunkPos, ChunkScanner, Direction,
    EverywhereRegion, HoleTracker, HoleTrackerConfig, HoleType, HoleView, VoxelPos, World,
};

const SEED: u64 = 0x5eed;
const CHUNK_RADIUS: i32 = 2;
const PIT_COUNT: usize = 48;
const EDIT_COUNT: usize = 24;
const SURFACE_Y: i32 = 64;

fn main() -> Result<()> {
    env_logger::init();

    let config = match std::env::args().nth(1) {
        Some(path) => HoleTrackerConfig::load(&path)
            .with_context(|| format!("loading config from {}", path))?,
        None => HoleTrackerConfig::default(),
    };

    println!("=== Hole Scan ===\n");

    let mut rng = StdRng::seed_from_u64(SEED);
    let mut world = World::default();
    let chunks = generate_terrain(&mut world, &mut rng);
    println!("Generated {} chunks, {} blocks", chunks.len(), world.block_count());

    let mut registry = BlockRegistry::new();
    register_basic_blocks(&mut registry);

    let tracker = Arc::new(Mutex::new(HoleTracker::from_registry(
        config,
        &registry,
        Arc::new(EverywhereRegion),
    )));
    let holes = tracker.lock().holes();

    let mut scanner = ChunkScanner::new();
    scanner.subscribe(&world, tracker.clone())?;

    let sender = scanner.sender();
    let start = Instant::now();
    for &chunk in &chunks {
        sender.chunk_load(chunk);
    }
    let processed = scanner.process_pending(&world);
    println!(
        "Scanned {} chunks in {:.2}ms",
        processed,
        start.elapsed().as_secs_f64() * 1000.0
    );
    print_stats("After load", &holes);

    // Break walls and fill headroom of known holes
    let start = Instant::now();
    for _ in 0..EDIT_COUNT {
        let snapshot = holes.snapshot();
        if snapshot.is_empty() {
            break;
        }
        let hole = snapshot[rng.gen_range(0..snapshot.len())];
        let floor = hole.footprint().min_corner();

        let (pos, block) = if rng.gen_bool(0.5) {
            let side = Direction::HORIZONTAL[rng.gen_range(0..4)];
            (edge_of(&hole.footprint(), side), BlockId::AIR)
        } else {
            (floor.up(rng.gen_range(0..3)), BlockId::COBBLESTONE)
        };

        world.set_block(pos, block);
        sender.block_update(pos, block);
    }
    scanner.process_pending(&world);
    println!(
        "\nApplied {} edits in {:.2}ms",
        EDIT_COUNT,
        start.elapsed().as_secs_f64() * 1000.0
    );
    print_stats("After edits", &holes);

    sender.world_change();
    scanner.process_pending(&world);
    print_stats("\nAfter world change", &holes);

    Ok(())
}

/// Stone slab with randomly placed pits. Returns the generated chunks.
fn generate_terrain(world: &mut World, rng: &mut StdRng) -> Vec<ChunkPos> {
    let mut chunks = Vec::new();
    for x in -CHUNK_RADIUS..CHUNK_RADIUS {
        for z in -CHUNK_RADIUS..CHUNK_RADIUS {
            let chunk = ChunkPos::new(x, z);
            world.load_chunk(chunk);
            chunks.push(chunk);
        }
    }

    let extent = CHUNK_RADIUS * 16;
    world.fill(
        BlockBox::from_corners(
            VoxelPos::new(-extent, SURFACE_Y - 4, -extent),
            VoxelPos::new(extent - 1, SURFACE_Y - 1, extent - 1),
        ),
        BlockId::STONE,
    );

    for _ in 0..PIT_COUNT {
        let corner = VoxelPos::new(
            rng.gen_range(-extent + 1..extent - 3),
            SURFACE_Y,
            rng.gen_range(-extent + 1..extent - 3),
        );
        let (dx, dz) = match rng.gen_range(0..3) {
            0 => (0, 0),
            1 => (1, 0),
            _ => (1, 1),
        };
        let material = if rng.gen_bool(0.3) {
            BlockId::BEDROCK
        } else {
            BlockId::OBSIDIAN
        };

        let footprint = BlockBox::from_corners(corner, VoxelPos::new(corner.x + dx, SURFACE_Y, corner.z + dz));
        dig_pit(world, &footprint, material);
    }

    chunks
}

/// Line a pit with `material` and clear its headroom
fn dig_pit(world: &mut World, footprint: &BlockBox, material: BlockId) {
    let shell = footprint.expand(1, 0, 1);
    world.fill(
        BlockBox::from_corners(shell.min_corner().up(-1), shell.max_corner().up(2)),
        material,
    );
    world.fill(
        BlockBox::from_corners(footprint.min_corner(), footprint.max_corner().up(2)),
        BlockId::AIR,
    );
}

/// A wall cell just outside `footprint` on the given side
fn edge_of(footprint: &BlockBox, side: Direction) -> VoxelPos {
    let (min, max) = (footprint.min_corner(), footprint.max_corner());
    match side {
        Direction::North => VoxelPos::new(min.x, min.y, min.z - 1),
        Direction::South => VoxelPos::new(min.x, min.y, max.z + 1),
        Direction::West => VoxelPos::new(min.x - 1, min.y, min.z),
        _ => VoxelPos::new(max.x + 1, min.y, min.z),
    }
}

fn print_stats(label: &str, holes: &HoleView) {
    let mut counts = [0usize; 3];
    let mut indestructible = 0;
    holes.for_each(|hole| {
        let slot = match hole.hole_type() {
            HoleType::OneByOne => 0,
            HoleType::OneByTwo => 1,
            HoleType::TwoByTwo => 2,
        };
        counts[slot] += 1;
        if hole.indestructible_only() {
            indestructible += 1;
        }
    });

    println!("{}: {} holes", label, holes.len());
    println!("  1x1: {} ({} indestructible)", counts[0], indestructible);
    println!("  1x2: {}", counts[1]);
    println!("  2x2: {}", counts[2]);
}
