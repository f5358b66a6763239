use super::{Hole, HoleType, ResistanceClass, ScanCache};
use crate::constants::hole::{HEADROOM_CELLS, TOP_CLEARANCE};
use crate::world::{BlockBox, Direction, VoxelPos};

/// Decides which candidate floor cells anchor a hole
///
/// Owns the [`ScanCache`] of one rescan pass; dropping the classifier
/// drops the cache with it.
pub struct HoleClassifier<'a> {
    cache: ScanCache<'a>,
    /// Candidates at or above this y lack room for their headroom
    top_y: i32,
}

impl<'a> HoleClassifier<'a> {
    pub fn new(cache: ScanCache<'a>) -> Self {
        let top_y = cache.world().max_y() - TOP_CLEARANCE;
        Self { cache, top_y }
    }

    /// Classify every cell of `region`
    ///
    /// Cells covered by a hole in `known`, or by one found earlier in this
    /// pass, are skipped. Returned holes never overlap each other.
    pub fn scan(&mut self, region: &BlockBox, known: &[Hole]) -> Vec<Hole> {
        let mut found: Vec<Hole> = Vec::new();

        for pos in region.iter() {
            if known.iter().chain(found.iter()).any(|hole| hole.contains(pos)) {
                continue;
            }

            if let Some(hole) = self.classify(pos) {
                if found.iter().any(|other| other.intersects(&hole.footprint())) {
                    log::debug!("Dropping {:?}: overlaps a hole found in the same pass", hole);
                    continue;
                }
                found.push(hole);
            }
        }

        log::trace!(
            "Scanned {} cells ({} cached lookups), found {} holes",
            region.volume(),
            self.cache.len(),
            found.len()
        );
        found
    }

    /// The hole anchored at `pos`, if any
    pub fn classify(&mut self, pos: VoxelPos) -> Option<Hole> {
        if pos.y >= self.top_y || !self.is_valid_floor(pos) {
            return None;
        }

        let mut open = Vec::with_capacity(4);
        for direction in Direction::HORIZONTAL {
            if !self.cache.is_strong(pos.offset(direction)) {
                open.push(direction);
            }
        }

        match open.as_slice() {
            [] => {
                let indestructible = Direction::EXCLUDING_UP.iter().all(|&direction| {
                    self.cache.classify(pos.offset(direction)) == ResistanceClass::Indestructible
                });

                Some(if indestructible {
                    Hole::indestructible(pos)
                } else {
                    Hole::new(HoleType::OneByOne, BlockBox::single(pos))
                })
            }
            &[open] => {
                let other = pos.offset(open);
                if !self.is_valid_floor(other) {
                    return None;
                }

                // Every side of the partner except the one facing back at `pos`
                let back = open.opposite();
                let sides = Direction::HORIZONTAL
                    .into_iter()
                    .filter(|&direction| direction != back);
                if !self.all_strong(other, sides) {
                    return None;
                }

                Some(Hole::new(HoleType::OneByTwo, BlockBox::from_corners(pos, other)))
            }
            &[first, second] => {
                // Two open sides facing away from each other form a corridor
                if second == first.opposite() {
                    return None;
                }

                let along_first = pos.offset(first);
                if !self.is_enclosed_floor(along_first, [first, second.opposite()]) {
                    return None;
                }

                let along_second = pos.offset(second);
                if !self.is_enclosed_floor(along_second, [second, first.opposite()]) {
                    return None;
                }

                let diagonal = along_second.offset(first);
                if !self.is_enclosed_floor(diagonal, [first, second]) {
                    return None;
                }

                Some(Hole::new(HoleType::TwoByTwo, BlockBox::from_corners(pos, diagonal)))
            }
            _ => None,
        }
    }

    /// Strong block below and [`HEADROOM_CELLS`] of air starting at `pos`
    fn is_valid_floor(&mut self, pos: VoxelPos) -> bool {
        if !self.cache.is_strong(pos.offset(Direction::Down)) {
            return false;
        }

        (0..HEADROOM_CELLS).all(|dy| self.cache.classify(pos.up(dy)) == ResistanceClass::Air)
    }

    fn all_strong(&mut self, pos: VoxelPos, sides: impl IntoIterator<Item = Direction>) -> bool {
        sides
            .into_iter()
            .all(|direction| self.cache.is_strong(pos.offset(direction)))
    }

    fn is_enclosed_floor(&mut self, pos: VoxelPos, sides: [Direction; 2]) -> bool {
        self.is_valid_floor(pos) && self.all_strong(pos, sides)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::HoleTrackerConfig;
    use crate::hole::ResistanceClassifier;
    use crate::world::{register_basic_blocks, BlockId, BlockRegistry, World};

    fn classifier() -> ResistanceClassifier {
        let mut registry = BlockRegistry::new();
        register_basic_blocks(&mut registry);
        ResistanceClassifier::from_registry(&registry, &HoleTrackerConfig::default())
    }

    /// Solid slab of `floor` under y=64, walls of `wall` around every given cell
    fn build(world: &mut World, cells: &[VoxelPos], floor: BlockId, wall: BlockId) {
        for &cell in cells {
            world.set_block(cell.offset(Direction::Down), floor);
            for direction in Direction::HORIZONTAL {
                let side = cell.offset(direction);
                if !cells.contains(&side) {
                    world.set_block(side, wall);
                }
            }
        }
    }

    fn classify_at(world: &World, pos: VoxelPos) -> Option<Hole> {
        let resistance = classifier();
        let mut holes = HoleClassifier::new(ScanCache::new(world, &resistance));
        holes.classify(pos)
    }

    #[test]
    fn test_one_by_one() {
        let mut world = World::default();
        let pos = VoxelPos::new(0, 64, 0);
        build(&mut world, &[pos], BlockId::OBSIDIAN, BlockId::OBSIDIAN);

        let hole = classify_at(&world, pos).unwrap();
        assert_eq!(hole.hole_type(), HoleType::OneByOne);
        assert_eq!(hole.footprint(), BlockBox::single(pos));
        assert!(!hole.indestructible_only());
    }

    #[test]
    fn test_indestructible_needs_all_five_sides() {
        let mut world = World::default();
        let pos = VoxelPos::new(0, 64, 0);
        build(&mut world, &[pos], BlockId::BEDROCK, BlockId::BEDROCK);
        assert!(classify_at(&world, pos).unwrap().indestructible_only());

        world.set_block(pos.offset(Direction::West), BlockId::OBSIDIAN);
        assert!(!classify_at(&world, pos).unwrap().indestructible_only());

        world.set_block(pos.offset(Direction::West), BlockId::BEDROCK);
        world.set_block(pos.offset(Direction::Down), BlockId::ANVIL);
        assert!(!classify_at(&world, pos).unwrap().indestructible_only());
    }

    #[test]
    fn test_headroom_required() {
        let mut world = World::default();
        let pos = VoxelPos::new(0, 64, 0);
        build(&mut world, &[pos], BlockId::OBSIDIAN, BlockId::OBSIDIAN);

        world.set_block(pos.up(2), BlockId::DIRT);
        assert_eq!(classify_at(&world, pos), None);

        world.set_block(pos.up(2), BlockId::CAVE_AIR);
        assert!(classify_at(&world, pos).is_some());
    }

    #[test]
    fn test_breakable_floor_or_wall_rejected() {
        let mut world = World::default();
        let pos = VoxelPos::new(0, 64, 0);
        build(&mut world, &[pos], BlockId::STONE, BlockId::OBSIDIAN);
        assert_eq!(classify_at(&world, pos), None);

        world.set_block(pos.offset(Direction::Down), BlockId::OBSIDIAN);
        world.set_block(pos.offset(Direction::North), BlockId::STONE);
        // One breakable side leaves a single open side whose partner is not a floor
        assert_eq!(classify_at(&world, pos), None);
    }

    #[test]
    fn test_one_by_two_from_either_end() {
        let mut world = World::default();
        let a = VoxelPos::new(0, 64, 0);
        let b = VoxelPos::new(1, 64, 0);
        build(&mut world, &[a, b], BlockId::OBSIDIAN, BlockId::OBSIDIAN);

        let expected = BlockBox::from_corners(a, b);
        for anchor in [a, b] {
            let hole = classify_at(&world, anchor).unwrap();
            assert_eq!(hole.hole_type(), HoleType::OneByTwo);
            assert_eq!(hole.footprint(), expected);
        }
    }

    #[test]
    fn test_one_by_two_with_open_partner_rejected() {
        let mut world = World::default();
        let a = VoxelPos::new(0, 64, 0);
        let b = VoxelPos::new(0, 64, 1);
        build(&mut world, &[a, b], BlockId::OBSIDIAN, BlockId::OBSIDIAN);
        world.set_block(b.offset(Direction::South), BlockId::AIR);

        assert_eq!(classify_at(&world, a), None);
    }

    #[test]
    fn test_two_by_two_from_every_corner() {
        let mut world = World::default();
        let cells = [
            VoxelPos::new(0, 64, 0),
            VoxelPos::new(1, 64, 0),
            VoxelPos::new(0, 64, 1),
            VoxelPos::new(1, 64, 1),
        ];
        build(&mut world, &cells, BlockId::OBSIDIAN, BlockId::BEDROCK);

        let expected = BlockBox::from_corners(cells[0], cells[3]);
        for anchor in cells {
            let hole = classify_at(&world, anchor).unwrap();
            assert_eq!(hole.hole_type(), HoleType::TwoByTwo);
            assert_eq!(hole.footprint(), expected);
            assert!(!hole.indestructible_only());
        }
    }

    #[test]
    fn test_two_by_two_with_blocked_diagonal_headroom_rejected() {
        let mut world = World::default();
        let cells = [
            VoxelPos::new(0, 64, 0),
            VoxelPos::new(1, 64, 0),
            VoxelPos::new(0, 64, 1),
            VoxelPos::new(1, 64, 1),
        ];
        build(&mut world, &cells, BlockId::OBSIDIAN, BlockId::OBSIDIAN);
        world.set_block(cells[3].up(1), BlockId::STONE);

        assert_eq!(classify_at(&world, cells[0]), None);
    }

    #[test]
    fn test_corridor_is_not_a_hole() {
        let mut world = World::default();
        let cells = [
            VoxelPos::new(-1, 64, 0),
            VoxelPos::new(0, 64, 0),
            VoxelPos::new(1, 64, 0),
        ];
        build(&mut world, &cells, BlockId::OBSIDIAN, BlockId::OBSIDIAN);

        assert_eq!(classify_at(&world, cells[1]), None);
    }

    #[test]
    fn test_too_close_to_world_top() {
        let mut world = World::new(0, 67);
        let pos = VoxelPos::new(0, 65, 0);
        build(&mut world, &[pos], BlockId::OBSIDIAN, BlockId::OBSIDIAN);

        // 65 + 2 == max_y still fits inside the world, but the top clearance excludes it
        assert_eq!(classify_at(&world, pos), None);

        let lower = VoxelPos::new(4, 64, 4);
        build(&mut world, &[lower], BlockId::OBSIDIAN, BlockId::OBSIDIAN);
        assert!(classify_at(&world, lower).is_some());
    }

    #[test]
    fn test_scan_reports_each_hole_once() {
        let mut world = World::default();
        let pair = [VoxelPos::new(0, 64, 0), VoxelPos::new(0, 64, 1)];
        let single = VoxelPos::new(4, 64, 4);
        build(&mut world, &pair, BlockId::OBSIDIAN, BlockId::OBSIDIAN);
        build(&mut world, &[single], BlockId::OBSIDIAN, BlockId::OBSIDIAN);

        let resistance = classifier();
        let mut holes = HoleClassifier::new(ScanCache::new(&world, &resistance));
        let region = BlockBox::from_corners(VoxelPos::new(-2, 60, -2), VoxelPos::new(6, 70, 6));
        let found = holes.scan(&region, &[]);

        assert_eq!(found.len(), 2);
        assert_eq!(
            found.iter().filter(|h| h.hole_type() == HoleType::OneByTwo).count(),
            1
        );

        let again = holes.scan(&region, &found);
        assert!(again.is_empty());
    }
}
