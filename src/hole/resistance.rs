use rustc_hash::FxHashMap;

use crate::config::HoleTrackerConfig;
use crate::world::BlockId;

/// How hard a block type is to destroy
///
/// Variants are ordered from weakest to strongest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ResistanceClass {
    Air,
    Breakable,
    BlastResistant,
    Indestructible,
}

impl ResistanceClass {
    /// Survives explosions: blast resistant or indestructible
    pub fn is_strong(self) -> bool {
        matches!(self, ResistanceClass::BlastResistant | ResistanceClass::Indestructible)
    }
}

/// Block material lookups the classifier is built from
pub trait MaterialRegistry {
    /// Every known block type
    fn block_ids(&self) -> Vec<BlockId>;

    fn explosion_resistance(&self, id: BlockId) -> f32;

    fn is_air(&self, id: BlockId) -> bool;
}

/// Static block type to [`ResistanceClass`] table
///
/// Types absent from the table are breakable, except [`BlockId::AIR`].
#[derive(Debug, Clone, Default)]
pub struct ResistanceClassifier {
    classes: FxHashMap<BlockId, ResistanceClass>,
}

impl ResistanceClassifier {
    /// Bucket every registered block by explosion resistance
    pub fn from_registry(registry: &dyn MaterialRegistry, config: &HoleTrackerConfig) -> Self {
        let mut classes = FxHashMap::default();

        for id in registry.block_ids() {
            let resistance = registry.explosion_resistance(id);
            let class = if registry.is_air(id) {
                ResistanceClass::Air
            } else if resistance >= config.indestructible_threshold {
                ResistanceClass::Indestructible
            } else if resistance >= config.blast_resistance_threshold {
                ResistanceClass::BlastResistant
            } else {
                continue;
            };
            classes.insert(id, class);
        }

        log::debug!(
            "Built resistance table: {} of {} block types are air or blast resistant",
            classes.len(),
            registry.block_ids().len()
        );

        Self { classes }
    }

    pub fn classify(&self, block: BlockId) -> ResistanceClass {
        match self.classes.get(&block) {
            Some(&class) => class,
            None if block == BlockId::AIR => ResistanceClass::Air,
            None => ResistanceClass::Breakable,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::world::{register_basic_blocks, BlockRegistry};

    fn classifier() -> ResistanceClassifier {
        let mut registry = BlockRegistry::new();
        register_basic_blocks(&mut registry);
        ResistanceClassifier::from_registry(&registry, &HoleTrackerConfig::default())
    }

    #[test]
    fn test_threshold_buckets() {
        let classifier = classifier();

        assert_eq!(classifier.classify(BlockId::AIR), ResistanceClass::Air);
        assert_eq!(classifier.classify(BlockId::CAVE_AIR), ResistanceClass::Air);
        assert_eq!(classifier.classify(BlockId::DIRT), ResistanceClass::Breakable);
        assert_eq!(classifier.classify(BlockId::STONE), ResistanceClass::Breakable);
        // 600 is the inclusive lower bound
        assert_eq!(classifier.classify(BlockId::ENDER_CHEST), ResistanceClass::BlastResistant);
        assert_eq!(classifier.classify(BlockId::OBSIDIAN), ResistanceClass::BlastResistant);
        assert_eq!(classifier.classify(BlockId::BEDROCK), ResistanceClass::Indestructible);
        assert_eq!(classifier.classify(BlockId::BARRIER), ResistanceClass::Indestructible);
    }

    #[test]
    fn test_unknown_block_is_breakable() {
        assert_eq!(classifier().classify(BlockId(4242)), ResistanceClass::Breakable);
        assert_eq!(
            ResistanceClassifier::default().classify(BlockId::AIR),
            ResistanceClass::Air
        );
    }

    #[test]
    fn test_strength_ordering() {
        assert!(ResistanceClass::Indestructible > ResistanceClass::BlastResistant);
        assert!(ResistanceClass::BlastResistant > ResistanceClass::Breakable);
        assert!(ResistanceClass::Breakable > ResistanceClass::Air);
        assert!(ResistanceClass::BlastResistant.is_strong());
        assert!(!ResistanceClass::Breakable.is_strong());
    }

    #[test]
    fn test_custom_thresholds() {
        let mut registry = BlockRegistry::new();
        register_basic_blocks(&mut registry);
        let config = HoleTrackerConfig {
            blast_resistance_threshold: 5.0,
            indestructible_threshold: 1000.0,
            ..HoleTrackerConfig::default()
        };
        let classifier = ResistanceClassifier::from_registry(&registry, &config);

        assert_eq!(classifier.classify(BlockId::STONE), ResistanceClass::BlastResistant);
        assert_eq!(classifier.classify(BlockId::OBSIDIAN), ResistanceClass::Indestructible);
    }
}
