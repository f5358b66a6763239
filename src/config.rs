use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::constants::hole::*;
use crate::error::{HoleError, HoleResult};

/// Configuration for hole detection and rescanning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HoleTrackerConfig {
    /// Blocks at or above this explosion resistance are blast resistant
    pub blast_resistance_threshold: f32,

    /// Blocks at or above this explosion resistance are indestructible
    pub indestructible_threshold: f32,

    /// Horizontal margin rescanned around a changed block
    pub rescan_margin_horizontal: i32,

    /// Vertical margin rescanned around a changed block
    pub rescan_margin_vertical: i32,

    /// Index size from which lookups narrow to an ordered sub-range
    pub range_query_threshold: usize,

    /// Largest region (in cells) a single rescan may classify
    pub max_rescan_volume: u64,

    /// Also receive one block update per cell when a chunk loads
    pub record_block_on_chunk_update: bool,
}

impl Default for HoleTrackerConfig {
    fn default() -> Self {
        Self {
            blast_resistance_threshold: DEFAULT_BLAST_RESISTANCE_THRESHOLD,
            indestructible_threshold: DEFAULT_INDESTRUCTIBLE_THRESHOLD,
            rescan_margin_horizontal: DEFAULT_RESCAN_MARGIN_HORIZONTAL,
            rescan_margin_vertical: DEFAULT_RESCAN_MARGIN_VERTICAL,
            range_query_threshold: DEFAULT_RANGE_QUERY_THRESHOLD,
            max_rescan_volume: DEFAULT_MAX_RESCAN_VOLUME,
            record_block_on_chunk_update: false,
        }
    }
}

impl HoleTrackerConfig {
    /// Parse and validate a TOML document. Missing keys take their defaults.
    pub fn from_toml_str(source: &str) -> HoleResult<Self> {
        let config: Self = toml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a TOML config file
    pub fn load(path: impl AsRef<Path>) -> HoleResult<Self> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path).map_err(|source| HoleError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml_str(&source)?;
        log::info!("Loaded hole tracker config from {}", path.display());
        Ok(config)
    }

    pub fn validate(&self) -> HoleResult<()> {
        let invalid = |reason: String| Err(HoleError::InvalidConfig { reason });

        if !(self.blast_resistance_threshold > 0.0) {
            return invalid(format!(
                "blast_resistance_threshold must be positive, got {}",
                self.blast_resistance_threshold
            ));
        }
        if !(self.indestructible_threshold > self.blast_resistance_threshold) {
            return invalid(format!(
                "indestructible_threshold ({}) must exceed blast_resistance_threshold ({})",
                self.indestructible_threshold, self.blast_resistance_threshold
            ));
        }
        if self.rescan_margin_horizontal < 0 || self.rescan_margin_vertical < 0 {
            return invalid(format!(
                "rescan margins must not be negative, got {}/{}",
                self.rescan_margin_horizontal, self.rescan_margin_vertical
            ));
        }
        if self.max_rescan_volume == 0 {
            return invalid("max_rescan_volume must be at least 1".to_string());
        }
        Ok(())
    }
}
