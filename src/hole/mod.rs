//! Hole discovery and invalidation
//!
//! Block types are bucketed by [`ResistanceClassifier`], a [`HoleClassifier`]
//! finds enclosed floor cells through a per-pass [`ScanCache`], and the
//! [`HoleTracker`] keeps a shared [`HoleIndex`] in step with world changes.

mod classifier;
#[allow(clippy::module_inception)]
mod hole;
mod index;
mod resistance;
mod scan_cache;
mod tracker;

pub use classifier::HoleClassifier;
pub use hole::{Hole, HoleType};
pub use index::{HoleIndex, HoleView};
pub use resistance::{MaterialRegistry, ResistanceClass, ResistanceClassifier};
pub use scan_cache::ScanCache;
pub use tracker::HoleTracker;
