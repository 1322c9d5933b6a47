#![deny(missing_docs)]

//! Scan modifiers: regions of interest, the excluders built on them and
//! position mutators.

mod config;
mod excluder;
mod mutator;
mod roi;

pub use config::{ExcluderConfig, MutatorConfig};
pub use excluder::{group_regions, RoiExcluder, RoiExcluderParams, ScanRegion};
pub use mutator::{RandomOffsetMutator, RandomOffsetParams};
pub use roi::{Region, POINT_TOLERANCE};
