use std::sync::Arc;

use serde::{Deserialize, Serialize};
use spg_core::{Excluder, Mutator, SpgError};

use crate::excluder::RoiExcluder;
use crate::mutator::{RandomOffsetMutator, RandomOffsetParams};
use crate::roi::Region;

/// Configuration of an excluder, tagged by `type`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum ExcluderConfig {
    /// Region-of-interest excluder over an axis pair.
    Roi {
        /// Regions; a point is kept when any contains it.
        regions: Vec<Region>,
        /// The two axes projected onto the region plane.
        axes: Vec<String>,
    },
}

impl ExcluderConfig {
    /// Validates the parameters and constructs the excluder.
    pub fn build(&self) -> Result<Arc<dyn Excluder>, SpgError> {
        match self {
            ExcluderConfig::Roi { regions, axes } => {
                Ok(Arc::new(RoiExcluder::new(regions.clone(), axes.clone())?))
            }
        }
    }
}

/// Configuration of a mutator, tagged by `type`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum MutatorConfig {
    /// Seeded bounded random offset.
    RandomOffset(RandomOffsetParams),
}

impl MutatorConfig {
    /// Validates the parameters and constructs the mutator.
    pub fn build(&self) -> Result<Arc<dyn Mutator>, SpgError> {
        match self {
            MutatorConfig::RandomOffset(params) => {
                Ok(Arc::new(RandomOffsetMutator::new(params.clone())?))
            }
        }
    }
}
