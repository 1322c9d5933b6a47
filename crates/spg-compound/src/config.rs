use std::fs;
use std::path::Path;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use spg_core::errors::{ErrorInfo, SpgError};
use spg_core::serde::from_yaml_slice;
use spg_leaf::GeneratorConfig;
use spg_modifier::{group_regions, ExcluderConfig, MutatorConfig, ScanRegion};
use tracing::debug;

use crate::compose::{CompoundComposer, CompoundGenerator, GeneratorInput};
use crate::project::PairLayout;
use crate::scan::ScanPointIterator;

/// YAML description of a scan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScanConfig {
    /// Generators, outermost first.
    pub generators: Vec<InputConfig>,
    /// Excluders applied to the whole scan.
    #[serde(default)]
    pub excluders: Vec<ExcluderConfig>,
    /// Regions of interest, grouped into one excluder per axis set.
    #[serde(default)]
    pub regions: Vec<ScanRegion>,
    /// Mutators applied to every emitted point.
    #[serde(default)]
    pub mutators: Vec<MutatorConfig>,
    /// Per-point duration. Negative values leave it unset.
    #[serde(default)]
    pub duration: Option<f64>,
    /// Axis order of two-axis points. Only read on the outermost scan.
    #[serde(default)]
    pub layout: PairLayout,
}

/// One entry of [`ScanConfig::generators`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum InputConfig {
    /// A nested scan, spliced into the parent.
    Compound {
        /// The nested scan description.
        compound: Box<ScanConfig>,
    },
    /// A leaf generator.
    Leaf(GeneratorConfig),
}

impl ScanConfig {
    /// Constructs every generator and modifier and prepares the composition.
    pub fn build(&self) -> Result<CompoundGenerator, SpgError> {
        let inputs = self
            .generators
            .iter()
            .map(|input| match input {
                InputConfig::Leaf(config) => config.build().map(GeneratorInput::Leaf),
                InputConfig::Compound { compound } => compound
                    .build()
                    .map(|nested| GeneratorInput::Compound(Arc::new(nested))),
            })
            .collect::<Result<Vec<_>, _>>()?;
        let mut excluders = self
            .excluders
            .iter()
            .map(ExcluderConfig::build)
            .collect::<Result<Vec<_>, _>>()?;
        for excluder in group_regions(&self.regions)? {
            excluders.push(Arc::new(excluder));
        }
        let mutators = self
            .mutators
            .iter()
            .map(MutatorConfig::build)
            .collect::<Result<Vec<_>, _>>()?;
        let mut composer = CompoundComposer::new(inputs, excluders, mutators);
        if let Some(duration) = self.duration {
            composer = composer.with_duration(duration);
        }
        composer.prepare()
    }

    /// Builds the composition and opens an iterator using the configured layout.
    pub fn scan(&self) -> Result<ScanPointIterator, SpgError> {
        let generator = self.build()?;
        Ok(ScanPointIterator::with_layout(Arc::new(generator), self.layout))
    }
}

/// Reads and parses a YAML scan description.
pub fn load_scan(path: &Path) -> Result<ScanConfig, SpgError> {
    let bytes = fs::read(path).map_err(|err| {
        SpgError::Configuration(
            ErrorInfo::new("scan-read", err.to_string())
                .with_context("path", path.display().to_string()),
        )
    })?;
    let config: ScanConfig = from_yaml_slice(&bytes)?;
    debug!(path = %path.display(), generators = config.generators.len(), "loaded scan description");
    Ok(config)
}
