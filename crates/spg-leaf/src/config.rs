use std::sync::Arc;

use serde::{Deserialize, Serialize};
use spg_core::{LeafGenerator, SpgError};

use crate::array::{ArrayGenerator, ArrayParams};
use crate::line::{LineGenerator, LineParams};
use crate::lissajous::{LissajousGenerator, LissajousParams};
use crate::spiral::{SpiralGenerator, SpiralParams};

/// Configuration of a single leaf generator, tagged by `type`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum GeneratorConfig {
    /// Evenly spaced line.
    Line(LineParams),
    /// Explicit list of positions.
    Array(ArrayParams),
    /// Fermat spiral.
    Spiral(SpiralParams),
    /// Lissajous curve.
    Lissajous(LissajousParams),
}

impl GeneratorConfig {
    /// Validates the parameters and constructs the generator.
    pub fn build(&self) -> Result<Arc<dyn LeafGenerator>, SpgError> {
        let generator: Arc<dyn LeafGenerator> = match self {
            GeneratorConfig::Line(params) => Arc::new(LineGenerator::new(params.clone())?),
            GeneratorConfig::Array(params) => Arc::new(ArrayGenerator::new(params.clone())?),
            GeneratorConfig::Spiral(params) => Arc::new(SpiralGenerator::new(params.clone())?),
            GeneratorConfig::Lissajous(params) => {
                Arc::new(LissajousGenerator::new(params.clone())?)
            }
        };
        Ok(generator)
    }
}
