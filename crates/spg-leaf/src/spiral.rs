use std::f64::consts::PI;

use serde::{Deserialize, Serialize};
use spg_core::errors::ErrorInfo;
use spg_core::{Descriptor, LeafGenerator, SpgError};
use tracing::debug;

use crate::validate::{require_axes, require_finite, require_len, require_positive};

const KIND: &str = "spiral";

fn default_scale() -> f64 {
    1.0
}

/// Parameters of a Fermat spiral over two axes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpiralParams {
    /// The two axis names, `x` first.
    pub axes: Vec<String>,
    /// Units, one per axis.
    pub units: Vec<String>,
    /// Centre of the spiral.
    pub centre: [f64; 2],
    /// Maximum radius reached by the spiral.
    pub radius: f64,
    /// Gap between rings.
    #[serde(default = "default_scale")]
    pub scale: f64,
    /// Reverse on alternate passes of the enclosing loops.
    #[serde(default)]
    pub alternate: bool,
}

/// Fermat spiral: point density stays uniform as the radius grows.
#[derive(Debug, Clone)]
pub struct SpiralGenerator {
    params: SpiralParams,
    alpha: f64,
    beta: f64,
    size: usize,
    descriptor: Descriptor,
}

impl SpiralGenerator {
    /// Validates `params` and builds the generator.
    pub fn new(params: SpiralParams) -> Result<Self, SpgError> {
        require_axes(KIND, &params.axes)?;
        require_len(KIND, "axes", 2, params.axes.len())?;
        require_len(KIND, "units", 2, params.units.len())?;
        require_finite(KIND, "centre", &params.centre)?;
        require_positive(KIND, "radius", params.radius)?;
        require_positive(KIND, "scale", params.scale)?;

        let alpha = (4.0 * PI).sqrt();
        let beta = params.scale / (2.0 * PI);
        let points = (params.radius / (alpha * beta)).powi(2).floor();
        if !points.is_finite() || points >= usize::MAX as f64 {
            return Err(SpgError::Configuration(
                ErrorInfo::new("spiral-too-large", "spiral radius is too large for its scale")
                    .with_context("radius", params.radius.to_string())
                    .with_context("scale", params.scale.to_string()),
            ));
        }
        let size = points as usize;
        if size == 0 {
            return Err(SpgError::Configuration(
                ErrorInfo::new("empty-spiral", "spiral radius is too small for its scale")
                    .with_context("radius", params.radius.to_string())
                    .with_context("scale", params.scale.to_string())
                    .with_hint("increase the radius or reduce the scale"),
            ));
        }
        let descriptor = Descriptor::tagged(KIND, &params)?;
        debug!(axes = ?params.axes, size, "constructed spiral generator");
        Ok(Self {
            params,
            alpha,
            beta,
            size,
            descriptor,
        })
    }

    /// Returns the validated parameters.
    pub fn params(&self) -> &SpiralParams {
        &self.params
    }
}

impl LeafGenerator for SpiralGenerator {
    fn axes(&self) -> &[String] {
        &self.params.axes
    }

    fn units(&self) -> &[String] {
        &self.params.units
    }

    fn size(&self) -> usize {
        self.size
    }

    fn alternate(&self) -> bool {
        self.params.alternate
    }

    fn values_at(&self, index: usize) -> Option<Vec<f64>> {
        if index >= self.size {
            return None;
        }
        let phi = (index as f64 + 0.5).sqrt() * self.alpha;
        let [cx, cy] = self.params.centre;
        Some(vec![
            cx + self.beta * phi * phi.sin(),
            cy + self.beta * phi * phi.cos(),
        ])
    }

    fn descriptor(&self) -> &Descriptor {
        &self.descriptor
    }
}
