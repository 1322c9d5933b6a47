use std::f64::consts::{FRAC_PI_2, PI};

use serde::{Deserialize, Serialize};
use spg_core::{Descriptor, LeafGenerator, SpgError};
use tracing::debug;

use crate::validate::{require_axes, require_count, require_finite, require_len, require_positive};

const KIND: &str = "lissajous";

/// Rectangle the curve is inscribed in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    /// Centre of the rectangle.
    pub centre: [f64; 2],
    /// Extent along the first axis.
    pub width: f64,
    /// Extent along the second axis.
    pub height: f64,
}

/// Parameters of a Lissajous curve over two axes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LissajousParams {
    /// The two axis names, `x` first.
    pub axes: Vec<String>,
    /// Units, one per axis.
    pub units: Vec<String>,
    /// Bounding rectangle.
    #[serde(rename = "box")]
    pub bounds: BoundingBox,
    /// Number of lobes along the first axis.
    pub num_lobes: usize,
    /// Number of points sampled over one period.
    pub num_points: usize,
}

/// Lissajous figure with frequencies `num_lobes` and `num_lobes + 1`.
#[derive(Debug, Clone)]
pub struct LissajousGenerator {
    params: LissajousParams,
    x_freq: f64,
    y_freq: f64,
    increment: f64,
    descriptor: Descriptor,
}

impl LissajousGenerator {
    /// Validates `params` and builds the generator.
    pub fn new(params: LissajousParams) -> Result<Self, SpgError> {
        require_axes(KIND, &params.axes)?;
        require_len(KIND, "axes", 2, params.axes.len())?;
        require_len(KIND, "units", 2, params.units.len())?;
        require_finite(KIND, "box.centre", &params.bounds.centre)?;
        require_positive(KIND, "box.width", params.bounds.width)?;
        require_positive(KIND, "box.height", params.bounds.height)?;
        require_count(KIND, "num_lobes", params.num_lobes)?;
        require_count(KIND, "num_points", params.num_points)?;

        let descriptor = Descriptor::tagged(KIND, &params)?;
        debug!(axes = ?params.axes, size = params.num_points, lobes = params.num_lobes, "constructed lissajous generator");
        Ok(Self {
            x_freq: params.num_lobes as f64,
            y_freq: (params.num_lobes + 1) as f64,
            increment: 2.0 * PI / params.num_points as f64,
            params,
            descriptor,
        })
    }

    /// Returns the validated parameters.
    pub fn params(&self) -> &LissajousParams {
        &self.params
    }
}

impl LeafGenerator for LissajousGenerator {
    fn axes(&self) -> &[String] {
        &self.params.axes
    }

    fn units(&self) -> &[String] {
        &self.params.units
    }

    fn size(&self) -> usize {
        self.params.num_points
    }

    fn values_at(&self, index: usize) -> Option<Vec<f64>> {
        if index >= self.params.num_points {
            return None;
        }
        let t = index as f64 * self.increment;
        let [cx, cy] = self.params.bounds.centre;
        let x_max = self.params.bounds.width / 2.0;
        let y_max = self.params.bounds.height / 2.0;
        Some(vec![
            cx + x_max * (self.x_freq * t + FRAC_PI_2).sin(),
            cy + y_max * (self.y_freq * t).sin(),
        ])
    }

    fn descriptor(&self) -> &Descriptor {
        &self.descriptor
    }
}
