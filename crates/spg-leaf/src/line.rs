use serde::{Deserialize, Serialize};
use spg_core::{Descriptor, LeafGenerator, SpgError};
use tracing::debug;

use crate::one_or_many;
use crate::validate::{require_axes, require_count, require_finite, require_len};

const KIND: &str = "line";

/// Parameters of an evenly spaced line over one or more axes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineParams {
    /// Axis name, or names for a multi-axis line.
    #[serde(deserialize_with = "one_or_many")]
    pub axes: Vec<String>,
    /// Units, one per axis.
    #[serde(deserialize_with = "one_or_many")]
    pub units: Vec<String>,
    /// First position of each axis.
    #[serde(deserialize_with = "one_or_many")]
    pub start: Vec<f64>,
    /// Last position of each axis.
    #[serde(deserialize_with = "one_or_many")]
    pub stop: Vec<f64>,
    /// Number of points, including both ends.
    pub num_points: usize,
    /// Reverse on alternate passes of the enclosing loops.
    #[serde(default)]
    pub alternate: bool,
}

/// Evenly spaced points from `start` to `stop`, all axes sharing one index.
#[derive(Debug, Clone)]
pub struct LineGenerator {
    params: LineParams,
    steps: Vec<f64>,
    descriptor: Descriptor,
}

impl LineGenerator {
    /// Validates `params` and builds the generator.
    pub fn new(params: LineParams) -> Result<Self, SpgError> {
        require_axes(KIND, &params.axes)?;
        let width = params.axes.len();
        require_len(KIND, "units", width, params.units.len())?;
        require_len(KIND, "start", width, params.start.len())?;
        require_len(KIND, "stop", width, params.stop.len())?;
        require_count(KIND, "num_points", params.num_points)?;
        require_finite(KIND, "start", &params.start)?;
        require_finite(KIND, "stop", &params.stop)?;

        let steps = params
            .start
            .iter()
            .zip(&params.stop)
            .map(|(start, stop)| {
                if params.num_points > 1 {
                    (stop - start) / (params.num_points - 1) as f64
                } else {
                    0.0
                }
            })
            .collect();
        let descriptor = Descriptor::tagged(KIND, &params)?;
        debug!(axes = ?params.axes, size = params.num_points, "constructed line generator");
        Ok(Self {
            params,
            steps,
            descriptor,
        })
    }

    /// Convenience constructor for a single-axis line.
    pub fn single(
        axis: impl Into<String>,
        units: impl Into<String>,
        start: f64,
        stop: f64,
        num_points: usize,
    ) -> Result<Self, SpgError> {
        Self::new(LineParams {
            axes: vec![axis.into()],
            units: vec![units.into()],
            start: vec![start],
            stop: vec![stop],
            num_points,
            alternate: false,
        })
    }

    /// Returns the validated parameters.
    pub fn params(&self) -> &LineParams {
        &self.params
    }

    /// Spacing between consecutive points, per axis.
    pub fn steps(&self) -> &[f64] {
        &self.steps
    }
}

impl LeafGenerator for LineGenerator {
    fn axes(&self) -> &[String] {
        &self.params.axes
    }

    fn units(&self) -> &[String] {
        &self.params.units
    }

    fn size(&self) -> usize {
        self.params.num_points
    }

    fn alternate(&self) -> bool {
        self.params.alternate
    }

    fn values_at(&self, index: usize) -> Option<Vec<f64>> {
        if index >= self.params.num_points {
            return None;
        }
        let values = self
            .params
            .start
            .iter()
            .zip(&self.steps)
            .map(|(start, step)| start + index as f64 * step)
            .collect();
        Some(values)
    }

    fn descriptor(&self) -> &Descriptor {
        &self.descriptor
    }
}
