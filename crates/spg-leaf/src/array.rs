use serde::{Deserialize, Serialize};
use spg_core::errors::ErrorInfo;
use spg_core::{Descriptor, LeafGenerator, SpgError};
use tracing::debug;

use crate::validate::{require_axes, require_finite};

const KIND: &str = "array";

/// Parameters of an explicit list of positions on one axis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArrayParams {
    /// Axis name.
    pub axis: String,
    /// Axis units.
    pub units: String,
    /// Positions, visited in order.
    pub points: Vec<f64>,
    /// Reverse on alternate passes of the enclosing loops.
    #[serde(default)]
    pub alternate: bool,
}

/// Visits an explicit list of positions.
#[derive(Debug, Clone)]
pub struct ArrayGenerator {
    params: ArrayParams,
    axes: Vec<String>,
    units: Vec<String>,
    descriptor: Descriptor,
}

impl ArrayGenerator {
    /// Validates `params` and builds the generator.
    pub fn new(params: ArrayParams) -> Result<Self, SpgError> {
        let axes = vec![params.axis.clone()];
        require_axes(KIND, &axes)?;
        if params.points.is_empty() {
            return Err(SpgError::Configuration(
                ErrorInfo::new("empty-points", "array generator needs at least one point")
                    .with_context("axis", params.axis.clone()),
            ));
        }
        require_finite(KIND, "points", &params.points)?;
        let descriptor = Descriptor::tagged(KIND, &params)?;
        debug!(axis = %params.axis, size = params.points.len(), "constructed array generator");
        Ok(Self {
            units: vec![params.units.clone()],
            axes,
            params,
            descriptor,
        })
    }

    /// Returns the validated parameters.
    pub fn params(&self) -> &ArrayParams {
        &self.params
    }
}

impl LeafGenerator for ArrayGenerator {
    fn axes(&self) -> &[String] {
        &self.axes
    }

    fn units(&self) -> &[String] {
        &self.units
    }

    fn size(&self) -> usize {
        self.params.points.len()
    }

    fn alternate(&self) -> bool {
        self.params.alternate
    }

    fn values_at(&self, index: usize) -> Option<Vec<f64>> {
        self.params.points.get(index).map(|value| vec![*value])
    }

    fn descriptor(&self) -> &Descriptor {
        &self.descriptor
    }
}
