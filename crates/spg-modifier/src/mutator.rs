use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use spg_core::errors::{ErrorInfo, SpgError};
use spg_core::{Descriptor, Mutator, Position, RngHandle};
use tracing::debug;

const KIND: &str = "random-offset";

/// Parameters of a [`RandomOffsetMutator`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RandomOffsetParams {
    /// Master seed.
    pub seed: u64,
    /// Axes to perturb, in draw order.
    pub axes: Vec<String>,
    /// Largest absolute offset per axis.
    pub max_offset: BTreeMap<String, f64>,
}

/// Adds a bounded pseudo-random offset to selected axes.
///
/// The offset of a point depends only on the seed and the point's ordinal, so
/// every pass over a scan reproduces the same trajectory.
#[derive(Debug, Clone)]
pub struct RandomOffsetMutator {
    params: RandomOffsetParams,
    descriptor: Descriptor,
}

impl RandomOffsetMutator {
    /// Validates that every axis has a finite, non-negative bound.
    pub fn new(params: RandomOffsetParams) -> Result<Self, SpgError> {
        if params.axes.is_empty() {
            return Err(SpgError::config(
                "no-axes",
                "random offset mutator needs at least one axis",
            ));
        }
        for axis in &params.axes {
            match params.max_offset.get(axis) {
                Some(bound) if bound.is_finite() && *bound >= 0.0 => {}
                Some(bound) => {
                    return Err(SpgError::Configuration(
                        ErrorInfo::new("bad-offset", "max offset must be finite and non-negative")
                            .with_context("axis", axis.clone())
                            .with_context("max_offset", bound.to_string()),
                    ))
                }
                None => {
                    return Err(SpgError::Configuration(
                        ErrorInfo::new("missing-offset", "no max offset given for axis")
                            .with_context("axis", axis.clone()),
                    ))
                }
            }
        }
        let descriptor = Descriptor::tagged(KIND, &params)?;
        debug!(seed = params.seed, axes = ?params.axes, "constructed random offset mutator");
        Ok(Self { params, descriptor })
    }

    /// Returns the validated parameters.
    pub fn params(&self) -> &RandomOffsetParams {
        &self.params
    }
}

impl Mutator for RandomOffsetMutator {
    fn axes(&self) -> &[String] {
        &self.params.axes
    }

    fn mutate(&self, mut position: Position, ordinal: usize) -> Position {
        let mut rng = RngHandle::for_substream(self.params.seed, ordinal as u64);
        for axis in &self.params.axes {
            let draw = rng.symmetric_unit();
            if let Some(bound) = self.params.max_offset.get(axis) {
                position.offset(axis, bound * draw);
            }
        }
        position
    }

    fn descriptor(&self) -> &Descriptor {
        &self.descriptor
    }
}
