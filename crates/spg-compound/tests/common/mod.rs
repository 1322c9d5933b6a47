#![allow(dead_code)]

use std::sync::Arc;

use serde_json::json;
use spg_compound::GeneratorInput;
use spg_core::{Descriptor, Excluder, LeafGenerator};
use spg_leaf::{LineGenerator, LineParams};

pub fn line(axis: &str, start: f64, stop: f64, num_points: usize) -> Arc<dyn LeafGenerator> {
    Arc::new(LineGenerator::single(axis, "mm", start, stop, num_points).expect("valid line"))
}

pub fn snake_line(axis: &str, start: f64, stop: f64, num_points: usize) -> Arc<dyn LeafGenerator> {
    Arc::new(
        LineGenerator::new(LineParams {
            axes: vec![axis.to_string()],
            units: vec!["mm".to_string()],
            start: vec![start],
            stop: vec![stop],
            num_points,
            alternate: true,
        })
        .expect("valid line"),
    )
}

pub fn diagonal(axes: [&str; 2], stop: f64, num_points: usize) -> Arc<dyn LeafGenerator> {
    Arc::new(
        LineGenerator::new(LineParams {
            axes: axes.iter().map(|axis| axis.to_string()).collect(),
            units: vec!["mm".to_string(); 2],
            start: vec![0.0, 0.0],
            stop: vec![stop, stop],
            num_points,
            alternate: false,
        })
        .expect("valid line"),
    )
}

pub fn input(generator: &Arc<dyn LeafGenerator>) -> GeneratorInput {
    GeneratorInput::Leaf(Arc::clone(generator))
}

/// Keeps points whose single axis does not exceed `limit`.
#[derive(Debug)]
pub struct AtMost {
    axes: Vec<String>,
    limit: f64,
    descriptor: Descriptor,
}

impl AtMost {
    pub fn new(axis: &str, limit: f64) -> Self {
        let descriptor =
            Descriptor::tagged("at-most", &json!({ "axis": axis, "limit": limit })).expect("object");
        Self {
            axes: vec![axis.to_string()],
            limit,
            descriptor,
        }
    }

    pub fn shared(axis: &str, limit: f64) -> Arc<dyn Excluder> {
        Arc::new(Self::new(axis, limit))
    }
}

impl Excluder for AtMost {
    fn axes(&self) -> &[String] {
        &self.axes
    }

    fn contains(&self, coordinates: &[f64]) -> bool {
        coordinates.first().is_some_and(|value| *value <= self.limit)
    }

    fn descriptor(&self) -> &Descriptor {
        &self.descriptor
    }
}
