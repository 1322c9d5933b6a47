use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use spg_core::{AxisPoint, Position};

use crate::compose::CompoundGenerator;

/// Name, index and value of one axis in a projected point.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AxisEntry {
    /// Axis name.
    pub axis: String,
    /// Index along the owning dimension.
    pub index: usize,
    /// Demanded position.
    pub value: f64,
}

/// Output shape of one emitted point.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "shape", rename_all = "kebab-case")]
pub enum PositionShape {
    /// Single-axis scans.
    Scalar(AxisEntry),
    /// Two-axis scans.
    Pair {
        /// Horizontal axis.
        x: AxisEntry,
        /// Vertical axis.
        y: AxisEntry,
        /// Axis names grouped by dimension, when the layout records them.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        dimension_names: Option<Vec<Vec<String>>>,
    },
    /// Scans over three or more axes, keyed by axis name in axis order.
    Map {
        /// Value and index per axis.
        entries: IndexMap<String, AxisPoint>,
        /// Axis names grouped by dimension.
        dimension_names: Vec<Vec<String>>,
    },
}

impl PositionShape {
    /// Returns the value of `axis`, if the point carries it.
    pub fn value(&self, axis: &str) -> Option<f64> {
        self.entry(axis).map(|entry| entry.value)
    }

    /// Returns the index of `axis`, if the point carries it.
    pub fn index(&self, axis: &str) -> Option<usize> {
        self.entry(axis).map(|entry| entry.index)
    }

    fn entry(&self, axis: &str) -> Option<AxisPoint> {
        match self {
            PositionShape::Scalar(entry) => {
                (entry.axis == axis).then(|| AxisPoint::new(entry.value, entry.index))
            }
            PositionShape::Pair { x, y, .. } => [x, y]
                .into_iter()
                .find(|entry| entry.axis == axis)
                .map(|entry| AxisPoint::new(entry.value, entry.index)),
            PositionShape::Map { entries, .. } => entries.get(axis).copied(),
        }
    }
}

/// Axis order used for two-axis points.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PairLayout {
    /// `x` is the axis later in the axis ordering; dimension names attached.
    #[default]
    FastFirst,
    /// `x` is the first axis of the ordering; no dimension names.
    Declared,
}

/// Selects the output shape of every point of one composition.
#[derive(Debug, Clone)]
pub struct Projector {
    axis_ordering: Vec<String>,
    dimension_names: Vec<Vec<String>>,
    layout: PairLayout,
}

impl Projector {
    /// Fixes the arity and grouping of `generator`.
    pub fn new(generator: &CompoundGenerator, layout: PairLayout) -> Self {
        Self {
            axis_ordering: generator.axis_ordering().to_vec(),
            dimension_names: generator.dimension_names(),
            layout,
        }
    }

    /// Number of axes per projected point.
    pub fn arity(&self) -> usize {
        self.axis_ordering.len()
    }

    /// Pair layout in use.
    pub fn layout(&self) -> PairLayout {
        self.layout
    }

    /// Projects `position` without modifying it.
    pub fn project(&self, position: &Position) -> PositionShape {
        let entries: Vec<AxisEntry> = self
            .axis_ordering
            .iter()
            .filter_map(|axis| {
                position.get(axis).map(|point| AxisEntry {
                    axis: axis.clone(),
                    index: point.index,
                    value: point.value,
                })
            })
            .collect();
        match (self.arity(), entries.as_slice()) {
            (1, [only]) => PositionShape::Scalar(only.clone()),
            (2, [first, second]) => match self.layout {
                PairLayout::FastFirst => PositionShape::Pair {
                    x: second.clone(),
                    y: first.clone(),
                    dimension_names: Some(self.dimension_names.clone()),
                },
                PairLayout::Declared => PositionShape::Pair {
                    x: first.clone(),
                    y: second.clone(),
                    dimension_names: None,
                },
            },
            _ => PositionShape::Map {
                entries: entries
                    .iter()
                    .map(|entry| (entry.axis.clone(), AxisPoint::new(entry.value, entry.index)))
                    .collect(),
                dimension_names: self.dimension_names.clone(),
            },
        }
    }
}
