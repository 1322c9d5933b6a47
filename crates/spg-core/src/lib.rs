#![deny(missing_docs)]
#![doc = "Core traits and data types for scan point generation: positions, leaf generators, excluders, mutators and their canonical descriptors."]

use std::collections::BTreeMap;
use std::fmt;

use ::serde::{Deserialize, Serialize};

pub mod descriptor;
pub mod errors;
/// Stable digests over canonical JSON.
pub mod hash;
pub mod rng;
/// Canonical JSON and YAML serde helpers.
pub mod serde;

pub use descriptor::{dedup_by_descriptor, Descriptor};
pub use errors::{ErrorInfo, SpgError};
pub use rng::{derive_substream_seed, RngHandle};

/// Value and dimension index of one axis within an emitted point.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AxisPoint {
    /// Demanded axis position.
    pub value: f64,
    /// Index along the dimension that owns the axis.
    pub index: usize,
}

impl AxisPoint {
    /// Creates a new axis entry.
    pub fn new(value: f64, index: usize) -> Self {
        Self { value, index }
    }
}

/// Mapping from axis name to `(value, index)` for every active axis.
///
/// Storage order is by axis name and carries no meaning. Consumers that need
/// the composition's axis order must walk their own ordering and look entries
/// up with [`Position::get`].
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Position {
    entries: BTreeMap<String, AxisPoint>,
}

impl Position {
    /// Creates an empty position.
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts or replaces the entry for `axis`.
    pub fn insert(&mut self, axis: impl Into<String>, value: f64, index: usize) {
        self.entries.insert(axis.into(), AxisPoint::new(value, index));
    }

    /// Returns the entry for `axis`.
    pub fn get(&self, axis: &str) -> Option<AxisPoint> {
        self.entries.get(axis).copied()
    }

    /// Returns the demanded value for `axis`.
    pub fn value(&self, axis: &str) -> Option<f64> {
        self.entries.get(axis).map(|entry| entry.value)
    }

    /// Adds `delta` to the value of `axis`. Returns false when the axis is absent.
    pub fn offset(&mut self, axis: &str, delta: f64) -> bool {
        match self.entries.get_mut(axis) {
            Some(entry) => {
                entry.value += delta;
                true
            }
            None => false,
        }
    }

    /// Number of axes carried by the position.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true when no axis is present.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates entries in storage order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, AxisPoint)> + '_ {
        self.entries
            .iter()
            .map(|(axis, entry)| (axis.as_str(), *entry))
    }
}

/// A primitive producer of positions for a fixed set of axes that move together.
///
/// Implementations validate their parameters at construction and are
/// immutable afterwards, so a single instance may be shared between several
/// compositions.
pub trait LeafGenerator: fmt::Debug + Send + Sync {
    /// Ordered axis names driven by this generator.
    fn axes(&self) -> &[String];

    /// Units, one per axis.
    fn units(&self) -> &[String];

    /// Total number of points.
    fn size(&self) -> usize;

    /// Whether the generator reverses direction on alternate passes.
    fn alternate(&self) -> bool {
        false
    }

    /// Axis values of point `index`, in [`LeafGenerator::axes`] order.
    ///
    /// Returns `None` when `index >= size()`.
    fn values_at(&self, index: usize) -> Option<Vec<f64>>;

    /// Canonical structural descriptor.
    fn descriptor(&self) -> &Descriptor;
}

/// Fresh lazy sequence over the points of one leaf generator.
#[derive(Debug)]
pub struct LeafPoints<'a> {
    generator: &'a dyn LeafGenerator,
    next_index: usize,
}

impl<'a> LeafPoints<'a> {
    /// Starts a new pass over `generator`.
    pub fn new(generator: &'a dyn LeafGenerator) -> Self {
        Self {
            generator,
            next_index: 0,
        }
    }
}

impl Iterator for LeafPoints<'_> {
    type Item = Position;

    fn next(&mut self) -> Option<Self::Item> {
        let index = self.next_index;
        let values = self.generator.values_at(index)?;
        self.next_index += 1;
        let mut position = Position::new();
        for (axis, value) in self.generator.axes().iter().zip(values) {
            position.insert(axis.clone(), value, index);
        }
        Some(position)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.generator.size().saturating_sub(self.next_index);
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for LeafPoints<'_> {}

/// Filter over a subset of axes. Points for which [`Excluder::contains`]
/// returns false are removed from the scan.
pub trait Excluder: fmt::Debug + Send + Sync {
    /// Axes whose values are tested, in the order passed to `contains`.
    fn axes(&self) -> &[String];

    /// Returns true when the coordinates (ordered as [`Excluder::axes`]) are kept.
    fn contains(&self, coordinates: &[f64]) -> bool;

    /// Canonical structural descriptor.
    fn descriptor(&self) -> &Descriptor;
}

/// Deterministic transformation applied to every emitted position.
pub trait Mutator: fmt::Debug + Send + Sync {
    /// Axes the mutator may touch.
    fn axes(&self) -> &[String];

    /// Returns the transformed copy of `position`, the `ordinal`-th emitted point.
    fn mutate(&self, position: Position, ordinal: usize) -> Position;

    /// Canonical structural descriptor.
    fn descriptor(&self) -> &Descriptor;
}
