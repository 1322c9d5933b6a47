use std::collections::BTreeMap;
use std::sync::Arc;

use serde_json::{Map, Value};
use spg_core::errors::{ErrorInfo, SpgError};
use spg_core::{dedup_by_descriptor, Descriptor, Excluder, LeafGenerator, Mutator, Position};
use tracing::{debug, warn};

use crate::dimension::Dimension;
use crate::iter::Odometer;

const KIND: &str = "compound";

/// One entry of a composer's generator list.
#[derive(Debug, Clone)]
pub enum GeneratorInput {
    /// A primitive generator, appended as-is.
    Leaf(Arc<dyn LeafGenerator>),
    /// A prepared composition, spliced into the list in place.
    Compound(Arc<CompoundGenerator>),
}

impl GeneratorInput {
    /// Wraps a concrete leaf generator.
    pub fn leaf(generator: impl LeafGenerator + 'static) -> Self {
        GeneratorInput::Leaf(Arc::new(generator))
    }
}

impl From<Arc<dyn LeafGenerator>> for GeneratorInput {
    fn from(generator: Arc<dyn LeafGenerator>) -> Self {
        GeneratorInput::Leaf(generator)
    }
}

impl From<Arc<CompoundGenerator>> for GeneratorInput {
    fn from(generator: Arc<CompoundGenerator>) -> Self {
        GeneratorInput::Compound(generator)
    }
}

impl From<CompoundGenerator> for GeneratorInput {
    fn from(generator: CompoundGenerator) -> Self {
        GeneratorInput::Compound(Arc::new(generator))
    }
}

/// Collects generators and modifiers and prepares them into a
/// [`CompoundGenerator`] exactly once.
#[derive(Debug)]
pub struct CompoundComposer {
    inputs: Vec<GeneratorInput>,
    excluders: Vec<Arc<dyn Excluder>>,
    mutators: Vec<Arc<dyn Mutator>>,
    duration: Option<f64>,
    prepared: bool,
}

impl CompoundComposer {
    /// Creates a composer over `inputs`, outermost first.
    pub fn new(
        inputs: Vec<GeneratorInput>,
        excluders: Vec<Arc<dyn Excluder>>,
        mutators: Vec<Arc<dyn Mutator>>,
    ) -> Self {
        Self {
            inputs,
            excluders,
            mutators,
            duration: None,
            prepared: false,
        }
    }

    /// Sets the per-point duration carried by the prepared composition.
    ///
    /// A negative value leaves the duration unset.
    pub fn with_duration(mut self, duration: f64) -> Self {
        self.duration = Some(duration);
        self
    }

    /// Flattens, deduplicates and validates the inputs.
    ///
    /// A composer prepares once; later calls fail with `already-prepared`
    /// whether or not the first call succeeded.
    pub fn prepare(&mut self) -> Result<CompoundGenerator, SpgError> {
        if self.prepared {
            return Err(SpgError::config(
                "already-prepared",
                "composer has already been prepared",
            ));
        }
        self.prepared = true;

        if self.inputs.is_empty() {
            return Err(SpgError::config("no-generators", "composition needs at least one generator"));
        }
        if let Some(duration) = self.duration.filter(|duration| *duration < 0.0) {
            debug!(duration, "negative duration treated as unset");
            self.duration = None;
        }
        if let Some(duration) = self.duration {
            if !duration.is_finite() || duration == 0.0 {
                return Err(SpgError::Configuration(
                    ErrorInfo::new("bad-duration", "duration must be finite and non-zero")
                        .with_context("duration", duration.to_string()),
                ));
            }
        }

        let mut generators = Vec::new();
        let mut nested_excluders = Vec::new();
        let mut nested_mutators = Vec::new();
        flatten(
            &self.inputs,
            &mut generators,
            &mut nested_excluders,
            &mut nested_mutators,
        );

        let (excluders, dropped_excluders) = dedup_by_descriptor(
            self.excluders.iter().cloned().chain(nested_excluders),
            |excluder| excluder.descriptor(),
        );
        if dropped_excluders > 0 {
            warn!(dropped = dropped_excluders, "dropped duplicate excluders");
        }
        let (mutators, dropped_mutators) = dedup_by_descriptor(
            self.mutators.iter().cloned().chain(nested_mutators),
            |mutator| mutator.descriptor(),
        );
        if dropped_mutators > 0 {
            warn!(dropped = dropped_mutators, "dropped duplicate mutators");
        }

        CompoundGenerator::assemble(generators, excluders, mutators, self.duration)
    }
}

fn flatten(
    inputs: &[GeneratorInput],
    generators: &mut Vec<Arc<dyn LeafGenerator>>,
    excluders: &mut Vec<Arc<dyn Excluder>>,
    mutators: &mut Vec<Arc<dyn Mutator>>,
) {
    for input in inputs {
        match input {
            GeneratorInput::Leaf(leaf) => generators.push(Arc::clone(leaf)),
            GeneratorInput::Compound(compound) => {
                generators.extend(compound.generators.iter().cloned());
                excluders.extend(compound.excluders.iter().cloned());
                mutators.extend(compound.mutators.iter().cloned());
            }
        }
    }
}

/// A prepared, immutable composition of leaf generators and modifiers.
///
/// The generator is re-iterable: every call to
/// [`CompoundPoints::new`](crate::CompoundPoints::new) starts a fresh pass.
#[derive(Debug)]
pub struct CompoundGenerator {
    generators: Vec<Arc<dyn LeafGenerator>>,
    excluders: Vec<Arc<dyn Excluder>>,
    mutators: Vec<Arc<dyn Mutator>>,
    duration: Option<f64>,
    dimensions: Vec<Dimension>,
    axis_ordering: Vec<String>,
    axis_to_dimension: BTreeMap<String, usize>,
    spanning: Vec<Arc<dyn Excluder>>,
    size: usize,
    descriptor: Descriptor,
}

impl CompoundGenerator {
    fn assemble(
        generators: Vec<Arc<dyn LeafGenerator>>,
        excluders: Vec<Arc<dyn Excluder>>,
        mutators: Vec<Arc<dyn Mutator>>,
        duration: Option<f64>,
    ) -> Result<Self, SpgError> {
        let mut dimensions = Vec::with_capacity(generators.len());
        let mut axis_ordering = Vec::new();
        let mut axis_to_dimension: BTreeMap<String, usize> = BTreeMap::new();
        for (index, generator) in generators.iter().enumerate() {
            for axis in generator.axes() {
                if let Some(owner) = axis_to_dimension.get(axis) {
                    return Err(SpgError::Configuration(
                        ErrorInfo::new("overlapping-axes", "axis is declared by two generators")
                            .with_context("axis", axis.clone())
                            .with_context("first", owner.to_string())
                            .with_context("second", index.to_string())
                            .with_hint("give every generator in a composition distinct axis names"),
                    ));
                }
                axis_to_dimension.insert(axis.clone(), index);
                axis_ordering.push(axis.clone());
            }
            dimensions.push(Dimension::new(index, generator.as_ref()));
        }

        for excluder in &excluders {
            check_known_axes("excluder", excluder.axes(), &axis_to_dimension)?;
        }
        for mutator in &mutators {
            check_known_axes("mutator", mutator.axes(), &axis_to_dimension)?;
        }

        let mut folded: Vec<Vec<Arc<dyn Excluder>>> = vec![Vec::new(); dimensions.len()];
        let mut spanning = Vec::new();
        for excluder in &excluders {
            let mut owners = excluder
                .axes()
                .iter()
                .filter_map(|axis| axis_to_dimension.get(axis).copied());
            let first = owners.next();
            match first {
                Some(dimension) if owners.all(|other| other == dimension) => {
                    folded[dimension].push(Arc::clone(excluder));
                }
                _ => spanning.push(Arc::clone(excluder)),
            }
        }
        for (dimension, masks) in dimensions.iter_mut().zip(&folded) {
            dimension.apply_mask(generators[dimension.generator_index()].as_ref(), masks);
        }

        let descriptor = describe(&generators, &excluders, &mutators, duration);
        let mut generator = Self {
            generators,
            excluders,
            mutators,
            duration,
            dimensions,
            axis_ordering,
            axis_to_dimension,
            spanning,
            size: 0,
            descriptor,
        };
        generator.size = generator.count_points()?;

        debug!(
            generators = generator.generators.len(),
            excluders = generator.excluders.len(),
            mutators = generator.mutators.len(),
            "flattened composition"
        );
        debug!(
            dimensions = ?generator.dimension_names(),
            axis_ordering = ?generator.axis_ordering,
            axis_to_dimension = ?generator.axis_to_dimension,
            size = generator.size,
            "prepared composition"
        );
        if let Ok(digest) = generator.descriptor.digest() {
            debug!(%digest, "composition descriptor");
        }
        Ok(generator)
    }

    fn count_points(&self) -> Result<usize, SpgError> {
        let product = self
            .dimensions
            .iter()
            .try_fold(1usize, |acc, dimension| acc.checked_mul(dimension.len()))
            .ok_or_else(|| {
                SpgError::Configuration(
                    ErrorInfo::new("size-overflow", "scan has more points than can be counted")
                        .with_context("shape", format!("{:?}", self.shape())),
                )
            })?;
        if self.spanning.is_empty() {
            return Ok(product);
        }
        let mut odometer = Odometer::new(&self.dimensions);
        let mut count = 0;
        while let Some(counters) = odometer.current() {
            if let Some(candidate) = self.candidate(counters) {
                if self.admits(&candidate) {
                    count += 1;
                }
            }
            odometer.advance();
        }
        Ok(count)
    }

    /// Builds the unmutated position at the given dimension counters.
    pub(crate) fn candidate(&self, counters: &[usize]) -> Option<Position> {
        let mut position = Position::new();
        for (dimension, counter) in self.dimensions.iter().zip(counters) {
            let generator = &self.generators[dimension.generator_index()];
            let values = generator.values_at(dimension.point_index(*counter))?;
            for (axis, value) in dimension.axes().iter().zip(values) {
                position.insert(axis.clone(), value, *counter);
            }
        }
        Some(position)
    }

    /// Evaluates the excluders that span several dimensions.
    pub(crate) fn admits(&self, position: &Position) -> bool {
        self.spanning.iter().all(|excluder| {
            let coordinates: Option<Vec<f64>> = excluder
                .axes()
                .iter()
                .map(|axis| position.value(axis))
                .collect();
            coordinates.is_some_and(|coordinates| excluder.contains(&coordinates))
        })
    }

    /// Applies every mutator, in order, to the `ordinal`-th emitted point.
    pub(crate) fn mutate(&self, position: Position, ordinal: usize) -> Position {
        self.mutators
            .iter()
            .fold(position, |position, mutator| mutator.mutate(position, ordinal))
    }

    /// Flattened leaf generators, outermost first.
    pub fn generators(&self) -> &[Arc<dyn LeafGenerator>] {
        &self.generators
    }

    /// Deduplicated excluders.
    pub fn excluders(&self) -> &[Arc<dyn Excluder>] {
        &self.excluders
    }

    /// Deduplicated mutators, in application order.
    pub fn mutators(&self) -> &[Arc<dyn Mutator>] {
        &self.mutators
    }

    /// Dimensions, outermost first.
    pub fn dimensions(&self) -> &[Dimension] {
        &self.dimensions
    }

    /// All axes, in dimension order.
    pub fn axis_ordering(&self) -> &[String] {
        &self.axis_ordering
    }

    /// Index of the dimension owning each axis.
    pub fn axis_to_dimension(&self) -> &BTreeMap<String, usize> {
        &self.axis_to_dimension
    }

    /// Axis names grouped by dimension.
    pub fn dimension_names(&self) -> Vec<Vec<String>> {
        self.dimensions
            .iter()
            .map(|dimension| dimension.axes().to_vec())
            .collect()
    }

    /// Number of points a full pass emits.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Per-dimension point counts after masking.
    pub fn shape(&self) -> Vec<usize> {
        self.dimensions.iter().map(Dimension::len).collect()
    }

    /// Number of dimensions.
    pub fn rank(&self) -> usize {
        self.dimensions.len()
    }

    /// Per-point duration, when configured.
    pub fn duration(&self) -> Option<f64> {
        self.duration
    }

    /// Canonical structural descriptor.
    pub fn descriptor(&self) -> &Descriptor {
        &self.descriptor
    }
}

fn check_known_axes(
    role: &str,
    axes: &[String],
    known: &BTreeMap<String, usize>,
) -> Result<(), SpgError> {
    match axes.iter().find(|axis| !known.contains_key(*axis)) {
        Some(axis) => Err(SpgError::Configuration(
            ErrorInfo::new("unknown-axis", format!("{role} names an axis no generator declares"))
                .with_context("axis", axis.clone())
                .with_context("role", role),
        )),
        None => Ok(()),
    }
}

fn describe(
    generators: &[Arc<dyn LeafGenerator>],
    excluders: &[Arc<dyn Excluder>],
    mutators: &[Arc<dyn Mutator>],
    duration: Option<f64>,
) -> Descriptor {
    fn values<'a>(descriptors: impl Iterator<Item = &'a Descriptor>) -> Value {
        Value::Array(descriptors.map(|descriptor| descriptor.as_value().clone()).collect())
    }
    let mut fields = Map::new();
    fields.insert(
        "generators".to_owned(),
        values(generators.iter().map(|generator| generator.descriptor())),
    );
    fields.insert(
        "excluders".to_owned(),
        values(excluders.iter().map(|excluder| excluder.descriptor())),
    );
    fields.insert(
        "mutators".to_owned(),
        values(mutators.iter().map(|mutator| mutator.descriptor())),
    );
    fields.insert(
        "duration".to_owned(),
        duration.map(Value::from).unwrap_or(Value::Null),
    );
    Descriptor::from_fields(KIND, fields)
}
