use std::fmt;
use std::sync::Arc;

use spg_core::{Descriptor, Excluder, LeafGenerator, Mutator, SpgError};

use crate::compose::{CompoundComposer, CompoundGenerator, GeneratorInput};
use crate::iter::CompoundPoints;
use crate::lookahead::LookaheadIterator;
use crate::project::{PairLayout, PositionShape, Projector};

/// Composition points mapped through a [`Projector`].
#[derive(Debug, Clone)]
pub struct ProjectedPoints {
    points: CompoundPoints,
    projector: Projector,
}

impl ProjectedPoints {
    /// Starts a fresh projected pass over `generator`.
    pub fn new(generator: Arc<CompoundGenerator>, layout: PairLayout) -> Self {
        let projector = Projector::new(&generator, layout);
        Self {
            points: CompoundPoints::new(generator),
            projector,
        }
    }
}

impl Iterator for ProjectedPoints {
    type Item = PositionShape;

    fn next(&mut self) -> Option<Self::Item> {
        let position = self.points.next()?;
        Some(self.projector.project(&position))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.points.size_hint()
    }
}

/// Host-facing scan iterator with one point of lookahead.
///
/// Metadata accessors delegate to the prepared composition and are valid in
/// any iteration state.
pub struct ScanPointIterator {
    generator: Arc<CompoundGenerator>,
    layout: PairLayout,
    points: LookaheadIterator<ProjectedPoints>,
}

impl ScanPointIterator {
    /// Prepares a composition and opens an iterator over it.
    pub fn compound(
        inputs: Vec<GeneratorInput>,
        excluders: Vec<Arc<dyn Excluder>>,
        mutators: Vec<Arc<dyn Mutator>>,
        duration: Option<f64>,
    ) -> Result<Self, SpgError> {
        let mut composer = CompoundComposer::new(inputs, excluders, mutators);
        if let Some(duration) = duration {
            composer = composer.with_duration(duration);
        }
        let generator = composer.prepare()?;
        Ok(Self::with_layout(Arc::new(generator), PairLayout::FastFirst))
    }

    /// Opens an iterator over a single leaf generator.
    ///
    /// Two-axis points keep the generator's declared axis order.
    pub fn single(generator: Arc<dyn LeafGenerator>) -> Result<Self, SpgError> {
        let prepared =
            CompoundComposer::new(vec![GeneratorInput::Leaf(generator)], vec![], vec![]).prepare()?;
        Ok(Self::with_layout(Arc::new(prepared), PairLayout::Declared))
    }

    /// Opens an iterator over an already prepared composition.
    pub fn from_generator(generator: Arc<CompoundGenerator>) -> Self {
        Self::with_layout(generator, PairLayout::FastFirst)
    }

    /// Opens an iterator with an explicit pair layout.
    pub fn with_layout(generator: Arc<CompoundGenerator>, layout: PairLayout) -> Self {
        let points = LookaheadIterator::new(ProjectedPoints::new(Arc::clone(&generator), layout));
        Self {
            generator,
            layout,
            points,
        }
    }

    /// Opens a new iterator over the same composition, starting from the first point.
    pub fn fresh(&self) -> Self {
        Self::with_layout(Arc::clone(&self.generator), self.layout)
    }

    /// Returns true when another point is available. Idempotent.
    pub fn has_next(&mut self) -> bool {
        self.points.has_next()
    }

    /// Returns the next point, or `IterationExhausted` after the last one.
    #[allow(clippy::should_implement_trait)]
    pub fn next(&mut self) -> Result<PositionShape, SpgError> {
        self.points.next()
    }

    /// Total number of points.
    pub fn size(&self) -> usize {
        self.generator.size()
    }

    /// Per-dimension point counts.
    pub fn shape(&self) -> Vec<usize> {
        self.generator.shape()
    }

    /// Number of dimensions.
    pub fn rank(&self) -> usize {
        self.generator.rank()
    }

    /// Descriptor of the underlying composition.
    pub fn descriptor(&self) -> &Descriptor {
        self.generator.descriptor()
    }

    /// Axis names grouped by dimension.
    pub fn dimension_names(&self) -> Vec<Vec<String>> {
        self.generator.dimension_names()
    }

    /// The prepared composition.
    pub fn generator(&self) -> &Arc<CompoundGenerator> {
        &self.generator
    }

    /// Pair layout used for two-axis points.
    pub fn layout(&self) -> PairLayout {
        self.layout
    }
}

impl fmt::Debug for ScanPointIterator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ScanPointIterator")
            .field("size", &self.generator.size())
            .field("axes", &self.generator.axis_ordering())
            .field("layout", &self.layout)
            .field("exhausted", &self.points.is_exhausted())
            .finish()
    }
}

impl From<&ScanPointIterator> for GeneratorInput {
    fn from(iterator: &ScanPointIterator) -> Self {
        GeneratorInput::Compound(Arc::clone(&iterator.generator))
    }
}
