use std::sync::Arc;

use spg_core::{Excluder, LeafGenerator};

/// A group of axes sharing one index counter inside a composition.
///
/// Each dimension is owned by exactly one flattened leaf generator. When
/// excluders confined to the dimension's axes were folded in at preparation,
/// `kept` lists the surviving generator indices and the counter runs over
/// those only.
#[derive(Debug, Clone)]
pub struct Dimension {
    axes: Vec<String>,
    generator: usize,
    alternate: bool,
    kept: Option<Vec<usize>>,
    len: usize,
}

impl Dimension {
    pub(crate) fn new(generator: usize, leaf: &dyn LeafGenerator) -> Self {
        Self {
            axes: leaf.axes().to_vec(),
            generator,
            alternate: leaf.alternate(),
            kept: None,
            len: leaf.size(),
        }
    }

    /// Axes of the dimension, in the owning generator's order.
    pub fn axes(&self) -> &[String] {
        &self.axes
    }

    /// Position of the owning generator in the flattened generator list.
    pub fn generator_index(&self) -> usize {
        self.generator
    }

    /// Whether the dimension snakes on alternate passes.
    pub fn alternate(&self) -> bool {
        self.alternate
    }

    /// Number of points visited per pass.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns true when every point was masked out.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns true when at least one excluder was folded into the dimension.
    pub fn is_masked(&self) -> bool {
        self.kept.is_some()
    }

    /// Generator index backing counter value `position`.
    pub(crate) fn point_index(&self, position: usize) -> usize {
        match &self.kept {
            Some(kept) => kept[position],
            None => position,
        }
    }

    /// Restricts the dimension to generator points accepted by every excluder.
    ///
    /// Each excluder's axes must be a subset of the dimension's axes.
    pub(crate) fn apply_mask(&mut self, leaf: &dyn LeafGenerator, excluders: &[Arc<dyn Excluder>]) {
        if excluders.is_empty() {
            return;
        }
        let slots: Vec<Vec<usize>> = excluders
            .iter()
            .map(|excluder| {
                excluder
                    .axes()
                    .iter()
                    .filter_map(|axis| self.axes.iter().position(|own| own == axis))
                    .collect()
            })
            .collect();
        let kept: Vec<usize> = (0..leaf.size())
            .filter(|index| {
                let Some(values) = leaf.values_at(*index) else {
                    return false;
                };
                excluders.iter().zip(&slots).all(|(excluder, slots)| {
                    let coordinates: Vec<f64> = slots.iter().map(|slot| values[*slot]).collect();
                    excluder.contains(&coordinates)
                })
            })
            .collect();
        self.len = kept.len();
        self.kept = Some(kept);
    }
}
