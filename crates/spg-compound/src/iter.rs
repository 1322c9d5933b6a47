use std::sync::Arc;

use spg_core::Position;

use crate::compose::CompoundGenerator;
use crate::dimension::Dimension;

/// Mixed-radix counter over dimension lengths, last dimension fastest.
#[derive(Debug, Clone)]
pub(crate) struct Odometer {
    lengths: Vec<usize>,
    counters: Vec<usize>,
    done: bool,
}

impl Odometer {
    pub(crate) fn new(dimensions: &[Dimension]) -> Self {
        let lengths: Vec<usize> = dimensions.iter().map(Dimension::len).collect();
        let done = lengths.is_empty() || lengths.contains(&0);
        Self {
            counters: vec![0; lengths.len()],
            lengths,
            done,
        }
    }

    pub(crate) fn current(&self) -> Option<&[usize]> {
        if self.done {
            None
        } else {
            Some(&self.counters)
        }
    }

    pub(crate) fn advance(&mut self) {
        for slot in (0..self.counters.len()).rev() {
            self.counters[slot] += 1;
            if self.counters[slot] < self.lengths[slot] {
                return;
            }
            self.counters[slot] = 0;
        }
        self.done = true;
    }

    /// Counters with snaking dimensions reversed on odd passes.
    ///
    /// The pass number of a dimension is the flat index of its enclosing
    /// loops; only its parity matters, so wrapping arithmetic is sufficient.
    pub(crate) fn visited(&self, dimensions: &[Dimension]) -> Vec<usize> {
        let mut outer = 0usize;
        self.counters
            .iter()
            .zip(&self.lengths)
            .zip(dimensions)
            .enumerate()
            .map(|(slot, ((counter, length), dimension))| {
                let visited = if slot > 0 && dimension.alternate() && outer % 2 == 1 {
                    length - 1 - counter
                } else {
                    *counter
                };
                outer = outer.wrapping_mul(*length).wrapping_add(*counter);
                visited
            })
            .collect()
    }
}

/// Lazy pass over a prepared composition, yielding mutated positions.
///
/// Each value owns its cursor; start another pass with a new value.
#[derive(Debug, Clone)]
pub struct CompoundPoints {
    generator: Arc<CompoundGenerator>,
    odometer: Odometer,
    emitted: usize,
}

impl CompoundPoints {
    /// Starts a fresh pass over `generator`.
    pub fn new(generator: Arc<CompoundGenerator>) -> Self {
        let odometer = Odometer::new(generator.dimensions());
        Self {
            generator,
            odometer,
            emitted: 0,
        }
    }
}

impl Iterator for CompoundPoints {
    type Item = Position;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            self.odometer.current()?;
            let counters = self.odometer.visited(self.generator.dimensions());
            self.odometer.advance();
            let candidate = self.generator.candidate(&counters)?;
            if !self.generator.admits(&candidate) {
                continue;
            }
            let ordinal = self.emitted;
            self.emitted += 1;
            return Some(self.generator.mutate(candidate, ordinal));
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.generator.size().saturating_sub(self.emitted);
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for CompoundPoints {}
