//! One-item lookahead over a pull-based source.

use spg_core::errors::{ErrorInfo, SpgError};

/// Result of pulling from a [`PointSource`].
#[derive(Debug, Clone, PartialEq)]
pub enum Pull<T> {
    /// The next item of the sequence.
    Item(T),
    /// The sequence has no further items.
    EndOfSequence,
}

impl<T> From<Option<T>> for Pull<T> {
    fn from(item: Option<T>) -> Self {
        match item {
            Some(item) => Pull::Item(item),
            None => Pull::EndOfSequence,
        }
    }
}

/// A lazy sequence consumed one item at a time.
pub trait PointSource {
    /// Item type produced by the source.
    type Item;

    /// Produces the next item, or signals the end of the sequence.
    fn pull(&mut self) -> Pull<Self::Item>;
}

impl<I: Iterator> PointSource for I {
    type Item = I::Item;

    fn pull(&mut self) -> Pull<Self::Item> {
        self.next().into()
    }
}

#[derive(Debug)]
enum State<T> {
    Empty,
    Peeked(T),
    Exhausted,
}

/// Bridges a [`PointSource`] to the `has_next`/`next` protocol.
///
/// At most one item is held back. `has_next` pulls only when nothing is
/// cached, so repeated calls never skip items, and `next` after the end
/// reports [`SpgError::IterationExhausted`] every time.
pub struct LookaheadIterator<S: PointSource> {
    source: S,
    state: State<S::Item>,
}

impl<S: PointSource> LookaheadIterator<S> {
    /// Wraps `source` without pulling from it.
    pub fn new(source: S) -> Self {
        Self {
            source,
            state: State::Empty,
        }
    }

    /// Returns true when another item is available.
    pub fn has_next(&mut self) -> bool {
        match self.state {
            State::Peeked(_) => true,
            State::Exhausted => false,
            State::Empty => match self.source.pull() {
                Pull::Item(item) => {
                    self.state = State::Peeked(item);
                    true
                }
                Pull::EndOfSequence => {
                    self.state = State::Exhausted;
                    false
                }
            },
        }
    }

    /// Consumes and returns the next item.
    #[allow(clippy::should_implement_trait)]
    pub fn next(&mut self) -> Result<S::Item, SpgError> {
        match std::mem::replace(&mut self.state, State::Empty) {
            State::Peeked(item) => Ok(item),
            State::Empty => match self.source.pull() {
                Pull::Item(item) => Ok(item),
                Pull::EndOfSequence => {
                    self.state = State::Exhausted;
                    Err(exhausted())
                }
            },
            State::Exhausted => {
                self.state = State::Exhausted;
                Err(exhausted())
            }
        }
    }

    /// Returns true once the end of the source has been observed.
    pub fn is_exhausted(&self) -> bool {
        matches!(self.state, State::Exhausted)
    }
}

fn exhausted() -> SpgError {
    SpgError::IterationExhausted(ErrorInfo::new("exhausted", "no more points in the scan"))
}
