#![deny(missing_docs)]

//! Leaf generators: primitive producers of positions for axes that move together.
//!
//! Every generator validates its parameters at construction and reports
//! failures as [`SpgError::Configuration`](spg_core::SpgError), so nothing can
//! go wrong once iteration has started.

mod array;
mod config;
mod line;
mod lissajous;
mod spiral;
mod validate;

use serde::{Deserialize, Deserializer};

pub use array::{ArrayGenerator, ArrayParams};
pub use config::GeneratorConfig;
pub use line::{LineGenerator, LineParams};
pub use lissajous::{BoundingBox, LissajousGenerator, LissajousParams};
pub use spiral::{SpiralGenerator, SpiralParams};

#[derive(Deserialize)]
#[serde(untagged)]
enum OneOrMany<T> {
    One(T),
    Many(Vec<T>),
}

/// Accepts either a bare value or a list for single-axis shorthand.
pub(crate) fn one_or_many<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(match OneOrMany::deserialize(deserializer)? {
        OneOrMany::One(value) => vec![value],
        OneOrMany::Many(values) => values,
    })
}
