#![deny(missing_docs)]

//! Composition of leaf generators, excluders and mutators into a single
//! scan, projected into per-point output shapes and exposed through a
//! `has_next`/`next` protocol.
//!
//! ```no_run
//! use std::path::Path;
//!
//! let config = spg_compound::load_scan(Path::new("scan.yaml"))?;
//! let mut scan = config.scan()?;
//! while scan.has_next() {
//!     println!("{:?}", scan.next()?);
//! }
//! # Ok::<(), spg_core::SpgError>(())
//! ```

mod compose;
mod config;
mod dimension;
mod iter;
pub mod lookahead;
mod project;
mod scan;

pub use compose::{CompoundComposer, CompoundGenerator, GeneratorInput};
pub use config::{load_scan, InputConfig, ScanConfig};
pub use dimension::Dimension;
pub use iter::CompoundPoints;
pub use lookahead::{LookaheadIterator, PointSource, Pull};
pub use project::{AxisEntry, PairLayout, PositionShape, Projector};
pub use scan::{ProjectedPoints, ScanPointIterator};
