use serde::{Deserialize, Serialize};
use spg_core::errors::{ErrorInfo, SpgError};
use spg_core::{Descriptor, Excluder};
use tracing::debug;

use crate::roi::Region;

const KIND: &str = "roi-excluder";

/// Parameters of an [`RoiExcluder`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoiExcluderParams {
    /// Regions; a point is kept when any of them contains it.
    pub regions: Vec<Region>,
    /// The two axes projected onto the region plane, first axis first.
    pub axes: Vec<String>,
}

/// Keeps points whose projection onto two axes falls inside any region.
#[derive(Debug, Clone)]
pub struct RoiExcluder {
    params: RoiExcluderParams,
    descriptor: Descriptor,
}

impl RoiExcluder {
    /// Validates the regions and axis pair.
    pub fn new(regions: Vec<Region>, axes: Vec<String>) -> Result<Self, SpgError> {
        if axes.len() != 2 || axes[0] == axes[1] {
            return Err(SpgError::Configuration(
                ErrorInfo::new("bad-axis-pair", "roi excluder needs two distinct axes")
                    .with_context("axes", axes.join(",")),
            ));
        }
        if regions.is_empty() {
            return Err(SpgError::Configuration(
                ErrorInfo::new("no-regions", "roi excluder needs at least one region")
                    .with_context("axes", axes.join(",")),
            ));
        }
        for region in &regions {
            region.validate()?;
        }
        let params = RoiExcluderParams { regions, axes };
        let descriptor = Descriptor::tagged(KIND, &params)?;
        debug!(axes = ?params.axes, regions = params.regions.len(), "constructed roi excluder");
        Ok(Self { params, descriptor })
    }

    /// Returns the validated parameters.
    pub fn params(&self) -> &RoiExcluderParams {
        &self.params
    }

    /// Regions tested by the excluder.
    pub fn regions(&self) -> &[Region] {
        &self.params.regions
    }
}

impl Excluder for RoiExcluder {
    fn axes(&self) -> &[String] {
        &self.params.axes
    }

    fn contains(&self, coordinates: &[f64]) -> bool {
        match coordinates {
            [x, y, ..] => self
                .params
                .regions
                .iter()
                .any(|region| region.contains(*x, *y)),
            _ => false,
        }
    }

    fn descriptor(&self) -> &Descriptor {
        &self.descriptor
    }
}

/// A region bound to the scan axes it constrains.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScanRegion {
    /// The region of interest.
    pub region: Region,
    /// Axes the region is expressed in.
    pub axes: Vec<String>,
}

/// Groups scan regions into excluders keyed by axis list.
///
/// A region joins the first group whose axes it covers; otherwise it opens a
/// new group under its own axes. Group order follows first appearance.
pub fn group_regions(regions: &[ScanRegion]) -> Result<Vec<RoiExcluder>, SpgError> {
    let mut groups: Vec<(Vec<String>, Vec<Region>)> = Vec::new();
    for scan_region in regions {
        let existing = groups.iter_mut().find(|(key, _)| {
            key.iter()
                .all(|axis| scan_region.axes.iter().any(|candidate| candidate == axis))
        });
        match existing {
            Some((_, members)) => members.push(scan_region.region.clone()),
            None => groups.push((scan_region.axes.clone(), vec![scan_region.region.clone()])),
        }
    }
    groups
        .into_iter()
        .map(|(axes, members)| RoiExcluder::new(members, axes))
        .collect()
}
