use std::error::Error;
use std::path::Path;

use spg_compound::{load_scan, ScanConfig};

pub mod describe;
pub mod points;

pub(crate) fn read_scan(path: &Path) -> Result<ScanConfig, Box<dyn Error>> {
    load_scan(path).map_err(|err| Box::new(err) as Box<dyn Error>)
}
