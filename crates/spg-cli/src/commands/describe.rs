use std::error::Error;
use std::path::PathBuf;

use clap::Args;
use serde_json::json;
use tracing::info;

use super::read_scan;

#[derive(Args, Debug)]
pub struct DescribeArgs {
    /// YAML scan description.
    #[arg(long)]
    pub config: PathBuf,
}

pub fn run(args: &DescribeArgs) -> Result<(), Box<dyn Error>> {
    let config = read_scan(&args.config)?;
    let scan = config.scan().map_err(|err| Box::new(err) as Box<dyn Error>)?;
    let generator = scan.generator();
    let digest = generator
        .descriptor()
        .digest()
        .map_err(|err| Box::new(err) as Box<dyn Error>)?;

    let summary = json!({
        "config": args.config.display().to_string(),
        "size": generator.size(),
        "shape": generator.shape(),
        "rank": generator.rank(),
        "axis_ordering": generator.axis_ordering(),
        "dimension_names": generator.dimension_names(),
        "duration": generator.duration(),
        "layout": scan.layout(),
        "descriptor_digest": digest,
        "descriptor": generator.descriptor(),
    });
    println!("{}", serde_json::to_string_pretty(&summary)?);
    info!(size = generator.size(), %digest, "described scan");
    Ok(())
}
