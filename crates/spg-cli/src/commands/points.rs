use std::error::Error;
use std::io::{self, Write};
use std::path::PathBuf;

use clap::{Args, ValueEnum};
use spg_compound::ScanPointIterator;
use tracing::info;

use super::read_scan;

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutputFormat {
    /// One JSON object per point.
    Json,
    /// Header row followed by `<axis>,<axis>_index` columns in axis order.
    Csv,
}

#[derive(Args, Debug)]
pub struct PointsArgs {
    /// YAML scan description.
    #[arg(long)]
    pub config: PathBuf,
    /// Stop after this many points.
    #[arg(long)]
    pub limit: Option<usize>,
    /// Output format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Json)]
    pub format: OutputFormat,
}

pub fn run(args: &PointsArgs) -> Result<(), Box<dyn Error>> {
    let config = read_scan(&args.config)?;
    let mut scan = config.scan().map_err(|err| Box::new(err) as Box<dyn Error>)?;
    let limit = args.limit.unwrap_or(usize::MAX);
    let stdout = io::stdout();
    let emitted = match args.format {
        OutputFormat::Json => write_json(&mut scan, limit, stdout.lock())?,
        OutputFormat::Csv => write_csv(&mut scan, limit, stdout.lock())?,
    };
    info!(
        config = %args.config.display(),
        size = scan.size(),
        emitted,
        "wrote scan points"
    );
    Ok(())
}

fn write_json(
    scan: &mut ScanPointIterator,
    limit: usize,
    mut out: impl Write,
) -> Result<usize, Box<dyn Error>> {
    let mut emitted = 0;
    while emitted < limit && scan.has_next() {
        let point = scan.next()?;
        serde_json::to_writer(&mut out, &point)?;
        out.write_all(b"\n")?;
        emitted += 1;
    }
    out.flush()?;
    Ok(emitted)
}

fn write_csv(
    scan: &mut ScanPointIterator,
    limit: usize,
    out: impl Write,
) -> Result<usize, Box<dyn Error>> {
    let axes = scan.generator().axis_ordering().to_vec();
    let mut writer = csv::Writer::from_writer(out);
    let header: Vec<String> = axes
        .iter()
        .flat_map(|axis| [axis.clone(), format!("{axis}_index")])
        .collect();
    writer.write_record(&header)?;

    let mut emitted = 0;
    while emitted < limit && scan.has_next() {
        let point = scan.next()?;
        let mut row = Vec::with_capacity(header.len());
        for axis in &axes {
            row.push(point.value(axis).map(|v| v.to_string()).unwrap_or_default());
            row.push(point.index(axis).map(|i| i.to_string()).unwrap_or_default());
        }
        writer.write_record(&row)?;
        emitted += 1;
    }
    writer.flush()?;
    Ok(emitted)
}
