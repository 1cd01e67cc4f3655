//! stdmesh - command-line front end for the standard area mesh codec.

use clap::{Parser, Subcommand, ValueEnum};
use std::io::{self, BufWriter, Write};
use std::process;
use stdmesh_rs::{
    ExtentBounds, ExtentCodes, ExtentOptions, MeshCell, MeshError, MeshLevel, Stepping,
    cover_codes_with, decode, decode_with_level, encode, level_candidates,
};
use tracing::debug;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum CellFormat {
    /// POLYGON((...)) text
    Wkt,
    /// GeoJSON Polygon geometry
    Geojson,
    /// min_lon min_lat max_lon max_lat
    Bounds,
}

#[derive(Parser)]
#[command(name = "stdmesh")]
#[command(about = "Encode, decode and enumerate standard area mesh codes", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print the mesh code containing a coordinate
    Encode {
        /// Longitude in decimal degrees
        #[arg(long, allow_negative_numbers = true)]
        lon: f64,

        /// Latitude in decimal degrees
        #[arg(long, allow_negative_numbers = true)]
        lat: f64,

        /// Mesh level: 1, 2, 3, half, quarter, eighth, 5x, 2x, tenth, twentieth
        #[arg(long)]
        level: MeshLevel,
    },

    /// Print the cell a mesh code denotes
    Decode {
        code: String,

        /// Level of the code, required for 10-digit codes
        #[arg(long)]
        level: Option<MeshLevel>,

        #[arg(long, value_enum, default_value = "wkt")]
        format: CellFormat,
    },

    /// Print the level of a mesh code, or every candidate level when ambiguous
    Detect { code: String },

    /// Print the mesh codes covering an extent, one per line
    Cover {
        #[arg(long, allow_negative_numbers = true)]
        min_lon: f64,

        #[arg(long, allow_negative_numbers = true)]
        min_lat: f64,

        #[arg(long, allow_negative_numbers = true)]
        max_lon: f64,

        #[arg(long, allow_negative_numbers = true)]
        max_lat: f64,

        #[arg(long)]
        level: MeshLevel,

        /// Stop sampling at the max edge instead of one cell past it
        #[arg(long)]
        inclusive: bool,

        /// Compute sample positions from their index instead of accumulating
        #[arg(long)]
        indexed: bool,

        /// Print each code once
        #[arg(long)]
        dedup: bool,

        /// Append the cell polygon as WKT after a tab
        #[arg(long)]
        wkt: bool,
    },
}

fn format_cell(cell: &MeshCell, format: CellFormat) -> String {
    match format {
        CellFormat::Wkt => cell.to_wkt(),
        CellFormat::Geojson => cell.to_geojson(),
        CellFormat::Bounds => format!(
            "{} {} {} {}",
            cell.min_lon, cell.min_lat, cell.max_lon, cell.max_lat
        ),
    }
}

/// `Ok(false)` once the reader has closed the pipe.
fn check_write(result: io::Result<()>) -> Result<bool, MeshError> {
    match result {
        Ok(()) => Ok(true),
        Err(e) if e.kind() == io::ErrorKind::BrokenPipe => Ok(false),
        Err(e) => Err(MeshError::IoError(e.to_string())),
    }
}

fn write_codes<W: Write>(
    out: &mut W,
    codes: ExtentCodes,
    level: MeshLevel,
    wkt: bool,
) -> Result<(), MeshError> {
    for code in codes {
        let code = code?;
        let written = if wkt {
            let cell = decode_with_level(code.as_str(), level)?;
            writeln!(out, "{}\t{}", code, cell.to_wkt())
        } else {
            writeln!(out, "{}", code)
        };
        if !check_write(written)? {
            return Ok(());
        }
    }
    check_write(out.flush()).map(|_| ())
}

fn run(command: Command) -> Result<(), MeshError> {
    match command {
        Command::Encode { lon, lat, level } => {
            println!("{}", encode(lon, lat, level)?);
        }
        Command::Decode {
            code,
            level,
            format,
        } => {
            let cell = match level {
                Some(level) => decode_with_level(&code, level)?,
                None => decode(&code)?,
            };
            println!("{}", format_cell(&cell, format));
        }
        Command::Detect { code } => {
            let tags: Vec<&str> = level_candidates(&code)?
                .iter()
                .map(|level| level.tag())
                .collect();
            println!("{}", tags.join(" "));
        }
        Command::Cover {
            min_lon,
            min_lat,
            max_lon,
            max_lat,
            level,
            inclusive,
            indexed,
            dedup,
            wkt,
        } => {
            let options = ExtentOptions::new()
                .bounds(if inclusive {
                    ExtentBounds::Inclusive
                } else {
                    ExtentBounds::Padded
                })
                .stepping(if indexed {
                    Stepping::Indexed
                } else {
                    Stepping::Accumulated
                })
                .dedup(dedup);
            debug!(?options, "cover");

            let codes = cover_codes_with(min_lon, min_lat, max_lon, max_lat, level, options);
            let stdout = io::stdout();
            write_codes(&mut BufWriter::new(stdout.lock()), codes, level, wkt)?;
        }
    }
    Ok(())
}

fn main() {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli.command) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}
