use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;

use trackviz::config::{
    BoundaryPolicy, ColumnScheme, ConfigOverrides, TrackVizConfig, WhiskerLength,
};
use trackviz::output::{AlignedRow, OutputFormat, create_formatter, summary_text};
use trackviz::track::load_track;
use trackviz::view::TrackView;

#[derive(Parser, Debug)]
#[command(name = "trackviz")]
#[command(about = "Align GPS track headings and print the corrected track", long_about = None)]
struct Args {
    /// CSV track file
    file: PathBuf,

    /// Output format: text, csv, json
    #[arg(short = 'f', long, value_enum, default_value = "text")]
    format: OutputFormat,

    /// TOML configuration file
    #[arg(short = 'c', long)]
    config: Option<PathBuf>,

    /// Samples to move headings by (overrides config)
    #[arg(long, allow_hyphen_values = true)]
    shift: Option<i32>,

    /// Boundary policy for positions without a shifted heading
    #[arg(short = 'b', long, value_enum)]
    boundary: Option<BoundaryPolicy>,

    /// Column naming scheme
    #[arg(long, value_enum)]
    columns: Option<ColumnScheme>,

    /// Whisker length, e.g. "0.000005" (degrees) or "0.5m"
    #[arg(long)]
    whisker_length: Option<WhiskerLength>,

    /// Print only the track summary, in the chosen format
    #[arg(long)]
    summary: bool,

    /// Increase output verbosity
    #[arg(short = 'v', long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let log_level = match args.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    let mut config = match &args.config {
        Some(path) => TrackVizConfig::from_file(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => TrackVizConfig::default(),
    };
    config.apply_overrides(&ConfigOverrides {
        shift: args.shift,
        boundary: args.boundary,
        columns: args.columns,
        whisker_length: args.whisker_length,
    });

    let samples = load_track(&args.file, &config.columns)
        .with_context(|| format!("Failed to load track {}", args.file.display()))?;
    let view = TrackView::new(samples, &config)?;

    let formatter = create_formatter(args.format, args.verbose > 0);

    if args.summary {
        match view.summary() {
            Some(summary) => println!("{}", formatter.summary(summary)),
            None => log::warn!("Track {} has no points", args.file.display()),
        }
        return Ok(());
    }

    match view.summary() {
        Some(summary) => eprintln!("{}\n", summary_text(summary)),
        None => log::warn!("Track {} has no points", args.file.display()),
    }

    log::info!(
        "Heading shift {:+}, boundary {:?}",
        view.aligner().shift(),
        view.aligner().boundary()
    );

    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());

    if let Some(header) = formatter.header() {
        writeln!(out, "{}", header)?;
    }
    for row in AlignedRow::pair(
        view.recorded(),
        view.aligned(),
        config.plot.whisker_length_deg,
    ) {
        writeln!(out, "{}", formatter.format(&row))?;
    }
    out.flush()?;

    Ok(())
}
