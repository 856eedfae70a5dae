//! ucr-clearance: UCR clearance-rate report processing.
//!
//! Parses the fixed-layout yearly clearance-rate reports into one record per
//! agency and year, computes population-bucket medians for municipal police
//! departments, and writes per-agency JSON documents plus CSV extracts.
//!
//! # Modules
//!
//! - [`report`]: Report parser (line classification, record assembly, field decoding)
//! - [`model`]: Records, crosswalk, output documents and their file formats
//! - [`medians`]: Per-year, per-bucket median computation
//! - [`emit`]: Per-agency document assembly
//! - [`export`]: Output directory writer
//! - [`config`]: YAML run manifest
//! - [`error`]: Error types for ucr-clearance operations

pub mod config;
pub mod emit;
pub mod error;
pub mod export;
pub mod medians;
pub mod model;
pub mod report;

use std::io;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;

pub use error::ClearanceError;

use config::{BuildOverrides, RunConfig};
use export::ExtractOptions;
use report::ReportSource;

/// The ucr-clearance CLI application.
#[derive(Parser)]
#[command(name = "ucr-clearance")]
#[command(version, about)]
#[command(propagate_version = true)]
struct Cli {
    /// Log at debug level (RUST_LOG is ignored when set).
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

/// Available subcommands.
#[derive(Subcommand)]
enum Commands {
    /// Parse reports and write the decoded records as CSV.
    Parse(ParseArgs),
    /// Print the population-bucket median table.
    Medians(MediansArgs),
    /// Run the whole pipeline and write every output into a directory.
    Build(BuildArgs),
}

/// Arguments for the parse subcommand.
#[derive(clap::Args)]
struct ParseArgs {
    /// Report files, as YEAR=PATH or a path whose file name starts with the year.
    #[arg(required = true)]
    reports: Vec<ReportSource>,

    /// Records CSV to write (stdout if omitted).
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Also write one records_<year>.csv per year.
    #[arg(long)]
    split_by_year: bool,

    /// Also write one records_<state>.csv per state.
    #[arg(long)]
    split_by_state: bool,

    /// Directory for the per-year / per-state extracts.
    #[arg(long, env = "UCR_OUTPUT_DIR")]
    out_dir: Option<PathBuf>,
}

/// Arguments for the medians subcommand.
#[derive(clap::Args)]
struct MediansArgs {
    /// Report files, as YEAR=PATH or a path whose file name starts with the year.
    #[arg(required = true)]
    reports: Vec<ReportSource>,

    /// Agency crosswalk CSV.
    #[arg(long, env = "UCR_CROSSWALK")]
    crosswalk: PathBuf,

    /// Output format ('text' or 'json').
    #[arg(long, default_value = "text")]
    output: String,
}

/// Arguments for the build subcommand.
#[derive(clap::Args)]
struct BuildArgs {
    /// Report files, as YEAR=PATH or a path whose file name starts with the year.
    reports: Vec<ReportSource>,

    /// Directory searched recursively for <YEAR>*.txt reports.
    #[arg(long)]
    reports_dir: Option<PathBuf>,

    /// YAML run manifest.
    #[arg(long, env = "UCR_CONFIG")]
    config: Option<PathBuf>,

    /// Agency crosswalk CSV.
    #[arg(long, env = "UCR_CROSSWALK")]
    crosswalk: Option<PathBuf>,

    /// Output directory.
    #[arg(long, env = "UCR_OUTPUT_DIR")]
    out_dir: Option<PathBuf>,

    /// Also write one records_<year>.csv per year.
    #[arg(long)]
    split_by_year: bool,

    /// Also write one records_<state>.csv per state.
    #[arg(long)]
    split_by_state: bool,
}

/// Run the ucr-clearance CLI.
///
/// This is the main entry point for the CLI, called from `main.rs`.
pub fn run() -> Result<(), ClearanceError> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Some(Commands::Parse(args)) => run_parse(args),
        Some(Commands::Medians(args)) => run_medians(args),
        Some(Commands::Build(args)) => run_build(args),
        None => {
            println!("ucr-clearance {}", env!("CARGO_PKG_VERSION"));
            println!();
            println!("UCR clearance-rate report parser and median builder.");
            println!();
            println!("Run 'ucr-clearance --help' for usage information.");
            Ok(())
        }
    }
}

/// Installs the stderr log subscriber.
fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init();
}

/// Execute the parse subcommand.
fn run_parse(args: ParseArgs) -> Result<(), ClearanceError> {
    let records = report::read_reports(&args.reports)?;

    match &args.output {
        Some(path) => {
            model::io_records_csv::write_records_csv(path, &records)?;
            info!("Wrote {} records to {}", records.len(), path.display());
        }
        None => model::io_records_csv::write_records_to(io::stdout().lock(), &records)?,
    }

    let extracts = ExtractOptions {
        split_by_year: args.split_by_year,
        split_by_state: args.split_by_state,
    };
    if extracts.split_by_year || extracts.split_by_state {
        let out_dir = args.out_dir.ok_or_else(|| ClearanceError::ConfigInvalid {
            message: "--out-dir is required with --split-by-year or --split-by-state".into(),
        })?;
        std::fs::create_dir_all(&out_dir).map_err(ClearanceError::Io)?;
        let written = export::write_record_extracts(&out_dir, &records, extracts)?;
        info!("Wrote {} extracts to {}", written.len(), out_dir.display());
    }

    Ok(())
}

/// Execute the medians subcommand.
fn run_medians(args: MediansArgs) -> Result<(), ClearanceError> {
    let output = args.output.as_str();
    if !matches!(output, "text" | "json") {
        return Err(ClearanceError::UnsupportedFormat(format!(
            "'{}' (supported: text, json)",
            output
        )));
    }

    let crosswalk = model::io_crosswalk_csv::read_crosswalk_csv(&args.crosswalk)?;
    let records = report::read_reports(&args.reports)?;
    let table = medians::compute_medians(&records, &crosswalk);

    if output == "json" {
        let json =
            serde_json::to_string_pretty(&table).map_err(|source| ClearanceError::JsonWrite {
                path: PathBuf::from("<stdout>"),
                source,
            })?;
        println!("{}", json);
    } else {
        print!("{}", table);
    }

    Ok(())
}

/// Execute the build subcommand.
fn run_build(args: BuildArgs) -> Result<(), ClearanceError> {
    let manifest = match &args.config {
        Some(path) => RunConfig::load(path)?,
        None => RunConfig::default(),
    };

    let mut reports = args.reports;
    if let Some(dir) = &args.reports_dir {
        reports.extend(discover_or_fail(dir)?);
    }

    let settings = manifest.merge(BuildOverrides {
        reports,
        crosswalk: args.crosswalk,
        out_dir: args.out_dir,
        split_by_year: args.split_by_year,
        split_by_state: args.split_by_state,
    })?;

    let crosswalk = model::io_crosswalk_csv::read_crosswalk_csv(&settings.crosswalk)?;
    let records = report::read_reports(&settings.reports)?;
    let table = medians::compute_medians(&records, &crosswalk);
    let outcome = emit::build_documents(&records, &crosswalk, &table);

    let summary = export::write_outputs(
        &settings.out_dir,
        &records,
        &crosswalk,
        &table,
        &outcome,
        settings.extracts,
    )?;
    print!("{}", summary);

    Ok(())
}

fn discover_or_fail(dir: &Path) -> Result<Vec<ReportSource>, ClearanceError> {
    let found = report::discover_reports(dir)?;
    if found.is_empty() {
        return Err(ClearanceError::InvalidReportInput {
            input: dir.display().to_string(),
            message: "no <YEAR>*.txt reports found".into(),
        });
    }
    info!("Found {} reports under {}", found.len(), dir.display());
    Ok(found)
}
