//! csv-mask CLI - format-preserving masking of delimited files

use clap::Parser;
use csv_mask::{LayoutDescriptor, MaskReport, Masker, Separator};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

/// Mask sensitive values in delimited text files.
///
/// Each column is classified from a sample of data rows and every value is
/// replaced by a deterministic look-alike of the same shape.
#[derive(Parser, Debug)]
#[command(name = "csv-mask")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Input file(s) to mask
    #[arg(required = true)]
    files: Vec<PathBuf>,

    /// Field separator: '|', ';', ',', or tab ("\t" or "tab")
    #[arg(short = 's', long, default_value = "|")]
    separator: Separator,

    /// First header line (0-based), copied verbatim
    #[arg(long, requires = "header_end")]
    header_start: Option<usize>,

    /// Last header line (0-based, inclusive)
    #[arg(long, requires = "header_start")]
    header_end: Option<usize>,

    /// First data line (0-based)
    #[arg(short = 'd', long, default_value = "0")]
    data_start: usize,

    /// Directory for masked files, written as ANON_<input name>
    #[arg(short = 'o', long, default_value = "output")]
    output_dir: PathBuf,

    /// Number of data lines sampled for type detection
    #[arg(short = 'n', long, default_value = "150")]
    sample_lines: usize,

    /// Print this many (original, masked) preview rows
    #[arg(short = 'p', long, default_value = "0")]
    preview: usize,

    /// Report format: text (default) or json
    #[arg(short = 'f', long, default_value = "text")]
    format: OutputFormat,

    /// More log output (-v info, -vv debug, -vvv trace)
    #[arg(short = 'v', long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Only log errors
    #[arg(short = 'q', long, conflicts_with = "verbose")]
    quiet: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

fn main() -> ExitCode {
    let args = Args::parse();

    if let Err(e) = init_logging(args.verbose, args.quiet) {
        eprintln!("Failed to initialize logging: {e}");
        return ExitCode::FAILURE;
    }

    let mut exit_code = ExitCode::SUCCESS;

    for file in &args.files {
        if let Err(e) = mask_file(file, &args) {
            eprintln!("Error processing {}: {}", file.display(), e);
            exit_code = ExitCode::FAILURE;
        }
    }

    exit_code
}

/// Install the stderr subscriber. `RUST_LOG` overrides the flags.
fn init_logging(verbose: u8, quiet: bool) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level_for(verbose, quiet).as_str()));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init()
}

fn level_for(verbose: u8, quiet: bool) -> tracing::Level {
    match (quiet, verbose) {
        (true, _) => tracing::Level::ERROR,
        (false, 0) => tracing::Level::WARN,
        (false, 1) => tracing::Level::INFO,
        (false, 2) => tracing::Level::DEBUG,
        (false, _) => tracing::Level::TRACE,
    }
}

fn mask_file(path: &Path, args: &Args) -> Result<(), Box<dyn std::error::Error>> {
    let mut layout = LayoutDescriptor::new(args.separator, args.data_start);
    if let (Some(start), Some(end)) = (args.header_start, args.header_end) {
        layout = layout.with_header(start, end);
    }

    let mut masker = Masker::new(layout);
    masker
        .sample_lines(args.sample_lines)
        .preview_rows(args.preview);

    let output = output_path(path, &args.output_dir)?;
    let report = masker.transform_path(path, &output)?;

    match args.format {
        OutputFormat::Text => print_text_output(path, &output, &report),
        OutputFormat::Json => print_json_output(path, &output, &report)?,
    }

    Ok(())
}

fn output_path(input: &Path, output_dir: &Path) -> Result<PathBuf, Box<dyn std::error::Error>> {
    let name = input
        .file_name()
        .ok_or_else(|| format!("{} has no file name", input.display()))?;
    let mut anon = std::ffi::OsString::from("ANON_");
    anon.push(name);
    Ok(output_dir.join(anon))
}

fn print_text_output(path: &Path, output: &Path, report: &MaskReport) {
    println!("File: {}", path.display());
    println!("  Output: {}", output.display());
    if let Some(encoding) = report.encoding {
        println!("  Encoding: {encoding}");
    }
    println!("  Header lines: {}", report.header_lines);
    println!("  Data rows: {}", report.data_rows);
    println!("  Skipped lines: {}", report.skipped_lines);
    println!("  Distinct values: {}", report.distinct_values);
    if report.pass_through > 0 {
        println!("  Passed through: {}", report.pass_through);
    }
    println!("  Column types:");
    for (i, t) in report.column_types.iter() {
        println!("    {}: {}", i + 1, t);
    }

    if !report.preview.is_empty() {
        println!("  Preview:");
        for row in &report.preview {
            println!("    - {}", row.original);
            println!("    + {}", row.masked);
        }
    }

    println!();
}

fn print_json_output(
    path: &Path,
    output: &Path,
    report: &MaskReport,
) -> Result<(), serde_json::Error> {
    let value = serde_json::json!({
        "file": path.display().to_string(),
        "output": output.display().to_string(),
        "report": report,
    });
    println!("{}", serde_json::to_string(&value)?);
    Ok(())
}
