/*!
 * Command-line interface for phpcs-coverage
 */

use std::io::{self, IsTerminal, Read};
use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use tracing_subscriber::EnvFilter;

use phpcs_coverage::config::{Args, ScanOptions};
use phpcs_coverage::coverage::CoverageScanner;
use phpcs_coverage::error::{Result, ResultExt};
use phpcs_coverage::report::{ReportFormat, Reporter};

/// Environment variable holding the log filter
const LOG_ENV: &str = "PHPCS_COVERAGE_LOG";

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(io::stderr)
        .init();

    // Parse command line arguments (exits on --help / --version)
    let args = Args::parse();
    let target = args.directory_path.clone();

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("An error occurred while scanning the directory {}:", target);
            eprintln!("{}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(args: Args) -> Result<()> {
    let stdin = read_piped_stdin()?;

    // Create and validate the scan options
    let options = ScanOptions::from_args(args, stdin)?;
    options.validate()?;

    let progress = if options.format == ReportFormat::Human {
        let progress = ProgressBar::new_spinner();
        if let Ok(style) = ProgressStyle::default_spinner().template("{spinner:.green} {msg} ({pos} files)") {
            progress.set_style(style);
        }
        progress.enable_steady_tick(Duration::from_millis(100));
        progress
    } else {
        ProgressBar::hidden()
    };

    let reporter = Reporter::new(options.format);
    let scanner = CoverageScanner::new(options, Arc::new(progress.clone()));
    let result = scanner.scan();

    // Clear the spinner before anything is printed
    progress.finish_and_clear();

    reporter.print_report(&result?);
    Ok(())
}

/// Read standard input when it is piped rather than a terminal
fn read_piped_stdin() -> Result<Option<String>> {
    let mut stdin = io::stdin();
    if stdin.is_terminal() {
        return Ok(None);
    }

    let mut input = String::new();
    stdin.read_to_string(&mut input).with_path("<stdin>")?;
    Ok(Some(input))
}
