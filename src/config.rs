/*!
 * Configuration handling for phpcs-coverage
 */

use std::io;
use std::path::PathBuf;

use clap::{ArgAction, Parser};

use crate::error;
use crate::error::{CoverageError, Result, ResultExt};
use crate::report::ReportFormat;
use crate::utils::DEFAULT_FILE_TYPE;
use crate::VERSION;

/// Command-line arguments for phpcs-coverage
#[derive(Parser, Debug, Clone)]
#[clap(
    name = "phpcs-coverage",
    version = VERSION,
    about = "Report which files in a directory are covered by its phpcs.xml ruleset",
    long_about = "Compares the <file> entries of <directory>/phpcs.xml (or a list of regex patterns) with the files actually present under <directory>, and lists the files phpcs will and will not scan.\n\nA JSON array of patterns piped on standard input takes precedence over --patterns and the ruleset. Whenever standard input is not a terminal it is read to the end before scanning starts, so redirect it from /dev/null when running under a harness that keeps it open.",
    disable_version_flag = true
)]
pub struct Args {
    /// Target directory containing phpcs.xml
    #[clap(default_value = ".")]
    pub directory_path: String,

    /// File type to check, matched as a plain suffix of the path
    #[clap(short = 't', long = "type", default_value = DEFAULT_FILE_TYPE)]
    pub file_type: String,

    /// Output format: human, json or percent
    #[clap(short = 'f', long, default_value = "human")]
    pub format: String,

    /// Skip files and directories whose name contains this text
    #[clap(short = 'i', long)]
    pub ignore: Option<String>,

    /// JSON array of regex patterns to use instead of the ruleset
    #[clap(long)]
    pub patterns: Option<String>,

    /// Print version
    #[clap(short = 'v', long, action = ArgAction::Version)]
    pub version: Option<bool>,
}

/// Options for a single coverage scan
#[derive(Clone, Debug)]
pub struct ScanOptions {
    /// Directory to scan; the ruleset is read from here
    pub target_dir: PathBuf,

    /// Suffix a path must end with to be considered
    pub file_type: String,

    /// Name fragment excluding files and directories from the walk
    pub ignore: Option<String>,

    /// Report rendering
    pub format: ReportFormat,

    /// Patterns replacing the ruleset, when given
    pub patterns: Option<Vec<String>>,
}

impl ScanOptions {
    /// Build options from command-line arguments and piped standard input
    ///
    /// Patterns from `stdin` win over `--patterns`, which wins over the ruleset.
    /// Blank input counts as no input.
    pub fn from_args(args: Args, stdin: Option<String>) -> Result<Self> {
        let format = args.format.parse::<ReportFormat>().map_err(|_| {
            error!(
                Config,
                "unknown format '{}' (expected human, json or percent)",
                args.format
            )
        })?;

        let piped = stdin
            .map(|input| input.strip_suffix('\n').map(str::to_string).unwrap_or(input))
            .filter(|input| !input.trim().is_empty());

        let patterns = match piped.or(args.patterns) {
            Some(json) => Some(parse_patterns(&json)?),
            None => None,
        };

        Ok(Self {
            target_dir: PathBuf::from(args.directory_path),
            file_type: args.file_type,
            ignore: args.ignore.filter(|token| !token.is_empty()),
            format,
            patterns,
        })
    }

    /// Validate the options before scanning
    pub fn validate(&self) -> Result<()> {
        let metadata = std::fs::metadata(&self.target_dir).with_path(&self.target_dir)?;
        if !metadata.is_dir() {
            return Err(CoverageError::Read {
                path: self.target_dir.clone(),
                source: io::Error::new(io::ErrorKind::InvalidInput, "not a directory"),
            });
        }
        Ok(())
    }
}

/// Parse a JSON array of pattern strings
pub fn parse_patterns(json: &str) -> Result<Vec<String>> {
    Ok(serde_json::from_str(json)?)
}
