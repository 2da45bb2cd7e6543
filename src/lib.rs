/*!
 * phpcs-coverage - Find the files a phpcs.xml ruleset does not cover
 *
 * Compares the `<file>` entries of a directory's `phpcs.xml` (or a list of
 * regular expressions) with the files actually present on disk, and splits
 * those files into covered and uncovered.
 */

pub mod config;
pub mod coverage;
pub mod error;
pub mod matcher;
pub mod report;
pub mod ruleset;
pub mod scanner;
pub mod types;
pub mod utils;


// Re-export main components for easier access
pub use config::{Args, ScanOptions};
pub use coverage::CoverageScanner;
pub use error::{CoverageError, Result};
pub use matcher::{filter_by_file_type, partition, Matcher};
pub use report::{ReportFormat, Reporter};
pub use ruleset::{ConfigSource, XmlRuleset};
pub use scanner::{DirectoryWalker, PathSource};
pub use types::{FilePath, Inclusion, ScanResult};

/// Version of the library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
