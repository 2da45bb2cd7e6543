/*!
 * Coverage scan
 *
 * Gathers the real files and the inclusion rules, then partitions the files.
 * Without patterns the directory walk and the ruleset read run side by side
 * and the scan fails if either does.
 */

use std::path::PathBuf;
use std::sync::Arc;

use indicatif::ProgressBar;
use tracing::debug;

use crate::config::ScanOptions;
use crate::error::Result;
use crate::matcher;
use crate::ruleset::{ConfigSource, XmlRuleset};
use crate::scanner::{DirectoryWalker, PathSource};
use crate::types::{Inclusion, ScanResult};
use crate::utils::RULESET_FILE_NAME;

/// Runs one coverage scan over a directory
pub struct CoverageScanner<P = DirectoryWalker, C = XmlRuleset> {
    /// Scan options
    options: ScanOptions,
    /// Where the real files come from
    paths: P,
    /// Where the configured prefixes come from
    rules: C,
    /// Progress bar
    pub progress: Arc<ProgressBar>,
}

impl CoverageScanner {
    /// Create a scanner over the filesystem and the on-disk ruleset
    pub fn new(options: ScanOptions, progress: Arc<ProgressBar>) -> Self {
        let walker = DirectoryWalker::new(Arc::clone(&progress));
        Self::with_sources(options, walker, XmlRuleset, progress)
    }
}

impl<P: PathSource, C: ConfigSource> CoverageScanner<P, C> {
    /// Create a scanner with custom file and ruleset sources
    pub fn with_sources(options: ScanOptions, paths: P, rules: C, progress: Arc<ProgressBar>) -> Self {
        Self {
            options,
            paths,
            rules,
            progress,
        }
    }

    /// Path of the ruleset read when no patterns are given
    pub fn ruleset_path(&self) -> PathBuf {
        self.options.target_dir.join(RULESET_FILE_NAME)
    }

    /// Scan the target directory
    pub fn scan(&self) -> Result<ScanResult> {
        let root = self.options.target_dir.as_path();
        let ignore = self.options.ignore.as_deref();

        let (files, inclusion) = match &self.options.patterns {
            Some(patterns) => {
                self.progress.set_message("Listing files...");
                let files = self.paths.files(root, ignore)?;
                (files, Inclusion::Patterns(patterns.clone()))
            }
            None => {
                let ruleset = self.ruleset_path();
                self.progress
                    .set_message(format!("Listing files and reading {}...", ruleset.display()));

                let (files, prefixes) = rayon::join(
                    || self.paths.files(root, ignore),
                    || self.rules.configured_paths(&ruleset),
                );
                (files?, Inclusion::Prefixes(prefixes?))
            }
        };

        debug!(files = files.len(), "matching files against inclusion rules");
        self.progress.set_message("Matching files...");

        matcher::partition(files, &self.options.file_type, &inclusion)
    }
}
