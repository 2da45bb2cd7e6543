/*!
 * Coverage matching
 *
 * Splits the enumerated files into the ones a ruleset (or a pattern list)
 * covers and the ones it does not. Pure computation: no I/O happens here.
 */

use regex::RegexSet;
use tracing::debug;

use crate::error::Result;
use crate::types::{FilePath, Inclusion, ScanResult};

/// Compiled form of an [`Inclusion`]
#[derive(Debug, Clone)]
pub enum Matcher {
    /// Covered when the path starts with any prefix
    Prefixes(Vec<FilePath>),
    /// Covered when any expression matches somewhere in the path
    Patterns(RegexSet),
}

impl Matcher {
    /// Compile inclusion rules, failing on the first invalid pattern
    pub fn compile(inclusion: &Inclusion) -> Result<Self> {
        match inclusion {
            Inclusion::Prefixes(prefixes) => Ok(Self::Prefixes(prefixes.clone())),
            Inclusion::Patterns(patterns) => Ok(Self::Patterns(RegexSet::new(patterns)?)),
        }
    }

    /// Whether `path` is covered by at least one rule
    pub fn is_covered(&self, path: &str) -> bool {
        match self {
            Self::Prefixes(prefixes) => prefixes.iter().any(|prefix| path.starts_with(prefix.as_str())),
            Self::Patterns(set) => set.is_match(path),
        }
    }
}

/// Keep only paths ending with `file_type`
///
/// This is a plain string suffix test: `"php"` also keeps `notes.xphp`, and a
/// leading dot is not added or stripped.
pub fn filter_by_file_type<I>(file_type: &str, paths: I) -> Vec<FilePath>
where
    I: IntoIterator<Item = FilePath>,
{
    paths
        .into_iter()
        .filter(|path| path.ends_with(file_type))
        .collect()
}

/// Partition `files` into covered and uncovered, after the file type filter
///
/// Both halves keep the order of `files`.
pub fn partition(files: Vec<FilePath>, file_type: &str, inclusion: &Inclusion) -> Result<ScanResult> {
    let matcher = Matcher::compile(inclusion)?;
    let candidates = filter_by_file_type(file_type, files);

    let (found, not_found): (Vec<_>, Vec<_>) = candidates
        .into_iter()
        .partition(|path| matcher.is_covered(path));

    debug!(found = found.len(), not_found = not_found.len(), "partitioned files");

    Ok(ScanResult { found, not_found })
}
