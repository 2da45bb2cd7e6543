/*!
 * Core types shared by the path source, the ruleset and the matcher
 */

use serde::Serialize;

/// A normalized, slash-separated path to one file
pub type FilePath = String;

/// Rules deciding whether a file is covered
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Inclusion {
    /// Path prefixes taken from the ruleset
    Prefixes(Vec<FilePath>),
    /// Regular expressions supplied by the caller
    Patterns(Vec<String>),
}

/// Partition of the type-filtered files into covered and uncovered
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ScanResult {
    /// Files matched by at least one rule, in walk order
    pub found: Vec<FilePath>,
    /// Files matched by no rule, in walk order
    #[serde(rename = "notFound")]
    pub not_found: Vec<FilePath>,
}

impl ScanResult {
    /// Number of files in the partition
    pub fn total(&self) -> usize {
        self.found.len() + self.not_found.len()
    }

    /// Coverage as a whole percentage, rounded down. Zero when there are no files.
    pub fn percent(&self) -> u32 {
        let total = self.total();
        if total == 0 {
            return 0;
        }
        (self.found.len() * 100 / total) as u32
    }
}
