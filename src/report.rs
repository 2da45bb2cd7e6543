/*!
 * Reporting functionality for phpcs-coverage
 *
 * Renders a scan result as human-readable text, as a single JSON line, or as
 * the bare coverage percentage.
 */

use serde::Serialize;
use strum::{Display, EnumString};

use crate::types::ScanResult;

/// Format of the report output
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumString, Display)]
#[strum(serialize_all = "lowercase")]
pub enum ReportFormat {
    /// Labeled file lists followed by the coverage line
    Human,
    /// `{"found":[...],"notFound":[...],"percent":N}`
    Json,
    /// Just the coverage percentage
    Percent,
}

/// Shape of the JSON report
#[derive(Serialize)]
struct JsonReport<'a> {
    #[serde(flatten)]
    result: &'a ScanResult,
    percent: u32,
}

/// Report generator for scan results
pub struct Reporter {
    format: ReportFormat,
}

impl Reporter {
    /// Create a new reporter
    pub fn new(format: ReportFormat) -> Self {
        Self { format }
    }

    /// Generate the report text, without a trailing newline
    pub fn generate_report(&self, result: &ScanResult) -> String {
        match self.format {
            ReportFormat::Human => self.generate_human_report(result),
            ReportFormat::Json => self.generate_json_report(result),
            ReportFormat::Percent => result.percent().to_string(),
        }
    }

    /// Print the report to stdout
    pub fn print_report(&self, result: &ScanResult) {
        println!("{}", self.generate_report(result));
    }

    fn generate_human_report(&self, result: &ScanResult) -> String {
        let mut lines = vec!["These files WILL be scanned by phpcs:".to_string()];
        lines.extend(result.found.iter().cloned());
        lines.push(String::new());
        lines.push("These files WILL NOT be scanned by phpcs:".to_string());
        lines.extend(result.not_found.iter().cloned());
        lines.push(String::new());
        lines.push(format!("That's a coverage of {}%", result.percent()));
        lines.join("\n")
    }

    fn generate_json_report(&self, result: &ScanResult) -> String {
        let report = JsonReport {
            result,
            percent: result.percent(),
        };
        // Serializing strings and integers into a String cannot fail
        serde_json::to_string(&report).unwrap_or_default()
    }
}
