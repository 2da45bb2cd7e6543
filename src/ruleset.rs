/*!
 * Ruleset resolution
 *
 * Reads `phpcs.xml` and turns its `<file>` entries into path prefixes rooted
 * at the directory holding the ruleset.
 */

use std::fs;
use std::path::{Path, PathBuf};

use quick_xml::events::Event;
use quick_xml::Reader;
use tracing::debug;

use crate::error::{CoverageError, Result, ResultExt};
use crate::types::FilePath;
use crate::utils::{join, normalize, parent_dir};

const ROOT_ELEMENT: &str = "ruleset";
const FILE_ELEMENT: &str = "file";

/// Source of the configured path prefixes
pub trait ConfigSource: Sync {
    /// Resolve the prefixes declared by the ruleset at `ruleset`
    fn configured_paths(&self, ruleset: &Path) -> Result<Vec<FilePath>>;
}

/// Reads prefixes from a phpcs XML ruleset on disk
#[derive(Debug, Clone, Copy, Default)]
pub struct XmlRuleset;

impl ConfigSource for XmlRuleset {
    fn configured_paths(&self, ruleset: &Path) -> Result<Vec<FilePath>> {
        let content = fs::read_to_string(ruleset).with_path(ruleset)?;
        let entries = parse_file_entries(&content, ruleset)?;

        let base = parent_dir(&normalize(&ruleset.to_string_lossy()));
        let paths: Vec<FilePath> = entries.iter().map(|entry| join(&base, entry)).collect();

        debug!(ruleset = %ruleset.display(), count = paths.len(), "resolved configured paths");
        Ok(paths)
    }
}

/// Extract the text of every `<file>` directly under the `<ruleset>` root
///
/// `path` only labels errors. Entries are trimmed, and blank ones are skipped
/// rather than joined as-is: an empty entry would otherwise become a prefix
/// covering the whole ruleset directory.
pub fn parse_file_entries(content: &str, path: &Path) -> Result<Vec<String>> {
    let malformed = |message: String| CoverageError::Ruleset {
        path: PathBuf::from(path),
        message,
    };

    let mut reader = Reader::from_str(content);
    reader.config_mut().trim_text(true);

    let mut open: Vec<String> = Vec::new();
    let mut seen_root = false;
    let mut current: Option<String> = None;
    let mut entries = Vec::new();

    loop {
        let event = match reader.read_event() {
            Ok(event) => event,
            Err(e) => {
                return Err(malformed(format!("{} (at byte {})", e, reader.buffer_position())));
            }
        };

        match event {
            Event::Start(start) => {
                let name = String::from_utf8_lossy(start.name().as_ref()).into_owned();
                if open.is_empty() {
                    if seen_root {
                        return Err(malformed(format!("unexpected second root element <{}>", name)));
                    }
                    seen_root = true;
                }
                if is_file_entry(&open, &name) {
                    current = Some(String::new());
                }
                open.push(name);
            }
            Event::Empty(start) => {
                // `<file/>` carries no path and contributes nothing
                if open.is_empty() {
                    if seen_root {
                        let name = String::from_utf8_lossy(start.name().as_ref()).into_owned();
                        return Err(malformed(format!("unexpected second root element <{}>", name)));
                    }
                    seen_root = true;
                }
            }
            Event::End(_) => {
                let name = open
                    .pop()
                    .ok_or_else(|| malformed("closing tag without an open element".to_string()))?;
                if is_file_entry(&open, &name) {
                    if let Some(text) = current.take() {
                        let text = text.trim();
                        if !text.is_empty() {
                            entries.push(text.to_string());
                        }
                    }
                }
            }
            Event::Text(text) => {
                if open.is_empty() {
                    return Err(malformed("text outside of the root element".to_string()));
                }
                if let Some(buffer) = current.as_mut() {
                    let unescaped = text.unescape().map_err(|e| malformed(e.to_string()))?;
                    buffer.push_str(&unescaped);
                }
            }
            Event::CData(data) => {
                if let Some(buffer) = current.as_mut() {
                    buffer.push_str(&String::from_utf8_lossy(&data.into_inner()));
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }

    if let Some(name) = open.last() {
        return Err(malformed(format!("unexpected end of document inside <{}>", name)));
    }
    if !seen_root {
        return Err(malformed("document has no root element".to_string()));
    }

    Ok(entries)
}

/// `<file>` counts only as a direct child of the `<ruleset>` root
fn is_file_entry(open: &[String], name: &str) -> bool {
    name == FILE_ELEMENT && open.len() == 1 && open[0] == ROOT_ELEMENT
}
