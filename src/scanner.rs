/*!
 * Directory walking
 *
 * Lists the real files under the target directory. Each directory is read one
 * level at a time and its subdirectories are walked in parallel; results are
 * stitched back together in file-name order, so the listing is the same on
 * every run over an unchanged tree.
 */

use std::fs;
use std::io;
use std::path::Path;
use std::sync::Arc;

use indicatif::ProgressBar;
use rayon::prelude::*;
use tracing::debug;
use walkdir::{DirEntry, WalkDir};

use crate::error::{CoverageError, Result, ResultExt};
use crate::types::FilePath;
use crate::utils::{join, normalize};

/// Source of the real files under a directory
pub trait PathSource: Sync {
    /// List every file under `root`, skipping entries whose name contains `ignore`
    fn files(&self, root: &Path, ignore: Option<&str>) -> Result<Vec<FilePath>>;
}

/// Recursive filesystem walker
pub struct DirectoryWalker {
    /// Progress bar, ticked once per listed file
    pub progress: Arc<ProgressBar>,
}

impl Default for DirectoryWalker {
    fn default() -> Self {
        Self::new(Arc::new(ProgressBar::hidden()))
    }
}

impl DirectoryWalker {
    /// Create a new walker
    pub fn new(progress: Arc<ProgressBar>) -> Self {
        Self { progress }
    }

    /// Check if an entry is excluded by the ignore token
    ///
    /// The token is a literal substring of the entry name, the same as the
    /// glob `*token*`. An empty token excludes nothing.
    pub fn should_ignore(&self, name: &str, ignore: Option<&str>) -> bool {
        match ignore {
            Some(token) if !token.is_empty() => name.contains(token),
            _ => false,
        }
    }

    /// Walk `dir`, whose normalized display form is `display`
    fn walk_directory(&self, dir: &Path, display: &str, ignore: Option<&str>) -> Result<Vec<FilePath>> {
        let entries: Vec<DirEntry> = WalkDir::new(dir)
            .min_depth(1)
            .max_depth(1)
            .sort_by_file_name()
            .into_iter()
            .collect::<std::result::Result<_, walkdir::Error>>()
            .map_err(|e| walk_error(dir, e))?;

        let listed: Vec<Vec<FilePath>> = entries
            .par_iter()
            .filter(|entry| !self.should_ignore(&entry.file_name().to_string_lossy(), ignore))
            .map(|entry| {
                let path = join(display, &entry.file_name().to_string_lossy());
                let file_type = entry.file_type();

                if file_type.is_dir() {
                    self.walk_directory(entry.path(), &path, ignore)
                } else if file_type.is_file() {
                    self.progress.inc(1);
                    Ok(vec![path])
                } else {
                    Ok(Vec::new())
                }
            })
            .collect::<Result<_>>()?;

        Ok(listed.into_iter().flatten().collect())
    }
}

impl PathSource for DirectoryWalker {
    fn files(&self, root: &Path, ignore: Option<&str>) -> Result<Vec<FilePath>> {
        let metadata = fs::metadata(root).with_path(root)?;
        if !metadata.is_dir() {
            return Err(CoverageError::Read {
                path: root.to_path_buf(),
                source: io::Error::new(io::ErrorKind::InvalidInput, "not a directory"),
            });
        }

        let display = normalize(&root.to_string_lossy());
        let files = self.walk_directory(root, &display, ignore)?;

        debug!(root = %root.display(), count = files.len(), "listed files");
        Ok(files)
    }
}

/// Map a walkdir failure onto the path it happened at
fn walk_error(dir: &Path, err: walkdir::Error) -> CoverageError {
    let path = err.path().unwrap_or(dir).to_path_buf();
    let source = err
        .into_io_error()
        .unwrap_or_else(|| io::Error::new(io::ErrorKind::Other, "filesystem loop detected"));
    CoverageError::Read { path, source }
}
