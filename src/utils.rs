/*!
 * Path helpers for phpcs-coverage
 *
 * Ruleset prefixes and enumerated files are compared as plain strings, so both
 * sides are produced through the same lexical normalization here. Nothing in
 * this module touches the filesystem.
 */

/// Name of the ruleset file looked up in the target directory
pub const RULESET_FILE_NAME: &str = "phpcs.xml";

/// File type scanned when none is given
pub const DEFAULT_FILE_TYPE: &str = "php";

/// Lexically normalize a slash-separated path
///
/// Backslashes are treated as separators, `.` segments and repeated
/// separators are dropped and `..` consumes the previous segment. A trailing
/// separator survives, since a ruleset entry like `src/` must keep matching
/// only below `src`.
pub fn normalize(path: &str) -> String {
    let path = path.replace('\\', "/");
    if path.is_empty() {
        return ".".to_string();
    }

    let absolute = path.starts_with('/');
    let trailing = path.ends_with('/');

    let mut segments: Vec<&str> = Vec::new();
    for segment in path.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                if segments.last().is_some_and(|last| *last != "..") {
                    segments.pop();
                } else if !absolute {
                    segments.push("..");
                }
            }
            _ => segments.push(segment),
        }
    }

    let mut normalized = segments.join("/");
    if normalized.is_empty() {
        if absolute {
            return "/".to_string();
        }
        return if trailing { "./" } else { "." }.to_string();
    }

    if trailing {
        normalized.push('/');
    }
    if absolute {
        normalized.insert(0, '/');
    }
    normalized
}

/// Join `rel` onto `base` and normalize the result
pub fn join(base: &str, rel: &str) -> String {
    let parts: Vec<&str> = [base, rel]
        .into_iter()
        .filter(|part| !part.is_empty())
        .collect();
    normalize(&parts.join("/"))
}

/// Directory portion of a normalized path (`.` when there is none)
pub fn parent_dir(path: &str) -> String {
    let trimmed = path.trim_end_matches('/');
    if trimmed.is_empty() {
        return if path.starts_with('/') { "/" } else { "." }.to_string();
    }

    match trimmed.rfind('/') {
        Some(0) => "/".to_string(),
        Some(idx) => trimmed[..idx].to_string(),
        None => ".".to_string(),
    }
}
