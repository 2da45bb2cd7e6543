/*!
 * Integration tests for the phpcs-coverage binary
 */

use std::fs::{self, File};
use std::io::{self, Write};
use std::path::Path;
use std::process::{Command, Output, Stdio};

use tempfile::tempdir;

const RULESET: &str = r#"<?xml version="1.0"?>
<ruleset name="Project">
    <file>src/covered</file>
</ruleset>
"#;

fn write_file(root: &Path, rel: &str, content: &str) -> io::Result<()> {
    let path = root.join(rel);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let mut file = File::create(path)?;
    file.write_all(content.as_bytes())
}

fn setup_project() -> io::Result<tempfile::TempDir> {
    let temp_dir = tempdir()?;
    write_file(temp_dir.path(), "phpcs.xml", RULESET)?;
    write_file(temp_dir.path(), "src/covered/a.php", "<?php")?;
    write_file(temp_dir.path(), "src/covered/b.php", "<?php")?;
    write_file(temp_dir.path(), "src/legacy/c.php", "<?php")?;
    write_file(temp_dir.path(), "src/legacy/d.js", "// js")?;
    Ok(temp_dir)
}

/// Run the binary inside `dir` with no piped input
fn run(dir: &Path, args: &[&str]) -> io::Result<Output> {
    Command::new(env!("CARGO_BIN_EXE_phpcs-coverage"))
        .current_dir(dir)
        .args(args)
        .stdin(Stdio::null())
        .output()
}

/// Run the binary inside `dir` with `input` piped on stdin
fn run_with_stdin(dir: &Path, args: &[&str], input: &str) -> io::Result<Output> {
    let mut child = Command::new(env!("CARGO_BIN_EXE_phpcs-coverage"))
        .current_dir(dir)
        .args(args)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()?;

    if let Some(mut stdin) = child.stdin.take() {
        stdin.write_all(input.as_bytes())?;
    }
    child.wait_with_output()
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

#[test]
fn test_json_report() -> io::Result<()> {
    let temp_dir = setup_project()?;
    let output = run(temp_dir.path(), &["--format", "json"])?;

    assert!(output.status.success());
    assert_eq!(
        stdout(&output),
        "{\"found\":[\"src/covered/a.php\",\"src/covered/b.php\"],\"notFound\":[\"src/legacy/c.php\"],\"percent\":66}\n"
    );
    Ok(())
}

#[test]
fn test_percent_report_for_target_argument() -> io::Result<()> {
    let temp_dir = setup_project()?;
    let output = run(temp_dir.path(), &["-f", "percent", "src/.."])?;

    assert!(output.status.success());
    assert_eq!(stdout(&output), "66\n");
    Ok(())
}

#[test]
fn test_human_report() -> io::Result<()> {
    let temp_dir = setup_project()?;
    let output = run(temp_dir.path(), &[])?;

    assert!(output.status.success());
    let text = stdout(&output);
    assert!(text.starts_with("These files WILL be scanned by phpcs:\nsrc/covered/a.php\nsrc/covered/b.php\n"));
    assert!(text.contains("These files WILL NOT be scanned by phpcs:\nsrc/legacy/c.php\n"));
    assert!(text.ends_with("That's a coverage of 66%\n"));
    Ok(())
}

#[test]
fn test_type_and_ignore_flags() -> io::Result<()> {
    let temp_dir = setup_project()?;

    let output = run(temp_dir.path(), &["-t", "js", "-f", "json"])?;
    assert_eq!(
        stdout(&output),
        "{\"found\":[],\"notFound\":[\"src/legacy/d.js\"],\"percent\":0}\n"
    );

    let output = run(temp_dir.path(), &["-i", "legacy", "-f", "percent"])?;
    assert_eq!(stdout(&output), "100\n");
    Ok(())
}

#[test]
fn test_patterns_flag() -> io::Result<()> {
    let temp_dir = setup_project()?;
    let output = run(temp_dir.path(), &["--patterns", r#"["legacy/"]"#, "-f", "json"])?;

    assert!(output.status.success());
    assert_eq!(
        stdout(&output),
        "{\"found\":[\"src/legacy/c.php\"],\"notFound\":[\"src/covered/a.php\",\"src/covered/b.php\"],\"percent\":33}\n"
    );
    Ok(())
}

#[test]
fn test_stdin_patterns_win() -> io::Result<()> {
    let temp_dir = setup_project()?;
    let output = run_with_stdin(
        temp_dir.path(),
        &["--patterns", r#"["legacy/"]"#, "-f", "percent"],
        "[\"a\\\\.php$\", \"b\\\\.php$\"]\n",
    )?;

    assert!(output.status.success());
    assert_eq!(stdout(&output), "66\n");
    Ok(())
}

#[test]
fn test_unknown_format_fails_without_report() -> io::Result<()> {
    let temp_dir = setup_project()?;
    let output = run(temp_dir.path(), &["-f", "yaml"])?;

    assert!(!output.status.success());
    assert!(output.stdout.is_empty());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("An error occurred while scanning the directory .:"));
    assert!(stderr.contains("yaml"));
    Ok(())
}

#[test]
fn test_missing_ruleset_fails_without_report() -> io::Result<()> {
    let temp_dir = setup_project()?;
    fs::remove_file(temp_dir.path().join("phpcs.xml"))?;

    let output = run(temp_dir.path(), &["-f", "json"])?;

    assert!(!output.status.success());
    assert!(output.stdout.is_empty());
    assert!(String::from_utf8_lossy(&output.stderr).contains("phpcs.xml"));
    Ok(())
}

#[test]
fn test_missing_directory_fails() -> io::Result<()> {
    let temp_dir = tempdir()?;
    let output = run(temp_dir.path(), &["nowhere"])?;

    assert!(!output.status.success());
    assert!(output.stdout.is_empty());
    assert!(String::from_utf8_lossy(&output.stderr).contains("An error occurred while scanning the directory nowhere:"));
    Ok(())
}

#[test]
fn test_version_flag() -> io::Result<()> {
    let temp_dir = tempdir()?;
    let output = run(temp_dir.path(), &["-v"])?;

    assert!(output.status.success());
    assert!(stdout(&output).contains(env!("CARGO_PKG_VERSION")));
    Ok(())
}
