//! Test helpers for integration tests

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tempfile::TempDir;

/// A test project with git history, a local bare remote, a stub packager,
/// a companion project, and an external destination tree
pub struct TestProject {
  _root: TempDir,
  _companion_root: TempDir,
  _destination_root: TempDir,
  _remote_root: TempDir,
  pub path: PathBuf,
  pub companion: PathBuf,
  pub destination: PathBuf,
  pub remote: PathBuf,
}

impl TestProject {
  /// Create a fully wired project at `version`, with the companion at
  /// `companion_version`, everything committed and pushed
  pub fn new(version: &str, companion_version: &str) -> Result<Self> {
    let root = TempDir::new()?;
    let companion_root = TempDir::new()?;
    let destination_root = TempDir::new()?;
    let remote_root = TempDir::new()?;

    let path = root.path().to_path_buf();
    let companion = companion_root.path().to_path_buf();
    let destination = destination_root.path().to_path_buf();
    let remote = remote_root.path().to_path_buf();

    // Local bare remote so pushes stay on disk
    git(&remote, &["init", "--bare", "--initial-branch=main"])?;

    git(&path, &["init", "--initial-branch=main"])?;
    git(&path, &["config", "user.name", "Test User"])?;
    git(&path, &["config", "user.email", "test@example.com"])?;
    git(&path, &["config", "push.default", "current"])?;
    git(&path, &["remote", "add", "origin", &remote.to_string_lossy()])?;

    std::fs::write(path.join("version.txt"), version)?;
    std::fs::write(path.join("myapp.spec"), "# packager build instruction\n")?;
    std::fs::write(path.join(".gitignore"), "build/\ndist/\nfile_version_info.txt\n")?;

    // Stub packager: produces the bundle layout the real packager would
    std::fs::write(
      path.join("packager.sh"),
      r#"#!/bin/sh
mkdir -p dist/myapp/_internal
printf 'binary' > dist/myapp/myapp.exe
printf 'data' > dist/myapp/_internal/data.bin
"#,
    )?;

    std::fs::write(
      path.join("shipway.toml"),
      format!(
        r#"[app]
name = "myapp"
company = "Acme"
copyright = "© Acme 2025"

[packager]
command = "sh"
args = ["packager.sh"]
spec = "myapp.spec"

[companion]
path = "{companion}"
name = "companion"

[layout]
destination = "{destination}"
"#,
        companion = companion.display(),
        destination = destination.display(),
      ),
    )?;

    // Companion subsystem: its own version file and latest output
    std::fs::write(companion.join("version.txt"), companion_version)?;
    std::fs::create_dir_all(companion.join("dist/latest"))?;
    std::fs::write(companion.join("dist/latest/config.dat"), "companion data")?;

    git(&path, &["add", "."])?;
    git(&path, &["commit", "-m", "Initial project setup"])?;
    git(&path, &["push", "origin", "main"])?;

    Ok(Self {
      _root: root,
      _companion_root: companion_root,
      _destination_root: destination_root,
      _remote_root: remote_root,
      path,
      companion,
      destination,
      remote,
    })
  }

  /// Overwrite version.txt, leaving the working tree dirty
  pub fn bump_version(&self, version: &str) -> Result<()> {
    std::fs::write(self.path.join("version.txt"), version)?;
    Ok(())
  }

  /// Replace the stub packager script
  pub fn set_packager_script(&self, script: &str) -> Result<()> {
    std::fs::write(self.path.join("packager.sh"), script)?;
    Ok(())
  }

  /// Tags present in the local repository
  pub fn tags(&self) -> Result<Vec<String>> {
    let output = git(&self.path, &["tag", "-l"])?;
    Ok(
      String::from_utf8_lossy(&output.stdout)
        .lines()
        .map(String::from)
        .collect(),
    )
  }

  /// Tags present on the bare remote
  pub fn remote_tags(&self) -> Result<Vec<String>> {
    let output = git(&self.remote, &["tag", "-l"])?;
    Ok(
      String::from_utf8_lossy(&output.stdout)
        .lines()
        .map(String::from)
        .collect(),
    )
  }

  /// Number of commits on the current branch
  pub fn commit_count(&self) -> Result<usize> {
    let output = git(&self.path, &["rev-list", "--count", "HEAD"])?;
    Ok(String::from_utf8_lossy(&output.stdout).trim().parse()?)
  }

  /// Subject of the most recent commit
  pub fn last_commit_message(&self) -> Result<String> {
    let output = git(&self.path, &["log", "-1", "--format=%s"])?;
    Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
  }

  /// Check if a file exists relative to the project root
  pub fn file_exists(&self, path: &str) -> bool {
    self.path.join(path).exists()
  }

  /// Read a file relative to the project root
  pub fn read_file(&self, path: &str) -> Result<String> {
    Ok(std::fs::read_to_string(self.path.join(path))?)
  }
}

/// Run git command in a directory
pub fn git(cwd: &Path, args: &[&str]) -> Result<Output> {
  let output = Command::new("git")
    .current_dir(cwd)
    .args(args)
    .output()
    .context("Failed to run git command")?;

  if !output.status.success() {
    let stderr = String::from_utf8_lossy(&output.stderr);
    anyhow::bail!("Git command failed: git {}\n{}", args.join(" "), stderr);
  }

  Ok(output)
}

/// Run the shipway binary, failing the test on a nonzero exit
pub fn run_shipway(cwd: &Path, args: &[&str]) -> Result<Output> {
  let output = run_shipway_raw(cwd, args)?;

  if !output.status.success() {
    let stderr = String::from_utf8_lossy(&output.stderr);
    let stdout = String::from_utf8_lossy(&output.stdout);
    anyhow::bail!(
      "shipway command failed: shipway {}\nstdout: {}\nstderr: {}",
      args.join(" "),
      stdout,
      stderr
    );
  }

  Ok(output)
}

/// Run the shipway binary without asserting on the exit status
pub fn run_shipway_raw(cwd: &Path, args: &[&str]) -> Result<Output> {
  let shipway_bin = env!("CARGO_BIN_EXE_shipway");

  Command::new(shipway_bin)
    .current_dir(cwd)
    .args(args)
    .output()
    .context("Failed to run shipway")
}
