//! Integration tests for `shipway build`

use crate::helpers::{run_shipway, run_shipway_raw, TestProject};
use anyhow::Result;
use std::fs;
use std::path::Path;

/// Sorted relative file paths under a tree
fn file_list(root: &Path) -> Vec<String> {
  let mut files = Vec::new();
  collect(root, root, &mut files);
  files.sort();
  files
}

fn collect(root: &Path, dir: &Path, out: &mut Vec<String>) {
  for entry in fs::read_dir(dir).unwrap() {
    let entry = entry.unwrap();
    if entry.file_type().unwrap().is_dir() {
      collect(root, &entry.path(), out);
    } else {
      out.push(entry.path().strip_prefix(root).unwrap().to_string_lossy().to_string());
    }
  }
}

#[test]
fn test_build_full_pipeline() -> Result<()> {
  // Version bumped after initial commit, so the working tree is dirty
  let project = TestProject::new("1.0.0", "3.4.0")?;
  project.bump_version("1.2.0")?;

  run_shipway(&project.path, &["build"])?;

  // Release directory holds the bundle, companion artifacts, and descriptor
  assert_eq!(project.read_file("dist/v1.2.0/myapp.exe")?, "binary");
  assert_eq!(project.read_file("dist/v1.2.0/_internal/data.bin")?, "data");
  assert_eq!(project.read_file("dist/v1.2.0/config.dat")?, "companion data");
  assert_eq!(
    project.read_file("dist/v1.2.0/version.txt")?,
    "myapp v.1.2.0\ncompanion v.3.4.0"
  );

  // Latest mirrors the release byte-for-byte
  let release = project.path.join("dist/v1.2.0");
  let latest = project.path.join("dist/latest");
  assert_eq!(file_list(&release), file_list(&latest));
  for file in file_list(&release) {
    assert_eq!(fs::read(release.join(&file))?, fs::read(latest.join(&file))?);
  }

  // Destination received the merged tree
  assert_eq!(fs::read_to_string(project.destination.join("myapp.exe"))?, "binary");
  assert_eq!(fs::read_to_string(project.destination.join("config.dat"))?, "companion data");
  assert_eq!(
    fs::read_to_string(project.destination.join("version.txt"))?,
    "myapp v.1.2.0\ncompanion v.3.4.0"
  );

  // Version bump committed and pushed, tag created locally and on the remote
  assert_eq!(project.last_commit_message()?, "Release v1.2.0");
  assert!(project.tags()?.contains(&"v1.2.0".to_string()));
  assert!(project.remote_tags()?.contains(&"v1.2.0".to_string()));

  Ok(())
}

#[test]
fn test_build_clean_tree_skips_commit_but_tags() -> Result<()> {
  // version.txt was committed at setup; nothing is dirty
  let project = TestProject::new("1.0.0", "3.4.0")?;
  let commits_before = project.commit_count()?;

  run_shipway(&project.path, &["build"])?;

  assert_eq!(project.commit_count()?, commits_before);
  assert!(project.tags()?.contains(&"v1.0.0".to_string()));
  assert!(project.remote_tags()?.contains(&"v1.0.0".to_string()));

  Ok(())
}

#[test]
fn test_build_no_publish_skips_git_entirely() -> Result<()> {
  let project = TestProject::new("1.0.0", "3.4.0")?;
  project.bump_version("1.1.0")?;

  run_shipway(&project.path, &["build", "--no-publish"])?;

  assert!(project.file_exists("dist/v1.1.0/myapp.exe"));
  assert!(project.file_exists("dist/latest/myapp.exe"));
  assert!(project.tags()?.is_empty());
  assert_eq!(project.last_commit_message()?, "Initial project setup");

  Ok(())
}

#[test]
fn test_build_rerun_fails_on_existing_tag() -> Result<()> {
  let project = TestProject::new("1.0.0", "3.4.0")?;
  run_shipway(&project.path, &["build"])?;

  let output = run_shipway_raw(&project.path, &["build"])?;
  assert!(!output.status.success());
  // External tool failure exit class
  assert_eq!(output.status.code(), Some(2));
  let stderr = String::from_utf8_lossy(&output.stderr);
  assert!(stderr.contains("v1.0.0"), "stderr should name the tag: {}", stderr);
  assert!(stderr.contains("already exists"), "stderr: {}", stderr);

  Ok(())
}

#[test]
fn test_build_packager_failure_aborts_and_preserves_latest() -> Result<()> {
  let project = TestProject::new("1.0.0", "3.4.0")?;
  run_shipway(&project.path, &["build", "--no-publish"])?;

  // Break the packager and try to build the next version
  project.set_packager_script("#!/bin/sh\necho 'ERROR: build exploded' >&2\nexit 1\n")?;
  project.bump_version("1.1.0")?;

  let output = run_shipway_raw(&project.path, &["build"])?;
  assert!(!output.status.success());
  let stderr = String::from_utf8_lossy(&output.stderr);
  assert!(stderr.contains("ERROR: build exploded"), "stderr: {}", stderr);
  assert!(stderr.contains("Packaged"), "stderr should name the failing stage: {}", stderr);

  // Latest still mirrors the previous completed release
  assert!(project.read_file("dist/latest/version.txt")?.contains("v.1.0.0"));
  assert!(!project.file_exists("dist/v1.1.0/myapp.exe"));

  Ok(())
}

#[test]
fn test_build_unexpected_bundle_layout_is_layout_error() -> Result<()> {
  let project = TestProject::new("1.0.0", "3.4.0")?;
  // Packager succeeds but produces nothing
  project.set_packager_script("#!/bin/sh\nexit 0\n")?;

  let output = run_shipway_raw(&project.path, &["build"])?;
  assert!(!output.status.success());
  assert_eq!(output.status.code(), Some(3));
  let stderr = String::from_utf8_lossy(&output.stderr);
  assert!(stderr.contains("Expected packager output not found"), "stderr: {}", stderr);

  Ok(())
}

#[test]
fn test_build_missing_version_file_is_config_error() -> Result<()> {
  let project = TestProject::new("1.0.0", "3.4.0")?;
  fs::remove_file(project.path.join("version.txt"))?;

  let output = run_shipway_raw(&project.path, &["build"])?;
  assert!(!output.status.success());
  assert_eq!(output.status.code(), Some(1));
  let stderr = String::from_utf8_lossy(&output.stderr);
  assert!(stderr.contains("Version file not found"), "stderr: {}", stderr);

  Ok(())
}
