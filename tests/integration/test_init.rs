//! Integration tests for `shipway init`

use crate::helpers::{run_shipway, run_shipway_raw};
use anyhow::Result;

#[test]
fn test_init_creates_config() -> Result<()> {
  let dir = tempfile::tempdir()?;

  let output = run_shipway(dir.path(), &["init"])?;
  let stdout = String::from_utf8_lossy(&output.stdout);

  assert!(dir.path().join("shipway.toml").exists());
  assert!(stdout.contains("Created shipway.toml"));

  let content = std::fs::read_to_string(dir.path().join("shipway.toml"))?;
  assert!(content.contains("[app]"));
  assert!(content.contains("[packager]"));
  assert!(content.contains("[layout]"));

  Ok(())
}

#[test]
fn test_init_refuses_to_overwrite() -> Result<()> {
  let dir = tempfile::tempdir()?;
  run_shipway(dir.path(), &["init"])?;

  let output = run_shipway_raw(dir.path(), &["init"])?;
  assert!(!output.status.success());
  let stderr = String::from_utf8_lossy(&output.stderr);
  assert!(stderr.contains("already exists"), "stderr: {}", stderr);

  Ok(())
}
