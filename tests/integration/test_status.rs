//! Integration tests for `shipway status`

use crate::helpers::{run_shipway, TestProject};
use anyhow::Result;

#[test]
fn test_status_json_before_build() -> Result<()> {
  let project = TestProject::new("1.2.0", "3.4.0")?;

  let output = run_shipway(&project.path, &["status", "--json"])?;
  let stdout = String::from_utf8_lossy(&output.stdout);

  let json: serde_json::Value = serde_json::from_str(&stdout)?;
  assert_eq!(json["app"], "myapp");
  assert_eq!(json["version"], "1.2.0");
  assert_eq!(json["companion_version"], "3.4.0");
  assert_eq!(json["release_dir_exists"], false);
  assert_eq!(json["latest_exists"], false);

  Ok(())
}

#[test]
fn test_status_reports_existing_release() -> Result<()> {
  let project = TestProject::new("1.2.0", "3.4.0")?;
  run_shipway(&project.path, &["build", "--no-publish"])?;

  let output = run_shipway(&project.path, &["status", "--json"])?;
  let json: serde_json::Value = serde_json::from_str(&String::from_utf8_lossy(&output.stdout))?;

  assert_eq!(json["release_dir_exists"], true);
  assert_eq!(json["latest_exists"], true);

  Ok(())
}

#[test]
fn test_status_human_readable() -> Result<()> {
  let project = TestProject::new("1.2.0", "3.4.0")?;

  let output = run_shipway(&project.path, &["status"])?;
  let stdout = String::from_utf8_lossy(&output.stdout);

  assert!(stdout.contains("myapp"));
  assert!(stdout.contains("1.2.0"));
  assert!(stdout.contains("companion 3.4.0"));

  Ok(())
}
