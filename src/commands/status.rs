//! Status command implementation
//!
//! Reports the current and companion versions and which parts of the release
//! layout exist on disk, without mutating anything.

use crate::core::config::ShipConfig;
use crate::core::error::ShipResult;
use crate::core::layout::ReleaseLayout;
use crate::core::version;
use serde::Serialize;
use std::env;
use std::path::PathBuf;

/// Release layout state for one project
#[derive(Debug, Serialize)]
pub struct ReleaseStatus {
  /// Application name
  pub app: String,

  /// Current version from version.txt
  pub version: String,

  /// Companion subsystem version, if readable
  pub companion_version: Option<String>,

  /// Whether dist/v<version> already exists
  pub release_dir_exists: bool,

  /// Whether dist/latest exists
  pub latest_exists: bool,

  /// Release directory path
  pub release_dir: PathBuf,
}

/// Run the status command
pub fn run_status(json: bool) -> ShipResult<()> {
  let project_root = env::current_dir()?;
  let config = ShipConfig::load(&project_root)?;

  let current = version::read(&project_root)?;
  let companion = version::read(&config.companion.path).ok();

  let layout = ReleaseLayout::new(project_root.join(&config.layout.dist));
  let release_dir = layout.release_dir(&current);

  let status = ReleaseStatus {
    app: config.app.name.clone(),
    version: current.to_string(),
    companion_version: companion.as_ref().map(|v| v.to_string()),
    release_dir_exists: release_dir.exists(),
    latest_exists: layout.latest_dir().exists(),
    release_dir,
  };

  if json {
    println!("{}", serde_json::to_string_pretty(&status)?);
  } else {
    print_status(&config, &status);
  }

  Ok(())
}

fn print_status(config: &ShipConfig, status: &ReleaseStatus) {
  println!("📦 {}", status.app);
  println!("   Version:   {}", status.version);
  match &status.companion_version {
    Some(v) => println!("   Companion: {} {}", config.companion.display_name(), v),
    None => println!("   Companion: {} (version unreadable)", config.companion.display_name()),
  }

  if status.release_dir_exists {
    println!("   Release:   {} (exists)", status.release_dir.display());
  } else {
    println!("   Release:   {} (not built)", status.release_dir.display());
  }
  println!("   Latest:    {}", if status.latest_exists { "present" } else { "absent" });

  if status.release_dir_exists {
    println!();
    println!("⚠️  A release directory for {} already exists.", status.version);
    println!("   Re-running `shipway build` will reconcile it; publishing will fail if the tag exists.");
  }
}
