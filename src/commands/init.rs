//! Init command implementation
//!
//! Scaffolds a starter shipway.toml in the current directory.

use crate::core::config::ShipConfig;
use crate::core::error::{ShipError, ShipResult};
use std::env;

/// Run the init command
pub fn run_init() -> ShipResult<()> {
  let project_root = env::current_dir()?;

  if ShipConfig::exists(&project_root) {
    return Err(ShipError::with_help(
      "shipway configuration already exists",
      "Edit the existing shipway.toml instead of re-running init.",
    ));
  }

  let app_name = project_root
    .file_name()
    .map(|n| n.to_string_lossy().to_string())
    .unwrap_or_else(|| "app".to_string());

  let config = ShipConfig::starter(&app_name);
  config.save(&project_root)?;

  println!("✅ Created shipway.toml for '{}'", app_name);
  println!();
  println!("Next steps:");
  println!("  1. Fill in [app] identity, [companion].path and [layout].destination");
  println!("  2. Put the current version in version.txt");
  println!("  3. Run `shipway build`");

  Ok(())
}
