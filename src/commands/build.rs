//! Build command implementation
//!
//! Runs the release pipeline for the project in the current directory.

use crate::core::config::ShipConfig;
use crate::core::error::ShipResult;
use crate::core::pipeline::Pipeline;
use crate::core::process::SystemRunner;
use std::env;

/// Run the build command
pub fn run_build(no_publish: bool) -> ShipResult<()> {
  let project_root = env::current_dir()?;
  let config = ShipConfig::load(&project_root)?;

  let runner = SystemRunner;
  let pipeline = Pipeline::new(&config, &runner, &project_root, !no_publish);
  let report = pipeline.run()?;

  println!();
  println!("✅ Build complete: {}", report.release_dir.display());
  println!("📌 Latest release: {}", report.latest_dir.display());
  if report.published {
    println!("🏷  Published tag: {}", report.version.tag());
  } else {
    println!("   Not published; run `shipway build` without --no-publish to tag and push");
  }

  Ok(())
}
