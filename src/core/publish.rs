//! Source-control publishing of a version bump
//!
//! Two independent steps against system git: a status-gated commit/push of the
//! version file, and an unconditional annotated tag plus tag push. A clean
//! working tree skips the commit step silently; the version file may already
//! be committed from a previous partial run. Any git failure is fatal and
//! reported with the tool's raw stderr, since failure modes like a diverged
//! branch or a dirty remote need operator judgment.

use crate::core::error::{ShipError, ShipResult, ToolError};
use crate::core::process::{argv, run_checked, ToolRunner};
use crate::core::version::{VersionId, VERSION_FILE};
use std::path::Path;

pub struct GitPublisher<'a> {
  runner: &'a dyn ToolRunner,
  remote: &'a str,
}

impl<'a> GitPublisher<'a> {
  pub fn new(runner: &'a dyn ToolRunner, remote: &'a str) -> Self {
    Self { runner, remote }
  }

  /// Commit the version bump if the working tree is dirty, then tag and push
  pub fn publish(&self, version: &VersionId, project_root: &Path) -> ShipResult<()> {
    if self.has_changes(project_root)? {
      run_checked(self.runner, "git", &argv(&["add", VERSION_FILE]), project_root)?;
      run_checked(
        self.runner,
        "git",
        &argv(&["commit", "-m", &format!("Release {}", version.tag())]),
        project_root,
      )?;
      run_checked(self.runner, "git", &argv(&["push", self.remote]), project_root)?;
      println!("   ✅ Version bump committed and pushed");
    } else {
      println!("   ℹ️  Working tree clean, skipping commit/push");
    }

    let tag = version.tag();
    if self.tag_exists(&tag, project_root)? {
      return Err(ShipError::Tool(ToolError::TagExists { tag }));
    }

    run_checked(
      self.runner,
      "git",
      &argv(&["tag", "-a", &tag, "-m", &format!("Release {}", tag)]),
      project_root,
    )?;
    run_checked(self.runner, "git", &argv(&["push", self.remote, "--tags"]), project_root)?;
    println!("   🏷  Tag {} created and pushed", tag);

    Ok(())
  }

  /// Whether the working tree reports any tracked or untracked changes
  fn has_changes(&self, project_root: &Path) -> ShipResult<bool> {
    let status = run_checked(self.runner, "git", &argv(&["status", "--porcelain"]), project_root)?;
    Ok(!status.stdout.trim().is_empty())
  }

  fn tag_exists(&self, tag: &str, project_root: &Path) -> ShipResult<bool> {
    let output = run_checked(self.runner, "git", &argv(&["tag", "-l", tag]), project_root)?;
    Ok(!output.stdout.trim().is_empty())
  }
}
