//! Release archive layout
//!
//! Owns the on-disk convention under the distribution root: one immutable
//! directory per version (`dist/v<version>/`) and one mutable pointer
//! directory (`dist/latest/`) that always mirrors the most recently completed
//! build. `promote_to_latest` is the only place `latest` is mutated, and it
//! runs only after a release directory is fully populated.

use crate::core::error::{LayoutError, ResultExt, ShipError, ShipResult};
use crate::core::merge;
use crate::core::version::VersionId;
use std::fs;
use std::path::{Path, PathBuf};

/// Support-files directory name inside a packager bundle
pub const INTERNAL_DIR: &str = "_internal";

/// Manages dist/v<version> and dist/latest placement rules
pub struct ReleaseLayout {
  dist: PathBuf,
}

impl ReleaseLayout {
  pub fn new(dist: impl Into<PathBuf>) -> Self {
    Self { dist: dist.into() }
  }

  /// Immutable per-version release directory
  pub fn release_dir(&self, version: &VersionId) -> PathBuf {
    self.dist.join(version.tag())
  }

  /// Mutable pointer directory mirroring the newest completed release
  pub fn latest_dir(&self) -> PathBuf {
    self.dist.join("latest")
  }

  /// Packager output root for an application bundle
  pub fn bundle_dir(&self, app_name: &str) -> PathBuf {
    self.dist.join(app_name)
  }

  /// Create the release directory for a version if absent
  ///
  /// Pre-existing contents are tolerated and never cleared: re-running a
  /// build for the same version after a partial failure reconciles through
  /// overwrite-idempotent writes downstream.
  pub fn begin_version(&self, version: &VersionId) -> ShipResult<PathBuf> {
    let dir = self.release_dir(version);
    fs::create_dir_all(&dir).with_context(|| format!("Failed to create {}", dir.display()))?;
    Ok(dir)
  }

  /// Move the packager's bundle (executable + support dir) into a release dir
  ///
  /// The expected paths being absent means the packager run failed or produced
  /// an unexpected layout; that is fatal, not recoverable here.
  pub fn relocate(&self, app_name: &str, executable: &str, release_dir: &Path) -> ShipResult<()> {
    let bundle = self.bundle_dir(app_name);
    let exe_src = bundle.join(executable);
    let internal_src = bundle.join(INTERNAL_DIR);

    for expected in [&exe_src, &internal_src] {
      if !expected.exists() {
        return Err(ShipError::Layout(LayoutError::MissingPackagerOutput {
          path: expected.clone(),
        }));
      }
    }

    let exe_dst = release_dir.join(executable);
    let internal_dst = release_dir.join(INTERNAL_DIR);

    // A re-run for the same version replaces the previous bundle wholesale
    if exe_dst.exists() {
      fs::remove_file(&exe_dst).with_context(|| format!("Failed to remove {}", exe_dst.display()))?;
    }
    if internal_dst.exists() {
      fs::remove_dir_all(&internal_dst).with_context(|| format!("Failed to remove {}", internal_dst.display()))?;
    }

    fs::rename(&exe_src, &exe_dst)
      .with_context(|| format!("Failed to move {} to {}", exe_src.display(), exe_dst.display()))?;
    fs::rename(&internal_src, &internal_dst)
      .with_context(|| format!("Failed to move {} to {}", internal_src.display(), internal_dst.display()))?;

    // The emptied bundle root is noise in dist/; drop it if nothing is left
    let _ = fs::remove_dir(&bundle);

    Ok(())
  }

  /// Replace dist/latest with an exact full copy of a release directory
  ///
  /// Delete-then-recreate, run strictly after the release directory is fully
  /// populated, so `latest` never reflects a partial build.
  pub fn promote_to_latest(&self, release_dir: &Path) -> ShipResult<()> {
    let latest = self.latest_dir();
    if latest.exists() {
      fs::remove_dir_all(&latest).with_context(|| format!("Failed to remove {}", latest.display()))?;
    }
    merge::merge_tree(release_dir, &latest)
  }
}
