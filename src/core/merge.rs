//! Overwrite-merge of directory trees
//!
//! Copies one tree on top of another: missing directories are created,
//! conflicting files are overwritten, files only present in the destination
//! are left alone. Source permissions and modification times are carried over
//! so re-merging an unchanged tree is a byte-for-byte no-op.

use crate::core::error::{ResultExt, ShipResult};
use std::fs;
use std::path::Path;
use walkdir::WalkDir;

/// Recursively merge `source` into `dest`, overwriting conflicting files
///
/// A source tree with zero entries merges as a no-op. Any read or write
/// failure is fatal and propagated; nothing is retried or skipped.
pub fn merge_tree(source: &Path, dest: &Path) -> ShipResult<()> {
  fs::create_dir_all(dest).with_context(|| format!("Failed to create {}", dest.display()))?;

  for entry in WalkDir::new(source).min_depth(1) {
    let entry = entry
      .map_err(walkdir_io)
      .with_context(|| format!("Failed to walk {}", source.display()))?;

    let relative = entry
      .path()
      .strip_prefix(source)
      .map_err(|e| crate::core::error::ShipError::message(format!("Path outside source tree: {}", e)))?;
    let target = dest.join(relative);

    if entry.file_type().is_dir() {
      fs::create_dir_all(&target).with_context(|| format!("Failed to create {}", target.display()))?;
    } else {
      copy_file(entry.path(), &target)?;
    }
  }

  Ok(())
}

fn walkdir_io(err: walkdir::Error) -> std::io::Error {
  err
    .into_io_error()
    .unwrap_or_else(|| std::io::Error::other("walk produced a non-io error"))
}

/// Copy one file, preserving permissions and modification time
fn copy_file(source: &Path, target: &Path) -> ShipResult<()> {
  if let Some(parent) = target.parent() {
    fs::create_dir_all(parent).with_context(|| format!("Failed to create {}", parent.display()))?;
  }

  fs::copy(source, target)
    .with_context(|| format!("Failed to copy {} to {}", source.display(), target.display()))?;

  let modified = fs::metadata(source)
    .and_then(|m| m.modified())
    .with_context(|| format!("Failed to read metadata of {}", source.display()))?;
  let file = fs::File::options()
    .write(true)
    .open(target)
    .with_context(|| format!("Failed to reopen {}", target.display()))?;
  file
    .set_modified(modified)
    .with_context(|| format!("Failed to set mtime on {}", target.display()))?;

  Ok(())
}
