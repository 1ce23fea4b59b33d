//! Version identifier storage
//!
//! Each project carries a plain-text `version.txt` holding a single
//! MAJOR.MINOR.PATCH line. The identifier is treated as opaque for comparison
//! (equality and formatting only); no ordering logic lives here. The same
//! module produces the combined version descriptor written into the final
//! merged output trees.

use crate::core::error::{ConfigError, ShipError, ShipResult};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

/// File name holding a project's version identifier
pub const VERSION_FILE: &str = "version.txt";

/// A MAJOR.MINOR.PATCH version identifier, immutable for one pipeline run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionId(semver::Version);

impl VersionId {
  /// Parse a dotted version string
  pub fn parse(raw: &str, source: &Path) -> ShipResult<Self> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
      return Err(malformed(source, trimmed));
    }

    let version = semver::Version::parse(trimmed).map_err(|_| malformed(source, trimmed))?;
    Ok(VersionId(version))
  }

  /// Numeric tuple for binary resource fields
  pub fn tuple(&self) -> (u64, u64, u64) {
    (self.0.major, self.0.minor, self.0.patch)
  }

  /// Tag name for this version (`v<version>`)
  pub fn tag(&self) -> String {
    format!("v{}", self.0)
  }
}

impl fmt::Display for VersionId {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.0)
  }
}

fn malformed(source: &Path, content: &str) -> ShipError {
  ShipError::Config(ConfigError::VersionMalformed {
    path: source.to_path_buf(),
    content: content.to_string(),
  })
}

/// Read a project's version identifier from its version.txt
pub fn read(project_dir: &Path) -> ShipResult<VersionId> {
  let path = project_dir.join(VERSION_FILE);
  if !path.exists() {
    return Err(ShipError::Config(ConfigError::VersionFileMissing { path }));
  }

  let content = fs::read_to_string(&path)?;
  VersionId::parse(&content, &path)
}

/// Write the combined version descriptor covering both subsystems
///
/// Exactly two lines, no trailing newline:
/// `<app> v.<version>\n<companion> v.<companionVersion>`
pub fn write_combined(
  dir: &Path,
  app_name: &str,
  app_version: &VersionId,
  companion_name: &str,
  companion_version: &VersionId,
) -> ShipResult<PathBuf> {
  let path = dir.join(VERSION_FILE);
  let content = format!(
    "{} v.{}\n{} v.{}",
    app_name, app_version, companion_name, companion_version
  );
  fs::write(&path, content)?;
  Ok(path)
}
