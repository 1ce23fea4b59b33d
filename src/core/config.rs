//! Shipway configuration (shipway.toml) parsing and validation
//!
//! Everything the pipeline needs is passed in explicitly through this
//! structure: output roots, the companion project, the final destination tree,
//! the application identity used for version stamping. No process-wide
//! constants.

use crate::core::error::{ConfigError, ResultExt, ShipError, ShipResult};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Configuration for shipway
/// Searched in order: shipway.toml, .shipway.toml, .config/shipway.toml
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShipConfig {
  pub app: AppConfig,
  pub packager: PackagerConfig,
  pub companion: CompanionConfig,
  pub layout: LayoutConfig,
  #[serde(default)]
  pub git: GitConfig,
}

/// Application identity embedded into the binary metadata descriptor
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
  /// Product name; also names the packager output bundle
  pub name: String,

  /// Company name for the metadata descriptor
  pub company: String,

  /// Copyright line (default: "© <company> <current year>")
  #[serde(default)]
  pub copyright: Option<String>,

  /// Executable file name inside the bundle (default: "<name>.exe")
  #[serde(default)]
  pub executable: Option<String>,
}

impl AppConfig {
  /// Executable file name produced by the packager
  pub fn executable(&self) -> String {
    self
      .executable
      .clone()
      .unwrap_or_else(|| format!("{}.exe", self.name))
  }

  /// Copyright line for the metadata descriptor
  pub fn copyright(&self) -> String {
    self
      .copyright
      .clone()
      .unwrap_or_else(|| format!("© {} {}", self.company, chrono::Utc::now().format("%Y")))
  }
}

/// External packager invocation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PackagerConfig {
  /// Program to run (e.g. "pyinstaller" or a wrapper script)
  pub command: String,

  /// Arguments inserted before the spec descriptor
  #[serde(default)]
  pub args: Vec<String>,

  /// Spec descriptor path, relative to the project root (default: "<name>.spec")
  #[serde(default)]
  pub spec: Option<PathBuf>,
}

impl PackagerConfig {
  /// Spec descriptor path for the given application name
  pub fn spec_file(&self, app_name: &str) -> PathBuf {
    self
      .spec
      .clone()
      .unwrap_or_else(|| PathBuf::from(format!("{}.spec", app_name)))
  }
}

/// The independently-built companion subsystem merged into each release
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompanionConfig {
  /// Companion project root (holds its own version.txt and dist/latest)
  pub path: PathBuf,

  /// Display name used in the combined version descriptor
  /// (default: final component of `path`)
  #[serde(default)]
  pub name: Option<String>,
}

impl CompanionConfig {
  /// Descriptor label for the companion subsystem
  pub fn display_name(&self) -> String {
    self.name.clone().unwrap_or_else(|| {
      self
        .path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| "companion".to_string())
    })
  }

  /// Companion's own latest-release output directory
  pub fn latest_dir(&self) -> PathBuf {
    self.path.join("dist").join("latest")
  }
}

/// On-disk layout roots
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LayoutConfig {
  /// External final-distribution tree the merged release is folded into
  pub destination: PathBuf,

  /// Archive root holding v<version>/ and latest/ (default: "dist")
  #[serde(default = "default_dist_dir")]
  pub dist: PathBuf,

  /// Packager intermediate directory, deleted before each run (default: "build")
  #[serde(default = "default_build_dir")]
  pub build: PathBuf,
}

fn default_dist_dir() -> PathBuf {
  PathBuf::from("dist")
}

fn default_build_dir() -> PathBuf {
  PathBuf::from("build")
}

/// Source-control publishing options
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GitConfig {
  /// Remote to push commits and tags to (default: "origin")
  #[serde(default = "default_remote")]
  pub remote: String,
}

fn default_remote() -> String {
  "origin".to_string()
}

impl Default for GitConfig {
  fn default() -> Self {
    Self {
      remote: default_remote(),
    }
  }
}

impl ShipConfig {
  /// Find config file in search order: shipway.toml, .shipway.toml, .config/shipway.toml
  pub fn find_config_path(path: &Path) -> Option<PathBuf> {
    let candidates = vec![
      path.join("shipway.toml"),
      path.join(".shipway.toml"),
      path.join(".config").join("shipway.toml"),
    ];

    candidates.into_iter().find(|p| p.exists())
  }

  /// Load config from shipway.toml (searches multiple locations)
  pub fn load(path: &Path) -> ShipResult<Self> {
    let config_path = Self::find_config_path(path).ok_or_else(|| {
      ShipError::Config(ConfigError::NotFound {
        project_root: path.to_path_buf(),
      })
    })?;

    let content = fs::read_to_string(&config_path)
      .with_context(|| format!("Failed to read config from {}", config_path.display()))?;
    let config: ShipConfig = toml_edit::de::from_str(&content)
      .with_context(|| format!("Failed to parse config from {}", config_path.display()))?;

    config
      .validate()
      .with_context(|| format!("Invalid configuration in {}", config_path.display()))?;

    Ok(config)
  }

  /// Save config to shipway.toml (default location)
  pub fn save(&self, path: &Path) -> ShipResult<()> {
    let config_path = path.join("shipway.toml");
    let content = toml_edit::ser::to_string_pretty(self).context("Failed to serialize config to TOML")?;
    fs::write(&config_path, content).with_context(|| format!("Failed to write config to {}", config_path.display()))?;
    Ok(())
  }

  /// Check if config exists at the given path
  pub fn exists(path: &Path) -> bool {
    Self::find_config_path(path).is_some()
  }

  /// Validate the configuration
  pub fn validate(&self) -> ShipResult<()> {
    if self.app.name.trim().is_empty() {
      return Err(ShipError::Config(ConfigError::MissingField {
        field: "app.name".to_string(),
      }));
    }

    if self.packager.command.trim().is_empty() {
      return Err(ShipError::Config(ConfigError::MissingField {
        field: "packager.command".to_string(),
      }));
    }

    if self.layout.destination.as_os_str().is_empty() {
      return Err(ShipError::Config(ConfigError::MissingField {
        field: "layout.destination".to_string(),
      }));
    }

    if self.companion.path.as_os_str().is_empty() {
      return Err(ShipError::Config(ConfigError::MissingField {
        field: "companion.path".to_string(),
      }));
    }

    Ok(())
  }

  /// Create a starter config for a project
  pub fn starter(app_name: &str) -> Self {
    Self {
      app: AppConfig {
        name: app_name.to_string(),
        company: "Example Corp".to_string(),
        copyright: None,
        executable: None,
      },
      packager: PackagerConfig {
        command: "pyinstaller".to_string(),
        args: Vec::new(),
        spec: None,
      },
      companion: CompanionConfig {
        path: PathBuf::from("../companion"),
        name: None,
      },
      layout: LayoutConfig {
        destination: PathBuf::from("../release"),
        dist: default_dist_dir(),
        build: default_build_dir(),
      },
      git: GitConfig::default(),
    }
  }
}
