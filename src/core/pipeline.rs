//! Release pipeline state machine
//!
//! A strict linear sequence of stages, each performed by exactly one
//! component, executed blocking on a single thread. A failure at any stage
//! aborts immediately with no rollback: the filesystem keeps whatever the last
//! successful stage produced, and the next run reconciles through
//! overwrite-idempotent writes. The one exception is relocation, which needs
//! the packager's intermediate output to still exist; a run interrupted after
//! `Packaged` must re-invoke the packager.

use crate::core::config::ShipConfig;
use crate::core::error::ShipResult;
use crate::core::layout::ReleaseLayout;
use crate::core::merge;
use crate::core::metadata;
use crate::core::packager::PackagerInvoker;
use crate::core::process::ToolRunner;
use crate::core::publish::GitPublisher;
use crate::core::version::{self, VersionId};
use std::fmt;
use std::fs;
use std::path::PathBuf;

/// Pipeline states, in strict order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
  Start,
  VersionResolved,
  CleanedIntermediate,
  MetadataWritten,
  Packaged,
  Relocated,
  CompanionMerged,
  DescriptorWritten,
  LatestPromoted,
  Published,
  Done,
}

impl Stage {
  pub fn name(self) -> &'static str {
    match self {
      Stage::Start => "Start",
      Stage::VersionResolved => "VersionResolved",
      Stage::CleanedIntermediate => "CleanedIntermediate",
      Stage::MetadataWritten => "MetadataWritten",
      Stage::Packaged => "Packaged",
      Stage::Relocated => "Relocated",
      Stage::CompanionMerged => "CompanionMerged",
      Stage::DescriptorWritten => "DescriptorWritten",
      Stage::LatestPromoted => "LatestPromoted",
      Stage::Published => "Published",
      Stage::Done => "Done",
    }
  }
}

impl fmt::Display for Stage {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.name())
  }
}

/// Summary of a completed pipeline run
#[derive(Debug)]
pub struct BuildReport {
  pub version: VersionId,
  pub companion_version: VersionId,
  pub release_dir: PathBuf,
  pub latest_dir: PathBuf,
  pub published: bool,
}

/// End-to-end release build orchestrator
pub struct Pipeline<'a> {
  config: &'a ShipConfig,
  runner: &'a dyn ToolRunner,
  project_root: PathBuf,
  publish: bool,
}

impl<'a> Pipeline<'a> {
  pub fn new(config: &'a ShipConfig, runner: &'a dyn ToolRunner, project_root: impl Into<PathBuf>, publish: bool) -> Self {
    Self {
      config,
      runner,
      project_root: project_root.into(),
      publish,
    }
  }

  /// Execute the full pipeline, naming the failing stage on abort
  pub fn run(&self) -> ShipResult<BuildReport> {
    let mut stage = Stage::Start;
    let result = self.execute(&mut stage);
    if result.is_err() {
      eprintln!("\n💥 Build aborted entering stage: {}", stage);
    }
    result
  }

  fn execute(&self, stage: &mut Stage) -> ShipResult<BuildReport> {
    let root = &self.project_root;
    let layout = ReleaseLayout::new(root.join(&self.config.layout.dist));

    *stage = Stage::VersionResolved;
    let version = version::read(root)?;
    println!("📦 Building {} {}", self.config.app.name, version.tag());

    *stage = Stage::CleanedIntermediate;
    self.clean_intermediate()?;

    *stage = Stage::MetadataWritten;
    let resource_path = root.join(metadata::VERSION_RESOURCE_FILE);
    metadata::generate(&self.config.app, &version, &resource_path)?;
    println!("   Wrote {}", metadata::VERSION_RESOURCE_FILE);

    *stage = Stage::Packaged;
    let spec = self.config.packager.spec_file(&self.config.app.name);
    PackagerInvoker::new(self.runner, &self.config.packager).invoke(&spec, root)?;
    println!("   Packager finished");

    *stage = Stage::Relocated;
    let release_dir = layout.begin_version(&version)?;
    layout.relocate(&self.config.app.name, &self.config.app.executable(), &release_dir)?;
    println!("   Relocated bundle into {}", release_dir.display());

    *stage = Stage::CompanionMerged;
    let destination = root.join(&self.config.layout.destination);
    merge::merge_tree(&root.join(self.config.companion.latest_dir()), &release_dir)?;
    merge::merge_tree(&release_dir, &destination)?;
    println!("   Merged companion artifacts and destination tree");

    *stage = Stage::DescriptorWritten;
    let companion_version = version::read(&root.join(&self.config.companion.path))?;
    let companion_name = self.config.companion.display_name();
    for dir in [release_dir.as_path(), destination.as_path()] {
      version::write_combined(dir, &self.config.app.name, &version, &companion_name, &companion_version)?;
    }
    println!("   Wrote combined version descriptor");

    *stage = Stage::LatestPromoted;
    layout.promote_to_latest(&release_dir)?;
    println!("📌 Latest updated: {}", layout.latest_dir().display());

    let published = if self.publish {
      *stage = Stage::Published;
      GitPublisher::new(self.runner, &self.config.git.remote).publish(&version, root)?;
      true
    } else {
      println!("   Publishing skipped (--no-publish)");
      false
    };

    *stage = Stage::Done;
    Ok(BuildReport {
      version,
      companion_version,
      release_dir,
      latest_dir: layout.latest_dir(),
      published,
    })
  }

  /// Delete the packager's stale intermediate state before building
  fn clean_intermediate(&self) -> ShipResult<()> {
    let build_dir = self.project_root.join(&self.config.layout.build);
    if build_dir.exists() {
      fs::remove_dir_all(&build_dir)?;
      println!("   Cleaned {}", build_dir.display());
    }
    Ok(())
  }
}
