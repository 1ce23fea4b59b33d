//! External packager invocation
//!
//! Spawns the configured packager with the spec descriptor as its sole build
//! instruction and waits for it. A nonzero exit aborts the pipeline with the
//! tool's diagnostics verbatim; packager failures are never interpreted or
//! retried here.

use crate::core::config::PackagerConfig;
use crate::core::error::{LayoutError, ShipError, ShipResult};
use crate::core::process::{run_checked, ToolRunner};
use std::path::Path;

pub struct PackagerInvoker<'a> {
  runner: &'a dyn ToolRunner,
  config: &'a PackagerConfig,
}

impl<'a> PackagerInvoker<'a> {
  pub fn new(runner: &'a dyn ToolRunner, config: &'a PackagerConfig) -> Self {
    Self { runner, config }
  }

  /// Run the packager against a spec descriptor, in the project root
  pub fn invoke(&self, spec: &Path, project_root: &Path) -> ShipResult<()> {
    if !project_root.join(spec).exists() {
      return Err(ShipError::Layout(LayoutError::SpecFileMissing {
        path: project_root.join(spec),
      }));
    }

    let mut args = self.config.args.clone();
    args.push(spec.display().to_string());

    run_checked(self.runner, &self.config.command, &args, project_root)?;
    Ok(())
  }
}
