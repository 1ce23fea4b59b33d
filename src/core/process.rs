//! Subprocess capability interface
//!
//! The pipeline never spawns processes directly; it goes through `ToolRunner`
//! so the packager and the source-control client can be replaced with scripted
//! fakes in tests. `SystemRunner` is the real implementation: blocking,
//! captured output, working directory pinned to the project root.

use crate::core::error::{ShipError, ShipResult, ToolError};
use std::path::Path;
use std::process::Command;

/// Captured result of one tool invocation
#[derive(Debug, Clone)]
pub struct ToolOutput {
  pub code: i32,
  pub stdout: String,
  pub stderr: String,
}

impl ToolOutput {
  pub fn success(&self) -> bool {
    self.code == 0
  }
}

/// Capability to invoke an external tool and wait for it
pub trait ToolRunner {
  /// Run `program` with `args` in `cwd`, blocking until exit
  ///
  /// A nonzero exit is not an error at this level; callers decide. Failure to
  /// launch the program at all is.
  fn run(&self, program: &str, args: &[String], cwd: &Path) -> ShipResult<ToolOutput>;
}

/// Real subprocess execution via std::process
pub struct SystemRunner;

impl ToolRunner for SystemRunner {
  fn run(&self, program: &str, args: &[String], cwd: &Path) -> ShipResult<ToolOutput> {
    let output = Command::new(program)
      .args(args)
      .current_dir(cwd)
      .output()
      .map_err(|e| {
        ShipError::Tool(ToolError::LaunchFailed {
          program: program.to_string(),
          reason: e.to_string(),
        })
      })?;

    Ok(ToolOutput {
      code: output.status.code().unwrap_or(-1),
      stdout: String::from_utf8_lossy(&output.stdout).to_string(),
      stderr: String::from_utf8_lossy(&output.stderr).to_string(),
    })
  }
}

/// Render a command line for diagnostics
pub fn display_command(program: &str, args: &[String]) -> String {
  if args.is_empty() {
    program.to_string()
  } else {
    format!("{} {}", program, args.join(" "))
  }
}

/// Run a tool, turning a nonzero exit into a fatal error with raw stderr
pub fn run_checked(runner: &dyn ToolRunner, program: &str, args: &[String], cwd: &Path) -> ShipResult<ToolOutput> {
  let output = runner.run(program, args, cwd)?;
  if !output.success() {
    return Err(ShipError::Tool(ToolError::CommandFailed {
      command: display_command(program, args),
      stderr: if output.stderr.is_empty() {
        output.stdout.clone()
      } else {
        output.stderr.clone()
      },
    }));
  }
  Ok(output)
}

/// Convenience for building owned argument vectors
pub fn argv(args: &[&str]) -> Vec<String> {
  args.iter().map(|s| s.to_string()).collect()
}
