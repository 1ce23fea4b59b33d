//! Error types for shipway with contextual messages and exit codes
//!
//! Every failure aborts the current pipeline run; nothing is retried
//! automatically. Errors carry the underlying tool's diagnostic text verbatim
//! plus, where we can say something useful, a help message for the operator.

use std::fmt;
use std::io;
use std::path::PathBuf;

/// Exit codes for shipway
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCode {
  /// User error (config, missing/malformed version file)
  User = 1,
  /// System error (external tool, I/O)
  System = 2,
  /// Layout violation (expected artifact paths absent)
  Layout = 3,
}

impl ExitCode {
  /// Convert to i32 for process exit
  pub fn as_i32(self) -> i32 {
    self as i32
  }
}

/// Main error type for shipway
#[derive(Debug)]
pub enum ShipError {
  /// Configuration errors (shipway.toml, version files)
  Config(ConfigError),

  /// External tool failures (packager, git)
  Tool(ToolError),

  /// Release layout violations
  Layout(LayoutError),

  /// I/O errors
  Io(io::Error),

  /// Generic error with message and optional context
  Message {
    message: String,
    context: Option<String>,
    help: Option<String>,
  },
}

impl ShipError {
  /// Create a simple error message
  pub fn message(msg: impl Into<String>) -> Self {
    ShipError::Message {
      message: msg.into(),
      context: None,
      help: None,
    }
  }

  /// Create an error with help text
  pub fn with_help(msg: impl Into<String>, help: impl Into<String>) -> Self {
    ShipError::Message {
      message: msg.into(),
      context: None,
      help: Some(help.into()),
    }
  }

  /// Add context to an existing error
  pub fn context(self, ctx: impl Into<String>) -> Self {
    let ctx_str = ctx.into();
    match self {
      ShipError::Message { message, context, help } => ShipError::Message {
        message,
        context: Some(context.map(|c| format!("{}\n{}", ctx_str, c)).unwrap_or(ctx_str)),
        help,
      },
      // Keep the I/O classification (and its exit code), fold the context in
      ShipError::Io(e) => ShipError::Io(io::Error::new(e.kind(), format!("{}: {}", ctx_str, e))),
      _ => self,
    }
  }

  /// Get the appropriate exit code for this error
  pub fn exit_code(&self) -> ExitCode {
    match self {
      ShipError::Config(_) => ExitCode::User,
      ShipError::Tool(_) => ExitCode::System,
      ShipError::Layout(_) => ExitCode::Layout,
      ShipError::Io(_) => ExitCode::System,
      ShipError::Message { .. } => ExitCode::User,
    }
  }

  /// Get contextual help message for this error
  pub fn help_message(&self) -> Option<String> {
    match self {
      ShipError::Config(e) => e.help_message(),
      ShipError::Tool(e) => e.help_message(),
      ShipError::Layout(e) => e.help_message(),
      ShipError::Message { help, .. } => help.clone(),
      _ => None,
    }
  }
}

impl fmt::Display for ShipError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      ShipError::Config(e) => write!(f, "{}", e),
      ShipError::Tool(e) => write!(f, "{}", e),
      ShipError::Layout(e) => write!(f, "{}", e),
      ShipError::Io(e) => write!(f, "I/O error: {}", e),
      ShipError::Message { message, context, .. } => {
        write!(f, "{}", message)?;
        if let Some(ctx) = context {
          write!(f, "\n{}", ctx)?;
        }
        Ok(())
      }
    }
  }
}

impl std::error::Error for ShipError {
  fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
    match self {
      ShipError::Io(e) => Some(e),
      _ => None,
    }
  }
}

impl From<io::Error> for ShipError {
  fn from(err: io::Error) -> Self {
    ShipError::Io(err)
  }
}

impl From<String> for ShipError {
  fn from(msg: String) -> Self {
    ShipError::message(msg)
  }
}

impl From<&str> for ShipError {
  fn from(msg: &str) -> Self {
    ShipError::message(msg)
  }
}

impl From<toml_edit::TomlError> for ShipError {
  fn from(err: toml_edit::TomlError) -> Self {
    ShipError::message(format!("TOML parse error: {}", err))
  }
}

impl From<toml_edit::de::Error> for ShipError {
  fn from(err: toml_edit::de::Error) -> Self {
    ShipError::message(format!("TOML deserialization error: {}", err))
  }
}

impl From<toml_edit::ser::Error> for ShipError {
  fn from(err: toml_edit::ser::Error) -> Self {
    ShipError::message(format!("TOML serialization error: {}", err))
  }
}

impl From<serde_json::Error> for ShipError {
  fn from(err: serde_json::Error) -> Self {
    ShipError::message(format!("JSON error: {}", err))
  }
}

impl From<anyhow::Error> for ShipError {
  fn from(err: anyhow::Error) -> Self {
    ShipError::message(err.to_string())
  }
}

/// Configuration-related errors
#[derive(Debug)]
pub enum ConfigError {
  /// shipway.toml not found
  NotFound { project_root: PathBuf },

  /// Missing required field
  MissingField { field: String },

  /// version.txt not found
  VersionFileMissing { path: PathBuf },

  /// version.txt is empty or not MAJOR.MINOR.PATCH
  VersionMalformed { path: PathBuf, content: String },
}

impl ConfigError {
  fn help_message(&self) -> Option<String> {
    match self {
      ConfigError::NotFound { .. } => Some("Run `shipway init` to create a configuration file.".to_string()),
      ConfigError::VersionFileMissing { path } => Some(format!(
        "Create {} containing a single MAJOR.MINOR.PATCH line.",
        path.display()
      )),
      ConfigError::VersionMalformed { .. } => {
        Some("The version file must contain a single MAJOR.MINOR.PATCH line, e.g. `1.2.0`.".to_string())
      }
      _ => None,
    }
  }
}

impl fmt::Display for ConfigError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      ConfigError::NotFound { project_root } => {
        write!(
          f,
          "No shipway configuration found.\nExpected file: {}/shipway.toml",
          project_root.display()
        )
      }
      ConfigError::MissingField { field } => {
        write!(f, "Missing required field in config: {}", field)
      }
      ConfigError::VersionFileMissing { path } => {
        write!(f, "Version file not found: {}", path.display())
      }
      ConfigError::VersionMalformed { path, content } => {
        write!(f, "Malformed version in {}: '{}'", path.display(), content)
      }
    }
  }
}

/// External tool failures (packager, git)
#[derive(Debug)]
pub enum ToolError {
  /// Subprocess exited nonzero; stderr is the tool's raw diagnostics
  CommandFailed { command: String, stderr: String },

  /// Subprocess could not be spawned at all
  LaunchFailed { program: String, reason: String },

  /// Release tag already exists for this version
  TagExists { tag: String },
}

impl ToolError {
  fn help_message(&self) -> Option<String> {
    match self {
      ToolError::TagExists { tag } => Some(format!(
        "Version already published. Bump version.txt, or delete the tag with `git tag -d {}` if it was created in error. Use `shipway build --no-publish` to rebuild artifacts only.",
        tag
      )),
      ToolError::LaunchFailed { program, .. } => {
        Some(format!("Check that `{}` is installed and on PATH.", program))
      }
      _ => None,
    }
  }
}

impl fmt::Display for ToolError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      ToolError::CommandFailed { command, stderr } => {
        write!(f, "Command failed: {}\n{}", command, stderr)
      }
      ToolError::LaunchFailed { program, reason } => {
        write!(f, "Failed to launch {}: {}", program, reason)
      }
      ToolError::TagExists { tag } => {
        write!(f, "Tag {} already exists on this repository", tag)
      }
    }
  }
}

/// Release layout violations
#[derive(Debug)]
pub enum LayoutError {
  /// Packager reported success but an expected output path is absent
  MissingPackagerOutput { path: PathBuf },

  /// Spec descriptor for the packager is missing
  SpecFileMissing { path: PathBuf },
}

impl LayoutError {
  fn help_message(&self) -> Option<String> {
    match self {
      LayoutError::MissingPackagerOutput { .. } => Some(
        "The packager produced an unexpected layout. Check the spec descriptor and re-run the build; a run interrupted after packaging must re-invoke the packager.".to_string(),
      ),
      LayoutError::SpecFileMissing { path } => Some(format!(
        "Create the packager spec descriptor at {} or point [packager].spec at it.",
        path.display()
      )),
    }
  }
}

impl fmt::Display for LayoutError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      LayoutError::MissingPackagerOutput { path } => {
        write!(f, "Expected packager output not found: {}", path.display())
      }
      LayoutError::SpecFileMissing { path } => {
        write!(f, "Packager spec descriptor not found: {}", path.display())
      }
    }
  }
}

/// Result type alias for shipway
pub type ShipResult<T> = Result<T, ShipError>;

/// Helper trait to add context to Results
pub trait ResultExt<T> {
  /// Add context to an error result
  fn context(self, ctx: impl Into<String>) -> ShipResult<T>;

  /// Add context using a closure (lazy evaluation)
  fn with_context<F>(self, f: F) -> ShipResult<T>
  where
    F: FnOnce() -> String;
}

impl<T, E> ResultExt<T> for Result<T, E>
where
  E: Into<ShipError>,
{
  fn context(self, ctx: impl Into<String>) -> ShipResult<T> {
    self.map_err(|e| e.into().context(ctx))
  }

  fn with_context<F>(self, f: F) -> ShipResult<T>
  where
    F: FnOnce() -> String,
  {
    self.map_err(|e| e.into().context(f()))
  }
}

/// Pretty-print an error to stderr with help text
pub fn print_error(error: &ShipError) {
  eprintln!("\n❌ {}\n", error);

  if let Some(help) = error.help_message() {
    eprintln!("💡 Help: {}\n", help);
  }
}
