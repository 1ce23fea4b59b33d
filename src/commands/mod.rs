//! CLI commands for shipway
//!
//! This module contains all user-facing command implementations:
//!
//! - **init**: Initialize shipway.toml configuration for a project
//! - **status**: Show current/companion versions and release layout state
//! - **build**: Run the release pipeline end to end

pub mod build;
pub mod init;
pub mod status;

pub use build::run_build;
pub use init::run_init;
pub use status::run_status;
