//! Core engine for the shipway release pipeline
//!
//! This module contains the building blocks the commands layer composes:
//!
//! - **config**: shipway configuration (shipway.toml) parsing and validation
//! - **error**: error taxonomy with contextual help messages and exit codes
//! - **version**: version identifier storage and the combined descriptor
//! - **metadata**: binary metadata descriptor generation for the packager
//! - **merge**: overwrite-merge of directory trees
//! - **layout**: dist/v<version> and dist/latest placement rules
//! - **process**: subprocess capability interface (real + scripted fake)
//! - **packager**: external packager invocation
//! - **publish**: git commit/tag/push of a version bump
//! - **pipeline**: the release pipeline state machine

pub mod config;
pub mod error;
pub mod layout;
pub mod merge;
pub mod metadata;
pub mod packager;
pub mod pipeline;
pub mod process;
pub mod publish;
pub mod version;
