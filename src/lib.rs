//! Release Herald - CI release approval pipeline
//!
//! This library implements the two stages of a release approval workflow: generating
//! release-candidate notes from Git tag/commit history, and posting those notes to a
//! Slack channel as an interactive approval request.

#![allow(clippy::uninlined_format_args)] // Style preference

pub mod cli;
pub mod commands;
pub mod config;
pub mod git;
pub mod logger;
pub mod notes;
pub mod slack;
pub mod ui;

// Re-export important structs and functions for easier testing
pub use config::Settings;
pub use git::{CommitSummary, GitRepo};
pub use slack::{MessageInfo, PostedMessage};
