//! gimer - merge branches of hosted git repositories from the command line
//!
//! A merge session clones (or reuses) a cached working copy, brings the
//! source and target branches up to date, merges source into target, hands
//! conflicts to the user's merge tool and pushes the result. Every git
//! invocation goes through one executor that honours dry-run and a
//! per-command confirmation policy.
//!
//! Pull/merge request URLs from GitHub and GitLab are resolved to their
//! branches through the hosting API before the session starts.

pub mod auth;
pub mod cache;
pub mod config;
pub mod error;
pub mod git;
pub mod merge;
pub mod messages;
pub mod platform;
pub mod types;

pub use error::{Error, Result};
