//! AttachProbe JIRA Integration
//!
//! Minimal JIRA Cloud REST client used by the attachment probe.

pub mod auth;
pub mod client;
pub mod error;
pub mod types;

pub use auth::JiraAuth;
pub use client::JiraClient;
pub use error::{Error, Result};
pub use types::*;
