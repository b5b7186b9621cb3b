//! AttachProbe
//!
//! Diagnoses whether JIRA attachment downloads survive the redirect to
//! pre-signed object-storage URLs.

pub mod config;
pub mod probe;
pub mod report;
pub mod storage;

pub use config::{ConfigError, Credentials, ProbeConfig};
pub use probe::{exit_code, run, Outcome, ProbeError};
pub use storage::ObjectStorageProbe;
