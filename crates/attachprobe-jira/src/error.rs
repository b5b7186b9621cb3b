//! Error types for JIRA integration

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid header value: {0}")]
    Header(#[from] reqwest::header::InvalidHeaderValue),

    #[error("Authentication error: {status} {reason}")]
    Auth { status: u16, reason: String },

    #[error("JIRA API error: {status} {reason}")]
    Api {
        status: u16,
        reason: String,
        body: String,
    },
}

pub type Result<T> = std::result::Result<T, Error>;
