//! Probe configuration

use thiserror::Error;

pub const BASE_URL_VAR: &str = "JIRA_BASE_URL";
pub const EMAIL_VAR: &str = "JIRA_EMAIL";
pub const API_TOKEN_VAR: &str = "JIRA_API_TOKEN";

pub const DEFAULT_ISSUE_KEY: &str = "AUCWI-518";
pub const DEFAULT_ORIGIN: &str = "chrome-extension://dummy-id";

#[derive(Error, Debug, PartialEq)]
pub enum ConfigError {
    #[error("Missing credentials in environment variables")]
    MissingCredentials { missing: Vec<&'static str> },
}

#[derive(Debug, Clone, PartialEq)]
pub struct Credentials {
    pub base_url: String,
    pub email: String,
    pub api_token: String,
}

impl Credentials {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build credentials from a variable lookup. Empty values count as missing.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut missing = Vec::new();
        let mut read = |name: &'static str| match lookup(name) {
            Some(value) if !value.is_empty() => value,
            _ => {
                missing.push(name);
                String::new()
            }
        };

        let base_url = read(BASE_URL_VAR);
        let email = read(EMAIL_VAR);
        let api_token = read(API_TOKEN_VAR);

        if !missing.is_empty() {
            return Err(ConfigError::MissingCredentials { missing });
        }

        Ok(Self {
            base_url,
            email,
            api_token,
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ProbeConfig {
    pub credentials: Credentials,
    pub issue_key: String,
    pub preflight_origin: String,
}

impl ProbeConfig {
    pub fn new(credentials: Credentials) -> Self {
        Self {
            credentials,
            issue_key: DEFAULT_ISSUE_KEY.to_string(),
            preflight_origin: DEFAULT_ORIGIN.to_string(),
        }
    }

    pub fn with_issue_key(mut self, issue_key: impl Into<String>) -> Self {
        self.issue_key = issue_key.into();
        self
    }

    pub fn with_preflight_origin(mut self, origin: impl Into<String>) -> Self {
        self.preflight_origin = origin.into();
        self
    }
}
