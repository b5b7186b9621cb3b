//! JIRA authentication

use base64::Engine;

/// Number of characters of the header value that may be shown in output.
pub const REDACTED_PREFIX_LEN: usize = 15;

#[derive(Debug, Clone)]
pub struct JiraAuth {
    email: String,
    api_token: String,
}

impl JiraAuth {
    pub fn new(email: impl Into<String>, api_token: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            api_token: api_token.into(),
        }
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn to_basic_auth(&self) -> String {
        let credentials = format!("{}:{}", self.email, self.api_token);
        format!(
            "Basic {}",
            base64::engine::general_purpose::STANDARD.encode(credentials)
        )
    }

    /// The leading part of the Basic header, safe to print.
    pub fn redacted_prefix(&self) -> String {
        self.to_basic_auth()
            .chars()
            .take(REDACTED_PREFIX_LEN)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_auth_encoding() {
        let auth = JiraAuth::new("user@example.com", "secret-token");
        assert_eq!(
            auth.to_basic_auth(),
            "Basic dXNlckBleGFtcGxlLmNvbTpzZWNyZXQtdG9rZW4="
        );
    }

    #[test]
    fn test_redacted_prefix_length() {
        let auth = JiraAuth::new("user@example.com", "secret-token");
        let prefix = auth.redacted_prefix();
        assert_eq!(prefix.len(), 15);
        assert_eq!(prefix, "Basic dXNlckBle");
        assert!(!prefix.contains("c2VjcmV0"));
    }

    #[test]
    fn test_redacted_prefix_short_credentials() {
        let auth = JiraAuth::new("a", "b");
        assert_eq!(auth.redacted_prefix(), "Basic YTpi");
    }
}
