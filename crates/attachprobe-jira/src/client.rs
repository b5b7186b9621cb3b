//! JIRA REST client

use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION, CONTENT_TYPE};
use reqwest::{redirect, Client, Response, StatusCode};

use crate::auth::JiraAuth;
use crate::error::{Error, Result};
use crate::types::{JiraIssue, JiraUser};

pub struct JiraClient {
    base_url: String,
    auth: JiraAuth,
    http: Client,
    no_redirect: Client,
}

impl JiraClient {
    pub fn new(base_url: &str, auth: JiraAuth) -> Result<Self> {
        let no_redirect = Client::builder()
            .redirect(redirect::Policy::none())
            .build()?;

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            auth,
            http: Client::new(),
            no_redirect,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn myself_url(&self) -> String {
        format!("{}/rest/api/3/myself", self.base_url)
    }

    pub fn issue_url(&self, issue_key: &str) -> String {
        format!("{}/rest/api/3/issue/{}", self.base_url, issue_key)
    }

    fn headers(&self) -> Result<HeaderMap> {
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, HeaderValue::from_str(&self.auth.to_basic_auth())?);
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        Ok(headers)
    }

    /// Identity of the authenticated account.
    pub async fn myself(&self) -> Result<JiraUser> {
        let url = self.myself_url();
        tracing::debug!("GET {}", url);

        let response = self.http.get(&url).headers(self.headers()?).send().await?;
        let status = response.status();
        tracing::debug!("Identity check returned {}", status);

        if !status.is_success() {
            return Err(Error::Auth {
                status: status.as_u16(),
                reason: reason(status),
            });
        }

        let body = response.text().await?;
        Ok(serde_json::from_str(&body)?)
    }

    pub async fn issue(&self, issue_key: &str) -> Result<JiraIssue> {
        let url = self.issue_url(issue_key);
        tracing::debug!("GET {}", url);

        let response = self.http.get(&url).headers(self.headers()?).send().await?;
        let status = response.status();
        tracing::debug!("Issue fetch returned {}", status);

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(Error::Api {
                status: status.as_u16(),
                reason: reason(status),
                body,
            });
        }

        let body = response.text().await?;
        Ok(serde_json::from_str(&body)?)
    }

    /// Request an attachment's content URL with credentials, leaving any
    /// redirect for the caller to inspect. The body is not read.
    pub async fn fetch_attachment(&self, content_url: &str) -> Result<Response> {
        tracing::debug!("GET {} (redirects disabled)", content_url);

        let response = self
            .no_redirect
            .get(content_url)
            .headers(self.headers()?)
            .send()
            .await?;
        tracing::debug!("Attachment request returned {}", response.status());
        Ok(response)
    }
}

/// Canonical reason phrase for a status, empty when unknown.
pub fn reason(status: StatusCode) -> String {
    status.canonical_reason().unwrap_or_default().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client(base_url: &str) -> JiraClient {
        JiraClient::new(base_url, JiraAuth::new("user@example.com", "token")).unwrap()
    }

    #[test]
    fn test_endpoint_urls() {
        let client = client("https://example.atlassian.net");
        assert_eq!(
            client.myself_url(),
            "https://example.atlassian.net/rest/api/3/myself"
        );
        assert_eq!(
            client.issue_url("AUCWI-518"),
            "https://example.atlassian.net/rest/api/3/issue/AUCWI-518"
        );
    }

    #[test]
    fn test_trailing_slash_ignored() {
        let client = client("https://example.atlassian.net/");
        assert_eq!(client.base_url(), "https://example.atlassian.net");
    }

    #[test]
    fn test_request_headers() {
        let client = client("https://example.atlassian.net");
        let headers = client.headers().unwrap();
        assert_eq!(headers[ACCEPT], "application/json");
        assert_eq!(headers[CONTENT_TYPE], "application/json");
        assert!(headers[AUTHORIZATION]
            .to_str()
            .unwrap()
            .starts_with("Basic "));
    }

    #[test]
    fn test_reason() {
        assert_eq!(reason(StatusCode::UNAUTHORIZED), "Unauthorized");
        assert_eq!(reason(StatusCode::from_u16(599).unwrap()), "");
    }
}
