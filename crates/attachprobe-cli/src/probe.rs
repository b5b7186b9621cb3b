//! The diagnostic run: identity, issue, redirect capture, object-storage checks.

use std::io::{self, Write};

use attachprobe_jira::client::reason;
use attachprobe_jira::{JiraAuth, JiraClient};
use reqwest::header::LOCATION;
use reqwest::StatusCode;
use thiserror::Error;

use crate::config::ProbeConfig;
use crate::report::{truncate, write_header_block, write_headers};
use crate::storage::ObjectStorageProbe;

const REDIRECT_URL_PREVIEW: usize = 50;

/// How a run ended without a fatal error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The redirect stage ran; object storage was checked if a target was captured.
    Completed,
    NoAttachments,
    /// The attachment was served directly without a redirect.
    NoRedirect,
    /// The issue could not be fetched or decoded.
    IssueFetchFailed,
}

impl Outcome {
    /// Process exit code. An issue-fetch failure exits 0 unless `strict`.
    pub fn exit_code(self, strict: bool) -> u8 {
        match self {
            Outcome::IssueFetchFailed if strict => 1,
            _ => 0,
        }
    }
}

#[derive(Error, Debug)]
pub enum ProbeError {
    #[error("Auth Check Failed: {status} {reason}")]
    AuthCheck { status: u16, reason: String },

    #[error("Auth Check Failed: {0}")]
    Identity(attachprobe_jira::Error),

    #[error("Unexpected error: {0}")]
    Download(String),

    #[error(transparent)]
    Jira(#[from] attachprobe_jira::Error),

    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

pub type Result<T> = std::result::Result<T, ProbeError>;

/// Process exit code for a finished run. Fatal errors exit 1.
pub fn exit_code(result: &Result<Outcome>, strict: bool) -> u8 {
    match result {
        Ok(outcome) => outcome.exit_code(strict),
        Err(_) => 1,
    }
}

/// Statuses whose `Location` is captured instead of followed.
pub fn is_captured_redirect(status: StatusCode) -> bool {
    matches!(status.as_u16(), 301 | 302 | 303 | 307)
}

/// Run every stage in order, writing the report to `out`.
pub async fn run<W: Write>(config: &ProbeConfig, out: &mut W) -> Result<Outcome> {
    let creds = &config.credentials;
    let auth = JiraAuth::new(creds.email.as_str(), creds.api_token.as_str());
    writeln!(out, "Auth Header Prefix: {}...", auth.redacted_prefix())?;

    let client = JiraClient::new(&creds.base_url, auth)?;
    writeln!(out, "Testing with Base URL: {}", client.base_url())?;
    writeln!(out, "Email: {}", creds.email)?;

    check_identity(&client, out).await?;

    let content_url = match find_attachment(&client, &config.issue_key, out).await? {
        IssueStage::Attachment(url) => url,
        IssueStage::NoAttachments => return Ok(Outcome::NoAttachments),
        IssueStage::Failed => return Ok(Outcome::IssueFetchFailed),
    };

    let target = match capture_redirect(&client, &content_url, out).await? {
        RedirectStage::Captured(target) => target,
        RedirectStage::MissingLocation => return Ok(Outcome::Completed),
        RedirectStage::Direct => return Ok(Outcome::NoRedirect),
    };

    let storage = ObjectStorageProbe::new(config.preflight_origin.as_str())
        .map_err(attachprobe_jira::Error::from)?;
    verify_object_storage(&storage, &target, out).await?;

    Ok(Outcome::Completed)
}

async fn check_identity<W: Write>(client: &JiraClient, out: &mut W) -> Result<()> {
    writeln!(out, "Checking identity: {}", client.myself_url())?;

    match client.myself().await {
        Ok(user) => {
            writeln!(
                out,
                "Authenticated as: {} ({})",
                user.email_address.as_deref().unwrap_or("None"),
                user.display_name.as_deref().unwrap_or("None")
            )?;
            Ok(())
        }
        Err(attachprobe_jira::Error::Auth { status, reason }) => {
            tracing::warn!("Identity check rejected with {}", status);
            Err(ProbeError::AuthCheck { status, reason })
        }
        Err(e) => Err(ProbeError::Identity(e)),
    }
}

enum IssueStage {
    Attachment(String),
    NoAttachments,
    Failed,
}

async fn find_attachment<W: Write>(
    client: &JiraClient,
    issue_key: &str,
    out: &mut W,
) -> Result<IssueStage> {
    writeln!(out, "Fetching issue: {}", client.issue_url(issue_key))?;

    let issue = match client.issue(issue_key).await {
        Ok(issue) => issue,
        Err(attachprobe_jira::Error::Api {
            status,
            reason,
            body,
        }) => {
            tracing::warn!("Issue fetch failed with {}", status);
            writeln!(out, "Search API Error: {} {}", status, reason)?;
            writeln!(out, "{}", body)?;
            return Ok(IssueStage::Failed);
        }
        Err(e) => {
            tracing::warn!("Issue fetch failed: {}", e);
            writeln!(out, "Error: {}", e)?;
            return Ok(IssueStage::Failed);
        }
    };

    let attachments = issue.attachments();
    writeln!(out, "Issue found: {}", issue_key)?;
    writeln!(out, "Number of attachments found: {}", attachments.len())?;

    let Some(attachment) = attachments.first() else {
        writeln!(out, "No attachments found in issue fields.")?;
        return Ok(IssueStage::NoAttachments);
    };

    let (Some(content), Some(filename)) = (&attachment.content, &attachment.filename) else {
        tracing::warn!("First attachment lacks a content URL or filename");
        writeln!(out, "Error: first attachment is missing 'content' or 'filename'")?;
        return Ok(IssueStage::Failed);
    };

    writeln!(out, "Found issue: {}", issue_key)?;
    writeln!(out, "Found attachment: {}", filename)?;
    writeln!(out, "Content URL: {}", content)?;
    Ok(IssueStage::Attachment(content.clone()))
}

enum RedirectStage {
    Captured(String),
    MissingLocation,
    Direct,
}

async fn capture_redirect<W: Write>(
    client: &JiraClient,
    content_url: &str,
    out: &mut W,
) -> Result<RedirectStage> {
    writeln!(out, "\nAttempting download with Authorization header...")?;

    let response = client
        .fetch_attachment(content_url)
        .await
        .map_err(|e| ProbeError::Download(e.to_string()))?;
    let status = response.status();

    if is_captured_redirect(status) {
        write_header_block(
            out,
            &format!("{} Redirect Response Headers", status.as_u16()),
            response.headers(),
        )?;

        let location = response
            .headers()
            .get(LOCATION)
            .map(|value| String::from_utf8_lossy(value.as_bytes()).into_owned());
        return match location {
            Some(target) => {
                writeln!(
                    out,
                    "Got Redirect URL: {}...",
                    truncate(&target, REDIRECT_URL_PREVIEW)
                )?;
                Ok(RedirectStage::Captured(target))
            }
            None => {
                writeln!(out, "Redirect response carried no Location header.")?;
                Ok(RedirectStage::MissingLocation)
            }
        };
    }

    if status.is_success() {
        writeln!(out, "Download succeeded directly (No redirect).")?;
        writeln!(out, "Final URL: {}", response.url())?;
        write_header_block(
            out,
            &format!("{} Response Headers", status.as_u16()),
            response.headers(),
        )?;
        return Ok(RedirectStage::Direct);
    }

    Err(ProbeError::Download(format!(
        "HTTP Error {}: {}",
        status.as_u16(),
        reason(status)
    )))
}

async fn verify_object_storage<W: Write>(
    storage: &ObjectStorageProbe,
    target: &str,
    out: &mut W,
) -> Result<()> {
    writeln!(out, "\nVerifying download from S3...")?;
    writeln!(
        out,
        "Testing CORS Preflight (OPTIONS) with Authorization header..."
    )?;

    match storage.preflight(target).await {
        Ok(response) if response.status().is_success() => {
            writeln!(out, "S3 Preflight Status: {}", response.status().as_u16())?;
            writeln!(out, "S3 Headers for OPTIONS:")?;
            write_headers(out, response.headers())?;
        }
        Ok(response) => {
            let status = response.status();
            tracing::warn!("Preflight rejected with {}", status);
            writeln!(
                out,
                "S3 Preflight FAILED: {} {}",
                status.as_u16(),
                reason(status)
            )?;
            writeln!(out, "Headers:")?;
            write_headers(out, response.headers())?;
            writeln!(
                out,
                "If this failed, the browser blocked the request due to Preflight check."
            )?;
        }
        Err(e) => {
            tracing::warn!("Preflight request failed: {}", e);
            writeln!(out, "S3 Preflight FAILED: {}", e)?;
            writeln!(
                out,
                "If this failed, the browser blocked the request due to Preflight check."
            )?;
        }
    }

    match storage.fetch_unauthenticated(target).await {
        Ok(response) if response.status().is_success() => {
            writeln!(out, "S3 Download Status: {}", response.status().as_u16())?;
            write_header_block(out, "S3 Response Headers", response.headers())?;
        }
        Ok(response) => {
            let status = response.status();
            writeln!(
                out,
                "S3 Download Failed: HTTP Error {}: {}",
                status.as_u16(),
                reason(status)
            )?;
        }
        Err(e) => {
            writeln!(out, "S3 Download Failed: {}", e)?;
        }
    }

    Ok(())
}
