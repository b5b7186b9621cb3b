//! JIRA API types

use serde::{Deserialize, Serialize};

/// Response of `/rest/api/3/myself`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JiraUser {
    #[serde(default)]
    pub account_id: Option<String>,
    #[serde(default)]
    pub email_address: Option<String>,
    #[serde(default)]
    pub display_name: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JiraIssue {
    #[serde(default)]
    pub key: String,
    #[serde(default)]
    pub fields: JiraFields,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct JiraFields {
    #[serde(default)]
    pub summary: Option<String>,
    #[serde(default)]
    pub attachment: Option<Vec<JiraAttachment>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JiraAttachment {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub filename: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub mime_type: Option<String>,
    #[serde(default)]
    pub size: Option<u64>,
}

impl JiraIssue {
    /// Attachments listed on the issue; a null or absent field reads as empty.
    pub fn attachments(&self) -> &[JiraAttachment] {
        self.fields.attachment.as_deref().unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_issue_with_attachment() {
        let json = r#"{
            "key": "AUCWI-518",
            "fields": {
                "summary": "Broken download",
                "attachment": [{
                    "id": "10001",
                    "filename": "screenshot.png",
                    "mimeType": "image/png",
                    "size": 2048,
                    "content": "https://example.atlassian.net/rest/api/3/attachment/content/10001"
                }]
            }
        }"#;
        let issue: JiraIssue = serde_json::from_str(json).unwrap();
        assert_eq!(issue.key, "AUCWI-518");
        let attachments = issue.attachments();
        assert_eq!(attachments.len(), 1);
        assert_eq!(attachments[0].filename.as_deref(), Some("screenshot.png"));
        assert_eq!(attachments[0].mime_type.as_deref(), Some("image/png"));
        assert!(attachments[0]
            .content
            .as_deref()
            .is_some_and(|url| url.ends_with("/content/10001")));
    }

    #[test]
    fn test_issue_without_attachment_field() {
        let issue: JiraIssue =
            serde_json::from_str(r#"{"key": "AUCWI-1", "fields": {"summary": "x"}}"#).unwrap();
        assert!(issue.attachments().is_empty());

        let issue: JiraIssue =
            serde_json::from_str(r#"{"key": "AUCWI-2", "fields": {"attachment": null}}"#).unwrap();
        assert!(issue.attachments().is_empty());
    }

    #[test]
    fn test_incomplete_attachment_still_parses() {
        let issue: JiraIssue = serde_json::from_str(
            r#"{"key": "AUCWI-3", "fields": {"attachment": [
                {"filename": "a.txt", "content": "https://example/a"},
                {"filename": "b.txt"}
            ]}}"#,
        )
        .unwrap();
        let attachments = issue.attachments();
        assert_eq!(attachments.len(), 2);
        assert_eq!(attachments[0].content.as_deref(), Some("https://example/a"));
        assert!(attachments[1].content.is_none());
    }

    #[test]
    fn test_user_partial_fields() {
        let user: JiraUser =
            serde_json::from_str(r#"{"displayName": "Ada Lovelace"}"#).unwrap();
        assert_eq!(user.display_name.as_deref(), Some("Ada Lovelace"));
        assert!(user.email_address.is_none());
    }
}
