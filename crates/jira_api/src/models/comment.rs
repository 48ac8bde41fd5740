use chrono::{DateTime, FixedOffset};
use serde::Deserialize;

use super::{date_part, parse_timestamp};

#[derive(Debug, Deserialize, Clone)]
pub struct Comment {
    pub id: Option<String>,
    pub body: Option<String>,
    pub created: Option<String>,
    pub updated: Option<String>,
    pub author: Option<CommentAuthor>,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct CommentAuthor {
    pub name: Option<String>,
    pub display_name: Option<String>,
    pub email_address: Option<String>,
}

impl Comment {
    /// Creation timestamp parsed from the wire format, when present and valid.
    pub fn created_at(&self) -> Option<DateTime<FixedOffset>> {
        self.created.as_deref().and_then(parse_timestamp)
    }

    /// Calendar date of creation as reported by the server.
    pub fn created_date(&self) -> Option<&str> {
        self.created.as_deref().map(date_part)
    }
}

/// Page envelope wrapping the comment list of an issue.
#[derive(Debug, Deserialize, Clone)]
pub struct CommentPage {
    #[serde(default)]
    pub comments: Vec<Comment>,
    pub total: Option<u64>,
}

#[cfg(test)]
mod tests {
    use super::Comment;

    #[test]
    fn created_accessors_parse_wire_format() {
        let comment: Comment = serde_json::from_str(
            r#"{"id": "10100", "body": "deployed", "created": "2024-06-10T15:04:00.000+0000"}"#,
        )
        .expect("comment payload");
        assert!(comment.created_at().is_some());
        assert_eq!(comment.created_date(), Some("2024-06-10"));
    }

    #[test]
    fn created_accessors_tolerate_absence() {
        let comment: Comment = serde_json::from_str(r#"{"body": "deployed"}"#).expect("payload");
        assert!(comment.created_at().is_none());
        assert!(comment.created_date().is_none());
    }
}
