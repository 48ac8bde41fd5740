use chrono::{DateTime, FixedOffset};
use serde::Deserialize;

use super::{date_part, parse_timestamp};

#[derive(Debug, Deserialize, Clone)]
pub struct Issue {
    pub key: String,
    #[serde(default)]
    pub fields: IssueFields,
    pub changelog: Option<Changelog>,
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct IssueFields {
    pub summary: Option<String>,
    #[serde(rename = "timeoriginalestimate")]
    pub time_original_estimate: Option<u64>,
    #[serde(rename = "timespent")]
    pub time_spent: Option<u64>,
    pub created: Option<String>,
    pub updated: Option<String>,
}

impl IssueFields {
    /// Calendar date of issue creation.
    pub fn created_date(&self) -> Option<&str> {
        self.created.as_deref().map(date_part)
    }

    /// Calendar date of the last issue update.
    pub fn updated_date(&self) -> Option<&str> {
        self.updated.as_deref().map(date_part)
    }
}

/// Change history attached to an issue when the search expands `changelog`.
#[derive(Debug, Deserialize, Clone)]
pub struct Changelog {
    #[serde(default)]
    pub histories: Vec<ChangelogHistory>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ChangelogHistory {
    pub created: Option<String>,
    #[serde(default)]
    pub items: Vec<ChangelogItem>,
}

impl ChangelogHistory {
    /// Timestamp of this change group, when present and valid.
    pub fn created_at(&self) -> Option<DateTime<FixedOffset>> {
        self.created.as_deref().and_then(parse_timestamp)
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct ChangelogItem {
    pub field: Option<String>,
    #[serde(rename = "fromString")]
    pub from: Option<String>,
    #[serde(rename = "toString")]
    pub to: Option<String>,
}
