use serde::Deserialize;

use super::Issue;

/// Envelope returned by the JQL search endpoint.
#[derive(Debug, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct SearchResults {
    #[serde(default)]
    pub issues: Vec<Issue>,
    pub total: Option<u64>,
    pub start_at: Option<u64>,
    pub max_results: Option<u64>,
}

/// Minimal payload returned after creating an issue.
#[derive(Debug, Deserialize, Clone)]
pub struct CreatedIssue {
    pub id: Option<String>,
    pub key: String,
    #[serde(rename = "self")]
    pub self_url: Option<String>,
}
