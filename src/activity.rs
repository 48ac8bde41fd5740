//! Previous-day activity collection from the tracker.

use crate::config::Config;
use crate::window::TimeWindow;
use chrono::Utc;
use jira_api::{Changelog, Comment, Issue, JiraClient, JiraConfig, JiraError, Result};
use log::{error, info};

/// One comment kept for the report, in tracker return order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActivityComment {
    pub body: String,
    pub created_date: String,
}

/// A status transition taken from the issue changelog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusChange {
    pub from: String,
    pub to: String,
    pub at: String,
}

/// Everything the report needs about one issue touched in the window.
#[derive(Debug, Clone)]
pub struct ActivityRecord {
    pub issue_key: String,
    pub summary: String,
    pub link: String,
    pub original_estimate_seconds: Option<u64>,
    pub time_spent_seconds: Option<u64>,
    pub created: String,
    pub updated: String,
    pub comments: Vec<ActivityComment>,
    pub status_changes: Vec<StatusChange>,
}

/// Fetches the window's activity. Every API failure is logged with a category
/// label and collapses to `None`; callers only observe presence or absence.
pub async fn fetch_daily_activities(
    client: &JiraClient,
    config: &Config,
    window: &TimeWindow,
) -> Option<Vec<ActivityRecord>> {
    match collect_activities(client, config, window).await {
        Ok(records) => Some(records),
        Err(err) => {
            log_fetch_error(&err);
            None
        }
    }
}

async fn collect_activities(
    client: &JiraClient,
    config: &Config,
    window: &TimeWindow,
) -> Result<Vec<ActivityRecord>> {
    let (start, end) = window.jql_bounds();
    let jql = format!(
        "updated >= \"{start}\" AND updated < \"{end}\" AND assignee = currentUser() \
         AND project != {} ORDER BY updated DESC",
        config.tracking_project
    );

    let issues = client.search_issues(&jql, Some(100), true).await?;
    info!("Fetched {} issues updated in the reported window", issues.len());

    let mut records = Vec::with_capacity(issues.len());
    for issue in issues {
        // One comment-list round trip per issue, sequential.
        let comments = client.get_issue_comments(&issue.key).await?;
        records.push(build_record(client.config(), issue, comments, window));
    }
    Ok(records)
}

fn build_record(
    jira: &JiraConfig,
    issue: Issue,
    comments: Vec<Comment>,
    window: &TimeWindow,
) -> ActivityRecord {
    let comments = comments
        .into_iter()
        .filter_map(|comment| activity_comment(&comment, window))
        .collect();
    let status_changes = status_changes(issue.changelog.as_ref(), window);

    ActivityRecord {
        link: jira.browse_url(&issue.key),
        summary: issue.fields.summary.clone().unwrap_or_default(),
        original_estimate_seconds: issue.fields.time_original_estimate,
        time_spent_seconds: issue.fields.time_spent,
        created: issue.fields.created_date().unwrap_or_default().to_string(),
        updated: issue.fields.updated_date().unwrap_or_default().to_string(),
        issue_key: issue.key,
        comments,
        status_changes,
    }
}

/// Keeps a comment when its body is non-empty and it was created strictly
/// after the window start. Unparseable timestamps are excluded.
fn activity_comment(comment: &Comment, window: &TimeWindow) -> Option<ActivityComment> {
    let body = comment.body.as_deref().unwrap_or_default();
    if body.is_empty() {
        return None;
    }
    let created = comment.created_at()?;
    if created.with_timezone(&Utc) <= window.start {
        return None;
    }
    Some(ActivityComment {
        body: body.to_string(),
        created_date: comment.created_date().unwrap_or_default().to_string(),
    })
}

/// Status transitions whose changelog timestamp falls inside the window.
fn status_changes(changelog: Option<&Changelog>, window: &TimeWindow) -> Vec<StatusChange> {
    let mut changes = Vec::new();
    let Some(changelog) = changelog else {
        return changes;
    };
    for history in &changelog.histories {
        let Some(at) = history.created_at() else {
            continue;
        };
        let at = at.with_timezone(&Utc);
        if !window.contains(at) {
            continue;
        }
        for item in &history.items {
            if item.field.as_deref() == Some("status") {
                changes.push(StatusChange {
                    from: item.from.clone().unwrap_or_default(),
                    to: item.to.clone().unwrap_or_default(),
                    at: at.format("%Y-%m-%d %H:%M").to_string(),
                });
            }
        }
    }
    changes
}

fn log_fetch_error(err: &JiraError) {
    if err.is_authentication() {
        error!("Authentication failed: {err}");
    } else if err.is_not_found() {
        error!("Jira server URL not found: {err}");
    } else if matches!(err, JiraError::Http { .. }) {
        error!("Jira error: {err}");
    } else {
        error!("An unexpected error occurred: {err}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::window::TimeWindow;
    use chrono::NaiveDate;
    use jira_api::JiraConfig;

    fn window() -> TimeWindow {
        TimeWindow::for_date(NaiveDate::from_ymd_opt(2024, 6, 9).expect("date"))
    }

    fn comment(body: &str, created: &str) -> Comment {
        Comment {
            id: None,
            body: Some(body.to_string()),
            created: Some(created.to_string()),
            updated: None,
            author: None,
        }
    }

    #[test]
    fn comment_at_window_start_is_excluded() {
        let c = comment("kickoff", "2024-06-09T00:00:00.000+0000");
        assert!(activity_comment(&c, &window()).is_none());

        let c = comment("kickoff", "2024-06-09T00:00:01.000+0000");
        assert!(activity_comment(&c, &window()).is_some());
    }

    #[test]
    fn empty_body_is_excluded_regardless_of_timestamp() {
        let c = comment("", "2024-06-09T12:00:00.000+0000");
        assert!(activity_comment(&c, &window()).is_none());
    }

    #[test]
    fn unparseable_timestamp_is_excluded() {
        let c = comment("note", "not-a-timestamp");
        assert!(activity_comment(&c, &window()).is_none());
    }

    #[test]
    fn comment_offset_is_normalized_before_comparison() {
        // 02:30 at +0300 is 23:30 the previous day in UTC, before the start.
        let c = comment("early", "2024-06-09T02:30:00.000+0300");
        assert!(activity_comment(&c, &window()).is_none());
    }

    #[test]
    fn status_changes_filtered_to_window() {
        let changelog: Changelog = serde_json::from_str(
            r#"{"histories": [
                {"created": "2024-06-09T10:00:00.000+0000",
                 "items": [{"field": "status", "fromString": "Open", "toString": "In Progress"},
                           {"field": "assignee", "fromString": "a", "toString": "b"}]},
                {"created": "2024-06-10T00:00:00.000+0000",
                 "items": [{"field": "status", "fromString": "In Progress", "toString": "Done"}]}
            ]}"#,
        )
        .expect("changelog");

        let changes = status_changes(Some(&changelog), &window());
        assert_eq!(changes.len(), 1);
        assert_eq!(changes[0].from, "Open");
        assert_eq!(changes[0].to, "In Progress");
        assert_eq!(changes[0].at, "2024-06-09 10:00");
    }

    #[tokio::test]
    async fn fetch_builds_records_in_search_order() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", "/rest/api/2/search")
            .with_status(200)
            .with_body(
                r#"{"total": 2, "issues": [
                    {"key": "OPS-18", "fields": {"summary": "Tune alert thresholds",
                        "timeoriginalestimate": 3600, "timespent": 1800,
                        "created": "2024-06-01T08:00:00.000+0000",
                        "updated": "2024-06-09T16:00:00.000+0000"}},
                    {"key": "OPS-17", "fields": {"summary": "Rotate API keys",
                        "updated": "2024-06-09T09:00:00.000+0000"}}
                ]}"#,
            )
            .create_async()
            .await;
        let _mock = server
            .mock("GET", "/rest/api/2/issue/OPS-18/comment")
            .with_status(200)
            .with_body(
                r#"{"comments": [
                    {"body": "bumped the p99 threshold", "created": "2024-06-09T16:00:00.000+0000"},
                    {"body": "stale note", "created": "2024-06-08T10:00:00.000+0000"}
                ]}"#,
            )
            .create_async()
            .await;
        let _mock = server
            .mock("GET", "/rest/api/2/issue/OPS-17/comment")
            .with_status(200)
            .with_body(r#"{"comments": []}"#)
            .create_async()
            .await;

        let client = JiraClient::new(JiraConfig::new(server.url(), "fred", "secret"))
            .expect("client");
        let config = Config {
            server: server.url(),
            username: "fred".to_string(),
            api_token: "secret".to_string(),
            tracking_project: "DEV".to_string(),
            start_date_field: "customfield_10014".to_string(),
        };

        let records = fetch_daily_activities(&client, &config, &window())
            .await
            .expect("records");
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].issue_key, "OPS-18");
        assert_eq!(records[0].comments.len(), 1);
        assert_eq!(records[0].comments[0].body, "bumped the p99 threshold");
        assert_eq!(records[0].time_spent_seconds, Some(1800));
        assert!(records[0].link.ends_with("/browse/OPS-18"));
        assert_eq!(records[1].issue_key, "OPS-17");
        assert!(records[1].comments.is_empty());
        assert_eq!(records[1].original_estimate_seconds, None);
    }

    #[tokio::test]
    async fn fetch_collapses_auth_failure_to_none() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", "/rest/api/2/search")
            .with_status(401)
            .with_body(r#"{"errorMessages": ["bad credentials"]}"#)
            .create_async()
            .await;

        let client = JiraClient::new(JiraConfig::new(server.url(), "fred", "wrong"))
            .expect("client");
        let config = Config {
            server: server.url(),
            username: "fred".to_string(),
            api_token: "wrong".to_string(),
            tracking_project: "DEV".to_string(),
            start_date_field: "customfield_10014".to_string(),
        };

        assert!(fetch_daily_activities(&client, &config, &window()).await.is_none());
    }
}
