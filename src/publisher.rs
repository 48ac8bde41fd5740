//! Filing of the rendered report under the monthly tracking hierarchy.
//!
//! Strictly sequential lookups, no rollback: every step is a single API call
//! and a missing rung of the hierarchy aborts the run with an error log.

use crate::config::Config;
use chrono::{Datelike, Duration, NaiveDate, Utc};
use jira_api::{JiraClient, JiraError, Result};
use log::{error, info};
use serde_json::{json, Value};

/// Publishes the report: appends a comment to today's sub-task when one
/// exists, otherwise creates the sub-task under the monthly issue. Failures
/// are logged and swallowed; nothing is retried.
pub async fn publish_daily_work_log(client: &JiraClient, config: &Config, report: &str) {
    if let Err(err) = file_report(client, config, report).await {
        log_publish_error(&err);
    }
}

async fn file_report(client: &JiraClient, config: &Config, report: &str) -> Result<()> {
    let me = client.get_myself().await?;
    let identifier = me.identifier().unwrap_or_default().to_string();
    let profile = client.get_user(&identifier).await?;
    let Some(display_name) = profile.display_name else {
        error!("Current user profile has no display name; cannot locate the work-log hierarchy");
        return Ok(());
    };
    info!("Current user: {display_name}");

    let project = &config.tracking_project;

    let epic_jql =
        format!("project = {project} AND issuetype = Epic AND summary ~ \"{display_name}\"");
    let epics = client.search_issues(&epic_jql, None, false).await?;
    let Some(epic) = epics.first() else {
        error!("No epic found with a summary containing '{display_name}'");
        return Ok(());
    };
    info!("Found epic: {}", epic.key);

    let today = Utc::now().date_naive();
    let (month_start, month_end) = month_bounds(today);
    let monthly_jql = format!(
        "project = {project} AND type = Task AND summary ~ \"{display_name}\" \
         AND created >= \"{month_start}\" AND created <= \"{month_end}\""
    );
    let monthly = client.search_issues(&monthly_jql, None, false).await?;
    let Some(monthly_issue) = monthly.first() else {
        error!("No monthly issue found with a summary containing '{display_name}'");
        return Ok(());
    };
    info!("Found monthly issue: {}", monthly_issue.key);

    let today_str = today.format("%Y-%m-%d").to_string();
    let sub_task_jql = format!(
        "parent = {} AND \"Start date\" = \"{today_str}\"",
        monthly_issue.key
    );
    let sub_tasks = client.search_issues(&sub_task_jql, None, false).await?;

    if let Some(existing) = sub_tasks.first() {
        info!("Existing sub-task found with today's start date: {}", existing.key);
        client.add_comment(&existing.key, report).await?;
        info!("Added comment to existing sub-task: {}", existing.key);
    } else {
        let summary = today.format("%d, %b").to_string();
        let fields = sub_task_fields(config, &monthly_issue.key, &summary, report, &today_str);
        let created = client.create_issue(&fields).await?;
        client.assign_issue(&created.key, &identifier).await?;
        info!(
            "Created sub-task {} under monthly issue {}",
            created.key, monthly_issue.key
        );
    }
    Ok(())
}

/// First and last calendar day of `today`'s month, formatted for JQL.
fn month_bounds(today: NaiveDate) -> (String, String) {
    let first = today.with_day(1).unwrap_or(today);
    let next_month = if first.month() == 12 {
        NaiveDate::from_ymd_opt(first.year() + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(first.year(), first.month() + 1, 1)
    };
    let last = next_month
        .map(|day| day - Duration::days(1))
        .unwrap_or(first);
    (
        first.format("%Y-%m-%d").to_string(),
        last.format("%Y-%m-%d").to_string(),
    )
}

fn sub_task_fields(
    config: &Config,
    parent_key: &str,
    summary: &str,
    description: &str,
    today: &str,
) -> Value {
    let mut fields = json!({
        "project": {"key": config.tracking_project},
        "parent": {"key": parent_key},
        "summary": summary,
        "description": description,
        "issuetype": {"name": "Sub-task"},
    });
    fields[config.start_date_field.as_str()] = json!(today);
    fields
}

fn log_publish_error(err: &JiraError) {
    match err {
        JiraError::Http { .. } | JiraError::Authentication(_) => error!("Jira error: {err}"),
        _ => error!("An unexpected error occurred: {err}"),
    }
}
