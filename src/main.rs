//! Daily work-log reporter: fetches yesterday's Jira activity, renders it as
//! wiki markup and files it under the user's monthly tracking issue.

mod activity;
mod config;
mod publisher;
mod report;
mod window;

use chrono::{NaiveDate, Utc};
use config::Config;
use jira_api::{JiraClient, JiraConfig};
use log::{error, info};
use std::env;
use window::TimeWindow;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = Config::from_env();
    info!("Connecting to Jira at {}", config.server);

    let jira_config = JiraConfig::new(&config.server, &config.username, &config.api_token);
    let client = match JiraClient::new(jira_config) {
        Ok(client) => client,
        Err(err) => {
            error!("Failed to build Jira client: {err}");
            return;
        }
    };

    let Some(window) = resolve_window() else {
        return;
    };

    match activity::fetch_daily_activities(&client, &config, &window).await {
        Some(records) if !records.is_empty() => {
            let rendered = report::render(&records);
            publisher::publish_daily_work_log(&client, &config, &rendered).await;
        }
        _ => info!("No activities found for the reported day or an error occurred."),
    }
}

/// The reported window: an optional `YYYY-MM-DD` argument overrides the
/// previous-working-day computation.
fn resolve_window() -> Option<TimeWindow> {
    match env::args().nth(1) {
        Some(raw) => match raw.parse::<NaiveDate>() {
            Ok(date) => Some(TimeWindow::for_date(date)),
            Err(_) => {
                error!("Invalid date format: {raw}. Please use YYYY-MM-DD.");
                None
            }
        },
        None => Some(TimeWindow::previous_working_day(Utc::now())),
    }
}
