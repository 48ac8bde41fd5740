//! Environment-backed runtime configuration.

use std::env;

pub const DEFAULT_TRACKING_PROJECT: &str = "DEV";
pub const DEFAULT_START_DATE_FIELD: &str = "customfield_10014";

/// Runtime settings read from the process environment. The tracking project
/// is both excluded from the activity query and hosts the work-log hierarchy.
#[derive(Clone, Debug)]
pub struct Config {
    pub server: String,
    pub username: String,
    pub api_token: String,
    pub tracking_project: String,
    pub start_date_field: String,
}

impl Config {
    /// Reads settings from the environment. Missing credentials are not
    /// validated here; the first API call surfaces them as an auth failure.
    pub fn from_env() -> Self {
        Self {
            server: env::var("JIRA_SERVER").unwrap_or_default(),
            username: env::var("JIRA_USERNAME").unwrap_or_default(),
            api_token: env::var("JIRA_API_TOKEN").unwrap_or_default(),
            tracking_project: env::var("JIRA_TRACKING_PROJECT")
                .unwrap_or_else(|_| DEFAULT_TRACKING_PROJECT.to_string()),
            start_date_field: env::var("JIRA_START_DATE_FIELD")
                .unwrap_or_else(|_| DEFAULT_START_DATE_FIELD.to_string()),
        }
    }
}
