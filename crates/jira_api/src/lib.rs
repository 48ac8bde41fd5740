//! Typed Jira REST API client crate used by the daily work-log binary.

pub mod client;
pub mod config;
pub mod error;
pub mod models;

pub use client::JiraClient;
pub use config::JiraConfig;
pub use error::{JiraError, Result};
pub use models::{
    Changelog, ChangelogHistory, ChangelogItem, Comment, CommentAuthor, CreatedIssue, Issue,
    IssueFields, SearchResults, User,
};
