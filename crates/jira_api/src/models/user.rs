//! User models returned by Jira identity endpoints.

use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
/// Represents a user returned by the Jira API, including login name, account id, display name and email address.
pub struct User {
    pub name: Option<String>,
    pub account_id: Option<String>,
    pub display_name: Option<String>,
    pub email_address: Option<String>,
}

impl User {
    /// Returns the best available identifier for follow-up user lookups.
    pub fn identifier(&self) -> Option<&str> {
        self.name.as_deref().or(self.account_id.as_deref())
    }
}
