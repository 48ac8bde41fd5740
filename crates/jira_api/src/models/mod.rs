mod comment;
mod issue;
mod search;
mod user;

pub use comment::{Comment, CommentAuthor, CommentPage};
pub use issue::{Changelog, ChangelogHistory, ChangelogItem, Issue, IssueFields};
pub use search::{CreatedIssue, SearchResults};
pub use user::User;

use chrono::{DateTime, FixedOffset};

/// Parses Jira's ISO-like timestamp format (`2024-06-10T09:30:00.000+0300`),
/// falling back to RFC 3339.
pub(crate) fn parse_timestamp(raw: &str) -> Option<DateTime<FixedOffset>> {
    DateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.3f%z")
        .or_else(|_| DateTime::parse_from_rfc3339(raw))
        .ok()
}

/// Calendar-date prefix of a Jira timestamp string.
pub(crate) fn date_part(raw: &str) -> &str {
    raw.split('T').next().unwrap_or(raw)
}

#[cfg(test)]
mod tests {
    use super::{date_part, parse_timestamp};
    use chrono::{Datelike, Timelike};

    #[test]
    fn parses_jira_timestamp_with_offset() {
        let parsed = parse_timestamp("2024-06-10T09:30:05.123+0300").expect("timestamp");
        assert_eq!(parsed.year(), 2024);
        assert_eq!(parsed.hour(), 9);
        assert_eq!(parsed.offset().local_minus_utc(), 3 * 3600);
    }

    #[test]
    fn parses_rfc3339_fallback() {
        assert!(parse_timestamp("2024-06-10T09:30:05+03:00").is_some());
    }

    #[test]
    fn rejects_garbage_timestamp() {
        assert!(parse_timestamp("yesterday-ish").is_none());
    }

    #[test]
    fn date_part_strips_time() {
        assert_eq!(date_part("2024-06-10T09:30:05.123+0300"), "2024-06-10");
        assert_eq!(date_part("2024-06-10"), "2024-06-10");
    }
}
