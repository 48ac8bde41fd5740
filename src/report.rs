//! Jira wiki markup rendering of the daily activity report.

use crate::activity::ActivityRecord;

const PANEL_STYLE: &str = "borderStyle=dashed|borderColor=#A9A9A9|titleBGColor=#E6F7E6|bgColor=#deebff";

/// Renders one panel per record (input order preserved) followed by a single
/// totals panel. Totals treat absent time fields as zero; individual fields
/// render as `N/A` when absent.
pub fn render(records: &[ActivityRecord]) -> String {
    let mut out = String::new();
    let mut total_estimate: u64 = 0;
    let mut total_spent: u64 = 0;

    for record in records {
        total_estimate += record.original_estimate_seconds.unwrap_or(0);
        total_spent += record.time_spent_seconds.unwrap_or(0);
        out.push_str(&render_panel(record));
        out.push_str("\n----\n\n");
    }

    out.push_str(&format!("{{panel:title=Total Time Summary|{PANEL_STYLE}}}\n"));
    out.push_str(&format!(
        "*Total Original Estimate*: {}\n",
        format_time(Some(total_estimate))
    ));
    out.push_str(&format!(
        "*Total Time Spent*: {}\n",
        format_time(Some(total_spent))
    ));
    out.push_str("{panel}\n");
    out
}

fn render_panel(record: &ActivityRecord) -> String {
    let mut panel = format!(
        "{{panel:title={} - {}|{PANEL_STYLE}}}\n",
        record.issue_key, record.summary
    );
    panel.push_str(&format!("*Link*: [{}]\n", record.link));
    panel.push_str(&format!(
        "*Original Estimate*: {}\n",
        format_time(record.original_estimate_seconds)
    ));
    panel.push_str(&format!("*Created*: {}\n", record.created));
    panel.push_str(&format!("*Updated*: {}\n", record.updated));
    panel.push_str(&format!(
        "*Time Spent*: {}\n\n",
        format_time(record.time_spent_seconds)
    ));

    if !record.status_changes.is_empty() {
        panel.push_str("*Status Changes:*\n");
        for change in &record.status_changes {
            panel.push_str(&format!(
                " - From '{}' to '{}' on {}\n",
                change.from, change.to, change.at
            ));
        }
        panel.push('\n');
    }

    // When there are no comments the label and rule lines are still emitted,
    // empty, so the panel keeps its shape.
    let label = if record.comments.is_empty() { "" } else { "*Comments:*" };
    panel.push_str(label);
    panel.push('\n');
    let first_rule = record
        .comments
        .first()
        .map(|comment| dash_rule(&comment.body))
        .unwrap_or_default();
    panel.push_str(&first_rule);
    panel.push('\n');
    for comment in &record.comments {
        panel.push_str(&format!("* {}\n", comment.body));
        panel.push_str(&format!("date: {}\n", comment.created_date));
        panel.push_str(&format!("{}\n", dash_rule(&comment.body)));
    }
    panel.push_str("{panel}\n");
    panel
}

fn dash_rule(body: &str) -> String {
    "-".repeat(body.chars().count())
}

/// `None` renders as `N/A`; sub-minute remainders are dropped. Callers never
/// pass negative values (seconds are unsigned end to end).
pub fn format_time(seconds: Option<u64>) -> String {
    match seconds {
        None => "N/A".to_string(),
        Some(total) => format!("{}h {}m", total / 3600, (total % 3600) / 60),
    }
}

#[cfg(test)]
mod tests {
    use super::{format_time, render};
    use crate::activity::{ActivityComment, ActivityRecord, StatusChange};

    fn record(key: &str, estimate: Option<u64>, spent: Option<u64>) -> ActivityRecord {
        ActivityRecord {
            issue_key: key.to_string(),
            summary: format!("Summary for {key}"),
            link: format!("https://jira.example.com/browse/{key}"),
            original_estimate_seconds: estimate,
            time_spent_seconds: spent,
            created: "2024-06-01".to_string(),
            updated: "2024-06-09".to_string(),
            comments: Vec::new(),
            status_changes: Vec::new(),
        }
    }

    #[test]
    fn format_time_table() {
        assert_eq!(format_time(None), "N/A");
        assert_eq!(format_time(Some(0)), "0h 0m");
        assert_eq!(format_time(Some(3661)), "1h 1m");
        assert_eq!(format_time(Some(7200)), "2h 0m");
    }

    #[test]
    fn totals_treat_absent_as_zero_but_render_na_individually() {
        let records = vec![
            record("OPS-1", Some(3600), Some(3600)),
            record("OPS-2", None, None),
            record("OPS-3", Some(1800), Some(1800)),
        ];
        let report = render(&records);
        assert!(report.contains("*Total Original Estimate*: 1h 30m\n"));
        assert!(report.contains("*Total Time Spent*: 1h 30m\n"));
        assert!(report.contains("*Original Estimate*: N/A\n"));
        assert!(report.contains("*Time Spent*: N/A\n"));
    }

    #[test]
    fn zero_comment_panel_keeps_empty_label_and_rule_lines() {
        let report = render(&[record("OPS-1", Some(0), Some(0))]);
        assert!(report.contains("*Time Spent*: 0h 0m\n\n\n\n{panel}\n"));
    }

    #[test]
    fn comments_render_with_date_and_rule() {
        let mut r = record("OPS-1", Some(3600), None);
        r.comments.push(ActivityComment {
            body: "rolled out".to_string(),
            created_date: "2024-06-09".to_string(),
        });
        let report = render(&[r]);
        assert!(report.contains("*Comments:*\n----------\n* rolled out\ndate: 2024-06-09\n----------\n{panel}\n"));
    }

    #[test]
    fn status_changes_render_between_times_and_comments() {
        let mut r = record("OPS-1", None, None);
        r.status_changes.push(StatusChange {
            from: "Open".to_string(),
            to: "Done".to_string(),
            at: "2024-06-09 10:00".to_string(),
        });
        let report = render(&[r]);
        assert!(report.contains("*Status Changes:*\n - From 'Open' to 'Done' on 2024-06-09 10:00\n"));
    }

    #[test]
    fn two_records_produce_two_panels_and_one_totals_panel() {
        let records = vec![
            record("OPS-2", Some(3600), Some(1800)),
            record("OPS-1", None, Some(600)),
        ];
        let report = render(&records);

        let first = report.find("{panel:title=OPS-2").expect("first panel");
        let second = report.find("{panel:title=OPS-1").expect("second panel");
        assert!(first < second, "panels must preserve input order");

        assert_eq!(report.matches("Total Time Summary").count(), 1);
        assert!(report.contains("*Total Original Estimate*: 1h 0m\n"));
        assert!(report.contains("*Total Time Spent*: 0h 40m\n"));
        assert_eq!(report.matches("\n----\n").count(), 2);
    }
}
