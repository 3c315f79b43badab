//! CSV row assembly.

use crate::parser::ParsedFields;
use crate::source::Issue;

/// Appends the issue trailer to parsed fields.
///
/// The trailer is `[title], url, created_at, closed_at`. Timestamps use the
/// default `DateTime<Utc>` text form; an open issue has an empty close time.
#[must_use]
pub fn build_row(mut fields: ParsedFields, issue: &Issue, include_title: bool) -> Vec<String> {
    if include_title {
        fields.push(issue.title.clone());
    }
    fields.push(issue.html_url.clone());
    fields.push(issue.created_at.to_string());
    fields.push(
        issue
            .closed_at
            .map(|closed| closed.to_string())
            .unwrap_or_default(),
    );
    fields
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::IssueState;
    use chrono::{TimeZone, Utc};

    fn issue(closed: bool) -> Issue {
        Issue {
            number: 7,
            title: "[Invoice Delivery] missing PDF".to_string(),
            body: String::new(),
            author: "octo".to_string(),
            state: if closed { IssueState::Closed } else { IssueState::Open },
            html_url: "https://github.example.com/mantle/ops/issues/7".to_string(),
            created_at: Utc.with_ymd_and_hms(2023, 5, 1, 10, 0, 0).unwrap(),
            closed_at: closed.then(|| Utc.with_ymd_and_hms(2023, 5, 3, 9, 30, 0).unwrap()),
        }
    }

    #[test]
    fn appends_trailer_with_title() {
        let row = build_row(vec!["Alice".to_string()], &issue(true), true);
        assert_eq!(
            row,
            vec![
                "Alice",
                "[Invoice Delivery] missing PDF",
                "https://github.example.com/mantle/ops/issues/7",
                "2023-05-01 10:00:00 UTC",
                "2023-05-03 09:30:00 UTC",
            ]
        );
    }

    #[test]
    fn open_issue_has_empty_close_time_and_title_is_optional() {
        let row = build_row(Vec::new(), &issue(false), false);
        assert_eq!(
            row,
            vec![
                "https://github.example.com/mantle/ops/issues/7",
                "2023-05-01 10:00:00 UTC",
                "",
            ]
        );
    }
}
