//! Text formatting for the report page.

use chrono::{DateTime, Local, NaiveDate, Utc};

/// "Generated on ..." line, in the viewer's local time.
pub fn format_generated_at(generated_at: DateTime<Utc>) -> String {
    generated_at
        .with_timezone(&Local)
        .format("Generated on %Y-%m-%d at %H:%M:%S")
        .to_string()
}

/// Test date as entered, or the browser's placeholder for an unreadable one.
pub fn format_test_date(test_date: Option<NaiveDate>) -> String {
    test_date
        .map(|date| date.format("%Y-%m-%d").to_string())
        .unwrap_or_else(|| "Invalid Date".to_string())
}
