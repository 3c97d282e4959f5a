//! Date and time display helpers for room cards and the dashboard clock.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

/// Long en-US date, e.g. "Friday, December 20, 2024".
pub fn format_date(date: NaiveDate) -> String {
    date.format("%A, %B %-d, %Y").to_string()
}

/// 12-hour clock time, e.g. "2:00 PM".
pub fn format_time(time: NaiveTime) -> String {
    time.format("%-I:%M %p").to_string()
}

/// Compact relative phrase for the clock line, e.g. "in 2 hours" or
/// "3 days ago". Anything within a minute reads as "starting now".
pub fn relative_to(now: NaiveDateTime, when: NaiveDateTime) -> String {
    let seconds = when.signed_duration_since(now).num_seconds();
    let magnitude = seconds.unsigned_abs();
    if magnitude < 60 {
        return "starting now".to_string();
    }

    let (amount, unit) = if magnitude < 3_600 {
        (magnitude / 60, "minute")
    } else if magnitude < 86_400 {
        (magnitude / 3_600, "hour")
    } else {
        (magnitude / 86_400, "day")
    };
    let plural = if amount == 1 { "" } else { "s" };

    if seconds > 0 {
        format!("in {amount} {unit}{plural}")
    } else {
        format!("{amount} {unit}{plural} ago")
    }
}
