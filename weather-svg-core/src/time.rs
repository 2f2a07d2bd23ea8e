//! Weekday name and "time since" phrasing.

use chrono::{DateTime, Datelike, Months, TimeZone, Utc, Weekday};

pub const DAY_NAMES: [&str; 7] =
    ["Monday", "Tuesday", "Wednesday", "Thursday", "Friday", "Saturday", "Sunday"];

/// Returns the weekday of `now` (in its own timezone) and the elapsed time between `now` and
/// `reference`, regardless of which one comes first.
pub fn day_and_elapsed<Tz: TimeZone>(
    now: &DateTime<Tz>,
    reference: DateTime<Utc>,
) -> (&'static str, String) {
    let day = day_name(now.weekday());
    let elapsed = elapsed_description(now.with_timezone(&Utc), reference);

    (day, elapsed)
}

pub fn day_name(weekday: Weekday) -> &'static str {
    DAY_NAMES[weekday.num_days_from_monday() as usize]
}

/// Describes `|b - a|` in its coarsest calendar unit: "2 years", "5 months", "1 week",
/// "3 days", ... down to "a few seconds".
pub fn elapsed_description(a: DateTime<Utc>, b: DateTime<Utc>) -> String {
    let (start, end) = if a <= b { (a, b) } else { (b, a) };

    let months = whole_months_between(start, end);
    if months >= 12 {
        return plural(months / 12, "year");
    }
    if months > 0 {
        return plural(months, "month");
    }

    let rest = end - start;
    let days = rest.num_days();
    if days >= 7 {
        return plural(days / 7, "week");
    }
    if days > 0 {
        return plural(days, "day");
    }
    if rest.num_hours() > 0 {
        return plural(rest.num_hours(), "hour");
    }
    if rest.num_minutes() > 0 {
        return plural(rest.num_minutes(), "minute");
    }

    let seconds = rest.num_seconds();
    if seconds < 10 { "a few seconds".to_string() } else { plural(seconds, "second") }
}

/// Number of whole calendar months from `start` to `end`; `start <= end`.
///
/// Month arithmetic clamps to the end of short months, so Jan 31 + 1 month is Feb 28/29.
fn whole_months_between(start: DateTime<Utc>, end: DateTime<Utc>) -> u32 {
    let span = (end.year() - start.year()) * 12 + end.month() as i32 - start.month() as i32;
    let mut months = span.max(0) as u32;

    while months > 0 {
        match start.checked_add_months(Months::new(months)) {
            Some(anchor) if anchor <= end => break,
            _ => months -= 1,
        }
    }

    months
}

fn plural<N: Into<i64>>(count: N, unit: &str) -> String {
    let count = count.into();
    if count == 1 { format!("1 {unit}") } else { format!("{count} {unit}s") }
}
