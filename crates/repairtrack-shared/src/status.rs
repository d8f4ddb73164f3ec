//! Status classification from the expected return date.

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};

use crate::constants::{MILLIS_PER_DAY, WARNING_WINDOW_DAYS};
use crate::types::Status;

/// Whole days until `expected_return` (taken at 00:00 UTC), rounded up.
///
/// Negative once the date has passed by more than a day's fraction.
pub fn days_until_return(expected_return: NaiveDate, now: DateTime<Utc>) -> i64 {
    let due = expected_return.and_time(NaiveTime::MIN).and_utc();
    let millis = (due - now).num_milliseconds();
    ceil_div(millis, MILLIS_PER_DAY)
}

/// Classify an order by how many days remain until its expected return.
pub fn classify(expected_return: NaiveDate, now: DateTime<Utc>) -> Status {
    let days = days_until_return(expected_return, now);
    if days < 0 {
        Status::Delayed
    } else if days <= WARNING_WINDOW_DAYS {
        Status::Warning
    } else {
        Status::OnTime
    }
}

fn ceil_div(n: i64, d: i64) -> i64 {
    let q = n.div_euclid(d);
    if n.rem_euclid(d) == 0 {
        q
    } else {
        q + 1
    }
}
