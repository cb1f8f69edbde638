use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

const DAY_MILLIS: i64 = 24 * 60 * 60 * 1000;

/// Number of days ahead that still counts as "due soon"
pub const DUE_SOON_DAYS: i64 = 3;

/// Urgency of a todo derived from its deadline; never stored
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DeadlineStatus {
    /// No deadline, or the deadline is more than three days away
    None,
    /// The deadline has passed
    Overdue,
    /// Due within the current day window
    DueToday,
    /// Due within the next three days
    DueSoon,
}

/// Classify a deadline relative to `now`
///
/// A deadline strictly before `now` is overdue. Otherwise the distance is
/// rounded up to whole days: 0 is due today, 1..=3 is due soon and anything
/// further out has no urgency.
pub fn classify(deadline: Option<DateTime<Utc>>, now: DateTime<Utc>) -> DeadlineStatus {
    let Some(deadline) = deadline else {
        return DeadlineStatus::None;
    };

    let diff_millis = (deadline - now).num_milliseconds();
    if diff_millis < 0 {
        return DeadlineStatus::Overdue;
    }

    match days_until(diff_millis) {
        0 => DeadlineStatus::DueToday,
        d if d <= DUE_SOON_DAYS => DeadlineStatus::DueSoon,
        _ => DeadlineStatus::None,
    }
}

/// ceil(diff / 1 day) for a non-negative difference
fn days_until(diff_millis: i64) -> i64 {
    diff_millis / DAY_MILLIS + i64::from(diff_millis % DAY_MILLIS != 0)
}
