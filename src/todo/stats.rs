use crate::todo::record::{Todo, TodoStatus};
use chrono::{DateTime, Utc};
use serde::Serialize;

/// Full-collection statistics
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TodoStats {
    pub total: usize,
    pub pending: usize,
    pub in_progress: usize,
    pub completed: usize,
    /// Open todos whose deadline has passed; completed todos never count
    pub overdue: usize,
    /// `round(completed / total * 100)`, 0 for an empty collection
    pub completion_rate: u32,
}

/// Aggregate a collection in a single pass
pub fn aggregate<'a>(todos: impl IntoIterator<Item = &'a Todo>, now: DateTime<Utc>) -> TodoStats {
    let mut stats = TodoStats::default();

    for todo in todos {
        stats.total += 1;
        match todo.status {
            TodoStatus::Pending => stats.pending += 1,
            TodoStatus::InProgress => stats.in_progress += 1,
            TodoStatus::Completed => stats.completed += 1,
        }
        if todo.is_overdue(now) {
            stats.overdue += 1;
        }
    }

    stats.completion_rate = completion_rate(stats.completed, stats.total);
    stats
}

fn completion_rate(completed: usize, total: usize) -> u32 {
    if total == 0 {
        return 0;
    }
    (completed as f64 / total as f64 * 100.0).round() as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_completion_rate_rounding() {
        assert_eq!(completion_rate(0, 0), 0);
        assert_eq!(completion_rate(1, 3), 33);
        assert_eq!(completion_rate(2, 3), 67);
        assert_eq!(completion_rate(1, 8), 13);
        assert_eq!(completion_rate(5, 5), 100);
    }
}
