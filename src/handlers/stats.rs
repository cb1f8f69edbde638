//! Stats handler for the todo service

use crate::TodoService;
use crate::error::Result;
use crate::store::TodoStore;
use crate::todo::{self, TodoStats};
use tracing::debug;

impl<S: TodoStore> TodoService<S> {
    /// Aggregate counts, overdue todos and completion rate over every record
    pub async fn handle_stats(&self) -> Result<TodoStats> {
        let todos = self.store.scan_all()?;
        let stats = todo::aggregate(&todos, self.now());
        debug!(total = stats.total, overdue = stats.overdue, "computed stats");
        Ok(stats)
    }
}
