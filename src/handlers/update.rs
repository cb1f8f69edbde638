//! Update handler for the todo service

use crate::TodoService;
use crate::error::Result;
use crate::store::TodoStore;
use crate::todo::{TodoInput, TodoView};
use crate::validation;
use tracing::{debug, warn};

impl<S: TodoStore> TodoService<S> {
    /// Partially update a todo. Only supplied fields change.
    /// **Tip**: Use ""(empty string) to clear `description` or `deadline`.
    /// **Note**: `id` and `createdAt` are immutable; `updatedAt` is refreshed.
    ///
    /// # Errors
    /// - [`TodoError::Validation`](crate::TodoError::Validation) listing every problem with the input
    /// - [`TodoError::NotFound`](crate::TodoError::NotFound) when the id does not resolve
    pub async fn handle_update(&self, id: &str, input: TodoInput) -> Result<TodoView> {
        let id = validation::normalize_id(id);
        let now = self.now();

        let changes = input.into_changes(now).inspect_err(|e| {
            warn!(id = %id, error = %e, "rejected todo update");
        })?;

        let todo = self.store.update(&id, &changes).inspect_err(|e| {
            warn!(id = %id, error = %e, "todo update failed");
        })?;
        debug!(id = %id, "todo updated");

        Ok(TodoView::new(todo, now))
    }
}
