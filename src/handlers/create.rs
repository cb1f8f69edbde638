//! Create handler for the todo service

use crate::TodoService;
use crate::error::{Result, TodoError};
use crate::store::TodoStore;
use crate::todo::{TodoInput, TodoView};
use tracing::{debug, warn};

impl<S: TodoStore> TodoService<S> {
    /// Validate and store a new todo, returning it as stored
    ///
    /// Status defaults to `pending`; `createdAt` and `updatedAt` are stamped
    /// with the current time.
    ///
    /// # Errors
    /// - [`TodoError::Validation`] listing every problem with the input
    /// - [`TodoError::Store`] if the store fails
    pub async fn handle_create(&self, input: TodoInput) -> Result<TodoView> {
        let now = self.now();
        let new_todo = input.into_new(now).inspect_err(|e| {
            warn!(error = %e, "rejected todo creation");
        })?;

        let id = self.store.insert(new_todo)?;
        debug!(id = %id, "todo created");

        let todo = self
            .store
            .get(&id)?
            .ok_or_else(|| {
                TodoError::Store(format!("Created todo '{}' could not be read back", id))
            })?;

        Ok(TodoView::new(todo, now))
    }
}
