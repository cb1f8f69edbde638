//! Get handler for the todo service

use crate::TodoService;
use crate::error::{Result, TodoError};
use crate::store::TodoStore;
use crate::todo::TodoView;
use crate::validation;
use tracing::warn;

impl<S: TodoStore> TodoService<S> {
    /// Fetch a single todo annotated with its deadline status
    ///
    /// # Errors
    /// [`TodoError::NotFound`] when the id does not resolve
    pub async fn handle_get(&self, id: &str) -> Result<TodoView> {
        let id = validation::normalize_id(id);
        match self.store.get(&id)? {
            Some(todo) => Ok(TodoView::new(todo, self.now())),
            None => {
                warn!(id = %id, "todo not found");
                Err(TodoError::NotFound(id))
            }
        }
    }
}
