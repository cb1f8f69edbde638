//! Delete handler for the todo service

use crate::TodoService;
use crate::error::Result;
use crate::store::TodoStore;
use crate::validation;
use tracing::{debug, warn};

impl<S: TodoStore> TodoService<S> {
    /// Permanently delete a todo
    ///
    /// # Errors
    /// [`TodoError::NotFound`](crate::TodoError::NotFound) when the id does
    /// not resolve; deleting twice is never a silent success.
    pub async fn handle_delete(&self, id: &str) -> Result<()> {
        let id = validation::normalize_id(id);
        self.store.delete(&id).inspect_err(|e| {
            warn!(id = %id, error = %e, "todo delete failed");
        })?;
        debug!(id = %id, "todo deleted");
        Ok(())
    }
}
