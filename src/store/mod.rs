//! Record store abstraction and bundled implementations
//!
//! The service never owns persisted records; it talks to a [`TodoStore`]
//! injected at construction. Two stores ship with the crate:
//! - `memory`: [`InMemoryStore`], a process-local collection
//! - `file`: [`TomlFileStore`], the same collection persisted to a TOML file

mod file;
mod memory;

pub use file::TomlFileStore;
pub use memory::InMemoryStore;

use crate::error::Result;
use crate::todo::{Cursor, NewTodo, SortSpec, Todo, TodoChanges, TodoFilter};
use std::sync::Arc;

/// Capability the service consumes to read and write todo records
///
/// Implementations must be safe to share between concurrent requests. The
/// service adds no locking of its own, so read-after-write consistency is
/// whatever the store provides.
pub trait TodoStore: Send + Sync {
    /// Insert a new record and return the id the store assigned to it
    fn insert(&self, todo: NewTodo) -> Result<String>;

    /// Fetch a record by id, `None` when it does not exist
    fn get(&self, id: &str) -> Result<Option<Todo>>;

    /// Merge changes onto an existing record and return the result
    ///
    /// # Errors
    /// [`TodoError::NotFound`](crate::TodoError::NotFound) when `id` does not resolve
    fn update(&self, id: &str, changes: &TodoChanges) -> Result<Todo>;

    /// Delete a record
    ///
    /// # Errors
    /// [`TodoError::NotFound`](crate::TodoError::NotFound) when `id` does not resolve
    fn delete(&self, id: &str) -> Result<()>;

    /// Return up to `limit` records matching `filter` in `sort` order,
    /// starting strictly after `resume_after` when given
    fn query(
        &self,
        filter: &TodoFilter,
        sort: &SortSpec,
        limit: usize,
        resume_after: Option<&Cursor>,
    ) -> Result<Vec<Todo>>;

    /// Count records matching `filter`
    fn count(&self, filter: &TodoFilter) -> Result<usize>;

    /// Every record in the store
    fn scan_all(&self) -> Result<Vec<Todo>>;
}

impl<S: TodoStore + ?Sized> TodoStore for Arc<S> {
    fn insert(&self, todo: NewTodo) -> Result<String> {
        (**self).insert(todo)
    }

    fn get(&self, id: &str) -> Result<Option<Todo>> {
        (**self).get(id)
    }

    fn update(&self, id: &str, changes: &TodoChanges) -> Result<Todo> {
        (**self).update(id, changes)
    }

    fn delete(&self, id: &str) -> Result<()> {
        (**self).delete(id)
    }

    fn query(
        &self,
        filter: &TodoFilter,
        sort: &SortSpec,
        limit: usize,
        resume_after: Option<&Cursor>,
    ) -> Result<Vec<Todo>> {
        (**self).query(filter, sort, limit, resume_after)
    }

    fn count(&self, filter: &TodoFilter) -> Result<usize> {
        (**self).count(filter)
    }

    fn scan_all(&self) -> Result<Vec<Todo>> {
        (**self).scan_all()
    }
}
