//! InMemoryStore - collection-backed store for tests and ephemeral runs

use crate::error::{Result, TodoError};
use crate::store::TodoStore;
use crate::todo::{Cursor, NewTodo, SortSpec, Todo, TodoChanges, TodoCollection, TodoFilter};
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};
use uuid::Uuid;

/// In-memory todo store
///
/// Clone-friendly via `Arc`; clones share the same records.
#[derive(Clone, Default)]
pub struct InMemoryStore {
    data: Arc<RwLock<TodoCollection>>,
}

impl InMemoryStore {
    /// Create a new empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Wrap an existing collection
    pub fn from_collection(collection: TodoCollection) -> Self {
        Self {
            data: Arc::new(RwLock::new(collection)),
        }
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, TodoCollection>> {
        self.data
            .read()
            .map_err(|_| TodoError::Store("lock poisoned".into()))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, TodoCollection>> {
        self.data
            .write()
            .map_err(|_| TodoError::Store("lock poisoned".into()))
    }

    /// Run a mutation under the write lock and hand the result to `after`
    /// before the lock is released
    ///
    /// The mutation is applied to a copy that only replaces the shared
    /// collection once both `op` and `after` succeed.
    pub(crate) fn mutate<T>(
        &self,
        op: impl FnOnce(&mut TodoCollection) -> Result<T>,
        after: impl FnOnce(&TodoCollection) -> Result<()>,
    ) -> Result<T> {
        let mut data = self.write()?;
        let mut staged = data.clone();
        let value = op(&mut staged)?;
        after(&staged)?;
        *data = staged;
        Ok(value)
    }
}

pub(crate) fn insert_into(data: &mut TodoCollection, todo: NewTodo) -> Result<String> {
    let mut id = Uuid::new_v4().to_string();
    while data.contains(&id) {
        id = Uuid::new_v4().to_string();
    }
    data.add(todo.into_todo(id.clone()));
    Ok(id)
}

pub(crate) fn update_in(
    data: &mut TodoCollection,
    id: &str,
    changes: &TodoChanges,
) -> Result<Todo> {
    data.update(id, changes)
        .ok_or_else(|| TodoError::NotFound(id.to_string()))
}

pub(crate) fn delete_from(data: &mut TodoCollection, id: &str) -> Result<()> {
    data.remove(id)
        .map(|_| ())
        .ok_or_else(|| TodoError::NotFound(id.to_string()))
}

impl TodoStore for InMemoryStore {
    fn insert(&self, todo: NewTodo) -> Result<String> {
        self.mutate(|data| insert_into(data, todo), |_| Ok(()))
    }

    fn get(&self, id: &str) -> Result<Option<Todo>> {
        Ok(self.read()?.get(id).cloned())
    }

    fn update(&self, id: &str, changes: &TodoChanges) -> Result<Todo> {
        self.mutate(|data| update_in(data, id, changes), |_| Ok(()))
    }

    fn delete(&self, id: &str) -> Result<()> {
        self.mutate(|data| delete_from(data, id), |_| Ok(()))
    }

    fn query(
        &self,
        filter: &TodoFilter,
        sort: &SortSpec,
        limit: usize,
        resume_after: Option<&Cursor>,
    ) -> Result<Vec<Todo>> {
        Ok(self.read()?.query(filter, sort, limit, resume_after))
    }

    fn count(&self, filter: &TodoFilter) -> Result<usize> {
        Ok(self.read()?.count(filter))
    }

    fn scan_all(&self) -> Result<Vec<Todo>> {
        Ok(self.read()?.iter().cloned().collect())
    }
}
