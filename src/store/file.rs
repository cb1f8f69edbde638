use crate::error::Result;
use crate::store::TodoStore;
use crate::store::memory::{InMemoryStore, delete_from, insert_into, update_in};
use crate::todo::{Cursor, NewTodo, SortSpec, Todo, TodoChanges, TodoCollection, TodoFilter};
use anyhow::Context;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, error, info};

/// Todo store persisted to a TOML file
///
/// The whole collection is held in memory and the file is rewritten after
/// every successful mutation, while the write lock is still held.
#[derive(Clone)]
pub struct TomlFileStore {
    file_path: PathBuf,
    inner: InMemoryStore,
}

impl TomlFileStore {
    /// Open the store, loading existing records if the file exists
    ///
    /// # Arguments
    /// * `file_path` - Path to the TOML data file
    pub fn open(file_path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let file_path = file_path.as_ref().to_path_buf();
        let collection = load(&file_path)?;
        info!(
            path = %file_path.display(),
            todos = collection.len(),
            "opened todo file"
        );
        Ok(Self {
            file_path,
            inner: InMemoryStore::from_collection(collection),
        })
    }

    /// Path of the backing file
    pub fn file_path(&self) -> &Path {
        &self.file_path
    }

    fn save(&self, data: &TodoCollection) -> Result<()> {
        let content = toml::to_string_pretty(data)?;
        fs::write(&self.file_path, content).inspect_err(|e| {
            error!(path = %self.file_path.display(), error = %e, "failed to write todo file");
        })?;
        debug!(path = %self.file_path.display(), todos = data.len(), "saved todo file");
        Ok(())
    }
}

fn load(file_path: &Path) -> anyhow::Result<TodoCollection> {
    if !file_path.exists() {
        return Ok(TodoCollection::new());
    }

    let content = fs::read_to_string(file_path)
        .with_context(|| format!("Failed to read {}", file_path.display()))?;
    if content.trim().is_empty() {
        return Ok(TodoCollection::new());
    }
    let data: TodoCollection = toml::from_str(&content)
        .with_context(|| format!("Failed to parse {}", file_path.display()))?;
    Ok(data)
}

impl TodoStore for TomlFileStore {
    fn insert(&self, todo: NewTodo) -> Result<String> {
        self.inner
            .mutate(|data| insert_into(data, todo), |data| self.save(data))
    }

    fn get(&self, id: &str) -> Result<Option<Todo>> {
        self.inner.get(id)
    }

    fn update(&self, id: &str, changes: &TodoChanges) -> Result<Todo> {
        self.inner
            .mutate(|data| update_in(data, id, changes), |data| self.save(data))
    }

    fn delete(&self, id: &str) -> Result<()> {
        self.inner
            .mutate(|data| delete_from(data, id), |data| self.save(data))
    }

    fn query(
        &self,
        filter: &TodoFilter,
        sort: &SortSpec,
        limit: usize,
        resume_after: Option<&Cursor>,
    ) -> Result<Vec<Todo>> {
        self.inner.query(filter, sort, limit, resume_after)
    }

    fn count(&self, filter: &TodoFilter) -> Result<usize> {
        self.inner.count(filter)
    }

    fn scan_all(&self) -> Result<Vec<Todo>> {
        self.inner.scan_all()
    }
}
