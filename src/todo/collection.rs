use crate::todo::query::{Cursor, SortSpec, TodoFilter};
use crate::todo::record::{Todo, TodoChanges, TodoStatus};
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::HashMap;

/// Current on-disk format version
pub const FORMAT_VERSION: u32 = 1;

/// Ordered collection of todo records backing the bundled stores
#[derive(Debug, Clone, Serialize)]
pub struct TodoCollection {
    /// Format version for the TOML file (current: 1)
    pub format_version: u32,

    /// All records in insertion order
    ///
    /// Insertion order keeps the TOML file stable across saves so diffs stay
    /// small; listings never rely on it and always sort explicitly.
    pub(crate) todos: Vec<Todo>,

    /// id → status index for O(1) existence checks
    ///
    /// Not serialized; rebuilt from `todos` on load.
    #[serde(skip)]
    pub(crate) todo_map: HashMap<String, TodoStatus>,
}

impl Default for TodoCollection {
    fn default() -> Self {
        Self {
            format_version: FORMAT_VERSION,
            todos: Vec::new(),
            todo_map: HashMap::new(),
        }
    }
}

#[derive(Deserialize)]
struct CollectionHelper {
    #[serde(default)]
    format_version: Option<u32>,
    #[serde(default)]
    todos: Vec<Todo>,
}

impl<'de> Deserialize<'de> for TodoCollection {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let helper = CollectionHelper::deserialize(deserializer)?;
        let mut collection = TodoCollection {
            format_version: helper.format_version.unwrap_or(FORMAT_VERSION),
            ..Default::default()
        };
        for todo in helper.todos {
            if collection.contains(&todo.id) {
                return Err(serde::de::Error::custom(format!(
                    "Duplicate todo id '{}'",
                    todo.id
                )));
            }
            collection.add(todo);
        }
        Ok(collection)
    }
}

impl TodoCollection {
    /// Create a new empty collection
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of records
    pub fn len(&self) -> usize {
        self.todos.len()
    }

    /// Check if the collection holds no records
    pub fn is_empty(&self) -> bool {
        self.todos.is_empty()
    }

    /// Check if a record with this id exists
    pub fn contains(&self, id: &str) -> bool {
        self.todo_map.contains_key(id)
    }

    /// Find a record by id
    pub fn get(&self, id: &str) -> Option<&Todo> {
        if !self.contains(id) {
            return None;
        }
        self.todos.iter().find(|t| t.id == id)
    }

    /// Iterate over records in insertion order
    pub fn iter(&self) -> impl Iterator<Item = &Todo> {
        self.todos.iter()
    }

    /// Add a record
    ///
    /// The caller is responsible for id uniqueness; see [`contains`](Self::contains).
    pub fn add(&mut self, todo: Todo) {
        self.todo_map.insert(todo.id.clone(), todo.status);
        self.todos.push(todo);
    }

    /// Merge changes onto a record
    ///
    /// # Returns
    /// The updated record, or `None` if the id does not exist
    pub fn update(&mut self, id: &str, changes: &TodoChanges) -> Option<Todo> {
        let todo = self.todos.iter_mut().find(|t| t.id == id)?;
        todo.apply(changes);
        self.todo_map.insert(todo.id.clone(), todo.status);
        Some(todo.clone())
    }

    /// Remove a record and return it
    pub fn remove(&mut self, id: &str) -> Option<Todo> {
        let pos = self.todos.iter().position(|t| t.id == id)?;
        self.todo_map.remove(id);
        Some(self.todos.remove(pos))
    }

    /// Count records matching a filter
    pub fn count(&self, filter: &TodoFilter) -> usize {
        match filter.status {
            None => self.todo_map.len(),
            Some(status) => self.todo_map.values().filter(|&&s| s == status).count(),
        }
    }

    /// Ordered, filtered slice of the collection
    ///
    /// # Arguments
    /// * `filter` - Status predicate
    /// * `sort` - Total ordering to apply
    /// * `limit` - Maximum number of records to return
    /// * `resume_after` - Only records strictly after this cursor are considered
    pub fn query(
        &self,
        filter: &TodoFilter,
        sort: &SortSpec,
        limit: usize,
        resume_after: Option<&Cursor>,
    ) -> Vec<Todo> {
        let mut matching: Vec<&Todo> = self
            .todos
            .iter()
            .filter(|t| filter.matches(t))
            .filter(|t| resume_after.is_none_or(|c| sort.is_after(t, c)))
            .collect();

        matching.sort_by(|a, b| sort.compare(a, b));
        matching.into_iter().take(limit).cloned().collect()
    }
}
