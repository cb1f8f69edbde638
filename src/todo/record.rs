use crate::error::{Result, TodoError};
use crate::todo::deadline::{DeadlineStatus, classify};
use crate::validation;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Todo status
///
/// Serialized as `pending`, `in-progress` and `completed`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TodoStatus {
    /// Not started yet
    #[default]
    Pending,
    /// Being worked on
    InProgress,
    /// Finished
    Completed,
}

impl TodoStatus {
    /// Wire name of the status
    pub fn as_str(&self) -> &'static str {
        match self {
            TodoStatus::Pending => "pending",
            TodoStatus::InProgress => "in-progress",
            TodoStatus::Completed => "completed",
        }
    }
}

impl fmt::Display for TodoStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TodoStatus {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "pending" => Ok(TodoStatus::Pending),
            "in-progress" => Ok(TodoStatus::InProgress),
            "completed" => Ok(TodoStatus::Completed),
            _ => Err(format!(
                "Invalid status '{}'. Valid options are: pending, in-progress, completed",
                s
            )),
        }
    }
}

/// A stored todo record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Todo {
    /// Store-assigned identifier, immutable
    pub id: String,
    /// Non-blank title
    pub title: String,
    /// Optional free-form description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Current status
    #[serde(default)]
    pub status: TodoStatus,
    /// Optional deadline
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deadline: Option<DateTime<Utc>>,
    /// Set once at creation
    pub created_at: DateTime<Utc>,
    /// Refreshed on every mutation
    pub updated_at: DateTime<Utc>,
}

impl Todo {
    /// Merge validated changes onto this record and refresh `updated_at`
    ///
    /// `id` and `created_at` are never touched.
    pub fn apply(&mut self, changes: &TodoChanges) {
        if let Some(ref title) = changes.title {
            self.title = title.clone();
        }
        if let Some(ref description) = changes.description {
            self.description = description.clone();
        }
        if let Some(status) = changes.status {
            self.status = status;
        }
        if let Some(deadline) = changes.deadline {
            self.deadline = deadline;
        }
        self.updated_at = changes.updated_at.max(self.created_at);
    }

    /// Check if the deadline has passed while the todo is still open
    pub fn is_overdue(&self, now: DateTime<Utc>) -> bool {
        self.status != TodoStatus::Completed
            && classify(self.deadline, now) == DeadlineStatus::Overdue
    }
}

/// A validated todo ready to be inserted; the store assigns the id
#[derive(Debug, Clone, PartialEq)]
pub struct NewTodo {
    pub title: String,
    pub description: Option<String>,
    pub status: TodoStatus,
    pub deadline: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl NewTodo {
    /// Build the stored record under the given id
    pub fn into_todo(self, id: String) -> Todo {
        Todo {
            id,
            title: self.title,
            description: self.description,
            status: self.status,
            deadline: self.deadline,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

/// Validated partial update
///
/// `description` and `deadline` use a nested `Option`: `Some(None)` clears
/// the field, `None` leaves it alone.
#[derive(Debug, Clone, PartialEq)]
pub struct TodoChanges {
    pub title: Option<String>,
    pub description: Option<Option<String>>,
    pub status: Option<TodoStatus>,
    pub deadline: Option<Option<DateTime<Utc>>>,
    pub updated_at: DateTime<Utc>,
}

/// Unvalidated todo fields as received from a client
///
/// Used for both creation and partial updates. On update an empty string
/// clears `description` or `deadline`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TodoInput {
    pub title: Option<String>,
    pub description: Option<String>,
    pub status: Option<String>,
    pub deadline: Option<String>,
}

impl TodoInput {
    /// Validate for creation, stamping both timestamps with `now`
    ///
    /// # Errors
    /// [`TodoError::Validation`] listing every violated constraint
    pub fn into_new(self, now: DateTime<Utc>) -> Result<NewTodo> {
        let mut violations = Vec::new();

        let title = match self.title.as_deref().map(validation::validate_title) {
            Some(Ok(title)) => title,
            Some(Err(msg)) => {
                violations.push(msg);
                String::new()
            }
            None => {
                violations.push("Title is required".to_string());
                String::new()
            }
        };

        let status = match self.status.as_deref() {
            None => TodoStatus::default(),
            Some(s) => validation::parse_status(s).unwrap_or_else(|msg| {
                violations.push(msg);
                TodoStatus::default()
            }),
        };

        let deadline = match self.deadline.as_deref() {
            None => None,
            Some(s) => match validation::parse_deadline(s) {
                Ok(d) => Some(d),
                Err(msg) => {
                    violations.push(msg);
                    None
                }
            },
        };

        if !violations.is_empty() {
            return Err(TodoError::Validation(violations));
        }

        Ok(NewTodo {
            title,
            description: self.description.filter(|d| !d.is_empty()),
            status,
            deadline,
            created_at: now,
            updated_at: now,
        })
    }

    /// Validate as a partial update, stamping `updated_at` with `now`
    ///
    /// # Errors
    /// [`TodoError::Validation`] listing every violated constraint
    pub fn into_changes(self, now: DateTime<Utc>) -> Result<TodoChanges> {
        let mut violations = Vec::new();

        let title = self
            .title
            .as_deref()
            .and_then(|t| match validation::validate_title(t) {
                Ok(title) => Some(title),
                Err(msg) => {
                    violations.push(msg);
                    None
                }
            });

        let status = self
            .status
            .as_deref()
            .and_then(|s| match validation::parse_status(s) {
                Ok(status) => Some(status),
                Err(msg) => {
                    violations.push(msg);
                    None
                }
            });

        let deadline = match self.deadline.as_deref() {
            None => None,
            Some(s) if s.trim().is_empty() => Some(None),
            Some(s) => match validation::parse_deadline(s) {
                Ok(d) => Some(Some(d)),
                Err(msg) => {
                    violations.push(msg);
                    None
                }
            },
        };

        if !violations.is_empty() {
            return Err(TodoError::Validation(violations));
        }

        Ok(TodoChanges {
            title,
            description: self
                .description
                .map(|d| if d.is_empty() { None } else { Some(d) }),
            status,
            deadline,
            updated_at: now,
        })
    }
}

/// A todo annotated with its derived deadline status, as returned to clients
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TodoView {
    #[serde(flatten)]
    pub todo: Todo,
    pub deadline_status: DeadlineStatus,
}

impl TodoView {
    /// Annotate a todo relative to `now`
    pub fn new(todo: Todo, now: DateTime<Utc>) -> Self {
        let deadline_status = classify(todo.deadline, now);
        Self {
            todo,
            deadline_status,
        }
    }
}
