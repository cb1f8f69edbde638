//! Common test utilities for integration tests
#![allow(dead_code)]

use chrono::{DateTime, Duration, TimeZone, Utc};
use todo_service::todo::TodoCollection;
use todo_service::{InMemoryStore, Todo, TodoInput, TodoService, TodoStatus};

/// Fixed instant every test service runs at
pub fn fixed_now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 6, 15, 12, 0, 0).unwrap()
}

/// Create a test service over an empty in-memory store
pub fn get_test_service() -> TodoService<InMemoryStore> {
    TodoService::new(InMemoryStore::new()).with_clock(fixed_now)
}

/// Create a test service over a pre-populated in-memory store
pub fn service_with(todos: Vec<Todo>) -> TodoService<InMemoryStore> {
    let mut data = TodoCollection::new();
    for todo in todos {
        data.add(todo);
    }
    TodoService::new(InMemoryStore::from_collection(data)).with_clock(fixed_now)
}

/// Create a stored todo with minimal fields
///
/// `minutes` offsets `createdAt`/`updatedAt` from [`fixed_now`] so ordering
/// by creation time is predictable.
pub fn create_test_todo(id: &str, status: TodoStatus, minutes: i64) -> Todo {
    let at = fixed_now() + Duration::minutes(minutes);
    Todo {
        id: id.to_string(),
        title: format!("Todo {}", id),
        description: None,
        status,
        deadline: None,
        created_at: at,
        updated_at: at,
    }
}

/// Create a stored todo with a deadline
pub fn create_test_todo_with_deadline(
    id: &str,
    status: TodoStatus,
    deadline: DateTime<Utc>,
) -> Todo {
    Todo {
        deadline: Some(deadline),
        ..create_test_todo(id, status, 0)
    }
}

/// `n` pending todos created one minute apart, ids `todo-01`..
pub fn numbered_todos(n: usize) -> Vec<Todo> {
    (1..=n)
        .map(|i| create_test_todo(&format!("todo-{:02}", i), TodoStatus::Pending, i as i64))
        .collect()
}

/// Input with only a title
pub fn titled(title: &str) -> TodoInput {
    TodoInput {
        title: Some(title.to_string()),
        ..Default::default()
    }
}
