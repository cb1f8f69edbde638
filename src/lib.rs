//! Todo Service Library
//!
//! This library provides an HTTP service for tracking todos with status,
//! deadlines and derived urgency. Its core is the query engine: deadline
//! classification, deterministic filtering and ordering, offset/limit
//! pagination and full-collection statistics.
//!
//! # Architecture
//!
//! The library follows a 3-layer architecture:
//! - **HTTP Layer**: `http` module - axum routes and JSON envelopes
//! - **Domain Layer**: `todo` module and [`TodoService`] - records, query planning, pagination, aggregation
//! - **Persistence Layer**: `store` module - the [`TodoStore`] capability with in-memory and TOML file implementations
//!
//! # Example
//!
//! ```no_run
//! use todo_service::{Config, InMemoryStore, TodoService, http};
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let service = Arc::new(TodoService::new(InMemoryStore::new()));
//!     http::serve(service, &Config::default()).await
//! }
//! ```

pub mod config;
pub mod error;
pub mod handlers;
pub mod http;
pub mod store;
pub mod todo;
pub mod validation;

use chrono::{DateTime, Utc};

// Re-export commonly used types
pub use config::{Config, Environment};
pub use error::{Result, TodoError};
pub use store::{InMemoryStore, TodoStore, TomlFileStore};
pub use todo::{
    DeadlineStatus, ListParams, Page, PaginationMeta, QueryPlan, Todo, TodoInput, TodoStats,
    TodoStatus, TodoView,
};

/// Request-level facade over an injected record store
///
/// Holds no mutable state of its own: every call re-reads from the store,
/// and concurrent writers to the same record are not coordinated (last
/// write wins).
pub struct TodoService<S> {
    pub(crate) store: S,
    pub(crate) default_limit: usize,
    clock: fn() -> DateTime<Utc>,
}

impl<S: TodoStore> TodoService<S> {
    /// Create a new service over the given store
    ///
    /// # Example
    /// ```
    /// # use todo_service::{InMemoryStore, TodoService};
    /// let service = TodoService::new(InMemoryStore::new());
    /// ```
    pub fn new(store: S) -> Self {
        Self {
            store,
            default_limit: todo::DEFAULT_LIMIT,
            clock: Utc::now,
        }
    }

    /// Use a different page size when list requests omit `limit`
    pub fn with_default_limit(mut self, limit: usize) -> Self {
        self.default_limit = limit.max(1);
        self
    }

    /// Replace the wall clock, e.g. with a fixed instant in tests
    pub fn with_clock(mut self, clock: fn() -> DateTime<Utc>) -> Self {
        self.clock = clock;
        self
    }

    /// The underlying store
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Current time according to the service clock
    pub fn now(&self) -> DateTime<Utc> {
        (self.clock)()
    }
}
