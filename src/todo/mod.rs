//! Todo domain models and query logic
//!
//! This module contains the todo record and the pure logic that operates on
//! collections of records. It is split into submodules:
//! - `record`: Todo record, status, input validation and normalization
//! - `deadline`: Deadline urgency classification
//! - `query`: Query planning (filter, ordering, page window, cursors)
//! - `pagination`: Offset/limit paging over a record store
//! - `stats`: Full-collection aggregation
//! - `collection`: Ordered in-process collection used by the bundled stores

mod collection;
mod deadline;
mod pagination;
mod query;
mod record;
mod stats;

// Re-export all public types
pub use collection::{FORMAT_VERSION, TodoCollection};
pub use deadline::{DUE_SOON_DAYS, DeadlineStatus, classify};
pub use pagination::{Page, PaginationMeta, paginate};
pub use query::{
    Cursor, DEFAULT_LIMIT, ListParams, PageWindow, QueryPlan, SortField, SortOrder, SortSpec,
    SortValue, TodoFilter,
};
pub use record::{NewTodo, Todo, TodoChanges, TodoInput, TodoStatus, TodoView};
pub use stats::{TodoStats, aggregate};
