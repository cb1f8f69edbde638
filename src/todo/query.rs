//! Query planning for list requests
//!
//! Raw list parameters are turned into an immutable [`QueryPlan`]: an
//! optional status predicate, a total ordering and a page window. Planning
//! never fails. An unrecognised status means "no filter", an unknown sort
//! field means `createdAt`, an unknown order means descending, and
//! non-numeric or non-positive `page`/`limit` values fall back to their
//! defaults.

use crate::todo::record::{Todo, TodoStatus};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use std::cmp::Ordering;

/// Page size used when `limit` is absent or invalid
pub const DEFAULT_LIMIT: usize = 20;

/// Raw list parameters as they arrive on the query string
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ListParams {
    pub status: Option<String>,
    pub sort_by: Option<String>,
    pub order: Option<String>,
    pub page: Option<String>,
    pub limit: Option<String>,
}

/// Equality predicate on status; `None` matches everything
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TodoFilter {
    pub status: Option<TodoStatus>,
}

impl TodoFilter {
    /// Filter matching only the given status
    pub fn status(status: TodoStatus) -> Self {
        Self {
            status: Some(status),
        }
    }

    /// Check whether a todo satisfies the predicate
    pub fn matches(&self, todo: &Todo) -> bool {
        self.status.is_none_or(|s| todo.status == s)
    }
}

/// Field a listing is ordered by
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortField {
    #[default]
    CreatedAt,
    UpdatedAt,
    Deadline,
    Title,
    Status,
}

impl SortField {
    /// Resolve a field name, accepting camelCase and snake_case spellings
    pub fn parse(name: &str) -> Option<Self> {
        match name.trim() {
            "createdAt" | "created_at" => Some(SortField::CreatedAt),
            "updatedAt" | "updated_at" => Some(SortField::UpdatedAt),
            "deadline" => Some(SortField::Deadline),
            "title" => Some(SortField::Title),
            "status" => Some(SortField::Status),
            _ => None,
        }
    }

    /// Extract this field's value from a todo
    pub fn value_of(&self, todo: &Todo) -> SortValue {
        match self {
            SortField::CreatedAt => SortValue::Time(Some(todo.created_at)),
            SortField::UpdatedAt => SortValue::Time(Some(todo.updated_at)),
            SortField::Deadline => SortValue::Time(todo.deadline),
            SortField::Title => SortValue::Text(todo.title.clone()),
            SortField::Status => SortValue::Text(todo.status.as_str().to_string()),
        }
    }
}

/// Sort direction
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

impl SortOrder {
    /// `asc` is ascending; anything else, including garbage, is descending
    pub fn parse_lenient(order: Option<&str>) -> Self {
        match order.map(str::trim) {
            Some("asc") => SortOrder::Asc,
            _ => SortOrder::Desc,
        }
    }

    fn apply(&self, ordering: Ordering) -> Ordering {
        match self {
            SortOrder::Asc => ordering,
            SortOrder::Desc => ordering.reverse(),
        }
    }
}

/// Comparable value of a sort field
///
/// A missing deadline orders before any present one.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub enum SortValue {
    Time(Option<DateTime<Utc>>),
    Text(String),
}

/// A total ordering over todos: the chosen field, then `id` as tie-breaker
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SortSpec {
    pub field: SortField,
    pub order: SortOrder,
}

impl SortSpec {
    pub fn new(field: SortField, order: SortOrder) -> Self {
        Self { field, order }
    }

    /// Compare two todos under this ordering
    pub fn compare(&self, a: &Todo, b: &Todo) -> Ordering {
        let ordering = self
            .field
            .value_of(a)
            .cmp(&self.field.value_of(b))
            .then_with(|| a.id.cmp(&b.id));
        self.order.apply(ordering)
    }

    /// Check whether `todo` comes strictly after `cursor` under this ordering
    pub fn is_after(&self, todo: &Todo, cursor: &Cursor) -> bool {
        let ordering = self
            .field
            .value_of(todo)
            .cmp(&cursor.value)
            .then_with(|| todo.id.as_str().cmp(cursor.id.as_str()));
        self.order.apply(ordering) == Ordering::Greater
    }

    /// Cursor positioned on `todo`
    pub fn cursor_for(&self, todo: &Todo) -> Cursor {
        Cursor {
            value: self.field.value_of(todo),
            id: todo.id.clone(),
        }
    }
}

/// Resume point inside an ordered listing: the last record already seen
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cursor {
    pub value: SortValue,
    pub id: String,
}

/// Offset/limit window of a single page
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageWindow {
    /// 1-based page number
    pub page: usize,
    /// Page size, at least 1
    pub limit: usize,
    /// Records to skip: `(page - 1) * limit`
    pub offset: usize,
}

impl PageWindow {
    /// Build a window; zero values are raised to 1
    pub fn new(page: usize, limit: usize) -> Self {
        let page = page.max(1);
        let limit = limit.max(1);
        Self {
            page,
            limit,
            offset: (page - 1).saturating_mul(limit),
        }
    }
}

/// Resolved filter, ordering and page window for a list request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QueryPlan {
    pub filter: TodoFilter,
    pub sort: SortSpec,
    pub window: PageWindow,
}

impl QueryPlan {
    /// Plan a list request with the standard default page size
    pub fn from_params(params: &ListParams) -> Self {
        Self::with_default_limit(params, DEFAULT_LIMIT)
    }

    /// Plan a list request
    ///
    /// # Arguments
    /// * `params` - Raw query parameters
    /// * `default_limit` - Page size used when `limit` is missing or invalid
    pub fn with_default_limit(params: &ListParams, default_limit: usize) -> Self {
        let filter = TodoFilter {
            status: params
                .status
                .as_deref()
                .and_then(|s| s.trim().parse::<TodoStatus>().ok()),
        };

        let sort = SortSpec {
            field: params
                .sort_by
                .as_deref()
                .and_then(SortField::parse)
                .unwrap_or_default(),
            order: SortOrder::parse_lenient(params.order.as_deref()),
        };

        let page = parse_positive(params.page.as_deref()).unwrap_or(1);
        let limit = parse_positive(params.limit.as_deref()).unwrap_or(default_limit.max(1));

        Self {
            filter,
            sort,
            window: PageWindow::new(page, limit),
        }
    }
}

/// Parse a strictly positive integer, or `None` for anything else
fn parse_positive(raw: Option<&str>) -> Option<usize> {
    raw.and_then(|s| s.trim().parse::<usize>().ok())
        .filter(|&n| n >= 1)
}
