//! Offset/limit pagination over a record store
//!
//! Stores resume from a cursor rather than an offset, so reaching page `n`
//! means fetching and discarding `(n - 1) * limit` records to find the resume
//! point. Cost grows linearly with the offset; this is a known scaling limit
//! of the page/limit contract.

use crate::error::Result;
use crate::store::TodoStore;
use crate::todo::query::QueryPlan;
use crate::todo::record::Todo;
use serde::Serialize;
use tracing::debug;

/// Pagination metadata returned alongside a page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginationMeta {
    pub page: usize,
    pub limit: usize,
    pub total: usize,
    pub total_pages: usize,
    pub has_next_page: bool,
    pub has_prev_page: bool,
}

impl PaginationMeta {
    /// Derive metadata for a page of a result set with `total` matches
    pub fn new(page: usize, limit: usize, total: usize) -> Self {
        let total_pages = total.div_ceil(limit.max(1));
        Self {
            page,
            limit,
            total,
            total_pages,
            has_next_page: page < total_pages,
            has_prev_page: page > 1,
        }
    }
}

/// One page of results
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub meta: PaginationMeta,
}

impl<T> Page<T> {
    /// Transform every item while keeping the metadata
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            meta: self.meta,
        }
    }
}

/// Execute a query plan against a store and return the requested page
///
/// An offset past the end of the result set yields an empty page with
/// accurate metadata.
pub fn paginate<S>(store: &S, plan: &QueryPlan) -> Result<Page<Todo>>
where
    S: TodoStore + ?Sized,
{
    let window = plan.window;
    let total = store.count(&plan.filter)?;
    let meta = PaginationMeta::new(window.page, window.limit, total);

    if window.offset >= total {
        debug!(page = window.page, total, "page starts past the last match");
        return Ok(Page {
            items: Vec::new(),
            meta,
        });
    }

    let resume_after = if window.offset == 0 {
        None
    } else {
        let skipped = store.query(&plan.filter, &plan.sort, window.offset, None)?;
        if skipped.len() < window.offset {
            // Records disappeared between count and query
            return Ok(Page {
                items: Vec::new(),
                meta,
            });
        }
        skipped.last().map(|t| plan.sort.cursor_for(t))
    };

    let items = store.query(
        &plan.filter,
        &plan.sort,
        window.limit,
        resume_after.as_ref(),
    )?;

    debug!(
        page = window.page,
        limit = window.limit,
        total,
        returned = items.len(),
        "page fetched"
    );

    Ok(Page { items, meta })
}
