//! List handler for the todo service

use crate::TodoService;
use crate::error::Result;
use crate::store::TodoStore;
use crate::todo::{self, ListParams, Page, QueryPlan, TodoView};
use tracing::debug;

impl<S: TodoStore> TodoService<S> {
    /// Plan the request, fetch the requested page and annotate every record
    ///
    /// Invalid filter, sort and paging values never fail the request; they
    /// fall back to their defaults.
    pub async fn handle_list(&self, params: &ListParams) -> Result<Page<TodoView>> {
        let plan = QueryPlan::with_default_limit(params, self.default_limit);
        debug!(?plan, "planned list query");

        let now = self.now();
        let page = todo::paginate(&self.store, &plan)?;
        Ok(page.map(|t| TodoView::new(t, now)))
    }
}
