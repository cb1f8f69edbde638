//! HTTP transport - maps requests onto [`TodoService`] handlers.
//!
//! ## Routes
//!
//! - `GET /health` - liveness check.
//! - `POST /todos` - create a todo.
//! - `GET /todos` - list with `status`, `sortBy`, `order`, `page`, `limit`.
//! - `GET /todos/stats` - counts, overdue todos and completion rate.
//! - `GET /todos/:id` - fetch one.
//! - `PUT /todos/:id` - partial update.
//! - `DELETE /todos/:id` - delete.
//!
//! Every response is a JSON envelope `{ success, data?, error?, details?,
//! message?, pagination? }`. Validation failures map to 400, unknown ids to
//! 404 and everything else to 500, whose message is only shown outside
//! production.

use std::sync::Arc;

use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use serde::Serialize;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::{error, info, warn};

use crate::config::{Config, Environment};
use crate::error::TodoError;
use crate::store::TodoStore;
use crate::todo::{ListParams, PaginationMeta, TodoInput};
use crate::TodoService;

/// Shared state handed to every route
pub struct AppState<S> {
    pub service: Arc<TodoService<S>>,
    pub environment: Environment,
}

impl<S> Clone for AppState<S> {
    fn clone(&self) -> Self {
        Self {
            service: Arc::clone(&self.service),
            environment: self.environment,
        }
    }
}

/// JSON response envelope
#[derive(Debug, Serialize)]
pub struct Envelope<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pagination: Option<PaginationMeta>,
}

impl<T> Envelope<T> {
    fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
            details: None,
            message: None,
            pagination: None,
        }
    }
}

impl Envelope<()> {
    fn message(message: impl Into<String>) -> Self {
        Self {
            success: true,
            data: None,
            error: None,
            details: None,
            message: Some(message.into()),
            pagination: None,
        }
    }

    fn failure(err: &TodoError, environment: Environment) -> Self {
        let (error, details) = match err {
            TodoError::Validation(violations) => {
                ("Validation failed".to_string(), Some(violations.clone()))
            }
            TodoError::NotFound(_) => ("Todo not found".to_string(), None),
            TodoError::Store(_) if environment.is_production() => {
                ("Internal server error".to_string(), None)
            }
            TodoError::Store(_) => (err.to_string(), None),
        };
        Self {
            success: false,
            data: None,
            error: Some(error),
            details,
            message: None,
            pagination: None,
        }
    }
}

/// A [`TodoError`] rendered for a given environment
pub struct ApiError {
    error: TodoError,
    environment: Environment,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.error.status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        if status.is_server_error() {
            error!(error = %self.error, "request failed");
        }
        let body = Envelope::failure(&self.error, self.environment);
        (status, Json(body)).into_response()
    }
}

type ApiResult = Result<Response, ApiError>;

impl<S> AppState<S> {
    fn fail(&self, error: TodoError) -> ApiError {
        ApiError {
            error,
            environment: self.environment,
        }
    }
}

/// Build the axum `Router` for the given service
pub fn router<S: TodoStore + 'static>(
    service: Arc<TodoService<S>>,
    environment: Environment,
) -> Router {
    let state = AppState {
        service,
        environment,
    };

    Router::new()
        .route("/health", get(health_handler))
        .route("/todos", get(list_handler::<S>).post(create_handler::<S>))
        .route("/todos/stats", get(stats_handler::<S>))
        .route(
            "/todos/:id",
            get(get_handler::<S>)
                .put(update_handler::<S>)
                .delete(delete_handler::<S>),
        )
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Serve the service over HTTP until Ctrl-C
pub async fn serve<S: TodoStore + 'static>(
    service: Arc<TodoService<S>>,
    config: &Config,
) -> anyhow::Result<()> {
    let app = router(service, config.environment);
    let listener = tokio::net::TcpListener::bind(config.bind).await?;
    info!(addr = %listener.local_addr()?, env = ?config.environment, "todo service listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("todo service shut down cleanly");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
}

/// `GET /health`
async fn health_handler() -> impl IntoResponse {
    Json(Envelope::ok(serde_json::json!({ "status": "ok" })))
}

/// `POST /todos`
async fn create_handler<S: TodoStore + 'static>(
    State(state): State<AppState<S>>,
    payload: Result<Json<TodoInput>, JsonRejection>,
) -> ApiResult {
    let Json(input) = payload.map_err(|r| state.fail(TodoError::invalid(r.body_text())))?;
    let todo = state
        .service
        .handle_create(input)
        .await
        .map_err(|e| state.fail(e))?;
    Ok((StatusCode::CREATED, Json(Envelope::ok(todo))).into_response())
}

/// `GET /todos`
async fn list_handler<S: TodoStore + 'static>(
    State(state): State<AppState<S>>,
    params: Result<Query<ListParams>, QueryRejection>,
) -> ApiResult {
    // Malformed query strings get the same leniency as bad values
    let params = params.map(|Query(p)| p).unwrap_or_else(|r| {
        warn!(error = %r.body_text(), "ignoring malformed list query");
        ListParams::default()
    });

    let page = state
        .service
        .handle_list(&params)
        .await
        .map_err(|e| state.fail(e))?;

    let body = Envelope {
        pagination: Some(page.meta),
        ..Envelope::ok(page.items)
    };
    Ok(Json(body).into_response())
}

/// `GET /todos/stats`
async fn stats_handler<S: TodoStore + 'static>(State(state): State<AppState<S>>) -> ApiResult {
    let stats = state
        .service
        .handle_stats()
        .await
        .map_err(|e| state.fail(e))?;
    Ok(Json(Envelope::ok(stats)).into_response())
}

/// `GET /todos/:id`
async fn get_handler<S: TodoStore + 'static>(
    State(state): State<AppState<S>>,
    Path(id): Path<String>,
) -> ApiResult {
    let todo = state
        .service
        .handle_get(&id)
        .await
        .map_err(|e| state.fail(e))?;
    Ok(Json(Envelope::ok(todo)).into_response())
}

/// `PUT /todos/:id`
async fn update_handler<S: TodoStore + 'static>(
    State(state): State<AppState<S>>,
    Path(id): Path<String>,
    payload: Result<Json<TodoInput>, JsonRejection>,
) -> ApiResult {
    let Json(input) = payload.map_err(|r| state.fail(TodoError::invalid(r.body_text())))?;
    let todo = state
        .service
        .handle_update(&id, input)
        .await
        .map_err(|e| state.fail(e))?;
    Ok(Json(Envelope::ok(todo)).into_response())
}

/// `DELETE /todos/:id`
async fn delete_handler<S: TodoStore + 'static>(
    State(state): State<AppState<S>>,
    Path(id): Path<String>,
) -> ApiResult {
    state
        .service
        .handle_delete(&id)
        .await
        .map_err(|e| state.fail(e))?;
    Ok(Json(Envelope::message("Todo deleted")).into_response())
}
