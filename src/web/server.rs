//! HTTP server implementation.
//!
//! This module provides the axum-based HTTP server that serves the task list
//! page, the form endpoints that change it, and a small JSON API.

use axum::{
    Router,
    extract::{
        Form, Query, State,
        rejection::{FormRejection, QueryRejection},
    },
    response::{Html, IntoResponse, Json, Redirect},
    routing::{get, post},
};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tower_http::trace::TraceLayer;
use tracing::{debug, info, warn};

use super::error::{ApiError, WebError};
use super::extract::TaskId;
use super::templates::{self, Notice};
use crate::config::Config;
use crate::db::Database;
use crate::error::StoreResult;
use crate::types::{Task, WriteOutcome};

/// State shared across handlers.
#[derive(Clone)]
pub struct AppState {
    db: Arc<Database>,
}

impl AppState {
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }

    /// Run a storage call on the blocking pool.
    async fn run<F, T>(&self, f: F) -> Result<T, WebError>
    where
        F: FnOnce(&Database) -> StoreResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let db = Arc::clone(&self.db);
        tokio::task::spawn_blocking(move || f(&db))
            .await
            .map_err(|e| WebError::Internal(e.to_string()))?
            .map_err(WebError::from)
    }
}

/// Health check response.
#[derive(serde::Serialize)]
struct HealthResponse {
    status: &'static str,
    version: &'static str,
}

/// Query parameters for the index page.
#[derive(Debug, serde::Deserialize)]
struct IndexParams {
    error: Option<String>,
}

/// Form data for adding a task.
#[derive(Debug, serde::Deserialize)]
struct AddTaskForm {
    task: String,
}

/// Where to send the browser after a write.
fn redirect_after(outcome: WriteOutcome) -> Redirect {
    match outcome {
        WriteOutcome::Written { .. } => Redirect::to("/"),
        WriteOutcome::Skipped => {
            Redirect::to(&format!("/?error={}", Notice::Unavailable.as_query()))
        }
    }
}

/// Root endpoint - renders the task list.
///
/// The query only selects a notice banner; a malformed one is ignored.
async fn index(
    State(state): State<AppState>,
    params: Result<Query<IndexParams>, QueryRejection>,
) -> Result<Html<String>, WebError> {
    let tasks = state.run(|db| db.list_tasks()).await?;
    let notice = params
        .ok()
        .and_then(|Query(params)| params.error)
        .as_deref()
        .and_then(Notice::from_query);
    Ok(Html(templates::render_index(&tasks, notice)))
}

/// Handle the add form.
async fn add_task(
    State(state): State<AppState>,
    form: Result<Form<AddTaskForm>, FormRejection>,
) -> Result<Redirect, WebError> {
    let Form(form) = form.map_err(|e| WebError::BadRequest(e.body_text()))?;
    let outcome = state.run(move |db| db.create_task(&form.task)).await?;
    debug!(?outcome, "Task created");
    Ok(redirect_after(outcome))
}

/// Mark a task completed.
async fn complete_task(
    State(state): State<AppState>,
    TaskId(id): TaskId,
) -> Result<Redirect, WebError> {
    let outcome = state.run(move |db| db.complete_task(id)).await?;
    debug!(id, ?outcome, "Task completed");
    Ok(redirect_after(outcome))
}

/// Delete a task.
async fn delete_task(
    State(state): State<AppState>,
    TaskId(id): TaskId,
) -> Result<Redirect, WebError> {
    let outcome = state.run(move |db| db.delete_task(id)).await?;
    debug!(id, ?outcome, "Task deleted");
    Ok(redirect_after(outcome))
}

/// Health check endpoint.
async fn health() -> impl IntoResponse {
    Json(HealthResponse {
        status: "healthy",
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// All tasks as JSON, newest first.
async fn api_tasks(State(state): State<AppState>) -> Result<Json<Vec<Task>>, ApiError> {
    let tasks = state.run(|db| db.list_tasks()).await?;
    Ok(Json(tasks))
}

/// A single task as JSON.
async fn api_task(
    State(state): State<AppState>,
    TaskId(id): TaskId,
) -> Result<Json<Task>, ApiError> {
    state
        .run(move |db| db.get_task(id))
        .await?
        .map(Json)
        .ok_or(ApiError(WebError::NotFound { id }))
}

/// Build the router with all routes.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        // Page routes
        .route("/", get(index))
        .route("/add", post(add_task))
        .route("/complete/{id}", get(complete_task))
        .route("/delete/{id}", get(delete_task))
        // API routes
        .route("/api/health", get(health))
        .route("/api/tasks", get(api_tasks))
        .route("/api/tasks/{id}", get(api_task))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Handle for a running server.
pub struct ServerHandle {
    addr: SocketAddr,
    shutdown_tx: Option<oneshot::Sender<()>>,
    task: JoinHandle<()>,
}

impl ServerHandle {
    /// The address the server is bound to.
    pub fn local_addr(&self) -> SocketAddr {
        self.addr
    }

    /// Signal shutdown and wait for in-flight requests to finish.
    pub async fn shutdown(mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
        if let Err(e) = self.task.await {
            warn!("Server task ended abnormally: {}", e);
        }
    }
}

/// Bind `addr` and start serving in the background.
///
/// Pass port 0 to let the OS pick one; the bound address is on the handle.
pub async fn start_server(state: AppState, addr: &str) -> anyhow::Result<ServerHandle> {
    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    let bound_addr = listener.local_addr()?;

    info!("Listening on http://{}", bound_addr);

    let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();

    let task = tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, app)
            .with_graceful_shutdown(async {
                let _ = shutdown_rx.await;
                info!("Server shutting down");
            })
            .await
        {
            tracing::error!("Server error: {}", e);
        }
    });

    Ok(ServerHandle {
        addr: bound_addr,
        shutdown_tx: Some(shutdown_tx),
        task,
    })
}

/// Bootstrap the schema, then serve until Ctrl+C or SIGTERM.
pub async fn serve(config: &Config) -> anyhow::Result<()> {
    let db = Arc::new(config.database());
    {
        let db = Arc::clone(&db);
        tokio::task::spawn_blocking(move || db.ensure_schema()).await?;
    }

    let handle = start_server(AppState::new(db), &config.bind_addr()).await?;
    shutdown_signal().await;
    handle.shutdown().await;
    Ok(())
}

/// Wait for Ctrl+C or SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{SignalKind, signal};
        match signal(SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                warn!("Failed to listen for SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            warn!("Received Ctrl+C, initiating graceful shutdown...");
        }
        _ = terminate => {
            warn!("Received SIGTERM, initiating graceful shutdown...");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_health_response_serialization() {
        let response = HealthResponse {
            status: "healthy",
            version: "0.1.0",
        };
        let json = serde_json::to_string(&response).unwrap();
        assert!(json.contains("healthy"));
        assert!(json.contains("0.1.0"));
    }

    #[test]
    fn skipped_write_redirects_with_notice() {
        let response = redirect_after(WriteOutcome::Skipped).into_response();
        assert_eq!(response.headers()["location"], "/?error=unavailable");

        let response = redirect_after(WriteOutcome::Written { rows_affected: 1 }).into_response();
        assert_eq!(response.headers()["location"], "/");
    }
}
