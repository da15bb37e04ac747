//! HTTP routes for the items API.
//!
//! Provides:
//! - `GET /items`, `POST /items`
//! - `GET /items/{id}`, `DELETE /items/{id}`
//! - `PUT /items/{id}/claim`
//! - `/health`, `/ready` and `/metrics` probes

use axum::{
    extract::{rejection::JsonRejection, rejection::PathRejection, Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, put},
    Json, Router,
};
use prometheus::{Encoder, TextEncoder};
use serde::Serialize;
use tower_http::trace::TraceLayer;

use crate::model::{Confirmation, Item, ItemId, NewItem};
use crate::observability::metrics::prometheus_registry;
use crate::service::{ItemService, ServiceError, ServiceResult};

/// State shared by all routes.
#[derive(Clone)]
pub struct AppState {
    pub service: ItemService,
}

impl AppState {
    pub fn new(service: ItemService) -> Self {
        Self { service }
    }
}

/// Error body, `{"detail": "..."}`.
#[derive(Debug, Serialize)]
struct ErrorBody {
    detail: String,
}

/// An error response with its status code.
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    detail: String,
}

impl ApiError {
    fn internal() -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            detail: "Internal server error".into(),
        }
    }

    fn unprocessable(detail: impl Into<String>) -> Self {
        Self {
            status: StatusCode::UNPROCESSABLE_ENTITY,
            detail: detail.into(),
        }
    }
}

impl From<ServiceError> for ApiError {
    fn from(err: ServiceError) -> Self {
        let status = match &err {
            ServiceError::NotFound(_) => StatusCode::NOT_FOUND,
            ServiceError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ServiceError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        let detail = match err {
            ServiceError::Internal(_) => "Internal server error".to_string(),
            other => other.to_string(),
        };
        Self { status, detail }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::unprocessable(rejection.body_text())
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        Self::unprocessable(rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(ErrorBody { detail: self.detail })).into_response()
    }
}

type ApiResult<T> = Result<Json<T>, ApiError>;

/// Create the HTTP router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/items", get(list_items).post(create_item))
        .route("/items/{id}", get(get_item).delete(delete_item))
        .route("/items/{id}/claim", put(claim_item))
        .route("/health", get(health_handler))
        .route("/ready", get(ready_handler))
        .route("/metrics", get(metrics_handler))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Run a handler on the blocking pool so store waits never stall a runtime worker.
async fn run_blocking<T, F>(state: &AppState, handler: F) -> ApiResult<T>
where
    T: Send + 'static,
    F: FnOnce(&ItemService) -> ServiceResult<T> + Send + 'static,
{
    let service = state.service.clone();
    let result = tokio::task::spawn_blocking(move || handler(&service))
        .await
        .map_err(|e| {
            tracing::error!(error = %e, "Item handler task failed");
            ApiError::internal()
        })?;
    Ok(Json(result?))
}

/// GET /items - all items, newest `date_found` first.
async fn list_items(State(state): State<AppState>) -> ApiResult<Vec<Item>> {
    run_blocking(&state, ItemService::list_items).await
}

/// POST /items - register a found item.
async fn create_item(
    State(state): State<AppState>,
    payload: Result<Json<NewItem>, JsonRejection>,
) -> ApiResult<Item> {
    let Json(item) = payload?;
    run_blocking(&state, move |service| service.create_item(item)).await
}

/// GET /items/{id}
async fn get_item(
    State(state): State<AppState>,
    id: Result<Path<ItemId>, PathRejection>,
) -> ApiResult<Item> {
    let Path(id) = id?;
    run_blocking(&state, move |service| service.get_item(id)).await
}

/// PUT /items/{id}/claim
async fn claim_item(
    State(state): State<AppState>,
    id: Result<Path<ItemId>, PathRejection>,
) -> ApiResult<Confirmation> {
    let Path(id) = id?;
    run_blocking(&state, move |service| service.claim_item(id)).await
}

/// DELETE /items/{id}
async fn delete_item(
    State(state): State<AppState>,
    id: Result<Path<ItemId>, PathRejection>,
) -> ApiResult<Confirmation> {
    let Path(id) = id?;
    run_blocking(&state, move |service| service.delete_item(id)).await
}

/// GET /health - Basic liveness check.
async fn health_handler() -> impl IntoResponse {
    (StatusCode::OK, "OK")
}

/// GET /ready - Store is reachable.
async fn ready_handler(State(state): State<AppState>) -> impl IntoResponse {
    let service = state.service.clone();
    match tokio::task::spawn_blocking(move || service.store().count()).await {
        Ok(Ok(_)) => (StatusCode::OK, "READY"),
        Ok(Err(e)) => {
            tracing::warn!(error = %e, "Readiness check failed");
            (StatusCode::SERVICE_UNAVAILABLE, "UNAVAILABLE")
        }
        Err(e) => {
            tracing::error!(error = %e, "Readiness task failed");
            (StatusCode::SERVICE_UNAVAILABLE, "UNAVAILABLE")
        }
    }
}

/// GET /metrics - Prometheus metrics endpoint.
async fn metrics_handler() -> impl IntoResponse {
    let encoder = TextEncoder::new();
    let metric_families = prometheus_registry().gather();

    let mut buffer = Vec::new();
    match encoder.encode(&metric_families, &mut buffer) {
        Ok(()) => (
            StatusCode::OK,
            [("content-type", "text/plain; version=0.0.4; charset=utf-8")],
            buffer,
        ),
        Err(e) => {
            tracing::error!(error = %e, "Failed to encode metrics");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                [("content-type", "text/plain; charset=utf-8")],
                format!("Failed to encode metrics: {e}").into_bytes(),
            )
        }
    }
}
