//! HTTP routes and handlers.

use axum::body::Bytes;
use axum::extract::rejection::PathRejection;
use axum::extract::{Path, State};
use axum::routing::{get, post};
use axum::{Json, Router};
use chrono::Utc;
use dnslog_core::{parse_threshold, Dataset, IpQuery, ServiceIndex, TableView, UniqueIps};
use serde_json::Value;
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tracing::debug;

use crate::error::ApiError;

/// Shared, read-only state handed to every request.
#[derive(Clone)]
pub struct AppState {
    dataset: Arc<Dataset>,
    index: Arc<ServiceIndex>,
    double_encode: bool,
}

impl AppState {
    /// Wrap a freshly loaded dataset.
    pub fn new(dataset: Dataset) -> Self {
        let index = ServiceIndex::new(env!("CARGO_PKG_VERSION"), dataset.len(), Utc::now());
        Self {
            dataset: Arc::new(dataset),
            index: Arc::new(index),
            double_encode: false,
        }
    }

    /// Send tables as a JSON string containing the table object.
    #[must_use]
    pub const fn with_double_encode(mut self, enabled: bool) -> Self {
        self.double_encode = enabled;
        self
    }

    /// The loaded dataset.
    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }
}

/// Build the application router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/alldata", get(all_data))
        .route("/uniqueip", get(unique_ips))
        .route("/data/ip", post(by_ip))
        .route("/data/:threshold", get(by_threshold))
        .fallback(not_found)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn table(state: &AppState, view: &TableView<'_>) -> Result<Json<Value>, ApiError> {
    if state.double_encode {
        Ok(Json(Value::String(serde_json::to_string(view)?)))
    } else {
        Ok(Json(serde_json::to_value(view)?))
    }
}

async fn index(State(state): State<AppState>) -> Json<ServiceIndex> {
    Json(state.index.as_ref().clone())
}

async fn all_data(State(state): State<AppState>) -> Result<Json<Value>, ApiError> {
    table(&state, &state.dataset().all())
}

async fn unique_ips(State(state): State<AppState>) -> Json<UniqueIps> {
    Json(state.dataset().unique_ips())
}

async fn by_threshold(
    State(state): State<AppState>,
    raw: Result<Path<String>, PathRejection>,
) -> Result<Json<Value>, ApiError> {
    let Path(raw) = raw.map_err(|e| ApiError::Validation(e.body_text()))?;
    let threshold = parse_threshold(&raw)?;
    let view = state.dataset().above_threshold(threshold);
    debug!(threshold, rows = view.len(), "threshold query");
    table(&state, &view)
}

// The body is parsed whatever the content type, so clients that post a raw
// JSON string without a header still work.
async fn by_ip(State(state): State<AppState>, body: Bytes) -> Result<Json<Value>, ApiError> {
    let query: IpQuery = serde_json::from_slice(&body)
        .map_err(|e| ApiError::Validation(format!("invalid request body: {e}")))?;
    let view = state.dataset().by_ip(&query.ip);
    debug!(ip = %query.ip, rows = view.len(), "ip query");
    table(&state, &view)
}

async fn not_found() -> ApiError {
    ApiError::NotFound
}
