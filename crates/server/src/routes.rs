use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use common::{metrics, types::Health};
use service::storage::{InMemoryUserStore, UserStore};
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnFailure, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::{error, Level};
use utoipa::OpenApi;

use crate::errors::{ApiError, ROUTE_NOT_FOUND};
use crate::openapi::ApiDoc;

pub mod users;

/// Shared router state. The store is injected here rather than held globally,
/// so each router (and each test) owns its own directory.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn UserStore>,
    pub service_name: Arc<str>,
}

impl AppState {
    pub fn new(store: Arc<dyn UserStore>, service_name: &str) -> Self {
        Self { store, service_name: Arc::from(service_name) }
    }

    /// State over a freshly seeded in-memory store.
    pub fn seeded(service_name: &str) -> Self {
        Self::new(InMemoryUserStore::seeded().into_shared(), service_name)
    }
}

#[utoipa::path(
    get, path = "/health", tag = "health",
    responses((status = 200, description = "Service is healthy", body = crate::openapi::HealthResponse))
)]
pub async fn health(State(state): State<AppState>) -> Json<Health> {
    Json(Health::healthy(&*state.service_name))
}

async fn metrics_text() -> Response {
    match metrics::encode_metrics() {
        Ok(body) => (StatusCode::OK, body).into_response(),
        Err(e) => {
            error!(error = %e, "metrics encode failed");
            (StatusCode::INTERNAL_SERVER_ERROR, format!("metrics encode error: {e}")).into_response()
        }
    }
}

async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

async fn not_found() -> ApiError {
    ApiError::NotFound(ROUTE_NOT_FOUND.into())
}

/// Build the full application router: health, user CRUD, metrics and API docs.
pub fn build_router(state: AppState, cors: CorsLayer) -> Router {
    let public = Router::new()
        .route("/health", get(health))
        .route("/metrics", get(metrics_text))
        .route("/api-docs/openapi.json", get(openapi_json));

    let user_routes = Router::new()
        .route("/users", get(users::list_users).post(users::create_user))
        .route(
            "/users/:id",
            get(users::get_user)
                .put(users::update_user)
                .delete(users::delete_user),
        );

    public
        .merge(user_routes)
        .fallback(not_found)
        .with_state(state)
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                // one INFO span per request, headers left out
                .make_span_with(
                    DefaultMakeSpan::new()
                        .level(Level::INFO)
                        .include_headers(false),
                )
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(
                    DefaultOnResponse::new()
                        .level(Level::INFO)
                        .include_headers(false),
                )
                .on_failure(DefaultOnFailure::new().level(Level::ERROR)),
        )
}
