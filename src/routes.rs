//! REST endpoints exposing the classification engine.

use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};
use serde::Deserialize;
use tower_http::cors::{Any, CorsLayer};
use tracing::{info, warn};

use crate::store::DataStore;
use crate::tagging::{ClassificationEngine, ClassificationRequest};

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<DataStore>,
    pub engine: Arc<ClassificationEngine>,
}

/// Build the Axum router with tagging REST routes and permissive CORS.
pub fn tagging_routes(store: Arc<DataStore>, engine: Arc<ClassificationEngine>) -> Router {
    let state = AppState { store, engine };

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/api", get(root))
        .route("/health", get(health))
        .route("/api/customers", get(list_customers))
        .route("/api/customers/{id}/tags", get(customer_tags))
        .route("/api/emails", get(list_emails))
        .route("/api/emails/{id}", get(get_email))
        .route("/api/predict", post(predict))
        .layer(cors)
        .with_state(state)
}

// ── Health ──────────────────────────────────────────────────────────────

async fn root() -> impl IntoResponse {
    Json(serde_json::json!({"message": "Email Tagging API is running"}))
}

async fn health() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "ok",
        "service": "email-tagger"
    }))
}

// ── Data ────────────────────────────────────────────────────────────────

async fn list_customers(State(state): State<AppState>) -> impl IntoResponse {
    Json(serde_json::json!({"customers": state.store.customers()}))
}

async fn customer_tags(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> impl IntoResponse {
    let tags = state.store.valid_tags(&id);
    if tags.is_empty() {
        return (
            StatusCode::NOT_FOUND,
            Json(serde_json::json!({"error": "Customer not found or no tags defined"})),
        );
    }
    (
        StatusCode::OK,
        Json(serde_json::json!({"customer_id": id, "tags": tags})),
    )
}

#[derive(Deserialize)]
struct EmailsQuery {
    customer_id: Option<String>,
}

async fn list_emails(
    State(state): State<AppState>,
    Query(query): Query<EmailsQuery>,
) -> impl IntoResponse {
    let emails = state.store.emails(query.customer_id.as_deref());
    Json(serde_json::json!({"emails": emails}))
}

async fn get_email(State(state): State<AppState>, Path(id): Path<String>) -> impl IntoResponse {
    match state.store.email_by_id(&id) {
        Some(email) => (StatusCode::OK, Json(serde_json::json!(email))),
        None => (
            StatusCode::NOT_FOUND,
            Json(serde_json::json!({"error": "Email not found"})),
        ),
    }
}

// ── Prediction ──────────────────────────────────────────────────────────

/// Classify one email for a customer.
///
/// An unknown customer, or one without tags, is a 404 rather than an
/// `"Unknown"` result.
async fn predict(
    State(state): State<AppState>,
    Json(body): Json<ClassificationRequest>,
) -> impl IntoResponse {
    let valid_tags = state.store.valid_tags(&body.customer_id);
    if valid_tags.is_empty() {
        warn!(customer_id = %body.customer_id, "Prediction requested for customer without tags");
        return (
            StatusCode::NOT_FOUND,
            Json(serde_json::json!({"error": "Customer not found or no tags defined"})),
        )
            .into_response();
    }

    let result = state
        .engine
        .predict(&body.email_text, &body.customer_id, valid_tags);
    info!(
        customer_id = %body.customer_id,
        tag = %result.tag,
        source = %result.source,
        "Predicted tag"
    );
    // Serialized directly so f32 confidences keep their short form (0.95).
    (StatusCode::OK, Json(result)).into_response()
}
