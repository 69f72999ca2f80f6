use crate::api::{handlers, AppState};
use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer},
};

/// Build the main API router
pub fn build_router(state: AppState) -> Router {
    Router::new()
        // Health endpoints
        .route("/health", get(handlers::health_check))
        // Event ingestion
        .route("/webhook", post(handlers::webhook))
        // Outbound call initiation (sibling feature, not part of triage)
        .route("/make-call", post(handlers::make_call))
        // Simulated destination intake endpoints
        .route("/hospital", post(handlers::hospital_intake))
        .route("/consultation", post(handlers::consultation_intake))
        // Inspection
        .route("/display", get(handlers::display_content))
        .route("/v1/audit", get(handlers::audit_log))
        .route("/metrics", get(handlers::metrics))
        // Add state
        .with_state(state)
        // Add middleware
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().include_headers(true))
                .on_response(DefaultOnResponse::new().include_headers(true)),
        )
        .layer(CorsLayer::permissive())
}
