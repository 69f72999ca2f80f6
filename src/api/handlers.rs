use crate::api::{display, AppState};
use crate::audit::AuditEntry;
use crate::error::{AppError, Result};
use crate::models::{EnrichedEvent, IncomingEvent};
use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::Html,
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use validator::Validate;

/// Health check endpoint
pub async fn health_check() -> Result<Json<HealthResponse>> {
    Ok(Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    }))
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

/// Ingest one call-transcript event and triage it
pub async fn webhook(
    State(state): State<AppState>,
    Json(payload): Json<Value>,
) -> Result<Json<WebhookResponse>> {
    let event = IncomingEvent::from_json(payload)?;

    let enriched = state.engine.process(event).await;

    Ok(Json(WebhookResponse {
        status: "success".to_string(),
        message: "Webhook received and processed".to_string(),
        data: enriched,
    }))
}

#[derive(Debug, Serialize)]
pub struct WebhookResponse {
    pub status: String,
    pub message: String,
    pub data: EnrichedEvent,
}

/// Initiate an outbound call with a recipient phone number passed as a
/// query parameter
pub async fn make_call(
    State(state): State<AppState>,
    Query(params): Query<MakeCallQuery>,
) -> Result<Json<MakeCallResponse>> {
    params.validate()?;

    let data = state
        .telephony
        .initiate_call(&params.recipient_phone_number)
        .await?;

    Ok(Json(MakeCallResponse {
        status: "success".to_string(),
        data,
    }))
}

#[derive(Debug, Deserialize, Validate)]
pub struct MakeCallQuery {
    #[validate(length(min = 1))]
    pub recipient_phone_number: String,
}

#[derive(Debug, Serialize)]
pub struct MakeCallResponse {
    pub status: String,
    pub data: Value,
}

/// Simulated hospital intake endpoint: receives emergency data and stores it
pub async fn hospital_intake(
    State(state): State<AppState>,
    Json(payload): Json<Value>,
) -> Result<Json<IntakeResponse>> {
    intake_submit(&state.hospital, payload, "hospital")
}

/// Simulated consultation intake endpoint: receives non-emergency data and
/// stores it
pub async fn consultation_intake(
    State(state): State<AppState>,
    Json(payload): Json<Value>,
) -> Result<Json<IntakeResponse>> {
    intake_submit(&state.consultation, payload, "consultation")
}

fn intake_submit(
    queue: &crate::intake::IntakeQueue,
    payload: Value,
    name: &str,
) -> Result<Json<IntakeResponse>> {
    if !payload.is_object() {
        return Err(AppError::InvalidInput(
            "intake payload must be a JSON object".to_string(),
        ));
    }

    queue.submit(payload.clone());

    Ok(Json(IntakeResponse {
        status: "success".to_string(),
        message: format!("Data received by {} API", name),
        data: payload,
    }))
}

#[derive(Debug, Serialize)]
pub struct IntakeResponse {
    pub status: String,
    pub message: String,
    pub data: Value,
}

/// Full ordered audit log
pub async fn audit_log(State(state): State<AppState>) -> Result<Json<AuditLogResponse>> {
    let entries = state.audit.snapshot();

    Ok(Json(AuditLogResponse {
        total: entries.len(),
        entries,
    }))
}

#[derive(Debug, Serialize)]
pub struct AuditLogResponse {
    pub total: usize,
    pub entries: Vec<AuditEntry>,
}

/// Display the stored webhook, hospital, and consultation data in an HTML
/// page
pub async fn display_content(State(state): State<AppState>) -> Result<Html<String>> {
    let page = display::render_page(
        &state.audit.snapshot(),
        &state.hospital.snapshot(),
        &state.consultation.snapshot(),
    )?;

    Ok(Html(page))
}

/// Prometheus metrics endpoint
///
/// Returns metrics in Prometheus text exposition format
pub async fn metrics() -> (StatusCode, String) {
    let metrics = crate::metrics::gather_metrics();
    (StatusCode::OK, metrics)
}
