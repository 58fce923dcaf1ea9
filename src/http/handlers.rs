//! Color endpoints.

use axum::{
    body::Bytes,
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::color::{ColorError, ColorRequest, Translation, WebhookPayload, CUSTOM};
use crate::http::response::ApiError;
use crate::http::server::AppState;
use crate::observability::metrics;

const ENDPOINT_SET: &str = "set";
const ENDPOINT_WEBHOOK: &str = "webhook";

/// Query parameter holding `R,G,B` for the `custom` color.
const RGB_PARAM: &str = "rgb";

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthStatus {
    pub version: String,
    pub status: String,
}

/// `POST {base}/set/{color}` and `GET {base}/change/{color}`.
pub async fn set_color(
    State(state): State<AppState>,
    Path(color): Path<String>,
    Query(params): Query<Vec<(String, String)>>,
) -> Response {
    // Only the first `rgb` counts, and only for `custom`.
    let rgb = if color == CUSTOM {
        params
            .iter()
            .find(|(name, _)| name == RGB_PARAM)
            .map(|(_, value)| value.as_str())
    } else {
        None
    };
    let request = ColorRequest::parse(&color, rgb);
    if let Ok(ColorRequest { rgb: Some(rgb), .. }) = &request {
        tracing::debug!(r = %rgb.r, g = %rgb.g, b = %rgb.b, "Custom color");
    }

    let result = apply(&state, request).await;
    respond(ENDPOINT_SET, result, "done")
}

/// `POST {base}/webhook`.
///
/// Body problems are logged and the usable fields kept. A body that fails
/// to parse at all is treated as empty, which resolves to no color.
pub async fn webhook(State(state): State<AppState>, body: Bytes) -> Response {
    tracing::info!("Webhook activated");

    let (payload, problems) = WebhookPayload::decode(&body);
    for problem in &problems {
        tracing::warn!(error = %problem, "Webhook body error");
    }

    let result = apply(&state, payload.to_request()).await;
    if result.is_ok() {
        tracing::info!(color = %payload.color, "Webhook succeeded");
    }
    respond(ENDPOINT_WEBHOOK, result, "OK")
}

/// `GET /health`.
pub async fn health() -> Json<HealthStatus> {
    Json(HealthStatus {
        version: env!("CARGO_PKG_VERSION").to_string(),
        status: "operational".to_string(),
    })
}

async fn apply(
    state: &AppState,
    request: Result<ColorRequest, ColorError>,
) -> Result<Translation, ApiError> {
    let request = request.map_err(|e| {
        tracing::warn!(error = %e, "Rejected color request");
        ApiError::from(e)
    })?;
    Ok(state.translator.apply(&request).await?)
}

fn respond(
    endpoint: &'static str,
    result: Result<Translation, ApiError>,
    ok: &'static str,
) -> Response {
    let response = match result {
        Ok(_) => (StatusCode::OK, Json(ok)).into_response(),
        Err(e) => e.into_response(),
    };
    metrics::record_request(endpoint, response.status().as_u16());
    response
}
