use super::types::{DetectionRequest, DetectionResponse, ErrorResponse};
use crate::{Error, detection::FaceDetectionService};
use axum::{extract::State, http::StatusCode, response::Json};
use std::sync::Arc;
use tracing::{error, info, warn};

#[derive(Clone)]
pub struct AppState {
    pub detector: Arc<FaceDetectionService>,
}

pub async fn detect_face_issues(
    State(state): State<AppState>,
    Json(request): Json<DetectionRequest>,
) -> Result<Json<DetectionResponse>, (StatusCode, Json<ErrorResponse>)> {
    info!(
        "Received face detection request ({} base64 chars)",
        request.image_base64.len()
    );

    if request.image_base64.is_empty() {
        return Err(bad_request("image_base64 must not be empty"));
    }

    match state.detector.detect_issues(&request.image_base64).await {
        Ok(issues) => {
            info!("Detection finished with {} issues", issues.len());
            Ok(Json(DetectionResponse {
                issues_detected: issues,
            }))
        }
        Err(e @ Error::Validation(_)) => {
            warn!("Rejected face detection request: {}", e);
            Err(bad_request(e.to_string()))
        }
        Err(e) => {
            error!("Failed to process face detection request: {}", e);
            Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    detail: e.to_string(),
                }),
            ))
        }
    }
}

pub async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok" }))
}

fn bad_request(detail: impl Into<String>) -> (StatusCode, Json<ErrorResponse>) {
    (
        StatusCode::BAD_REQUEST,
        Json(ErrorResponse {
            detail: detail.into(),
        }),
    )
}
