use crate::detection::FaceIssue;
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
pub struct DetectionRequest {
    pub image_base64: String,
}

#[derive(Debug, Serialize)]
pub struct DetectionResponse {
    pub issues_detected: Vec<FaceIssue>,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub detail: String,
}
