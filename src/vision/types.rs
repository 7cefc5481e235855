use serde::{Deserialize, Serialize};

/// One round trip to a vision model: a text prompt plus a single image,
/// already base64-encoded by the caller.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VisionRequest {
    pub prompt: String,
    pub image_base64: String,
}

impl VisionRequest {
    pub fn new(prompt: impl Into<String>, image_base64: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            image_base64: image_base64.into(),
        }
    }

    /// Inline data URL for providers that accept images embedded in a URI.
    /// Uploads are always treated as JPEG.
    pub fn data_url(&self) -> String {
        format!("data:image/jpeg;base64,{}", self.image_base64)
    }
}
