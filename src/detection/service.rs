use super::extract;
use super::types::FaceIssue;
use crate::{
    Error, Result,
    config::{ExtractionStrategy, ServerConfig, VisionConfig, VisionProvider},
    vision::{GeminiVisionClient, OpenAiVisionClient, VisionClient, VisionRequest},
};
use base64::{Engine as _, engine::general_purpose};
use tokio::sync::Semaphore;
use tracing::{debug, info};

/// Instructions sent to the vision model with every image. The response
/// format is pinned down hard because extraction depends on it.
const ANALYSIS_PROMPT: &str = r#"Analyze this face image for exactly two specific issues:

1. Dark Circles - look for dark discoloration or shadowing under the eyes
2. Flyaways - look for individual hair strands visibly sticking out from the hairline or parting

Consider confounding factors before reporting an issue: natural skin tone and under-eye structure, lighting and shadows, hair color and texture, and tiredness versus true discoloration. Only report these two issue types, and only when they are actually present.

Respond with a JSON object in exactly this format:
{"issues": [{"issue": "<issue name>", "description": "<short description of what you see>"}]}

If no issues are found, respond with {"issues": []}. Double-check that the JSON is well formed before answering. Respond with the JSON object only, no other text."#;

/// Runs the full detection pipeline: validate the payload, ask the vision
/// model about it, extract the issue list from the reply.
pub struct FaceDetectionService {
    client: Box<dyn VisionClient>,
    strategy: ExtractionStrategy,
    max_image_bytes: usize,
    permits: Semaphore,
}

impl FaceDetectionService {
    pub fn new(vision: VisionConfig, server: &ServerConfig) -> Self {
        info!(
            "Initializing face detection service ({:?} provider, {:?} extraction)",
            vision.provider, vision.extraction
        );

        let strategy = vision.extraction;
        let client: Box<dyn VisionClient> = match vision.provider {
            VisionProvider::OpenAi => Box::new(OpenAiVisionClient::new(vision)),
            VisionProvider::Gemini => Box::new(GeminiVisionClient::new(vision)),
        };

        Self::with_client(client, strategy, server.max_workers, server.max_image_bytes)
    }

    pub fn with_client(
        client: Box<dyn VisionClient>,
        strategy: ExtractionStrategy,
        max_workers: usize,
        max_image_bytes: usize,
    ) -> Self {
        Self {
            client,
            strategy,
            max_image_bytes,
            permits: Semaphore::new(max_workers),
        }
    }

    /// Analyzes one base64-encoded image. Requests beyond the worker limit
    /// queue on the semaphore rather than failing.
    ///
    /// Two calls with the same payload and the same model reply produce the
    /// same result; nothing is cached or mutated in between.
    pub async fn detect_issues(&self, image_base64: &str) -> Result<Vec<FaceIssue>> {
        let _permit = self
            .permits
            .acquire()
            .await
            .map_err(|_| Error::internal("detection worker pool is closed"))?;

        if image_base64.len() > self.max_image_bytes {
            return Err(Error::validation(format!(
                "image payload exceeds the maximum allowed size of {} bytes",
                self.max_image_bytes
            )));
        }

        // Strict decode, off the async runtime; large payloads are CPU-bound.
        // The bytes only prove the payload is real base64, the provider gets
        // the original encoded form.
        let payload = image_base64.to_string();
        let decoded_len = tokio::task::spawn_blocking(move || {
            general_purpose::STANDARD.decode(payload)
        })
        .await
        .map_err(|e| Error::internal(format!("decode task failed: {e}")))?
        .map_err(|_| Error::validation("Invalid base64 image format"))?
        .len();

        debug!("Validated image payload ({decoded_len} decoded bytes)");

        let request = VisionRequest::new(ANALYSIS_PROMPT, image_base64);
        let reply = self
            .client
            .analyze_image(request)
            .await
            .map_err(|e| Error::processing(e.to_string()))?;

        debug!("Model replied with {} chars", reply.len());

        match self.strategy {
            ExtractionStrategy::Json => extract::extract_issues(&reply),
            ExtractionStrategy::Keyword => Ok(extract::scan_keywords(&reply)),
        }
    }
}
