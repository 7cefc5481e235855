use async_trait::async_trait;
use face_issue_detection::{
    Error, Result,
    vision::{VisionClient, VisionRequest},
};
use std::sync::{Arc, Mutex};

/// A 1x1 transparent PNG. Tiny, but structurally a real image payload.
pub const SAMPLE_IMAGE_BASE64: &str =
    "iVBORw0KGgoAAAANSUhEUgAAAAEAAAABCAYAAAAfFcSJAAAADUlEQVR42mNkYPhfDwAChwGA60e6kgAAAABJRU5ErkJggg==";

/// Mock vision client for testing
#[derive(Debug)]
pub struct MockVisionClient {
    pub replies: Arc<Mutex<Vec<String>>>,
    pub requests: Arc<Mutex<Vec<VisionRequest>>>,
    pub error: Option<String>,
}

impl MockVisionClient {
    pub fn new() -> Self {
        Self {
            replies: Arc::new(Mutex::new(Vec::new())),
            requests: Arc::new(Mutex::new(Vec::new())),
            error: None,
        }
    }

    pub fn with_replies(self, replies: Vec<&str>) -> Self {
        *self.replies.lock().unwrap() = replies.into_iter().map(String::from).collect();
        self
    }

    pub fn with_error(mut self, error: &str) -> Self {
        self.error = Some(error.to_string());
        self
    }
}

#[async_trait]
impl VisionClient for MockVisionClient {
    async fn analyze_image(&self, request: VisionRequest) -> Result<String> {
        self.requests.lock().unwrap().push(request);

        if let Some(ref error) = self.error {
            return Err(Error::vision(error.clone()));
        }

        let mut replies = self.replies.lock().unwrap();
        if replies.is_empty() {
            return Err(Error::vision("No more mock replies available"));
        }

        Ok(replies.remove(0))
    }
}

impl Default for MockVisionClient {
    fn default() -> Self {
        Self::new()
    }
}
