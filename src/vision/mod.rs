mod client;
mod gemini;
mod types;

pub use client::{OpenAiVisionClient, VisionClient};
pub use gemini::GeminiVisionClient;
pub use types::VisionRequest;
