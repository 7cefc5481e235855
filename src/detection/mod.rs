pub mod extract;
mod service;
mod types;

pub use service::FaceDetectionService;
pub use types::FaceIssue;
