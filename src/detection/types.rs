use serde::{Deserialize, Serialize};

/// A single issue found in a face image, as reported by the vision model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FaceIssue {
    /// Short issue name, e.g. "Dark Circles" or "Flyaways".
    pub issue: String,
    /// Free-form explanation of what the model saw.
    pub description: String,
}

impl FaceIssue {
    pub fn new(issue: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            issue: issue.into(),
            description: description.into(),
        }
    }
}
