use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::errors::{AppError, AppResult};

/// Body of a quiz registration. Both fields are optional at the wire level so
/// that a missing field is reported the same way as an empty one.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct RegisterQuizRequest {
    #[serde(default)]
    pub quiz_id: Option<String>,
    #[serde(default)]
    pub invitation_code: Option<String>,
}

impl RegisterQuizRequest {
    /// Returns `(quiz_id, invitation_code)` when both are present and non-empty.
    /// Values are returned as sent; the code is compared byte for byte later.
    pub fn require_fields(&self) -> AppResult<(&str, &str)> {
        let quiz_id = non_empty(self.quiz_id.as_deref());
        let invitation_code = non_empty(self.invitation_code.as_deref());

        match (quiz_id, invitation_code) {
            (Some(quiz_id), Some(code)) => Ok((quiz_id, code)),
            _ => Err(AppError::ValidationError(
                "quiz_id and invitation_code are required".to_string(),
            )),
        }
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}

#[derive(Debug, Clone, Deserialize, Serialize, Validate)]
pub struct AppendBadgeRequest {
    #[validate(url(message = "badge_url must be a valid URL"))]
    pub badge_url: String,
}

#[derive(Debug, Clone, Deserialize, Serialize, Validate)]
pub struct CreateProfileRequest {
    #[validate(length(min = 1, max = 100))]
    pub name: String,
}
