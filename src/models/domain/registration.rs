use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// What a registration enrols the user in.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RegistrationTarget {
    Contest,
    Quiz,
}

impl RegistrationTarget {
    pub fn as_str(&self) -> &'static str {
        match self {
            RegistrationTarget::Contest => "contest",
            RegistrationTarget::Quiz => "quiz",
        }
    }
}

/// Proof that a user enrolled in a contest or quiz. At most one exists per
/// `(user_id, target, target_id)`.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct Registration {
    pub id: String,
    pub user_id: String,
    pub target: RegistrationTarget,
    pub target_id: String,
    #[serde(with = "bson::serde_helpers::chrono_datetime_as_bson_datetime")]
    pub registered_at: DateTime<Utc>,
}

impl Registration {
    pub fn new(user_id: &str, target: RegistrationTarget, target_id: &str) -> Self {
        Registration {
            id: Uuid::new_v4().to_string(),
            user_id: user_id.to_string(),
            target,
            target_id: target_id.to_string(),
            registered_at: Utc::now(),
        }
    }
}

/// Result of an idempotent registration attempt.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RegistrationOutcome {
    Created,
    AlreadyRegistered,
}
