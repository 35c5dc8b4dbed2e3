use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct Quiz {
    pub id: String,
    pub name: String,
    pub invitation_code: String, // Shared out of band by the quiz author
    pub question_set: String,
    #[serde(with = "bson::serde_helpers::chrono_datetime_as_bson_datetime")]
    pub start_time: DateTime<Utc>,
    #[serde(with = "bson::serde_helpers::chrono_datetime_as_bson_datetime")]
    pub end_time: DateTime<Utc>,
    #[serde(
        default,
        with = "bson::serde_helpers::chrono_datetime_as_bson_datetime_optional",
        skip_serializing_if = "Option::is_none"
    )]
    pub created_at: Option<DateTime<Utc>>,
}

impl Quiz {
    pub fn new(
        name: &str,
        invitation_code: &str,
        question_set: &str,
        start_time: DateTime<Utc>,
        end_time: DateTime<Utc>,
    ) -> Self {
        Quiz {
            id: Uuid::new_v4().to_string(),
            name: name.to_string(),
            invitation_code: invitation_code.to_string(),
            question_set: question_set.to_string(),
            start_time,
            end_time,
            created_at: Some(Utc::now()),
        }
    }

    pub fn accepts_invitation(&self, code: &str) -> bool {
        self.invitation_code == code
    }
}
