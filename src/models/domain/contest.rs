use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct Contest {
    pub id: String,
    pub name: String,
    pub is_private: bool,
    pub question_set: String, // Reference to the question set served during the contest
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

impl Contest {
    pub fn new(
        name: &str,
        is_private: bool,
        question_set: &str,
        start_time: DateTime<Utc>,
        end_time: DateTime<Utc>,
    ) -> Self {
        Contest {
            id: Uuid::new_v4().to_string(),
            name: name.to_string(),
            is_private,
            question_set: question_set.to_string(),
            start_time,
            end_time,
            created_at: Some(Utc::now()),
        }
    }
}
