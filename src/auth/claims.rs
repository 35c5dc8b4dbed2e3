use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::domain::{Contest, Quiz};

/// Identity carried by the upstream bearer token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String, // Subject (user id)
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub exp: usize, // Expiration time (as UTC timestamp)
    pub iat: usize, // Issued at (as UTC timestamp)
}

#[cfg(test)]
impl Claims {
    pub fn new(user: &crate::models::domain::User, expiration_hours: i64) -> Self {
        let now = Utc::now();
        let exp = now + chrono::Duration::hours(expiration_hours);

        // Use MongoDB ObjectId hex string as subject when available, fallback to email
        let subject = user
            .id
            .as_ref()
            .map(|oid| oid.to_hex())
            .unwrap_or_else(|| user.email.clone());

        Self {
            sub: subject,
            email: user.email.clone(),
            name: Some(user.name.clone()),
            iat: now.timestamp() as usize,
            exp: exp.timestamp() as usize,
        }
    }
}

/// Session payload handed to a participant admitted to a contest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContestSessionClaims {
    pub question_set: String,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub user_id: String,
    pub contest_id: String,
    pub contest_name: String,
}

impl ContestSessionClaims {
    pub fn new(contest: &Contest, user_id: &str) -> Self {
        Self {
            question_set: contest.question_set.clone(),
            start_time: contest.start_time,
            end_time: contest.end_time,
            user_id: user_id.to_string(),
            contest_id: contest.id.clone(),
            contest_name: contest.name.clone(),
        }
    }
}

/// Session payload handed to a participant registered for a quiz.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizSessionClaims {
    pub question_set: String,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub user_id: String,
    pub quiz_id: String,
    pub quiz_name: String,
}

impl QuizSessionClaims {
    pub fn new(quiz: &Quiz, user_id: &str) -> Self {
        Self {
            question_set: quiz.question_set.clone(),
            start_time: quiz.start_time,
            end_time: quiz.end_time,
            user_id: user_id.to_string(),
            quiz_id: quiz.id.clone(),
            quiz_name: quiz.name.clone(),
        }
    }
}
