use std::collections::HashSet;

use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use secrecy::{ExposeSecret, SecretString};
use serde::{de::DeserializeOwned, Serialize};

use crate::{
    auth::claims::{ContestSessionClaims, QuizSessionClaims},
    errors::{AppError, AppResult},
};

struct SigningKeys {
    encoding: EncodingKey,
    decoding: DecodingKey,
}

impl SigningKeys {
    fn from_secret(secret: &SecretString) -> Self {
        let bytes = secret.expose_secret().as_bytes();
        Self {
            encoding: EncodingKey::from_secret(bytes),
            decoding: DecodingKey::from_secret(bytes),
        }
    }
}

/// Signs contest and quiz session payloads, each family with its own secret.
///
/// Session tokens carry no `exp` claim. The `start_time`/`end_time` window
/// travels inside the payload and is interpreted by whoever consumes it, so
/// verification here checks the signature only.
pub struct SessionTokenIssuer {
    contest: SigningKeys,
    quiz: SigningKeys,
    validation: Validation,
}

impl SessionTokenIssuer {
    pub fn new(contest_secret: &SecretString, quiz_secret: &SecretString) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.required_spec_claims = HashSet::new();
        validation.validate_exp = false;

        Self {
            contest: SigningKeys::from_secret(contest_secret),
            quiz: SigningKeys::from_secret(quiz_secret),
            validation,
        }
    }

    pub fn issue_contest_token(&self, claims: &ContestSessionClaims) -> AppResult<String> {
        sign(claims, &self.contest.encoding)
    }

    pub fn issue_quiz_token(&self, claims: &QuizSessionClaims) -> AppResult<String> {
        sign(claims, &self.quiz.encoding)
    }

    pub fn verify_contest_token(&self, token: &str) -> AppResult<ContestSessionClaims> {
        verify(token, &self.contest.decoding, &self.validation)
    }

    pub fn verify_quiz_token(&self, token: &str) -> AppResult<QuizSessionClaims> {
        verify(token, &self.quiz.decoding, &self.validation)
    }
}

fn sign<T: Serialize>(claims: &T, key: &EncodingKey) -> AppResult<String> {
    encode(&Header::new(Algorithm::HS256), claims, key)
        .map_err(|e| AppError::InternalError(format!("Failed to sign session token: {}", e)))
}

fn verify<T: DeserializeOwned>(
    token: &str,
    key: &DecodingKey,
    validation: &Validation,
) -> AppResult<T> {
    decode::<T>(token, key, validation)
        .map(|data| data.claims)
        .map_err(|e| AppError::Unauthorized(format!("Invalid session token: {}", e)))
}
