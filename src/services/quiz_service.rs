use std::sync::Arc;

use crate::{
    auth::{Claims, QuizSessionClaims, SessionTokenIssuer},
    errors::{AppError, AppResult},
    models::{
        domain::{Registration, RegistrationOutcome, RegistrationTarget},
        dto::request::RegisterQuizRequest,
    },
    repositories::{QuizRepository, RegistrationRepository},
};

/// Token plus whether this call created the registration.
#[derive(Debug, Clone)]
pub struct QuizRegistration {
    pub token: String,
    pub outcome: RegistrationOutcome,
}

pub struct QuizService {
    quizzes: Arc<dyn QuizRepository>,
    registrations: Arc<dyn RegistrationRepository>,
    tokens: Arc<SessionTokenIssuer>,
}

impl QuizService {
    pub fn new(
        quizzes: Arc<dyn QuizRepository>,
        registrations: Arc<dyn RegistrationRepository>,
        tokens: Arc<SessionTokenIssuer>,
    ) -> Self {
        Self {
            quizzes,
            registrations,
            tokens,
        }
    }

    /// Registers the caller for an invitation-only quiz.
    ///
    /// Checks run in a fixed order: required fields, quiz existence,
    /// invitation code, caller identity. Registering again returns the same
    /// token without writing a second record.
    pub async fn register_for_quiz(
        &self,
        request: &RegisterQuizRequest,
        caller: Option<&Claims>,
    ) -> AppResult<QuizRegistration> {
        let (quiz_id, invitation_code) = request.require_fields()?;

        let quiz = self
            .quizzes
            .find_by_id(quiz_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Quiz with id '{}' not found", quiz_id)))?;

        if !quiz.accepts_invitation(invitation_code) {
            return Err(AppError::Forbidden("Invalid invitation code".to_string()));
        }

        let caller = caller
            .ok_or_else(|| AppError::Unauthorized("Authentication required".to_string()))?;

        let claims = QuizSessionClaims::new(&quiz, &caller.sub);
        let token = self.tokens.issue_quiz_token(&claims)?;

        let registration = Registration::new(&caller.sub, RegistrationTarget::Quiz, &quiz.id);
        let outcome = self.registrations.register(registration).await?;

        Ok(QuizRegistration { token, outcome })
    }
}
