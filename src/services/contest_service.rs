use std::sync::Arc;

use crate::{
    auth::{ContestSessionClaims, SessionTokenIssuer},
    errors::{AppError, AppResult},
    models::domain::{Registration, RegistrationOutcome, RegistrationTarget},
    repositories::{ContestRepository, RegistrationRepository},
};

pub struct ContestService {
    contests: Arc<dyn ContestRepository>,
    registrations: Arc<dyn RegistrationRepository>,
    tokens: Arc<SessionTokenIssuer>,
}

impl ContestService {
    pub fn new(
        contests: Arc<dyn ContestRepository>,
        registrations: Arc<dyn RegistrationRepository>,
        tokens: Arc<SessionTokenIssuer>,
    ) -> Self {
        Self {
            contests,
            registrations,
            tokens,
        }
    }

    /// Admits a registered user to a private contest and returns a signed
    /// contest session token. Read-only.
    pub async fn join_contest(&self, contest_id: &str, user_id: &str) -> AppResult<String> {
        let contest = self
            .contests
            .find_private_by_id(contest_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Contest with id '{}' not found", contest_id)))?;

        let registered = self
            .registrations
            .find(user_id, RegistrationTarget::Contest, &contest.id)
            .await?
            .is_some();
        if !registered {
            return Err(AppError::NotRegistered(format!(
                "User is not registered for contest '{}'",
                contest.id
            )));
        }

        let claims = ContestSessionClaims::new(&contest, user_id);
        self.tokens.issue_contest_token(&claims)
    }

    /// Enrols a user in a public contest. Repeated calls leave a single
    /// registration. Private contest rosters are managed outside this service.
    pub async fn register_for_contest(
        &self,
        contest_id: &str,
        user_id: &str,
    ) -> AppResult<RegistrationOutcome> {
        let contest = self
            .contests
            .find_by_id(contest_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Contest with id '{}' not found", contest_id)))?;

        if contest.is_private {
            return Err(AppError::Forbidden(format!(
                "Contest '{}' is invitation only",
                contest.id
            )));
        }

        let registration = Registration::new(user_id, RegistrationTarget::Contest, &contest.id);
        self.registrations.register(registration).await
    }
}
