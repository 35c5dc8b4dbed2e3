use std::sync::Arc;

use validator::Validate;

use crate::{
    auth::Claims,
    errors::{AppError, AppResult},
    models::{
        domain::User,
        dto::{
            request::{AppendBadgeRequest, CreateProfileRequest},
            response::UserDto,
        },
    },
    repositories::UserRepository,
};

pub struct UserService {
    repository: Arc<dyn UserRepository>,
}

impl UserService {
    pub fn new(repository: Arc<dyn UserRepository>) -> Self {
        Self { repository }
    }

    pub async fn get_profile(&self, email: &str) -> AppResult<UserDto> {
        let user = self
            .repository
            .find_by_email(email)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("User with email '{}' not found", email)))?;

        Ok(user.into())
    }

    /// Creates the caller's user document on first call; later calls return it unchanged.
    pub async fn create_profile(
        &self,
        caller: &Claims,
        request: CreateProfileRequest,
    ) -> AppResult<UserDto> {
        request.validate()?;

        let user = User::new(&request.name, &caller.email);
        let stored = self.repository.create_if_absent(user).await?;
        Ok(stored.into())
    }

    /// Appends a badge URL to the caller's badge list and returns the new list.
    pub async fn append_badge(&self, email: &str, request: AppendBadgeRequest) -> AppResult<Vec<String>> {
        request.validate()?;

        let user = self
            .repository
            .push_badge(email, &request.badge_url)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("User with email '{}' not found", email)))?;

        Ok(user.badges)
    }
}
