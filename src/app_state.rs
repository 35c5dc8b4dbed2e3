use std::sync::Arc;

use crate::{
    auth::{JwtService, SessionTokenIssuer},
    config::Config,
    db::Database,
    errors::AppResult,
    repositories::{
        ContestRepository, MongoContestRepository, MongoQuizRepository,
        MongoRegistrationRepository, MongoUserRepository, QuizRepository,
        RegistrationRepository, UserRepository,
    },
    services::{ContestService, QuizService, UserService},
};

/// Storage backends the services are built on.
pub struct Repositories {
    pub contests: Arc<dyn ContestRepository>,
    pub quizzes: Arc<dyn QuizRepository>,
    pub registrations: Arc<dyn RegistrationRepository>,
    pub users: Arc<dyn UserRepository>,
}

impl Repositories {
    pub fn mongo(db: &Database) -> Self {
        Self {
            contests: Arc::new(MongoContestRepository::new(db)),
            quizzes: Arc::new(MongoQuizRepository::new(db)),
            registrations: Arc::new(MongoRegistrationRepository::new(db)),
            users: Arc::new(MongoUserRepository::new(db)),
        }
    }

    pub async fn ensure_indexes(&self) -> AppResult<()> {
        self.contests.ensure_indexes().await?;
        self.quizzes.ensure_indexes().await?;
        self.registrations.ensure_indexes().await?;
        self.users.ensure_indexes().await?;
        Ok(())
    }
}

#[derive(Clone)]
pub struct AppState {
    pub contest_service: Arc<ContestService>,
    pub quiz_service: Arc<QuizService>,
    pub user_service: Arc<UserService>,
    pub jwt_service: Arc<JwtService>,
    pub config: Arc<Config>,
}

impl AppState {
    pub async fn new(config: Config, db: &Database) -> AppResult<Self> {
        let repositories = Repositories::mongo(db);
        repositories.ensure_indexes().await?;

        Ok(Self::with_repositories(config, repositories))
    }

    /// Signing secrets are taken from `config` and handed to the issuers here;
    /// nothing else reads them.
    pub fn with_repositories(config: Config, repositories: Repositories) -> Self {
        let tokens = Arc::new(SessionTokenIssuer::new(
            &config.contest_token_secret,
            &config.quiz_token_secret,
        ));
        let jwt_service = Arc::new(JwtService::new(&config.auth_jwt_secret));

        let contest_service = Arc::new(ContestService::new(
            repositories.contests,
            Arc::clone(&repositories.registrations),
            Arc::clone(&tokens),
        ));
        let quiz_service = Arc::new(QuizService::new(
            repositories.quizzes,
            repositories.registrations,
            tokens,
        ));
        let user_service = Arc::new(UserService::new(repositories.users));

        Self {
            contest_service,
            quiz_service,
            user_service,
            jwt_service,
            config: Arc::new(config),
        }
    }
}
