#![allow(dead_code)]

use std::{collections::HashMap, sync::Arc};

use async_trait::async_trait;
use chrono::{Duration, Utc};
use jsonwebtoken::{encode, EncodingKey, Header};
use mongodb::bson::oid::ObjectId;
use secrecy::{ExposeSecret, SecretString};
use tokio::sync::RwLock;

use arena_server::{
    app_state::{AppState, Repositories},
    auth::Claims,
    config::Config,
    errors::AppResult,
    models::domain::{
        Contest, Quiz, Registration, RegistrationOutcome, RegistrationTarget, User,
    },
    repositories::{ContestRepository, QuizRepository, RegistrationRepository, UserRepository},
};

pub struct InMemoryContestRepository {
    contests: RwLock<HashMap<String, Contest>>,
}

impl InMemoryContestRepository {
    pub fn new() -> Self {
        Self {
            contests: RwLock::new(HashMap::new()),
        }
    }

    pub async fn insert(&self, contest: Contest) {
        self.contests.write().await.insert(contest.id.clone(), contest);
    }
}

#[async_trait]
impl ContestRepository for InMemoryContestRepository {
    async fn find_by_id(&self, id: &str) -> AppResult<Option<Contest>> {
        Ok(self.contests.read().await.get(id).cloned())
    }

    async fn find_private_by_id(&self, id: &str) -> AppResult<Option<Contest>> {
        Ok(self
            .contests
            .read()
            .await
            .get(id)
            .filter(|c| c.is_private)
            .cloned())
    }

    async fn ensure_indexes(&self) -> AppResult<()> {
        Ok(())
    }
}

pub struct InMemoryQuizRepository {
    quizzes: RwLock<HashMap<String, Quiz>>,
}

impl InMemoryQuizRepository {
    pub fn new() -> Self {
        Self {
            quizzes: RwLock::new(HashMap::new()),
        }
    }

    pub async fn insert(&self, quiz: Quiz) {
        self.quizzes.write().await.insert(quiz.id.clone(), quiz);
    }
}

#[async_trait]
impl QuizRepository for InMemoryQuizRepository {
    async fn find_by_id(&self, id: &str) -> AppResult<Option<Quiz>> {
        Ok(self.quizzes.read().await.get(id).cloned())
    }

    async fn ensure_indexes(&self) -> AppResult<()> {
        Ok(())
    }
}

type RegistrationKey = (String, RegistrationTarget, String);

pub struct InMemoryRegistrationRepository {
    registrations: RwLock<HashMap<RegistrationKey, Registration>>,
}

impl InMemoryRegistrationRepository {
    pub fn new() -> Self {
        Self {
            registrations: RwLock::new(HashMap::new()),
        }
    }

    pub async fn count(&self) -> usize {
        self.registrations.read().await.len()
    }
}

#[async_trait]
impl RegistrationRepository for InMemoryRegistrationRepository {
    async fn find(
        &self,
        user_id: &str,
        target: RegistrationTarget,
        target_id: &str,
    ) -> AppResult<Option<Registration>> {
        let key = (user_id.to_string(), target, target_id.to_string());
        Ok(self.registrations.read().await.get(&key).cloned())
    }

    async fn register(&self, registration: Registration) -> AppResult<RegistrationOutcome> {
        let key = (
            registration.user_id.clone(),
            registration.target,
            registration.target_id.clone(),
        );

        // Single write lock covers check and insert, like the store's upsert.
        let mut registrations = self.registrations.write().await;
        if registrations.contains_key(&key) {
            return Ok(RegistrationOutcome::AlreadyRegistered);
        }
        registrations.insert(key, registration);
        Ok(RegistrationOutcome::Created)
    }

    async fn ensure_indexes(&self) -> AppResult<()> {
        Ok(())
    }
}

pub struct InMemoryUserRepository {
    users_by_email: RwLock<HashMap<String, User>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self {
            users_by_email: RwLock::new(HashMap::new()),
        }
    }

    pub async fn insert(&self, user: User) {
        self.users_by_email.write().await.insert(user.email.clone(), user);
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        Ok(self.users_by_email.read().await.get(email).cloned())
    }

    async fn create_if_absent(&self, mut user: User) -> AppResult<User> {
        let mut users = self.users_by_email.write().await;
        let stored = users.entry(user.email.clone()).or_insert_with(|| {
            user.id = Some(ObjectId::new());
            user
        });
        Ok(stored.clone())
    }

    async fn push_badge(&self, email: &str, badge_url: &str) -> AppResult<Option<User>> {
        let mut users = self.users_by_email.write().await;
        Ok(users.get_mut(email).map(|user| {
            user.badges.push(badge_url.to_string());
            user.clone()
        }))
    }

    async fn ensure_indexes(&self) -> AppResult<()> {
        Ok(())
    }
}

pub fn test_config() -> Config {
    Config {
        mongo_conn_string: "mongodb://localhost:27017".to_string(),
        mongo_db_name: "arena-test".to_string(),
        web_server_host: "127.0.0.1".to_string(),
        web_server_port: 8080,
        cors_allowed_origin: "http://localhost:5173".to_string(),
        auth_jwt_secret: SecretString::from("integration_auth_secret".to_string()),
        contest_token_secret: SecretString::from("integration_contest_secret".to_string()),
        quiz_token_secret: SecretString::from("integration_quiz_secret".to_string()),
        app_env: "test".to_string(),
    }
}

/// Application state over in-memory stores, with handles kept for seeding
/// and inspection.
pub struct Harness {
    pub state: AppState,
    pub contests: Arc<InMemoryContestRepository>,
    pub quizzes: Arc<InMemoryQuizRepository>,
    pub registrations: Arc<InMemoryRegistrationRepository>,
    pub users: Arc<InMemoryUserRepository>,
}

impl Harness {
    pub fn new() -> Self {
        let contests = Arc::new(InMemoryContestRepository::new());
        let quizzes = Arc::new(InMemoryQuizRepository::new());
        let registrations = Arc::new(InMemoryRegistrationRepository::new());
        let users = Arc::new(InMemoryUserRepository::new());

        let state = AppState::with_repositories(
            test_config(),
            Repositories {
                contests: contests.clone(),
                quizzes: quizzes.clone(),
                registrations: registrations.clone(),
                users: users.clone(),
            },
        );

        Self {
            state,
            contests,
            quizzes,
            registrations,
            users,
        }
    }

    /// Seeds a roster entry the way an administrator would.
    pub async fn enrol(&self, user_id: &str, target: RegistrationTarget, target_id: &str) {
        self.registrations
            .register(Registration::new(user_id, target, target_id))
            .await
            .expect("in-memory register cannot fail");
    }

    /// Bearer token for a user as the upstream identity provider would mint it.
    pub fn bearer_for(&self, user: &User) -> String {
        let now = Utc::now();
        let claims = Claims {
            sub: user.id.map(|id| id.to_hex()).unwrap_or_else(|| user.email.clone()),
            email: user.email.clone(),
            name: Some(user.name.clone()),
            iat: now.timestamp() as usize,
            exp: (now + Duration::hours(1)).timestamp() as usize,
        };
        let secret = test_config().auth_jwt_secret;
        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(secret.expose_secret().as_bytes()),
        )
        .expect("token should be created");
        format!("Bearer {}", token)
    }
}

pub fn contest(id: &str, is_private: bool) -> Contest {
    let start = Utc::now() + Duration::hours(1);
    let mut contest = Contest::new("Regional Final", is_private, "qs-regional", start, start + Duration::hours(2));
    contest.id = id.to_string();
    contest
}

pub fn quiz(id: &str, invitation_code: &str) -> Quiz {
    let start = Utc::now();
    let mut quiz = Quiz::new("Lunch Quiz", invitation_code, "qs-lunch", start, start + Duration::minutes(45));
    quiz.id = id.to_string();
    quiz
}

/// A stored user; the bearer subject is the ObjectId hex.
pub fn user(name: &str) -> User {
    let mut user = User::new(name, &format!("{}@example.com", name.to_lowercase()));
    user.id = Some(ObjectId::new());
    user
}

/// Builds the service under test from a [`Harness`].
macro_rules! test_app {
    ($harness:expr) => {
        actix_web::test::init_service(
            actix_web::App::new()
                .app_data(actix_web::web::Data::new($harness.state.clone()))
                .app_data(actix_web::web::Data::from($harness.state.jwt_service.clone()))
                .wrap(arena_server::auth::AuthMiddleware)
                .wrap(arena_server::middleware::RequestIdMiddleware)
                .configure(arena_server::handlers::configure),
        )
        .await
    };
}
