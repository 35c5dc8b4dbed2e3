pub mod contest_repository;
pub mod quiz_repository;
pub mod registration_repository;
pub mod user_repository;

pub use contest_repository::{ContestRepository, MongoContestRepository};
pub use quiz_repository::{MongoQuizRepository, QuizRepository};
pub use registration_repository::{MongoRegistrationRepository, RegistrationRepository};
pub use user_repository::{MongoUserRepository, UserRepository};
