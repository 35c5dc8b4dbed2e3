pub mod contest_service;
pub mod quiz_service;
pub mod user_service;

pub use contest_service::ContestService;
pub use quiz_service::{QuizRegistration, QuizService};
pub use user_service::UserService;
