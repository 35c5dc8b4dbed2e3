pub mod contest;
pub mod quiz;
pub mod registration;
pub mod user;
pub use contest::Contest;
pub use quiz::Quiz;
pub use registration::{Registration, RegistrationOutcome, RegistrationTarget};
pub use user::User;
