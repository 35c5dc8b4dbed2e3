pub mod contest_handler;
pub mod health_handler;
pub mod quiz_handler;
pub mod user_handler;

use actix_web::web;

use crate::errors::AppError;

pub use contest_handler::{join_contest, register_for_contest};
pub use health_handler::{health_check, health_check_live, health_check_ready};
pub use quiz_handler::register_for_quiz;
pub use user_handler::{append_badge, create_profile, get_profile};

/// Registers every route. Malformed JSON bodies are reported with the same
/// error body as other validation failures.
pub fn configure(cfg: &mut web::ServiceConfig) {
    let json_config = web::JsonConfig::default()
        .limit(16 * 1024)
        .error_handler(|err, _req| AppError::ValidationError(err.to_string()).into());

    cfg.app_data(json_config)
        .service(health_check)
        .service(health_check_live)
        .service(health_check_ready)
        .service(join_contest)
        .service(register_for_contest)
        .service(register_for_quiz)
        .service(create_profile)
        .service(get_profile)
        .service(append_badge);
}
