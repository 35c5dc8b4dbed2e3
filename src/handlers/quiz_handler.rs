use actix_web::{post, web, HttpRequest, HttpResponse};

use crate::{
    app_state::AppState,
    auth::AuthenticatedUser,
    errors::AppError,
    middleware::get_request_id,
    models::{
        domain::RegistrationOutcome,
        dto::{request::RegisterQuizRequest, response::RegistrationResponse},
    },
};

/// Identity is optional at extraction time: a bad invitation code must be
/// reported as 403 before an anonymous caller is turned away with 401.
#[post("/api/quizzes/register")]
pub async fn register_for_quiz(
    req: HttpRequest,
    state: web::Data<AppState>,
    request: web::Json<RegisterQuizRequest>,
    auth: Option<AuthenticatedUser>,
) -> Result<HttpResponse, AppError> {
    let request_id = get_request_id(&req);
    let caller = auth.map(|a| a.0);

    let registered = state
        .quiz_service
        .register_for_quiz(&request, caller.as_ref())
        .await
        .map_err(|err| {
            log::warn!("[{}] quiz registration refused: {}", request_id, err);
            err
        })?;

    let message = match registered.outcome {
        RegistrationOutcome::Created => {
            log::info!(
                "[{}] registered {} for quiz {}",
                request_id,
                caller.as_ref().map(|c| c.sub.as_str()).unwrap_or("-"),
                request.quiz_id.as_deref().unwrap_or("-")
            );
            "Registered successfully"
        }
        RegistrationOutcome::AlreadyRegistered => "Already registered",
    };

    Ok(HttpResponse::Ok().json(RegistrationResponse {
        message: message.to_string(),
        token: Some(registered.token),
    }))
}
