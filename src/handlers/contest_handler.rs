use actix_web::{post, web, HttpRequest, HttpResponse};

use crate::{
    app_state::AppState,
    auth::AuthenticatedUser,
    errors::AppError,
    middleware::get_request_id,
    models::{
        domain::RegistrationOutcome,
        dto::response::{RegistrationResponse, TokenResponse},
    },
};

#[post("/api/contests/{contest_id}/join")]
pub async fn join_contest(
    req: HttpRequest,
    state: web::Data<AppState>,
    contest_id: web::Path<String>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let request_id = get_request_id(&req);

    let token = state
        .contest_service
        .join_contest(&contest_id, &auth.0.sub)
        .await
        .map_err(|err| {
            log::warn!(
                "[{}] user {} denied entry to contest {}: {}",
                request_id,
                auth.0.sub,
                contest_id,
                err
            );
            err
        })?;

    log::info!("[{}] user {} joined contest {}", request_id, auth.0.sub, contest_id);
    Ok(HttpResponse::Ok().json(TokenResponse { token }))
}

#[post("/api/contests/{contest_id}/register")]
pub async fn register_for_contest(
    req: HttpRequest,
    state: web::Data<AppState>,
    contest_id: web::Path<String>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let outcome = state
        .contest_service
        .register_for_contest(&contest_id, &auth.0.sub)
        .await?;

    let response = match outcome {
        RegistrationOutcome::Created => {
            log::info!(
                "[{}] user {} registered for contest {}",
                get_request_id(&req),
                auth.0.sub,
                contest_id
            );
            HttpResponse::Created().json(RegistrationResponse {
                message: "Registered successfully".to_string(),
                token: None,
            })
        }
        RegistrationOutcome::AlreadyRegistered => HttpResponse::Ok().json(RegistrationResponse {
            message: "Already registered".to_string(),
            token: None,
        }),
    };

    Ok(response)
}
