use actix_web::{get, post, web, HttpResponse};

use crate::{
    app_state::AppState,
    auth::AuthenticatedUser,
    errors::AppError,
    models::dto::{
        request::{AppendBadgeRequest, CreateProfileRequest},
        response::BadgesResponse,
    },
};

#[post("/api/users/me")]
pub async fn create_profile(
    state: web::Data<AppState>,
    request: web::Json<CreateProfileRequest>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let profile = state
        .user_service
        .create_profile(&auth.0, request.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(profile))
}

#[get("/api/users/me")]
pub async fn get_profile(
    state: web::Data<AppState>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let profile = state.user_service.get_profile(&auth.0.email).await?;
    Ok(HttpResponse::Ok().json(profile))
}

#[post("/api/users/me/badges")]
pub async fn append_badge(
    state: web::Data<AppState>,
    request: web::Json<AppendBadgeRequest>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let badges = state
        .user_service
        .append_badge(&auth.0.email, request.into_inner())
        .await?;

    log::info!("Awarded badge #{} to {}", badges.len(), auth.0.email);
    Ok(HttpResponse::Ok().json(BadgesResponse {
        message: "Badge added".to_string(),
        badges,
    }))
}
