use axum::{extract::State, http::StatusCode, routing::post, Json, Router};
use tracing::{info, instrument};

use crate::{
    auth::{
        dto::{AuthResponse, LoginRequest, MessageResponse, RegisterRequest},
        services,
    },
    error::AppError,
    extractors::AppJson,
    state::AppState,
};

pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/register", post(register))
        .route("/auth/login", post(login))
        .route("/auth/logout", post(logout))
}

#[instrument(skip(state, payload))]
pub async fn register(
    State(state): State<AppState>,
    AppJson(payload): AppJson<RegisterRequest>,
) -> Result<(StatusCode, Json<AuthResponse>), AppError> {
    let user = services::register(
        state.users.as_ref(),
        &state.hasher,
        &payload.email,
        &payload.password,
        &payload.name,
    )
    .await?;
    let access_token = state.keys.issue(user.id)?;
    Ok((
        StatusCode::CREATED,
        Json(AuthResponse::bearer(access_token, user)),
    ))
}

#[instrument(skip(state, payload))]
pub async fn login(
    State(state): State<AppState>,
    AppJson(payload): AppJson<LoginRequest>,
) -> Result<Json<AuthResponse>, AppError> {
    let (access_token, user) = services::login(
        state.users.as_ref(),
        &state.hasher,
        &state.keys,
        &payload.email,
        &payload.password,
    )
    .await?;
    Ok(Json(AuthResponse::bearer(access_token, user)))
}

/// Tokens are not tracked server side; the client just drops its copy.
#[instrument]
pub async fn logout() -> Json<MessageResponse> {
    info!("logout requested");
    Json(MessageResponse::new("Successfully logged out"))
}
