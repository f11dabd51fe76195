use axum::{extract::State, routing::get, Json, Router};
use tracing::{info, instrument};

use crate::{
    auth::{dto::PublicUser, extractors::CurrentUser, repo_types::ProfileUpdate},
    error::AppError,
    extractors::AppJson,
    posts::repo_types::Post,
    state::AppState,
};

pub fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/users/me", get(get_me).put(update_me))
        .route("/users/me/posts", get(my_posts))
}

#[instrument(skip(user), fields(user_id = %user.id))]
pub async fn get_me(CurrentUser(user): CurrentUser) -> Json<PublicUser> {
    Json(user.into())
}

#[instrument(skip(state, user, payload), fields(user_id = %user.id))]
pub async fn update_me(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    AppJson(payload): AppJson<ProfileUpdate>,
) -> Result<Json<PublicUser>, AppError> {
    if matches!(payload.name.as_deref(), Some(name) if name.trim().is_empty()) {
        return Err(AppError::Validation("name must not be empty".into()));
    }
    let user = state.users.update_profile(user.id, &payload).await?;
    info!("profile updated");
    Ok(Json(user.into()))
}

#[instrument(skip(state, user), fields(user_id = %user.id))]
pub async fn my_posts(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
) -> Result<Json<Vec<Post>>, AppError> {
    Ok(Json(state.posts.list_by_author(user.id).await?))
}
