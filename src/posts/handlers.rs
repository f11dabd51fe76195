use axum::{extract::State, http::StatusCode, routing::get, Json, Router};
use tracing::{info, instrument};
use uuid::Uuid;

use crate::{
    auth::{
        dto::MessageResponse,
        extractors::CurrentUser,
        guard::{ensure_owner, Action},
    },
    error::AppError,
    extractors::{AppJson, PostId},
    posts::{
        dto::{CreatePostRequest, UpdatePostRequest},
        repo_types::{NewPost, Post},
    },
    state::AppState,
};

pub fn post_routes() -> Router<AppState> {
    Router::new()
        .route("/posts", get(list_posts).post(create_post))
        .route(
            "/posts/:post_id",
            get(get_post).put(update_post).delete(delete_post),
        )
}

pub(crate) async fn load_post(state: &AppState, post_id: Uuid) -> Result<Post, AppError> {
    state
        .posts
        .find_by_id(post_id)
        .await?
        .ok_or(AppError::NotFound("Post"))
}

#[instrument(skip(state, user, payload), fields(user_id = %user.id))]
pub async fn create_post(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    AppJson(payload): AppJson<CreatePostRequest>,
) -> Result<(StatusCode, Json<Post>), AppError> {
    payload.validate()?;
    let post = state
        .posts
        .insert(NewPost {
            title: payload.title,
            content: payload.content,
            excerpt: payload.excerpt,
            category: payload.category,
            author_id: user.id,
        })
        .await?;
    info!(post_id = %post.id, "post created");
    Ok((StatusCode::CREATED, Json(post)))
}

#[instrument(skip(state))]
pub async fn list_posts(State(state): State<AppState>) -> Result<Json<Vec<Post>>, AppError> {
    Ok(Json(state.posts.list().await?))
}

#[instrument(skip(state))]
pub async fn get_post(
    State(state): State<AppState>,
    PostId(post_id): PostId,
) -> Result<Json<Post>, AppError> {
    Ok(Json(load_post(&state, post_id).await?))
}

#[instrument(skip(state, user, payload), fields(user_id = %user.id))]
pub async fn update_post(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    PostId(post_id): PostId,
    AppJson(payload): AppJson<UpdatePostRequest>,
) -> Result<Json<Post>, AppError> {
    let changes = payload.into_changes()?;
    let post = load_post(&state, post_id).await?;
    ensure_owner(user.id, &post, Action::Edit)?;
    let post = state.posts.update(post.id, &changes).await?;
    info!(post_id = %post.id, "post updated");
    Ok(Json(post))
}

#[instrument(skip(state, user), fields(user_id = %user.id))]
pub async fn delete_post(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    PostId(post_id): PostId,
) -> Result<Json<MessageResponse>, AppError> {
    let post = load_post(&state, post_id).await?;
    ensure_owner(user.id, &post, Action::Delete)?;
    state.posts.delete(post.id).await?;
    info!(post_id = %post.id, "post deleted");
    Ok(Json(MessageResponse::new("Post successfully deleted")))
}
