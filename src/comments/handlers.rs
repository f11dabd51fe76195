use axum::{
    extract::State,
    http::StatusCode,
    routing::{get, put},
    Json, Router,
};
use serde::Deserialize;
use tracing::{info, instrument};
use uuid::Uuid;

use crate::{
    auth::{
        dto::MessageResponse,
        extractors::CurrentUser,
        guard::{ensure_owner, Action},
    },
    comments::repo_types::{Comment, NewComment},
    error::AppError,
    extractors::{AppJson, CommentId, PostId},
    posts::handlers::load_post,
    state::AppState,
};

/// Body for both creating and editing a comment.
#[derive(Debug, Deserialize)]
pub struct CommentBody {
    pub content: String,
}

impl CommentBody {
    fn validated(self) -> Result<String, AppError> {
        if self.content.trim().is_empty() {
            return Err(AppError::Validation("content must not be empty".into()));
        }
        Ok(self.content)
    }
}

pub fn comment_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/posts/:post_id/comments",
            get(list_comments).post(create_comment),
        )
        .route(
            "/comments/:comment_id",
            put(update_comment).delete(delete_comment),
        )
}

async fn load_comment(state: &AppState, comment_id: Uuid) -> Result<Comment, AppError> {
    state
        .comments
        .find_by_id(comment_id)
        .await?
        .ok_or(AppError::NotFound("Comment"))
}

#[instrument(skip(state, user, payload), fields(user_id = %user.id))]
pub async fn create_comment(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    PostId(post_id): PostId,
    AppJson(payload): AppJson<CommentBody>,
) -> Result<(StatusCode, Json<Comment>), AppError> {
    let content = payload.validated()?;
    let post = load_post(&state, post_id).await?;
    let comment = state
        .comments
        .insert(NewComment {
            content,
            post_id: post.id,
            author_id: user.id,
        })
        .await?;
    info!(comment_id = %comment.id, post_id = %post.id, "comment created");
    Ok((StatusCode::CREATED, Json(comment)))
}

#[instrument(skip(state))]
pub async fn list_comments(
    State(state): State<AppState>,
    PostId(post_id): PostId,
) -> Result<Json<Vec<Comment>>, AppError> {
    let post = load_post(&state, post_id).await?;
    Ok(Json(state.comments.list_by_post(post.id).await?))
}

#[instrument(skip(state, user, payload), fields(user_id = %user.id))]
pub async fn update_comment(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    CommentId(comment_id): CommentId,
    AppJson(payload): AppJson<CommentBody>,
) -> Result<Json<Comment>, AppError> {
    let content = payload.validated()?;
    let comment = load_comment(&state, comment_id).await?;
    ensure_owner(user.id, &comment, Action::Edit)?;
    let comment = state.comments.update_content(comment.id, &content).await?;
    info!(comment_id = %comment.id, "comment updated");
    Ok(Json(comment))
}

#[instrument(skip(state, user), fields(user_id = %user.id))]
pub async fn delete_comment(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    CommentId(comment_id): CommentId,
) -> Result<Json<MessageResponse>, AppError> {
    let comment = load_comment(&state, comment_id).await?;
    ensure_owner(user.id, &comment, Action::Delete)?;
    state.comments.delete(comment.id).await?;
    info!(comment_id = %comment.id, "comment deleted");
    Ok(Json(MessageResponse::new("Comment successfully deleted")))
}
