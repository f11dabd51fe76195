use async_trait::async_trait;
use axum::{
    extract::{rejection::JsonRejection, FromRequest, FromRequestParts, Path, Request},
    http::request::Parts,
    Json,
};
use uuid::Uuid;

use crate::error::AppError;

/// `Json<T>` whose rejections answer with the usual `{"detail": ..}` body.
pub struct AppJson<T>(pub T);

#[async_trait]
impl<T, S> FromRequest<S> for AppJson<T>
where
    Json<T>: FromRequest<S, Rejection = JsonRejection>,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state).await?;
        Ok(AppJson(value))
    }
}

async fn id_param<S: Send + Sync>(
    parts: &mut Parts,
    state: &S,
    kind: &'static str,
) -> Result<Uuid, AppError> {
    let Path(raw) = Path::<String>::from_request_parts(parts, state).await?;
    Uuid::parse_str(&raw).map_err(|_| AppError::NotFound(kind))
}

/// `:post_id` path segment. Anything that is not a UUID cannot name a post.
pub struct PostId(pub Uuid);

#[async_trait]
impl<S: Send + Sync> FromRequestParts<S> for PostId {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        id_param(parts, state, "Post").await.map(PostId)
    }
}

/// `:comment_id` path segment.
pub struct CommentId(pub Uuid);

#[async_trait]
impl<S: Send + Sync> FromRequestParts<S> for CommentId {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        id_param(parts, state, "Comment").await.map(CommentId)
    }
}
