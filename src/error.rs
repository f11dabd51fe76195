use axum::{
    extract::rejection::{JsonRejection, PathRejection},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;
use tracing::error;

use crate::auth::{
    guard::Forbidden, jwt::TokenError, password::PasswordError, services::AuthError,
};

/// Error type returned by every handler. Converted to `{"detail": ...}`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Invalid email or password")]
    InvalidCredentials,
    #[error("Email already registered")]
    DuplicateEmail,
    #[error("Could not validate credentials")]
    Unauthenticated(#[from] TokenError),
    #[error("Could not validate credentials")]
    UnknownSubject,
    #[error(transparent)]
    Forbidden(#[from] Forbidden),
    #[error("{0} not found")]
    NotFound(&'static str),
    #[error("{0}")]
    Validation(String),
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl From<AuthError> for AppError {
    fn from(e: AuthError) -> Self {
        match e {
            AuthError::InvalidCredentials => AppError::InvalidCredentials,
            AuthError::DuplicateEmail => AppError::DuplicateEmail,
            AuthError::Validation(msg) => AppError::Validation(msg),
            AuthError::Password(PasswordError::Hash(msg)) => {
                AppError::Internal(anyhow::anyhow!(msg))
            }
            AuthError::Password(e) => AppError::Validation(e.to_string()),
            AuthError::Internal(e) => AppError::Internal(e),
        }
    }
}

/// Unreadable or mistyped request bodies are validation failures.
impl From<JsonRejection> for AppError {
    fn from(e: JsonRejection) -> Self {
        AppError::Validation(e.body_text())
    }
}

impl From<PathRejection> for AppError {
    fn from(e: PathRejection) -> Self {
        AppError::Validation(e.body_text())
    }
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::InvalidCredentials
            | AppError::Unauthenticated(_)
            | AppError::UnknownSubject => StatusCode::UNAUTHORIZED,
            AppError::DuplicateEmail => StatusCode::BAD_REQUEST,
            AppError::Forbidden(_) => StatusCode::FORBIDDEN,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let detail = match &self {
            AppError::Internal(e) => {
                error!(error = ?e, "internal error");
                "Internal server error".to_string()
            }
            other => other.to_string(),
        };
        let body = Json(json!({ "detail": detail }));

        if status == StatusCode::UNAUTHORIZED {
            (status, [(header::WWW_AUTHENTICATE, "Bearer")], body).into_response()
        } else {
            (status, body).into_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::guard::Action;

    #[test]
    fn token_errors_share_one_message() {
        for e in [
            TokenError::Missing,
            TokenError::Malformed,
            TokenError::InvalidSignature,
            TokenError::Expired,
        ] {
            let app: AppError = e.into();
            assert_eq!(app.status(), StatusCode::UNAUTHORIZED);
            assert_eq!(app.to_string(), "Could not validate credentials");
        }
    }

    #[test]
    fn status_mapping() {
        let forbidden: AppError = Forbidden {
            kind: "post",
            action: Action::Edit,
        }
        .into();
        assert_eq!(forbidden.status(), StatusCode::FORBIDDEN);
        assert_eq!(AppError::DuplicateEmail.status(), StatusCode::BAD_REQUEST);
        assert_eq!(AppError::NotFound("Post").status(), StatusCode::NOT_FOUND);
        assert_eq!(AppError::NotFound("Post").to_string(), "Post not found");
        let internal: AppError = anyhow::anyhow!("db down").into();
        assert_eq!(internal.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn unauthorized_carries_bearer_challenge() {
        let res = AppError::InvalidCredentials.into_response();
        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(res.headers()[header::WWW_AUTHENTICATE], "Bearer");

        let res = AppError::Validation("bad".into()).into_response();
        assert!(res.headers().get(header::WWW_AUTHENTICATE).is_none());
    }
}
