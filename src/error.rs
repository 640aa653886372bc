use axum::{
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;
use tracing::error;

/// Error taxonomy for the auth surface. Each variant maps to exactly one
/// status code and client-visible message; anything unexpected is folded
/// into `Internal` at the handler boundary.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0}")]
    Validation(String),
    #[error("Email already registered")]
    DuplicateEmail,
    #[error("Incorrect email or password")]
    InvalidCredentials,
    #[error("Not authenticated")]
    Unauthenticated,
    #[error("Internal server error")]
    Internal(#[from] anyhow::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, bearer_challenge) = match &self {
            AppError::Validation(_) | AppError::DuplicateEmail => (StatusCode::BAD_REQUEST, false),
            AppError::InvalidCredentials | AppError::Unauthenticated => {
                (StatusCode::UNAUTHORIZED, true)
            }
            AppError::Internal(e) => {
                // Full chain stays server-side; the client only sees the
                // generic message from the Display impl.
                error!(error = ?e, "internal error");
                (StatusCode::INTERNAL_SERVER_ERROR, false)
            }
        };

        let body = Json(json!({ "detail": self.to_string() }));
        if bearer_challenge {
            (status, [(header::WWW_AUTHENTICATE, "Bearer")], body).into_response()
        } else {
            (status, body).into_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_mapping() {
        assert_eq!(
            AppError::Validation("height out of range".into())
                .into_response()
                .status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::DuplicateEmail.into_response().status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::InvalidCredentials.into_response().status(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            AppError::Unauthenticated.into_response().status(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            AppError::Internal(anyhow::anyhow!("db down"))
                .into_response()
                .status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn invalid_credentials_has_one_fixed_message() {
        // Unknown email and wrong password both surface this exact
        // message, so responses cannot be used to enumerate accounts.
        assert_eq!(
            AppError::InvalidCredentials.to_string(),
            "Incorrect email or password"
        );
    }

    #[test]
    fn internal_error_hides_detail() {
        let err = AppError::Internal(anyhow::anyhow!("connection refused at 10.0.0.3"));
        assert_eq!(err.to_string(), "Internal server error");
    }

    #[test]
    fn credential_errors_carry_bearer_challenge() {
        let res = AppError::InvalidCredentials.into_response();
        assert_eq!(
            res.headers().get(header::WWW_AUTHENTICATE).unwrap(),
            "Bearer"
        );
        let res = AppError::Unauthenticated.into_response();
        assert_eq!(
            res.headers().get(header::WWW_AUTHENTICATE).unwrap(),
            "Bearer"
        );
    }
}
