use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use tiny_shortener::ShortenerError;
use tracing::error;

pub type Result<T> = std::result::Result<T, AppError>;

#[derive(Debug)]
pub enum AppError {
    Unauthorized,
    Shortener(ShortenerError),
}

impl From<ShortenerError> for AppError {
    fn from(value: ShortenerError) -> Self {
        Self::Shortener(value)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            AppError::Unauthorized => StatusCode::UNAUTHORIZED.into_response(),
            AppError::Shortener(ShortenerError::NotFound(_)) => {
                StatusCode::NOT_FOUND.into_response()
            }
            AppError::Shortener(err) if err.is_validation_error() => {
                (StatusCode::BAD_REQUEST, err.to_string()).into_response()
            }
            AppError::Shortener(err) => {
                error!(error = %err, "request failed");
                (StatusCode::INTERNAL_SERVER_ERROR, err.to_string()).into_response()
            }
        }
    }
}
