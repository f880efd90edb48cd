use axum::http::header;
use axum::response::IntoResponse;

/// OpenAPI description of the HTTP surface, served at `GET /api`.
pub const API_DESCRIPTION: &str = include_str!("../../api.yaml");

pub async fn api_description_handler() -> impl IntoResponse {
    ([(header::CONTENT_TYPE, "application/x-yaml")], API_DESCRIPTION)
}
