use axum::extract::{Path, State};
use axum::http::{header, HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Form;
use tracing::debug;

use crate::auth::{ReadAccess, WriteAccess};
use crate::error::{AppError, Result};
use crate::model::{CreateForm, UpdateForm};
use crate::state::AppState;

fn json(body: Vec<u8>) -> Response {
    ([(header::CONTENT_TYPE, "application/json")], body).into_response()
}

pub async fn list_handler(_: ReadAccess, State(state): State<AppState>) -> Result<Response> {
    let body = state.shortener().list().await?;
    Ok(json(body))
}

pub async fn create_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    Form(form): Form<CreateForm>,
) -> Result<Response> {
    if !state.authorizer().can_create(&headers, form.id.is_empty()) {
        debug!(id = %form.id, "failed to authorize create");
        return Err(AppError::Unauthorized);
    }

    let body = state.shortener().create(&form.id, &form.url).await?;
    debug!(id = %form.id, url = %form.url, "created entry");
    Ok(json(body))
}

pub async fn follow_handler(
    Path(id): Path<String>,
    State(state): State<AppState>,
) -> Result<Response> {
    let url = state.shortener().get_url(&id).await?;
    Ok((StatusCode::MOVED_PERMANENTLY, [(header::LOCATION, url)]).into_response())
}

pub async fn expand_handler(
    _: ReadAccess,
    Path(id): Path<String>,
    State(state): State<AppState>,
) -> Result<Response> {
    let body = state.shortener().get(&id).await?;
    Ok(json(body))
}

pub async fn update_handler(
    _: WriteAccess,
    Path(id): Path<String>,
    State(state): State<AppState>,
    Form(form): Form<UpdateForm>,
) -> Result<StatusCode> {
    state.shortener().update(&id, &form.url).await?;
    debug!(id = %id, url = %form.url, "updated entry");
    Ok(StatusCode::NO_CONTENT)
}

pub async fn delete_handler(
    _: WriteAccess,
    Path(id): Path<String>,
    State(state): State<AppState>,
) -> Result<StatusCode> {
    state.shortener().delete(&id).await?;
    debug!(id = %id, "deleted entry");
    Ok(StatusCode::NO_CONTENT)
}
