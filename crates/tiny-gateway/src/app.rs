use axum::routing::get;
use axum::Router;
use tower_http::trace::TraceLayer;

use crate::handlers::{
    api_description_handler, create_handler, delete_handler, expand_handler, follow_handler,
    health_handler, list_handler, update_handler,
};
use crate::state::AppState;

pub struct App {}

impl App {
    pub fn router(state: AppState) -> Router {
        Router::new()
            .route("/health", get(health_handler))
            .route("/api", get(api_description_handler))
            .route("/api/tiny", get(list_handler).post(create_handler))
            .route(
                "/api/tiny/{id}",
                get(follow_handler)
                    .post(update_handler)
                    .delete(delete_handler),
            )
            .route("/api/tiny/{id}/expand", get(expand_handler))
            .layer(TraceLayer::new_for_http())
            .with_state(state)
    }
}
