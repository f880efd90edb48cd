//! HTTP surface of the tiny URL service.
//!
//! Thin axum handlers dispatching to a [`Shortener`], plus bearer-token
//! authorization and process configuration.
//!
//! [`Shortener`]: tiny_shortener::Shortener

pub mod app;
pub mod auth;
pub mod cli;
pub mod error;
pub mod handlers;
pub mod model;
pub mod state;

pub use app::App;
pub use auth::Authorizer;
pub use state::AppState;
