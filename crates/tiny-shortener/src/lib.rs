//! Tiny URL shortener service.
//!
//! [`ShortenerService`] is the business layer on top of a [`Storage`]: it
//! validates input, normalizes URLs, generates identifiers and renders
//! results as JSON. The HTTP surface talks to it through the [`Shortener`]
//! trait.
//!
//! [`Storage`]: tiny_core::Storage

pub mod error;
pub mod format;
pub mod service;
pub mod shortener;

pub use error::ShortenerError;
pub use service::{ShortenerService, ShortenerSettings};
pub use shortener::Shortener;
