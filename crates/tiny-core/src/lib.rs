//! Core types and traits for the tiny URL service.
//!
//! This crate provides the entry type, input validation and the storage
//! contract shared by the storage backends and the shortener service.

pub mod entry;
pub mod error;
pub mod storage;
pub mod validation;

pub use entry::TinyUrl;
pub use error::{StorageError, ValidationError};
pub use storage::Storage;
pub use validation::{normalize_url, validate_id, validate_url};
