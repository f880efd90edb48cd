//! Storage backends for tiny URL entries.
//!
//! [`FileStorage`] keeps every entry in memory and rewrites a single JSON
//! file on each mutation. [`InMemoryStorage`] has no durable state.

pub mod file;
pub mod memory;

pub use file::FileStorage;
pub use memory::InMemoryStorage;
pub use tiny_core::{Storage, StorageError, TinyUrl};
