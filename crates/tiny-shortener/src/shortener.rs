use crate::error::Result;
use async_trait::async_trait;

/// The operations exposed to the HTTP surface.
///
/// Entry results are rendered as JSON objects with `id`, `url` and `created`
/// (Unix seconds) fields.
#[async_trait]
pub trait Shortener: Send + Sync + 'static {
    /// Lists every entry as a JSON array.
    async fn list(&self) -> Result<Vec<u8>>;

    /// Creates an entry and returns it as JSON.
    ///
    /// An empty `id` asks for a generated identifier.
    async fn create(&self, id: &str, url: &str) -> Result<Vec<u8>>;

    /// Returns the entry for `id` as JSON.
    async fn get(&self, id: &str) -> Result<Vec<u8>>;

    /// Returns the target URL for `id`.
    async fn get_url(&self, id: &str) -> Result<String>;

    /// Points `id` at a new URL.
    async fn update(&self, id: &str, url: &str) -> Result<()>;

    /// Deletes `id`. Deleting a missing id succeeds.
    async fn delete(&self, id: &str) -> Result<()>;

    /// Closes the underlying storage.
    async fn close(&self) -> Result<()>;
}
