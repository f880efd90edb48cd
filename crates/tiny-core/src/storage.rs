use crate::entry::TinyUrl;
use crate::error::Result;
use async_trait::async_trait;

/// Persistence contract for tiny URL entries.
///
/// Every mutating call that changes state is durable once it returns `Ok`.
/// If the durable write fails the implementation rolls its in-memory state
/// back and returns [`StorageError::Persistence`], so a failed call is never
/// observable through later reads.
///
/// [`StorageError::Persistence`]: crate::StorageError::Persistence
#[async_trait]
pub trait Storage: Send + Sync + 'static {
    /// Returns every entry, in no particular order.
    async fn list(&self) -> Result<Vec<TinyUrl>>;

    /// Creates an entry for `id` stamped with the current time.
    ///
    /// If `id` already maps to the same `url` the existing entry is returned
    /// unchanged. If it maps to a different URL the call fails with
    /// `IdInUse`.
    async fn create(&self, id: &str, url: &str) -> Result<TinyUrl>;

    /// Creates an entry for `id` only if no entry exists for it yet.
    ///
    /// Unlike [`Storage::create`] an existing entry is never returned, even
    /// one with the same URL. Any existing entry fails with `IdInUse`.
    async fn create_new(&self, id: &str, url: &str) -> Result<TinyUrl>;

    /// Returns the entry for `id`, or `NotFound`.
    async fn get(&self, id: &str) -> Result<TinyUrl>;

    /// Replaces the URL of the entry matching `entry.id`.
    ///
    /// The stored creation timestamp is kept; `entry.created` is ignored.
    async fn update(&self, entry: &TinyUrl) -> Result<()>;

    /// Removes the entry for `id`. Removing a missing id is not an error.
    async fn remove(&self, id: &str) -> Result<()>;

    /// Flushes pending state and releases resources.
    async fn close(&self) -> Result<()>;
}
