use crate::error::{Result, ShortenerError};
use crate::format::to_json;
use crate::shortener::Shortener;
use async_trait::async_trait;
use std::sync::Arc;
use tiny_core::{normalize_url, validate_id, validate_url, Storage, StorageError, TinyUrl};
use tiny_generator::Generator;
use tracing::{debug, trace};
use typed_builder::TypedBuilder;

/// Tunables for [`ShortenerService`].
#[derive(Debug, Clone, Default, TypedBuilder)]
pub struct ShortenerSettings {
    /// Render JSON with tab indentation.
    #[builder(default = false)]
    pub pretty_json: bool,
    /// Upper bound on generated identifiers tried per create.
    /// `None` keeps retrying until a free identifier is found.
    #[builder(default)]
    pub max_id_attempts: Option<usize>,
}

/// A concrete implementation of the [`Shortener`] trait.
///
/// This service wraps a [`Storage`] and a [`Generator`] to handle:
/// - Identifier generation when the caller supplies none
/// - Identifier and URL validation
/// - Defaulting the URL scheme to `http://`
///
/// Caller supplied identifiers that collide with a different URL are
/// rejected with [`ShortenerError::IdInUse`]. Generated identifiers that
/// collide are silently replaced by fresh ones.
#[derive(Debug)]
pub struct ShortenerService<S, G> {
    storage: Arc<S>,
    generator: Arc<G>,
    settings: ShortenerSettings,
}

impl<S, G> Clone for ShortenerService<S, G> {
    fn clone(&self) -> Self {
        Self {
            storage: Arc::clone(&self.storage),
            generator: Arc::clone(&self.generator),
            settings: self.settings.clone(),
        }
    }
}

impl<S: Storage, G: Generator> ShortenerService<S, G> {
    /// Creates a new `ShortenerService` with default settings.
    pub fn new(storage: S, generator: G) -> Self {
        Self::with_settings(storage, generator, ShortenerSettings::default())
    }

    /// Creates a service with explicit [`ShortenerSettings`].
    pub fn with_settings(storage: S, generator: G, settings: ShortenerSettings) -> Self {
        Self {
            storage: Arc::new(storage),
            generator: Arc::new(generator),
            settings,
        }
    }

    /// Returns a reference to the underlying storage.
    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Returns every stored entry.
    pub async fn list_entries(&self) -> Result<Vec<TinyUrl>> {
        Ok(self.storage.list().await?)
    }

    /// Returns the entry for `id`.
    pub async fn get_entry(&self, id: &str) -> Result<TinyUrl> {
        trace!(id = %id, "looking up entry");
        Ok(self.storage.get(id).await?)
    }

    /// Creates an entry, generating an identifier when `id` is empty.
    pub async fn create_entry(&self, id: &str, url: &str) -> Result<TinyUrl> {
        if id.is_empty() {
            let url = Self::prepare_url(url)?;
            return self.create_generated(&url).await;
        }

        validate_id(id)?;
        let url = Self::prepare_url(url)?;
        Ok(self.storage.create(id, &url).await?)
    }

    /// Normalizes the scheme of `url` and validates the result.
    fn prepare_url(url: &str) -> Result<String> {
        let url = normalize_url(url);
        validate_url(&url)?;
        Ok(url)
    }

    async fn create_generated(&self, url: &str) -> Result<TinyUrl> {
        let mut attempts = 0;

        loop {
            attempts += 1;
            let id = self.generator.generate();
            validate_id(&id)?;

            // Any existing entry counts as a collision, even one with the same URL.
            match self.storage.create_new(&id, url).await {
                Ok(entry) => return Ok(entry),
                Err(StorageError::IdInUse(_)) => {}
                Err(e) => return Err(e.into()),
            }

            debug!(id = %id, attempts, "generated id already in use, retrying");
            if self
                .settings
                .max_id_attempts
                .is_some_and(|max| attempts >= max)
            {
                return Err(ShortenerError::ExhaustedIdSpace(attempts));
            }
        }
    }

    fn render<T: serde::Serialize + ?Sized>(&self, value: &T) -> Result<Vec<u8>> {
        Ok(to_json(value, self.settings.pretty_json)?)
    }
}

#[async_trait]
impl<S: Storage, G: Generator> Shortener for ShortenerService<S, G> {
    async fn list(&self) -> Result<Vec<u8>> {
        let entries = self.list_entries().await?;
        self.render(&entries)
    }

    async fn create(&self, id: &str, url: &str) -> Result<Vec<u8>> {
        let entry = self.create_entry(id, url).await?;
        self.render(&entry)
    }

    async fn get(&self, id: &str) -> Result<Vec<u8>> {
        let entry = self.get_entry(id).await?;
        self.render(&entry)
    }

    async fn get_url(&self, id: &str) -> Result<String> {
        Ok(self.get_entry(id).await?.url)
    }

    async fn update(&self, id: &str, url: &str) -> Result<()> {
        let current = self.storage.get(id).await?;
        if current.url == url {
            trace!(id = %id, "url unchanged, skipping update");
            return Ok(());
        }

        let url = Self::prepare_url(url)?;
        if current.url == url {
            trace!(id = %id, "url unchanged, skipping update");
            return Ok(());
        }

        self.storage.update(&current.with_url(url)).await?;
        Ok(())
    }

    async fn delete(&self, id: &str) -> Result<()> {
        match self.storage.get(id).await {
            Ok(_) => Ok(self.storage.remove(id).await?),
            Err(StorageError::NotFound(_)) => {
                trace!(id = %id, "delete of missing entry");
                Ok(())
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn close(&self) -> Result<()> {
        Ok(self.storage.close().await?)
    }
}
