use async_trait::async_trait;
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use jiff::Timestamp;
use tiny_core::error::Result;
use tiny_core::{Storage, StorageError, TinyUrl};

/// In-memory storage entry for a URL mapping.
#[derive(Debug, Clone)]
struct Record {
    url: String,
    created: Timestamp,
}

impl Record {
    fn to_tiny_url(&self, id: &str) -> TinyUrl {
        TinyUrl {
            id: id.to_string(),
            url: self.url.clone(),
            created: self.created,
        }
    }
}

/// In-memory implementation of the Storage trait using DashMap.
///
/// Nothing is persisted, so mutations can never fail half-way. Useful for
/// tests and throwaway deployments.
#[derive(Debug, Clone, Default)]
pub struct InMemoryStorage {
    storage: DashMap<String, Record>,
}

impl InMemoryStorage {
    /// Creates a new in-memory storage.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a new in-memory storage with the specified capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            storage: DashMap::with_capacity(capacity),
        }
    }
}

#[async_trait]
impl Storage for InMemoryStorage {
    async fn list(&self) -> Result<Vec<TinyUrl>> {
        Ok(self
            .storage
            .iter()
            .map(|item| item.value().to_tiny_url(item.key()))
            .collect())
    }

    async fn create(&self, id: &str, url: &str) -> Result<TinyUrl> {
        match self.storage.entry(id.to_string()) {
            Entry::Occupied(existing) if existing.get().url == url => {
                Ok(existing.get().to_tiny_url(id))
            }
            Entry::Occupied(_) => Err(StorageError::IdInUse(id.to_string())),
            Entry::Vacant(slot) => {
                let entry = TinyUrl::new(id, url);
                slot.insert(Record {
                    url: entry.url.clone(),
                    created: entry.created,
                });
                Ok(entry)
            }
        }
    }

    async fn create_new(&self, id: &str, url: &str) -> Result<TinyUrl> {
        match self.storage.entry(id.to_string()) {
            Entry::Occupied(_) => Err(StorageError::IdInUse(id.to_string())),
            Entry::Vacant(slot) => {
                let entry = TinyUrl::new(id, url);
                slot.insert(Record {
                    url: entry.url.clone(),
                    created: entry.created,
                });
                Ok(entry)
            }
        }
    }

    async fn get(&self, id: &str) -> Result<TinyUrl> {
        self.storage
            .get(id)
            .map(|record| record.to_tiny_url(id))
            .ok_or_else(|| StorageError::NotFound(id.to_string()))
    }

    async fn update(&self, entry: &TinyUrl) -> Result<()> {
        let Some(mut record) = self.storage.get_mut(&entry.id) else {
            return Err(StorageError::NotFound(entry.id.clone()));
        };
        record.url = entry.url.clone();
        Ok(())
    }

    async fn remove(&self, id: &str) -> Result<()> {
        self.storage.remove(id);
        Ok(())
    }

    async fn close(&self) -> Result<()> {
        Ok(())
    }
}
