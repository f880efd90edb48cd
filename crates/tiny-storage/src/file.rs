use async_trait::async_trait;
use jiff::Timestamp;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tiny_core::error::Result;
use tiny_core::{Storage, StorageError, TinyUrl};
use tokio::sync::Mutex;
use tracing::{debug, trace, warn};

/// On-disk value stored under each identifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct FileEntry {
    url: String,
    #[serde(with = "jiff::fmt::serde::timestamp::second::required")]
    created: Timestamp,
}

impl FileEntry {
    fn to_tiny_url(&self, id: &str) -> TinyUrl {
        TinyUrl {
            id: id.to_string(),
            url: self.url.clone(),
            created: self.created,
        }
    }
}

type FileData = BTreeMap<String, FileEntry>;

/// Accepted top-level shapes of the backing file.
///
/// Older files may hold an empty array instead of an empty object.
#[derive(Deserialize)]
#[serde(untagged)]
enum OnDisk {
    Entries(FileData),
    Array(Vec<serde_json::Value>),
}

/// A [`Storage`] backed by a single JSON file.
///
/// The whole collection lives in memory and the file is rewritten from it on
/// every mutation. The file holds one JSON object mapping each identifier to
/// `{"url": ..., "created": <unix seconds>}`.
///
/// All operations run under one async mutex, and mutations hold it across the
/// file write, so concurrent callers never observe memory and disk diverging.
/// The file must not be shared with other processes while the store is open.
#[derive(Debug)]
pub struct FileStorage {
    path: PathBuf,
    data: Mutex<FileData>,
}

impl FileStorage {
    /// Opens the store at `path`, creating an empty backing file if none exists.
    ///
    /// An empty file, `{}` and `[]` all load as an empty store.
    pub async fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        if path.as_os_str().is_empty() {
            return Err(StorageError::Unavailable(
                "no backing file location provided".to_string(),
            ));
        }

        ensure_file(&path).await?;
        let data = read_file(&path).await?;
        debug!(path = %path.display(), entries = data.len(), "opened file storage");

        Ok(Self {
            path,
            data: Mutex::new(data),
        })
    }

    /// Returns the location of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Inserts a fresh entry and flushes, undoing the insert if the write fails.
    ///
    /// Callers hold the data lock and have checked that `id` is free.
    async fn insert(&self, data: &mut FileData, id: &str, url: &str) -> Result<TinyUrl> {
        let entry = TinyUrl::new(id, url);
        data.insert(
            id.to_string(),
            FileEntry {
                url: entry.url.clone(),
                created: entry.created,
            },
        );

        if let Err(e) = self.save(data).await {
            data.remove(id);
            warn!(id = %id, error = %e, "rolled back create after failed write");
            return Err(e);
        }

        debug!(id = %id, url = %url, "created entry");
        Ok(entry)
    }

    async fn save(&self, data: &FileData) -> Result<()> {
        let bytes = serde_json::to_vec(data).map_err(|e| {
            StorageError::Persistence(format!("failed to encode storage data: {e}"))
        })?;

        tokio::fs::write(&self.path, bytes).await.map_err(|e| {
            StorageError::Persistence(format!(
                "failed to write backing file {}: {e}",
                self.path.display()
            ))
        })
    }
}

async fn ensure_file(path: &Path) -> Result<()> {
    match tokio::fs::metadata(path).await {
        Ok(_) => Ok(()),
        Err(e) if e.kind() == ErrorKind::NotFound => {
            tokio::fs::File::create(path).await.map_err(|e| {
                StorageError::Unavailable(format!(
                    "failed to create backing file {}: {e}",
                    path.display()
                ))
            })?;
            Ok(())
        }
        Err(e) => Err(StorageError::Unavailable(format!(
            "failed to access backing file {}: {e}",
            path.display()
        ))),
    }
}

async fn read_file(path: &Path) -> Result<FileData> {
    let bytes = tokio::fs::read(path).await.map_err(|e| {
        StorageError::Unavailable(format!(
            "failed to read backing file {}: {e}",
            path.display()
        ))
    })?;

    parse(&bytes)
}

fn parse(bytes: &[u8]) -> Result<FileData> {
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Ok(FileData::new());
    }

    match serde_json::from_slice::<OnDisk>(bytes) {
        Ok(OnDisk::Entries(data)) => Ok(data),
        Ok(OnDisk::Array(items)) if items.is_empty() => Ok(FileData::new()),
        Ok(OnDisk::Array(items)) => Err(StorageError::InvalidData(format!(
            "expected an object keyed by id, found an array of {} items",
            items.len()
        ))),
        Err(e) => Err(StorageError::InvalidData(format!(
            "failed to parse backing file: {e}"
        ))),
    }
}

#[async_trait]
impl Storage for FileStorage {
    async fn list(&self) -> Result<Vec<TinyUrl>> {
        let data = self.data.lock().await;
        Ok(data
            .iter()
            .map(|(id, entry)| entry.to_tiny_url(id))
            .collect())
    }

    async fn create(&self, id: &str, url: &str) -> Result<TinyUrl> {
        let mut data = self.data.lock().await;

        if let Some(existing) = data.get(id) {
            if existing.url == url {
                trace!(id = %id, "entry already exists with the same url");
                return Ok(existing.to_tiny_url(id));
            }
            return Err(StorageError::IdInUse(id.to_string()));
        }

        self.insert(&mut data, id, url).await
    }

    async fn create_new(&self, id: &str, url: &str) -> Result<TinyUrl> {
        let mut data = self.data.lock().await;

        if data.contains_key(id) {
            return Err(StorageError::IdInUse(id.to_string()));
        }

        self.insert(&mut data, id, url).await
    }

    async fn get(&self, id: &str) -> Result<TinyUrl> {
        let data = self.data.lock().await;
        data.get(id)
            .map(|entry| entry.to_tiny_url(id))
            .ok_or_else(|| StorageError::NotFound(id.to_string()))
    }

    async fn update(&self, entry: &TinyUrl) -> Result<()> {
        let mut data = self.data.lock().await;

        let Some(previous) = data.get(&entry.id).cloned() else {
            return Err(StorageError::NotFound(entry.id.clone()));
        };

        data.insert(
            entry.id.clone(),
            FileEntry {
                url: entry.url.clone(),
                created: previous.created,
            },
        );

        if let Err(e) = self.save(&data).await {
            data.insert(entry.id.clone(), previous);
            warn!(id = %entry.id, error = %e, "rolled back update after failed write");
            return Err(e);
        }

        debug!(id = %entry.id, url = %entry.url, "updated entry");
        Ok(())
    }

    async fn remove(&self, id: &str) -> Result<()> {
        let mut data = self.data.lock().await;

        let Some(previous) = data.remove(id) else {
            trace!(id = %id, "nothing to remove");
            return Ok(());
        };

        if let Err(e) = self.save(&data).await {
            data.insert(id.to_string(), previous);
            warn!(id = %id, error = %e, "rolled back remove after failed write");
            return Err(e);
        }

        debug!(id = %id, "removed entry");
        Ok(())
    }

    async fn close(&self) -> Result<()> {
        let data = self.data.lock().await;
        self.save(&data).await?;
        debug!(path = %self.path.display(), "closed file storage");
        Ok(())
    }
}
