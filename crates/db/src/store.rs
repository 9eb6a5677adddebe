//! JSON-file backed navigation store.
//!
//! Every mutation is a full read-modify-write of the collection document,
//! performed while holding the store's write lock, so at most one mutation
//! is in flight and no update can be lost. Reads take the read lock and may
//! overlap each other but never an in-progress mutation.
//!
//! Writes go to a sibling `.tmp` file which is then renamed over the
//! document, so a reader (including another process) sees either the old
//! or the new collection, never a truncated one.

use std::path::{Path, PathBuf};

use navdir_core::entry::{self, EntryFields, NavigationEntry, ENTITY_NAME};
use navdir_core::error::CoreError;
use navdir_core::types::DbId;
use tokio::io::AsyncWriteExt;
use tokio::sync::RwLock;

use crate::DATA_FILE_NAME;

/// Failure of a store operation.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Failed to access {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Collection document {} is not valid JSON: {source}", path.display())]
    Corrupt {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Navigation entry {0} not found")]
    NotFound(DbId),

    #[error("No navigation id left above {0}")]
    IdSpaceExhausted(DbId),
}

impl From<StoreError> for CoreError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound(id) => CoreError::NotFound {
                entity: ENTITY_NAME,
                id,
            },
            other => CoreError::StorageUnavailable(other.to_string()),
        }
    }
}

/// State guarded by the store lock.
#[derive(Debug, Default)]
struct IdState {
    /// Highest id handed out by this process, so ids are never reused even
    /// when the newest entry is deleted and a create lands in the same
    /// millisecond.
    last_issued: DbId,
}

/// Owner of the persisted navigation collection.
#[derive(Debug)]
pub struct NavigationStore {
    data_dir: PathBuf,
    data_file: PathBuf,
    state: RwLock<IdState>,
}

impl NavigationStore {
    /// Create a store rooted at `data_dir`. Nothing is touched on disk until
    /// [`ensure_initialized`](Self::ensure_initialized) or a mutation runs.
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        let data_dir = data_dir.into();
        let data_file = data_dir.join(DATA_FILE_NAME);
        Self {
            data_dir,
            data_file,
            state: RwLock::new(IdState::default()),
        }
    }

    /// Path of the collection document.
    pub fn data_file(&self) -> &Path {
        &self.data_file
    }

    /// Create the data directory and seed the document if it does not exist.
    ///
    /// Safe to call any number of times; an existing document is never
    /// overwritten.
    pub async fn ensure_initialized(&self) -> Result<(), StoreError> {
        let _guard = self.state.write().await;

        tokio::fs::create_dir_all(&self.data_dir)
            .await
            .map_err(io_err(&self.data_dir))?;

        let exists = tokio::fs::try_exists(&self.data_file)
            .await
            .map_err(io_err(&self.data_file))?;
        if !exists {
            self.write_collection(&entry::seed_entries()).await?;
            tracing::info!(path = %self.data_file.display(), "Seeded navigation collection");
        }
        Ok(())
    }

    /// Read the collection, distinguishing unreadable from empty.
    ///
    /// A missing document is an empty collection. An unreadable or corrupt
    /// document is an error.
    pub async fn load(&self) -> Result<Vec<NavigationEntry>, StoreError> {
        let _guard = self.state.read().await;
        self.read_collection().await
    }

    /// Full collection in stored order.
    ///
    /// Read failures are logged and presented as an empty collection so the
    /// public listing stays available.
    pub async fn list(&self) -> Vec<NavigationEntry> {
        match self.load().await {
            Ok(entries) => entries,
            Err(e) => {
                tracing::warn!(error = %e, "Serving empty navigation list, collection unreadable");
                Vec::new()
            }
        }
    }

    /// Distinct categories across the collection.
    pub async fn categories(&self) -> Vec<String> {
        entry::distinct_categories(&self.list().await)
    }

    /// Append a new entry and return it with its assigned id.
    pub async fn create(&self, fields: EntryFields) -> Result<NavigationEntry, StoreError> {
        let mut state = self.state.write().await;
        let mut entries = self.read_collection().await?;

        let id = next_id(&entries, state.last_issued, chrono::Utc::now().timestamp_millis())?;
        let created = NavigationEntry::from_fields(id, fields);
        entries.push(created.clone());

        self.write_collection(&entries).await?;
        state.last_issued = id;

        tracing::info!(id, name = %created.name, "Navigation entry created");
        Ok(created)
    }

    /// Merge `fields` onto the entry with `id` and return the result.
    pub async fn update(
        &self,
        id: DbId,
        fields: EntryFields,
    ) -> Result<NavigationEntry, StoreError> {
        let _guard = self.state.write().await;
        let mut entries = self.read_collection().await?;

        let target = entries
            .iter_mut()
            .find(|e| e.id == id)
            .ok_or(StoreError::NotFound(id))?;
        target.apply(fields);
        let updated = target.clone();

        self.write_collection(&entries).await?;

        tracing::info!(id, "Navigation entry updated");
        Ok(updated)
    }

    /// Remove the entry with `id`.
    pub async fn delete(&self, id: DbId) -> Result<(), StoreError> {
        let _guard = self.state.write().await;
        let mut entries = self.read_collection().await?;

        let index = entries
            .iter()
            .position(|e| e.id == id)
            .ok_or(StoreError::NotFound(id))?;
        entries.remove(index);

        self.write_collection(&entries).await?;

        tracing::info!(id, "Navigation entry deleted");
        Ok(())
    }

    // -----------------------------------------------------------------------
    // File access (callers hold the lock)
    // -----------------------------------------------------------------------

    async fn read_collection(&self) -> Result<Vec<NavigationEntry>, StoreError> {
        let bytes = match tokio::fs::read(&self.data_file).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(source) => {
                return Err(StoreError::Io {
                    path: self.data_file.clone(),
                    source,
                })
            }
        };

        serde_json::from_slice(&bytes).map_err(|source| StoreError::Corrupt {
            path: self.data_file.clone(),
            source,
        })
    }

    async fn write_collection(&self, entries: &[NavigationEntry]) -> Result<(), StoreError> {
        tokio::fs::create_dir_all(&self.data_dir)
            .await
            .map_err(io_err(&self.data_dir))?;

        let json = serde_json::to_vec_pretty(entries).map_err(|source| StoreError::Corrupt {
            path: self.data_file.clone(),
            source,
        })?;

        let temp_path = self.data_file.with_extension("json.tmp");
        {
            let mut file = tokio::fs::File::create(&temp_path)
                .await
                .map_err(io_err(&temp_path))?;
            file.write_all(&json).await.map_err(io_err(&temp_path))?;
            file.sync_all().await.map_err(io_err(&temp_path))?;
        }

        tokio::fs::rename(&temp_path, &self.data_file)
            .await
            .map_err(io_err(&self.data_file))
    }
}

fn io_err(path: &Path) -> impl FnOnce(std::io::Error) -> StoreError {
    let path = path.to_path_buf();
    move |source| StoreError::Io { path, source }
}

/// Pick an id that is timestamp-like but strictly greater than every id in
/// the collection and every id this process has issued.
///
/// Fails once the highest id in use is `DbId::MAX`.
fn next_id(
    entries: &[NavigationEntry],
    last_issued: DbId,
    now_millis: i64,
) -> Result<DbId, StoreError> {
    let floor = entries
        .iter()
        .map(|e| e.id)
        .max()
        .unwrap_or(0)
        .max(last_issued);
    let above = floor
        .checked_add(1)
        .ok_or(StoreError::IdSpaceExhausted(floor))?;
    Ok(now_millis.max(above))
}
