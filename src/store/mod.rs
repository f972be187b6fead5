//! Persistent store adapter.
//!
//! Every page keeps its whole collection under one key. A [`KeyValueStore`]
//! moves raw strings in and out; [`load`] and [`save`] add the JSON layer on
//! top and bind each key to its element type through [`CollectionKey`].
//!
//! Reading is forgiving: a missing key and a value that does not deserialize
//! both come back as `None`, so a page can always fall back to its empty or
//! seeded state. Only backend failures are errors.

mod database;
mod memory;

pub use database::DatabaseStore;
pub use memory::MemoryStore;

use crate::errors::Result;
use crate::models::{Material, Project, Worker};
use serde::{Serialize, de::DeserializeOwned};
use std::future::Future;
use std::marker::PhantomData;
use tracing::{debug, warn};

/// Raw string storage addressed by key.
///
/// Writes overwrite; there is no transaction spanning several keys.
pub trait KeyValueStore: Send + Sync {
    /// Returns the stored value for `key`, if any.
    fn get(&self, key: &str) -> impl Future<Output = Result<Option<String>>> + Send;

    /// Stores `value` under `key`, replacing any previous value.
    fn set(&self, key: &str, value: String) -> impl Future<Output = Result<()>> + Send;
}

/// A storage key bound to the element type of the collection stored there.
#[derive(Debug)]
pub struct CollectionKey<T> {
    name: &'static str,
    _element: PhantomData<fn() -> T>,
}

impl<T> CollectionKey<T> {
    const fn new(name: &'static str) -> Self {
        Self {
            name,
            _element: PhantomData,
        }
    }

    /// The key as written to storage.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.name
    }
}

impl<T> Clone for CollectionKey<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for CollectionKey<T> {}

/// Inventory collection
pub const MATERIALS: CollectionKey<Material> = CollectionKey::new("materials");
/// Workforce collection
pub const WORKERS: CollectionKey<Worker> = CollectionKey::new("workers");
/// Project collection
pub const PROJECTS: CollectionKey<Project> = CollectionKey::new("projects");

/// Loads a collection.
///
/// Returns `Ok(None)` when nothing is stored or when the stored text is not a
/// JSON array of `T`. The malformed case is logged and otherwise ignored.
pub async fn load<S, T>(store: &S, key: CollectionKey<T>) -> Result<Option<Vec<T>>>
where
    S: KeyValueStore,
    T: DeserializeOwned,
{
    let Some(raw) = store.get(key.name()).await? else {
        debug!("No stored value for '{}'", key.name());
        return Ok(None);
    };

    match serde_json::from_str::<Vec<T>>(&raw) {
        Ok(items) => {
            debug!("Loaded {} entries from '{}'", items.len(), key.name());
            Ok(Some(items))
        }
        Err(e) => {
            warn!("Ignoring malformed value stored under '{}': {e}", key.name());
            Ok(None)
        }
    }
}

/// Serializes and stores a whole collection, overwriting the previous one.
pub async fn save<S, T>(store: &S, key: CollectionKey<T>, items: &[T]) -> Result<()>
where
    S: KeyValueStore,
    T: Serialize + Sync,
{
    let raw = serde_json::to_string(items)?;
    store.set(key.name(), raw).await?;
    debug!("Saved {} entries to '{}'", items.len(), key.name());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{MaterialStatus, WorkerStatus};
    use crate::test_utils::{sample_project, setup_test_store};

    #[tokio::test]
    async fn test_load_missing_key_is_none() -> Result<()> {
        let store = MemoryStore::new();
        assert!(load(&store, PROJECTS).await?.is_none());
        Ok(())
    }

    #[tokio::test]
    async fn test_save_then_load_round_trips_each_collection() -> Result<()> {
        let store = setup_test_store().await?;

        let materials = vec![Material::new("Gravel", MaterialStatus::InStock, 12.0)];
        let workers = vec![Worker {
            id: 1_760_000_000_000,
            name: "Ravi".to_string(),
            role: "Carpenter".to_string(),
            status: WorkerStatus::Assigned,
            project: Some("Tower B".to_string()),
            is_absent: false,
            month: "Oct".to_string(),
        }];
        let projects = vec![sample_project(1_760_000_000_000, "Tower B", "2026-12-01")];

        save(&store, MATERIALS, &materials).await?;
        save(&store, WORKERS, &workers).await?;
        save(&store, PROJECTS, &projects).await?;

        assert_eq!(load(&store, MATERIALS).await?, Some(materials));
        assert_eq!(load(&store, WORKERS).await?, Some(workers));
        assert_eq!(load(&store, PROJECTS).await?, Some(projects));
        Ok(())
    }

    #[tokio::test]
    async fn test_malformed_values_load_as_none() -> Result<()> {
        let store = MemoryStore::new();

        store.set("projects", "not json at all".to_string()).await?;
        assert!(load(&store, PROJECTS).await?.is_none());

        store
            .set("projects", r#"{"id":1,"name":"not an array"}"#.to_string())
            .await?;
        assert!(load(&store, PROJECTS).await?.is_none());

        store
            .set("materials", r#"[{"name":"Steel","status":"Rusty","quantity":1}]"#.to_string())
            .await?;
        assert!(load(&store, MATERIALS).await?.is_none());
        Ok(())
    }

    #[tokio::test]
    async fn test_save_overwrites_previous_value() -> Result<()> {
        let store = MemoryStore::new();
        save(&store, PROJECTS, &[sample_project(1, "Old", "2026-01-01")]).await?;
        save(&store, PROJECTS, &[]).await?;

        assert_eq!(load(&store, PROJECTS).await?, Some(Vec::new()));
        Ok(())
    }

    #[test]
    fn test_key_names() {
        assert_eq!(MATERIALS.name(), "materials");
        assert_eq!(WORKERS.name(), "workers");
        assert_eq!(PROJECTS.name(), "projects");
    }
}
