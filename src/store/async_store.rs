//! Async facade
//!
//! Runs each blocking store operation as one `spawn_blocking` task so async
//! callers never block a runtime worker. Operations are not split, retried or
//! cancelled: each one completes or fails as a unit.

use std::sync::Arc;

use async_trait::async_trait;

use crate::error::{DirKvError, Result};

use super::KeyValueStore;

/// Async version of [`KeyValueStore`].
///
/// This trait is object-safe: you can use `Box<dyn AsyncKeyValueStore>`.
#[async_trait]
pub trait AsyncKeyValueStore: Send + Sync {
    /// Read the value stored under `key`.
    async fn get(&self, key: &str) -> Result<Vec<u8>>;

    /// Read the value stored under `key`, or `None` when there is none.
    async fn try_get(&self, key: &str) -> Result<Option<Vec<u8>>>;

    /// Store `value` under `key`, replacing any previous value.
    async fn put(&self, key: &str, value: &[u8]) -> Result<()>;

    /// Remove `key`. Returns whether it existed.
    async fn delete(&self, key: &str) -> Result<bool>;
}

/// Adapter exposing a blocking store through [`AsyncKeyValueStore`]
///
/// Must be used from within a Tokio runtime.
pub struct AsyncStore<S> {
    inner: Arc<S>,
}

impl<S> AsyncStore<S> {
    /// Wrap a blocking store
    pub fn new(inner: S) -> Self {
        Self {
            inner: Arc::new(inner),
        }
    }

    /// Wrap a blocking store that is already shared
    pub fn from_arc(inner: Arc<S>) -> Self {
        Self { inner }
    }

    /// Get a reference to the blocking store
    pub fn inner(&self) -> &S {
        &self.inner
    }
}

impl<S> Clone for AsyncStore<S> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<S: KeyValueStore + 'static> AsyncStore<S> {
    async fn run<T, F>(&self, op: F) -> Result<T>
    where
        T: Send + 'static,
        F: FnOnce(&S) -> Result<T> + Send + 'static,
    {
        let inner = Arc::clone(&self.inner);
        tokio::task::spawn_blocking(move || op(&inner))
            .await
            .map_err(|e| DirKvError::Task(e.to_string()))?
    }
}

#[async_trait]
impl<S: KeyValueStore + 'static> AsyncKeyValueStore for AsyncStore<S> {
    async fn get(&self, key: &str) -> Result<Vec<u8>> {
        let key = key.to_owned();
        self.run(move |store| store.get(&key)).await
    }

    async fn try_get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        let key = key.to_owned();
        self.run(move |store| store.try_get(&key)).await
    }

    async fn put(&self, key: &str, value: &[u8]) -> Result<()> {
        let key = key.to_owned();
        let value = value.to_vec();
        self.run(move |store| store.put(&key, &value)).await
    }

    async fn delete(&self, key: &str) -> Result<bool> {
        let key = key.to_owned();
        self.run(move |store| store.delete(&key)).await
    }
}
