use log::info;
use std::sync::Arc;
use tokio::sync::RwLock;
use tokio::task;

use crate::config::ShareConfig;
use crate::error::handlers::handle_error;
use crate::error::{FileShareError, StorageError};
use crate::service::calls::{Operation, ServiceCall, ServiceResponse};
use crate::storage::{EntryDescriptor, Store};

/// Host-facing handle to the current store.
///
/// Store operations run on the blocking thread pool. Reconfiguring swaps in a
/// new store; calls already running keep the store they started with.
pub struct FileShare {
    store: RwLock<Arc<Store>>,
}

impl FileShare {
    pub fn new(store: Store) -> Self {
        Self {
            store: RwLock::new(Arc::new(store)),
        }
    }

    /// Build the store described by `config` off the async thread
    pub async fn from_config(config: ShareConfig) -> Result<Self, FileShareError> {
        let store = task::spawn_blocking(move || Store::from_config(&config)).await??;
        Ok(Self::new(store))
    }

    /// Snapshot of the store new calls are issued against
    pub async fn store(&self) -> Arc<Store> {
        Arc::clone(&*self.store.read().await)
    }

    /// Replace the store with one built from `config`.
    ///
    /// On failure the current store stays in place.
    pub async fn reconfigure(&self, config: ShareConfig) -> Result<(), FileShareError> {
        let store = task::spawn_blocking(move || Store::from_config(&config)).await??;
        info!("Reconfigured share root to {}", store.root().display());
        *self.store.write().await = Arc::new(store);
        Ok(())
    }

    /// Dispatch a call to its operation
    pub async fn call(&self, call: ServiceCall) -> Result<ServiceResponse, FileShareError> {
        let ServiceCall {
            operation,
            path,
            content,
        } = call;

        match operation {
            Operation::List => self.list_files(&path).await.map(ServiceResponse::Files),
            Operation::Upload => self
                .upload_file(&path, content)
                .await
                .map(|_| ServiceResponse::Done),
            Operation::Download => self
                .download_file(&path)
                .await
                .map(ServiceResponse::Content),
            Operation::Delete => self.delete_file(&path).await.map(|_| ServiceResponse::Done),
            Operation::CreateDirectory => self
                .create_directory(&path)
                .await
                .map(|_| ServiceResponse::Done),
        }
    }

    pub async fn list_files(&self, path: &str) -> Result<Vec<EntryDescriptor>, FileShareError> {
        self.run(Operation::List, path, |store, path| store.list(path))
            .await
    }

    pub async fn upload_file(&self, path: &str, content: Vec<u8>) -> Result<(), FileShareError> {
        self.run(Operation::Upload, path, move |store, path| {
            store.upload(path, &content)
        })
        .await
    }

    pub async fn download_file(&self, path: &str) -> Result<Vec<u8>, FileShareError> {
        self.run(Operation::Download, path, |store, path| store.download(path))
            .await
    }

    pub async fn delete_file(&self, path: &str) -> Result<(), FileShareError> {
        self.run(Operation::Delete, path, |store, path| store.delete(path))
            .await
    }

    pub async fn create_directory(&self, path: &str) -> Result<(), FileShareError> {
        self.run(Operation::CreateDirectory, path, |store, path| {
            store.create_directory(path)
        })
        .await
    }

    async fn run<T, F>(&self, operation: Operation, path: &str, f: F) -> Result<T, FileShareError>
    where
        T: Send + 'static,
        F: FnOnce(&Store, &str) -> Result<T, StorageError> + Send + 'static,
    {
        let store = self.store().await;
        let owned_path = path.to_string();

        let result = match task::spawn_blocking(move || f(&*store, &owned_path)).await {
            Ok(result) => result.map_err(FileShareError::from),
            Err(e) => Err(FileShareError::from(e)),
        };

        if let Err(e) = &result {
            handle_error(operation.name(), path, e);
        }
        result
    }
}
