//! ClientSession - per-session engine assembly
//!
//! Builds both stores once per browsing session and hands them to
//! consumers by reference, owning the sync worker's lifecycle. Dropping
//! the session without `shutdown` leaves the worker to exit on its own
//! once the outbox senders are gone.

use crate::cart::{CartStorage, CartStore, StorageError};
use crate::config::{ClientConfig, ConfigError};
use crate::configurator::ConfiguratorStore;
use crate::remote::RemoteCartClient;
use crate::sync::{SyncTask, SyncWorker};
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

/// Session assembly error type
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// One browsing session's engine instances
pub struct ClientSession {
    configurator: ConfiguratorStore,
    cart: CartStore,
    remote: Arc<RemoteCartClient>,
    outbox: mpsc::UnboundedSender<SyncTask>,
    worker: JoinHandle<()>,
}

impl ClientSession {
    /// Assemble the engine: open storage, spawn the sync worker, build
    /// both stores
    ///
    /// Must be called from within a Tokio runtime.
    pub fn start(config: &ClientConfig) -> Result<Self, SessionError> {
        if let Some(dir) = config.cart_db_path.parent() {
            std::fs::create_dir_all(dir)?;
        }
        let storage = CartStorage::open(&config.cart_db_path)?;

        let remote = Arc::new(RemoteCartClient::with_timeout(
            &config.api_url,
            Duration::from_secs(config.request_timeout_secs),
        ));
        let (outbox, worker) = SyncWorker::spawn(remote.clone());
        let cart = CartStore::new(storage, outbox.clone());

        tracing::info!(api_url = %config.api_url, "Client session started");

        Ok(Self {
            configurator: ConfiguratorStore::new(),
            cart,
            remote,
            outbox,
            worker,
        })
    }

    /// Build configurator store
    pub fn configurator(&self) -> &ConfiguratorStore {
        &self.configurator
    }

    /// Cart store
    pub fn cart(&self) -> &CartStore {
        &self.cart
    }

    /// Remote cart client, for direct reads outside the outbox
    pub fn remote(&self) -> &RemoteCartClient {
        &self.remote
    }

    /// Handle for enqueueing sync tasks directly
    ///
    /// This is how callers follow `update_item_quantity` with the remote
    /// mutation of their choice.
    pub fn outbox(&self) -> mpsc::UnboundedSender<SyncTask> {
        self.outbox.clone()
    }

    /// Stop the worker after it drains the queued tasks
    pub async fn shutdown(self) {
        // The worker exits once every sender is gone; the cart holds one.
        drop(self.cart);
        drop(self.outbox);
        if let Err(e) = self.worker.await {
            tracing::warn!(error = %e, "Sync worker task failed");
        }
        tracing::info!("Client session stopped");
    }
}
