//! Sync outbox - best-effort remote cart reconciliation
//!
//! Every local cart mutation enqueues a [`SyncTask`]; the [`SyncWorker`]
//! drains the queue on its own schedule and issues one remote call per
//! task. The mutation path never waits on the queue, a failed call is
//! logged and dropped (no retry, no rollback, no user-visible error),
//! and the local cart remains the UI's source of truth even when the
//! remote cart diverges.

use crate::remote::ClientResult;
use async_trait::async_trait;
use shared::remote::{AddToCartRequest, RemoteCart, UpdateCartItemRequest};
use shared::util::now_millis;
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

/// Remote cart operations the worker dispatches against
///
/// Production uses [`crate::remote::RemoteCartClient`]; tests substitute
/// a recording mock.
#[async_trait]
pub trait CartApi: Send + Sync {
    async fn get_my_cart(&self) -> ClientResult<RemoteCart>;
    async fn add_to_cart(&self, request: AddToCartRequest) -> ClientResult<()>;
    async fn update_cart_item(&self, request: UpdateCartItemRequest) -> ClientResult<()>;
    async fn delete_cart_item(&self, product_id: i64) -> ClientResult<()>;
}

/// A queued remote mutation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncTask {
    /// Enqueue timestamp (Unix milliseconds)
    pub created_at: i64,
    pub op: SyncOp,
}

/// The remote call a task maps to
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncOp {
    /// One more unit of a product
    Add { product_id: i64, quantity: u32 },
    /// Absolute quantity for a product's line
    Update { product_id: i64, quantity: u32 },
    /// Remove a product's line
    Delete { product_id: i64 },
}

impl SyncTask {
    /// Task for a local add
    ///
    /// The increment is always one unit: the remote cart tracks "one more
    /// added", not the local accumulated quantity.
    pub fn add(product_id: i64) -> Self {
        Self::with_op(SyncOp::Add {
            product_id,
            quantity: 1,
        })
    }

    /// Task setting a line's absolute quantity
    pub fn update(product_id: i64, quantity: u32) -> Self {
        Self::with_op(SyncOp::Update {
            product_id,
            quantity,
        })
    }

    /// Task removing a line
    pub fn delete(product_id: i64) -> Self {
        Self::with_op(SyncOp::Delete { product_id })
    }

    fn with_op(op: SyncOp) -> Self {
        Self {
            created_at: now_millis(),
            op,
        }
    }
}

/// Worker draining the outbox against the remote cart API
pub struct SyncWorker {
    api: Arc<dyn CartApi>,
}

impl SyncWorker {
    pub fn new(api: Arc<dyn CartApi>) -> Self {
        Self { api }
    }

    /// Spawn the worker, returning the outbox sender and the join handle
    ///
    /// The worker exits once every sender is dropped and the queue has
    /// drained. Must be called from within a Tokio runtime.
    pub fn spawn(api: Arc<dyn CartApi>) -> (mpsc::UnboundedSender<SyncTask>, JoinHandle<()>) {
        let (task_tx, task_rx) = mpsc::unbounded_channel();
        let handle = tokio::spawn(SyncWorker::new(api).run(task_rx));
        (task_tx, handle)
    }

    /// Drain the outbox until all senders are gone
    pub async fn run(self, mut task_rx: mpsc::UnboundedReceiver<SyncTask>) {
        tracing::info!("SyncWorker started");

        while let Some(task) = task_rx.recv().await {
            self.dispatch(task).await;
        }

        tracing::info!("Sync outbox closed, shutting down SyncWorker");
    }

    /// Issue the remote call for one task
    ///
    /// Failures are logged and dropped; the local and remote carts
    /// diverge for that operation.
    async fn dispatch(&self, task: SyncTask) {
        let result = match &task.op {
            SyncOp::Add {
                product_id,
                quantity,
            } => {
                self.api
                    .add_to_cart(AddToCartRequest {
                        product_id: *product_id,
                        quantity: *quantity,
                    })
                    .await
            }
            SyncOp::Update {
                product_id,
                quantity,
            } => {
                self.api
                    .update_cart_item(UpdateCartItemRequest {
                        product_id: *product_id,
                        quantity: *quantity,
                    })
                    .await
            }
            SyncOp::Delete { product_id } => self.api.delete_cart_item(*product_id).await,
        };

        match result {
            Ok(()) => tracing::debug!(op = ?task.op, "Remote cart sync applied"),
            Err(e) => {
                tracing::warn!(op = ?task.op, error = %e, "Remote cart sync failed, dropping task")
            }
        }
    }
}
