//! CartStore - local-first cart state
//!
//! The cart line sequence lives in memory and is the single source of
//! truth for the UI. Every mutation applies synchronously, rewrites the
//! persisted snapshot wholesale, notifies subscribers in invocation
//! order, and enqueues a best-effort remote sync task. Remote results
//! never feed back into local state: no rollback, no retry.
//!
//! # Mutation Flow
//!
//! ```text
//! add_item(product, quantity)
//!     ├─ 1. Merge into the line sequence (by product id)
//!     ├─ 2. Persist the full sequence
//!     ├─ 3. Broadcast the cart event
//!     └─ 4. Enqueue one sync task (skipped for non-numeric ids)
//! ```

pub mod storage;

pub use storage::{CartStorage, StorageError, StorageResult};

use crate::sync::SyncTask;
use parking_lot::RwLock;
use rust_decimal::Decimal;
use shared::cart::CartLine;
use shared::models::Product;
use shared::money::to_f64;
use shared::remote::remote_product_id;
use tokio::sync::{broadcast, mpsc};

/// Cart event broadcast channel capacity
const CART_CHANNEL_CAPACITY: usize = 256;

/// Cart mutation notifications, observed in invocation order
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CartEvent {
    ItemAdded { product_id: String, quantity: u32 },
    ItemRemoved { product_id: String },
    QuantityUpdated { product_id: String, quantity: u32 },
    Cleared,
}

/// Store owning the cart line sequence
///
/// Constructed once per session over exclusive storage. Observers only
/// see the sequence through this store's operations; nothing mutates it
/// from outside.
pub struct CartStore {
    lines: RwLock<Vec<CartLine>>,
    storage: CartStorage,
    outbox: mpsc::UnboundedSender<SyncTask>,
    event_tx: broadcast::Sender<CartEvent>,
}

impl CartStore {
    /// Create a store over the given storage and sync outbox
    ///
    /// The persisted snapshot is read once here. An unreadable snapshot
    /// degrades to an empty cart; nothing is surfaced.
    pub fn new(storage: CartStorage, outbox: mpsc::UnboundedSender<SyncTask>) -> Self {
        let lines = match storage.load_lines() {
            Ok(lines) => lines,
            Err(e) => {
                tracing::error!(error = %e, "Failed to read cart snapshot, starting empty");
                Vec::new()
            }
        };
        let (event_tx, _) = broadcast::channel(CART_CHANNEL_CAPACITY);

        Self {
            lines: RwLock::new(lines),
            storage,
            outbox,
            event_tx,
        }
    }

    /// Subscribe to cart events
    pub fn subscribe(&self) -> broadcast::Receiver<CartEvent> {
        self.event_tx.subscribe()
    }

    // ========== Mutations ==========

    /// Add `quantity` units of a product
    ///
    /// Merges into an existing line by product id, otherwise appends.
    /// The remote sync always carries an increment of one unit regardless
    /// of `quantity`: the remote cart tracks "one more added", not the
    /// local accumulated total.
    pub fn add_item(&self, product: Product, quantity: u32) {
        let product_id = product.id.clone();
        {
            let mut lines = self.lines.write();
            Self::merge_line(&mut lines, product, quantity);
            self.persist(&lines);
        }
        self.notify(CartEvent::ItemAdded {
            product_id: product_id.clone(),
            quantity,
        });
        self.sync_add(&product_id);
    }

    /// Batch add: one unit per occurrence
    ///
    /// A product appearing twice increments its line twice, but the
    /// batch enqueues at most one sync task per unique id, in first-seen
    /// order.
    pub fn add_items(&self, products: Vec<Product>) {
        if products.is_empty() {
            return;
        }

        let mut unique_ids: Vec<String> = Vec::new();
        let mut events = Vec::with_capacity(products.len());
        {
            let mut lines = self.lines.write();
            for product in products {
                let product_id = product.id.clone();
                Self::merge_line(&mut lines, product, 1);
                if !unique_ids.contains(&product_id) {
                    unique_ids.push(product_id.clone());
                }
                events.push(CartEvent::ItemAdded {
                    product_id,
                    quantity: 1,
                });
            }
            self.persist(&lines);
        }

        for event in events {
            self.notify(event);
        }
        for product_id in unique_ids {
            self.sync_add(&product_id);
        }
    }

    /// Remove the line with the given product id
    ///
    /// A miss is a no-op: nothing is persisted and no sync task is
    /// enqueued.
    pub fn remove_item(&self, product_id: &str) {
        let removed = {
            let mut lines = self.lines.write();
            let before = lines.len();
            lines.retain(|line| line.product.id != product_id);
            let removed = lines.len() != before;
            if removed {
                self.persist(&lines);
            }
            removed
        };

        if !removed {
            return;
        }

        self.notify(CartEvent::ItemRemoved {
            product_id: product_id.to_string(),
        });
        match remote_product_id(product_id) {
            Some(id) => self.push_sync(SyncTask::delete(id)),
            None => {
                tracing::debug!(product_id = %product_id, "Non-numeric product id, skipping remote sync")
            }
        }
    }

    /// Set a line's quantity to an absolute value; zero removes the line
    ///
    /// No sync task is enqueued here: the caller decides which remote
    /// mutation (if any) matches its intent and pushes it through the
    /// outbox handle.
    pub fn update_item_quantity(&self, product_id: &str, quantity: u32) {
        let event = {
            let mut lines = self.lines.write();
            if quantity == 0 {
                let before = lines.len();
                lines.retain(|line| line.product.id != product_id);
                if lines.len() == before {
                    return;
                }
                self.persist(&lines);
                CartEvent::ItemRemoved {
                    product_id: product_id.to_string(),
                }
            } else {
                let Some(line) = lines.iter_mut().find(|l| l.product.id == product_id) else {
                    return;
                };
                line.quantity = quantity;
                self.persist(&lines);
                CartEvent::QuantityUpdated {
                    product_id: product_id.to_string(),
                    quantity,
                }
            }
        };
        self.notify(event);
    }

    /// Empty the cart
    ///
    /// Local-only: the persisted snapshot is emptied, no remote calls are
    /// issued.
    pub fn clear_cart(&self) {
        {
            let mut lines = self.lines.write();
            lines.clear();
            self.persist(&lines);
        }
        self.notify(CartEvent::Cleared);
    }

    // ========== Queries ==========

    /// Sum of `price * quantity` over all lines
    pub fn total_price(&self) -> f64 {
        let total: Decimal = self.lines.read().iter().map(CartLine::line_total).sum();
        to_f64(total)
    }

    /// Sum of quantities over all lines
    pub fn item_count(&self) -> u32 {
        self.lines.read().iter().map(|line| line.quantity).sum()
    }

    /// Whether a line with the given product id exists
    pub fn is_item_in_cart(&self, product_id: &str) -> bool {
        self.lines
            .read()
            .iter()
            .any(|line| line.product.id == product_id)
    }

    /// Current line sequence (cloned view, in insertion order)
    pub fn lines(&self) -> Vec<CartLine> {
        self.lines.read().clone()
    }

    // ========== Internals ==========

    fn merge_line(lines: &mut Vec<CartLine>, product: Product, quantity: u32) {
        match lines.iter_mut().find(|line| line.product.id == product.id) {
            Some(line) => line.quantity += quantity,
            None => lines.push(CartLine::new(product, quantity)),
        }
    }

    /// Rewrite the persisted snapshot wholesale
    ///
    /// A write failure degrades to in-memory-only operation; local state
    /// stays authoritative for the UI.
    fn persist(&self, lines: &[CartLine]) {
        if let Err(e) = self.storage.save_lines(lines) {
            tracing::error!(error = %e, "Failed to persist cart snapshot");
        }
    }

    fn notify(&self, event: CartEvent) {
        if self.event_tx.send(event).is_err() {
            tracing::trace!("No cart subscribers");
        }
    }

    fn sync_add(&self, product_id: &str) {
        match remote_product_id(product_id) {
            Some(id) => self.push_sync(SyncTask::add(id)),
            None => {
                tracing::debug!(product_id = %product_id, "Non-numeric product id, skipping remote sync")
            }
        }
    }

    fn push_sync(&self, task: SyncTask) {
        if self.outbox.send(task).is_err() {
            tracing::warn!("Sync outbox closed, remote cart will diverge");
        }
    }
}
