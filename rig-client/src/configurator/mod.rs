//! ConfiguratorStore - per-category build selection with derived constraints
//!
//! Owns the selection record and the current constraint snapshot. Every
//! change replaces the slot, recomputes the snapshot wholesale and
//! republishes it to subscribers. Selection state lives for the browsing
//! session only; it is never persisted.

pub mod constraints;

pub use constraints::derive_constraints;

use parking_lot::RwLock;
use shared::build::{ConstraintSnapshot, Selection};
use shared::models::{Category, Product};
use tokio::sync::broadcast;

/// Constraint broadcast channel capacity
const CONSTRAINT_CHANNEL_CAPACITY: usize = 64;

/// Store for the build under configuration
///
/// Constructed once per session and handed to consumers by reference.
/// All operations are infallible: any input is accepted and absent
/// optional fields simply leave their constraint unconstrained.
pub struct ConfiguratorStore {
    selection: RwLock<Selection>,
    snapshot: RwLock<ConstraintSnapshot>,
    constraint_tx: broadcast::Sender<ConstraintSnapshot>,
}

impl ConfiguratorStore {
    pub fn new() -> Self {
        let (constraint_tx, _) = broadcast::channel(CONSTRAINT_CHANNEL_CAPACITY);
        Self {
            selection: RwLock::new(Selection::new()),
            snapshot: RwLock::new(ConstraintSnapshot::default()),
            constraint_tx,
        }
    }

    /// Subscribe to constraint snapshots
    ///
    /// One snapshot is published per selection change, in change order.
    pub fn subscribe(&self) -> broadcast::Receiver<ConstraintSnapshot> {
        self.constraint_tx.subscribe()
    }

    /// Replace the category's selection and republish constraints
    ///
    /// The product is trusted to belong to `category`; callers enforce
    /// the pairing upstream.
    pub fn select_component(&self, category: Category, product: Product) {
        tracing::debug!(category = %category, product_id = %product.id, "Component selected");
        let snapshot = {
            let mut selection = self.selection.write();
            selection.set(category, product);
            derive_constraints(&selection)
        };
        self.publish(snapshot);
    }

    /// Remove the category's selection and republish constraints
    pub fn clear_category(&self, category: Category) {
        tracing::debug!(category = %category, "Component cleared");
        let snapshot = {
            let mut selection = self.selection.write();
            selection.clear(category);
            derive_constraints(&selection)
        };
        self.publish(snapshot);
    }

    /// Current constraint snapshot
    pub fn constraints(&self) -> ConstraintSnapshot {
        self.snapshot.read().clone()
    }

    /// Current selection (cloned view)
    pub fn selection(&self) -> Selection {
        self.selection.read().clone()
    }

    fn publish(&self, snapshot: ConstraintSnapshot) {
        *self.snapshot.write() = snapshot.clone();
        if self.constraint_tx.send(snapshot).is_err() {
            tracing::trace!("No constraint subscribers");
        }
    }
}

impl Default for ConfiguratorStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::build::ConstraintValue;

    fn cpu(socket: &str, memory_types: &[&str]) -> Product {
        Product {
            id: "cpu-1".to_string(),
            name: "Ryzen 7".to_string(),
            price: 299.0,
            category: Category::Cpu,
            brand: String::new(),
            image: String::new(),
            description: String::new(),
            stock: 5,
            socket: Some(socket.to_string()),
            ram_type: None,
            supported_memory_types: memory_types.iter().map(|t| t.to_string()).collect(),
        }
    }

    fn motherboard(socket: &str, ram_type: &str) -> Product {
        Product {
            id: "board-1".to_string(),
            name: "B650".to_string(),
            price: 189.0,
            category: Category::Motherboard,
            brand: String::new(),
            image: String::new(),
            description: String::new(),
            stock: 5,
            socket: Some(socket.to_string()),
            ram_type: Some(ram_type.to_string()),
            supported_memory_types: Vec::new(),
        }
    }

    #[test]
    fn test_starts_unconstrained() {
        let store = ConfiguratorStore::new();
        assert_eq!(store.constraints(), ConstraintSnapshot::default());
        assert!(store.selection().is_empty());
    }

    #[test]
    fn test_select_recomputes_snapshot() {
        let store = ConfiguratorStore::new();
        store.select_component(Category::Cpu, cpu("AM5", &["DDR5"]));

        let snapshot = store.constraints();
        assert_eq!(snapshot.cpu_socket, ConstraintValue::Only("AM5".into()));
        assert_eq!(snapshot.ram_type, ConstraintValue::Only("DDR5".into()));
    }

    #[test]
    fn test_clear_falls_back() {
        let store = ConfiguratorStore::new();
        store.select_component(Category::Cpu, cpu("AM5", &["DDR5"]));
        store.select_component(Category::Motherboard, motherboard("AM5", "DDR4"));
        assert_eq!(
            store.constraints().ram_type,
            ConstraintValue::Only("DDR4".into())
        );

        store.clear_category(Category::Motherboard);
        assert_eq!(
            store.constraints().ram_type,
            ConstraintValue::Only("DDR5".into())
        );
    }

    #[test]
    fn test_subscribers_observe_changes_in_order() {
        let store = ConfiguratorStore::new();
        let mut rx = store.subscribe();

        store.select_component(Category::Cpu, cpu("AM5", &["DDR5"]));
        store.select_component(Category::Motherboard, motherboard("AM5", "DDR4"));
        store.clear_category(Category::Cpu);

        let first = rx.try_recv().unwrap();
        assert_eq!(first.ram_type, ConstraintValue::Only("DDR5".into()));

        let second = rx.try_recv().unwrap();
        assert_eq!(second.ram_type, ConstraintValue::Only("DDR4".into()));

        let third = rx.try_recv().unwrap();
        assert_eq!(third.cpu_socket, ConstraintValue::All);
        // Motherboard still selected, so its memory type still binds
        assert_eq!(third.ram_type, ConstraintValue::Only("DDR4".into()));
    }
}
