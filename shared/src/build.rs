//! Build selection and derived compatibility constraints
//!
//! A build holds at most one product per category. The constraint
//! snapshot is derived from the selection as a whole and recomputed
//! wholesale after every change; it is a hint for the UI, never an
//! enforced rule.

use crate::models::{Category, Product};
use serde::de::{self, Deserializer, Visitor};
use serde::ser::Serializer;
use serde::{Deserialize, Serialize};

// ============================================================================
// Constraint Value
// ============================================================================

/// One compatibility hint: unconstrained, or narrowed to a single token
///
/// Serializes as the bare token string, with `"all"` standing for the
/// unconstrained case.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ConstraintValue {
    #[default]
    All,
    Only(String),
}

impl ConstraintValue {
    /// Wrap an optional token; absent fields do not constrain
    pub fn from_optional(token: Option<&str>) -> Self {
        match token {
            Some(t) => ConstraintValue::Only(t.to_string()),
            None => ConstraintValue::All,
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            ConstraintValue::All => "all",
            ConstraintValue::Only(token) => token,
        }
    }

    pub fn is_all(&self) -> bool {
        matches!(self, ConstraintValue::All)
    }
}

impl std::fmt::Display for ConstraintValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for ConstraintValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for ConstraintValue {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct TokenVisitor;

        impl Visitor<'_> for TokenVisitor {
            type Value = ConstraintValue;

            fn expecting(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str("a constraint token or \"all\"")
            }

            fn visit_str<E: de::Error>(self, value: &str) -> Result<Self::Value, E> {
                Ok(match value {
                    "all" => ConstraintValue::All,
                    token => ConstraintValue::Only(token.to_string()),
                })
            }
        }

        deserializer.deserialize_str(TokenVisitor)
    }
}

// ============================================================================
// Constraint Snapshot
// ============================================================================

/// Derived compatibility hints for the current selection
///
/// Before any selection every field is unconstrained.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub struct ConstraintSnapshot {
    pub cpu_socket: ConstraintValue,
    pub motherboard_socket: ConstraintValue,
    pub ram_type: ConstraintValue,
}

// ============================================================================
// Selection
// ============================================================================

/// Per-category product selection: one optional slot per known category
///
/// A fixed record rather than a keyed map, so every accessor matches
/// exhaustively over the category set.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Selection {
    pub cpu: Option<Product>,
    pub gpu: Option<Product>,
    pub motherboard: Option<Product>,
    pub ram: Option<Product>,
    pub psu: Option<Product>,
    pub pc_case: Option<Product>,
    pub storage: Option<Product>,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Currently selected product for a category
    pub fn get(&self, category: Category) -> Option<&Product> {
        match category {
            Category::Cpu => self.cpu.as_ref(),
            Category::Gpu => self.gpu.as_ref(),
            Category::Motherboard => self.motherboard.as_ref(),
            Category::Ram => self.ram.as_ref(),
            Category::Psu => self.psu.as_ref(),
            Category::PcCase => self.pc_case.as_ref(),
            Category::Storage => self.storage.as_ref(),
        }
    }

    /// Replace the category's selection (selecting into an occupied
    /// category replaces the prior product)
    pub fn set(&mut self, category: Category, product: Product) {
        *self.slot_mut(category) = Some(product);
    }

    /// Remove the category's selection
    pub fn clear(&mut self, category: Category) {
        *self.slot_mut(category) = None;
    }

    pub fn is_empty(&self) -> bool {
        Category::ALL.iter().all(|c| self.get(*c).is_none())
    }

    /// Selected products in category display order
    pub fn selected(&self) -> impl Iterator<Item = &Product> {
        Category::ALL.iter().filter_map(|c| self.get(*c))
    }

    fn slot_mut(&mut self, category: Category) -> &mut Option<Product> {
        match category {
            Category::Cpu => &mut self.cpu,
            Category::Gpu => &mut self.gpu,
            Category::Motherboard => &mut self.motherboard,
            Category::Ram => &mut self.ram,
            Category::Psu => &mut self.psu,
            Category::PcCase => &mut self.pc_case,
            Category::Storage => &mut self.storage,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product(id: &str, category: Category) -> Product {
        Product {
            id: id.to_string(),
            name: format!("Product {}", id),
            price: 100.0,
            category,
            brand: String::new(),
            image: String::new(),
            description: String::new(),
            stock: 1,
            socket: None,
            ram_type: None,
            supported_memory_types: Vec::new(),
        }
    }

    #[test]
    fn test_constraint_value_serde() {
        assert_eq!(
            serde_json::to_string(&ConstraintValue::All).unwrap(),
            "\"all\""
        );
        assert_eq!(
            serde_json::to_string(&ConstraintValue::Only("AM5".into())).unwrap(),
            "\"AM5\""
        );
        assert_eq!(
            serde_json::from_str::<ConstraintValue>("\"all\"").unwrap(),
            ConstraintValue::All
        );
        assert_eq!(
            serde_json::from_str::<ConstraintValue>("\"DDR5\"").unwrap(),
            ConstraintValue::Only("DDR5".into())
        );
    }

    #[test]
    fn test_snapshot_default_is_unconstrained() {
        let snapshot = ConstraintSnapshot::default();
        assert!(snapshot.cpu_socket.is_all());
        assert!(snapshot.motherboard_socket.is_all());
        assert!(snapshot.ram_type.is_all());
    }

    #[test]
    fn test_snapshot_camel_case_wire_names() {
        let snapshot = ConstraintSnapshot {
            cpu_socket: ConstraintValue::Only("AM5".into()),
            ..Default::default()
        };
        let json = serde_json::to_string(&snapshot).unwrap();
        assert!(json.contains("\"cpuSocket\":\"AM5\""));
        assert!(json.contains("\"motherboardSocket\":\"all\""));
        assert!(json.contains("\"ramType\":\"all\""));
    }

    #[test]
    fn test_selection_replaces_within_category() {
        let mut selection = Selection::new();
        selection.set(Category::Cpu, product("1", Category::Cpu));
        selection.set(Category::Cpu, product("2", Category::Cpu));

        assert_eq!(selection.get(Category::Cpu).unwrap().id, "2");
        assert_eq!(selection.selected().count(), 1);
    }

    #[test]
    fn test_selection_clear() {
        let mut selection = Selection::new();
        selection.set(Category::Gpu, product("g", Category::Gpu));
        assert!(!selection.is_empty());

        selection.clear(Category::Gpu);
        assert!(selection.is_empty());
        assert!(selection.get(Category::Gpu).is_none());
    }
}
