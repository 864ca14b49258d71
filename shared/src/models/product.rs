//! Product Model

use super::Category;
use serde::{Deserialize, Serialize};

/// Catalog product
///
/// Immutable once fetched. The role-specific fields are only populated
/// for the categories they apply to: `socket` for CPUs and motherboards,
/// `ram_type` for motherboards and RAM modules,
/// `supported_memory_types` for CPUs.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: String,
    pub name: String,
    /// Price per unit (JSON number on the wire)
    pub price: f64,
    pub category: Category,
    #[serde(default)]
    pub brand: String,
    #[serde(default)]
    pub image: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub stock: i32,
    /// Physical interface token (e.g. AM5, LGA1700)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub socket: Option<String>,
    /// Memory standard token (e.g. DDR4, DDR5)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ram_type: Option<String>,
    /// Memory standards a CPU can drive, in catalog order
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub supported_memory_types: Vec<String>,
}
