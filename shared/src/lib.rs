//! Shared types for the Rig build configurator and cart engine
//!
//! Domain models and wire contracts used across crates: catalog products
//! and build categories, the build selection with its derived constraint
//! snapshot, cart lines, and the remote cart API shapes.

pub mod build;
pub mod cart;
pub mod models;
pub mod money;
pub mod remote;
pub mod util;

// Re-exports
pub use build::{ConstraintSnapshot, ConstraintValue, Selection};
pub use cart::CartLine;
pub use models::{Category, Product};
