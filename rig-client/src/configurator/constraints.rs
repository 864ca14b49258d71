//! Compatibility constraint derivation
//!
//! Pure mapping from the current selection to a constraint snapshot.
//! Nothing here blocks an incompatible pick; the snapshot only informs
//! the UI which products still fit.

use shared::build::{ConstraintSnapshot, ConstraintValue, Selection};
use shared::models::Category;

/// Derive the constraint snapshot for a selection
///
/// Each field is resolved independently from the current selection only:
///
/// - `cpu_socket`: the selected CPU's socket, else unconstrained.
/// - `motherboard_socket`: the selected motherboard's socket, else
///   unconstrained.
/// - `ram_type`: the motherboard's memory type whenever a motherboard is
///   selected (its slots are the binding constraint, even with a CPU
///   present); otherwise the CPU's supported type when it lists exactly
///   one; otherwise a selected RAM module's own type; otherwise
///   unconstrained.
///
/// Always recomputed wholesale, so removing a product falls back to the
/// next source in precedence.
pub fn derive_constraints(selection: &Selection) -> ConstraintSnapshot {
    ConstraintSnapshot {
        cpu_socket: selection
            .get(Category::Cpu)
            .map_or(ConstraintValue::All, |cpu| {
                ConstraintValue::from_optional(cpu.socket.as_deref())
            }),
        motherboard_socket: selection
            .get(Category::Motherboard)
            .map_or(ConstraintValue::All, |board| {
                ConstraintValue::from_optional(board.socket.as_deref())
            }),
        ram_type: derive_ram_type(selection),
    }
}

fn derive_ram_type(selection: &Selection) -> ConstraintValue {
    if let Some(board) = selection.get(Category::Motherboard) {
        return ConstraintValue::from_optional(board.ram_type.as_deref());
    }
    if let Some(cpu) = selection.get(Category::Cpu) {
        // An ambiguous supported list does not narrow the constraint
        return match cpu.supported_memory_types.as_slice() {
            [only] => ConstraintValue::Only(only.clone()),
            _ => ConstraintValue::All,
        };
    }
    if let Some(ram) = selection.get(Category::Ram) {
        return ConstraintValue::from_optional(ram.ram_type.as_deref());
    }
    ConstraintValue::All
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::models::Product;

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

    fn cpu(socket: &str, memory_types: &[&str]) -> Product {
        Product {
            socket: Some(socket.to_string()),
            supported_memory_types: memory_types.iter().map(|t| t.to_string()).collect(),
            ..product("cpu", Category::Cpu)
        }
    }

    fn motherboard(socket: &str, ram_type: Option<&str>) -> Product {
        Product {
            socket: Some(socket.to_string()),
            ram_type: ram_type.map(|t| t.to_string()),
            ..product("board", Category::Motherboard)
        }
    }

    fn ram(ram_type: &str) -> Product {
        Product {
            ram_type: Some(ram_type.to_string()),
            ..product("ram", Category::Ram)
        }
    }

    #[test]
    fn test_empty_selection_is_unconstrained() {
        assert_eq!(
            derive_constraints(&Selection::new()),
            ConstraintSnapshot::default()
        );
    }

    #[test]
    fn test_cpu_sets_socket_and_single_memory_type() {
        let mut selection = Selection::new();
        selection.set(Category::Cpu, cpu("AM5", &["DDR5"]));

        let snapshot = derive_constraints(&selection);
        assert_eq!(snapshot.cpu_socket, ConstraintValue::Only("AM5".into()));
        assert_eq!(snapshot.motherboard_socket, ConstraintValue::All);
        assert_eq!(snapshot.ram_type, ConstraintValue::Only("DDR5".into()));
    }

    #[test]
    fn test_ambiguous_cpu_memory_support_does_not_narrow() {
        let mut selection = Selection::new();
        selection.set(Category::Cpu, cpu("LGA1700", &["DDR4", "DDR5"]));

        let snapshot = derive_constraints(&selection);
        assert_eq!(snapshot.cpu_socket, ConstraintValue::Only("LGA1700".into()));
        assert_eq!(snapshot.ram_type, ConstraintValue::All);
    }

    #[test]
    fn test_motherboard_overrides_cpu_ram_type() {
        let mut selection = Selection::new();
        selection.set(Category::Cpu, cpu("AM5", &["DDR5"]));
        selection.set(Category::Motherboard, motherboard("AM5", Some("DDR4")));

        let snapshot = derive_constraints(&selection);
        assert_eq!(snapshot.cpu_socket, ConstraintValue::Only("AM5".into()));
        assert_eq!(
            snapshot.motherboard_socket,
            ConstraintValue::Only("AM5".into())
        );
        assert_eq!(snapshot.ram_type, ConstraintValue::Only("DDR4".into()));
    }

    #[test]
    fn test_motherboard_without_ram_type_resets_to_all() {
        let mut selection = Selection::new();
        selection.set(Category::Cpu, cpu("AM5", &["DDR5"]));
        selection.set(Category::Motherboard, motherboard("AM5", None));

        // The motherboard wins even when it carries no memory type
        let snapshot = derive_constraints(&selection);
        assert_eq!(snapshot.ram_type, ConstraintValue::All);
    }

    #[test]
    fn test_ram_supplies_default_only_when_otherwise_unconstrained() {
        let mut selection = Selection::new();
        selection.set(Category::Ram, ram("DDR4"));
        assert_eq!(
            derive_constraints(&selection).ram_type,
            ConstraintValue::Only("DDR4".into())
        );

        // A CPU takes over as the source once selected
        selection.set(Category::Cpu, cpu("AM5", &["DDR5"]));
        assert_eq!(
            derive_constraints(&selection).ram_type,
            ConstraintValue::Only("DDR5".into())
        );
    }

    #[test]
    fn test_removal_falls_back_to_next_source() {
        let mut selection = Selection::new();
        selection.set(Category::Cpu, cpu("AM5", &["DDR5"]));
        selection.set(Category::Motherboard, motherboard("AM5", Some("DDR4")));
        assert_eq!(
            derive_constraints(&selection).ram_type,
            ConstraintValue::Only("DDR4".into())
        );

        selection.clear(Category::Motherboard);
        assert_eq!(
            derive_constraints(&selection).ram_type,
            ConstraintValue::Only("DDR5".into())
        );

        selection.clear(Category::Cpu);
        assert_eq!(derive_constraints(&selection).ram_type, ConstraintValue::All);
    }

    #[test]
    fn test_derivation_is_pure() {
        let mut selection = Selection::new();
        selection.set(Category::Cpu, cpu("AM5", &["DDR5"]));
        selection.set(Category::Ram, ram("DDR5"));

        let first = derive_constraints(&selection);
        let second = derive_constraints(&selection);
        assert_eq!(first, second);

        // Removing and re-adding the same selections yields the same
        // snapshot as never having changed them
        let board = motherboard("AM5", Some("DDR5"));
        selection.set(Category::Motherboard, board.clone());
        selection.clear(Category::Motherboard);
        assert_eq!(derive_constraints(&selection), first);
    }

    #[test]
    fn test_unrelated_categories_do_not_constrain() {
        let mut selection = Selection::new();
        selection.set(Category::Gpu, product("gpu", Category::Gpu));
        selection.set(Category::Psu, product("psu", Category::Psu));
        selection.set(Category::Storage, product("ssd", Category::Storage));

        assert_eq!(
            derive_constraints(&selection),
            ConstraintSnapshot::default()
        );
    }
}
