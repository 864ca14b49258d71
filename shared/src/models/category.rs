//! Build Category Model

use serde::{Deserialize, Serialize};

/// Build role a product belongs to
///
/// The set is fixed: every catalog product carries exactly one of these
/// tokens, and a build holds at most one product per role.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Category {
    #[serde(rename = "CPU")]
    Cpu,
    #[serde(rename = "GPU")]
    Gpu,
    Motherboard,
    #[serde(rename = "RAM")]
    Ram,
    #[serde(rename = "PSU")]
    Psu,
    #[serde(rename = "PCCase")]
    PcCase,
    Storage,
}

impl Category {
    /// All known categories, in display order
    pub const ALL: [Category; 7] = [
        Category::Cpu,
        Category::Gpu,
        Category::Motherboard,
        Category::Ram,
        Category::Psu,
        Category::PcCase,
        Category::Storage,
    ];

    /// Catalog token for this category
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Cpu => "CPU",
            Category::Gpu => "GPU",
            Category::Motherboard => "Motherboard",
            Category::Ram => "RAM",
            Category::Psu => "PSU",
            Category::PcCase => "PCCase",
            Category::Storage => "Storage",
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
