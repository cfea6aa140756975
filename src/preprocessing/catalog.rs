//! Справочник порядковых категорий

use serde::{Deserialize, Serialize};

pub const CUT_CATEGORIES: [&str; 5] = ["Fair", "Good", "Very Good", "Premium", "Ideal"];
pub const COLOR_CATEGORIES: [&str; 7] = ["D", "E", "F", "G", "H", "I", "J"];
pub const CLARITY_CATEGORIES: [&str; 8] = ["I1", "SI2", "SI1", "VS2", "VS1", "VVS2", "VVS1", "IF"];

/// Упорядоченный список меток одного признака; позиция = ранг
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogEntry {
    pub feature: String,
    pub categories: Vec<String>,
}

impl CatalogEntry {
    pub fn new(feature: &str, categories: &[&str]) -> Self {
        Self {
            feature: feature.to_string(),
            categories: categories.iter().map(|c| c.to_string()).collect(),
        }
    }

    pub fn rank(&self, label: &str) -> Option<usize> {
        self.categories.iter().position(|c| c == label)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryCatalog {
    entries: Vec<CatalogEntry>,
}

impl CategoryCatalog {
    pub fn new(entries: Vec<CatalogEntry>) -> Self {
        Self { entries }
    }

    /// Порядок огранки, цвета и чистоты для датасета бриллиантов
    pub fn diamonds() -> Self {
        Self::new(vec![
            CatalogEntry::new("cut", &CUT_CATEGORIES),
            CatalogEntry::new("color", &COLOR_CATEGORIES),
            CatalogEntry::new("clarity", &CLARITY_CATEGORIES),
        ])
    }

    pub fn entry(&self, feature: &str) -> Option<&CatalogEntry> {
        self.entries.iter().find(|e| e.feature == feature)
    }

    pub fn rank(&self, feature: &str, label: &str) -> Option<usize> {
        self.entry(feature)?.rank(label)
    }
}

impl Default for CategoryCatalog {
    fn default() -> Self {
        Self::diamonds()
    }
}
