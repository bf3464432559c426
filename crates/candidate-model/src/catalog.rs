//! Filter category definitions.
//!
//! The option lists shown for each multi-select filter are data, not code:
//! a `CategoryCatalog` is read from JSON, either the bundled default or a
//! file supplied by the caller.
//!
//! ```json
//! { "categories": [
//!     { "key": "source", "title": "Source", "options": ["LinkedIn", "Indeed"] }
//! ] }
//! ```

use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{ModelError, Result};
use crate::types::CategoryKey;

const BUILTIN_CATALOG: &str = include_str!("../data/categories.json");

/// One multi-select filter section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterCategory {
    pub key: CategoryKey,
    pub title: String,
    pub options: Vec<String>,
}

/// Ordered list of filter sections.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryCatalog {
    categories: Vec<FilterCategory>,
}

impl CategoryCatalog {
    /// Build a catalog, rejecting duplicate keys, blank titles and repeated
    /// options within a category.
    pub fn new(categories: Vec<FilterCategory>) -> Result<Self> {
        let catalog = Self { categories };
        catalog.validate()?;
        Ok(catalog)
    }

    /// The catalog bundled with the crate
    pub fn builtin() -> Result<Self> {
        Self::from_json_str(BUILTIN_CATALOG)
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        let catalog: CategoryCatalog = serde_json::from_str(json)?;
        catalog.validate()?;
        Ok(catalog)
    }

    /// Read a catalog from a JSON file on disk
    pub fn load(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path).map_err(|source| ModelError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json_str(&json)
    }

    pub fn get(&self, key: CategoryKey) -> Option<&FilterCategory> {
        self.categories.iter().find(|category| category.key == key)
    }

    pub fn iter(&self) -> impl Iterator<Item = &FilterCategory> {
        self.categories.iter()
    }

    pub fn len(&self) -> usize {
        self.categories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    fn validate(&self) -> Result<()> {
        let mut seen_keys = HashSet::new();
        for category in &self.categories {
            if !seen_keys.insert(category.key) {
                return Err(ModelError::InvalidCatalog(format!(
                    "category '{}' defined more than once",
                    category.key
                )));
            }
            if category.title.trim().is_empty() {
                return Err(ModelError::InvalidCatalog(format!(
                    "category '{}' has an empty title",
                    category.key
                )));
            }
            let mut seen_options = HashSet::new();
            for option in &category.options {
                if !seen_options.insert(option.as_str()) {
                    return Err(ModelError::InvalidCatalog(format!(
                        "option '{}' repeated in category '{}'",
                        option, category.key
                    )));
                }
            }
        }
        Ok(())
    }
}
