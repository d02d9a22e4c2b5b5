use std::path::Path;

use crate::domain::property::PropertyRecord;
use crate::error::Result;
use crate::ports::catalog::CatalogSource;

/// Catalog held wholesale in memory, loaded once at startup and read-only
/// from then on.
pub struct InMemoryCatalog {
    properties: Vec<PropertyRecord>,
}

impl InMemoryCatalog {
    pub fn new(properties: Vec<PropertyRecord>) -> Self {
        Self { properties }
    }

    pub fn from_json_file(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        let properties: Vec<PropertyRecord> = serde_json::from_str(&raw)?;
        tracing::info!(count = properties.len(), path = %path.display(), "catalog loaded");
        Ok(Self::new(properties))
    }

    pub fn len(&self) -> usize {
        self.properties.len()
    }

    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
    }
}

impl CatalogSource for InMemoryCatalog {
    fn properties(&self) -> &[PropertyRecord] {
        &self.properties
    }
}
