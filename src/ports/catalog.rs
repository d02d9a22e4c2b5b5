use crate::domain::property::PropertyRecord;

/// Read-only access to the injected property catalog. The pipeline never
/// mutates records; implementations keep them alive for the service's life.
pub trait CatalogSource: Send + Sync {
    fn properties(&self) -> &[PropertyRecord];

    fn property(&self, id: u32) -> Option<&PropertyRecord> {
        self.properties().iter().find(|p| p.id == id)
    }
}
