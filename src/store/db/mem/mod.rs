mod collect;

use std::sync::Arc;

use crate::store::{DbCollection, DbStore, Store, data::*};
pub use collect::Collect;

/// In-memory storage backend.
#[derive(Debug, Clone)]
pub struct MemStore {
    series: Arc<Collect<SeriesRecord>>,
    versions: Arc<Collect<VersionRecord>>,
}

trait DbDocument: Clone + Send + Sync {
    fn id(&self) -> &str;
}

impl DbDocument for SeriesRecord {
    fn id(&self) -> &str {
        &self.id
    }
}

impl DbDocument for VersionRecord {
    fn id(&self) -> &str {
        &self.id
    }
}

impl DbStore for MemStore {
    fn init(
        &self,
        s: &Store,
    ) {
        s.register(self.series());
        s.register(self.versions());
    }
}

impl Default for MemStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MemStore {
    pub fn new() -> Self {
        let series = Collect::new("series");
        let versions = Collect::new("versions");

        Self {
            series: Arc::new(series),
            versions: Arc::new(versions),
        }
    }

    pub fn series(&self) -> Arc<dyn DbCollection<Item = SeriesRecord> + Send + Sync> {
        self.series.clone()
    }

    pub fn versions(&self) -> Arc<dyn DbCollection<Item = VersionRecord> + Send + Sync> {
        self.versions.clone()
    }
}
