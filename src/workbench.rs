//! Operations-console workbench - the main entry point for Geoflow.
//!
//! The workbench wires the configured storage backend and the
//! dictionary collaborator together, hands out taxonomy views, opens
//! editor sessions, and projects series listings for grid rendering.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{
    Result,
    config::{Config, StoreType},
    model::{CATEGORY_PIPELINE, DocumentKind, VersionStatus},
    session::EditorSession,
    store::{DbStore, MemStore, SeriesFilter, Store},
    taxonomy::{Dictionary, FILTER_ALL, MemDictionary, TaxonomyIndex},
};

/// Read-only projection of one series for list/grid views: the series
/// identity joined with its representative version, with the
/// classification label resolved through the taxonomy.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeriesSummary {
    pub series_id: String,
    pub name: String,
    pub kind: DocumentKind,
    pub classification: String,
    /// Display label for the classification; falls back to the raw
    /// value when the dictionary entry is gone.
    pub classification_label: String,
    pub version_id: String,
    pub version_label: String,
    pub status: VersionStatus,
    pub updated_at: i64,
    pub archived_only: bool,
}

/// The central coordinator for Geoflow.
///
/// # Example
///
/// ```rust,ignore
/// let workbench = WorkbenchBuilder::new().build()?;
/// let version = workbench.store().create_series(/* ... */)?;
/// let mut session = workbench.open(&version.series_id, None)?;
/// ```
pub struct Workbench {
    config: Config,
    store: Arc<Store>,
    dictionary: Arc<dyn Dictionary>,
}

impl Workbench {
    /// Creates a workbench with the given configuration and dictionary
    /// collaborator.
    pub fn new_with_config(
        config: Config,
        dictionary: Arc<dyn Dictionary>,
    ) -> Self {
        let store = Store::new();
        match config.store.store_type {
            StoreType::Mem => {
                let mem = MemStore::new();
                mem.init(&store);
            }
        }

        Self {
            config,
            store: Arc::new(store),
            dictionary,
        }
    }

    /// Default configuration with an empty in-memory dictionary.
    pub fn new() -> Self {
        Self::new_with_config(Config::default(), Arc::new(MemDictionary::new()))
    }

    pub fn store(&self) -> Arc<Store> {
        self.store.clone()
    }

    pub fn dictionary(&self) -> Arc<dyn Dictionary> {
        self.dictionary.clone()
    }

    /// A taxonomy view over the injected dictionary. Views carry no
    /// cache; reads always reflect the latest committed state.
    pub fn taxonomy(&self) -> TaxonomyIndex {
        TaxonomyIndex::new(self.dictionary.clone())
    }

    /// Opens an editor session on a series, bound to the given version
    /// or to the series' representative version.
    pub fn open(
        &self,
        series_id: &str,
        version_id: Option<&str>,
    ) -> Result<EditorSession> {
        EditorSession::open(self.store.clone(), &self.config.canvas, series_id, version_id)
    }

    /// Projects series listings for the grid views. `filter_key` is a
    /// taxonomy filter: `All`, a top-level group id, or a pipeline
    /// value; `filter` narrows by status and name search.
    pub fn summaries(
        &self,
        filter_key: &str,
        filter: &SeriesFilter,
    ) -> Result<Vec<SeriesSummary>> {
        let taxonomy = self.taxonomy();
        let pipelines = self.dictionary.get_category(CATEGORY_PIPELINE);
        debug!("workbench::summaries({})", filter_key);

        let mut rows = Vec::new();
        for entry in self.store.list_series(filter)? {
            let item = pipelines.iter().find(|i| i.value == entry.series.classification);
            let keep = match item {
                Some(item) => taxonomy.matches(item, filter_key),
                // classification no longer in the dictionary: only the
                // catch-all and an exact value match can keep it
                None => filter_key == FILTER_ALL || filter_key == entry.series.classification,
            };
            if !keep {
                continue;
            }

            rows.push(SeriesSummary {
                series_id: entry.series.id.clone(),
                name: entry.series.name.clone(),
                kind: entry.series.kind,
                classification: entry.series.classification.clone(),
                classification_label: taxonomy.label_for(&entry.series.classification),
                version_id: entry.version.id.clone(),
                version_label: entry.version.label.clone(),
                status: entry.version.status,
                updated_at: entry.version.updated_at,
                archived_only: entry.archived_only,
            });
        }
        Ok(rows)
    }
}

impl Default for Workbench {
    fn default() -> Self {
        Self::new()
    }
}
