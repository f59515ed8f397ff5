use std::{
    any::Any,
    collections::HashMap,
    sync::{Arc, RwLock},
};

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::{
    GeoflowError, Result, ShareLock,
    model::{DocumentKind, Series, Version, VersionPayload, VersionStatus},
    store::{DbCollection, DbCollectionIden, StoreIden, data::*},
};

#[derive(Clone)]
pub struct DynDbSetRef<T>(Arc<dyn DbCollection<Item = T>>);

/// Filter for series listings. All criteria are conjunctive; `None`
/// means "any".
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct SeriesFilter {
    /// Exact classification value.
    pub classification: Option<String>,
    /// Status of the representative version.
    pub status: Option<VersionStatus>,
    /// Case-insensitive substring of the series name.
    pub search: Option<String>,
}

/// One row of a series listing: the series identity joined with its
/// representative version.
#[derive(Debug, Clone)]
pub struct SeriesEntry {
    pub series: Series,
    pub version: Version,
    /// True when every version of the series is archived.
    pub archived_only: bool,
}

/// Collection registry plus the series/version lifecycle operations.
pub struct Store {
    collections: ShareLock<HashMap<StoreIden, Arc<dyn Any + Send + Sync + 'static>>>,
}

impl Default for Store {
    fn default() -> Self {
        Self::new()
    }
}

impl Store {
    pub fn new() -> Self {
        Self {
            collections: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    pub fn collection<DATA>(&self) -> Arc<dyn DbCollection<Item = DATA>>
    where
        DATA: DbCollectionIden + Send + Sync + 'static,
    {
        let collections = self.collections.read().unwrap();

        #[allow(clippy::expect_fun_call)]
        let collection = collections.get(&DATA::iden()).expect(&format!("fail to get collection: {}", DATA::iden().as_ref()));

        #[allow(clippy::expect_fun_call)]
        collection.downcast_ref::<DynDbSetRef<DATA>>().map(|v| v.0.clone()).expect(&format!("fail to get collection: {}", DATA::iden().as_ref()))
    }

    pub fn register<DATA>(
        &self,
        collection: Arc<dyn DbCollection<Item = DATA> + Send + Sync + 'static>,
    ) where
        DATA: DbCollectionIden + 'static,
    {
        let mut collections = self.collections.write().unwrap();
        collections.insert(DATA::iden(), Arc::new(DynDbSetRef::<DATA>(collection)));
    }

    pub fn series(&self) -> Arc<dyn DbCollection<Item = SeriesRecord>> {
        self.collection()
    }

    pub fn versions(&self) -> Arc<dyn DbCollection<Item = VersionRecord>> {
        self.collection()
    }

    /// Resolves a series id to its model.
    pub fn find_series(
        &self,
        series_id: &str,
    ) -> Result<Series> {
        let rec = self.series().find(series_id).map_err(|_| GeoflowError::UnknownReference(series_id.to_string()))?;
        Ok(Series::from(&rec))
    }

    /// Resolves a version id to its model, decoding a fresh payload.
    pub fn find_version(
        &self,
        version_id: &str,
    ) -> Result<Version> {
        let rec = self.versions().find(version_id).map_err(|_| GeoflowError::UnknownReference(version_id.to_string()))?;
        rec.to_model()
    }

    /// Creates a new series with a single draft version at sequence 0.
    pub fn create_series(
        &self,
        kind: DocumentKind,
        classification: &str,
        name: &str,
        author: &str,
        label: &str,
        payload: VersionPayload,
    ) -> Result<Version> {
        let now = Utc::now().timestamp_millis();
        let series = SeriesRecord {
            id: nanoid::nanoid!(),
            kind,
            classification: classification.to_string(),
            name: name.to_string(),
            create_time: now,
            update_time: 0,
        };
        trace!("store::create_series({}, {})", series.id, name);
        self.series().create(&series)?;

        let version = VersionRecord {
            id: nanoid::nanoid!(),
            series_id: series.id.clone(),
            label: label.to_string(),
            seq: 0,
            status: VersionStatus::Draft,
            author: author.to_string(),
            payload: serde_json::to_string(&payload)?,
            create_time: now,
            update_time: 0,
        };
        self.versions().create(&version)?;
        version.to_model()
    }

    /// All versions of a series, newest first by sequence number.
    pub fn versions_of(
        &self,
        series_id: &str,
    ) -> Result<Vec<Version>> {
        if !self.series().exists(series_id)? {
            return Err(GeoflowError::UnknownReference(series_id.to_string()));
        }
        let mut records: Vec<VersionRecord> = self.versions().find_all()?.into_iter().filter(|v| v.series_id == series_id).collect();
        records.sort_by(|a, b| b.seq.cmp(&a.seq));
        records.iter().map(|r| r.to_model()).collect()
    }

    /// Appends a new draft to the source version's series, with the
    /// payload deep-copied from the source.
    pub fn fork_version(
        &self,
        version_id: &str,
    ) -> Result<Version> {
        let src = self.versions().find(version_id).map_err(|_| GeoflowError::UnknownReference(version_id.to_string()))?;
        let seq = self.next_seq(&src.series_id)?;
        let now = Utc::now().timestamp_millis();

        let fork = VersionRecord {
            id: nanoid::nanoid!(),
            series_id: src.series_id.clone(),
            label: src.label.clone(),
            seq,
            status: VersionStatus::Draft,
            author: src.author.clone(),
            payload: src.payload.clone(),
            create_time: now,
            update_time: 0,
        };
        trace!("store::fork_version({} -> {})", version_id, fork.id);
        self.versions().create(&fork)?;
        fork.to_model()
    }

    /// Applies a lifecycle transition. Activating or publishing a
    /// version archives any previously current version of the same
    /// series, so a series never carries two current versions.
    pub fn set_status(
        &self,
        version_id: &str,
        status: VersionStatus,
    ) -> Result<Version> {
        let mut rec = self.versions().find(version_id).map_err(|_| GeoflowError::UnknownReference(version_id.to_string()))?;
        if !rec.status.can_transition(status) {
            return Err(GeoflowError::InvalidTransition {
                from: rec.status,
                to: status,
            });
        }

        if status.is_current() {
            let siblings: Vec<VersionRecord> = self.versions().find_all()?.into_iter().filter(|v| v.series_id == rec.series_id && v.id != rec.id && v.status.is_current()).collect();
            for mut sibling in siblings {
                trace!("store::set_status demote {} -> archived", sibling.id);
                sibling.status = VersionStatus::Archived;
                sibling.update_time = Utc::now().timestamp_millis();
                self.versions().update(&sibling)?;
            }
        }

        trace!("store::set_status({}, {})", version_id, status);
        rec.status = status;
        rec.update_time = Utc::now().timestamp_millis();
        self.versions().update(&rec)?;
        rec.to_model()
    }

    /// Replaces the payload of a draft version. Non-draft versions are
    /// immutable; callers must fork first.
    pub fn update_payload(
        &self,
        version_id: &str,
        payload: &VersionPayload,
    ) -> Result<Version> {
        let mut rec = self.versions().find(version_id).map_err(|_| GeoflowError::UnknownReference(version_id.to_string()))?;
        if !rec.status.is_editable() {
            return Err(GeoflowError::ImmutableVersion(version_id.to_string()));
        }
        rec.payload = serde_json::to_string(payload)?;
        rec.update_time = Utc::now().timestamp_millis();
        self.versions().update(&rec)?;
        rec.to_model()
    }

    /// Deletes a series and its versions. Permitted only while every
    /// version is still a draft; published history is permanent.
    pub fn delete_series(
        &self,
        series_id: &str,
    ) -> Result<()> {
        if !self.series().exists(series_id)? {
            return Err(GeoflowError::UnknownReference(series_id.to_string()));
        }
        let versions: Vec<VersionRecord> = self.versions().find_all()?.into_iter().filter(|v| v.series_id == series_id).collect();
        if let Some(kept) = versions.iter().find(|v| v.status != VersionStatus::Draft) {
            return Err(GeoflowError::ImmutableVersion(kept.id.clone()));
        }
        trace!("store::delete_series({})", series_id);
        for version in versions {
            self.versions().delete(&version.id)?;
        }
        self.series().delete(series_id)?;
        Ok(())
    }

    /// The representative version of a series for list views: the
    /// newest non-archived version, or the newest archived one when
    /// nothing else is left.
    pub fn representative_of(
        &self,
        series_id: &str,
    ) -> Result<Version> {
        let versions = self.versions_of(series_id)?;
        let version = versions.iter().find(|v| v.status != VersionStatus::Archived).or(versions.first()).ok_or(GeoflowError::Store(format!("series has no versions: {}", series_id)))?;
        Ok(version.clone())
    }

    /// Lists one representative entry per series matching the filter.
    pub fn list_series(
        &self,
        filter: &SeriesFilter,
    ) -> Result<Vec<SeriesEntry>> {
        let mut entries = Vec::new();
        for rec in self.series().find_all()? {
            if let Some(classification) = &filter.classification
                && rec.classification != *classification
            {
                continue;
            }
            if let Some(search) = &filter.search
                && !rec.name.to_lowercase().contains(&search.to_lowercase())
            {
                continue;
            }

            // series with no versions yet are not listed
            let Ok(version) = self.representative_of(&rec.id) else {
                continue;
            };
            if let Some(status) = filter.status
                && version.status != status
            {
                continue;
            }

            let archived_only = version.status == VersionStatus::Archived;
            entries.push(SeriesEntry {
                series: Series::from(&rec),
                version,
                archived_only,
            });
        }
        Ok(entries)
    }

    fn next_seq(
        &self,
        series_id: &str,
    ) -> Result<u64> {
        let max = self.versions().find_all()?.into_iter().filter(|v| v.series_id == series_id).map(|v| v.seq).max();
        Ok(max.map(|m| m + 1).unwrap_or(0))
    }
}
