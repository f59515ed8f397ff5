use serde::{Deserialize, Serialize};

use crate::{
    GeoflowError, Result,
    model::{Version, VersionPayload, VersionStatus},
    store::{DbCollectionIden, StoreIden},
};

/// Stored row for one version snapshot. The payload is kept as its
/// serialized JSON text, so loading a version always yields a deep
/// copy of the document.
#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct VersionRecord {
    pub id: String,
    pub series_id: String,
    pub label: String,
    pub seq: u64,
    pub status: VersionStatus,
    pub author: String,
    pub payload: String,
    pub create_time: i64,
    pub update_time: i64,
}

impl DbCollectionIden for VersionRecord {
    fn iden() -> StoreIden {
        StoreIden::Versions
    }
}

impl VersionRecord {
    /// Decodes the payload column into a fresh document.
    pub fn decode_payload(&self) -> Result<VersionPayload> {
        serde_json::from_str(&self.payload).map_err(|e| GeoflowError::Store(format!("corrupt payload for version {}: {}", self.id, e)))
    }

    /// Materializes the full version model.
    pub fn to_model(&self) -> Result<Version> {
        Ok(Version {
            id: self.id.clone(),
            series_id: self.series_id.clone(),
            label: self.label.clone(),
            seq: self.seq,
            status: self.status,
            author: self.author.clone(),
            updated_at: if self.update_time > 0 { self.update_time } else { self.create_time },
            payload: self.decode_payload()?,
        })
    }
}
