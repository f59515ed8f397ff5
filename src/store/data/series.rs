use serde::{Deserialize, Serialize};

use crate::{
    model::{DocumentKind, Series},
    store::{DbCollectionIden, StoreIden},
};

/// Stored row for a series identity.
#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct SeriesRecord {
    pub id: String,
    pub kind: DocumentKind,
    pub classification: String,
    pub name: String,
    pub create_time: i64,
    pub update_time: i64,
}

impl DbCollectionIden for SeriesRecord {
    fn iden() -> StoreIden {
        StoreIden::Series
    }
}

impl From<&SeriesRecord> for Series {
    fn from(rec: &SeriesRecord) -> Self {
        Series {
            id: rec.id.clone(),
            kind: rec.kind,
            classification: rec.classification.clone(),
            name: rec.name.clone(),
        }
    }
}
