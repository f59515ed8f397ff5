use serde::{Deserialize, Serialize};

/// Unique identifier for a document series.
pub type SeriesId = String;

/// The kind of document a series carries across its versions.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, Default, PartialEq, Eq, strum::AsRefStr, strum::EnumString)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum DocumentKind {
    /// A pipeline flow rendered on the graph canvas.
    #[default]
    Flow,
    /// A standard operating procedure: an ordered step list.
    Sop,
}

/// Permanent identity for an evolving document across versions.
///
/// A series is never deleted once it holds a version whose status is
/// anything other than draft.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Series {
    pub id: SeriesId,
    pub kind: DocumentKind,
    /// Classification: a `pipeline` dictionary value.
    pub classification: String,
    pub name: String,
}
