//! Error types for Geoflow.
//!
//! All errors in Geoflow are represented by the `GeoflowError` enum,
//! which provides specific variants for different error categories.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::VersionStatus;

/// Unified error type for all Geoflow operations.
///
/// Each variant represents a specific category of error that can occur
/// while managing document series, editing graph documents, or reading
/// the taxonomy. All variants are recoverable; none is fatal to the
/// process.
#[derive(Deserialize, Serialize, Error, Debug, Clone, PartialEq)]
pub enum GeoflowError {
    /// Illegal version lifecycle transition.
    #[error("illegal status transition: {from} -> {to}")]
    InvalidTransition {
        from: VersionStatus,
        to: VersionStatus,
    },

    /// A referenced id (node, version, series, dictionary value) does not exist.
    #[error("unknown reference: {0}")]
    UnknownReference(String),

    /// Adding the edge would create a cycle in the graph document.
    #[error("edge {from} -> {to} would create a cycle")]
    CyclicGraph {
        from: String,
        to: String,
    },

    /// An edge references a node id that is missing from the document.
    #[error("edge references missing node: {0}")]
    DanglingEdge(String),

    /// Attempted in-place edit of a version that is no longer a draft.
    #[error("version {0} is not a draft and cannot be edited in place")]
    ImmutableVersion(String),

    /// Configuration parsing or validation errors.
    #[error("{0}")]
    Config(String),

    /// Data conversion errors (JSON, payload codecs).
    #[error("{0}")]
    Convert(String),

    /// Storage operation errors.
    #[error("{0}")]
    Store(String),

    /// Dictionary/taxonomy errors.
    #[error("{0}")]
    Taxonomy(String),

    /// Graph document definition errors.
    #[error("{0}")]
    Document(String),

    /// Editor session errors.
    #[error("{0}")]
    Session(String),

    /// I/O operation errors.
    #[error("{0}")]
    IoError(String),
}

impl From<GeoflowError> for String {
    fn from(val: GeoflowError) -> Self {
        val.to_string()
    }
}

impl From<std::io::Error> for GeoflowError {
    fn from(error: std::io::Error) -> Self {
        GeoflowError::IoError(error.to_string())
    }
}

impl From<serde_json::Error> for GeoflowError {
    fn from(error: serde_json::Error) -> Self {
        GeoflowError::Convert(error.to_string())
    }
}
