//! # Geoflow
//!
//! Geoflow is the document core of a geospatial-data operations console.
//! It manages named series of workflow and SOP documents that evolve through
//! versions, classifies them against a hierarchical taxonomy, and drives the
//! interactive graph-canvas editor used to inspect and edit flow versions.
//!
//! ## Core Features
//!
//! - **Versioned Series**: Draft/Active/Published/Archived lifecycle with
//!   immutable published history and fork-on-edit semantics
//! - **Graph Documents**: node/edge flow definitions with cycle-safe editing
//!   and pluggable per-node-kind config validation
//! - **Taxonomy**: group → pipeline → sub-pipeline classification used for
//!   filtering and labeling
//! - **Canvas Viewport**: exact pan/zoom transform and drag state machine
//!   for the editor surface
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use geoflow::{DocumentKind, GraphDocument, VersionPayload, VersionStatus, WorkbenchBuilder};
//!
//! let workbench = WorkbenchBuilder::new().build()?;
//!
//! let flow = GraphDocument::new();
//! let version = workbench.store().create_series(
//!     DocumentKind::Flow,
//!     "road_extraction",
//!     "Road Flow",
//!     "ops",
//!     "v1.0.0",
//!     VersionPayload::Flow(flow),
//! )?;
//!
//! let mut session = workbench.open(&version.series_id, None)?;
//! // ... edit, then:
//! session.commit()?;
//! workbench.store().set_status(&version.id, VersionStatus::Active)?;
//! ```

mod builder;
mod canvas;
mod common;
mod config;
mod error;
mod graph;
mod model;
mod session;
mod store;
mod taxonomy;
mod workbench;

use std::sync::{Arc, RwLock};

pub use builder::WorkbenchBuilder;
pub use canvas::{Point, Viewport};
pub use common::Vars;
pub use config::{CanvasConfig, Config, StoreConfig, StoreType};
pub use error::GeoflowError;
pub use graph::{ConfigRules, FlowEdge, FlowNode, GraphDocument, NodeId, NodeKind, ValidationIssue};
pub use model::*;
pub use session::EditorSession;
pub use store::{MemStore, SeriesEntry, SeriesFilter, Store};
pub use taxonomy::{Dictionary, FILTER_ALL, MemDictionary, TaxonomyIndex};
pub use workbench::{SeriesSummary, Workbench};

/// Result type alias for Geoflow operations.
pub type Result<T> = std::result::Result<T, GeoflowError>;

/// Thread-safe shared lock wrapper using Arc<RwLock<T>>.
pub(crate) type ShareLock<T> = Arc<RwLock<T>>;
