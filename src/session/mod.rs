//! Ephemeral editor session.
//!
//! An `EditorSession` is created when a series is opened in an editor
//! surface and dropped when the user navigates away. It holds the bound
//! version, a working copy of its payload, at most one selected node,
//! and the canvas viewport. Edits stay in the working copy until
//! `commit`; uncommitted edits are discarded with the session.

use std::sync::Arc;

use tracing::{debug, trace};

use crate::{
    GeoflowError, Result,
    canvas::Viewport,
    common::Vars,
    config::CanvasConfig,
    graph::{NodeId, NodeKind},
    model::{Series, Version, VersionPayload},
    store::Store,
};

pub struct EditorSession {
    store: Arc<Store>,
    series: Series,
    version: Version,
    /// Working copy of the bound version's payload.
    document: VersionPayload,
    selection: Option<NodeId>,
    dirty: bool,
    viewport: Viewport,
}

impl EditorSession {
    /// Opens a session on a series, binding the given version or the
    /// series' representative version when none is given. The viewport
    /// and selection start reset.
    pub(crate) fn open(
        store: Arc<Store>,
        canvas: &CanvasConfig,
        series_id: &str,
        version_id: Option<&str>,
    ) -> Result<Self> {
        canvas.validate()?;
        let series = store.find_series(series_id)?;
        let version = match version_id {
            Some(id) => {
                let version = store.find_version(id)?;
                if version.series_id != series.id {
                    return Err(GeoflowError::Session(format!("version {} does not belong to series {}", id, series_id)));
                }
                version
            }
            None => store.representative_of(series_id)?,
        };
        debug!("session::open({}, {})", series.id, version.id);

        let document = version.payload.clone();
        Ok(Self {
            store,
            series,
            version,
            document,
            selection: None,
            dirty: false,
            viewport: Viewport::new(canvas),
        })
    }

    pub fn series(&self) -> &Series {
        &self.series
    }

    /// The version this session is bound to. After a commit on a
    /// non-draft version this is the freshly forked draft.
    pub fn version(&self) -> &Version {
        &self.version
    }

    /// The working copy, including uncommitted edits.
    pub fn document(&self) -> &VersionPayload {
        &self.document
    }

    pub fn has_pending_edits(&self) -> bool {
        self.dirty
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn viewport_mut(&mut self) -> &mut Viewport {
        &mut self.viewport
    }

    pub fn selection(&self) -> Option<&NodeId> {
        self.selection.as_ref()
    }

    /// Selects a node; any previously selected node is deselected.
    pub fn select_node(
        &mut self,
        id: &str,
    ) -> Result<()> {
        let doc = self.document.as_flow()?;
        if !doc.contains_node(id) {
            return Err(GeoflowError::UnknownReference(id.to_string()));
        }
        self.selection = Some(id.to_string());
        Ok(())
    }

    pub fn clear_selection(&mut self) {
        self.selection = None;
    }

    /// Adds a node to the working flow document.
    pub fn add_node(
        &mut self,
        kind: NodeKind,
        label: impl Into<String>,
        config: Vars,
    ) -> Result<NodeId> {
        let id = self.document.as_flow_mut()?.add_node(kind, label, config);
        self.dirty = true;
        Ok(id)
    }

    /// Removes a node and its incident edges; clears the selection if
    /// the removed node was selected.
    pub fn remove_node(
        &mut self,
        id: &str,
    ) -> Result<()> {
        self.document.as_flow_mut()?.remove_node(id)?;
        if self.selection.as_deref() == Some(id) {
            self.selection = None;
        }
        self.dirty = true;
        Ok(())
    }

    /// Merges a config patch into a node of the working document.
    pub fn update_node_config(
        &mut self,
        id: &str,
        patch: &Vars,
    ) -> Result<()> {
        self.document.as_flow_mut()?.update_node_config(id, patch)?;
        self.dirty = true;
        Ok(())
    }

    pub fn connect(
        &mut self,
        from: &str,
        to: &str,
    ) -> Result<()> {
        self.document.as_flow_mut()?.connect(from, to)?;
        self.dirty = true;
        Ok(())
    }

    /// Appends a step to the working SOP document.
    pub fn add_step(
        &mut self,
        title: impl Into<String>,
        desc: impl Into<String>,
    ) -> Result<String> {
        let id = self.document.as_sop_mut()?.add_step(title, desc);
        self.dirty = true;
        Ok(id)
    }

    pub fn remove_step(
        &mut self,
        id: &str,
    ) -> Result<()> {
        self.document.as_sop_mut()?.remove_step(id)?;
        self.dirty = true;
        Ok(())
    }

    pub fn move_step(
        &mut self,
        id: &str,
        to: usize,
    ) -> Result<()> {
        self.document.as_sop_mut()?.move_step(id, to)?;
        self.dirty = true;
        Ok(())
    }

    /// Writes pending edits into the bound version. Drafts are updated
    /// in place; when the bound version is active, published, or
    /// archived, the session forks a new draft first and rebinds to it,
    /// leaving published history untouched.
    pub fn commit(&mut self) -> Result<Version> {
        if !self.dirty {
            return Ok(self.version.clone());
        }
        if !self.version.status.is_editable() {
            let fork = self.store.fork_version(&self.version.id)?;
            trace!("session::commit fork {} -> {}", self.version.id, fork.id);
            self.version = fork;
        }
        let updated = self.store.update_payload(&self.version.id, &self.document)?;
        self.version = updated;
        self.dirty = false;
        Ok(self.version.clone())
    }

    /// Drops pending edits and reloads the bound version's payload.
    pub fn discard(&mut self) -> Result<()> {
        self.version = self.store.find_version(&self.version.id)?;
        self.document = self.version.payload.clone();
        self.selection = None;
        self.dirty = false;
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use std::sync::Arc;

    use crate::{
        GeoflowError, Vars,
        config::CanvasConfig,
        graph::{GraphDocument, NodeKind},
        model::{DocumentKind, SopDocument, Version, VersionPayload, VersionStatus},
        session::EditorSession,
        store::{DbStore, MemStore, Store},
    };

    fn store() -> Arc<Store> {
        let store = Store::new();
        MemStore::new().init(&store);
        Arc::new(store)
    }

    fn seed_flow(store: &Arc<Store>) -> Version {
        let mut doc = GraphDocument::new();
        let a = doc.add_node(NodeKind::Listener, "Intake", Vars::new());
        let b = doc.add_node(NodeKind::AiPreprocess, "Preprocess", Vars::new());
        doc.connect(&a, &b).unwrap();
        store.create_series(DocumentKind::Flow, "road_extraction", "Road Flow", "ops", "v1.0.0", VersionPayload::Flow(doc)).unwrap()
    }

    fn open(
        store: &Arc<Store>,
        series_id: &str,
    ) -> EditorSession {
        EditorSession::open(store.clone(), &CanvasConfig::default(), series_id, None).unwrap()
    }

    #[test]
    fn test_open_defaults_to_representative_version() {
        let store = store();
        let v1 = seed_flow(&store);
        store.set_status(&v1.id, VersionStatus::Active).unwrap();
        let v2 = store.fork_version(&v1.id).unwrap();

        let session = open(&store, &v1.series_id);
        assert_eq!(session.version().id, v2.id);
        assert!(session.selection().is_none());
        assert_eq!(session.viewport().zoom(), 1.0);
    }

    #[test]
    fn test_selection_is_mutually_exclusive() {
        let store = store();
        let v = seed_flow(&store);
        let mut session = open(&store, &v.series_id);

        let ids: Vec<String> = session.document().as_flow().unwrap().nodes.iter().map(|n| n.id.clone()).collect();
        session.select_node(&ids[0]).unwrap();
        session.select_node(&ids[1]).unwrap();
        assert_eq!(session.selection(), Some(&ids[1]));

        let err = session.select_node("ghost").unwrap_err();
        assert_eq!(err, GeoflowError::UnknownReference("ghost".to_string()));
        // failed select keeps the current selection
        assert_eq!(session.selection(), Some(&ids[1]));
    }

    #[test]
    fn test_commit_on_draft_updates_in_place() {
        let store = store();
        let v = seed_flow(&store);
        let mut session = open(&store, &v.series_id);

        session.add_node(NodeKind::QaGate, "QA", Vars::new()).unwrap();
        let committed = session.commit().unwrap();

        assert_eq!(committed.id, v.id);
        assert_eq!(store.find_version(&v.id).unwrap().payload.as_flow().unwrap().nodes.len(), 3);
        assert!(!session.has_pending_edits());
    }

    #[test]
    fn test_commit_on_active_version_forks_a_draft() {
        let store = store();
        let v = seed_flow(&store);
        store.set_status(&v.id, VersionStatus::Active).unwrap();

        let mut session = open(&store, &v.series_id);
        let mut patch = Vars::new();
        patch.set("model", "seg-v4");
        let preprocess = session.document().as_flow().unwrap().nodes[1].id.clone();
        session.update_node_config(&preprocess, &patch).unwrap();

        let committed = session.commit().unwrap();
        assert_ne!(committed.id, v.id);
        assert_eq!(committed.status, VersionStatus::Draft);
        assert_eq!(committed.series_id, v.series_id);
        assert_eq!(session.version().id, committed.id);

        // the active version's payload is unchanged
        let active = store.find_version(&v.id).unwrap();
        assert_eq!(active.status, VersionStatus::Active);
        assert!(active.payload.as_flow().unwrap().node(&preprocess).unwrap().config.is_empty());
        assert_eq!(committed.payload.as_flow().unwrap().node(&preprocess).unwrap().config.get_str("model"), Some("seg-v4"));
    }

    #[test]
    fn test_commit_without_edits_is_a_no_op() {
        let store = store();
        let v = seed_flow(&store);
        store.set_status(&v.id, VersionStatus::Active).unwrap();

        let mut session = open(&store, &v.series_id);
        let committed = session.commit().unwrap();
        // no fork when nothing changed
        assert_eq!(committed.id, v.id);
    }

    #[test]
    fn test_discard_reverts_working_copy() {
        let store = store();
        let v = seed_flow(&store);
        let mut session = open(&store, &v.series_id);

        session.add_node(NodeKind::Merge, "Merge", Vars::new()).unwrap();
        assert!(session.has_pending_edits());

        session.discard().unwrap();
        assert!(!session.has_pending_edits());
        assert_eq!(session.document().as_flow().unwrap().nodes.len(), 2);
    }

    #[test]
    fn test_remove_selected_node_clears_selection() {
        let store = store();
        let v = seed_flow(&store);
        let mut session = open(&store, &v.series_id);

        let id = session.document().as_flow().unwrap().nodes[0].id.clone();
        session.select_node(&id).unwrap();
        session.remove_node(&id).unwrap();
        assert!(session.selection().is_none());
    }

    #[test]
    fn test_sop_session_edits_steps() {
        let store = store();
        let v = store
            .create_series(DocumentKind::Sop, "road_extraction", "Road Annotation SOP", "ops", "v1", VersionPayload::Sop(SopDocument::new()))
            .unwrap();

        let mut session = open(&store, &v.series_id);
        // node selection is a flow-canvas concept
        assert!(matches!(session.select_node("any"), Err(GeoflowError::Session(_))));

        let a = session.add_step("Collect", "").unwrap();
        let b = session.add_step("Review", "").unwrap();
        session.move_step(&b, 0).unwrap();
        session.commit().unwrap();

        let stored = store.find_version(&v.id).unwrap();
        let steps: Vec<String> = stored.payload.as_sop().unwrap().steps.iter().map(|s| s.id.clone()).collect();
        assert_eq!(steps, vec![b, a]);
    }

    #[test]
    fn test_open_rejects_version_of_another_series() {
        let store = store();
        let v1 = seed_flow(&store);
        let v2 = store
            .create_series(DocumentKind::Flow, "poi_discovery", "POI Flow", "ops", "v1", VersionPayload::Flow(GraphDocument::new()))
            .unwrap();

        let err = EditorSession::open(store.clone(), &CanvasConfig::default(), &v1.series_id, Some(&v2.id)).err().unwrap();
        assert!(matches!(err, GeoflowError::Session(_)));
    }
}
