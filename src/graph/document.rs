//! Editable flow document as a directed graph.
//!
//! A graph document holds an ordered node list plus a set of directed
//! edges. Mutations keep two invariants: every edge endpoint names an
//! existing node, and the edge set stays acyclic. Cycle checks are done
//! over a petgraph `DiGraph` built from the edge set.

use std::collections::HashMap;

use petgraph::{
    algo::has_path_connecting,
    graph::{DiGraph, NodeIndex},
};
use serde::{Deserialize, Serialize};

use crate::{
    GeoflowError, Result,
    common::Vars,
    graph::{
        node::{FlowNode, NodeId, NodeKind},
        validate::{ConfigRules, ValidationIssue},
    },
};

/// A directed edge between two nodes of the same document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FlowEdge {
    pub source: NodeId,
    pub target: NodeId,
}

/// The node/edge structure of one flow version.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GraphDocument {
    /// Nodes in canvas order; the first zero-incoming node is the entry.
    pub nodes: Vec<FlowNode>,
    pub edges: Vec<FlowEdge>,
}

impl GraphDocument {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses a document from its JSON representation.
    pub fn from_json(s: &str) -> Result<Self> {
        serde_json::from_str::<GraphDocument>(s).map_err(|e| GeoflowError::Document(format!("{}", e)))
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string(self).map_err(GeoflowError::from)
    }

    /// get node by id
    pub fn node(
        &self,
        id: &str,
    ) -> Option<&FlowNode> {
        self.nodes.iter().find(|n| n.id == id)
    }

    pub fn contains_node(
        &self,
        id: &str,
    ) -> bool {
        self.node(id).is_some()
    }

    /// Adds a node with a generated id and returns the id.
    pub fn add_node(
        &mut self,
        kind: NodeKind,
        label: impl Into<String>,
        config: Vars,
    ) -> NodeId {
        let id = nanoid::nanoid!();
        self.nodes.push(FlowNode {
            id: id.clone(),
            kind,
            label: label.into(),
            config,
        });
        id
    }

    /// Removes a node and all its incident edges.
    pub fn remove_node(
        &mut self,
        id: &str,
    ) -> Result<()> {
        let pos = self.nodes.iter().position(|n| n.id == id).ok_or(GeoflowError::UnknownReference(id.to_string()))?;
        self.nodes.remove(pos);
        self.edges.retain(|e| e.source != id && e.target != id);
        Ok(())
    }

    /// Merges `patch` into the node's config; fields absent from the
    /// patch keep their current values.
    pub fn update_node_config(
        &mut self,
        id: &str,
        patch: &Vars,
    ) -> Result<()> {
        let node = self.nodes.iter_mut().find(|n| n.id == id).ok_or(GeoflowError::UnknownReference(id.to_string()))?;
        node.config.merge(patch);
        Ok(())
    }

    /// Connects two nodes with a directed edge.
    ///
    /// Fails with `DanglingEdge` if either endpoint is absent, with
    /// `Document` if the edge already exists, and with `CyclicGraph` if
    /// the target can already reach the source.
    pub fn connect(
        &mut self,
        from: &str,
        to: &str,
    ) -> Result<()> {
        if !self.contains_node(from) {
            return Err(GeoflowError::DanglingEdge(from.to_string()));
        }
        if !self.contains_node(to) {
            return Err(GeoflowError::DanglingEdge(to.to_string()));
        }
        if self.edges.iter().any(|e| e.source == from && e.target == to) {
            return Err(GeoflowError::Document(format!("edge {} -> {} already exists", from, to)));
        }
        if from == to {
            return Err(GeoflowError::CyclicGraph {
                from: from.to_string(),
                to: to.to_string(),
            });
        }

        let (graph, indices) = self.digraph();
        let from_idx = indices[from];
        let to_idx = indices[to];
        if has_path_connecting(&graph, to_idx, from_idx, None) {
            return Err(GeoflowError::CyclicGraph {
                from: from.to_string(),
                to: to.to_string(),
            });
        }

        self.edges.push(FlowEdge {
            source: from.to_string(),
            target: to.to_string(),
        });
        Ok(())
    }

    /// The designated entry node: the first node, in canvas order, with
    /// no incoming edge.
    pub fn entry(&self) -> Option<&FlowNode> {
        self.nodes.iter().find(|n| !self.edges.iter().any(|e| e.target == n.id))
    }

    /// Checks the document structure and node configs, returning every
    /// issue found. A draft may be saved in an incomplete state, so
    /// issues are reported as a list rather than an error.
    pub fn validate(
        &self,
        rules: &ConfigRules,
    ) -> Vec<ValidationIssue> {
        let mut issues = Vec::new();

        for edge in self.edges.iter() {
            if !self.contains_node(&edge.source) {
                issues.push(ValidationIssue::DanglingEdge {
                    source: edge.source.clone(),
                    target: edge.target.clone(),
                    missing: edge.source.clone(),
                });
            }
            if !self.contains_node(&edge.target) {
                issues.push(ValidationIssue::DanglingEdge {
                    source: edge.source.clone(),
                    target: edge.target.clone(),
                    missing: edge.target.clone(),
                });
            }
        }

        let entry_id = self.entry().map(|n| n.id.clone());
        for node in self.nodes.iter() {
            let has_incoming = self.edges.iter().any(|e| e.target == node.id);
            if !has_incoming && Some(&node.id) != entry_id.as_ref() {
                issues.push(ValidationIssue::UnreachableNode {
                    node: node.id.clone(),
                });
            }
        }

        for node in self.nodes.iter() {
            issues.extend(rules.check(node));
        }

        issues
    }

    /// Builds the petgraph view of the current edge set. Edges with
    /// missing endpoints are skipped; `validate` reports them.
    fn digraph(&self) -> (DiGraph<(), ()>, HashMap<&str, NodeIndex>) {
        let mut graph = DiGraph::new();
        let mut indices = HashMap::new();
        for node in self.nodes.iter() {
            let idx = graph.add_node(());
            indices.insert(node.id.as_str(), idx);
        }
        for edge in self.edges.iter() {
            if let (Some(s), Some(t)) = (indices.get(edge.source.as_str()), indices.get(edge.target.as_str())) {
                graph.add_edge(*s, *t, ());
            }
        }
        (graph, indices)
    }
}

#[cfg(test)]
mod test {
    use super::GraphDocument;
    use crate::{GeoflowError, Vars, graph::NodeKind};

    fn chain() -> (GraphDocument, String, String, String) {
        let mut doc = GraphDocument::new();
        let a = doc.add_node(NodeKind::Listener, "Intake", Vars::new());
        let b = doc.add_node(NodeKind::AiPreprocess, "Preprocess", Vars::new());
        let c = doc.add_node(NodeKind::QaGate, "QA", Vars::new());
        doc.connect(&a, &b).unwrap();
        doc.connect(&b, &c).unwrap();
        (doc, a, b, c)
    }

    #[test]
    fn test_connect_rejects_cycle() {
        let mut doc = GraphDocument::new();
        let a = doc.add_node(NodeKind::Listener, "A", Vars::new());
        let b = doc.add_node(NodeKind::Merge, "B", Vars::new());
        doc.connect(&a, &b).unwrap();

        let err = doc.connect(&b, &a).unwrap_err();
        assert_eq!(
            err,
            GeoflowError::CyclicGraph {
                from: b.clone(),
                to: a.clone()
            }
        );
        assert_eq!(doc.edges.len(), 1);
    }

    #[test]
    fn test_connect_rejects_transitive_cycle_and_self_loop() {
        let (mut doc, a, _, c) = chain();
        assert!(matches!(doc.connect(&c, &a), Err(GeoflowError::CyclicGraph { .. })));
        assert!(matches!(doc.connect(&a, &a), Err(GeoflowError::CyclicGraph { .. })));
    }

    #[test]
    fn test_connect_missing_endpoint_is_dangling() {
        let mut doc = GraphDocument::new();
        let a = doc.add_node(NodeKind::Listener, "A", Vars::new());
        let err = doc.connect(&a, "ghost").unwrap_err();
        assert_eq!(err, GeoflowError::DanglingEdge("ghost".to_string()));

        let err = doc.connect("phantom", &a).unwrap_err();
        assert_eq!(err, GeoflowError::DanglingEdge("phantom".to_string()));
    }

    #[test]
    fn test_remove_node_drops_incident_edges() {
        let (mut doc, a, b, c) = chain();
        doc.remove_node(&b).unwrap();
        assert!(doc.node(&b).is_none());
        assert!(doc.edges.is_empty());
        assert!(doc.contains_node(&a) && doc.contains_node(&c));
    }

    #[test]
    fn test_update_node_config_merges() {
        let (mut doc, a, _, _) = chain();
        let mut initial = Vars::new();
        initial.set("topic", "tiles.raw");
        initial.set("batch", 8);
        doc.update_node_config(&a, &initial).unwrap();

        let mut patch = Vars::new();
        patch.set("batch", 64);
        doc.update_node_config(&a, &patch).unwrap();

        let config = &doc.node(&a).unwrap().config;
        assert_eq!(config.get_str("topic"), Some("tiles.raw"));
        assert_eq!(config.get("batch"), Some(&serde_json::json!(64)));
    }

    #[test]
    fn test_entry_is_first_zero_incoming_node() {
        let (doc, a, _, _) = chain();
        assert_eq!(doc.entry().unwrap().id, a);
    }

    #[test]
    fn test_json_round_trip() {
        let (doc, _, _, _) = chain();
        let text = doc.to_json().unwrap();
        let parsed = GraphDocument::from_json(&text).unwrap();
        assert_eq!(parsed, doc);
    }
}
