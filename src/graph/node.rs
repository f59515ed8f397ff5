use serde::{Deserialize, Serialize};

use crate::common::Vars;

/// Unique identifier for a node within a graph document.
pub type NodeId = String;

/// The fixed set of node kinds a flow may use.
///
/// The `config` shape of a node depends on its kind; validation rules
/// are registered per kind rather than baked into the document model.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash, strum::AsRefStr, strum::EnumString)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum NodeKind {
    /// Intake listener feeding the pipeline.
    Listener,
    /// AI preprocessing stage.
    AiPreprocess,
    /// Task generation stage; references the SOP version its tasks follow.
    TaskGen,
    /// Quality-assurance gate.
    QaGate,
    /// Merge stage joining parallel inputs.
    Merge,
}

/// One node of a flow graph.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlowNode {
    /// Node id, unique within its document and never reused.
    pub id: NodeId,
    pub kind: NodeKind,
    pub label: String,
    /// Open per-kind configuration map.
    #[serde(default)]
    pub config: Vars,
}
