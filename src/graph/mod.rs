pub mod document;
pub mod node;
pub mod validate;

pub use document::{FlowEdge, GraphDocument};
pub use node::{FlowNode, NodeId, NodeKind};
pub use validate::{ConfigRules, ValidationIssue};
