use serde::{Deserialize, Serialize};

use crate::{
    GeoflowError, Result,
    graph::GraphDocument,
    model::DocumentKind,
};

/// The content of one version: a flow graph or an ordered SOP step list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "data", rename_all = "snake_case")]
pub enum VersionPayload {
    Flow(GraphDocument),
    Sop(SopDocument),
}

impl VersionPayload {
    pub fn kind(&self) -> DocumentKind {
        match self {
            VersionPayload::Flow(_) => DocumentKind::Flow,
            VersionPayload::Sop(_) => DocumentKind::Sop,
        }
    }

    /// Returns the flow graph, or a session error for SOP payloads.
    pub fn as_flow(&self) -> Result<&GraphDocument> {
        match self {
            VersionPayload::Flow(doc) => Ok(doc),
            VersionPayload::Sop(_) => Err(GeoflowError::Session("payload is not a flow document".to_string())),
        }
    }

    pub fn as_flow_mut(&mut self) -> Result<&mut GraphDocument> {
        match self {
            VersionPayload::Flow(doc) => Ok(doc),
            VersionPayload::Sop(_) => Err(GeoflowError::Session("payload is not a flow document".to_string())),
        }
    }

    pub fn as_sop(&self) -> Result<&SopDocument> {
        match self {
            VersionPayload::Sop(doc) => Ok(doc),
            VersionPayload::Flow(_) => Err(GeoflowError::Session("payload is not an SOP document".to_string())),
        }
    }

    pub fn as_sop_mut(&mut self) -> Result<&mut SopDocument> {
        match self {
            VersionPayload::Sop(doc) => Ok(doc),
            VersionPayload::Flow(_) => Err(GeoflowError::Session("payload is not an SOP document".to_string())),
        }
    }
}

/// One step of a standard operating procedure.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SopStep {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub desc: String,
}

/// An ordered list of SOP steps.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SopDocument {
    pub steps: Vec<SopStep>,
}

impl SopDocument {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a step and returns its generated id.
    pub fn add_step(
        &mut self,
        title: impl Into<String>,
        desc: impl Into<String>,
    ) -> String {
        let id = nanoid::nanoid!();
        self.steps.push(SopStep {
            id: id.clone(),
            title: title.into(),
            desc: desc.into(),
        });
        id
    }

    pub fn remove_step(
        &mut self,
        id: &str,
    ) -> Result<()> {
        let pos = self.position(id)?;
        self.steps.remove(pos);
        Ok(())
    }

    /// Moves a step to a new position, clamped to the list bounds.
    pub fn move_step(
        &mut self,
        id: &str,
        to: usize,
    ) -> Result<()> {
        let pos = self.position(id)?;
        let step = self.steps.remove(pos);
        let to = to.min(self.steps.len());
        self.steps.insert(to, step);
        Ok(())
    }

    fn position(
        &self,
        id: &str,
    ) -> Result<usize> {
        self.steps.iter().position(|s| s.id == id).ok_or(GeoflowError::UnknownReference(id.to_string()))
    }
}

#[cfg(test)]
mod test {
    use super::SopDocument;
    use crate::GeoflowError;

    #[test]
    fn test_step_reorder() {
        let mut sop = SopDocument::new();
        let a = sop.add_step("Collect imagery", "");
        let b = sop.add_step("Annotate", "");
        let c = sop.add_step("Review", "");

        sop.move_step(&c, 0).unwrap();
        let order: Vec<&str> = sop.steps.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(order, vec![c.as_str(), a.as_str(), b.as_str()]);

        // out-of-range target clamps to the end
        sop.move_step(&c, 99).unwrap();
        assert_eq!(sop.steps.last().unwrap().id, c);
    }

    #[test]
    fn test_remove_unknown_step() {
        let mut sop = SopDocument::new();
        sop.add_step("Only", "");
        let err = sop.remove_step("missing").unwrap_err();
        assert_eq!(err, GeoflowError::UnknownReference("missing".to_string()));
    }
}
