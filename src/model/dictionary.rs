//! Dictionary entries backing the classification taxonomy.
//!
//! Items live in named categories. The `pipeline` and `sub_pipeline`
//! categories form a two-level hierarchy below a fixed set of top-level
//! groups: a `sub_pipeline` item's `code` names its parent `pipeline`
//! item's `value`, and a `pipeline` item's `code` names a `TopGroup`.

use serde::{Deserialize, Serialize};

/// Category holding first-level pipeline classifications.
pub const CATEGORY_PIPELINE: &str = "pipeline";
/// Category holding second-level sub-pipeline classifications.
pub const CATEGORY_SUB_PIPELINE: &str = "sub_pipeline";

/// Fixed top-level groups that partition the pipeline category.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, strum::EnumString, strum::EnumIter, strum::Display)]
pub enum TopGroup {
    Foundation,
    Location,
    LastMile,
}

/// A single entry in a dictionary category.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DictionaryItem {
    /// Display label.
    pub label: String,
    /// Stored value, unique within its category.
    pub value: String,
    /// Optional display tag color.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    /// Parent key: a `TopGroup` id for pipeline items, a pipeline value
    /// for sub-pipeline items.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
}

impl DictionaryItem {
    pub fn new(
        label: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
            color: None,
            code: None,
        }
    }

    pub fn with_code(
        mut self,
        code: impl Into<String>,
    ) -> Self {
        self.code = Some(code.into());
        self
    }

    pub fn with_color(
        mut self,
        color: impl Into<String>,
    ) -> Self {
        self.color = Some(color.into());
        self
    }
}
