use serde::{Deserialize, Serialize};

use crate::model::{SeriesId, VersionPayload};

/// Unique identifier for a version.
pub type VersionId = String;

/// Lifecycle status of a version.
///
/// Legal transitions: `Draft -> Active`, `Draft -> Published`,
/// `Active -> Archived`, `Published -> Archived`. A draft cannot be
/// archived without being activated or published first, and no
/// transition moves a version backward.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, Default, PartialEq, Eq, strum::AsRefStr, strum::EnumString, strum::Display)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum VersionStatus {
    /// Mutable working state, editable in place.
    #[default]
    Draft,
    /// Current deployed state of a flow series.
    Active,
    /// Current published state of an SOP series.
    Published,
    /// Immutable historical state.
    Archived,
}

impl VersionStatus {
    /// Returns true if the transition `self -> to` is legal.
    pub fn can_transition(
        self,
        to: VersionStatus,
    ) -> bool {
        matches!(
            (self, to),
            (VersionStatus::Draft, VersionStatus::Active)
                | (VersionStatus::Draft, VersionStatus::Published)
                | (VersionStatus::Active, VersionStatus::Archived)
                | (VersionStatus::Published, VersionStatus::Archived)
        )
    }

    /// Returns true for the statuses that represent the "current"
    /// version of a series in list and filter views.
    pub fn is_current(self) -> bool {
        matches!(self, VersionStatus::Active | VersionStatus::Published)
    }

    /// Only drafts may be edited in place.
    pub fn is_editable(self) -> bool {
        self == VersionStatus::Draft
    }
}

/// One snapshot of a series' content and lifecycle status.
///
/// The `seq` number is assigned monotonically at creation time and is
/// the only ordering key; `label` is a free-form display string and is
/// never compared (string ordering misorders multi-digit labels such as
/// "v10.0" vs "v9.0").
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Version {
    pub id: VersionId,
    pub series_id: SeriesId,
    /// Display label, e.g. "v2.1.0". Free-form.
    pub label: String,
    /// Monotonic sequence number within the series.
    pub seq: u64,
    pub status: VersionStatus,
    pub author: String,
    /// Millisecond timestamp of the last write.
    pub updated_at: i64,
    pub payload: VersionPayload,
}

#[cfg(test)]
mod test {
    use super::VersionStatus;

    #[test]
    fn test_legal_transitions() {
        assert!(VersionStatus::Draft.can_transition(VersionStatus::Active));
        assert!(VersionStatus::Draft.can_transition(VersionStatus::Published));
        assert!(VersionStatus::Active.can_transition(VersionStatus::Archived));
        assert!(VersionStatus::Published.can_transition(VersionStatus::Archived));
    }

    #[test]
    fn test_illegal_transitions() {
        // no backward moves
        assert!(!VersionStatus::Active.can_transition(VersionStatus::Draft));
        assert!(!VersionStatus::Archived.can_transition(VersionStatus::Active));
        assert!(!VersionStatus::Archived.can_transition(VersionStatus::Draft));
        // drafts must publish before archiving
        assert!(!VersionStatus::Draft.can_transition(VersionStatus::Archived));
        // self transitions are not transitions
        assert!(!VersionStatus::Draft.can_transition(VersionStatus::Draft));
    }
}
