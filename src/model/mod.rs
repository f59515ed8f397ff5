mod dictionary;
mod payload;
mod series;
mod version;

pub use dictionary::{CATEGORY_PIPELINE, CATEGORY_SUB_PIPELINE, DictionaryItem, TopGroup};
pub use payload::{SopDocument, SopStep, VersionPayload};
pub use series::{DocumentKind, Series, SeriesId};
pub use version::{Version, VersionId, VersionStatus};
