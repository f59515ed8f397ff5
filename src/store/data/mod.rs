mod series;
mod version;

pub use series::SeriesRecord;
pub use version::VersionRecord;
