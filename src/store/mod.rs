//! Storage layer for document series and their versions.
//!
//! Provides an abstraction over storage backends; only `MemStore` is in
//! scope here. A real backend must preserve the same guarantees the
//! memory backend gives the `Store` operations: insertion order is
//! stable and archived versions are never rewritten.

pub mod data;
mod db;
mod store;

use strum::AsRefStr;

use crate::Result;

pub use db::MemStore;
pub use store::{SeriesEntry, SeriesFilter, Store};

/// Identifiers for different storage collections.
#[derive(Debug, Clone, AsRefStr, PartialEq, Hash, Eq)]
pub enum StoreIden {
    /// Series identities.
    #[strum(serialize = "series")]
    Series,
    /// Version snapshots.
    #[strum(serialize = "versions")]
    Versions,
}

/// Trait for types that can identify their storage collection.
pub trait DbCollectionIden {
    /// Returns the collection identifier for this type.
    fn iden() -> StoreIden;
}

/// Trait for database collection operations.
pub trait DbCollection: Send + Sync {
    /// The type of items stored in this collection.
    type Item;

    /// Checks if a record with the given ID exists.
    fn exists(
        &self,
        id: &str,
    ) -> Result<bool>;

    /// Finds a record by ID.
    fn find(
        &self,
        id: &str,
    ) -> Result<Self::Item>;

    /// Returns all records in insertion order.
    fn find_all(&self) -> Result<Vec<Self::Item>>;

    /// Creates a new record; the ID must not already exist.
    fn create(
        &self,
        data: &Self::Item,
    ) -> Result<bool>;

    /// Updates an existing record in place.
    fn update(
        &self,
        data: &Self::Item,
    ) -> Result<bool>;

    /// Deletes a record by ID.
    fn delete(
        &self,
        id: &str,
    ) -> Result<bool>;
}

/// Trait for storage backends that can register their collections.
pub trait DbStore {
    fn init(
        &self,
        s: &Store,
    );
}
