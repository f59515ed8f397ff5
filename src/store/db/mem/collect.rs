use super::DbDocument;
use crate::{GeoflowError, Result, ShareLock, store::DbCollection};

/// A single in-memory collection. Records keep insertion order, which
/// the store relies on for stable listings.
#[derive(Debug)]
pub struct Collect<T> {
    name: String,
    items: ShareLock<Vec<T>>,
}

impl<T> Collect<T> {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            items: ShareLock::new(Vec::new().into()),
        }
    }
}

impl<T> DbCollection for Collect<T>
where
    T: DbDocument,
{
    type Item = T;

    fn exists(
        &self,
        id: &str,
    ) -> Result<bool> {
        let items = self.items.read().unwrap();
        Ok(items.iter().any(|item| item.id() == id))
    }

    fn find(
        &self,
        id: &str,
    ) -> Result<T> {
        let items = self.items.read().unwrap();
        items.iter().find(|item| item.id() == id).cloned().ok_or(GeoflowError::Store(format!("not found in {}: {}", self.name, id)))
    }

    fn find_all(&self) -> Result<Vec<T>> {
        let items = self.items.read().unwrap();
        Ok(items.clone())
    }

    fn create(
        &self,
        data: &T,
    ) -> Result<bool> {
        let mut items = self.items.write().unwrap();
        if items.iter().any(|item| item.id() == data.id()) {
            return Err(GeoflowError::Store(format!("duplicate id in {}: {}", self.name, data.id())));
        }
        items.push(data.clone());
        Ok(true)
    }

    fn update(
        &self,
        data: &T,
    ) -> Result<bool> {
        let mut items = self.items.write().unwrap();
        let slot = items.iter_mut().find(|item| item.id() == data.id()).ok_or(GeoflowError::Store(format!("not found in {}: {}", self.name, data.id())))?;
        *slot = data.clone();
        Ok(true)
    }

    fn delete(
        &self,
        id: &str,
    ) -> Result<bool> {
        let mut items = self.items.write().unwrap();
        let before = items.len();
        items.retain(|item| item.id() != id);
        Ok(items.len() != before)
    }
}
