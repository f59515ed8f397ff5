//! Hierarchical classification taxonomy.
//!
//! The taxonomy is a two-level hierarchy read from a dictionary
//! collaborator: top-level groups partition `pipeline` items, and
//! `sub_pipeline` items hang off a pipeline item's value. Every editor
//! surface is handed an injected `TaxonomyIndex` instead of reading
//! shared global state; reads always hit the dictionary so taxonomy
//! edits are visible to all open sessions on their next read.

use std::{collections::HashMap, str::FromStr, sync::Arc};

use strum::IntoEnumIterator;
use tracing::trace;

use crate::{
    GeoflowError, Result, ShareLock,
    model::{CATEGORY_PIPELINE, CATEGORY_SUB_PIPELINE, DictionaryItem, TopGroup},
};

/// Filter key matching every item.
pub const FILTER_ALL: &str = "All";

/// Bucket id for pipeline items whose code names no known group.
const GROUP_OTHER: &str = "Other";

/// Dictionary collaborator: named, ordered categories of items.
pub trait Dictionary: Send + Sync {
    /// Returns the items of a category, in stored order. Unknown
    /// categories yield an empty list.
    fn get_category(
        &self,
        name: &str,
    ) -> Vec<DictionaryItem>;

    /// Replaces a category wholesale.
    fn set_category(
        &self,
        name: &str,
        items: Vec<DictionaryItem>,
    );

    /// Names of all known categories.
    fn categories(&self) -> Vec<String>;
}

/// In-memory dictionary backing tests and the demo console.
#[derive(Default)]
pub struct MemDictionary {
    categories: ShareLock<HashMap<String, Vec<DictionaryItem>>>,
}

impl MemDictionary {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Dictionary for MemDictionary {
    fn get_category(
        &self,
        name: &str,
    ) -> Vec<DictionaryItem> {
        let categories = self.categories.read().unwrap();
        categories.get(name).cloned().unwrap_or_default()
    }

    fn set_category(
        &self,
        name: &str,
        items: Vec<DictionaryItem>,
    ) {
        let mut categories = self.categories.write().unwrap();
        categories.insert(name.to_string(), items);
    }

    fn categories(&self) -> Vec<String> {
        let categories = self.categories.read().unwrap();
        let mut names: Vec<String> = categories.keys().cloned().collect();
        names.sort();
        names
    }
}

/// Read/derive view over the dictionary plus taxonomy CRUD.
#[derive(Clone)]
pub struct TaxonomyIndex {
    dict: Arc<dyn Dictionary>,
}

impl TaxonomyIndex {
    pub fn new(dict: Arc<dyn Dictionary>) -> Self {
        Self {
            dict,
        }
    }

    /// Partitions a category's items by their `code` into the fixed
    /// top-level groups, in group order, plus a trailing `Other` bucket
    /// for items whose code names no known group. Known groups are
    /// always present, even when empty; `Other` appears only when
    /// populated.
    pub fn groups_of(
        &self,
        category: &str,
    ) -> Vec<(String, Vec<DictionaryItem>)> {
        let items = self.dict.get_category(category);
        let mut groups: Vec<(String, Vec<DictionaryItem>)> = TopGroup::iter().map(|g| (g.to_string(), Vec::new())).collect();
        let mut other: Vec<DictionaryItem> = Vec::new();

        for item in items {
            let group = item.code.as_deref().and_then(|c| TopGroup::from_str(c).ok());
            match group {
                Some(g) => groups.iter_mut().find(|(id, _)| *id == g.to_string()).unwrap().1.push(item),
                None => other.push(item),
            }
        }
        if !other.is_empty() {
            groups.push((GROUP_OTHER.to_string(), other));
        }
        groups
    }

    /// Sub-pipeline items whose code names the given pipeline value.
    pub fn children_of(
        &self,
        pipeline_value: &str,
    ) -> Vec<DictionaryItem> {
        self.dict.get_category(CATEGORY_SUB_PIPELINE).into_iter().filter(|item| item.code.as_deref() == Some(pipeline_value)).collect()
    }

    /// Resolves a stored value to its display label, searching every
    /// category. Total: unknown values degrade to the raw value itself.
    pub fn label_for(
        &self,
        value: &str,
    ) -> String {
        for category in self.dict.categories() {
            if let Some(item) = self.dict.get_category(&category).into_iter().find(|i| i.value == value) {
                return item.label;
            }
        }
        value.to_string()
    }

    /// Filter-key matching. A key may be `All`, a group id, or a
    /// specific value; a specific-value match wins over group
    /// membership.
    pub fn matches(
        &self,
        item: &DictionaryItem,
        filter_key: &str,
    ) -> bool {
        if filter_key == FILTER_ALL {
            return true;
        }
        if item.value == filter_key {
            return true;
        }
        item.code.as_deref() == Some(filter_key)
    }

    /// Adds an item to a category; the value must be unique within the
    /// category.
    pub fn add_item(
        &self,
        category: &str,
        item: DictionaryItem,
    ) -> Result<()> {
        let mut items = self.dict.get_category(category);
        if items.iter().any(|i| i.value == item.value) {
            return Err(GeoflowError::Taxonomy(format!("duplicate value in {}: {}", category, item.value)));
        }
        trace!("taxonomy::add_item({}, {})", category, item.value);
        items.push(item);
        self.dict.set_category(category, items);
        Ok(())
    }

    /// Replaces the item with the same value.
    pub fn update_item(
        &self,
        category: &str,
        item: DictionaryItem,
    ) -> Result<()> {
        let mut items = self.dict.get_category(category);
        let slot = items.iter_mut().find(|i| i.value == item.value).ok_or(GeoflowError::UnknownReference(item.value.clone()))?;
        *slot = item;
        self.dict.set_category(category, items);
        Ok(())
    }

    /// Removes an item by value. Removing a pipeline item cascades to
    /// its sub-pipelines; documents referencing the removed value keep
    /// their raw value and degrade through `label_for`.
    pub fn remove_item(
        &self,
        category: &str,
        value: &str,
    ) -> Result<()> {
        let mut items = self.dict.get_category(category);
        let before = items.len();
        items.retain(|i| i.value != value);
        if items.len() == before {
            return Err(GeoflowError::UnknownReference(value.to_string()));
        }
        trace!("taxonomy::remove_item({}, {})", category, value);
        self.dict.set_category(category, items);

        if category == CATEGORY_PIPELINE {
            let subs: Vec<DictionaryItem> = self.dict.get_category(CATEGORY_SUB_PIPELINE).into_iter().filter(|i| i.code.as_deref() != Some(value)).collect();
            self.dict.set_category(CATEGORY_SUB_PIPELINE, subs);
        }
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use std::sync::Arc;

    use super::{FILTER_ALL, MemDictionary, TaxonomyIndex};
    use crate::{
        GeoflowError,
        model::{CATEGORY_PIPELINE, CATEGORY_SUB_PIPELINE, DictionaryItem},
        taxonomy::Dictionary,
    };

    fn seeded() -> TaxonomyIndex {
        let dict = Arc::new(MemDictionary::new());
        dict.set_category(
            CATEGORY_PIPELINE,
            vec![
                DictionaryItem::new("Road Extraction", "road_extraction").with_code("Foundation"),
                DictionaryItem::new("POI Discovery", "poi_discovery").with_code("Location"),
                DictionaryItem::new("Legacy Import", "legacy_import").with_code("Retired"),
            ],
        );
        dict.set_category(
            CATEGORY_SUB_PIPELINE,
            vec![
                DictionaryItem::new("Highway", "highway").with_code("road_extraction"),
                DictionaryItem::new("Urban", "urban").with_code("road_extraction"),
                DictionaryItem::new("Landmark", "landmark").with_code("poi_discovery"),
                DictionaryItem::new("Orphan", "orphan").with_code("gone_pipeline"),
            ],
        );
        TaxonomyIndex::new(dict)
    }

    #[test]
    fn test_groups_of_partitions_with_other_bucket() {
        let taxonomy = seeded();
        let groups = taxonomy.groups_of(CATEGORY_PIPELINE);
        let ids: Vec<&str> = groups.iter().map(|(id, _)| id.as_str()).collect();
        assert_eq!(ids, vec!["Foundation", "Location", "LastMile", "Other"]);

        assert_eq!(groups[0].1[0].value, "road_extraction");
        assert!(groups[2].1.is_empty());
        // unknown code lands in Other
        assert_eq!(groups[3].1[0].value, "legacy_import");
    }

    #[test]
    fn test_children_of() {
        let taxonomy = seeded();
        let children = taxonomy.children_of("road_extraction");
        let values: Vec<&str> = children.iter().map(|i| i.value.as_str()).collect();
        assert_eq!(values, vec!["highway", "urban"]);
        assert!(taxonomy.children_of("no_such_pipeline").is_empty());
    }

    #[test]
    fn test_label_for_is_total() {
        let taxonomy = seeded();
        assert_eq!(taxonomy.label_for("road_extraction"), "Road Extraction");
        assert_eq!(taxonomy.label_for("highway"), "Highway");
        // unresolved values fall back to the raw value
        assert_eq!(taxonomy.label_for("deleted_value"), "deleted_value");
    }

    #[test]
    fn test_matches_resolution_order() {
        let taxonomy = seeded();
        let item = DictionaryItem::new("Road Extraction", "road_extraction").with_code("Foundation");
        assert!(taxonomy.matches(&item, FILTER_ALL));
        assert!(taxonomy.matches(&item, "road_extraction"));
        assert!(taxonomy.matches(&item, "Foundation"));
        assert!(!taxonomy.matches(&item, "Location"));
    }

    #[test]
    fn test_remove_pipeline_cascades_to_its_subs_only() {
        let taxonomy = seeded();
        taxonomy.remove_item(CATEGORY_PIPELINE, "road_extraction").unwrap();

        assert_eq!(taxonomy.label_for("road_extraction"), "road_extraction");
        let subs = taxonomy.dict.get_category(CATEGORY_SUB_PIPELINE);
        let values: Vec<&str> = subs.iter().map(|i| i.value.as_str()).collect();
        assert_eq!(values, vec!["landmark", "orphan"]);
    }

    #[test]
    fn test_add_duplicate_value_rejected() {
        let taxonomy = seeded();
        let err = taxonomy.add_item(CATEGORY_PIPELINE, DictionaryItem::new("Dup", "road_extraction")).unwrap_err();
        assert!(matches!(err, GeoflowError::Taxonomy(_)));
    }

    #[test]
    fn test_update_unknown_item() {
        let taxonomy = seeded();
        let err = taxonomy.update_item(CATEGORY_PIPELINE, DictionaryItem::new("Nope", "missing")).unwrap_err();
        assert_eq!(err, GeoflowError::UnknownReference("missing".to_string()));
    }
}
