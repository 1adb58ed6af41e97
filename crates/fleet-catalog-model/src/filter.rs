use crate::item::{Category, Item};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Grid filter: one active category plus optional exact brand and type.
/// All active criteria must hold.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CatalogFilter {
    pub category: Category,
    pub brand: Option<String>,
    pub kind: Option<String>,
}

impl CatalogFilter {
    #[must_use]
    pub fn new(category: Category) -> Self {
        Self {
            category,
            brand: None,
            kind: None,
        }
    }

    #[must_use]
    pub fn with_brand(mut self, brand: Option<String>) -> Self {
        self.brand = brand.filter(|b| !b.is_empty());
        self
    }

    #[must_use]
    pub fn with_kind(mut self, kind: Option<String>) -> Self {
        self.kind = kind.filter(|k| !k.is_empty());
        self
    }

    /// Switching category clears brand and type, which belong to the old facet lists.
    pub fn set_category(&mut self, category: Category) {
        if self.category != category {
            self.brand = None;
            self.kind = None;
        }
        self.category = category;
    }

    #[must_use]
    pub fn matches(&self, item: &Item) -> bool {
        item.category == self.category
            && self.brand.as_deref().map_or(true, |b| item.brand == b)
            && self.kind.as_deref().map_or(true, |k| item.kind == k)
    }

    /// Matching items in collection order.
    #[must_use]
    pub fn apply<'a>(&self, items: &'a [Item]) -> Vec<&'a Item> {
        items.iter().filter(|item| self.matches(item)).collect()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Facets {
    pub brands: Vec<String>,
    pub types: Vec<String>,
}

/// Sorted, de-duplicated brand and type lists for one category.
#[must_use]
pub fn facets(items: &[Item], category: Category) -> Facets {
    let mut brands = BTreeSet::new();
    let mut types = BTreeSet::new();
    for item in items.iter().filter(|i| i.category == category) {
        brands.insert(item.brand.clone());
        types.insert(item.kind.clone());
    }
    Facets {
        brands: brands.into_iter().collect(),
        types: types.into_iter().collect(),
    }
}
