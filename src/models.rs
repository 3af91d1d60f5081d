//! Data models for production items and recipe inputs

use std::fmt;

/// Stable identifier of an item inside one [`crate::catalog::Catalog`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ItemId(pub(crate) u32);

impl ItemId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A raw material with no inputs
#[derive(Debug, Clone, PartialEq)]
pub struct Resource {
    pub id: ItemId,
    pub name: String,
}

/// An item produced by consuming a fixed set of bundles per cycle
#[derive(Debug, Clone, PartialEq)]
pub struct Recipe {
    pub id: ItemId,
    pub name: String,
    pub items_per_recipe: u32,
    pub recipes_per_minute: f64,
    pub required: Vec<RequiredBundle>,
}

impl Recipe {
    /// Items per minute produced by a single facility running this recipe.
    pub fn output_per_minute(&self) -> f64 {
        f64::from(self.items_per_recipe) * self.recipes_per_minute
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ProductionItem {
    Resource(Resource),
    Recipe(Recipe),
}

impl ProductionItem {
    pub fn id(&self) -> ItemId {
        match self {
            ProductionItem::Resource(r) => r.id,
            ProductionItem::Recipe(r) => r.id,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            ProductionItem::Resource(r) => &r.name,
            ProductionItem::Recipe(r) => &r.name,
        }
    }

    pub fn as_recipe(&self) -> Option<&Recipe> {
        match self {
            ProductionItem::Recipe(r) => Some(r),
            ProductionItem::Resource(_) => None,
        }
    }

    pub fn is_resource(&self) -> bool {
        matches!(self, ProductionItem::Resource(_))
    }
}

/// `amount` units of `item` consumed per recipe cycle
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RequiredBundle {
    pub item: ItemId,
    pub amount: f64,
}

/// Shorthand for building a [`RequiredBundle`].
pub fn bundle(amount: f64, item: ItemId) -> RequiredBundle {
    RequiredBundle { item, amount }
}
