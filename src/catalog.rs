//! Recipe catalog construction and lookups

use std::collections::HashMap;

use crate::error::CalcError;
use crate::models::{ItemId, ProductionItem, Recipe, RequiredBundle, Resource};

/// Immutable set of resources and recipes, indexed by [`ItemId`].
#[derive(Debug, Clone)]
pub struct Catalog {
    items: Vec<ProductionItem>,
    by_name: HashMap<String, ItemId>,
}

impl Catalog {
    pub fn builder() -> CatalogBuilder {
        CatalogBuilder::new()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, id: ItemId) -> Option<&ProductionItem> {
        self.items.get(id.index())
    }

    /// Ids handed out by this catalog's builder are always in range; the
    /// builder rejects bundles naming ids it never issued.
    pub(crate) fn item(&self, id: ItemId) -> &ProductionItem {
        &self.items[id.index()]
    }

    pub fn name_of(&self, id: ItemId) -> &str {
        self.item(id).name()
    }

    pub fn find(&self, name: &str) -> Option<ItemId> {
        self.by_name.get(name).copied()
    }

    /// Look up a recipe by name
    pub fn recipe_named(&self, name: &str) -> Result<&Recipe, CalcError> {
        let id = self
            .find(name)
            .ok_or_else(|| CalcError::UnknownItem(name.to_string()))?;
        self.item(id)
            .as_recipe()
            .ok_or_else(|| CalcError::NotARecipe(name.to_string()))
    }

    pub fn recipes(&self) -> impl Iterator<Item = &Recipe> {
        self.items.iter().filter_map(ProductionItem::as_recipe)
    }

    pub fn resources(&self) -> impl Iterator<Item = &Resource> {
        self.items.iter().filter_map(|item| match item {
            ProductionItem::Resource(r) => Some(r),
            ProductionItem::Recipe(_) => None,
        })
    }

    /// Recipes that list `id` among their inputs
    pub fn consumers_of(&self, id: ItemId) -> Vec<&Recipe> {
        self.recipes()
            .filter(|r| r.required.iter().any(|b| b.item == id))
            .collect()
    }
}

/// Collects item definitions and resolves names into a [`Catalog`].
///
/// Names are interned on first mention, so a recipe may reference an input
/// that is defined later. Every referenced name must be defined before
/// [`CatalogBuilder::build`] is called.
#[derive(Debug, Default)]
pub struct CatalogBuilder {
    names: Vec<String>,
    slots: Vec<Option<ProductionItem>>,
    by_name: HashMap<String, ItemId>,
}

impl CatalogBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Id for `name`, reserving one if the name has not been seen yet.
    pub fn reference(&mut self, name: &str) -> ItemId {
        if let Some(id) = self.by_name.get(name) {
            return *id;
        }
        let id = ItemId(self.slots.len() as u32);
        self.names.push(name.to_string());
        self.slots.push(None);
        self.by_name.insert(name.to_string(), id);
        id
    }

    pub fn resource(&mut self, name: &str) -> Result<ItemId, CalcError> {
        let id = self.claim(name)?;
        self.slots[id.index()] = Some(ProductionItem::Resource(Resource {
            id,
            name: name.to_string(),
        }));
        Ok(id)
    }

    pub fn recipe(
        &mut self,
        name: &str,
        items_per_recipe: u32,
        recipes_per_minute: f64,
        required: Vec<RequiredBundle>,
    ) -> Result<ItemId, CalcError> {
        validate_recipe(self, name, items_per_recipe, recipes_per_minute, &required)?;
        let id = self.claim(name)?;
        self.slots[id.index()] = Some(ProductionItem::Recipe(Recipe {
            id,
            name: name.to_string(),
            items_per_recipe,
            recipes_per_minute,
            required,
        }));
        Ok(id)
    }

    pub fn build(self) -> Result<Catalog, CalcError> {
        let mut items = Vec::with_capacity(self.slots.len());
        for (slot, name) in self.slots.into_iter().zip(self.names) {
            items.push(slot.ok_or(CalcError::UnknownItem(name))?);
        }
        Ok(Catalog {
            items,
            by_name: self.by_name,
        })
    }

    fn claim(&mut self, name: &str) -> Result<ItemId, CalcError> {
        let id = self.reference(name);
        if self.slots[id.index()].is_some() {
            return Err(CalcError::DuplicateItem(name.to_string()));
        }
        Ok(id)
    }
}

fn validate_recipe(
    builder: &CatalogBuilder,
    name: &str,
    items_per_recipe: u32,
    recipes_per_minute: f64,
    required: &[RequiredBundle],
) -> Result<(), CalcError> {
    let invalid = |reason: String| CalcError::InvalidRecipeDefinition {
        recipe: name.to_string(),
        reason,
    };

    if items_per_recipe == 0 {
        return Err(invalid("items per recipe must be at least 1".to_string()));
    }
    if !(recipes_per_minute.is_finite() && recipes_per_minute > 0.0) {
        return Err(invalid(format!(
            "recipes per minute must be positive, got {recipes_per_minute}"
        )));
    }
    for b in required {
        let Some(input) = builder.names.get(b.item.index()) else {
            return Err(CalcError::UnknownItem(b.item.to_string()));
        };
        if !(b.amount.is_finite() && b.amount > 0.0) {
            return Err(invalid(format!(
                "amount of '{input}' must be positive, got {}",
                b.amount
            )));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::bundle;

    #[test]
    fn builds_catalog_with_lookups() {
        let mut builder = Catalog::builder();
        let ore = builder.resource("Iron ore").unwrap();
        let ingot = builder
            .recipe("Iron ingot", 1, 60.0, vec![bundle(1.0, ore)])
            .unwrap();
        let catalog = builder.build().unwrap();

        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.find("Iron ingot"), Some(ingot));
        assert_eq!(catalog.name_of(ore), "Iron ore");
        assert_eq!(catalog.recipe_named("Iron ingot").unwrap().id, ingot);
        assert_eq!(catalog.resources().count(), 1);
        assert_eq!(catalog.recipes().count(), 1);
    }

    #[test]
    fn zero_recipes_per_minute_is_rejected() {
        let mut builder = Catalog::builder();
        let ore = builder.resource("Iron ore").unwrap();
        let err = builder
            .recipe("Iron ingot", 1, 0.0, vec![bundle(1.0, ore)])
            .unwrap_err();
        assert!(matches!(
            err,
            CalcError::InvalidRecipeDefinition { ref recipe, .. } if recipe == "Iron ingot"
        ));
    }

    #[test]
    fn zero_items_per_recipe_is_rejected() {
        let mut builder = Catalog::builder();
        let ore = builder.resource("Iron ore").unwrap();
        let err = builder
            .recipe("Iron ingot", 0, 60.0, vec![bundle(1.0, ore)])
            .unwrap_err();
        assert!(matches!(err, CalcError::InvalidRecipeDefinition { .. }));
    }

    #[test]
    fn non_positive_bundle_amount_is_rejected() {
        let mut builder = Catalog::builder();
        let ore = builder.resource("Iron ore").unwrap();
        let err = builder
            .recipe("Iron ingot", 1, 60.0, vec![bundle(-2.0, ore)])
            .unwrap_err();
        match err {
            CalcError::InvalidRecipeDefinition { reason, .. } => {
                assert!(reason.contains("Iron ore"), "{reason}");
            }
            other => panic!("unexpected error: {other:?}"),
        }

        let err = builder
            .recipe("Iron ingot", 1, 60.0, vec![bundle(f64::NAN, ore)])
            .unwrap_err();
        assert!(matches!(err, CalcError::InvalidRecipeDefinition { .. }));
    }

    #[test]
    fn rejected_recipe_does_not_claim_its_name() {
        let mut builder = Catalog::builder();
        let ore = builder.resource("Iron ore").unwrap();
        assert!(builder.recipe("Iron ingot", 1, -1.0, vec![]).is_err());
        assert!(builder
            .recipe("Iron ingot", 1, 60.0, vec![bundle(1.0, ore)])
            .is_ok());
    }

    #[test]
    fn duplicate_names_are_rejected() {
        let mut builder = Catalog::builder();
        builder.resource("Water").unwrap();
        assert_eq!(
            builder.resource("Water"),
            Err(CalcError::DuplicateItem("Water".to_string()))
        );
        assert_eq!(
            builder.recipe("Water", 1, 1.0, vec![]),
            Err(CalcError::DuplicateItem("Water".to_string()))
        );
    }

    #[test]
    fn bundle_from_another_builder_is_rejected() {
        let mut other = Catalog::builder();
        let mut foreign = other.resource("Ore 0").unwrap();
        for i in 1..6 {
            foreign = other.resource(&format!("Ore {i}")).unwrap();
        }

        let mut builder = Catalog::builder();
        let err = builder
            .recipe("Widget", 1, 10.0, vec![bundle(1.0, foreign)])
            .unwrap_err();
        assert_eq!(err, CalcError::UnknownItem(foreign.to_string()));

        let catalog = builder.build().unwrap();
        assert!(catalog.is_empty());
        assert!(catalog.find("Widget").is_none());
    }

    #[test]
    fn forward_references_resolve_at_build() {
        let mut builder = Catalog::builder();
        let glass = builder.reference("Glass");
        let prism = builder
            .recipe("Prism", 2, 30.0, vec![bundle(3.0, glass)])
            .unwrap();
        let stone = builder.resource("Stone").unwrap();
        assert_eq!(
            builder
                .recipe("Glass", 1, 30.0, vec![bundle(2.0, stone)])
                .unwrap(),
            glass
        );
        let catalog = builder.build().unwrap();
        assert_eq!(catalog.consumers_of(glass)[0].id, prism);
    }

    #[test]
    fn undefined_reference_fails_build() {
        let mut builder = Catalog::builder();
        let missing = builder.reference("Unobtainium");
        builder
            .recipe("Widget", 1, 10.0, vec![bundle(1.0, missing)])
            .unwrap();
        assert_eq!(
            builder.build().unwrap_err(),
            CalcError::UnknownItem("Unobtainium".to_string())
        );
    }

    #[test]
    fn recipe_named_distinguishes_unknown_and_resource() {
        let mut builder = Catalog::builder();
        builder.resource("Coal").unwrap();
        let catalog = builder.build().unwrap();
        assert_eq!(
            catalog.recipe_named("Coal").unwrap_err(),
            CalcError::NotARecipe("Coal".to_string())
        );
        assert_eq!(
            catalog.recipe_named("Graphite").unwrap_err(),
            CalcError::UnknownItem("Graphite".to_string())
        );
    }
}
