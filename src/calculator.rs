//! Demand propagation through the recipe graph

use std::collections::HashMap;
use std::fmt;

use tracing::{debug, trace};

use crate::catalog::Catalog;
use crate::error::CalcError;
use crate::models::{ItemId, ProductionItem, Recipe};

/// Deepest recipe chain the traversal will follow before giving up.
pub const MAX_DEPTH: usize = 64;

/// Cumulative demand for one item reachable from the root recipe
#[derive(Debug, Clone, PartialEq)]
pub struct SummaryEntry {
    pub item: ItemId,
    /// Items per minute, in the same unit as the target rate
    pub amount: f64,
    /// Whole facilities needed; `None` for raw resources
    pub factories: Option<u64>,
}

/// Flattened requirements for producing a recipe at a target rate.
///
/// Entries appear in the order the depth-first traversal first reached them.
#[derive(Debug, Clone, PartialEq)]
pub struct DemandSummary {
    root: ItemId,
    target_rate: f64,
    entries: Vec<SummaryEntry>,
}

impl DemandSummary {
    pub fn root(&self) -> ItemId {
        self.root
    }

    pub fn target_rate(&self) -> f64 {
        self.target_rate
    }

    pub fn entries(&self) -> &[SummaryEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, item: ItemId) -> Option<&SummaryEntry> {
        self.entries.iter().find(|e| e.item == item)
    }

    pub fn amount_of(&self, item: ItemId) -> Option<f64> {
        self.get(item).map(|e| e.amount)
    }

    pub fn total_factories(&self) -> u64 {
        self.entries.iter().filter_map(|e| e.factories).sum()
    }

    /// Entries for items with no recipe of their own
    pub fn raw_resources(&self) -> impl Iterator<Item = &SummaryEntry> {
        self.entries.iter().filter(|e| e.factories.is_none())
    }

    /// Human-readable report, one line per entry.
    pub fn display<'a>(&'a self, catalog: &'a Catalog) -> SummaryDisplay<'a> {
        SummaryDisplay {
            summary: self,
            catalog,
        }
    }
}

pub struct SummaryDisplay<'a> {
    summary: &'a DemandSummary,
    catalog: &'a Catalog,
}

impl fmt::Display for SummaryDisplay<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "For {:?} of {} you need:",
            self.summary.target_rate,
            self.catalog.name_of(self.summary.root)
        )?;
        for entry in &self.summary.entries {
            let name = self.catalog.name_of(entry.item);
            match entry.factories {
                Some(n) => writeln!(f, "{} - {:?} items / {} factories", name, entry.amount, n)?,
                None => writeln!(f, "{} - {:?} items / -", name, entry.amount)?,
            }
        }
        Ok(())
    }
}

/// Whole facilities needed to sustain `amount` items per minute of `recipe`.
pub fn factories_needed(recipe: &Recipe, amount: f64) -> u64 {
    (amount / recipe.output_per_minute()).ceil() as u64
}

/// Compute the demand of every item reachable from `root` when producing
/// `target_rate` items per minute of it.
///
/// The root itself is not part of the result.
pub fn compute_demand(
    catalog: &Catalog,
    root: ItemId,
    target_rate: f64,
) -> Result<DemandSummary, CalcError> {
    let recipe = root_recipe(catalog, root, target_rate)?;

    let mut entries: Vec<SummaryEntry> = Vec::new();
    let mut index: HashMap<ItemId, usize> = HashMap::new();

    let mut accumulate = |_depth: usize, item: ItemId, amount: f64| match index.get(&item) {
        Some(&i) => entries[i].amount += amount,
        None => {
            index.insert(item, entries.len());
            entries.push(SummaryEntry {
                item,
                amount,
                factories: None,
            });
        }
    };
    walk(catalog, recipe, target_rate, &mut vec![root], &mut accumulate)?;

    for entry in &mut entries {
        if let ProductionItem::Recipe(r) = catalog.item(entry.item) {
            entry.factories = Some(factories_needed(r, entry.amount));
        }
    }

    debug!(
        root = catalog.name_of(root),
        target_rate,
        items = entries.len(),
        "computed demand"
    );

    Ok(DemandSummary {
        root,
        target_rate,
        entries,
    })
}

/// Render every bundle expansion below `root` as an indented tree, in the
/// same order [`compute_demand`] visits them.
pub fn format_demand_tree(
    catalog: &Catalog,
    root: ItemId,
    target_rate: f64,
) -> Result<String, CalcError> {
    let recipe = root_recipe(catalog, root, target_rate)?;

    let mut output = format!(
        "{} @ {:?}/min ({:.2} facilities)\n",
        recipe.name,
        target_rate,
        target_rate / recipe.output_per_minute()
    );
    let mut visit = |depth: usize, item: ItemId, amount: f64| {
        let prefix = "  ".repeat(depth);
        match catalog.item(item) {
            ProductionItem::Recipe(r) => output.push_str(&format!(
                "{}{} @ {:?}/min ({:.2} facilities)\n",
                prefix,
                r.name,
                amount,
                amount / r.output_per_minute()
            )),
            ProductionItem::Resource(r) => {
                output.push_str(&format!("{}{} @ {:?}/min (raw)\n", prefix, r.name, amount))
            }
        }
    };
    walk(catalog, recipe, target_rate, &mut vec![root], &mut visit)?;

    Ok(output)
}

fn root_recipe(catalog: &Catalog, root: ItemId, target_rate: f64) -> Result<&Recipe, CalcError> {
    if !(target_rate.is_finite() && target_rate > 0.0) {
        return Err(CalcError::InvalidTargetRate(target_rate));
    }
    let item = catalog
        .get(root)
        .ok_or_else(|| CalcError::UnknownItem(root.to_string()))?;
    item.as_recipe()
        .ok_or_else(|| CalcError::NotARecipe(item.name().to_string()))
}

/// Depth-first expansion of `recipe` at `rate` items per minute.
///
/// `visit` receives the depth (1 for the root's direct inputs), the input item
/// and the per-minute amount contributed along the current path. `path` holds
/// the recipes currently being expanded, root first.
fn walk<F>(
    catalog: &Catalog,
    recipe: &Recipe,
    rate: f64,
    path: &mut Vec<ItemId>,
    visit: &mut F,
) -> Result<(), CalcError>
where
    F: FnMut(usize, ItemId, f64),
{
    if path.len() > MAX_DEPTH {
        return Err(cycle_error(catalog, path));
    }
    trace!(recipe = %recipe.name, rate, depth = path.len(), "expanding");

    for bundle in &recipe.required {
        let amount = bundle.amount * rate / f64::from(recipe.items_per_recipe);
        visit(path.len(), bundle.item, amount);

        if let ProductionItem::Recipe(input) = catalog.item(bundle.item) {
            let revisit = path.contains(&input.id);
            path.push(input.id);
            if revisit {
                return Err(cycle_error(catalog, path));
            }
            walk(catalog, input, amount, path, visit)?;
            path.pop();
        }
    }
    Ok(())
}

fn cycle_error(catalog: &Catalog, path: &[ItemId]) -> CalcError {
    CalcError::CyclicRecipeGraph {
        path: path.iter().map(|id| catalog.name_of(*id).to_string()).collect(),
    }
}
