//! Error kinds raised while building catalogs and computing demand

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum CalcError {
    /// A recipe or one of its bundles carries a non-positive quantity or rate.
    #[error("invalid recipe definition for '{recipe}': {reason}")]
    InvalidRecipeDefinition { recipe: String, reason: String },

    /// Demand was requested for a rate that is not a positive, finite number.
    #[error("target rate must be a positive number, got {0}")]
    InvalidTargetRate(f64),

    /// A recipe depends on itself, directly or through other recipes.
    /// `path` runs from the root to the recipe that was revisited.
    #[error("cyclic recipe graph: {}", .path.join(" -> "))]
    CyclicRecipeGraph { path: Vec<String> },

    #[error("unknown item '{0}'")]
    UnknownItem(String),

    #[error("item '{0}' is defined more than once")]
    DuplicateItem(String),

    #[error("'{0}' is a resource, not a recipe")]
    NotARecipe(String),
}
