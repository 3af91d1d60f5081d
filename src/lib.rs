//! DSP Production Calculator
//!
//! Computes the raw-material and intermediate demand needed to sustain a
//! target output rate of a recipe, and how many facilities of each
//! intermediate recipe that demand requires.

pub mod calculator;
pub mod catalog;
pub mod error;
pub mod loader;
pub mod models;
pub mod sample;

pub use calculator::{DemandSummary, SummaryEntry, compute_demand, factories_needed};
pub use catalog::{Catalog, CatalogBuilder};
pub use error::CalcError;
pub use models::{ItemId, ProductionItem, Recipe, RequiredBundle, Resource, bundle};
