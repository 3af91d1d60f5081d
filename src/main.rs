//! DSP Production Calculator
//!
//! A production chain calculator for Dyson Sphere Program.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::info;

use dsp_calculator::calculator::{self, format_demand_tree};
use dsp_calculator::catalog::Catalog;
use dsp_calculator::loader;
use dsp_calculator::sample;

#[derive(Parser)]
#[command(name = "dsp-calculator")]
#[command(about = "Production chain calculator for Dyson Sphere Program")]
struct Cli {
    /// Recipe catalog file or directory of .recipes files (defaults to the built-in catalog)
    #[arg(short, long, global = true)]
    catalog: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Calculate the demand needed to produce a recipe
    Calc {
        /// Recipe to produce (e.g., "Processor", "Solar sail")
        #[arg(default_value = sample::DEFAULT_TARGET)]
        item: String,

        /// Target output in items per minute (defaults to one facility's output)
        #[arg(short, long)]
        rate: Option<f64>,

        /// Show the per-path demand tree
        #[arg(short, long)]
        verbose: bool,
    },

    /// List all recipes in the catalog
    ListRecipes,

    /// List all raw resources in the catalog
    ListResources,

    /// Show details for a specific recipe
    Recipe {
        /// Recipe name
        name: String,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    let catalog = open_catalog(cli.catalog.as_ref())?;

    match cli.command {
        Commands::Calc {
            item,
            rate,
            verbose,
        } => {
            let recipe = catalog.recipe_named(&item)?;
            let rate = rate.unwrap_or_else(|| recipe.output_per_minute());

            if verbose {
                println!("Demand tree:\n");
                println!("{}", format_demand_tree(&catalog, recipe.id, rate)?);
            }

            let summary = calculator::compute_demand(&catalog, recipe.id, rate)?;
            print!("{}", summary.display(&catalog));
            info!(
                factories = summary.total_factories(),
                items = summary.len(),
                "calculation finished"
            );
        }

        Commands::ListRecipes => {
            println!(
                "{:<30} {:>6} {:>10} {:>12}",
                "Recipe", "Batch", "Cycles/min", "Output/min"
            );
            println!("{}", "-".repeat(61));
            for r in catalog.recipes() {
                println!(
                    "{:<30} {:>6} {:>10} {:>12}",
                    r.name,
                    r.items_per_recipe,
                    r.recipes_per_minute,
                    r.output_per_minute()
                );
            }
        }

        Commands::ListResources => {
            println!("Raw resources:");
            for r in catalog.resources() {
                println!("  {}", r.name);
            }
        }

        Commands::Recipe { name } => {
            let recipe = catalog.recipe_named(&name)?;
            println!("Recipe: {}", recipe.name);
            println!("  Items per cycle: {}", recipe.items_per_recipe);
            println!("  Cycles per minute: {}", recipe.recipes_per_minute);
            println!("  Output per facility: {}/min", recipe.output_per_minute());

            if !recipe.required.is_empty() {
                println!("  Inputs:");
                for b in &recipe.required {
                    println!("    {} x {}", b.amount, catalog.name_of(b.item));
                }
            }

            let consumers = catalog.consumers_of(recipe.id);
            if !consumers.is_empty() {
                println!("  Used by:");
                for c in consumers {
                    println!("    {}", c.name);
                }
            }
        }
    }

    Ok(())
}

fn open_catalog(path: Option<&PathBuf>) -> Result<Catalog> {
    match path {
        Some(path) => {
            let (catalog, _) = loader::load_catalog(path)
                .with_context(|| format!("Failed to load catalog from {}", path.display()))?;
            Ok(catalog)
        }
        None => sample::dyson_sphere_catalog().context("Built-in catalog is invalid"),
    }
}
