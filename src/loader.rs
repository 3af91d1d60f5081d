//! Plain-text recipe catalog files
//!
//! A catalog file lists one definition per line:
//!
//! ```text
//! # comment
//! resource Iron ore
//! recipe Iron ingot = 1 x 60/min : 1 Iron ore
//! recipe Circuit board = 2 x 60/min : 2 Iron ingot + 1 Copper ingot
//! ```
//!
//! Inputs may name items defined further down, or in another file of the same
//! directory when a whole directory is loaded.

use std::fs;
use std::path::{Path, PathBuf};

use regex::Regex;
use thiserror::Error;
use tracing::{debug, info};
use walkdir::WalkDir;

use crate::catalog::{Catalog, CatalogBuilder};
use crate::error::CalcError;
use crate::models::{RequiredBundle, bundle};

pub const CATALOG_EXTENSION: &str = "recipes";

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("{}:{line}: {detail}", .file.display())]
    Parse {
        file: PathBuf,
        line: usize,
        detail: String,
    },

    /// A definition broke a catalog rule, located at its line.
    #[error("{}:{line}: {source}", .file.display())]
    Definition {
        file: PathBuf,
        line: usize,
        source: CalcError,
    },

    #[error("no .recipes files found in {}", .0.display())]
    NoCatalogFiles(PathBuf),

    #[error(transparent)]
    Catalog(#[from] CalcError),

    #[error(transparent)]
    Regex(#[from] regex::Error),

    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error(transparent)]
    Walk(#[from] walkdir::Error),
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct LoadStats {
    pub files: usize,
    pub resources: usize,
    pub recipes: usize,
    pub bundles: usize,
}

impl std::fmt::Display for LoadStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Loaded {} resources and {} recipes ({} inputs) from {} file(s)",
            self.resources, self.recipes, self.bundles, self.files
        )
    }
}

/// Compiled line grammar
struct Grammar {
    resource: Regex,
    recipe: Regex,
    input: Regex,
}

impl Grammar {
    fn new() -> Result<Self, regex::Error> {
        Ok(Self {
            resource: Regex::new(r"^resource\s+(?P<name>\S.*?)$")?,
            recipe: Regex::new(
                r"^recipe\s+(?P<name>\S.*?)\s*=\s*(?P<items>-?\d+)\s*x\s*(?P<rate>-?[\d.]+)\s*/\s*min\s*(?::\s*(?P<inputs>.*?))?$",
            )?,
            input: Regex::new(r"^(?P<amount>-?[\d.]+)\s+(?P<name>\S.*?)$")?,
        })
    }
}

/// Load a catalog from a single file or from every catalog file under a directory.
pub fn load_catalog(path: &Path) -> Result<(Catalog, LoadStats), LoadError> {
    let files = if path.is_dir() {
        find_catalog_files(path)?
    } else {
        vec![path.to_path_buf()]
    };

    let grammar = Grammar::new()?;
    let mut builder = CatalogBuilder::new();
    let mut stats = LoadStats::default();

    for file in &files {
        let content = fs::read_to_string(file).map_err(|source| LoadError::Io {
            path: file.clone(),
            source,
        })?;
        parse_into(&grammar, &content, file, &mut builder, &mut stats)?;
        stats.files += 1;
        debug!(file = %file.display(), "parsed catalog file");
    }

    let catalog = builder.build()?;
    info!("{}", stats);
    Ok((catalog, stats))
}

/// Parse catalog text that did not come from disk. `origin` only labels errors.
pub fn parse_catalog(content: &str, origin: &Path) -> Result<(Catalog, LoadStats), LoadError> {
    let grammar = Grammar::new()?;
    let mut builder = CatalogBuilder::new();
    let mut stats = LoadStats::default();
    parse_into(&grammar, content, origin, &mut builder, &mut stats)?;
    stats.files = 1;
    Ok((builder.build()?, stats))
}

/// Find all catalog files below `dir`, sorted by file name
pub fn find_catalog_files(dir: &Path) -> Result<Vec<PathBuf>, LoadError> {
    let mut files = Vec::new();

    for entry in WalkDir::new(dir)
        .follow_links(true)
        .sort_by_file_name()
    {
        let entry = entry?;
        let path = entry.path();
        if entry.file_type().is_file()
            && path.extension().is_some_and(|ext| ext == CATALOG_EXTENSION)
        {
            files.push(path.to_path_buf());
        }
    }

    if files.is_empty() {
        return Err(LoadError::NoCatalogFiles(dir.to_path_buf()));
    }
    Ok(files)
}

fn parse_into(
    grammar: &Grammar,
    content: &str,
    file: &Path,
    builder: &mut CatalogBuilder,
    stats: &mut LoadStats,
) -> Result<(), LoadError> {
    for (i, raw) in content.lines().enumerate() {
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let parse_error = |detail: String| LoadError::Parse {
            file: file.to_path_buf(),
            line: i + 1,
            detail,
        };
        let definition_error = |source: CalcError| LoadError::Definition {
            file: file.to_path_buf(),
            line: i + 1,
            source,
        };

        if let Some(cap) = grammar.resource.captures(line) {
            builder.resource(&cap["name"]).map_err(definition_error)?;
            stats.resources += 1;
        } else if let Some(cap) = grammar.recipe.captures(line) {
            let name = &cap["name"];
            let items: i64 = cap["items"]
                .parse()
                .map_err(|_| parse_error(format!("invalid item count '{}'", &cap["items"])))?;
            let items_per_recipe = u32::try_from(items).map_err(|_| {
                definition_error(CalcError::InvalidRecipeDefinition {
                    recipe: name.to_string(),
                    reason: format!("items per recipe must be at least 1, got {items}"),
                })
            })?;
            let rate: f64 = cap["rate"]
                .parse()
                .map_err(|_| parse_error(format!("invalid rate '{}'", &cap["rate"])))?;

            let mut required: Vec<RequiredBundle> = Vec::new();
            if let Some(inputs) = cap.name("inputs") {
                for part in inputs.as_str().split('+') {
                    let part = part.trim();
                    let input = grammar
                        .input
                        .captures(part)
                        .ok_or_else(|| parse_error(format!("malformed input '{part}'")))?;
                    let amount: f64 = input["amount"].parse().map_err(|_| {
                        parse_error(format!("invalid amount '{}'", &input["amount"]))
                    })?;
                    required.push(bundle(amount, builder.reference(&input["name"])));
                }
            }

            stats.bundles += required.len();
            builder
                .recipe(name, items_per_recipe, rate, required)
                .map_err(definition_error)?;
            stats.recipes += 1;
        } else {
            return Err(parse_error(format!("unrecognised line '{line}'")));
        }
    }
    Ok(())
}
