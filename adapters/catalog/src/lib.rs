#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Loads the unit and modifier catalog from a versioned TOML manifest.

use std::{
    collections::BTreeSet,
    fs,
    path::{Path, PathBuf},
};

use combat_calculator_core::{
    Catalog, Level, ModId, ModifierDefinition, StatModifier, UnitDefinition, UnitId, UnitStats,
};
use serde::Deserialize;
use thiserror::Error;

const SUPPORTED_CATALOG_VERSION: u32 = 1;
const BUILTIN_CATALOG: &str = include_str!("../../../assets/catalog.toml");

/// Errors raised while loading a catalog manifest.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// The manifest file could not be read.
    #[error("failed to read catalog at {}", path.display())]
    Io {
        /// Location of the manifest.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: std::io::Error,
    },
    /// The manifest is not valid TOML or does not match the expected shape.
    #[error("failed to parse catalog toml contents")]
    Parse(#[from] toml::de::Error),
    /// The manifest declares a version this loader does not understand.
    #[error("unsupported catalog version {found}; expected {expected}")]
    UnsupportedVersion {
        /// Version declared by the manifest.
        found: u32,
        /// Version supported by the loader.
        expected: u32,
    },
    /// Two units share an identifier.
    #[error("catalog contains duplicate unit `{0}`")]
    DuplicateUnit(UnitId),
    /// Two modifiers share an identifier.
    #[error("catalog contains duplicate modifier `{0}`")]
    DuplicateMod(ModId),
    /// A unit lists a modifier that the manifest does not define.
    #[error("unit `{unit}` lists unknown modifier `{modifier}`")]
    UnknownEligibleMod {
        /// Unit declaring the modifier.
        unit: UnitId,
        /// Modifier missing from the manifest.
        modifier: ModId,
    },
    /// A unit's levels are zero or its default exceeds its maximum.
    #[error("unit `{unit}` has invalid levels: default {default_level}, max {max_level}")]
    InvalidLevels {
        /// Unit with the invalid range.
        unit: UnitId,
        /// Declared default level.
        default_level: u32,
        /// Declared maximum level.
        max_level: u32,
    },
}

#[derive(Debug, Deserialize)]
struct Manifest {
    version: u32,
    #[serde(default)]
    units: Vec<UnitEntry>,
    #[serde(default)]
    mods: Vec<ModEntry>,
}

#[derive(Debug, Deserialize)]
struct UnitEntry {
    id: UnitId,
    name: String,
    default_level: u32,
    max_level: u32,
    #[serde(default)]
    mods: Vec<ModId>,
    stats: UnitStats,
    #[serde(default)]
    per_level: UnitStats,
}

#[derive(Debug, Deserialize)]
struct ModEntry {
    id: ModId,
    name: String,
    #[serde(default)]
    own: StatModifier,
    #[serde(default)]
    opponent: StatModifier,
}

/// Returns the catalog bundled with the calculator.
pub fn builtin_catalog() -> Result<Catalog, CatalogError> {
    parse_catalog(BUILTIN_CATALOG)
}

/// Loads a catalog manifest from disk.
pub fn load_catalog(path: impl AsRef<Path>) -> Result<Catalog, CatalogError> {
    let path = path.as_ref();
    let contents = fs::read_to_string(path).map_err(|source| CatalogError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_catalog(&contents)
}

/// Parses and validates a catalog manifest.
pub fn parse_catalog(contents: &str) -> Result<Catalog, CatalogError> {
    let manifest: Manifest = toml::from_str(contents)?;
    if manifest.version != SUPPORTED_CATALOG_VERSION {
        return Err(CatalogError::UnsupportedVersion {
            found: manifest.version,
            expected: SUPPORTED_CATALOG_VERSION,
        });
    }

    let mut mod_ids = BTreeSet::new();
    for entry in &manifest.mods {
        if !mod_ids.insert(entry.id.clone()) {
            return Err(CatalogError::DuplicateMod(entry.id.clone()));
        }
    }

    let mut unit_ids = BTreeSet::new();
    let mut units = Vec::with_capacity(manifest.units.len());
    for entry in manifest.units {
        if !unit_ids.insert(entry.id.clone()) {
            return Err(CatalogError::DuplicateUnit(entry.id));
        }
        if let Some(modifier) = entry.mods.iter().find(|id| !mod_ids.contains(*id)) {
            return Err(CatalogError::UnknownEligibleMod {
                unit: entry.id.clone(),
                modifier: modifier.clone(),
            });
        }
        units.push(unit_definition(entry)?);
    }

    let modifiers = manifest.mods.into_iter().map(|entry| ModifierDefinition {
        id: entry.id,
        name: entry.name,
        own: entry.own,
        opponent: entry.opponent,
    });

    Ok(Catalog::new(units, modifiers))
}

fn unit_definition(entry: UnitEntry) -> Result<UnitDefinition, CatalogError> {
    let levels = Level::new(entry.default_level)
        .zip(Level::new(entry.max_level))
        .filter(|(default_level, max_level)| default_level <= max_level);
    let Some((default_level, max_level)) = levels else {
        return Err(CatalogError::InvalidLevels {
            unit: entry.id,
            default_level: entry.default_level,
            max_level: entry.max_level,
        });
    };

    Ok(UnitDefinition {
        id: entry.id,
        name: entry.name,
        default_level,
        max_level,
        stats: entry.stats,
        per_level: entry.per_level,
        mods: entry.mods,
    })
}
