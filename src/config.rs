//! Optional TOML configuration for the category table.
//!
//! Nothing is discovered automatically: a configuration file is only read
//! when its path is passed explicitly. Without one, the built-in table is
//! used.
//!
//! # Configuration File Format
//!
//! ```toml
//! exclude = ["desktop.ini", "Thumbs.db"]
//!
//! [[categories]]
//! name = "Docs"
//! extensions = ["pdf", "txt"]
//!
//! [[categories]]
//! name = "Images"
//! extensions = ["png", "jpg"]
//! ```
//!
//! A non-empty `categories` list replaces the built-in table. Categories are
//! tried in file order, so the first one listing an extension wins.

use crate::category::{Category, CategoryTable, normalize_extension};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors that can occur while loading or validating a configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Configuration file not found at the specified path.
    #[error("Configuration file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// IO error while reading configuration.
    #[error("IO error reading configuration {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// Invalid TOML syntax or structure.
    #[error("Invalid configuration: {0}")]
    Invalid(#[from] toml::de::Error),
    /// A category has an empty name.
    #[error("Category names must not be empty")]
    EmptyCategoryName,
    /// A category name cannot be used as a folder name.
    #[error("Invalid category name '{0}': must be a single folder name")]
    InvalidCategoryName(String),
    /// Two categories share a name.
    #[error("Duplicate category '{0}'")]
    DuplicateCategory(String),
    /// A category lists no usable extension.
    #[error("Category '{0}' has no extensions")]
    NoExtensions(String),
    /// An extension contains a path separator.
    #[error("Invalid extension '{extension}' in category '{category}'")]
    InvalidExtension { category: String, extension: String },
}

/// One category as written in the configuration file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryRule {
    pub name: String,
    #[serde(default)]
    pub extensions: Vec<String>,
}

/// Configuration loaded from a TOML file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SorterConfig {
    /// Extra file names that are never moved.
    #[serde(default)]
    pub exclude: Vec<String>,

    /// Category table, in priority order. Empty means the built-in table.
    #[serde(default)]
    pub categories: Vec<CategoryRule>,
}

impl SorterConfig {
    /// Loads the configuration at `config_path`, or the defaults when `None`.
    ///
    /// # Errors
    ///
    /// Returns an error if the given file is missing, unreadable or not
    /// valid TOML.
    pub fn load(config_path: Option<&Path>) -> Result<Self, ConfigError> {
        match config_path {
            Some(path) => Self::load_from_file(path),
            None => Ok(Self::default()),
        }
    }

    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Err(ConfigError::NotFound(path.to_path_buf()));
        }

        let content = fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;

        Self::from_toml(&content)
    }

    /// Parses a configuration from TOML text.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// Builds the category table described by this configuration.
    ///
    /// Extensions shared by several categories are accepted; a warning names
    /// the category that will never receive them.
    ///
    /// # Errors
    ///
    /// Returns an error for empty, duplicate or path-like category names and
    /// for categories without a usable extension.
    pub fn to_table(&self) -> Result<CategoryTable, ConfigError> {
        if self.categories.is_empty() {
            return Ok(CategoryTable::default());
        }

        let mut table = CategoryTable::new();
        let mut seen = HashSet::new();

        for rule in &self.categories {
            let name = rule.name.trim();
            validate_category_name(name)?;
            if !seen.insert(name.to_string()) {
                return Err(ConfigError::DuplicateCategory(name.to_string()));
            }

            for ext in &rule.extensions {
                if ext.contains(['/', '\\']) {
                    return Err(ConfigError::InvalidExtension {
                        category: name.to_string(),
                        extension: ext.clone(),
                    });
                }
            }
            if !rule
                .extensions
                .iter()
                .any(|ext| normalize_extension(ext).is_some())
            {
                return Err(ConfigError::NoExtensions(name.to_string()));
            }

            table.push(Category::new(name, &rule.extensions));
        }

        for overlap in table.overlaps() {
            log::warn!(
                "Extension '{}' is listed in both '{}' and '{}'; '{}' wins",
                overlap.extension,
                overlap.winner,
                overlap.shadowed,
                overlap.winner
            );
        }

        Ok(table)
    }
}

fn validate_category_name(name: &str) -> Result<(), ConfigError> {
    if name.is_empty() {
        return Err(ConfigError::EmptyCategoryName);
    }
    if name == "." || name == ".." || name.contains(['/', '\\']) {
        return Err(ConfigError::InvalidCategoryName(name.to_string()));
    }
    Ok(())
}
