//! Static lookup tables that prompts are composed from
//!
//! The catalog holds three matrices: attire templates keyed by category and
//! presentation, background phrases keyed by category, and the color
//! allow-list. A catalog either comes from the built-in tables or from a TOML
//! file with the same shape.

mod builtin;

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;
use thiserror::Error;

use crate::error::{AppError, Result};

/// Presentation key used when the requested one has no templates
pub const FALLBACK_PRESENTATION: &str = "unisex";

/// Placeholder replaced by the color name in attire templates
pub const COLOR_TOKEN: &str = "{color}";

/// Failed lookup in one of the catalog matrices
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LookupError {
    #[error("Unknown attire category '{0}'")]
    UnknownAttire(String),

    #[error("No attire options for '{category}' with presentation '{presentation}'")]
    NoTemplates {
        category: String,
        presentation: String,
    },

    #[error("Unknown background category '{0}'")]
    UnknownBackground(String),

    #[error("Unknown photo type '{0}'")]
    UnknownPhotoType(String),
}

/// Attire category -> presentation key -> phrase templates
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(transparent)]
pub struct AttireMatrix(BTreeMap<String, BTreeMap<String, Vec<String>>>);

impl AttireMatrix {
    /// Templates for a category, resolving the presentation key with the
    /// `unisex` fallback. Keys are matched case-insensitively.
    pub fn templates(&self, category: &str, presentation: &str) -> std::result::Result<&[String], LookupError> {
        let by_presentation = self
            .0
            .get(category)
            .ok_or_else(|| LookupError::UnknownAttire(category.to_string()))?;

        let key = presentation.trim().to_lowercase();
        [key.as_str(), FALLBACK_PRESENTATION]
            .iter()
            .filter_map(|k| by_presentation.get(*k))
            .find(|templates| !templates.is_empty())
            .map(|templates| templates.as_slice())
            .ok_or_else(|| LookupError::NoTemplates {
                category: category.to_string(),
                presentation: presentation.to_string(),
            })
    }

    pub fn categories(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn contains(&self, category: &str) -> bool {
        self.0.contains_key(category)
    }

    fn validate(&self) -> Result<()> {
        if self.0.is_empty() {
            return Err(invalid_catalog("catalog defines no attire categories"));
        }
        for (category, by_presentation) in &self.0 {
            let usable = by_presentation
                .values()
                .any(|templates| !templates.is_empty());
            if !usable {
                return Err(invalid_catalog(format!(
                    "attire category '{}' has no templates",
                    category
                )));
            }
            for (presentation, templates) in by_presentation {
                if templates.iter().any(|t| t.trim().is_empty()) {
                    return Err(invalid_catalog(format!(
                        "attire category '{}' has an empty template for '{}'",
                        category, presentation
                    )));
                }
            }
        }
        Ok(())
    }
}

/// Background category -> literal phrases
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(transparent)]
pub struct BackgroundMatrix(BTreeMap<String, Vec<String>>);

impl BackgroundMatrix {
    pub fn phrases(&self, category: &str) -> std::result::Result<&[String], LookupError> {
        self.0
            .get(category)
            .filter(|phrases| !phrases.is_empty())
            .map(|phrases| phrases.as_slice())
            .ok_or_else(|| LookupError::UnknownBackground(category.to_string()))
    }

    pub fn categories(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    fn validate(&self) -> Result<()> {
        if self.0.is_empty() {
            return Err(invalid_catalog("catalog defines no backgrounds"));
        }
        for (category, phrases) in &self.0 {
            if phrases.is_empty() || phrases.iter().any(|p| p.trim().is_empty()) {
                return Err(invalid_catalog(format!(
                    "background '{}' needs at least one non-empty phrase",
                    category
                )));
            }
        }
        Ok(())
    }
}

/// Color name -> hex value. Only the name ever reaches a prompt.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(transparent)]
pub struct ColorTable(BTreeMap<String, String>);

impl ColorTable {
    pub fn hex(&self, name: &str) -> Option<&str> {
        self.0.get(name).map(String::as_str)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.0.contains_key(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(n, h)| (n.as_str(), h.as_str()))
    }
}

/// Choices offered to clients for one photo type
#[derive(Debug, Clone, Serialize)]
pub struct PhotoOptions {
    pub photo_type: String,
    pub attire: Vec<String>,
    pub backgrounds: Vec<String>,
    pub colors: Vec<ColorOption>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ColorOption {
    pub name: String,
    pub hex: String,
}

/// All lookup tables
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Catalog {
    pub attire: AttireMatrix,
    pub backgrounds: BackgroundMatrix,
    pub colors: ColorTable,
    /// Photo type -> attire categories offered for it
    #[serde(default)]
    pub photo_types: BTreeMap<String, Vec<String>>,
}

impl Catalog {
    /// The tables compiled into the binary
    pub fn builtin() -> Self {
        let attire = builtin::ATTIRE
            .iter()
            .map(|(category, by_presentation)| {
                let inner = by_presentation
                    .iter()
                    .map(|(key, templates)| {
                        (key.to_string(), templates.iter().map(|t| t.to_string()).collect())
                    })
                    .collect();
                (category.to_string(), inner)
            })
            .collect();

        let backgrounds = builtin::BACKGROUNDS
            .iter()
            .map(|(category, phrases)| {
                (category.to_string(), phrases.iter().map(|p| p.to_string()).collect())
            })
            .collect();

        let colors = builtin::COLORS
            .iter()
            .map(|(name, hex)| (name.to_string(), hex.to_string()))
            .collect();

        let photo_types = builtin::PHOTO_TYPES
            .iter()
            .map(|(key, categories)| {
                (key.to_string(), categories.iter().map(|c| c.to_string()).collect())
            })
            .collect();

        Self {
            attire: AttireMatrix(attire),
            backgrounds: BackgroundMatrix(backgrounds),
            colors: ColorTable(colors),
            photo_types,
        }
    }

    /// Parse and validate a catalog from TOML text
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let mut catalog: Catalog = toml::from_str(text)
            .map_err(|e| invalid_catalog(format!("failed to parse catalog: {}", e)))?;
        catalog.photo_types = normalize_photo_types(catalog.photo_types)?;
        catalog.validate()?;
        Ok(catalog)
    }

    /// Load a catalog file, or the built-in tables when no path is given
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => {
                let text = std::fs::read_to_string(path)?;
                Self::from_toml_str(&text)
            }
            None => Ok(Self::builtin()),
        }
    }

    /// Check the matrix invariants
    pub fn validate(&self) -> Result<()> {
        self.attire.validate()?;
        self.backgrounds.validate()?;
        if self.colors.0.is_empty() {
            return Err(invalid_catalog("catalog defines no colors"));
        }
        for (photo_type, categories) in &self.photo_types {
            if let Some(missing) = categories.iter().find(|c| !self.attire.contains(c)) {
                return Err(invalid_catalog(format!(
                    "photo type '{}' references unknown attire '{}'",
                    photo_type, missing
                )));
            }
        }
        Ok(())
    }

    /// Options available for a photo type
    pub fn options(&self, photo_type: &str) -> std::result::Result<PhotoOptions, LookupError> {
        let key = photo_type.trim().to_lowercase();
        let attire = self
            .photo_types
            .get(&key)
            .cloned()
            .ok_or_else(|| LookupError::UnknownPhotoType(photo_type.to_string()))?;

        Ok(PhotoOptions {
            photo_type: key,
            attire,
            backgrounds: self.backgrounds.categories().map(String::from).collect(),
            colors: self
                .colors
                .iter()
                .map(|(name, hex)| ColorOption {
                    name: name.to_string(),
                    hex: hex.to_string(),
                })
                .collect(),
        })
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::builtin()
    }
}

/// Photo types are looked up lowercased, so store them that way
fn normalize_photo_types(
    photo_types: BTreeMap<String, Vec<String>>,
) -> Result<BTreeMap<String, Vec<String>>> {
    let mut normalized = BTreeMap::new();
    for (key, categories) in photo_types {
        let lowered = key.trim().to_lowercase();
        if normalized.insert(lowered.clone(), categories).is_some() {
            return Err(invalid_catalog(format!(
                "photo type '{}' is defined more than once",
                lowered
            )));
        }
    }
    Ok(normalized)
}

fn invalid_catalog(message: impl Into<String>) -> AppError {
    AppError::Config(config::ConfigError::Message(message.into()))
}
