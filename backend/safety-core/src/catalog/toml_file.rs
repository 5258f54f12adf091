use crate::catalog::CatalogSource;
use crate::error::CatalogError;

use common::ErrorLocation;
use models::SafeLocation;

use std::path::{Path, PathBuf};

use log::info;
use serde::Deserialize;

/// Catalog read from a TOML file of `[[locations]]` tables.
///
/// ```toml
/// [[locations]]
/// id = "1"
/// name = "Central Police Station"
/// category = "police"
/// address = "123 Main Street, Downtown"
/// phone = "+1-555-POLICE"
/// verified = true
/// hours = "24/7"
/// coordinate = { latitude = -1.2839, longitude = 36.8223 }
/// ```
#[derive(Debug, Clone)]
pub struct TomlCatalog {
    path: PathBuf,
}

#[derive(Debug, Deserialize)]
struct CatalogFile {
    #[serde(default)]
    locations: Vec<SafeLocation>,
}

impl TomlCatalog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl CatalogSource for TomlCatalog {
    fn load(&self) -> Result<Vec<SafeLocation>, CatalogError> {
        let contents = std::fs::read_to_string(&self.path).map_err(|e| CatalogError::Read {
            location: ErrorLocation::caller(),
            path: self.path.clone(),
            source: e,
        })?;

        let file: CatalogFile = toml::from_str(&contents).map_err(|e| CatalogError::Parse {
            location: ErrorLocation::caller(),
            path: self.path.clone(),
            reason: e.to_string(),
        })?;

        for location in &file.locations {
            location.validate()?;
        }

        info!(
            "Loaded {} safe locations from {}",
            file.locations.len(),
            self.path.display()
        );

        Ok(file.locations)
    }
}
