//! Sources of the static safe-location catalog.
//!
//! The catalog is read once at startup and handed to
//! [`SafeLocationDirectory`](crate::directory::SafeLocationDirectory); it is
//! never refreshed mid-session.

mod builtin;
mod toml_file;

pub use builtin::BuiltinCatalog;
pub use toml_file::TomlCatalog;

use crate::error::CatalogError;

use models::SafeLocation;

/// Provides the initial set of safe locations, in catalog order.
pub trait CatalogSource {
    fn load(&self) -> Result<Vec<SafeLocation>, CatalogError>;
}
