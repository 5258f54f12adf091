pub mod builder;

use crate::{Coordinate, ErrorLocation, ModelError};

use std::fmt::{Display, Formatter, Result as FormatResult};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Kind of place a person can head to for help.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LocationCategory {
    Police,
    Hospital,
    SafeSpace,
}

impl LocationCategory {
    /// Every category, in the order the dashboard lists them.
    pub const ALL: [LocationCategory; 3] = [
        LocationCategory::Police,
        LocationCategory::Hospital,
        LocationCategory::SafeSpace,
    ];

    /// Wire/config name (`police`, `hospital`, `safe_space`).
    pub fn as_str(&self) -> &'static str {
        match self {
            LocationCategory::Police => "police",
            LocationCategory::Hospital => "hospital",
            LocationCategory::SafeSpace => "safe_space",
        }
    }

    /// Plural label used on filter controls.
    pub fn label(&self) -> &'static str {
        match self {
            LocationCategory::Police => "Police",
            LocationCategory::Hospital => "Hospitals",
            LocationCategory::SafeSpace => "Safe Spaces",
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            LocationCategory::Police => "🚓",
            LocationCategory::Hospital => "🏥",
            LocationCategory::SafeSpace => "🛡️",
        }
    }
}

impl Display for LocationCategory {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> FormatResult {
        formatter.write_str(self.as_str())
    }
}

impl FromStr for LocationCategory {
    type Err = ModelError;

    #[track_caller]
    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "police" => Ok(LocationCategory::Police),
            "hospital" | "hospitals" => Ok(LocationCategory::Hospital),
            "safe_space" | "safe-space" | "safespace" => Ok(LocationCategory::SafeSpace),
            _ => Err(ModelError::UnknownCategory {
                value: value.to_string(),
                location: ErrorLocation::caller(),
            }),
        }
    }
}

/// Parse a category filter where `all` (or an empty string) means "no filter".
#[track_caller]
pub fn parse_category_filter(value: &str) -> Result<Option<LocationCategory>, ModelError> {
    let trimmed = value.trim();
    if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("all") {
        return Ok(None);
    }

    trimmed.parse().map(Some)
}

/// A police station, hospital or designated safe space from the catalog.
///
/// Loaded once at startup and never mutated. Distance to the user is not
/// stored here; it is derived on every ranking.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SafeLocation {
    pub id: String,
    pub name: String,
    pub category: LocationCategory,
    pub address: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub verified: bool,
    #[serde(default)]
    pub hours: String,
    #[serde(default)]
    pub coordinate: Option<Coordinate>,
}

impl SafeLocation {
    /// Check the fields a deserialized entry could have left blank.
    #[track_caller]
    pub fn validate(&self) -> Result<(), ModelError> {
        if self.id.trim().is_empty() {
            return Err(ModelError::Validation {
                message: String::from("Location id cannot be empty"),
                location: ErrorLocation::caller(),
            });
        }

        if self.name.trim().is_empty() {
            return Err(ModelError::Validation {
                message: format!("Location '{}' has an empty name", self.id),
                location: ErrorLocation::caller(),
            });
        }

        if self.address.trim().is_empty() {
            return Err(ModelError::Validation {
                message: format!("Location '{}' has an empty address", self.id),
                location: ErrorLocation::caller(),
            });
        }

        if let Some(ref phone) = self.phone
            && phone.trim().is_empty()
        {
            return Err(ModelError::Validation {
                message: format!("Location '{}' has an empty phone number", self.id),
                location: ErrorLocation::caller(),
            });
        }

        Ok(())
    }
}
