use crate::error::model_error::ModelError;
use crate::{Coordinate, ErrorLocation, LocationCategory, SafeLocation};

/// Builder for creating validated SafeLocation instances.
///
/// Required: id, name, category, address. Everything else defaults to
/// "not provided" (no phone, unverified, empty hours, no coordinate).
#[derive(Debug, Default)]
pub struct SafeLocationBuilder {
    id: Option<String>,
    name: Option<String>,
    category: Option<LocationCategory>,
    address: Option<String>,
    phone: Option<String>,
    verified: bool,
    hours: Option<String>,
    coordinate: Option<Coordinate>,
}

impl SafeLocationBuilder {
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_category(mut self, category: LocationCategory) -> Self {
        self.category = Some(category);
        self
    }

    pub fn with_address(mut self, address: impl Into<String>) -> Self {
        self.address = Some(address.into());
        self
    }

    pub fn with_phone(mut self, phone: impl Into<String>) -> Self {
        self.phone = Some(phone.into());
        self
    }

    pub fn with_verified(mut self, verified: bool) -> Self {
        self.verified = verified;
        self
    }

    pub fn with_hours(mut self, hours: impl Into<String>) -> Self {
        self.hours = Some(hours.into());
        self
    }

    pub fn with_coordinate(mut self, coordinate: Coordinate) -> Self {
        self.coordinate = Some(coordinate);
        self
    }

    /// Build the SafeLocation with validation.
    #[track_caller]
    pub fn build(self) -> Result<SafeLocation, ModelError> {
        let id = self.id.ok_or_else(|| ModelError::Validation {
            message: String::from("Location id is required"),
            location: ErrorLocation::caller(),
        })?;

        let name = self.name.ok_or_else(|| ModelError::Validation {
            message: format!("Name is required for location '{id}'"),
            location: ErrorLocation::caller(),
        })?;

        let category = self.category.ok_or_else(|| ModelError::Validation {
            message: format!("Category is required for location '{id}'"),
            location: ErrorLocation::caller(),
        })?;

        let address = self.address.ok_or_else(|| ModelError::Validation {
            message: format!("Address is required for location '{id}'"),
            location: ErrorLocation::caller(),
        })?;

        let location = SafeLocation {
            id,
            name,
            category,
            address,
            phone: self.phone,
            verified: self.verified,
            hours: self.hours.unwrap_or_default(),
            coordinate: self.coordinate,
        };

        location.validate()?;

        Ok(location)
    }
}
