use crate::catalog::CatalogSource;
use crate::error::CatalogError;

use models::{Coordinate, LocationCategory, SafeLocation, SafeLocationBuilder};

/// The sample catalog shipped with the dashboard.
///
/// Five entries: one police station, two hospitals, two safe spaces.
#[derive(Debug, Clone, Copy, Default)]
pub struct BuiltinCatalog;

impl CatalogSource for BuiltinCatalog {
    fn load(&self) -> Result<Vec<SafeLocation>, CatalogError> {
        let entries = [
            (
                "1",
                "Central Police Station",
                LocationCategory::Police,
                "123 Main Street, Downtown",
                "+1-555-POLICE",
                "24/7",
                (-1.283_900, 36.822_300),
            ),
            (
                "2",
                "City General Hospital",
                LocationCategory::Hospital,
                "456 Health Avenue",
                "+1-555-HOSPITAL",
                "24/7",
                (-1.300_800, 36.806_900),
            ),
            (
                "3",
                "Women's Shelter & Support Center",
                LocationCategory::SafeSpace,
                "789 Safety Street",
                "+1-555-SHELTER",
                "24/7 Hotline",
                (-1.290_300, 36.825_700),
            ),
            (
                "4",
                "Community Safety Center",
                LocationCategory::SafeSpace,
                "321 Community Lane",
                "+1-555-COMMUNITY",
                "8 AM - 10 PM",
                (-1.274_500, 36.812_100),
            ),
            (
                "5",
                "North District Hospital",
                LocationCategory::Hospital,
                "654 North Road",
                "+1-555-NORTH",
                "24/7",
                (-1.268_100, 36.804_400),
            ),
        ];

        let mut locations = Vec::with_capacity(entries.len());
        for (id, name, category, address, phone, hours, (lat, lon)) in entries {
            let location = SafeLocationBuilder::default()
                .with_id(id)
                .with_name(name)
                .with_category(category)
                .with_address(address)
                .with_phone(phone)
                .with_verified(true)
                .with_hours(hours)
                .with_coordinate(Coordinate::new(lat, lon)?)
                .build()?;
            locations.push(location);
        }

        Ok(locations)
    }
}
