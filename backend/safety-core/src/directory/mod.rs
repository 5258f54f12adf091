//! Filterable, distance-ranked directory of safe locations.
//!
//! The directory holds the catalog exactly as loaded. Distances are derived on
//! every [`rank`](SafeLocationDirectory::rank) call from whatever
//! [`PositionState`] the caller passes in; nothing about the user's position is
//! stored here, so a re-rank after a new fix can never see stale distances.

pub mod actions;

use crate::catalog::CatalogSource;
use crate::error::CatalogError;

use common::ErrorLocation;
use models::{LocationCategory, PositionState, SafeLocation};

use std::cmp::Ordering;
use std::collections::HashMap;

use log::{debug, info};

/// A safe location paired with its distance from the user, if one is known.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RankedLocation<'a> {
    pub location: &'a SafeLocation,
    /// Unrounded great-circle distance in kilometres.
    pub distance_km: Option<f64>,
}

impl RankedLocation<'_> {
    /// Distance rounded to one decimal for display, e.g. `"0.5 km"`.
    pub fn display_distance(&self) -> Option<String> {
        self.distance_km.map(format_distance)
    }
}

/// Format a distance in kilometres with one decimal place.
pub fn format_distance(distance_km: f64) -> String {
    format!("{distance_km:.1} km")
}

/// Per-category entry counts for the dashboard's quick stats.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CategoryCounts {
    pub police: usize,
    pub hospital: usize,
    pub safe_space: usize,
}

impl CategoryCounts {
    pub fn get(&self, category: LocationCategory) -> usize {
        match category {
            LocationCategory::Police => self.police,
            LocationCategory::Hospital => self.hospital,
            LocationCategory::SafeSpace => self.safe_space,
        }
    }

    pub fn total(&self) -> usize {
        self.police + self.hospital + self.safe_space
    }

    fn increment(&mut self, category: LocationCategory) {
        match category {
            LocationCategory::Police => self.police += 1,
            LocationCategory::Hospital => self.hospital += 1,
            LocationCategory::SafeSpace => self.safe_space += 1,
        }
    }
}

/// Immutable catalog of safe locations with filter and rank operations.
#[derive(Debug, Clone)]
pub struct SafeLocationDirectory {
    locations: Vec<SafeLocation>,
    /// Catalog position of each id, used to break distance ties.
    catalog_index: HashMap<String, usize>,
}

impl SafeLocationDirectory {
    /// Load the catalog from `source` and index it.
    pub fn load(source: &dyn CatalogSource) -> Result<Self, CatalogError> {
        let directory = Self::from_locations(source.load()?)?;
        info!("Safe location directory ready with {} entries", directory.len());
        Ok(directory)
    }

    /// Build a directory from already-loaded entries, rejecting duplicate ids.
    #[track_caller]
    pub fn from_locations(locations: Vec<SafeLocation>) -> Result<Self, CatalogError> {
        let mut catalog_index = HashMap::with_capacity(locations.len());

        for (index, location) in locations.iter().enumerate() {
            if catalog_index.insert(location.id.clone(), index).is_some() {
                return Err(CatalogError::DuplicateId {
                    id: location.id.clone(),
                    location: ErrorLocation::caller(),
                });
            }
        }

        Ok(Self {
            locations,
            catalog_index,
        })
    }

    /// The full catalog in insertion order.
    pub fn list_all(&self) -> &[SafeLocation] {
        &self.locations
    }

    pub fn len(&self) -> usize {
        self.locations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.locations.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&SafeLocation> {
        self.catalog_index
            .get(id)
            .and_then(|&index| self.locations.get(index))
    }

    /// Entries of `category`, or every entry when `category` is `None`.
    ///
    /// Relative catalog order is preserved.
    pub fn filter(&self, category: Option<LocationCategory>) -> Vec<&SafeLocation> {
        match category {
            None => self.locations.iter().collect(),
            Some(category) => self
                .locations
                .iter()
                .filter(|location| location.category == category)
                .collect(),
        }
    }

    /// Order `locations` by distance from `position`.
    ///
    /// With a `Known` position the result is ascending by distance; entries
    /// without a coordinate go last with no distance, and ties fall back to
    /// catalog order. With any other position the input order is returned
    /// unchanged and every distance is `None`.
    pub fn rank<'a, I>(&self, locations: I, position: &PositionState) -> Vec<RankedLocation<'a>>
    where
        I: IntoIterator<Item = &'a SafeLocation>,
    {
        let Some(origin) = position.coordinate() else {
            debug!("Position not known, returning locations unranked");
            return locations
                .into_iter()
                .map(|location| RankedLocation {
                    location,
                    distance_km: None,
                })
                .collect();
        };

        let mut ranked: Vec<RankedLocation<'a>> = locations
            .into_iter()
            .map(|location| RankedLocation {
                location,
                distance_km: location
                    .coordinate
                    .map(|coordinate| origin.distance_km(&coordinate)),
            })
            .collect();

        // Stable sort: entries outside the catalog keep their input order among themselves
        ranked.sort_by(|a, b| {
            compare_distance(a.distance_km, b.distance_km)
                .then_with(|| self.catalog_position(a.location).cmp(&self.catalog_position(b.location)))
        });

        ranked
    }

    /// Filter then rank, the combination the map view shows.
    pub fn ranked(
        &self,
        category: Option<LocationCategory>,
        position: &PositionState,
    ) -> Vec<RankedLocation<'_>> {
        self.rank(self.filter(category), position)
    }

    /// Closest entry of `category` (any category when `None`), if a distance is known.
    pub fn nearest(
        &self,
        category: Option<LocationCategory>,
        position: &PositionState,
    ) -> Option<RankedLocation<'_>> {
        self.ranked(category, position)
            .into_iter()
            .next()
            .filter(|ranked| ranked.distance_km.is_some())
    }

    /// How many entries of each category lie within `radius_km`.
    ///
    /// Without a known position nothing can be excluded, so every entry counts.
    pub fn nearby_counts(&self, position: &PositionState, radius_km: f64) -> CategoryCounts {
        let mut counts = CategoryCounts::default();

        for ranked in self.rank(&self.locations, position) {
            let within = match (position.is_known(), ranked.distance_km) {
                (false, _) => true,
                (true, Some(distance)) => distance <= radius_km,
                (true, None) => false,
            };

            if within {
                counts.increment(ranked.location.category);
            }
        }

        counts
    }

    fn catalog_position(&self, location: &SafeLocation) -> usize {
        self.catalog_index
            .get(&location.id)
            .copied()
            .unwrap_or(usize::MAX)
    }
}

fn compare_distance(a: Option<f64>, b: Option<f64>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => a.total_cmp(&b),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}
