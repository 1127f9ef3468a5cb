//! In-memory country store
//!
//! Owns the country collection and the favorites list behind a single
//! `RwLock` boundary: mutations serialize on the write lock, reads run
//! concurrently and never observe a partially updated record. Handlers
//! receive cloned records, never references into the store.

mod country;
mod dataset;

pub use country::{coordinate_from_value, Country, Finance, TimezoneEntry};
pub use dataset::{load_from, DatasetError};

use thiserror::Error;
use tokio::sync::RwLock;

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum StoreError {
    #[error("Country not found")]
    NotFound,
}

/// Whether `insert_or_update` created a new record or overwrote an existing one
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpsertOutcome {
    Created,
    Updated,
}

/// Exactly one of region or subregion; the zero-or-both case is rejected
/// before this type is ever constructed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegionFilter {
    Region(String),
    Subregion(String),
}

/// Inclusive latitude/longitude range filter
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub lat_min: f64,
    pub lat_max: f64,
    pub lon_min: f64,
    pub lon_max: f64,
}

impl BoundingBox {
    pub fn contains(&self, latitude: f64, longitude: f64) -> bool {
        latitude >= self.lat_min
            && latitude <= self.lat_max
            && longitude >= self.lon_min
            && longitude <= self.lon_max
    }
}

struct Inner {
    countries: Vec<Country>,
    favorites: Vec<Country>,
}

pub struct CountryStore {
    inner: RwLock<Inner>,
}

impl CountryStore {
    /// Wrap an already-validated, name-sorted collection (see `dataset::load_from`).
    pub fn new(countries: Vec<Country>) -> Self {
        Self {
            inner: RwLock::new(Inner {
                countries,
                favorites: Vec::new(),
            }),
        }
    }

    /// Case-insensitive exact name lookup
    pub async fn find_by_name(&self, name: &str) -> Option<Country> {
        let needle = name.to_lowercase();
        let inner = self.inner.read().await;
        inner
            .countries
            .iter()
            .find(|c| c.name.to_lowercase() == needle)
            .cloned()
    }

    /// Case-insensitive equality filter on region or subregion
    pub async fn filter_by_region(&self, filter: &RegionFilter) -> Vec<Country> {
        let inner = self.inner.read().await;
        match filter {
            RegionFilter::Region(region) => {
                let needle = region.to_lowercase();
                inner
                    .countries
                    .iter()
                    .filter(|c| c.region.to_lowercase() == needle)
                    .cloned()
                    .collect()
            }
            RegionFilter::Subregion(subregion) => {
                let needle = subregion.to_lowercase();
                inner
                    .countries
                    .iter()
                    .filter(|c| c.subregion.to_lowercase() == needle)
                    .cloned()
                    .collect()
            }
        }
    }

    /// Inclusive range filter on both coordinates
    pub async fn filter_by_bounding_box(&self, bounds: BoundingBox) -> Vec<Country> {
        let inner = self.inner.read().await;
        inner
            .countries
            .iter()
            .filter(|c| bounds.contains(c.latitude, c.longitude))
            .cloned()
            .collect()
    }

    /// Create the record, or overwrite all mutable fields of the existing
    /// record with the same case-insensitive name. Either way the collection
    /// is re-sorted by name afterwards. An existing review survives updates.
    pub async fn insert_or_update(&self, record: Country) -> UpsertOutcome {
        let mut inner = self.inner.write().await;
        let needle = record.name.to_lowercase();

        let outcome = match inner
            .countries
            .iter_mut()
            .find(|c| c.name.to_lowercase() == needle)
        {
            Some(existing) => {
                existing.capital = record.capital;
                existing.region = record.region;
                existing.subregion = record.subregion;
                existing.nationality = record.nationality;
                existing.latitude = record.latitude;
                existing.longitude = record.longitude;
                existing.finance = record.finance;
                existing.timezones = record.timezones;
                UpsertOutcome::Updated
            }
            None => {
                inner.countries.push(record);
                UpsertOutcome::Created
            }
        };

        inner.countries.sort_by(|a, b| a.name.cmp(&b.name));
        outcome
    }

    /// Set or overwrite the review of an existing country
    pub async fn set_review(&self, name: &str, review: &str) -> Result<(), StoreError> {
        let needle = name.to_lowercase();
        let mut inner = self.inner.write().await;
        let country = inner
            .countries
            .iter_mut()
            .find(|c| c.name.to_lowercase() == needle)
            .ok_or(StoreError::NotFound)?;
        country.review = Some(review.to_string());
        Ok(())
    }

    /// Append a copy of an existing country to the favorites list.
    /// Favorites are never deduplicated.
    pub async fn add_favorite(&self, name: &str) -> Result<Country, StoreError> {
        let needle = name.to_lowercase();
        let mut inner = self.inner.write().await;
        let country = inner
            .countries
            .iter()
            .find(|c| c.name.to_lowercase() == needle)
            .cloned()
            .ok_or(StoreError::NotFound)?;
        inner.favorites.push(country.clone());
        Ok(country)
    }

    pub async fn list_all(&self) -> Vec<Country> {
        self.inner.read().await.countries.clone()
    }

    pub async fn list_favorites(&self) -> Vec<Country> {
        self.inner.read().await.favorites.clone()
    }
}
