// src/domain/listing.rs

use crate::domain::lenient::{lenient, lenient_f64, lenient_i64};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

pub const MAX_RATING: f64 = 5.0;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lng: f64,
}

impl Coordinates {
    /// Latitude in [-90, 90], longitude in [-180, 180].
    pub fn new(lat: f64, lng: f64) -> Option<Self> {
        let valid = lat.is_finite()
            && lng.is_finite()
            && (-90.0..=90.0).contains(&lat)
            && (-180.0..=180.0).contains(&lng);
        valid.then_some(Self { lat, lng })
    }
}

/// A hostel record exactly as the catalog source hands it over.
/// Every field is optional; fields of the wrong JSON type are treated as absent.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawListing {
    #[serde(default, deserialize_with = "lenient_i64")]
    pub id: Option<i64>,
    #[serde(default, deserialize_with = "lenient")]
    pub name: Option<String>,
    #[serde(default, alias = "city", deserialize_with = "lenient")]
    pub location: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "lenient_i64")]
    pub price: Option<i64>,
    #[serde(default, alias = "average_rating", deserialize_with = "lenient_f64")]
    pub rating: Option<f64>,
    #[serde(default, alias = "total_reviews", deserialize_with = "lenient_i64")]
    pub total_reviews: Option<i64>,
    #[serde(default, alias = "facilities", deserialize_with = "lenient")]
    pub amenities: Option<Vec<String>>,
    #[serde(default, alias = "room_type", deserialize_with = "lenient")]
    pub room_type: Option<String>,
    #[serde(default, alias = "is_verified", deserialize_with = "lenient")]
    pub verified: Option<bool>,
    #[serde(default, deserialize_with = "lenient")]
    pub coordinates: Option<Coordinates>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub latitude: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub longitude: Option<f64>,
}

/// A validated hostel listing. Immutable once built.
///
/// `id` and `name` are always present; everything else may be missing, and a
/// missing field fails any filter predicate that needs it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Listing {
    pub id: i64,
    pub name: String,
    pub location: Option<String>,
    pub description: Option<String>,
    /// Monthly price in PKR.
    pub price: Option<i64>,
    /// 0.0 to 5.0
    pub rating: Option<f64>,
    pub total_reviews: Option<i64>,
    pub amenities: Option<BTreeSet<String>>,
    pub room_type: Option<String>,
    pub verified: bool,
    pub coordinates: Option<Coordinates>,
}

fn non_empty(s: &Option<String>) -> Option<String> {
    s.as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

impl Listing {
    /// Validates a raw record at the catalog boundary.
    /// Out-of-range values are dropped to `None`; a missing id or name rejects the record.
    pub fn from_raw(raw: &RawListing) -> Result<Self, String> {
        let id = raw.id.ok_or("Missing listing id")?;
        let name = non_empty(&raw.name).ok_or("Missing or empty listing name")?;

        let coordinates = raw.coordinates.and_then(|c| Coordinates::new(c.lat, c.lng)).or_else(
            || match (raw.latitude, raw.longitude) {
                (Some(lat), Some(lng)) => Coordinates::new(lat, lng),
                _ => None,
            },
        );

        Ok(Listing {
            id,
            name,
            location: non_empty(&raw.location),
            description: non_empty(&raw.description),
            price: raw.price.filter(|p| *p >= 0),
            rating: raw.rating.filter(|r| (0.0..=MAX_RATING).contains(r)),
            total_reviews: raw.total_reviews.filter(|n| *n >= 0),
            amenities: raw
                .amenities
                .as_ref()
                .map(|a| a.iter().map(|s| s.trim().to_string()).collect()),
            room_type: non_empty(&raw.room_type),
            verified: raw.verified.unwrap_or(false),
            coordinates,
        })
    }

    pub fn has_amenity(&self, label: &str) -> bool {
        self.amenities
            .as_ref()
            .map_or(false, |set| set.contains(label))
    }
}
