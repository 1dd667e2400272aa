// src/domain/filter.rs

use crate::domain::listing::{Coordinates, Listing};
use crate::domain::sort::distance_km;
use std::collections::BTreeSet;

/// Listings within `km` of `origin`, boundary included.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Radius {
    pub origin: Coordinates,
    pub km: f64,
}

/// A bundle of optional predicates used to narrow a listing collection.
/// `FilterCriteria::default()` imposes no constraint at all.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterCriteria {
    /// Case-insensitive substring of the listing location. Empty = any.
    pub location: String,
    /// Inclusive.
    pub min_price: Option<i64>,
    /// Inclusive.
    pub max_price: Option<i64>,
    /// Exact room type label.
    pub room_type: Option<String>,
    /// Every label must be present on the listing.
    pub amenities: BTreeSet<String>,
    /// Inclusive. 0 means any rating, including none.
    pub min_rating: f64,
    /// Case-insensitive substring of name, location or description. Empty = any.
    pub query: String,
    pub verified_only: bool,
    /// Listings without coordinates never match.
    pub within: Option<Radius>,
}

impl FilterCriteria {
    /// Builds criteria from decoded query-string pairs.
    ///
    /// Blank or unparseable numbers are treated as unset; repeated `amenity`
    /// keys accumulate.
    pub fn from_pairs<'a, I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let mut criteria = FilterCriteria::default();
        let (mut lat, mut lng, mut radius) = (None, None, None);

        for (key, value) in pairs {
            let value = value.trim();
            match key {
                "location" => criteria.location = value.to_string(),
                "q" => criteria.query = value.to_string(),
                "min_price" => criteria.min_price = value.parse().ok(),
                "max_price" => criteria.max_price = value.parse().ok(),
                "room_type" => {
                    criteria.room_type = Some(value.to_string()).filter(|s| !s.is_empty())
                }
                "amenity" if !value.is_empty() => {
                    criteria.amenities.insert(value.to_string());
                }
                "min_rating" => {
                    criteria.min_rating = value
                        .parse::<f64>()
                        .ok()
                        .filter(|r| r.is_finite() && *r > 0.0)
                        .unwrap_or(0.0)
                }
                "verified" => criteria.verified_only = matches!(value, "1" | "true" | "on"),
                "lat" => lat = value.parse::<f64>().ok(),
                "lng" => lng = value.parse::<f64>().ok(),
                "radius" => radius = value.parse::<f64>().ok().filter(|r| r.is_finite() && *r > 0.0),
                _ => {}
            }
        }

        // All three or nothing.
        criteria.within = lat
            .zip(lng)
            .and_then(|(lat, lng)| Coordinates::new(lat, lng))
            .zip(radius)
            .map(|(origin, km)| Radius { origin, km });

        criteria
    }

    /// True iff every specified predicate holds for `listing`.
    pub fn matches(&self, listing: &Listing) -> bool {
        self.matches_location(listing)
            && self.matches_price(listing)
            && self.matches_room_type(listing)
            && self.matches_amenities(listing)
            && self.matches_rating(listing)
            && self.matches_query(listing)
            && (!self.verified_only || listing.verified)
            && self.matches_radius(listing)
    }

    fn matches_location(&self, listing: &Listing) -> bool {
        if self.location.is_empty() {
            return true;
        }
        listing
            .location
            .as_deref()
            .map_or(false, |loc| contains_ignore_case(loc, &self.location))
    }

    fn matches_price(&self, listing: &Listing) -> bool {
        if self.min_price.is_none() && self.max_price.is_none() {
            return true;
        }
        let Some(price) = listing.price else {
            return false;
        };
        self.min_price.map_or(true, |min| price >= min)
            && self.max_price.map_or(true, |max| price <= max)
    }

    fn matches_room_type(&self, listing: &Listing) -> bool {
        match self.room_type.as_deref() {
            None | Some("") => true,
            Some(wanted) => listing.room_type.as_deref() == Some(wanted),
        }
    }

    fn matches_amenities(&self, listing: &Listing) -> bool {
        self.amenities.iter().all(|label| listing.has_amenity(label))
    }

    fn matches_radius(&self, listing: &Listing) -> bool {
        let Some(Radius { origin, km }) = self.within else {
            return true;
        };
        listing
            .coordinates
            .map_or(false, |at| distance_km(origin, at) <= km)
    }

    fn matches_rating(&self, listing: &Listing) -> bool {
        if self.min_rating <= 0.0 {
            return true;
        }
        listing.rating.map_or(false, |r| r >= self.min_rating)
    }

    fn matches_query(&self, listing: &Listing) -> bool {
        if self.query.is_empty() {
            return true;
        }
        [
            Some(listing.name.as_str()),
            listing.location.as_deref(),
            listing.description.as_deref(),
        ]
        .into_iter()
        .flatten()
        .any(|field| contains_ignore_case(field, &self.query))
    }
}

fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

/// Stable filter: the result keeps the relative order of `listings`.
pub fn apply_filters(listings: &[Listing], criteria: &FilterCriteria) -> Vec<Listing> {
    listings
        .iter()
        .filter(|listing| criteria.matches(listing))
        .cloned()
        .collect()
}
