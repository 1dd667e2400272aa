// src/domain/sort.rs

use crate::domain::listing::{Coordinates, Listing};
use std::cmp::Ordering;

const EARTH_RADIUS_KM: f64 = 6371.0;

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub enum SortOrder {
    /// Catalog order, untouched.
    #[default]
    Listed,
    PriceLowToHigh,
    PriceHighToLow,
    /// Highest rated first.
    Rating,
    /// Nearest to the given point first.
    Distance(Coordinates),
}

impl SortOrder {
    /// Reads `sort` (plus `lat`/`lng` for distance) from decoded query pairs.
    /// Anything unrecognised, or distance without a valid origin, is `Listed`.
    pub fn from_pairs<'a, I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let mut sort = "";
        let mut lat = None;
        let mut lng = None;

        for (key, value) in pairs {
            match key {
                "sort" => sort = value.trim(),
                "lat" => lat = value.trim().parse::<f64>().ok(),
                "lng" => lng = value.trim().parse::<f64>().ok(),
                _ => {}
            }
        }

        match sort {
            "price-low" => SortOrder::PriceLowToHigh,
            "price-high" => SortOrder::PriceHighToLow,
            "rating" => SortOrder::Rating,
            "distance" => lat
                .zip(lng)
                .and_then(|(lat, lng)| Coordinates::new(lat, lng))
                .map_or(SortOrder::Listed, SortOrder::Distance),
            _ => SortOrder::Listed,
        }
    }

    pub fn as_param(&self) -> &'static str {
        match self {
            SortOrder::Listed => "",
            SortOrder::PriceLowToHigh => "price-low",
            SortOrder::PriceHighToLow => "price-high",
            SortOrder::Rating => "rating",
            SortOrder::Distance(_) => "distance",
        }
    }
}

/// Great-circle distance in kilometres (haversine).
pub fn distance_km(from: Coordinates, to: Coordinates) -> f64 {
    let d_lat = (to.lat - from.lat).to_radians();
    let d_lng = (to.lng - from.lng).to_radians();
    let a = (d_lat / 2.0).sin().powi(2)
        + from.lat.to_radians().cos() * to.lat.to_radians().cos() * (d_lng / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());
    EARTH_RADIUS_KM * c
}

// Present values before absent ones.
fn by_present<T>(a: Option<T>, b: Option<T>, cmp: impl Fn(T, T) -> Ordering) -> Ordering {
    match (a, b) {
        (Some(x), Some(y)) => cmp(x, y),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// Stable sort; listings missing the sort key go last, ties keep input order.
pub fn sort_listings(listings: &mut [Listing], order: SortOrder) {
    match order {
        SortOrder::Listed => {}
        SortOrder::PriceLowToHigh => {
            listings.sort_by(|a, b| by_present(a.price, b.price, |x, y| x.cmp(&y)))
        }
        SortOrder::PriceHighToLow => {
            listings.sort_by(|a, b| by_present(a.price, b.price, |x, y| y.cmp(&x)))
        }
        SortOrder::Rating => {
            listings.sort_by(|a, b| by_present(a.rating, b.rating, |x, y| y.total_cmp(&x)))
        }
        SortOrder::Distance(origin) => listings.sort_by(|a, b| {
            by_present(
                a.coordinates.map(|c| distance_km(origin, c)),
                b.coordinates.map(|c| distance_km(origin, c)),
                |x, y| x.total_cmp(&y),
            )
        }),
    }
}
