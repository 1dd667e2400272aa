//! Catalog sources: where the listing collection comes from.
//!
//! Every source validates records at this boundary (`Listing::from_raw`) and
//! drops the ones that cannot be identified, so the filter only ever sees
//! well-formed listings.

use std::time::Duration;

use serde_json::Value;
use tracing::{debug, warn};

use crate::domain::listing::{Listing, RawListing};
use crate::errors::ServerError;

pub trait CatalogSource {
    /// The full catalog, in source order.
    fn listings(&self) -> Result<Vec<Listing>, ServerError>;

    fn find(&self, id: i64) -> Result<Option<Listing>, ServerError> {
        Ok(self.listings()?.into_iter().find(|l| l.id == id))
    }
}

/// Validate raw records, skipping (and logging) the ones without id or name.
pub fn listings_from_raw<I>(raws: I) -> Vec<Listing>
where
    I: IntoIterator<Item = RawListing>,
{
    raws.into_iter()
        .filter_map(|raw| match Listing::from_raw(&raw) {
            Ok(listing) => Some(listing),
            Err(reason) => {
                warn!(id = raw.id, "skipping catalog record: {reason}");
                None
            }
        })
        .collect()
}

/// A fixed, in-memory catalog.
#[derive(Debug, Clone, Default)]
pub struct StaticCatalog {
    listings: Vec<Listing>,
}

impl StaticCatalog {
    pub fn new(listings: Vec<Listing>) -> Self {
        Self { listings }
    }

    pub fn from_json(body: &str) -> Result<Self, ServerError> {
        let value: Value = serde_json::from_str(body)
            .map_err(|e| ServerError::CatalogError(format!("catalog is not JSON: {e}")))?;
        Ok(Self::new(parse_catalog(value)?))
    }

    pub fn from_file(path: &str) -> Result<Self, ServerError> {
        let body = std::fs::read_to_string(path)
            .map_err(|e| ServerError::CatalogError(format!("read catalog file {path}: {e}")))?;
        let catalog = Self::from_json(&body)?;
        debug!(path, count = catalog.listings.len(), "static catalog loaded");
        Ok(catalog)
    }
}

impl CatalogSource for StaticCatalog {
    fn listings(&self) -> Result<Vec<Listing>, ServerError> {
        Ok(self.listings.clone())
    }
}

/// Accepts a bare JSON array, or an object wrapping it under `results` or `data`.
pub fn parse_catalog(body: Value) -> Result<Vec<Listing>, ServerError> {
    let items = match body {
        Value::Array(items) => items,
        Value::Object(mut map) => match map.remove("results").or_else(|| map.remove("data")) {
            Some(Value::Array(items)) => items,
            _ => {
                return Err(ServerError::CatalogError(
                    "catalog object has no results array".into(),
                ))
            }
        },
        _ => {
            return Err(ServerError::CatalogError(
                "catalog must be a JSON array".into(),
            ))
        }
    };

    let raws = items
        .into_iter()
        .filter_map(|item| match serde_json::from_value::<RawListing>(item) {
            Ok(raw) => Some(raw),
            Err(e) => {
                warn!("skipping unreadable catalog record: {e}");
                None
            }
        });

    Ok(listings_from_raw(raws))
}

/// Blocking GET against a backend listings endpoint.
pub struct HttpCatalog {
    url: String,
    client: reqwest::blocking::Client,
}

impl HttpCatalog {
    pub fn new(url: impl Into<String>) -> Result<Self, ServerError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(10))
            .build()
            .map_err(|e| ServerError::CatalogError(format!("http client: {e}")))?;
        Ok(Self {
            url: url.into(),
            client,
        })
    }
}

impl CatalogSource for HttpCatalog {
    fn listings(&self) -> Result<Vec<Listing>, ServerError> {
        let body: Value = self
            .client
            .get(&self.url)
            .header("Accept", "application/json")
            .send()
            .and_then(|resp| resp.error_for_status())
            .and_then(|resp| resp.json())
            .map_err(|e| ServerError::CatalogError(format!("GET {} failed: {e}", self.url)))?;

        let listings = parse_catalog(body)?;
        debug!(url = %self.url, count = listings.len(), "fetched remote catalog");
        Ok(listings)
    }
}
