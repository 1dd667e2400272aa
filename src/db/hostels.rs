// src/db/hostels.rs
use rusqlite::{params, Connection, OptionalExtension, Row};
use std::collections::BTreeSet;

use crate::catalog::{listings_from_raw, CatalogSource};
use crate::db::connection::Database;
use crate::domain::listing::{Listing, RawListing};
use crate::errors::ServerError;

const SELECT_HOSTEL: &str = r#"
    select id, name, location, description, price, rating, amenities, room_type,
           verified, latitude, longitude,
           (select count(*) from reviews r where r.hostel_id = hostels.id)
    from hostels
"#;

fn raw_from_row(row: &Row<'_>) -> rusqlite::Result<RawListing> {
    let amenities: Option<String> = row.get(6)?;
    let review_count: i64 = row.get(11)?;
    Ok(RawListing {
        id: Some(row.get(0)?),
        name: row.get(1)?,
        location: row.get(2)?,
        description: row.get(3)?,
        price: row.get(4)?,
        rating: row.get(5)?,
        amenities: amenities.and_then(|json| serde_json::from_str(&json).ok()),
        room_type: row.get(7)?,
        verified: Some(row.get(8)?),
        latitude: row.get(9)?,
        longitude: row.get(10)?,
        total_reviews: Some(review_count),
        coordinates: None,
    })
}

fn query_listings(
    conn: &Connection,
    sql: &str,
    params: impl rusqlite::Params,
) -> Result<Vec<Listing>, ServerError> {
    let mut stmt = conn
        .prepare(sql)
        .map_err(|e| ServerError::DbError(format!("prepare hostels query failed: {e}")))?;

    let rows = stmt
        .query_map(params, raw_from_row)
        .map_err(|e| ServerError::DbError(format!("query hostels failed: {e}")))?;

    let mut raws = Vec::new();
    for r in rows {
        raws.push(r.map_err(|e| ServerError::DbError(format!("read hostel row failed: {e}")))?);
    }
    Ok(listings_from_raw(raws))
}

pub fn all_listings(conn: &Connection) -> Result<Vec<Listing>, ServerError> {
    query_listings(conn, &format!("{SELECT_HOSTEL} order by id"), params![])
}

pub fn owner_listings(conn: &Connection, owner_id: i64) -> Result<Vec<Listing>, ServerError> {
    query_listings(
        conn,
        &format!("{SELECT_HOSTEL} where owner_id = ? order by id"),
        params![owner_id],
    )
}

pub struct NewHostel {
    pub name: String,
    pub location: String,
    pub description: Option<String>,
    pub price: i64,
    pub room_type: String,
    pub amenities: Vec<String>,
}

impl NewHostel {
    /// Parse the owner's "add hostel" form. Amenities come comma-separated.
    pub fn from_form(
        name: &str,
        location: &str,
        description: &str,
        price: &str,
        room_type: &str,
        amenities: &str,
    ) -> Result<Self, ServerError> {
        let name = name.trim();
        let location = location.trim();
        if name.is_empty() || location.is_empty() {
            return Err(ServerError::BadRequest("name and location are required".into()));
        }
        let price: i64 = price
            .trim()
            .parse()
            .ok()
            .filter(|p| *p >= 0)
            .ok_or_else(|| ServerError::BadRequest("price must be a non-negative number".into()))?;

        let mut labels: Vec<String> = amenities
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect();
        let mut seen = BTreeSet::new();
        labels.retain(|label| seen.insert(label.clone()));

        Ok(Self {
            name: name.to_string(),
            location: location.to_string(),
            description: Some(description.trim().to_string()).filter(|d| !d.is_empty()),
            price,
            room_type: room_type.trim().to_string(),
            amenities: labels,
        })
    }
}

pub fn insert_hostel(
    conn: &Connection,
    owner_id: i64,
    hostel: &NewHostel,
    now: i64,
) -> Result<i64, ServerError> {
    let amenities = serde_json::to_string(&hostel.amenities)
        .map_err(|e| ServerError::DbError(format!("encode amenities failed: {e}")))?;
    let room_type = Some(hostel.room_type.as_str()).filter(|s| !s.is_empty());

    conn.execute(
        r#"
        insert into hostels (owner_id, name, location, description, price, amenities, room_type, created_at)
        values (?, ?, ?, ?, ?, ?, ?, ?)
        "#,
        params![
            owner_id,
            hostel.name,
            hostel.location,
            hostel.description,
            hostel.price,
            amenities,
            room_type,
            now
        ],
    )
    .map_err(|e| ServerError::DbError(format!("insert hostel failed: {e}")))?;

    Ok(conn.last_insert_rowid())
}

pub fn owner_of(conn: &Connection, hostel_id: i64) -> Result<Option<i64>, ServerError> {
    conn.query_row(
        "select owner_id from hostels where id = ?",
        params![hostel_id],
        |r| r.get::<_, Option<i64>>(0),
    )
    .optional()
    .map(Option::flatten)
    .map_err(|e| ServerError::DbError(format!("select hostel owner failed: {e}")))
}

/// Store the average of the hostel's reviews as its rating. No-op for remote listings.
pub fn refresh_rating(conn: &Connection, hostel_id: i64) -> Result<(), ServerError> {
    conn.execute(
        r#"
        update hostels
        set rating = (select avg(rating) from reviews where hostel_id = ?1)
        where id = ?1
          and exists (select 1 from reviews where hostel_id = ?1)
        "#,
        params![hostel_id],
    )
    .map_err(|e| ServerError::DbError(format!("update hostel rating failed: {e}")))?;
    Ok(())
}

#[derive(Debug, Clone, PartialEq)]
pub struct OwnerHostelStats {
    pub hostel_id: i64,
    pub name: String,
    pub favorites: i64,
    pub reviews: i64,
    pub average_review: Option<f64>,
}

pub fn owner_stats(conn: &Connection, owner_id: i64) -> Result<Vec<OwnerHostelStats>, ServerError> {
    let mut stmt = conn
        .prepare(
            r#"
            select h.id, h.name,
                   (select count(*) from favorites f where f.hostel_id = h.id),
                   (select count(*) from reviews r where r.hostel_id = h.id),
                   (select avg(r.rating) from reviews r where r.hostel_id = h.id)
            from hostels h
            where h.owner_id = ?
            order by h.id
            "#,
        )
        .map_err(|e| ServerError::DbError(format!("prepare owner stats failed: {e}")))?;

    let rows = stmt
        .query_map(params![owner_id], |r| {
            Ok(OwnerHostelStats {
                hostel_id: r.get(0)?,
                name: r.get(1)?,
                favorites: r.get(2)?,
                reviews: r.get(3)?,
                average_review: r.get(4)?,
            })
        })
        .map_err(|e| ServerError::DbError(format!("query owner stats failed: {e}")))?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r.map_err(|e| ServerError::DbError(e.to_string()))?);
    }
    Ok(out)
}

/// The local `hostels` table as a catalog.
#[derive(Clone)]
pub struct DbCatalog {
    db: Database,
}

impl DbCatalog {
    pub fn new(db: Database) -> Self {
        Self { db }
    }
}

impl CatalogSource for DbCatalog {
    fn listings(&self) -> Result<Vec<Listing>, ServerError> {
        self.db.with_conn(|conn| all_listings(conn))
    }

    fn find(&self, id: i64) -> Result<Option<Listing>, ServerError> {
        self.db.with_conn(|conn| {
            let mut found = query_listings(conn, &format!("{SELECT_HOSTEL} where id = ?"), params![id])?;
            Ok(found.pop())
        })
    }
}
