use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Location information for a property
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Location {
    pub city: String,
    pub area: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

/// Listing-card view of a property, as returned by the list endpoint
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PropertySummary {
    pub id: String,
    pub address: String,
    pub location: Location,
    pub price: i64,
    pub bedrooms: u32,
    pub bathrooms: u32,
    pub sqm: i32,
    pub finishing: Option<String>,
    pub tags: Vec<String>,
    pub thumbnail: Option<String>,
    pub listed_at: DateTime<Utc>,
}

/// Full property detail fetched by identifier. Immutable snapshot per fetch.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PropertyRecord {
    pub id: String,
    pub address: String,
    pub location: Location,
    pub price: i64,
    pub bedrooms: u32,
    pub bathrooms: u32,
    pub sqm: i32,
    pub finishing: Option<String>,
    pub monthly_fee: Option<i64>,
    pub description: String,
    pub amenities: Vec<String>,
    pub images: Vec<String>,
    pub url: String,
    pub fetched_at: DateTime<Utc>,
    pub raw: serde_json::Value,
}
