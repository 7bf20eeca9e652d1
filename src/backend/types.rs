use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::models::{Location, PropertyRecord, PropertySummary};

/// One page of a listing query, 1-based
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: u32,
    pub per_page: u32,
}

/// One page of listing results after ingress coercion
#[derive(Debug, Clone)]
pub struct ListingPage {
    pub items: Vec<PropertySummary>,
    pub page: u32,
    pub total_count: u64,
    pub has_more: bool,
}

/// Envelope the hosted list endpoint responds with. Everything is defaulted
/// so schema drift degrades to an empty page instead of a decode failure.
#[derive(Debug, Deserialize)]
pub struct RawListingResponse {
    #[serde(default)]
    pub items: Vec<serde_json::Value>,
    #[serde(default)]
    pub total: u64,
    #[serde(default)]
    pub has_more: Option<bool>,
}

/// Loosely-typed property row as the hosted backend returns it.
/// Coercion into the domain models happens here and nowhere else.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct RawPropertyRow {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub area: Option<String>,
    #[serde(default)]
    pub latitude: Option<f64>,
    #[serde(default)]
    pub longitude: Option<f64>,
    #[serde(default)]
    pub price: Option<i64>,
    #[serde(default)]
    pub bedrooms: Option<u32>,
    #[serde(default)]
    pub bathrooms: Option<u32>,
    #[serde(default)]
    pub sqm: Option<i32>,
    #[serde(default)]
    pub finishing: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub thumbnail: Option<String>,
    #[serde(default)]
    pub monthly_fee: Option<i64>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub amenities: Vec<String>,
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub listed_at: Option<DateTime<Utc>>,
}

impl RawPropertyRow {
    fn location(&self) -> Location {
        Location {
            city: self.city.clone().unwrap_or_default(),
            area: self.area.clone(),
            latitude: self.latitude,
            longitude: self.longitude,
        }
    }

    /// Coerce into a listing summary. Rows without an identifier are
    /// unusable downstream and are dropped.
    pub fn into_summary(self) -> Option<PropertySummary> {
        let id = self.id.clone()?;
        Some(PropertySummary {
            location: self.location(),
            id,
            address: self.address.unwrap_or_default(),
            price: self.price.unwrap_or(0),
            bedrooms: self.bedrooms.unwrap_or(0),
            bathrooms: self.bathrooms.unwrap_or(0),
            sqm: self.sqm.unwrap_or(0),
            finishing: self.finishing,
            tags: self.tags,
            thumbnail: self.thumbnail,
            listed_at: self.listed_at.unwrap_or_else(Utc::now),
        })
    }

    /// Coerce into a full record, keeping the raw payload alongside the
    /// typed view. Rows without an identifier are dropped.
    pub fn into_record(self, raw: serde_json::Value) -> Option<PropertyRecord> {
        let id = self.id.clone()?;
        Some(PropertyRecord {
            location: self.location(),
            id,
            address: self.address.unwrap_or_default(),
            price: self.price.unwrap_or(0),
            bedrooms: self.bedrooms.unwrap_or(0),
            bathrooms: self.bathrooms.unwrap_or(0),
            sqm: self.sqm.unwrap_or(0),
            finishing: self.finishing,
            monthly_fee: self.monthly_fee,
            description: self.description.unwrap_or_default(),
            amenities: self.amenities,
            images: self.images,
            url: self.url.unwrap_or_default(),
            fetched_at: Utc::now(),
            raw,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn row_without_id_is_dropped() {
        let row: RawPropertyRow =
            serde_json::from_value(json!({"address": "12 Nile St"})).unwrap();
        assert!(row.into_summary().is_none());
    }

    #[test]
    fn missing_fields_coerce_to_defaults() {
        let row: RawPropertyRow = serde_json::from_value(json!({"id": "p-1"})).unwrap();
        let summary = row.into_summary().unwrap();
        assert_eq!(summary.id, "p-1");
        assert_eq!(summary.price, 0);
        assert_eq!(summary.location.city, "");
        assert!(summary.tags.is_empty());
    }

    #[test]
    fn unknown_fields_do_not_break_decoding() {
        let value = json!({
            "id": "p-2",
            "price": 2_400_000,
            "bedrooms": 3,
            "broker_ref": {"internal": true}
        });
        let row: RawPropertyRow = serde_json::from_value(value.clone()).unwrap();
        let record = row.into_record(value.clone()).unwrap();
        assert_eq!(record.price, 2_400_000);
        assert_eq!(record.bedrooms, 3);
        assert_eq!(record.raw, value);
    }
}
