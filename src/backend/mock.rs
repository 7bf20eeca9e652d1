//! Scripted in-memory backend for tests, enabled by the trait seam.

use crate::backend::traits::PropertyBackend;
use crate::backend::types::{ListingPage, PageRequest};
use crate::filters::FilterState;
use crate::models::{Location, PropertyRecord, PropertySummary};
use anyhow::Result;
use async_trait::async_trait;
use chrono::Utc;
use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

#[derive(Default)]
pub struct MockBackend {
    pages: Mutex<VecDeque<Result<ListingPage>>>,
    records: Mutex<HashMap<String, PropertyRecord>>,
    list_calls: AtomicUsize,
}

impl MockBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue the next response of `list_properties`, served in FIFO order
    pub fn push_page(&self, items: Vec<PropertySummary>, total_count: u64, has_more: bool) {
        self.pages.lock().unwrap().push_back(Ok(ListingPage {
            page: 0,
            items,
            total_count,
            has_more,
        }));
    }

    pub fn push_failure(&self, message: &str) {
        self.pages
            .lock()
            .unwrap()
            .push_back(Err(anyhow::anyhow!(message.to_string())));
    }

    pub fn insert_record(&self, record: PropertyRecord) {
        self.records
            .lock()
            .unwrap()
            .insert(record.id.clone(), record);
    }

    pub fn list_calls(&self) -> usize {
        self.list_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl PropertyBackend for MockBackend {
    async fn list_properties(
        &self,
        _filter: &FilterState,
        page: PageRequest,
    ) -> Result<ListingPage> {
        self.list_calls.fetch_add(1, Ordering::SeqCst);
        match self.pages.lock().unwrap().pop_front() {
            Some(Ok(mut scripted)) => {
                scripted.page = page.page;
                Ok(scripted)
            }
            Some(Err(e)) => Err(e),
            None => Ok(ListingPage {
                items: Vec::new(),
                page: page.page,
                total_count: 0,
                has_more: false,
            }),
        }
    }

    async fn get_property(&self, id: &str) -> Result<Option<PropertyRecord>> {
        Ok(self.records.lock().unwrap().get(id).cloned())
    }

    fn backend_name(&self) -> &'static str {
        "mock"
    }
}

pub fn summary(id: &str) -> PropertySummary {
    PropertySummary {
        id: id.to_string(),
        address: format!("{} Test St", id),
        location: Location {
            city: "Cairo".to_string(),
            area: Some("Maadi".to_string()),
            latitude: None,
            longitude: None,
        },
        price: 1_000_000,
        bedrooms: 2,
        bathrooms: 1,
        sqm: 100,
        finishing: None,
        tags: Vec::new(),
        thumbnail: None,
        listed_at: Utc::now(),
    }
}

pub fn record(id: &str) -> PropertyRecord {
    PropertyRecord {
        id: id.to_string(),
        address: format!("{} Test St", id),
        location: Location {
            city: "Cairo".to_string(),
            area: Some("Maadi".to_string()),
            latitude: None,
            longitude: None,
        },
        price: 1_000_000,
        bedrooms: 2,
        bathrooms: 1,
        sqm: 100,
        finishing: Some("finished".to_string()),
        monthly_fee: None,
        description: String::new(),
        amenities: Vec::new(),
        images: Vec::new(),
        url: String::new(),
        fetched_at: Utc::now(),
        raw: serde_json::Value::Null,
    }
}
