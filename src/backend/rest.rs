use crate::backend::traits::PropertyBackend;
use crate::backend::types::{ListingPage, PageRequest, RawListingResponse, RawPropertyRow};
use crate::config::Config;
use crate::filters::FilterState;
use crate::models::PropertyRecord;
use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, StatusCode};
use std::time::Duration;
use tracing::{debug, info, warn};

/// Client for the hosted property REST API
pub struct RestBackend {
    client: Client,
    base_url: String,
    api_key: Option<String>,
}

impl RestBackend {
    /// Create a backend client from the runtime configuration
    pub fn new(config: &Config) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .user_agent(concat!("estate-lens/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            base_url: config.backend_url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
        })
    }

    fn get(&self, url: &str) -> RequestBuilder {
        let request = self.client.get(url);
        match &self.api_key {
            Some(key) => request.bearer_auth(key),
            None => request,
        }
    }
}

#[async_trait]
impl PropertyBackend for RestBackend {
    async fn list_properties(
        &self,
        filter: &FilterState,
        page: PageRequest,
    ) -> Result<ListingPage> {
        let url = format!("{}/properties", self.base_url);
        let mut query = filter.to_query_pairs();
        query.push(("page".to_string(), page.page.to_string()));
        query.push(("pageSize".to_string(), page.per_page.to_string()));

        debug!("Fetching URL: {} (page {})", url, page.page);

        let response = self
            .get(&url)
            .query(&query)
            .send()
            .await
            .context("Failed to fetch listing page")?;

        if !response.status().is_success() {
            warn!("Backend returned status: {}", response.status());
            anyhow::bail!("Failed to fetch listing page: {}", response.status());
        }

        let body: RawListingResponse = response
            .json()
            .await
            .context("Failed to decode listing page")?;

        let raw_count = body.items.len();
        let items: Vec<_> = body
            .items
            .into_iter()
            .filter_map(|value| match serde_json::from_value::<RawPropertyRow>(value) {
                Ok(row) => row.into_summary(),
                Err(e) => {
                    debug!("Skipping malformed listing row: {}", e);
                    None
                }
            })
            .collect();

        if items.len() < raw_count {
            debug!("Dropped {} incomplete rows on page {}", raw_count - items.len(), page.page);
        }

        let total_count = body.total;
        let has_more = body
            .has_more
            .unwrap_or((page.page as u64) * (page.per_page as u64) < total_count);

        info!(
            "Fetched page {} with {} listings ({} total)",
            page.page,
            items.len(),
            total_count
        );

        Ok(ListingPage {
            items,
            page: page.page,
            total_count,
            has_more,
        })
    }

    async fn get_property(&self, id: &str) -> Result<Option<PropertyRecord>> {
        let url = format!("{}/properties/{}", self.base_url, urlencoding::encode(id));

        debug!("Fetching URL: {}", url);

        let response = self
            .get(&url)
            .send()
            .await
            .context("Failed to fetch property")?;

        if response.status() == StatusCode::NOT_FOUND {
            debug!("Property {} not found", id);
            return Ok(None);
        }

        if !response.status().is_success() {
            warn!("Backend returned status: {}", response.status());
            anyhow::bail!("Failed to fetch property {}: {}", id, response.status());
        }

        let value: serde_json::Value = response
            .json()
            .await
            .context("Failed to decode property")?;

        let row: RawPropertyRow = serde_json::from_value(value.clone())
            .context("Failed to map property row")?;

        Ok(row.into_record(value))
    }

    fn backend_name(&self) -> &'static str {
        "rest"
    }
}
