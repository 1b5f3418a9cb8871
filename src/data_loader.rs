use reqwest::Client;
use tracing::{debug, warn};

use crate::config::Config;
use crate::error::FetchError;
use crate::models::UsageRecord;

/// Every view shows the same window of rows.
pub const RECENT_LIMIT: usize = 10;

const USAGE_TABLE: &str = "usage";

/// Read side of the usage store.
#[allow(async_fn_in_trait)]
pub trait UsageSource {
    /// Most recent `limit` records, newest first. Fails as a whole; never
    /// returns partial data.
    async fn fetch_recent(&self, limit: usize) -> Result<Vec<UsageRecord>, FetchError>;
}

/// Supabase (PostgREST) backed source.
pub struct DataLoader {
    client: Client,
    base_url: String,
    api_key: String,
}

impl DataLoader {
    pub fn new(config: &Config) -> Self {
        Self {
            client: Client::new(),
            base_url: config.supabase_url.trim_end_matches('/').to_string(),
            api_key: config.supabase_key.clone(),
        }
    }

    fn table_url(&self) -> String {
        format!("{}/rest/v1/{}", self.base_url, USAGE_TABLE)
    }
}

impl UsageSource for DataLoader {
    async fn fetch_recent(&self, limit: usize) -> Result<Vec<UsageRecord>, FetchError> {
        let url = self.table_url();
        debug!("Fetching {} most recent rows from {}", limit, url);

        let response = self
            .client
            .get(&url)
            .query(&[
                ("select", "*".to_string()),
                ("order", "created_at.desc".to_string()),
                ("limit", limit.to_string()),
            ])
            .header("apikey", &self.api_key)
            .bearer_auth(&self.api_key)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!("Usage query returned {}: {}", status, body);
            return Err(FetchError::FetchFailed(format!("HTTP {status}: {body}")));
        }

        let records: Vec<UsageRecord> = response.json().await?;
        debug!("Fetched {} usage rows", records.len());
        Ok(records)
    }
}
