use tracing::{info, warn};

use crate::aggregate::{aggregate_daily, compute_stats};
use crate::data_loader::{UsageSource, RECENT_LIMIT};
use crate::error::FetchError;
use crate::models::{DailyUsage, Stats, UsageRecord};

pub const LOAD_ERROR_MESSAGE: &str = "Failed to load data. Check your Supabase connection.";

/// Everything derived from one successful fetch. Built in one go and never
/// edited afterwards.
#[derive(Debug, Clone)]
pub struct Snapshot {
    pub records: Vec<UsageRecord>,
    pub daily: Vec<DailyUsage>,
    pub stats: Stats,
}

impl Snapshot {
    pub fn from_records(records: Vec<UsageRecord>) -> Self {
        let daily = aggregate_daily(&records);
        let stats = compute_stats(&records);
        Self {
            records,
            daily,
            stats,
        }
    }
}

#[derive(Debug, Clone)]
pub enum LoadState {
    Loading,
    Failed(String),
    Ready(Snapshot),
}

/// Fetch once and derive a snapshot. Used by the one-shot report commands.
pub async fn load_snapshot<S: UsageSource>(source: &S) -> Result<Snapshot, FetchError> {
    let records = source.fetch_recent(RECENT_LIMIT).await?;
    Ok(Snapshot::from_records(records))
}

/// Owns the usage source and the current load state.
///
/// `refresh` takes `&mut self`, so a refresh cannot start while another is
/// still in flight.
pub struct DashboardState<S> {
    source: S,
    state: LoadState,
}

impl<S: UsageSource> DashboardState<S> {
    pub fn new(source: S) -> Self {
        Self {
            source,
            state: LoadState::Loading,
        }
    }

    pub fn state(&self) -> &LoadState {
        &self.state
    }

    pub fn snapshot(&self) -> Option<&Snapshot> {
        match &self.state {
            LoadState::Ready(snapshot) => Some(snapshot),
            _ => None,
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.state, LoadState::Loading)
    }

    pub fn mark_loading(&mut self) {
        self.state = LoadState::Loading;
    }

    /// Initial load and manual retry both go through here with the same
    /// parameters. On failure the previous snapshot is dropped.
    pub async fn refresh(&mut self) {
        self.state = LoadState::Loading;

        self.state = match load_snapshot(&self.source).await {
            Ok(snapshot) => {
                info!("Loaded {} usage records", snapshot.records.len());
                LoadState::Ready(snapshot)
            }
            Err(e) => {
                warn!("Error fetching data: {}", e);
                LoadState::Failed(LOAD_ERROR_MESSAGE.to_string())
            }
        };
    }
}
