use serde::{Deserialize, Serialize};

/// One row of the `usage` table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UsageRecord {
    pub id: String,
    /// Raw ISO-8601 timestamp as stored; never re-parsed for grouping.
    pub created_at: String,
    pub project_name: String,
    pub model: String,
    pub input_tokens: u64,
    pub output_tokens: u64,
    pub total_tokens: u64,
    pub cost_usd: f64,
}

impl UsageRecord {
    /// Calendar day of the record, taken verbatim from the date part of
    /// `created_at`. No timezone conversion happens here.
    pub fn day_key(&self) -> &str {
        day_key(&self.created_at)
    }
}

pub fn day_key(created_at: &str) -> &str {
    created_at
        .split_once('T')
        .map(|(date, _)| date)
        .unwrap_or(created_at)
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DailyUsage {
    pub date: String, // YYYY-MM-DD
    pub tokens: u64,
    pub cost: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Stats {
    pub total_tokens: u64,
    pub total_cost: f64,
    pub daily_average: f64,
}
