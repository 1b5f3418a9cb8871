use std::collections::{BTreeMap, HashSet};

use crate::models::{DailyUsage, Stats, UsageRecord};

/// Number of distinct days kept for the usage chart.
pub const CHART_DAYS: usize = 7;

/// Roll records up per calendar day and keep the most recent
/// [`CHART_DAYS`] days that have activity, oldest first.
///
/// Days without records are not filled in, so a gap in activity widens the
/// window rather than producing zero entries.
pub fn aggregate_daily(records: &[UsageRecord]) -> Vec<DailyUsage> {
    let mut daily_map: BTreeMap<&str, (u64, f64)> = BTreeMap::new();

    for record in records {
        let day = daily_map.entry(record.day_key()).or_insert((0, 0.0));
        day.0 = day.0.saturating_add(record.total_tokens);
        day.1 += record.cost_usd;
    }

    let skip = daily_map.len().saturating_sub(CHART_DAYS);
    daily_map
        .into_iter()
        .skip(skip)
        .map(|(date, (tokens, cost))| DailyUsage {
            date: date.to_string(),
            tokens,
            cost,
        })
        .collect()
}

pub fn compute_stats(records: &[UsageRecord]) -> Stats {
    let total_tokens = records
        .iter()
        .fold(0u64, |sum, r| sum.saturating_add(r.total_tokens));
    let total_cost: f64 = records.iter().map(|r| r.cost_usd).sum();

    let unique_days = records.iter().map(UsageRecord::day_key).collect::<HashSet<_>>().len();
    let daily_average = if unique_days > 0 {
        total_tokens as f64 / unique_days as f64
    } else {
        0.0
    };

    Stats {
        total_tokens,
        total_cost,
        daily_average,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(id: &str, created_at: &str, total_tokens: u64, cost_usd: f64) -> UsageRecord {
        UsageRecord {
            id: id.to_string(),
            created_at: created_at.to_string(),
            project_name: "demo".to_string(),
            model: "gpt-4o".to_string(),
            input_tokens: total_tokens / 2,
            output_tokens: total_tokens - total_tokens / 2,
            total_tokens,
            cost_usd,
        }
    }

    #[test]
    fn test_aggregate_empty() {
        assert!(aggregate_daily(&[]).is_empty());
    }

    #[test]
    fn test_aggregate_merges_same_day() {
        let records = vec![
            record("a", "2024-01-01T08:00:00Z", 100, 0.01),
            record("b", "2024-01-01T20:00:00Z", 200, 0.02),
        ];

        let daily = aggregate_daily(&records);
        assert_eq!(daily.len(), 1);
        assert_eq!(daily[0].date, "2024-01-01");
        assert_eq!(daily[0].tokens, 300);
        assert!((daily[0].cost - 0.03).abs() < 1e-12);
    }

    #[test]
    fn test_aggregate_keeps_seven_most_recent_days() {
        // Nine distinct days, not contiguous and not sorted.
        let days = ["2024-01-12", "2024-01-11", "2024-01-10", "2024-01-03", "2024-01-02"];
        let mut records: Vec<UsageRecord> = days
            .iter()
            .enumerate()
            .map(|(i, d)| record(&i.to_string(), &format!("{d}T10:00:00Z"), 10, 0.001))
            .collect();
        for (i, d) in ["2024-01-09", "2024-01-08", "2024-01-05", "2024-01-01"].iter().enumerate() {
            records.push(record(&format!("x{i}"), &format!("{d}T10:00:00Z"), 10, 0.001));
        }

        let daily = aggregate_daily(&records);
        let dates: Vec<&str> = daily.iter().map(|d| d.date.as_str()).collect();
        assert_eq!(
            dates,
            vec![
                "2024-01-03",
                "2024-01-05",
                "2024-01-08",
                "2024-01-09",
                "2024-01-10",
                "2024-01-11",
                "2024-01-12",
            ]
        );
    }

    #[test]
    fn test_aggregate_fewer_than_seven_days_returns_all() {
        let records = vec![
            record("a", "2024-02-02T00:00:00Z", 5, 0.0),
            record("b", "2024-02-01T00:00:00Z", 7, 0.0),
        ];

        let daily = aggregate_daily(&records);
        assert_eq!(daily.len(), 2);
        assert_eq!(daily[0].date, "2024-02-01");
        assert_eq!(daily[1].date, "2024-02-02");
    }

    #[test]
    fn test_token_sums_saturate_instead_of_overflowing() {
        let records = vec![
            record("a", "2024-03-01T00:00:00Z", u64::MAX - 5, 0.0),
            record("b", "2024-03-01T01:00:00Z", 10, 0.0),
        ];

        let daily = aggregate_daily(&records);
        assert_eq!(daily[0].tokens, u64::MAX);
        assert_eq!(compute_stats(&records).total_tokens, u64::MAX);
    }

    #[test]
    fn test_stats_empty() {
        let stats = compute_stats(&[]);
        assert_eq!(stats.total_tokens, 0);
        assert_eq!(stats.total_cost, 0.0);
        assert_eq!(stats.daily_average, 0.0);
    }

    #[test]
    fn test_stats_daily_average_over_distinct_days() {
        let records = vec![
            record("a", "2024-01-01T09:00:00Z", 100, 0.01),
            record("b", "2024-01-01T17:00:00Z", 200, 0.02),
            record("c", "2024-01-02T11:00:00Z", 50, 0.005),
        ];

        let stats = compute_stats(&records);
        assert_eq!(stats.total_tokens, 350);
        assert!((stats.total_cost - 0.035).abs() < 1e-12);
        assert_eq!(stats.daily_average, 175.0);
    }
}
