use anyhow::Result;

use crate::data_loader::UsageSource;
use crate::format::{format_cost, format_timestamp, format_tokens};
use crate::models::UsageRecord;
use crate::state::load_snapshot;

pub async fn show_recent<S: UsageSource>(source: &S, json: bool) -> Result<()> {
    let snapshot = load_snapshot(source).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&snapshot.records)?);
    } else {
        print!("{}", render_recent(&snapshot.records));
    }

    Ok(())
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() > max {
        let head: String = s.chars().take(max.saturating_sub(3)).collect();
        format!("{head}...")
    } else {
        s.to_string()
    }
}

fn render_recent(records: &[UsageRecord]) -> String {
    let mut out = String::from("📝 Recent Activity\n\n");
    if records.is_empty() {
        out.push_str("No activity yet. Start tracking your API usage!\n");
        return out;
    }

    out.push_str(&format!(
        "{:<18} {:<20} {:<24} {:>8} {:>10}\n",
        "Date", "Project", "Model", "Tokens", "Cost"
    ));
    out.push_str(&format!("{}\n", "─".repeat(84)));
    for record in records {
        out.push_str(&format!(
            "{:<18} {:<20} {:<24} {:>8} {:>10}\n",
            format_timestamp(&record.created_at),
            truncate(&record.project_name, 20),
            truncate(&record.model, 24),
            format_tokens(record.total_tokens as f64),
            format_cost(record.cost_usd)
        ));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("short", 20), "short");
        assert_eq!(truncate("a-very-long-project-name-indeed", 12), "a-very-lo...");
    }

    #[test]
    fn test_render_recent() {
        let records = vec![UsageRecord {
            id: "r1".to_string(),
            created_at: "2024-03-05T14:22:10".to_string(),
            project_name: "search".to_string(),
            model: "gpt-4o".to_string(),
            input_tokens: 2000,
            output_tokens: 500,
            total_tokens: 2500,
            cost_usd: 0.01234,
        }];
        let text = render_recent(&records);

        assert!(text.contains("Mar 5, 02:22 PM"));
        assert!(text.contains("search"));
        assert!(text.contains("2.5K"));
        assert!(text.contains("$0.0123"));
    }

    #[test]
    fn test_render_recent_empty() {
        assert!(render_recent(&[]).contains("No activity yet"));
    }
}
