use anyhow::Result;

use crate::data_loader::UsageSource;
use crate::format::{format_cost, format_day_label, format_tokens};
use crate::models::DailyUsage;
use crate::state::load_snapshot;

pub async fn show_daily<S: UsageSource>(source: &S, json: bool) -> Result<()> {
    let snapshot = load_snapshot(source).await?;

    if json {
        let output = serde_json::json!({ "daily": snapshot.daily });
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        print!("{}", render_daily(&snapshot.daily));
    }

    Ok(())
}

fn render_daily(daily: &[DailyUsage]) -> String {
    let mut out = String::from("📅 Token Usage (Last 7 Days)\n\n");
    if daily.is_empty() {
        out.push_str("No activity yet.\n");
        return out;
    }

    out.push_str(&format!("{:<12} {:>8} {:>10} {:>12}\n", "Date", "Day", "Tokens", "Cost"));
    out.push_str(&format!("{}\n", "─".repeat(45)));
    for entry in daily {
        out.push_str(&format!(
            "{:<12} {:>8} {:>10} {:>12}\n",
            entry.date,
            format_day_label(&entry.date),
            format_tokens(entry.tokens as f64),
            format_cost(entry.cost)
        ));
    }
    out
}
