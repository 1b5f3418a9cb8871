use anyhow::Result;

use crate::data_loader::UsageSource;
use crate::format::{format_tokens, format_total_cost};
use crate::models::Stats;
use crate::state::load_snapshot;

pub async fn show_stats<S: UsageSource>(source: &S, json: bool) -> Result<()> {
    let snapshot = load_snapshot(source).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&snapshot.stats)?);
    } else {
        print!("{}", render_stats(&snapshot.stats, snapshot.records.len()));
    }

    Ok(())
}

fn render_stats(stats: &Stats, record_count: usize) -> String {
    let mut out = String::new();
    out.push_str(&format!("📊 Usage Summary (last {} records)\n\n", record_count));
    out.push_str(&format!("   Total Tokens:  {}\n", format_tokens(stats.total_tokens as f64)));
    out.push_str(&format!("   Total Cost:    {}\n", format_total_cost(stats.total_cost)));
    out.push_str(&format!("   Daily Average: {}\n", format_tokens(stats.daily_average)));
    out
}
