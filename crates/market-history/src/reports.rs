//! CSV export of the transaction list and per-item sales

use anyhow::Result;
use csv::Writer;
use market_core::{
    classify_outcome, net_price, resolve_failure_code, AggregatedItem, TradeRecord,
};
use std::path::{Path, PathBuf};
use tracing::info;

use crate::constants;
use crate::display::format_date;

/// Write transactions.csv and item_stats.csv, returning the paths written
pub fn generate_all_reports(
    output_dir: &Path,
    records: &[&TradeRecord],
    items: &[AggregatedItem],
) -> Result<Vec<PathBuf>> {
    std::fs::create_dir_all(output_dir)?;

    Ok(vec![
        generate_transactions(output_dir, records)?,
        generate_item_stats(output_dir, items)?,
    ])
}

/// Generate transactions.csv
fn generate_transactions(output_dir: &Path, records: &[&TradeRecord]) -> Result<PathBuf> {
    let path = output_dir.join(constants::TRANSACTIONS_FILENAME);
    let mut wtr = Writer::from_path(&path)?;

    // Header
    wtr.write_record([
        "Created",
        "Last_Modified",
        "ID",
        "Trade_ID",
        "Item_ID",
        "Name",
        "Type",
        "Category",
        "State",
        "Outcome",
        "Price",
        "Fee",
        "Net",
        "Failures",
    ])?;

    for record in records {
        let item = record.item();
        // Failure codes keep their raw value when untranslated
        let failures: Vec<String> = record
            .failures
            .iter()
            .map(|code| resolve_failure_code(code))
            .collect();

        wtr.write_record([
            format_date(&record.created_at).as_str(),
            &format_date(&record.last_modified_at),
            record.id.as_str(),
            record.trade_id.as_str(),
            item.map_or("", |i| i.item_id.as_str()),
            item.map_or("", |i| i.name.as_str()),
            item.map_or("", |i| i.item_type.as_str()),
            &record.category.to_string(),
            &record.state.to_string(),
            &classify_outcome(record).to_string(),
            &format!("{:.2}", record.price()),
            &format!("{:.2}", record.fee()),
            &format!("{:.2}", net_price(record)),
            &failures.join(";"),
        ])?;
    }

    wtr.flush()?;
    info!("Generated {} ({} rows)", path.display(), records.len());
    Ok(path)
}

/// Generate item_stats.csv
fn generate_item_stats(output_dir: &Path, items: &[AggregatedItem]) -> Result<PathBuf> {
    let path = output_dir.join(constants::ITEM_STATS_FILENAME);
    let mut wtr = Writer::from_path(&path)?;

    // Header
    wtr.write_record(["Rank", "Item_ID", "Name", "Type", "Sold", "Total_Earned"])?;

    for (rank, item) in items.iter().enumerate() {
        wtr.write_record([
            (rank + 1).to_string().as_str(),
            item.item_id.as_str(),
            item.name.as_str(),
            item.item_type.as_str(),
            &item.count.to_string(),
            &format!("{:.2}", item.total_earned),
        ])?;
    }

    wtr.flush()?;
    info!("Generated {} ({} rows)", path.display(), items.len());
    Ok(path)
}
