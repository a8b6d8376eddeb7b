//! Console rendering of the pipeline's views

use chrono::{DateTime, Utc};
use market_core::{
    classify_outcome, failure_reasons, net_price, translate_item_type, AggregatedItem,
    GlobalTotals, Page, StringTable, TradeRecord,
};
use tabled::builder::Builder;
use tabled::settings::Style;

use crate::constants;

// =============================================================================
// Formatting helpers
// =============================================================================

/// Format an amount with thousands separators ("1,234,567", "12.5")
pub fn format_credits(amount: f64) -> String {
    let rounded = (amount * 100.0).round() / 100.0;
    let negative = rounded < 0.0;
    let abs = rounded.abs();
    let whole = abs.trunc() as u64;
    let cents = ((abs - abs.trunc()) * 100.0).round() as u64;

    let digits = whole.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let fraction = match cents {
        0 => String::new(),
        c if c % 10 == 0 => format!(".{}", c / 10),
        c => format!(".{:02}", c),
    };

    format!("{}{}{}", if negative { "-" } else { "" }, grouped, fraction)
}

/// Format a timestamp for display
pub fn format_date(at: &DateTime<Utc>) -> String {
    at.format(constants::DATE_FORMAT).to_string()
}

/// Truncate string for display
pub fn truncate(s: &str, max_chars: usize) -> String {
    if s.chars().count() <= max_chars {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_chars.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}

fn item_name<'a>(record: &'a TradeRecord, t: &'a StringTable) -> &'a str {
    record
        .item()
        .map_or_else(|| t.get("unknown_item"), |item| item.name.as_str())
}

fn item_type_label(record: &TradeRecord, t: &StringTable) -> String {
    match record.item_type() {
        Some(item_type) if !item_type.is_empty() => translate_item_type(item_type, t),
        _ => t.get("unknown_type").to_string(),
    }
}

// =============================================================================
// Views
// =============================================================================

/// Transaction list page
pub fn render_history(page: &Page<&TradeRecord>, t: &StringTable) -> String {
    if page.total_items == 0 {
        return t.get("no_trans").to_string();
    }

    let mut builder = Builder::default();
    builder.push_record([
        t.get("date").to_string(),
        t.get("name").to_string(),
        t.get("type").to_string(),
        t.get("category").to_string(),
        t.get("credits").to_string(),
        t.get("status").to_string(),
        "ID".to_string(),
    ]);
    for record in &page.items {
        builder.push_record([
            format_date(&record.created_at),
            truncate(item_name(record, t), constants::MAX_NAME_WIDTH),
            item_type_label(record, t),
            t.get(record.category.label_key()).to_string(),
            format_credits(net_price(record)),
            t.get(classify_outcome(record).label_key()).to_string(),
            record.id.clone(),
        ]);
    }

    let mut table = builder.build();
    table.with(Style::psql());

    format!(
        "{}\n\n{} {} {} {}  ({}: {} {})",
        table,
        t.get("page"),
        page.page,
        t.get("page_of"),
        page.total_pages,
        t.get("total"),
        page.total_items,
        t.get("records"),
    )
}

/// Full details of one transaction
pub fn render_transaction(record: &TradeRecord, t: &StringTable) -> String {
    let outcome = classify_outcome(record);
    let mut lines = vec![
        format!("{} ({})", t.get("details"), record.id),
        "-".repeat(60),
        format!("{:<20} {}", t.get("name"), item_name(record, t)),
        format!("{:<20} {}", t.get("type"), item_type_label(record, t)),
    ];

    if let Some(item) = record.item() {
        if !item.tags.is_empty() {
            lines.push(format!("{:<20} {}", t.get("tags"), item.tags.join(", ")));
        }
        if !item.asset_url.is_empty() {
            lines.push(format!("{:<20} {}", "Asset", item.asset_url));
        }
    }

    lines.push(format!("{:<20} {}", t.get("category"), t.get(record.category.label_key())));
    lines.push(format!("{:<20} {}", t.get("status"), t.get(outcome.label_key())));
    lines.push(format!("{:<20} {}", t.get("amount"), format_credits(net_price(record))));
    if record.fee() > 0.0 {
        lines.push(format!("{:<20} -{}", t.get("fee"), format_credits(record.fee())));
    }
    lines.push(format!("{:<20} {}", t.get("last_mod"), format_date(&record.last_modified_at)));
    lines.push(format!("{:<20} {}", t.get("created_at"), format_date(&record.created_at)));
    lines.push(format!("{:<20} {}", "Trade ID", record.trade_id));

    let reasons = failure_reasons(record, t);
    if !reasons.is_empty() {
        lines.push(format!("{:<20} {}", t.get("fail_reason"), reasons.join(", ")));
    }

    lines.join("\n")
}

/// Headline totals block
pub fn render_totals(totals: &GlobalTotals, t: &StringTable) -> String {
    let mut builder = Builder::default();
    builder.push_record([t.get("total_rev").to_string(), format_credits(totals.sold_net)]);
    builder.push_record([t.get("total_spend").to_string(), format_credits(totals.bought_cost)]);
    builder.push_record([t.get("unique_items").to_string(), totals.unique_items.to_string()]);
    builder.push_record([t.get("sold").to_string(), totals.sold_count.to_string()]);
    builder.push_record([t.get("bought").to_string(), totals.bought_count.to_string()]);

    let mut table = builder.build();
    table.with(Style::rounded());
    table.to_string()
}

/// Ranked item rollups
pub fn render_items(items: &[AggregatedItem], t: &StringTable) -> String {
    if items.is_empty() {
        return t.get("no_trans").to_string();
    }

    let mut builder = Builder::default();
    builder.push_record([
        "#".to_string(),
        t.get("name").to_string(),
        t.get("type").to_string(),
        t.get("sold_count").to_string(),
        t.get("net_income").to_string(),
        "Item ID".to_string(),
    ]);
    for (rank, item) in items.iter().enumerate() {
        builder.push_record([
            (rank + 1).to_string(),
            truncate(&item.name, constants::MAX_NAME_WIDTH),
            translate_item_type(&item.item_type, t),
            item.count.to_string(),
            format_credits(item.total_earned),
            item.item_id.clone(),
        ]);
    }

    let mut table = builder.build();
    table.with(Style::psql());
    table.to_string()
}

/// Sale history of one item
pub fn render_sale_history(history: &[&TradeRecord], t: &StringTable) -> String {
    if history.is_empty() {
        return t.get("no_trans").to_string();
    }

    let mut builder = Builder::default();
    builder.push_record([
        t.get("date").to_string(),
        t.get("unit_price").to_string(),
        t.get("fee").to_string(),
    ]);
    for record in history {
        builder.push_record([
            format_date(&record.last_modified_at),
            format_credits(net_price(record)),
            format_credits(record.fee()),
        ]);
    }

    let mut table = builder.build();
    table.with(Style::psql());
    table.to_string()
}
