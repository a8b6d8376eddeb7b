//! Per-item rollups and headline totals
//!
//! Only successful sells count towards item rollups. Rollups keep the order in
//! which items were first seen so later sorts have a stable tie-break.

use std::collections::{HashMap, HashSet};

use crate::derive::{classify_outcome, net_price, Outcome};
use crate::model::{AggregatedItem, Category, GlobalTotals, State, TradeRecord};
use crate::paging::{sort_aggregates, ItemSort};

/// Minimum successful sales for an item to appear in the frequent-items view
pub const FREQUENT_SALE_THRESHOLD: u64 = 3;

/// Mapping from `item_id` to its rollup, iterable in first-seen order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ItemAggregates {
    items: Vec<AggregatedItem>,
    index: HashMap<String, usize>,
}

impl ItemAggregates {
    pub fn get(&self, item_id: &str) -> Option<&AggregatedItem> {
        self.index.get(item_id).map(|&i| &self.items[i])
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &AggregatedItem> {
        self.items.iter()
    }

    /// All rollups ordered by `sort`, ties kept in first-seen order
    pub fn sorted(&self, sort: ItemSort) -> Vec<AggregatedItem> {
        sort_aggregates(self.items.clone(), sort)
    }

    fn record_sale(&mut self, record: &TradeRecord) {
        let Some(item) = record.item() else {
            return;
        };
        let net = net_price(record);

        match self.index.get(&item.item_id) {
            Some(&i) => {
                let existing = &mut self.items[i];
                existing.count += 1;
                existing.total_earned += net;
            }
            None => {
                self.index.insert(item.item_id.clone(), self.items.len());
                self.items.push(AggregatedItem {
                    item_id: item.item_id.clone(),
                    name: item.name.clone(),
                    asset_url: item.asset_url.clone(),
                    item_type: item.item_type.clone(),
                    count: 1,
                    total_earned: net,
                });
            }
        }
    }
}

/// Whether a record counts as a completed sale
fn is_successful_sale(record: &TradeRecord) -> bool {
    record.category == Category::Sell && classify_outcome(record) == Outcome::Succeeded
}

/// Roll up successful sells by item. Records without an item are skipped.
pub fn aggregate_items(records: &[TradeRecord]) -> ItemAggregates {
    let mut aggregates = ItemAggregates::default();
    for record in records.iter().filter(|r| is_successful_sale(r)) {
        aggregates.record_sale(record);
    }
    aggregates
}

/// Headline totals over every record whose raw state is Succeeded
pub fn global_totals(records: &[TradeRecord]) -> GlobalTotals {
    let mut totals = GlobalTotals::default();
    let mut unique = HashSet::new();

    for record in records.iter().filter(|r| r.state == State::Succeeded) {
        if let Some(item) = record.item() {
            unique.insert(item.item_id.as_str());
        }

        match record.category {
            Category::Sell => {
                totals.sold_count += 1;
                totals.sold_net += net_price(record);
            }
            Category::Buy => {
                totals.bought_count += 1;
                totals.bought_cost += record.price();
            }
        }
    }

    totals.unique_items = unique.len();
    totals
}

/// Items sold at least `FREQUENT_SALE_THRESHOLD` times, by count descending
pub fn frequent_items(aggregates: &ItemAggregates) -> Vec<AggregatedItem> {
    aggregates
        .sorted(ItemSort::Count)
        .into_iter()
        .filter(|item| item.count >= FREQUENT_SALE_THRESHOLD)
        .collect()
}

/// The `n` best sellers by count
pub fn top_sellers(aggregates: &ItemAggregates, n: usize) -> Vec<AggregatedItem> {
    let mut sorted = aggregates.sorted(ItemSort::Count);
    sorted.truncate(n);
    sorted
}

/// Successful sales of one item, most recently modified first
pub fn item_sale_history<'a>(records: &'a [TradeRecord], item_id: &str) -> Vec<&'a TradeRecord> {
    let mut history: Vec<&TradeRecord> = records
        .iter()
        .filter(|r| is_successful_sale(r))
        .filter(|r| r.item().is_some_and(|item| item.item_id == item_id))
        .collect();
    history.sort_by(|a, b| b.last_modified_at.cmp(&a.last_modified_at));
    history
}

/// Look up a record by its identifier
pub fn find_record<'a>(records: &'a [TradeRecord], id: &str) -> Option<&'a TradeRecord> {
    records.iter().find(|r| r.id == id)
}
