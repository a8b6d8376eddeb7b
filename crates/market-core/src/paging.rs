//! Sorting and pagination of derived views

use std::cmp::Ordering;
use std::collections::BTreeSet;

use serde::Serialize;

use crate::model::{AggregatedItem, TradeRecord};

/// Transaction list page size
pub const DEFAULT_PAGE_SIZE: usize = 20;

/// Display priority for known item types. Unknown types sort after these.
pub const TYPE_ORDER: &[&str] = &[
    "WeaponSkin",
    "CharacterHeadgear",
    "CharacterUniform",
    "WeaponAttachmentSkinSet",
    "Charm",
    "OperatorCardPortrait",
    "OperatorCardBackground",
    "DroneSkin",
    "GadgetSkin",
    "lootcrate",
];

/// Ordering of the transaction list by creation time
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TimeOrder {
    #[default]
    Newest,
    Oldest,
}

impl TimeOrder {
    pub fn label_key(&self) -> &'static str {
        match self {
            TimeOrder::Newest => "newest",
            TimeOrder::Oldest => "oldest",
        }
    }
}

/// Ordering of item rollups, both descending
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ItemSort {
    #[default]
    Count,
    Earned,
}

impl ItemSort {
    pub fn label_key(&self) -> &'static str {
        match self {
            ItemSort::Count => "by_vol",
            ItemSort::Earned => "by_rev",
        }
    }
}

/// Stable sort by `created_at`
pub fn sort_by_created(records: &mut [&TradeRecord], order: TimeOrder) {
    match order {
        TimeOrder::Newest => records.sort_by(|a, b| b.created_at.cmp(&a.created_at)),
        TimeOrder::Oldest => records.sort_by(|a, b| a.created_at.cmp(&b.created_at)),
    }
}

/// Stable descending sort of rollups
pub fn sort_aggregates(mut items: Vec<AggregatedItem>, sort: ItemSort) -> Vec<AggregatedItem> {
    match sort {
        ItemSort::Count => items.sort_by(|a, b| b.count.cmp(&a.count)),
        ItemSort::Earned => items.sort_by(|a, b| b.total_earned.total_cmp(&a.total_earned)),
    }
    items
}

/// Compare two item types by display priority, then alphabetically
pub fn compare_item_types(a: &str, b: &str) -> Ordering {
    let rank = |t: &str| TYPE_ORDER.iter().position(|known| *known == t);
    match (rank(a), rank(b)) {
        (Some(x), Some(y)) => x.cmp(&y),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => a.cmp(b),
    }
}

/// Distinct raw item types present in `records`, in display order
pub fn item_type_options(records: &[TradeRecord]) -> Vec<String> {
    let distinct: BTreeSet<&str> = records
        .iter()
        .filter_map(|r| r.item_type())
        .filter(|t| !t.is_empty())
        .collect();

    let mut types: Vec<String> = distinct.into_iter().map(str::to_string).collect();
    types.sort_by(|a, b| compare_item_types(a, b));
    types
}

/// One page of a list
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    /// 1-based page index actually served (after clamping)
    pub page: usize,
    pub per_page: usize,
    pub total_pages: usize,
    pub total_items: usize,
}

impl<T> Page<T> {
    pub fn has_prev(&self) -> bool {
        self.page > 1
    }

    pub fn has_next(&self) -> bool {
        self.page < self.total_pages
    }
}

/// Number of pages needed for `len` items
pub fn total_pages(len: usize, per_page: usize) -> usize {
    len.div_ceil(per_page.max(1))
}

/// Clamp a 1-based page request into `[1, max(total_pages, 1)]`
pub fn clamp_page(page: usize, total_pages: usize) -> usize {
    page.clamp(1, total_pages.max(1))
}

/// Slice out one page. Out-of-range page requests are clamped.
pub fn paginate<T: Clone>(items: &[T], page: usize, per_page: usize) -> Page<T> {
    let per_page = per_page.max(1);
    let total_pages = total_pages(items.len(), per_page);
    let page = clamp_page(page, total_pages);

    let start = ((page - 1) * per_page).min(items.len());
    let end = (start + per_page).min(items.len());

    Page {
        items: items[start..end].to_vec(),
        page,
        per_page,
        total_pages,
        total_items: items.len(),
    }
}
