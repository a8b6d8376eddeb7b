//! Application session state
//!
//! A `Session` owns the loaded records and the current view parameters. All
//! changes go through `Session::apply`; views are recomputed on demand.

use tracing::debug;

use crate::aggregate::{aggregate_items, frequent_items, global_totals, ItemAggregates};
use crate::filter::{filter_records, matches_item_search, RecordFilter, TypeFilter};
use crate::i18n::StringTable;
use crate::model::{AggregatedItem, GlobalTotals, TradeRecord};
use crate::paging::{paginate, sort_by_created, total_pages, ItemSort, Page, TimeOrder};

/// Top-level view
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum View {
    #[default]
    Upload,
    History,
    Stats,
    Limits,
}

/// Transaction list parameters
#[derive(Debug, Clone, PartialEq)]
pub struct HistoryParams {
    pub search: String,
    pub item_type: TypeFilter,
    pub order: TimeOrder,
    /// 1-based
    pub page: usize,
}

impl Default for HistoryParams {
    fn default() -> Self {
        Self {
            search: String::new(),
            item_type: TypeFilter::All,
            order: TimeOrder::Newest,
            page: 1,
        }
    }
}

/// State transitions
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// Replace the record set with a freshly loaded export
    Loaded(Vec<TradeRecord>),
    /// Drop all data and return to the upload view
    Reset,
    SelectView(View),
    SetSearch(String),
    SetTypeFilter(TypeFilter),
    SetOrder(TimeOrder),
    NextPage,
    PrevPage,
    GoToPage(usize),
    SetItemSort(ItemSort),
    SetLimitsSearch(String),
}

/// Owned application state
#[derive(Debug, Clone)]
pub struct Session {
    records: Vec<TradeRecord>,
    view: View,
    history: HistoryParams,
    item_sort: ItemSort,
    limits_search: String,
    per_page: usize,
    strings: StringTable,
}

impl Session {
    pub fn new(strings: StringTable, per_page: usize) -> Self {
        Self {
            records: Vec::new(),
            view: View::Upload,
            history: HistoryParams::default(),
            item_sort: ItemSort::default(),
            limits_search: String::new(),
            per_page: per_page.max(1),
            strings,
        }
    }

    pub fn records(&self) -> &[TradeRecord] {
        &self.records
    }

    pub fn has_data(&self) -> bool {
        !self.records.is_empty()
    }

    pub fn view(&self) -> View {
        self.view
    }

    pub fn history_params(&self) -> &HistoryParams {
        &self.history
    }

    pub fn item_sort(&self) -> ItemSort {
        self.item_sort
    }

    pub fn strings(&self) -> &StringTable {
        &self.strings
    }

    /// Apply one state transition
    pub fn apply(&mut self, action: Action) {
        debug!("Session action: {:?}", ActionName(&action));
        match action {
            Action::Loaded(records) => {
                self.records = records;
                self.history = HistoryParams::default();
                self.view = View::History;
            }
            Action::Reset => {
                self.records = Vec::new();
                self.history = HistoryParams::default();
                self.item_sort = ItemSort::default();
                self.limits_search.clear();
                self.view = View::Upload;
            }
            Action::SelectView(view) => self.view = view,
            Action::SetSearch(search) => {
                self.history.search = search;
                self.history.page = 1;
            }
            Action::SetTypeFilter(item_type) => {
                self.history.item_type = item_type;
                self.history.page = 1;
            }
            Action::SetOrder(order) => {
                self.history.order = order;
                self.history.page = 1;
            }
            Action::NextPage => self.go_to_page(self.history.page.saturating_add(1)),
            Action::PrevPage => self.go_to_page(self.history.page.saturating_sub(1)),
            Action::GoToPage(page) => self.go_to_page(page),
            Action::SetItemSort(sort) => self.item_sort = sort,
            Action::SetLimitsSearch(search) => self.limits_search = search,
        }
    }

    fn go_to_page(&mut self, page: usize) {
        let pages = total_pages(self.filtered_records().len(), self.per_page);
        self.history.page = page.clamp(1, pages.max(1));
    }

    fn record_filter(&self) -> RecordFilter {
        RecordFilter {
            search: self.history.search.clone(),
            item_type: self.history.item_type.clone(),
            ..Default::default()
        }
    }

    /// Transaction list after filters and ordering, before pagination
    pub fn filtered_records(&self) -> Vec<&TradeRecord> {
        let mut filtered = filter_records(&self.records, &self.record_filter(), &self.strings);
        sort_by_created(&mut filtered, self.history.order);
        filtered
    }

    /// Current page of the transaction list
    pub fn history_page(&self) -> Page<&TradeRecord> {
        paginate(&self.filtered_records(), self.history.page, self.per_page)
    }

    pub fn item_aggregates(&self) -> ItemAggregates {
        aggregate_items(&self.records)
    }

    /// All item rollups in the selected sort order
    pub fn item_stats(&self) -> Vec<AggregatedItem> {
        self.item_aggregates().sorted(self.item_sort)
    }

    pub fn totals(&self) -> GlobalTotals {
        global_totals(&self.records)
    }

    /// Frequently sold items matching the limits-view search
    pub fn limit_items(&self) -> Vec<AggregatedItem> {
        frequent_items(&self.item_aggregates())
            .into_iter()
            .filter(|item| matches_item_search(item, &self.limits_search, &self.strings))
            .collect()
    }
}

/// Debug view of an action without dumping every loaded record
struct ActionName<'a>(&'a Action);

impl std::fmt::Debug for ActionName<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.0 {
            Action::Loaded(records) => write!(f, "Loaded({} records)", records.len()),
            other => write!(f, "{:?}", other),
        }
    }
}
