//! Marketplace trade history pipeline
//!
//! Turns the exporter's nested JSON into a flat record list and derives the
//! views shown by the viewer: filtered transaction pages, per-item sale
//! rollups, frequently sold items, and headline totals. Everything here is a
//! pure function of the loaded records and the view parameters.

pub mod aggregate;
pub mod derive;
pub mod error;
pub mod filter;
pub mod i18n;
pub mod model;
pub mod normalize;
pub mod paging;
pub mod session;

pub use aggregate::{
    aggregate_items, find_record, frequent_items, global_totals, item_sale_history, top_sellers,
    ItemAggregates, FREQUENT_SALE_THRESHOLD,
};
pub use derive::{classify_outcome, failure_reasons, net_price, resolve_failure_code, Outcome};
pub use error::ExportError;
pub use filter::{filter_records, RecordFilter, TypeFilter};
pub use i18n::{translate_item_type, Language, StringTable};
pub use model::{AggregatedItem, Category, GlobalTotals, ItemDetails, Payment, State, TradeRecord};
pub use normalize::{parse_trade_export, parse_trade_export_str};
pub use paging::{item_type_options, paginate, ItemSort, Page, TimeOrder, DEFAULT_PAGE_SIZE};
pub use session::{Action, Session, View};
