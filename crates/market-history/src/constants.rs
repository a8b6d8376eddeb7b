//! Centralized constants for the market history viewer
//!
//! User-adjustable settings are loaded from config.toml.

// =============================================================================
// Cache
// =============================================================================

/// Metadata key holding the raw export text
pub const MARKET_DATA_KEY: &str = "market_data";

/// Metadata key holding the time the export was cached
pub const LOADED_AT_KEY: &str = "market_data_loaded_at";

/// SQLite busy timeout (ms)
pub const BUSY_TIMEOUT_MS: u64 = 5000;

// =============================================================================
// File Names
// =============================================================================

/// Default config file path
pub const CONFIG_FILENAME: &str = "config.toml";

/// Cache database filename
pub const CACHE_FILENAME: &str = "market_history.db";

/// Transaction list CSV filename
pub const TRANSACTIONS_FILENAME: &str = "transactions.csv";

/// Per-item sales CSV filename
pub const ITEM_STATS_FILENAME: &str = "item_stats.csv";

// =============================================================================
// Display
// =============================================================================

/// Number of best sellers shown above the item table
pub const TOP_SELLERS: usize = 5;

/// Longest item name shown in a table cell
pub const MAX_NAME_WIDTH: usize = 40;

/// Timestamp format for console and CSV output
pub const DATE_FORMAT: &str = "%Y/%m/%d %H:%M";
