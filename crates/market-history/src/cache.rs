//! SQLite cache for the most recently loaded export
//!
//! The raw export text is kept under a single fixed key so the next run can
//! reload it without the export file. There is no schema versioning: a
//! cached export that no longer parses is simply discarded.

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use sqlx::SqlitePool;
use std::path::Path;
use tracing::{debug, info};

use crate::constants;

/// Cache database wrapper
pub struct Cache {
    pool: SqlitePool,
}

impl Cache {
    /// Open or create cache database
    pub async fn open(path: &Path) -> Result<Self> {
        // Ensure parent directory exists
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        // SQLx requires the file to exist for SQLite
        if !path.exists() {
            std::fs::File::create(path)?;
        }

        let url = format!("sqlite:{}", path.display());
        let pool = SqlitePool::connect(&url)
            .await
            .context("Failed to open cache database")?;

        sqlx::query("PRAGMA journal_mode=WAL")
            .execute(&pool)
            .await?;
        sqlx::query(&format!("PRAGMA busy_timeout={}", constants::BUSY_TIMEOUT_MS))
            .execute(&pool)
            .await?;

        let cache = Self { pool };
        cache.init_schema().await?;
        debug!("Opened cache at {}", path.display());

        Ok(cache)
    }

    /// In-memory cache for tests
    #[cfg(test)]
    pub async fn open_in_memory() -> Result<Self> {
        let pool = sqlx::sqlite::SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await?;
        let cache = Self { pool };
        cache.init_schema().await?;
        Ok(cache)
    }

    /// Initialize database schema
    async fn init_schema(&self) -> Result<()> {
        sqlx::query(
            "
            -- Cache metadata (key-value)
            CREATE TABLE IF NOT EXISTS metadata (
                key TEXT PRIMARY KEY,
                value TEXT NOT NULL
            )
            ",
        )
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    // =========================================================================
    // Metadata
    // =========================================================================

    /// Get metadata value
    pub async fn get_metadata(&self, key: &str) -> Result<Option<String>> {
        let row: Option<(String,)> = sqlx::query_as("SELECT value FROM metadata WHERE key = ?")
            .bind(key)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.map(|r| r.0))
    }

    /// Set metadata value
    pub async fn set_metadata(&self, key: &str, value: &str) -> Result<()> {
        sqlx::query("INSERT OR REPLACE INTO metadata (key, value) VALUES (?, ?)")
            .bind(key)
            .bind(value)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    /// Remove a metadata value, returning whether it existed
    pub async fn delete_metadata(&self, key: &str) -> Result<bool> {
        let result = sqlx::query("DELETE FROM metadata WHERE key = ?")
            .bind(key)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    // =========================================================================
    // Market Data
    // =========================================================================

    /// Cached raw export text, if any
    pub async fn load_market_data(&self) -> Result<Option<String>> {
        self.get_metadata(constants::MARKET_DATA_KEY).await
    }

    /// Replace the cached export
    pub async fn store_market_data(&self, raw: &str) -> Result<()> {
        self.set_metadata(constants::MARKET_DATA_KEY, raw).await?;
        self.set_metadata(constants::LOADED_AT_KEY, &Utc::now().to_rfc3339())
            .await?;
        info!("Cached export ({} bytes)", raw.len());
        Ok(())
    }

    /// When the cached export was stored
    pub async fn loaded_at(&self) -> Result<Option<DateTime<Utc>>> {
        let value = self.get_metadata(constants::LOADED_AT_KEY).await?;
        Ok(value
            .and_then(|s| DateTime::parse_from_rfc3339(&s).ok())
            .map(|dt| dt.with_timezone(&Utc)))
    }

    /// Drop the cached export. Returns whether anything was cached.
    pub async fn clear_market_data(&self) -> Result<bool> {
        let existed = self.delete_metadata(constants::MARKET_DATA_KEY).await?;
        self.delete_metadata(constants::LOADED_AT_KEY).await?;
        if existed {
            info!("Cleared cached export");
        }
        Ok(existed)
    }
}
