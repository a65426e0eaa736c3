//! Append-only log of single-résumé evaluations.
//!
//! Two backends share the `HistoryStore` trait:
//! - `JsonFileHistoryStore`: a pretty-printed JSON array on disk (default)
//! - `PgHistoryStore`: a PostgreSQL table, selected when `DATABASE_URL` is set
//!
//! Reads never fail: a missing, unreadable or corrupt store reads as empty.

pub mod file;
pub mod postgres;

use anyhow::Result;
use async_trait::async_trait;

use crate::models::history::HistoryRecord;

pub use file::JsonFileHistoryStore;
pub use postgres::PgHistoryStore;

#[async_trait]
pub trait HistoryStore: Send + Sync {
    /// Durably appends one record after any previously appended records.
    async fn append(&self, record: HistoryRecord) -> Result<()>;

    /// Every record in append order.
    async fn read_all(&self) -> Vec<HistoryRecord>;
}
