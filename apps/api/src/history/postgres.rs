use anyhow::{Context, Result};
use async_trait::async_trait;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use tracing::{info, warn};

use crate::history::HistoryStore;
use crate::models::history::{HistoryRecord, HistoryRow};

const CREATE_TABLE: &str = r#"
    CREATE TABLE IF NOT EXISTS screening_history (
        id          BIGSERIAL PRIMARY KEY,
        resume      TEXT    NOT NULL,
        domain      TEXT    NOT NULL,
        score       INTEGER NOT NULL,
        decision    TEXT    NOT NULL,
        recorded_at TEXT    NOT NULL
    )
"#;

/// History kept in PostgreSQL. Append-only: rows are inserted, never updated.
pub struct PgHistoryStore {
    pool: PgPool,
}

impl PgHistoryStore {
    /// Connects and creates the history table if it does not exist yet.
    pub async fn connect(database_url: &str) -> Result<Self> {
        info!("Connecting to PostgreSQL...");
        let pool = PgPoolOptions::new()
            .max_connections(5)
            .connect(database_url)
            .await
            .context("Cannot connect to DATABASE_URL")?;

        sqlx::query(CREATE_TABLE)
            .execute(&pool)
            .await
            .context("Cannot create screening_history table")?;

        info!("PostgreSQL history store ready");
        Ok(Self { pool })
    }
}

#[async_trait]
impl HistoryStore for PgHistoryStore {
    async fn append(&self, record: HistoryRecord) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO screening_history (resume, domain, score, decision, recorded_at)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(&record.resume)
        .bind(record.domain.as_str())
        .bind(i32::try_from(record.score)?)
        .bind(record.decision.as_str())
        .bind(&record.date)
        .execute(&self.pool)
        .await
        .context("Cannot insert history record")?;

        Ok(())
    }

    async fn read_all(&self) -> Vec<HistoryRecord> {
        let rows: Vec<HistoryRow> = match sqlx::query_as(
            r#"
            SELECT resume, domain, score, decision, recorded_at AS date
            FROM screening_history
            ORDER BY id
            "#,
        )
        .fetch_all(&self.pool)
        .await
        {
            Ok(rows) => rows,
            Err(e) => {
                warn!("History table unreadable, treating as empty: {e}");
                return Vec::new();
            }
        };

        rows.into_iter()
            .filter_map(|row| match HistoryRecord::try_from(row) {
                Ok(record) => Some(record),
                Err(e) => {
                    warn!("Skipping malformed history row: {e}");
                    None
                }
            })
            .collect()
    }
}
