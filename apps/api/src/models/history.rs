use anyhow::{anyhow, Result};
use chrono::Local;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::screening::domain::Domain;
use crate::screening::scorer::{Decision, ScoreResult};

/// `DD-MM-YYYY HH:MM`, local time.
pub const HISTORY_DATE_FORMAT: &str = "%d-%m-%Y %H:%M";

/// One completed single-résumé evaluation, as kept in the history log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryRecord {
    /// Original upload filename.
    pub resume: String,
    pub domain: Domain,
    pub score: u32,
    pub decision: Decision,
    pub date: String,
}

impl HistoryRecord {
    /// Stamps a record for `result` with the current local time.
    pub fn from_result(resume: impl Into<String>, result: &ScoreResult) -> Self {
        Self {
            resume: resume.into(),
            domain: result.domain,
            score: result.score,
            decision: result.decision,
            date: Local::now().format(HISTORY_DATE_FORMAT).to_string(),
        }
    }
}

#[derive(Debug, Clone, FromRow)]
pub struct HistoryRow {
    pub resume: String,
    pub domain: String,
    pub score: i32,
    pub decision: String,
    pub date: String,
}

impl TryFrom<HistoryRow> for HistoryRecord {
    type Error = anyhow::Error;

    fn try_from(row: HistoryRow) -> Result<Self> {
        Ok(HistoryRecord {
            domain: Domain::parse(&row.domain)
                .ok_or_else(|| anyhow!("unknown domain '{}'", row.domain))?,
            decision: Decision::parse(&row.decision)
                .ok_or_else(|| anyhow!("unknown decision '{}'", row.decision))?,
            score: u32::try_from(row.score)?,
            resume: row.resume,
            date: row.date,
        })
    }
}
