//! Pipeline orchestration: extension gate → text extraction → scoring, for
//! one résumé (`analyze`) or a batch (`rank`).
//!
//! Extraction and scoring are CPU-bound and run inside `spawn_blocking`.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::errors::AppError;
use crate::extraction::{extract_text, Document, DocumentKind, ExtractionError};
use crate::history::HistoryStore;
use crate::models::history::HistoryRecord;
use crate::screening::domain::Domain;
use crate::screening::scorer::{Decision, ResumeScorer, ScoreResult, ScreeningCriteria};
use crate::screening::segmenter::PhraseSegmenter;

/// Summary line of a batch ranking.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankedResume {
    pub resume: String,
    pub domain: Domain,
    pub score: u32,
    pub decision: Decision,
    /// 1 = highest score. Equal scores keep submission order.
    pub rank: usize,
}

/// Extracts and scores documents. Shared across requests as `Arc<Screener>`.
pub struct Screener {
    scorer: ResumeScorer,
    upload_dir: PathBuf,
}

impl Screener {
    pub fn new(segmenter: Arc<dyn PhraseSegmenter>, upload_dir: impl Into<PathBuf>) -> Self {
        Self {
            scorer: ResumeScorer::new(segmenter),
            upload_dir: upload_dir.into(),
        }
    }

    pub fn upload_dir(&self) -> &Path {
        &self.upload_dir
    }

    /// Blocking: stages the document, extracts its text and scores it.
    pub fn evaluate(
        &self,
        document: &Document,
        kind: DocumentKind,
        criteria: &ScreeningCriteria,
    ) -> Result<ScoreResult, ExtractionError> {
        let text = extract_text(document, kind, &self.upload_dir)?;
        Ok(self.scorer.score(&text, criteria))
    }

    /// Blocking: scores every allowed document, then ranks by score.
    /// Documents with other extensions are left out of the ranking.
    pub fn rank_documents(
        &self,
        documents: &[Document],
        criteria: &ScreeningCriteria,
    ) -> Result<Vec<RankedResume>, ExtractionError> {
        let mut ranked = Vec::with_capacity(documents.len());

        for document in documents {
            let Some(kind) = document.kind() else {
                debug!(filename = %document.filename, "Skipping unsupported file in batch");
                continue;
            };
            let result = self.evaluate(document, kind, criteria)?;
            ranked.push(RankedResume {
                resume: document.filename.clone(),
                domain: result.domain,
                score: result.score,
                decision: result.decision,
                rank: 0,
            });
        }

        // sort_by is stable: ties stay in submission order
        ranked.sort_by(|a, b| b.score.cmp(&a.score));
        for (i, entry) in ranked.iter_mut().enumerate() {
            entry.rank = i + 1;
        }
        Ok(ranked)
    }
}

/// Evaluates the first uploaded document and records it in the history log.
pub async fn analyze(
    screener: Arc<Screener>,
    history: &dyn HistoryStore,
    documents: Vec<Document>,
    criteria: ScreeningCriteria,
) -> Result<ScoreResult, AppError> {
    let document = documents
        .into_iter()
        .next()
        .ok_or_else(|| AppError::Validation("No resume uploaded".to_string()))?;
    let kind = document
        .kind()
        .ok_or_else(|| AppError::Validation("Only PDF or DOCX allowed".to_string()))?;
    let filename = document.filename.clone();

    let result = tokio::task::spawn_blocking(move || screener.evaluate(&document, kind, &criteria))
        .await
        .map_err(|e| AppError::Internal(anyhow::anyhow!("spawn_blocking failed in analysis: {e}")))??;

    history
        .append(HistoryRecord::from_result(&filename, &result))
        .await?;

    info!(
        %filename,
        domain = %result.domain,
        score = result.score,
        decision = result.decision.as_str(),
        "Résumé analyzed"
    );
    Ok(result)
}

/// Scores and ranks a batch. Nothing is written to the history log.
pub async fn rank(
    screener: Arc<Screener>,
    documents: Vec<Document>,
    criteria: ScreeningCriteria,
) -> Result<Vec<RankedResume>, AppError> {
    let submitted = documents.len();

    let ranked =
        tokio::task::spawn_blocking(move || screener.rank_documents(&documents, &criteria))
            .await
            .map_err(|e| AppError::Internal(anyhow::anyhow!("spawn_blocking failed in ranking: {e}")))??;

    info!(submitted, ranked = ranked.len(), "Résumé batch ranked");
    Ok(ranked)
}
