//! Axum route handlers for the Screening API.

use axum::{
    extract::{Multipart, State},
    Json,
};

use crate::errors::AppError;
use crate::extraction::Document;
use crate::models::history::HistoryRecord;
use crate::screening::pipeline::{analyze, rank, RankedResume};
use crate::screening::scorer::{ScoreResult, ScreeningCriteria};
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Multipart form
// ────────────────────────────────────────────────────────────────────────────

/// Fields of the upload form shared by `/analyze` and `/rank`.
///
/// - `resumes`: one or more files. Parts without a filename (a browser
///   submits one for an empty file input) are dropped before validation, so
///   such a request is answered with "No resume uploaded" rather than
///   "Only PDF or DOCX allowed".
/// - `skills`: comma-separated required skills
/// - `experience`: years of experience, parsed leniently
#[derive(Debug, Default)]
pub struct ScreeningForm {
    pub documents: Vec<Document>,
    pub skills: String,
    pub experience: String,
}

impl ScreeningForm {
    pub async fn from_multipart(mut multipart: Multipart) -> Result<Self, AppError> {
        let mut form = ScreeningForm::default();

        while let Some(field) = multipart.next_field().await? {
            let name = field.name().map(str::to_owned);
            match name.as_deref() {
                Some("resumes") => {
                    let filename = field.file_name().unwrap_or_default().to_string();
                    let bytes = field.bytes().await?;
                    // empty file input
                    if !filename.is_empty() {
                        form.documents.push(Document::new(filename, bytes));
                    }
                }
                Some("skills") => form.skills = field.text().await?,
                Some("experience") => form.experience = field.text().await?,
                _ => {}
            }
        }

        Ok(form)
    }

    fn into_parts(self) -> (Vec<Document>, ScreeningCriteria) {
        let criteria = ScreeningCriteria::from_form(&self.skills, &self.experience);
        (self.documents, criteria)
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /analyze
///
/// Scores the first uploaded résumé and appends it to the history log.
pub async fn handle_analyze(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<ScoreResult>, AppError> {
    let (documents, criteria) = ScreeningForm::from_multipart(multipart).await?.into_parts();

    let result = analyze(
        state.screener.clone(),
        state.history.as_ref(),
        documents,
        criteria,
    )
    .await?;

    Ok(Json(result))
}

/// POST /rank
///
/// Scores every uploaded PDF/DOCX résumé against the same criteria and
/// returns them best first. Other files are skipped.
pub async fn handle_rank(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<Vec<RankedResume>>, AppError> {
    let (documents, criteria) = ScreeningForm::from_multipart(multipart).await?.into_parts();

    let ranked = rank(state.screener.clone(), documents, criteria).await?;

    Ok(Json(ranked))
}

/// GET /history
pub async fn handle_history(State(state): State<AppState>) -> Json<Vec<HistoryRecord>> {
    Json(state.history.read_all().await)
}
