use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Json, Router,
};
use serde_json::{json, Value};

use crate::screening::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState, max_upload_bytes: usize) -> Router {
    Router::new()
        .route("/health", get(health))
        // Screening API
        .route("/analyze", post(handlers::handle_analyze))
        .route("/rank", post(handlers::handle_rank))
        .route("/history", get(handlers::handle_history))
        .layer(DefaultBodyLimit::max(max_upload_bytes))
        .with_state(state)
}

/// GET /health
async fn health() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "service": env!("CARGO_PKG_NAME"),
        "version": env!("CARGO_PKG_VERSION"),
        "formats": ["pdf", "docx"]
    }))
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;
    use std::sync::Arc;

    use axum::body::Body;
    use axum::http::{header, Request, StatusCode};
    use serde_json::Value;
    use tempfile::TempDir;
    use tower::ServiceExt;

    use super::*;
    use crate::extraction::docx::tests::docx_bytes;
    use crate::extraction::pdf::tests::pdf_bytes;
    use crate::history::JsonFileHistoryStore;
    use crate::screening::pipeline::Screener;
    use crate::screening::segmenter::RuleBasedSegmenter;

    const BOUNDARY: &str = "screener-test-boundary";

    enum Part<'a> {
        File(&'a str, Vec<u8>),
        Text(&'a str, &'a str),
    }

    struct TestApp {
        _dir: TempDir,
        upload_dir: PathBuf,
        state: AppState,
    }

    impl TestApp {
        fn new() -> Self {
            let dir = tempfile::tempdir().unwrap();
            let upload_dir = dir.path().join("uploads");
            std::fs::create_dir_all(&upload_dir).unwrap();
            let state = AppState {
                screener: Arc::new(Screener::new(
                    Arc::new(RuleBasedSegmenter::default()),
                    &upload_dir,
                )),
                history: Arc::new(JsonFileHistoryStore::new(dir.path().join("history.json"))),
            };
            Self {
                _dir: dir,
                upload_dir,
                state,
            }
        }

        async fn send(&self, request: Request<Body>) -> (StatusCode, Value) {
            let response = build_router(self.state.clone(), 1024 * 1024)
                .oneshot(request)
                .await
                .unwrap();
            let status = response.status();
            let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
                .await
                .unwrap();
            (status, serde_json::from_slice(&bytes).unwrap())
        }

        async fn get(&self, uri: &str) -> (StatusCode, Value) {
            self.send(Request::get(uri).body(Body::empty()).unwrap()).await
        }

        async fn post_form(&self, uri: &str, parts: Vec<Part<'_>>) -> (StatusCode, Value) {
            let request = Request::post(uri)
                .header(
                    header::CONTENT_TYPE,
                    format!("multipart/form-data; boundary={BOUNDARY}"),
                )
                .body(Body::from(multipart_body(parts)))
                .unwrap();
            self.send(request).await
        }
    }

    fn multipart_body(parts: Vec<Part<'_>>) -> Vec<u8> {
        let mut body = Vec::new();
        for part in parts {
            body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
            match part {
                Part::File(filename, bytes) => {
                    body.extend_from_slice(
                        format!(
                            "Content-Disposition: form-data; name=\"resumes\"; filename=\"{filename}\"\r\n\
                             Content-Type: application/octet-stream\r\n\r\n"
                        )
                        .as_bytes(),
                    );
                    body.extend_from_slice(&bytes);
                }
                Part::Text(name, value) => {
                    body.extend_from_slice(
                        format!("Content-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}")
                            .as_bytes(),
                    );
                }
            }
            body.extend_from_slice(b"\r\n");
        }
        body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
        body
    }

    #[tokio::test]
    async fn test_health() {
        let app = TestApp::new();
        let (status, body) = app.get("/health").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
    }

    #[tokio::test]
    async fn test_analyze_without_file_is_bad_request() {
        let app = TestApp::new();
        let (status, body) = app
            .post_form("/analyze", vec![Part::Text("skills", "python")])
            .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
        assert_eq!(body["error"]["message"], "No resume uploaded");
    }

    #[tokio::test]
    async fn test_analyze_empty_file_input_is_no_resume() {
        let app = TestApp::new();
        let (status, body) = app
            .post_form("/analyze", vec![Part::File("", Vec::new())])
            .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["message"], "No resume uploaded");
    }

    #[tokio::test]
    async fn test_analyze_rejects_txt() {
        let app = TestApp::new();
        let (status, body) = app
            .post_form(
                "/analyze",
                vec![Part::File("resume.txt", b"python".to_vec())],
            )
            .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["message"], "Only PDF or DOCX allowed");
    }

    #[tokio::test]
    async fn test_analyze_returns_result_and_records_history() {
        let app = TestApp::new();
        let (status, body) = app
            .post_form(
                "/analyze",
                vec![
                    Part::File("cv.docx", docx_bytes(&["Incident response, malware and SIEM"])),
                    Part::Text("skills", "Cyber Security, Python"),
                    Part::Text("experience", "abc"),
                ],
            )
            .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["domain"], "cyber_forensics");
        assert_eq!(body["matchedSkills"], serde_json::json!(["cyber security"]));
        assert_eq!(
            body["detectedSkills"],
            serde_json::json!(["incident response", "malware", "siem"])
        );
        // 50% match, experience defaulted to 0
        assert_eq!(body["score"], 30);
        assert_eq!(body["decision"], "CONDITIONAL");

        let (status, history) = app.get("/history").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(history.as_array().unwrap().len(), 1);
        assert_eq!(history[0]["resume"], "cv.docx");
        assert_eq!(history[0]["decision"], "CONDITIONAL");
        assert_eq!(std::fs::read_dir(&app.upload_dir).unwrap().count(), 0);
    }

    #[tokio::test]
    async fn test_analyze_uppercase_pdf() {
        let app = TestApp::new();
        let (status, body) = app
            .post_form(
                "/analyze",
                vec![
                    Part::File("resume.PDF", pdf_bytes(&["Python Developer, AWS Cloud"])),
                    Part::Text("skills", "python, aws"),
                    Part::Text("experience", "2"),
                ],
            )
            .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["domain"], "technology");
        assert_eq!(body["matchedSkills"], serde_json::json!(["python", "aws"]));
        assert_eq!(body["score"], 80);
        assert_eq!(body["decision"], "SUITABLE");
        assert_eq!(std::fs::read_dir(&app.upload_dir).unwrap().count(), 0);
    }

    #[tokio::test]
    async fn test_analyze_unreadable_document() {
        let app = TestApp::new();
        let (status, body) = app
            .post_form(
                "/analyze",
                vec![Part::File("cv.pdf", b"%PDF-garbage".to_vec())],
            )
            .await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["error"]["code"], "UNREADABLE_DOCUMENT");
        assert_eq!(std::fs::read_dir(&app.upload_dir).unwrap().count(), 0);
    }

    #[tokio::test]
    async fn test_rank_skips_unsupported_and_assigns_ranks() {
        let app = TestApp::new();
        let (status, body) = app
            .post_form(
                "/rank",
                vec![
                    Part::File("low.docx", docx_bytes(&["java developer"])),
                    Part::File("skip.txt", b"python".to_vec()),
                    Part::File("high.DOCX", docx_bytes(&["python developer, aws cloud"])),
                    Part::Text("skills", "python,aws"),
                    Part::Text("experience", "1"),
                ],
            )
            .await;

        assert_eq!(status, StatusCode::OK);
        let ranked = body.as_array().unwrap();
        assert_eq!(ranked.len(), 2);
        assert_eq!(ranked[0]["resume"], "high.DOCX");
        assert_eq!(ranked[0]["rank"], 1);
        assert_eq!(ranked[0]["score"], 70);
        assert_eq!(ranked[1]["resume"], "low.docx");
        assert_eq!(ranked[1]["rank"], 2);
        assert!(ranked[0].get("matchedSkills").is_none());

        let (_, history) = app.get("/history").await;
        assert_eq!(history, serde_json::json!([]));
    }
}
