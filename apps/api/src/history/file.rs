use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use async_trait::async_trait;
use tokio::sync::Mutex;
use tracing::{debug, warn};

use crate::history::HistoryStore;
use crate::models::history::HistoryRecord;

/// History kept as one JSON array in a single file.
///
/// Appends rewrite the whole file through a sibling temp file and a rename, so
/// a crash mid-write leaves the previous contents intact. The mutex serializes
/// read-modify-write cycles within this process.
pub struct JsonFileHistoryStore {
    path: PathBuf,
    lock: Mutex<()>,
}

impl JsonFileHistoryStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn load(&self) -> Vec<HistoryRecord> {
        let bytes = match tokio::fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => return Vec::new(),
            Err(e) => {
                warn!("History file {} unreadable, treating as empty: {e}", self.path.display());
                return Vec::new();
            }
        };

        serde_json::from_slice(&bytes).unwrap_or_else(|e| {
            warn!("History file {} is corrupt, treating as empty: {e}", self.path.display());
            Vec::new()
        })
    }
}

#[async_trait]
impl HistoryStore for JsonFileHistoryStore {
    async fn append(&self, record: HistoryRecord) -> Result<()> {
        let _guard = self.lock.lock().await;

        let mut records = self.load().await;
        records.push(record);
        let json = serde_json::to_vec_pretty(&records)?;

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent)
                .await
                .with_context(|| format!("Cannot create history directory '{}'", parent.display()))?;
        }

        let staging = self.path.with_extension("json.tmp");
        tokio::fs::write(&staging, json)
            .await
            .with_context(|| format!("Cannot write '{}'", staging.display()))?;
        tokio::fs::rename(&staging, &self.path)
            .await
            .with_context(|| format!("Cannot replace '{}'", self.path.display()))?;

        debug!(records = records.len(), "History appended");
        Ok(())
    }

    async fn read_all(&self) -> Vec<HistoryRecord> {
        let _guard = self.lock.lock().await;
        self.load().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::screening::domain::Domain;
    use crate::screening::scorer::Decision;

    fn record(name: &str, score: u32) -> HistoryRecord {
        HistoryRecord {
            resume: name.to_string(),
            domain: Domain::Technology,
            score,
            decision: Decision::Conditional,
            date: "17-10-2026 12:00".to_string(),
        }
    }

    #[tokio::test]
    async fn test_missing_file_reads_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileHistoryStore::new(dir.path().join("history.json"));
        assert!(store.read_all().await.is_empty());
    }

    #[tokio::test]
    async fn test_corrupt_file_reads_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("history.json");
        std::fs::write(&path, "{ not json ]").unwrap();

        let store = JsonFileHistoryStore::new(&path);
        assert!(store.read_all().await.is_empty());
    }

    #[tokio::test]
    async fn test_append_then_read_preserves_order() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileHistoryStore::new(dir.path().join("history.json"));

        for i in 0..5 {
            store.append(record(&format!("cv{i}.pdf"), i * 10)).await.unwrap();
        }

        let records = store.read_all().await;
        let names: Vec<_> = records.iter().map(|r| r.resume.as_str()).collect();
        assert_eq!(names, vec!["cv0.pdf", "cv1.pdf", "cv2.pdf", "cv3.pdf", "cv4.pdf"]);
    }

    #[tokio::test]
    async fn test_records_survive_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("history.json");

        {
            let store = JsonFileHistoryStore::new(&path);
            store.append(record("first.docx", 40)).await.unwrap();
            store.append(record("second.pdf", 90)).await.unwrap();
        }

        let reopened = JsonFileHistoryStore::new(&path);
        assert_eq!(
            reopened.read_all().await,
            vec![record("first.docx", 40), record("second.pdf", 90)]
        );
        assert!(!path.with_extension("json.tmp").exists());
    }

    #[tokio::test]
    async fn test_append_over_corrupt_file_starts_fresh() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("history.json");
        std::fs::write(&path, "garbage").unwrap();

        let store = JsonFileHistoryStore::new(&path);
        store.append(record("new.pdf", 50)).await.unwrap();
        assert_eq!(store.read_all().await, vec![record("new.pdf", 50)]);
    }

    #[tokio::test]
    async fn test_concurrent_appends_all_kept() {
        let dir = tempfile::tempdir().unwrap();
        let store = std::sync::Arc::new(JsonFileHistoryStore::new(dir.path().join("h.json")));

        let handles: Vec<_> = (0..8)
            .map(|i| {
                let store = store.clone();
                tokio::spawn(async move { store.append(record(&format!("{i}.pdf"), i)).await })
            })
            .collect();
        for h in handles {
            h.await.unwrap().unwrap();
        }

        assert_eq!(store.read_all().await.len(), 8);
    }
}
