//! Session persistence and enumeration over a storage backend
//!
//! Owns the canonical key scheme `<area>/<sessionId>/<filename>` and the
//! directory-style session listing that both backends must satisfy with
//! identical ordering and dedup guarantees.

use super::backend::{StorageBackend, StorageError};
use crate::analyzer_core::report::AnalysisArtifacts;
use crate::mention_core::{SessionId, SessionResult};
use std::collections::BTreeSet;
use std::fs;
use std::path::Path;
use std::sync::Arc;

pub const RESULT_FILE: &str = "mentions.json";
pub const TABLE_FILE: &str = "mentions.csv";
pub const LOG_FILE: &str = "crawler.log";
pub const COMBINED_FILE: &str = "combined_analysis.csv";
pub const TOP_SYMBOLS_FILE: &str = "top_symbols.csv";
pub const TRENDING_FILE: &str = "trending_symbols.csv";
pub const SUMMARY_FILE: &str = "summary_report.json";

/// Storage areas a session may own keys under
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageArea {
    Results,
    Analysis,
    Logs,
}

impl StorageArea {
    pub fn as_str(&self) -> &'static str {
        match self {
            StorageArea::Results => "results",
            StorageArea::Analysis => "analysis",
            StorageArea::Logs => "logs",
        }
    }
}

#[derive(Debug)]
pub enum StoreError {
    NotFound(String),
    Parse(String),
    Storage(StorageError),
}

impl From<StorageError> for StoreError {
    fn from(err: StorageError) -> Self {
        StoreError::Storage(err)
    }
}

impl std::fmt::Display for StoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StoreError::NotFound(session) => write!(f, "Session not found: {}", session),
            StoreError::Parse(msg) => write!(f, "Malformed session data: {}", msg),
            StoreError::Storage(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for StoreError {}

/// Collect the delimiter-bounded groups directly under a prefix.
///
/// `results/2025-07-07/210032/mentions.json` grouped under `results/`
/// yields `results/2025-07-07/`. This is the flat-key equivalent of one
/// delimiter-bounded object-store scan and works unchanged over the local
/// backend's walked keys.
fn common_prefixes(keys: &[String], prefix: &str) -> Vec<String> {
    let mut groups = BTreeSet::new();
    for key in keys {
        if let Some(rest) = key.strip_prefix(prefix) {
            if let Some(end) = rest.find('/') {
                groups.insert(format!("{}{}/", prefix, &rest[..end]));
            }
        }
    }
    groups.into_iter().collect()
}

pub struct SessionStore {
    backend: Arc<dyn StorageBackend>,
}

impl SessionStore {
    pub fn new(backend: Arc<dyn StorageBackend>) -> Self {
        Self { backend }
    }

    fn session_prefix(&self, area: StorageArea, session_id: &SessionId) -> String {
        format!("{}/{}", area.as_str(), session_id.as_str())
    }

    /// Write the structured result record and the tabular dump for one
    /// session. Both writes are attempted and logged individually; the call
    /// succeeds only if every attempted write succeeded. Partial writes are
    /// not rolled back.
    pub async fn save(&self, result: &SessionResult) -> Result<SessionId, StoreError> {
        let session_id = result.session_id().ok_or_else(|| {
            StoreError::Parse(format!("invalid session timestamp: {}", result.timestamp))
        })?;
        let prefix = self.session_prefix(StorageArea::Results, &session_id);

        let json = result
            .to_json()
            .map_err(|e| StoreError::Parse(e.to_string()))?;
        let csv = result.to_csv();

        let mut first_failure: Option<StorageError> = None;
        for (name, content) in [(RESULT_FILE, json), (TABLE_FILE, csv)] {
            let key = format!("{}{}", prefix, name);
            match self.backend.put(&key, content.as_bytes()).await {
                Ok(()) => log::info!("💾 Saved {}", key),
                Err(e) => {
                    log::error!("Failed to save {}: {}", key, e);
                    if first_failure.is_none() {
                        first_failure = Some(e);
                    }
                }
            }
        }

        match first_failure {
            Some(e) => Err(e.into()),
            None => Ok(session_id),
        }
    }

    /// Load exactly one session's primary result file. A missing or
    /// malformed file is fatal for this call.
    pub async fn load(&self, session_id: &SessionId) -> Result<SessionResult, StoreError> {
        let key = format!(
            "{}{}",
            self.session_prefix(StorageArea::Results, session_id),
            RESULT_FILE
        );
        let content = self.backend.get(&key).await.map_err(|e| match e {
            StorageError::NotFound(_) => StoreError::NotFound(session_id.to_string()),
            other => StoreError::Storage(other),
        })?;
        SessionResult::from_json(&content)
            .map_err(|e| StoreError::Parse(format!("{}: {}", key, e)))
    }

    /// Load every stored session, newest first. Missing or malformed
    /// sessions are skipped with a warning; backend failures surface.
    pub async fn load_all(&self) -> Result<Vec<SessionResult>, StoreError> {
        let sessions = self.list_sessions(StorageArea::Results).await?;
        let mut results = Vec::with_capacity(sessions.len());

        for session_id in &sessions {
            match self.load(session_id).await {
                Ok(result) => results.push(result),
                Err(StoreError::NotFound(_)) => {
                    log::warn!("Skipping session {}: result file missing", session_id);
                }
                Err(StoreError::Parse(msg)) => {
                    log::warn!("Skipping malformed session {}: {}", session_id, msg);
                }
                Err(e) => return Err(e),
            }
        }

        log::info!("Loaded {} result files", results.len());
        Ok(results)
    }

    /// Enumerate session ids under an area, descending (newest first).
    ///
    /// Two nested delimiter-bounded prefix scans: date groups directly
    /// under the area root, then time groups beneath each date prefix.
    /// Ids deduplicate into a set; because the id format is zero-padded,
    /// descending lexicographic order equals descending chronological
    /// order.
    pub async fn list_sessions(&self, area: StorageArea) -> Result<Vec<SessionId>, StoreError> {
        let area_prefix = format!("{}/", area.as_str());
        let keys = self.backend.list(&area_prefix).await?;

        let mut sessions = BTreeSet::new();
        for date_prefix in common_prefixes(&keys, &area_prefix) {
            let date_keys = self.backend.list(&date_prefix).await?;
            for time_prefix in common_prefixes(&date_keys, &date_prefix) {
                if let Some(relative) = time_prefix.strip_prefix(&area_prefix) {
                    if let Some(session_id) = SessionId::parse(relative) {
                        sessions.insert(session_id);
                    }
                }
            }
        }

        log::info!("{} unique sessions found under {}", sessions.len(), area_prefix);
        Ok(sessions.into_iter().rev().collect())
    }

    /// Move a session's local log file into storage: upload to the
    /// session's results area, then delete the local copy once persisted.
    pub async fn persist_log(
        &self,
        session_id: &SessionId,
        local_path: &Path,
    ) -> Result<(), StoreError> {
        let content = fs::read(local_path).map_err(|e| {
            StoreError::Storage(StorageError::Write(format!(
                "{}: {}",
                local_path.display(),
                e
            )))
        })?;

        let key = format!(
            "{}{}",
            self.session_prefix(StorageArea::Results, session_id),
            LOG_FILE
        );
        self.backend.put(&key, &content).await?;
        log::info!("📤 Session log persisted to {}", key);

        if let Err(e) = fs::remove_file(local_path) {
            log::warn!("Could not delete local log {}: {}", local_path.display(), e);
        }
        Ok(())
    }

    /// Write the analysis artifacts for a session under the analysis area.
    /// Same per-artifact outcome policy as `save`.
    pub async fn save_analysis(
        &self,
        session_id: &SessionId,
        artifacts: &AnalysisArtifacts,
    ) -> Result<(), StoreError> {
        let prefix = self.session_prefix(StorageArea::Analysis, session_id);

        let mut pending: Vec<(&str, &str)> = Vec::new();
        if let Some(combined) = &artifacts.combined {
            pending.push((COMBINED_FILE, combined.as_str()));
        }
        if let Some(top) = &artifacts.top_symbols {
            pending.push((TOP_SYMBOLS_FILE, top.as_str()));
        }
        if let Some(trending) = &artifacts.trending {
            pending.push((TRENDING_FILE, trending.as_str()));
        }
        pending.push((SUMMARY_FILE, artifacts.summary.as_str()));

        let mut first_failure: Option<StorageError> = None;
        for (name, content) in pending {
            let key = format!("{}{}", prefix, name);
            match self.backend.put(&key, content.as_bytes()).await {
                Ok(()) => log::info!("💾 Saved {}", key),
                Err(e) => {
                    log::error!("Failed to save {}: {}", key, e);
                    if first_failure.is_none() {
                        first_failure = Some(e);
                    }
                }
            }
        }

        match first_failure {
            Some(e) => Err(e.into()),
            None => Ok(()),
        }
    }
}
