//! Analyze Binary - Cross-Session Trend Analysis
//!
//! Loads every stored crawl session, rebuilds the combined record set, and
//! persists the analysis artifacts under a fresh session id.
//!
//! ## Usage
//!
//! ```bash
//! cargo run --release --bin analyze
//! ```
//!
//! ## Environment Variables
//!
//! - STORAGE_BACKEND - 'local' or 'object-store' (default: local)
//! - STORAGE_ROOT - Root directory for the local backend (default: data)
//! - STORAGE_BUCKET - Bucket identity for the object-store backend
//! - RUST_LOG - Logging level (optional, default: info)

use chrono::Utc;
use mentionflow::analyzer_core::{build_artifacts, combine, summarize_as_of};
use mentionflow::config::{BackendType, StorageConfig};
use mentionflow::mention_core::SessionId;
use mentionflow::storage_core::{LocalStorage, SessionStore, StorageBackend};
use std::sync::Arc;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Stderr)
        .init();

    dotenv::dotenv().ok();

    let config = StorageConfig::from_env()?;

    let backend: Arc<dyn StorageBackend> = match config.backend {
        BackendType::Local => Arc::new(LocalStorage::new(config.local_root.clone())),
        BackendType::ObjectStore => {
            // The object-store SDK adapter is wired by the embedding host;
            // this binary only ships with the local backend.
            return Err("object-store backend requires an ObjectStoreClient adapter; \
                        set STORAGE_BACKEND=local to analyze a local mirror"
                .into());
        }
    };

    log::info!("🚀 Starting full analysis");
    log::info!("   Backend: {}", backend.backend_type());
    log::info!("   Root: {}", config.local_root.display());

    let store = SessionStore::new(backend);

    let sessions = store.load_all().await?;
    if sessions.is_empty() {
        log::warn!("No result files found");
        return Ok(());
    }

    let records = combine(&sessions);
    log::info!("Created combined record set with {} rows", records.len());

    let today = Utc::now().date_naive();
    let summary = summarize_as_of(&sessions, &records, today);
    let artifacts = build_artifacts(&sessions, &records, today)?;

    let session_id = SessionId::now();
    store.save_analysis(&session_id, &artifacts).await?;

    log::info!("✅ Full analysis completed");
    log::info!("   Total crawls: {}", summary.total_crawls);
    log::info!("   Unique symbols: {}", summary.unique_symbols);
    log::info!("   Total mentions: {}", summary.total_mentions);
    if let Some(range) = &summary.date_range {
        log::info!("   Date range: {}", range);
    }
    for row in summary.top_symbols.iter().take(5) {
        log::info!("   {}: {} mentions", row.symbol, row.mentions);
    }

    Ok(())
}
