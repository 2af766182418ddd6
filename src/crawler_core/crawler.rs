//! The crawl loop: posts and comments in, one session result out

use super::feed::{FeedClient, FeedError};
use crate::config::CrawlerConfig;
use crate::mention_core::{MentionRun, SessionResult, SymbolCatalog, SymbolExtractor};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::mpsc;

/// Immutable progress snapshot published after each processed post.
#[derive(Debug, Clone)]
pub struct CrawlProgress {
    pub percent: f64,
    pub message: String,
}

#[derive(Debug)]
pub enum CrawlError {
    Feed(FeedError),
}

impl From<FeedError> for CrawlError {
    fn from(err: FeedError) -> Self {
        CrawlError::Feed(err)
    }
}

impl std::fmt::Display for CrawlError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CrawlError::Feed(e) => write!(f, "Crawl failed: {}", e),
        }
    }
}

impl std::error::Error for CrawlError {}

/// Drives one bounded crawl run over a feed client.
///
/// Cancellation is cooperative: the flag is observed between posts, so an
/// in-flight comment fetch finishes before the crawl stops. No timeout is
/// enforced on the underlying fetch calls.
pub struct Crawler {
    catalog: Arc<SymbolCatalog>,
    extractor: SymbolExtractor,
    feed: String,
    post_limit: usize,
    comment_limit: usize,
    cancel: Arc<AtomicBool>,
    progress_tx: Option<mpsc::Sender<CrawlProgress>>,
}

impl Crawler {
    pub fn new(config: &CrawlerConfig, catalog: Arc<SymbolCatalog>) -> Self {
        Self {
            catalog,
            extractor: SymbolExtractor::new(config.min_symbol_length, config.max_symbol_length),
            feed: config.feed.clone(),
            post_limit: config.post_limit,
            comment_limit: config.comment_limit,
            cancel: Arc::new(AtomicBool::new(false)),
            progress_tx: None,
        }
    }

    /// Attach a bounded progress channel. Updates are dropped, never
    /// blocked on, when the receiver lags.
    pub fn with_progress(mut self, tx: mpsc::Sender<CrawlProgress>) -> Self {
        self.progress_tx = Some(tx);
        self
    }

    /// Handle for requesting cooperative cancellation from another task.
    pub fn cancel_flag(&self) -> Arc<AtomicBool> {
        self.cancel.clone()
    }

    pub async fn crawl(&self, client: &dyn FeedClient) -> Result<SessionResult, CrawlError> {
        log::info!("🚀 Starting to crawl feed '{}'", self.feed);

        let mut run = MentionRun::new(&self.feed);
        let posts = client.fetch_posts(&self.feed, self.post_limit).await?;
        let total = posts.len();

        for (index, post) in posts.iter().enumerate() {
            if self.cancel.load(Ordering::Relaxed) {
                log::info!("🛑 Crawl cancelled after {} of {} posts", index, total);
                break;
            }

            run.record_text(&self.extractor, &self.catalog, &post.title);
            run.record_text(&self.extractor, &self.catalog, &post.body);

            match client.fetch_comments(&post.id, self.comment_limit).await {
                Ok(comments) => {
                    for comment in &comments {
                        run.record_text(&self.extractor, &self.catalog, &comment.body);
                    }
                }
                Err(e) => {
                    log::warn!("Error processing comments for post {}: {}", post.id, e);
                }
            }

            let processed = index + 1;
            self.publish_progress(processed, total);

            let title: String = post.title.chars().take(50).collect();
            log::info!("Processed post {}/{}: {}...", processed, total, title);
        }

        let result = run.finalize();
        log::info!(
            "✅ Crawling completed. Found {} unique symbols",
            result.total_symbols_found
        );
        Ok(result)
    }

    fn publish_progress(&self, processed: usize, total: usize) {
        if let Some(tx) = &self.progress_tx {
            let percent = if total == 0 {
                100.0
            } else {
                processed as f64 / total as f64 * 100.0
            };
            let update = CrawlProgress {
                percent,
                message: format!("Processed {}/{} posts", processed, total),
            };
            if tx.try_send(update).is_err() {
                log::debug!("Progress channel full, dropping update");
            }
        }
    }
}
