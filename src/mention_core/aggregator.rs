//! Per-run mention accumulation

use super::catalog::SymbolCatalog;
use super::extractor::SymbolExtractor;
use super::session::{SessionResult, SymbolCounts, COMPACT_TIMESTAMP_FORMAT};
use chrono::{DateTime, Utc};
use std::collections::HashMap;

/// Accumulates extracted mentions for one crawl run.
///
/// Pure accumulation logic: no network or storage calls. The run is owned
/// exclusively by the crawl task driving it.
pub struct MentionRun {
    feed: String,
    started_at: DateTime<Utc>,
    counts: HashMap<String, u64>,
    seen_order: Vec<String>,
}

impl MentionRun {
    pub fn new(feed: &str) -> Self {
        Self::new_at(feed, Utc::now())
    }

    pub fn new_at(feed: &str, started_at: DateTime<Utc>) -> Self {
        Self {
            feed: feed.to_string(),
            started_at,
            counts: HashMap::new(),
            seen_order: Vec::new(),
        }
    }

    /// Extract mentions from one text unit and count each occurrence.
    ///
    /// Ten occurrences of a symbol in one comment count as ten mentions.
    /// Returns the number of mentions recorded.
    pub fn record_text(
        &mut self,
        extractor: &SymbolExtractor,
        catalog: &SymbolCatalog,
        text: &str,
    ) -> usize {
        let mentions = extractor.extract(text, catalog);
        for symbol in &mentions {
            if !self.counts.contains_key(symbol) {
                self.seen_order.push(symbol.clone());
            }
            *self.counts.entry(symbol.clone()).or_insert(0) += 1;
        }
        mentions.len()
    }

    pub fn unique_symbols(&self) -> usize {
        self.counts.len()
    }

    pub fn mention_count(&self, symbol: &str) -> u64 {
        self.counts.get(symbol).copied().unwrap_or(0)
    }

    /// Close the run: sort counts descending (stable, so ties keep
    /// first-insertion order) and compute the totals.
    pub fn finalize(self) -> SessionResult {
        let MentionRun {
            feed,
            started_at,
            mut counts,
            seen_order,
        } = self;

        let mut pairs: Vec<(String, u64)> = seen_order
            .into_iter()
            .map(|symbol| {
                let count = counts.remove(&symbol).unwrap_or(0);
                (symbol, count)
            })
            .collect();
        pairs.sort_by(|a, b| b.1.cmp(&a.1));

        let total_mentions: u64 = pairs.iter().map(|(_, count)| count).sum();

        SessionResult {
            timestamp: started_at.format(COMPACT_TIMESTAMP_FORMAT).to_string(),
            crawl_date: started_at,
            total_symbols_found: pairs.len(),
            total_mentions,
            feed,
            results: SymbolCounts::new(pairs),
        }
    }
}
