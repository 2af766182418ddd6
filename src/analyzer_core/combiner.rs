//! Flattening session results into per-symbol records

use crate::mention_core::SessionResult;
use chrono::{DateTime, NaiveDate, Utc};

/// One (session, symbol) row: the unit of aggregation across sessions.
/// Derived on every analysis pass, never persisted as its own entity.
#[derive(Debug, Clone)]
pub struct CombinedRecord {
    pub date: NaiveDate,
    pub date_time: DateTime<Utc>,
    pub timestamp: String,
    pub symbol: String,
    pub mentions: u64,
    pub total_mentions_in_session: u64,
    pub unique_symbols_in_session: usize,
}

/// Flatten every (symbol, count) pair of every session into one record,
/// tagged with the session's timestamp and totals, sorted ascending by
/// session time. An empty session list yields an empty record set.
pub fn combine(sessions: &[SessionResult]) -> Vec<CombinedRecord> {
    let mut records = Vec::new();

    for session in sessions {
        for (symbol, mentions) in session.results.iter() {
            records.push(CombinedRecord {
                date: session.crawl_date.date_naive(),
                date_time: session.crawl_date,
                timestamp: session.timestamp.clone(),
                symbol: symbol.clone(),
                mentions: *mentions,
                total_mentions_in_session: session.total_mentions,
                unique_symbols_in_session: session.total_symbols_found,
            });
        }
    }

    records.sort_by_key(|record| record.date_time);
    records
}

/// All records for one symbol (case-normalized exact match), ascending by
/// timestamp.
pub fn timeline(records: &[CombinedRecord], symbol: &str) -> Vec<CombinedRecord> {
    let wanted = symbol.to_uppercase();
    let mut rows: Vec<CombinedRecord> = records
        .iter()
        .filter(|record| record.symbol == wanted)
        .cloned()
        .collect();
    rows.sort_by_key(|record| record.date_time);
    rows
}
