//! Symbol ranking across sessions

use super::combiner::CombinedRecord;
use chrono::{Duration, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A symbol with its summed mention count. Wire names match the tabular
/// artifact columns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SymbolTotal {
    #[serde(rename = "Symbol")]
    pub symbol: String,
    #[serde(rename = "Mentions")]
    pub mentions: u64,
}

fn rank(records: impl Iterator<Item = (String, u64)>, limit: usize) -> Vec<SymbolTotal> {
    let mut totals: HashMap<String, u64> = HashMap::new();
    for (symbol, mentions) in records {
        *totals.entry(symbol).or_insert(0) += mentions;
    }

    let mut rows: Vec<SymbolTotal> = totals
        .into_iter()
        .map(|(symbol, mentions)| SymbolTotal { symbol, mentions })
        .collect();
    rows.sort_by(|a, b| b.mentions.cmp(&a.mentions).then_with(|| a.symbol.cmp(&b.symbol)));
    rows.truncate(limit);
    rows
}

/// Top symbols over all records: group by symbol, sum mentions, sort
/// descending with the symbol name as ascending tie-break.
pub fn top_overall(records: &[CombinedRecord], limit: usize) -> Vec<SymbolTotal> {
    rank(
        records.iter().map(|r| (r.symbol.clone(), r.mentions)),
        limit,
    )
}

/// Trending symbols over a trailing calendar-day window ending at `today`
/// (inclusive lower bound). Empty when no record falls in the window.
pub fn trending_as_of(
    records: &[CombinedRecord],
    window_days: i64,
    limit: usize,
    today: NaiveDate,
) -> Vec<SymbolTotal> {
    let cutoff = today - Duration::days(window_days);
    rank(
        records
            .iter()
            .filter(|r| r.date >= cutoff)
            .map(|r| (r.symbol.clone(), r.mentions)),
        limit,
    )
}

/// `trending_as_of` anchored at the current date.
pub fn trending(records: &[CombinedRecord], window_days: i64, limit: usize) -> Vec<SymbolTotal> {
    trending_as_of(records, window_days, limit, Utc::now().date_naive())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, TimeZone};

    fn record(day: u32, symbol: &str, mentions: u64) -> CombinedRecord {
        let date_time: DateTime<Utc> = Utc.with_ymd_and_hms(2025, 7, day, 12, 0, 0).unwrap();
        CombinedRecord {
            date: date_time.date_naive(),
            date_time,
            timestamp: date_time.format("%Y%m%d_%H%M%S").to_string(),
            symbol: symbol.to_string(),
            mentions,
            total_mentions_in_session: mentions,
            unique_symbols_in_session: 1,
        }
    }

    #[test]
    fn test_top_overall_sums_across_sessions() {
        let records = vec![
            record(7, "GME", 5),
            record(8, "GME", 3),
            record(8, "AAPL", 6),
        ];
        let top = top_overall(&records, 10);

        assert_eq!(top[0], SymbolTotal { symbol: "GME".to_string(), mentions: 8 });
        assert_eq!(top[1], SymbolTotal { symbol: "AAPL".to_string(), mentions: 6 });
    }

    #[test]
    fn test_top_overall_is_stable_under_input_reordering() {
        let mut records = vec![
            record(7, "TSLA", 2),
            record(8, "AAPL", 4),
            record(9, "GME", 4),
        ];
        let forward = top_overall(&records, 10);
        records.reverse();
        let reversed = top_overall(&records, 10);

        assert_eq!(forward, reversed);
        // Tie at 4 breaks alphabetically
        assert_eq!(forward[0].symbol, "AAPL");
        assert_eq!(forward[1].symbol, "GME");
        assert_eq!(forward[2].symbol, "TSLA");
    }

    #[test]
    fn test_top_overall_truncates_to_limit() {
        let records = vec![
            record(7, "GME", 5),
            record(7, "AAPL", 4),
            record(7, "TSLA", 3),
        ];
        assert_eq!(top_overall(&records, 2).len(), 2);
    }

    #[test]
    fn test_trending_excludes_records_outside_window() {
        // The old record has the single highest count overall
        let records = vec![record(1, "GME", 100), record(9, "AAPL", 2)];
        let today = NaiveDate::from_ymd_opt(2025, 7, 10).unwrap();

        let trending = trending_as_of(&records, 7, 10, today);
        assert_eq!(trending.len(), 1);
        assert_eq!(trending[0].symbol, "AAPL");
    }

    #[test]
    fn test_trending_window_lower_bound_is_inclusive() {
        let records = vec![record(3, "GME", 5)];
        let today = NaiveDate::from_ymd_opt(2025, 7, 10).unwrap();

        // 2025-07-03 is exactly today - 7 days
        assert_eq!(trending_as_of(&records, 7, 10, today).len(), 1);
        assert!(trending_as_of(&records, 6, 10, today).is_empty());
    }

    #[test]
    fn test_trending_empty_window_is_empty() {
        let records = vec![record(1, "GME", 5)];
        let today = NaiveDate::from_ymd_opt(2025, 12, 1).unwrap();
        assert!(trending_as_of(&records, 7, 10, today).is_empty());
    }
}
