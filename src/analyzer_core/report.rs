//! Summary reports and analysis artifact rendering

use super::combiner::CombinedRecord;
use super::trends::{top_overall, trending_as_of, SymbolTotal};
use crate::mention_core::SessionResult;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Cross-session summary, one instance per analysis invocation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SummaryReport {
    pub report_date: DateTime<Utc>,
    pub total_crawls: usize,
    pub unique_symbols: usize,
    pub total_mentions: u64,
    pub date_range: Option<String>,
    pub top_symbols: Vec<SymbolTotal>,
    pub trending_symbols: Vec<SymbolTotal>,
}

/// Rendered analysis artifacts, ready for the session store. Tables are
/// absent when there is nothing to tabulate.
#[derive(Debug, Clone)]
pub struct AnalysisArtifacts {
    pub combined: Option<String>,
    pub top_symbols: Option<String>,
    pub trending: Option<String>,
    pub summary: String,
}

/// Build the summary for a set of sessions and their combined records,
/// anchored at `today` for the trending window.
///
/// Sessions with empty per-symbol maps produce no records; the report
/// still carries `total_crawls` and zeroes the rest instead of failing.
pub fn summarize_as_of(
    sessions: &[SessionResult],
    records: &[CombinedRecord],
    today: NaiveDate,
) -> SummaryReport {
    if records.is_empty() {
        return SummaryReport {
            report_date: Utc::now(),
            total_crawls: sessions.len(),
            unique_symbols: 0,
            total_mentions: 0,
            date_range: None,
            top_symbols: Vec::new(),
            trending_symbols: Vec::new(),
        };
    }

    let unique_symbols = records
        .iter()
        .map(|r| r.symbol.as_str())
        .collect::<HashSet<_>>()
        .len();
    let total_mentions = records.iter().map(|r| r.mentions).sum();

    let min_date = records.iter().map(|r| r.date).min();
    let max_date = records.iter().map(|r| r.date).max();
    let date_range = match (min_date, max_date) {
        (Some(min), Some(max)) => Some(format!("{} to {}", min, max)),
        _ => None,
    };

    SummaryReport {
        report_date: Utc::now(),
        total_crawls: sessions.len(),
        unique_symbols,
        total_mentions,
        date_range,
        top_symbols: top_overall(records, 10),
        trending_symbols: trending_as_of(records, 7, 5, today),
    }
}

/// `summarize_as_of` anchored at the current date.
pub fn summarize(sessions: &[SessionResult], records: &[CombinedRecord]) -> SummaryReport {
    summarize_as_of(sessions, records, Utc::now().date_naive())
}

/// Render the combined table: one CSV row per (session, symbol) record.
pub fn combined_csv(records: &[CombinedRecord]) -> String {
    let mut out = String::from("Date,DateTime,Timestamp,Symbol,Mentions,TotalMentions,UniqueSymbols\n");
    for record in records {
        out.push_str(&format!(
            "{},{},{},{},{},{},{}\n",
            record.date,
            record.date_time.format("%Y-%m-%d %H:%M:%S"),
            record.timestamp,
            record.symbol,
            record.mentions,
            record.total_mentions_in_session,
            record.unique_symbols_in_session,
        ));
    }
    out
}

/// Render a symbol-total table (`Symbol,Mentions`).
pub fn totals_csv(rows: &[SymbolTotal]) -> String {
    let mut out = String::from("Symbol,Mentions\n");
    for row in rows {
        out.push_str(&format!("{},{}\n", row.symbol, row.mentions));
    }
    out
}

/// Assemble every analysis artifact for one pass. Tables cover more rows
/// than the summary embeds (top 50, trending 20).
pub fn build_artifacts(
    sessions: &[SessionResult],
    records: &[CombinedRecord],
    today: NaiveDate,
) -> serde_json::Result<AnalysisArtifacts> {
    let combined = if records.is_empty() {
        None
    } else {
        Some(combined_csv(records))
    };

    let top = top_overall(records, 50);
    let top_symbols = if top.is_empty() { None } else { Some(totals_csv(&top)) };

    let trending = trending_as_of(records, 7, 20, today);
    let trending = if trending.is_empty() {
        None
    } else {
        Some(totals_csv(&trending))
    };

    let summary = serde_json::to_string_pretty(&summarize_as_of(sessions, records, today))?;

    Ok(AnalysisArtifacts {
        combined,
        top_symbols,
        trending,
        summary,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzer_core::combiner::combine;
    use crate::mention_core::SymbolCounts;
    use chrono::TimeZone;

    fn session(day: u32, counts: Vec<(&str, u64)>) -> SessionResult {
        let crawl_date = Utc.with_ymd_and_hms(2025, 7, day, 12, 0, 0).unwrap();
        let pairs: Vec<(String, u64)> = counts.into_iter().map(|(s, c)| (s.to_string(), c)).collect();
        let total = pairs.iter().map(|(_, c)| c).sum();
        SessionResult {
            timestamp: crawl_date.format("%Y%m%d_%H%M%S").to_string(),
            crawl_date,
            total_symbols_found: pairs.len(),
            total_mentions: total,
            feed: "wallstreetbets".to_string(),
            results: SymbolCounts::new(pairs),
        }
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 7, 10).unwrap()
    }

    #[test]
    fn test_summarize_empty_inputs_is_zeroed_not_error() {
        let report = summarize_as_of(&[], &[], today());

        assert_eq!(report.total_crawls, 0);
        assert_eq!(report.unique_symbols, 0);
        assert_eq!(report.total_mentions, 0);
        assert!(report.date_range.is_none());
        assert!(report.top_symbols.is_empty());
        assert!(report.trending_symbols.is_empty());
    }

    #[test]
    fn test_summarize_sessions_without_records_keeps_crawl_count() {
        let sessions = vec![session(7, vec![]), session(8, vec![])];
        let records = combine(&sessions);
        let report = summarize_as_of(&sessions, &records, today());

        assert_eq!(report.total_crawls, 2);
        assert_eq!(report.unique_symbols, 0);
        assert!(report.date_range.is_none());
    }

    #[test]
    fn test_summarize_wraps_totals_and_ranges() {
        let sessions = vec![
            session(7, vec![("GME", 5), ("AAPL", 2)]),
            session(9, vec![("GME", 1)]),
        ];
        let records = combine(&sessions);
        let report = summarize_as_of(&sessions, &records, today());

        assert_eq!(report.total_crawls, 2);
        assert_eq!(report.unique_symbols, 2);
        assert_eq!(report.total_mentions, 8);
        assert_eq!(report.date_range.as_deref(), Some("2025-07-07 to 2025-07-09"));
        assert_eq!(report.top_symbols[0].symbol, "GME");
        assert!(!report.trending_symbols.is_empty());
    }

    #[test]
    fn test_combined_csv_rows_match_records() {
        let sessions = vec![session(7, vec![("GME", 5)])];
        let records = combine(&sessions);
        let csv = combined_csv(&records);

        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines[0], "Date,DateTime,Timestamp,Symbol,Mentions,TotalMentions,UniqueSymbols");
        assert_eq!(lines[1], "2025-07-07,2025-07-07 12:00:00,20250707_120000,GME,5,5,1");
    }

    #[test]
    fn test_build_artifacts_omits_empty_tables() {
        let artifacts = build_artifacts(&[], &[], today()).unwrap();

        assert!(artifacts.combined.is_none());
        assert!(artifacts.top_symbols.is_none());
        assert!(artifacts.trending.is_none());
        assert!(artifacts.summary.contains("total_crawls"));
    }

    #[test]
    fn test_build_artifacts_renders_all_tables() {
        let sessions = vec![session(9, vec![("GME", 5), ("AAPL", 2)])];
        let records = combine(&sessions);
        let artifacts = build_artifacts(&sessions, &records, today()).unwrap();

        assert!(artifacts.combined.unwrap().contains("GME"));
        assert!(artifacts.top_symbols.unwrap().starts_with("Symbol,Mentions"));
        assert!(artifacts.trending.unwrap().contains("AAPL"));

        let summary: SummaryReport = serde_json::from_str(&artifacts.summary).unwrap();
        assert_eq!(summary.total_crawls, 1);
        assert_eq!(summary.total_mentions, 7);
    }
}
