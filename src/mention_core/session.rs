//! Session identity and persisted result records

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Compact session timestamp form, e.g. `20250707_210032` (UTC)
pub const COMPACT_TIMESTAMP_FORMAT: &str = "%Y%m%d_%H%M%S";

/// Canonical session identifier of the form `YYYY-MM-DD/HHMMSS/`.
///
/// Zero-padded fields make descending lexicographic order equal to
/// descending chronological order; any future id scheme must keep this
/// property or re-sort by parsed time.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SessionId(String);

impl SessionId {
    pub fn from_datetime(at: &DateTime<Utc>) -> Self {
        SessionId(at.format("%Y-%m-%d/%H%M%S/").to_string())
    }

    pub fn now() -> Self {
        Self::from_datetime(&Utc::now())
    }

    /// Derive the id from a compact session timestamp.
    pub fn from_compact(timestamp: &str) -> Option<Self> {
        let parsed = NaiveDateTime::parse_from_str(timestamp, COMPACT_TIMESTAMP_FORMAT).ok()?;
        Some(SessionId(parsed.format("%Y-%m-%d/%H%M%S/").to_string()))
    }

    /// Validate a relative session path of the form `YYYY-MM-DD/HHMMSS/`.
    pub fn parse(path: &str) -> Option<Self> {
        let trimmed = path.strip_suffix('/')?;
        let (date, time) = trimmed.split_once('/')?;
        if time.len() != 6 || time.contains('/') {
            return None;
        }
        NaiveDate::parse_from_str(date, "%Y-%m-%d").ok()?;
        NaiveTime::parse_from_str(time, "%H%M%S").ok()?;
        Some(SessionId(format!("{}/{}/", date, time)))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Symbol → mention-count mapping, kept in descending count order.
///
/// Serialized as a JSON object; a plain `HashMap` would lose the ordering
/// on the wire, so serde goes through the pair list directly.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SymbolCounts(Vec<(String, u64)>);

impl SymbolCounts {
    pub fn new(pairs: Vec<(String, u64)>) -> Self {
        SymbolCounts(pairs)
    }

    pub fn iter(&self) -> impl Iterator<Item = &(String, u64)> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn total(&self) -> u64 {
        self.0.iter().map(|(_, count)| count).sum()
    }

    pub fn get(&self, symbol: &str) -> Option<u64> {
        self.0
            .iter()
            .find(|(s, _)| s == symbol)
            .map(|(_, count)| *count)
    }
}

impl Serialize for SymbolCounts {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (symbol, count) in &self.0 {
            map.serialize_entry(symbol, count)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for SymbolCounts {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct CountsVisitor;

        impl<'de> Visitor<'de> for CountsVisitor {
            type Value = SymbolCounts;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a symbol to mention-count map")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
                let mut pairs = Vec::with_capacity(access.size_hint().unwrap_or(0));
                while let Some((symbol, count)) = access.next_entry::<String, u64>()? {
                    pairs.push((symbol, count));
                }
                Ok(SymbolCounts(pairs))
            }
        }

        deserializer.deserialize_map(CountsVisitor)
    }
}

/// One complete crawl run, as persisted to storage.
///
/// Invariants: `total_mentions` equals the sum of `results` values and
/// `total_symbols_found` equals the number of `results` keys.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionResult {
    pub timestamp: String,
    pub crawl_date: DateTime<Utc>,
    pub total_symbols_found: usize,
    pub total_mentions: u64,
    #[serde(rename = "subreddit")]
    pub feed: String,
    pub results: SymbolCounts,
}

impl SessionResult {
    /// Session id derived from the compact timestamp; `None` when the
    /// timestamp field is corrupt.
    pub fn session_id(&self) -> Option<SessionId> {
        SessionId::from_compact(&self.timestamp)
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    pub fn from_json(content: &str) -> serde_json::Result<Self> {
        serde_json::from_str(content)
    }

    /// Tabular dump: one row per symbol, columns `Symbol,Mentions,Timestamp,Date`.
    pub fn to_csv(&self) -> String {
        let mut out = String::from("Symbol,Mentions,Timestamp,Date\n");
        let date = self.crawl_date.format("%Y-%m-%d %H:%M:%S");
        for (symbol, count) in self.results.iter() {
            out.push_str(&format!("{},{},{},{}\n", symbol, count, self.timestamp, date));
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn sample_result() -> SessionResult {
        let crawl_date = Utc.with_ymd_and_hms(2025, 7, 7, 21, 0, 32).unwrap();
        SessionResult {
            timestamp: "20250707_210032".to_string(),
            crawl_date,
            total_symbols_found: 2,
            total_mentions: 7,
            feed: "wallstreetbets".to_string(),
            results: SymbolCounts::new(vec![("GME".to_string(), 5), ("AAPL".to_string(), 2)]),
        }
    }

    #[test]
    fn test_session_id_from_compact_timestamp() {
        let id = SessionId::from_compact("20250707_210032").unwrap();
        assert_eq!(id.as_str(), "2025-07-07/210032/");
    }

    #[test]
    fn test_session_id_parse_rejects_malformed_paths() {
        assert!(SessionId::parse("2025-07-07/210032/").is_some());
        assert!(SessionId::parse("2025-07-07/210032").is_none());
        assert!(SessionId::parse("2025-07-07/21003/").is_none());
        assert!(SessionId::parse("2025-13-07/210032/").is_none());
        assert!(SessionId::parse("notadate/210032/").is_none());
    }

    #[test]
    fn test_json_round_trip_preserves_count_order() {
        let result = sample_result();
        let json = result.to_json().unwrap();
        let restored = SessionResult::from_json(&json).unwrap();

        assert_eq!(restored.results, result.results);
        assert_eq!(restored.total_mentions, 7);
        assert_eq!(restored.total_symbols_found, 2);
        assert_eq!(restored.feed, "wallstreetbets");
        assert_eq!(restored.crawl_date, result.crawl_date);
    }

    #[test]
    fn test_json_uses_original_wire_names() {
        let json = sample_result().to_json().unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert!(value.get("subreddit").is_some());
        assert!(value.get("crawl_date").is_some());
        assert!(value.get("total_symbols_found").is_some());
        assert_eq!(value["results"]["GME"], 5);
    }

    #[test]
    fn test_csv_dump_has_one_row_per_symbol() {
        let csv = sample_result().to_csv();
        let lines: Vec<&str> = csv.lines().collect();

        assert_eq!(lines[0], "Symbol,Mentions,Timestamp,Date");
        assert_eq!(lines[1], "GME,5,20250707_210032,2025-07-07 21:00:32");
        assert_eq!(lines[2], "AAPL,2,20250707_210032,2025-07-07 21:00:32");
        assert_eq!(lines.len(), 3);
    }
}
