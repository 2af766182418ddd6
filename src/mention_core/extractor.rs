//! Ticker symbol extraction from free text

use super::catalog::SymbolCatalog;
use regex::Regex;

/// Extracts known-symbol mentions from a text blob.
///
/// Tokens are maximal alphabetic runs of 1-5 upper-case letters (a longer
/// run fails the word boundary and yields nothing, so `ABCDEF` never
/// produces `ABCDE`). Matching is case-insensitive against the catalog;
/// the exclusion set is checked after catalog membership.
pub struct SymbolExtractor {
    token_pattern: Regex,
    min_len: usize,
    max_len: usize,
}

impl SymbolExtractor {
    pub fn new(min_len: usize, max_len: usize) -> Self {
        let token_pattern = Regex::new(r"\b[A-Z]{1,5}\b").expect("valid token pattern");
        Self {
            token_pattern,
            min_len,
            max_len,
        }
    }

    /// Extract valid symbol mentions in first-occurrence order.
    ///
    /// Duplicates within one text unit are preserved; the caller counts
    /// them. Empty text yields an empty list.
    pub fn extract(&self, text: &str, catalog: &SymbolCatalog) -> Vec<String> {
        if text.is_empty() {
            return Vec::new();
        }

        let upper = text.to_uppercase();
        let mut found = Vec::new();

        for token in self.token_pattern.find_iter(&upper) {
            let token = token.as_str();
            if token.len() < self.min_len || token.len() > self.max_len {
                continue;
            }
            if catalog.is_symbol(token) && !catalog.is_excluded(token) {
                found.push(token.to_string());
            }
        }

        found
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog(symbols: &[&str], excluded: &[&str]) -> SymbolCatalog {
        let mut csv = String::from("Symbol\n");
        for s in symbols {
            csv.push_str(s);
            csv.push('\n');
        }
        let excluded: Vec<String> = excluded.iter().map(|w| w.to_string()).collect();
        SymbolCatalog::from_csv(&csv, &excluded).unwrap()
    }

    #[test]
    fn test_extract_keeps_first_occurrence_order() {
        let catalog = catalog(&["GME", "AAPL"], &["AND", "I", "THE", "TO", "CALLS"]);
        let extractor = SymbolExtractor::new(1, 5);

        let found = extractor.extract("GME to the moon AND I sold AAPL calls", &catalog);
        assert_eq!(found, vec!["GME".to_string(), "AAPL".to_string()]);
    }

    #[test]
    fn test_extract_is_case_insensitive() {
        let catalog = catalog(&["GME"], &[]);
        let extractor = SymbolExtractor::new(1, 5);

        assert_eq!(extractor.extract("holding gme forever", &catalog), vec!["GME"]);
    }

    #[test]
    fn test_duplicates_within_one_text_are_preserved() {
        let catalog = catalog(&["AAPL"], &[]);
        let extractor = SymbolExtractor::new(1, 5);

        let found = extractor.extract("AAPL AAPL", &catalog);
        assert_eq!(found.len(), 2);
    }

    #[test]
    fn test_empty_text_yields_empty_list() {
        let catalog = catalog(&["GME"], &[]);
        let extractor = SymbolExtractor::new(1, 5);

        assert!(extractor.extract("", &catalog).is_empty());
    }

    #[test]
    fn test_length_bounds_are_respected() {
        let catalog = catalog(&["A", "GM", "GME", "GMEX", "GMEXY"], &[]);
        let extractor = SymbolExtractor::new(2, 4);

        let found = extractor.extract("A GM GME GMEX GMEXY", &catalog);
        for symbol in &found {
            assert!(symbol.len() >= 2 && symbol.len() <= 4, "out of bounds: {}", symbol);
        }
        assert_eq!(found, vec!["GM", "GME", "GMEX"]);
    }

    #[test]
    fn test_runs_longer_than_five_letters_never_match() {
        let catalog = catalog(&["GMEXY"], &[]);
        let extractor = SymbolExtractor::new(1, 5);

        // GMEXYZ is a six-letter run; no 5-letter prefix is a token
        assert!(extractor.extract("GMEXYZ", &catalog).is_empty());
    }

    #[test]
    fn test_exclusion_is_checked_after_membership() {
        // DD is both a valid symbol and excluded; exclusion wins.
        // XYZ is excluded but not in the catalog; membership already filters it.
        let catalog = catalog(&["DD", "GME"], &["DD", "XYZ"]);
        let extractor = SymbolExtractor::new(1, 5);

        assert_eq!(extractor.extract("DD on GME and XYZ", &catalog), vec!["GME"]);
    }

    #[test]
    fn test_tokens_bounded_by_digits_do_not_match() {
        let catalog = catalog(&["GME"], &[]);
        let extractor = SymbolExtractor::new(1, 5);

        // No word boundary between a letter and a digit
        assert!(extractor.extract("GME4", &catalog).is_empty());
        assert_eq!(extractor.extract("GME-USD", &catalog), vec!["GME"]);
    }
}
