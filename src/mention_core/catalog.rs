//! Symbol catalog loaded from the ticker list CSV

use std::collections::HashSet;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

#[derive(Debug)]
pub enum CatalogError {
    NotFound(PathBuf),
    Io(std::io::Error),
    Parse(String),
}

impl std::fmt::Display for CatalogError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CatalogError::NotFound(path) => {
                write!(f, "Stock symbols file not found: {}", path.display())
            }
            CatalogError::Io(e) => write!(f, "Error reading symbol list: {}", e),
            CatalogError::Parse(msg) => write!(f, "Malformed symbol list: {}", msg),
        }
    }
}

impl std::error::Error for CatalogError {}

/// The authoritative set of valid ticker symbols plus the exclusion set used
/// to suppress false positives. Loaded once, immutable afterwards.
#[derive(Debug)]
pub struct SymbolCatalog {
    valid_symbols: HashSet<String>,
    excluded_words: HashSet<String>,
}

impl SymbolCatalog {
    /// Load the catalog from a CSV file with a `Symbol` header column.
    pub fn load(path: &Path, excluded_words: &[String]) -> Result<Self, CatalogError> {
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                return Err(CatalogError::NotFound(path.to_path_buf()))
            }
            Err(e) => return Err(CatalogError::Io(e)),
        };

        let catalog = Self::from_csv(&content, excluded_words)?;
        log::info!("Loaded {} stock symbols", catalog.symbol_count());
        Ok(catalog)
    }

    /// Parse catalog contents. Symbols are upper-cased on load; duplicates
    /// collapse into the set.
    pub fn from_csv(content: &str, excluded_words: &[String]) -> Result<Self, CatalogError> {
        let mut lines = content.lines();

        let header = lines
            .next()
            .ok_or_else(|| CatalogError::Parse("symbol list is empty".to_string()))?;
        let symbol_column = header
            .split(',')
            .position(|column| column.trim() == "Symbol")
            .ok_or_else(|| CatalogError::Parse("missing 'Symbol' header column".to_string()))?;

        let mut valid_symbols = HashSet::new();
        for (index, line) in lines.enumerate() {
            if line.trim().is_empty() {
                continue;
            }
            let cell = line.split(',').nth(symbol_column).ok_or_else(|| {
                CatalogError::Parse(format!("row {}: missing Symbol value", index + 2))
            })?;
            let symbol = cell.trim().to_uppercase();
            if !symbol.is_empty() {
                valid_symbols.insert(symbol);
            }
        }

        Ok(Self {
            valid_symbols,
            excluded_words: excluded_words.iter().map(|w| w.to_uppercase()).collect(),
        })
    }

    pub fn is_symbol(&self, token: &str) -> bool {
        self.valid_symbols.contains(token)
    }

    pub fn is_excluded(&self, token: &str) -> bool {
        self.excluded_words.contains(token)
    }

    pub fn symbol_count(&self) -> usize {
        self.valid_symbols.len()
    }
}
