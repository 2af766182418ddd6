//! Analyzer Core - Cross-Session Trend Analysis
//!
//! Stateless pure transforms over loaded session results.
//!
//! # Architecture
//!
//! ```text
//! SessionStore.load_all → combine (one record per session × symbol)
//!     ↓
//! top_overall / trending / timeline
//!     ↓
//! summarize → SummaryReport
//!     ↓
//! build_artifacts → AnalysisArtifacts → SessionStore.save_analysis
//! ```

pub mod combiner;
pub mod report;
pub mod trends;

pub use combiner::{combine, timeline, CombinedRecord};
pub use report::{build_artifacts, summarize, summarize_as_of, AnalysisArtifacts, SummaryReport};
pub use trends::{top_overall, trending, trending_as_of, SymbolTotal};
