//! Data collection: walk documents and collect path statistics.
//!
//! This module handles the second stage of the pipeline - walking parsed XML
//! documents and accumulating statistics for every element and attribute
//! path. It provides:
//!
//! - **Paths**: Key construction and attribute value normalization
//! - **Statistics**: Core data structures (`PathStats`, `CorpusStats`, etc.)
//! - **Aggregation**: The tree walk itself (`PathAggregator`)
//! - **Scanning**: High-level API (`scan_paths`, `scan_directory`, `scan_file`)
//!
//! ## Example
//!
//! ```rust,ignore
//! use xmlshapelib::data::{scan_paths, ScanOptions};
//!
//! let result = scan_paths(&["output/xml/preserve"], &ScanOptions::new())?;
//! println!("{} distinct paths", result.stats.len());
//! ```

pub mod aggregator;
pub mod path;
pub mod scanner;
pub mod stats;

pub use aggregator::{fold_file_into_corpus, parse_document, PathAggregator};
pub use path::ValueNormalizer;
pub use scanner::{scan_directory, scan_documents, scan_file, scan_paths, ScanOptions};
pub use stats::{
    CorpusStats, FileCounters, PathEntry, PathKind, PathStats, SampleRecord, ScanResult,
    SkippedDocument, NO_SAMPLE,
};
